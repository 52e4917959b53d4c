//! schematic editor core: the graph of placed components and wires, the nets derived from it, and
//! the interaction state machine editing it. rendering and simulation live elsewhere, the latter
//! behind [`qucslink::Simulator`].

pub mod config;
pub mod editor;
pub mod schematic;
pub mod submit;
pub mod transforms;
pub mod viewport;

pub use config::{ConfigError, EditorConfig, NetConfig};
pub use editor::{Editor, EditorEvent, EditorState, Key, MouseButton, Selection};
pub use schematic::nets::{resolve_nets, NetError, NetLookup};
pub use schematic::{
    Catalog, CatalogError, Change, ComponentDef, InstanceId, PinRef, Schematic, SchematicError,
    WireId,
};
