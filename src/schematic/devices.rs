//! the component catalog: definitions by id, plus the instances placed from them
mod builtin;
mod deviceinstance;
mod devicetype;

use std::collections::BTreeMap;
use std::path::Path;

pub use self::builtin::BUILTIN;
pub use self::deviceinstance::{Instance, InstanceId, Rotation};
pub use self::devicetype::{ComponentDef, ParamSpec, PinGeometry};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("component `{component}`: port `{port}` has no pin geometry")]
    MissingPin { component: String, port: String },
    #[error("could not read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// read-only set of component definitions, keyed by id
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    defs: BTreeMap<String, ComponentDef>,
}

impl Catalog {
    pub fn new() -> Self {
        Catalog::default()
    }

    /// the built-in catalog, see [`BUILTIN`]
    pub fn builtin() -> Self {
        (*BUILTIN).clone()
    }

    /// parse a JSON array of component definitions
    pub fn from_json(s: &str) -> Result<Self, CatalogError> {
        let defs: Vec<ComponentDef> = serde_json::from_str(s)?;
        let mut catalog = Catalog::new();
        for def in defs {
            catalog.insert(def)?;
        }
        Ok(catalog)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let s = std::fs::read_to_string(path)?;
        Self::from_json(&s)
    }

    /// inserts a definition, replacing any previous one with the same id.
    /// every port must come with a pin of the same name
    pub fn insert(&mut self, def: ComponentDef) -> Result<(), CatalogError> {
        if let Some(port) = def.ports.iter().find(|p| def.pin(p).is_none()) {
            return Err(CatalogError::MissingPin {
                component: def.id.clone(),
                port: port.clone(),
            });
        }
        if self.defs.contains_key(&def.id) {
            log::warn!("component `{}` redefined", def.id);
        }
        self.defs.insert(def.id.clone(), def);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&ComponentDef> {
        self.defs.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.defs.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ComponentDef> {
        self.defs.values()
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}
