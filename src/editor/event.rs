//! abstract input commands. positions are in canvas space

use serde::{Deserialize, Serialize};

use crate::transforms::CSPoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseButton {
    Primary,
    Secondary,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Escape,
    Delete,
    Rotate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EditorEvent {
    /// a component was picked from the library
    LibraryPress { component: String },
    PointerDown { button: MouseButton, pos: CSPoint },
    PointerMove { pos: CSPoint },
    PointerUp { button: MouseButton, pos: CSPoint },
    /// positive delta zooms in
    Wheel { delta: f32, pos: CSPoint },
    KeyPress { key: Key },
}

impl EditorEvent {
    /// cursor position carried by the event, if any
    pub fn pos(&self) -> Option<CSPoint> {
        match self {
            EditorEvent::PointerDown { pos, .. }
            | EditorEvent::PointerMove { pos }
            | EditorEvent::PointerUp { pos, .. }
            | EditorEvent::Wheel { pos, .. } => Some(*pos),
            EditorEvent::LibraryPress { .. } | EditorEvent::KeyPress { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_format() {
        let evs: Vec<EditorEvent> = serde_json::from_str(
            r#"[
                {"type": "LibraryPress", "component": "resistor"},
                {"type": "PointerDown", "button": "Primary", "pos": [12.0, 31.5]},
                {"type": "KeyPress", "key": "Escape"}
            ]"#,
        )
        .unwrap();
        assert_eq!(
            evs[1],
            EditorEvent::PointerDown {
                button: MouseButton::Primary,
                pos: CSPoint::new(12.0, 31.5)
            }
        );
        assert_eq!(evs[1].pos(), Some(CSPoint::new(12.0, 31.5)));
        assert_eq!(evs[2].pos(), None);
    }
}
