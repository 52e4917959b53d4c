use std::fmt;

use crate::schematic::{InstanceId, PinRef, Rotation, WireId};
use crate::transforms::{CSPoint, SSPoint, VSPoint};

/// rubber band shown while wiring, from the start pin to the snapped cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WirePreview {
    pub anchor: SSPoint,
    pub tip: SSPoint,
}

impl WirePreview {
    pub fn new(anchor: SSPoint) -> Self {
        WirePreview { anchor, tip: anchor }
    }

    /// orthogonal route from anchor to tip, vertical leg first. empty if the two coincide
    pub fn route(&self) -> Vec<SSPoint> {
        let delta = self.tip - self.anchor;
        match (delta.x, delta.y) {
            (0, 0) => vec![],
            (0, _) | (_, 0) => vec![self.anchor, self.tip],
            (_, y) => {
                let corner = SSPoint::new(self.anchor.x, self.anchor.y + y);
                vec![self.anchor, corner, self.tip]
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum EditorState {
    #[default]
    Idle,
    /// a component picked from the library follows the cursor
    Placing {
        component: String,
        rotation: Rotation,
        at: SSPoint,
    },
    /// an instance follows the cursor. origin is where it was when grabbed
    Dragging {
        instance: InstanceId,
        grab: VSPoint,
        origin: SSPoint,
    },
    Wiring {
        start: PinRef,
        preview: WirePreview,
    },
    Panning {
        last: CSPoint,
    },
}

impl EditorState {
    pub fn is_idle(&self) -> bool {
        matches!(self, EditorState::Idle)
    }
}

impl fmt::Display for EditorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditorState::Idle => write!(f, "idle"),
            EditorState::Placing { component, .. } => write!(f, "placing {}", component),
            EditorState::Dragging { instance, .. } => write!(f, "dragging {}", instance),
            EditorState::Wiring { start, .. } => write!(f, "wiring from {}", start),
            EditorState::Panning { .. } => write!(f, "panning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Instance(InstanceId),
    Wire(WireId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_route() {
        let mut p = WirePreview::new(SSPoint::new(0, 0));
        assert!(p.route().is_empty());
        p.tip = SSPoint::new(30, 0);
        assert_eq!(p.route(), vec![SSPoint::new(0, 0), SSPoint::new(30, 0)]);
        p.tip = SSPoint::new(30, -20);
        assert_eq!(
            p.route(),
            vec![SSPoint::new(0, 0), SSPoint::new(0, -20), SSPoint::new(30, -20)]
        );
    }
}
