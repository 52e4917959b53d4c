//! wires join two pins. geometry is derived from the pins they name

use std::fmt;

use serde::{Deserialize, Serialize};

use super::devices::InstanceId;

/// a port of a placed instance
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PinRef {
    pub instance: InstanceId,
    pub port: String,
}

impl PinRef {
    pub fn new(instance: impl Into<InstanceId>, port: &str) -> Self {
        PinRef {
            instance: instance.into(),
            port: port.to_string(),
        }
    }
}

impl fmt::Display for PinRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.instance, self.port)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WireId(pub usize);

impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "w{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wire {
    pub id: WireId,
    pub start: PinRef,
    pub end: PinRef,
}

impl Wire {
    pub fn touches(&self, instance: &InstanceId) -> bool {
        &self.start.instance == instance || &self.end.instance == instance
    }
}
