use std::collections::BTreeMap;
use std::fmt;

use qucslink::ParamValue;
use serde::{Deserialize, Serialize};

use super::devicetype::ComponentDef;
use crate::transforms::{SSBox, SSPoint, SSTransform, SST_CCWR, SST_CWR, SST_HALF, SST_IDENTITY};

/// instance designator, `<prefix><ordinal>`, e.g. `R1`. never reused within a session
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(String);

impl InstanceId {
    pub fn new(prefix: &str, ord: usize) -> Self {
        InstanceId(format!("{}{}", prefix, ord))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for InstanceId {
    fn from(s: &str) -> Self {
        InstanceId(s.to_string())
    }
}

impl PartialEq<str> for InstanceId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for InstanceId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// orthogonal orientation of an instance, clockwise from its definition
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    pub fn transform(self) -> SSTransform {
        match self {
            Rotation::R0 => SST_IDENTITY,
            Rotation::R90 => SST_CWR,
            Rotation::R180 => SST_HALF,
            Rotation::R270 => SST_CCWR,
        }
    }

    /// the next orientation, 90 deg clockwise
    pub fn rotated(self) -> Self {
        match self {
            Rotation::R0 => Rotation::R90,
            Rotation::R90 => Rotation::R180,
            Rotation::R180 => Rotation::R270,
            Rotation::R270 => Rotation::R0,
        }
    }
}

/// a placed component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    pub id: InstanceId,
    /// catalog id of the component definition
    pub component: String,
    pub position: SSPoint,
    pub rotation: Rotation,
    /// current parameter values, snapshot of the defaults at creation
    pub params: BTreeMap<String, ParamValue>,
}

impl Instance {
    pub fn new(id: InstanceId, def: &ComponentDef, position: SSPoint) -> Self {
        Instance {
            id,
            component: def.id.clone(),
            position,
            rotation: Rotation::R0,
            params: def.default_params(),
        }
    }

    /// schematic space transform of the instance: rotation, then translation to its position
    pub fn sst(&self) -> SSTransform {
        self.rotation
            .transform()
            .then_translate(self.position.to_vector())
    }

    /// absolute position of the named port, if def has it
    pub fn pin_position(&self, def: &ComponentDef, port: &str) -> Option<SSPoint> {
        def.pin(port).map(|p| self.sst().transform_point(p.offset()))
    }

    pub fn bounds(&self, def: &ComponentDef, padding: i32) -> SSBox {
        def.body_bounds(&self.rotation.transform(), padding)
            .translate(self.position.to_vector())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_turn() {
        let mut r = Rotation::R0;
        for _ in 0..4 {
            r = r.rotated();
        }
        assert_eq!(r, Rotation::R0);
    }

    #[test]
    fn pin_position_rotates_then_translates() {
        let def = ComponentDef::new("resistor", "Resistor", "R").with_port("p2", 0, 30);
        let mut inst = Instance::new(InstanceId::new("R", 1), &def, SSPoint::new(100, 50));
        assert_eq!(inst.pin_position(&def, "p2"), Some(SSPoint::new(100, 80)));
        inst.rotation = Rotation::R90;
        assert_eq!(inst.pin_position(&def, "p2"), Some(SSPoint::new(130, 50)));
        assert_eq!(inst.pin_position(&def, "p3"), None);
        assert_eq!(inst.id, "R1");
    }
}
