//! component definitions as supplied by the catalog. read-only once loaded.

use std::collections::BTreeMap;

use qucslink::ParamValue;
use serde::{Deserialize, Serialize};

use crate::transforms::{SSBox, SSPoint, SSTransform};

/// pin geometry, where wires go to get attached
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PinGeometry {
    /// the name of the port this pin belongs to
    pub name: String,
    /// offset relative to the instance origin, unrotated
    pub x: i32,
    pub y: i32,
}

impl PinGeometry {
    pub fn offset(&self) -> SSPoint {
        SSPoint::new(self.x, self.y)
    }
}

/// parameter specifier: default value plus what to show the user
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParamSpec {
    pub default: ParamValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// type tag from the library file, e.g. `number`
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl ParamSpec {
    pub fn new(default: impl Into<ParamValue>, unit: Option<&str>) -> Self {
        ParamSpec {
            default: default.into(),
            unit: unit.map(str::to_string),
            description: None,
            name: None,
            kind: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComponentDef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    /// designator prefix, e.g. `R` for `R1`. upper-cased id if absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// electrical ports, in netlist order
    pub ports: Vec<String>,
    #[serde(default)]
    pub pins: Vec<PinGeometry>,
    #[serde(default)]
    pub parameters: BTreeMap<String, ParamSpec>,
    #[serde(default)]
    pub flags: BTreeMap<String, ParamValue>,
}

impl ComponentDef {
    pub fn new(id: &str, name: &str, prefix: &str) -> Self {
        ComponentDef {
            id: id.to_string(),
            name: name.to_string(),
            category: String::new(),
            prefix: Some(prefix.to_string()),
            ports: vec![],
            pins: vec![],
            parameters: BTreeMap::new(),
            flags: BTreeMap::new(),
        }
    }

    /// adds a port along with its pin geometry
    pub fn with_port(mut self, name: &str, x: i32, y: i32) -> Self {
        self.ports.push(name.to_string());
        self.pins.push(PinGeometry {
            name: name.to_string(),
            x,
            y,
        });
        self
    }

    pub fn with_param(mut self, name: &str, spec: ParamSpec) -> Self {
        self.parameters.insert(name.to_string(), spec);
        self
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = category.to_string();
        self
    }

    pub fn with_flag(mut self, flag: &str, value: impl Into<ParamValue>) -> Self {
        self.flags.insert(flag.to_string(), value.into());
        self
    }

    pub fn prefix(&self) -> String {
        match &self.prefix {
            Some(p) => p.clone(),
            None => self.id.to_uppercase(),
        }
    }

    pub fn pin(&self, port: &str) -> Option<&PinGeometry> {
        self.pins.iter().find(|p| p.name == port)
    }

    /// true if flagged as a ground reference in the catalog
    pub fn flagged_ground(&self) -> bool {
        matches!(self.flags.get("ground"), Some(ParamValue::Bool(true)))
    }

    pub fn default_params(&self) -> BTreeMap<String, ParamValue> {
        self.parameters
            .iter()
            .map(|(k, spec)| (k.clone(), spec.default.clone()))
            .collect()
    }

    /// box around the pins of the component under sst, inflated by padding.
    /// a component without pins gets a box of padding around its origin
    pub fn body_bounds(&self, sst: &SSTransform, padding: i32) -> SSBox {
        let pts = self
            .pins
            .iter()
            .map(|p| sst.transform_point(p.offset()))
            .chain(std::iter::once(SSPoint::origin()));
        SSBox::from_points(pts).inflate(padding, padding)
    }
}
