#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::{SimulationError, SimulationResults};

#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize), serde(untagged))]
/// A component parameter value, as it appears in the catalog and in requests
pub enum ParamValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(b) => write!(f, "{}", b),
            ParamValue::Number(n) => write!(f, "{}", n),
            ParamValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Number(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

#[derive(Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
/// One placed component, with every port mapped to a net label
pub struct InstancePayload {
    /// instance designator, e.g. `R1`
    pub id: String,
    /// catalog id of the component, e.g. `resistor`
    pub component_id: String,
    pub parameters: BTreeMap<String, ParamValue>,
    /// port name -> net label, ground being `0`
    pub connections: BTreeMap<String, String>,
}

#[derive(Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
/// Payload handed to the netlist generator
pub struct CircuitRequest {
    pub instances: Vec<InstancePayload>,
}

impl CircuitRequest {
    pub fn instance(&self, id: &str) -> Option<&InstancePayload> {
        self.instances.iter().find(|i| i.id == id)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize), serde(rename_all = "lowercase"))]
pub enum Status {
    Success,
    Error,
}

#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
/// Answer of the simulation backend
pub struct SimulationResponse {
    pub status: Status,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub results: Option<SimulationResults>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub netlist: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub message: Option<String>,
}

/// A successful simulation run
#[derive(Clone, PartialEq, Debug, Default)]
pub struct SimulationOutput {
    pub results: SimulationResults,
    /// the netlist the backend generated, if it reported it
    pub netlist: Option<String>,
}

impl SimulationResponse {
    pub fn success(results: SimulationResults) -> Self {
        SimulationResponse {
            status: Status::Success,
            results: Some(results),
            netlist: None,
            message: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        SimulationResponse {
            status: Status::Error,
            results: None,
            netlist: None,
            message: Some(message.into()),
        }
    }

    /// Splits the response into its success and failure cases.
    /// A successful response without results is a run that produced no curves.
    pub fn into_result(self) -> Result<SimulationOutput, SimulationError> {
        match self.status {
            Status::Success => Ok(SimulationOutput {
                results: self.results.unwrap_or_default(),
                netlist: self.netlist,
            }),
            Status::Error => Err(SimulationError::Rejected {
                message: self
                    .message
                    .unwrap_or_else(|| String::from("Unknown simulator error")),
            }),
        }
    }
}
