//! General Notes
//!
//! The schematic editor never talks to a simulator directly. It hands a [`CircuitRequest`] to
//! something implementing [`Simulator`] and gets a [`SimulationResponse`] back.
//! Netlist templating, the simulator process and the transport all live behind that trait.
//!
//! With the `serde` feature the request and response types map one to one onto the JSON
//! exchanged with the backend: `{"instances": [...]}` going out,
//! `{"status": "success" | "error", "results": {...}, "netlist": "...", "message": "..."}` coming back.

mod results;
mod structs;
pub use results::*;
pub use structs::*;

#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    /// The backend answered, but refused the circuit (bad netlist, simulator error output, ...)
    #[error("simulation failed: {message}")]
    Rejected { message: String },
    /// The backend did not answer in time
    #[error("simulation timed out")]
    Timeout,
    /// The request never made it to the backend, or the answer was unreadable
    #[error("simulator unreachable: {0}")]
    Transport(String),
}

/// The external simulation collaborator.
///
/// Implementors own the whole trip: serialize the request, run or contact the simulator, and map
/// whatever comes back onto a [`SimulationResponse`]. Failures below the JSON boundary surface as
/// [`SimulationError::Timeout`] or [`SimulationError::Transport`].
pub trait Simulator {
    fn simulate(&mut self, request: &CircuitRequest) -> Result<SimulationResponse, SimulationError>;
}

impl<T: Simulator + ?Sized> Simulator for &mut T {
    fn simulate(&mut self, request: &CircuitRequest) -> Result<SimulationResponse, SimulationError> {
        (**self).simulate(request)
    }
}
