//! Composable request-pipeline gates.
//!
//! A handler builds a [`Pipeline`] from an ordered list of [`Gate`]s, seeds a
//! [`GateContext`] from the inbound request, and runs the chain. Each gate
//! either passes a possibly-augmented context to the next gate or
//! short-circuits with an alternate response (typically a redirect carrying a
//! flash message). Exactly one terminal response is produced per request and
//! no gate runs after a short-circuit.

mod context;
mod gate;

pub use context::GateContext;
pub use gate::{Gate, Outcome, Pipeline};
