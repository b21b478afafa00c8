//! Declarative verification scenarios
//!
//! A scenario is a target base URL plus an ordered list of UI steps, loaded
//! from YAML. Steps execute strictly in declared order; the first failure
//! halts the run.

mod config;

pub use config::*;
