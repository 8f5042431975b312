//! Application layer orchestrating the domain through its ports.
//!
//! `OrderLifecycleManager` runs the two payment operations (initiate and
//! verify), each as an independent token-then-action unit of work.
//! `PredictionService` generates multipliers and serves the recent history.

pub mod lifecycle;
pub mod predictions;
