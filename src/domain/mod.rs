//! Domain types for the payment lifecycle and prediction history, plus the
//! ports the application layer talks through.

pub mod id;
pub mod order;
pub mod ports;
pub mod prediction;
