//! Adapters for the domain ports: the Pesapal HTTP gateway, and the
//! in-memory and CSV-file prediction stores.

pub mod csv_file;
pub mod in_memory;
pub mod pesapal;
