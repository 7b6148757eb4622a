//! Storage abstractions for service layer
//!
//! Contains the id-keyed table used by the memory and JSON file product stores.

pub mod json_table;
