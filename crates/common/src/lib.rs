//! Cross-cutting helpers shared by the service and server crates:
//! logging setup, runtime environment checks, metrics and small wire types.

pub mod types;
pub mod utils;
pub mod env;
pub mod metrics;
