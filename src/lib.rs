pub mod cli;
pub mod core;
pub mod errors;
pub mod store;

pub use errors::{Error, Result};
