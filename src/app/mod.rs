pub mod commands;

pub use commands::{execute, Outcome};
