//! Command implementations for envboot-cli

pub mod env_file;
pub mod extract;
pub mod sections;

pub use env_file::{EnvFileArgs, run_env_file};
pub use extract::{ExtractArgs, run_extract};
pub use sections::run_sections;
