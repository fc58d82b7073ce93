//! Format handlers

mod json;
mod toml;

pub use self::json::JsonHandler;
pub use self::toml::TomlHandler;
