//! Errors raised while resolving styles

use cbox_core::BoxError;
use config::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StyleError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Style {0} doesn't exist")]
    UnknownStyle(String),

    #[error("Style {style} is based on {parent}, but {parent} doesn't exist")]
    MissingParent { style: String, parent: String },

    #[error("The following styles refer to each other in a cycle: {}", chain.join(" -> "))]
    CyclicInheritance { chain: Vec<String> },

    #[error("Style {style} doesn't set {field}")]
    MissingField { style: String, field: &'static str },

    #[error("Style {style} is invalid")]
    InvalidStyle {
        style: String,
        #[source]
        source: BoxError,
    },
}
