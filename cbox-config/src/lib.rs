//! Style configuration for cbox.
//!
//! The built-in style table (`defaults/cbox.default.toml`) is compiled in, so
//! every tool starts from the same defaults and language presets. User and
//! project files are stacked over it with a [`Loader`]; styles are then looked
//! up by name through a [`StyleCatalog`].

mod catalog;
mod error;
mod style;

pub use catalog::{StyleCatalog, DEFAULT_STYLE};
pub use error::StyleError;
pub use style::{BasedOn, StyleConfig};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

const DEFAULT_TOML: &str = include_str!("../defaults/cbox.default.toml");

/// Top-level configuration: defaults, language presets and named styles.
#[derive(Debug, Clone, Deserialize)]
pub struct CboxConfig {
    pub defaults: StyleConfig,
    #[serde(default)]
    pub languages: BTreeMap<String, LanguageConfig>,
    #[serde(default)]
    pub styles: BTreeMap<String, StyleConfig>,
}

/// Token preset shared by a group of languages.
#[derive(Debug, Clone, Deserialize)]
pub struct LanguageConfig {
    pub ids: Vec<String>,
    pub style: StyleConfig,
}

impl CboxConfig {
    pub fn into_catalog(self) -> StyleCatalog {
        StyleCatalog::new(self)
    }
}

/// Stacks TOML sources over the embedded style table; later sources win key by key.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    fn layer(mut self, path: &Path, required: bool) -> Self {
        debug!(path = %path.display(), required, "adding style file");
        let source = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Adds a style file that has to exist when [`Loader::build`] runs.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), true)
    }

    /// Adds a style file that is skipped when absent, like a project `.cbox.toml`.
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), false)
    }

    /// Sets one dotted key above every file, e.g. `styles.banner.width`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<CboxConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The embedded table alone.
pub fn load_defaults() -> Result<CboxConfig, ConfigError> {
    Loader::new().build()
}
