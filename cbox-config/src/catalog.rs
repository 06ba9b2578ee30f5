//! Style resolution
//!
//! A style is resolved by stacking layers, lowest first:
//!
//! ```text
//! defaults <- language preset <- parents (in `based_on` order) <- style
//! ```
//!
//! A parent contributes what it and its own ancestors set, never the defaults,
//! so a later parent can't undo an earlier parent with default values.
//! `default` names the defaults themselves and always resolves. Style names
//! are matched ignoring ASCII case.

use crate::error::StyleError;
use crate::style::StyleConfig;
use crate::CboxConfig;
use cbox_core::BoxStyle;
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

pub const DEFAULT_STYLE: &str = "default";

#[derive(Debug, Clone)]
struct LanguagePreset {
    ids: Vec<String>,
    style: StyleConfig,
}

/// Named styles and language presets ready for lookup
#[derive(Debug, Clone)]
pub struct StyleCatalog {
    defaults: StyleConfig,
    languages: Vec<LanguagePreset>,
    /// Keyed by lowercase name, holding the name as written and the style
    styles: HashMap<String, (String, StyleConfig)>,
}

/// An entry of the resolution stack
struct Pending {
    name: String,
    child: Option<String>,
    expanded: bool,
}

impl StyleCatalog {
    pub fn new(config: CboxConfig) -> Self {
        let languages = config
            .languages
            .into_values()
            .map(|language| LanguagePreset {
                ids: language.ids,
                style: language.style,
            })
            .collect();

        let styles = config
            .styles
            .into_iter()
            .map(|(name, style)| (name.to_ascii_lowercase(), (name, style)))
            .collect();

        Self {
            defaults: config.defaults,
            languages,
            styles,
        }
    }

    fn lookup(&self, name: &str) -> Option<&StyleConfig> {
        self.styles
            .get(&name.to_ascii_lowercase())
            .map(|(_, style)| style)
    }

    fn exists(&self, name: &str) -> bool {
        name.eq_ignore_ascii_case(DEFAULT_STYLE) || self.lookup(name).is_some()
    }

    /// The preset layer for a language id, if any group lists it.
    pub fn language_preset(&self, language: &str) -> Option<&StyleConfig> {
        self.languages
            .iter()
            .find(|preset| preset.ids.iter().any(|id| id.eq_ignore_ascii_case(language)))
            .map(|preset| &preset.style)
    }

    /// Fully merged layers for `name`, optionally under a language preset.
    pub fn resolve(&self, name: &str, language: Option<&str>) -> Result<StyleConfig, StyleError> {
        if !self.exists(name) {
            return Err(StyleError::UnknownStyle(name.to_string()));
        }

        let mut resolved = self.defaults.clone();
        if let Some(language) = language {
            match self.language_preset(language) {
                Some(preset) => resolved.merge(preset),
                None => debug!(language, "no preset for language"),
            }
        }
        resolved.merge(&self.inherited(name)?);
        Ok(resolved)
    }

    /// Resolves `name` and builds a validated [`BoxStyle`] from it.
    pub fn box_style(&self, name: &str, language: Option<&str>) -> Result<BoxStyle, StyleError> {
        self.resolve(name, language)?.to_box_style(name)
    }

    /// `default` and every style not marked hidden, sorted.
    pub fn style_names(&self) -> Vec<String> {
        let mut names = BTreeSet::new();
        names.insert(DEFAULT_STYLE.to_string());
        for (key, (name, style)) in &self.styles {
            if key != DEFAULT_STYLE && !style.is_hidden() {
                names.insert(name.clone());
            }
        }
        names.into_iter().collect()
    }

    /// The layer a style contributes on top of the defaults: its ancestors
    /// merged in `based_on` order, then the style itself.
    fn inherited(&self, name: &str) -> Result<StyleConfig, StyleError> {
        let mut layers: HashMap<String, StyleConfig> = HashMap::new();
        let mut path: Vec<String> = Vec::new();
        let mut stack = vec![Pending {
            name: name.to_ascii_lowercase(),
            child: None,
            expanded: false,
        }];

        while let Some(pending) = stack.pop() {
            let own = self.lookup(&pending.name);

            if pending.expanded {
                let mut layer = StyleConfig::default();
                if let Some(own) = own {
                    for parent in own.parents() {
                        if let Some(parent_layer) = layers.get(&parent.to_ascii_lowercase()) {
                            layer.merge(parent_layer);
                        }
                    }
                    layer.merge(own);
                }
                path.pop();
                layers.insert(pending.name, layer);
                continue;
            }

            if layers.contains_key(&pending.name) {
                continue;
            }
            if path.contains(&pending.name) {
                let mut chain = path.clone();
                chain.push(pending.name);
                return Err(StyleError::CyclicInheritance { chain });
            }
            if own.is_none() && !pending.name.eq_ignore_ascii_case(DEFAULT_STYLE) {
                return Err(match pending.child {
                    Some(child) => StyleError::MissingParent {
                        style: child,
                        parent: pending.name,
                    },
                    None => StyleError::UnknownStyle(pending.name),
                });
            }

            path.push(pending.name.clone());
            let parents = own.map(StyleConfig::parents).unwrap_or_default();
            stack.push(Pending {
                name: pending.name.clone(),
                child: pending.child,
                expanded: true,
            });
            for parent in parents.iter().rev() {
                stack.push(Pending {
                    name: parent.to_ascii_lowercase(),
                    child: Some(pending.name.clone()),
                    expanded: false,
                });
            }
        }

        debug!(style = name, resolved = layers.len(), "resolved style inheritance");
        Ok(layers
            .remove(&name.to_ascii_lowercase())
            .unwrap_or_default())
    }
}
