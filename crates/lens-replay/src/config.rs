use std::path::Path;

use lens_dispatch::{ConfigError, PanelKey};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::navigation::DEFAULT_TAB_QUERY_PARAM;
use crate::tabs::ReplayTab;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LensConfig {
    pub navigation: NavigationConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavigationConfig {
    pub query_param: String,
    pub default_tab: String,
    pub disabled_tabs: Vec<String>,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            query_param: DEFAULT_TAB_QUERY_PARAM.to_string(),
            default_tab: ReplayTab::Console.as_str().to_string(),
            disabled_tabs: Vec::new(),
        }
    }
}

#[derive(Debug, Error)]
pub enum LensConfigError {
    #[error("failed to parse lens config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to read lens config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("navigation.query_param must not be empty")]
    EmptyQueryParam,
    #[error("unknown tab '{value}' in {field}")]
    UnknownTab { field: &'static str, value: String },
    #[error(transparent)]
    Dispatch(#[from] ConfigError),
}

impl LensConfig {
    pub fn from_toml(source: &str) -> Result<Self, LensConfigError> {
        let config = toml::from_str::<LensConfig>(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LensConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| LensConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&raw)
    }

    pub fn validate(&self) -> Result<(), LensConfigError> {
        self.navigation.validate()
    }
}

impl NavigationConfig {
    pub fn validate(&self) -> Result<(), LensConfigError> {
        if self.query_param.trim().is_empty() {
            return Err(LensConfigError::EmptyQueryParam);
        }
        let default_tab = self.default_tab()?;
        if self.disabled_tabs()?.contains(&default_tab) {
            return Err(ConfigError::DisabledDefault {
                key: default_tab.as_str(),
            }
            .into());
        }
        Ok(())
    }

    pub fn default_tab(&self) -> Result<ReplayTab, LensConfigError> {
        parse_tab("navigation.default_tab", &self.default_tab)
    }

    pub fn disabled_tabs(&self) -> Result<Vec<ReplayTab>, LensConfigError> {
        self.disabled_tabs
            .iter()
            .map(|raw| parse_tab("navigation.disabled_tabs", raw))
            .collect()
    }
}

fn parse_tab(field: &'static str, raw: &str) -> Result<ReplayTab, LensConfigError> {
    ReplayTab::parse(raw).ok_or_else(|| LensConfigError::UnknownTab {
        field,
        value: raw.to_string(),
    })
}
