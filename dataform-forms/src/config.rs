//! Site configuration for the form runtime, loaded with Figment.
//!
//! Sources in precedence order (later overrides earlier):
//! 1. Built-in defaults
//! 2. An optional config file (TOML, YAML or JSON by extension)
//! 3. `DATAFORM_`-prefixed environment variables

use std::path::Path;

use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{FormsError, Result};
use crate::sanitize::SanitizeMode;

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "DATAFORM_";

/// Site-wide form settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormsConfig {
    /// Strip tags from free-text settings instead of cleaning HTML.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format_string_strip_tags: Option<bool>,
}

impl FormsConfig {
    /// Load configuration, falling back to defaults on any failure.
    pub fn load(file: Option<&Path>) -> Self {
        match Self::try_load(file) {
            Ok(config) => config,
            Err(e) => {
                warn!(%e, "falling back to default form configuration");
                Self::default()
            }
        }
    }

    /// Load configuration, reporting failures.
    pub fn try_load(file: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(FormsConfig::default()));

        if let Some(path) = file {
            figment = figment.merge(file_provider(path)?);
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX));

        let config: FormsConfig = figment.extract()?;
        debug!(?config, "loaded form configuration");
        Ok(config)
    }

    /// The cleaning mode for free-text settings. Plain text only when the
    /// strip-tags flag is explicitly enabled.
    pub fn sanitize_mode(&self) -> SanitizeMode {
        match self.format_string_strip_tags {
            Some(true) => SanitizeMode::PlainText,
            _ => SanitizeMode::CleanHtml,
        }
    }
}

fn file_provider(path: &Path) -> Result<Figment> {
    if !path.exists() {
        return Err(FormsError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("toml") => Ok(Figment::from(Toml::file(path))),
        Some("yaml") | Some("yml") => Ok(Figment::from(Yaml::file(path))),
        Some("json") => Ok(Figment::from(Json::file(path))),
        _ => Err(FormsError::UnsupportedConfigFormat {
            path: path.to_path_buf(),
        }),
    }
}
