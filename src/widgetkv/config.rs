use crate::codec::{KeyValueCodec, PairKind};
use crate::error::{Result, WidgetKvError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_DOCUMENT: &str = "attributes.json";

/// Keys accepted by [`WidgetKvConfig::get`] and [`WidgetKvConfig::set`].
pub const CONFIG_KEYS: &[&str] = &["default-kind", "escape", "document"];

/// Configuration for widgetkv, stored in .widgetkv/config.json
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct WidgetKvConfig {
    /// Pair kind used when a command is not given `--kind`
    #[serde(default)]
    pub default_kind: PairKind,

    /// Escape delimiters inside keys and labels
    #[serde(default)]
    pub escape: bool,

    /// File name of the attribute document inside the scope directory
    #[serde(default = "default_document")]
    pub document: String,
}

fn default_document() -> String {
    DEFAULT_DOCUMENT.to_string()
}

impl Default for WidgetKvConfig {
    fn default() -> Self {
        Self {
            default_kind: PairKind::default(),
            escape: false,
            document: default_document(),
        }
    }
}

impl WidgetKvConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: WidgetKvConfig = serde_json::from_str(&content)?;
        tracing::debug!(path = %config_path.display(), "loaded config");
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        fs::create_dir_all(config_dir)?;

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    /// Codec for an optional per-command kind and escape override.
    pub fn codec(&self, kind: Option<PairKind>, escape: Option<bool>) -> KeyValueCodec {
        KeyValueCodec::new(kind.unwrap_or(self.default_kind))
            .with_escape(escape.unwrap_or(self.escape))
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "default-kind" => Some(self.default_kind.to_string()),
            "escape" => Some(self.escape.to_string()),
            "document" => Some(self.document.clone()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "default-kind" => {
                self.default_kind = value.parse()?;
            }
            "escape" => {
                self.escape = match value.trim().to_ascii_lowercase().as_str() {
                    "true" | "yes" | "on" | "1" => true,
                    "false" | "no" | "off" | "0" => false,
                    other => {
                        return Err(WidgetKvError::Api(format!(
                            "Invalid value for escape: {} (expected true or false)",
                            other
                        )))
                    }
                };
            }
            "document" => {
                let name = value.trim();
                if matches!(name, "" | "." | "..") || name.contains(['/', '\\']) {
                    return Err(WidgetKvError::Api(format!(
                        "Invalid document name: '{}' (expected a plain file name)",
                        value
                    )));
                }
                self.document = name.to_string();
            }
            other => {
                return Err(WidgetKvError::Api(format!(
                    "Unknown config key: {} (known keys: {})",
                    other,
                    CONFIG_KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }
}
