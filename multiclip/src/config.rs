use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use multiclip_core::WatchOptions;

/// Configuration for the demo console.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Items preloaded into the queue on startup.
    pub items: Vec<String>,
    /// Options applied by a bare `start` command.
    pub options: WatchOptions,
    pub host: HostConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Bridge copy/cut/paste payloads to the OS clipboard instead of
    /// an in-process buffer.
    pub system_clipboard: bool,
    /// Simulated page fields; focus starts on the first one.
    pub fields: Vec<FieldConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldConfig {
    pub name: String,
    /// Value-bearing form control vs. generic content element.
    #[serde(default = "default_value_bearing")]
    pub value_bearing: bool,
}

fn default_value_bearing() -> bool {
    true
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            items: vec!["alpha".into(), "beta".into(), "gamma".into()],
            options: WatchOptions {
                shift: true,
                ..WatchOptions::default()
            },
            host: HostConfig::default(),
        }
    }
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            system_clipboard: false,
            fields: vec![
                FieldConfig {
                    name: "input".into(),
                    value_bearing: true,
                },
                FieldConfig {
                    name: "note".into(),
                    value_bearing: false,
                },
            ],
        }
    }
}

impl DemoConfig {
    /// Load configuration from file, or fall back to defaults when the
    /// file does not exist.
    pub fn load(path: Option<PathBuf>) -> anyhow::Result<Self> {
        let config_path = path.unwrap_or_else(|| PathBuf::from("multiclip.toml"));
        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            let config: DemoConfig = toml::from_str(&contents)?;
            Ok(config)
        } else {
            log::info!("no config at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_preload_queue_and_shift() {
        let config = DemoConfig::default();
        assert_eq!(config.items.len(), 3);
        assert!(config.options.shift);
        assert!(!config.host.system_clipboard);
        assert_eq!(config.host.fields.len(), 2);
    }

    #[test]
    fn partial_document_fills_in_defaults() {
        let config: DemoConfig = toml::from_str(
            r#"
            items = ["one", "two"]

            [options]
            pop = true

            [[host.fields]]
            name = "box"
            "#,
        )
        .unwrap();
        assert_eq!(config.items, vec!["one", "two"]);
        assert!(config.options.pop);
        assert!(!config.options.shift);
        assert!(config.options.stop_paste_on_end);
        assert_eq!(config.host.fields.len(), 1);
        assert!(config.host.fields[0].value_bearing);
    }
}
