use serde::Deserialize;
use std::collections::BTreeMap;

use crate::domain::palette::PaletteSet;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub ingestion: IngestionSettings,
    /// Extra palettes, id to ordered colors
    #[serde(default)]
    pub palettes: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ServerSettings {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct IngestionSettings {
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Default for IngestionSettings {
    fn default() -> Self {
        Self {
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

fn default_bind_address() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_max_upload_bytes() -> usize {
    16 * 1024 * 1024
}

/// Loads `config/app` (optional) overlaid with `DASHBOARD__*` environment variables.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/app").required(false))
        .add_source(config::Environment::with_prefix("DASHBOARD").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

/// Built-in palettes plus the configured ones. Empty palettes are skipped.
pub fn build_palettes(extra: &BTreeMap<String, Vec<String>>) -> PaletteSet {
    let mut palettes = PaletteSet::default();
    for (id, colors) in extra {
        if let Err(e) = palettes.register(id.clone(), colors.clone()) {
            tracing::warn!("Skipping configured palette: {}", e);
        }
    }
    palettes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> AppConfig {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse("");
        assert_eq!(config.server.bind_address, "0.0.0.0:8080");
        assert_eq!(config.ingestion.max_upload_bytes, 16 * 1024 * 1024);
        assert!(config.palettes.is_empty());
    }

    #[test]
    fn test_palettes_from_config() {
        let config = parse(
            r##"
            [server]
            bind_address = "127.0.0.1:9000"

            [palettes]
            mono = ["#000000", "#777777", "#ffffff"]
            blank = []
            "##,
        );
        assert_eq!(config.server.bind_address, "127.0.0.1:9000");

        let palettes = build_palettes(&config.palettes);
        assert_eq!(palettes.color_for("mono", 4), "#777777");
        assert!(!palettes.contains("blank"));
        assert!(palettes.contains("ocean"));
    }
}
