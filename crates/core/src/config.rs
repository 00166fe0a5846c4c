use serde::Deserialize;

use crate::types::SegmentFilter;

/// Root application configuration. Loaded from environment variables
/// with the prefix `ADPULSE__` and an optional `adpulse.toml` file.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub data: DataConfig,
    /// Named dataset slices surfaced alongside the global KPIs. These are
    /// caller configuration; the core has no built-in campaign names.
    #[serde(default)]
    pub segments: Vec<SegmentFilter>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Where the unified dataset lives: a file path or an http(s) URL.
    #[serde(default = "default_location")]
    pub location: String,
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

fn default_location() -> String {
    "data/unified_data.json".to_string()
}
fn default_fetch_timeout_secs() -> u64 {
    30
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            location: default_location(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: DataConfig::default(),
            segments: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and optional config file.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("adpulse").required(false))
            .add_source(
                config::Environment::with_prefix("ADPULSE")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(","),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.data.location, "data/unified_data.json");
        assert_eq!(config.data.fetch_timeout_secs, 30);
        assert!(config.segments.is_empty());
    }

    #[test]
    fn test_segments_from_toml() {
        let raw = r#"
            [data]
            location = "https://example.com/unified_data.json"

            [[segments]]
            name = "Facebook retargeting"
            platform = "Facebook"
            campaign_name = "Conversions_Retargeting"

            [[segments]]
            name = "Google"
            platform = "Google"
        "#;
        let config: AppConfig = config::Config::builder()
            .add_source(config::File::from_str(raw, config::FileFormat::Toml))
            .build()
            .expect("config must build")
            .try_deserialize()
            .expect("config must parse");

        assert_eq!(config.segments.len(), 2);
        assert_eq!(config.segments[0].platform.as_deref(), Some("Facebook"));
        assert_eq!(config.segments[1].campaign_name, None);
    }
}
