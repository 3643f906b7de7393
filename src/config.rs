//! Configuration Module
//!
//! Provides TOML-based configuration for Flow-Synth.
//! Configuration is optional - CLI arguments can override file settings.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::allocator::{DensityFloor, MAX_TOTAL_RECORDS};
use crate::error::ConfigError;
use crate::export::OutputFormat;

/// Largest address pool accepted; keeps distinct-address sampling cheap.
pub const MAX_IP_POOL_SIZE: usize = 1 << 24;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub generator: GeneratorConfig,
    pub records: RecordConfig,
    pub output: OutputConfig,
}

impl Config {
    /// Loads configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Generates a default configuration file content
    pub fn generate_default() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config)
            .unwrap_or_else(|_| "# Failed to generate config".to_string())
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        let pool = self.generator.ip_pool_size;
        if pool < 2 {
            return Err(ConfigError::IpPoolTooSmall(pool).into());
        }
        if pool > MAX_IP_POOL_SIZE {
            return Err(ConfigError::IpPoolTooLarge {
                actual: pool,
                max: MAX_IP_POOL_SIZE,
            }
            .into());
        }

        let total = self.generator.total_records;
        if total > MAX_TOTAL_RECORDS {
            return Err(ConfigError::TotalRecordsTooLarge {
                actual: total,
                max: MAX_TOTAL_RECORDS,
            }
            .into());
        }

        let floor = self.generator.density_floor;
        if floor.minutes == 0 {
            return Err(ConfigError::InvalidDensityFloor {
                records: floor.records,
                minutes: floor.minutes,
            }
            .into());
        }
        if self.generator.max_attempts == 0 {
            return Err(ConfigError::NoAttempts.into());
        }

        let (min, max) = (self.records.min_bytes, self.records.max_bytes);
        if !(min.is_finite() && max.is_finite()) || min <= 0.0 || min >= max {
            return Err(ConfigError::InvalidByteRange { min, max }.into());
        }
        if self.records.packet_size == 0 {
            return Err(ConfigError::ZeroPacketSize.into());
        }
        Ok(())
    }
}

/// Simulation window (any format accepted by `window::parse_datetime`)
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window start, inclusive
    pub start: String,
    /// Window end; the last partial minute is dropped
    pub end: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            start: "23/6/2020 11:00".to_string(),
            end: "24/6/2020 11:00".to_string(),
        }
    }
}

/// Allocation and randomness settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Number of records requested for the whole window
    pub total_records: u64,
    /// Number of distinct addresses flows are drawn from
    pub ip_pool_size: usize,
    /// RNG seed (None = random, logged at startup)
    pub seed: Option<u64>,
    /// Maximum allocation attempts when asking for a larger total
    pub max_attempts: usize,
    /// Minimum records per minute, as records / minutes
    pub density_floor: DensityFloor,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            total_records: 30_000,
            ip_pool_size: 100,
            seed: None,
            max_attempts: 3,
            density_floor: DensityFloor::default(),
        }
    }
}

/// Field generator settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RecordConfig {
    /// Highest protocol number drawn (inclusive)
    pub protocol_max: u8,
    /// Smallest flow size in bytes
    pub min_bytes: f64,
    /// Largest flow size in bytes (exclusive before rounding)
    pub max_bytes: f64,
    /// Bytes carried by one packet
    pub packet_size: u32,
}

impl Default for RecordConfig {
    fn default() -> Self {
        Self {
            protocol_max: 143,
            min_bytes: 1_500.0,
            max_bytes: 30_000.0,
            packet_size: 1_500,
        }
    }
}

/// Output-related configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Record table format (csv, json, jsonl)
    #[serde(with = "output_format_serde")]
    pub format: OutputFormat,
    /// Output file path (None = derived from the window)
    pub file: Option<String>,
    /// Graphviz DOT file for the address graph (None = skip)
    pub graph: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Csv,
            file: None,
            graph: None,
        }
    }
}

/// Custom serde implementation for OutputFormat
mod output_format_serde {
    use super::*;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(format: &OutputFormat, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format.to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<OutputFormat, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.generator.total_records, 30_000);
        assert_eq!(config.generator.ip_pool_size, 100);
        assert_eq!(config.generator.density_floor, DensityFloor::default());
        assert_eq!(config.window.start, "23/6/2020 11:00");
        assert_eq!(config.output.format, OutputFormat::Csv);
    }

    #[test]
    fn test_config_validate() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.generator.ip_pool_size = 1;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.generator.density_floor.minutes = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.records.min_bytes = 40_000.0;
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::InvalidByteRange { .. })
        ));

        let mut config = Config::default();
        config.generator.max_attempts = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.generator.total_records = u64::MAX;
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::TotalRecordsTooLarge { .. })
        ));
        config.generator.total_records = MAX_TOTAL_RECORDS;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_generate_default_config() {
        let config_str = Config::generate_default();
        assert!(config_str.contains("[window]"));
        assert!(config_str.contains("[generator]"));
        assert!(config_str.contains("[records]"));
        assert!(config_str.contains("[output]"));

        let parsed: Config = toml::from_str(&config_str).unwrap();
        assert_eq!(parsed.generator.total_records, 30_000);
    }

    #[test]
    fn test_parse_config() {
        let toml_str = r#"
[window]
start = "2021-03-01 08:00"
end = "2021-03-01 20:00"

[generator]
total_records = 50000
seed = 1234

[generator.density_floor]
records = 10
minutes = 1

[output]
format = "jsonl"
"#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.window.start, "2021-03-01 08:00");
        assert_eq!(config.generator.total_records, 50_000);
        assert_eq!(config.generator.seed, Some(1234));
        assert_eq!(config.generator.ip_pool_size, 100);
        assert_eq!(config.generator.density_floor.records, 10);
        assert_eq!(config.output.format, OutputFormat::JsonLines);
        assert_eq!(config.records, RecordConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[generator]\nip_pool_size = 7").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.generator.ip_pool_size, 7);
    }

    #[test]
    fn test_load_malformed_file_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[window]\nstart = \"2021-03-01 08:00\"\nend = 2021-03-01 20:00"
        )
        .unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse config file"));
    }

    #[test]
    fn test_load_missing_file_fails() {
        let missing = Path::new("/definitely/not/here/flow-synth.toml");
        let err = Config::load(missing).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
