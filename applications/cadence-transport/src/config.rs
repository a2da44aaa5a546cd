/// Transport configuration
use crate::error::{Result, TransportError};
use cadence_playback::{PlaybackConfig, MAX_HISTORY_SIZE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default tracing filter when neither `RUST_LOG` nor the config sets one
pub const DEFAULT_LOG_FILTER: &str = "cadence_transport=info,cadence_playback=info";

/// File picked up from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "cadence.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TransportConfig {
    #[serde(default)]
    pub playback: PlaybackConfig,

    #[serde(default)]
    pub output: OutputSettings,

    /// Tracing filter directive, overridden by `RUST_LOG`
    #[serde(default)]
    pub log_filter: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputSettings {
    #[serde(default)]
    pub format: OutputFormat,

    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

/// What the script runner prints for each published snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Full session snapshot
    #[default]
    Snapshot,
    /// Transport bar render model
    Bar,
}

impl std::str::FromStr for OutputFormat {
    type Err = TransportError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "snapshot" => Ok(OutputFormat::Snapshot),
            "bar" => Ok(OutputFormat::Bar),
            other => Err(TransportError::Config(format!(
                "unknown output format {:?} (expected snapshot or bar)",
                other
            ))),
        }
    }
}

impl TransportConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `cadence.toml` in the working
    /// directory is used when present. Environment variables prefixed with
    /// `CADENCE_` override the file, with `__` between nested keys
    /// (`CADENCE_PLAYBACK__VOLUME=30`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(TransportError::Config(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("CADENCE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let playback = &self.playback;

        if playback.volume > 100 {
            return Err(TransportError::Config(format!(
                "playback.volume must be 0-100, got {}",
                playback.volume
            )));
        }

        if !(1..=100).contains(&playback.unmute_fallback_volume) {
            return Err(TransportError::Config(format!(
                "playback.unmute_fallback_volume must be 1-100, got {}",
                playback.unmute_fallback_volume
            )));
        }

        if playback.history_size > MAX_HISTORY_SIZE {
            return Err(TransportError::Config(format!(
                "playback.history_size must be at most {}, got {}",
                MAX_HISTORY_SIZE, playback.history_size
            )));
        }

        if !playback.restart_threshold_secs.is_finite() || playback.restart_threshold_secs < 0.0 {
            return Err(TransportError::Config(format!(
                "playback.restart_threshold_secs must be a non-negative number, got {}",
                playback.restart_threshold_secs
            )));
        }

        if let Some(filter) = &self.log_filter {
            if filter.trim().is_empty() {
                return Err(TransportError::Config(
                    "log_filter must not be empty".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Filter for the tracing subscriber when `RUST_LOG` is unset
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }
}

fn default_pretty() -> bool {
    false
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            pretty: default_pretty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_playback::RepeatMode;

    #[test]
    fn default_config_is_valid() {
        let config = TransportConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.log_filter(), DEFAULT_LOG_FILTER);
        assert_eq!(config.output.format, OutputFormat::Snapshot);
    }

    #[test]
    fn rejects_out_of_range_values() {
        let mut config = TransportConfig::default();
        config.playback.volume = 120;
        assert!(config.validate().is_err());

        let mut config = TransportConfig::default();
        config.playback.restart_threshold_secs = -1.0;
        assert!(config.validate().is_err());

        let mut config = TransportConfig::default();
        config.playback.unmute_fallback_volume = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_oversized_history() {
        let mut config = TransportConfig::default();
        config.playback.history_size = MAX_HISTORY_SIZE;
        assert!(config.validate().is_ok());

        config.playback.history_size = usize::MAX;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("history_size"));
    }

    #[test]
    fn loads_file_with_partial_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cadence.toml");
        std::fs::write(
            &path,
            "log_filter = \"cadence_playback=debug\"\n\n[playback]\nvolume = 35\nrepeat = \"all\"\n\n[output]\nformat = \"bar\"\n",
        )
        .unwrap();

        let config = TransportConfig::load(Some(&path)).unwrap();
        assert_eq!(config.playback.volume, 35);
        assert_eq!(config.playback.repeat, RepeatMode::All);
        assert_eq!(config.playback.history_size, 50);
        assert_eq!(config.output.format, OutputFormat::Bar);
        assert_eq!(config.log_filter(), "cadence_playback=debug");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = TransportConfig::load(Some(Path::new("/nonexistent/cadence.toml"))).unwrap_err();
        assert!(matches!(err, TransportError::Config(_)));
    }

    #[test]
    fn output_format_parses_case_insensitively() {
        assert_eq!("BAR".parse::<OutputFormat>().unwrap(), OutputFormat::Bar);
        assert!("table".parse::<OutputFormat>().is_err());
    }
}
