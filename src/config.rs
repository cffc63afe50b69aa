//! Optional TOML configuration. Every field has a default, so a missing file
//! is not an error; a file that exists but cannot be read or parsed is.

use std::fs;
use std::io;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::Deserialize;
use thiserror::Error;

/// First year offered by the Average Sangat "Year" filter.
pub const DEFAULT_FIRST_YEAR: u32 = 2020;
/// Last year offered by the Average Sangat "Year" filter.
pub const DEFAULT_LAST_YEAR: u32 = 2025;

const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("report years {first}..={last} form an empty range")]
    EmptyYearRange { first: u32, last: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// How long the event loop waits for input before redrawing.
    pub tick_rate_ms: u64,
    /// env_logger filter directive, e.g. `info` or `satsang_manager=debug`.
    pub log_level: String,
    pub reports: ReportConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 250,
            log_level: "info".to_string(),
            reports: ReportConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub first_year: u32,
    pub last_year: u32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            first_year: DEFAULT_FIRST_YEAR,
            last_year: DEFAULT_LAST_YEAR,
        }
    }
}

impl AppConfig {
    /// Load from the platform config directory, falling back to defaults when
    /// no directory or file exists.
    pub fn load() -> Result<Self, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let config: Self = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let ReportConfig {
            first_year,
            last_year,
        } = self.reports;
        if last_year < first_year {
            return Err(ConfigError::EmptyYearRange {
                first: first_year,
                last: last_year,
            });
        }
        Ok(())
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    pub fn report_years(&self) -> RangeInclusive<u32> {
        self.reports.first_year..=self.reports.last_year
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "satsang", "satsang-manager")
}

/// Location of the optional configuration file.
pub fn config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// Directory that receives the log file.
pub fn data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.tick_rate(), Duration::from_millis(250));
        assert_eq!(config.report_years(), 2020..=2025);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "log_level = \"debug\"\n\n[reports]\nlast_year = 2030").unwrap();

        let config = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.tick_rate_ms, 250);
        assert_eq!(config.report_years(), 2020..=2030);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "tick_rate_ms = \"fast\"").unwrap();

        let err = AppConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn inverted_year_range_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[reports]\nfirst_year = 2025\nlast_year = 2021").unwrap();

        let err = AppConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::EmptyYearRange {
                first: 2025,
                last: 2021
            }
        ));
    }
}
