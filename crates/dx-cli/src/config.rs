//! Settings file and flag overrides.
//!
//! ```toml
//! dictionary = "vocab/drugs.yaml"
//!
//! [scan]
//! mode = "strict"
//! metric = "levenshtein"
//! threshold = 0.92
//! policy = "best-score"
//! jobs = 4
//! chunk_size = 512
//! ```
//!
//! Precedence, lowest first: built-in defaults, settings file, command-line
//! flags.

use std::fs;
use std::path::{Path, PathBuf};

use dx_model::{MatchMode, MatchPolicy, ModelError, ScanConfig, SimilarityMetric};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Invalid(#[from] ModelError),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Dictionary file replacing the bundled vocabulary.
    pub dictionary: Option<PathBuf>,
    pub scan: ScanConfig,
}

impl Settings {
    pub fn from_toml(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reads settings from `path`; `None` yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut settings = Self::from_toml(&text, path)?;
        // Relative dictionary paths are relative to the settings file.
        if let (Some(dictionary), Some(parent)) = (&settings.dictionary, path.parent())
            && dictionary.is_relative()
        {
            settings.dictionary = Some(parent.join(dictionary));
        }
        info!(path = %path.display(), "settings loaded");
        Ok(settings)
    }
}

/// Scan options given on the command line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanOverrides {
    pub strict: bool,
    pub threshold: Option<f64>,
    pub metric: Option<SimilarityMetric>,
    pub policy: Option<MatchPolicy>,
    pub jobs: Option<usize>,
    pub chunk_size: Option<usize>,
}

impl ScanOverrides {
    /// Applies the flags on top of `base` and validates the result.
    pub fn apply(&self, base: ScanConfig) -> Result<ScanConfig, ConfigError> {
        let mut config = base;
        if self.strict {
            config = config.with_mode(MatchMode::Strict);
        }
        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }
        if let Some(metric) = self.metric {
            config.metric = metric;
        }
        if let Some(policy) = self.policy {
            config.policy = policy;
        }
        if let Some(jobs) = self.jobs {
            config.jobs = jobs;
        }
        if let Some(chunk_size) = self.chunk_size {
            config.chunk_size = chunk_size;
        }
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_default() {
        let settings = Settings::from_toml("", Path::new("settings.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn parses_scan_table() {
        let text = r#"
dictionary = "drugs.yaml"

[scan]
mode = "strict"
metric = "damerau-levenshtein"
policy = "best-score"
jobs = 4
"#;
        let settings = Settings::from_toml(text, Path::new("settings.toml")).unwrap();
        assert_eq!(settings.dictionary, Some(PathBuf::from("drugs.yaml")));
        assert_eq!(settings.scan.mode, MatchMode::Strict);
        assert_eq!(settings.scan.metric, SimilarityMetric::DamerauLevenshtein);
        assert_eq!(settings.scan.policy, MatchPolicy::BestScore);
        assert_eq!(settings.scan.jobs, 4);
        assert_eq!(settings.scan.chunk_size, ScanConfig::default().chunk_size);
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = Settings::from_toml("treshold = 0.8", Path::new("s.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn rejects_unknown_scan_keys() {
        let err = Settings::from_toml("[scan]\ntreshold = 0.8\n", Path::new("s.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn flags_override_file() {
        let base = ScanConfig::default().with_threshold(0.95).with_jobs(2);
        let overrides = ScanOverrides {
            strict: true,
            jobs: Some(8),
            ..ScanOverrides::default()
        };
        let config = overrides.apply(base).unwrap();
        assert_eq!(config.mode, MatchMode::Strict);
        assert_eq!(config.jobs, 8);
        assert!((config.threshold - 0.95).abs() < f64::EPSILON);
    }

    #[test]
    fn overrides_are_validated() {
        let overrides = ScanOverrides {
            threshold: Some(1.5),
            ..ScanOverrides::default()
        };
        assert!(matches!(
            overrides.apply(ScanConfig::default()),
            Err(ConfigError::Invalid(ModelError::InvalidOption { .. }))
        ));
    }
}
