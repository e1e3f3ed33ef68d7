//! Run settings for fitting a mixture
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use std::fmt;

/// Settings for one clustering run.
///
/// # Example
///
/// ```
/// use nbmix::config::Config;
///
/// let config = Config::default().with_k(4).with_restarts(20);
///
/// assert_eq!(config.k, 4);
/// assert_eq!(config.restarts, 20);
/// assert_eq!(config.n_features, 5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case", default))]
pub struct Config {
    /// Number of clusters
    pub k: usize,
    /// Number of features of generated data
    pub n_features: usize,
    /// Number of rows of generated data
    pub n_samples: usize,
    /// Number of independent fits; the best one is kept
    pub restarts: usize,
    /// Column of a loaded file holding the row label
    pub label_col: Option<usize>,
    /// Columns of a loaded file to drop, indexed after label removal
    pub ignore: Vec<usize>,
    /// Min-max scale numeric columns before fitting
    pub scale: bool,
    /// Print the member rows of each cluster
    pub show: bool,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub enum ConfigError {
    /// k must be at least 1
    ZeroClusters,
    /// At least one restart is required
    ZeroRestarts,
    /// Generated data needs at least one feature
    ZeroFeatures,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            k: 3,
            n_features: 5,
            n_samples: 100,
            restarts: 10,
            label_col: None,
            ignore: Vec::new(),
            scale: false,
            show: false,
        }
    }
}

impl Config {
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    pub fn with_n_features(mut self, n_features: usize) -> Self {
        self.n_features = n_features;
        self
    }

    pub fn with_n_samples(mut self, n_samples: usize) -> Self {
        self.n_samples = n_samples;
        self
    }

    pub fn with_restarts(mut self, restarts: usize) -> Self {
        self.restarts = restarts;
        self
    }

    pub fn with_label_col(mut self, label_col: Option<usize>) -> Self {
        self.label_col = label_col;
        self
    }

    pub fn with_ignore(mut self, ignore: Vec<usize>) -> Self {
        self.ignore = ignore;
        self
    }

    pub fn with_scale(mut self, scale: bool) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_show(mut self, show: bool) -> Self {
        self.show = show;
        self
    }

    /// Check that the settings describe a runnable fit
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.k == 0 {
            Err(ConfigError::ZeroClusters)
        } else if self.restarts == 0 {
            Err(ConfigError::ZeroRestarts)
        } else if self.n_features == 0 {
            Err(ConfigError::ZeroFeatures)
        } else {
            Ok(())
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroClusters => write!(f, "k must be at least 1"),
            Self::ZeroRestarts => write!(f, "at least one restart is required"),
            Self::ZeroFeatures => {
                write!(f, "generated data needs at least one feature")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_demo_settings() {
        let config = Config::default();
        assert_eq!(config.k, 3);
        assert_eq!(config.n_features, 5);
        assert_eq!(config.n_samples, 100);
        assert_eq!(config.restarts, 10);
        assert_eq!(config.label_col, None);
        assert!(config.ignore.is_empty());
        assert!(!config.scale);
        assert!(!config.show);
    }

    #[test]
    fn builders_set_fields() {
        let config = Config::default()
            .with_n_features(2)
            .with_n_samples(7)
            .with_label_col(Some(0))
            .with_ignore(vec![1, 3])
            .with_scale(true)
            .with_show(true);
        assert_eq!(config.n_features, 2);
        assert_eq!(config.n_samples, 7);
        assert_eq!(config.label_col, Some(0));
        assert_eq!(config.ignore, vec![1, 3]);
        assert!(config.scale);
        assert!(config.show);
    }

    #[test]
    fn validate_rejects_zeros() {
        assert_eq!(
            Config::default().with_k(0).validate(),
            Err(ConfigError::ZeroClusters)
        );
        assert_eq!(
            Config::default().with_restarts(0).validate(),
            Err(ConfigError::ZeroRestarts)
        );
        assert_eq!(
            Config::default().with_n_features(0).validate(),
            Err(ConfigError::ZeroFeatures)
        );
    }

    #[cfg(feature = "serde1")]
    #[test]
    fn missing_fields_take_defaults() {
        let config: Config = serde_json::from_str(r#"{"k": 5}"#).unwrap();
        assert_eq!(config, Config::default().with_k(5));
    }
}
