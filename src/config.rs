//! Run configuration, loadable from TOML.
//!
//! ```
//! use sbp_solver::config::SearchConfig;
//! use sbp_solver::search::Algorithm;
//!
//! let config = SearchConfig::from_toml_str(r#"
//!     algorithm = "iterative_deepening"
//!     max_depth = 40
//!     node_budget = 1000000
//! "#).unwrap();
//!
//! assert_eq!(config.algorithm, Algorithm::IterativeDeepening);
//! assert_eq!(config.limits().node_budget, Some(1_000_000));
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::search::{Algorithm, SearchLimits};

pub const DEFAULT_MAX_DEPTH: u32 = 64;

fn default_max_depth() -> u32 {
    DEFAULT_MAX_DEPTH
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct SearchConfig {
    #[serde(default)]
    pub algorithm: Algorithm,

    /// Bound for depth-limited search and iterative deepening.
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,

    /// Abort once the search graph holds this many nodes.
    #[serde(default)]
    pub node_budget: Option<usize>,

    /// Random moves to print before searching; 0 skips the walk.
    #[serde(default)]
    pub random_walk_steps: usize,

    /// Seed for the random walk.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            algorithm: Algorithm::default(),
            max_depth: DEFAULT_MAX_DEPTH,
            node_budget: None,
            random_walk_steps: 0,
            random_seed: None,
        }
    }
}

impl SearchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: SearchConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.node_budget == Some(0) {
            return Err(ConfigError::Invalid("node_budget must be positive".into()));
        }
        if self.max_depth == 0
            && matches!(
                self.algorithm,
                Algorithm::DepthLimited | Algorithm::IterativeDeepening
            )
        {
            return Err(ConfigError::Invalid(format!(
                "{} needs a positive max_depth",
                self.algorithm
            )));
        }
        Ok(())
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_node_budget(mut self, budget: usize) -> Self {
        self.node_budget = Some(budget);
        self
    }

    pub fn with_random_walk(mut self, steps: usize, seed: Option<u64>) -> Self {
        self.random_walk_steps = steps;
        self.random_seed = seed;
        self
    }

    pub fn limits(&self) -> SearchLimits {
        SearchLimits {
            node_budget: self.node_budget,
        }
    }
}
