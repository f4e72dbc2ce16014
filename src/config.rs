// Configuration module for reading Snake.toml
// This module provides OOP-style configuration management for the Battlesnake bot

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::forager::ForagerPolicy;
use crate::pathfinding::PathPreference;
use crate::policy::HunterPolicy;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub timing: TimingConfig,
    pub policy: PolicyConfig,
    pub forager: ForagerConfig,
    pub appearance: AppearanceConfig,
    pub debug: DebugConfig,
}

/// Response timing constants
#[derive(Debug, Deserialize, Clone)]
pub struct TimingConfig {
    pub response_time_budget_ms: u64,
    pub network_overhead_ms: u64,
}

impl TimingConfig {
    /// Computes the effective computation budget
    pub fn effective_budget_ms(&self) -> u64 {
        self.response_time_budget_ms.saturating_sub(self.network_overhead_ms)
    }
}

/// Which policy decides moves
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    /// Attack / avoid / seek-food by length and enemy proximity
    Hunter,
    /// Health-tiered avoid / seek-food
    Forager,
}

/// Policy selection and hunter constants
#[derive(Debug, Deserialize, Clone)]
pub struct PolicyConfig {
    pub kind: PolicyKind,
    /// Manhattan distance below which the nearest enemy triggers avoidance
    pub proximity_threshold: i32,
    pub path_preference: PathPreference,
}

impl PolicyConfig {
    pub fn hunter(&self) -> HunterPolicy {
        HunterPolicy::new(self.proximity_threshold, self.path_preference)
    }
}

/// Forager health tiers
#[derive(Debug, Deserialize, Clone)]
pub struct ForagerConfig {
    pub avoid_health_threshold: i32,
    pub desperate_health_threshold: i32,
}

impl ForagerConfig {
    pub fn policy(&self) -> ForagerPolicy {
        ForagerPolicy::new(self.avoid_health_threshold, self.desperate_health_threshold)
    }
}

/// Appearance returned from GET /
#[derive(Debug, Deserialize, Clone)]
pub struct AppearanceConfig {
    pub author: String,
    pub color: String,
    pub head: String,
    pub tail: String,
}

/// Debug configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
    /// Log the ASCII grid at debug level every turn
    pub render_grid: bool,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Snake.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        Self::from_toml_str(&contents)
    }

    /// Parses configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, String> {
        toml::from_str(contents).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Loads default configuration from Snake.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Snake.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Snake.toml
    pub fn default_hardcoded() -> Self {
        Config {
            timing: TimingConfig {
                response_time_budget_ms: 400,
                network_overhead_ms: 50,
            },
            policy: PolicyConfig {
                kind: PolicyKind::Hunter,
                proximity_threshold: 3,
                path_preference: PathPreference::Longest,
            },
            forager: ForagerConfig {
                avoid_health_threshold: 50,
                desperate_health_threshold: 15,
            },
            appearance: AppearanceConfig {
                author: "ksiopiolosz-aterlo".to_string(),
                color: "#009900".to_string(),
                head: "evil".to_string(),
                tail: "bolt".to_string(),
            },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "battlesnake_debug.jsonl".to_string(),
                render_grid: true,
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            log::warn!("Could not load Snake.toml ({}), using hardcoded defaults", e);
            Self::default_hardcoded()
        })
    }
}
