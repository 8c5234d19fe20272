use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// How a local-search pass picks the move it applies.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Improvement {
    /// Scan the whole neighborhood, apply the largest gain
    Best,
    /// Apply the first strictly improving move found
    First,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub num_trials: usize,
    pub max_local_search_iterations: usize,
    pub allow_moves: bool,
    pub improvement: Improvement,
    pub early_stop_trials: Option<usize>,
}

pub const DEFAULT_EFFORT: usize = 2;

impl Default for Config {
    fn default() -> Self {
        Self::preset(DEFAULT_EFFORT)
    }
}

impl Config {
    fn preset(effort: usize) -> Self {
        let (num_trials, max_local_search_iterations) = match effort {
            0 => (100, 50),
            1 => (300, 100),
            2 => (1_000, 100),
            _ => (5_000, 200),
        };
        Self {
            num_trials,
            max_local_search_iterations,
            allow_moves: true,
            improvement: Improvement::Best,
            early_stop_trials: None,
        }
    }

    /// Effort preset scaled to the number of people to place.
    pub fn auto_effort(num_people: usize) -> usize {
        match num_people {
            0..=8 => 0,
            9..=12 => 1,
            _ => DEFAULT_EFFORT,
        }
    }

    /// Defaults, overridden by an `effort` preset, overridden by explicit keys.
    /// `"effort": "auto"` falls back to the default preset here.
    pub fn initialize(hyperparameters: &Option<Map<String, Value>>) -> Result<Self> {
        Self::merge(hyperparameters, DEFAULT_EFFORT)
    }

    /// Like `initialize`, resolving `"effort": "auto"` from `num_people`.
    pub fn initialize_for_size(
        hyperparameters: &Option<Map<String, Value>>,
        num_people: usize,
    ) -> Result<Self> {
        Self::merge(hyperparameters, Self::auto_effort(num_people))
    }

    fn merge(hyperparameters: &Option<Map<String, Value>>, auto_effort: usize) -> Result<Self> {
        let mut base_params = Self::default();

        if let Some(v) = hyperparameters.as_ref().and_then(|m| m.get("effort")) {
            let effort = match v {
                Value::Number(n) => n.as_u64().map(|u| u as usize),
                Value::String(s) if s == "auto" => Some(auto_effort),
                Value::String(s) => s.parse::<usize>().ok(),
                _ => None,
            }
            .ok_or_else(|| anyhow!("Invalid effort level: {}", v))?;
            base_params = Self::preset(effort);
        }

        let mut merged_params = serde_json::to_value(base_params)?;
        if let (Value::Object(ref mut obj), Some(map)) = (&mut merged_params, hyperparameters) {
            for (k, v) in map {
                if k == "effort" {
                    continue;
                }
                obj.insert(k.clone(), v.clone());
            }
        }

        serde_json::from_value(merged_params).map_err(|e| anyhow!("Invalid hyperparameters: {}", e))
    }
}
