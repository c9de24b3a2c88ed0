//! Reward pool structures

use super::reward::{parse_definitions, RewardDefinition};
use super::value::ConfigValue;
use std::str::FromStr;

/// How a pool turns its rolls into picks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickMode {
    /// One weighted pick per roll
    #[default]
    Weighted,
    /// Every entry, each behind its own chance gate
    All,
}

impl FromStr for PickMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "WEIGHTED" => Ok(PickMode::Weighted),
            "ALL" => Ok(PickMode::All),
            _ => Err(()),
        }
    }
}

/// A reward sub-table evaluated through repeated rolls
#[derive(Debug, Clone, PartialEq)]
pub struct RewardPool {
    /// Non-positive roll counts disable the pool
    pub rolls: i32,
    /// Sample without replacement within one evaluation
    pub unique: bool,
    pub pick: PickMode,
    pub entries: Vec<RewardDefinition>,
}

impl RewardPool {
    pub fn weighted(rolls: i32, entries: Vec<RewardDefinition>) -> Self {
        Self {
            rolls,
            unique: false,
            pick: PickMode::Weighted,
            entries,
        }
    }

    pub fn all(entries: Vec<RewardDefinition>) -> Self {
        Self {
            rolls: 1,
            unique: false,
            pick: PickMode::All,
            entries,
        }
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Parse one pool. Pools without an `entries` list are not pools.
    pub fn from_value(pool: &ConfigValue) -> Option<Self> {
        pool.as_map()?;
        let entries = pool.get_list("entries")?;

        let rolls = pool.get_i32("rolls", 1);
        let unique = pool.get_bool("unique", false);
        // Unrecognized modes fall back to weighted
        let pick = pool
            .get_text("pick")
            .and_then(|mode| mode.parse().ok())
            .unwrap_or_default();

        Some(Self {
            rolls,
            unique,
            pick,
            entries: parse_definitions(entries),
        })
    }
}

/// Parse a list of pools, skipping malformed ones
pub fn parse_pools(list: &[ConfigValue]) -> Vec<RewardPool> {
    list.iter().filter_map(RewardPool::from_value).collect()
}
