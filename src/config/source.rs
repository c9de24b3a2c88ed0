//! Reward sources, tier tables and the top-level extra rewards section

use super::pool::{parse_pools, RewardPool};
use super::reward::{parse_definitions, RewardDefinition};
use super::value::ConfigValue;
use crate::error::Result;
use serde::Deserialize;
use std::collections::HashMap;

/// Name of the top-level section holding the extra rewards configuration
pub const EXTRA_REWARDS_SECTION: &str = "extra-rewards";

/// Tier used when a kill carries no tier tag
pub const DEFAULT_TIER: &str = "DEFAULT";

/// A layer of rewards: flat list, pools and per-entity overrides
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RewardSource {
    pub rewards: Vec<RewardDefinition>,
    pub pools: Vec<RewardPool>,
    /// Keyed by entity type name
    pub per_entity: HashMap<String, EntityOverride>,
}

/// Per-entity override, one level deep
#[derive(Debug, Clone, PartialEq)]
pub enum EntityOverride {
    /// Legacy shape: `per-entity.<ENTITY>: [ {...}, ... ]`
    List(Vec<RewardDefinition>),
    /// `per-entity.<ENTITY>: { rewards: [...], pools: [...] }`
    Nested {
        rewards: Vec<RewardDefinition>,
        pools: Vec<RewardPool>,
    },
}

impl EntityOverride {
    fn from_value(value: &ConfigValue) -> Option<Self> {
        match value {
            ConfigValue::List(list) => Some(EntityOverride::List(parse_definitions(list))),
            ConfigValue::Map(_) => Some(EntityOverride::Nested {
                rewards: value.get_list("rewards").map(parse_definitions).unwrap_or_default(),
                pools: value.get_list("pools").map(parse_pools).unwrap_or_default(),
            }),
            _ => None,
        }
    }
}

impl RewardSource {
    /// Parse a source section. Missing or malformed keys yield empty layers.
    pub fn from_value(section: &ConfigValue) -> Self {
        let rewards = section.get_list("rewards").map(parse_definitions).unwrap_or_default();
        let pools = section.get_list("pools").map(parse_pools).unwrap_or_default();

        let mut per_entity = HashMap::new();
        if let Some(overrides) = section.get_section("per-entity").and_then(ConfigValue::as_map) {
            for (entity, value) in overrides {
                if let Some(entry) = EntityOverride::from_value(value) {
                    per_entity.insert(entity.clone(), entry);
                }
            }
        }

        Self {
            rewards,
            pools,
            per_entity,
        }
    }

    pub fn with_rewards(mut self, rewards: Vec<RewardDefinition>) -> Self {
        self.rewards = rewards;
        self
    }

    pub fn with_pools(mut self, pools: Vec<RewardPool>) -> Self {
        self.pools = pools;
        self
    }

    pub fn with_entity(mut self, entity: &str, entry: EntityOverride) -> Self {
        self.per_entity.insert(entity.to_string(), entry);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rewards.is_empty() && self.pools.is_empty() && self.per_entity.is_empty()
    }
}

/// A tier-specific layer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TierSection {
    pub source: RewardSource,
    /// Discard the global outputs when this tier applies
    pub replace_global: bool,
}

impl TierSection {
    pub fn from_value(section: &ConfigValue) -> Self {
        Self {
            source: RewardSource::from_value(section),
            replace_global: section.get_bool("replace-global", false),
        }
    }
}

/// The complete extra rewards configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "ConfigValue")]
pub struct RewardsConfig {
    pub enabled: bool,
    /// Clear the vanilla drop list before granting
    pub replace_default_drops: bool,
    /// Item unit cap per kill, non-positive means uncapped
    pub max_items_per_kill: i32,
    pub global: RewardSource,
    /// Keyed by uppercase tier name
    pub tiers: HashMap<String, TierSection>,
}

impl Default for RewardsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            replace_default_drops: false,
            max_items_per_kill: -1,
            global: RewardSource::default(),
            tiers: HashMap::new(),
        }
    }
}

impl RewardsConfig {
    /// Parse from the full plugin configuration, reading the `extra-rewards`
    /// section. A missing section yields a disabled configuration.
    pub fn from_root(root: &ConfigValue) -> Self {
        root.get_section(EXTRA_REWARDS_SECTION)
            .map(Self::from_section)
            .unwrap_or_default()
    }

    /// Parse the `extra-rewards` section itself
    pub fn from_section(section: &ConfigValue) -> Self {
        let mut max_items_per_kill = section.get_i32("max-items-per-kill", -1);
        // 0 is accepted as "no cap"
        if max_items_per_kill == 0 {
            max_items_per_kill = -1;
        }

        let mut tiers = HashMap::new();
        if let Some(table) = section.get_section("tiers").and_then(ConfigValue::as_map) {
            // Keys already in uppercase go last so they win over case variants
            let (exact, folded): (Vec<_>, Vec<_>) = table
                .iter()
                .filter(|(_, tier)| tier.as_map().is_some())
                .partition(|(name, _)| name.to_uppercase() == **name);
            for (name, tier) in folded.into_iter().chain(exact) {
                let key = name.to_uppercase();
                if tiers.contains_key(&key) {
                    log::warn!("Tier '{}' collides with another tier named '{}'", name, key);
                }
                tiers.insert(key, TierSection::from_value(tier));
            }
        }

        Self {
            enabled: section.get_bool("enabled", false),
            replace_default_drops: section.get_bool("replace-default-drops", false),
            max_items_per_kill,
            global: RewardSource::from_value(section),
            tiers,
        }
    }

    /// Parse the full plugin configuration from JSON text
    pub fn from_json_str(text: &str) -> Result<Self> {
        let root = ConfigValue::from_json_str(text)?;
        root.expect_map("configuration root")?;
        Ok(Self::from_root(&root))
    }

    /// Enabled configuration with only a global layer
    pub fn with_global(global: RewardSource) -> Self {
        Self {
            enabled: true,
            global,
            ..Default::default()
        }
    }

    pub fn with_tier(mut self, name: &str, tier: TierSection) -> Self {
        self.tiers.insert(name.to_uppercase(), tier);
        self
    }

    pub fn with_cap(mut self, cap: i32) -> Self {
        self.max_items_per_kill = if cap == 0 { -1 } else { cap };
        self
    }

    pub fn tier(&self, tier: &str) -> Option<&TierSection> {
        self.tiers.get(tier)
    }
}

impl From<ConfigValue> for RewardsConfig {
    fn from(root: ConfigValue) -> Self {
        Self::from_root(&root)
    }
}
