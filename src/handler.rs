//! Per-kill reward handling

use crate::apply::{apply_outputs, ApplyReport, CommandSink};
use crate::config::RewardsConfig;
use crate::context::{DeathEvent, KillContext};
use crate::material::{ItemStack, MaterialCatalog};
use crate::random::RandomSource;
use crate::resolver::{resolve_outputs, RewardOutput};

/// Vanilla drops a trial-spawned entity is allowed to keep
pub const KEPT_VANILLA_DROPS: [&str; 4] = ["BREEZE_ROD", "ROTTEN_FLESH", "BONE", "ARROW"];

/// Reward engine: configuration plus the material catalog it validates
/// against. Immutable, so one engine can serve kills on many threads.
pub struct RewardEngine {
    config: RewardsConfig,
    catalog: Box<dyn MaterialCatalog + Send + Sync>,
}

impl RewardEngine {
    pub fn new(config: RewardsConfig, catalog: impl MaterialCatalog + Send + Sync + 'static) -> Self {
        Self {
            config,
            catalog: Box::new(catalog),
        }
    }

    pub fn config(&self) -> &RewardsConfig {
        &self.config
    }

    /// Resolve the outputs for a kill without applying them
    pub fn resolve<R: RandomSource + ?Sized>(&self, ctx: &KillContext<'_>, rng: &mut R) -> Vec<RewardOutput> {
        resolve_outputs(&self.config, ctx, self.catalog.as_ref(), rng)
    }

    /// Handle one entity death: filter vanilla drops, then resolve and apply
    /// the extra rewards when they are enabled
    pub fn handle_death<R, S>(&self, event: &mut DeathEvent, rng: &mut R, sink: &mut S) -> ApplyReport
    where
        R: RandomSource + ?Sized,
        S: CommandSink + ?Sized,
    {
        if !event.trial_spawned {
            return ApplyReport::default();
        }

        filter_vanilla_drops(&mut event.drops);

        if !self.config.enabled {
            return ApplyReport::default();
        }

        if self.config.replace_default_drops {
            event.drops.clear();
        }

        let outputs = self.resolve(&event.context(), rng);
        apply_outputs(
            &outputs,
            self.config.max_items_per_kill,
            event.killer.as_ref(),
            &mut event.drops,
            sink,
        )
    }
}

/// Keep only the vanilla drops trial-spawned entities may leave behind
pub fn filter_vanilla_drops(drops: &mut Vec<ItemStack>) {
    drops.retain(|stack| KEPT_VANILLA_DROPS.iter().any(|kept| stack.material.is(kept)));
}
