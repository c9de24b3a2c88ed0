//! Source gathering: global, tier and per-entity layers

use super::builder::RewardOutput;
use super::list::evaluate_list;
use super::pool::evaluate_pools;
use crate::config::{EntityOverride, RewardSource, RewardsConfig};
use crate::context::KillContext;
use crate::material::MaterialCatalog;
use crate::random::RandomSource;

/// Gather outputs from one source: rewards, then pools, then the override
/// for the killed entity type
pub fn gather<R: RandomSource + ?Sized>(
    source: &RewardSource,
    ctx: &KillContext<'_>,
    catalog: &dyn MaterialCatalog,
    rng: &mut R,
) -> Vec<RewardOutput> {
    let mut out = evaluate_list(&source.rewards, ctx, catalog, rng);
    out.extend(evaluate_pools(&source.pools, ctx, catalog, rng));

    match source.per_entity.get(ctx.entity_type) {
        Some(EntityOverride::List(rewards)) => {
            out.extend(evaluate_list(rewards, ctx, catalog, rng));
        }
        Some(EntityOverride::Nested { rewards, pools }) => {
            out.extend(evaluate_list(rewards, ctx, catalog, rng));
            out.extend(evaluate_pools(pools, ctx, catalog, rng));
        }
        None => {}
    }

    out
}

/// Resolve every output for a kill: the global layer, then the tier layer
/// for the context's tier, which may replace the global outputs
pub fn resolve_outputs<R: RandomSource + ?Sized>(
    config: &RewardsConfig,
    ctx: &KillContext<'_>,
    catalog: &dyn MaterialCatalog,
    rng: &mut R,
) -> Vec<RewardOutput> {
    let mut outputs = gather(&config.global, ctx, catalog, rng);

    if let Some(tier) = config.tier(&ctx.tier) {
        let tier_outputs = gather(&tier.source, ctx, catalog, rng);
        if tier.replace_global {
            outputs = tier_outputs;
        } else {
            outputs.extend(tier_outputs);
        }
    }

    log::debug!(
        "Resolved {} reward outputs for {} (tier {})",
        outputs.len(),
        ctx.entity_type,
        ctx.tier
    );

    outputs
}
