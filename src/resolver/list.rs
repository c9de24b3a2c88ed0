//! Flat reward lists: every definition rolls its own chance gate

use super::builder::{build_reward, RewardOutput};
use crate::config::RewardDefinition;
use crate::context::KillContext;
use crate::material::MaterialCatalog;
use crate::random::RandomSource;

/// Roll a chance gate. Non-positive chances fail without drawing.
#[inline]
pub fn passes_chance<R: RandomSource + ?Sized>(chance: f64, rng: &mut R) -> bool {
    if chance <= 0.0 {
        return false;
    }
    rng.next_f64() <= chance.min(1.0)
}

/// Evaluate each definition independently, preserving order
pub fn evaluate_list<R: RandomSource + ?Sized>(
    defs: &[RewardDefinition],
    ctx: &KillContext<'_>,
    catalog: &dyn MaterialCatalog,
    rng: &mut R,
) -> Vec<RewardOutput> {
    let mut out = Vec::with_capacity(defs.len());

    for def in defs {
        if !passes_chance(def.chance, rng) {
            continue;
        }
        if let Some(reward) = build_reward(def, ctx, catalog, rng) {
            out.push(reward);
        }
    }

    out
}
