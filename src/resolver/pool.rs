//! Reward pools: weighted picks or exhaustive expansion

use super::builder::{build_reward, RewardOutput};
use super::list::{evaluate_list, passes_chance};
use crate::config::{PickMode, RewardDefinition, RewardPool};
use crate::context::KillContext;
use crate::material::MaterialCatalog;
use crate::random::RandomSource;
use smallvec::SmallVec;

/// Evaluate one pool
pub fn evaluate_pool<R: RandomSource + ?Sized>(
    pool: &RewardPool,
    ctx: &KillContext<'_>,
    catalog: &dyn MaterialCatalog,
    rng: &mut R,
) -> Vec<RewardOutput> {
    if pool.rolls <= 0 || pool.entries.is_empty() {
        return Vec::new();
    }

    match pool.pick {
        PickMode::All => evaluate_list(&pool.entries, ctx, catalog, rng),
        PickMode::Weighted => evaluate_weighted(pool, ctx, catalog, rng),
    }
}

/// Evaluate pools in order, concatenating their outputs
pub fn evaluate_pools<R: RandomSource + ?Sized>(
    pools: &[RewardPool],
    ctx: &KillContext<'_>,
    catalog: &dyn MaterialCatalog,
    rng: &mut R,
) -> Vec<RewardOutput> {
    let mut out = Vec::new();
    for pool in pools {
        out.extend(evaluate_pool(pool, ctx, catalog, rng));
    }
    out
}

fn evaluate_weighted<R: RandomSource + ?Sized>(
    pool: &RewardPool,
    ctx: &KillContext<'_>,
    catalog: &dyn MaterialCatalog,
    rng: &mut R,
) -> Vec<RewardOutput> {
    let rolls = pool.rolls as usize;
    let effective_rolls = if pool.unique {
        rolls.min(pool.entries.len())
    } else {
        rolls
    };

    // Live candidates for this invocation; unique picks are swap-removed
    let mut candidates: SmallVec<[usize; 16]> = (0..pool.entries.len()).collect();
    // Grows with granted rewards only; rolls come straight from configuration
    let mut out = Vec::new();

    for _ in 0..effective_rolls {
        let Some(slot) = pick_weighted(&candidates, &pool.entries, rng) else {
            log::debug!("Pool has no positive weight left, skipping remaining rolls");
            break;
        };

        let chosen = &pool.entries[candidates[slot]];
        if passes_chance(chosen.chance, rng) {
            if let Some(reward) = build_reward(chosen, ctx, catalog, rng) {
                out.push(reward);
            }
        }

        if pool.unique {
            candidates.swap_remove(slot);
        }
    }

    out
}

/// Weighted pick among `candidates` (indices into `entries`).
///
/// Returns the slot in `candidates`, or `None` when no candidate carries a
/// positive weight. Entries with non-positive weight are never picked. If
/// rounding leaves the draw past the running total, the last positively
/// weighted candidate wins.
pub fn pick_weighted<R: RandomSource + ?Sized>(
    candidates: &[usize],
    entries: &[RewardDefinition],
    rng: &mut R,
) -> Option<usize> {
    let total: f64 = candidates
        .iter()
        .filter_map(|&i| positive_weight(&entries[i]))
        .sum();
    if total <= 0.0 {
        return None;
    }

    let r = rng.next_f64() * total;
    let mut upto = 0.0;
    let mut last = None;

    for (slot, &i) in candidates.iter().enumerate() {
        let Some(weight) = positive_weight(&entries[i]) else {
            continue;
        };
        upto += weight;
        last = Some(slot);
        if upto >= r {
            return Some(slot);
        }
    }

    last
}

#[inline]
fn positive_weight(def: &RewardDefinition) -> Option<f64> {
    if def.weight > 0.0 {
        Some(def.weight)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::AnyMaterial;
    use crate::random::ScriptedRandom;

    fn materials(out: &[RewardOutput]) -> Vec<String> {
        out.iter()
            .filter_map(|o| o.as_item())
            .map(|s| s.material.name().to_string())
            .collect()
    }

    #[test]
    fn test_pick_weighted_walk() {
        let entries = vec![
            RewardDefinition::item("A", 1).with_weight(1.0),
            RewardDefinition::item("B", 1).with_weight(0.0),
            RewardDefinition::item("C", 1).with_weight(3.0),
        ];
        let candidates = [0, 1, 2];

        // total = 4; r = 0.2 * 4 = 0.8 -> A
        let mut rng = ScriptedRandom::floats([0.2]);
        assert_eq!(pick_weighted(&candidates, &entries, &mut rng), Some(0));

        // r = 0.25 * 4 = 1.0 -> A (upto >= r on ties)
        let mut rng = ScriptedRandom::floats([0.25]);
        assert_eq!(pick_weighted(&candidates, &entries, &mut rng), Some(0));

        // r = 0.5 * 4 = 2.0 -> C, B is skipped
        let mut rng = ScriptedRandom::floats([0.5]);
        assert_eq!(pick_weighted(&candidates, &entries, &mut rng), Some(2));
    }

    #[test]
    fn test_pick_weighted_no_positive_weight() {
        let entries = vec![
            RewardDefinition::item("A", 1).with_weight(0.0),
            RewardDefinition::item("B", 1).with_weight(-2.0),
        ];
        let mut rng = ScriptedRandom::default();
        assert_eq!(pick_weighted(&[0, 1], &entries, &mut rng), None);
        assert_eq!(rng.float_draws(), 0);
    }

    #[test]
    fn test_pick_weighted_skips_zero_weight_tail() {
        let entries = vec![
            RewardDefinition::item("A", 1).with_weight(1.0),
            RewardDefinition::item("B", 1).with_weight(1.0),
            RewardDefinition::item("C", 1).with_weight(0.0),
        ];
        // The top of [0, 1) lands on the last positive entry, never the zero-weight tail
        let mut rng = ScriptedRandom::floats([1.0 - f64::EPSILON]);
        assert_eq!(pick_weighted(&[0, 1, 2], &entries, &mut rng), Some(1));
    }

    #[test]
    fn test_pick_weighted_fallback_when_draw_past_total() {
        let entries = vec![
            RewardDefinition::item("A", 1).with_weight(1.0),
            RewardDefinition::item("B", 1).with_weight(1.0),
            RewardDefinition::item("C", 1).with_weight(0.0),
        ];
        // r = 1.5 * 2 = 3.0 runs past the total, so the walk falls through
        let mut rng = ScriptedRandom::floats([1.5]);
        assert_eq!(pick_weighted(&[0, 1, 2], &entries, &mut rng), Some(1));

        // Same with the zero-weight entry first
        let mut rng = ScriptedRandom::floats([1.5]);
        assert_eq!(pick_weighted(&[2, 0, 1], &entries, &mut rng), Some(2));
    }

    #[test]
    fn test_huge_rolls_do_not_preallocate() {
        let pool = RewardPool::weighted(100_000, vec![RewardDefinition::item("A", 1).with_chance(0.0)]);
        let ctx = KillContext::new("ZOMBIE", None);
        let mut rng = ScriptedRandom::default();

        let out = evaluate_pool(&pool, &ctx, &AnyMaterial, &mut rng);
        assert!(out.is_empty());
        assert_eq!(out.capacity(), 0);
        assert_eq!(rng.float_draws(), 100_000);
    }

    #[test]
    fn test_weighted_rolls_repeat_without_unique() {
        let pool = RewardPool::weighted(3, vec![RewardDefinition::item("A", 1), RewardDefinition::item("B", 1)]);
        let ctx = KillContext::new("ZOMBIE", None);
        // pick, chance, pick, chance, pick, chance
        let mut rng = ScriptedRandom::floats([0.1, 0.0, 0.1, 0.0, 0.9, 0.0]);

        let out = evaluate_pool(&pool, &ctx, &AnyMaterial, &mut rng);
        assert_eq!(materials(&out), vec!["A", "A", "B"]);
        assert_eq!(rng.float_draws(), 6);
    }

    #[test]
    fn test_unique_pool_never_repeats() {
        let pool = RewardPool::weighted(
            5,
            vec![RewardDefinition::item("A", 1), RewardDefinition::item("B", 1)],
        )
        .unique();
        let ctx = KillContext::new("ZOMBIE", None);
        let mut rng = ScriptedRandom::floats([0.1, 0.0, 0.1, 0.0, 0.1, 0.0]);

        let out = evaluate_pool(&pool, &ctx, &AnyMaterial, &mut rng);
        assert_eq!(materials(&out), vec!["A", "B"]);
        // two rolls, each a pick draw plus a chance draw
        assert_eq!(rng.float_draws(), 4);
    }

    #[test]
    fn test_picked_entry_still_chance_gated() {
        let pool = RewardPool::weighted(
            2,
            vec![
                RewardDefinition::item("A", 1).with_chance(0.5),
                RewardDefinition::item("B", 1).with_chance(0.5),
            ],
        )
        .unique();
        let ctx = KillContext::new("ZOMBIE", None);
        // pick A, chance fails; pick B, chance passes
        let mut rng = ScriptedRandom::floats([0.1, 0.9, 0.1, 0.2]);

        let out = evaluate_pool(&pool, &ctx, &AnyMaterial, &mut rng);
        assert_eq!(materials(&out), vec!["B"]);
    }

    #[test]
    fn test_zero_chance_entry_picked_but_never_granted() {
        let pool = RewardPool::weighted(1, vec![RewardDefinition::item("A", 1).with_chance(0.0)]);
        let ctx = KillContext::new("ZOMBIE", None);
        let mut rng = ScriptedRandom::default();
        assert!(evaluate_pool(&pool, &ctx, &AnyMaterial, &mut rng).is_empty());
        assert_eq!(rng.float_draws(), 1);
    }

    #[test]
    fn test_pool_disabled_by_rolls() {
        let mut pool = RewardPool::weighted(0, vec![RewardDefinition::item("A", 1)]);
        let ctx = KillContext::new("ZOMBIE", None);
        let mut rng = ScriptedRandom::default();
        assert!(evaluate_pool(&pool, &ctx, &AnyMaterial, &mut rng).is_empty());
        pool.rolls = -3;
        assert!(evaluate_pool(&pool, &ctx, &AnyMaterial, &mut rng).is_empty());
        assert_eq!(rng.float_draws(), 0);
    }

    #[test]
    fn test_all_mode_ignores_rolls() {
        let mut pool = RewardPool::all(vec![
            RewardDefinition::item("A", 1),
            RewardDefinition::item("B", 1).with_chance(0.5),
            RewardDefinition::item("C", 1),
        ]);
        pool.rolls = 9;
        pool.unique = true;
        let ctx = KillContext::new("ZOMBIE", None);
        let mut rng = ScriptedRandom::floats([0.0, 0.7, 0.0]);

        let out = evaluate_pool(&pool, &ctx, &AnyMaterial, &mut rng);
        assert_eq!(materials(&out), vec!["A", "C"]);
    }
}
