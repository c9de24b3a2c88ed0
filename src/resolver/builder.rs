//! Materializes reward definitions into concrete outputs

use crate::config::{AmountSpec, RewardDefinition, RewardKind};
use crate::context::KillContext;
use crate::material::{ItemStack, MaterialCatalog};
use crate::random::RandomSource;
use smallvec::SmallVec;

/// Rendered command lines of one command reward, usually one or two
pub type CommandBatch = SmallVec<[String; 2]>;

/// A resolved reward, ready to apply
#[derive(Debug, Clone, PartialEq)]
pub enum RewardOutput {
    Item(ItemStack),
    Command {
        commands: CommandBatch,
        as_console: bool,
    },
}

impl RewardOutput {
    pub fn as_item(&self) -> Option<&ItemStack> {
        match self {
            RewardOutput::Item(stack) => Some(stack),
            RewardOutput::Command { .. } => None,
        }
    }

    pub fn is_command(&self) -> bool {
        matches!(self, RewardOutput::Command { .. })
    }
}

/// Build the output for a definition that already passed its chance gate.
///
/// Returns `None` for definitions that cannot produce anything: no material,
/// an unknown material, a non-positive amount, or no commands.
pub fn build_reward<R: RandomSource + ?Sized>(
    def: &RewardDefinition,
    ctx: &KillContext<'_>,
    catalog: &dyn MaterialCatalog,
    rng: &mut R,
) -> Option<RewardOutput> {
    match &def.kind {
        RewardKind::Command {
            commands,
            as_console,
        } => {
            if commands.is_empty() {
                return None;
            }
            let commands = commands.iter().map(|c| render_command(c, ctx)).collect();
            Some(RewardOutput::Command {
                commands,
                as_console: *as_console,
            })
        }
        RewardKind::Item { material, amount } => {
            let name = material.as_deref()?;
            let Some(material) = catalog.resolve(name) else {
                log::warn!("Invalid extra-reward material: {}", name);
                return None;
            };

            let amount = resolve_amount(*amount, rng);
            if amount <= 0 {
                return None;
            }
            Some(RewardOutput::Item(ItemStack::new(material, amount as u32)))
        }
    }
}

/// Substitute placeholders, then drop one leading slash
fn render_command(template: &str, ctx: &KillContext<'_>) -> String {
    let rendered = ctx.render(template);
    match rendered.strip_prefix('/') {
        Some(rest) => rest.to_string(),
        None => rendered,
    }
}

/// Resolve an amount. Fixed amounts are used verbatim, ranges are clamped
/// and drawn inclusively.
#[inline]
pub fn resolve_amount<R: RandomSource + ?Sized>(spec: AmountSpec, rng: &mut R) -> i32 {
    match spec {
        AmountSpec::Fixed(amount) => amount,
        AmountSpec::Range { min, max } => random_int_clamped(min, max, rng),
    }
}

/// Negative bounds clamp to 0 and `max < min` is raised to `min`. Equal
/// bounds return without drawing.
#[inline]
pub fn random_int_clamped<R: RandomSource + ?Sized>(min: i32, max: i32, rng: &mut R) -> i32 {
    let min = min.max(0);
    let max = max.max(min);
    if min == max {
        return min;
    }
    rng.next_i32_inclusive(min, max)
}
