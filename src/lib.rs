//! Trial Rewards Core - Reward resolution engine for trial spawner kills
//!
//! This crate decides which extra rewards a trial-spawned entity grants when
//! it dies: flat chance-gated lists, weighted pools, tier tables and
//! per-entity overrides, capped by a per-kill item budget. Delivering the
//! rewards is left to the host through [`CommandSink`] and the event's drop
//! list.

pub mod apply;
pub mod config;
pub mod context;
pub mod error;
pub mod handler;
pub mod material;
pub mod random;
pub mod resolver;

pub use crate::apply::{ApplyReport, CommandSender, CommandSink, DispatchedCommand};
pub use crate::config::{ConfigValue, RewardsConfig};
pub use crate::context::{DeathEvent, DeathLocation, KillContext, Killer};
pub use crate::error::{Result, TrialRewardsError};
pub use crate::handler::RewardEngine;
pub use crate::material::{ItemStack, Material, MaterialCatalog, StaticCatalog};
pub use crate::random::{RandomSource, ThreadRandom};
pub use crate::resolver::RewardOutput;

use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use std::sync::Arc;

// ============================================================================
// Cached Engine
// ============================================================================

/// Global cached engine
static CACHED_ENGINE: OnceCell<Arc<RwLock<RewardEngine>>> = OnceCell::new();

/// Initialize the reward engine (call once at startup, again on reload)
///
/// # Arguments
/// * `config` - Parsed extra rewards configuration
/// * `catalog` - Material catalog used to validate item rewards
pub fn init_engine(config: RewardsConfig, catalog: impl MaterialCatalog + Send + Sync + 'static) {
    let engine = RewardEngine::new(config, catalog);

    // If already initialized, swap the engine in place
    if let Some(existing) = CACHED_ENGINE.get() {
        let mut guard = existing.write();
        *guard = engine;
    } else {
        let _ = CACHED_ENGINE.set(Arc::new(RwLock::new(engine)));
    }

    log::debug!("Reward engine initialized");
}

/// Initialize the reward engine from the full plugin configuration as JSON
///
/// # Errors
/// `DeserializationError` for malformed JSON, `InvalidConfig` when the root is not
/// a mapping
pub fn init_engine_from_json(
    text: &str,
    catalog: impl MaterialCatalog + Send + Sync + 'static,
) -> Result<()> {
    let config = RewardsConfig::from_json_str(text)?;
    init_engine(config, catalog);
    Ok(())
}

/// Check if the engine is initialized
pub fn is_engine_initialized() -> bool {
    CACHED_ENGINE.get().is_some()
}

/// Handle a kill with the cached engine and per-thread randomness
///
/// # Errors
/// `EngineNotInitialized` if `init_engine` was not called first
pub fn handle_death<S: CommandSink + ?Sized>(event: &mut DeathEvent, sink: &mut S) -> Result<ApplyReport> {
    let engine = CACHED_ENGINE
        .get()
        .ok_or(TrialRewardsError::EngineNotInitialized)?
        .clone();

    let engine = engine.read();
    Ok(engine.handle_death(event, &mut ThreadRandom, sink))
}
