//! Kill events and the context used to render command placeholders

use crate::config::DEFAULT_TIER;
use crate::material::ItemStack;
use uuid::Uuid;

/// The player credited with the kill
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Killer {
    pub name: String,
    pub uuid: Uuid,
}

impl Killer {
    pub fn new(name: &str, uuid: Uuid) -> Self {
        Self {
            name: name.to_string(),
            uuid,
        }
    }
}

/// Where the entity died, in block coordinates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeathLocation {
    pub world: String,
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl DeathLocation {
    pub fn new(world: &str, x: i32, y: i32, z: i32) -> Self {
        Self {
            world: world.to_string(),
            x,
            y,
            z,
        }
    }

    /// Block-align an exact position
    pub fn from_position(world: &str, x: f64, y: f64, z: f64) -> Self {
        Self::new(world, x.floor() as i32, y.floor() as i32, z.floor() as i32)
    }
}

/// A single entity death as delivered by the host
#[derive(Debug, Clone, Default)]
pub struct DeathEvent {
    pub entity_type: String,
    /// Set when the entity came from a trial spawner
    pub trial_spawned: bool,
    pub killer: Option<Killer>,
    /// Raw tier tag attached to the entity, if any
    pub tier_tag: Option<String>,
    pub location: Option<DeathLocation>,
    /// Drop list, mutated in place when rewards are applied
    pub drops: Vec<ItemStack>,
}

impl DeathEvent {
    /// A trial-spawned kill of the given entity type with no drops
    pub fn trial(entity_type: &str) -> Self {
        Self {
            entity_type: entity_type.to_string(),
            trial_spawned: true,
            ..Default::default()
        }
    }

    pub fn with_killer(mut self, killer: Killer) -> Self {
        self.killer = Some(killer);
        self
    }

    pub fn with_tier(mut self, tier: &str) -> Self {
        self.tier_tag = Some(tier.to_string());
        self
    }

    pub fn with_location(mut self, location: DeathLocation) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_drops(mut self, drops: Vec<ItemStack>) -> Self {
        self.drops = drops;
        self
    }

    /// Borrowed view used while resolving rewards
    pub fn context(&self) -> KillContext<'_> {
        KillContext {
            entity_type: &self.entity_type,
            tier: resolve_tier(self.tier_tag.as_deref()),
            killer: self.killer.as_ref(),
            location: self.location.as_ref(),
        }
    }
}

/// Canonical tier name: uppercase, `DEFAULT` when absent or blank
pub fn resolve_tier(tag: Option<&str>) -> String {
    match tag {
        Some(tag) if !tag.trim().is_empty() => tag.to_uppercase(),
        _ => DEFAULT_TIER.to_string(),
    }
}

/// Everything reward resolution reads about a kill
#[derive(Debug, Clone)]
pub struct KillContext<'a> {
    pub entity_type: &'a str,
    pub tier: String,
    pub killer: Option<&'a Killer>,
    pub location: Option<&'a DeathLocation>,
}

impl<'a> KillContext<'a> {
    pub fn new(entity_type: &'a str, tier: Option<&str>) -> Self {
        Self {
            entity_type,
            tier: resolve_tier(tier),
            killer: None,
            location: None,
        }
    }

    pub fn with_killer(mut self, killer: &'a Killer) -> Self {
        self.killer = Some(killer);
        self
    }

    pub fn with_location(mut self, location: &'a DeathLocation) -> Self {
        self.location = Some(location);
        self
    }

    /// Literal placeholder substitution. Killer and location tokens stay
    /// untouched when that information is missing.
    pub fn render(&self, template: &str) -> String {
        let mut s = template.to_string();
        if let Some(killer) = self.killer {
            s = s.replace("%player%", &killer.name);
            s = s.replace("%uuid%", &killer.uuid.to_string());
        }
        s = s.replace("%entity%", self.entity_type);
        s = s.replace("%tier%", &self.tier);
        if let Some(location) = self.location {
            s = s.replace("%world%", &location.world);
            s = s.replace("%x%", &location.x.to_string());
            s = s.replace("%y%", &location.y.to_string());
            s = s.replace("%z%", &location.z.to_string());
        }
        s
    }
}
