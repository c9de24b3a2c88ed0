//! Reward definition structures

use super::value::ConfigValue;

/// Default chance and weight of a definition
pub const DEFAULT_CHANCE: f64 = 1.0;
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// A single reward definition: either an item drop or a batch of commands
#[derive(Debug, Clone, PartialEq)]
pub struct RewardDefinition {
    /// Grant probability, clamped to [0, 1] when rolled
    pub chance: f64,
    /// Selection weight, only meaningful inside weighted pools
    pub weight: f64,
    pub kind: RewardKind,
}

/// What a definition grants when it passes its chance gate
#[derive(Debug, Clone, PartialEq)]
pub enum RewardKind {
    Item {
        /// Raw material identifier, resolved against the catalog at build time
        material: Option<String>,
        amount: AmountSpec,
    },
    Command {
        /// Unrendered command templates, may be empty
        commands: Vec<String>,
        as_console: bool,
    },
}

/// Item amount, fixed or drawn uniformly from an inclusive range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountSpec {
    Fixed(i32),
    Range { min: i32, max: i32 },
}

impl Default for AmountSpec {
    fn default() -> Self {
        AmountSpec::Range { min: 1, max: 1 }
    }
}

impl AmountSpec {
    /// `amount: 3`, `amount: {min, max}`, or the flat `min-amount`/`max-amount`
    fn from_entry(entry: &ConfigValue) -> Self {
        match entry.get("amount") {
            Some(ConfigValue::Int(_)) | Some(ConfigValue::Float(_)) => {
                AmountSpec::Fixed(entry.get_i32("amount", 1))
            }
            Some(range @ ConfigValue::Map(_)) => {
                let min = range.get_i32("min", 1);
                let max = range.get_i32("max", min);
                AmountSpec::Range { min, max }
            }
            _ => {
                let min = entry.get_i32("min-amount", 1);
                let max = entry.get_i32("max-amount", min);
                AmountSpec::Range { min, max }
            }
        }
    }
}

impl RewardDefinition {
    /// Item definition with a fixed amount, always granted
    pub fn item(material: &str, amount: i32) -> Self {
        Self {
            chance: DEFAULT_CHANCE,
            weight: DEFAULT_WEIGHT,
            kind: RewardKind::Item {
                material: Some(material.to_string()),
                amount: AmountSpec::Fixed(amount),
            },
        }
    }

    /// Item definition with a ranged amount, always granted
    pub fn item_range(material: &str, min: i32, max: i32) -> Self {
        Self {
            chance: DEFAULT_CHANCE,
            weight: DEFAULT_WEIGHT,
            kind: RewardKind::Item {
                material: Some(material.to_string()),
                amount: AmountSpec::Range { min, max },
            },
        }
    }

    /// Command definition run as console, always granted
    pub fn command<S: Into<String>>(commands: impl IntoIterator<Item = S>) -> Self {
        Self {
            chance: DEFAULT_CHANCE,
            weight: DEFAULT_WEIGHT,
            kind: RewardKind::Command {
                commands: commands.into_iter().map(Into::into).collect(),
                as_console: true,
            },
        }
    }

    pub fn with_chance(mut self, chance: f64) -> Self {
        self.chance = chance;
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn as_player(mut self) -> Self {
        if let RewardKind::Command { as_console, .. } = &mut self.kind {
            *as_console = false;
        }
        self
    }

    pub fn is_command(&self) -> bool {
        matches!(self.kind, RewardKind::Command { .. })
    }

    /// Parse one definition. Anything that is not a mapping is not a definition.
    pub fn from_value(entry: &ConfigValue) -> Option<Self> {
        entry.as_map()?;

        let chance = entry.get_f64("chance", DEFAULT_CHANCE);
        let weight = entry.get_f64("weight", DEFAULT_WEIGHT);

        let looks_command = entry
            .get_text("type")
            .is_some_and(|t| t.eq_ignore_ascii_case("COMMAND"))
            || entry.contains_key("command")
            || entry.contains_key("commands");

        let kind = if looks_command {
            let mut commands = Vec::new();
            if let Some(ConfigValue::String(single)) = entry.get("command") {
                commands.push(single.clone());
            }
            if let Some(multi) = entry.get_list("commands") {
                for command in multi {
                    match command.to_text() {
                        Some(text) => commands.push(text),
                        None if command.is_null() => {}
                        None => log::debug!("Skipping non-scalar entry in commands: {:?}", command),
                    }
                }
            }

            // Support both "as-console" and "asConsole" field names
            let flag = entry.get("as-console").or_else(|| entry.get("asConsole"));
            let as_console = !matches!(flag, Some(ConfigValue::Bool(false)));

            RewardKind::Command { commands, as_console }
        } else {
            RewardKind::Item {
                material: entry.get_text("material"),
                amount: AmountSpec::from_entry(entry),
            }
        };

        Some(Self { chance, weight, kind })
    }
}

/// Parse a list of definitions, skipping entries that are not mappings
pub fn parse_definitions(list: &[ConfigValue]) -> Vec<RewardDefinition> {
    list.iter().filter_map(RewardDefinition::from_value).collect()
}
