//! Applying resolved outputs: capped item drops, uncapped commands

use crate::context::Killer;
use crate::material::ItemStack;
use crate::resolver::RewardOutput;

/// Identity a command runs as
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandSender {
    Console,
    Player(Killer),
}

/// Executes commands on the host. Success or failure is not observed.
pub trait CommandSink {
    fn dispatch(&mut self, sender: &CommandSender, command: &str);
}

/// A command as it was handed to a recording sink
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchedCommand {
    pub sender: CommandSender,
    pub command: String,
}

impl CommandSink for Vec<DispatchedCommand> {
    fn dispatch(&mut self, sender: &CommandSender, command: &str) {
        self.push(DispatchedCommand {
            sender: sender.clone(),
            command: command.to_string(),
        });
    }
}

/// What an apply pass did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub stacks_added: usize,
    pub units_added: u32,
    pub commands_dispatched: usize,
}

/// Apply outputs in order: items first against `cap` (non-positive means
/// uncapped), then every command batch.
pub fn apply_outputs<S: CommandSink + ?Sized>(
    outputs: &[RewardOutput],
    cap: i32,
    killer: Option<&Killer>,
    drops: &mut Vec<ItemStack>,
    sink: &mut S,
) -> ApplyReport {
    let mut report = ApplyReport::default();
    let cap = u32::try_from(cap).ok().filter(|&c| c > 0);

    for stack in outputs.iter().filter_map(RewardOutput::as_item) {
        let mut to_add = stack.clone();
        if let Some(cap) = cap {
            if report.units_added >= cap {
                break;
            }
            to_add.amount = to_add.amount.min(cap - report.units_added);
        }

        if to_add.amount > 0 {
            report.units_added = report.units_added.saturating_add(to_add.amount);
            report.stacks_added += 1;
            drops.push(to_add);
        }
    }

    for output in outputs {
        let RewardOutput::Command {
            commands,
            as_console,
        } = output
        else {
            continue;
        };

        let sender = match killer {
            Some(killer) if !*as_console => CommandSender::Player(killer.clone()),
            _ => CommandSender::Console,
        };

        for command in commands {
            let command = command.trim();
            if command.is_empty() {
                continue;
            }
            sink.dispatch(&sender, command);
            report.commands_dispatched += 1;
        }
    }

    report
}
