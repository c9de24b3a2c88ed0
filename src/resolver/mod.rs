//! Reward resolution module
//!
//! Turns a [`RewardsConfig`](crate::config::RewardsConfig) plus a random
//! source into the ordered list of outputs for one kill.

mod builder;
mod gather;
mod list;
mod pool;


pub use builder::*;
pub use gather::*;
pub use list::*;
pub use pool::*;
