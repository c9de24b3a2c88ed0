//! Configuration module for reward data structures
//!
//! The host supplies a generic [`ConfigValue`] tree; this module turns it into
//! immutable typed definitions once, so resolution never inspects raw values.

mod pool;
mod reward;
mod source;
mod value;

pub use pool::*;
pub use reward::*;
pub use source::*;
pub use value::*;
