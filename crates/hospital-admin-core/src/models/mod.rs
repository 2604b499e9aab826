//! Domain models for the hospital admin system.

mod medication;
mod report;
mod roster;
mod schedule;

pub use medication::*;
pub use report::*;
pub use roster::*;
pub use schedule::*;
