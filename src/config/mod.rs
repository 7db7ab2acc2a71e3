//! Configuration for the attendance engine.
//!
//! The global work schedule and the public-holiday calendar are loaded
//! once per run from a YAML file and passed into every computation as an
//! explicit value; nothing in the engine reads configuration through a
//! hidden global.

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::ScheduleConfig;
