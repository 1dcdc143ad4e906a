pub mod autoplay;
pub mod interactive;
pub mod policy;

pub use autoplay::{AutoplayConfig, AutoplayMode, PolicyKind};
pub use interactive::InteractiveMode;
pub use policy::{GreedyPolicy, Policy, RandomPolicy};
