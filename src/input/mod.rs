pub mod handler;

pub use handler::{Command, CommandParser};
