//! JSON-lines tool host for the poker copilot core.
//!
//! The host owns one [`PokerSession`](poker_copilot::session::PokerSession)
//! and serves tool calls read from stdin, one per line.

pub mod config;
pub mod tools;

pub use config::{ConfigError, HostConfig, Overrides};
pub use tools::{TOOLS, ToolError, ToolHost};
