//! CLI domain: parse, route, and presentation only.
//! No domain orchestration; single route table dispatches to domain services.

mod parse;
mod presentation;
mod route;

pub use parse::{Cli, Commands};
pub use presentation::{format_catalog_json, format_catalog_text, ConsoleObserver};
pub use route::{CommandOutput, RunContext};
