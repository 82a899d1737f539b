//! CLI command implementations.

mod ask;
mod config;
mod doctor;
mod fetch;
mod history;
mod serve;

pub use ask::run_ask;
pub use config::run_config;
pub use doctor::run_doctor;
pub use fetch::run_fetch;
pub use history::{run_history, run_show};
pub use serve::run_serve;
