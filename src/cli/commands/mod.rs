//! CLI command implementations.

mod config;
mod doctor;
mod personas;
mod run;
mod serve;

pub use config::run_config;
pub use doctor::run_doctor;
pub use personas::run_personas;
pub use run::run_team;
pub use serve::run_serve;
