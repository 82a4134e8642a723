//! Schema module - Configuration, alphabet and record types for mutant walks.

mod alphabet;
mod config;
mod record;

pub use alphabet::*;
pub use config::*;
pub use record::*;
