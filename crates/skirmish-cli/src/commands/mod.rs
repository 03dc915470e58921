//! CLI command implementations

pub mod inspect;
pub mod script;
pub mod simulate;
