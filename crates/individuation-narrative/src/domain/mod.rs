pub mod aggregates;
pub mod chapter;
pub mod commands;
pub mod errors;
pub mod events;
pub mod phase;
pub mod predicates;
pub mod script;
pub mod session;
