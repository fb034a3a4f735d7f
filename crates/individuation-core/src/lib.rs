//! Individuation Core — shared domain abstractions.
//!
//! This crate defines the fundamental traits and types that the narrative
//! engine and its collaborators depend on. It contains no presentation code.

pub mod aggregate;
pub mod clock;
pub mod command;
pub mod error;
pub mod event;
pub mod observer;
pub mod sink;
