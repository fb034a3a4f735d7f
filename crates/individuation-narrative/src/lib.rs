//! Individuation — Narrative Progression bounded context.
//!
//! Owns the phase catalog, the session state, the chapter unlock and
//! completion predicates, and the single-writer store that applies every
//! transition.

pub mod application;
pub mod domain;

#[cfg(any(test, feature = "dev-tools"))]
pub mod dev;
