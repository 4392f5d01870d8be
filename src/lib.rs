//! Dominion Forge - compound action engine for tree search
//!
//! A card-game simulation fragment built around extended action sequences:
//! a single chosen action can unfold into a variable number of follow-on
//! decisions, possibly by different players, before it resolves. Actions are
//! plain values (clone, compare, hash) so game states and their pending
//! sequences can be forked and deduplicated by search.

pub mod core;
pub mod error;
pub mod game;
pub mod scenario;
pub mod zones;

pub use error::{DominionError, Result};
