//! Core game types and entities

pub mod card;
pub mod entity;
pub mod player;
pub mod types;

pub use card::{CardCategory, CardSpec, CardType};
pub use entity::PlayerId;
pub use player::Player;
pub use types::PlayerName;
