//! Game state serialization fidelity
//!
//! A serialized state must resume exactly where it left off: same pending
//! sequence, same menu, and the same shuffles from its RNG.

use dominion_forge_rs::core::{CardType, PlayerId};
use dominion_forge_rs::game::{compute_state_hash, Action, CompoundAction, GameState};
use dominion_forge_rs::zones::DeckType;
use similar_asserts::assert_eq;

fn pending_mine() -> GameState {
    let p0 = PlayerId::new(0);
    let mut game = GameState::new_two_player("Alice", "Bob");
    game.seed_rng(42);
    for card in [CardType::Mine, CardType::Copper, CardType::Silver] {
        game.add_card(DeckType::Hand, p0, card).unwrap();
    }
    for card in [CardType::Estate, CardType::Duchy, CardType::Province, CardType::Gold] {
        game.add_card(DeckType::Discard, p0, card).unwrap();
    }
    game.supply.add_pile(CardType::Silver, 10);
    game.supply.add_pile(CardType::Gold, 10);
    game.apply_action(&Action::PlayCard(
        CompoundAction::for_card(CardType::Mine, p0).unwrap(),
    ))
    .unwrap();
    game
}

#[test]
fn test_pending_sequence_survives_round_trip() {
    let original = pending_mine();
    let json = serde_json::to_string(&original).expect("Failed to serialize state");
    let restored: GameState = serde_json::from_str(&json).expect("Failed to deserialize state");

    assert_eq!(compute_state_hash(&original), compute_state_hash(&restored));
    assert_eq!(original.active_sequence(), restored.active_sequence());
    assert_eq!(original.follow_on_actions(), restored.follow_on_actions());
}

#[test]
fn test_rng_continues_identically_after_round_trip() {
    let p0 = PlayerId::new(0);
    let mut original = pending_mine();
    let json = serde_json::to_string(&original).expect("Failed to serialize state");
    let mut restored: GameState = serde_json::from_str(&json).expect("Failed to deserialize state");

    // Empty draw pile: drawing reshuffles the discard pile with the game RNG
    original.draw_cards(p0, 4).unwrap();
    restored.draw_cards(p0, 4).unwrap();

    assert_eq!(
        original.zone_contents(DeckType::Hand, p0),
        restored.zone_contents(DeckType::Hand, p0)
    );
}
