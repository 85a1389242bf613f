// src/systems/draw_system.rs
//! Handles clicking the Stock pile (dealing to Waste, recycling Waste back into Stock).

use log::{debug, info};

use crate::components::game_state::{GameState, GameStatus};
use crate::logic::rules::stock_waste;
use crate::protocol::{OperationOutcome, RejectReason};

/// 山札をクリックしたときの処理。1 枚めくるか、捨て札を山札に戻す。どっちも 1 手使う。
pub fn draw_card(state: &mut GameState) -> OperationOutcome {
    if state.status != GameStatus::Playing {
        return OperationOutcome::rejected(RejectReason::NotPlaying);
    }
    if state.is_completion_pending() {
        debug!("draw_card: completion pending, ignoring.");
        return OperationOutcome::rejected(RejectReason::CompletionPending);
    }
    if state.moves <= 0 {
        info!("draw_card: no moves left, game lost.");
        state.status = GameStatus::Lost;
        return OperationOutcome::rejected(RejectReason::OutOfMoves);
    }

    if stock_waste::can_deal_from_stock(state.stock.is_empty()) {
        deal_one_card_from_stock(state);
    } else if stock_waste::can_recycle_waste(state.stock.is_empty(), state.waste.is_empty()) {
        recycle_waste_to_stock(state);
    } else {
        debug!("draw_card: stock and waste are both empty.");
        return OperationOutcome::rejected(RejectReason::NothingToDraw);
    }

    state.moves -= 1;
    OperationOutcome::Applied
}

/// 山札の先頭 (index 0) のカードを表にして捨て札の上に置く。
fn deal_one_card_from_stock(state: &mut GameState) {
    let mut card = state.stock.remove(0);
    card.face_up = true;
    info!("  Dealing card {} to Waste.", card.id);
    state.waste.push(card);
}

/// 捨て札を逆順にして裏向きで山札に戻す。
fn recycle_waste_to_stock(state: &mut GameState) {
    info!("  Recycling {} cards from Waste to Stock.", state.waste.len());
    state.stock = state
        .waste
        .drain(..)
        .rev()
        .map(|mut card| {
            card.face_up = false;
            card
        })
        .collect();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::card::Card;

    fn playing_state() -> GameState {
        GameState {
            status: GameStatus::Playing,
            moves: 10,
            ..GameState::default()
        }
    }

    fn card(rank: u8) -> Card {
        Card::word_card("Sports", rank, "w")
    }

    #[test]
    fn draws_front_of_stock_face_up() {
        let mut state = playing_state();
        state.stock = vec![card(2), card(3)];
        state.deck_size = 2;

        assert_eq!(draw_card(&mut state), OperationOutcome::Applied);
        assert_eq!(state.waste.len(), 1);
        assert_eq!(state.waste[0].id, "Sports-2");
        assert!(state.waste[0].face_up);
        assert_eq!(state.stock.len(), 1);
        assert_eq!(state.moves, 9);
        assert!(state.check_invariants().is_ok());
    }

    #[test]
    fn recycles_waste_in_reverse_face_down() {
        let mut state = playing_state();
        let (mut a, mut b, mut c) = (card(2), card(3), card(4));
        a.face_up = true;
        b.face_up = true;
        c.face_up = true;
        state.waste = vec![a, b, c];

        assert_eq!(draw_card(&mut state), OperationOutcome::Applied);
        let ids: Vec<_> = state.stock.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["Sports-4", "Sports-3", "Sports-2"]);
        assert!(state.stock.iter().all(|c| !c.face_up));
        assert!(state.waste.is_empty());
        assert_eq!(state.moves, 9);
        println!("Waste リサイクルテスト、成功！🎉");
    }

    #[test]
    fn nothing_to_draw_costs_nothing() {
        let mut state = playing_state();
        let before = state.clone();
        assert_eq!(draw_card(&mut state), OperationOutcome::rejected(RejectReason::NothingToDraw));
        assert_eq!(state, before);
    }

    #[test]
    fn out_of_moves_loses_the_game() {
        let mut state = playing_state();
        state.moves = 0;
        state.stock = vec![card(2)];
        assert_eq!(draw_card(&mut state), OperationOutcome::rejected(RejectReason::OutOfMoves));
        assert_eq!(state.status, GameStatus::Lost);
        assert_eq!(state.stock.len(), 1);
    }

    #[test]
    fn blocked_while_completion_pending_or_not_playing() {
        let mut state = playing_state();
        state.stock = vec![card(2)];
        state.completing_theme_index = Some(0);
        let before = state.clone();
        assert_eq!(draw_card(&mut state), OperationOutcome::rejected(RejectReason::CompletionPending));
        assert_eq!(state, before);

        let mut state = playing_state();
        state.status = GameStatus::Won;
        state.stock = vec![card(2)];
        let before = state.clone();
        assert_eq!(draw_card(&mut state), OperationOutcome::rejected(RejectReason::NotPlaying));
        assert_eq!(state, before);
    }
}
