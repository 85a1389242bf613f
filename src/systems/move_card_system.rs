// src/systems/move_card_system.rs

use log::{debug, info};

use crate::components::card::Card;
use crate::components::game_state::{GameState, GameStatus};
use crate::components::stack::{SourceArea, StackType, TargetArea};
use crate::logic::rules::{can_move_to_foundation, can_move_to_tableau, is_run_movable};
use crate::protocol::{MoveRequest, OperationOutcome, RejectReason};

/// カード移動のロジックを実行するシステムだよ！🖱️💨
///
/// 呼び出し側からのリクエスト（「どの束をどこに動かすか」）を受け取って、
/// それがルール上可能かチェックし、可能なら GameState を更新するよ。
/// ダメなときは状態を一切変えない (手数も減らない)。
#[derive(Debug, Default, Clone, Copy)]
pub struct MoveCardSystem;

impl MoveCardSystem {
    pub fn new() -> Self {
        Self
    }

    /// カード移動リクエストを処理する本体
    pub fn run(&self, state: &mut GameState, request: &MoveRequest) -> OperationOutcome {
        debug!(
            "MoveCardSystem: {} card(s) {:?} -> {:?}",
            request.cards.len(),
            request.source,
            request.target
        );

        if state.status != GameStatus::Playing {
            return OperationOutcome::rejected(RejectReason::NotPlaying);
        }
        if state.is_completion_pending() {
            return OperationOutcome::rejected(RejectReason::CompletionPending);
        }
        if state.moves <= 0 {
            info!("MoveCardSystem: no moves left, game lost.");
            state.status = GameStatus::Lost;
            return OperationOutcome::rejected(RejectReason::OutOfMoves);
        }
        if request.source.stack_type() == request.target.stack_type() {
            return OperationOutcome::rejected(RejectReason::SamePile);
        }

        if let Err(reason) = self.check_move_validity(state, request) {
            debug!("  ルール違反！移動できませんでした。🙅‍♀️ ({:?})", reason);
            return OperationOutcome::rejected(reason);
        }

        let completing = self.apply_move(state, request);
        state.moves -= 1;
        state.status = if state.moves <= 0 && completing.is_none() {
            info!("MoveCardSystem: last move spent, game lost.");
            GameStatus::Lost
        } else {
            GameStatus::Playing
        };

        match completing {
            Some(pile_index) => {
                info!("MoveCardSystem: foundation {} is complete, waiting for finish.", pile_index);
                state.completing_theme_index = Some(pile_index);
                OperationOutcome::CompletionTriggered { pile_index }
            }
            None => OperationOutcome::Applied,
        }
    }

    /// 移動がルール上可能かチェックする関数。今の状態だけを見るよ。
    fn check_move_validity(&self, state: &GameState, request: &MoveRequest) -> Result<(), RejectReason> {
        let run_len = request.cards.len();
        if run_len == 0 {
            return Err(RejectReason::RunMismatch);
        }
        // 捨て札と組札からは 1 枚ずつしか動かせない
        if request.source.area != SourceArea::Tableau && run_len != 1 {
            return Err(RejectReason::RunMismatch);
        }

        let source_pile = state
            .pile(request.source.stack_type())
            .ok_or(RejectReason::NoSuchPile)?;
        let target_pile = state
            .pile(request.target.stack_type())
            .ok_or(RejectReason::NoSuchPile)?;

        // 渡された束が、本当に移動元の一番上の束かどうか
        let run = source_pile
            .len()
            .checked_sub(run_len)
            .map(|start| &source_pile[start..])
            .ok_or(RejectReason::RunMismatch)?;
        if !run.iter().map(|c| &c.id).eq(request.cards.iter().map(|c| &c.id)) {
            return Err(RejectReason::RunMismatch);
        }

        let primary = &run[0];
        if !primary.face_up {
            return Err(RejectReason::FaceDown);
        }
        if !is_run_movable(run) {
            return Err(RejectReason::RunNotMovable);
        }

        let legal = match request.target.area {
            TargetArea::Tableau => can_move_to_tableau(primary, target_pile.last()),
            // 組札には 1 枚ずつ
            TargetArea::Foundation => run_len == 1 && can_move_to_foundation(primary, target_pile),
        };
        if legal {
            Ok(())
        } else {
            Err(RejectReason::IllegalMove)
        }
    }

    /// 検証済みの移動を実行する。組札が揃ったらその番号を返すよ。
    fn apply_move(&self, state: &mut GameState, request: &MoveRequest) -> Option<usize> {
        let run = self.take_run(state, request.source.stack_type(), request.cards.len());

        match request.target.stack_type() {
            StackType::Foundation(index) => {
                let pile = state.foundations.get_mut(index)?;
                pile.extend(run);
                let target = pile.first().and_then(|bottom| state.active_themes.get(&bottom.theme))?;
                (pile.len() == target + 1).then_some(index)
            }
            stack => {
                if let Some(pile) = state.pile_mut(stack) {
                    pile.extend(run);
                }
                None
            }
        }
    }

    /// 移動元から束を取り外す。場札なら、新しく一番上になった裏向きカードを表にする (手数は使わない)。
    fn take_run(&self, state: &mut GameState, source: StackType, run_len: usize) -> Vec<Card> {
        let Some(pile) = state.pile_mut(source) else {
            return Vec::new();
        };
        let start = pile.len().saturating_sub(run_len);
        let run = pile.split_off(start);

        if let StackType::Tableau(_) = source {
            if let Some(new_top) = pile.last_mut() {
                if !new_top.face_up {
                    debug!("  Flipping exposed card {}", new_top.id);
                    new_top.face_up = true;
                }
            }
        }
        run
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::stack::{MoveSource, MoveTarget};
    use std::collections::BTreeMap;

    fn up(mut card: Card) -> Card {
        card.face_up = true;
        card
    }

    fn word(theme: &str, rank: u8, text: &str) -> Card {
        Card::word_card(theme, rank, text)
    }

    /// 「Sports」(目標3) の組札が [テーマ, Ball, Net] まで揃っていて、Goal が場札0の上にある状態。
    fn sports_scenario() -> GameState {
        let mut active = BTreeMap::new();
        active.insert("Sports".to_string(), 3);
        active.insert("Ocean".to_string(), 3);
        let mut state = GameState {
            status: GameStatus::Playing,
            moves: 10,
            active_themes: active,
            ..GameState::default()
        };
        state.foundations[0] = vec![
            up(Card::theme_card("Sports")),
            up(word("Sports", 2, "Ball")),
            up(word("Sports", 3, "Net")),
        ];
        state.tableau[0] = vec![word("Ocean", 2, "Wave"), up(word("Sports", 4, "Goal"))];
        state.tableau[1] = vec![up(word("Ocean", 3, "Coral"))];
        state.waste = vec![up(Card::theme_card("Ocean"))];
        state.deck_size = 7;
        state
    }

    fn request(state: &GameState, source: MoveSource, count: usize, target: MoveTarget) -> MoveRequest {
        let pile = state.pile(source.stack_type()).unwrap();
        let cards = pile[pile.len() - count..].to_vec();
        MoveRequest::new(source, cards, target)
    }

    #[test]
    fn completing_a_foundation_triggers_completion() {
        let mut state = sports_scenario();
        let req = request(&state, MoveSource::tableau(0), 1, MoveTarget::foundation(0));
        let outcome = MoveCardSystem::new().run(&mut state, &req);

        assert_eq!(outcome, OperationOutcome::CompletionTriggered { pile_index: 0 });
        assert_eq!(state.completing_theme_index, Some(0));
        assert_eq!(state.foundations[0].len(), 4);
        assert_eq!(state.moves, 9);
        // 新しく一番上になったカードは表になる
        assert!(state.tableau[0][0].face_up);
        assert!(state.check_invariants().is_ok());
        println!("テーマ完成トリガーテスト、成功！🏆");
    }

    #[test]
    fn last_move_without_completion_loses() {
        let mut state = sports_scenario();
        state.moves = 1;
        let req = request(&state, MoveSource::tableau(1), 1, MoveTarget::tableau(2));
        assert_eq!(MoveCardSystem::new().run(&mut state, &req), OperationOutcome::Applied);
        assert_eq!(state.moves, 0);
        assert_eq!(state.status, GameStatus::Lost);
    }

    #[test]
    fn last_move_with_completion_keeps_playing() {
        let mut state = sports_scenario();
        state.moves = 1;
        let req = request(&state, MoveSource::tableau(0), 1, MoveTarget::foundation(0));
        assert_eq!(
            MoveCardSystem::new().run(&mut state, &req),
            OperationOutcome::CompletionTriggered { pile_index: 0 }
        );
        assert_eq!(state.moves, 0);
        assert_eq!(state.status, GameStatus::Playing);
    }

    #[test]
    fn illegal_moves_leave_state_untouched() {
        let system = MoveCardSystem::new();
        let cases = vec![
            // テーマ違いの場札へ
            (MoveSource::tableau(1), 1, MoveTarget::tableau(0), RejectReason::IllegalMove),
            // ワードカードで空の組札を始めようとする
            (MoveSource::tableau(1), 1, MoveTarget::foundation(1), RejectReason::IllegalMove),
            // テーマ違いの組札へ
            (MoveSource::tableau(1), 1, MoveTarget::foundation(0), RejectReason::IllegalMove),
            // 同じパイル
            (MoveSource::tableau(0), 1, MoveTarget::tableau(0), RejectReason::SamePile),
            // 裏向きのカードを含む束
            (MoveSource::tableau(0), 2, MoveTarget::tableau(3), RejectReason::FaceDown),
        ];
        for (source, count, target, reason) in cases {
            let mut state = sports_scenario();
            let before = state.clone();
            let req = request(&state, source, count, target);
            assert_eq!(system.run(&mut state, &req), OperationOutcome::rejected(reason));
            assert_eq!(state, before, "{:?} -> {:?} で状態が変わった！", source, target);
        }
    }

    #[test]
    fn mismatched_or_out_of_range_requests_are_rejected() {
        let system = MoveCardSystem::new();
        let mut state = sports_scenario();
        let before = state.clone();

        // 一番上じゃないカードを名乗る
        let bogus = MoveRequest::new(
            MoveSource::tableau(0),
            vec![up(word("Ocean", 2, "Wave"))],
            MoveTarget::tableau(3),
        );
        assert_eq!(system.run(&mut state, &bogus), OperationOutcome::rejected(RejectReason::RunMismatch));

        // 範囲外の列
        let req = request(&state, MoveSource::tableau(1), 1, MoveTarget::tableau(9));
        assert_eq!(system.run(&mut state, &req), OperationOutcome::rejected(RejectReason::NoSuchPile));

        // 空の束
        let empty = MoveRequest::new(MoveSource::tableau(1), Vec::new(), MoveTarget::tableau(3));
        assert_eq!(system.run(&mut state, &empty), OperationOutcome::rejected(RejectReason::RunMismatch));

        assert_eq!(state, before);
    }

    #[test]
    fn multi_card_runs_go_to_tableau_only() {
        let system = MoveCardSystem::new();
        let mut state = sports_scenario();
        state.tableau[2] = vec![up(word("Ocean", 4, "Tide")), up(word("Ocean", 5, "Shark"))];
        state.deck_size = 9;

        let to_foundation = request(&state, MoveSource::tableau(2), 2, MoveTarget::foundation(1));
        let before = state.clone();
        assert_eq!(system.run(&mut state, &to_foundation), OperationOutcome::rejected(RejectReason::IllegalMove));
        assert_eq!(state, before);

        let to_tableau = request(&state, MoveSource::tableau(2), 2, MoveTarget::tableau(1));
        assert_eq!(system.run(&mut state, &to_tableau), OperationOutcome::Applied);
        let ids: Vec<_> = state.tableau[1].iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["Ocean-3", "Ocean-4", "Ocean-5"]);
        assert!(state.tableau[2].is_empty());
        assert!(state.check_invariants().is_ok());
    }

    #[test]
    fn mixed_theme_run_is_rejected() {
        let system = MoveCardSystem::new();
        let mut state = sports_scenario();
        state.tableau[2] = vec![up(word("Ocean", 4, "Tide")), up(word("Sports", 5, "Trophy"))];
        state.deck_size = 9;
        let before = state.clone();
        let req = request(&state, MoveSource::tableau(2), 2, MoveTarget::tableau(3));
        assert_eq!(system.run(&mut state, &req), OperationOutcome::rejected(RejectReason::RunNotMovable));
        assert_eq!(state, before);
    }

    #[test]
    fn waste_and_foundation_sources_move_one_card() {
        let system = MoveCardSystem::new();
        let mut state = sports_scenario();

        // 捨て札のテーマカードで空の組札を始める
        let req = request(&state, MoveSource::waste(), 1, MoveTarget::foundation(1));
        assert_eq!(system.run(&mut state, &req), OperationOutcome::Applied);
        assert!(state.waste.is_empty());
        assert_eq!(state.foundations[1][0].id, "Ocean-1");

        // 組札から場札に戻す
        let req = request(&state, MoveSource::foundation(0), 1, MoveTarget::tableau(3));
        assert_eq!(system.run(&mut state, &req), OperationOutcome::Applied);
        assert_eq!(state.foundations[0].len(), 2);
        assert_eq!(state.tableau[3][0].id, "Sports-3");
        assert_eq!(state.moves, 8);
        assert!(state.check_invariants().is_ok());

        // 組札から 2 枚はダメ
        let req = request(&state, MoveSource::foundation(0), 2, MoveTarget::tableau(4));
        assert_eq!(system.run(&mut state, &req), OperationOutcome::rejected(RejectReason::RunMismatch));
    }

    #[test]
    fn gated_by_status_pending_completion_and_moves() {
        let system = MoveCardSystem::new();

        let mut state = sports_scenario();
        state.completing_theme_index = Some(0);
        let req = request(&state, MoveSource::tableau(1), 1, MoveTarget::tableau(3));
        let before = state.clone();
        assert_eq!(system.run(&mut state, &req), OperationOutcome::rejected(RejectReason::CompletionPending));
        assert_eq!(state, before);

        let mut state = sports_scenario();
        state.status = GameStatus::Lost;
        let before = state.clone();
        assert_eq!(system.run(&mut state, &req), OperationOutcome::rejected(RejectReason::NotPlaying));
        assert_eq!(state, before);

        let mut state = sports_scenario();
        state.moves = 0;
        assert_eq!(system.run(&mut state, &req), OperationOutcome::rejected(RejectReason::OutOfMoves));
        assert_eq!(state.status, GameStatus::Lost);
        assert_eq!(state.tableau[1].len(), 1);
    }
}
