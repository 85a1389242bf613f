// src/systems/completion_system.rs

use log::{info, warn};

use crate::components::game_state::{GameState, GameStatus};
use crate::logic::rules::all_themes_completed;
use crate::protocol::{OperationOutcome, RejectReason};

/// テーマ完成の後片付けをするシステムだよ！🏆🎉
///
/// 組札が目標枚数に達すると `completing_theme_index` が立つ。
/// 演出が終わったころに外のタイマーがこれを呼んで、組札を片付けてテーマを完成扱いにする。
/// 全テーマが完成したら勝ち！ 勝ちになるのはここだけ。
#[derive(Debug, Default, Clone, Copy)]
pub struct ThemeCompletionSystem;

impl ThemeCompletionSystem {
    pub fn new() -> Self {
        Self
    }

    /// 完成待ちの組札 `pile_index` を片付ける。
    ///
    /// 完成待ちになっているのがちょうどその組札のときだけ動く。
    /// その組札が空なら完成待ちの印を外すだけ。
    /// 別の組札を指したときは、空でも何もしない (完成待ちの印もそのまま)。
    pub fn run(&self, state: &mut GameState, pile_index: usize) -> OperationOutcome {
        if state.status != GameStatus::Playing {
            return OperationOutcome::rejected(RejectReason::NotPlaying);
        }
        if state.completing_theme_index != Some(pile_index) {
            warn!(
                "ThemeCompletionSystem: foundation {} is not completing (pending: {:?}), ignoring.",
                pile_index, state.completing_theme_index
            );
            return OperationOutcome::rejected(RejectReason::NoPendingCompletion);
        }

        let Some(pile) = state.foundations.get_mut(pile_index) else {
            return OperationOutcome::rejected(RejectReason::NoSuchPile);
        };
        let Some(theme) = pile.first().map(|bottom| bottom.theme.clone()) else {
            state.completing_theme_index = None;
            return OperationOutcome::Applied;
        };

        state.retired.extend(pile.drain(..));
        if !state.completed_themes.contains(&theme) {
            state.completed_themes.push(theme.clone());
        }
        state.completing_theme_index = None;

        let won = all_themes_completed(&state.active_themes, &state.completed_themes);
        if won {
            info!("ThemeCompletionSystem: 全テーマ完成！🏆 ゲームクリア。");
            state.status = GameStatus::Won;
        } else {
            info!(
                "ThemeCompletionSystem: theme '{}' completed ({}/{}).",
                theme,
                state.completed_themes.len(),
                state.active_themes.len()
            );
        }
        OperationOutcome::ThemeCompleted { theme, won }
    }
}
