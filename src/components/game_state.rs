// src/components/game_state.rs

// serde を使う宣言！状態をまるごと JSON にして描画側に渡すよ。
use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::components::card::Card;
use crate::components::stack::StackType;
use crate::components::theme::ThemeDef;
use crate::config::layout::{FOUNDATION_COUNT, TABLEAU_COUNT};
use crate::error::InvariantViolation;
use crate::logic::rules::is_run_movable;

/// ゲーム全体の進行状態だよ！🏆🏁
///
/// `Menu` → `Playing` → `Won` / `Lost` の順にしか進まない。
/// `Won` / `Lost` になったら、あとはリスタートかメニューに戻るだけ。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    /// ゲーム開始前
    #[default]
    Menu,
    /// ゲームが進行中の状態
    Playing,
    /// 全テーマ完成！🏆
    Won,
    /// 手数切れ
    Lost,
}

/// 1 ゲーム分の状態をまるごと持つ構造体。
///
/// 描画側はこれのスナップショット (JSON) を見て画面を作るよ。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub stock: Vec<Card>,
    pub waste: Vec<Card>,
    pub foundations: [Vec<Card>; FOUNDATION_COUNT],
    pub tableau: [Vec<Card>; TABLEAU_COUNT],
    /// 残り手数。0 以下になったらもう動かせない。
    pub moves: i32,
    pub status: GameStatus,
    /// テーマ名 → そのテーマを完成させるのに必要なワード数
    pub active_themes: BTreeMap<String, usize>,
    /// 完成したテーマ (完成した順)
    pub completed_themes: Vec<String>,
    /// 完成演出中の組札の番号。Some の間は移動もドローもできない。
    pub completing_theme_index: Option<usize>,
    /// ゲームごとに増える番号。遅れて届いた完成タイマーを見分けるのに使う。
    pub generation: u32,
    pub current_themes: Vec<ThemeDef>,
    /// 完成して場から消えたカード
    pub retired: Vec<Card>,
    /// 配った時点のカード枚数
    pub deck_size: usize,
}

impl GameState {
    /// 指定した世代のメニュー状態を作る。
    pub fn menu(generation: u32) -> Self {
        Self {
            generation,
            ..Self::default()
        }
    }

    pub fn is_completion_pending(&self) -> bool {
        self.completing_theme_index.is_some()
    }

    /// パイルへの参照。範囲外の番号なら None。
    pub fn pile(&self, stack: StackType) -> Option<&Vec<Card>> {
        match stack {
            StackType::Tableau(i) => self.tableau.get(i),
            StackType::Foundation(i) => self.foundations.get(i),
            StackType::Stock => Some(&self.stock),
            StackType::Waste => Some(&self.waste),
        }
    }

    pub fn pile_mut(&mut self, stack: StackType) -> Option<&mut Vec<Card>> {
        match stack {
            StackType::Tableau(i) => self.tableau.get_mut(i),
            StackType::Foundation(i) => self.foundations.get_mut(i),
            StackType::Stock => Some(&mut self.stock),
            StackType::Waste => Some(&mut self.waste),
        }
    }

    pub fn top_card(&self, stack: StackType) -> Option<&Card> {
        self.pile(stack).and_then(|pile| pile.last())
    }

    /// 場に残っているカードと、完成して消えたカードを全部たどる。
    pub fn all_cards(&self) -> impl Iterator<Item = &Card> {
        self.stock
            .iter()
            .chain(self.waste.iter())
            .chain(self.foundations.iter().flatten())
            .chain(self.tableau.iter().flatten())
            .chain(self.retired.iter())
    }

    /// 場札の `column` 列目の `from_index` 枚目から上をまとめて掴めるか調べて、掴めるならその束を返す。
    /// 全部表向きで、全部同じテーマじゃないとダメ。
    pub fn movable_run(&self, column: usize, from_index: usize) -> Option<Vec<Card>> {
        let pile = self.tableau.get(column)?;
        let run = pile.get(from_index..)?;
        if run.is_empty() || !run.iter().all(|card| card.face_up) || !is_run_movable(run) {
            return None;
        }
        Some(run.to_vec())
    }

    /// 不変条件をチェックするよ。壊れていたらバグ！
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let mut seen = HashSet::with_capacity(self.deck_size);
        for card in self.all_cards() {
            if !seen.insert(card.id.as_str()) {
                return Err(InvariantViolation::DuplicateCard { id: card.id.clone() });
            }
        }
        if seen.len() != self.deck_size {
            return Err(InvariantViolation::CardCountMismatch {
                expected: self.deck_size,
                found: seen.len(),
            });
        }

        for (index, pile) in self.foundations.iter().enumerate() {
            if let Some(bottom) = pile.first() {
                if !bottom.is_theme_card() {
                    return Err(InvariantViolation::FoundationWithoutThemeCard { index });
                }
                if pile.iter().any(|card| !card.same_theme(bottom)) {
                    return Err(InvariantViolation::MixedFoundation { index });
                }
            }
        }

        if let Some(index) = self.completing_theme_index {
            let pile = self.foundations.get(index).map(Vec::as_slice).unwrap_or(&[]);
            let expected = pile
                .first()
                .and_then(|bottom| self.active_themes.get(&bottom.theme))
                .map(|target| target + 1)
                .unwrap_or(0);
            if pile.len() != expected {
                return Err(InvariantViolation::CompletionLengthMismatch {
                    index,
                    expected,
                    found: pile.len(),
                });
            }
        }
        Ok(())
    }
}
