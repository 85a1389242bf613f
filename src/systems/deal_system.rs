// src/systems/deal_system.rs

// === 使うものを宣言するよ！ ===
// ThemeCatalog: テーマの一覧 (外から渡される静的データ)
// logic: テーマ選び、デッキ作成、シャッフル
// rand: 乱数。テストでは種を固定した StdRng を渡すよ！🎲
use log::info;
use rand::Rng;

use crate::components::card::Card;
use crate::components::game_state::{GameState, GameStatus};
use crate::components::theme::ThemeCatalog;
use crate::config::layout::TABLEAU_COUNT;
use crate::config::GameConfig;
use crate::error::GameResult;
use crate::logic::deck::{build_deck, shuffle_deck};
use crate::logic::themes::select_themes;

/// 配り終わった直後の場札と山札。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DealtLayout {
    pub tableau: [Vec<Card>; TABLEAU_COUNT],
    pub stock: Vec<Card>,
}

/// シャッフル済みのデッキを場札と山札に配る関数だよ！
///
/// 列 `c` には `c + 1` 枚、デッキの先頭から順番に配る (全部で最大 28 枚)。
/// デッキが途中で尽きたらそこで終わり。後ろの列は短いか空になる。
/// 各列で最後に置いたカードだけ表向き、それ以外は裏向き。
/// 残りは順番そのままで山札になって、全部裏向きにするよ。
pub fn deal_cards(deck: Vec<Card>) -> DealtLayout {
    let mut tableau: [Vec<Card>; TABLEAU_COUNT] = Default::default();
    let mut cards = deck.into_iter();

    'deal: for (column_index, column) in tableau.iter_mut().enumerate() {
        for _ in 0..=column_index {
            let Some(mut card) = cards.next() else {
                break 'deal;
            };
            card.face_up = false;
            column.push(card);
        }
    }
    // 各列の一番上だけ表にする
    for column in tableau.iter_mut() {
        if let Some(top) = column.last_mut() {
            top.face_up = true;
        }
    }

    let stock: Vec<Card> = cards
        .map(|mut card| {
            card.face_up = false;
            card
        })
        .collect();

    DealtLayout { tableau, stock }
}

// === ゲーム開始システム！ ===
// テーマ選び → デッキ作成 → シャッフル → 配る、までを一気にやって、
// まっさらな GameState を作る役割だよ。
#[derive(Debug, Default, Clone, Copy)]
pub struct DealSystem;

impl DealSystem {
    /// 新しいゲームの状態を作る。失敗したら (カタログ不足とか) エラーを返すよ。
    pub fn start_game<R: Rng + ?Sized>(
        &self,
        catalog: &ThemeCatalog,
        config: &GameConfig,
        generation: u32,
        rng: &mut R,
    ) -> GameResult<GameState> {
        let themes = select_themes(&catalog.themes, config.themes_per_game, rng)?;
        let built = build_deck(&themes, config.target_range(), rng)?;
        let deck_size = built.deck.len();

        let mut deck = built.deck;
        shuffle_deck(&mut deck, rng);
        let layout = deal_cards(deck);

        info!(
            "DealSystem: generation {} dealt {} cards ({} in stock) over {} themes",
            generation,
            deck_size,
            layout.stock.len(),
            themes.len()
        );

        Ok(GameState {
            stock: layout.stock,
            waste: Vec::new(),
            foundations: Default::default(),
            tableau: layout.tableau,
            moves: config.move_budget,
            status: GameStatus::Playing,
            active_themes: built.targets,
            completed_themes: Vec::new(),
            completing_theme_index: None,
            generation,
            current_themes: themes,
            retired: Vec::new(),
            deck_size,
        })
    }
}
