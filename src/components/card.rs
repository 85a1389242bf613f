// src/components/card.rs

// serde を使う宣言！カード情報を JSON にして JS 側に渡すよ。
use serde::{Deserialize, Serialize};

use crate::config::layout::THEME_CARD_RANK;

/// カードのランク。1 がテーマカード、2〜13 がワードカードだよ。
/// 昔のソリティアと違って、ランクの順番は移動ルールに関係ない！
pub type Rank = u8;

/// カードそのものを表す構造体だよ！🃏
///
/// - `id`: `"{theme}-{rank}"` の形。ゲーム内で一意。
/// - `theme`: グループ分けのキー (昔でいうスート)
/// - `rank`: ランク
/// - `text`: 画面に出す文字。テーマカードならテーマ名、それ以外はワード。
/// - `face_up`: 表向きかどうか (JS 側では `faceUp`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub theme: String,
    pub rank: Rank,
    pub text: String,
    pub face_up: bool,
}

impl Card {
    /// テーマとランクからカード ID を作る。
    pub fn card_id(theme: &str, rank: Rank) -> String {
        format!("{}-{}", theme, rank)
    }

    /// ランク1のテーマカードを作るよ。最初は裏向き。
    pub fn theme_card(theme: &str) -> Self {
        Self {
            id: Self::card_id(theme, THEME_CARD_RANK),
            theme: theme.to_string(),
            rank: THEME_CARD_RANK,
            text: theme.to_string(),
            face_up: false,
        }
    }

    /// ワードカードを作るよ。これも最初は裏向き。
    pub fn word_card(theme: &str, rank: Rank, word: &str) -> Self {
        Self {
            id: Self::card_id(theme, rank),
            theme: theme.to_string(),
            rank,
            text: word.to_string(),
            face_up: false,
        }
    }

    pub fn is_theme_card(&self) -> bool {
        self.rank == THEME_CARD_RANK
    }

    pub fn same_theme(&self, other: &Card) -> bool {
        self.theme == other.theme
    }
}
