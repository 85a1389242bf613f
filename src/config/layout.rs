// src/config/layout.rs
//! 盤面の形に関する定数を定義するよ！
//! 場札の列数、組札の数、ランクの上限など。

pub const TABLEAU_COUNT: usize = 7; // 場札 (Tableau) の列数
pub const FOUNDATION_COUNT: usize = 4; // 組札 (Foundation) の数

pub const THEME_CARD_RANK: u8 = 1; // テーマカードのランク (昔の Ace)
pub const MAX_RANK: u8 = 13; // ワードカードのランクはここまで

// 13 枚の組札が 4 つ揃うかどうか (古い勝利判定用)
pub const LEGACY_FULL_FOUNDATION: usize = MAX_RANK as usize;
