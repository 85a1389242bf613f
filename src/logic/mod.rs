// src/logic/mod.rs
//! ゲームの純粋なロジック (テーマ選び、デッキ作成、ルール判定) をまとめるよ。

pub mod deck;
pub mod rules;
pub mod themes;

pub use deck::{build_deck, shuffle_deck, BuiltDeck};
pub use themes::select_themes;
