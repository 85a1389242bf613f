// src/systems/mod.rs
//! GameState を書き換える処理 (システム) をまとめるよ。

pub mod completion_system;
pub mod deal_system;
pub mod draw_system;
pub mod move_card_system;

pub use completion_system::ThemeCompletionSystem;
pub use deal_system::{deal_cards, DealSystem, DealtLayout};
pub use draw_system::draw_card;
pub use move_card_system::MoveCardSystem;
