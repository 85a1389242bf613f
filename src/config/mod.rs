// src/config/mod.rs
//! ゲームの設定値と盤面定数。

pub mod game_config;
pub mod layout;

pub use game_config::GameConfig;
pub use layout::*;
