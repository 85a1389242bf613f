// src/app/mod.rs
//! JS から使う GameApp と、そのまわりの WASM 専用の部品を置くモジュールだよ！

pub mod completion_timer;
pub mod console_logger;
pub mod game_app;
pub mod state_getter;
