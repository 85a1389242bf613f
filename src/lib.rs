// src/lib.rs

// WASM と JavaScript を繋ぐための基本！
use wasm_bindgen::prelude::*;

// 自分で作ったモジュールたち！ これでコードを整理してるんだ。
pub mod app; // JS 向けの窓口 (GameApp) とロガー、タイマー
pub mod components; // カードや山、ゲーム状態のデータ
pub mod config;
pub mod engine;
pub mod error;
pub mod logic; // デッキ作成とルール判定
pub mod protocol; // 操作と結果の形式
pub mod systems; // 状態を変える処理たち

// よく使う型はここから直接 use できるようにしておくよ
pub use app::game_app::GameApp;
pub use components::{Card, GameState, GameStatus, ThemeCatalog, ThemeDef};
pub use config::GameConfig;
pub use engine::GameEngine;
pub use error::{GameError, GameResult, InvariantViolation};
pub use protocol::{MoveRequest, MoveSource, MoveTarget, Operation, OperationOutcome, RejectReason};

// main 関数の代わりに、Wasm がロードされた時に最初に実行される関数だよ。
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    app::console_logger::init(log::LevelFilter::Info);
    log::info!("Panic hook set! Logger ready.");
}
