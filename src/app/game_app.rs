// src/app/game_app.rs

// --- 必要なものをインポート ---
use std::sync::{Arc, Mutex, MutexGuard};

use js_sys::Function;
use log::{error, info};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsValue;

use crate::app::completion_timer::{self, CompletionTickets};
use crate::app::state_getter;
use crate::components::theme::ThemeCatalog;
use crate::config::GameConfig;
use crate::engine::GameEngine;
use crate::error::GameError;
use crate::protocol::{MoveRequest, Operation, OperationOutcome};

/// GameError を JS に投げられる形にする
fn to_js_error(error: GameError) -> JsValue {
    error!("{}", error);
    JsValue::from_str(&error.to_string())
}

// --- JS から触るゲーム全体の窓口 ---
// 返り値はどれも `{"outcome": ..., "state": ...}` の JSON 文字列だよ。
#[wasm_bindgen]
pub struct GameApp {
    engine: Arc<Mutex<GameEngine>>,
    // 完成タイマーが終わったときに呼ぶ JS の関数 (再描画用)
    on_change: Arc<Mutex<Option<Function>>>,
    // 予約中の完成タイマーの番号。手動の完成処理で古いタイマーを無効にする
    completion_tickets: CompletionTickets,
}

#[wasm_bindgen]
impl GameApp {
    /// 同梱のテーマカタログで作る。`config_json` を省略するとデフォルト設定。
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<GameApp, JsValue> {
        let catalog = ThemeCatalog::bundled().map_err(to_js_error)?;
        Self::build(config_json, catalog)
    }

    /// 外から渡したテーマカタログで作る。
    pub fn with_catalog(config_json: Option<String>, catalog_json: String) -> Result<GameApp, JsValue> {
        let catalog = ThemeCatalog::from_json(&catalog_json).map_err(to_js_error)?;
        Self::build(config_json, catalog)
    }

    /// 状態が裏で変わったとき (完成タイマー) に呼ばれる関数を登録する。
    pub fn set_on_change(&self, callback: Option<Function>) -> Result<(), JsValue> {
        let mut slot = self
            .on_change
            .lock()
            .map_err(|e| JsValue::from_str(&format!("Failed to lock callback slot: {}", e)))?;
        *slot = callback;
        Ok(())
    }

    pub fn start_game(&self) -> Result<String, JsValue> {
        self.run(Operation::StartGame)
    }

    pub fn restart_game(&self) -> Result<String, JsValue> {
        self.run(Operation::RestartGame)
    }

    pub fn return_to_menu(&self) -> Result<String, JsValue> {
        self.run(Operation::ReturnToMenu)
    }

    pub fn draw_card(&self) -> Result<String, JsValue> {
        self.run(Operation::DrawCard)
    }

    /// カード移動。`request_json` は MoveRequest の形 (source / cards / target)。
    pub fn move_cards(&self, request_json: String) -> Result<String, JsValue> {
        let request = MoveRequest::from_json(&request_json).map_err(to_js_error)?;
        self.run(Operation::MoveCards(request))
    }

    /// 自動完成を切っているときに、JS 側のタイマーから呼ぶ用。
    pub fn finish_theme_completion(&self, generation: u32, pile_index: usize) -> Result<String, JsValue> {
        self.run(Operation::FinishThemeCompletion { generation, pile_index })
    }

    /// 任意の操作を JSON (`{"type": "drawCard"}` など) で送る。
    pub fn apply(&self, operation_json: String) -> Result<String, JsValue> {
        let operation = Operation::from_json(&operation_json).map_err(to_js_error)?;
        self.run(operation)
    }

    pub fn state_json(&self) -> Result<String, JsValue> {
        let engine = self.lock_engine()?;
        state_getter::snapshot_json(engine.state(), None).map_err(to_js_error)
    }

    pub fn generation(&self) -> Result<u32, JsValue> {
        Ok(self.lock_engine()?.generation())
    }
}

impl GameApp {
    fn build(config_json: Option<String>, catalog: ThemeCatalog) -> Result<GameApp, JsValue> {
        info!("GameApp: 初期化中...");
        let config = match config_json {
            Some(json) => GameConfig::from_json(&json).map_err(to_js_error)?,
            None => GameConfig::default(),
        };
        let engine = GameEngine::new(catalog, config).map_err(to_js_error)?;
        info!("GameApp: 初期化完了。");
        Ok(Self {
            engine: Arc::new(Mutex::new(engine)),
            on_change: Arc::new(Mutex::new(None)),
            completion_tickets: CompletionTickets::new(),
        })
    }

    fn lock_engine(&self) -> Result<MutexGuard<'_, GameEngine>, JsValue> {
        self.engine.lock().map_err(|e| {
            let error_msg = format!("Failed to lock engine: {}", e);
            error!("{}", error_msg);
            JsValue::from_str(&error_msg)
        })
    }

    /// 操作を適用して、結果と新しい状態を JSON で返す。
    /// 組札が揃ったら (自動完成が有効なら) 完成タイマーを仕掛けるよ。
    fn run(&self, operation: Operation) -> Result<String, JsValue> {
        if let Operation::FinishThemeCompletion { .. } = operation {
            self.completion_tickets.revoke_all();
        }
        let (json, timer) = {
            let mut engine = self.lock_engine()?;
            let outcome = engine.apply(operation).map_err(to_js_error)?;
            let json = state_getter::snapshot_json(engine.state(), Some(&outcome)).map_err(to_js_error)?;

            let config = engine.config();
            let timer = match outcome {
                OperationOutcome::CompletionTriggered { pile_index } if config.auto_complete => {
                    Some((engine.generation(), pile_index, config.completion_delay_ms))
                }
                _ => None,
            };
            (json, timer)
        };

        if let Some((generation, pile_index, delay_ms)) = timer {
            completion_timer::schedule_completion(
                Arc::clone(&self.engine),
                Arc::clone(&self.on_change),
                self.completion_tickets.clone(),
                generation,
                pile_index,
                delay_ms,
            );
        }
        Ok(json)
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    fn parse(json: &str) -> serde_json::Value {
        serde_json::from_str(json).unwrap()
    }

    #[wasm_bindgen_test]
    fn starts_and_draws_through_json() {
        let app = GameApp::new(None).unwrap();
        let menu = parse(&app.state_json().unwrap());
        assert_eq!(menu["state"]["status"], "menu");

        let started = parse(&app.start_game().unwrap());
        assert_eq!(started["outcome"]["kind"], "applied");
        assert_eq!(started["state"]["status"], "playing");
        assert_eq!(started["state"]["moves"], 80);

        let drawn = parse(&app.draw_card().unwrap());
        assert_eq!(drawn["state"]["moves"], 79);
        assert_eq!(app.generation().unwrap(), 1);
    }

    #[wasm_bindgen_test]
    fn bad_json_is_an_error() {
        let app = GameApp::new(None).unwrap();
        assert!(app.move_cards("{not json".to_string()).is_err());
        assert!(GameApp::new(Some(r#"{"moveBudget": 0}"#.to_string())).is_err());
    }

    #[wasm_bindgen_test]
    fn stale_completion_is_reported() {
        let app = GameApp::new(Some(r#"{"autoComplete": false}"#.to_string())).unwrap();
        app.start_game().unwrap();
        app.restart_game().unwrap();
        let result = parse(&app.finish_theme_completion(1, 0).unwrap());
        assert_eq!(result["outcome"]["kind"], "staleGeneration");
    }
}
