//! Converts the engine state (and the outcome of the last operation) to JSON for the JS side.

use log::error;
use serde::Serialize;

use crate::components::game_state::GameState;
use crate::error::{GameError, GameResult};
use crate::protocol::OperationOutcome;

/// JS に返す形。`outcome` は状態を取るだけのときは入らないよ。
#[derive(Serialize)]
struct Snapshot<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    outcome: Option<&'a OperationOutcome>,
    state: &'a GameState,
}

/// 状態と、あれば直前の操作結果をまとめて JSON 文字列にする。
pub fn snapshot_json(state: &GameState, outcome: Option<&OperationOutcome>) -> GameResult<String> {
    serde_json::to_string(&Snapshot { outcome, state }).map_err(|e| {
        let error_msg = format!("Failed to serialize game state: {}", e);
        error!("{}", error_msg);
        GameError::protocol(error_msg)
    })
}
