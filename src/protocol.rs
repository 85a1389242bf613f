// src/protocol.rs

// このファイルは、エンジンと呼び出し側 (JS の画面とか) の間で
// やり取りするデータの形式（プロトコル）を定義するよ！💌
// `Serialize` は Rust のデータ構造 -> JSON 文字列、
// `Deserialize` は JSON 文字列 -> Rust のデータ構造 にするやつだよ。
use serde::{Deserialize, Serialize};

use crate::components::card::Card;
pub use crate::components::stack::{MoveSource, MoveTarget, SourceArea, StackType, TargetArea};
use crate::error::{GameError, GameResult};

/// カード移動のリクエストだよ。
///
/// `cards` はドラッグしたカードの束そのもの (下から順)。
/// 移動元パイルの一番上の束と一致していないと受け付けないよ。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MoveRequest {
    pub source: MoveSource,
    pub cards: Vec<Card>,
    pub target: MoveTarget,
}

impl MoveRequest {
    pub fn new(source: MoveSource, cards: Vec<Card>, target: MoveTarget) -> Self {
        Self { source, cards, target }
    }

    pub fn from_json(json: &str) -> GameResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| GameError::protocol(format!("failed to parse move request: {}", e)))
    }
}

/// エンジンに送れる操作の一覧。`{"type": "drawCard"}` みたいな形の JSON になる。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Operation {
    StartGame,
    DrawCard,
    MoveCards(MoveRequest),
    /// 完成演出のタイマーから届く。`generation` が今のゲームと違えば無視される。
    FinishThemeCompletion {
        generation: u32,
        #[serde(rename = "pileIndex")]
        pile_index: usize,
    },
    RestartGame,
    ReturnToMenu,
}

impl Operation {
    pub fn from_json(json: &str) -> GameResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| GameError::protocol(format!("failed to parse operation: {}", e)))
    }
}

/// 操作が受け付けられなかった理由。エラーじゃなくて「何も起きなかった」の説明だよ。
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum RejectReason {
    /// プレイ中じゃない
    NotPlaying,
    /// 完成演出中
    CompletionPending,
    /// 手数切れ (このとき状態は Lost になる)
    OutOfMoves,
    /// 同じパイルへの移動
    SamePile,
    /// パイル番号が範囲外
    NoSuchPile,
    /// 渡された束が移動元の一番上と一致しない
    RunMismatch,
    /// 裏向きのカードを動かそうとした
    FaceDown,
    /// テーマが混ざった束
    RunNotMovable,
    /// ルール上置けない
    IllegalMove,
    /// 山札も捨て札も空
    NothingToDraw,
    /// そのパイルは完成待ちじゃない
    NoPendingCompletion,
}

/// 操作の結果。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum OperationOutcome {
    /// 状態が進んだ
    Applied,
    /// 組札が揃って、完成演出が始まった
    CompletionTriggered {
        #[serde(rename = "pileIndex")]
        pile_index: usize,
    },
    /// テーマが完成して組札が片付いた
    ThemeCompleted { theme: String, won: bool },
    /// 受け付けなかった
    Rejected { reason: RejectReason },
    /// 前のゲームのタイマーだったので無視した
    StaleGeneration,
}

impl OperationOutcome {
    pub fn rejected(reason: RejectReason) -> Self {
        Self::Rejected { reason }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}
