// src/config/game_config.rs
//! 1 ゲーム分のルール設定だよ。
//!
//! JS 側から JSON で上書きできるように `Deserialize` + `#[serde(default)]` にしてある。
//! 書かなかった項目はデフォルト値になるよ！

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::config::layout::MAX_RANK;
use crate::error::{GameError, GameResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    /// 1 ゲームで使うテーマの数
    pub themes_per_game: usize,
    /// 持ち手数 (減っていくだけ)
    pub move_budget: i32,
    /// テーマごとのワード数の下限 (含む)
    pub min_target_words: usize,
    /// テーマごとのワード数の上限 (含む)
    pub max_target_words: usize,
    /// 組札が揃ってから消えるまでの時間 (ミリ秒)
    pub completion_delay_ms: u32,
    /// true ならブラウザ側のタイマーで自動的に完成処理を呼ぶ
    pub auto_complete: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            themes_per_game: 8,
            move_budget: 80,
            min_target_words: 3,
            max_target_words: 7,
            completion_delay_ms: 1000,
            auto_complete: true,
        }
    }
}

impl GameConfig {
    /// JSON 文字列から設定を読み込んで、ついでに検証もするよ。
    pub fn from_json(json: &str) -> GameResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| GameError::invalid_config(format!("failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// ワード数の抽選範囲。
    pub fn target_range(&self) -> RangeInclusive<usize> {
        self.min_target_words..=self.max_target_words
    }

    pub fn validate(&self) -> GameResult<()> {
        if self.themes_per_game == 0 {
            return Err(GameError::invalid_config("themes_per_game must be at least 1"));
        }
        if self.move_budget <= 0 {
            return Err(GameError::invalid_config("move_budget must be positive"));
        }
        if self.min_target_words == 0 || self.min_target_words > self.max_target_words {
            return Err(GameError::invalid_config(format!(
                "target word range {}..={} is empty or starts at zero",
                self.min_target_words, self.max_target_words
            )));
        }
        // テーマカード (ランク1) の上にワードが乗るので、最大ランクは max + 1
        if self.max_target_words + 1 > MAX_RANK as usize {
            return Err(GameError::invalid_config(format!(
                "max_target_words {} exceeds rank limit {}",
                self.max_target_words, MAX_RANK
            )));
        }
        Ok(())
    }
}
