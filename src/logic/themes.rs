// src/logic/themes.rs
//! カタログから 1 ゲーム分のテーマを選ぶよ。

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::components::theme::ThemeDef;
use crate::error::{GameError, GameResult};

/// `pool` から `count` 個のテーマを、重複なしで一様ランダムに選ぶ。
///
/// 足りないときは切り詰めずにエラーにするよ (ワード数の前提が崩れるので)。
pub fn select_themes<R: Rng + ?Sized>(
    pool: &[ThemeDef],
    count: usize,
    rng: &mut R,
) -> GameResult<Vec<ThemeDef>> {
    if count > pool.len() {
        return Err(GameError::NotEnoughThemes {
            requested: count,
            available: pool.len(),
        });
    }
    let selected: Vec<ThemeDef> = pool.choose_multiple(rng, count).cloned().collect();
    debug!(
        "Selected themes: {:?}",
        selected.iter().map(|t| t.name.as_str()).collect::<Vec<_>>()
    );
    Ok(selected)
}
