//! ゲームの勝利条件判定ロジックを定義するよ。

use std::collections::BTreeMap;

use crate::components::card::Card;
use crate::config::layout::{FOUNDATION_COUNT, LEGACY_FULL_FOUNDATION};

/// 全部のテーマが完成したか判定する。勝利判定はこっちが本物！
pub fn all_themes_completed(active_themes: &BTreeMap<String, usize>, completed_themes: &[String]) -> bool {
    active_themes
        .keys()
        .all(|theme| completed_themes.iter().any(|done| done == theme))
}

/// 古いクリア条件（4つの組札が全部13枚）。
/// ワード数がテーマごとに変わるので、今は参考情報にしか使わないよ。
pub fn check_win_condition(foundations: &[Vec<Card>]) -> bool {
    foundations.len() == FOUNDATION_COUNT
        && foundations.iter().all(|pile| pile.len() == LEGACY_FULL_FOUNDATION)
}
