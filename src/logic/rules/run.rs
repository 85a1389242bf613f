//! 場札から複数枚まとめて動かすときのルール。

use itertools::Itertools;

use crate::components::card::Card;

/// 束 (run) をまとめて掴めるかチェックする。隣り合うカードが全部同じテーマならOK。
/// 1 枚だけ (や空) なら常に true。
pub fn is_run_movable(run: &[Card]) -> bool {
    run.iter().tuple_windows().all(|(lower, upper)| lower.same_theme(upper))
}
