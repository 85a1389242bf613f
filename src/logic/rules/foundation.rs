//! 組札 (Foundation) へのカード移動ルールを定義するよ。

use log::trace;

use crate::components::card::Card;

/// 指定されたカードが、組札 `pile` の一番上に置けるかチェックする。
///
/// - 空の組札: テーマカード (ランク1) しか置けない
/// - 空でない組札: 一番上と同じテーマならOK (ランクは見ない)
pub fn can_move_to_foundation(card: &Card, pile: &[Card]) -> bool {
    let result = match pile.last() {
        None => card.is_theme_card(),
        Some(top) => card.same_theme(top),
    };
    trace!("[Foundation Rule] {} onto pile of {}: {}", card.id, pile.len(), result);
    result
}
