//! 場札 (Tableau) へのカード移動ルールを定義するよ。

use log::trace;

use crate::components::card::Card;

/// 指定されたカードが、場札の一番上 (`target_top`) に置けるかチェックする。
///
/// 空の列 (`None`) にはどのカードでも置ける。
/// そうでなければテーマが同じならOK。ランクの順番は関係なし！
pub fn can_move_to_tableau(card: &Card, target_top: Option<&Card>) -> bool {
    let result = match target_top {
        None => true,
        Some(top) => card.same_theme(top),
    };
    trace!(
        "[Tableau Rule] {} onto {:?}: {}",
        card.id,
        target_top.map(|top| top.id.as_str()),
        result
    );
    result
}
