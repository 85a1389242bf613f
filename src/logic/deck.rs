// src/logic/deck.rs

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use itertools::Itertools;
use log::debug;
use rand::seq::{index, SliceRandom};
use rand::Rng;

use crate::components::card::{Card, Rank};
use crate::components::theme::ThemeDef;
use crate::config::layout::MAX_RANK;
use crate::error::{GameError, GameResult};

/// `build_deck` の結果。デッキと、テーマごとの目標ワード数。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltDeck {
    pub deck: Vec<Card>,
    pub targets: BTreeMap<String, usize>,
}

/// 選ばれたテーマからデッキを作る関数だよ！🃏
///
/// テーマごとに目標ワード数 `n` を `target_range` から抽選して、
/// テーマカード1枚 + ワードカード `n` 枚 (ランク 2..=n+1) を作る。
/// ワードは候補から (重複を除いてから) 重複なしで選んで、選ばれた順にランクを振るよ。
/// 生成された時点では、すべてのカードは裏向き！
///
/// デッキの枚数は 52 枚固定じゃなくて、Σ(目標 + 1) になる。
pub fn build_deck<R: Rng + ?Sized>(
    themes: &[ThemeDef],
    target_range: RangeInclusive<usize>,
    rng: &mut R,
) -> GameResult<BuiltDeck> {
    if target_range.is_empty() || *target_range.end() + 1 > MAX_RANK as usize {
        return Err(GameError::invalid_config(format!(
            "target word range {:?} cannot be dealt",
            target_range
        )));
    }

    let mut deck = Vec::with_capacity(themes.len() * (*target_range.end() + 1));
    let mut targets = BTreeMap::new();

    for theme in themes {
        let target = rng.gen_range(target_range.clone());
        // 同じワードが 2 回書かれていても 1 つとして数える
        let words: Vec<&String> = theme.words.iter().unique().collect();
        if words.len() < target {
            return Err(GameError::InsufficientWords {
                theme: theme.name.clone(),
                required: target,
                available: words.len(),
            });
        }
        targets.insert(theme.name.clone(), target);

        deck.push(Card::theme_card(&theme.name));
        // index::sample の結果はシャッフル済みの順番で出てくる
        let picked = index::sample(rng, words.len(), target);
        for (offset, word_index) in picked.into_iter().enumerate() {
            let rank = (offset + 2) as Rank;
            deck.push(Card::word_card(&theme.name, rank, words[word_index]));
        }
        debug!("Built theme '{}' with {} words", theme.name, target);
    }

    Ok(BuiltDeck { deck, targets })
}

/// カードデッキをシャッフルする関数だよ。
/// 後ろから順に、[0, i] の一様ランダムな位置と入れ替えていく (Fisher-Yates)。
pub fn shuffle_deck<R: Rng + ?Sized>(deck: &mut [Card], rng: &mut R) {
    deck.shuffle(rng);
}
