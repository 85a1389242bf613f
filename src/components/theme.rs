// src/components/theme.rs
//! テーマ (昔でいうスート) の定義と、その一覧 (カタログ) だよ。

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};

/// テーマ1つ分の元データ。名前と、候補になるワードのリスト。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeDef {
    pub name: String,
    pub words: Vec<String>,
}

impl ThemeDef {
    pub fn new(name: impl Into<String>, words: &[&str]) -> Self {
        Self {
            name: name.into(),
            words: words.iter().map(|w| w.to_string()).collect(),
        }
    }

    /// 重複を除いたワードの数。
    pub fn distinct_word_count(&self) -> usize {
        self.words.iter().unique().count()
    }
}

/// クレートに同梱してあるテーマ一覧 (JSON)。
const BUNDLED_THEMES: &str = include_str!("../../assets/themes.json");

/// テーマの一覧。`{"themes": [...]}` の形の JSON から読み込むよ。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ThemeCatalog {
    pub themes: Vec<ThemeDef>,
}

impl ThemeCatalog {
    pub fn new(themes: Vec<ThemeDef>) -> Self {
        Self { themes }
    }

    pub fn from_json(json: &str) -> GameResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| GameError::catalog(format!("failed to parse theme catalog: {}", e)))
    }

    /// 同梱のカタログ。
    pub fn bundled() -> GameResult<Self> {
        Self::from_json(BUNDLED_THEMES)
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    /// 名前の重複がないこと、どのテーマにも `min_words` 個以上のワードがあることを確認する。
    pub fn validate(&self, min_words: usize) -> GameResult<()> {
        if let Some(name) = self.themes.iter().map(|t| t.name.as_str()).duplicates().next() {
            return Err(GameError::DuplicateTheme { name: name.to_string() });
        }
        for theme in &self.themes {
            let available = theme.distinct_word_count();
            if available < min_words {
                return Err(GameError::InsufficientWords {
                    theme: theme.name.clone(),
                    required: min_words,
                    available,
                });
            }
        }
        Ok(())
    }
}
