// src/error.rs
//! ゲーム生成まわりのエラー型をまとめるよ！
//!
//! 不正な移動やドローはエラーにしない（状態を変えずに `Rejected` を返すだけ）。
//! ここに来るのは「ゲームを作れない」系の失敗だけだよ。

use thiserror::Error;

/// ゲームの構築・設定・JSON 境界で起きるエラー。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("not enough themes in catalog: requested {requested}, available {available}")]
    NotEnoughThemes { requested: usize, available: usize },

    #[error("theme '{theme}' has {available} distinct words, needs {required}")]
    InsufficientWords {
        theme: String,
        required: usize,
        available: usize,
    },

    #[error("duplicate theme name in catalog: {name}")]
    DuplicateTheme { name: String },

    #[error("invalid config: {details}")]
    InvalidConfig { details: String },

    #[error("catalog error: {details}")]
    Catalog { details: String },

    #[error("protocol error: {details}")]
    Protocol { details: String },
}

/// `Result<T, GameError>` の短縮形。
pub type GameResult<T> = Result<T, GameError>;

impl GameError {
    pub fn invalid_config(details: impl Into<String>) -> Self {
        Self::InvalidConfig {
            details: details.into(),
        }
    }

    pub fn catalog(details: impl Into<String>) -> Self {
        Self::Catalog {
            details: details.into(),
        }
    }

    pub fn protocol(details: impl Into<String>) -> Self {
        Self::Protocol {
            details: details.into(),
        }
    }
}

/// 状態の不変条件が壊れていることを示すエラー。
///
/// これはプログラムのバグなので、エンジンは `debug_assert!` でしか見ないよ。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("card id appears twice: {id}")]
    DuplicateCard { id: String },

    #[error("card count mismatch: dealt {expected}, found {found}")]
    CardCountMismatch { expected: usize, found: usize },

    #[error("foundation {index} is not founded by a theme card")]
    FoundationWithoutThemeCard { index: usize },

    #[error("foundation {index} mixes themes")]
    MixedFoundation { index: usize },

    #[error("completing foundation {index} has {found} cards, expected {expected}")]
    CompletionLengthMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_are_descriptive() {
        let err = GameError::InsufficientWords {
            theme: "Sports".to_string(),
            required: 7,
            available: 3,
        };
        assert_eq!(err.to_string(), "theme 'Sports' has 3 distinct words, needs 7");

        let err = GameError::NotEnoughThemes { requested: 8, available: 2 };
        assert!(err.to_string().contains("requested 8"));
    }

    #[test]
    fn helper_constructors_wrap_details() {
        assert_eq!(
            GameError::protocol("bad json"),
            GameError::Protocol { details: "bad json".to_string() }
        );
        assert!(GameError::invalid_config("x").to_string().starts_with("invalid config"));
    }
}
