// src/components/mod.rs

// この components モジュールに属するサブモジュールを宣言するよ！
pub mod card;
pub mod game_state;
pub mod stack;
pub mod theme;

// よく使う型はここから直接使えるようにしておく！
pub use card::{Card, Rank};
pub use game_state::{GameState, GameStatus};
pub use stack::{MoveSource, MoveTarget, SourceArea, StackType, TargetArea};
pub use theme::{ThemeCatalog, ThemeDef};
