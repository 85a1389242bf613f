// src/logic/rules/mod.rs
//! テーマソリティアのルール関連モジュールをまとめるよ！
//!
//! どれも状態を持たない純粋な判定関数。ランクは一切見ない！

pub mod foundation;
pub mod run;
pub mod stock_waste;
pub mod tableau;
pub mod win_condition;


// 各モジュールから公開したい関数をここで再エクスポート！
pub use foundation::*;
pub use run::*;
pub use stock_waste::*;
pub use tableau::*;
pub use win_condition::*;
