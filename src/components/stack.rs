// src/components/stack.rs

// serde を使うためにインポート！JS から来る移動リクエストを読むのに使うよ。
use serde::{Deserialize, Serialize};

/// カードの山 (パイル) の場所を示す Enum だよ。
/// これを使って、山札なのか、場札の何列目なのか、などを区別するよ。
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StackType {
    /// 場札 (Tableau) だよ。7つの列があるので、列番号 (0-6) を持つ。
    Tableau(usize),
    /// 組札 (Foundation) だよ。4つある。どのテーマを集めるかは一番下のカードで決まる。
    Foundation(usize),
    /// 山札 (Stock)。裏向きで、ここからめくる。
    Stock,
    /// 山札からめくったカードを置く場所 (Waste)。
    Waste,
}

/// 移動元として指定できるエリア。山札からは直接動かせないよ。
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SourceArea {
    Tableau,
    Waste,
    Foundation,
}

/// 移動先として指定できるエリア。
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TargetArea {
    Tableau,
    Foundation,
}

/// 移動元。JS からは `{"area": "tableau", "index": 2}` みたいに届く。
/// Waste の `index` は無視するよ。
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MoveSource {
    pub area: SourceArea,
    #[serde(default)]
    pub index: usize,
}

/// 移動先。
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MoveTarget {
    pub area: TargetArea,
    pub index: usize,
}

impl MoveSource {
    pub fn tableau(index: usize) -> Self {
        Self { area: SourceArea::Tableau, index }
    }

    pub fn waste() -> Self {
        Self { area: SourceArea::Waste, index: 0 }
    }

    pub fn foundation(index: usize) -> Self {
        Self { area: SourceArea::Foundation, index }
    }

    pub fn stack_type(&self) -> StackType {
        match self.area {
            SourceArea::Tableau => StackType::Tableau(self.index),
            SourceArea::Waste => StackType::Waste,
            SourceArea::Foundation => StackType::Foundation(self.index),
        }
    }
}

impl MoveTarget {
    pub fn tableau(index: usize) -> Self {
        Self { area: TargetArea::Tableau, index }
    }

    pub fn foundation(index: usize) -> Self {
        Self { area: TargetArea::Foundation, index }
    }

    pub fn stack_type(&self) -> StackType {
        match self.area {
            TargetArea::Tableau => StackType::Tableau(self.index),
            TargetArea::Foundation => StackType::Foundation(self.index),
        }
    }
}
