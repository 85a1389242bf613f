// src/engine.rs
//! ゲームエンジン本体だよ！
//!
//! GameState を 1 つだけ持って、外から届いた操作 (Operation) を順番に適用する。
//! グローバルなシングルトンは使わない。呼び出し側がエンジンを持って回す形！

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::components::game_state::GameState;
use crate::components::theme::ThemeCatalog;
use crate::config::GameConfig;
use crate::error::GameResult;
use crate::protocol::{MoveRequest, Operation, OperationOutcome};
use crate::systems::{draw_card, DealSystem, MoveCardSystem, ThemeCompletionSystem};

pub struct GameEngine<R: Rng = StdRng> {
    state: GameState,
    catalog: ThemeCatalog,
    config: GameConfig,
    rng: R,
    deal_system: DealSystem,
    move_card_system: MoveCardSystem,
    completion_system: ThemeCompletionSystem,
}

impl GameEngine<StdRng> {
    /// OS (ブラウザなら crypto) の乱数で初期化したエンジンを作る。
    pub fn new(catalog: ThemeCatalog, config: GameConfig) -> GameResult<Self> {
        Self::with_rng(catalog, config, StdRng::from_entropy())
    }

    /// 種を固定したエンジン。テストやリプレイ用。
    pub fn seeded(catalog: ThemeCatalog, config: GameConfig, seed: u64) -> GameResult<Self> {
        Self::with_rng(catalog, config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameEngine<R> {
    /// 設定とカタログを検証してからエンジンを作る。最初はメニュー状態。
    pub fn with_rng(catalog: ThemeCatalog, config: GameConfig, rng: R) -> GameResult<Self> {
        config.validate()?;
        catalog.validate(config.max_target_words)?;
        info!(
            "GameEngine: initialized with {} themes in catalog.",
            catalog.len()
        );
        Ok(Self {
            state: GameState::default(),
            catalog,
            config,
            rng,
            deal_system: DealSystem,
            move_card_system: MoveCardSystem::new(),
            completion_system: ThemeCompletionSystem::new(),
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn generation(&self) -> u32 {
        self.state.generation
    }

    /// 新しいゲームを始める。今の状態は丸ごと置き換わる (世代も進む)。
    /// 失敗したときは今の状態のまま。
    pub fn start_game(&mut self) -> GameResult<&GameState> {
        let generation = self.state.generation.wrapping_add(1);
        let state = self
            .deal_system
            .start_game(&self.catalog, &self.config, generation, &mut self.rng)?;
        self.state = state;
        self.debug_check_invariants();
        info!("GameEngine: game {} started.", generation);
        Ok(&self.state)
    }

    pub fn restart_game(&mut self) -> GameResult<&GameState> {
        info!("GameEngine: restarting.");
        self.start_game()
    }

    /// メニューに戻る。保留中の完成タイマーは世代が変わるので効かなくなる。
    pub fn return_to_menu(&mut self) -> &GameState {
        self.state = GameState::menu(self.state.generation.wrapping_add(1));
        info!("GameEngine: back to menu (generation {}).", self.state.generation);
        &self.state
    }

    pub fn draw_card(&mut self) -> OperationOutcome {
        let outcome = draw_card(&mut self.state);
        self.finish_operation("drawCard", &outcome);
        outcome
    }

    pub fn move_cards(&mut self, request: &MoveRequest) -> OperationOutcome {
        let outcome = self.move_card_system.run(&mut self.state, request);
        self.finish_operation("moveCards", &outcome);
        outcome
    }

    /// 今のゲームの完成処理。世代は見ない。
    pub fn finish_theme_completion(&mut self, pile_index: usize) -> OperationOutcome {
        let outcome = self.completion_system.run(&mut self.state, pile_index);
        self.finish_operation("finishThemeCompletion", &outcome);
        outcome
    }

    /// タイマーから呼ばれる完成処理。予約した時の世代が今と違えば何もしない。
    pub fn finish_theme_completion_for(&mut self, generation: u32, pile_index: usize) -> OperationOutcome {
        if generation != self.state.generation {
            warn!(
                "GameEngine: stale completion for generation {} (current {}), ignoring.",
                generation, self.state.generation
            );
            return OperationOutcome::StaleGeneration;
        }
        self.finish_theme_completion(pile_index)
    }

    /// 操作を 1 つ適用する。エラーになるのはゲーム開始の失敗だけ。
    pub fn apply(&mut self, operation: Operation) -> GameResult<OperationOutcome> {
        let outcome = match operation {
            Operation::StartGame => self.start_game().map(|_| OperationOutcome::Applied)?,
            Operation::RestartGame => self.restart_game().map(|_| OperationOutcome::Applied)?,
            Operation::ReturnToMenu => {
                self.return_to_menu();
                OperationOutcome::Applied
            }
            Operation::DrawCard => self.draw_card(),
            Operation::MoveCards(request) => self.move_cards(&request),
            Operation::FinishThemeCompletion { generation, pile_index } => {
                self.finish_theme_completion_for(generation, pile_index)
            }
        };
        Ok(outcome)
    }

    fn finish_operation(&self, name: &str, outcome: &OperationOutcome) {
        debug!(
            "GameEngine: {} -> {:?} (moves {}, status {:?})",
            name, outcome, self.state.moves, self.state.status
        );
        self.debug_check_invariants();
    }

    fn debug_check_invariants(&self) {
        debug_assert!(
            self.state.check_invariants().is_ok(),
            "game state invariant violated: {:?}",
            self.state.check_invariants()
        );
    }
}
