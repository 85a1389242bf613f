// src/app/completion_timer.rs
//! 組札が揃ったあと、少し待ってから完成処理を呼ぶタイマーだよ！⏰
//!
//! 予約した時点の世代 (generation) を一緒に渡すので、
//! 待っている間にリスタートやメニュー戻りがあっても古いタイマーは無視される。
//! 同じゲームの中でも、予約ごとにチケット番号を振って、
//! 手動で完成させたあとに残った古いタイマーが次の完成を横取りしないようにしてる。

use std::sync::{Arc, Mutex, PoisonError};

use js_sys::{Function, Promise};
use log::{error, info};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::{spawn_local, JsFuture};

use crate::engine::GameEngine;

/// 完成タイマーの予約番号。新しく発行するか取り消すと、それより前の番号は全部無効になる。
#[derive(Debug, Default, Clone)]
pub struct CompletionTickets {
    latest: Arc<Mutex<u64>>,
}

impl CompletionTickets {
    pub fn new() -> Self {
        Self::default()
    }

    /// 新しい予約番号を発行する。
    pub fn issue(&self) -> u64 {
        let mut latest = self.latest.lock().unwrap_or_else(PoisonError::into_inner);
        *latest = latest.wrapping_add(1);
        *latest
    }

    /// 予約済みのタイマーを全部無効にする。
    pub fn revoke_all(&self) {
        self.issue();
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        *self.latest.lock().unwrap_or_else(PoisonError::into_inner) == ticket
    }
}

/// `delay_ms` 後に `finish_theme_completion_for(generation, pile_index)` を呼ぶ。
/// 終わったら `on_change` (JS の関数) があれば呼んで、画面に再描画を促すよ。
pub fn schedule_completion(
    engine: Arc<Mutex<GameEngine>>,
    on_change: Arc<Mutex<Option<Function>>>,
    tickets: CompletionTickets,
    generation: u32,
    pile_index: usize,
    delay_ms: u32,
) {
    let ticket = tickets.issue();
    spawn_local(async move {
        if let Err(e) = sleep(delay_ms).await {
            error!("completion timer failed: {:?}", e);
            return;
        }
        if !tickets.is_current(ticket) {
            info!("completion timer {} was superseded, skipping.", ticket);
            return;
        }

        let outcome = match engine.lock() {
            Ok(mut engine) => engine.finish_theme_completion_for(generation, pile_index),
            Err(e) => {
                error!("Failed to lock engine for completion: {}", e);
                return;
            }
        };
        info!("completion timer fired: {:?}", outcome);

        // ロックは先に手放す (コールバックの中で set_on_change されても大丈夫なように)
        let callback = match on_change.lock() {
            Ok(slot) => slot.clone(),
            Err(e) => {
                error!("Failed to lock callback slot: {}", e);
                None
            }
        };
        if let Some(callback) = callback {
            if let Err(e) = callback.call0(&JsValue::NULL) {
                error!("on_change callback threw: {:?}", e);
            }
        }
    });
}

/// setTimeout を Promise に包んで await できるようにしたもの。
async fn sleep(delay_ms: u32) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
    let timeout = i32::try_from(delay_ms).unwrap_or(i32::MAX);

    let mut scheduled = Ok(0);
    let promise = Promise::new(&mut |resolve, _reject| {
        scheduled = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, timeout);
    });
    scheduled?;
    JsFuture::from(promise).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_ticket_supersedes_older_one() {
        let tickets = CompletionTickets::new();
        let first = tickets.issue();
        assert!(tickets.is_current(first));

        let second = tickets.issue();
        assert!(!tickets.is_current(first), "古い予約が生きてる！");
        assert!(tickets.is_current(second));
    }

    #[test]
    fn revoke_invalidates_pending_ticket_and_is_shared_between_clones() {
        let tickets = CompletionTickets::new();
        let held_by_timer = tickets.clone();
        let ticket = tickets.issue();

        // 手動で完成させた
        tickets.revoke_all();
        assert!(!held_by_timer.is_current(ticket));

        // 同じ組札がまた揃って、新しいタイマーが予約された
        let next = tickets.issue();
        assert!(!held_by_timer.is_current(ticket));
        assert!(held_by_timer.is_current(next));
        println!("完成タイマーの予約番号テスト、成功！⏰");
    }
}
