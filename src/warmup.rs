use std::{sync::Arc, time::Instant};

use tokio::task::JoinHandle;

use crate::llm_handlers::traits::Llm;

/// Filler prompt sent to load the model.
pub const WARMUP_PROMPT: &str = "Hello";

/// Fires one throwaway generation on a detached task. The outcome is only
/// logged; request handling never waits on it.
pub fn spawn_warmup(llm: Arc<Llm>) -> JoinHandle<()> {
    tokio::spawn(async move {
        log::info!("warming up {} backend", llm.name());
        let started = Instant::now();
        match llm.answer(WARMUP_PROMPT).await {
            Ok(_) => log::info!(
                "{} backend warm-up finished in {:?}",
                llm.name(),
                started.elapsed()
            ),
            Err(e) => log::warn!("{} backend warm-up failed: {e}", llm.name()),
        }
    })
}
