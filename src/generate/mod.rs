//! Text-generation backends.
//!
//! Backends are interchangeable: the rest of the system sees raw text and
//! feeds it through the extractor, and only keeps a backend's name as the
//! provenance tag on the entries it produced.

mod chat;
pub mod fallback;
pub mod prompts;

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use color_eyre::Result;

pub use chat::ChatBackend;

use crate::names;

#[derive(Debug, Clone, Copy)]
pub struct SamplingParams {
    pub temperature: f64,
    pub max_tokens: u32,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            temperature: names::BASE_TEMPERATURE,
            max_tokens: 1024,
        }
    }
}

impl SamplingParams {
    /// Temperature stepped up per top-up slot, so consecutive requests
    /// against the same backend don't collapse into duplicate questions.
    pub fn for_slot(slot: usize) -> Self {
        let temperature = (names::BASE_TEMPERATURE + slot as f64 * names::TEMPERATURE_STEP)
            .min(names::MAX_TEMPERATURE);
        Self {
            temperature,
            ..Self::default()
        }
    }
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Provenance tag recorded on entries this backend produced.
    fn name(&self) -> &str;

    async fn generate(&self, prompt: &str, params: SamplingParams) -> Result<String>;
}

/// The configured set of backends. Primary and secondary are the diversity
/// axis for top-up generation; the specialist, when present, contributes
/// one extra question per enhancement run.
#[derive(Clone)]
pub struct GeneratorPool {
    pub primary: Arc<dyn TextGenerator>,
    pub secondary: Arc<dyn TextGenerator>,
    pub specialist: Option<Arc<dyn TextGenerator>>,
}

impl GeneratorPool {
    pub fn new(
        primary: Arc<dyn TextGenerator>,
        secondary: Arc<dyn TextGenerator>,
        specialist: Option<Arc<dyn TextGenerator>>,
    ) -> Self {
        Self {
            primary,
            secondary,
            specialist,
        }
    }
}

/// Await one generation task and unwrap it to a value unconditionally:
/// failure degrades to the given fallback instead of propagating. Every
/// fan-out slice goes through here, so a single bad slice can never abort
/// its siblings or the overall operation.
pub async fn or_fallback<T, F>(task: F, fallback: T, what: &str) -> T
where
    F: Future<Output = Result<T>>,
{
    match task.await {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("{what} generation degraded to fallback: {e}");
            fallback
        }
    }
}
