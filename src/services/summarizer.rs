use std::num::NonZeroUsize;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::services::chunking::chunk_text;
use crate::services::llm_provider::{CompletionService, response_text};
use crate::services::prompts::{SummaryMode, build_merge_prompt, build_prompt};

/// Chunk-and-merge summarization over a [`CompletionService`].
pub struct Summarizer {
    client: Arc<dyn CompletionService>,
    model: String,
    max_chunk_chars: NonZeroUsize,
}

impl Summarizer {
    pub fn new(
        client: Arc<dyn CompletionService>,
        model: impl Into<String>,
        max_chunk_chars: NonZeroUsize,
    ) -> Self {
        Self {
            client,
            model: model.into(),
            max_chunk_chars,
        }
    }

    /// Summarize each chunk in order, then merge the partials when there is more
    /// than one. Any failed call fails the whole summary.
    pub async fn summarize(&self, text: &str, mode: SummaryMode) -> Result<String> {
        let chunks = chunk_text(text, self.max_chunk_chars);
        if chunks.is_empty() {
            anyhow::bail!("Nothing to summarize: document text is empty");
        }

        let total = chunks.len();
        tracing::info!(chunks = total, mode = mode.as_str(), "Summarizing document");

        let mut partials = Vec::with_capacity(total);
        for (index, chunk) in chunks.iter().enumerate() {
            tracing::debug!("Summarizing chunk {}/{total} ({} chars)", index + 1, chunk.chars().count());
            let partial = self
                .complete(&build_prompt(chunk, mode))
                .await
                .with_context(|| format!("Failed to summarize chunk {}/{total}", index + 1))?;
            partials.push(partial);
        }

        if let [only] = partials.as_mut_slice() {
            return Ok(std::mem::take(only));
        }

        tracing::debug!("Merging {} partial summaries", partials.len());
        self.complete(&build_merge_prompt(&partials))
            .await
            .context("Failed to merge partial summaries")
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let response = self.client.chat(&self.model, prompt).await?;
        let text = response_text(&response).context("Completion response contained no text")?;
        Ok(text.trim().to_string())
    }
}
