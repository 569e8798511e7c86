use crate::config::AppConfig;
use crate::services::llm_provider::CompletionService;
use crate::services::summarizer::Summarizer;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub summarizer: Arc<Summarizer>,
}

impl AppState {
    pub fn new(config: AppConfig, client: Arc<dyn CompletionService>) -> Self {
        let summarizer = Summarizer::new(
            client,
            config.llm.model.clone(),
            config.summarizer.max_chunk_chars,
        );

        Self {
            config: Arc::new(config),
            summarizer: Arc::new(summarizer),
        }
    }
}
