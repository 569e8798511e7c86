pub mod chunking;
pub mod llm_provider;
pub mod pdf;
pub mod prompts;
pub mod summarizer;
