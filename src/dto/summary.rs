use serde::Serialize;

use crate::services::prompts::SummaryMode;

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub mode: SummaryMode,
    pub summary: String,
}
