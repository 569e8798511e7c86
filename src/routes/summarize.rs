use axum::{
    extract::{Multipart, State},
    Json,
};

use crate::dto::summary::SummaryResponse;
use crate::errors::AppError;
use crate::services::pdf;
use crate::services::prompts::SummaryMode;
use crate::state::AppState;

const ACCEPTED_CONTENT_TYPES: &[&str] = &["application/pdf", "application/octet-stream"];

pub async fn summarize(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<SummaryResponse>, AppError> {
    let mut data: Option<Vec<u8>> = None;
    let mut mode = SummaryMode::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned);

        match name.as_deref() {
            Some("file") => {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();

                if !ACCEPTED_CONTENT_TYPES.contains(&content_type.as_str()) {
                    tracing::info!("Rejected upload with content type {content_type}");
                    return Err(AppError::Validation("Please upload a PDF".to_string()));
                }

                data = Some(field.bytes().await?.to_vec());
            }
            Some("mode") => {
                mode = SummaryMode::parse_lenient(&field.text().await?);
            }
            _ => {}
        }
    }

    let data = data.ok_or_else(|| AppError::Validation("No file provided".to_string()))?;

    let text = pdf::extract_text(data).await?;
    if text.is_empty() {
        return Err(AppError::Validation(
            "Could not extract text from PDF".to_string(),
        ));
    }

    let summary = state.summarizer.summarize(&text, mode).await?;

    Ok(Json(SummaryResponse { mode, summary }))
}
