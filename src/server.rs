//! HTTP boundary around the extractor.
//!
//! Four endpoints, no algorithmic content: extraction ingress, image
//! upload, batch persistence and batch listing. Errors are translated
//! into status codes and a `{"error": ...}` envelope here; the extractor
//! itself never logs or maps statuses.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::Mutex;

use crate::config::Config;
use crate::error::AppError;
use crate::extractor;
use crate::model::{BatchEntry, ExamMetadata, Question};
use crate::{storage, upload};

/// Raw-text bodies can carry whole scanned exams.
const MAX_BODY_BYTES: usize = 50 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub data_dir: PathBuf,
    pub images_dir: PathBuf,
    /// Batch writes go through a single writer so concurrent saves to the
    /// same file cannot interleave.
    write_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            data_dir: PathBuf::from(&config.data_dir),
            images_dir: PathBuf::from(&config.images_dir),
            write_lock: Arc::new(Mutex::new(())),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/extract", post(extract_questions))
        .route("/api/upload-image", post(upload_image))
        .route("/api/save-questions", post(save_questions))
        .route("/api/questions", get(list_questions))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Persistence(_) | AppError::Serialization(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        if status.is_server_error() {
            tracing::error!("request failed: {self}");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractRequest {
    pub raw_text: String,
    pub metadata: ExamMetadata,
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub success: bool,
    pub total: usize,
    pub questions: Vec<Question>,
}

async fn extract_questions(
    State(_state): State<AppState>,
    Json(body): Json<ExtractRequest>,
) -> Result<Json<ExtractResponse>, AppError> {
    let questions = extractor::extract(&body.raw_text, &body.metadata)?;

    tracing::info!(
        exam = %body.metadata.exam_code,
        total = questions.len(),
        "extracted question batch"
    );

    Ok(Json(ExtractResponse {
        success: true,
        total: questions.len(),
        questions,
    }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    pub file_name: String,
    pub path: String,
}

async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("failed to read multipart field: {e}")))?
    {
        if field.name() != Some("image") {
            continue;
        }

        let original_name = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidInput(format!("failed to read image data: {e}")))?;

        let stored = upload::store_image(&state.images_dir, &original_name, &data)?;
        tracing::info!(file = %stored.file_name, bytes = data.len(), "stored uploaded image");

        return Ok(Json(UploadResponse {
            success: true,
            file_name: stored.file_name,
            path: stored.path,
        }));
    }

    Err(AppError::InvalidInput("no image uploaded".to_string()))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRequest {
    pub questions: Vec<Question>,
    pub file_name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveResponse {
    pub success: bool,
    pub message: String,
    pub file_name: String,
}

async fn save_questions(
    State(state): State<AppState>,
    Json(body): Json<SaveRequest>,
) -> Result<Json<SaveResponse>, AppError> {
    let _guard = state.write_lock.lock().await;
    storage::save_batch(&state.data_dir, &body.file_name, &body.questions)?;

    tracing::info!(file = %body.file_name, total = body.questions.len(), "saved question batch");

    Ok(Json(SaveResponse {
        success: true,
        message: format!("{} questions saved", body.questions.len()),
        file_name: body.file_name,
    }))
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub files: Vec<BatchEntry>,
}

async fn list_questions(State(state): State<AppState>) -> Result<Json<ListResponse>, AppError> {
    let files = storage::list_batches(&state.data_dir)?;
    Ok(Json(ListResponse { files }))
}
