//! Batch persistence: pretty-printed JSON files, one per save request.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::AppError;
use crate::model::{BatchEntry, Question};

/// Write a batch to `<dir>/<file_name>` as pretty-printed JSON,
/// overwriting any existing file of that name.
pub fn save_batch(
    dir: &Path,
    file_name: &str,
    questions: &[Question],
) -> Result<PathBuf, AppError> {
    validate_file_name(file_name)?;

    fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    let json = serde_json::to_string_pretty(questions)?;
    fs::write(&path, json)?;
    Ok(path)
}

/// Enumerate persisted batches in `dir`.
///
/// Unreadable or invalid JSON files are skipped with a warning rather than
/// failing the whole listing. A missing directory counts as empty.
pub fn list_batches(dir: &Path) -> Result<Vec<BatchEntry>, AppError> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut entries = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !entry.file_type().is_file()
            || path.extension().and_then(|e| e.to_str()) != Some("json")
        {
            continue;
        }

        let name = entry.file_name().to_string_lossy().to_string();
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("skipping unreadable batch file {name}: {e}");
                continue;
            }
        };
        let questions: Vec<Question> = match serde_json::from_str(&content) {
            Ok(questions) => questions,
            Err(e) => {
                tracing::warn!("skipping invalid batch file {name}: {e}");
                continue;
            }
        };

        let exam_name = questions
            .first()
            .map(|q| q.exam_name.clone())
            .unwrap_or_else(|| "unknown".to_string());

        entries.push(BatchEntry {
            name,
            total: questions.len(),
            exam_name,
        });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

fn validate_file_name(file_name: &str) -> Result<(), AppError> {
    if file_name.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "file name must not be empty".to_string(),
        ));
    }
    if file_name.contains('/') || file_name.contains('\\') || file_name.contains("..") {
        return Err(AppError::InvalidInput(format!(
            "file name must not contain path components: {file_name}"
        )));
    }
    Ok(())
}
