//! Image upload storage.
//!
//! Files land in the content directory under a `<timestamp>-<original name>`
//! name, which is collision-free by construction. Association with a
//! question record is the caller's responsibility.

use std::fs;
use std::path::Path;

use chrono::Utc;

use crate::error::AppError;

/// Where an uploaded image ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    pub file_name: String,
    /// Public path the frontend can reference, e.g. `/images/<file_name>`.
    pub path: String,
}

/// Persist uploaded image bytes under `dir`.
pub fn store_image(dir: &Path, original_name: &str, data: &[u8]) -> Result<StoredImage, AppError> {
    // Strip any client-supplied directory components.
    let base = Path::new(original_name)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| AppError::InvalidInput("missing image file name".to_string()))?;

    fs::create_dir_all(dir)?;

    let file_name = format!("{}-{}", Utc::now().timestamp_millis(), base);
    fs::write(dir.join(&file_name), data)?;

    Ok(StoredImage {
        path: format!("/images/{file_name}"),
        file_name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_file_with_timestamp_prefix() {
        let temp = tempfile::tempdir().unwrap();
        let stored = store_image(temp.path(), "grafico.png", b"fake png").unwrap();

        assert!(stored.file_name.ends_with("-grafico.png"));
        assert_eq!(stored.path, format!("/images/{}", stored.file_name));

        let on_disk = fs::read(temp.path().join(&stored.file_name)).unwrap();
        assert_eq!(on_disk, b"fake png");
    }

    #[test]
    fn strips_directory_components_from_name() {
        let temp = tempfile::tempdir().unwrap();
        let stored = store_image(temp.path(), "../../etc/passwd.png", b"x").unwrap();
        assert!(stored.file_name.ends_with("-passwd.png"));
        assert!(!stored.file_name.contains('/'));
    }

    #[test]
    fn rejects_empty_name() {
        let temp = tempfile::tempdir().unwrap();
        let err = store_image(temp.path(), "", b"x").unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn repeated_uploads_do_not_collide() {
        let temp = tempfile::tempdir().unwrap();
        let first = store_image(temp.path(), "img.png", b"1").unwrap();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = store_image(temp.path(), "img.png", b"2").unwrap();
        assert_ne!(first.file_name, second.file_name);
    }
}
