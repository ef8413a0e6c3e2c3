pub mod config;
pub mod error;
pub mod extractor;
pub mod model;
pub mod server;
pub mod storage;
pub mod upload;

pub use config::Config;
pub use error::AppError;
pub use extractor::extract;
pub use model::{Alternative, BatchEntry, ExamMetadata, Question};
pub use server::{router, AppState};
