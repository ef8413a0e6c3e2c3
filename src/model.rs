use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// One lettered answer option of a multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alternative {
    pub label: char,
    pub text: String,
}

/// A single extracted exam question.
///
/// Built once by the extractor and treated as a value afterwards;
/// `image` and `correct_answer` are filled in by later workflow steps,
/// never by the extractor itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub number: u32,
    pub exam_name: String,
    pub year: String,
    pub subject: String,
    pub source: String,
    pub statement: String,
    pub supporting_text: Option<String>,
    pub alternatives: Vec<Alternative>,
    pub image: Option<String>,
    pub correct_answer: Option<String>,
}

/// Exam-level metadata shared by every question of one extraction batch.
///
/// All fields are opaque strings copied verbatim into the questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamMetadata {
    pub exam_code: String,
    pub exam_name: String,
    pub year: String,
    pub subject: String,
    pub source: String,
}

impl ExamMetadata {
    /// Every field is required; blank values count as absent.
    pub fn validate(&self) -> Result<(), AppError> {
        let fields = [
            ("examCode", &self.exam_code),
            ("examName", &self.exam_name),
            ("year", &self.year),
            ("subject", &self.subject),
            ("source", &self.source),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(AppError::InvalidInput(format!(
                    "metadata field {name} is required"
                )));
            }
        }
        Ok(())
    }
}

/// Summary of one persisted batch file, as returned by the listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchEntry {
    pub name: String,
    pub total: usize,
    pub exam_name: String,
}
