//! Turns a raw block of exam text into structured question records.
//!
//! Everything here is a pure function of its inputs: no I/O, no logging,
//! no shared state. Parsing heuristics degrade to empty fields instead of
//! failing, since exam text in the wild is too irregular to abort a whole
//! batch over one malformed question.

use regex::Regex;

use crate::error::AppError;
use crate::model::{Alternative, ExamMetadata, Question};

/// Extract every question block from `raw_text`.
///
/// Text before the first question marker is treated as front matter and
/// discarded. Input with no markers at all yields an empty batch.
pub fn extract(raw_text: &str, metadata: &ExamMetadata) -> Result<Vec<Question>, AppError> {
    if raw_text.is_empty() {
        return Err(AppError::InvalidInput(
            "raw text must not be empty".to_string(),
        ));
    }
    metadata.validate()?;

    let text = normalize_keyword(raw_text);

    let marker = Regex::new(r"(?i)QUESTAO\s+(\d+)").unwrap();
    let markers: Vec<regex::Captures<'_>> = marker.captures_iter(&text).collect();

    let mut questions = Vec::new();
    for (i, caps) in markers.iter().enumerate() {
        let whole = caps.get(0).unwrap();
        let number: u32 = match caps[1].parse() {
            Ok(n) => n,
            // Degenerate digit runs (overflow) are skipped like empty blocks.
            Err(_) => continue,
        };

        let start = whole.end();
        let end = markers
            .get(i + 1)
            .map_or(text.len(), |next| next.get(0).unwrap().start());
        let content = &text[start..end];

        // Trailing keyword fragments produce empty blocks; skip them silently.
        if content.trim().is_empty() {
            continue;
        }

        questions.push(parse_question(number, content, metadata));
    }

    Ok(questions)
}

/// Collapse OCR variants of the question keyword into the canonical
/// `QUESTAO` token and trim outer whitespace.
fn normalize_keyword(raw: &str) -> String {
    let accented = Regex::new(r"(?i)questão").unwrap();
    let spaced = Regex::new(r"(?i)quest\s*ão").unwrap();

    let text = accented.replace_all(raw, "QUESTAO");
    let text = spaced.replace_all(&text, "QUESTAO");
    text.trim().to_string()
}

/// One alternative boundary inside a question block.
struct AlternativeBound {
    label: char,
    /// Byte offset where the boundary match starts (end of previous text).
    bound_start: usize,
    /// Byte offset where the alternative's own text starts.
    text_start: usize,
}

/// Locate alternative boundaries in a question block.
///
/// The primary rule anchors at line start so a stray capital letter
/// mid-sentence never splits the statement. OCR paste sometimes loses all
/// line breaks; when no line-anchored boundary exists at all, a stricter
/// inline rule applies that additionally requires a capitalized word after
/// the letter, leaving prose like "usa A e B" alone.
fn alternative_bounds(content: &str) -> Vec<AlternativeBound> {
    let line_anchored = Regex::new(r"(?m)^([A-E])\s+").unwrap();
    let mut bounds: Vec<AlternativeBound> = line_anchored
        .captures_iter(content)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            Some(AlternativeBound {
                label: caps[1].chars().next()?,
                bound_start: whole.start(),
                text_start: whole.end(),
            })
        })
        .collect();

    if bounds.is_empty() {
        let inline = Regex::new(r"(?:^|\s)([A-E])\s+(\p{Lu})").unwrap();
        bounds = inline
            .captures_iter(content)
            .filter_map(|caps| {
                let letter = caps.get(1)?;
                let word = caps.get(2)?;
                Some(AlternativeBound {
                    label: letter.as_str().chars().next()?,
                    bound_start: letter.start(),
                    text_start: word.start(),
                })
            })
            .collect();
    }

    bounds
}

/// Parse one question block into a record.
pub fn parse_question(number: u32, content: &str, metadata: &ExamMetadata) -> Question {
    let bounds = alternative_bounds(content);

    let statement_end = bounds.first().map_or(content.len(), |b| b.bound_start);
    let mut statement = content[..statement_end].trim().to_string();

    let mut alternatives = Vec::new();
    for (i, bound) in bounds.iter().enumerate() {
        let end = bounds
            .get(i + 1)
            .map_or(content.len(), |next| next.bound_start);
        let text = content[bound.text_start..end].trim();
        if text.is_empty() {
            continue;
        }
        alternatives.push(Alternative {
            label: bound.label,
            text: text.replace('\n', " ").trim().to_string(),
        });
    }

    let supporting_text = if detect_supporting_text(&statement) {
        let (support, residual) = split_supporting_text(&statement);
        statement = residual;
        // A marker at the very start leaves no passage before it.
        let support = clean_text(&support);
        (!support.is_empty()).then_some(support)
    } else {
        None
    };

    Question {
        id: format!("{}-q{:02}", metadata.exam_code, number),
        number,
        exam_name: metadata.exam_name.clone(),
        year: metadata.year.clone(),
        subject: metadata.subject.clone(),
        source: metadata.source.clone(),
        statement: clean_text(&statement),
        supporting_text,
        alternatives,
        image: None,
        correct_answer: None,
    }
}

/// True when the candidate statement carries a quoted passage
/// (poem, news excerpt, literary fragment) next to the prompt.
pub fn detect_supporting_text(text: &str) -> bool {
    let markers = [
        r"(?i)Disponível em:",
        r"(?i)Acesso em:",
        r"(?i)\(fragmento\)",
        r"(?i)\(adaptado\)",
    ];
    markers
        .iter()
        .any(|pattern| Regex::new(pattern).unwrap().is_match(text))
}

/// Split a candidate statement into `(supporting_text, statement)`.
///
/// Rules apply in priority order, first match wins:
/// 1. a citation marker or known author token: everything before its last
///    occurrence is the passage. The prompt sentence is not reliably
///    separable from the passage here, so the statement is left empty for
///    manual correction downstream.
/// 2. a trailing sentence starting with a capital and ending in `?` or `.`
///    becomes the statement, the rest the passage.
/// 3. otherwise the whole candidate is the passage.
pub fn split_supporting_text(text: &str) -> (String, String) {
    let citation = Regex::new(r"Disponível em:|ANGELOU|CISNEROS|ŽOLDOŠ").unwrap();
    if let Some(last) = citation.find_iter(text).last() {
        return (text[..last.start()].trim().to_string(), String::new());
    }

    let trailing_sentence = Regex::new(r"(?s)^(.*?)([A-Z].*?[?.])\s*$").unwrap();
    if let Some(caps) = trailing_sentence.captures(text) {
        return (caps[1].trim().to_string(), caps[2].trim().to_string());
    }

    (text.trim().to_string(), String::new())
}

/// Collapse whitespace runs to single spaces and newline runs to one,
/// then trim.
pub fn clean_text(text: &str) -> String {
    let spaces = Regex::new(r"\s+").unwrap();
    let newlines = Regex::new(r"\n+").unwrap();

    let text = spaces.replace_all(text, " ");
    let text = newlines.replace_all(&text, "\n");
    text.trim().to_string()
}
