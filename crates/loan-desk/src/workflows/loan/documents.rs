//! Identity document capture.
//!
//! Text extraction is advisory. Whatever an extractor reads from a captured image is only a
//! suggestion: a number typed by the applicant always wins, and nothing here gates the loan
//! decision.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Aadhaar,
    Pan,
    IncomeProof,
}

impl DocumentKind {
    pub const fn label(self) -> &'static str {
        match self {
            DocumentKind::Aadhaar => "Aadhaar",
            DocumentKind::Pan => "PAN",
            DocumentKind::IncomeProof => "Income proof",
        }
    }

    /// Canonical form of a document number, or an error when the shape is wrong.
    pub fn normalize(self, raw: &str) -> Result<String, DocumentError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DocumentError::MissingNumber { kind: self });
        }

        let malformed = || DocumentError::MalformedNumber {
            kind: self,
            value: trimmed.to_string(),
        };

        match self {
            DocumentKind::Aadhaar => {
                let digits: String = trimmed.chars().filter(|c| !c.is_whitespace()).collect();
                if digits.len() != 12 || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
                    return Err(malformed());
                }
                Ok(format!(
                    "{} {} {}",
                    &digits[0..4],
                    &digits[4..8],
                    &digits[8..12]
                ))
            }
            DocumentKind::Pan => {
                let upper = trimmed.to_ascii_uppercase();
                let chars: Vec<char> = upper.chars().collect();
                if chars.len() != 10 || pan_at(&chars, 0).is_none() {
                    return Err(malformed());
                }
                Ok(upper)
            }
            DocumentKind::IncomeProof => Ok(trimmed.to_string()),
        }
    }
}

/// Best-effort fields read from a captured document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedFields {
    pub detected_kind: Option<DocumentKind>,
    pub document_number: Option<String>,
    pub name: Option<String>,
    pub date_of_birth: Option<String>,
}

pub trait DocumentExtractor: Send + Sync {
    fn extract(&self, kind: DocumentKind, text: &str) -> ExtractedFields;
}

/// Pattern scan over OCR text for Aadhaar and PAN cards.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternExtractor;

impl PatternExtractor {
    /// Guess the card type from marker phrases and number shapes. Ties favour Aadhaar.
    pub fn detect_kind(text: &str) -> Option<DocumentKind> {
        let lower = text.to_ascii_lowercase();
        let has = |marker: &str| lower.contains(marker);

        let aadhaar_score = [
            find_aadhaar_number(text).is_some(),
            has("government of india"),
            has("aadhaar"),
            has("unique identification"),
            has("uid"),
        ]
        .into_iter()
        .filter(|hit| *hit)
        .count();

        let pan_score = [
            find_pan_number(text).is_some(),
            has("income tax"),
            has("permanent account"),
            has("pan"),
        ]
        .into_iter()
        .filter(|hit| *hit)
        .count();

        if aadhaar_score > 0 && aadhaar_score >= pan_score {
            Some(DocumentKind::Aadhaar)
        } else if pan_score > 0 {
            Some(DocumentKind::Pan)
        } else {
            None
        }
    }
}

impl DocumentExtractor for PatternExtractor {
    fn extract(&self, kind: DocumentKind, text: &str) -> ExtractedFields {
        let document_number = match kind {
            DocumentKind::Aadhaar => find_aadhaar_number(text),
            DocumentKind::Pan => find_pan_number(text),
            DocumentKind::IncomeProof => None,
        };

        ExtractedFields {
            detected_kind: Self::detect_kind(text),
            document_number,
            name: labelled_value(text, &["name"]),
            date_of_birth: labelled_value(text, &["dob", "date of birth", "year of birth"]),
        }
    }
}

/// Stand-in for the kiosk camera flow, which always "reads" the same demo cards.
#[derive(Debug, Clone, Copy, Default)]
pub struct CannedScanner;

pub const CANNED_AADHAAR_NUMBER: &str = "0000 1111 2222";
pub const CANNED_PAN_NUMBER: &str = "ABCDE1234F";

impl DocumentExtractor for CannedScanner {
    fn extract(&self, kind: DocumentKind, _text: &str) -> ExtractedFields {
        let document_number = match kind {
            DocumentKind::Aadhaar => Some(CANNED_AADHAAR_NUMBER.to_string()),
            DocumentKind::Pan => Some(CANNED_PAN_NUMBER.to_string()),
            DocumentKind::IncomeProof => None,
        };

        ExtractedFields {
            detected_kind: Some(kind),
            document_number,
            ..ExtractedFields::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceSource {
    Manual,
    Extracted,
}

/// Document number accepted for an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentEvidence {
    pub kind: DocumentKind,
    pub number: String,
    pub source: EvidenceSource,
    /// Set when a manual entry disagrees with what extraction suggested.
    pub extraction_mismatch: bool,
    /// Set when the captured text looks like a different kind of card.
    #[serde(default)]
    pub kind_mismatch: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracted_name: Option<String>,
}

impl DocumentEvidence {
    pub fn resolve(
        kind: DocumentKind,
        extracted: ExtractedFields,
        manual_entry: Option<&str>,
    ) -> Result<Self, DocumentError> {
        let suggested = extracted
            .document_number
            .as_deref()
            .and_then(|raw| kind.normalize(raw).ok());

        let manual = manual_entry.filter(|entry| !entry.trim().is_empty());
        let (number, source) = match manual {
            Some(entry) => (kind.normalize(entry)?, EvidenceSource::Manual),
            None => match &suggested {
                Some(number) => (number.clone(), EvidenceSource::Extracted),
                None => return Err(DocumentError::MissingNumber { kind }),
            },
        };

        let extraction_mismatch = source == EvidenceSource::Manual
            && suggested.as_ref().is_some_and(|value| *value != number);
        let kind_mismatch = extracted
            .detected_kind
            .is_some_and(|detected| detected != kind);

        Ok(Self {
            kind,
            number,
            source,
            extraction_mismatch,
            kind_mismatch,
            extracted_name: extracted.name,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentError {
    #[error("{} number is required", .kind.label())]
    MissingNumber { kind: DocumentKind },
    #[error("'{value}' is not a valid {} number", .kind.label())]
    MalformedNumber { kind: DocumentKind, value: String },
}

fn find_aadhaar_number(text: &str) -> Option<String> {
    let chars: Vec<char> = text.chars().collect();
    (0..chars.len()).find_map(|start| aadhaar_at(&chars, start))
}

// Three groups of four digits, each group optionally preceded by one whitespace character.
fn aadhaar_at(chars: &[char], start: usize) -> Option<String> {
    let mut pos = start;
    let mut digits = String::with_capacity(14);

    for group in 0..3 {
        if group > 0 {
            digits.push(' ');
            if chars.get(pos).is_some_and(|c| c.is_whitespace()) {
                pos += 1;
            }
        }
        for _ in 0..4 {
            let c = *chars.get(pos)?;
            if !c.is_ascii_digit() {
                return None;
            }
            digits.push(c);
            pos += 1;
        }
    }

    Some(digits)
}

fn find_pan_number(text: &str) -> Option<String> {
    let chars: Vec<char> = text.chars().collect();
    (0..chars.len()).find_map(|start| pan_at(&chars, start))
}

// Five letters, four digits, one letter; letters matched case-insensitively.
fn pan_at(chars: &[char], start: usize) -> Option<String> {
    let window = chars.get(start..start + 10)?;
    let shape_ok = window.iter().enumerate().all(|(idx, c)| match idx {
        0..=4 | 9 => c.is_ascii_alphabetic(),
        _ => c.is_ascii_digit(),
    });

    shape_ok.then(|| window.iter().map(|c| c.to_ascii_uppercase()).collect())
}

fn labelled_value(text: &str, labels: &[&str]) -> Option<String> {
    text.lines().find_map(|line| {
        let lower = line.to_ascii_lowercase();
        let (start, label) = labels
            .iter()
            .filter_map(|label| lower.find(label).map(|idx| (idx, *label)))
            .min_by_key(|(idx, _)| *idx)?;

        let rest = line[start + label.len()..].trim_start();
        let rest = rest.strip_prefix(':').unwrap_or(rest).trim();
        (!rest.is_empty()).then(|| rest.to_string())
    })
}
