//! Boundary validation for request bodies.
//!
//! Raw bodies deserialize into option-heavy request structs; validation turns
//! them into fully-populated profile/submission types or a typed error. Nothing
//! downstream of this module ever sees an unvalidated field.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const GRADE_MAX: usize = 100;
pub const INTERESTS_MAX: usize = 2000;
pub const ACTIVITIES_MAX: usize = 2000;
pub const DEMOGRAPHICS_MAX: usize = 1000;
pub const TESTING_MAX: usize = 1000;
pub const COLLEGE_GOALS_MAX: usize = 1000;
pub const CLASSES_MAX: usize = 2000;
pub const LOCATION_MAX: usize = 500;

pub const ESSAY_PROMPT_MAX: usize = 2000;
pub const ESSAY_BODY_MAX: usize = 20_000;
pub const PROGRAM_MAX: usize = 500;
pub const FEEDBACK_MAX: usize = 2000;

const GPA_MIN: f64 = 0.0;
const GPA_MAX: f64 = 5.0;
const WORD_LIMIT_MAX: u32 = 10_000;

/// Validation failure kinds. Stringified into the 400 response body;
/// tests match on the variant rather than the message text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Field '{field}' must be a number")]
    InvalidFormat { field: &'static str },

    #[error("Field '{field}' must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
    },

    #[error("Field '{field}' exceeds maximum length of {limit} characters")]
    FieldTooLong { field: &'static str, limit: usize },
}

/// GPA arrives as a JSON number from API clients and as a string from the
/// original web form. Both shapes are accepted and parsed identically.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawGpa {
    Number(f64),
    Text(String),
}

/// Raw body of `POST /generate`. Field aliases match the original web client.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GenerateRequest {
    pub grade: Option<String>,
    pub gpa: Option<RawGpa>,
    pub interests: Option<String>,
    pub activities: Option<String>,
    #[serde(alias = "demographic")]
    pub demographics: Option<String>,
    pub testing: Option<String>,
    #[serde(alias = "collegeGoals")]
    pub college_goals: Option<String>,
    pub classes: Option<String>,
    pub location: Option<String>,
}

/// A validated student profile. Optional fields default to empty strings.
#[derive(Debug, Clone, Serialize)]
pub struct StudentProfile {
    pub grade: String,
    pub gpa: f64,
    pub interests: String,
    pub activities: String,
    pub demographics: String,
    pub testing: String,
    pub college_goals: String,
    pub classes: String,
    pub location: String,
}

/// Raw body of `POST /essay`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EssayRequest {
    pub grade: Option<String>,
    pub prompt: Option<String>,
    pub essay: Option<String>,
    pub program: Option<String>,
    pub word_limit: Option<u32>,
}

/// A validated essay submission.
#[derive(Debug, Clone, Serialize)]
pub struct EssaySubmission {
    pub grade: String,
    pub prompt: String,
    pub essay: String,
    pub program: String,
    pub word_limit: Option<u32>,
}

pub fn validate_profile(req: &GenerateRequest) -> Result<StudentProfile, ValidationError> {
    let grade = required_field(&req.grade, "grade")?;
    check_length("grade", &grade, GRADE_MAX)?;

    let gpa = parse_gpa(req.gpa.as_ref())?;

    let interests = required_field(&req.interests, "interests")?;
    check_length("interests", &interests, INTERESTS_MAX)?;

    let activities = optional_field(&req.activities);
    check_length("activities", &activities, ACTIVITIES_MAX)?;

    let demographics = optional_field(&req.demographics);
    check_length("demographics", &demographics, DEMOGRAPHICS_MAX)?;

    let testing = optional_field(&req.testing);
    check_length("testing", &testing, TESTING_MAX)?;

    let college_goals = optional_field(&req.college_goals);
    check_length("college_goals", &college_goals, COLLEGE_GOALS_MAX)?;

    let classes = optional_field(&req.classes);
    check_length("classes", &classes, CLASSES_MAX)?;

    let location = optional_field(&req.location);
    check_length("location", &location, LOCATION_MAX)?;

    Ok(StudentProfile {
        grade,
        gpa,
        interests,
        activities,
        demographics,
        testing,
        college_goals,
        classes,
        location,
    })
}

pub fn validate_essay(req: &EssayRequest) -> Result<EssaySubmission, ValidationError> {
    let grade = required_field(&req.grade, "grade")?;
    check_length("grade", &grade, GRADE_MAX)?;

    let prompt = required_field(&req.prompt, "prompt")?;
    check_length("prompt", &prompt, ESSAY_PROMPT_MAX)?;

    let essay = required_field(&req.essay, "essay")?;
    check_length("essay", &essay, ESSAY_BODY_MAX)?;

    let program = required_field(&req.program, "program")?;
    check_length("program", &program, PROGRAM_MAX)?;

    if let Some(limit) = req.word_limit {
        if limit == 0 || limit > WORD_LIMIT_MAX {
            return Err(ValidationError::OutOfRange {
                field: "word_limit",
                min: 1.0,
                max: WORD_LIMIT_MAX as f64,
            });
        }
    }

    Ok(EssaySubmission {
        grade,
        prompt,
        essay,
        program,
        word_limit: req.word_limit,
    })
}

fn parse_gpa(raw: Option<&RawGpa>) -> Result<f64, ValidationError> {
    let value = match raw {
        Some(RawGpa::Number(n)) => *n,
        Some(RawGpa::Text(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Err(ValidationError::MissingField("gpa"));
            }
            trimmed
                .parse::<f64>()
                .map_err(|_| ValidationError::InvalidFormat { field: "gpa" })?
        }
        None => return Err(ValidationError::MissingField("gpa")),
    };

    if !value.is_finite() {
        return Err(ValidationError::InvalidFormat { field: "gpa" });
    }
    if !(GPA_MIN..=GPA_MAX).contains(&value) {
        return Err(ValidationError::OutOfRange {
            field: "gpa",
            min: GPA_MIN,
            max: GPA_MAX,
        });
    }
    Ok(value)
}

/// The field must be present and non-blank. Returns the value verbatim,
/// untrimmed; only the emptiness check ignores surrounding whitespace.
pub fn required_field(
    value: &Option<String>,
    field: &'static str,
) -> Result<String, ValidationError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.clone()),
        _ => Err(ValidationError::MissingField(field)),
    }
}

fn optional_field(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

/// Length ceilings count characters, not bytes.
pub fn check_length(
    field: &'static str,
    value: &str,
    limit: usize,
) -> Result<(), ValidationError> {
    if value.chars().count() > limit {
        return Err(ValidationError::FieldTooLong { field, limit });
    }
    Ok(())
}
