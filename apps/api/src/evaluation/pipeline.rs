//! Evaluation pipeline: structure → validate → score → validate → merge.
//!
//! Model output is parsed against an explicit shape at each stage. Output that
//! does not parse becomes `AppError::MalformedModelOutput`, which the caller
//! sees as a generic 500.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::evaluation::prompts::RESUME_FIELDS;
use crate::evaluation::scorer::calculate_ats_score;
use crate::evaluation::structurer::structure_resume;
use crate::llm_client::TextGenerator;

/// Structured resume as returned by the model. Only "must be a JSON object" is
/// enforced; missing or extra keys are kept as-is.
pub type StructuredResume = Map<String, Value>;

/// Scoring-stage output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtsScore {
    /// Intended range 0–100; not clamped.
    pub ats_score: Number,
    pub missing_skills: Vec<String>,
}

/// Response body of `POST /process`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtsReport {
    pub ats_score: Number,
    pub missing_skills: Vec<String>,
    pub resume_data: StructuredResume,
}

impl AtsScore {
    pub fn with_resume(self, resume_data: StructuredResume) -> AtsReport {
        AtsReport {
            ats_score: self.ats_score,
            missing_skills: self.missing_skills,
            resume_data,
        }
    }
}

pub fn parse_structured_resume(raw: &str) -> Result<StructuredResume, AppError> {
    serde_json::from_str(raw).map_err(|source| AppError::MalformedModelOutput {
        stage: "resume structuring",
        source,
    })
}

pub fn parse_ats_score(raw: &str) -> Result<AtsScore, AppError> {
    serde_json::from_str(raw).map_err(|source| AppError::MalformedModelOutput {
        stage: "ATS scoring",
        source,
    })
}

/// Expected fields the model left out. Informational only.
pub fn missing_resume_fields(resume: &StructuredResume) -> Vec<&'static str> {
    RESUME_FIELDS
        .iter()
        .copied()
        .filter(|field| !resume.contains_key(*field))
        .collect()
}

/// Runs both model round trips for one resume and merges the results.
pub async fn evaluate_resume(
    resume_text: &str,
    job_description: &str,
    llm: &dyn TextGenerator,
) -> Result<AtsReport, AppError> {
    let resume_raw = structure_resume(resume_text, llm)
        .await
        .map_err(AppError::Structuring)?;
    let resume_data = parse_structured_resume(&resume_raw)?;
    debug!("Structured resume with {} fields", resume_data.len());
    let missing = missing_resume_fields(&resume_data);
    if !missing.is_empty() {
        warn!("Structured resume is missing fields: {missing:?}");
    }

    let resume_json = serde_json::to_string(&resume_data).map_err(anyhow::Error::from)?;
    let score_raw = calculate_ats_score(&resume_json, job_description, llm)
        .await
        .map_err(AppError::Scoring)?;
    let score = parse_ats_score(&score_raw)?;
    info!(
        "ATS score {} with {} missing skills",
        score.ats_score,
        score.missing_skills.len()
    );

    Ok(score.with_resume(resume_data))
}
