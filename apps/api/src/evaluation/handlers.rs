//! Axum route handler for resume evaluation.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use bytes::Bytes;
use tracing::{error, info, warn};

use crate::errors::AppError;
use crate::evaluation::pipeline::{evaluate_resume, AtsReport};
use crate::extraction::extract_text;
use crate::state::AppState;

pub const DOCUMENT_FIELD: &str = "pdf_doc";
pub const JOB_DESCRIPTION_FIELD: &str = "job_description";
const DOCUMENT_EXTENSION: &str = ".pdf";

/// Uploaded resume file, consumed once by text extraction.
#[derive(Debug)]
pub struct UploadedDocument {
    pub file_name: String,
    pub bytes: Bytes,
}

/// The two inputs of `POST /process`, before validation.
#[derive(Debug, Default)]
pub struct ProcessForm {
    pub document: Option<UploadedDocument>,
    pub job_description: Option<String>,
}

impl ProcessForm {
    /// Applies the input guards in order and returns the validated pair.
    pub fn validate(self) -> Result<(UploadedDocument, String), AppError> {
        let document = self
            .document
            .ok_or_else(|| AppError::Validation("Resume PDF file not provided".to_string()))?;

        let job_description = match self.job_description {
            Some(jd) if !jd.trim().is_empty() => jd,
            _ => {
                error!("Error during processing: ");
                return Err(AppError::Validation("Job description not provided".to_string()));
            }
        };

        if !document.file_name.ends_with(DOCUMENT_EXTENSION) {
            return Err(AppError::Validation("Only PDF files are allowed".to_string()));
        }

        Ok((document, job_description))
    }
}

/// Reads the multipart body. Only file parts count as the document and the
/// first one wins; unknown fields are skipped.
pub async fn read_process_form(mut multipart: Multipart) -> Result<ProcessForm, AppError> {
    let mut form = ProcessForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| invalid_multipart(&e))?
    {
        let name = field.name().map(str::to_owned);
        let file_name = field.file_name().map(str::to_owned);
        match (name.as_deref(), file_name) {
            (Some(DOCUMENT_FIELD), Some(file_name)) if form.document.is_none() => {
                let bytes = field.bytes().await.map_err(|e| invalid_multipart(&e))?;
                form.document = Some(UploadedDocument { file_name, bytes });
            }
            (Some(JOB_DESCRIPTION_FIELD), _) => {
                let text = field.text().await.map_err(|e| invalid_multipart(&e))?;
                form.job_description = Some(text);
            }
            _ => {}
        }
    }

    Ok(form)
}

pub const INVALID_MULTIPART: &str = "Invalid multipart body";

fn invalid_multipart(e: &dyn std::fmt::Display) -> AppError {
    warn!("Failed to read multipart body: {e}");
    AppError::Validation(INVALID_MULTIPART.to_string())
}

/// POST /process
///
/// Extracts the resume text, structures it with the model, scores it against
/// the job description, and returns the score with the structured resume.
pub async fn handle_process(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AtsReport>, AppError> {
    let form = match multipart {
        Ok(multipart) => read_process_form(multipart).await?,
        // Not a multipart request at all: there is no file part to find.
        Err(_) => ProcessForm::default(),
    };
    let (document, job_description) = form.validate()?;

    info!(
        "Evaluating '{}' ({} bytes) against a {}-char job description",
        document.file_name,
        document.bytes.len(),
        job_description.len()
    );

    let bytes = document.bytes;
    let resume_text = tokio::task::spawn_blocking(move || extract_text(&bytes))
        .await
        .map_err(|e| {
            error!("PDF extraction task failed: {e}");
            AppError::Extraction
        })?;
    if resume_text.trim().is_empty() {
        return Err(AppError::Extraction);
    }

    let report = evaluate_resume(&resume_text, &job_description, state.llm.as_ref()).await?;
    Ok(Json(report))
}
