//! Compares a structured resume against a job description.

use tracing::error;

use crate::evaluation::prompts::ATS_SCORE_PROMPT_TEMPLATE;
use crate::llm_client::{strip_json_fences, LlmError, TextGenerator};

pub fn build_score_prompt(resume_json: &str, job_description: &str) -> String {
    ATS_SCORE_PROMPT_TEMPLATE
        .replace("{resume_json}", resume_json)
        .replace("{job_description}", job_description)
}

/// Asks the model for `ats_score` and `missing_skills` and returns its fence-stripped output.
pub async fn calculate_ats_score(
    resume_json: &str,
    job_description: &str,
    llm: &dyn TextGenerator,
) -> Result<String, LlmError> {
    let prompt = build_score_prompt(resume_json, job_description);
    let raw = llm.generate(&prompt).await.map_err(|e| {
        error!("Error in calculate_ats_score: {e}");
        e
    })?;
    Ok(strip_json_fences(&raw).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::{Reply, ScriptedGenerator};

    #[test]
    fn test_prompt_embeds_resume_and_job_description() {
        let prompt = build_score_prompt(
            r#"{"full_name":"John Doe"}"#,
            "Looking for a Python developer with AWS experience",
        );
        assert!(prompt.contains("Resume JSON:\n        {\"full_name\":\"John Doe\"}"));
        assert!(prompt.contains(
            "Job Description:\n        Looking for a Python developer with AWS experience"
        ));
        assert!(prompt.contains("ats_score should be out of 100"));
        assert!(prompt.contains("\"missing_skills\": []"));
    }

    #[test]
    fn test_resume_is_substituted_before_job_description() {
        // A JD placeholder inside the resume JSON gets the JD too.
        let prompt = build_score_prompt("{job_description}", "JD");
        assert!(!prompt.contains("{job_description}"));
    }

    #[tokio::test]
    async fn test_calculate_ats_score_strips_fences() {
        let llm = ScriptedGenerator::new(vec![Reply::Text(
            "```json\n{\"ats_score\": 64, \"missing_skills\": [\"AWS\"]}\n```\n",
        )]);
        let out = calculate_ats_score("{}", "AWS role", &llm).await.unwrap();
        assert_eq!(out, "{\"ats_score\": 64, \"missing_skills\": [\"AWS\"]}");
    }

    #[tokio::test]
    async fn test_calculate_ats_score_surfaces_empty_content() {
        let llm = ScriptedGenerator::new(vec![]);
        let err = calculate_ats_score("{}", "AWS role", &llm).await.unwrap_err();
        assert!(matches!(err, LlmError::EmptyContent));
    }
}
