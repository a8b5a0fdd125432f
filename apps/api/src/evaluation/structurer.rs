//! Turns raw resume text into the nine-field JSON shape.

use tracing::error;

use crate::evaluation::prompts::RESUME_STRUCTURE_PROMPT_TEMPLATE;
use crate::llm_client::{strip_json_fences, LlmError, TextGenerator};

pub fn build_structure_prompt(resume_text: &str) -> String {
    RESUME_STRUCTURE_PROMPT_TEMPLATE.replace("{text}", resume_text)
}

/// Asks the model to structure `resume_text` and returns its fence-stripped output.
/// The output is expected, not guaranteed, to be JSON; callers validate it.
pub async fn structure_resume(
    resume_text: &str,
    llm: &dyn TextGenerator,
) -> Result<String, LlmError> {
    let prompt = build_structure_prompt(resume_text);
    let raw = llm.generate(&prompt).await.map_err(|e| {
        error!("Error in structure_resume: {e}");
        e
    })?;
    Ok(strip_json_fences(&raw).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::prompts::RESUME_FIELDS;
    use crate::llm_client::testing::{Reply, ScriptedGenerator};

    #[test]
    fn test_prompt_embeds_text_and_names_every_field() {
        let prompt = build_structure_prompt("Jane Roe\njane@example.com");
        assert!(prompt.contains("Resume Text:\n        Jane Roe\njane@example.com"));
        assert!(prompt.contains("Return valid JSON only"));
        for field in RESUME_FIELDS {
            assert!(prompt.contains(&format!("\"{field}\"")), "{field} missing");
        }
        assert!(!prompt.contains("{text}"));
    }

    #[tokio::test]
    async fn test_structure_resume_strips_fences() {
        let llm = ScriptedGenerator::new(vec![Reply::Text(
            "```json\n{\"full_name\": \"John Doe\"}\n```",
        )]);
        let out = structure_resume("John Doe", &llm).await.unwrap();
        assert_eq!(out, "{\"full_name\": \"John Doe\"}");
        assert_eq!(llm.prompts().len(), 1);
    }

    #[tokio::test]
    async fn test_structure_resume_passes_non_json_through() {
        let llm = ScriptedGenerator::new(vec![Reply::Text("Sorry, I can't help with that.")]);
        let out = structure_resume("John Doe", &llm).await.unwrap();
        assert_eq!(out, "Sorry, I can't help with that.");
    }

    #[tokio::test]
    async fn test_structure_resume_surfaces_provider_failure() {
        let llm = ScriptedGenerator::new(vec![Reply::Fail]);
        let err = structure_resume("John Doe", &llm).await.unwrap_err();
        assert!(matches!(err, LlmError::Api { status: 503, .. }));
    }
}
