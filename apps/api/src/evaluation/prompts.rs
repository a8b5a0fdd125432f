// Prompt templates for the two model round trips.
// Their wording determines the shape of the model output, so treat them as part
// of the external contract: change them only together with the parsing side.

/// Resume structuring prompt. Replace `{text}` before sending.
pub const RESUME_STRUCTURE_PROMPT_TEMPLATE: &str = r#"
        Extract structured resume data from the following text. Return valid JSON only:

        {
            "full_name": "",
            "email": "",
            "github": "",
            "linkedin": "",
            "employment": "",
            "technical_skills": [],
            "phone": "",
            "address": "",
            "profile": ""
        }

        Resume Text:
        {text}
    "#;

/// ATS scoring prompt. Replace `{resume_json}` and `{job_description}` before sending.
pub const ATS_SCORE_PROMPT_TEMPLATE: &str = r#"
        Compare the resume JSON below with the job description. Return a JSON like (ats_score should be out of 100):
        {
            "ats_score": 0,
            "missing_skills": []
        }

        Resume JSON:
        {resume_json}

        Job Description:
        {job_description}
    "#;

/// Fields the structuring prompt asks for, in prompt order.
pub const RESUME_FIELDS: [&str; 9] = [
    "full_name",
    "email",
    "github",
    "linkedin",
    "employment",
    "technical_skills",
    "phone",
    "address",
    "profile",
];
