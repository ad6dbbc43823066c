// Prompt text for resume tailoring.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::llm_client::prompts::{EMPTY_DEFAULTS_INSTRUCTION, JSON_ONLY_INSTRUCTION};

/// Target schema, restated verbatim in both the system message and the prompt.
pub const TAILOR_SCHEMA: &str = r#"{
  "matched_skills": ["skill1", "skill2"],
  "missing_skills": ["skill1", "skill2"],
  "improved_bullets": ["bullet1", "bullet2"],
  "cover_letter": "cover letter text (150-200 words)",
  "match_score": 0
}"#;

/// System message for the tailoring assistant.
pub fn tailor_system() -> String {
    format!(
        "You are an AI Resume Tailoring Assistant. Given a job description and a resume, \
         {JSON_ONLY_INSTRUCTION}\n\n\
         Output SCHEMA (exact keys and types):\n\
         {TAILOR_SCHEMA}\n\
         match_score is an integer from 0 to 100.\n\n\
         {EMPTY_DEFAULTS_INSTRUCTION}"
    )
}

/// Builds the user prompt. Both inputs are embedded verbatim.
pub fn tailor_prompt(job_description: &str, resume_text: &str) -> String {
    format!(
        "JOB DESCRIPTION:\n\
         {job_description}\n\n\
         RESUME:\n\
         {resume_text}\n\n\
         Remember: Return ONLY a single valid JSON object EXACTLY matching the schema below \
         (no extra explanation). \"match_score\" must be an integer between 0 and 100.\n\n\
         {TAILOR_SCHEMA}\n"
    )
}
