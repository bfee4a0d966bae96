// Prompt builders for the feedback endpoints.
// Resume text and questions are embedded verbatim; nothing is trimmed or escaped.

use crate::feedback::checklists::{career_checklist, RESUME_CHECKLIST};
use crate::llm_client::prompts::{
    CAREER_ADVISOR_SYSTEM, CAREER_ASSISTANT_SYSTEM, RESUME_EVALUATOR_SYSTEM,
};
use crate::llm_client::Prompt;

/// Generic checklist evaluation of a resume.
pub fn resume_evaluation(resume_text: &str) -> Prompt {
    Prompt {
        system: RESUME_EVALUATOR_SYSTEM.to_string(),
        user: format!("{RESUME_CHECKLIST}\n\nResume Text:\n{resume_text}"),
    }
}

/// Skill review against the checklist for `career_path`.
/// Unknown paths still produce a prompt, carrying the not-found placeholder.
pub fn career_path_evaluation(career_path: &str, resume_text: &str) -> Prompt {
    let checklist = career_checklist(career_path);
    Prompt {
        system: CAREER_ADVISOR_SYSTEM.to_string(),
        user: format!("Career path: {career_path}\n\n{checklist}\n\nResume Text:\n{resume_text}"),
    }
}

/// Free-form question, passed through unmodified.
pub fn question(question: &str) -> Prompt {
    Prompt {
        system: CAREER_ASSISTANT_SYSTEM.to_string(),
        user: question.to_string(),
    }
}
