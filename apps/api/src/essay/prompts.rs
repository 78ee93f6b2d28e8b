//! Prompt constants and the essay-feedback prompt builder.

use crate::validation::EssaySubmission;

/// System prompt for essay grading. Feedback is narrative prose, not JSON.
pub const ESSAY_SYSTEM: &str =
    "You are a college admissions coach giving supportive and constructive \
    feedback on student essays. The student may be a first-generation applicant \
    or from an underrepresented background, so prioritize encouragement and \
    clarity. Respond in plain text.";

const ESSAY_PROMPT_TEMPLATE: &str = r#"A student has submitted a college application essay for feedback.

Here is the prompt they are responding to:
{prompt}

They are applying to:
{program}

The student's grade level is: {grade}

{word_limit_note}Here is their essay:
{essay}

Provide feedback focused on:
- Clarity of ideas
- Storytelling and emotional impact
- Structure and organization
- Grammar and sentence fluency
- How well it answers the prompt
- What could be improved, and what is strong
- A final grade and closing thoughts

Be specific, and don't be afraid to make the feedback long; the more detailed and attentive, the better. Use a warm, helpful tone and speak directly to the student (for example, "One thing you're doing well is..." or "You might consider..."). Be clear, actionable, and encouraging, but also realistic and critical when necessary so the student gets the most benefit.

End with "Grade: [score out of 100]" and invite the student to resubmit after changes to see the new grade. Also note that this advice should be taken with a grain of salt; they do not need to take suggestions that don't work for them."#;

/// Renders the essay-feedback prompt. Pure and deterministic; submission
/// fields are interpolated verbatim.
pub fn build_essay_prompt(submission: &EssaySubmission) -> String {
    let word_limit_note = match submission.word_limit {
        Some(limit) => format!(
            "The essay must stay within {limit} words, so weigh structural suggestions against that limit.\n\n"
        ),
        None => String::new(),
    };

    ESSAY_PROMPT_TEMPLATE
        .replace("{word_limit_note}", &word_limit_note)
        .replace("{prompt}", &submission.prompt)
        .replace("{program}", &submission.program)
        .replace("{grade}", &submission.grade)
        .replace("{essay}", &submission.essay)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission() -> EssaySubmission {
        EssaySubmission {
            grade: "12th".to_string(),
            prompt: "Describe a challenge you overcame.".to_string(),
            essay: "When I was fifteen, my family moved across the country...".to_string(),
            program: "State University CS".to_string(),
            word_limit: None,
        }
    }

    #[test]
    fn test_prompt_is_deterministic() {
        assert_eq!(build_essay_prompt(&submission()), build_essay_prompt(&submission()));
    }

    #[test]
    fn test_prompt_interpolates_submission() {
        let prompt = build_essay_prompt(&submission());
        assert!(prompt.contains("Describe a challenge you overcame."));
        assert!(prompt.contains("State University CS"));
        assert!(prompt.contains("12th"));
        assert!(prompt.contains("my family moved across the country"));
    }

    #[test]
    fn test_word_limit_note_present_when_set() {
        let mut s = submission();
        s.word_limit = Some(650);
        assert!(build_essay_prompt(&s).contains("within 650 words"));
    }

    #[test]
    fn test_word_limit_note_absent_when_unset() {
        assert!(!build_essay_prompt(&submission()).contains("must stay within"));
    }
}
