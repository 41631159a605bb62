// src/prompt.rs
//! Instruction assembly for the completion request

const INSTRUCTION: &str = "Help a user to understand how to gain soft skills for their resume.";

/// Inputs of one prompt; every field is embedded verbatim.
#[derive(Debug, Clone, Copy)]
pub struct PromptInput<'a> {
    pub resume_text: &'a str,
    pub occupation: &'a str,
    pub skill_context: &'a str,
    pub question: &'a str,
}

/// Instruction, resume, skills for the occupation, then the user question.
///
/// Nothing is truncated or escaped, so very long resumes are forwarded as-is.
pub fn build_prompt(input: &PromptInput<'_>) -> String {
    format!(
        "{INSTRUCTION} Here is the resume:{resume}\n\
         Here are the skills required for the occupation '{occupation}':\n\
         {skills}\n\n\
         User question: {question}",
        resume = input.resume_text,
        occupation = input.occupation,
        skills = input.skill_context,
        question = input.question,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_input() -> PromptInput<'static> {
        PromptInput {
            resume_text: "5 years Python experience",
            occupation: "Software Engineer",
            skill_context: "Communication: High\nTeamwork: Medium",
            question: "What soft skills should I add?",
        }
    }

    #[test]
    fn test_exact_template() {
        assert_eq!(
            build_prompt(&sample_input()),
            "Help a user to understand how to gain soft skills for their resume. \
             Here is the resume:5 years Python experience\n\
             Here are the skills required for the occupation 'Software Engineer':\n\
             Communication: High\nTeamwork: Medium\n\n\
             User question: What soft skills should I add?"
        );
    }

    #[test]
    fn test_sections_appear_in_fixed_order() {
        let prompt = build_prompt(&sample_input());
        let instruction = prompt.find(INSTRUCTION).unwrap();
        let resume = prompt.find("5 years Python experience").unwrap();
        let skills = prompt.find("Communication: High\nTeamwork: Medium").unwrap();
        let occupation = prompt.find("'Software Engineer'").unwrap();
        let question = prompt.find("What soft skills should I add?").unwrap();

        assert!(instruction < resume);
        assert!(resume < occupation);
        assert!(occupation < skills);
        assert!(skills < question);
    }

    #[test]
    fn test_is_deterministic() {
        let input = sample_input();
        assert_eq!(build_prompt(&input), build_prompt(&input));
    }

    #[test]
    fn test_empty_resume_keeps_section() {
        let input = PromptInput {
            resume_text: "",
            ..sample_input()
        };
        let prompt = build_prompt(&input);
        assert!(prompt.contains("Here is the resume:\nHere are the skills"));
    }

    #[test]
    fn test_content_is_not_escaped_or_truncated() {
        let long_resume = "{braces} 'quotes' ".repeat(10_000);
        let input = PromptInput {
            resume_text: &long_resume,
            ..sample_input()
        };
        assert!(build_prompt(&input).contains(&long_resume));
    }
}
