//! Mentor session prompts: the three probing questions and the feedback
//! on each answer.

use builderschool_observe::genai_attrs::{OP_MENTOR_FEEDBACK, OP_MENTOR_QUESTIONS};
use builderschool_types::plan::{MENTOR_QUESTION_COUNT, Refinement};

use super::{GenerationTemplate, join_features, parse_json, require_items};

const QUESTIONS_SYSTEM_PROMPT: &str = r#"You are a sharp startup mentor for a school student.
Generate exactly 3 targeted follow-up questions that expose real gaps in their thinking.

DO NOT ask generic questions like "Have you done market research?".
Make each question specific to this exact idea, targeting:
- Q1: How they will validate demand BEFORE building anything
- Q2: What makes this different from existing alternatives
- Q3: Who exactly will pay, how much, and why

Return ONLY a JSON array of exactly 3 strings. No markdown, no extra text.
Format: ["Question 1?", "Question 2?", "Question 3?"]"#;

const FEEDBACK_SYSTEM_PROMPT: &str = r#"You are a mentor giving honest feedback on a school student's startup answer.
Write exactly 3 sentences:
1. What is strong about their answer
2. The critical gap or weakness you see
3. One concrete next step they should take this week
Be direct. Do not sugarcoat. Write in prose, no bullet points."#;

pub struct MentorQuestionsPrompt<'a> {
    pub idea: &'a str,
    pub refinement: &'a Refinement,
}

impl GenerationTemplate for MentorQuestionsPrompt<'_> {
    type Output = Vec<String>;
    const OPERATION: &'static str = OP_MENTOR_QUESTIONS;
    const MAX_TOKENS: u32 = 400;

    fn system_prompt(&self) -> String {
        QUESTIONS_SYSTEM_PROMPT.to_string()
    }

    fn user_message(&self) -> String {
        format!(
            "Idea: {}\nProblem: {}\nTarget user: {}\nRevenue model: {}\nFeatures: {}",
            self.idea,
            self.refinement.problem_statement,
            self.refinement.target_user,
            self.refinement.revenue_model,
            join_features(&self.refinement.core_features)
        )
    }

    fn parse(&self, raw: &str) -> Result<Vec<String>, String> {
        let questions: Vec<String> = parse_json(raw)?;
        require_items("questions", &questions, MENTOR_QUESTION_COUNT)?;
        Ok(questions.into_iter().map(|q| q.trim().to_string()).collect())
    }
}

pub struct MentorFeedbackPrompt<'a> {
    pub idea: &'a str,
    pub question: &'a str,
    pub answer: &'a str,
}

impl GenerationTemplate for MentorFeedbackPrompt<'_> {
    type Output = String;
    const OPERATION: &'static str = OP_MENTOR_FEEDBACK;
    const MAX_TOKENS: u32 = 250;

    fn system_prompt(&self) -> String {
        FEEDBACK_SYSTEM_PROMPT.to_string()
    }

    fn user_message(&self) -> String {
        format!(
            "Startup: {}\nQuestion: {}\nStudent answer: {}",
            self.idea, self.question, self.answer
        )
    }

    /// Prose is kept as written; only surrounding whitespace goes.
    fn parse(&self, raw: &str) -> Result<String, String> {
        let feedback = raw.trim();
        if feedback.is_empty() {
            return Err("feedback is empty".to_string());
        }
        Ok(feedback.to_string())
    }
}
