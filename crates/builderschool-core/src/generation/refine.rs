//! Idea -> structured refinement.

use builderschool_observe::genai_attrs::OP_REFINE_IDEA;
use builderschool_types::plan::{FEATURE_COUNT, PLAN_DAYS, Refinement};
use builderschool_types::wizard::IdeaInput;

use super::{GenerationTemplate, parse_json, require_items, require_text};

pub struct RefinePrompt<'a> {
    pub input: &'a IdeaInput,
}

impl GenerationTemplate for RefinePrompt<'_> {
    type Output = Refinement;
    const OPERATION: &'static str = OP_REFINE_IDEA;
    const MAX_TOKENS: u32 = 1200;

    fn system_prompt(&self) -> String {
        format!(
            r#"You are an expert startup mentor for school students (classes 6-12).
Analyze the startup idea and return ONLY a valid JSON object.
No markdown, no code fences, no text before or after the JSON.

Return exactly this structure:
{{
  "problem_statement": "2-3 sentences describing the specific real-world problem",
  "target_user": "a named, specific user group (e.g. 'Class 9-10 students who miss assignment deadlines')",
  "core_features": [
    "Feature 1: specific and actionable",
    "Feature 2: specific and actionable",
    "Feature 3: specific and actionable"
  ],
  "revenue_model": "one simple, realistic revenue mechanism for a school-level startup",
  "five_day_plan": [
    {{"day": 1, "task": "specific task"}},
    {{"day": 2, "task": "specific task"}},
    {{"day": 3, "task": "specific task"}},
    {{"day": 4, "task": "specific task"}},
    {{"day": 5, "task": "specific task"}}
  ]
}}

Rules:
- Use language a Class {class} student understands, no jargon
- Be specific to THIS idea, not generic startup advice
- Output ONLY the JSON object, nothing else"#,
            class = self.input.student_class
        )
    }

    fn user_message(&self) -> String {
        format!(
            "Idea: {}\nType: {}\nClass: {}",
            self.input.idea, self.input.idea_type, self.input.student_class
        )
    }

    fn parse(&self, raw: &str) -> Result<Refinement, String> {
        let refinement: Refinement = parse_json(raw)?;
        validate_refinement(&refinement)?;
        Ok(refinement)
    }
}

/// Key set is enforced by deserialization; this checks counts and order.
pub fn validate_refinement(refinement: &Refinement) -> Result<(), String> {
    require_text("problem_statement", &refinement.problem_statement)?;
    require_text("target_user", &refinement.target_user)?;
    require_text("revenue_model", &refinement.revenue_model)?;
    require_items("core_features", &refinement.core_features, FEATURE_COUNT)?;

    if refinement.five_day_plan.len() != PLAN_DAYS {
        return Err(format!(
            "`five_day_plan` has {} entries, expected {PLAN_DAYS}",
            refinement.five_day_plan.len()
        ));
    }
    for (i, entry) in refinement.five_day_plan.iter().enumerate() {
        let expected = i + 1;
        if usize::from(entry.day) != expected {
            return Err(format!(
                "`five_day_plan[{i}].day` is {}, expected {expected}",
                entry.day
            ));
        }
        require_text(&format!("five_day_plan[{i}].task"), &entry.task)?;
    }
    Ok(())
}
