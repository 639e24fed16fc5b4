//! Stage-four prompts: the readiness score and the improved blueprint.

use serde::Deserialize;

use builderschool_observe::genai_attrs::{OP_IMPROVED_BLUEPRINT, OP_READINESS_SCORE};
use builderschool_types::plan::{FEATURE_COUNT, ImprovedBlueprint, ReadinessScore, Refinement};

use super::{
    GenerationTemplate, answer_history, join_features, parse_json, require_items, require_text,
};

const SCORE_SYSTEM_PROMPT: &str = r#"You are evaluating a school student's startup idea after a mentor session.
Score it honestly. Return ONLY a valid JSON object, no markdown, no extra text.

Return exactly this structure:
{
  "problem_clarity": <integer 1-10>,
  "monetization_clarity": <integer 1-10>,
  "differentiation": <integer 1-10>,
  "student_feasibility": <integer 1-10>,
  "overall": <average of the four scores, rounded to 1 decimal>,
  "verdict": "2 honest sentences on where this idea stands",
  "biggest_strength": "one short phrase",
  "biggest_risk": "one short phrase"
}

Score the idea as it stands after the student's answers, not its potential."#;

const BLUEPRINT_SYSTEM_PROMPT: &str = r#"You are a startup mentor producing an improved version of a school student's idea.
Use what the student said in the mentor session and fix the weakest area.
Return ONLY a valid JSON object, no markdown, no extra text.

Return exactly this structure:
{
  "improved_name": "a short, catchy product name",
  "refined_problem": "2 sentences, sharper than the original",
  "pivot_or_sharpen": "one sentence: did the idea pivot or get sharper, and how",
  "updated_features": ["feature 1", "feature 2", "feature 3"],
  "stronger_revenue_model": "one realistic revenue mechanism",
  "key_improvement": "the single most important change, in one sentence"
}"#;

pub struct ReadinessScorePrompt<'a> {
    pub idea: &'a str,
    pub refinement: &'a Refinement,
    pub answers: &'a [String],
    pub responses: &'a [String],
}

/// Model-side shape. Sub-scores may arrive as `7.0`; `overall` is not read.
#[derive(Deserialize)]
struct RawScore {
    problem_clarity: f64,
    monetization_clarity: f64,
    differentiation: f64,
    student_feasibility: f64,
    verdict: String,
    biggest_strength: String,
    biggest_risk: String,
}

fn sub_score(field: &str, value: f64) -> Result<u8, String> {
    let min = f64::from(ReadinessScore::MIN_SUB_SCORE);
    let max = f64::from(ReadinessScore::MAX_SUB_SCORE);
    if value.fract() != 0.0 || !(min..=max).contains(&value) {
        return Err(format!("`{field}` is {value}, expected an integer 1-10"));
    }
    Ok(value as u8)
}

impl GenerationTemplate for ReadinessScorePrompt<'_> {
    type Output = ReadinessScore;
    const OPERATION: &'static str = OP_READINESS_SCORE;
    const MAX_TOKENS: u32 = 500;

    fn system_prompt(&self) -> String {
        SCORE_SYSTEM_PROMPT.to_string()
    }

    fn user_message(&self) -> String {
        format!(
            "Startup: {}\nProblem: {}\nTarget user: {}\nRevenue model: {}\nFeatures: {}\n\nStudent's mentor session answers:\n{}",
            self.idea,
            self.refinement.problem_statement,
            self.refinement.target_user,
            self.refinement.revenue_model,
            join_features(&self.refinement.core_features),
            answer_history(self.answers, self.responses)
        )
    }

    /// The reported `overall` is ignored and recomputed from the sub-scores.
    fn parse(&self, raw: &str) -> Result<ReadinessScore, String> {
        let parsed: RawScore = parse_json(raw)?;
        let scores = [
            sub_score("problem_clarity", parsed.problem_clarity)?,
            sub_score("monetization_clarity", parsed.monetization_clarity)?,
            sub_score("differentiation", parsed.differentiation)?,
            sub_score("student_feasibility", parsed.student_feasibility)?,
        ];
        require_text("verdict", &parsed.verdict)?;
        require_text("biggest_strength", &parsed.biggest_strength)?;
        require_text("biggest_risk", &parsed.biggest_risk)?;

        Ok(ReadinessScore {
            problem_clarity: scores[0],
            monetization_clarity: scores[1],
            differentiation: scores[2],
            student_feasibility: scores[3],
            overall: ReadinessScore::overall_from(scores),
            verdict: parsed.verdict,
            biggest_strength: parsed.biggest_strength,
            biggest_risk: parsed.biggest_risk,
        })
    }
}

pub struct BlueprintPrompt<'a> {
    pub idea: &'a str,
    pub refinement: &'a Refinement,
    pub answers: &'a [String],
    pub responses: &'a [String],
    /// Weakest area from the readiness score.
    pub biggest_risk: &'a str,
}

impl BlueprintPrompt<'_> {
    fn insights(&self) -> String {
        self.answers
            .iter()
            .zip(self.responses)
            .enumerate()
            .map(|(i, (answer, feedback))| {
                format!("Q{} - Student said: {answer} | Mentor noted: {feedback}\n", i + 1)
            })
            .collect()
    }
}

impl GenerationTemplate for BlueprintPrompt<'_> {
    type Output = ImprovedBlueprint;
    const OPERATION: &'static str = OP_IMPROVED_BLUEPRINT;
    const MAX_TOKENS: u32 = 800;

    fn system_prompt(&self) -> String {
        BLUEPRINT_SYSTEM_PROMPT.to_string()
    }

    fn user_message(&self) -> String {
        format!(
            "Original idea: {}\nOriginal problem: {}\nOriginal features: {}\nOriginal revenue: {}\n\nMentor session insights:\n{}\n\nWeakest area (from scoring): {}",
            self.idea,
            self.refinement.problem_statement,
            join_features(&self.refinement.core_features),
            self.refinement.revenue_model,
            self.insights(),
            self.biggest_risk
        )
    }

    fn parse(&self, raw: &str) -> Result<ImprovedBlueprint, String> {
        let blueprint: ImprovedBlueprint = parse_json(raw)?;
        require_text("improved_name", &blueprint.improved_name)?;
        require_text("refined_problem", &blueprint.refined_problem)?;
        require_text("pivot_or_sharpen", &blueprint.pivot_or_sharpen)?;
        require_items("updated_features", &blueprint.updated_features, FEATURE_COUNT)?;
        require_text("stronger_revenue_model", &blueprint.stronger_revenue_model)?;
        require_text("key_improvement", &blueprint.key_improvement)?;
        Ok(blueprint)
    }
}
