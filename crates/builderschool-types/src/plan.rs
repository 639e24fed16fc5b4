//! Generated plan artifacts: refinement, readiness score, improved
//! blueprint, and prototype.
//!
//! Every type here is produced by one generation step and stored on the
//! [`crate::session::WizardSession`]. Shapes match the JSON the model is
//! asked to return, so they double as the export format.

use serde::{Deserialize, Serialize};

use crate::wizard::IdeaType;

/// Number of features a refinement or blueprint must list.
pub const FEATURE_COUNT: usize = 3;

/// Number of days in the action plan.
pub const PLAN_DAYS: usize = 5;

/// Number of mentor questions per session.
pub const MENTOR_QUESTION_COUNT: usize = 3;

/// Structured elaboration of a raw idea.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Refinement {
    pub problem_statement: String,
    pub target_user: String,
    pub core_features: Vec<String>,
    pub revenue_model: String,
    pub five_day_plan: Vec<PlanDay>,
}

/// One entry of the five-day action plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanDay {
    pub day: u8,
    pub task: String,
}

/// Four-dimension evaluation of the idea after the mentor session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadinessScore {
    pub problem_clarity: u8,
    pub monetization_clarity: u8,
    pub differentiation: u8,
    pub student_feasibility: u8,
    pub overall: f64,
    pub verdict: String,
    pub biggest_strength: String,
    pub biggest_risk: String,
}

impl ReadinessScore {
    pub const MIN_SUB_SCORE: u8 = 1;
    pub const MAX_SUB_SCORE: u8 = 10;

    /// Mean of the four sub-scores rounded half-up to one decimal.
    ///
    /// Sub-scores are integers, so the exact mean is a multiple of 0.25 and
    /// the rounding is done in integer tenths (6.25 -> 6.3, 6.75 -> 6.8).
    pub fn overall_from(sub_scores: [u8; 4]) -> f64 {
        let sum: u32 = sub_scores.iter().map(|&s| u32::from(s)).sum();
        let tenths = (sum * 25 + 5) / 10;
        f64::from(tenths) / 10.0
    }

    pub fn sub_scores(&self) -> [u8; 4] {
        [
            self.problem_clarity,
            self.monetization_clarity,
            self.differentiation,
            self.student_feasibility,
        ]
    }

    /// Labelled sub-scores in display order.
    pub fn dimensions(&self) -> [(&'static str, u8); 4] {
        [
            ("Problem Clarity", self.problem_clarity),
            ("Monetization", self.monetization_clarity),
            ("Differentiation", self.differentiation),
            ("Feasibility", self.student_feasibility),
        ]
    }
}

/// Colour band for a score out of ten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Strong,
    Moderate,
    Weak,
}

impl ScoreBand {
    pub fn of(score: f64) -> Self {
        if score >= 8.0 {
            ScoreBand::Strong
        } else if score >= 6.0 {
            ScoreBand::Moderate
        } else {
            ScoreBand::Weak
        }
    }
}

/// Mentor-informed second version of the idea.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImprovedBlueprint {
    pub improved_name: String,
    pub refined_problem: String,
    pub pivot_or_sharpen: String,
    pub updated_features: Vec<String>,
    pub stronger_revenue_model: String,
    pub key_improvement: String,
}

/// The final generated deliverable. Its text shape depends on the idea type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrototypeArtifact {
    pub idea_type: IdeaType,
    pub code: String,
}

impl PrototypeArtifact {
    /// Download file name.
    pub fn file_name(&self) -> &'static str {
        match self.idea_type {
            IdeaType::AppOrWebsite => "landing_page.html",
            IdeaType::AiTool => "ai_tool.py",
            IdeaType::Marketplace => "marketplace_scaffold.txt",
        }
    }

    /// MIME type for the download.
    pub fn content_type(&self) -> &'static str {
        match self.idea_type {
            IdeaType::AppOrWebsite => "text/html; charset=utf-8",
            IdeaType::AiTool | IdeaType::Marketplace => "text/plain; charset=utf-8",
        }
    }

    /// Highlighting hint for the whole artifact.
    pub fn language(&self) -> &'static str {
        match self.idea_type {
            IdeaType::AppOrWebsite => "html",
            IdeaType::AiTool | IdeaType::Marketplace => "python",
        }
    }

    /// Landing pages can be rendered in place.
    pub fn has_live_preview(&self) -> bool {
        self.idea_type == IdeaType::AppOrWebsite
    }

    /// Shell commands that start the generated tool locally.
    pub fn run_instructions(&self) -> Option<&'static str> {
        match self.idea_type {
            IdeaType::AiTool => Some("pip install streamlit groq && streamlit run ai_tool.py"),
            IdeaType::AppOrWebsite | IdeaType::Marketplace => None,
        }
    }
}

/// One headed section of a marketplace prototype.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrototypeSection {
    pub header: String,
    pub language: String,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overall_rounds_half_up_to_one_decimal() {
        assert_eq!(ReadinessScore::overall_from([7, 6, 5, 8]), 6.5);
        assert_eq!(ReadinessScore::overall_from([7, 6, 6, 6]), 6.3);
        assert_eq!(ReadinessScore::overall_from([7, 7, 7, 6]), 6.8);
        assert_eq!(ReadinessScore::overall_from([10, 10, 10, 10]), 10.0);
        assert_eq!(ReadinessScore::overall_from([1, 1, 1, 2]), 1.3);
    }

    #[test]
    fn overall_matches_mean_for_every_combination() {
        for a in 1..=10u8 {
            for b in 1..=10u8 {
                for c in [1u8, 4, 9] {
                    for d in [2u8, 5, 10] {
                        let mean = f64::from(u32::from(a) + u32::from(b) + u32::from(c) + u32::from(d)) / 4.0;
                        let overall = ReadinessScore::overall_from([a, b, c, d]);
                        assert!((overall - mean).abs() <= 0.05 + 1e-9, "{a},{b},{c},{d}");
                        assert!(overall >= mean, "rounding must not go down at .x5");
                    }
                }
            }
        }
    }

    #[test]
    fn score_band_thresholds() {
        assert_eq!(ScoreBand::of(8.0), ScoreBand::Strong);
        assert_eq!(ScoreBand::of(7.9), ScoreBand::Moderate);
        assert_eq!(ScoreBand::of(6.0), ScoreBand::Moderate);
        assert_eq!(ScoreBand::of(5.9), ScoreBand::Weak);
    }

    #[test]
    fn prototype_file_names_follow_idea_type() {
        let html = PrototypeArtifact {
            idea_type: IdeaType::AppOrWebsite,
            code: "<!DOCTYPE html>".to_string(),
        };
        assert_eq!(html.file_name(), "landing_page.html");
        assert!(html.content_type().starts_with("text/html"));
        assert!(html.has_live_preview());
        assert_eq!(html.run_instructions(), None);

        let tool = PrototypeArtifact {
            idea_type: IdeaType::AiTool,
            code: String::new(),
        };
        assert_eq!(tool.file_name(), "ai_tool.py");
        assert!(!tool.has_live_preview());
        assert!(tool.run_instructions().unwrap().contains("streamlit run ai_tool.py"));

        let market = PrototypeArtifact {
            idea_type: IdeaType::Marketplace,
            code: String::new(),
        };
        assert_eq!(market.file_name(), "marketplace_scaffold.txt");
        assert!(market.content_type().starts_with("text/plain"));
        assert!(!market.has_live_preview());
        assert_eq!(market.run_instructions(), None);
    }

    #[test]
    fn refinement_deserializes_from_model_shape() {
        let json = r#"{
            "problem_statement": "Students miss tutors before exams.",
            "target_user": "Class 9-10 students",
            "core_features": ["a", "b", "c"],
            "revenue_model": "Per-session fee",
            "five_day_plan": [{"day": 1, "task": "Interview 10 students"}]
        }"#;
        let refinement: Refinement = serde_json::from_str(json).unwrap();
        assert_eq!(refinement.core_features.len(), 3);
        assert_eq!(refinement.five_day_plan[0].day, 1);
    }
}
