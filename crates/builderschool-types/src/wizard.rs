//! Wizard vocabulary: stages, idea inputs, and the actions that move a
//! session between stages.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The five ordered steps of the wizard.
///
/// Serialized as its step number (1-5) so exported sessions read
/// `"stage_reached": 3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Stage {
    IdeaInput = 1,
    Refinement = 2,
    MentorSession = 3,
    ScoreAndBlueprint = 4,
    Prototype = 5,
}

impl Stage {
    pub const ALL: [Stage; 5] = [
        Stage::IdeaInput,
        Stage::Refinement,
        Stage::MentorSession,
        Stage::ScoreAndBlueprint,
        Stage::Prototype,
    ];

    pub fn number(self) -> u8 {
        self as u8
    }

    /// Short label for the step tracker.
    pub fn label(self) -> &'static str {
        match self {
            Stage::IdeaInput => "Idea Input",
            Stage::Refinement => "Refinement",
            Stage::MentorSession => "Mentor Session",
            Stage::ScoreAndBlueprint => "Score & Blueprint",
            Stage::Prototype => "Prototype",
        }
    }

    /// Heading shown above the active step.
    pub fn title(self) -> &'static str {
        match self {
            Stage::IdeaInput => "Step 1: Your Idea",
            Stage::Refinement => "Step 2: Idea Refinement",
            Stage::MentorSession => "Step 3: Mentor Session",
            Stage::ScoreAndBlueprint => "Step 4: Score & Improved Blueprint",
            Stage::Prototype => "Step 5: Your Prototype",
        }
    }

    /// Fraction of the progress bar filled while this step is active.
    pub fn progress(self) -> f32 {
        match self {
            Stage::IdeaInput => 0.1,
            Stage::Refinement => 0.35,
            Stage::MentorSession => 0.6,
            Stage::ScoreAndBlueprint => 0.8,
            Stage::Prototype => 1.0,
        }
    }
}

impl From<Stage> for u8 {
    fn from(stage: Stage) -> Self {
        stage.number()
    }
}

impl TryFrom<u8> for Stage {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Stage::IdeaInput),
            2 => Ok(Stage::Refinement),
            3 => Ok(Stage::MentorSession),
            4 => Ok(Stage::ScoreAndBlueprint),
            5 => Ok(Stage::Prototype),
            other => Err(format!("invalid stage: {other} (expected 1-5)")),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.number(), self.label())
    }
}

/// Kind of product the student wants to build. Decides the prototype shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdeaType {
    #[serde(rename = "App or Website", alias = "app_or_website")]
    AppOrWebsite,
    #[serde(rename = "AI Tool", alias = "ai_tool")]
    AiTool,
    #[serde(rename = "Marketplace", alias = "marketplace")]
    Marketplace,
}

impl IdeaType {
    pub const ALL: [IdeaType; 3] = [IdeaType::AppOrWebsite, IdeaType::AiTool, IdeaType::Marketplace];

    pub fn as_str(self) -> &'static str {
        match self {
            IdeaType::AppOrWebsite => "App or Website",
            IdeaType::AiTool => "AI Tool",
            IdeaType::Marketplace => "Marketplace",
        }
    }
}

impl fmt::Display for IdeaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdeaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "app or website" | "app_or_website" | "app" | "website" => Ok(IdeaType::AppOrWebsite),
            "ai tool" | "ai_tool" | "ai" => Ok(IdeaType::AiTool),
            "marketplace" => Ok(IdeaType::Marketplace),
            other => Err(format!("invalid idea type: '{other}'")),
        }
    }
}

/// School class of the student, "6" through "12".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct StudentClass(u8);

impl StudentClass {
    pub const MIN: u8 = 6;
    pub const MAX: u8 = 12;

    pub fn new(class: u8) -> Result<Self, String> {
        if (Self::MIN..=Self::MAX).contains(&class) {
            Ok(Self(class))
        } else {
            Err(format!(
                "invalid class: {class} (expected {}-{})",
                Self::MIN,
                Self::MAX
            ))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Every selectable class in ascending order.
    pub fn choices() -> impl Iterator<Item = StudentClass> {
        (Self::MIN..=Self::MAX).map(StudentClass)
    }
}

impl Default for StudentClass {
    fn default() -> Self {
        Self(Self::MAX)
    }
}

impl fmt::Display for StudentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for StudentClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let class: u8 = s
            .trim()
            .parse()
            .map_err(|_| format!("invalid class: '{s}'"))?;
        Self::new(class)
    }
}

impl From<StudentClass> for String {
    fn from(class: StudentClass) -> Self {
        class.to_string()
    }
}

impl TryFrom<String> for StudentClass {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// What the student typed on the first step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdeaInput {
    pub idea: String,
    pub student_class: StudentClass,
    pub idea_type: IdeaType,
}

/// A user-triggered wizard control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardAction {
    SubmitIdea,
    ChangeIdea,
    StartMentorSession,
    AnswerQuestion,
    RestartQa,
    BackToRefinement,
    SeeEvaluation,
    BackToMentor,
    GeneratePrototype,
    StartOver,
}

impl WizardAction {
    /// Button caption used by both front ends.
    pub fn caption(self) -> &'static str {
        match self {
            WizardAction::SubmitIdea => "Refine My Idea",
            WizardAction::ChangeIdea => "Change Idea",
            WizardAction::StartMentorSession => "Start Mentor Session",
            WizardAction::AnswerQuestion => "Submit Answer",
            WizardAction::RestartQa => "Restart Q&A",
            WizardAction::BackToRefinement => "Back to Refinement",
            WizardAction::SeeEvaluation => "See Score & Improved Blueprint",
            WizardAction::BackToMentor => "Back to Mentor",
            WizardAction::GeneratePrototype => "Generate Prototype",
            WizardAction::StartOver => "Start Over with a New Idea",
        }
    }
}

impl fmt::Display for WizardAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WizardAction::SubmitIdea => "submit_idea",
            WizardAction::ChangeIdea => "change_idea",
            WizardAction::StartMentorSession => "start_mentor_session",
            WizardAction::AnswerQuestion => "answer_question",
            WizardAction::RestartQa => "restart_qa",
            WizardAction::BackToRefinement => "back_to_refinement",
            WizardAction::SeeEvaluation => "see_evaluation",
            WizardAction::BackToMentor => "back_to_mentor",
            WizardAction::GeneratePrototype => "generate_prototype",
            WizardAction::StartOver => "start_over",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_serializes_as_number() {
        assert_eq!(serde_json::to_string(&Stage::MentorSession).unwrap(), "3");
        let stage: Stage = serde_json::from_str("5").unwrap();
        assert_eq!(stage, Stage::Prototype);
        assert!(serde_json::from_str::<Stage>("6").is_err());
        assert!(serde_json::from_str::<Stage>("0").is_err());
    }

    #[test]
    fn stage_progress_is_monotonic() {
        let progress: Vec<f32> = Stage::ALL.iter().map(|s| s.progress()).collect();
        assert!(progress.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(Stage::Prototype.progress(), 1.0);
    }

    #[test]
    fn idea_type_uses_display_strings_on_the_wire() {
        assert_eq!(
            serde_json::to_string(&IdeaType::AppOrWebsite).unwrap(),
            "\"App or Website\""
        );
        let parsed: IdeaType = serde_json::from_str("\"AI Tool\"").unwrap();
        assert_eq!(parsed, IdeaType::AiTool);
        let aliased: IdeaType = serde_json::from_str("\"marketplace\"").unwrap();
        assert_eq!(aliased, IdeaType::Marketplace);
    }

    #[test]
    fn idea_type_from_str() {
        assert_eq!("app or website".parse::<IdeaType>().unwrap(), IdeaType::AppOrWebsite);
        assert_eq!("AI Tool".parse::<IdeaType>().unwrap(), IdeaType::AiTool);
        assert!("game".parse::<IdeaType>().is_err());
    }

    #[test]
    fn student_class_bounds() {
        assert!(StudentClass::new(5).is_err());
        assert!(StudentClass::new(13).is_err());
        assert_eq!(StudentClass::new(9).unwrap().get(), 9);
        assert_eq!(StudentClass::default().to_string(), "12");
        assert_eq!(StudentClass::choices().count(), 7);
    }

    #[test]
    fn student_class_serializes_as_string() {
        let class = StudentClass::new(9).unwrap();
        assert_eq!(serde_json::to_string(&class).unwrap(), "\"9\"");
        let parsed: StudentClass = serde_json::from_str("\"10\"").unwrap();
        assert_eq!(parsed.get(), 10);
        assert!(serde_json::from_str::<StudentClass>("\"4\"").is_err());
    }

    #[test]
    fn wizard_action_serde_matches_display() {
        for action in [
            WizardAction::SubmitIdea,
            WizardAction::RestartQa,
            WizardAction::SeeEvaluation,
            WizardAction::StartOver,
        ] {
            let json = serde_json::to_string(&action).unwrap();
            assert_eq!(json, format!("\"{action}\""));
        }
    }
}
