//! The wizard service: one method per student action.
//!
//! Generating actions follow the same order: check the guard, run the
//! generation(s), then commit through [`WizardSessionExt`]. Any error
//! returns before the commit, so the session is left untouched.

use tracing::info;

use builderschool_types::error::WizardError;
use builderschool_types::plan::Refinement;
use builderschool_types::session::WizardSession;
use builderschool_types::wizard::{IdeaInput, WizardAction};

use crate::generation::{
    BlueprintPrompt, MentorFeedbackPrompt, MentorQuestionsPrompt, PrototypePrompt,
    ReadinessScorePrompt, RefinePrompt, generate,
};
use crate::llm::client::CompletionClient;

use super::state::WizardSessionExt;

pub struct WizardService {
    client: CompletionClient,
}

/// Input and refinement, which every step after the first depends on.
fn prerequisites(
    session: &WizardSession,
    action: WizardAction,
) -> Result<(&IdeaInput, &Refinement), WizardError> {
    match (&session.input, &session.refinement) {
        (Some(input), Some(refinement)) => Ok((input, refinement)),
        _ => Err(WizardError::InvalidTransition {
            action,
            stage: session.stage,
        }),
    }
}

impl WizardService {
    pub fn new(client: CompletionClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &CompletionClient {
        &self.client
    }

    /// Stage 1 -> 2: refine the idea.
    #[tracing::instrument(
        name = "submit_idea",
        skip(self, session, input),
        fields(session_id = %session.session_id, idea_type = %input.idea_type)
    )]
    pub async fn submit_idea(
        &self,
        session: &mut WizardSession,
        input: IdeaInput,
    ) -> Result<(), WizardError> {
        session.ensure_action(WizardAction::SubmitIdea)?;
        let idea = input.idea.trim();
        if idea.is_empty() {
            return Err(WizardError::Validation("idea must not be empty".to_string()));
        }
        let input = IdeaInput {
            idea: idea.to_string(),
            ..input
        };

        let refinement = generate(&self.client, &RefinePrompt { input: &input }).await?;
        session.commit_idea(input, refinement);
        info!(stage = %session.stage, "idea refined");
        Ok(())
    }

    /// Stage 2 -> 3: generate the mentor questions.
    #[tracing::instrument(
        name = "start_mentor_session",
        skip(self, session),
        fields(session_id = %session.session_id)
    )]
    pub async fn start_mentor_session(&self, session: &mut WizardSession) -> Result<(), WizardError> {
        session.ensure_action(WizardAction::StartMentorSession)?;
        let (input, refinement) = prerequisites(session, WizardAction::StartMentorSession)?;

        let questions = generate(
            &self.client,
            &MentorQuestionsPrompt {
                idea: &input.idea,
                refinement,
            },
        )
        .await?;
        session.commit_mentor_questions(questions);
        info!("mentor session started");
        Ok(())
    }

    /// Stage 3: answer the current question and record the mentor's feedback.
    #[tracing::instrument(
        name = "answer_question",
        skip(self, session, answer),
        fields(
            session_id = %session.session_id,
            question_index = session.current_question_index(),
        )
    )]
    pub async fn answer_question(
        &self,
        session: &mut WizardSession,
        answer: &str,
    ) -> Result<(), WizardError> {
        session.ensure_action(WizardAction::AnswerQuestion)?;
        let answer = answer.trim();
        if answer.is_empty() {
            return Err(WizardError::Validation("answer must not be empty".to_string()));
        }
        let (input, _) = prerequisites(session, WizardAction::AnswerQuestion)?;
        let question = session
            .current_question()
            .ok_or(WizardError::InvalidTransition {
                action: WizardAction::AnswerQuestion,
                stage: session.stage,
            })?;

        let feedback = generate(
            &self.client,
            &MentorFeedbackPrompt {
                idea: &input.idea,
                question,
                answer,
            },
        )
        .await?;
        session.commit_answer(answer.to_string(), feedback);
        info!(answered = session.current_question_index(), "answer recorded");
        Ok(())
    }

    /// Stage 3 -> 4: score the idea, then build the improved blueprint.
    ///
    /// Both are committed together; a blueprint failure discards the score.
    #[tracing::instrument(
        name = "see_evaluation",
        skip(self, session),
        fields(session_id = %session.session_id)
    )]
    pub async fn see_evaluation(&self, session: &mut WizardSession) -> Result<(), WizardError> {
        session.ensure_action(WizardAction::SeeEvaluation)?;
        let (input, refinement) = prerequisites(session, WizardAction::SeeEvaluation)?;

        let score = generate(
            &self.client,
            &ReadinessScorePrompt {
                idea: &input.idea,
                refinement,
                answers: &session.mentor_answers,
                responses: &session.mentor_responses,
            },
        )
        .await?;
        let blueprint = generate(
            &self.client,
            &BlueprintPrompt {
                idea: &input.idea,
                refinement,
                answers: &session.mentor_answers,
                responses: &session.mentor_responses,
                biggest_risk: &score.biggest_risk,
            },
        )
        .await?;

        info!(overall = score.overall, name = %blueprint.improved_name, "evaluation ready");
        session.commit_evaluation(score, blueprint);
        Ok(())
    }

    /// Stage 4 -> 5: generate the prototype for the idea type.
    #[tracing::instrument(
        name = "generate_prototype",
        skip(self, session),
        fields(session_id = %session.session_id)
    )]
    pub async fn generate_prototype(&self, session: &mut WizardSession) -> Result<(), WizardError> {
        session.ensure_action(WizardAction::GeneratePrototype)?;
        let (input, refinement) = prerequisites(session, WizardAction::GeneratePrototype)?;

        let prototype = generate(
            &self.client,
            &PrototypePrompt {
                idea: &input.idea,
                idea_type: input.idea_type,
                refinement,
            },
        )
        .await?;
        info!(file_name = prototype.file_name(), bytes = prototype.code.len(), "prototype ready");
        session.commit_prototype(prototype);
        Ok(())
    }

    /// Stage 2 -> 1, discarding everything.
    pub fn change_idea(&self, session: &mut WizardSession) -> Result<(), WizardError> {
        session.ensure_action(WizardAction::ChangeIdea)?;
        session.full_reset();
        info!(session_id = %session.session_id, "idea discarded");
        Ok(())
    }

    pub fn restart_qa(&self, session: &mut WizardSession) -> Result<(), WizardError> {
        session.ensure_action(WizardAction::RestartQa)?;
        session.restart_qa();
        Ok(())
    }

    pub fn back_to_refinement(&self, session: &mut WizardSession) -> Result<(), WizardError> {
        session.ensure_action(WizardAction::BackToRefinement)?;
        session.back_to_refinement();
        Ok(())
    }

    pub fn back_to_mentor(&self, session: &mut WizardSession) -> Result<(), WizardError> {
        session.ensure_action(WizardAction::BackToMentor)?;
        session.back_to_mentor();
        Ok(())
    }

    /// Stage 5 -> 1, discarding everything.
    pub fn start_over(&self, session: &mut WizardSession) -> Result<(), WizardError> {
        session.ensure_action(WizardAction::StartOver)?;
        session.full_reset();
        info!(session_id = %session.session_id, "session restarted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::PrototypeArtifactExt;
    use crate::llm::box_provider::BoxLlmProvider;
    use crate::test_support::{
        BLUEPRINT_JSON, FEEDBACK_TEXT, MARKETPLACE_TEXT, QUESTIONS_JSON, REFINEMENT_JSON,
        SCORE_JSON, ScriptedLlmProvider,
    };
    use builderschool_types::llm::LlmError;
    use builderschool_types::wizard::{IdeaType, Stage, StudentClass};

    fn service(provider: &ScriptedLlmProvider) -> WizardService {
        WizardService::new(CompletionClient::new(
            BoxLlmProvider::new(provider.clone()),
            "llama-3.3-70b-versatile",
        ))
    }

    fn tutor_input(idea_type: IdeaType) -> IdeaInput {
        IdeaInput {
            idea: "  tutor-matching app ".to_string(),
            student_class: StudentClass::new(9).unwrap(),
            idea_type,
        }
    }

    /// Drive a session up to stage 4 with canned replies.
    async fn session_at_evaluation(
        provider: &ScriptedLlmProvider,
        svc: &WizardService,
        idea_type: IdeaType,
    ) -> WizardSession {
        provider.push_text(REFINEMENT_JSON);
        provider.push_text(QUESTIONS_JSON);
        for _ in 0..3 {
            provider.push_text(FEEDBACK_TEXT);
        }
        provider.push_text(SCORE_JSON);
        provider.push_text(BLUEPRINT_JSON);

        let mut session = WizardSession::new();
        svc.submit_idea(&mut session, tutor_input(idea_type)).await.unwrap();
        svc.start_mentor_session(&mut session).await.unwrap();
        for answer in ["Survey 20 classmates", "Seniors who just took the exam", "Parents"] {
            svc.answer_question(&mut session, answer).await.unwrap();
        }
        svc.see_evaluation(&mut session).await.unwrap();
        session
    }

    #[tokio::test]
    async fn tutor_idea_refines_into_three_features_and_five_days() {
        let provider = ScriptedLlmProvider::new();
        provider.push_text(&format!("```json\n{REFINEMENT_JSON}\n```"));
        let svc = service(&provider);
        let mut session = WizardSession::new();

        svc.submit_idea(&mut session, tutor_input(IdeaType::AppOrWebsite))
            .await
            .unwrap();

        assert_eq!(session.stage, Stage::Refinement);
        assert_eq!(session.input.as_ref().unwrap().idea, "tutor-matching app");
        let refinement = session.refinement.as_ref().unwrap();
        assert_eq!(refinement.core_features.len(), 3);
        let days: Vec<u8> = refinement.five_day_plan.iter().map(|d| d.day).collect();
        assert_eq!(days, vec![1, 2, 3, 4, 5]);

        let request = &provider.requests()[0];
        assert_eq!(request.max_tokens, 1200);
        assert_eq!(request.temperature, 0.7);
        assert_eq!(
            request.prompt,
            "Idea: tutor-matching app\nType: App or Website\nClass: 9"
        );
    }

    #[tokio::test]
    async fn auth_failure_leaves_session_at_stage_one() {
        let provider = ScriptedLlmProvider::new();
        provider.push_error(LlmError::AuthenticationFailed);
        let svc = service(&provider);
        let mut session = WizardSession::new();

        let err = svc
            .submit_idea(&mut session, tutor_input(IdeaType::AppOrWebsite))
            .await
            .unwrap_err();

        assert!(matches!(err, WizardError::Auth(_)));
        assert_eq!(session.stage, Stage::IdeaInput);
        assert!(session.input.is_none());
        assert!(session.refinement.is_none());
    }

    #[tokio::test]
    async fn malformed_refinement_keeps_raw_text() {
        let provider = ScriptedLlmProvider::new();
        provider.push_text("Great idea! Let me think about it.");
        let svc = service(&provider);
        let mut session = WizardSession::new();

        let err = svc
            .submit_idea(&mut session, tutor_input(IdeaType::AiTool))
            .await
            .unwrap_err();
        assert_eq!(err.raw_output(), Some("Great idea! Let me think about it."));
        assert_eq!(session.stage, Stage::IdeaInput);
    }

    #[tokio::test]
    async fn empty_idea_is_rejected_without_a_call() {
        let provider = ScriptedLlmProvider::new();
        let svc = service(&provider);
        let mut session = WizardSession::new();
        let input = IdeaInput {
            idea: "   ".to_string(),
            student_class: StudentClass::default(),
            idea_type: IdeaType::Marketplace,
        };

        let err = svc.submit_idea(&mut session, input).await.unwrap_err();
        assert!(matches!(err, WizardError::Validation(_)));
        assert!(provider.requests().is_empty());
    }

    #[tokio::test]
    async fn answers_advance_the_question_index() {
        let provider = ScriptedLlmProvider::new();
        provider.push_text(REFINEMENT_JSON);
        provider.push_text(QUESTIONS_JSON);
        let svc = service(&provider);
        let mut session = WizardSession::new();
        svc.submit_idea(&mut session, tutor_input(IdeaType::AppOrWebsite))
            .await
            .unwrap();
        svc.start_mentor_session(&mut session).await.unwrap();

        for expected in 0..3 {
            assert_eq!(session.current_question_index(), expected);
            assert!(matches!(
                svc.see_evaluation(&mut session).await,
                Err(WizardError::InvalidTransition { .. })
            ));
            provider.push_text(FEEDBACK_TEXT);
            svc.answer_question(&mut session, "my answer").await.unwrap();
            assert_eq!(session.mentor_responses.len(), expected + 1);
        }
        assert_eq!(session.current_question_index(), 3);
        assert!(session.available_actions().contains(&WizardAction::SeeEvaluation));

        let feedback_request = provider.requests().last().cloned().unwrap();
        assert_eq!(feedback_request.max_tokens, 250);
        assert!(feedback_request.prompt.contains("Question: Who pays"));
    }

    #[tokio::test]
    async fn failed_feedback_does_not_record_the_answer() {
        let provider = ScriptedLlmProvider::new();
        provider.push_text(REFINEMENT_JSON);
        provider.push_text(QUESTIONS_JSON);
        provider.push_error(LlmError::RateLimited("tokens per minute".into()));
        let svc = service(&provider);
        let mut session = WizardSession::new();
        svc.submit_idea(&mut session, tutor_input(IdeaType::AppOrWebsite))
            .await
            .unwrap();
        svc.start_mentor_session(&mut session).await.unwrap();

        let err = svc.answer_question(&mut session, "answer").await.unwrap_err();
        assert!(matches!(err, WizardError::RateLimited(_)));
        assert!(session.mentor_answers.is_empty());
        assert!(session.mentor_responses.is_empty());
    }

    #[tokio::test]
    async fn evaluation_recomputes_overall_and_feeds_risk_to_blueprint() {
        let provider = ScriptedLlmProvider::new();
        let svc = service(&provider);
        let session = session_at_evaluation(&provider, &svc, IdeaType::AppOrWebsite).await;

        assert_eq!(session.stage, Stage::ScoreAndBlueprint);
        assert_eq!(session.readiness_score.as_ref().unwrap().overall, 6.3);
        assert_eq!(session.improved_blueprint.as_ref().unwrap().improved_name, "ExamEve");

        let blueprint_request = provider.requests().last().cloned().unwrap();
        assert_eq!(blueprint_request.max_tokens, 800);
        assert!(blueprint_request
            .prompt
            .ends_with("Weakest area (from scoring): Differentiation from free help from classmates"));
    }

    #[tokio::test]
    async fn blueprint_failure_discards_score() {
        let provider = ScriptedLlmProvider::new();
        provider.push_text(REFINEMENT_JSON);
        provider.push_text(QUESTIONS_JSON);
        for _ in 0..3 {
            provider.push_text(FEEDBACK_TEXT);
        }
        provider.push_text(SCORE_JSON);
        provider.push_error(LlmError::Overloaded("503 Service Unavailable".to_string()));
        let svc = service(&provider);
        let mut session = WizardSession::new();
        svc.submit_idea(&mut session, tutor_input(IdeaType::AppOrWebsite))
            .await
            .unwrap();
        svc.start_mentor_session(&mut session).await.unwrap();
        for _ in 0..3 {
            svc.answer_question(&mut session, "answer").await.unwrap();
        }

        let err = svc.see_evaluation(&mut session).await.unwrap_err();
        assert!(matches!(err, WizardError::ServiceUnavailable(_)));
        assert_eq!(session.stage, Stage::MentorSession);
        assert!(session.readiness_score.is_none());
    }

    #[tokio::test]
    async fn marketplace_prototype_has_three_sections() {
        let provider = ScriptedLlmProvider::new();
        let svc = service(&provider);
        let mut session = session_at_evaluation(&provider, &svc, IdeaType::Marketplace).await;
        provider.push_text(MARKETPLACE_TEXT);

        svc.generate_prototype(&mut session).await.unwrap();

        assert_eq!(session.stage, Stage::Prototype);
        let prototype = session.prototype.as_ref().unwrap();
        assert_eq!(prototype.file_name(), "marketplace_scaffold.txt");
        let sections = prototype.sections();
        assert_eq!(sections.len(), 3);
        assert!(sections.iter().all(|s| !s.body.is_empty()));
        assert_eq!(provider.requests().last().unwrap().max_tokens, 3500);
    }

    #[tokio::test]
    async fn start_over_resets_everything() {
        let provider = ScriptedLlmProvider::new();
        let svc = service(&provider);
        let mut session = session_at_evaluation(&provider, &svc, IdeaType::AiTool).await;
        provider.push_text("# ====\n# AI TOOL: ExamEve\nimport streamlit as st\n");
        svc.generate_prototype(&mut session).await.unwrap();

        svc.start_over(&mut session).unwrap();

        assert_eq!(session.stage, Stage::IdeaInput);
        assert!(session.input.is_none());
        assert!(session.refinement.is_none());
        assert!(session.mentor_questions.is_none());
        assert!(session.readiness_score.is_none());
        assert!(session.prototype.is_none());
        assert_eq!(provider.remaining(), 0);
    }

    #[tokio::test]
    async fn navigation_guards_reject_wrong_stage() {
        let provider = ScriptedLlmProvider::new();
        provider.push_text(REFINEMENT_JSON);
        let svc = service(&provider);
        let mut session = WizardSession::new();

        assert!(svc.back_to_mentor(&mut session).is_err());
        assert!(svc.start_over(&mut session).is_err());

        svc.submit_idea(&mut session, tutor_input(IdeaType::AppOrWebsite))
            .await
            .unwrap();
        assert!(svc.restart_qa(&mut session).is_err());
        assert!(matches!(
            svc.generate_prototype(&mut session).await,
            Err(WizardError::InvalidTransition { .. })
        ));

        svc.change_idea(&mut session).unwrap();
        assert_eq!(session.stage, Stage::IdeaInput);
        assert!(session.input.is_none());
        assert_eq!(provider.requests().len(), 1);
    }
}
