//! Scripted provider and canned model outputs shared by the unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use builderschool_types::llm::{CompletionRequest, CompletionResponse, LlmError, StopReason, Usage};

use crate::llm::provider::LlmProvider;

/// Replays queued responses in order and records every request.
///
/// Clones share the same queue, so a test can keep a handle after boxing
/// the provider.
#[derive(Clone, Default)]
pub struct ScriptedLlmProvider {
    replies: Arc<Mutex<VecDeque<Result<String, LlmError>>>>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl ScriptedLlmProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_text(&self, text: &str) {
        self.replies.lock().unwrap().push_back(Ok(text.to_string()));
    }

    pub fn push_error(&self, err: LlmError) {
        self.replies.lock().unwrap().push_back(Err(err));
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn remaining(&self) -> usize {
        self.replies.lock().unwrap().len()
    }
}

impl LlmProvider for ScriptedLlmProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(LlmError::Provider {
                    message: "scripted provider exhausted".to_string(),
                })
            })?;
        Ok(CompletionResponse {
            id: "resp_scripted".to_string(),
            content: reply,
            model: request.model.clone(),
            stop_reason: StopReason::EndTurn,
            usage: Usage {
                input_tokens: 120,
                output_tokens: 80,
            },
        })
    }
}

pub const REFINEMENT_JSON: &str = r#"{
  "problem_statement": "Students in classes 9 and 10 struggle to find a tutor the night before an exam. Existing tutoring is booked weeks ahead.",
  "target_user": "Class 9-10 students preparing for board exams",
  "core_features": [
    "Instant tutor matching by subject and time slot",
    "15-minute doubt-clearing video calls",
    "Ratings for every tutor session"
  ],
  "revenue_model": "Students pay per 15-minute session; tutors keep 80%",
  "five_day_plan": [
    {"day": 1, "task": "Interview 10 classmates about last-minute exam help"},
    {"day": 2, "task": "List 5 senior students willing to tutor"},
    {"day": 3, "task": "Run 3 sessions manually over WhatsApp"},
    {"day": 4, "task": "Collect feedback and prices students accept"},
    {"day": 5, "task": "Sketch the booking screen on paper"}
  ]
}"#;

pub const QUESTIONS_JSON: &str = r#"["How will you prove students want this before building it?", "Why would a student pick you over asking a classmate?", "Who pays, how much, and why would they keep paying?"]"#;

pub const FEEDBACK_TEXT: &str = "You picked a concrete test. The gap is you have no target number. This week, get five classmates to pre-book a session.";

pub const SCORE_JSON: &str = r#"{
  "problem_clarity": 7,
  "monetization_clarity": 6,
  "differentiation": 6,
  "student_feasibility": 6,
  "overall": 9.9,
  "verdict": "A real problem with a thin moat. Worth a small pilot.",
  "biggest_strength": "Clear, urgent pain point",
  "biggest_risk": "Differentiation from free help from classmates"
}"#;

pub const BLUEPRINT_JSON: &str = r#"{
  "improved_name": "ExamEve",
  "refined_problem": "Board-exam students need help the night before. Classmates are busy studying too.",
  "pivot_or_sharpen": "Sharpened to the 48 hours before an exam",
  "updated_features": [
    "Exam-eve booking window",
    "Verified senior tutors",
    "Pre-paid doubt packs"
  ],
  "stronger_revenue_model": "Parents buy doubt packs of five sessions",
  "key_improvement": "Parents pay instead of students"
}"#;

pub const MARKETPLACE_TEXT: &str = "## SECTION 1: HTML FRONTEND
<!DOCTYPE html>
<html><body><h1>ExamEve</h1></body></html>

## SECTION 2: DATABASE SCHEMA
CREATE TABLE users (id INTEGER PRIMARY KEY);

## SECTION 3: FLASK API SCAFFOLD
# pip install flask flask-sqlalchemy
from flask import Flask
";
