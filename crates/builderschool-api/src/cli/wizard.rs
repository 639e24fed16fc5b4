//! Interactive terminal wizard (`bschool wizard`).
//!
//! Drives the same [`WizardService`] as the web UI. Each loop iteration
//! prints the tracker and the active step, then offers the actions the
//! session allows plus review, save, and quit options.

use std::future::Future;
use std::time::Duration;

use anyhow::{Context, Result};
use console::style;
use dialoguer::{Confirm, Input, Password, Select};
use indicatif::{ProgressBar, ProgressStyle};
use secrecy::SecretString;

use builderschool_core::wizard::{SessionView, WizardService, export_json_pretty};
use builderschool_infra::secret::resolve_api_key;
use builderschool_types::config::AppConfig;
use builderschool_types::error::WizardError;
use builderschool_types::export::EXPORT_FILE_NAME;
use builderschool_types::session::WizardSession;
use builderschool_types::wizard::{IdeaInput, IdeaType, Stage, StudentClass, WizardAction};

use crate::cli::render;
use crate::state::wizard_service;

const RAW_PREVIEW_CHARS: usize = 500;

/// One entry of the per-step menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    Action(WizardAction),
    ReviewSummary,
    SaveExport,
    SavePrototype,
    Quit,
}

impl MenuItem {
    fn label(self) -> String {
        match self {
            MenuItem::Action(action) => action.caption().to_string(),
            MenuItem::ReviewSummary => "Review summary".to_string(),
            MenuItem::SaveExport => format!("Save session ({EXPORT_FILE_NAME})"),
            MenuItem::SavePrototype => "Save prototype file".to_string(),
            MenuItem::Quit => "Quit".to_string(),
        }
    }
}

/// Menu for the current session: wizard actions first, then extras.
fn menu_items(view: &SessionView) -> Vec<MenuItem> {
    let mut items: Vec<MenuItem> = view
        .available_actions
        .iter()
        .map(|a| MenuItem::Action(a.action))
        .collect();
    if view.stage >= Stage::Refinement {
        items.push(MenuItem::ReviewSummary);
        items.push(MenuItem::SaveExport);
    }
    if view.prototype.is_some() {
        items.push(MenuItem::SavePrototype);
    }
    items.push(MenuItem::Quit);
    items
}

/// Resolve a key, asking for one when neither the flag nor the environment
/// has it.
fn obtain_api_key(config: &AppConfig, explicit: Option<SecretString>) -> Result<SecretString> {
    if let Ok(key) = resolve_api_key(explicit, &config.api_key_env) {
        return Ok(key);
    }

    println!(
        "  {} No API key found in --api-key or {}.",
        style("!").yellow().bold(),
        style(&config.api_key_env).cyan()
    );
    let typed: String = Password::new()
        .with_prompt("API key")
        .allow_empty_password(true)
        .interact()?;

    resolve_api_key(Some(SecretString::from(typed)), &config.api_key_env)
        .map_err(|e| anyhow::anyhow!(e.user_message()))
}

/// Run the terminal wizard until the student quits.
pub async fn run_wizard(config: &AppConfig, explicit_key: Option<SecretString>) -> Result<()> {
    println!();
    println!(
        "  {} {}",
        style("Builder School").cyan().bold(),
        style("in a Box").dim()
    );
    println!(
        "  {}",
        style("Idea -> Refinement -> Mentor -> Score -> Prototype").dim()
    );
    println!();

    let key = obtain_api_key(config, explicit_key)?;
    let service = wizard_service(config, key);
    let mut session = WizardSession::new();

    loop {
        let view = SessionView::from_session(&session);
        println!();
        print!("{}", render::format_tracker(&view));
        print_step(&view);

        let items = menu_items(&view);
        let labels: Vec<String> = items.iter().map(|i| i.label()).collect();
        let selection = Select::new()
            .with_prompt("What next?")
            .items(&labels)
            .default(0)
            .interact()?;

        let outcome = match items[selection] {
            MenuItem::Quit => break,
            MenuItem::ReviewSummary => {
                println!();
                print!("{}", render::format_summary(&view));
                Ok(())
            }
            MenuItem::SaveExport => {
                save_export(&session).await?;
                Ok(())
            }
            MenuItem::SavePrototype => {
                save_prototype(&session).await?;
                Ok(())
            }
            MenuItem::Action(action) => perform(&service, &mut session, action).await?,
        };

        if let Err(err) = outcome {
            print_error(&err);
        }
    }

    println!();
    println!("  {}", style("Good luck with your build!").green());
    Ok(())
}

/// Run one wizard action. Prompt failures bubble up as the outer error;
/// wizard failures come back as the inner one so the loop can continue.
async fn perform(
    service: &WizardService,
    session: &mut WizardSession,
    action: WizardAction,
) -> Result<Result<(), WizardError>> {
    let outcome = match action {
        WizardAction::SubmitIdea => {
            let input = prompt_idea()?;
            spin("Refining your idea...", service.submit_idea(session, input)).await
        }
        WizardAction::StartMentorSession => {
            spin(
                "Your mentor is preparing questions...",
                service.start_mentor_session(session),
            )
            .await
        }
        WizardAction::AnswerQuestion => {
            let answer: String = Input::new().with_prompt("Your answer").interact_text()?;
            spin(
                "Your mentor is reading your answer...",
                service.answer_question(session, &answer),
            )
            .await
        }
        WizardAction::SeeEvaluation => {
            spin(
                "Scoring your idea and drafting a stronger version...",
                service.see_evaluation(session),
            )
            .await
        }
        WizardAction::GeneratePrototype => {
            spin("Building your prototype...", service.generate_prototype(session)).await
        }
        WizardAction::ChangeIdea => service.change_idea(session),
        WizardAction::RestartQa => service.restart_qa(session),
        WizardAction::BackToRefinement => service.back_to_refinement(session),
        WizardAction::BackToMentor => service.back_to_mentor(session),
        WizardAction::StartOver => {
            let confirmed = Confirm::new()
                .with_prompt("Discard this session and start over?")
                .default(false)
                .interact()?;
            if !confirmed {
                return Ok(Ok(()));
            }
            service.start_over(session)
        }
    };
    Ok(outcome)
}

fn prompt_idea() -> Result<IdeaInput> {
    let idea: String = Input::new()
        .with_prompt("Describe your startup idea")
        .interact_text()?;

    let classes: Vec<StudentClass> = StudentClass::choices().collect();
    let class_labels: Vec<String> = classes.iter().map(|c| format!("Class {c}")).collect();
    let class_index = Select::new()
        .with_prompt("Your class")
        .items(&class_labels)
        .default(classes.len() - 1)
        .interact()?;

    let type_labels: Vec<&str> = IdeaType::ALL.iter().map(|t| t.as_str()).collect();
    let type_index = Select::new()
        .with_prompt("What are you building?")
        .items(&type_labels)
        .default(0)
        .interact()?;

    Ok(IdeaInput {
        idea,
        student_class: classes[class_index],
        idea_type: IdeaType::ALL[type_index],
    })
}

/// Await `fut` behind a spinner.
async fn spin<T>(message: &str, fut: impl Future<Output = T>) -> T {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));

    let out = fut.await;
    spinner.finish_and_clear();
    out
}

fn print_step(view: &SessionView) {
    println!();
    match view.stage {
        Stage::IdeaInput => {
            println!("  Tell us your idea, your class, and what kind of product it is.");
        }
        Stage::Refinement => {
            if let Some(refinement) = &view.refinement {
                print!("{}", render::format_refinement(refinement));
            }
        }
        Stage::MentorSession => match &view.mentor {
            Some(mentor) => print!("{}", render::format_mentor(mentor)),
            None => println!("  Your mentor will ask three hard questions about the idea."),
        },
        Stage::ScoreAndBlueprint => {
            if let Some(evaluation) = &view.evaluation {
                print!("{}", render::format_evaluation(evaluation));
            }
        }
        Stage::Prototype => {
            if let Some(prototype) = &view.prototype {
                print!("{}", render::format_prototype(prototype));
            }
        }
    }
    println!();
}

fn print_error(err: &WizardError) {
    println!();
    println!("  {} {}", style("✗").red().bold(), style(err.user_message()).red());
    if let Some(raw) = err.raw_output() {
        let preview: String = raw.chars().take(RAW_PREVIEW_CHARS).collect();
        println!("  {}", style("Raw model output:").dim());
        println!("{}", style(preview).dim());
    }
    tracing::debug!(code = err.code(), error = %err, "wizard action failed");
}

async fn save_export(session: &WizardSession) -> Result<()> {
    let path: String = Input::new()
        .with_prompt("Save session to")
        .default(EXPORT_FILE_NAME.to_string())
        .interact_text()?;
    let json = export_json_pretty(session).context("Failed to serialize session")?;
    tokio::fs::write(&path, json)
        .await
        .with_context(|| format!("Failed to write {path}"))?;
    println!("  {} Saved {}", style("✓").green().bold(), style(&path).cyan());
    Ok(())
}

async fn save_prototype(session: &WizardSession) -> Result<()> {
    let Some(artifact) = &session.prototype else {
        return Ok(());
    };
    let path: String = Input::new()
        .with_prompt("Save prototype to")
        .default(artifact.file_name().to_string())
        .interact_text()?;
    tokio::fs::write(&path, &artifact.code)
        .await
        .with_context(|| format!("Failed to write {path}"))?;
    println!("  {} Saved {}", style("✓").green().bold(), style(&path).cyan());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use builderschool_types::plan::PrototypeArtifact;

    #[test]
    fn first_step_offers_submit_and_quit() {
        let view = SessionView::from_session(&WizardSession::new());
        assert_eq!(
            menu_items(&view),
            [MenuItem::Action(WizardAction::SubmitIdea), MenuItem::Quit]
        );
    }

    #[test]
    fn later_steps_offer_review_and_save() {
        let mut session = WizardSession::new();
        session.stage = Stage::Prototype;
        session.prototype = Some(PrototypeArtifact {
            idea_type: IdeaType::AiTool,
            code: "# ==== AI TOOL".to_string(),
        });
        let items = menu_items(&SessionView::from_session(&session));
        assert_eq!(items[0], MenuItem::Action(WizardAction::StartOver));
        assert!(items.contains(&MenuItem::ReviewSummary));
        assert!(items.contains(&MenuItem::SaveExport));
        assert!(items.contains(&MenuItem::SavePrototype));
        assert_eq!(items.last(), Some(&MenuItem::Quit));
    }

    #[test]
    fn labels_use_action_captions() {
        assert_eq!(
            MenuItem::Action(WizardAction::SeeEvaluation).label(),
            "See Score & Improved Blueprint"
        );
        assert!(MenuItem::SaveExport.label().contains("builder_school_session.json"));
    }
}
