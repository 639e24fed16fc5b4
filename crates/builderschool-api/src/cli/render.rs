//! Terminal rendering of the wizard views.
//!
//! Each `format_*` function turns part of a [`SessionView`] into styled
//! text; the wizard loop prints the result.

use console::{StyledObject, style};

use builderschool_core::wizard::view::{EvaluationView, MentorView, PrototypeView, StepStatus};
use builderschool_core::wizard::SessionView;
use builderschool_types::plan::{Refinement, ScoreBand};

const TRACKER_WIDTH: usize = 30;

fn band_style<D>(band: ScoreBand, value: D) -> StyledObject<D> {
    match band {
        ScoreBand::Strong => style(value).green(),
        ScoreBand::Moderate => style(value).yellow(),
        ScoreBand::Weak => style(value).red(),
    }
}

/// Step tracker plus a text progress bar.
pub fn format_tracker(view: &SessionView) -> String {
    let steps: Vec<String> = view
        .steps
        .iter()
        .map(|step| {
            let label = format!("{} {}", step.stage.number(), step.label);
            match step.status {
                StepStatus::Done => format!("{} {}", style("✓").green(), style(label).dim()),
                StepStatus::Current => format!("{} {}", style("●").cyan(), style(label).cyan().bold()),
                StepStatus::Pending => format!("{} {}", style("○").dim(), style(label).dim()),
            }
        })
        .collect();

    let filled = (view.progress * TRACKER_WIDTH as f32).round() as usize;
    let bar = format!(
        "{}{}",
        "█".repeat(filled),
        "░".repeat(TRACKER_WIDTH.saturating_sub(filled))
    );

    format!(
        "  {}\n  {} {}%\n\n  {}\n",
        steps.join("  "),
        style(bar).cyan(),
        (view.progress * 100.0).round() as u32,
        style(view.title).bold().underlined()
    )
}

pub fn format_refinement(refinement: &Refinement) -> String {
    let mut out = String::new();
    out.push_str(&format!("  {}\n", style("Problem").bold()));
    out.push_str(&format!("    {}\n", refinement.problem_statement));
    out.push_str(&format!("  {}\n", style("Target user").bold()));
    out.push_str(&format!("    {}\n", refinement.target_user));
    out.push_str(&format!("  {}\n", style("Core features").bold()));
    for (i, feature) in refinement.core_features.iter().enumerate() {
        out.push_str(&format!("    {}. {feature}\n", i + 1));
    }
    out.push_str(&format!("  {}\n", style("Revenue model").bold()));
    out.push_str(&format!("    {}\n", refinement.revenue_model));
    out.push_str(&format!("  {}\n", style("5-day action plan").bold()));
    for day in &refinement.five_day_plan {
        out.push_str(&format!("    {} {}\n", style(format!("Day {}:", day.day)).cyan(), day.task));
    }
    out
}

/// Answered exchanges, then the pending question if any.
pub fn format_mentor(mentor: &MentorView) -> String {
    let mut out = String::new();
    for (i, exchange) in mentor.exchanges.iter().enumerate() {
        let Some(answer) = &exchange.student_answer else {
            continue;
        };
        out.push_str(&format!("  {} {}\n", style(format!("Q{}", i + 1)).cyan().bold(), exchange.question));
        out.push_str(&format!("     {} {answer}\n", style("You:").dim()));
        if let Some(feedback) = &exchange.mentor_feedback {
            out.push_str(&format!("     {} {feedback}\n", style("Mentor:").magenta()));
        }
        out.push('\n');
    }

    if let Some(question) = &mentor.current_question {
        out.push_str(&format!(
            "  {} {}\n",
            style(format!(
                "Question {} of {}:",
                mentor.current_question_index + 1,
                mentor.question_count
            ))
            .yellow()
            .bold(),
            question
        ));
    } else if mentor.question_count > 0 {
        out.push_str(&format!("  {}\n", style("All questions answered.").green()));
    }
    out
}

pub fn format_evaluation(evaluation: &EvaluationView) -> String {
    let score = &evaluation.score;
    let blueprint = &evaluation.blueprint;
    let mut out = String::new();

    out.push_str(&format!(
        "  {} {}\n",
        style("Startup Readiness Score:").bold(),
        band_style(evaluation.band, format!("{:.1} / 10", score.overall)).bold()
    ));
    for dimension in &evaluation.dimensions {
        out.push_str(&format!(
            "    {:<16} {}\n",
            dimension.label,
            band_style(dimension.band, format!("{}/10", dimension.score))
        ));
    }
    out.push_str(&format!("  {} {}\n", style("Verdict:").bold(), score.verdict));
    out.push_str(&format!("  {} {}\n", style("Strength:").green(), score.biggest_strength));
    out.push_str(&format!("  {} {}\n", style("Risk:").red(), score.biggest_risk));
    out.push('\n');

    out.push_str(&format!("  {} {}\n", style("Improved:").bold(), style(&blueprint.improved_name).cyan().bold()));
    out.push_str(&format!("    {}\n", blueprint.refined_problem));
    out.push_str(&format!("  {} {}\n", style("Pivot or sharpen:").bold(), blueprint.pivot_or_sharpen));
    for feature in &blueprint.updated_features {
        out.push_str(&format!("    - {feature}\n"));
    }
    out.push_str(&format!("  {} {}\n", style("Revenue:").bold(), blueprint.stronger_revenue_model));
    out.push_str(&format!("  {} {}\n", style("Key improvement:").bold(), blueprint.key_improvement));
    out
}

/// Marketplace prototypes print one block per section; the others print
/// the artifact whole.
pub fn format_prototype(prototype: &PrototypeView) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "  {} {} ({})\n",
        style("Prototype:").bold(),
        style(prototype.file_name).cyan(),
        prototype.language
    ));

    if prototype.sections.is_empty() {
        out.push_str(&format!("{}\n", style("─".repeat(60)).dim()));
        out.push_str(&format!("{}\n", prototype.code.trim_end()));
        out.push_str(&format!("{}\n", style("─".repeat(60)).dim()));
    } else {
        for section in &prototype.sections {
            let header = if section.header.is_empty() {
                "Scaffold"
            } else {
                section.header.trim_start_matches('#').trim()
            };
            out.push_str(&format!("\n  {} {}\n", style(header).yellow().bold(), style(format!("[{}]", section.language)).dim()));
            out.push_str(&format!("{}\n", style("─".repeat(60)).dim()));
            out.push_str(&format!("{}\n", section.body.trim_end()));
        }
        out.push_str(&format!("{}\n", style("─".repeat(60)).dim()));
    }
    if let Some(run) = prototype.run_instructions {
        out.push_str(&format!("  {} {}\n", style("To run:").bold(), style(run).cyan()));
    }
    out
}

/// Everything generated so far, for the "review summary" option.
pub fn format_summary(view: &SessionView) -> String {
    let mut out = String::new();
    if let Some(input) = &view.input {
        out.push_str(&format!(
            "  {} {}  {} {}  {} {}\n\n",
            style("Idea:").bold(),
            input.idea,
            style("Class:").bold(),
            input.student_class,
            style("Type:").bold(),
            input.idea_type
        ));
    }
    if let Some(refinement) = &view.refinement {
        out.push_str(&format_refinement(refinement));
        out.push('\n');
    }
    if let Some(mentor) = &view.mentor {
        out.push_str(&format_mentor(mentor));
        out.push('\n');
    }
    if let Some(evaluation) = &view.evaluation {
        out.push_str(&format_evaluation(evaluation));
    }
    out
}
