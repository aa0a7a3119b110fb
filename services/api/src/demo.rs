use crate::infra::{InMemorySessionRepository, RecordingContactNotifier};
use clap::Args;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use mold_quiz::error::AppError;
use mold_quiz::quiz::{
    Answer, ProfileCatalog, QuestionBank, QuizSessionService, ScoringEngine,
    SelectionMode, WizardStep,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Contact email used for the scripted submission
    #[arg(long, default_value = "demo@example.com")]
    pub(crate) email: String,
    /// Contact name used for the scripted submission
    #[arg(long, default_value = "Demo User")]
    pub(crate) name: String,
    /// Stop before contact capture and print the preview score instead
    #[arg(long)]
    pub(crate) skip_contact: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Inline JSON answers keyed by question id,
    /// e.g. '{"timeline": {"single": "after-move"}}'
    #[arg(long, conflicts_with = "answers_file")]
    pub(crate) answers: Option<String>,
    /// Path to a JSON file with the same shape
    #[arg(long)]
    pub(crate) answers_file: Option<PathBuf>,
}

/// Answers for the scripted demo walkthrough. Chosen to exercise the
/// multi-select cap, the timeline weighting, and the final clamp.
fn scripted_answers() -> Vec<(&'static str, Answer)> {
    vec![
        (
            "symptoms-neuro",
            Answer::Multi(vec![
                "brain-fog".to_string(),
                "chronic-fatigue".to_string(),
            ]),
        ),
        ("symptoms-physical", Answer::Multi(Vec::new())),
        (
            "environmental",
            Answer::Multi(vec!["musty-smell".to_string(), "visible-mold".to_string()]),
        ),
        ("timeline", Answer::Single("after-move".to_string())),
        (
            "doctor-experience",
            Answer::Single("normal-labs".to_string()),
        ),
    ]
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        answers,
        answers_file,
    } = args;

    let raw = match (answers, answers_file) {
        (Some(inline), _) => inline,
        (None, Some(path)) => std::fs::read_to_string(path)?,
        (None, None) => {
            println!("Provide --answers or --answers-file; scoring an empty payload:");
            String::from("{}")
        }
    };

    let payload: BTreeMap<String, Answer> = serde_json::from_str(&raw)?;
    let store = QuestionBank::standard().sanitized_store(payload);

    let outcome = ScoringEngine::new().evaluate(&store);
    render_outcome_breakdown(&outcome);

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        email,
        name,
        skip_contact,
    } = args;

    println!("Mold exposure self-assessment demo");

    let bank = QuestionBank::standard();
    let repository = Arc::new(InMemorySessionRepository::default());
    let notifier = Arc::new(RecordingContactNotifier::default());
    let service = QuizSessionService::new(
        Arc::new(bank.clone()),
        Arc::new(ProfileCatalog::standard()),
        repository,
        notifier.clone(),
    );

    let record = service.create()?;
    let session_id = record.session_id.clone();
    println!("- Started session {}", session_id.0);

    for (question_id, answer) in scripted_answers() {
        let record = service.advance(&session_id)?;
        if let WizardStep::Question(number) = record.session.current_step(&bank) {
            if let Some(question) = bank.question(question_id) {
                let mode = match question.mode {
                    SelectionMode::SingleSelect => "pick one",
                    SelectionMode::MultiSelect => "pick any",
                };
                println!("  Q{number} ({mode}): {}", question.title);
            }
        }
        let selections = match &answer {
            Answer::Single(value) => value.clone(),
            Answer::Multi(values) => values.join(", "),
        };
        let record = service.record_answer(&session_id, question_id, answer)?;
        if selections.is_empty() {
            println!("    -> skipped");
        } else {
            println!("    -> {selections}");
        }
        let view = record.status_view(&bank);
        println!(
            "    step={} answered={} can_advance={}",
            view.step, view.answered_questions, view.can_advance
        );
    }

    service.advance(&session_id)?;

    if skip_contact {
        let record = service.get(&session_id)?;
        let outcome = ScoringEngine::new().evaluate(record.session.answers());
        println!("\nPreview (no contact captured):");
        render_outcome_breakdown(&outcome);
        return Ok(());
    }

    let (record, outcome) = match service.submit_contact(&session_id, &email, &name) {
        Ok(completed) => completed,
        Err(err) => {
            println!("  Submission rejected: {err}");
            return Ok(());
        }
    };

    println!("\nResults for session {}:", record.session_id.0);
    render_outcome_breakdown(&outcome);

    if let Some(result) = record.result_view(&ProfileCatalog::standard()) {
        if let Some(guidance) = result.guidance {
            println!("\nProfile: {}", guidance.title);
            println!("{}", guidance.description);
            println!("Recommended next steps:");
            for recommendation in &guidance.recommendations {
                println!("  - {recommendation}");
            }
            println!("  -> {}", guidance.next_steps.cta);
        }
    }

    let events = notifier.events();
    if events.is_empty() {
        println!("\nContact submissions: none delivered");
    } else {
        println!("\nContact submissions:");
        for event in events {
            println!(
                "  - {} <{}> scored {} ({})",
                event.name,
                event.email,
                event.score,
                event.profile.label()
            );
        }
    }

    Ok(())
}

fn render_outcome_breakdown(outcome: &mold_quiz::quiz::QuizOutcome) {
    println!(
        "Score: {} / 10 -> {}",
        outcome.score,
        outcome.profile.label()
    );
    println!("Components:");
    for component in &outcome.components {
        println!(
            "  - {}: {} ({})",
            component.factor.label(),
            component.points,
            component.notes
        );
    }
}
