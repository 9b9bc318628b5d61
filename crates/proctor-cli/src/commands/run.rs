//! The `proctor run` command.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use dialoguer::{Input, Select};

use proctor_core::controller::SessionController;
use proctor_core::parser;
use proctor_core::report::AssessmentReport;
use proctor_core::session::{DeliveryStatus, Phase, SessionError};
use proctor_core::store::FileStore;
use proctor_core::traits::DeliveryRequest;
use proctor_delivery::config::{create_delivery, load_config_from};
use proctor_delivery::dispatch::{DeliveryOutcome, Dispatcher};
use proctor_report::{render_breakdown, write_html_report};

pub async fn execute(
    bank_path: Option<PathBuf>,
    state_dir: Option<PathBuf>,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let bank_path = bank_path.unwrap_or_else(|| config.bank.clone());
    let state_dir = state_dir.unwrap_or_else(|| config.state_dir.clone());
    let output = output.unwrap_or_else(|| config.output_dir.clone());

    let bank = parser::parse_bank(&bank_path)?;
    for warning in parser::validate_bank(&bank) {
        tracing::warn!("bank {}: {}", bank.id, warning.message);
    }

    let store = FileStore::new(&state_dir);
    let mut controller = SessionController::open(store);

    match controller.phase() {
        Phase::Completed => {
            // A finished session is never re-run and its report is never
            // re-dispatched; an unrecorded outcome becomes Unknown.
            if controller.session().delivery == DeliveryStatus::Pending {
                controller.record_delivery(DeliveryStatus::Unknown);
            }
            let report = AssessmentReport::from_session(controller.session());
            eprintln!(
                "An assessment by {} is already completed.",
                report.candidate_name()
            );
            print_summary(&report);
            eprintln!("Run `proctor reset` to allow a new attempt.");
            return Ok(());
        }
        Phase::InProgress => {
            let session = controller.session();
            eprintln!(
                "Resuming assessment for {} ({} of {} answered).",
                session.candidate_name(),
                session.answers.len(),
                session.test.len()
            );
        }
        Phase::Intake => {
            eprintln!("Welcome to the assessment: {}", bank.name);
            eprintln!(
                "You will answer {} questions. Your results are sent to the recruiting team when you finish.",
                proctor_core::sampler::TEST_LEN
            );
            eprintln!();

            let mut rng = rand::rng();
            loop {
                let first_name: String = Input::new()
                    .with_prompt("First name")
                    .allow_empty(true)
                    .interact_text()?;
                let last_name: String = Input::new()
                    .with_prompt("Last name")
                    .allow_empty(true)
                    .interact_text()?;

                match controller.start(&first_name, &last_name, &bank, &mut rng) {
                    Ok(()) => break,
                    Err(SessionError::MissingName) => {
                        eprintln!("Please enter both your first and last name to begin.");
                    }
                    Err(e) => return Err(e.into()),
                }
            }
        }
    }

    let total = controller.session().test.len();
    while controller.phase() == Phase::InProgress {
        let Some(question) = controller.session().current_question().cloned() else {
            break;
        };
        let number = controller.session().current_index + 1;

        eprintln!();
        eprintln!("Question {number}/{total} [{}]", question.difficulty);
        let selection = Select::new()
            .with_prompt(question.prompt.as_str())
            .items(&question.options)
            .interact()?;

        controller.select_option(selection);
        controller.confirm_answer();
    }

    anyhow::ensure!(
        controller.phase() == Phase::Completed,
        "session ended before all questions were answered"
    );

    let report = AssessmentReport::from_session(controller.session());
    print_summary(&report);

    // Archive the report before attempting delivery.
    std::fs::create_dir_all(&output)
        .with_context(|| format!("failed to create {}", output.display()))?;
    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");
    let json_path = output.join(format!("report-{timestamp}.json"));
    report.save_json(&json_path)?;
    let html_path = output.join(format!("report-{timestamp}.html"));
    write_html_report(&report, &html_path)?;
    eprintln!("Report archived to: {}", json_path.display());

    // Hand the report to the delivery collaborator exactly once. The
    // session is completed regardless of the outcome.
    let request = DeliveryRequest {
        first_name: report.first_name.clone(),
        last_name: report.last_name.clone(),
        score: report.score,
        breakdown_html: render_breakdown(&report),
    };
    let primary = create_delivery(&config).map(Arc::from);
    let dispatcher = Dispatcher::new(primary, &config.recipient);
    let outcome = dispatcher.dispatch(&request).await;
    controller.record_delivery(outcome.status());

    eprintln!();
    eprintln!("Your results were sent to the recruiting team.");
    if let DeliveryOutcome::FallbackUsed { mailto } = &outcome {
        eprintln!("To make sure they arrive, you can also send the prepared message:");
        eprintln!("  {mailto}");
    }

    Ok(())
}

fn print_summary(report: &AssessmentReport) {
    use comfy_table::{Cell, Table};
    use proctor_core::model::Difficulty;

    let mut table = Table::new();
    table.set_header(vec!["Difficulty", "Correct", "Answered"]);

    for difficulty in Difficulty::ALL {
        let outcomes = report
            .breakdown
            .iter()
            .filter(|o| o.difficulty == difficulty);
        let (correct, answered) = outcomes.fold((0usize, 0usize), |(c, a), o| {
            (c + usize::from(o.correct), a + 1)
        });
        table.add_row(vec![
            Cell::new(difficulty),
            Cell::new(correct),
            Cell::new(answered),
        ]);
    }
    table.add_row(vec![
        Cell::new("total"),
        Cell::new(report.score.correct),
        Cell::new(report.score.total),
    ]);

    eprintln!("\n{table}");
    eprintln!(
        "Score: {}% ({}/{} correct)",
        report.score.percentage, report.score.correct, report.score.total
    );
}
