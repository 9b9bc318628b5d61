//! HTML report generator.
//!
//! Produces the per-question breakdown fragment embedded in delivery
//! requests, and a self-contained HTML document for the report archive. All
//! styles are inlined so the markup renders in email clients.

use anyhow::Result;
use std::path::Path;

use proctor_core::model::Difficulty;
use proctor_core::report::{AssessmentReport, QuestionOutcome};

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Background/text colors for a difficulty chip.
fn difficulty_colors(difficulty: Difficulty) -> (&'static str, &'static str) {
    match difficulty {
        Difficulty::Easy => ("#dcfce7", "#166534"),
        Difficulty::Medium => ("#fef3c7", "#92400e"),
        Difficulty::Hard => ("#fee2e2", "#991b1b"),
    }
}

/// Color for the headline percentage.
fn score_color(percentage: u32) -> &'static str {
    if percentage >= 70 {
        "#16a34a"
    } else if percentage >= 50 {
        "#eab308"
    } else {
        "#dc2626"
    }
}

fn render_outcome(outcome: &QuestionOutcome) -> String {
    let (chip_bg, chip_fg) = difficulty_colors(outcome.difficulty);
    let mark = if outcome.correct { "&#10003;" } else { "&#10007;" };
    let mark_color = if outcome.correct { "#16a34a" } else { "#dc2626" };

    let mut html = String::new();
    html.push_str(&format!(
        "<div style=\"margin-bottom: 20px; padding: 15px; border: 1px solid #e5e7eb; border-radius: 8px;\">\n\
         <div style=\"display: flex; align-items: center; margin-bottom: 10px;\">\n\
         <span style=\"color: {mark_color}; margin-right: 10px;\">{mark}</span>\n\
         <span style=\"background: {chip_bg}; color: {chip_fg}; padding: 4px 8px; border-radius: 4px; font-size: 12px;\">{}</span>\n\
         </div>\n",
        html_escape(&outcome.difficulty.to_string()),
    ));
    html.push_str(&format!(
        "<p style=\"font-weight: bold; margin-bottom: 10px;\">{}</p>\n<div>\n",
        html_escape(&outcome.prompt)
    ));

    for (index, option) in outcome.options.iter().enumerate() {
        // The correct option is highlighted green; a wrong pick red; the
        // rest stay neutral.
        let (bg, fg) = if index == outcome.correct_option {
            ("#dcfce7", "#166534")
        } else if index == outcome.selected_option && !outcome.correct {
            ("#fee2e2", "#991b1b")
        } else {
            ("#f9fafb", "#374151")
        };
        html.push_str(&format!(
            "<div style=\"padding: 8px; margin: 4px 0; border-radius: 4px; background: {bg}; color: {fg};\">{}</div>\n",
            html_escape(option)
        ));
    }

    html.push_str("</div>\n</div>\n");
    html
}

/// Render the per-question breakdown fragment.
///
/// This is the markup handed to the delivery collaborator, which wraps it in
/// the full report email.
pub fn render_breakdown(report: &AssessmentReport) -> String {
    report.breakdown.iter().map(render_outcome).collect()
}

/// Generate a self-contained HTML document for the report archive.
pub fn render_report(report: &AssessmentReport) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>Assessment results - {}</title>\n",
        html_escape(&report.candidate_name())
    ));
    html.push_str("</head>\n<body style=\"margin: 0; background: #eef2ff;\">\n");

    html.push_str(
        "<div style=\"font-family: Arial, sans-serif; max-width: 800px; margin: 0 auto; padding: 20px;\">\n",
    );

    // Headline score block
    html.push_str("<div style=\"text-align: center; margin-bottom: 30px;\">\n");
    html.push_str("<h1 style=\"color: #1f2937; margin-bottom: 10px;\">Assessment Results</h1>\n");
    html.push_str("<div style=\"background: #f3f4f6; padding: 20px; border-radius: 8px; margin: 20px 0;\">\n");
    html.push_str(&format!(
        "<h2 style=\"color: #374151; margin: 0 0 10px 0;\">Candidate: {}</h2>\n",
        html_escape(&report.candidate_name())
    ));
    html.push_str(&format!(
        "<div style=\"font-size: 36px; font-weight: bold; color: {}; margin: 10px 0;\">{}%</div>\n",
        score_color(report.score.percentage),
        report.score.percentage
    ));
    html.push_str(&format!(
        "<p style=\"color: #6b7280; margin: 0; font-size: 18px;\">{} / {} correct answers</p>\n",
        report.score.correct, report.score.total
    ));
    html.push_str(&format!(
        "<p style=\"color: #6b7280; margin: 10px 0 0 0;\">Date: {}</p>\n",
        report.created_at.format("%Y-%m-%d")
    ));
    html.push_str("</div>\n</div>\n");

    // Breakdown
    html.push_str("<div style=\"margin-top: 30px;\">\n");
    html.push_str(
        "<h3 style=\"color: #374151; border-bottom: 2px solid #e5e7eb; padding-bottom: 10px;\">Answer Breakdown</h3>\n",
    );
    html.push_str(&render_breakdown(report));
    html.push_str("</div>\n");

    html.push_str(
        "<div style=\"margin-top: 30px; padding: 20px; background: #f9fafb; border-radius: 8px; text-align: center;\">\n\
         <p style=\"color: #6b7280; margin: 0; font-size: 14px;\">This report was generated automatically by proctor</p>\n\
         </div>\n",
    );

    html.push_str("</div>\n</body>\n</html>");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(report: &AssessmentReport, path: &Path) -> Result<()> {
    let html = render_report(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proctor_core::model::Question;
    use proctor_core::session::AnswerRecord;

    fn make_report() -> AssessmentReport {
        let questions = vec![
            Question {
                id: "q1".into(),
                prompt: "Which color model is used for print?".into(),
                options: vec!["RGB".into(), "CMYK".into(), "HSL".into(), "LAB".into()],
                correct_option: 1,
                difficulty: Difficulty::Easy,
                group: 1,
            },
            Question {
                id: "q2".into(),
                prompt: "What does <em> mean?".into(),
                options: vec!["bold".into(), "emphasis".into(), "code".into(), "quote".into()],
                correct_option: 1,
                difficulty: Difficulty::Hard,
                group: 2,
            },
        ];
        let answers = vec![
            AnswerRecord {
                question_id: "q1".into(),
                selected_option: 1,
                correct: true,
            },
            AnswerRecord {
                question_id: "q2".into(),
                selected_option: 0,
                correct: false,
            },
        ];
        AssessmentReport::assemble("Alice", "Martin", &questions, &answers)
    }

    #[test]
    fn breakdown_renders_every_outcome() {
        let report = make_report();
        let html = render_breakdown(&report);
        assert!(html.contains("Which color model is used for print?"));
        assert!(html.contains("CMYK"));
        // Correct answer marked with a check, wrong one with a cross.
        assert!(html.contains("&#10003;"));
        assert!(html.contains("&#10007;"));
    }

    #[test]
    fn breakdown_escapes_markup_in_prompts() {
        let report = make_report();
        let html = render_breakdown(&report);
        assert!(html.contains("What does &lt;em&gt; mean?"));
        assert!(!html.contains("What does <em> mean?"));
    }

    #[test]
    fn report_document_contains_required_elements() {
        let report = make_report();
        let html = render_report(&report);

        assert!(html.contains("<html"));
        assert!(html.contains("</html>"));
        assert!(html.contains("Alice Martin"));
        assert!(html.contains("50%"));
        assert!(html.contains("1 / 2 correct answers"));
        // 50 renders yellow.
        assert!(html.contains("#eab308"));
    }

    #[test]
    fn score_color_thresholds() {
        assert_eq!(score_color(70), "#16a34a");
        assert_eq!(score_color(100), "#16a34a");
        assert_eq!(score_color(50), "#eab308");
        assert_eq!(score_color(69), "#eab308");
        assert_eq!(score_color(49), "#dc2626");
        assert_eq!(score_color(0), "#dc2626");
    }

    #[test]
    fn report_write_to_file() {
        let report = make_report();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.html");

        write_html_report(&report, &path).unwrap();
        assert!(path.exists());

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<html"));
    }
}
