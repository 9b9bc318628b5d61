//! Mail-compose fallback link.
//!
//! When the primary delivery fails, the caller gets a pre-filled `mailto:`
//! link instead: a best-effort, non-blocking alternative that never retries
//! the original call.

use proctor_core::traits::DeliveryRequest;

/// Build a `mailto:` link carrying the candidate's result summary.
pub fn compose_mailto(recipient: &str, request: &DeliveryRequest) -> String {
    let subject = request.subject();
    let date = chrono::Utc::now().format("%Y-%m-%d");
    let body = format!(
        "Candidate: {} {}\nScore: {}% ({}/{})\nDate: {}\n\nFull details are available in the assessment archive.",
        request.first_name,
        request.last_name,
        request.score.percentage,
        request.score.correct,
        request.score.total,
        date,
    );

    format!(
        "mailto:{recipient}?subject={}&body={}",
        urlencoding::encode(&subject),
        urlencoding::encode(&body)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proctor_core::session::Score;

    fn request() -> DeliveryRequest {
        DeliveryRequest {
            first_name: "Alice".into(),
            last_name: "Martin".into(),
            score: Score {
                correct: 14,
                total: 20,
                percentage: 70,
            },
            breakdown_html: String::new(),
        }
    }

    #[test]
    fn link_targets_recipient() {
        let link = compose_mailto("recruiting@example.com", &request());
        assert!(link.starts_with("mailto:recruiting@example.com?subject="));
    }

    #[test]
    fn subject_and_body_are_percent_encoded() {
        let link = compose_mailto("recruiting@example.com", &request());
        assert!(link.contains("Alice%20Martin"));
        assert!(link.contains("Score%3A%2070%25%20%2814%2F20%29"));
        assert!(!link.contains(' '));
        assert!(!link.contains('\n'));
    }

    #[test]
    fn breakdown_markup_is_not_embedded() {
        let mut req = request();
        req.breakdown_html = "<div>enormous markup</div>".into();
        let link = compose_mailto("recruiting@example.com", &req);
        assert!(!link.contains("markup"));
    }
}
