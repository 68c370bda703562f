//! Evaluation summaries: records from the summary webhook and their aggregate.
//!
//! The webhook returns a JSON array of form submissions. Each one becomes a
//! numbered line, and the numeric scores are averaged to two decimals.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::config::InvalidScorePolicy;

/// Reply used when the webhook returns an empty array.
pub const NO_EVALUATIONS: &str = "No evaluations submitted yet.";

/// One form submission, as returned by the summary webhook.
#[derive(Clone, Debug, Deserialize)]
pub struct EvaluationRecord {
    #[serde(rename = "Email Address", default)]
    pub email: String,
    #[serde(rename = "You are representing", default)]
    pub team: String,
    /// Arrives as either a JSON string or number.
    #[serde(rename = "Scoring", default)]
    pub score: Value,
}

impl EvaluationRecord {
    /// The score as it should be displayed.
    pub fn score_text(&self) -> String {
        match &self.score {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }

    /// The score as a finite number, if it is one.
    pub fn score_value(&self) -> Option<f64> {
        let n = match &self.score {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        n.filter(|v| v.is_finite())
    }
}

/// A record's score could not be used.
#[derive(Debug, Error, PartialEq)]
pub enum SummaryError {
    #[error("record {index} has a non-numeric score: {value:?}")]
    InvalidScore { index: usize, value: String },
}

/// Formatted lines plus the average score.
///
/// `average` is `None` when there is nothing to average.
#[derive(Clone, Debug, PartialEq)]
pub struct SummaryReport {
    pub lines: Vec<String>,
    pub average: Option<f64>,
}

impl SummaryReport {
    /// Reduce records into a report, preserving their order.
    pub fn from_records(
        records: &[EvaluationRecord],
        policy: InvalidScorePolicy,
    ) -> Result<Self, SummaryError> {
        let mut lines = Vec::with_capacity(records.len());
        let mut total = 0.0;
        let mut counted = 0usize;

        for (i, record) in records.iter().enumerate() {
            let index = i + 1;
            match (record.score_value(), policy) {
                (Some(score), _) => {
                    total += score;
                    counted += 1;
                }
                (None, InvalidScorePolicy::Skip) => {}
                (None, InvalidScorePolicy::Fail) => {
                    return Err(SummaryError::InvalidScore {
                        index,
                        value: record.score_text(),
                    });
                }
            }
            lines.push(format!(
                "{}. {} - For {} - {}",
                index,
                record.email,
                record.team,
                record.score_text()
            ));
        }

        let average = (counted > 0).then(|| total / counted as f64);
        Ok(Self { lines, average })
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Average formatted to two decimals, e.g. `"4.00"`. Halves round away from zero.
    pub fn average_text(&self) -> Option<String> {
        self.average
            .map(|avg| format!("{:.2}", (avg * 100.0).round() / 100.0))
    }

    /// Render as Slack mrkdwn. Empty reports render as [`NO_EVALUATIONS`].
    pub fn render(&self) -> String {
        if self.is_empty() {
            return NO_EVALUATIONS.to_string();
        }

        let mut out = String::from("*Evaluation summary*\n");
        out.push_str(&self.lines.join("\n"));
        out.push_str("\n\n*Average score:* ");
        out.push_str(self.average_text().as_deref().unwrap_or("n/a"));
        out
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
