//! Run summary: partitions task results into successes and failures and
//! renders the closing report. Purely a transform over the result sequence;
//! rendering the same results twice yields identical text.

use crate::runner::{TaskOutcome, TaskResult};
use owo_colors::OwoColorize;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuccessLine {
    pub zone: String,
    pub item_id: String,
    pub output_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureLine {
    pub zone: String,
    pub item_id: String,
    pub error: String,
}

/// Partitioned results, preserving relative order of first appearance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub successes: Vec<SuccessLine>,
    pub failures: Vec<FailureLine>,
}

impl RunSummary {
    pub fn from_results(results: &[TaskResult]) -> Self {
        let mut successes = Vec::new();
        let mut failures = Vec::new();
        for result in results {
            match &result.outcome {
                TaskOutcome::Success { output_path } => successes.push(SuccessLine {
                    zone: result.zone.clone(),
                    item_id: result.item_id.clone(),
                    output_path: output_path.clone(),
                }),
                TaskOutcome::Failure { error } => failures.push(FailureLine {
                    zone: result.zone.clone(),
                    item_id: result.item_id.clone(),
                    error: error.clone(),
                }),
            }
        }
        Self {
            total: results.len(),
            successes,
            failures,
        }
    }

    /// True when the run produced tasks and not one of them succeeded; the
    /// only result shape that warrants a non-zero exit.
    pub fn all_failed(&self) -> bool {
        self.total > 0 && self.successes.is_empty()
    }

    pub fn render(&self) -> String {
        let mut out = format!("Successful: {}/{}", self.successes.len(), self.total);
        for line in &self.successes {
            out.push_str(&format!(
                "\n  {} {}/{}: {}",
                "✓".green(),
                line.zone,
                line.item_id,
                line.output_path.display()
            ));
        }
        if !self.failures.is_empty() {
            out.push_str(&format!("\n\nFailed: {}", self.failures.len()));
            for line in &self.failures {
                out.push_str(&format!(
                    "\n  {} {}/{}: {}",
                    "✗".red(),
                    line.zone,
                    line.item_id,
                    line.error
                ));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn success(zone: &str, item_id: &str) -> TaskResult {
        TaskResult {
            zone: zone.to_string(),
            item_id: item_id.to_string(),
            outcome: TaskOutcome::Success {
                output_path: PathBuf::from(format!("/assets/{}/{}.png", zone, item_id)),
            },
        }
    }

    fn failure(zone: &str, item_id: &str, error: &str) -> TaskResult {
        TaskResult {
            zone: zone.to_string(),
            item_id: item_id.to_string(),
            outcome: TaskOutcome::Failure {
                error: error.to_string(),
            },
        }
    }

    #[test]
    fn test_two_of_three_scenario() {
        let results = vec![
            success("sky", "a"),
            failure("sky", "b", "prompt was filtered"),
            success("sky", "c"),
        ];
        let summary = RunSummary::from_results(&results);
        let text = summary.render();

        assert!(text.contains("Successful: 2/3"));
        assert!(text.contains("Failed: 1"));
        assert!(text.contains("sky/b: prompt was filtered"));
        assert!(!summary.all_failed());
    }

    #[test]
    fn test_empty_run_has_no_failure_section() {
        let summary = RunSummary::from_results(&[]);
        let text = summary.render();
        assert!(text.contains("Successful: 0/0"));
        assert!(!text.contains("Failed"));
        assert!(!summary.all_failed());
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let results = vec![
            success("sky", "a"),
            failure("forest", "b", "timeout"),
            success("coastal", "c"),
        ];
        let summary = RunSummary::from_results(&results);
        assert_eq!(summary.render(), summary.render());

        let again = RunSummary::from_results(&results);
        assert_eq!(summary, again);
    }

    #[test]
    fn test_partition_preserves_first_appearance_order() {
        let results = vec![
            failure("rocky", "z", "boom"),
            success("sky", "m"),
            failure("sky", "a", "boom"),
            success("forest", "b"),
        ];
        let summary = RunSummary::from_results(&results);
        let success_ids: Vec<&str> = summary.successes.iter().map(|l| l.item_id.as_str()).collect();
        let failure_ids: Vec<&str> = summary.failures.iter().map(|l| l.item_id.as_str()).collect();
        assert_eq!(success_ids, vec!["m", "b"]);
        assert_eq!(failure_ids, vec!["z", "a"]);
    }

    #[test]
    fn test_all_failed() {
        let results = vec![failure("sky", "a", "x"), failure("sky", "b", "y")];
        assert!(RunSummary::from_results(&results).all_failed());
    }
}
