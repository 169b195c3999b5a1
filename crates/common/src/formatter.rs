//! Batch reporting for `stratifier all`.

use tracing::{error, info};

/// Running tally of a batch over the example programs.
pub struct AllResultsFormatter {
    tool_name: String,
    total: usize,
    processed: usize,
    failures: Vec<String>,
}

impl AllResultsFormatter {
    pub fn new(tool_name: &str, total: usize) -> Self {
        info!("Running {} on {} example programs...", tool_name, total);
        info!("{}", "=".repeat(80));

        Self {
            tool_name: tool_name.to_string(),
            total,
            processed: 0,
            failures: Vec::new(),
        }
    }

    /// Log the `[i/n]` header for the next program.
    pub fn begin(&self, file_name: &str) {
        info!("[{}/{}] {}", self.processed + 1, self.total, file_name);
        info!("{}", "-".repeat(40));
    }

    pub fn report_success(&mut self, file_name: &str, stats: Option<&str>) {
        self.processed += 1;
        match stats {
            Some(stats) => info!("SUCCESS: {} ({})", file_name, stats),
            None => info!("SUCCESS: {}", file_name),
        }
    }

    pub fn report_failure(&mut self, file_name: &str, error: &dyn std::fmt::Display) {
        self.processed += 1;
        error!("FAILED: {} - {}", file_name, error);
        self.failures.push(file_name.to_string());
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Log the summary. Returns `true` when every program succeeded.
    pub fn finish(self) -> bool {
        info!("{}", "=".repeat(80));
        info!("SUMMARY:");
        info!("  Total programs: {}", self.total);
        info!("  Successful: {}", self.processed - self.failures.len());
        info!("  Failed: {}", self.failures.len());

        if self.failures.is_empty() {
            info!("All example programs passed {}!", self.tool_name);
            true
        } else {
            error!(
                "{} failed on: {}",
                self.tool_name,
                self.failures.join(", ")
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tallies_failures() {
        let mut f = AllResultsFormatter::new("stratifier", 3);
        f.report_success("a.json", Some("2 strata"));
        f.report_failure("b.json", &"negation through recursion");
        f.report_success("c.json", None);
        assert_eq!(f.failed(), 1);
        assert!(!f.finish());
    }

    #[test]
    fn empty_batch_passes() {
        assert!(AllResultsFormatter::new("stratifier", 0).finish());
    }
}
