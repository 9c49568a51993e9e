// src/audit/report.rs
// =============================================================================
// The result aggregator.
//
// Exactly one task owns the Report. Workers (and the orchestrator, for
// malformed links) never touch it directly: they hand outcomes to a
// Reporter, which prints the progress line and sends the outcome down a
// channel to that task. No locks, and failures end up in arrival order.
//
// The aggregator sees every outcome, not only failures, so `checked` can be
// compared against the number of links that were submitted.
// =============================================================================

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::job::CheckOutcome;

#[derive(Debug, Default, Serialize)]
pub struct Report {
    /// Every outcome received, passed or failed
    pub checked: usize,
    /// Failed outcomes, in the order they arrived
    pub failures: Vec<CheckOutcome>,
}

impl Report {
    fn record(&mut self, outcome: CheckOutcome) {
        self.checked += 1;
        if !outcome.success {
            self.failures.push(outcome);
        }
    }

    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failure_lines(&self) -> Vec<String> {
        self.failures.iter().map(CheckOutcome::line).collect()
    }

    /// The final text block printed once every link has been checked.
    pub fn render_text(&self) -> String {
        if self.is_clean() {
            return "All good, found no broken links".to_string();
        }

        let mut out = String::from("ALL ERRORS:\n");
        for line in self.failure_lines() {
            out.push_str(&line);
            out.push('\n');
        }
        out.push_str(&format!(
            "\n📊 Summary: {} broken out of {} link(s)",
            self.failure_count(),
            self.checked
        ));
        out
    }
}

/// Cheap-to-clone handle every producer uses to publish an outcome.
#[derive(Debug, Clone)]
pub struct Reporter {
    tx: mpsc::UnboundedSender<CheckOutcome>,
    echo: bool,
    // Shared by every clone
    recorded: Arc<AtomicUsize>,
}

impl Reporter {
    // Spawns the aggregator task. The returned handle resolves to the final
    // Report once every Reporter clone has been dropped.
    //
    // `echo` controls whether each outcome is printed to stdout as it arrives.
    pub fn spawn(echo: bool) -> (Self, JoinHandle<Report>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let aggregator = tokio::spawn(aggregate(rx));
        let reporter = Self {
            tx,
            echo,
            recorded: Arc::new(AtomicUsize::new(0)),
        };
        (reporter, aggregator)
    }

    pub fn record(&self, outcome: CheckOutcome) {
        if self.echo {
            println!("{}", outcome.line());
        }
        if self.tx.send(outcome).is_err() {
            tracing::error!("result aggregator is gone, outcome dropped");
            return;
        }
        self.recorded.fetch_add(1, Ordering::SeqCst);
    }

    /// Outcomes handed to the aggregator so far, across all clones.
    pub fn recorded(&self) -> usize {
        self.recorded.load(Ordering::SeqCst)
    }
}

async fn aggregate(mut rx: mpsc::UnboundedReceiver<CheckOutcome>) -> Report {
    let mut report = Report::default();
    while let Some(outcome) = rx.recv().await {
        report.record(outcome);
    }
    report
}
