//! Live batch progress over an indicatif bar. Implements ProgressPort.
//!
//! One line per recipient outcome, running tallies in the bar message,
//! summary line on completion.

use crate::domain::{BatchStats, DispatchEvent, SendOutcome};
use crate::ports::ProgressPort;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Mutex;

/// Progress sink backed by an indicatif bar. The bar is created on the
/// batch start event (that's when the total is known) and dropped on
/// completion, so one sink instance can serve consecutive batches.
#[derive(Default)]
pub struct IndicatifProgress {
    bar: Mutex<Option<ProgressBar>>,
}

impl IndicatifProgress {
    pub fn new() -> Self {
        Self::default()
    }

    fn style() -> ProgressStyle {
        ProgressStyle::with_template("{bar:40.green} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
    }
}

#[async_trait::async_trait]
impl ProgressPort for IndicatifProgress {
    async fn on_start(&self, total: usize) {
        let bar = ProgressBar::new(total as u64);
        bar.set_style(Self::style());
        bar.set_message("sending");
        *self.bar.lock().await = Some(bar);
    }

    async fn on_outcome(&self, event: &DispatchEvent) {
        let guard = self.bar.lock().await;
        if let Some(bar) = guard.as_ref() {
            let line = match &event.outcome {
                SendOutcome::Sent => {
                    format!("[ok]   {} ({}) message sent", event.recipient.name, event.address)
                }
                SendOutcome::Failed { reason } => {
                    format!("[fail] {} ({}) {}", event.recipient.name, event.address, reason)
                }
            };
            bar.println(line);
            bar.set_message(format!(
                "ok {} / fail {}",
                event.stats.succeeded, event.stats.failed
            ));
            bar.inc(1);
        }
    }

    async fn on_complete(&self, stats: &BatchStats) {
        if let Some(bar) = self.bar.lock().await.take() {
            bar.finish_with_message(format!(
                "done: {}/{} sent, {} failed",
                stats.succeeded, stats.total, stats.failed
            ));
        }
    }
}
