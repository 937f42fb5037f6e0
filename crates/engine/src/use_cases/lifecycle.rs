//! Statistics side effects of game and user lifecycle events.
//!
//! Called only after the primary mutation has been persisted. A failed adjustment is logged
//! and dropped: it never fails or undoes the mutation that triggered it, and it is not
//! retried. The counters are therefore eventually consistent with the games and users they
//! count.

use std::sync::Arc;

use pokerledger_domain::LifecycleEvent;

use super::stats::StatsCounter;

pub struct LifecycleEffects {
    stats: Arc<StatsCounter>,
}

impl LifecycleEffects {
    pub fn new(stats: Arc<StatsCounter>) -> Self {
        Self { stats }
    }

    /// Apply the counter deltas owed for `event`. Returns how many were applied.
    pub async fn record(&self, event: LifecycleEvent) -> usize {
        let mut applied = 0;
        for delta in event.stat_deltas() {
            match self.stats.apply(delta.field, delta.delta).await {
                Ok(()) => applied += 1,
                Err(e) => {
                    tracing::warn!(
                        event = ?event,
                        field = %delta.field,
                        delta = delta.delta,
                        error = %e,
                        "Statistics adjustment failed"
                    );
                }
            }
        }
        applied
    }
}
