//! Five-field cron schedules and the loop that fires refreshes on them.
//!
//! Fields are `minute hour day-of-month month day-of-week`, evaluated in UTC,
//! with classic cron semantics: day-of-week 0 and 7 are Sunday, month and
//! weekday names (`jan`, `mon-fri`) are accepted, and when both day fields are
//! restricted a day matches if *either* does.

use std::fmt;
use std::future::Future;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use croner::Cron;
use thiserror::Error;
use watchlist_core::Region;

use crate::refresh::Refresher;

#[derive(Debug, Error)]
pub enum CronError {
    #[error("expected 5 fields (minute hour day month weekday), found {0}")]
    FieldCount(usize),

    #[error("invalid cron expression '{expression}': {source}")]
    Invalid {
        expression: String,
        source: croner::errors::CronError,
    },
}

/// A parsed five-field cron expression.
#[derive(Debug, Clone)]
pub struct CronSchedule {
    expression: String,
    cron: Cron,
}

impl CronSchedule {
    /// First fire time strictly after `after`, or `None` if the expression
    /// can never match (e.g. `0 0 31 2 *`).
    pub fn next_after(&self, after: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.cron.find_next_occurrence(&after, false).ok()
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }
}

impl fmt::Display for CronSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression)
    }
}

impl FromStr for CronSchedule {
    type Err = CronError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split_whitespace().collect();
        if fields.len() != 5 {
            return Err(CronError::FieldCount(fields.len()));
        }
        let expression = fields.join(" ");

        let cron = Cron::new(&expression)
            .parse()
            .map_err(|source| CronError::Invalid {
                expression: expression.clone(),
                source,
            })?;
        Ok(Self { expression, cron })
    }
}

// ── Scheduler ───────────────────────────────────────────────────────────────

/// Fires a refresh every time the schedule comes due.
pub struct Scheduler {
    refresher: Arc<Refresher>,
    schedule: CronSchedule,
    username: String,
    region: Region,
}

impl Scheduler {
    pub fn new(
        refresher: Arc<Refresher>,
        schedule: CronSchedule,
        username: impl Into<String>,
        region: Region,
    ) -> Self {
        Self {
            refresher,
            schedule,
            username: username.into(),
            region,
        }
    }

    /// Loop until `shutdown` resolves. A failed or skipped run is logged and
    /// the loop carries on to the next fire time.
    ///
    /// Shutdown is observed while a scheduled refresh runs too; the run is
    /// dropped mid-flight, which releases the refresh flag.
    pub async fn run<F>(&self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            let now = Utc::now();
            let Some(next) = self.schedule.next_after(now) else {
                log::error!("Schedule '{}' never fires; scheduler stopping", self.schedule);
                return;
            };
            log::info!("Next refresh at {}", next.format("%Y-%m-%d %H:%M UTC"));

            let wait = (next - now).to_std().unwrap_or_default();
            tokio::select! {
                _ = &mut shutdown => {
                    log::info!("Scheduler shutting down");
                    return;
                }
                _ = tokio::time::sleep(wait) => {}
            }

            let refresh = self
                .refresher
                .run_refresh_with_summary(&self.username, &self.region);
            tokio::select! {
                _ = &mut shutdown => {
                    log::warn!("Scheduler shutting down, abandoning the refresh in progress");
                    return;
                }
                outcome = refresh => match outcome {
                    Ok(Some(summary)) => log::info!("Scheduled refresh completed: {}", summary),
                    Ok(None) => log::info!("Scheduled refresh skipped, another refresh is running"),
                    Err(e) => log::error!("Scheduled refresh failed: {}", e),
                },
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/schedule_tests.rs"]
mod tests;
