//! Refresh orchestration for the watchlist: one exclusive
//! scrape → enrich → store → reconcile pass, the cron schedule that drives it,
//! and the settings both are configured from.

pub mod error;
pub mod refresh;
pub mod schedule;
pub mod settings;

pub use error::{RefreshError, SettingsError};
pub use refresh::{RefreshSummary, Refresher, Trigger, TriggerStatus};
pub use schedule::{CronError, CronSchedule, Scheduler};
pub use settings::{SettingSource, SettingSources, Settings, WatchlistConfig};
