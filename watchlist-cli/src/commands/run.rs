use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use watchlist_lib::{Scheduler, Settings};

use crate::CliError;

/// Run the scheduler in the foreground until Ctrl-C.
pub(crate) fn run_scheduler(now: bool) -> Result<(), CliError> {
    let settings = Settings::load()?;
    let refresher = super::build_refresher(&settings)?;
    let rt = super::runtime()?;

    println!(
        "Watching {}'s watchlist on schedule {} (region {})",
        settings.username.if_supports_color(Stdout, |t| t.bold()),
        settings
            .refresh_schedule
            .if_supports_color(Stdout, |t| t.cyan()),
        settings.region,
    );
    println!(
        "{}",
        "Press Ctrl-C to stop.".if_supports_color(Stdout, |t| t.dimmed())
    );

    rt.block_on(async {
        if now {
            let trigger = refresher.trigger(settings.username.clone(), settings.region.clone());
            log::info!("Startup refresh: {}", trigger.status());
        }

        let scheduler = Scheduler::new(
            refresher.clone(),
            settings.refresh_schedule.clone(),
            settings.username.clone(),
            settings.region.clone(),
        );
        scheduler
            .run(async {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    log::error!("Could not listen for Ctrl-C: {}", e);
                    std::future::pending::<()>().await;
                }
            })
            .await;
    });

    if refresher.is_refreshing() {
        log::warn!("Exiting with a refresh still in progress");
    }
    Ok(())
}
