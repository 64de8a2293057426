use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use watchlist_lib::Settings;

use crate::CliError;
use crate::spinner::spinner;

/// Run one refresh in the foreground and print its summary.
pub(crate) fn run_refresh() -> Result<(), CliError> {
    let settings = Settings::load()?;
    let refresher = super::build_refresher(&settings)?;
    let rt = super::runtime()?;

    let pb = spinner(format!(
        "Refreshing watchlist of {} ({})...",
        settings.username, settings.region
    ));
    let result = rt.block_on(
        refresher.run_refresh_with_summary(&settings.username, &settings.region),
    );
    pb.finish_and_clear();

    match result? {
        Some(summary) => {
            println!(
                "{} Refreshed {} films",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                summary.scraped,
            );
            println!();
            println!(
                "  Found:     {}",
                summary.found.if_supports_color(Stdout, |t| t.green())
            );
            println!(
                "  Not found: {}",
                summary.not_found.if_supports_color(Stdout, |t| t.yellow())
            );
            println!(
                "  Errors:    {}",
                summary.errored.if_supports_color(Stdout, |t| t.red())
            );
            println!("  Removed:   {}", summary.removed);
        }
        None => {
            println!(
                "{} A refresh is already running",
                "\u{2718}".if_supports_color(Stdout, |t| t.yellow()),
            );
        }
    }
    Ok(())
}
