use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use watchlist_db::FilmStore;

use crate::CliError;

/// Print the last refresh time and per-status counts.
pub(crate) fn run_status() -> Result<(), CliError> {
    let store = super::open_store()?;
    let counts = store.status_counts()?;

    match store.last_refreshed()? {
        Some(at) => println!(
            "Last refreshed: {}",
            at.format("%Y-%m-%d %H:%M UTC")
                .if_supports_color(Stdout, |t| t.cyan())
        ),
        None => println!(
            "Last refreshed: {}",
            "never".if_supports_color(Stdout, |t| t.yellow())
        ),
    }
    println!();
    println!("  Films:     {}", counts.total());
    println!(
        "  Found:     {}",
        counts.found.if_supports_color(Stdout, |t| t.green())
    );
    println!(
        "  Not found: {}",
        counts.not_found.if_supports_color(Stdout, |t| t.yellow())
    );
    println!(
        "  Errors:    {}",
        counts.error.if_supports_color(Stdout, |t| t.red())
    );
    if counts.pending > 0 {
        println!("  Pending:   {}", counts.pending);
    }
    Ok(())
}
