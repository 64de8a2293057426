use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use watchlist_core::{Film, ResolutionStatus};
use watchlist_db::FilmStore;

use crate::CliError;

/// Print stored films, optionally filtered by status.
pub(crate) fn run_list(status: Option<ResolutionStatus>) -> Result<(), CliError> {
    let store = super::open_store()?;
    let films: Vec<Film> = store
        .list_all()?
        .into_iter()
        .filter(|f| status.is_none_or(|s| f.status == s))
        .collect();

    if films.is_empty() {
        println!("No films stored. Run `watchlist refresh` first.");
        return Ok(());
    }

    for film in &films {
        print_film(film);
    }
    println!();
    println!("{} films", films.len());
    Ok(())
}

fn print_film(film: &Film) {
    let year = film.year.map(|y| format!(" ({})", y)).unwrap_or_default();
    let status = format!("[{}]", film.status);

    println!(
        "{}{} {}",
        film.title.if_supports_color(Stdout, |t| t.bold()),
        year,
        match film.status {
            ResolutionStatus::Found => status.if_supports_color(Stdout, |t| t.green()).to_string(),
            ResolutionStatus::NotFound => {
                status.if_supports_color(Stdout, |t| t.yellow()).to_string()
            }
            ResolutionStatus::Error => status.if_supports_color(Stdout, |t| t.red()).to_string(),
            ResolutionStatus::Pending => {
                status.if_supports_color(Stdout, |t| t.dimmed()).to_string()
            }
        },
    );

    if !film.genres.is_empty() {
        println!(
            "  {}",
            film.genres
                .join(", ")
                .if_supports_color(Stdout, |t| t.dimmed())
        );
    }
    if !film.offers.is_empty() {
        let providers: Vec<&str> = film
            .offers
            .iter()
            .map(|o| o.provider_name.as_str())
            .collect();
        println!(
            "  Streaming: {}",
            providers
                .join(", ")
                .if_supports_color(Stdout, |t| t.cyan())
        );
    }
}
