use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use watchlist_lib::settings::{self, SettingSource};

use crate::CliError;

fn mask_value(s: &str) -> String {
    if s.chars().count() <= 4 {
        "****".to_string()
    } else {
        format!("{}****", s.chars().take(4).collect::<String>())
    }
}

/// Show current settings and their sources.
pub(crate) fn run_config_show() -> Result<(), CliError> {
    let path = settings::config_path();
    let sources = settings::setting_sources()?;

    println!("{}", "Watchlist Configuration".if_supports_color(Stdout, |t| t.bold()));
    println!();
    println!(
        "  Config file: {} {}",
        path.display().if_supports_color(Stdout, |t| t.cyan()),
        if path.exists() {
            "(exists)".if_supports_color(Stdout, |t| t.green()).to_string()
        } else {
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()).to_string()
        },
    );
    println!();

    // Settings::load() fails outright when a required value is missing, so
    // values are only shown when the whole configuration resolves.
    let resolved = settings::Settings::load();
    if let Err(e) = &resolved {
        println!("  {}", e.if_supports_color(Stdout, |t| t.red()));
        println!();
    }
    let resolved = resolved.ok();

    let fields: [(&str, &SettingSource, Option<String>); 6] = [
        (
            "username",
            &sources.username,
            resolved.as_ref().map(|s| s.username.clone()),
        ),
        (
            "tmdb_api_key",
            &sources.tmdb_api_key,
            resolved.as_ref().map(|s| mask_value(&s.tmdb_api_key)),
        ),
        (
            "region",
            &sources.region,
            resolved.as_ref().map(|s| s.region.to_string()),
        ),
        (
            "schedule",
            &sources.refresh_schedule,
            resolved.as_ref().map(|s| s.refresh_schedule.to_string()),
        ),
        (
            "database_path",
            &sources.database_path,
            resolved
                .as_ref()
                .map(|s| s.database_path.display().to_string()),
        ),
        (
            "page_delay_ms",
            &sources.page_delay,
            resolved
                .as_ref()
                .map(|s| s.page_delay.as_millis().to_string()),
        ),
    ];

    for (name, source, value) in fields {
        let source_str = format!("({})", source);
        let value = match (value, source) {
            (Some(v), _) => v,
            (None, SettingSource::Missing) => "not set".to_string(),
            (None, _) => "-".to_string(),
        };
        println!(
            "  {} {} {}",
            format!("{}:", name).if_supports_color(Stdout, |t| t.cyan()),
            value,
            source_str.if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    Ok(())
}

/// Print the config file path.
pub(crate) fn run_config_path() -> Result<(), CliError> {
    println!("{}", settings::config_path().display());
    Ok(())
}
