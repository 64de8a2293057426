use std::collections::HashMap;

use super::*;

fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |var| map.get(var).cloned()
}

fn required_env() -> Vec<(&'static str, &'static str)> {
    vec![(USERNAME_VAR, "alice"), (API_KEY_VAR, "secret")]
}

#[test]
fn defaults_apply_when_only_required_values_set() {
    let settings = Settings::resolve(env_of(&required_env()), &WatchlistConfig::default()).unwrap();

    assert_eq!(settings.username, "alice");
    assert_eq!(settings.tmdb_api_key, "secret");
    assert_eq!(settings.region.code(), "GB");
    assert_eq!(settings.refresh_schedule.to_string(), DEFAULT_SCHEDULE);
    assert_eq!(settings.database_path, default_database_path());
    assert_eq!(settings.page_delay, Duration::from_millis(1500));
}

#[test]
fn env_beats_config_file() {
    let config = WatchlistConfig {
        username: Some("from-file".to_string()),
        tmdb_api_key: Some("file-key".to_string()),
        region: Some("FR".to_string()),
        ..Default::default()
    };
    let mut env = required_env();
    env.push((REGION_VAR, "us"));

    let settings = Settings::resolve(env_of(&env), &config).unwrap();
    assert_eq!(settings.username, "alice");
    assert_eq!(settings.region.code(), "US");
}

#[test]
fn config_file_beats_defaults() {
    let config = WatchlistConfig {
        username: Some("bob".to_string()),
        tmdb_api_key: Some("file-key".to_string()),
        schedule: Some("30 6 * * *".to_string()),
        database_path: Some(PathBuf::from("/srv/watchlist.db")),
        page_delay_ms: Some(0),
        ..Default::default()
    };

    let settings = Settings::resolve(env_of(&[]), &config).unwrap();
    assert_eq!(settings.username, "bob");
    assert_eq!(settings.refresh_schedule.to_string(), "30 6 * * *");
    assert_eq!(settings.database_path, PathBuf::from("/srv/watchlist.db"));
    assert_eq!(settings.page_delay, Duration::ZERO);
}

#[test]
fn blank_env_values_are_ignored() {
    let config = WatchlistConfig {
        username: Some("bob".to_string()),
        ..Default::default()
    };
    let env = env_of(&[(USERNAME_VAR, "  "), (API_KEY_VAR, "secret")]);

    let settings = Settings::resolve(env, &config).unwrap();
    assert_eq!(settings.username, "bob");
}

#[test]
fn missing_username_is_an_error() {
    let err = Settings::resolve(env_of(&[(API_KEY_VAR, "secret")]), &WatchlistConfig::default())
        .unwrap_err();
    assert!(matches!(
        err,
        SettingsError::Missing {
            env_var: USERNAME_VAR,
            ..
        }
    ));
}

#[test]
fn missing_api_key_is_an_error() {
    let err = Settings::resolve(env_of(&[(USERNAME_VAR, "alice")]), &WatchlistConfig::default())
        .unwrap_err();
    assert!(matches!(
        err,
        SettingsError::Missing {
            env_var: API_KEY_VAR,
            ..
        }
    ));
}

#[test]
fn named_schedule_from_env() {
    let mut env = required_env();
    env.push((SCHEDULE_VAR, "0 9 * * mon-fri"));
    let settings = Settings::resolve(env_of(&env), &WatchlistConfig::default()).unwrap();
    assert_eq!(settings.refresh_schedule.to_string(), "0 9 * * mon-fri");
}

#[test]
fn invalid_values_are_reported() {
    let mut env = required_env();
    env.push((REGION_VAR, "GBR"));
    let err = Settings::resolve(env_of(&env), &WatchlistConfig::default()).unwrap_err();
    assert!(matches!(err, SettingsError::InvalidRegion(_)));

    let mut env = required_env();
    env.push((SCHEDULE_VAR, "every sunday"));
    let err = Settings::resolve(env_of(&env), &WatchlistConfig::default()).unwrap_err();
    assert!(matches!(err, SettingsError::InvalidSchedule(_)));

    let mut env = required_env();
    env.push((PAGE_DELAY_VAR, "soon"));
    let err = Settings::resolve(env_of(&env), &WatchlistConfig::default()).unwrap_err();
    assert!(matches!(err, SettingsError::InvalidNumber { .. }));
}

#[test]
fn sources_report_provenance() {
    let config = WatchlistConfig {
        tmdb_api_key: Some("file-key".to_string()),
        ..Default::default()
    };
    let sources = resolve_sources(env_of(&[(REGION_VAR, "DE")]), &config);

    assert_eq!(sources.username, SettingSource::Missing);
    assert_eq!(sources.tmdb_api_key, SettingSource::ConfigFile);
    assert_eq!(sources.region, SettingSource::EnvVar(REGION_VAR));
    assert_eq!(sources.refresh_schedule, SettingSource::Default);
    assert_eq!(sources.region.to_string(), "env $WATCHLIST_REGION");
}

#[test]
fn config_table_is_read_from_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "[watchlist]\nusername = \"carol\"\nregion = \"NL\"\npage_delay_ms = 250\n",
    )
    .unwrap();

    let config = read_config(&path).unwrap();
    assert_eq!(config.username.as_deref(), Some("carol"));
    assert_eq!(config.region.as_deref(), Some("NL"));
    assert_eq!(config.page_delay_ms, Some(250));

    std::fs::write(&path, "[watchlist\n").unwrap();
    assert!(matches!(
        read_config(&path),
        Err(SettingsError::ConfigFile { .. })
    ));
}

#[test]
fn missing_config_file_is_empty() {
    let config = read_config(Path::new("/nonexistent/watchlist-sync/config.toml")).unwrap();
    assert!(config.username.is_none());
}
