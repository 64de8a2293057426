use std::collections::HashSet;

use chrono::{TimeZone, Utc};
use watchlist_core::{Film, Reference, ResolutionStatus, StreamingOffer};
use watchlist_db::*;

fn found_film(slug: &str, title: &str) -> Film {
    Film {
        year: Some(2023),
        tmdb_id: Some(872585),
        status: ResolutionStatus::Found,
        poster_url: Some("https://image.tmdb.org/t/p/w300/x.jpg".to_string()),
        overview: Some("The story of J. Robert Oppenheimer.".to_string()),
        runtime_minutes: Some(181),
        original_language: Some("en".to_string()),
        genres: vec!["Drama".to_string(), "History".to_string()],
        offers: vec![StreamingOffer {
            provider_id: 8,
            provider_name: "Netflix".to_string(),
            logo_url: Some("https://image.tmdb.org/t/p/w45/netflix.png".to_string()),
        }],
        watch_link: Some("https://www.themoviedb.org/movie/872585/watch?locale=GB".to_string()),
        region: Some("GB".parse().unwrap()),
        last_checked_at: Some(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()),
        ..Film::pending(&Reference::new(slug, title))
    }
}

fn count_films(conn: &rusqlite::Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM films", [], |row| row.get(0))
        .unwrap()
}

fn keep(slugs: &[&str]) -> HashSet<String> {
    slugs.iter().map(|s| s.to_string()).collect()
}

#[test]
fn upsert_inserts_new_film() {
    let conn = open_memory().unwrap();
    let id = upsert_film(&conn, &found_film("oppenheimer-2023", "Oppenheimer")).unwrap();
    assert!(id > 0);
    assert_eq!(count_films(&conn), 1);
}

#[test]
fn upsert_overwrites_by_slug_and_keeps_id() {
    let conn = open_memory().unwrap();
    let first = upsert_film(&conn, &found_film("oppenheimer-2023", "Oppenheimer")).unwrap();

    let mut errored = Film::pending(&Reference::new("oppenheimer-2023", "Oppenheimer"));
    errored.status = ResolutionStatus::Error;
    errored.tmdb_id = Some(872585);
    let second = upsert_film(&conn, &errored).unwrap();

    assert_eq!(first, second);
    assert_eq!(count_films(&conn), 1);

    let (status, poster, genres): (String, Option<String>, String) = conn
        .query_row(
            "SELECT tmdb_status, poster_url, genres FROM films WHERE slug = 'oppenheimer-2023'",
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )
        .unwrap();
    assert_eq!(status, "error");
    assert_eq!(poster, None);
    assert_eq!(genres, "[]");
}

#[test]
fn lists_and_offers_stored_as_json() {
    let conn = open_memory().unwrap();
    upsert_film(&conn, &found_film("oppenheimer-2023", "Oppenheimer")).unwrap();

    let (genres, offers): (String, String) = conn
        .query_row(
            "SELECT genres, streaming_platforms FROM films",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(genres, r#"["Drama","History"]"#);
    assert!(offers.contains(r#""provider_name":"Netflix""#));
}

#[test]
fn delete_not_in_removes_only_missing_slugs() {
    let conn = open_memory().unwrap();
    for slug in ["a", "b", "c"] {
        upsert_film(&conn, &found_film(slug, slug)).unwrap();
    }

    let removed = delete_films_not_in(&conn, &keep(&["a", "c"])).unwrap();
    assert_eq!(removed, 1);

    let mut remaining: Vec<String> = list_films(&conn)
        .unwrap()
        .into_iter()
        .map(|f| f.slug)
        .collect();
    remaining.sort();
    assert_eq!(remaining, vec!["a", "c"]);
}

#[test]
fn delete_not_in_with_unknown_slugs_is_noop() {
    let conn = open_memory().unwrap();
    upsert_film(&conn, &found_film("a", "A")).unwrap();

    let removed = delete_films_not_in(&conn, &keep(&["a", "zzz"])).unwrap();
    assert_eq!(removed, 0);
    assert_eq!(count_films(&conn), 1);
}

#[test]
fn delete_not_in_empty_set_clears_table() {
    let conn = open_memory().unwrap();
    upsert_film(&conn, &found_film("a", "A")).unwrap();
    upsert_film(&conn, &found_film("b", "B")).unwrap();

    let removed = delete_films_not_in(&conn, &HashSet::new()).unwrap();
    assert_eq!(removed, 2);
    assert_eq!(count_films(&conn), 0);
}

#[test]
fn slugs_with_quotes_survive_reconciliation() {
    let conn = open_memory().unwrap();
    upsert_film(&conn, &found_film("it's-a-wonderful-life", "It's a Wonderful Life")).unwrap();
    upsert_film(&conn, &found_film("heat", "Heat")).unwrap();

    let removed = delete_films_not_in(&conn, &keep(&["it's-a-wonderful-life"])).unwrap();
    assert_eq!(removed, 1);
    assert!(find_film_by_slug(&conn, "it's-a-wonderful-life").unwrap().is_some());
}
