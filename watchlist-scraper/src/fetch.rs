use tokio::time::Duration;
use watchlist_core::Reference;

use crate::client::PageSource;
use crate::error::ScrapeError;
use crate::parse::parse_watchlist_page;

/// Pause between successive page requests.
pub const DEFAULT_PAGE_DELAY: Duration = Duration::from_millis(1500);

/// Scrape every page of `username`'s watchlist.
///
/// Pages are fetched strictly in order, one at a time, because whether to
/// continue depends on the previous page's next link. `page_delay` is slept
/// between pages; pass `Duration::ZERO` to skip it. References are returned in
/// page order; duplicates across pages are kept.
pub async fn fetch_watchlist(
    source: &dyn PageSource,
    username: &str,
    page_delay: Duration,
) -> Result<Vec<Reference>, ScrapeError> {
    let mut references = Vec::new();
    let mut page = 1;

    loop {
        let html = source.fetch_page(username, page).await?;
        let parsed = parse_watchlist_page(&html);
        log::debug!(
            "Watchlist page {}: {} films (next page: {})",
            page,
            parsed.references.len(),
            parsed.has_next,
        );
        references.extend(parsed.references);

        if !parsed.has_next {
            break;
        }

        page += 1;
        if !page_delay.is_zero() {
            tokio::time::sleep(page_delay).await;
        }
    }

    log::info!(
        "Scraped {} films across {} page(s) for {}",
        references.len(),
        page,
        username
    );
    Ok(references)
}

#[cfg(test)]
#[path = "tests/fetch_tests.rs"]
mod tests;
