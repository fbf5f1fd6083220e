//! Cursor-driven pagination over one filtered query.
//!
//! The API caps every page at [`PAGE_SIZE`] records and offers no page
//! tokens. A full page means more may follow; the next request restarts the
//! query just after the last record received, by epoch or by id depending on
//! the query's sort key.

use std::future::Future;

use discosweb_api::types::{Record, SortFields};
use discosweb_api::{Cursor, Query, SortKey};

use crate::error::DiscosError;

/// Records per page returned by the API.
pub const PAGE_SIZE: usize = 30;

/// Fetches every page of `query` and returns the records in server order.
///
/// `fetch_page` receives the query for the page and its 1-based number. A
/// page shorter than `page_size` ends the loop, including an empty first page.
pub async fn fetch_all_pages<Q, A, F, Fut>(
    query: Q,
    page_size: usize,
    mut fetch_page: F,
) -> Result<Vec<Record<A>>, DiscosError>
where
    Q: Query + Clone,
    A: SortFields,
    F: FnMut(Q, usize) -> Fut,
    Fut: Future<Output = Result<Vec<Record<A>>, DiscosError>>,
{
    let mut query = query;
    let mut records = Vec::new();
    let mut page_no = 1;

    loop {
        let page = fetch_page(query.clone(), page_no).await?;
        let full = !page.is_empty() && page.len() >= page_size;

        let next = match page.last() {
            Some(last) if full => {
                if query.sort_key() == SortKey::Epoch {
                    warn_on_shared_second(&page);
                }
                Some(Cursor::after(query.sort_key(), last)?)
            }
            _ => None,
        };

        tracing::debug!("Page {} returned {} records", page_no, page.len());
        records.extend(page);

        let Some(cursor) = next else {
            break;
        };
        if let Some(current) = query.cursor() {
            if cursor <= current {
                return Err(DiscosError::StalledCursor(format!(
                    "next cursor {:?} does not advance past {:?}",
                    cursor, current
                )));
            }
        }
        query = query.with_cursor(cursor);
        page_no += 1;
    }

    Ok(records)
}

/// The epoch cursor skips anything sharing the last record's second. Two
/// records in that second at the end of a full page hint at such a skip.
fn warn_on_shared_second<A: SortFields>(page: &[Record<A>]) {
    if let [.., before, last] = page {
        let second = |r: &Record<A>| {
            r.attributes
                .epoch()
                .and_then(|e| e.get(..19))
                .map(str::to_owned)
        };
        if let (Some(a), Some(b)) = (second(before), second(last)) {
            if a == b {
                tracing::warn!(
                    "Records {} and {} share epoch second {}; records later in that second may be skipped",
                    before.id,
                    last.id,
                    b
                );
            }
        }
    }
}
