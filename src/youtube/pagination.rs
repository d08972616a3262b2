use tracing::warn;

use super::models::Page;
use crate::error::AppError;

/// Largest `maxResults` the list endpoints accept.
pub const MAX_PAGE_SIZE: usize = 50;

/// Collect up to `cap` items from a paginated endpoint.
///
/// `fetch` receives the page token (none for the first page) and the page
/// size. Paging stops when the endpoint returns no next-page token or once
/// `cap` items have been collected. A failing first page is an error; a
/// failure further in returns what was collected so far.
pub fn paginate<T, F>(cap: usize, mut fetch: F) -> Result<Vec<T>, AppError>
where
    F: FnMut(Option<&str>, usize) -> Result<Page<T>, AppError>,
{
    let mut collected = Vec::new();
    if cap == 0 {
        return Ok(collected);
    }

    let page_size = cap.min(MAX_PAGE_SIZE);
    let mut token: Option<String> = None;
    loop {
        let page = match fetch(token.as_deref(), page_size) {
            Ok(page) => page,
            Err(err) if token.is_some() => {
                warn!("Stopping pagination after {} item(s): {}", collected.len(), err);
                break;
            }
            Err(err) => return Err(err),
        };

        collected.extend(page.items);
        match page.next_page_token {
            Some(next) if !next.is_empty() && collected.len() < cap => token = Some(next),
            _ => break,
        }
    }

    collected.truncate(cap);
    Ok(collected)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages(
        total: usize,
        page_size: usize,
    ) -> impl FnMut(Option<&str>, usize) -> Result<Page<usize>, AppError> {
        move |token: Option<&str>, size: usize| {
            assert_eq!(size, page_size);
            let start: usize = token.map(|t| t.parse().unwrap()).unwrap_or(0);
            let end = (start + size).min(total);
            let next = (end < total).then(|| end.to_string());
            Ok(Page::new((start..end).collect(), next.as_deref()))
        }
    }

    #[test]
    fn stops_at_cap() {
        let items = paginate(120, pages(500, 50)).unwrap();
        assert_eq!(items.len(), 120);
        assert_eq!(items[119], 119);
    }

    #[test]
    fn stops_when_tokens_run_out() {
        let items = paginate(100, pages(37, 50)).unwrap();
        assert_eq!(items, (0..37).collect::<Vec<_>>());
    }

    #[test]
    fn small_caps_request_small_pages() {
        let items = paginate(10, pages(500, 10)).unwrap();
        assert_eq!(items.len(), 10);
    }

    #[test]
    fn zero_cap_never_fetches() {
        let items: Vec<usize> = paginate(0, |_, _| panic!("should not fetch")).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn first_page_error_propagates() {
        let result: Result<Vec<usize>, _> =
            paginate(10, |_, _| Err(AppError::Api { status: 403, body: "quota".to_string() }));
        assert!(matches!(result, Err(AppError::Api { status: 403, .. })));
    }

    #[test]
    fn later_page_error_keeps_partial_results() {
        let mut calls = 0;
        let items = paginate(200, |token, _| {
            calls += 1;
            match token {
                None => Ok(Page::new(vec![1, 2, 3], Some("next"))),
                Some(_) => Err(AppError::Api { status: 500, body: String::new() }),
            }
        })
        .unwrap();
        assert_eq!(items, vec![1, 2, 3]);
        assert_eq!(calls, 2);
    }
}
