use crate::utils::error::{AppError, AppResult};
use futures::future::BoxFuture;
use futures::stream::{self, Stream, TryStreamExt};

/// Page size used when walking whole tables during search.
pub const SCAN_PAGE_SIZE: i64 = 500;

/// Turns a `(limit, offset)` list call into a lazy stream of rows.
///
/// A page is requested only after the previous one has been consumed, and the
/// walk ends on the first short page. Calling `paginate` again restarts from
/// offset 0. The first fetch error ends the stream.
pub fn paginate<'a, T, F>(page_size: i64, fetch: F) -> impl Stream<Item = AppResult<T>> + Send + 'a
where
    T: Send + 'a,
    F: Fn(i64, i64) -> BoxFuture<'a, AppResult<Vec<T>>> + Send + 'a,
{
    let page_size = page_size.max(1);

    stream::try_unfold((fetch, 0_i64, false), move |(fetch, offset, exhausted)| async move {
        if exhausted {
            return Ok::<_, AppError>(None);
        }
        let page = fetch(page_size, offset).await?;
        if page.is_empty() {
            return Ok(None);
        }
        let fetched = page.len() as i64;
        let next = (fetch, offset + fetched, fetched < page_size);
        Ok(Some((page, next)))
    })
    .map_ok(|page| stream::iter(page.into_iter().map(Ok::<T, AppError>)))
    .try_flatten()
}
