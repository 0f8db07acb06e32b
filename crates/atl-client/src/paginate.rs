//! Lazy traversal of paginated endpoints.
//!
//! A [`Paginator`] owns a fetch function that turns a [`Cursor`] into one
//! decoded [`Page`]. It knows nothing about HTTP; the transport is wired in
//! by [`AtlassianClient::paginate`](crate::AtlassianClient::paginate) or by
//! the caller.
//!
//! ```text
//!   Cursor ──fetch──▶ Page<T> ──continuation()──▶ next Cursor ──fetch──▶ ...
//!                        │
//!                        └──▶ items yielded to the caller
//! ```
//!
//! Traversal is sequential by default. [`Paginator::bulk`] plans the
//! remaining cursors from the first page's total and fetches up to
//! `workers` pages at once, still emitting them in page order.

use std::collections::HashSet;
use std::future::Future;

use futures::future::{self, Either};
use futures::stream::{self, BoxStream, Stream, StreamExt, TryStreamExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::page::{Cursor, Page, PlannedCursors};

/// One fetched page together with where it started and where the next one
/// starts. Persist `next` to resume a traversal later with
/// [`Paginator::starting_at`].
#[derive(Debug, Clone, PartialEq)]
pub struct TraversedPage<T> {
    pub cursor: Cursor,
    pub next: Option<Cursor>,
    pub items: Vec<T>,
}

/// A restartable traversal over a paginated endpoint.
pub struct Paginator<F> {
    fetch: F,
    start: Cursor,
    cancel: Option<CancellationToken>,
}

impl<F> std::fmt::Debug for Paginator<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Paginator")
            .field("start", &self.start)
            .field("cancellable", &self.cancel.is_some())
            .finish_non_exhaustive()
    }
}

impl<F> Paginator<F> {
    /// Create a traversal that begins at `start`.
    pub fn new(fetch: F, start: Cursor) -> Self {
        Self {
            fetch,
            start,
            cancel: None,
        }
    }

    /// Restart from a previously observed cursor.
    pub fn starting_at(mut self, cursor: Cursor) -> Self {
        self.start = cursor;
        self
    }

    /// Stop the traversal once `token` is cancelled. Checked before every
    /// fetch.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// The cursor the traversal begins at.
    pub fn start(&self) -> &Cursor {
        &self.start
    }
}

struct Sequential<F> {
    fetch: F,
    next: Option<Cursor>,
    seen: HashSet<Cursor>,
    cancel: Option<CancellationToken>,
}

fn is_cancelled(cancel: &Option<CancellationToken>) -> bool {
    cancel.as_ref().is_some_and(CancellationToken::is_cancelled)
}

fn sequential<F, Fut, T>(state: Sequential<F>) -> impl Stream<Item = Result<TraversedPage<T>>>
where
    F: FnMut(Cursor) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    stream::unfold(state, |mut state| async move {
        let cursor = state.next.take()?;

        if is_cancelled(&state.cancel) {
            debug!(%cursor, "Traversal cancelled before fetch");
            return Some((Err(Error::cancelled()), state));
        }

        if !state.seen.insert(cursor.clone()) {
            warn!(%cursor, "Cursor already fetched in this traversal, stopping");
            return None;
        }

        match (state.fetch)(cursor.clone()).await {
            Ok(page) => {
                let continuation = page.continuation();
                let next = continuation.next.filter(|_| continuation.has_more);
                debug!(
                    %cursor,
                    items = page.items.len(),
                    has_more = next.is_some(),
                    "Fetched page"
                );
                state.next = next.clone();
                Some((
                    Ok(TraversedPage {
                        cursor,
                        next,
                        items: page.items,
                    }),
                    state,
                ))
            }
            Err(err) => {
                debug!(%cursor, error = %err, "Page fetch failed, ending traversal");
                Some((Err(err), state))
            }
        }
    })
}

fn flatten_items<T, S>(pages: S) -> impl Stream<Item = Result<T>>
where
    S: Stream<Item = Result<TraversedPage<T>>>,
{
    pages.flat_map(|page| match page {
        Ok(page) => Either::Left(stream::iter(page.items.into_iter().map(Ok::<T, Error>))),
        Err(err) => Either::Right(stream::once(future::ready(Err(err)))),
    })
}

/// End a stream right after its first error.
fn stop_after_error<T, S>(stream: S) -> impl Stream<Item = Result<T>>
where
    S: Stream<Item = Result<T>>,
{
    stream.scan(false, |failed, item| {
        if *failed {
            return future::ready(None);
        }
        *failed = item.is_err();
        future::ready(Some(item))
    })
}

impl<F, Fut, T> Paginator<F>
where
    F: FnMut(Cursor) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    /// Stream every page, one fetch at a time.
    ///
    /// The stream ends at the first no-more signal, on the first error
    /// (yielded once), on cancellation, or when a cursor would be fetched a
    /// second time.
    pub fn pages(self) -> impl Stream<Item = Result<TraversedPage<T>>> {
        sequential(Sequential {
            fetch: self.fetch,
            next: Some(self.start),
            seen: HashSet::new(),
            cancel: self.cancel,
        })
    }

    /// Stream every item, one page fetch at a time.
    pub fn items(self) -> impl Stream<Item = Result<T>> {
        flatten_items(self.pages())
    }

    /// Fetch every item, or fail with the first error.
    pub async fn collect_all(self) -> Result<Vec<T>> {
        self.items().try_collect().await
    }

    /// Fetch items until the first error, returning what was gathered
    /// before it.
    pub async fn collect_partial(self) -> (Vec<T>, Option<Error>) {
        let mut items = Vec::new();
        let mut stream = std::pin::pin!(self.items());
        while let Some(item) = stream.next().await {
            match item {
                Ok(item) => items.push(item),
                Err(err) => return (items, Some(err)),
            }
        }
        (items, None)
    }
}

impl<F, Fut, T> Paginator<F>
where
    F: FnMut(Cursor) -> Fut + Send + 'static,
    Fut: Future<Output = Result<Page<T>>> + Send + 'static,
    T: Send + 'static,
{
    /// Stream every page with up to `workers` fetches in flight.
    ///
    /// The first page is fetched alone. If it reports a total and carries no
    /// `next` link, the remaining cursors are planned from it and fetched
    /// concurrently; pages are still emitted in order. Otherwise this falls
    /// back to [`Paginator::pages`] from the second page on.
    pub fn bulk_pages(self, workers: usize) -> BoxStream<'static, Result<TraversedPage<T>>> {
        let workers = workers.max(1);
        let Paginator {
            mut fetch,
            start,
            cancel,
        } = self;

        let first = async move {
            if is_cancelled(&cancel) {
                return stream::once(future::ready(Err(Error::cancelled()))).boxed();
            }

            let page = match fetch(start.clone()).await {
                Ok(page) => page,
                Err(err) => return stream::once(future::ready(Err(err))).boxed(),
            };

            let continuation = page.continuation();
            let linked = matches!(continuation.next, Some(Cursor::Link(_)));
            let planned = page
                .descriptor
                .remaining_cursors()
                .filter(|_| continuation.has_more && !linked);

            match planned {
                Some(cursors) => {
                    debug!(
                        first = %start,
                        total = page.descriptor.total(),
                        workers,
                        "Planned bulk traversal"
                    );
                    let head = TraversedPage {
                        cursor: start,
                        next: cursors.clone().next(),
                        items: page.items,
                    };
                    stream::once(future::ready(Ok(head)))
                        .chain(planned_pages(fetch, cursors, cancel, workers))
                        .boxed()
                }
                None => {
                    let next = continuation.next.filter(|_| continuation.has_more);
                    let head = TraversedPage {
                        cursor: start.clone(),
                        next: next.clone(),
                        items: page.items,
                    };
                    let rest = sequential(Sequential {
                        fetch,
                        next,
                        seen: HashSet::from([start]),
                        cancel,
                    });
                    stream::once(future::ready(Ok(head))).chain(rest).boxed()
                }
            }
        };

        stop_after_error(stream::once(first).flatten()).boxed()
    }

    /// Stream every item with up to `workers` page fetches in flight, in
    /// page order.
    pub fn bulk(self, workers: usize) -> BoxStream<'static, Result<T>> {
        flatten_items(self.bulk_pages(workers)).boxed()
    }
}

fn planned_pages<F, Fut, T>(
    mut fetch: F,
    cursors: PlannedCursors,
    cancel: Option<CancellationToken>,
    workers: usize,
) -> impl Stream<Item = Result<TraversedPage<T>>>
where
    F: FnMut(Cursor) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    let mut cursors = cursors.peekable();
    let with_next = std::iter::from_fn(move || {
        let cursor = cursors.next()?;
        Some((cursor, cursors.peek().cloned()))
    });

    stream::iter(with_next)
        .map(move |(cursor, next)| {
            let fetched = if is_cancelled(&cancel) {
                debug!(%cursor, "Traversal cancelled before dispatch");
                Either::Left(future::ready(Err::<Page<T>, _>(Error::cancelled())))
            } else {
                Either::Right(fetch(cursor.clone()))
            };
            async move {
                let page = fetched.await?;
                Ok::<_, Error>(TraversedPage {
                    cursor,
                    next,
                    items: page.items,
                })
            }
        })
        .buffered(workers)
}
