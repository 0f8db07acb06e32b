//! Page descriptors for the three pagination idioms and their normalization
//! into a single continuation signal.
//!
//! | Idiom          | Wire fields                                   | Products            |
//! |----------------|-----------------------------------------------|---------------------|
//! | `OffsetLimit`  | `start`, `limit`, `size`, `isLastPage`        | Confluence, JSM     |
//! | `StartAtTotal` | `startAt`, `maxResults`, `total`, `isLast`    | Jira, Jira Software |
//! | `IndexedTotal` | `startIndex`, `itemsPerPage`, `totalResults`  | Admin SCIM          |

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where a page starts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cursor {
    /// A client-computed offset (or 1-based index for SCIM).
    Offset(u64),
    /// An opaque, server-chosen continuation URL.
    Link(String),
}

impl Cursor {
    /// The numeric offset, if this is an offset cursor.
    pub fn offset(&self) -> Option<u64> {
        match self {
            Cursor::Offset(offset) => Some(*offset),
            Cursor::Link(_) => None,
        }
    }

    /// The continuation URL, if this is a link cursor.
    pub fn link(&self) -> Option<&str> {
        match self {
            Cursor::Offset(_) => None,
            Cursor::Link(link) => Some(link),
        }
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cursor::Offset(offset) => write!(f, "offset {}", offset),
            Cursor::Link(link) => write!(f, "link {}", link),
        }
    }
}

/// The `_links` object attached to Confluence and Service Desk pages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkSet {
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
}

impl LinkSet {
    /// The `next` link as a cursor, resolved against `base` when relative.
    pub fn next_cursor(&self) -> Option<Cursor> {
        let next = self.next.as_deref().map(str::trim).filter(|n| !n.is_empty())?;

        if next.starts_with("http://") || next.starts_with("https://") {
            return Some(Cursor::Link(next.to_string()));
        }

        let link = match self.base.as_deref().map(str::trim).filter(|b| !b.is_empty()) {
            Some(base) => format!(
                "{}/{}",
                base.trim_end_matches('/'),
                next.trim_start_matches('/')
            ),
            None => next.to_string(),
        };
        Some(Cursor::Link(link))
    }

    /// Resolve a relative `next` against `endpoint`, the URL this page was
    /// fetched from, when no `base` came with it.
    ///
    /// A path-absolute `next` is read below `context` (e.g. `/wiki`).
    pub fn anchor(&mut self, endpoint: &str) {
        if self.base.as_deref().is_some_and(|b| !b.trim().is_empty()) {
            return;
        }
        let Some(next) = self.next.as_deref().map(str::trim).filter(|n| !n.is_empty()) else {
            return;
        };
        let Ok(endpoint) = url::Url::parse(endpoint) else {
            return;
        };

        let relative = match self.context.as_deref().map(str::trim) {
            Some(context) if next.starts_with('/') && !next.starts_with(context) => {
                format!("{}{}", context.trim_end_matches('/'), next)
            }
            _ => next.to_string(),
        };
        if let Ok(resolved) = endpoint.join(&relative) {
            self.next = Some(resolved.into());
        }
    }
}

/// The pagination fields of one page. Exactly one idiom per page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDescriptor {
    OffsetLimit {
        start: u64,
        limit: u64,
        size: u64,
        is_last_page: Option<bool>,
    },
    StartAtTotal {
        start_at: u64,
        max_results: u64,
        total: Option<u64>,
        is_last: Option<bool>,
    },
    IndexedTotal {
        start_index: u64,
        items_per_page: u64,
        total_results: u64,
    },
}

/// Whether another page exists, and where it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Continuation {
    pub has_more: bool,
    pub next: Option<Cursor>,
}

impl Continuation {
    /// No more data.
    pub fn done() -> Self {
        Self {
            has_more: false,
            next: None,
        }
    }

    fn at(offset: u64) -> Self {
        Self {
            has_more: true,
            next: Some(Cursor::Offset(offset)),
        }
    }
}

impl PageDescriptor {
    /// Normalize this page into a continuation signal.
    ///
    /// A non-empty `next` link wins over the numeric fields.
    pub fn continuation(&self, links: Option<&LinkSet>) -> Continuation {
        if let Some(cursor) = links.and_then(LinkSet::next_cursor) {
            return Continuation {
                has_more: true,
                next: Some(cursor),
            };
        }
        self.numeric_continuation(links.is_some())
    }

    fn numeric_continuation(&self, has_links: bool) -> Continuation {
        let step = self.step();
        if step == 0 {
            return Continuation::done();
        }

        let has_more = match *self {
            PageDescriptor::OffsetLimit {
                limit,
                size,
                is_last_page,
                ..
            } => match is_last_page {
                Some(last) => !last,
                // Without the flag an empty `next` link is authoritative.
                None if has_links => false,
                None => size == limit && size > 0,
            },
            PageDescriptor::StartAtTotal {
                start_at,
                max_results,
                total,
                is_last,
            } => match (is_last, total) {
                (Some(true), _) => false,
                (_, Some(total)) => start_at.saturating_add(max_results) < total,
                (Some(false), None) => true,
                (None, None) => false,
            },
            PageDescriptor::IndexedTotal {
                start_index,
                items_per_page,
                total_results,
            } => start_index.saturating_sub(1).saturating_add(items_per_page) < total_results,
        };

        if has_more {
            Continuation::at(self.offset().saturating_add(step))
        } else {
            Continuation::done()
        }
    }

    /// The offset (or SCIM index) this page starts at.
    pub fn offset(&self) -> u64 {
        match *self {
            PageDescriptor::OffsetLimit { start, .. } => start,
            PageDescriptor::StartAtTotal { start_at, .. } => start_at,
            PageDescriptor::IndexedTotal { start_index, .. } => start_index,
        }
    }

    /// The distance to the next page's offset.
    pub fn step(&self) -> u64 {
        match *self {
            PageDescriptor::OffsetLimit { limit, .. } => limit,
            PageDescriptor::StartAtTotal { max_results, .. } => max_results,
            PageDescriptor::IndexedTotal { items_per_page, .. } => items_per_page,
        }
    }

    /// The total item count, when the idiom reports one.
    pub fn total(&self) -> Option<u64> {
        match *self {
            PageDescriptor::OffsetLimit { .. } => None,
            PageDescriptor::StartAtTotal { total, .. } => total,
            PageDescriptor::IndexedTotal { total_results, .. } => Some(total_results),
        }
    }

    /// The cursors of every page after this one, when knowable up front.
    ///
    /// Returns `None` for idioms without a total. The cursors are produced
    /// lazily, so a large reported total allocates nothing.
    pub fn remaining_cursors(&self) -> Option<PlannedCursors> {
        let total = self.total()?;
        let finished = matches!(
            self,
            PageDescriptor::StartAtTotal {
                is_last: Some(true),
                ..
            }
        );
        let step = if finished { 0 } else { self.step() };

        Some(PlannedCursors {
            next: self.offset().checked_add(step),
            step,
            total,
            one_based: matches!(self, PageDescriptor::IndexedTotal { .. }),
        })
    }
}

/// The offset cursors after one page, up to the total it reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedCursors {
    next: Option<u64>,
    step: u64,
    total: u64,
    one_based: bool,
}

impl Iterator for PlannedCursors {
    type Item = Cursor;

    fn next(&mut self) -> Option<Cursor> {
        let offset = self.next.filter(|_| self.step > 0)?;
        // SCIM indices are 1-based: index `i` is preceded by `i - 1` items.
        let preceding = if self.one_based {
            offset.saturating_sub(1)
        } else {
            offset
        };
        if preceding >= self.total {
            self.next = None;
            return None;
        }
        self.next = offset.checked_add(self.step);
        Some(Cursor::Offset(offset))
    }
}

/// One decoded page: its items plus the fields that say what comes next.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub descriptor: PageDescriptor,
    pub links: Option<LinkSet>,
}

impl<T> Page<T> {
    /// Create a page without links.
    pub fn new(items: Vec<T>, descriptor: PageDescriptor) -> Self {
        Self {
            items,
            descriptor,
            links: None,
        }
    }

    /// Attach a link set.
    pub fn with_links(mut self, links: LinkSet) -> Self {
        self.links = Some(links);
        self
    }

    /// Resolve relative links against the URL this page was fetched from.
    pub fn anchored(mut self, endpoint: &str) -> Self {
        if let Some(links) = self.links.as_mut() {
            links.anchor(endpoint);
        }
        self
    }

    /// Normalize this page into a continuation signal.
    pub fn continuation(&self) -> Continuation {
        self.descriptor.continuation(self.links.as_ref())
    }
}

/// A decoded wire shape that carries one page.
pub trait IntoPage<T> {
    fn into_page(self) -> Page<T>;
}

/// `start`/`limit`/`size`/`isLastPage` page (Confluence, Service Desk).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
pub struct OffsetLimitPage<T> {
    #[serde(default)]
    pub start: u64,
    #[serde(default)]
    pub limit: u64,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub is_last_page: Option<bool>,
    #[serde(default, alias = "values", alias = "results")]
    pub items: Vec<T>,
    #[serde(rename = "_links", default)]
    pub links: Option<LinkSet>,
}

impl<T> IntoPage<T> for OffsetLimitPage<T> {
    fn into_page(self) -> Page<T> {
        let size = self.size.unwrap_or(self.items.len() as u64);
        Page {
            descriptor: PageDescriptor::OffsetLimit {
                start: self.start,
                limit: self.limit,
                size,
                is_last_page: self.is_last_page,
            },
            items: self.items,
            links: self.links,
        }
    }
}

/// `startAt`/`maxResults`/`total`/`isLast` page (Jira).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
pub struct StartAtPage<T> {
    #[serde(default)]
    pub start_at: u64,
    #[serde(default)]
    pub max_results: u64,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub is_last: Option<bool>,
    #[serde(
        default,
        alias = "values",
        alias = "issues",
        alias = "comments",
        alias = "worklogs",
        alias = "results"
    )]
    pub items: Vec<T>,
}

impl<T> IntoPage<T> for StartAtPage<T> {
    fn into_page(self) -> Page<T> {
        Page::new(
            self.items,
            PageDescriptor::StartAtTotal {
                start_at: self.start_at,
                max_results: self.max_results,
                total: self.total,
                is_last: self.is_last,
            },
        )
    }
}

/// `startIndex`/`itemsPerPage`/`totalResults` SCIM list response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
pub struct IndexedPage<T> {
    #[serde(default = "scim_first_index")]
    pub start_index: u64,
    #[serde(default)]
    pub items_per_page: Option<u64>,
    #[serde(default)]
    pub total_results: u64,
    #[serde(default, rename = "Resources", alias = "resources")]
    pub items: Vec<T>,
}

fn scim_first_index() -> u64 {
    1
}

impl<T> IntoPage<T> for IndexedPage<T> {
    fn into_page(self) -> Page<T> {
        let items_per_page = self.items_per_page.unwrap_or(self.items.len() as u64);
        Page::new(
            self.items,
            PageDescriptor::IndexedTotal {
                start_index: self.start_index,
                items_per_page,
                total_results: self.total_results,
            },
        )
    }
}

/// Which idiom an endpoint speaks, and therefore how an offset cursor is
/// turned into query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageIdiom {
    OffsetLimit,
    StartAtTotal,
    IndexedTotal,
}

impl PageIdiom {
    /// The cursor of the first page.
    pub fn first_cursor(&self) -> Cursor {
        match self {
            PageIdiom::IndexedTotal => Cursor::Offset(1),
            PageIdiom::OffsetLimit | PageIdiom::StartAtTotal => Cursor::Offset(0),
        }
    }

    /// Query parameters requesting `page_size` items from `offset`.
    pub fn query(&self, offset: u64, page_size: u32) -> [(&'static str, String); 2] {
        let (offset_name, size_name) = match self {
            PageIdiom::OffsetLimit => ("start", "limit"),
            PageIdiom::StartAtTotal => ("startAt", "maxResults"),
            PageIdiom::IndexedTotal => ("startIndex", "count"),
        };
        [
            (offset_name, offset.to_string()),
            (size_name, page_size.to_string()),
        ]
    }
}
