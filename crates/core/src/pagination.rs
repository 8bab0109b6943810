//! Page-number normalization and the redirect/render decision for gallery lists.
//!
//! A gallery request goes through three steps:
//!
//! 1. [`plan_page`] looks at the raw `page` query value. A missing value asks
//!    for a canonical redirect to page 1 before anything is fetched; anything
//!    else is normalized into a page number and an inclusive [`RowWindow`].
//! 2. The caller fetches that window plus the exact total row count.
//! 3. [`resolve_page`] uses the total to either clamp (redirect to the last
//!    page) or render with the correct Prev/Next navigation.

use crate::error::CoreError;

/// Rows shown per gallery page.
pub const PAGE_SIZE: i64 = 20;

/// Largest page whose window start still fits in an `i64`.
const MAX_PAGE: i64 = i64::MAX / PAGE_SIZE;

// ---------------------------------------------------------------------------
// Row windows
// ---------------------------------------------------------------------------

/// Inclusive zero-based row window `[from, to]` requested from the backend.
///
/// Only [`RowWindow::for_page`] and [`RowWindow::new`] build one, so every
/// window is non-negative, ordered and at most [`PAGE_SIZE`] rows long.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowWindow {
    from: i64,
    to: i64,
}

impl RowWindow {
    /// Window for a normalized 1-based page number.
    ///
    /// Pages below 1 are treated as page 1.
    pub fn for_page(page: i64) -> Self {
        let page = page.clamp(1, MAX_PAGE);
        let from = (page - 1) * PAGE_SIZE;
        Self {
            from,
            to: from + PAGE_SIZE - 1,
        }
    }

    /// Build an arbitrary window, rejecting ones the backend must never see.
    ///
    /// `from` must be non-negative, `from <= to`, and the window may not span
    /// more than [`PAGE_SIZE`] rows.
    pub fn new(from: i64, to: i64) -> Result<Self, CoreError> {
        if from < 0 {
            return Err(CoreError::Validation(format!(
                "Row window start must not be negative (got {from})"
            )));
        }
        if from > to {
            return Err(CoreError::Validation(format!(
                "Row window start {from} is after its end {to}"
            )));
        }
        if to - from + 1 > PAGE_SIZE {
            return Err(CoreError::Validation(format!(
                "Row window {from}-{to} exceeds the page size of {PAGE_SIZE}"
            )));
        }
        Ok(Self { from, to })
    }

    /// First row index (inclusive).
    pub fn from(&self) -> i64 {
        self.from
    }

    /// Last row index (inclusive).
    pub fn to(&self) -> i64 {
        self.to
    }

    /// Number of rows covered by the window.
    pub fn row_count(&self) -> i64 {
        self.to - self.from + 1
    }
}

// ---------------------------------------------------------------------------
// Page planning
// ---------------------------------------------------------------------------

/// What to do with an incoming gallery request before touching the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagePlan {
    /// The `page` parameter is missing: redirect to `page=1`.
    Canonicalize,
    /// Fetch `window` for the normalized `page`.
    Fetch { page: i64, window: RowWindow },
}

/// Decide how to serve a raw `page` query value.
///
/// An absent or empty value canonicalizes; any other value is normalized with
/// [`normalize_page`].
pub fn plan_page(raw: Option<&str>) -> PagePlan {
    match raw {
        None | Some("") => PagePlan::Canonicalize,
        Some(raw) => {
            let page = normalize_page(raw);
            PagePlan::Fetch {
                page,
                window: RowWindow::for_page(page),
            }
        }
    }
}

/// Parse a `page` value into a 1-based page number.
///
/// Non-numeric, zero and negative values all resolve to 1. Fractional values
/// are floored, surrounding whitespace is ignored. Unsigned `0x`, `0o` and
/// `0b` literals are read in their radix.
pub fn normalize_page(raw: &str) -> i64 {
    let raw = raw.trim();

    let parsed = match raw.parse::<i64>() {
        Ok(n) => n,
        Err(_) => match parse_prefixed(raw) {
            Some(n) => n,
            None => match raw.parse::<f64>() {
                Ok(f) if f.is_finite() => f.floor() as i64,
                _ => 1,
            },
        },
    };

    parsed.clamp(1, MAX_PAGE)
}

/// Parse an unsigned radix-prefixed integer; digits that overflow saturate.
fn parse_prefixed(raw: &str) -> Option<i64> {
    let prefix = raw.get(..2)?.to_ascii_lowercase();
    let radix = match prefix.as_str() {
        "0x" => 16,
        "0o" => 8,
        "0b" => 2,
        _ => return None,
    };

    let digits = &raw[2..];
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    Some(i64::from_str_radix(digits, radix).unwrap_or(i64::MAX))
}

// ---------------------------------------------------------------------------
// Post-fetch resolution
// ---------------------------------------------------------------------------

/// Number of pages needed for `count` rows (`ceil(count / PAGE_SIZE)`).
pub fn total_pages(count: i64) -> i64 {
    if count <= 0 {
        return 0;
    }
    (count - 1) / PAGE_SIZE + 1
}

/// Navigation state for a page that is about to be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageNav {
    pub page: i64,
    pub total_pages: i64,
}

impl PageNav {
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn prev_page(&self) -> Option<i64> {
        self.has_prev().then(|| self.page - 1)
    }

    pub fn next_page(&self) -> Option<i64> {
        self.has_next().then(|| self.page + 1)
    }
}

/// Outcome of a fetched page once the total row count is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// Render the page with the given navigation.
    Render(PageNav),
    /// The requested page is past the end: redirect to `page`.
    Redirect { page: i64 },
}

/// Clamp or render `page` given the backend's total `count`.
///
/// An empty result set (`total_pages == 0`) always renders so the caller can
/// show an empty state instead of looping on redirects.
pub fn resolve_page(page: i64, count: i64) -> PageOutcome {
    let total_pages = total_pages(count);

    if page > total_pages && total_pages > 0 {
        return PageOutcome::Redirect { page: total_pages };
    }

    PageOutcome::Render(PageNav { page, total_pages })
}
