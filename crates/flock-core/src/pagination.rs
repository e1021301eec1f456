//! Page arithmetic and the collapsed page-number strip.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Number of pages needed for `len` items. Zero items need zero pages.
pub fn total_pages(len: usize, page_size: usize) -> usize {
  len.div_ceil(page_size.max(1))
}

/// The index range of 1-based `page`, clamped to `0..len`.
///
/// A page past the end yields an empty range rather than an error.
pub fn page_range(page: usize, page_size: usize, len: usize) -> Range<usize> {
  let page_size = page_size.max(1);
  let start = page.saturating_sub(1).saturating_mul(page_size).min(len);
  let end = start.saturating_add(page_size).min(len);
  start..end
}

/// The items on 1-based `page`.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
  &items[page_range(page, page_size, items.len())]
}

/// One slot in the page-number strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "page", rename_all = "snake_case")]
pub enum PageIndicator {
  Page(usize),
  Ellipsis,
}

/// Page numbers to show for `page` out of `total_pages`.
///
/// Up to five pages are listed outright. Past that the strip keeps the first
/// and last page and collapses the rest around the current page:
///
/// - near the start: `1 2 3 4 … N`
/// - near the end:   `1 … N-3 N-2 N-1 N`
/// - otherwise:      `1 … p-1 p p+1 … N`
pub fn page_indicators(page: usize, total_pages: usize) -> Vec<PageIndicator> {
  use PageIndicator::{Ellipsis, Page};

  if total_pages <= 5 {
    return (1..=total_pages).map(Page).collect();
  }

  let last = total_pages;
  if page <= 3 {
    vec![Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(last)]
  } else if page >= last - 2 {
    vec![
      Page(1),
      Ellipsis,
      Page(last - 3),
      Page(last - 2),
      Page(last - 1),
      Page(last),
    ]
  } else {
    vec![
      Page(1),
      Ellipsis,
      Page(page - 1),
      Page(page),
      Page(page + 1),
      Ellipsis,
      Page(last),
    ]
  }
}
