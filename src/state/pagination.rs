// Client-side paging over the in-memory recommendation list.

/// Recommendations shown per page.
pub const PAGE_SIZE: usize = 3;

/// Page numbers shown at once before the window starts sliding.
const BUTTON_WINDOW: usize = 5;

/// One entry of the page-number strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageButton {
    Page(usize),
    Ellipsis,
}

/// `ceil(len / size)`; zero items means zero pages.
pub fn total_pages(len: usize, size: usize) -> usize {
    len.div_ceil(size)
}

/// Items on 1-indexed `page`. Empty when the page is past the end.
pub fn page_slice<T>(items: &[T], page: usize, size: usize) -> &[T] {
    let start = page.saturating_sub(1).saturating_mul(size).min(items.len());
    let end = start.saturating_add(size).min(items.len());
    &items[start..end]
}

/// The strip of page buttons for `current` of `total` pages.
///
/// Every page is listed when there are at most five. Otherwise a five-wide
/// window is centred on `current` and pinned to the ends, and a trailing
/// ellipsis plus a shortcut to the last page are added whenever the window
/// stops short of it.
pub fn page_buttons(current: usize, total: usize) -> Vec<PageButton> {
    if total <= BUTTON_WINDOW {
        return (1..=total).map(PageButton::Page).collect();
    }

    let first = if current <= 3 {
        1
    } else if current >= total - 2 {
        total - (BUTTON_WINDOW - 1)
    } else {
        current - 2
    };
    let last = first + BUTTON_WINDOW - 1;

    let mut buttons: Vec<PageButton> = (first..=last).map(PageButton::Page).collect();
    if last < total {
        buttons.push(PageButton::Ellipsis);
        buttons.push(PageButton::Page(total));
    }
    buttons
}
