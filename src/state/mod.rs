// View state: everything the screen shows, plus the transitions that move it.
// The App performs side effects (requests, player binding); this module only
// decides what the state becomes and which async results are still wanted.

pub mod pagination;

use crate::api::models::{Recommendation, Video};
use pagination::{page_buttons, page_slice, total_pages, PageButton, PAGE_SIZE};

/// A navigation that failed, kept until the next one starts.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationError {
    pub video_id: String,
    pub message: String,
}

impl std::fmt::Display for NavigationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Could not load video {}: {}", self.video_id, self.message)
    }
}

#[derive(Debug, Clone)]
pub struct ViewState {
    /// `None` only until the first video lands.
    pub current_video: Option<Video>,
    pub recommendations: Vec<Recommendation>,
    /// 1-indexed.
    pub page: usize,
    pub search_query: String,
    pub search_results: Vec<Video>,
    pub search_visible: bool,
    pub search_loading: bool,
    /// Raised from navigation start until the cross-fade settles; the player
    /// autoplays videos bound while it is up.
    pub transitioning: bool,
    /// True until the first navigation resolves either way.
    pub loading: bool,
    /// The backend listed no videos at all.
    pub library_empty: bool,
    pub nav_error: Option<NavigationError>,
    /// Video id of the navigation currently in flight.
    pub pending_video: Option<String>,
    nav_seq: u64,
    search_seq: u64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            current_video: None,
            recommendations: Vec::new(),
            page: 1,
            search_query: String::new(),
            search_results: Vec::new(),
            search_visible: false,
            search_loading: false,
            transitioning: false,
            loading: true,
            library_empty: false,
            nav_error: None,
            pending_video: None,
            nav_seq: 0,
            search_seq: 0,
        }
    }

    // ── Navigation ──

    /// Start loading `video_id`. Returns the ticket the result must carry;
    /// any older ticket stops being accepted.
    pub fn begin_navigation(&mut self, video_id: &str) -> u64 {
        self.nav_seq += 1;
        self.transitioning = true;
        // A lookup still in flight must not reopen the overlay afterwards.
        self.search_seq += 1;
        self.search_visible = false;
        self.search_loading = false;
        self.page = 1;
        self.nav_error = None;
        self.library_empty = false;
        self.pending_video = Some(video_id.to_string());
        self.nav_seq
    }

    pub fn is_latest_navigation(&self, nav_id: u64) -> bool {
        nav_id == self.nav_seq
    }

    /// Install a loaded video and its recommendations. Returns false (and
    /// changes nothing) when a newer navigation has started since.
    pub fn apply_navigation(
        &mut self,
        nav_id: u64,
        video: Video,
        recommendations: Vec<Recommendation>,
    ) -> bool {
        if !self.is_latest_navigation(nav_id) {
            return false;
        }
        self.current_video = Some(video);
        self.recommendations = recommendations;
        self.page = 1;
        self.loading = false;
        self.pending_video = None;
        true
    }

    /// Record a failed navigation without touching what is on screen.
    pub fn fail_navigation(&mut self, nav_id: u64, video_id: &str, message: &str) -> bool {
        if !self.is_latest_navigation(nav_id) {
            return false;
        }
        self.loading = false;
        self.transitioning = false;
        self.pending_video = None;
        self.nav_error = Some(NavigationError {
            video_id: video_id.to_string(),
            message: message.to_string(),
        });
        true
    }

    /// End the cross-fade window, unless a newer navigation reopened it.
    pub fn settle_transition(&mut self, nav_id: u64) -> bool {
        if !self.is_latest_navigation(nav_id) {
            return false;
        }
        self.transitioning = false;
        true
    }

    pub fn mark_library_empty(&mut self) {
        self.library_empty = true;
    }

    /// Video auto-advance should play: recommendation index 0.
    pub fn auto_advance_target(&self) -> Option<&str> {
        self.recommendations.first().map(|r| r.video.id.as_str())
    }

    // ── Search ──

    /// Record a new query. Returns a ticket when a lookup should run, `None`
    /// for a blank query (which hides the overlay). Either way every older
    /// lookup is superseded.
    pub fn begin_search(&mut self, query: &str) -> Option<u64> {
        self.search_query = query.to_string();
        self.search_seq += 1;
        if query.trim().is_empty() {
            self.search_visible = false;
            self.search_loading = false;
            self.search_results.clear();
            return None;
        }
        self.search_loading = true;
        Some(self.search_seq)
    }

    pub fn apply_search(&mut self, search_id: u64, results: Vec<Video>) -> bool {
        if search_id != self.search_seq {
            return false;
        }
        self.search_results = results;
        self.search_visible = true;
        self.search_loading = false;
        true
    }

    pub fn fail_search(&mut self, search_id: u64) -> bool {
        if search_id != self.search_seq {
            return false;
        }
        self.search_loading = false;
        true
    }

    /// Clear the query and close the overlay.
    pub fn hide_search(&mut self) {
        self.begin_search("");
    }

    // ── Pagination ──

    pub fn total_pages(&self) -> usize {
        total_pages(self.recommendations.len(), PAGE_SIZE)
    }

    pub fn visible_recommendations(&self) -> &[Recommendation] {
        page_slice(&self.recommendations, self.page, PAGE_SIZE)
    }

    /// Jump straight to `page`. Pages outside `1..=total` are ignored.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        if page == 0 || page > self.total_pages() {
            return false;
        }
        self.page = page;
        true
    }

    pub fn next_page(&mut self) -> bool {
        if self.page < self.total_pages() {
            self.page += 1;
            true
        } else {
            false
        }
    }

    pub fn prev_page(&mut self) -> bool {
        if self.page > 1 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    pub fn page_buttons(&self) -> Vec<PageButton> {
        page_buttons(self.page, self.total_pages())
    }

    /// `(first, last, total)` for "Showing first-last of total videos", 1-based.
    pub fn showing_range(&self) -> (usize, usize, usize) {
        let total = self.recommendations.len();
        let start = (self.page - 1) * PAGE_SIZE;
        ((start + 1).min(total), (start + PAGE_SIZE).min(total), total)
    }
}
