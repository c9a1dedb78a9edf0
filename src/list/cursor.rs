//! Pagination bookkeeping for one list.

use std::time::Duration;

use serde::Serialize;

use crate::config::PaginationConfig;

/// Position of a list inside a paginated collection.
///
/// `page` is the last page loaded (0 before anything arrived). `total` stays
/// `None` until the first page reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageCursor {
    pub page: u32,
    pub page_size: u32,
    pub total: Option<usize>,
    pub items_so_far: usize,
}

impl PageCursor {
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 0,
            page_size,
            total: None,
            items_so_far: 0,
        }
    }

    /// Unknown totals count as "more to come".
    pub fn has_more(&self) -> bool {
        match self.total {
            Some(total) => self.items_so_far < total,
            None => true,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        !self.has_more()
    }

    /// Page to request next: the first page until one has loaded, then the
    /// page after the last loaded one.
    pub fn next_page(&self) -> u32 {
        match self.total {
            Some(_) => self.page + 1,
            None => self.page,
        }
    }

    /// Account for a loaded page. `items_so_far` never exceeds `total`.
    pub fn record(&mut self, page: u32, received: usize, total: usize) {
        self.page = page;
        self.total = Some(total);
        self.items_so_far = self.items_so_far.saturating_add(received).min(total);
    }
}

/// Where the list state machine stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ListState {
    /// Waiting for a scroll trigger; the value is the last loaded page.
    Idle(u32),
    /// A fetch of this page is in flight.
    Fetching(u32),
    /// Every item is loaded. Terminal until reset.
    Exhausted,
}

/// Geometry of the scroll container at the time of a scroll event.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub client_height: f64,
}

impl Viewport {
    pub fn new(scroll_top: f64, scroll_height: f64, client_height: f64) -> Self {
        Self {
            scroll_top,
            scroll_height,
            client_height,
        }
    }

    pub fn distance_to_bottom(&self) -> f64 {
        self.scroll_height - self.scroll_top - self.client_height
    }
}

/// Tuning of a list controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListConfig {
    /// Fetch once the viewport is this close to the bottom, in pixels.
    pub threshold_px: f64,
    /// Quiet period after the last scroll event before it is evaluated.
    pub debounce: Duration,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self::from(&PaginationConfig::default())
    }
}

impl From<&PaginationConfig> for ListConfig {
    fn from(config: &PaginationConfig) -> Self {
        Self {
            threshold_px: config.scroll_threshold_px as f64,
            debounce: Duration::from_millis(config.debounce_ms),
        }
    }
}
