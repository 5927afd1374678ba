//! Document: the ordered set of pages and the active page index.

use crate::page::{BackgroundKind, Page};

/// Page position reported to the control panel. Both values are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageChanged {
    pub current: usize,
    pub total: usize,
}

/// All pages of a session. Never empty.
#[derive(Debug, Clone)]
pub struct Document {
    pages: Vec<Page>,
    current: usize,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(BackgroundKind::default())
    }
}

impl Document {
    /// Create a document with one empty page.
    pub fn new(background: BackgroundKind) -> Self {
        Self {
            pages: vec![Page::new(background)],
            current: 0,
        }
    }

    /// The active page.
    pub fn page(&self) -> &Page {
        &self.pages[self.current]
    }

    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.pages[self.current]
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Zero-based index of the active page.
    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn position(&self) -> PageChanged {
        PageChanged {
            current: self.current + 1,
            total: self.pages.len(),
        }
    }

    /// Insert an empty page after the current one and make it active. The
    /// new page inherits the current background.
    pub fn add_page(&mut self) -> PageChanged {
        let background = self.page().background();
        self.current += 1;
        self.pages.insert(self.current, Page::new(background));
        log::info!("Added page {} of {}", self.current + 1, self.pages.len());
        self.position()
    }

    /// Step back one page. `None` when already on the first page.
    pub fn prev_page(&mut self) -> Option<PageChanged> {
        if self.current == 0 {
            return None;
        }
        self.current -= 1;
        Some(self.position())
    }

    /// Step forward one page. `None` when already on the last page.
    pub fn next_page(&mut self) -> Option<PageChanged> {
        if self.current + 1 >= self.pages.len() {
            return None;
        }
        self.current += 1;
        Some(self.position())
    }

    /// Change the background of the active page only.
    pub fn set_background(&mut self, background: BackgroundKind) {
        self.page_mut().set_background(background);
    }
}
