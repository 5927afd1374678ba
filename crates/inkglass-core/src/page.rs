//! Pages: an independent stroke list with its background and history.

use crate::eraser;
use crate::stroke::Stroke;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Maximum number of history snapshots kept per page.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Background pattern painted under a page's strokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BackgroundKind {
    /// Fully transparent overlay.
    #[default]
    None,
    White,
    Grid,
    Lined,
    Dotted,
    Blackboard,
}

impl BackgroundKind {
    pub const ALL: [BackgroundKind; 6] = [
        BackgroundKind::None,
        BackgroundKind::White,
        BackgroundKind::Grid,
        BackgroundKind::Lined,
        BackgroundKind::Dotted,
        BackgroundKind::Blackboard,
    ];

    /// Get display name for this background.
    pub fn name(self) -> &'static str {
        match self {
            BackgroundKind::None => "Transparent",
            BackgroundKind::White => "White",
            BackgroundKind::Grid => "Grid",
            BackgroundKind::Lined => "Lined",
            BackgroundKind::Dotted => "Dotted",
            BackgroundKind::Blackboard => "Blackboard",
        }
    }
}

/// One drawing surface.
///
/// History is a single stack of full stroke-list snapshots. `undo`, `clear`
/// and a successful erase push onto it; `redo` pops from it and only restores
/// a snapshot that is longer than the current list. Committing a stroke
/// empties the stack, so nothing can be redone across a new stroke.
#[derive(Debug, Clone)]
pub struct Page {
    strokes: Vec<Stroke>,
    background: BackgroundKind,
    history: VecDeque<Vec<Stroke>>,
    history_limit: usize,
}

impl Default for Page {
    fn default() -> Self {
        Self::new(BackgroundKind::default())
    }
}

impl Page {
    /// Create an empty page.
    pub fn new(background: BackgroundKind) -> Self {
        Self {
            strokes: Vec::new(),
            background,
            history: VecDeque::new(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    /// Set how many snapshots are kept (at least one).
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit.max(1);
        self
    }

    /// Committed strokes in paint order.
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn background(&self) -> BackgroundKind {
        self.background
    }

    pub fn set_background(&mut self, background: BackgroundKind) {
        self.background = background;
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    /// Append a finished stroke and drop the redo history.
    pub fn commit(&mut self, stroke: Stroke) {
        log::debug!("Commit {:?} stroke {}", stroke.tool(), stroke.id());
        self.strokes.push(stroke);
        self.history.clear();
    }

    /// Remove the most recent stroke. Returns false if the page was empty.
    pub fn undo(&mut self) -> bool {
        if self.strokes.is_empty() {
            return false;
        }
        self.push_history(self.strokes.clone());
        self.strokes.pop();
        true
    }

    /// Restore the latest snapshot if it holds more strokes than the page.
    ///
    /// The snapshot is consumed either way. Returns true if it was restored.
    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.pop_back() else {
            return false;
        };
        if snapshot.len() > self.strokes.len() {
            self.strokes = snapshot;
            true
        } else {
            false
        }
    }

    /// Remove every stroke. Returns false if the page was already empty.
    pub fn clear(&mut self) -> bool {
        if self.strokes.is_empty() {
            return false;
        }
        let snapshot = std::mem::take(&mut self.strokes);
        self.push_history(snapshot);
        true
    }

    /// Erase every stroke hit at `point`. Returns true if anything was removed.
    pub fn erase_at(&mut self, point: Point, radius: f64) -> bool {
        let Some(survivors) = eraser::surviving_strokes(&self.strokes, point, radius) else {
            return false;
        };
        log::debug!(
            "Erased {} stroke(s) at ({:.1}, {:.1})",
            self.strokes.len() - survivors.len(),
            point.x,
            point.y
        );
        let snapshot = std::mem::replace(&mut self.strokes, survivors);
        self.push_history(snapshot);
        true
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        !self.strokes.is_empty()
    }

    /// Check if the next redo would restore anything.
    pub fn can_redo(&self) -> bool {
        self.history
            .back()
            .is_some_and(|snapshot| snapshot.len() > self.strokes.len())
    }

    /// Number of snapshots on the history stack.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    fn push_history(&mut self, snapshot: Vec<Stroke>) {
        self.history.push_back(snapshot);
        while self.history.len() > self.history_limit {
            self.history.pop_front();
        }
    }
}
