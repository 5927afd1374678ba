//! Pointer interaction state machine.
//!
//! Turns down/move/up events into freehand strokes, shape drags and erase
//! queries against the active page. Only the primary button is tracked.

use crate::input::{MouseButton, PointerEvent};
use crate::page::Page;
use crate::stroke::{InProgressStroke, Stroke};
use crate::tools::{DrawingSession, ToolKind};
use kurbo::Point;

/// State of the current pointer interaction.
#[derive(Debug, Clone, Default)]
enum InteractionState {
    /// Waiting for a pointer-down.
    #[default]
    Idle,
    /// Building a freehand stroke.
    DrawingFreehand(InProgressStroke),
    /// Dragging out a shape. The tool is fixed at press time.
    DrawingShape {
        tool: ToolKind,
        start: Point,
        end: Point,
    },
    /// Erasing continuously while the button is held.
    Erasing,
}

/// A shape drag in progress, as the renderer needs it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeDrag {
    pub tool: ToolKind,
    pub start: Point,
    pub end: Point,
}

/// What an input event changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Interaction {
    /// The picture needs repainting.
    pub repaint: bool,
    /// A stroke was committed to the page.
    pub committed: bool,
    /// At least one stroke was erased.
    pub erased: bool,
}

impl Interaction {
    fn repaint() -> Self {
        Self {
            repaint: true,
            ..Self::default()
        }
    }
}

/// Drives stroke construction from pointer events.
#[derive(Debug, Clone, Default)]
pub struct InputController {
    state: InteractionState,
    /// Last known pointer position, `None` while outside the surface.
    pointer: Option<Point>,
}

impl InputController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an interaction is in progress.
    pub fn is_active(&self) -> bool {
        !matches!(self.state, InteractionState::Idle)
    }

    pub fn pointer_position(&self) -> Option<Point> {
        self.pointer
    }

    /// The freehand stroke being drawn, if any.
    pub fn in_progress(&self) -> Option<&InProgressStroke> {
        match &self.state {
            InteractionState::DrawingFreehand(stroke) => Some(stroke),
            _ => None,
        }
    }

    /// The shape being dragged, if any.
    pub fn shape_preview(&self) -> Option<ShapeDrag> {
        match self.state {
            InteractionState::DrawingShape { tool, start, end } => {
                Some(ShapeDrag { tool, start, end })
            }
            _ => None,
        }
    }

    /// Feed one pointer event.
    pub fn handle(
        &mut self,
        event: PointerEvent,
        session: &DrawingSession,
        page: &mut Page,
    ) -> Interaction {
        match event {
            PointerEvent::Down { position, button } => {
                self.pointer = Some(position);
                if button != MouseButton::Left {
                    return Interaction::default();
                }
                self.pointer_down(position, session, page)
            }
            PointerEvent::Move { position } => {
                self.pointer = Some(position);
                self.pointer_move(position, session, page)
            }
            PointerEvent::Up { position, button } => {
                self.pointer = Some(position);
                if button != MouseButton::Left {
                    return Interaction::default();
                }
                self.finish(session, page)
            }
            PointerEvent::Cancel => {
                let indicator_visible = self.shows_eraser_indicator(session);
                self.pointer = None;
                let mut result = self.finish(session, page);
                result.repaint |= indicator_visible;
                result
            }
            PointerEvent::Scroll { position, .. } => {
                self.pointer = Some(position);
                Interaction::default()
            }
        }
    }

    fn pointer_down(&mut self, position: Point, session: &DrawingSession, page: &mut Page) -> Interaction {
        if self.is_active() {
            return Interaction::default();
        }
        let tool = session.tool();
        if tool.is_freehand() {
            self.state = InteractionState::DrawingFreehand(InProgressStroke::begin(position, session));
            Interaction::repaint()
        } else if tool.is_shape() {
            self.state = InteractionState::DrawingShape {
                tool,
                start: position,
                end: position,
            };
            Interaction::repaint()
        } else if tool == ToolKind::Eraser {
            self.state = InteractionState::Erasing;
            Self::erase(position, session, page)
        } else {
            // The cursor tool leaves the event to the desktop.
            Interaction::default()
        }
    }

    fn pointer_move(&mut self, position: Point, session: &DrawingSession, page: &mut Page) -> Interaction {
        let indicator_visible = self.shows_eraser_indicator(session);
        match &mut self.state {
            InteractionState::DrawingFreehand(stroke) => {
                stroke.push_smoothed(position);
                Interaction::repaint()
            }
            InteractionState::DrawingShape { end, .. } => {
                *end = position;
                Interaction::repaint()
            }
            InteractionState::Erasing => {
                let mut result = Self::erase(position, session, page);
                result.repaint |= indicator_visible;
                result
            }
            InteractionState::Idle => Interaction {
                repaint: indicator_visible,
                ..Interaction::default()
            },
        }
    }

    /// End the current interaction as if the button were released.
    pub fn finish(&mut self, session: &DrawingSession, page: &mut Page) -> Interaction {
        match std::mem::take(&mut self.state) {
            InteractionState::Idle => Interaction::default(),
            InteractionState::DrawingFreehand(stroke) => {
                let committed = match stroke.finish() {
                    Some(stroke) => {
                        page.commit(stroke);
                        true
                    }
                    None => false,
                };
                Interaction {
                    repaint: true,
                    committed,
                    erased: false,
                }
            }
            InteractionState::DrawingShape { tool, start, end } => {
                page.commit(Stroke::shape(
                    start,
                    end,
                    session.color(),
                    session.opacity(),
                    session.width(),
                    tool,
                ));
                Interaction {
                    repaint: true,
                    committed: true,
                    erased: false,
                }
            }
            InteractionState::Erasing => Interaction::default(),
        }
    }

    fn erase(position: Point, session: &DrawingSession, page: &mut Page) -> Interaction {
        let erased = page.erase_at(position, session.width());
        Interaction {
            repaint: erased,
            committed: false,
            erased,
        }
    }

    fn shows_eraser_indicator(&self, session: &DrawingSession) -> bool {
        session.tool() == ToolKind::Eraser && !session.desktop_mode() && self.pointer.is_some()
    }
}
