//! Translation of winit window events into canvas input.

use inkglass_core::{Canvas, Modifiers, MouseButton, PointerEvent};
use kurbo::{Point, Vec2};
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::keyboard::{Key, ModifiersState, NamedKey};

/// Wheel angle-delta units per scroll line.
pub const UNITS_PER_LINE: f64 = 120.0;

/// Map a winit button to a tracked button.
pub fn pointer_button(button: winit::event::MouseButton) -> Option<MouseButton> {
    match button {
        winit::event::MouseButton::Left => Some(MouseButton::Left),
        winit::event::MouseButton::Right => Some(MouseButton::Right),
        winit::event::MouseButton::Middle => Some(MouseButton::Middle),
        _ => None,
    }
}

pub fn modifiers(state: ModifiersState) -> Modifiers {
    Modifiers {
        shift: state.shift_key(),
        ctrl: state.control_key(),
        alt: state.alt_key(),
        meta: state.super_key(),
    }
}

/// Key name understood by the shortcut resolver.
pub fn key_name(key: &Key) -> Option<String> {
    match key {
        Key::Character(text) => Some(text.to_string()),
        Key::Named(named) => {
            let name = match named {
                NamedKey::Delete => "Delete",
                NamedKey::Backspace => "Backspace",
                NamedKey::PageUp => "PageUp",
                NamedKey::PageDown => "PageDown",
                NamedKey::F2 => "F2",
                _ => return None,
            };
            Some(name.to_string())
        }
        _ => None,
    }
}

/// Wheel movement in angle-delta units, positive when scrolling up.
pub fn scroll_delta(delta: MouseScrollDelta) -> Vec2 {
    match delta {
        MouseScrollDelta::LineDelta(x, y) => {
            Vec2::new(f64::from(x) * UNITS_PER_LINE, f64::from(y) * UNITS_PER_LINE)
        }
        MouseScrollDelta::PixelDelta(pos) => Vec2::new(pos.x, pos.y),
    }
}

/// Feeds overlay window events into the canvas.
#[derive(Debug, Clone)]
pub struct EventHandler {
    modifiers: ModifiersState,
    /// Last cursor position in logical pixels.
    cursor: Point,
    scale_factor: f64,
}

impl EventHandler {
    pub fn new(scale_factor: f64) -> Self {
        Self {
            modifiers: ModifiersState::empty(),
            cursor: Point::ZERO,
            scale_factor,
        }
    }

    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        self.scale_factor = scale_factor;
    }

    fn to_logical(&self, position: PhysicalPosition<f64>) -> Point {
        Point::new(position.x / self.scale_factor, position.y / self.scale_factor)
    }

    /// Apply one window event. Returns `true` when the event was consumed.
    pub fn handle(&mut self, event: &WindowEvent, canvas: &mut Canvas) -> bool {
        match event {
            WindowEvent::ModifiersChanged(mods) => {
                self.modifiers = mods.state();
                false
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = self.to_logical(*position);
                canvas.handle_pointer(PointerEvent::Move {
                    position: self.cursor,
                });
                true
            }
            WindowEvent::CursorLeft { .. } => {
                canvas.handle_pointer(PointerEvent::Cancel);
                true
            }
            WindowEvent::Focused(false) => {
                if canvas.controller().is_active() {
                    canvas.handle_pointer(PointerEvent::Cancel);
                }
                false
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let Some(button) = pointer_button(*button) else {
                    return false;
                };
                let position = self.cursor;
                let event = match state {
                    ElementState::Pressed => PointerEvent::Down { position, button },
                    ElementState::Released => PointerEvent::Up { position, button },
                };
                canvas.handle_pointer(event);
                true
            }
            WindowEvent::MouseWheel { delta, .. } => {
                canvas.handle_pointer(PointerEvent::Scroll {
                    position: self.cursor,
                    delta: scroll_delta(*delta),
                });
                true
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return false;
                }
                match key_name(&event.logical_key) {
                    Some(name) => canvas.handle_key(&name, modifiers(self.modifiers)),
                    None => false,
                }
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::SmolStr;

    #[test]
    fn test_key_names() {
        assert_eq!(key_name(&Key::Character(SmolStr::new("z"))), Some("z".to_string()));
        assert_eq!(key_name(&Key::Named(NamedKey::PageDown)), Some("PageDown".to_string()));
        assert_eq!(key_name(&Key::Named(NamedKey::Enter)), None);
    }

    #[test]
    fn test_modifier_mapping() {
        let mods = modifiers(ModifiersState::CONTROL | ModifiersState::SHIFT);
        assert!(mods.ctrl && mods.shift);
        assert!(!mods.alt && !mods.meta);
        assert!(modifiers(ModifiersState::SUPER).command());
    }

    #[test]
    fn test_scroll_lines_become_angle_units() {
        assert_eq!(scroll_delta(MouseScrollDelta::LineDelta(0.0, 1.0)), Vec2::new(0.0, 120.0));
        assert_eq!(
            scroll_delta(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, -30.0))),
            Vec2::new(0.0, -30.0)
        );
    }

    #[test]
    fn test_button_mapping() {
        assert_eq!(pointer_button(winit::event::MouseButton::Left), Some(MouseButton::Left));
        assert_eq!(pointer_button(winit::event::MouseButton::Back), None);
    }
}
