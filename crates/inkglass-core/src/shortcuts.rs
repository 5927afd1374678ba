//! Keyboard shortcut resolution and documentation.
//!
//! Hosts pass key names as plain strings: printable keys as their character
//! (`"z"`, `"3"`, `"+"`) and named keys by name (`"Delete"`, `"PageUp"`,
//! `"F2"`). Letters match case-insensitively.

use crate::input::Modifiers;
use crate::tools::ToolKind;

/// Width change for one press of `+` or `-`.
pub const WIDTH_KEY_STEP: f64 = 2.0;

/// Wheel angle-delta units per unit of stroke width.
pub const SCROLL_UNITS_PER_WIDTH: f64 = 60.0;

/// An action triggered from the keyboard or the control panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Undo,
    Redo,
    ClearPage,
    /// Select the palette color at this index.
    QuickColor(usize),
    WidenPen,
    NarrowPen,
    AddPage,
    PrevPage,
    NextPage,
    ToggleDesktopMode,
    SelectTool(ToolKind),
}

/// Map a key press to a command.
pub fn resolve(key: &str, modifiers: Modifiers) -> Option<Command> {
    let key = normalize(key);
    let command = modifiers.command();

    if command {
        return match key.as_str() {
            "z" if modifiers.shift => Some(Command::Redo),
            "z" => Some(Command::Undo),
            "y" => Some(Command::Redo),
            "delete" | "backspace" => Some(Command::ClearPage),
            "n" => Some(Command::AddPage),
            _ => None,
        };
    }
    if modifiers.alt {
        return None;
    }

    match key.as_str() {
        "+" | "=" => Some(Command::WidenPen),
        "-" => Some(Command::NarrowPen),
        "pageup" => Some(Command::PrevPage),
        "pagedown" => Some(Command::NextPage),
        "f2" => Some(Command::ToggleDesktopMode),
        single if single.len() == 1 => {
            let c = single.chars().next()?;
            match c {
                '1'..='9' => Some(Command::QuickColor(c as usize - '1' as usize)),
                _ => ToolKind::from_shortcut_letter(c).map(Command::SelectTool),
            }
        }
        _ => None,
    }
}

/// Width change for a wheel movement of `delta_y` angle-delta units.
pub fn scroll_width_delta(delta_y: f64) -> f64 {
    delta_y / SCROLL_UNITS_PER_WIDTH
}

fn normalize(key: &str) -> String {
    key.trim().to_ascii_lowercase()
}

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    pub shift: bool,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(key: &'static str, ctrl: bool, shift: bool, description: &'static str) -> Self {
        Self {
            key,
            ctrl,
            shift,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+Z").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key);
        parts.join("+")
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("Z", true, false, "Undo last stroke"),
            Shortcut::new("Y", true, false, "Redo"),
            Shortcut::new("Z", true, true, "Redo"),
            Shortcut::new("Delete", true, false, "Clear page"),
            Shortcut::new("N", true, false, "New page after this one"),
            Shortcut::new("PageUp", false, false, "Previous page"),
            Shortcut::new("PageDown", false, false, "Next page"),
            Shortcut::new("1-9", false, false, "Quick color"),
            Shortcut::new("+ / -", false, false, "Wider / narrower pen"),
            Shortcut::new("Wheel", false, false, "Adjust pen width"),
            Shortcut::new("P H C E", false, false, "Pen, highlighter, chisel, eraser"),
            Shortcut::new("L R O A", false, false, "Line, rectangle, circle, arrow"),
            Shortcut::new("V", false, false, "Cursor (pass clicks to the desktop)"),
            Shortcut::new("F2", false, false, "Toggle desktop mode"),
        ]
    }

    /// Print all shortcuts to console.
    pub fn print_all() {
        println!("\n=== Keyboard Shortcuts ===");
        for shortcut in Self::all() {
            println!("  {:20} {}", shortcut.format(), shortcut.description);
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctrl() -> Modifiers {
        Modifiers {
            ctrl: true,
            ..Modifiers::default()
        }
    }

    #[test]
    fn test_undo_redo_keys() {
        assert_eq!(resolve("z", ctrl()), Some(Command::Undo));
        assert_eq!(resolve("Z", ctrl()), Some(Command::Undo));
        assert_eq!(resolve("y", ctrl()), Some(Command::Redo));
        let ctrl_shift = Modifiers {
            shift: true,
            ..ctrl()
        };
        assert_eq!(resolve("Z", ctrl_shift), Some(Command::Redo));
    }

    #[test]
    fn test_clear_requires_ctrl() {
        assert_eq!(resolve("Delete", ctrl()), Some(Command::ClearPage));
        assert_eq!(resolve("Backspace", ctrl()), Some(Command::ClearPage));
        assert_eq!(resolve("Delete", Modifiers::default()), None);
    }

    #[test]
    fn test_digits_select_palette() {
        assert_eq!(resolve("1", Modifiers::default()), Some(Command::QuickColor(0)));
        assert_eq!(resolve("9", Modifiers::default()), Some(Command::QuickColor(8)));
        assert_eq!(resolve("0", Modifiers::default()), None);
    }

    #[test]
    fn test_width_keys() {
        assert_eq!(resolve("+", Modifiers::default()), Some(Command::WidenPen));
        assert_eq!(resolve("=", Modifiers::default()), Some(Command::WidenPen));
        assert_eq!(resolve("-", Modifiers::default()), Some(Command::NarrowPen));
    }

    #[test]
    fn test_tool_letters() {
        assert_eq!(
            resolve("h", Modifiers::default()),
            Some(Command::SelectTool(ToolKind::Highlighter))
        );
        assert_eq!(
            resolve("O", Modifiers::default()),
            Some(Command::SelectTool(ToolKind::Circle))
        );
        assert_eq!(resolve("x", Modifiers::default()), None);
    }

    #[test]
    fn test_paging_keys() {
        assert_eq!(resolve("PageUp", Modifiers::default()), Some(Command::PrevPage));
        assert_eq!(resolve("PageDown", Modifiers::default()), Some(Command::NextPage));
        assert_eq!(resolve("n", ctrl()), Some(Command::AddPage));
    }

    #[test]
    fn test_scroll_width_delta() {
        assert!((scroll_width_delta(120.0) - 2.0).abs() < f64::EPSILON);
        assert!((scroll_width_delta(-60.0) + 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_registry_formats() {
        let all = ShortcutRegistry::all();
        assert!(all.iter().any(|s| s.format() == "Ctrl+Shift+Z"));
    }
}
