//! Semantic application events — crossterm key events mapped to a
//! widget-agnostic vocabulary so widgets never touch crossterm directly.
//!
//! | Key(s)                  | Event                     |
//! |-------------------------|---------------------------|
//! | `q`, `Ctrl+c`           | `Quit`                    |
//! | `Tab` / `Shift+Tab`     | `NextPanel` / `PrevPanel` |
//! | `1`–`5`                 | `SelectPanel(n)`          |
//! | `↑` / `k`               | `ScrollUp`                |
//! | `↓` / `j`               | `ScrollDown`              |
//! | `PageUp`, `Ctrl+u`      | `PageUp`                  |
//! | `PageDown`, `Ctrl+d`    | `PageDown`                |
//! | `g` / `G`               | `Top` / `Bottom`          |
//! | `?`                     | `Help`                    |
//! | `Esc`                   | `Escape`                  |
//! | terminal resize         | `Resize(w, h)`            |

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Quit,
    NextPanel,
    PrevPanel,
    /// Zero-based panel index.
    SelectPanel(usize),
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    Top,
    Bottom,
    Help,
    Escape,
    Resize(u16, u16),
}

/// Map a raw crossterm [`Event`] to an [`AppEvent`].
///
/// Returns `None` for events with no meaning to the dashboard (mouse,
/// unbound keys).
pub fn to_app_event(event: Event) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) => map_key(key),
        _ => None,
    }
}

fn map_key(key: KeyEvent) -> Option<AppEvent> {
    use KeyCode::*;
    use KeyModifiers as Mod;

    match key.code {
        Char('q') if key.modifiers == Mod::NONE => Some(AppEvent::Quit),
        Char('c') if key.modifiers == Mod::CONTROL => Some(AppEvent::Quit),

        Tab if key.modifiers == Mod::NONE => Some(AppEvent::NextPanel),
        BackTab => Some(AppEvent::PrevPanel),
        Char(c @ '1'..='5') if key.modifiers == Mod::NONE => {
            Some(AppEvent::SelectPanel(c as usize - '1' as usize))
        }

        Up | Char('k') if key.modifiers == Mod::NONE => Some(AppEvent::ScrollUp),
        Down | Char('j') if key.modifiers == Mod::NONE => Some(AppEvent::ScrollDown),
        PageUp => Some(AppEvent::PageUp),
        PageDown => Some(AppEvent::PageDown),
        Char('u') if key.modifiers == Mod::CONTROL => Some(AppEvent::PageUp),
        Char('d') if key.modifiers == Mod::CONTROL => Some(AppEvent::PageDown),
        Home | Char('g') if key.modifiers == Mod::NONE => Some(AppEvent::Top),
        // 'G' may or may not carry SHIFT depending on the terminal.
        End | Char('G') => Some(AppEvent::Bottom),

        Char('?') => Some(AppEvent::Help),
        Esc => Some(AppEvent::Escape),

        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
