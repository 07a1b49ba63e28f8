use crossterm::event::KeyCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HotkeyBinding {
    pub key: &'static str,
    pub action: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotkeyAction {
    ScrollUp,
    ScrollDown,
    JumpTop,
    JumpBottom,
    Quit,
}

pub const BOARD_BINDINGS: [HotkeyBinding; 6] = [
    HotkeyBinding {
        key: "Up",
        action: "scroll up",
    },
    HotkeyBinding {
        key: "Down",
        action: "scroll down",
    },
    HotkeyBinding {
        key: "t",
        action: "top",
    },
    HotkeyBinding {
        key: "b",
        action: "bottom",
    },
    HotkeyBinding {
        key: "Esc",
        action: "quit",
    },
    HotkeyBinding {
        key: "q",
        action: "quit",
    },
];

pub fn action_for_key(code: KeyCode) -> Option<HotkeyAction> {
    match code {
        KeyCode::Up => Some(HotkeyAction::ScrollUp),
        KeyCode::Down => Some(HotkeyAction::ScrollDown),
        KeyCode::Char('t') => Some(HotkeyAction::JumpTop),
        KeyCode::Char('b') => Some(HotkeyAction::JumpBottom),
        KeyCode::Esc | KeyCode::Char('q') => Some(HotkeyAction::Quit),
        _ => None,
    }
}

pub fn controls_legend() -> String {
    let parts = BOARD_BINDINGS
        .iter()
        .map(|binding| format!("{} {}", binding.key, binding.action))
        .collect::<Vec<_>>();
    format!("Keys: {}", parts.join("  "))
}
