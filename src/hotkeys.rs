/// Page-wide keyboard shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotkeyEvent {
    /// Close the mobile menu and hide search results.
    Dismiss,
    FocusSearch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Slash,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub meta: bool,
}

pub fn resolve(key: Key, modifiers: Modifiers, search_focused: bool) -> Option<HotkeyEvent> {
    match key {
        Key::Escape => Some(HotkeyEvent::Dismiss),
        Key::Slash if !modifiers.ctrl && !modifiers.meta && !search_focused => {
            Some(HotkeyEvent::FocusSearch)
        }
        Key::Slash => None,
    }
}
