use std::collections::BTreeMap;
use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Action {
    Quit,
    NewWindow,
    CloseWindow,
    MoveWindowOut,
    FocusNext,
    FocusPrevious,
    ToggleHelp,
    ToggleMouseCapture,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::Quit => "Quit",
            Action::NewWindow => "New window",
            Action::CloseWindow => "Close focused window",
            Action::MoveWindowOut => "Move focused window out of the grid",
            Action::FocusNext => "Focus next window",
            Action::FocusPrevious => "Focus previous window",
            Action::ToggleHelp => "Toggle help",
            Action::ToggleMouseCapture => "Toggle mouse capture",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyCombo {
    pub fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    pub fn matches(&self, key: &KeyEvent) -> bool {
        key.code == self.code && key.modifiers == self.mods
    }

    pub fn display(&self) -> String {
        let mut parts = Vec::new();
        if self.mods.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl".to_string());
        }
        if self.mods.contains(KeyModifiers::SHIFT) {
            parts.push("Shift".to_string());
        }
        if self.mods.contains(KeyModifiers::ALT) {
            parts.push("Alt".to_string());
        }
        let code = match self.code {
            KeyCode::Char(c) => c.to_ascii_uppercase().to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::BackTab => "Shift+Tab".to_string(),
            KeyCode::Delete => "Delete".to_string(),
            KeyCode::F(n) => format!("F{}", n),
            _ => format!("{:?}", self.code),
        };
        parts.push(code);
        parts.join("+")
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[derive(Debug, Clone, Default)]
pub struct KeyBindings {
    map: BTreeMap<Action, Vec<KeyCombo>>,
}

impl KeyBindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn defaults() -> Self {
        use Action::*;
        let mut kb = Self::new();
        kb.add(Quit, KeyCombo::new(KeyCode::Char('q'), KeyModifiers::CONTROL));
        kb.add(Quit, KeyCombo::new(KeyCode::Char('q'), KeyModifiers::NONE));
        kb.add(NewWindow, KeyCombo::new(KeyCode::Char('n'), KeyModifiers::NONE));
        kb.add(CloseWindow, KeyCombo::new(KeyCode::Char('x'), KeyModifiers::NONE));
        kb.add(CloseWindow, KeyCombo::new(KeyCode::Delete, KeyModifiers::NONE));
        kb.add(MoveWindowOut, KeyCombo::new(KeyCode::Char('o'), KeyModifiers::NONE));
        kb.add(FocusNext, KeyCombo::new(KeyCode::Tab, KeyModifiers::NONE));
        kb.add(FocusPrevious, KeyCombo::new(KeyCode::BackTab, KeyModifiers::NONE));
        kb.add(ToggleHelp, KeyCombo::new(KeyCode::Char('?'), KeyModifiers::NONE));
        kb.add(ToggleHelp, KeyCombo::new(KeyCode::F(1), KeyModifiers::NONE));
        kb.add(ToggleMouseCapture, KeyCombo::new(KeyCode::Char('m'), KeyModifiers::NONE));
        kb
    }

    pub fn add(&mut self, action: Action, combo: KeyCombo) {
        self.map.entry(action).or_default().push(combo);
    }

    pub fn matches(&self, action: Action, key: &KeyEvent) -> bool {
        self.map
            .get(&action)
            .is_some_and(|list| list.iter().any(|c| c.matches(key)))
    }

    pub fn action_for_key(&self, key: &KeyEvent) -> Option<Action> {
        self.map
            .iter()
            .find(|(_, list)| list.iter().any(|c| c.matches(key)))
            .map(|(act, _)| *act)
    }

    /// One row per action, in declaration order.
    pub fn help_entries(&self) -> Vec<(Action, Vec<String>)> {
        self.map
            .iter()
            .map(|(act, list)| (*act, list.iter().map(KeyCombo::display).collect()))
            .collect()
    }
}
