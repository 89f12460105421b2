//! Title menu cursor and instructions overlay.
use crate::input::InputKey;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuOption {
    Start,
    Gallery,
    About,
}

impl MenuOption {
    pub const ALL: [MenuOption; 3] = [MenuOption::Start, MenuOption::Gallery, MenuOption::About];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Gallery => "gallery",
            Self::About => "about",
        }
    }

    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Start => "▶",
            Self::Gallery => "📚",
            Self::About => "ℹ",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MainMenu {
    selected: usize,
    instructions_open: bool,
}

impl MainMenu {
    #[must_use]
    pub fn selected(&self) -> MenuOption {
        MenuOption::ALL[self.selected % MenuOption::ALL.len()]
    }

    #[must_use]
    pub const fn instructions_open(&self) -> bool {
        self.instructions_open
    }

    pub fn open_instructions(&mut self) {
        self.instructions_open = true;
    }

    pub fn close_instructions(&mut self) {
        self.instructions_open = false;
    }

    pub fn hover(&mut self, option: MenuOption) {
        if let Some(idx) = MenuOption::ALL.iter().position(|o| *o == option) {
            self.selected = idx;
        }
    }

    /// Returns the option to activate, if the key activates one.
    pub fn handle_key(&mut self, key: InputKey) -> Option<MenuOption> {
        let len = MenuOption::ALL.len();
        if self.instructions_open {
            if matches!(key, InputKey::Escape | InputKey::Enter) {
                self.instructions_open = false;
            }
            return None;
        }
        match key {
            InputKey::ArrowUp => {
                self.selected = (self.selected + len - 1) % len;
                None
            }
            InputKey::ArrowDown => {
                self.selected = (self.selected + 1) % len;
                None
            }
            InputKey::Enter => Some(self.selected()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_wrap() {
        let mut menu = MainMenu::default();
        menu.handle_key(InputKey::ArrowUp);
        assert_eq!(menu.selected(), MenuOption::About);
        menu.handle_key(InputKey::ArrowDown);
        assert_eq!(menu.selected(), MenuOption::Start);
        menu.handle_key(InputKey::ArrowDown);
        assert_eq!(menu.handle_key(InputKey::Enter), Some(MenuOption::Gallery));
    }

    #[test]
    fn instructions_swallow_keys_until_closed() {
        let mut menu = MainMenu::default();
        menu.open_instructions();
        assert_eq!(menu.handle_key(InputKey::ArrowDown), None);
        assert_eq!(menu.selected(), MenuOption::Start);
        assert_eq!(menu.handle_key(InputKey::Enter), None);
        assert!(!menu.instructions_open());
        assert_eq!(menu.handle_key(InputKey::Enter), Some(MenuOption::Start));
        menu.open_instructions();
        menu.handle_key(InputKey::Escape);
        assert!(!menu.instructions_open());
    }
}
