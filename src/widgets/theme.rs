use crate::storage::prefs::{log_persist_error, THEME_KEY};
use crate::storage::PreferenceStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn load(prefs: &PreferenceStore) -> Self {
        match prefs.get(THEME_KEY) {
            Some("light") => Theme::Light,
            _ => Theme::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn toggle(&mut self, prefs: &mut PreferenceStore) -> Theme {
        *self = match *self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        };
        log_persist_error(prefs.set(THEME_KEY, self.as_str()), "theme");
        log::info!("Theme switched to {}", self.as_str());
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_defaults_to_dark_and_persists() {
        let mut prefs = PreferenceStore::in_memory();
        let mut theme = Theme::load(&prefs);
        assert_eq!(theme, Theme::Dark);

        assert_eq!(theme.toggle(&mut prefs), Theme::Light);
        assert_eq!(prefs.get(THEME_KEY), Some("light"));
        assert_eq!(Theme::load(&prefs), Theme::Light);

        prefs.set(THEME_KEY, "solarized").unwrap();
        assert_eq!(Theme::load(&prefs), Theme::Dark);
    }
}
