//! Dark/light theme preference.

use super::error::DashboardError;
use super::surface::ThemeSurface;
use crate::consts::dashboard_consts::session::THEME_KEY;
use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    /// Markup of the toggle button, which shows the theme it switches to.
    pub fn toggle_icon(self) -> &'static str {
        match self {
            Theme::Dark => r#"<i class="fas fa-sun" aria-hidden="true"></i>"#,
            Theme::Light => r#"<i class="fas fa-moon" aria-hidden="true"></i>"#,
        }
    }
}

/// Client-local key/value storage that survives reloads.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<(), DashboardError>;
}

pub struct ThemeManager {
    store: Rc<dyn PreferenceStore>,
    surface: Rc<dyn ThemeSurface>,
    current: Cell<Theme>,
}

impl ThemeManager {
    /// Applies the stored theme, or the OS preference when none was stored.
    pub fn init(store: Rc<dyn PreferenceStore>, surface: Rc<dyn ThemeSurface>) -> Self {
        let stored = store.get(THEME_KEY);
        let theme = match stored.as_deref().map(str::parse::<Theme>) {
            Some(Ok(theme)) => theme,
            other => {
                if let Some(Err(_)) = other {
                    log::warn!("Ignoring unknown stored theme {:?}", stored);
                }
                if surface.prefers_dark() {
                    Theme::Dark
                } else {
                    Theme::Light
                }
            }
        };
        surface.apply_theme(theme);

        Self {
            store,
            surface,
            current: Cell::new(theme),
        }
    }

    pub fn current(&self) -> Theme {
        self.current.get()
    }

    /// Switches theme and persists the choice.
    pub fn toggle(&self) -> Result<Theme, DashboardError> {
        let next = self.current.get().toggled();
        self.surface.apply_theme(next);
        self.current.set(next);
        self.store.set(THEME_KEY, &next.to_string())?;
        Ok(next)
    }
}
