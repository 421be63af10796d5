#![forbid(unsafe_code)]

//! Interpretation toggle: one checkbox, two mutually exclusive sections.

/// CSS `display` value for a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Display {
    Block,
    None,
}

impl Display {
    #[must_use]
    pub const fn as_css(self) -> &'static str {
        match self {
            Self::Block => "block",
            Self::None => "none",
        }
    }
}

/// Which section is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interpretation {
    /// Checkbox checked.
    ManyWorlds,
    /// Checkbox clear.
    Copenhagen,
}

/// Display values for both sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleLayout {
    pub many_worlds: Display,
    pub copenhagen: Display,
}

/// Mirror of the checkbox state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayToggle {
    checked: bool,
}

impl DisplayToggle {
    #[must_use]
    pub const fn new(checked: bool) -> Self {
        Self { checked }
    }

    #[must_use]
    pub const fn is_checked(&self) -> bool {
        self.checked
    }

    /// Update from the checkbox and return the layout to apply.
    pub fn set_checked(&mut self, checked: bool) -> ToggleLayout {
        self.checked = checked;
        self.layout()
    }

    #[must_use]
    pub const fn visible(&self) -> Interpretation {
        if self.checked {
            Interpretation::ManyWorlds
        } else {
            Interpretation::Copenhagen
        }
    }

    #[must_use]
    pub const fn layout(&self) -> ToggleLayout {
        match self.visible() {
            Interpretation::ManyWorlds => ToggleLayout {
                many_worlds: Display::Block,
                copenhagen: Display::None,
            },
            Interpretation::Copenhagen => ToggleLayout {
                many_worlds: Display::None,
                copenhagen: Display::Block,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn unchecked_shows_copenhagen() {
        let toggle = DisplayToggle::new(false);
        assert_eq!(toggle.visible(), Interpretation::Copenhagen);
        assert_eq!(
            toggle.layout(),
            ToggleLayout {
                many_worlds: Display::None,
                copenhagen: Display::Block,
            }
        );
    }

    #[test]
    fn checked_shows_many_worlds() {
        let mut toggle = DisplayToggle::default();
        let layout = toggle.set_checked(true);
        assert!(toggle.is_checked());
        assert_eq!(layout.many_worlds.as_css(), "block");
        assert_eq!(layout.copenhagen.as_css(), "none");
    }

    #[test]
    fn flipping_back_restores() {
        let mut toggle = DisplayToggle::new(true);
        toggle.set_checked(false);
        assert_eq!(toggle.visible(), Interpretation::Copenhagen);
    }
}
