//! Disclosure toggles for the mobile nav menu and the floating contact menu.

/// Open/closed state of a menu driven by a toggle button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Disclosure {
    open: bool,
}

/// Where a document click landed relative to the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Toggle,
    /// A link inside the menu.
    MenuLink,
    /// Anywhere else inside the menu.
    Menu,
    Outside,
}

impl Disclosure {
    #[must_use]
    pub const fn is_open(self) -> bool {
        self.open
    }

    /// Value for the toggle's `aria-expanded` attribute.
    #[must_use]
    pub const fn aria_expanded(self) -> &'static str {
        if self.open { "true" } else { "false" }
    }

    /// Apply a click and return the new state.
    ///
    /// The toggle flips the menu; following a menu link or clicking outside
    /// an open menu closes it.
    #[must_use]
    pub const fn click(self, target: ClickTarget) -> Self {
        let open = match target {
            ClickTarget::Toggle => !self.open,
            ClickTarget::MenuLink | ClickTarget::Outside => false,
            ClickTarget::Menu => self.open,
        };
        Self { open }
    }
}

/// DOM id for the actions container of the `index`-th floating contact menu.
#[must_use]
pub fn contact_actions_id(index: usize) -> String {
    format!("contactActions-{}", index + 1)
}
