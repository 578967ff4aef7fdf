//! The shop page the cart renders into.
//!
//! [`Page`] is the slice of the DOM the cart touches, addressed by element
//! id. Writes to elements that are not on the page report `false` and do
//! nothing, so the same controller runs on every page of the site.
//! [`Dialogs`] covers the blocking browser prompts and the clipboard.

use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::rc::Rc;

use thiserror::Error;

/// Element ids the cart reads and writes.
pub mod ids {
    pub const PRODUCT_GRID: &str = "productGrid";
    pub const CART_LIST: &str = "cartList";
    pub const CART_EMPTY: &str = "cartEmpty";
    pub const CART_SUBTOTAL: &str = "cartSubtotal";
    pub const CART_SHIPPING: &str = "cartShipping";
    pub const CART_TOTAL: &str = "cartTotal";
    pub const PAY_AMOUNT: &str = "payAmount";
    pub const PAYPAL_LINK: &str = "paypalLink";
    pub const REFERENCE_HINT: &str = "swishHint";
    pub const CART_COUNT: &str = "cartCount";

    /// Every element of the full shop page.
    pub const SHOP_PAGE: [&str; 10] = [
        PRODUCT_GRID,
        CART_LIST,
        CART_EMPTY,
        CART_SUBTOTAL,
        CART_SHIPPING,
        CART_TOTAL,
        PAY_AMOUNT,
        PAYPAL_LINK,
        REFERENCE_HINT,
        CART_COUNT,
    ];
}

/// Element-level writes on the current page.
pub trait Page {
    /// Whether the element exists.
    fn has(&self, id: &str) -> bool;

    /// Replace the element's inner HTML.
    fn set_html(&mut self, id: &str, html: &str) -> bool;

    /// Replace the element's text content.
    fn set_text(&mut self, id: &str, text: &str) -> bool;

    /// Show or hide the element.
    fn set_visible(&mut self, id: &str, visible: bool) -> bool;

    /// Point a link element at `href`, with the given label.
    fn set_link(&mut self, id: &str, href: &str, label: &str) -> bool;
}

/// State of one element in a [`MemoryPage`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub html: String,
    pub text: String,
    pub visible: bool,
    pub href: Option<String>,
}

/// In-memory page: a fixed set of elements that records writes.
#[derive(Debug, Clone, Default)]
pub struct MemoryPage {
    elements: BTreeMap<String, Element>,
}

impl MemoryPage {
    /// A page containing exactly the given elements, all visible.
    #[must_use]
    pub fn with_elements<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
        let elements = ids
            .into_iter()
            .map(|id| {
                (
                    id.to_owned(),
                    Element {
                        visible: true,
                        ..Element::default()
                    },
                )
            })
            .collect();
        Self { elements }
    }

    /// The full shop page.
    #[must_use]
    pub fn shop() -> Self {
        Self::with_elements(ids::SHOP_PAGE)
    }

    /// A page with none of the shop elements.
    #[must_use]
    pub fn blank() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    #[must_use]
    pub fn html(&self, id: &str) -> Option<&str> {
        self.element(id).map(|e| e.html.as_str())
    }

    #[must_use]
    pub fn text(&self, id: &str) -> Option<&str> {
        self.element(id).map(|e| e.text.as_str())
    }

    #[must_use]
    pub fn href(&self, id: &str) -> Option<&str> {
        self.element(id).and_then(|e| e.href.as_deref())
    }

    #[must_use]
    pub fn is_visible(&self, id: &str) -> bool {
        self.element(id).is_some_and(|e| e.visible)
    }
}

impl Page for MemoryPage {
    fn has(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    fn set_html(&mut self, id: &str, html: &str) -> bool {
        self.elements.get_mut(id).is_some_and(|e| {
            html.clone_into(&mut e.html);
            true
        })
    }

    fn set_text(&mut self, id: &str, text: &str) -> bool {
        self.elements.get_mut(id).is_some_and(|e| {
            text.clone_into(&mut e.text);
            true
        })
    }

    fn set_visible(&mut self, id: &str, visible: bool) -> bool {
        self.elements.get_mut(id).is_some_and(|e| {
            e.visible = visible;
            true
        })
    }

    fn set_link(&mut self, id: &str, href: &str, label: &str) -> bool {
        self.elements.get_mut(id).is_some_and(|e| {
            e.href = Some(href.to_owned());
            label.clone_into(&mut e.text);
            true
        })
    }
}

/// Clipboard write failure (permission denied, insecure context).
#[derive(Debug, Error)]
#[error("clipboard unavailable: {0}")]
pub struct ClipboardError(pub String);

/// Blocking browser prompts and the clipboard.
pub trait Dialogs {
    fn alert(&self, message: &str);

    fn confirm(&self, message: &str) -> bool;

    /// Copy `text` to the clipboard.
    ///
    /// # Errors
    ///
    /// Returns `ClipboardError` if the clipboard cannot be written.
    fn copy_to_clipboard(&self, text: &str) -> Result<(), ClipboardError>;
}

#[derive(Debug, Default)]
struct ScriptState {
    alerts: Vec<String>,
    confirms: Vec<String>,
    answers: VecDeque<bool>,
    clipboard: Option<String>,
    clipboard_blocked: bool,
}

/// Scripted dialogs: confirm answers are queued up front, alerts and
/// clipboard writes are recorded. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDialogs {
    state: Rc<RefCell<ScriptState>>,
}

impl ScriptedDialogs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the answer for the next `confirm`. Unanswered confirms say no.
    pub fn answer_next(&self, yes: bool) {
        self.state.borrow_mut().answers.push_back(yes);
    }

    /// Make clipboard writes fail.
    pub fn block_clipboard(&self) {
        self.state.borrow_mut().clipboard_blocked = true;
    }

    #[must_use]
    pub fn alerts(&self) -> Vec<String> {
        self.state.borrow().alerts.clone()
    }

    #[must_use]
    pub fn confirms(&self) -> Vec<String> {
        self.state.borrow().confirms.clone()
    }

    #[must_use]
    pub fn clipboard(&self) -> Option<String> {
        self.state.borrow().clipboard.clone()
    }
}

impl Dialogs for ScriptedDialogs {
    fn alert(&self, message: &str) {
        self.state.borrow_mut().alerts.push(message.to_owned());
    }

    fn confirm(&self, message: &str) -> bool {
        let mut state = self.state.borrow_mut();
        state.confirms.push(message.to_owned());
        state.answers.pop_front().unwrap_or(false)
    }

    fn copy_to_clipboard(&self, text: &str) -> Result<(), ClipboardError> {
        let mut state = self.state.borrow_mut();
        if state.clipboard_blocked {
            return Err(ClipboardError("permission denied".to_string()));
        }
        state.clipboard = Some(text.to_owned());
        Ok(())
    }
}
