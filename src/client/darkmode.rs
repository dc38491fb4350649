//! Dark mode stylesheet toggle.
//!
//! Flips the page between the default style and the dark style by inserting
//! or removing a single `<link rel="stylesheet">` element in the document
//! head. State lives for the page session only; reloading the page resets
//! to the default style.

/// Path of the dark stylesheet, relative to the serving origin.
pub const DARK_STYLESHEET_HREF: &str = "/static/darkmode.css";

/// The document environment the toggle runs against: a head container that
/// can append a typed external-stylesheet reference and detach it later.
pub trait DocumentHead {
    /// Handle to an attached stylesheet reference.
    type Link;

    /// Create a stylesheet link for `href` (`rel="stylesheet"`,
    /// `type="text/css"`) and append it as the last child of the head.
    fn append_stylesheet(&mut self, href: &str) -> Self::Link;

    /// Detach a previously appended link. Detaching a link that is no
    /// longer in the head is a no-op.
    fn remove_stylesheet(&mut self, link: Self::Link);
}

/// Whether the dark stylesheet is applied, plus exclusive ownership of the
/// attached link element while it is.
///
/// Invariant: the handle is held if and only if `active` is true.
pub struct ToggleState<H: DocumentHead> {
    active: bool,
    style_ref: Option<H::Link>,
}

impl<H: DocumentHead> Default for ToggleState<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: DocumentHead> ToggleState<H> {
    pub fn new() -> Self {
        Self {
            active: false,
            style_ref: None,
        }
    }

    /// Whether the dark stylesheet is currently applied.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Flip between the default and dark styles.
    ///
    /// Inactive: attach the dark stylesheet and keep its handle.
    /// Active: detach the held handle and release it.
    pub fn toggle(&mut self, head: &mut H) {
        if self.active {
            if let Some(link) = self.style_ref.take() {
                head.remove_stylesheet(link);
            }
            self.active = false;
            return;
        }

        let link = head.append_stylesheet(DARK_STYLESHEET_HREF);
        self.style_ref = Some(link);
        self.active = true;
    }
}

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::{DocumentHead, ToggleState};
    use std::cell::RefCell;
    use wasm_bindgen::prelude::*;

    /// Head of the live page document.
    pub struct BrowserHead {
        document: web_sys::Document,
    }

    impl BrowserHead {
        fn from_window() -> Option<Self> {
            let document = web_sys::window()?.document()?;
            Some(Self { document })
        }
    }

    impl DocumentHead for BrowserHead {
        type Link = web_sys::Element;

        fn append_stylesheet(&mut self, href: &str) -> Self::Link {
            let link = self
                .document
                .create_element("link")
                .expect_throw("create link element");
            link.set_attribute("rel", "stylesheet")
                .expect_throw("set rel");
            link.set_attribute("type", "text/css")
                .expect_throw("set type");
            link.set_attribute("href", href).expect_throw("set href");
            if let Some(head) = self.document.head() {
                head.append_child(&link).expect_throw("append link to head");
            }
            link
        }

        fn remove_stylesheet(&mut self, link: Self::Link) {
            // Element::remove on an already-detached node is a no-op.
            link.remove();
        }
    }

    thread_local! {
        static STATE: RefCell<ToggleState<BrowserHead>> = RefCell::new(ToggleState::new());
    }

    /// Toggle the dark stylesheet on the current page.
    ///
    /// Bound to the layout's footer button; one toggle state per page
    /// session, reset on reload.
    #[wasm_bindgen]
    pub fn toggle_dark_mode() {
        let Some(mut head) = BrowserHead::from_window() else {
            return;
        };
        STATE.with(|state| state.borrow_mut().toggle(&mut head));
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::toggle_dark_mode;
