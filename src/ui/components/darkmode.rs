//! Dark mode toggle button.
//!
//! The toggle logic itself lives in `crate::client::darkmode` and is
//! compiled to WebAssembly; this component renders the button and the
//! loader script that binds it.

use dioxus::prelude::*;

/// Loads the wasm client and binds the toggle button (included in body as a
/// module script).
pub const DARKMODE_LOADER: &str = r#"
import init, { toggle_dark_mode } from '/static/client/the_wall.js';
await init();
document.getElementById('darkmode-toggle').addEventListener('click', () => toggle_dark_mode());
"#;

/// Footer button that flips the dark stylesheet on and off.
#[component]
pub fn DarkModeToggle() -> Element {
    rsx! {
        button {
            id: "darkmode-toggle",
            class: "secondary outline",
            "Dark mode"
        }
    }
}
