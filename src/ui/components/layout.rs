//! Layout component wrapping all pages with Pico CSS and common elements.

use dioxus::prelude::*;

use super::darkmode::{DarkModeToggle, DARKMODE_LOADER};
use super::nav::Nav;

#[derive(Props, Clone, PartialEq)]
pub struct LayoutProps {
    /// Page title (shown in browser tab)
    pub title: String,
    /// Active navigation item ID
    pub nav_active: String,
    /// Tabs are hidden on the login page.
    #[props(default = true)]
    pub show_tabs: bool,
    /// Page content
    pub children: Element,
}

/// Main layout component wrapping all pages.
#[component]
pub fn Layout(props: LayoutProps) -> Element {
    let version = env!("CARGO_PKG_VERSION");

    rsx! {
        head {
            meta { charset: "utf-8" }
            meta { name: "viewport", content: "width=device-width, initial-scale=1" }
            title { "{props.title} - The Wall" }
            link {
                rel: "stylesheet",
                href: "https://cdn.jsdelivr.net/npm/@picocss/pico@2/css/pico.min.css"
            }
            link { rel: "stylesheet", href: "/static/wall.css" }
        }
        body {
            header { class: "container",
                Nav { active: props.nav_active.clone(), show_tabs: props.show_tabs }
            }
            main { class: "container",
                {props.children}
            }
            footer { class: "container",
                small { "The Wall v{version}" }
                DarkModeToggle {}
            }
            script { r#type: "module", dangerous_inner_html: DARKMODE_LOADER }
        }
    }
}
