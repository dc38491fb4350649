//! Navigation component for the web UI.

use dioxus::prelude::*;

/// Navigation links for the main menu.
const NAV_LINKS: &[(&str, &str, &str)] = &[
    ("home", "Home", "/"),
    ("what", "What", "/what"),
    ("how", "How", "/how"),
];

#[derive(Props, Clone, PartialEq)]
pub struct NavProps {
    /// The currently active page ID (e.g., "home", "what")
    pub active: String,
    /// Tabs are hidden on the login page.
    pub show_tabs: bool,
}

/// Navigation bar component.
#[component]
pub fn Nav(props: NavProps) -> Element {
    rsx! {
        nav {
            ul {
                li {
                    strong { "The Wall" }
                }
            }
            if props.show_tabs {
                ul {
                    for (id, label, href) in NAV_LINKS.iter() {
                        li {
                            if *id == props.active.as_str() {
                                a {
                                    href: *href,
                                    "aria-current": "page",
                                    strong { "{label}" }
                                }
                            } else {
                                a {
                                    href: *href,
                                    "{label}"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
