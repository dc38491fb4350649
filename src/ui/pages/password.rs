//! Login page component.

use crate::ui::components::Layout;
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct PasswordPageProps {
    /// A previous attempt failed (wrong password or stale token).
    pub did_error: bool,
}

/// Login page component: one shared password for the whole site.
#[component]
pub fn PasswordPage(props: PasswordPageProps) -> Element {
    rsx! {
        Layout {
            title: "Password".to_string(),
            nav_active: "password".to_string(),
            show_tabs: false,

            article {
                h1 { "The Wall" }
                if props.did_error {
                    p { class: "login-error", "That didn't work. Try again." }
                }
                form { method: "post", action: "/password",
                    input {
                        r#type: "password",
                        name: "password",
                        placeholder: "Password",
                        required: true,
                    }
                    button { r#type: "submit", "Enter" }
                }
            }
        }
    }
}
