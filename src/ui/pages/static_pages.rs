//! Static info pages.

use crate::ui::components::Layout;
use dioxus::prelude::*;

/// "What is this" page.
#[component]
pub fn WhatPage() -> Element {
    rsx! {
        Layout {
            title: "What".to_string(),
            nav_active: "what".to_string(),

            h1 { "What is the wall?" }
            p {
                "A shared journal for a small group. Everyone posts by email; "
                "posts are collected into a daily block that is released the "
                "next morning, so you read each other in batches instead of "
                "refreshing a feed."
            }
        }
    }
}

/// "How to post" page.
#[component]
pub fn HowPage() -> Element {
    rsx! {
        Layout {
            title: "How".to_string(),
            nav_active: "how".to_string(),

            h1 { "How to post" }
            p { "Send an email to the wall's address. The subject becomes the title." }
            ul {
                li { "The body is Markdown." }
                li {
                    "Reference another post with its number, like "
                    code { "#12" }
                    ", and it becomes a link."
                }
                li { "Inline images are saved and shown in the post." }
            }
        }
    }
}
