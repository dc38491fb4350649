//! Post card component.

use crate::store::PostView;
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct PostCardProps {
    pub post: PostView,
}

/// One post: title, author, timestamp and the rendered body.
#[component]
pub fn PostCard(props: PostCardProps) -> Element {
    let posted = props.post.post.created_at.format("%a %b %e %Y").to_string();

    rsx! {
        article { class: "post-card",
            header {
                hgroup {
                    h3 {
                        a { href: "/post?id={props.post.post.id}", "{props.post.post.title}" }
                    }
                    p { "by {props.post.author}" }
                }
                small { "{posted}" }
            }
            // Post bodies are rendered to HTML at ingest time.
            div { dangerous_inner_html: "{props.post.post.body}" }
        }
    }
}
