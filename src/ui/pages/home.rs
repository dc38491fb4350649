//! Home page component: released blocks, newest first.

use crate::store::BlockView;
use crate::ui::components::{Layout, PostCard};
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct HomePageProps {
    pub blocks: Vec<BlockView>,
    /// Posts waiting in blocks that have not been released yet.
    pub queued_posts: usize,
}

/// Home page component.
#[component]
pub fn HomePage(props: HomePageProps) -> Element {
    rsx! {
        Layout {
            title: "Home".to_string(),
            nav_active: "home".to_string(),

            if props.queued_posts > 0 {
                p { class: "queued-note",
                    "{props.queued_posts} post(s) waiting in the next block."
                }
            }

            if props.blocks.is_empty() {
                article {
                    p { "Nothing on the wall yet. Posts show up here once their block is released." }
                }
            }

            for block in props.blocks.iter() {
                BlockSection { block: block.clone() }
            }
        }
    }
}

/// One released block with its posts.
#[component]
fn BlockSection(block: BlockView) -> Element {
    let released = block.block.created_at.format("%a %b %e %Y").to_string();

    rsx! {
        section { class: "block-section",
            hgroup {
                h2 { "{block.block.title}" }
                p { "{released}" }
            }
            for post in block.posts.iter() {
                PostCard { post: post.clone() }
            }
        }
    }
}
