//! Single post page component.

use crate::store::PostView;
use crate::ui::components::{Layout, PostCard};
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct PostPageProps {
    pub post: PostView,
}

/// Single post page component.
#[component]
pub fn PostPage(props: PostPageProps) -> Element {
    rsx! {
        Layout {
            title: props.post.post.title.clone(),
            nav_active: "home".to_string(),

            PostCard { post: props.post.clone() }
            p {
                a { href: "/", "Back to the wall" }
            }
        }
    }
}
