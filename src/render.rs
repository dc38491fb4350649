//! Rendering of incoming post bodies.
//!
//! Email text arrives as Markdown. Rendering normalizes line endings,
//! converts Markdown to HTML, rewrites inline-image references to point at
//! the saved image files, and turns `#123` into a link to that post.

use pulldown_cmark::{html, Options, Parser};
use regex::Regex;
use std::sync::LazyLock;

static POST_REF: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#(\d+)").unwrap());

/// An inline image extracted from an email, saved under the images
/// directory and referenced from the rendered body.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRef {
    /// Name the sender used for the attachment.
    pub name: String,
    /// Serving path, relative to the origin (no leading slash).
    pub path: String,
}

/// Mail clients ship CRLF bodies; the Markdown parser wants plain newlines.
pub fn normalize_newlines(body: &str) -> String {
    body.replace('\r', "\n")
}

/// Render Markdown to HTML.
pub fn markdown_to_html(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let parser = Parser::new_ext(markdown, options);
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    html_output
}

/// Rewrite `[image: name]` placeholders left in the body to `<img>` tags
/// pointing at the saved files.
pub fn apply_image_refs(html: &str, images: &[ImageRef]) -> String {
    let mut out = html.to_string();
    for image in images {
        let placeholder = format!("[image: {}]", image.name);
        let tag = format!("<img src=\"/{}\">", image.path);
        out = out.replace(&placeholder, &tag);
    }
    out
}

/// Turn `#123` references into links to the post page.
pub fn linkify_post_refs(html: &str) -> String {
    POST_REF
        .replace_all(html, r##"<a href="/post?id=$1">#$1</a>"##)
        .into_owned()
}

/// Full pipeline from email text body to stored post HTML.
pub fn render_post_body(text: &str, images: &[ImageRef]) -> String {
    let body = normalize_newlines(text);
    let html = markdown_to_html(&body);
    let html = apply_image_refs(&html, images);
    linkify_post_refs(&html)
}
