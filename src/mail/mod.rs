//! Inbound mail webhook.
//!
//! Posts arrive as email via the provider's inbound-parse webhook (SendGrid
//! Inbound Parse): a multipart form whose `email` field carries the raw
//! RFC 822 message. The sender must be a known member; the subject becomes
//! the post title and the Markdown text body becomes the post body.

use crate::api::AppState;
use crate::render::{self, ImageRef};
use crate::store::Block;
use anyhow::{Context, Result};
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use chrono::{DateTime, Utc};
use mail_parser::{Message, MessageParser, MimeHeaders};
use std::fs;
use std::path::Path;

/// POST /mail - inbound mail webhook.
///
/// Always answers 200, even for bodies that are not multipart at all, so
/// the mail provider does not resend the message.
pub async fn mail_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> &'static str {
    match multipart {
        Ok(multipart) => {
            if let Err(e) = process_inbound(&state, multipart).await {
                tracing::warn!("inbound mail dropped: {e:#}");
            }
        }
        Err(e) => tracing::warn!("inbound mail dropped: {e}"),
    }
    "Received."
}

async fn process_inbound(state: &AppState, multipart: Multipart) -> Result<()> {
    let raw = extract_raw_email(multipart).await?;
    let message = MessageParser::default()
        .parse(&raw)
        .context("unparseable email")?;

    let from = message
        .from()
        .and_then(|a| a.first())
        .and_then(|addr| addr.address.as_deref())
        .context("email has no sender address")?
        .to_string();

    let Some(user) = state.store.user_by_email(&from).await else {
        tracing::info!(from = %from, "email from unknown sender, dropping");
        return Ok(());
    };

    let subject = message.subject().unwrap_or("(untitled)").to_string();
    let text = message.body_text(0).unwrap_or_default().to_string();

    let block = ensure_current_block(state).await?;
    let images = save_inline_images(&state.store.images_dir(), &message)?;
    let body = render::render_post_body(&text, &images);

    let post = state
        .store
        .add_post(block.id, user.id, &subject, &body)
        .await?;
    tracing::info!(
        post = post.id,
        block = block.id,
        user = %user.name,
        "added a post"
    );
    Ok(())
}

/// Pull the raw RFC 822 message out of the multipart `email` field.
async fn extract_raw_email(mut multipart: Multipart) -> Result<Vec<u8>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .context("reading multipart field")?
    {
        if field.name() == Some("email") {
            return Ok(field.bytes().await.context("reading email field")?.to_vec());
        }
    }
    anyhow::bail!("no email field found in body")
}

/// The block the incoming post belongs to, opening a catch-up block when
/// the latest one has aged out.
async fn ensure_current_block(state: &AppState) -> Result<Block> {
    let now = Utc::now();
    match state.store.latest_block().await {
        Some(latest) if !state.schedule.needs_new_block(latest.created_at, now) => Ok(latest),
        Some(latest) => {
            let at = state.schedule.next_block_time(latest.created_at, now);
            state.store.create_block(&placeholder_title(at), at).await
        }
        None => state.store.create_block(&placeholder_title(now), now).await,
    }
}

fn placeholder_title(at: DateTime<Utc>) -> String {
    format!("Block of {}", at.format("%Y-%m-%d"))
}

/// Save inline image attachments under the images directory as
/// `{cid}-{name}` and return the references for body rewriting.
fn save_inline_images(dir: &Path, message: &Message<'_>) -> Result<Vec<ImageRef>> {
    let mut refs = Vec::new();
    for part in message.attachments() {
        let is_image = part
            .content_type()
            .map(|ct| ct.ctype().eq_ignore_ascii_case("image"))
            .unwrap_or(false);
        if !is_image {
            continue;
        }
        let Some(cid) = part.content_id() else {
            // Only embedded (referenced) images are carried into the body.
            continue;
        };
        let name = part.attachment_name().unwrap_or("attachment");

        let file = format!("{}-{}", sanitize(cid), sanitize(name));
        fs::create_dir_all(dir)?;
        fs::write(dir.join(&file), part.contents())
            .with_context(|| format!("saving inline image {file}"))?;

        refs.push(ImageRef {
            name: name.to_string(),
            path: format!("images/{file}"),
        });
    }
    Ok(refs)
}

/// Keep stored image names flat and shell-safe.
fn sanitize(part: &str) -> String {
    part.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
