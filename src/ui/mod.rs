//! Web UI handlers - server-rendered pages for the wall.
//!
//! Pages are Dioxus components rendered to HTML on the server (Pico CSS,
//! classless base). The only client-side behavior is the dark mode toggle,
//! which ships as a small wasm module bound in the layout footer.

pub mod assets;
pub mod components;
pub mod pages;

use crate::api::{AppError, AppState};
use crate::auth::{self, AUTH_COOKIE};
use axum::{
    extract::{Query, State},
    http::{header, HeaderMap},
    response::{AppendHeaders, Html, IntoResponse, Redirect, Response},
    Form,
};
use dioxus::prelude::*;
use serde::Deserialize;

use pages::{HomePage, HowPage, PasswordPage, PostPage, WhatPage};

/// Wrap rendered page markup in the document shell.
fn html_page(body: String) -> Response {
    Html(format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n{body}</html>"
    ))
    .into_response()
}

/// GET / - released blocks, newest first
pub async fn home_page(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let ctx = match auth::require_page_auth(&state, &headers).await {
        Ok(ctx) => ctx,
        Err(redirect) => return redirect.into_response(),
    };
    let blocks = state.store.released_blocks(ctx.release_horizon).await;
    let html = dioxus::ssr::render_element(rsx! {
        HomePage { blocks, queued_posts: ctx.queued_posts }
    });
    html_page(html)
}

/// Query params for the post page
#[derive(Deserialize)]
pub struct PostQuery {
    pub id: Option<String>,
}

/// GET /post?id=N - a single post
pub async fn post_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<PostQuery>,
) -> Result<Response, AppError> {
    if let Err(redirect) = auth::require_page_auth(&state, &headers).await {
        return Ok(redirect.into_response());
    }
    let id: i64 = query
        .id
        .as_deref()
        .unwrap_or("")
        .parse()
        .map_err(|_| AppError::InvalidId)?;
    let post = state
        .store
        .post_view(id)
        .await
        .ok_or(AppError::PostNotFound)?;
    let html = dioxus::ssr::render_element(rsx! { PostPage { post } });
    Ok(html_page(html))
}

/// GET /what
pub async fn what_page(State(state): State<AppState>, headers: HeaderMap) -> Response {
    match auth::require_page_auth(&state, &headers).await {
        Ok(_) => html_page(dioxus::ssr::render_element(rsx! { WhatPage {} })),
        Err(redirect) => redirect.into_response(),
    }
}

/// GET /how
pub async fn how_page(State(state): State<AppState>, headers: HeaderMap) -> Response {
    match auth::require_page_auth(&state, &headers).await {
        Ok(_) => html_page(dioxus::ssr::render_element(rsx! { HowPage {} })),
        Err(redirect) => redirect.into_response(),
    }
}

/// Query params for the login page
#[derive(Deserialize)]
pub struct PasswordQuery {
    pub error: Option<String>,
}

/// GET /password - login form
pub async fn password_page(Query(query): Query<PasswordQuery>) -> Response {
    let did_error = query.error.as_deref() == Some("true");
    html_page(dioxus::ssr::render_element(rsx! {
        PasswordPage { did_error }
    }))
}

/// Login form body
#[derive(Deserialize)]
pub struct PasswordForm {
    pub password: String,
}

/// POST /password - trade the shared password for a token cookie
pub async fn password_submit(
    State(state): State<AppState>,
    Form(form): Form<PasswordForm>,
) -> Result<Response, AppError> {
    // An empty configured password means login is disabled.
    if state.config.password.is_empty() || form.password != state.config.password {
        return Ok(Redirect::to("/password?error=true").into_response());
    }

    let token = auth::generate_token();
    state.store.insert_token(&token).await?;

    let cookie = format!("{AUTH_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax");
    Ok((
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Redirect::to("/"),
    )
        .into_response())
}

/// GET /static/wall.css
pub async fn wall_css() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        assets::WALL_CSS,
    )
}

/// GET /static/darkmode.css - the sheet the dark mode toggle attaches
pub async fn darkmode_css() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        assets::DARKMODE_CSS,
    )
}
