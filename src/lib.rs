//! The Wall - an email-powered group journal.
//!
//! Members post by sending email to the wall's inbound address; posts are
//! collected into blocks that are released on a schedule. The site sits
//! behind a shared password and is served as server-rendered pages with a
//! small WebAssembly client for the dark mode toggle.
//!
//! This library provides:
//! - Dark mode stylesheet toggle (wasm client)
//! - Inbound mail webhook (SendGrid Inbound Parse format)
//! - Markdown post rendering with post cross-links and inline images
//! - Block release schedule
//! - JSON-file persistence for users, blocks, posts and auth tokens
//! - Server-rendered web UI (Pico CSS)

pub mod client;
pub mod render;
pub mod schedule;

#[cfg(feature = "server")]
pub mod api;
#[cfg(feature = "server")]
pub mod auth;
#[cfg(feature = "server")]
pub mod config;
#[cfg(feature = "server")]
pub mod mail;
#[cfg(feature = "server")]
pub mod store;
#[cfg(feature = "server")]
pub mod ui;
