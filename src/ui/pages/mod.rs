//! Page components, rendered server-side.

pub mod home;
pub mod password;
pub mod post;
pub mod static_pages;

pub use home::HomePage;
pub use password::PasswordPage;
pub use post::PostPage;
pub use static_pages::{HowPage, WhatPage};
