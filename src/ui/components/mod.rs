//! Shared UI components.

pub mod darkmode;
pub mod layout;
pub mod nav;
pub mod post_card;

pub use darkmode::DarkModeToggle;
pub use layout::Layout;
pub use nav::Nav;
pub use post_card::PostCard;
