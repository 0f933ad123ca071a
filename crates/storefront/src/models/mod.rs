//! Storefront models that live in the visitor's session.

pub mod notice;
pub mod session;

pub use notice::{Notice, NoticeVariant, Notices};
pub use session::keys as session_keys;
