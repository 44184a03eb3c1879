//! Like-toggle domain: per-(article, user) like relations plus the
//! denormalized `likes` counter stored on the article row.
//!
//! The relation set in the `likes` table is authoritative; the counter is
//! recomputed from it and persisted in the same transaction as every
//! relation mutation, so no committed state ever shows a counter that
//! disagrees with the relations it was derived from.

pub mod counter;
pub mod error;
pub mod store;
pub mod toggle;

pub use error::{LikeError, LikeResult};
pub use toggle::LikeService;
