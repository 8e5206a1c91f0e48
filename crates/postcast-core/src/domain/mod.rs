//! Domain entities - the core scheduling objects.

mod notification;
mod post;
mod selection;
pub mod timestamp;

pub use notification::{Notification, Severity};
pub use post::{CONTENT_SOFT_LIMIT, ImageData, NewPost, Platform, Post, PostId, UnknownPlatform};
pub use selection::Selection;
