mod draft;
mod post;
mod timestamp;

pub use draft::PostDraft;
pub use post::{Field, Post};
pub use timestamp::{format_timestamp, parse_timestamp};
