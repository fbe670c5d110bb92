//! Digest renderers.

pub mod markdown;

pub use markdown::{format_posted, render_markdown};
