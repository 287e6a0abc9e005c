//! Document rendering for TopicPress.
//!
//! Everything here is a pure function of its inputs (the render date is a
//! parameter), so pages can be tested without network or filesystem access.

pub mod boilerplate;
mod frontmatter;
mod page;

pub use frontmatter::{FrontMatter, long_date};
pub use page::render_topic;
