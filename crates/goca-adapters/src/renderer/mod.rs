//! Template renderer adapters.

mod jinja;

pub use jinja::{HELPERS, JinjaRenderer};
