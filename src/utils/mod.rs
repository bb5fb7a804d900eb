//! Small shared helpers.

mod plural;
mod route;

pub use plural::{plural_count, plural_s};
pub use route::decode_route;
