//! Value objects - immutable types that represent domain concepts

mod id;
mod page;
mod role;
mod sort;

pub use id::{Id, IdParseError};
pub use page::{Page, PageRequest};
pub use role::{Role, RoleParseError};
pub use sort::PostSort;
