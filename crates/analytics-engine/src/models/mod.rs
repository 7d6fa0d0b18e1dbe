//! Request and response models.

mod application;
mod cluster;
mod instance;
mod pagination;

pub use application::*;
pub use cluster::*;
pub use instance::*;
pub use pagination::{PageLink, Paginated};
