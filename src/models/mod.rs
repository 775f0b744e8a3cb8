//! Interacta API model types.

mod catalog;
mod comment;
mod common;
mod community;
mod group;
mod hashtag;
mod post;
mod user;
mod workflow;

pub use catalog::*;
pub use comment::*;
pub use common::{IdRef, NamedRef};
pub use community::*;
pub use group::*;
pub use hashtag::*;
pub use post::*;
pub use user::*;
pub use workflow::*;
