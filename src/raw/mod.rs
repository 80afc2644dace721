mod arena;
mod handle;
mod node;
mod raw_rbtree;
mod validate;

pub(crate) use handle::Handle;
pub use node::Color;
pub(crate) use raw_rbtree::{FixupReport, RawRBTree};
