mod balance;
mod level;
mod node;
mod path;
mod raw_aatree;

pub(crate) use path::Position;
pub(crate) use raw_aatree::{RawAATree, RawIter};
