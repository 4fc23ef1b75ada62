mod arena;
mod handle;
mod node;
mod raw_rbtree_map;
mod rebalance;

pub(crate) use handle::Handle;
pub(crate) use raw_rbtree_map::RawRBTreeMap;
