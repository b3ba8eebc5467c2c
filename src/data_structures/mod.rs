pub mod block;
pub mod block_linked_list;
pub mod median;
pub mod ordered_set;
pub mod priority_queue;

pub use block::{Block, EntryArena};
pub use block_linked_list::BlockLinkedList;
pub use ordered_set::OrderedSet;
pub use priority_queue::BinaryHeapWrapper;
