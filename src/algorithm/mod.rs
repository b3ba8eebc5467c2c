pub mod bmssp;
pub mod dijkstra;
pub mod params;
pub mod pivot;
pub mod sssp;
pub mod traits;

pub use bmssp::Bmssp;
pub use params::BmsspParams;
pub use traits::{ShortestPathAlgorithm, ShortestPathResult};
