pub mod bridges;
pub mod fleury;
pub mod generator;
pub mod graph;
pub mod logging;
pub mod union_find;

pub use bridges::{BridgeDetector, BridgeStrategy, NaiveBridges, TarjanBridges};
pub use fleury::{eulerian_circuit, Circuit, Fleury, FleuryError};
pub use generator::{generate_connected_graph, generate_eulerian_graph, make_eulerian};
pub use graph::{Edge, Graph};

/// Vertices of a graph on n vertices are `0..n`.
pub type Vertex = usize;
