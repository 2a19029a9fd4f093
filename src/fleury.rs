//! Fleury's algorithm: walk the graph removing edges, never crossing a bridge unless there is no
//! other choice.

use derivative::Derivative;
use thiserror::Error;

use crate::{
    bridges::BridgeDetector,
    graph::{edge, Edge, Graph},
    Vertex,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FleuryError {
    #[error("start vertex {start} does not exist in a graph with {vertices} vertices")]
    InvalidStart { start: Vertex, vertices: usize },
    #[error("vertex {vertex} has odd degree {degree}")]
    OddDegree { vertex: Vertex, degree: usize },
    #[error("the edges of the graph are not all in one connected component")]
    Disconnected,
    #[error("start vertex {start} has no edges")]
    IsolatedStart { start: Vertex },
    #[error("incomplete circuit: consumed {consumed} of {total} edges")]
    Incomplete {
        consumed: usize,
        total: usize,
        path: Vec<Vertex>,
    },
}

/// A walk that used every edge of the graph exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Circuit {
    pub path: Vec<Vertex>,
}

impl Circuit {
    /// Number of edges walked.
    pub fn len(&self) -> usize {
        self.path.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the walk ends where it started.
    pub fn is_closed(&self) -> bool {
        self.path.first() == self.path.last()
    }

    /// Edges in walk order.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.path.windows(2).map(|w| edge(w[0], w[1]))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Traversing { current: Vertex },
    Done,
}

/// One traversal of a graph. Edges are removed from the graph as they are walked.
#[derive(Derivative)]
#[derivative(Debug(bound = ""))]
pub struct Fleury<'g, D> {
    #[derivative(Debug = "ignore")]
    graph: &'g mut Graph,
    #[derivative(Debug = "ignore")]
    detector: D,
    state: State,
    path: Vec<Vertex>,
    /// Edges in the graph when the traversal started.
    total: usize,
}

impl<'g, D: BridgeDetector> Fleury<'g, D> {
    /// Starts a traversal at `start`. Does not check that the graph is Eulerian, see
    /// [`eulerian_circuit`] for that.
    pub fn new(graph: &'g mut Graph, start: Vertex, detector: D) -> Result<Self, FleuryError> {
        if start >= graph.num_vertices() {
            return Err(FleuryError::InvalidStart {
                start,
                vertices: graph.num_vertices(),
            });
        }
        Ok(Self {
            total: graph.edge_count(),
            graph,
            detector,
            state: State::Traversing { current: start },
            path: vec![start],
        })
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn path(&self) -> &[Vertex] {
        &self.path
    }

    /// Edges walked so far.
    pub fn consumed(&self) -> usize {
        self.path.len() - 1
    }

    /// First neighbour of u reachable through a non-bridge, or the first neighbour if all edges
    /// of u are bridges. u must have at least one edge.
    fn choose_next(&mut self, u: Vertex) -> Vertex {
        let candidates = self.graph.neighbors(u).to_vec();
        if candidates.len() > 1 {
            for &v in &candidates {
                if !self.detector.is_bridge(self.graph, u, v) {
                    return v;
                }
            }
            log::trace!("All {} edges of {u} are bridges", candidates.len());
        }
        candidates[0]
    }

    /// Walks a single edge, or finishes if the current vertex has none left.
    pub fn step(&mut self) -> State {
        let State::Traversing { current: u } = self.state else {
            return State::Done;
        };
        if self.graph.degree(u) == 0 {
            log::debug!("Traversal done after {} edges", self.consumed());
            self.state = State::Done;
            return self.state;
        }
        let v = self.choose_next(u);
        let removed = self.graph.remove_edge(u, v);
        debug_assert!(removed, "chose missing edge {u}-{v}");
        log::trace!("Walk {u} -> {v}");
        self.path.push(v);
        self.state = State::Traversing { current: v };
        self.state
    }

    /// Walks until stuck. Fails if some edge was never walked, which only happens if the graph
    /// was not connected or had odd vertices.
    pub fn traverse(mut self) -> Result<Circuit, FleuryError> {
        while self.step() != State::Done {}
        let consumed = self.consumed();
        if consumed != self.total {
            log::debug!("Stuck after {consumed} of {} edges", self.total);
            return Err(FleuryError::Incomplete {
                consumed,
                total: self.total,
                path: self.path,
            });
        }
        Ok(Circuit { path: self.path })
    }
}

/// Checks that an Eulerian circuit exists: every degree is even and all edges are connected.
pub fn check_eulerian(graph: &Graph) -> Result<(), FleuryError> {
    if let Some(&vertex) = graph.odd_vertices().first() {
        return Err(FleuryError::OddDegree {
            vertex,
            degree: graph.degree(vertex),
        });
    }
    if !graph.is_connected() {
        return Err(FleuryError::Disconnected);
    }
    Ok(())
}

/// Eulerian circuit of the graph starting and ending at `start`. All edges are removed from the
/// graph on success.
pub fn eulerian_circuit(
    graph: &mut Graph,
    start: Vertex,
    detector: impl BridgeDetector,
) -> Result<Circuit, FleuryError> {
    let fleury = Fleury::new(graph, start, detector)?;
    check_eulerian(fleury.graph)?;
    if fleury.graph.edge_count() > 0 && fleury.graph.degree(start) == 0 {
        return Err(FleuryError::IsolatedStart { start });
    }
    fleury.traverse()
}

#[cfg(test)]
mod tests {
    use crate::bridges::{NaiveBridges, TarjanBridges};

    use super::*;

    #[test]
    fn single_vertex() {
        let mut g = Graph::new(1);
        let c = eulerian_circuit(&mut g, 0, TarjanBridges::default()).unwrap();
        assert_eq!(c.path, vec![0]);
        assert!(c.is_empty());
        assert!(c.is_closed());
    }

    #[test]
    fn triangle_path_follows_adjacency_order() {
        let mut g = Graph::from_edges(3, [(0, 1), (1, 2), (2, 0)]);
        let c = eulerian_circuit(&mut g, 0, NaiveBridges).unwrap();
        assert_eq!(c.path, vec![0, 1, 2, 0]);
        assert_eq!(c.edges().collect::<Vec<_>>(), vec![(0, 1), (1, 2), (0, 2)]);
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn avoids_bridge_when_possible() {
        // Bowtie: two triangles sharing vertex 2.
        let mut g = Graph::from_edges(5, [(2, 0), (0, 1), (1, 2), (2, 3), (3, 4), (4, 2)]);
        let c = eulerian_circuit(&mut g, 0, TarjanBridges::default()).unwrap();
        assert_eq!(c.len(), 6);
        assert!(c.is_closed());
        // At 2 the edge to 1 is a bridge once 0-2 is gone, so 3 is taken first.
        assert_eq!(c.path, vec![0, 2, 3, 4, 2, 1, 0]);
    }

    #[test]
    fn step_by_step_states() {
        let mut g = Graph::from_edges(3, [(0, 1), (1, 2), (2, 0)]);
        let mut f = Fleury::new(&mut g, 1, NaiveBridges).unwrap();
        assert_eq!(f.state(), State::Traversing { current: 1 });
        assert_eq!(f.step(), State::Traversing { current: 0 });
        assert_eq!(f.step(), State::Traversing { current: 2 });
        assert_eq!(f.step(), State::Traversing { current: 1 });
        assert_eq!(f.step(), State::Done);
        assert_eq!(f.step(), State::Done);
        assert_eq!(f.path(), &[1, 0, 2, 1]);
        assert_eq!(f.consumed(), 3);
    }

    #[test]
    fn invalid_start() {
        let mut g = Graph::new(2);
        assert_eq!(
            eulerian_circuit(&mut g, 2, NaiveBridges).unwrap_err(),
            FleuryError::InvalidStart {
                start: 2,
                vertices: 2
            }
        );
    }
}
