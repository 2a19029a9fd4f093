//! Bridge (cut edge) detection on the current state of a [`Graph`].

use std::collections::BTreeSet;

use derivative::Derivative;

use crate::{
    graph::{edge, Edge, Graph},
    Vertex,
};

/// Classifies edges of a graph as bridges, that is, edges whose removal increases the number of
/// connected components. All implementations must agree on every graph.
pub trait BridgeDetector {
    /// Whether the edge between u and v is a bridge of the graph as it is now. Edges not in the
    /// graph are not bridges. The graph may be modified during the call but is left as it was.
    fn is_bridge(&mut self, g: &mut Graph, u: Vertex, v: Vertex) -> bool;
    /// All bridges of the graph as it is now.
    fn bridges(&mut self, g: &mut Graph) -> BTreeSet<Edge> {
        let edges: Vec<Edge> = g.edges().collect();
        edges
            .into_iter()
            .filter(|&(u, v)| self.is_bridge(g, u, v))
            .collect()
    }
}

/// Checks each edge by removing it and recomputing connectivity from scratch. O(V + E) per query.
#[derive(Debug, Default, Clone)]
pub struct NaiveBridges;

impl BridgeDetector for NaiveBridges {
    fn is_bridge(&mut self, g: &mut Graph, u: Vertex, v: Vertex) -> bool {
        let Some(removed) = g.take_edge(u, v) else {
            return false;
        };
        let g = scopeguard::guard(g, move |g| g.restore_edge(removed));
        let mut uf = g.connectivity();
        !uf.same_set(u, v)
    }
}

/// Finds all bridges with a single DFS computing low-links, then answers queries from that set
/// until the graph changes.
#[derive(Derivative, Clone)]
#[derivative(Debug, Default)]
pub struct TarjanBridges {
    /// Graph version `bridges` was computed for.
    version: Option<u64>,
    bridges: BTreeSet<Edge>,
    #[derivative(Debug = "ignore")]
    disc: Vec<usize>,
    #[derivative(Debug = "ignore")]
    low: Vec<usize>,
}

struct Frame {
    u: Vertex,
    parent: Option<Vertex>,
    /// Index of the next neighbour of u to look at.
    next: usize,
}

const UNSEEN: usize = usize::MAX;

impl TarjanBridges {
    /// Versions are unique across graphs, so a detector can be shared between graphs.
    fn refresh(&mut self, g: &Graph) {
        if self.version == Some(g.version()) {
            return;
        }
        self.compute(g);
        self.version = Some(g.version());
    }

    fn compute(&mut self, g: &Graph) {
        let n = g.num_vertices();
        self.bridges.clear();
        self.disc.clear();
        self.disc.resize(n, UNSEEN);
        self.low.clear();
        self.low.resize(n, UNSEEN);
        let mut time = 0;
        let mut stack = Vec::new();
        for root in 0..n {
            if self.disc[root] != UNSEEN || g.degree(root) == 0 {
                continue;
            }
            self.disc[root] = time;
            self.low[root] = time;
            time += 1;
            stack.push(Frame {
                u: root,
                parent: None,
                next: 0,
            });
            while let Some(frame) = stack.last_mut() {
                let (u, parent) = (frame.u, frame.parent);
                if let Some(&v) = g.neighbors(u).get(frame.next) {
                    frame.next += 1;
                    if self.disc[v] == UNSEEN {
                        self.disc[v] = time;
                        self.low[v] = time;
                        time += 1;
                        stack.push(Frame {
                            u: v,
                            parent: Some(u),
                            next: 0,
                        });
                    } else if parent != Some(v) {
                        self.low[u] = self.low[u].min(self.disc[v]);
                    }
                } else {
                    stack.pop();
                    if let Some(p) = parent {
                        self.low[p] = self.low[p].min(self.low[u]);
                        if self.low[u] > self.disc[p] {
                            self.bridges.insert(edge(p, u));
                        }
                    }
                }
            }
        }
        log::trace!("{} bridges among {} edges", self.bridges.len(), g.edge_count());
    }
}

impl BridgeDetector for TarjanBridges {
    fn is_bridge(&mut self, g: &mut Graph, u: Vertex, v: Vertex) -> bool {
        self.refresh(g);
        self.bridges.contains(&edge(u, v))
    }

    fn bridges(&mut self, g: &mut Graph) -> BTreeSet<Edge> {
        self.refresh(g);
        self.bridges.clone()
    }
}

/// Which bridge detection algorithm to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BridgeStrategy {
    /// Remove the edge and check connectivity, per query.
    Naive,
    /// Tarjan's low-link DFS, once per graph change.
    #[default]
    Tarjan,
}

impl BridgeStrategy {
    pub fn detector(self) -> AnyBridges {
        match self {
            Self::Naive => AnyBridges::Naive(NaiveBridges),
            Self::Tarjan => AnyBridges::Tarjan(TarjanBridges::default()),
        }
    }
}

/// A detector chosen at runtime.
#[derive(Debug, Clone)]
pub enum AnyBridges {
    Naive(NaiveBridges),
    Tarjan(TarjanBridges),
}

impl BridgeDetector for AnyBridges {
    fn is_bridge(&mut self, g: &mut Graph, u: Vertex, v: Vertex) -> bool {
        match self {
            Self::Naive(d) => d.is_bridge(g, u, v),
            Self::Tarjan(d) => d.is_bridge(g, u, v),
        }
    }

    fn bridges(&mut self, g: &mut Graph) -> BTreeSet<Edge> {
        match self {
            Self::Naive(d) => d.bridges(g),
            Self::Tarjan(d) => d.bridges(g),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn naive_check_leaves_graph_untouched() {
        let mut g = Graph::from_edges(4, [(0, 1), (1, 2), (2, 0), (2, 3)]);
        let before = format!("{g:?}");
        assert!(!NaiveBridges.is_bridge(&mut g, 0, 2));
        assert!(NaiveBridges.is_bridge(&mut g, 3, 2));
        assert_eq!(format!("{g:?}"), before);
        assert_eq!(g.edge_count(), 4);
    }

    #[test]
    fn missing_edge_is_not_a_bridge() {
        let mut g = Graph::from_edges(3, [(0, 1)]);
        assert!(!NaiveBridges.is_bridge(&mut g, 1, 2));
        assert!(!TarjanBridges::default().is_bridge(&mut g, 1, 2));
    }

    #[test]
    fn tarjan_cache_follows_changes() {
        let mut g = Graph::from_edges(3, [(0, 1), (1, 2), (2, 0)]);
        let mut t = TarjanBridges::default();
        assert!(!t.is_bridge(&mut g, 0, 1));
        g.remove_edge(2, 0);
        assert!(t.is_bridge(&mut g, 0, 1));
        assert_eq!(t.bridges(&mut g), BTreeSet::from([(0, 1), (1, 2)]));
    }

    #[test]
    fn strategy_selects_detector() {
        assert!(matches!(
            BridgeStrategy::Naive.detector(),
            AnyBridges::Naive(_)
        ));
        assert!(matches!(
            BridgeStrategy::default().detector(),
            AnyBridges::Tarjan(_)
        ));
    }
}
