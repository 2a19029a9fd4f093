use std::{
    collections::HashSet,
    fmt::{Debug, Formatter},
    sync::atomic::{AtomicU64, Ordering},
};

use debug_tree::TreeBuilder;

use crate::{union_find::UnionFind, Vertex};

/// Undirected edge, always stored as `(min, max)`.
pub type Edge = (Vertex, Vertex);

/// Normalizes `{u, v}` to `(min, max)`.
pub fn edge(u: Vertex, v: Vertex) -> Edge {
    if u < v {
        (u, v)
    } else {
        (v, u)
    }
}

/// Simple undirected graph on vertices `0..n`.
///
/// Adjacency order is insertion order, which decides ties when walking the graph.
/// The union-find is only updated by [`Graph::add_edge`], so it reflects connectivity of every
/// edge ever added, not of the current graph. Use [`Graph::connectivity`] for the live one.
#[derive(Clone)]
pub struct Graph {
    adj: Vec<Vec<Vertex>>,
    edges: HashSet<Edge>,
    edge_count: usize,
    uf: UnionFind,
    /// Replaced on every mutation. Unique across all graphs, shared only by unmodified clones.
    version: u64,
}

/// An edge removed with [`Graph::take_edge`], remembering where it was in each adjacency list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemovedEdge {
    u: Vertex,
    v: Vertex,
    pos_u: usize,
    pos_v: usize,
}

impl RemovedEdge {
    pub fn endpoints(&self) -> (Vertex, Vertex) {
        (self.u, self.v)
    }
}

impl Graph {
    /// Empty graph on n vertices.
    pub fn new(n: usize) -> Self {
        Self {
            adj: vec![Vec::new(); n],
            edges: HashSet::new(),
            edge_count: 0,
            uf: UnionFind::new(n),
            version: next_version(),
        }
    }

    /// Graph on n vertices with the given edges. Rejected edges are skipped.
    pub fn from_edges(n: usize, edges: impl IntoIterator<Item = Edge>) -> Self {
        let mut g = Self::new(n);
        for (u, v) in edges {
            g.add_edge(u, v);
        }
        g
    }

    pub fn num_vertices(&self) -> usize {
        self.adj.len()
    }

    /// Number of edges currently in the graph.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn degree(&self, u: Vertex) -> usize {
        self.adj[u].len()
    }

    /// Neighbours of u in insertion order.
    pub fn neighbors(&self, u: Vertex) -> &[Vertex] {
        &self.adj[u]
    }

    pub fn has_edge(&self, u: Vertex, v: Vertex) -> bool {
        self.edges.contains(&edge(u, v))
    }

    /// Every edge once, as `(u, v)` with `u < v`, in adjacency order.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.adj
            .iter()
            .enumerate()
            .flat_map(|(u, adj)| adj.iter().filter(move |&&v| u < v).map(move |&v| (u, v)))
    }

    /// Connectivity of every edge added so far, including removed ones.
    pub fn union_find(&mut self) -> &mut UnionFind {
        &mut self.uf
    }

    /// Add an edge between u and v. Returns whether it was added, which fails for self loops
    /// and edges already present.
    pub fn add_edge(&mut self, u: Vertex, v: Vertex) -> bool {
        if u == v || !self.edges.insert(edge(u, v)) {
            return false;
        }
        self.adj[u].push(v);
        self.adj[v].push(u);
        self.uf.union(u, v);
        self.edge_count += 1;
        self.version = next_version();
        true
    }

    /// Remove the edge between u and v. Returns whether it was present.
    pub fn remove_edge(&mut self, u: Vertex, v: Vertex) -> bool {
        self.take_edge(u, v).is_some()
    }

    /// Removes the edge between u and v, returning what is needed to put it back exactly where
    /// it was with [`Graph::restore_edge`].
    pub fn take_edge(&mut self, u: Vertex, v: Vertex) -> Option<RemovedEdge> {
        if !self.edges.remove(&edge(u, v)) {
            return None;
        }
        let pos_u = position_or_panic(&self.adj[u], v);
        let pos_v = position_or_panic(&self.adj[v], u);
        self.adj[u].remove(pos_u);
        self.adj[v].remove(pos_v);
        self.edge_count -= 1;
        self.version = next_version();
        Some(RemovedEdge { u, v, pos_u, pos_v })
    }

    /// Undoes a [`Graph::take_edge`]. Must be called before any other change to the two
    /// adjacency lists involved.
    pub fn restore_edge(&mut self, removed: RemovedEdge) {
        let RemovedEdge { u, v, pos_u, pos_v } = removed;
        let inserted = self.edges.insert(edge(u, v));
        assert!(inserted, "edge {u}-{v} restored while present");
        self.adj[u].insert(pos_u, v);
        self.adj[v].insert(pos_v, u);
        self.edge_count += 1;
        self.version = next_version();
    }

    /// Vertices of odd degree, by index.
    pub fn odd_vertices(&self) -> Vec<Vertex> {
        (0..self.adj.len())
            .filter(|&u| self.adj[u].len() % 2 == 1)
            .collect()
    }

    pub fn has_odd_degree_vertices(&self) -> bool {
        self.adj.iter().any(|adj| adj.len() % 2 == 1)
    }

    /// Fresh union-find of the graph as it is now.
    pub fn connectivity(&self) -> UnionFind {
        let mut uf = UnionFind::new(self.adj.len());
        for (u, v) in self.edges() {
            uf.union(u, v);
        }
        uf
    }

    /// Whether all vertices with at least one edge are in the same component. Isolated vertices
    /// are ignored.
    pub fn is_connected(&self) -> bool {
        let mut uf = self.connectivity();
        let mut with_edges = (0..self.adj.len()).filter(|&u| !self.adj[u].is_empty());
        match with_edges.next() {
            None => true,
            Some(first) => with_edges.all(|u| uf.same_set(first, u)),
        }
    }
}

static VERSIONS: AtomicU64 = AtomicU64::new(0);

fn next_version() -> u64 {
    VERSIONS.fetch_add(1, Ordering::Relaxed)
}

fn position_or_panic(adj: &[Vertex], v: Vertex) -> usize {
    adj.iter()
        .position(|&w| w == v)
        .unwrap_or_else(|| panic!("edge set and adjacency of {v} disagree"))
}

impl Debug for Graph {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let builder = TreeBuilder::new();
        {
            let _b = builder.add_branch(&format!(
                "Graph V={} E={}",
                self.num_vertices(),
                self.edge_count
            ));
            for (u, adj) in self.adj.iter().enumerate() {
                if !adj.is_empty() {
                    builder.add_leaf(&format!("{u}: {adj:?}"));
                }
            }
        }
        write!(f, "{}", builder.string())
    }
}
