//! Disjoint set union with path compression and union by rank.

use crate::Vertex;

#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<Vertex>,
    rank: Vec<u32>,
}

impl UnionFind {
    /// New structure with `n` singleton sets.
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![1; n],
        }
    }

    /// Canonical representative of the set containing `u`. Every node visited on the way up is
    /// pointed directly at the root.
    pub fn find(&mut self, mut u: Vertex) -> Vertex {
        let mut root = u;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        while self.parent[u] != root {
            u = std::mem::replace(&mut self.parent[u], root);
        }
        root
    }

    /// Merges the sets containing `u` and `v`. Returns whether they were in different sets.
    pub fn union(&mut self, u: Vertex, v: Vertex) -> bool {
        let (ru, rv) = (self.find(u), self.find(v));
        if ru == rv {
            return false;
        }
        // On ties the root of v wins and grows.
        let (child, root) = if self.rank[ru] > self.rank[rv] {
            (rv, ru)
        } else {
            (ru, rv)
        };
        self.parent[child] = root;
        if self.rank[ru] == self.rank[rv] {
            self.rank[root] += 1;
        }
        true
    }

    pub fn same_set(&mut self, u: Vertex, v: Vertex) -> bool {
        self.find(u) == self.find(v)
    }

    /// Number of disjoint sets.
    pub fn count_sets(&self) -> usize {
        (0..self.parent.len())
            .filter(|&u| self.parent[u] == u)
            .count()
    }
}
