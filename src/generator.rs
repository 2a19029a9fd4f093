//! Random connected graphs and making their degrees even.

use rand::{seq::SliceRandom, Rng};
use thiserror::Error;

use crate::{graph::Graph, Vertex};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerationError {
    #[error("cannot generate a graph without vertices")]
    NoVertices,
    #[error("no graph with only even degrees after {attempts} attempts")]
    AttemptsExhausted { attempts: usize },
}

/// Random connected simple graph on n vertices.
///
/// A random spanning tree is built first, connecting each vertex of a random permutation to a
/// random earlier one. Then n / 2 random pairs are tried as extra edges; pairs that are loops or
/// already present are dropped, not retried.
pub fn generate_connected_graph(n: usize, rng: &mut impl Rng) -> Graph {
    let mut g = Graph::new(n);
    let mut order: Vec<Vertex> = (0..n).collect();
    order.shuffle(rng);
    for i in 1..n {
        let parent = order[rng.gen_range(0..i)];
        g.add_edge(order[i], parent);
    }
    let tree_edges = g.edge_count();
    for _ in 0..n / 2 {
        let (u, v) = (rng.gen_range(0..n), rng.gen_range(0..n));
        g.add_edge(u, v);
    }
    log::trace!(
        "Generated graph with {n} vertices, {tree_edges} tree edges and {} extra edges",
        g.edge_count() - tree_edges
    );
    g
}

/// Pairs up odd vertices in index order and connects each pair. Returns how many edges were
/// added. A pair that is already connected is left alone, so both its vertices stay odd.
pub fn make_eulerian(g: &mut Graph) -> usize {
    let odd = g.odd_vertices();
    let added = odd
        .chunks_exact(2)
        .filter(|pair| g.add_edge(pair[0], pair[1]))
        .count();
    log::trace!("{} odd vertices, {added} pairing edges added", odd.len());
    added
}

/// A connected graph where every vertex has even degree.
#[derive(Debug)]
pub struct EulerianGraph {
    pub graph: Graph,
    /// Number of graphs generated, including the successful one.
    pub attempts: usize,
}

/// Generates graphs from scratch and makes them Eulerian until one has no odd vertex left.
/// With `max_attempts` of None this may loop forever.
pub fn generate_eulerian_graph(
    n: usize,
    rng: &mut impl Rng,
    max_attempts: Option<usize>,
) -> Result<EulerianGraph, GenerationError> {
    if n == 0 {
        return Err(GenerationError::NoVertices);
    }
    let mut attempts = 0;
    loop {
        if max_attempts.is_some_and(|max| attempts >= max) {
            return Err(GenerationError::AttemptsExhausted { attempts });
        }
        attempts += 1;
        let mut graph = generate_connected_graph(n, rng);
        make_eulerian(&mut graph);
        if !graph.has_odd_degree_vertices() {
            log::debug!(
                "Eulerian graph with {} edges after {attempts} attempts",
                graph.edge_count()
            );
            return Ok(EulerianGraph { graph, attempts });
        }
        log::trace!("Attempt {attempts} left odd vertices, regenerating");
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn tiny_graphs() {
        let mut rng = StdRng::seed_from_u64(1);
        let g = generate_connected_graph(1, &mut rng);
        assert_eq!(g.edge_count(), 0);
        let g = generate_connected_graph(2, &mut rng);
        assert_eq!(g.edge_count(), 1);
        assert!(g.has_edge(0, 1));
    }

    #[test]
    fn pairing_fixes_a_path() {
        let mut g = Graph::from_edges(4, [(0, 1), (1, 2), (2, 3)]);
        assert_eq!(make_eulerian(&mut g), 1);
        assert!(g.has_edge(0, 3));
        assert!(!g.has_odd_degree_vertices());
    }

    #[test]
    fn pairing_skips_existing_edge() {
        // 0 and 1 are odd and already adjacent.
        let mut g = Graph::from_edges(4, [(0, 1), (1, 2), (2, 3), (3, 1)]);
        assert_eq!(g.odd_vertices(), vec![0, 1]);
        assert_eq!(make_eulerian(&mut g), 0);
        assert_eq!(g.odd_vertices(), vec![0, 1]);
    }

    #[test]
    fn zero_vertices() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            generate_eulerian_graph(0, &mut rng, None).unwrap_err(),
            GenerationError::NoVertices
        );
    }

    #[test]
    fn bounded_attempts() {
        let mut rng = StdRng::seed_from_u64(1);
        // Two vertices always form a single edge, which can never be made even.
        assert_eq!(
            generate_eulerian_graph(2, &mut rng, Some(5)).unwrap_err(),
            GenerationError::AttemptsExhausted { attempts: 5 }
        );
    }
}
