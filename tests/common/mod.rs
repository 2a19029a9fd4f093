use std::{
    collections::BTreeSet,
    sync::{LazyLock, Mutex},
};

use flexi_logger::LoggerHandle;
use fleury::{Edge, Graph, Vertex};
use scopeguard::{OnUnwind, ScopeGuard};

#[allow(dead_code)]
pub static LOGGER: LazyLock<Mutex<LoggerHandle>> = LazyLock::new(|| {
    Mutex::new(
        fleury::logging::logger("info")
            .unwrap()
            .write_mode(flexi_logger::WriteMode::SupportCapture)
            .log_to_stdout()
            .start()
            .unwrap(),
    )
});

#[allow(dead_code)]
pub fn init_logger() {
    let _ = &*LOGGER;
}

/// Logs the graph if the test panics while holding it.
#[allow(dead_code)]
pub fn guard(g: Graph) -> ScopeGuard<Graph, impl FnOnce(Graph), OnUnwind> {
    scopeguard::guard_on_unwind(g, |g| log::error!("Crash with {g:?}"))
}

#[allow(dead_code)]
pub fn path_graph() -> Graph {
    Graph::from_edges(4, [(0, 1), (1, 2), (2, 3)])
}

#[allow(dead_code)]
pub fn triangle() -> Graph {
    Graph::from_edges(3, [(0, 1), (1, 2), (2, 0)])
}

#[allow(dead_code)]
pub fn two_triangles() -> Graph {
    Graph::from_edges(
        6,
        [(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3), (2, 3)],
    )
}

#[allow(dead_code)]
pub fn square() -> Graph {
    Graph::from_edges(4, [(0, 1), (1, 2), (2, 3), (3, 0)])
}

/// Whether u reaches v without using the edge `skip`, by plain DFS over the adjacency lists.
fn reaches_without(g: &Graph, u: Vertex, v: Vertex, skip: Edge) -> bool {
    let mut seen = BTreeSet::new();
    let mut stack = vec![u];
    while let Some(a) = stack.pop() {
        if a == v {
            return true;
        }
        if seen.insert(a) {
            stack.extend(
                g.neighbors(a)
                    .iter()
                    .copied()
                    .filter(|&b| (a.min(b), a.max(b)) != skip),
            );
        }
    }
    false
}

/// Bridges computed the dumb way.
#[allow(dead_code)]
pub fn dumb_bridges(g: &Graph) -> BTreeSet<Edge> {
    g.edges()
        .filter(|&(u, v)| !reaches_without(g, u, v, (u, v)))
        .collect()
}

/// Asserts the path walks every edge of `edges` exactly once.
#[allow(dead_code)]
pub fn assert_uses_each_edge_once(path: &[Vertex], edges: &[Edge]) {
    assert_eq!(path.len(), edges.len() + 1, "path {path:?}");
    let mut walked: Vec<Edge> = path
        .windows(2)
        .map(|w| (w[0].min(w[1]), w[0].max(w[1])))
        .collect();
    walked.sort();
    let mut expected = edges.to_vec();
    expected.sort();
    assert_eq!(walked, expected);
}
