//! Fuzzer-style generators of random graphs used to test embedding and
//! drawing over many shapes of input.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::graph::{Graph, Planarity};

/// A random simple graph on `n` vertices from `attempts` uniform endpoint
/// picks. Self loops and duplicates are simply skipped, so the edge count
/// varies. No planarity guarantee.
pub fn random_graph(rng: &mut SmallRng, n: usize, attempts: usize) -> Graph {
    let mut g = Graph::new(n);
    if n < 2 {
        return g;
    }
    for _ in 0..attempts {
        let u = rng.gen_range(0..n);
        let v = rng.gen_range(0..n);
        if u != v {
            let _ = g.add_edge(u, v);
        }
    }
    g
}

/// A random planar graph on `n` vertices: candidate edges are admitted only
/// when the graph stays planar, checked by embedding a scratch clone.
pub fn random_planar_graph(rng: &mut SmallRng, n: usize) -> Graph {
    let mut g = Graph::new(n);
    if n < 2 {
        return g;
    }
    for _ in 0..4 * n {
        let u = rng.gen_range(0..n);
        let v = rng.gen_range(0..n);
        if u == v {
            continue;
        }
        let mut probe = g.clone();
        if probe.add_edge(u, v).is_err() {
            continue;
        }
        if probe.embed().unwrap() == Planarity::Planar {
            g.add_edge(u, v).unwrap();
        }
    }
    g
}

/// Drives `f` over a stream of random planar graphs with 1 to `max_n`
/// vertices, seeded per outer iteration so failures replay.
pub fn with_random_planar_graphs(
    seed: u64,
    iterations: (usize, usize),
    max_n: usize,
    mut f: impl FnMut((usize, usize), Graph),
) {
    for outer in 0..iterations.0 {
        let mut rng = SmallRng::seed_from_u64(seed + outer as u64);
        for inner in 0..iterations.1 {
            let n = rng.gen_range(1..=max_n);
            let g = random_planar_graph(&mut rng, n);
            f((outer, inner), g);
        }
    }
}
