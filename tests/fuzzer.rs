//! Property fuzzing over random graphs.
//!
//! Every random planar graph must embed, pass the structural embedding
//! check, and produce a drawing that satisfies all coordinate invariants.
//! Unfiltered random graphs must either be rejected as non-planar or
//! produce a valid drawing; nothing in between.
//!
//! Run the long variant with:
//! cargo test fuzz_drawing_forever -- --nocapture --ignored

use horvert::random_graphs::{random_graph, with_random_planar_graphs};
use horvert::{Graph, Planarity};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

fn check_drawn(g: &Graph) {
    g.dbg_check_embedding();
    g.check_drawing_integrity().unwrap();

    let n = g.vertex_count();
    let mut rows: Vec<_> = (0..n).map(|v| g.vertex_drawing(v).unwrap().pos).collect();
    rows.sort_unstable();
    assert!(rows.into_iter().eq(0..n), "rows are not a permutation");

    let mut cols: Vec<_> = g.edge_ids().map(|e| g.edge_drawing(e).unwrap().pos).collect();
    cols.sort_unstable();
    assert!(
        cols.into_iter().eq(0..g.edge_count()),
        "columns are not a permutation"
    );

    for e in g.edge_ids() {
        let ec = g.edge_drawing(e).unwrap();
        let u = g.neighbor(2 * e + 1);
        let w = g.neighbor(2 * e);
        let (pu, pw) = (
            g.vertex_drawing(u).unwrap().pos,
            g.vertex_drawing(w).unwrap().pos,
        );
        assert_eq!(
            (ec.start, ec.end),
            (pu.min(pw), pu.max(pw)),
            "edge {e} does not span its endpoints"
        );
    }
}

fn fuzz_planar_once(seed: u64, iterations: (usize, usize)) {
    with_random_planar_graphs(seed, iterations, 12, |(outer, inner), mut g| {
        g.attach_drawing().unwrap();
        let verdict = g.embed().unwrap();
        assert_eq!(
            verdict,
            Planarity::Planar,
            "planar-filtered graph rejected at iteration {outer}/{inner}"
        );
        check_drawn(&g);

        // The coordinate block must round trip bit for bit.
        let block = g.write_drawing_coords().unwrap();
        g.read_drawing_coords(&block).unwrap();
        assert_eq!(g.write_drawing_coords().unwrap(), block);
    });
}

#[test]
fn fuzz_planar_drawings() {
    fuzz_planar_once(123, (4, 15));
}

#[test]
fn fuzz_mixed_graphs() {
    let mut rng = SmallRng::seed_from_u64(321);
    for _ in 0..200 {
        let n = rng.gen_range(1..=10);
        let attempts = rng.gen_range(0..=3 * n);
        let mut g = random_graph(&mut rng, n, attempts);
        g.attach_drawing().unwrap();
        match g.embed().unwrap() {
            Planarity::Planar => check_drawn(&g),
            Planarity::NonPlanar => assert!(!g.drawing_ready()),
        }
    }
}

#[test]
fn repeated_embedding_stays_valid() {
    let mut rng = SmallRng::seed_from_u64(77);
    for _ in 0..20 {
        let n = rng.gen_range(2..=9);
        let mut g = horvert::random_graphs::random_planar_graph(&mut rng, n);
        g.attach_drawing().unwrap();
        assert_eq!(g.embed().unwrap(), Planarity::Planar);
        let first = g.write_drawing_coords().unwrap();
        // Embedding an already embedded graph starts from the rotation the
        // first pass produced, which is planar too.
        assert_eq!(g.embed().unwrap(), Planarity::Planar);
        check_drawn(&g);
        let _ = first;
    }
}

#[test]
#[ignore]
fn fuzz_drawing_forever() {
    for seed in 0u64.. {
        println!("seed {seed}");
        fuzz_planar_once(seed, (1, 50));
    }
}
