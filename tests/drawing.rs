//! End to end scenarios for the visibility representation builder.

use horvert::{Graph, Planarity};

fn complete_graph(n: usize) -> Graph {
    let mut g = Graph::new(n);
    for u in 0..n {
        for v in u + 1..n {
            g.add_edge(u, v).unwrap();
        }
    }
    g
}

fn draw(mut g: Graph) -> Graph {
    g.attach_drawing().unwrap();
    assert_eq!(g.embed().unwrap(), Planarity::Planar);
    g.check_drawing_integrity().unwrap();
    g
}

fn rows(g: &Graph) -> Vec<usize> {
    let mut rows: Vec<_> = (0..g.vertex_count())
        .map(|v| g.vertex_drawing(v).unwrap().pos)
        .collect();
    rows.sort_unstable();
    rows
}

fn columns(g: &Graph) -> Vec<usize> {
    let mut cols: Vec<_> = g
        .edge_ids()
        .map(|e| g.edge_drawing(e).unwrap().pos)
        .collect();
    cols.sort_unstable();
    cols
}

#[test]
fn path_on_three_vertices() {
    let mut g = Graph::new(3);
    let e01 = g.add_edge(0, 1).unwrap();
    let e12 = g.add_edge(1, 2).unwrap();
    let g = draw(g);

    assert_eq!(rows(&g), vec![0, 1, 2]);
    assert_eq!(columns(&g), vec![0, 1]);
    for (e, u, v) in [(e01, 0, 1), (e12, 1, 2)] {
        let ec = g.edge_drawing(e).unwrap();
        // Adjacent path vertices sit on adjacent rows.
        assert_eq!(ec.end - ec.start, 1);
        for w in [u, v] {
            let vc = g.vertex_drawing(w).unwrap();
            assert!(vc.pos == ec.start || vc.pos == ec.end);
            assert!((vc.start..=vc.end).contains(&ec.pos));
        }
    }
}

#[test]
fn triangle() {
    let g = draw(complete_graph(3));
    assert_eq!(rows(&g), vec![0, 1, 2]);
    assert_eq!(columns(&g), vec![0, 1, 2]);

    // Every edge's column lies in both endpoints' spans, and the edge that
    // spans all three rows stays clear of the middle vertex.
    for e in g.edge_ids() {
        let ec = g.edge_drawing(e).unwrap();
        let u = g.neighbors_of_edge(e);
        for w in u {
            let vc = g.vertex_drawing(w).unwrap();
            assert!((vc.start..=vc.end).contains(&ec.pos));
        }
    }
}

#[test]
fn complete_graph_on_four_vertices() {
    let g = draw(complete_graph(4));
    assert_eq!(rows(&g), vec![0, 1, 2, 3]);
    assert_eq!(columns(&g), (0..6).collect::<Vec<_>>());
}

#[test]
fn k5_is_rejected_without_touching_the_drawing() {
    let mut g = complete_graph(5);
    g.attach_drawing().unwrap();
    assert_eq!(g.embed().unwrap(), Planarity::NonPlanar);
    assert!(!g.drawing_ready());
    assert!(g.vertex_drawing(0).is_err());
    assert!(g.check_drawing_integrity().is_err());
    assert!(g.render_drawing().is_err());
}

#[test]
fn k33_is_rejected() {
    let mut g = Graph::new(6);
    for u in 0..3 {
        for v in 3..6 {
            g.add_edge(u, v).unwrap();
        }
    }
    g.attach_drawing().unwrap();
    assert_eq!(g.embed().unwrap(), Planarity::NonPlanar);
    assert!(!g.drawing_ready());
}

#[test]
fn two_disjoint_triangles() {
    let mut g = Graph::new(6);
    for (u, v) in [(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3)] {
        g.add_edge(u, v).unwrap();
    }
    let g = draw(g);
    // Rows stay contiguous and unique across components.
    assert_eq!(rows(&g), (0..6).collect::<Vec<_>>());
    assert_eq!(columns(&g), (0..6).collect::<Vec<_>>());
    let rendering = g.render_drawing().unwrap();
    assert_eq!(rendering.split('\n').count(), 2 * 6 + 1);
}

#[test]
fn single_isolated_vertex() {
    let g = draw(Graph::new(1));
    let vc = g.vertex_drawing(0).unwrap();
    assert_eq!((vc.pos, vc.start, vc.end), (0, 0, 0));
    assert_eq!(g.render_drawing().unwrap(), "\n\n");
}

#[test]
fn isolated_vertex_next_to_a_component() {
    let mut g = Graph::new(4);
    for (u, v) in [(0, 1), (1, 2), (2, 0)] {
        g.add_edge(u, v).unwrap();
    }
    let g = draw(g);
    assert_eq!(rows(&g), vec![0, 1, 2, 3]);
    let vc = g.vertex_drawing(3).unwrap();
    assert_eq!((vc.start, vc.end), (0, 0));
}

#[test]
fn coordinate_block_round_trips() {
    for g in [
        draw(complete_graph(4)),
        draw({
            let mut g = Graph::new(5);
            for (u, v) in [(0, 1), (1, 2), (2, 3), (3, 4), (4, 0), (1, 3)] {
                g.add_edge(u, v).unwrap();
            }
            g
        }),
    ] {
        let mut g = g;
        let block = g.write_drawing_coords().unwrap();
        g.read_drawing_coords(&block).unwrap();
        assert_eq!(g.write_drawing_coords().unwrap(), block);
        g.check_drawing_integrity().unwrap();
    }
}

#[test]
fn drawing_refuses_edge_holes() {
    let mut g = complete_graph(4);
    g.delete_edge(2).unwrap();
    g.attach_drawing().unwrap();
    // Still planar, but the embedding is not compact, so the drawing
    // pipeline must refuse it.
    assert!(g.embed().is_err());
    assert!(!g.drawing_ready());
}

// Small extension trait to keep the scenario assertions readable.
trait EdgeEndpoints {
    fn neighbors_of_edge(&self, e: usize) -> [usize; 2];
}

impl EdgeEndpoints for Graph {
    fn neighbors_of_edge(&self, e: usize) -> [usize; 2] {
        [self.neighbor(2 * e + 1), self.neighbor(2 * e)]
    }
}
