//! ASCII rendering of a finished drawing.

use crate::graph::Graph;
use crate::GraphError;

impl Graph {
    /// Renders the drawing as a character grid of `2N` rows, each `M`
    /// columns wide plus a newline. Vertex segments are drawn with `-` and
    /// labeled with the vertex number centered in the segment; a label wider
    /// than its segment degrades to one character on the vertex row and the
    /// last digit below it. Edge segments are drawn with `|`. A graph with
    /// no edges renders as bare newlines.
    pub fn render_drawing(&self) -> Result<String, GraphError> {
        let ctx = self.drawing()?;
        if !self.edge_holes.is_empty() {
            return Err(GraphError::UnsupportedInput(
                "embedding has deleted-edge holes",
            ));
        }
        let n = self.vertex_count();
        let m = self.edge_count();
        let width = m + 1;

        let mut grid = vec![b' '; width * 2 * n];
        for row in 0..2 * n {
            grid[row * width + m] = b'\n';
        }

        if m > 0 {
            for v in 0..n {
                let rec = ctx.vi[v].coords();
                let row = 2 * rec.pos * width;
                for col in rec.start..=rec.end {
                    grid[row + col] = b'-';
                }
                let label = v.to_string();
                let mid = (rec.start + rec.end) / 2;
                if rec.end - rec.start + 1 >= label.len() {
                    // Centered, shifted left as needed to stay on the segment.
                    let at = mid.min(rec.end + 1 - label.len());
                    grid[row + at..row + at + label.len()].copy_from_slice(label.as_bytes());
                } else {
                    // Not enough room: first digit (or a star) on the vertex
                    // row, last digit on the half row below.
                    grid[row + mid] = if label.len() == 2 {
                        label.as_bytes()[0]
                    } else {
                        b'*'
                    };
                    grid[(2 * rec.pos + 1) * width + mid] = *label.as_bytes().last().unwrap();
                }
            }

            for eid in self.edge_ids() {
                let rec = ctx.e[2 * eid];
                for row in rec.start..rec.end {
                    if row > rec.start {
                        grid[2 * row * width + rec.pos] = b'|';
                    }
                    grid[(2 * row + 1) * width + rec.pos] = b'|';
                }
            }
        }

        // The grid is pure ASCII by construction.
        Ok(String::from_utf8(grid).expect("ascii grid"))
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::{Graph, Planarity};

    #[test]
    fn renders_a_path() {
        let mut g = Graph::new(3);
        g.add_edge(0, 1).unwrap();
        g.add_edge(1, 2).unwrap();
        g.attach_drawing().unwrap();
        assert_eq!(g.embed().unwrap(), Planarity::Planar);
        let out = g.render_drawing().unwrap();
        // 2N rows, each M columns plus a newline.
        assert_eq!(out.len(), (2 + 1) * 2 * 3);
        assert_eq!(out.split('\n').count(), 2 * 3 + 1);
        // Each vertex label appears exactly once.
        for v in 0..3 {
            let label = v.to_string();
            assert_eq!(out.matches(&label).count(), 1, "label {v} in\n{out}");
        }
        // Two edges means two vertical strokes somewhere.
        assert!(out.contains('|'));
    }

    #[test]
    fn renders_isolated_vertex_as_newlines() {
        let mut g = Graph::new(1);
        g.attach_drawing().unwrap();
        assert_eq!(g.embed().unwrap(), Planarity::Planar);
        assert_eq!(g.render_drawing().unwrap(), "\n\n");
    }
}
