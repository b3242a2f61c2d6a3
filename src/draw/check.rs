//! Integrity check over a finished drawing. This is the authoritative post
//! condition: coordinates in range, rows and columns each a permutation,
//! edges meeting exactly their endpoints and crossing nothing else.

use crate::{GraphError, NIL};

use crate::graph::Graph;

impl Graph {
    /// Verifies every invariant of the visibility representation, in
    /// `O(N * M)`. Fails if no drawing has been computed.
    pub fn check_drawing_integrity(&self) -> Result<(), GraphError> {
        let ctx = self.drawing()?;
        if !self.edge_holes.is_empty() {
            return Err(GraphError::UnsupportedInput(
                "embedding has deleted-edge holes",
            ));
        }
        let n = self.vertex_count();
        let m = self.edge_count();

        let mut row_used = vec![false; n];
        for v in 0..n {
            let rec = &ctx.vi[v];
            if rec.pos >= n {
                return Err(GraphError::Integrity("vertex row out of range"));
            }
            if m > 0 && (rec.start > rec.end || rec.end >= m) {
                return Err(GraphError::Integrity("vertex column span out of range"));
            }
            if row_used[rec.pos] {
                return Err(GraphError::Integrity("two vertices share a row"));
            }
            row_used[rec.pos] = true;
        }

        let mut col_used = vec![false; m];
        for eid in self.edge_ids() {
            let a = ctx.e[2 * eid];
            let b = ctx.e[2 * eid + 1];
            if a != b {
                return Err(GraphError::Integrity("twin edge copies differ"));
            }
            if a.pos >= m || a.start >= a.end || a.end >= n {
                return Err(GraphError::Integrity("edge coordinates out of range"));
            }
            if col_used[a.pos] {
                return Err(GraphError::Integrity("two edges share a column"));
            }
            col_used[a.pos] = true;
        }

        for eid in self.edge_ids() {
            let ec = ctx.e[2 * eid];
            let u = self.neighbor(2 * eid + 1);
            let w = self.neighbor(2 * eid);
            debug_assert!(u != NIL && w != NIL);
            for v in 0..n {
                let vc = &ctx.vi[v];
                if v == u || v == w {
                    if ec.start != vc.pos && ec.end != vc.pos {
                        return Err(GraphError::Integrity(
                            "edge row span does not end at an endpoint",
                        ));
                    }
                    if ec.pos < vc.start || ec.pos > vc.end {
                        return Err(GraphError::Integrity(
                            "edge column misses an endpoint's span",
                        ));
                    }
                } else if ec.start <= vc.pos
                    && vc.pos <= ec.end
                    && vc.start <= ec.pos
                    && ec.pos <= vc.end
                {
                    return Err(GraphError::Integrity(
                        "edge passes through a vertex it is not incident to",
                    ));
                }
            }
        }

        Ok(())
    }
}
