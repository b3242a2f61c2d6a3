//! Structural self-checks for a finished embedding. These are debug
//! assertions for the test suite, so they panic rather than return errors.

use crate::NIL;

use super::Graph;

impl Graph {
    /// Asserts that the adjacency structure is a well formed rotation system
    /// and that it has planar genus: every component satisfies
    /// `V - E + F = 2`, faces counted by walking arc orbits.
    pub fn dbg_check_embedding(&self) {
        let n = self.n;

        // Adjacency lists are consistent doubly linked chains and every
        // in-use arc sits in exactly one of them.
        let mut owner_of = vec![NIL; self.arcs.len()];
        for v in 0..n {
            let mut prev = NIL;
            let mut e = self.first_arc(v);
            while e != NIL {
                assert!(self.arcs[e].in_use, "free arc {e} linked at vertex {v}");
                assert_eq!(owner_of[e], NIL, "arc {e} linked twice");
                owner_of[e] = v;
                assert_eq!(self.arcs[e].link[1], prev, "broken prev link at arc {e}");
                assert_eq!(self.arc_owner(e), v, "twin of arc {e} names the wrong vertex");
                prev = e;
                e = self.arcs[e].link[0];
            }
            assert_eq!(self.last_arc(v), prev, "broken tail link at vertex {v}");
        }
        for eid in self.edge_ids() {
            assert!(
                owner_of[2 * eid] != NIL && owner_of[2 * eid + 1] != NIL,
                "edge {eid} missing from the adjacency"
            );
        }

        // Component labels.
        let mut comp = vec![NIL; n];
        let mut ncomp = 0;
        for s in 0..n {
            if comp[s] != NIL {
                continue;
            }
            let mut queue = vec![s];
            comp[s] = ncomp;
            while let Some(v) = queue.pop() {
                for (_, w) in self.neighbors(v) {
                    if comp[w] == NIL {
                        comp[w] = ncomp;
                        queue.push(w);
                    }
                }
            }
            ncomp += 1;
        }

        // Count per-component vertices, edges, and face orbits. The face
        // successor of an arc is the next arc in rotation after its twin.
        let mut vcount = vec![0usize; ncomp];
        let mut ecount = vec![0usize; ncomp];
        let mut fcount = vec![0usize; ncomp];
        for v in 0..n {
            vcount[comp[v]] += 1;
        }
        for eid in self.edge_ids() {
            ecount[comp[self.arc_owner(2 * eid)]] += 1;
        }
        let mut seen = vec![false; self.arcs.len()];
        for eid in self.edge_ids() {
            for first in [2 * eid, 2 * eid + 1] {
                if seen[first] {
                    continue;
                }
                fcount[comp[self.arc_owner(first)]] += 1;
                let mut e = first;
                let mut steps = 0;
                loop {
                    assert!(!seen[e], "face walks cross at arc {e}");
                    seen[e] = true;
                    e = self.next_arc_circular(self.twin(e));
                    steps += 1;
                    assert!(steps <= self.arcs.len(), "unterminated face walk");
                    if e == first {
                        break;
                    }
                }
            }
        }

        for c in 0..ncomp {
            if ecount[c] == 0 {
                assert_eq!(vcount[c], 1);
                continue;
            }
            assert_eq!(
                vcount[c] + fcount[c],
                ecount[c] + 2,
                "component {c} does not have planar genus"
            );
        }
    }
}
