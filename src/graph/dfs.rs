//! Depth-first preprocessing for the embedder.
//!
//! Numbers the vertices in DFS preorder and renumbers the whole graph so that
//! vertex id and DFS index coincide while the embedder runs (the walkdown's
//! tie breaking compares raw ids to decide ancestorship, so ancestors must
//! carry strictly smaller ids than their descendants). The user's numbering
//! is kept in each vertex's `index` field and restored afterwards.

use smallvec::SmallVec;

use crate::list_collection::ListCollection;
use crate::NIL;

use super::{EdgeType, Graph, VertexRec};

impl Graph {
    /// DFS numbering, arc classification, and renumbering by DFS index.
    pub(crate) fn dfs_and_renumber(&mut self) {
        let n = self.n;
        let mut dfi = vec![NIL; n];
        let mut parent_arc = vec![NIL; n];
        let mut next_dfi = 0;

        for root in 0..n {
            if dfi[root] != NIL {
                continue;
            }
            dfi[root] = next_dfi;
            next_dfi += 1;
            let mut st: Vec<(usize, usize)> = vec![(root, self.first_arc(root))];
            while let Some(&(_, e)) = st.last() {
                if e == NIL {
                    st.pop();
                    continue;
                }
                st.last_mut().unwrap().1 = self.next_arc(e);
                let w = self.neighbor(e);
                if dfi[w] == NIL {
                    dfi[w] = next_dfi;
                    next_dfi += 1;
                    parent_arc[w] = e;
                    st.push((w, self.first_arc(w)));
                }
            }
        }
        debug_assert_eq!(next_dfi, n);

        // Classify each arc pair. In an undirected DFS every non-tree edge
        // connects an ancestor and a descendant.
        for eid in 0..self.edge_id_bound() {
            let a = 2 * eid;
            if !self.arcs[a].in_use {
                continue;
            }
            let u = self.arc_owner(a);
            let w = self.arcs[a].neighbor;
            let (ta, tt) = if parent_arc[w] == a {
                (EdgeType::TreeChild, EdgeType::TreeParent)
            } else if parent_arc[u] == (a ^ 1) {
                (EdgeType::TreeParent, EdgeType::TreeChild)
            } else if dfi[u] > dfi[w] {
                (EdgeType::Back, EdgeType::Forward)
            } else {
                (EdgeType::Forward, EdgeType::Back)
            };
            self.arcs[a].etype = ta;
            self.arcs[a ^ 1].etype = tt;
            self.arcs[a].sign = 1;
            self.arcs[a ^ 1].sign = 1;
        }

        // Permute the primary records into DFS order. Arc ids are stable, so
        // adjacency survives; only vertex ids and arc far-ends change.
        let mut newv: Vec<VertexRec> = (0..2 * n).map(VertexRec::new).collect();
        for o in 0..n {
            let mut rec = self.vertices[o].clone();
            rec.index = o;
            rec.parent = if parent_arc[o] == NIL {
                NIL
            } else {
                dfi[self.arc_owner(parent_arc[o])]
            };
            rec.parent_arc = parent_arc[o];
            rec.ext_face = [NIL; 2];
            rec.least_ancestor = NIL;
            rec.lowpoint = NIL;
            rec.visited = false;
            rec.visited_step = NIL;
            rec.visited_info = NIL;
            rec.pertinent_edge = NIL;
            rec.pertinent_roots = NIL;
            rec.child_list = NIL;
            rec.fwd_arcs.clear();
            rec.fwd_remaining = 0;
            newv[dfi[o]] = rec;
        }
        self.vertices = newv;
        for arc in &mut self.arcs {
            if arc.in_use {
                arc.neighbor = dfi[arc.neighbor];
            }
        }
    }

    /// Least ancestor over a single back edge, and the classic lowpoint.
    /// Children carry larger DFS indices than their parents, so one
    /// descending sweep folds each subtree into its parent.
    pub(crate) fn compute_lowpoints(&mut self) {
        let n = self.n;
        for v in 0..n {
            let mut la = NIL;
            let mut e = self.first_arc(v);
            while e != NIL {
                if self.arcs[e].etype == EdgeType::Back {
                    let a = self.arcs[e].neighbor;
                    if la == NIL || a < la {
                        la = a;
                    }
                }
                e = self.next_arc(e);
            }
            self.vertices[v].least_ancestor = la;
            self.vertices[v].lowpoint = if la == NIL { v } else { la };
        }
        for v in (0..n).rev() {
            let p = self.vertices[v].parent;
            if p != NIL {
                let lp = self.vertices[v].lowpoint;
                if lp < self.vertices[p].lowpoint {
                    self.vertices[p].lowpoint = lp;
                }
            }
        }
    }

    /// Builds, for every vertex, the list of DFS children ascending by
    /// lowpoint (threaded through `child_lc` so a merge can unlink a child in
    /// O(1)) and the list of forward arcs to back-edge descendants ascending
    /// by descendant.
    pub(crate) fn build_child_and_fwd_lists(&mut self, child_lc: &mut ListCollection) {
        let n = self.n;
        let mut buckets: Vec<SmallVec<usize, 2>> = vec![SmallVec::new(); n];
        for c in 0..n {
            if self.vertices[c].parent != NIL {
                buckets[self.vertices[c].lowpoint].push(c);
            }
        }
        for bucket in &buckets {
            for &c in bucket {
                let p = self.vertices[c].parent;
                let head = self.vertices[p].child_list;
                self.vertices[p].child_list = child_lc.append(head, c);
            }
        }

        for d in 0..n {
            let mut e = self.first_arc(d);
            while e != NIL {
                if self.arcs[e].etype == EdgeType::Back {
                    let a = self.arcs[e].neighbor;
                    let fwd = e ^ 1;
                    self.vertices[a].fwd_arcs.push(fwd);
                }
                e = self.next_arc(e);
            }
        }
        for v in 0..n {
            self.vertices[v].fwd_remaining = self.vertices[v].fwd_arcs.len();
        }
    }

    /// Undoes the DFS renumbering, putting every vertex record back at the
    /// user's number and rewriting arc far-ends. Embedder scratch is cleared;
    /// the adjacency rotation itself is untouched.
    pub(crate) fn restore_user_numbering(&mut self) {
        let n = self.n;
        let index: Vec<usize> = (0..n).map(|v| self.vertices[v].index).collect();
        let mut newv: Vec<VertexRec> = (0..2 * n).map(VertexRec::new).collect();
        for v in 0..n {
            let target = index[v];
            let mut rec = self.vertices[v].clone();
            rec.index = target;
            rec.parent = if rec.parent == NIL { NIL } else { index[rec.parent] };
            rec.ext_face = [NIL; 2];
            rec.least_ancestor = NIL;
            rec.lowpoint = NIL;
            rec.visited = false;
            rec.visited_step = NIL;
            rec.visited_info = NIL;
            rec.pertinent_edge = NIL;
            rec.pertinent_roots = NIL;
            rec.child_list = NIL;
            rec.fwd_arcs.clear();
            rec.fwd_remaining = 0;
            newv[target] = rec;
        }
        self.vertices = newv;
        for arc in &mut self.arcs {
            if arc.in_use {
                arc.neighbor = index[arc.neighbor];
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list_collection::ListCollection;

    #[test]
    fn numbers_in_preorder_and_classifies() {
        // 0 - 1 - 2 with back edge 2 - 0, plus a second component 3 - 4.
        let mut g = Graph::new(5);
        g.add_edge(0, 1).unwrap();
        g.add_edge(1, 2).unwrap();
        g.add_edge(2, 0).unwrap();
        g.add_edge(3, 4).unwrap();
        g.dfs_and_renumber();

        assert!(g.is_dfs_tree_root(0));
        assert_eq!(g.parent(1), 0);
        assert_eq!(g.parent(2), 1);
        assert!(g.is_dfs_tree_root(3));
        assert_eq!(g.parent(4), 3);

        // Edge 2 was added as (2, 0); its arc out of vertex 2 must now be a
        // back arc toward the ancestor 0.
        assert_eq!(g.edge_type(4), EdgeType::Back);
        assert_eq!(g.edge_type(5), EdgeType::Forward);
        assert_eq!(g.edge_type(0), EdgeType::TreeChild);
        assert_eq!(g.edge_type(1), EdgeType::TreeParent);

        g.compute_lowpoints();
        assert_eq!(g.vertices[2].least_ancestor, 0);
        assert_eq!(g.vertices[2].lowpoint, 0);
        assert_eq!(g.vertices[1].lowpoint, 0);
        assert_eq!(g.vertices[0].lowpoint, 0);
        assert_eq!(g.vertices[4].lowpoint, 4);

        let mut lc = ListCollection::new(5).unwrap();
        g.build_child_and_fwd_lists(&mut lc);
        assert_eq!(g.vertices[0].child_list, 1);
        assert_eq!(g.vertices[0].fwd_arcs.as_slice(), &[5]);
        assert_eq!(g.vertices[0].fwd_remaining, 1);
    }

    #[test]
    fn renumber_round_trips() {
        // Force a numbering change: DFS from 0 reaches 2 before 1.
        let mut g = Graph::new(3);
        g.add_edge(0, 2).unwrap();
        g.add_edge(2, 1).unwrap();
        let before: Vec<Vec<_>> = (0..3).map(|v| g.neighbors(v).collect()).collect();
        g.dfs_and_renumber();
        assert_eq!(g.vertex_index(1), 2);
        assert_eq!(g.vertex_index(2), 1);
        g.restore_user_numbering();
        for v in 0..3 {
            assert_eq!(g.vertex_index(v), v);
            assert_eq!(g.neighbors(v).collect::<Vec<_>>(), before[v]);
        }
    }
}
