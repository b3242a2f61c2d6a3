//! Edge-addition planar embedding.
//!
//! Vertices are processed in descending DFS order. Every tree edge starts out
//! as its own biconnected component rooted at the child's virtual vertex; at
//! step `v`, a walkup marks the bicomps that a back edge `(v, d)` must pass
//! through, then a walkdown descends along the external face from each of
//! `v`'s pertinent root copies, merging child bicomps and embedding back
//! edges where it finds their descendant endpoints. A back edge that cannot
//! be embedded this way proves the graph non-planar.
//!
//! The walkdown reports two kinds of events to an observer: the moment just
//! before a non-empty batch of bicomp merges, and every advance past an
//! inactive vertex on the external face. The drawing builder lives entirely
//! off those two notifications plus the finished embedding.

use crate::draw::DrawingContext;
use crate::list_collection::ListCollection;
use crate::{GraphError, NIL};

use super::{EdgeType, Graph};

/// Outcome of [`Graph::embed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Planarity {
    Planar,
    NonPlanar,
}

/// Callbacks fired at the two points of the embedding where vertex ordering
/// information exists that the finished embedding no longer carries.
pub(crate) trait EmbeddingObserver {
    /// The walkdown is about to merge the bicomps recorded on the merge
    /// stack (read with [`Graph::merge_stack`]) and then embed a back edge
    /// from `root_vertex`'s step vertex down to `w`.
    fn collect_drawing_data(&mut self, g: &Graph, root_vertex: usize, w: usize, w_prev_link: usize);

    /// The walkdown just moved past an inactive vertex and now stands on `w`,
    /// whose link `w_prev_link` points back at the vertex it passed.
    fn break_tie(
        &mut self,
        g: &Graph,
        bicomp_root: usize,
        w: usize,
        w_prev_link: usize,
    ) -> Result<(), GraphError>;
}

impl Graph {
    /// Embeds the graph in the plane if possible.
    ///
    /// On `Planar` the adjacency lists hold a combinatorial planar embedding
    /// (a planar rotation of arcs around every vertex), and the drawing
    /// context, if attached, holds a finished visibility representation. On
    /// `NonPlanar` the adjacency lists are rebuilt as plain input adjacency,
    /// so the graph can be edited and embedded again.
    pub fn embed(&mut self) -> Result<Planarity, GraphError> {
        // The context moves out for the duration so the embedder can borrow
        // the graph and the observer independently.
        let mut draw = self.draw.take();
        let result = self.embed_inner(draw.as_mut());
        self.draw = draw;
        result
    }

    fn embed_inner(&mut self, mut draw: Option<&mut DrawingContext>) -> Result<Planarity, GraphError> {
        let n = self.n;
        let m = self.edge_count();
        self.embedded = false;
        if let Some(ctx) = draw.as_deref_mut() {
            ctx.reset(n, self.arcs.len())?;
        }
        // A planar graph has at most 3n - 6 edges.
        if n >= 3 && m > 3 * n - 6 {
            return Ok(Planarity::NonPlanar);
        }

        self.stack.clear();
        self.dfs_and_renumber();
        self.compute_lowpoints();
        let mut child_lc = ListCollection::new(n)?;
        let mut root_lc = ListCollection::new(n)?;
        self.build_child_and_fwd_lists(&mut child_lc);
        self.initialize_bicomps();

        let planarity = {
            let mut emb = Embedder {
                g: self,
                obs: draw.as_deref_mut(),
                child_lc: &mut child_lc,
                root_lc: &mut root_lc,
            };
            emb.run()?
        };

        if planarity == Planarity::NonPlanar {
            // The walkdown leaves a partial embedding behind. Rebuild plain
            // adjacency lists so the graph stays usable.
            self.rebuild_adjacency();
        }

        let mut resolve_result = Ok(());
        if planarity == Planarity::Planar {
            self.orient_embedding();
            self.join_bicomps();
            if let Some(ctx) = draw.as_deref_mut() {
                resolve_result = crate::draw::compute_visibility(self, ctx);
            }
            self.embedded = resolve_result.is_ok();
        }

        // Back to the caller's numbering even on a failed resolve, drawing
        // records first while the index map is still in place.
        if let Some(ctx) = draw.as_deref_mut() {
            ctx.renumber_records(self);
        }
        self.restore_user_numbering();
        resolve_result?;
        Ok(planarity)
    }

    /// Embeds every tree edge as a singleton bicomp rooted at the child's
    /// virtual vertex. All other arcs wait in the forward arc lists.
    fn initialize_bicomps(&mut self) {
        let n = self.n;
        for v in self.vertices.iter_mut() {
            v.link = [NIL; 2];
            v.ext_face = [NIL; 2];
        }
        for arc in self.arcs.iter_mut() {
            arc.link = [NIL; 2];
        }
        for c in 0..n {
            if self.vertices[c].parent == NIL {
                continue;
            }
            let r = n + c;
            let a = self.vertices[c].parent_arc;
            debug_assert_eq!(self.arcs[a].etype, EdgeType::TreeChild);
            let t = a ^ 1;
            // The child's view of the tree edge names the root copy until a
            // merge or the final join rewrites it to the primary vertex.
            self.arcs[t].neighbor = r;
            self.vertices[r].link = [a, a];
            self.vertices[c].link = [t, t];
            self.vertices[r].ext_face = [c, c];
            self.vertices[c].ext_face = [r, r];
        }
    }

    /// Relinks every in-use edge into both endpoints' adjacency lists, in
    /// edge id order, dropping whatever partial embedding state was there.
    fn rebuild_adjacency(&mut self) {
        let n = self.n;
        for arc in self.arcs.iter_mut() {
            arc.link = [NIL; 2];
        }
        // Mid-embedding, a child's view of its tree edge names the parent's
        // root copy; point it back at the parent itself.
        for e in 0..self.arcs.len() {
            if self.arcs[e].in_use && self.arcs[e].neighbor >= n {
                self.arcs[e].neighbor = self.primary_from_root(self.arcs[e].neighbor);
            }
        }
        for v in self.vertices.iter_mut() {
            v.link = [NIL; 2];
            v.ext_face = [NIL; 2];
        }
        for eid in 0..self.edge_id_bound() {
            let a = 2 * eid;
            if !self.arcs[a].in_use {
                continue;
            }
            let u = self.arcs[a ^ 1].neighbor;
            let w = self.arcs[a].neighbor;
            self.link_arc_end(u, a, 1);
            self.link_arc_end(w, a ^ 1, 1);
        }
    }

    /// Imposes one orientation on every bicomp by multiplying out the signs
    /// the merges left on tree-child arcs, inverting each vertex whose
    /// accumulated sign is negative.
    fn orient_embedding(&mut self) {
        let n = self.n;
        let mut st: Vec<(usize, bool)> = Vec::new();
        for r in n..2 * n {
            if self.vertices[r].link[0] == NIL {
                continue;
            }
            st.push((r, false));
            while let Some((x, flip)) = st.pop() {
                if flip {
                    self.invert_vertex(x);
                }
                let mut e = self.vertices[x].link[0];
                while e != NIL {
                    if self.arcs[e].etype == EdgeType::TreeChild {
                        let child = self.arcs[e].neighbor;
                        st.push((child, flip ^ (self.arcs[e].sign < 0)));
                    }
                    e = self.arcs[e].link[0];
                }
            }
        }
    }

    /// Splices every surviving root copy back into its primary vertex. Cut
    /// vertices and DFS roots own one surviving copy per bicomp they root.
    fn join_bicomps(&mut self) {
        let n = self.n;
        for r in n..2 * n {
            if self.vertices[r].link[0] == NIL {
                continue;
            }
            let p = self.primary_from_root(r);
            self.merge_adjacency(p, 1, r);
        }
    }
}

struct Embedder<'a, O: EmbeddingObserver> {
    g: &'a mut Graph,
    obs: Option<&'a mut O>,
    child_lc: &'a mut ListCollection,
    root_lc: &'a mut ListCollection,
}

impl<'a, O: EmbeddingObserver> Embedder<'a, O> {
    fn run(&mut self) -> Result<Planarity, GraphError> {
        let n = self.g.n;
        for v in (0..n).rev() {
            let fwd = std::mem::take(&mut self.g.vertices[v].fwd_arcs);
            for &e in &fwd {
                self.walk_up(v, e);
            }
            self.g.vertices[v].fwd_arcs = fwd;

            loop {
                let c = self.g.vertices[v].pertinent_roots;
                if c == NIL {
                    break;
                }
                self.g.vertices[v].pertinent_roots = self.root_lc.remove(c, c);
                self.walk_down(v, n + c)?;
            }

            if self.g.vertices[v].fwd_remaining > 0 {
                self.g.stack.clear();
                return Ok(Planarity::NonPlanar);
            }
        }
        Ok(Planarity::Planar)
    }

    // ------------------------------------------------------------------
    // Activity of a vertex at step v
    // ------------------------------------------------------------------

    fn pertinent(&self, w: usize) -> bool {
        let rec = &self.g.vertices[w];
        rec.pertinent_edge != NIL || rec.pertinent_roots != NIL
    }

    fn externally_active(&self, w: usize, v: usize) -> bool {
        let rec = &self.g.vertices[w];
        if rec.least_ancestor != NIL && rec.least_ancestor < v {
            return true;
        }
        let c = rec.child_list;
        c != NIL && self.g.vertices[c].lowpoint < v
    }

    fn inactive(&self, w: usize, v: usize) -> bool {
        !self.pertinent(w) && !self.externally_active(w, v)
    }

    fn internally_active(&self, w: usize, v: usize) -> bool {
        self.pertinent(w) && !self.externally_active(w, v)
    }

    // ------------------------------------------------------------------
    // Walkup
    // ------------------------------------------------------------------

    /// Climbs from the descendant endpoint of the back edge `e = (v, d)` up
    /// to `v`, walking both directions of each bicomp's external face in
    /// lockstep and hopping from each bicomp root to its primary vertex.
    /// Every root found on the way is recorded as a pertinent root of the
    /// primary vertex below `v`: internally active roots at the front of the
    /// list, externally active ones at the back, so the walkdown resolves
    /// what it can finish before what it cannot.
    fn walk_up(&mut self, v: usize, e: usize) {
        let n = self.g.n;
        let d = self.g.arcs[e].neighbor;
        self.g.vertices[d].pertinent_edge = e;

        let (mut x, mut x_in) = (d, 1usize);
        let (mut y, mut y_in) = (d, 0usize);
        loop {
            if x == v || y == v {
                break;
            }
            // A vertex already climbed through this step has the rest of the
            // chain recorded.
            if self.g.vertices[x].visited_step == v || self.g.vertices[y].visited_step == v {
                break;
            }
            self.g.vertices[x].visited_step = v;
            self.g.vertices[y].visited_step = v;

            let r = if x >= n {
                x
            } else if y >= n {
                y
            } else {
                NIL
            };
            if r != NIL {
                let c = r - n;
                let p = self.g.vertices[c].parent;
                if p == v {
                    let head = self.g.vertices[v].pertinent_roots;
                    self.g.vertices[v].pertinent_roots = self.root_lc.append(head, c);
                    break;
                }
                let ext = self.g.vertices[c].lowpoint < v;
                self.add_pertinent_root(p, c, ext);
                x = p;
                x_in = 1;
                y = p;
                y_in = 0;
            } else {
                x = self.g.next_ext_face(x, &mut x_in);
                y = self.g.next_ext_face(y, &mut y_in);
            }
        }
    }

    fn add_pertinent_root(&mut self, p: usize, c: usize, externally_active: bool) {
        let head = self.g.vertices[p].pertinent_roots;
        if externally_active || head == NIL {
            self.g.vertices[p].pertinent_roots = self.root_lc.append(head, c);
        } else {
            self.root_lc.insert_before(head, c);
            self.g.vertices[p].pertinent_roots = c;
        }
    }

    // ------------------------------------------------------------------
    // Walkdown
    // ------------------------------------------------------------------

    /// First pertinent or externally active vertex on one external face side
    /// of a pertinent child bicomp root. Inactive vertices are transparent
    /// here; the traversal proper still visits them one at a time.
    fn first_active_on_side(&self, r2: usize, side: usize, v: usize) -> usize {
        let mut s_in = 1 ^ side;
        let mut s = self.g.next_ext_face(r2, &mut s_in);
        while s != r2 && !self.g.is_virtual(s) && self.inactive(s, v) {
            s = self.g.next_ext_face(s, &mut s_in);
        }
        s
    }

    /// Descends both external face sides of the bicomp rooted at `r`,
    /// embedding every back edge from step vertex `v` into this bicomp's
    /// subtree. Merges are batched on the scratch stack and flushed when a
    /// back edge endpoint is reached.
    fn walk_down(&mut self, v: usize, r: usize) -> Result<(), GraphError> {
        debug_assert!(self.g.stack.is_empty());
        let n = self.g.n;

        for root_side in 0..2 {
            let mut w_in = 1 ^ root_side;
            let mut w = self.g.next_ext_face(r, &mut w_in);

            while w != r {
                if self.g.vertices[w].pertinent_edge != NIL {
                    if !self.g.stack.is_empty() {
                        if let Some(obs) = self.obs.as_deref_mut() {
                            obs.collect_drawing_data(self.g, r, w, w_in);
                        }
                        self.merge_bicomps()?;
                    }
                    self.embed_back_edge(v, root_side, r, w, w_in);
                }

                let c2 = self.g.vertices[w].pertinent_roots;
                if c2 != NIL {
                    // Descend into the first pertinent child bicomp. The side
                    // is chosen by the activity of the nearest active vertex
                    // in each direction: finishable work first.
                    let r2 = n + c2;
                    let ax = self.first_active_on_side(r2, 0, v);
                    let ay = self.first_active_on_side(r2, 1, v);
                    let vout = if self.internally_active(ax, v) {
                        0
                    } else if self.internally_active(ay, v) {
                        1
                    } else if self.pertinent(ax) {
                        0
                    } else {
                        1
                    };
                    self.g.stack.push(w);
                    self.g.stack.push(w_in);
                    self.g.stack.push(r2);
                    self.g.stack.push(vout);
                    let mut s_in = 1 ^ vout;
                    let s = self.g.next_ext_face(r2, &mut s_in);
                    w = s;
                    w_in = s_in;
                } else if self.inactive(w, v) {
                    let passed_root = r;
                    w = self.g.next_ext_face(w, &mut w_in);
                    if let Some(obs) = self.obs.as_deref_mut() {
                        obs.break_tie(self.g, passed_root, w, w_in)?;
                    }
                } else {
                    // Externally active and nothing to embed here: this side
                    // of the face is blocked.
                    break;
                }
            }

            if !self.g.stack.is_empty() {
                // Unmergeable bicomps remain stacked; the step's leftover
                // forward arcs will report the graph non-planar.
                self.g.stack.clear();
                break;
            }
        }
        Ok(())
    }

    /// Pops the stacked `(parent, parent link, root, child link)` tuples
    /// deepest first, folding each child bicomp into its parent vertex: the
    /// external face is spliced across the merge point, the child root's
    /// rotation is inverted when entry and exit parity demand it, and its
    /// adjacency is spliced into the parent.
    fn merge_bicomps(&mut self) -> Result<(), GraphError> {
        let n = self.g.n;
        while !self.g.stack.is_empty() {
            let vout = self.g.stack.pop().unwrap();
            let r2 = self.g.stack.pop().unwrap();
            let z_in = self.g.stack.pop().unwrap();
            let z = self.g.stack.pop().unwrap();
            let c = r2 - n;
            debug_assert_eq!(self.g.vertices[c].parent, z);

            // The first vertex on the side the walkdown did not take becomes
            // the parent's new face neighbor once the traversed side is cut
            // off by the back edge about to be embedded.
            let mut dir = vout;
            let desc = self.g.next_ext_face(r2, &mut dir);
            self.g.vertices[z].ext_face[z_in] = desc;
            self.g.vertices[desc].ext_face[dir] = z;

            // Entering and leaving the parent on the same side means the
            // child bicomp is upside down relative to it.
            if vout == z_in {
                self.g.invert_vertex(r2);
                let a = self.g.vertices[c].parent_arc;
                self.g.arcs[a].sign = -self.g.arcs[a].sign;
            }

            let head = self.g.vertices[z].child_list;
            self.g.vertices[z].child_list = self.child_lc.remove(head, c);
            let head = self.g.vertices[z].pertinent_roots;
            self.g.vertices[z].pertinent_roots = self.root_lc.remove(head, c);

            self.g.merge_adjacency(z, z_in, r2);
        }
        Ok(())
    }

    /// Moves the parked twin arc pair of the back edge `(v, w)` into the
    /// embedding, between the bicomp root `r` and `w`, and short-circuits the
    /// external face so the traversed path between them goes inside.
    fn embed_back_edge(&mut self, v: usize, root_side: usize, r: usize, w: usize, w_in: usize) {
        let e = self.g.vertices[w].pertinent_edge;
        debug_assert!(e != NIL && self.g.arcs[e].neighbor == w);
        let t = e ^ 1;
        self.g.arcs[t].neighbor = r;
        self.g.link_arc_end(r, e, root_side);
        self.g.link_arc_end(w, t, w_in);
        self.g.vertices[r].ext_face[root_side] = w;
        self.g.vertices[w].ext_face[w_in] = r;
        self.g.vertices[w].pertinent_edge = NIL;
        self.g.vertices[v].fwd_remaining -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_graph(n: usize) -> Graph {
        let mut g = Graph::new(n);
        for u in 0..n {
            for v in u + 1..n {
                g.add_edge(u, v).unwrap();
            }
        }
        g
    }

    #[test]
    fn embeds_small_planar_graphs() {
        for g in [
            {
                let mut g = Graph::new(3);
                g.add_edge(0, 1).unwrap();
                g.add_edge(1, 2).unwrap();
                g
            },
            complete_graph(3),
            complete_graph(4),
            {
                // Two triangles sharing nothing.
                let mut g = Graph::new(6);
                for (u, v) in [(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3)] {
                    g.add_edge(u, v).unwrap();
                }
                g
            },
        ] {
            let mut g = g;
            assert_eq!(g.embed().unwrap(), Planarity::Planar);
            g.dbg_check_embedding();
        }
    }

    #[test]
    fn rejects_k5_by_edge_count() {
        let mut g = complete_graph(5);
        assert_eq!(g.embed().unwrap(), Planarity::NonPlanar);
    }

    #[test]
    fn rejects_k33_structurally() {
        // 9 edges on 6 vertices passes the edge count test, so this one has
        // to fail inside the walkdown.
        let mut g = Graph::new(6);
        for u in 0..3 {
            for v in 3..6 {
                g.add_edge(u, v).unwrap();
            }
        }
        assert_eq!(g.embed().unwrap(), Planarity::NonPlanar);
    }

    #[test]
    fn planar_after_removing_one_k5_edge() {
        let mut g = complete_graph(5);
        g.delete_edge(0).unwrap();
        assert_eq!(g.embed().unwrap(), Planarity::Planar);
        g.dbg_check_embedding();
    }

    #[test]
    fn rotation_contains_all_edges_after_embedding() {
        let mut g = complete_graph(4);
        assert_eq!(g.embed().unwrap(), Planarity::Planar);
        for v in 0..4 {
            assert_eq!(g.degree(v), 3);
            let mut others: Vec<_> = g.neighbors(v).map(|(_, w)| w).collect();
            others.sort_unstable();
            let expect: Vec<_> = (0..4).filter(|&w| w != v).collect();
            assert_eq!(others, expect);
        }
    }

    #[test]
    fn embeds_edgeless_graphs() {
        let mut g = Graph::new(4);
        assert_eq!(g.embed().unwrap(), Planarity::Planar);
        g.dbg_check_embedding();
        let mut g = Graph::new(0);
        assert_eq!(g.embed().unwrap(), Planarity::Planar);
    }
}
