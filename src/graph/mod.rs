//! The graph container the embedder and the drawing builder operate on.
//!
//! Vertices and edges live in parallel arrays addressed by plain indices, and
//! everything that refers to another record does so by index with [`NIL`]
//! standing in for "none". The container holds `2n` vertex slots: primary
//! vertices `0..n`, and one virtual slot per vertex in `n..2n` that the
//! embedder uses as the root copy of the biconnected component owned by DFS
//! child `slot - n`.
//!
//! Each undirected edge is a twin pair of arcs, ids `2k` and `2k + 1` for edge
//! `k`, so `twin(e) == e ^ 1`. Adjacency lists are doubly linked chains of
//! arcs; the arc at the `link[0]` end and the arc at the `link[1]` end of a
//! vertex on the external face are its two face boundary arcs, which is the
//! invariant that keeps the external-face links and the adjacency splices of
//! the embedder in agreement.

use smallvec::SmallVec;

use crate::draw::DrawingContext;
use crate::{EdgeId, GraphError, VertexId, NIL};

mod check;
mod dfs;
pub(crate) mod embed;

pub use embed::Planarity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeType {
    /// Tree arc from a DFS parent to its child.
    TreeChild,
    /// Tree arc from a DFS child to its parent.
    TreeParent,
    /// Non-tree arc from a descendant to an ancestor.
    Back,
    /// Non-tree arc from an ancestor to a descendant.
    Forward,
}

#[derive(Debug, Clone)]
pub(crate) struct ArcRec {
    pub neighbor: usize,
    /// `link[0]` is the next arc toward the `link[1]` end of the owner's
    /// list, `link[1]` the previous one. NIL terminated at both ends.
    pub link: [usize; 2],
    pub etype: EdgeType,
    /// Orientation sign on tree-child arcs. A merge that flips a child
    /// bicomp negates it; the orientation pass multiplies signs back out.
    pub sign: i8,
    pub in_use: bool,
}

#[derive(Debug, Clone)]
pub(crate) struct VertexRec {
    /// First and last arc of the adjacency list.
    pub link: [usize; 2],
    /// Neighboring vertices along the external face of this vertex's bicomp.
    pub ext_face: [usize; 2],
    /// The vertex's identity outside the embedder. While the embedder runs,
    /// vertices are renumbered by DFS index and this holds the user's number.
    pub index: usize,
    pub parent: usize,
    /// Tree arc from the parent down to this vertex.
    pub parent_arc: usize,
    /// Smallest ancestor reachable over a single back edge from this vertex.
    pub least_ancestor: usize,
    /// Smallest ancestor reachable over a single back edge from the subtree.
    pub lowpoint: usize,
    pub visited: bool,
    /// Step number of the last walkup that climbed through here.
    pub visited_step: usize,
    /// Free per-vertex scratch, used by the drawing sweep for generator arcs.
    pub visited_info: usize,
    /// Arc of an unembedded back edge ending here during the current step.
    pub pertinent_edge: usize,
    /// Head (a DFS child id) of this vertex's pertinent root list.
    pub pertinent_roots: usize,
    /// Head of the list of DFS children not yet merged into this vertex,
    /// ascending by lowpoint.
    pub child_list: usize,
    /// Arcs to back-edge descendants, ascending by descendant.
    pub fwd_arcs: SmallVec<usize, 4>,
    pub fwd_remaining: usize,
}

impl VertexRec {
    fn new(index: usize) -> Self {
        VertexRec {
            link: [NIL; 2],
            ext_face: [NIL; 2],
            index,
            parent: NIL,
            parent_arc: NIL,
            least_ancestor: NIL,
            lowpoint: NIL,
            visited: false,
            visited_step: NIL,
            visited_info: NIL,
            pertinent_edge: NIL,
            pertinent_roots: NIL,
            child_list: NIL,
            fwd_arcs: SmallVec::new(),
            fwd_remaining: 0,
        }
    }

}

#[derive(Debug, Clone)]
pub struct Graph {
    n: usize,
    pub(crate) vertices: Vec<VertexRec>,
    pub(crate) arcs: Vec<ArcRec>,
    /// Edge ids freed by [`Graph::delete_edge`]. A non-empty hole stack makes
    /// the embedding non-compact, which the drawing pipeline rejects.
    pub(crate) edge_holes: Vec<usize>,
    /// Shared scratch stack: merge stack of the walkdown, traversal stack of
    /// the vertex position resolver. Empty between phases.
    pub(crate) stack: Vec<usize>,
    pub(crate) draw: Option<DrawingContext>,
    pub(crate) embedded: bool,
}

impl Graph {
    /// Creates an empty graph over vertices `0..n`.
    pub fn new(n: usize) -> Self {
        let vertices = (0..2 * n).map(VertexRec::new).collect();
        Graph {
            n,
            vertices,
            arcs: Vec::new(),
            edge_holes: Vec::new(),
            stack: Vec::new(),
            draw: None,
            embedded: false,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.n
    }

    /// Number of edges currently in use.
    pub fn edge_count(&self) -> usize {
        self.arcs.len() / 2 - self.edge_holes.len()
    }

    /// One past the largest edge id ever allocated, holes included.
    pub(crate) fn edge_id_bound(&self) -> usize {
        self.arcs.len() / 2
    }

    pub fn edge_in_use(&self, e: EdgeId) -> bool {
        2 * e < self.arcs.len() && self.arcs[2 * e].in_use
    }

    /// Ids of the edges in use, ascending.
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        (0..self.edge_id_bound()).filter(|&e| self.arcs[2 * e].in_use)
    }

    pub fn is_embedded(&self) -> bool {
        self.embedded
    }

    /// Adds the undirected edge `(u, v)` and returns its id. Self loops and
    /// duplicate edges are rejected.
    pub fn add_edge(&mut self, u: VertexId, v: VertexId) -> Result<EdgeId, GraphError> {
        if u >= self.n || v >= self.n {
            return Err(GraphError::UnsupportedInput("edge endpoint out of range"));
        }
        if u == v {
            return Err(GraphError::UnsupportedInput("self loops are not supported"));
        }
        if self.neighbors(u).any(|(_, w)| w == v) {
            return Err(GraphError::UnsupportedInput("duplicate edges are not supported"));
        }
        self.arcs.try_reserve(2)?;
        let e = self.arcs.len();
        let arc = |neighbor| ArcRec {
            neighbor,
            link: [NIL; 2],
            etype: EdgeType::Back,
            sign: 1,
            in_use: true,
        };
        self.arcs.push(arc(v));
        self.arcs.push(arc(u));
        self.link_arc_end(u, e, 1);
        self.link_arc_end(v, e ^ 1, 1);
        self.embedded = false;
        Ok(e >> 1)
    }

    /// Removes edge `eid`, leaving a hole in the edge id space.
    pub fn delete_edge(&mut self, eid: EdgeId) -> Result<(), GraphError> {
        if !self.edge_in_use(eid) {
            return Err(GraphError::UnsupportedInput("no such edge"));
        }
        let e = 2 * eid;
        self.unlink_arc(self.arc_owner(e), e);
        self.unlink_arc(self.arc_owner(e ^ 1), e ^ 1);
        self.arcs[e].in_use = false;
        self.arcs[e ^ 1].in_use = false;
        self.edge_holes.push(eid);
        self.embedded = false;
        Ok(())
    }

    /// Clears every edge and all derived state, keeping the vertex capacity,
    /// so the container can be reused for another graph of the same order.
    pub fn reinitialize(&mut self) -> Result<(), GraphError> {
        self.arcs.clear();
        self.edge_holes.clear();
        self.stack.clear();
        self.embedded = false;
        for (i, v) in self.vertices.iter_mut().enumerate() {
            *v = VertexRec::new(i);
        }
        if let Some(ctx) = &mut self.draw {
            ctx.reset(self.n, 0)?;
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Arc and adjacency accessors
    // ------------------------------------------------------------------

    pub fn first_arc(&self, v: VertexId) -> usize {
        self.vertices[v].link[0]
    }

    pub fn last_arc(&self, v: VertexId) -> usize {
        self.vertices[v].link[1]
    }

    pub fn next_arc(&self, e: usize) -> usize {
        self.arcs[e].link[0]
    }

    pub fn prev_arc(&self, e: usize) -> usize {
        self.arcs[e].link[1]
    }

    /// Next arc in rotation order around the owner of `e`, wrapping.
    pub fn next_arc_circular(&self, e: usize) -> usize {
        let next = self.arcs[e].link[0];
        if next == NIL {
            self.first_arc(self.arc_owner(e))
        } else {
            next
        }
    }

    pub fn twin(&self, e: usize) -> usize {
        e ^ 1
    }

    pub fn neighbor(&self, e: usize) -> VertexId {
        self.arcs[e].neighbor
    }

    /// The vertex whose adjacency list contains `e`.
    pub fn arc_owner(&self, e: usize) -> VertexId {
        self.arcs[e ^ 1].neighbor
    }

    pub fn edge_of(&self, e: usize) -> EdgeId {
        e >> 1
    }

    pub fn edge_type(&self, e: usize) -> EdgeType {
        self.arcs[e].etype
    }

    /// Arcs of `v` in rotation order as `(edge id, neighbor)` pairs.
    pub fn neighbors(&self, v: VertexId) -> impl Iterator<Item = (EdgeId, VertexId)> + '_ {
        let mut e = self.first_arc(v);
        std::iter::from_fn(move || {
            if e == NIL {
                return None;
            }
            let item = (e >> 1, self.arcs[e].neighbor);
            e = self.arcs[e].link[0];
            Some(item)
        })
    }

    pub fn degree(&self, v: VertexId) -> usize {
        self.neighbors(v).count()
    }

    // ------------------------------------------------------------------
    // DFS structure accessors
    // ------------------------------------------------------------------

    pub fn parent(&self, v: VertexId) -> VertexId {
        self.vertices[v].parent
    }

    pub fn is_dfs_tree_root(&self, v: VertexId) -> bool {
        self.vertices[v].parent == NIL
    }

    pub fn is_virtual(&self, v: VertexId) -> bool {
        v >= self.n
    }

    /// The DFS child that names the bicomp rooted at virtual vertex `r`.
    pub fn dfs_child_from_root(&self, r: VertexId) -> VertexId {
        debug_assert!(self.is_virtual(r));
        r - self.n
    }

    /// The primary vertex that virtual vertex `r` is a copy of.
    pub fn primary_from_root(&self, r: VertexId) -> VertexId {
        self.vertices[self.dfs_child_from_root(r)].parent
    }

    /// The vertex's number outside the embedder. Identity except while the
    /// embedder has the graph renumbered by DFS index.
    pub fn vertex_index(&self, v: VertexId) -> usize {
        self.vertices[v].index
    }

    // ------------------------------------------------------------------
    // External face
    // ------------------------------------------------------------------

    pub fn ext_face(&self, v: VertexId, link: usize) -> VertexId {
        self.vertices[v].ext_face[link]
    }

    /// Steps to the next vertex along the external face.
    ///
    /// `prev_link` names the link of `cur` that points at its predecessor;
    /// the step leaves through the other one. On return `prev_link` names the
    /// link of the new vertex that points back at `cur`. When both links of
    /// the new vertex agree (a single-edge bicomp, consistently oriented),
    /// `prev_link` is left as it was.
    pub fn next_ext_face(&self, cur: VertexId, prev_link: &mut usize) -> VertexId {
        let next = self.vertices[cur].ext_face[1 ^ *prev_link];
        let nf = &self.vertices[next].ext_face;
        if nf[0] != nf[1] {
            *prev_link = if nf[0] == cur { 0 } else { 1 };
        }
        next
    }

    // ------------------------------------------------------------------
    // Scratch state
    // ------------------------------------------------------------------

    pub(crate) fn visited_info(&self, v: VertexId) -> usize {
        self.vertices[v].visited_info
    }

    pub(crate) fn set_visited_info(&mut self, v: VertexId, info: usize) {
        self.vertices[v].visited_info = info;
    }

    pub(crate) fn visited(&self, v: VertexId) -> bool {
        self.vertices[v].visited
    }

    pub(crate) fn set_visited(&mut self, v: VertexId) {
        self.vertices[v].visited = true;
    }

    pub(crate) fn clear_visited(&mut self) {
        for v in &mut self.vertices {
            v.visited = false;
        }
    }

    /// The walkdown's merge stack, a sequence of
    /// `(parent, parent link, bicomp root, child link)` 4-tuples.
    pub(crate) fn merge_stack(&self) -> &[usize] {
        &self.stack
    }

    // ------------------------------------------------------------------
    // Adjacency surgery
    // ------------------------------------------------------------------

    /// Inserts arc `e` at the `end` (0 front, 1 back) of `v`'s list.
    pub(crate) fn link_arc_end(&mut self, v: VertexId, e: usize, end: usize) {
        debug_assert!(end < 2);
        let [first, last] = self.vertices[v].link;
        if first == NIL {
            self.vertices[v].link = [e, e];
            self.arcs[e].link = [NIL, NIL];
        } else if end == 0 {
            self.arcs[e].link = [first, NIL];
            self.arcs[first].link[1] = e;
            self.vertices[v].link[0] = e;
        } else {
            self.arcs[e].link = [NIL, last];
            self.arcs[last].link[0] = e;
            self.vertices[v].link[1] = e;
        }
    }

    pub(crate) fn unlink_arc(&mut self, v: VertexId, e: usize) {
        let [next, prev] = self.arcs[e].link;
        if prev == NIL {
            self.vertices[v].link[0] = next;
        } else {
            self.arcs[prev].link[0] = next;
        }
        if next == NIL {
            self.vertices[v].link[1] = prev;
        } else {
            self.arcs[next].link[1] = prev;
        }
        self.arcs[e].link = [NIL, NIL];
    }

    /// Reverses the rotation order of `v`'s adjacency list.
    pub(crate) fn invert_vertex(&mut self, v: VertexId) {
        let mut e = self.vertices[v].link[0];
        while e != NIL {
            self.arcs[e].link.swap(0, 1);
            // After the swap the old successor sits in link[1].
            e = self.arcs[e].link[1];
        }
        self.vertices[v].link.swap(0, 1);
    }

    /// Splices the whole adjacency list of `src` into `dst` at `dst`'s `end`,
    /// rewriting the twin arcs so their far ends name `dst`.
    pub(crate) fn merge_adjacency(&mut self, dst: VertexId, end: usize, src: VertexId) {
        let mut e = self.vertices[src].link[0];
        while e != NIL {
            self.arcs[e ^ 1].neighbor = dst;
            e = self.arcs[e].link[0];
        }
        let [sf, sl] = self.vertices[src].link;
        let [df, dl] = self.vertices[dst].link;
        self.vertices[src].link = [NIL, NIL];
        if sf == NIL {
            return;
        }
        if df == NIL {
            self.vertices[dst].link = [sf, sl];
        } else if end == 0 {
            self.arcs[sl].link[0] = df;
            self.arcs[df].link[1] = sl;
            self.vertices[dst].link = [sf, dl];
        } else {
            self.arcs[dl].link[0] = sf;
            self.arcs[sf].link[1] = dl;
            self.vertices[dst].link = [df, sl];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_iterate_edges() {
        let mut g = Graph::new(4);
        let e0 = g.add_edge(0, 1).unwrap();
        let e1 = g.add_edge(0, 2).unwrap();
        let e2 = g.add_edge(2, 3).unwrap();
        assert_eq!((e0, e1, e2), (0, 1, 2));
        assert_eq!(g.edge_count(), 3);
        assert_eq!(
            g.neighbors(0).collect::<Vec<_>>(),
            vec![(0, 1), (1, 2)]
        );
        assert_eq!(g.neighbors(3).collect::<Vec<_>>(), vec![(2, 2)]);
        assert_eq!(g.arc_owner(2 * e2), 2);
        assert_eq!(g.twin(4), 5);
    }

    #[test]
    fn rejects_bad_edges() {
        let mut g = Graph::new(3);
        assert!(g.add_edge(0, 0).is_err());
        assert!(g.add_edge(0, 7).is_err());
        g.add_edge(0, 1).unwrap();
        assert!(g.add_edge(1, 0).is_err());
    }

    #[test]
    fn delete_edge_leaves_hole() {
        let mut g = Graph::new(3);
        g.add_edge(0, 1).unwrap();
        let e = g.add_edge(1, 2).unwrap();
        g.delete_edge(e).unwrap();
        assert_eq!(g.edge_count(), 1);
        assert!(!g.edge_in_use(e));
        assert_eq!(g.edge_ids().collect::<Vec<_>>(), vec![0]);
        assert_eq!(g.degree(1), 1);
        assert!(g.delete_edge(e).is_err());
    }

    #[test]
    fn invert_reverses_rotation() {
        let mut g = Graph::new(4);
        g.add_edge(0, 1).unwrap();
        g.add_edge(0, 2).unwrap();
        g.add_edge(0, 3).unwrap();
        g.invert_vertex(0);
        let order: Vec<_> = g.neighbors(0).map(|(_, w)| w).collect();
        assert_eq!(order, vec![3, 2, 1]);
    }

    #[test]
    fn reinitialize_clears_edges() {
        let mut g = Graph::new(3);
        g.add_edge(0, 1).unwrap();
        g.reinitialize().unwrap();
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.degree(0), 0);
        g.add_edge(0, 2).unwrap();
        assert_eq!(g.edge_count(), 1);
    }
}
