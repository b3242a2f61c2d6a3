//! The visibility-representation builder.
//!
//! The drawing context rides along with the graph as a registered extension.
//! While the embedder runs it only collects ordering hints: a *tie* marks a
//! DFS child whose side of its parent is not yet known, parked on the two
//! external face vertices that will meet when the answer becomes knowable,
//! and resolved into a *between*/*beyond* verdict when the walkdown passes
//! one of them. After a planar embedding the position resolvers turn those
//! verdicts into rows, columns, and spans.

use crate::extension::ExtensionId;
use crate::graph::embed::EmbeddingObserver;
use crate::graph::Graph;
use crate::{EdgeId, GraphError, VertexId, NIL};

mod check;
mod coords;
mod position;
mod render;

pub use coords::CoordsParseError;
pub(crate) use coords::DRAWING_EXTENSION_NAME;
pub(crate) use position::compute_visibility;

/// Final coordinates of one segment of the diagram.
///
/// For a vertex: `pos` is its row, `start..=end` its column span. For an
/// edge: `pos` is its column, `start..=end` its row span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SegmentCoords {
    pub pos: usize,
    pub start: usize,
    pub end: usize,
}

/// Where a vertex sits relative to its DFS parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DrawingFlag {
    /// On the far side of the parent relative to the recorded ancestor. The
    /// initial state, so children of a DFS root land below it.
    Beyond,
    /// Undecided; must be resolved before positions are assigned.
    Tie,
    /// Between the parent and the recorded ancestor.
    Between,
    /// Resolved: directly below the parent.
    Below,
    /// Resolved: directly above the parent.
    Above,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DrawVertexInfo {
    pub pos: usize,
    pub start: usize,
    pub end: usize,
    pub flag: DrawingFlag,
    pub ancestor: usize,
    pub ancestor_child: usize,
    /// Pending tie markers, one per external face direction. Each is NIL or
    /// the DFS child whose position the marker will decide.
    pub tie: [usize; 2],
}

impl DrawVertexInfo {
    fn new() -> Self {
        DrawVertexInfo {
            pos: 0,
            start: 0,
            end: 0,
            flag: DrawingFlag::Beyond,
            ancestor: NIL,
            ancestor_child: NIL,
            tie: [NIL; 2],
        }
    }

    pub fn coords(&self) -> SegmentCoords {
        SegmentCoords {
            pos: self.pos,
            start: self.start,
            end: self.end,
        }
    }
}

/// Per-graph drawing state: one record per primary vertex and one per arc
/// slot (the two twin copies of an edge stay identical).
#[derive(Debug, Clone)]
pub struct DrawingContext {
    #[allow(unused)]
    pub(crate) id: ExtensionId,
    pub(crate) vi: Vec<DrawVertexInfo>,
    pub(crate) e: Vec<SegmentCoords>,
    /// Set once the resolvers have produced valid coordinates.
    pub(crate) ready: bool,
}

impl DrawingContext {
    pub(crate) fn new(id: ExtensionId, n: usize, arc_bound: usize) -> Result<Self, GraphError> {
        let mut ctx = DrawingContext {
            id,
            vi: Vec::new(),
            e: Vec::new(),
            ready: false,
        };
        ctx.reset(n, arc_bound)?;
        Ok(ctx)
    }

    /// Drops any previous drawing and sizes the records for a graph with `n`
    /// vertices and `arc_bound` arc slots.
    pub(crate) fn reset(&mut self, n: usize, arc_bound: usize) -> Result<(), GraphError> {
        self.ready = false;
        self.vi.clear();
        self.vi.try_reserve_exact(n)?;
        self.vi.resize(n, DrawVertexInfo::new());
        self.e.clear();
        self.e.try_reserve_exact(arc_bound)?;
        self.e.resize(arc_bound, SegmentCoords::default());
        Ok(())
    }

    /// Rewrites vertex references through the host's index map and permutes
    /// the vertex records to match, for when the host renumbers its vertices
    /// after embedding. In place, cycle by cycle, with the host's visited
    /// flags marking slots that already hold their final record. Running it
    /// when the index map is the identity changes nothing.
    pub(crate) fn renumber_records(&mut self, g: &mut Graph) {
        let n = g.vertex_count();
        for v in 0..n {
            let rec = &mut self.vi[v];
            if rec.ancestor != NIL {
                rec.ancestor = g.vertex_index(rec.ancestor);
                rec.ancestor_child = g.vertex_index(rec.ancestor_child);
            }
        }
        g.clear_visited();
        for v in 0..n {
            if g.visited(v) {
                continue;
            }
            let mut target = g.vertex_index(v);
            while !g.visited(v) {
                self.vi.swap(v, target);
                g.set_visited(target);
                target = g.vertex_index(target);
            }
        }
    }
}

impl EmbeddingObserver for DrawingContext {
    /// Records, for every bicomp merge about to happen, that the root's DFS
    /// child is tied: its side of the parent depends on which way the
    /// walkdown later leaves the merge point. The marker goes on the two
    /// vertices that will sit on either side of the merge point on the new
    /// external face, in the link slots facing each other.
    fn collect_drawing_data(&mut self, g: &Graph, _root_vertex: usize, _w: usize, _w_prev_link: usize) {
        for tuple in g.merge_stack().chunks_exact(4) {
            let &[parent, parent_link, bicomp_root, child_link] = tuple else {
                unreachable!()
            };
            let dfs_child = g.dfs_child_from_root(bicomp_root);

            // The descendant adjacent to the merge point after the merge is
            // the first external face vertex on the side the walkdown is not
            // taking. One step suffices: the face was short-circuited when
            // this bicomp was built.
            let mut dir = child_link;
            let descendant = g.next_ext_face(bicomp_root, &mut dir);

            self.vi[dfs_child].flag = DrawingFlag::Tie;
            self.vi[descendant].tie[dir] = dfs_child;
            self.vi[parent].tie[parent_link] = dfs_child;
        }
    }

    /// The walkdown moved past an inactive vertex, so that vertex is leaving
    /// the external face and must lie between its face successor and the
    /// step vertex. If the pair carries a tie marker, that knowledge fixes
    /// the marked child: below the lower endpoint of the pair, either
    /// between it and the step vertex or beyond it, depending on which
    /// endpoint is the DFS ancestor.
    fn break_tie(
        &mut self,
        g: &Graph,
        bicomp_root: usize,
        w: usize,
        w_prev_link: usize,
    ) -> Result<(), GraphError> {
        let mut pred_link = 1 ^ w_prev_link;
        let w_pred = g.next_ext_face(w, &mut pred_link);

        // Ties only live between real vertices of one bicomp.
        if g.is_virtual(w) || g.is_virtual(w_pred) {
            return Ok(());
        }

        let marker = self.vi[w].tie[w_prev_link];
        if marker != self.vi[w_pred].tie[pred_link] {
            return Err(GraphError::ContractViolation(
                "tie markers disagree across an external face edge",
            ));
        }
        if marker == NIL {
            return Ok(());
        }

        let child = marker;
        self.vi[child].ancestor_child = g.dfs_child_from_root(bicomp_root);
        self.vi[child].ancestor = g.primary_from_root(bicomp_root);
        // Ancestors carry smaller DFS numbers than their descendants.
        self.vi[child].flag = if w < w_pred {
            DrawingFlag::Between
        } else {
            DrawingFlag::Beyond
        };
        self.vi[w].tie[w_prev_link] = NIL;
        self.vi[w_pred].tie[pred_link] = NIL;
        Ok(())
    }
}

impl Graph {
    /// Attaches the drawing extension. Every later [`Graph::embed`] that
    /// finds the graph planar also computes a visibility representation.
    /// Attaching twice is a no-op.
    pub fn attach_drawing(&mut self) -> Result<(), GraphError> {
        if self.draw.is_none() {
            let id = crate::extension::register(DRAWING_EXTENSION_NAME);
            let ctx = DrawingContext::new(id, self.vertex_count(), self.arcs.len())?;
            self.draw = Some(ctx);
        }
        Ok(())
    }

    /// Detaches the drawing extension, dropping any computed drawing.
    /// Returns whether it was attached.
    pub fn detach_drawing(&mut self) -> bool {
        self.draw.take().is_some()
    }

    pub fn drawing_attached(&self) -> bool {
        self.draw.is_some()
    }

    /// Whether a finished drawing is available.
    pub fn drawing_ready(&self) -> bool {
        self.draw.as_ref().is_some_and(|ctx| ctx.ready)
    }

    pub(crate) fn drawing(&self) -> Result<&DrawingContext, GraphError> {
        match &self.draw {
            Some(ctx) if ctx.ready => Ok(ctx),
            Some(_) => Err(GraphError::UnsupportedInput(
                "no drawing computed; embed a planar graph first",
            )),
            None => Err(GraphError::UnsupportedInput("drawing extension not attached")),
        }
    }

    /// Row and column span of a vertex in the finished drawing.
    pub fn vertex_drawing(&self, v: VertexId) -> Result<SegmentCoords, GraphError> {
        let ctx = self.drawing()?;
        if v >= self.vertex_count() {
            return Err(GraphError::UnsupportedInput("vertex out of range"));
        }
        Ok(ctx.vi[v].coords())
    }

    /// Column and row span of an edge in the finished drawing.
    pub fn edge_drawing(&self, e: EdgeId) -> Result<SegmentCoords, GraphError> {
        let ctx = self.drawing()?;
        if !self.edge_in_use(e) {
            return Err(GraphError::UnsupportedInput("no such edge"));
        }
        Ok(ctx.e[2 * e])
    }
}
