//! Turns the hints collected during embedding into rows, columns, and spans.
//!
//! Runs while the graph is still numbered by DFS index, right after the
//! bicomps are oriented and joined.

use crate::graph::{EdgeType, Graph};
use crate::list_collection::ListCollection;
use crate::{GraphError, NIL};

use super::{DrawingContext, DrawingFlag};

/// Generator marker for DFS tree roots, distinct from "none" and from every
/// arc id, so a root's neighbors never record an arc into the root's slot.
const ROOT_GENERATOR: usize = NIL - 1;

pub(crate) fn compute_visibility(g: &mut Graph, ctx: &mut DrawingContext) -> Result<(), GraphError> {
    if !g.edge_holes.is_empty() {
        return Err(GraphError::UnsupportedInput(
            "embedding has deleted-edge holes; compact it before drawing",
        ));
    }
    compute_vertex_positions(g, ctx)?;
    compute_edge_positions(g, ctx)?;
    compute_vertex_ranges(g, ctx);
    compute_edge_ranges(g, ctx);
    ctx.ready = true;
    Ok(())
}

/// Assigns every vertex its row, one DFS tree at a time. The row counter
/// runs on across components so rows stay globally unique.
fn compute_vertex_positions(g: &mut Graph, ctx: &mut DrawingContext) -> Result<(), GraphError> {
    let mut vertpos = 0;
    for v in 0..g.vertex_count() {
        if g.is_dfs_tree_root(v) {
            compute_positions_in_component(g, ctx, v, &mut vertpos)?;
        }
    }
    debug_assert_eq!(vertpos, g.vertex_count());
    Ok(())
}

/// Pre-order traversal of one DFS tree, maintaining the full vertical order
/// of the vertices placed so far.
///
/// Every non-root vertex arrives marked *between* its parent and some
/// recorded ancestor, or *beyond* the parent relative to that ancestor. By
/// the time the vertex is visited, the recorded ancestor's DFS child (an
/// ancestor of this vertex, descendant of that ancestor) has already been
/// placed, and whether that child went above or below tells us which way the
/// parent faces the ancestor. That turns between/beyond into above/below in
/// constant time, and the vertex slots in immediately above or below its
/// parent in the order. A full online topological sort is not needed; this
/// special case is what the embedding-time bookkeeping bought.
fn compute_positions_in_component(
    g: &mut Graph,
    ctx: &mut DrawingContext,
    root: usize,
    vertpos: &mut usize,
) -> Result<(), GraphError> {
    let mut order = ListCollection::new(g.vertex_count())?;

    debug_assert!(g.stack.is_empty());
    g.stack.push(root);
    while let Some(w) = g.stack.pop() {
        let p = g.parent(w);
        if p == NIL {
            // The root sits alone in the order. Marking it "below" makes its
            // children, all defaulted to beyond, land below it in turn.
            let head = order.append(NIL, w);
            debug_assert_eq!(head, root);
            ctx.vi[w].flag = DrawingFlag::Below;
        } else {
            if ctx.vi[w].flag == DrawingFlag::Tie {
                g.stack.clear();
                return Err(GraphError::ContractViolation(
                    "vertex position tie left unresolved by the embedding",
                ));
            }
            let c = ctx.vi[w].ancestor_child;
            let resolved = if c == NIL || ctx.vi[c].flag == DrawingFlag::Below {
                // The ancestor is above the parent (or there is no recorded
                // ancestor and the default applies).
                if ctx.vi[w].flag == DrawingFlag::Between {
                    DrawingFlag::Above
                } else {
                    DrawingFlag::Below
                }
            } else {
                // The ancestor is below the parent, so the meanings swap.
                if ctx.vi[w].flag == DrawingFlag::Between {
                    DrawingFlag::Below
                } else {
                    DrawingFlag::Above
                }
            };
            ctx.vi[w].flag = resolved;
            if resolved == DrawingFlag::Below {
                order.insert_after(p, w);
            } else {
                order.insert_before(p, w);
            }
        }

        let mut e = g.first_arc(w);
        while e != NIL {
            if g.edge_type(e) == EdgeType::TreeChild {
                g.stack.push(g.neighbor(e));
            }
            e = g.next_arc(e);
        }
    }

    // Nothing is ever inserted above the root, so walking from it covers the
    // whole component top to bottom.
    let mut v = root;
    while v != NIL {
        ctx.vi[v].pos = *vertpos;
        *vertpos += 1;
        v = order.get_next(root, v);
    }
    Ok(())
}

/// Sweeps the embedding by increasing row, maintaining the left-to-right
/// order of edge columns in a list.
///
/// Each vertex remembers its *generator* arc, the first arc that reached it
/// from a vertex on an earlier row. When the sweep reaches a vertex, its own
/// edges to later rows are inserted directly after the generator's slot in
/// the column order, in rotation order around the vertex, which keeps the
/// columns crossing-free in one pass.
fn compute_edge_positions(g: &mut Graph, ctx: &mut DrawingContext) -> Result<(), GraphError> {
    let n = g.vertex_count();
    let mut vertex_order = vec![NIL; n];
    for v in 0..n {
        vertex_order[ctx.vi[v].pos] = v;
    }

    let mut edge_list = ListCollection::new(g.edge_id_bound())?;
    let mut head = NIL;

    for v in 0..n {
        g.set_visited_info(v, NIL);
    }

    for vpos in 0..n {
        let v = vertex_order[vpos];
        if g.is_dfs_tree_root(v) {
            // A component's root has the least row in the component, so all
            // of its edges open new columns at the right end of the order.
            // The false generator keeps neighbors from claiming a slot here.
            g.set_visited_info(v, ROOT_GENERATOR);
            let mut e = g.first_arc(v);
            while e != NIL {
                head = edge_list.append(head, g.edge_of(e));
                let nb = g.neighbor(e);
                if g.visited_info(nb) == NIL {
                    g.set_visited_info(nb, e);
                }
                e = g.next_arc(e);
            }
        } else {
            let generator = g.visited_info(v);
            if generator == NIL || generator == ROOT_GENERATOR {
                return Err(GraphError::Integrity("vertex reached without a generator edge"));
            }
            // The stored arc points at v; its twin is v's own side.
            let e = g.twin(generator);
            let mut insert_at = g.edge_of(e);
            let mut cur = g.next_arc_circular(e);
            while cur != e {
                let nb = g.neighbor(cur);
                if ctx.vi[nb].pos > vpos {
                    edge_list.insert_after(insert_at, g.edge_of(cur));
                    insert_at = g.edge_of(cur);
                    if g.visited_info(nb) == NIL {
                        g.set_visited_info(nb, cur);
                    }
                }
                cur = g.next_arc_circular(cur);
            }
        }
    }

    let mut epos = 0;
    let mut i = head;
    while i != NIL {
        ctx.e[2 * i].pos = epos;
        ctx.e[2 * i + 1].pos = epos;
        epos += 1;
        i = edge_list.get_next(head, i);
    }
    debug_assert_eq!(epos, g.edge_count());
    Ok(())
}

/// A vertex spans the columns of its incident edges. An isolated vertex has
/// nothing to span and collapses to column zero.
fn compute_vertex_ranges(g: &Graph, ctx: &mut DrawingContext) {
    for v in 0..g.vertex_count() {
        let mut e = g.first_arc(v);
        if e == NIL {
            ctx.vi[v].start = 0;
            ctx.vi[v].end = 0;
            continue;
        }
        let mut min = usize::MAX;
        let mut max = 0;
        while e != NIL {
            let pos = ctx.e[e].pos;
            min = min.min(pos);
            max = max.max(pos);
            e = g.next_arc(e);
        }
        ctx.vi[v].start = min;
        ctx.vi[v].end = max;
    }
}

/// An edge spans the rows of its endpoints; both twin copies stay equal.
fn compute_edge_ranges(g: &Graph, ctx: &mut DrawingContext) {
    for eid in g.edge_ids() {
        let u = g.neighbor(2 * eid + 1);
        let w = g.neighbor(2 * eid);
        let (pu, pw) = (ctx.vi[u].pos, ctx.vi[w].pos);
        let (start, end) = if pu < pw { (pu, pw) } else { (pw, pu) };
        for copy in [2 * eid, 2 * eid + 1] {
            ctx.e[copy].start = start;
            ctx.e[copy].end = end;
        }
    }
}
