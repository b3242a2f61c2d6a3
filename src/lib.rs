//! Visibility representations (horvert diagrams) of planar graphs.
//!
//! A visibility representation draws every vertex as a horizontal segment on
//! its own integer row and every edge as a vertical segment on its own integer
//! column, with each edge's column inside the horizontal span of both
//! endpoints and its row range spanning exactly between them. The coordinates
//! cannot be recovered from a finished combinatorial embedding in linear time,
//! so the builder listens to two events inside the edge-addition planar
//! embedder (bicomp merges and inactive-vertex passes), records ordering
//! hints, and resolves them into concrete coordinates once the embedding
//! succeeds.
//!
//! ```
//! use horvert::{Graph, Planarity};
//!
//! let mut g = Graph::new(3);
//! g.add_edge(0, 1).unwrap();
//! g.add_edge(1, 2).unwrap();
//! g.add_edge(2, 0).unwrap();
//! g.attach_drawing().unwrap();
//! assert_eq!(g.embed().unwrap(), Planarity::Planar);
//! g.check_drawing_integrity().unwrap();
//! print!("{}", g.render_drawing().unwrap());
//! ```

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod graph;
pub mod draw;

mod extension;
mod list_collection;

#[cfg(feature = "rand")]
pub mod random_graphs;

pub use draw::SegmentCoords;
pub use extension::ExtensionId;
pub use graph::{EdgeType, Graph, Planarity};

/// Vertex handle. Primary vertices are `0..n`; the embedder also addresses
/// virtual bicomp roots in `n..2n` while it runs.
pub type VertexId = usize;

/// Edge handle, as returned by [`Graph::add_edge`]. Edge `k` owns the twin
/// arc pair `2k` and `2k + 1`.
pub type EdgeId = usize;

/// "Not a vertex / not an arc" marker, distinguished from every valid handle.
pub(crate) const NIL: usize = usize::MAX;

#[derive(Debug)]
#[non_exhaustive]
pub enum GraphError {
    /// A hook ran outside its legal embedder state, a position tie survived to
    /// resolve time, or tie markers on the external face disagreed.
    ContractViolation(&'static str),
    /// The input cannot be drawn: deleted-edge holes in the embedding, or a
    /// drawing was requested for a graph that did not embed planar.
    UnsupportedInput(&'static str),
    /// An auxiliary structure could not be allocated. The graph itself is
    /// untouched, so the caller may reset and retry with a smaller input.
    Allocation,
    /// The finished coordinates violate an invariant of the representation.
    Integrity(&'static str),
    Parse(draw::CoordsParseError),
}

impl Display for GraphError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphError::ContractViolation(msg) => write!(f, "contract violation: {msg}"),
            GraphError::UnsupportedInput(msg) => write!(f, "unsupported input: {msg}"),
            GraphError::Allocation => write!(f, "allocation failure"),
            GraphError::Integrity(msg) => write!(f, "integrity failure: {msg}"),
            GraphError::Parse(pe) => write!(f, "{pe}"),
        }
    }
}

impl Error for GraphError {}

impl From<draw::CoordsParseError> for GraphError {
    fn from(pe: draw::CoordsParseError) -> Self {
        GraphError::Parse(pe)
    }
}

impl From<std::collections::TryReserveError> for GraphError {
    fn from(_: std::collections::TryReserveError) -> Self {
        GraphError::Allocation
    }
}
