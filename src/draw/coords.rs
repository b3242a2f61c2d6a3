//! The persisted coordinate block.
//!
//! A drawing travels as a text block bracketed by `<DrawPlanar>` and
//! `</DrawPlanar>`: one `id: pos start end` line per vertex, then one per
//! in-use edge, all zero based. The reader accepts exactly what the writer
//! produces and restores bit-identical records.

use std::error::Error;
use std::fmt::{Display, Formatter, Write};

use crate::graph::Graph;
use crate::{GraphError, SegmentCoords};

/// Registered name of the drawing extension, which also brackets its
/// coordinate block.
pub(crate) const DRAWING_EXTENSION_NAME: &str = "DrawPlanar";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum CoordsParseError {
    MissingStartTag,
    MissingEndTag,
    TruncatedBlock,
    BadRecord,
    /// A record line carried an id out of step with the graph's numbering.
    WrongId,
}

impl Display for CoordsParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "coordinate block parse error: {:?}", self)
    }
}

impl Error for CoordsParseError {}

impl Graph {
    /// Serializes the finished drawing as a coordinate block.
    pub fn write_drawing_coords(&self) -> Result<String, GraphError> {
        let ctx = self.drawing()?;
        if !self.edge_holes.is_empty() {
            return Err(GraphError::UnsupportedInput(
                "embedding has deleted-edge holes",
            ));
        }
        let mut out = String::new();
        let _ = writeln!(out, "<{DRAWING_EXTENSION_NAME}>");
        for v in 0..self.vertex_count() {
            let c = ctx.vi[v].coords();
            let _ = writeln!(out, "{}: {} {} {}", v, c.pos, c.start, c.end);
        }
        for eid in self.edge_ids() {
            let c = ctx.e[2 * eid];
            let _ = writeln!(out, "{}: {} {} {}", eid, c.pos, c.start, c.end);
        }
        let _ = writeln!(out, "</{DRAWING_EXTENSION_NAME}>");
        Ok(out)
    }

    /// Restores a drawing previously produced by
    /// [`Graph::write_drawing_coords`] for a graph with the same vertices
    /// and edges. The drawing extension must be attached.
    pub fn read_drawing_coords(&mut self, input: &str) -> Result<(), GraphError> {
        let n = self.vertex_count();
        let arc_bound = self.arcs.len();
        let edge_ids: Vec<usize> = self.edge_ids().collect();
        let Some(ctx) = self.draw.as_mut() else {
            return Err(GraphError::UnsupportedInput("drawing extension not attached"));
        };
        ctx.reset(n, arc_bound)?;

        let mut lines = input.lines();
        let start_tag = format!("<{DRAWING_EXTENSION_NAME}>");
        let end_tag = format!("</{DRAWING_EXTENSION_NAME}>");
        loop {
            match lines.next() {
                None => return Err(CoordsParseError::MissingStartTag.into()),
                Some(line) if line.trim() == start_tag => break,
                Some(_) => {}
            }
        }
        for v in 0..n {
            let line = lines.next().ok_or(CoordsParseError::TruncatedBlock)?;
            let (id, c) = parse_record(line)?;
            if id != v {
                return Err(CoordsParseError::WrongId.into());
            }
            ctx.vi[v].pos = c.pos;
            ctx.vi[v].start = c.start;
            ctx.vi[v].end = c.end;
        }
        for eid in edge_ids {
            let line = lines.next().ok_or(CoordsParseError::TruncatedBlock)?;
            let (id, c) = parse_record(line)?;
            if id != eid {
                return Err(CoordsParseError::WrongId.into());
            }
            ctx.e[2 * eid] = c;
            ctx.e[2 * eid + 1] = c;
        }
        match lines.next() {
            Some(line) if line.trim() == end_tag => {}
            _ => return Err(CoordsParseError::MissingEndTag.into()),
        }
        ctx.ready = true;
        Ok(())
    }
}

fn parse_record(line: &str) -> Result<(usize, SegmentCoords), CoordsParseError> {
    let (id_part, rest) = line.split_once(':').ok_or(CoordsParseError::BadRecord)?;
    let id = id_part
        .trim()
        .parse()
        .map_err(|_| CoordsParseError::BadRecord)?;
    let nums = rest
        .split_whitespace()
        .map(|tok| tok.parse::<usize>().map_err(|_| CoordsParseError::BadRecord))
        .collect::<Result<Vec<_>, _>>()?;
    let [pos, start, end] = nums[..] else {
        return Err(CoordsParseError::BadRecord);
    };
    Ok((id, SegmentCoords { pos, start, end }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Planarity;

    fn drawn_k4() -> Graph {
        let mut g = Graph::new(4);
        for u in 0..4 {
            for v in u + 1..4 {
                g.add_edge(u, v).unwrap();
            }
        }
        g.attach_drawing().unwrap();
        assert_eq!(g.embed().unwrap(), Planarity::Planar);
        g
    }

    #[test]
    fn block_round_trips_bit_identically() {
        let mut g = drawn_k4();
        let block = g.write_drawing_coords().unwrap();
        assert!(block.starts_with("<DrawPlanar>\n"));
        assert!(block.ends_with("</DrawPlanar>\n"));

        let saved_vi = g.draw.as_ref().unwrap().vi.clone();
        let saved_e = g.draw.as_ref().unwrap().e.clone();
        g.read_drawing_coords(&block).unwrap();
        let ctx = g.draw.as_ref().unwrap();
        for v in 0..4 {
            assert_eq!(ctx.vi[v].coords(), saved_vi[v].coords());
        }
        assert_eq!(ctx.e, saved_e);
        assert_eq!(g.write_drawing_coords().unwrap(), block);
        g.check_drawing_integrity().unwrap();
    }

    #[test]
    fn reader_rejects_garbage() {
        let mut g = drawn_k4();
        let block = g.write_drawing_coords().unwrap();

        assert!(matches!(
            g.read_drawing_coords("no tags here"),
            Err(GraphError::Parse(CoordsParseError::MissingStartTag))
        ));
        let truncated = &block[..block.len() - "</DrawPlanar>\n".len()];
        assert!(matches!(
            g.read_drawing_coords(truncated),
            Err(GraphError::Parse(CoordsParseError::MissingEndTag))
        ));
        let mangled = block.replace("0: ", "0 ");
        assert!(g.read_drawing_coords(&mangled).is_err());
        // A failed read leaves no usable drawing behind.
        assert!(!g.drawing_ready());
        g.read_drawing_coords(&block).unwrap();
        assert!(g.drawing_ready());
    }
}
