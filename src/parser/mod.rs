//! Parser module — one processing unit in, an ordered node stream out.

pub mod infer;
pub mod merge;
pub mod segment;
pub mod tags;

use crate::error::{Diagnostic, Result};
use crate::model::DocNode;

/// Segment, tag-parse and merge one unit of source text.
///
/// Recovered defects are appended to `diags`; an unterminated doc comment
/// fails the whole unit.
pub fn parse_unit(source: &str, diags: &mut Vec<Diagnostic>) -> Result<Vec<DocNode>> {
    let segments = segment::segment(source)?;
    tracing::debug!(segments = segments.len(), "segmented unit");

    let nodes = segments
        .into_iter()
        .map(|seg| {
            let node = tags::parse_comment(&seg.comment, seg.line, diags);
            merge::merge(node, &seg.code)
        })
        .collect();
    Ok(nodes)
}
