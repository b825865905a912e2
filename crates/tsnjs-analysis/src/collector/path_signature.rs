//! Structural path signatures (spec.md §4.3): a concatenation of ancestor
//! AST-node-type tokens with array-index steps. Two distinct nodes produce
//! distinct signatures unless they occupy the same structural slot; the
//! signature changes under structural edits but survives textual edits
//! within a child body, since it encodes node kind + sibling position only,
//! never byte offsets.

#[derive(Debug, Clone, Default)]
pub struct PathBuilder {
    segments: Vec<String>,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a segment for a node reached at `index` among its parent's
    /// named children.
    pub fn pushed(&self, kind: &str, index: usize) -> Self {
        let mut next = self.clone();
        next.segments.push(format!("{kind}[{index}]"));
        next
    }

    pub fn signature(&self) -> String {
        self.segments.join(".")
    }
}
