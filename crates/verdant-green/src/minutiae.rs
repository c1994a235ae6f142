use crate::green::{MinutiaePayload, Payload, node_view};
use crate::{GreenNode, SyntaxKind};

node_view! {
    /// One piece of trivia: literal text, or a wrapped subtree that could not
    /// be placed in the grammar.
    GreenMinutiae
}

fn text_minutiae(kind: SyntaxKind, text: &str) -> GreenMinutiae {
    GreenMinutiae::cast_unchecked(GreenNode::alloc(
        kind,
        Box::default(),
        false,
        Payload::Minutiae(MinutiaePayload::Text(text.into())),
    ))
}

pub fn create_whitespace_minutiae(text: &str) -> GreenMinutiae {
    text_minutiae(SyntaxKind::WHITESPACE_MINUTIAE, text)
}

pub fn create_end_of_line_minutiae(text: &str) -> GreenMinutiae {
    text_minutiae(SyntaxKind::END_OF_LINE_MINUTIAE, text)
}

pub fn create_comment_minutiae(text: &str) -> GreenMinutiae {
    text_minutiae(SyntaxKind::COMMENT_MINUTIAE, text)
}

/// Wraps `invalid_node` so it can travel as trivia. Its source text, trivia
/// included, becomes the minutiae's text.
pub fn create_invalid_node_minutiae(invalid_node: impl Into<GreenNode>) -> GreenMinutiae {
    GreenMinutiae::cast_unchecked(GreenNode::alloc(
        SyntaxKind::INVALID_NODE_MINUTIAE,
        Box::default(),
        false,
        Payload::Minutiae(MinutiaePayload::InvalidNode(invalid_node.into())),
    ))
}

impl GreenMinutiae {
    fn minutiae_payload(&self) -> &MinutiaePayload {
        match self.payload() {
            Payload::Minutiae(minutiae) => minutiae,
            _ => unreachable!("`GreenMinutiae` over a non-minutiae payload"),
        }
    }

    /// Literal text of whitespace, end-of-line and comment minutiae.
    pub fn text(&self) -> Option<&str> {
        match self.minutiae_payload() {
            MinutiaePayload::Text(text) => Some(text),
            MinutiaePayload::InvalidNode(_) => None,
        }
    }

    /// The subtree wrapped by an invalid-node minutiae.
    pub fn invalid_node(&self) -> Option<&GreenNode> {
        match self.minutiae_payload() {
            MinutiaePayload::Text(_) => None,
            MinutiaePayload::InvalidNode(node) => Some(node),
        }
    }

    pub(crate) fn with_invalid_node(&self, node: GreenNode) -> Self {
        assert!(self.invalid_node().is_some(), "`{}` wraps no node", self.kind());
        create_invalid_node_minutiae(node)
    }
}
