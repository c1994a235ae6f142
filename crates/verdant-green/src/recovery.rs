//! Grafting unparsable input into trivia.
//!
//! A parser that has to drop a subtree keeps its text by turning every token
//! of it into minutiae on a neighbouring token. The grammar shape is left
//! alone and the tree still reproduces its source exactly.

use verdant_errors::{DiagnosticArg, DiagnosticCode};

use crate::walk::{Edge, TokenPath};
use crate::{GreenNode, add_diagnostic, create_invalid_node_minutiae, create_node_list};

/// Prepends `invalid_node`, as minutiae, to the leading trivia of the first
/// token of `to_clone`, and attaches a diagnostic to that token.
#[track_caller]
pub fn clone_with_leading_invalid_node_minutiae<A>(
    to_clone: &GreenNode,
    invalid_node: &GreenNode,
    code: DiagnosticCode,
    args: impl IntoIterator<Item = A>,
) -> GreenNode
where
    A: Into<DiagnosticArg>,
{
    let _span = tracing::trace_span!("leading_invalid_node", kind = %to_clone.kind()).entered();

    let path = to_clone.token_path(Edge::First);
    let first = path.token;
    let mut leading = invalid_node_to_minutiae(invalid_node);
    leading.extend(first.leading_minutiae().iter().cloned());

    let token = first.modify_with(create_node_list(leading), first.trailing_minutiae().clone());
    graft(path, &token, code, args)
}

/// Appends `invalid_node`, as minutiae, to the trailing trivia of the last
/// token of `to_clone`, and attaches a diagnostic to that token.
#[track_caller]
pub fn clone_with_trailing_invalid_node_minutiae<A>(
    to_clone: &GreenNode,
    invalid_node: &GreenNode,
    code: DiagnosticCode,
    args: impl IntoIterator<Item = A>,
) -> GreenNode
where
    A: Into<DiagnosticArg>,
{
    let _span = tracing::trace_span!("trailing_invalid_node", kind = %to_clone.kind()).entered();

    let path = to_clone.token_path(Edge::Last);
    let last = path.token;
    let mut trailing = last.trailing_minutiae().iter().cloned().collect::<Vec<_>>();
    trailing.extend(invalid_node_to_minutiae(invalid_node));

    let token = last.modify_with(last.leading_minutiae().clone(), create_node_list(trailing));
    graft(path, &token, code, args)
}

/// Swaps in `new` at the position `path` leads to. Other occurrences of the
/// same token allocation elsewhere in the tree stay as they are.
fn graft<A>(
    path: TokenPath<'_>,
    new: &GreenNode,
    code: DiagnosticCode,
    args: impl IntoIterator<Item = A>,
) -> GreenNode
where
    A: Into<DiagnosticArg>,
{
    let new = add_diagnostic(new, code, args);
    tracing::trace!(token = %path.token.kind(), %code, "grafting invalid node");
    path.replace_token(new)
}

/// Each present token becomes its own leading trivia, the bare token wrapped
/// as invalid-node minutiae, then its trailing trivia.
fn invalid_node_to_minutiae(invalid_node: &GreenNode) -> Vec<GreenNode> {
    let tokens = match invalid_node.as_token() {
        Some(token) => vec![token],
        None => invalid_node.tokens().collect(),
    };

    let mut minutiae = Vec::new();
    for token in tokens.into_iter().filter(|token| !token.is_missing()) {
        minutiae.extend(token.leading_minutiae().iter().cloned());
        minutiae.push(create_invalid_node_minutiae(token.without_minutiae()).into_node());
        minutiae.extend(token.trailing_minutiae().iter().cloned());
    }
    minutiae
}
