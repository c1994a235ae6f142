use verdant_errors::{Diagnostic, DiagnosticArg, DiagnosticCode};

use crate::GreenNode;

/// A copy of `node` with one more diagnostic. Children are shared.
pub fn add_diagnostic<A>(
    node: &GreenNode,
    code: DiagnosticCode,
    args: impl IntoIterator<Item = A>,
) -> GreenNode
where
    A: Into<DiagnosticArg>,
{
    add_diagnostics(node, vec![Diagnostic::new(code, args)])
}

/// A copy of `node` with `diagnostics` appended after its own. An empty list
/// returns `node` itself.
pub fn add_diagnostics(node: &GreenNode, diagnostics: Vec<Diagnostic>) -> GreenNode {
    if diagnostics.is_empty() {
        return node.clone();
    }

    tracing::trace!(kind = %node.kind(), count = diagnostics.len(), "attaching diagnostics");

    let merged = node.diagnostics().iter().cloned().chain(diagnostics).collect();
    node.set_diagnostics(merged)
}
