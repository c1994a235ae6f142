//! Event-driven construction of green trees.

use verdant_errors::Diagnostic;

use crate::{
    GreenNode, GreenToken, IntoChild, SyntaxKind, create_missing_token, create_node_list,
    missing_token_code,
};

#[derive(Debug, Clone, Copy)]
enum Opened {
    Node(SyntaxKind),
    List,
}

/// Marks a position among the children of the current node so a later
/// [`Builder::start_node_at`] can wrap everything added since.
#[derive(Debug, Clone, Copy)]
pub struct Checkpoint(usize);

/// Builds a green tree from parser events.
///
/// Composite nodes collect one child per slot, absent slots included, and are
/// checked against the kind's arity when finished.
#[derive(Debug, Default)]
pub struct Builder {
    opened: Vec<(Opened, usize)>,
    children: Vec<Option<GreenNode>>,
}

impl Drop for Builder {
    fn drop(&mut self) {
        if !std::thread::panicking() && !self.opened.is_empty() {
            panic!("you should call `Builder::finish()`");
        }
    }
}

const DEFAULT_TREE_DEPTH: usize = 128;
const DEFAULT_CHILDREN_LEN: usize = 64;

impl Builder {
    pub fn new() -> Self {
        Self {
            opened: Vec::with_capacity(DEFAULT_TREE_DEPTH),
            children: Vec::with_capacity(DEFAULT_CHILDREN_LEN),
        }
    }

    /// Starts a composite node of the given kind.
    #[track_caller]
    pub fn start_node(&mut self, kind: SyntaxKind) {
        assert!(kind.is_node(), "`{kind}` is not a composite kind");
        self.opened.push((Opened::Node(kind), self.children.len()));
    }

    /// Starts a node list in the current slot.
    pub fn start_list(&mut self) {
        self.opened.push((Opened::List, self.children.len()));
    }

    /// Fills the next slot with a token.
    pub fn token(&mut self, token: GreenToken) {
        self.children.push(Some(token.into_node()));
    }

    /// Fills the next slot with an already built subtree, or leaves it absent
    /// for `None`.
    pub fn node(&mut self, node: impl IntoChild) {
        self.children.push(node.into_child());
    }

    /// Leaves the next optional slot absent.
    pub fn absent(&mut self) {
        self.children.push(None);
    }

    /// Fills the next slot with a missing token carrying the usual diagnostic
    /// for `kind`.
    pub fn missing_token(&mut self, kind: SyntaxKind) {
        let diagnostic = Diagnostic::from_code(missing_token_code(kind));
        self.token(create_missing_token(kind, vec![diagnostic]));
    }

    #[track_caller]
    fn pop_opened(&mut self) -> (Opened, Vec<Option<GreenNode>>) {
        let (opened, first_child) = self.opened.pop().expect("no opened nodes?");
        (opened, self.children.drain(first_child..).collect())
    }

    /// Finishes the most recently started node.
    #[track_caller]
    pub fn finish_node(&mut self) {
        let (opened, children) = self.pop_opened();
        let Opened::Node(kind) = opened else {
            panic!("expected an opened node, found an opened list");
        };
        self.children.push(Some(GreenNode::new_node(kind, children)));
    }

    /// Finishes the most recently started list.
    #[track_caller]
    pub fn finish_list(&mut self) {
        let (opened, children) = self.pop_opened();
        let Opened::List = opened else {
            panic!("expected an opened list, found an opened node");
        };
        let elements = children
            .into_iter()
            .map(|child| child.expect("node lists cannot hold absent elements"));
        self.children.push(Some(create_node_list(elements).into_node()));
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.children.len())
    }

    /// Wraps everything added since `checkpoint` in a new node of `kind` and
    /// makes it current.
    #[track_caller]
    pub fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        let Checkpoint(checkpoint) = checkpoint;
        assert!(
            checkpoint <= self.children.len(),
            "checkpoint no longer valid, was `finish_node` called early?"
        );
        if let Some(&(_, first_child)) = self.opened.last() {
            assert!(
                checkpoint >= first_child,
                "checkpoint no longer valid, was an unmatched `start_node` called?"
            );
        }
        assert!(kind.is_node(), "`{kind}` is not a composite kind");
        self.opened.push((Opened::Node(kind), checkpoint));
    }

    /// Finishes building and returns the root.
    #[track_caller]
    pub fn finish(mut self) -> GreenNode {
        assert!(self.opened.is_empty(), "unfinished nodes: {:?}", self.opened);
        assert_eq!(self.children.len(), 1, "expected a single root");
        let root = self.children.pop().flatten().expect("the root cannot be absent");

        tracing::debug!(
            kind = %root.kind(),
            width = u32::from(root.full_width()),
            has_diagnostics = root.has_diagnostics(),
            "finished tree"
        );
        root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GreenNodeList, create_identifier_token, create_token, make};

    fn ident(text: &str) -> GreenToken {
        create_identifier_token(text, GreenNodeList::empty(), GreenNodeList::empty())
    }

    #[test]
    fn builds_the_same_tree_as_make() {
        let mut builder = Builder::new();
        builder.start_node(SyntaxKind::RETURN_STATEMENT);
        builder.token(create_token(SyntaxKind::RETURN_KEYWORD));
        builder.start_node(SyntaxKind::SIMPLE_NAME_REFERENCE);
        builder.token(ident("x"));
        builder.finish_node();
        builder.missing_token(SyntaxKind::SEMICOLON_TOKEN);
        builder.finish_node();
        let built = builder.finish();

        assert_eq!(built.kind(), SyntaxKind::RETURN_STATEMENT);
        assert_eq!(built.to_source_code(), "returnx");
        assert!(built.has_diagnostics());
        let semicolon = built.slot("semicolon_token").map(GreenNode::to_token);
        assert!(semicolon.is_some_and(|it| it.is_missing()));

        let expected = make::return_statement(
            create_token(SyntaxKind::RETURN_KEYWORD),
            make::simple_name_reference(ident("x")),
            create_missing_token(
                SyntaxKind::SEMICOLON_TOKEN,
                vec![Diagnostic::from_code(missing_token_code(SyntaxKind::SEMICOLON_TOKEN))],
            ),
        );
        assert_eq!(built, expected);
    }

    #[test]
    fn lists_and_absent_slots() {
        let mut builder = Builder::new();
        builder.start_node(SyntaxKind::RETURN_STATEMENT);
        builder.token(create_token(SyntaxKind::RETURN_KEYWORD));
        builder.absent();
        builder.token(create_token(SyntaxKind::SEMICOLON_TOKEN));
        builder.finish_node();
        let statement = builder.finish();

        let mut builder = Builder::new();
        builder.start_list();
        builder.node(&statement);
        builder.node(&statement);
        builder.finish_list();
        let list = builder.finish();

        assert_eq!(statement.child_in_bucket(1), None);
        assert_eq!(list.bucket_count(), 2);
        assert_eq!(list.to_source_code(), "return;return;");
    }

    #[test]
    fn wrap_at_checkpoint() {
        let mut builder = Builder::new();
        let checkpoint = builder.checkpoint();
        builder.start_node(SyntaxKind::SIMPLE_NAME_REFERENCE);
        builder.token(ident("a"));
        builder.finish_node();
        builder.start_node_at(checkpoint, SyntaxKind::BINARY_EXPRESSION);
        builder.token(create_token(SyntaxKind::PLUS_TOKEN));
        builder.start_node(SyntaxKind::SIMPLE_NAME_REFERENCE);
        builder.token(ident("b"));
        builder.finish_node();
        builder.finish_node();
        let tree = builder.finish();

        assert_eq!(tree.kind(), SyntaxKind::BINARY_EXPRESSION);
        assert_eq!(tree.to_source_code(), "a+b");
    }

    #[test]
    #[should_panic = "`RETURN_STATEMENT` expects 3 children"]
    fn arity_is_checked() {
        let mut builder = Builder::new();
        builder.start_node(SyntaxKind::RETURN_STATEMENT);
        builder.token(create_token(SyntaxKind::RETURN_KEYWORD));
        builder.finish_node();
    }

    #[test]
    #[should_panic = "you should call `Builder::finish()`"]
    fn unfinished_builder() {
        let mut builder = Builder::new();
        builder.start_node(SyntaxKind::POSITIONAL_ARG);
    }
}
