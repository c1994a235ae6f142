//! Structural-sharing replacement.
//!
//! Only the nodes on a path from the root to an occurrence of the target are
//! rebuilt; every other subtree is the same allocation in the old and the new
//! tree. The walk is generic over child buckets, so no kind needs its own
//! case. It also reaches into token trivia and into the subtrees wrapped by
//! invalid-node minutiae.

use crate::green::{MinutiaePayload, Payload};
use crate::{GreenNode, GreenNodeList, GreenToken};

/// Replaces every occurrence of `target` (by identity) under `current`.
///
/// `None` in gives `None` out; a tree that does not contain `target` comes
/// back as the same allocation.
pub fn replace(
    current: Option<&GreenNode>,
    target: &GreenNode,
    replacement: &GreenNode,
) -> Option<GreenNode> {
    current.map(|current| current.replace(target, replacement))
}

impl GreenNode {
    /// The tree with `target` replaced, or `self` when nothing matched.
    pub fn replace(&self, target: &Self, replacement: &Self) -> Self {
        self.try_replace(target, replacement).unwrap_or_else(|| self.clone())
    }

    /// Like [`GreenNode::replace`], but `Some` only if something changed.
    pub fn try_replace(&self, target: &Self, replacement: &Self) -> Option<Self> {
        if target.ptr_eq(replacement) {
            return None;
        }

        let _span =
            tracing::trace_span!("replace", root = %self.kind(), target = %target.kind()).entered();
        replace_in(self, target, replacement)
    }
}

fn replace_in(current: &GreenNode, target: &GreenNode, replacement: &GreenNode) -> Option<GreenNode> {
    if current.ptr_eq(target) {
        return Some(replacement.clone());
    }

    match current.payload() {
        Payload::Node(_) | Payload::List(_) => replace_in_children(current, target, replacement),
        Payload::Token(_) => replace_in_trivia(current.to_token(), target, replacement),
        Payload::Minutiae(MinutiaePayload::InvalidNode(node)) => {
            let node = replace_in(node, target, replacement)?;
            Some(current.to_minutiae().with_invalid_node(node).into_node())
        }
        Payload::Minutiae(MinutiaePayload::Text(_)) => None,
    }
}

fn replace_in_children(
    current: &GreenNode,
    target: &GreenNode,
    replacement: &GreenNode,
) -> Option<GreenNode> {
    let mut children: Option<Vec<Option<GreenNode>>> = None;

    for (index, child) in current.child_buckets().enumerate() {
        let Some(child) = child else { continue };
        if let Some(new_child) = replace_in(child, target, replacement) {
            let children = children
                .get_or_insert_with(|| current.child_buckets().map(|it| it.cloned()).collect());
            children[index] = Some(new_child);
        }
    }

    let children = children?;
    tracing::trace!(kind = %current.kind(), "rebuilding");
    Some(current.with_children(children))
}

fn replace_in_trivia(
    token: &GreenToken,
    target: &GreenNode,
    replacement: &GreenNode,
) -> Option<GreenNode> {
    let leading = replace_in(token.leading_minutiae(), target, replacement);
    let trailing = replace_in(token.trailing_minutiae(), target, replacement);
    if leading.is_none() && trailing.is_none() {
        return None;
    }

    let leading = leading.map_or_else(|| token.leading_minutiae().clone(), |it| into_trivia_list(&it));
    let trailing = trailing.map_or_else(|| token.trailing_minutiae().clone(), |it| into_trivia_list(&it));
    tracing::trace!(kind = %token.kind(), "rebuilding trivia");
    Some(token.modify_with(leading, trailing).into_node())
}

#[track_caller]
fn into_trivia_list(node: &GreenNode) -> GreenNodeList {
    match node.as_list() {
        Some(list) => list.clone(),
        None => panic!("token trivia must be a node list, found `{}`", node.kind()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        SyntaxKind, create_comment_minutiae, create_identifier_token, create_invalid_node_minutiae,
        create_node_list, create_token, make,
    };

    fn ident(text: &str) -> GreenToken {
        create_identifier_token(text, GreenNodeList::empty(), GreenNodeList::empty())
    }

    #[test]
    fn replaces_a_child() {
        let t1 = ident("x");
        let t2 = ident("y");
        let tree = make::simple_name_reference(&t1);

        let result = tree.replace(&t1, &t2);

        assert!(!result.ptr_eq(&tree));
        assert_eq!(result.kind(), SyntaxKind::SIMPLE_NAME_REFERENCE);
        assert!(result.child_in_bucket(0).is_some_and(|it| it.ptr_eq(&t2)));
        assert!(tree.child_in_bucket(0).is_some_and(|it| it.ptr_eq(&t1)));
    }

    #[test]
    fn list_elements_are_shared() {
        let [a, b, c, b2] = ["a", "b", "c", "b2"].map(|it| ident(it).into_node());
        let list = create_node_list([a.clone(), b.clone(), c.clone()]);

        let result = list.replace(&b, &b2);
        let result = result.to_list();

        assert_eq!(result.len(), 3);
        assert!(result.get(0).is_some_and(|it| it.ptr_eq(&a)));
        assert!(result.get(1).is_some_and(|it| it.ptr_eq(&b2)));
        assert!(result.get(2).is_some_and(|it| it.ptr_eq(&c)));
    }

    #[test]
    fn absent_target_is_a_no_op() {
        let tree = make::positional_arg(make::simple_name_reference(ident("x")));
        let stranger = ident("x");

        assert!(tree.replace(&stranger, &ident("y")).ptr_eq(&tree));
        assert!(tree.try_replace(&stranger, &ident("y")).is_none());
        assert!(replace(None, &stranger, &ident("y")).is_none());
    }

    #[test]
    fn identical_target_and_replacement() {
        let t1 = ident("x");
        let tree = make::simple_name_reference(&t1);
        assert!(tree.try_replace(&t1, &t1).is_none());
        assert!(replace(Some(&tree), &t1, &t1).is_some_and(|it| it.ptr_eq(&tree)));
    }

    #[test]
    fn every_occurrence_is_replaced() {
        let shared = ident("x");
        let tree = make::binary_expression(
            make::simple_name_reference(&shared),
            create_token(SyntaxKind::PLUS_TOKEN),
            make::simple_name_reference(&shared),
        );

        let result = tree.replace(&shared, &ident("y"));
        assert_eq!(result.to_source_code(), "y+y");
    }

    #[test]
    fn off_path_siblings_are_shared() {
        let lhs = make::simple_name_reference(ident("a"));
        let operator = create_token(SyntaxKind::PLUS_TOKEN);
        let target = ident("b");
        let rhs = make::simple_name_reference(&target);
        let tree = make::binary_expression(&lhs, &operator, &rhs);

        let result = tree.replace(&target, &ident("c"));

        assert!(result.slot("lhs_expr").is_some_and(|it| it.ptr_eq(&lhs)));
        assert!(result.slot("operator").is_some_and(|it| it.ptr_eq(&operator)));
        assert!(!result.slot("rhs_expr").is_some_and(|it| it.ptr_eq(&rhs)));
    }

    #[test]
    fn reaches_into_trivia() {
        let comment = create_comment_minutiae("// old");
        let token = create_identifier_token(
            "x",
            create_node_list([comment.clone().into_node()]),
            GreenNodeList::empty(),
        );
        let tree = make::simple_name_reference(&token);

        let result = tree.replace(&comment, &create_comment_minutiae("// new"));

        assert_eq!(result.to_source_code(), "// newx");
        assert_eq!(tree.to_source_code(), "// oldx");
    }

    #[test]
    fn reaches_into_invalid_nodes() {
        let stray = ident("junk");
        let wrapped = create_invalid_node_minutiae(stray.clone());
        let token = create_token(SyntaxKind::SEMICOLON_TOKEN)
            .modify_with(create_node_list([wrapped.into_node()]), GreenNodeList::empty());

        let result = token.replace(&stray, &ident("other"));
        assert_eq!(result.to_source_code(), "other;");
    }

    #[test]
    #[should_panic = "token trivia must be a node list"]
    fn trivia_list_must_stay_a_list() {
        let leading = create_node_list([create_comment_minutiae("//").into_node()]);
        let token =
            create_token(SyntaxKind::SEMICOLON_TOKEN).modify_with(leading, GreenNodeList::empty());
        token.replace(token.leading_minutiae(), &ident("x"));
    }
}
