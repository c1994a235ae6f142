use std::ops::Range;

use crate::{GreenNode, GreenToken};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum WalkEvent<T> {
    Enter(T),
    Leave(T),
}

/// Pre-order traversal over child buckets. Absent children are skipped and
/// trivia is not entered.
#[derive(Clone)]
pub struct Preorder<'a> {
    root: &'a GreenNode,
    stack: Vec<(&'a GreenNode, usize)>,
    started: bool,
}

impl<'a> Preorder<'a> {
    pub(crate) fn new(root: &'a GreenNode) -> Self {
        Self { root, stack: Vec::new(), started: false }
    }

    /// Do not descend into the node that was just entered.
    pub fn skip_subtree(&mut self) {
        if let Some((node, index)) = self.stack.last_mut() {
            *index = node.bucket_count();
        }
    }
}

impl<'a> Iterator for Preorder<'a> {
    type Item = WalkEvent<&'a GreenNode>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.started {
            self.started = true;
            self.stack.push((self.root, 0));
            return Some(WalkEvent::Enter(self.root));
        }

        loop {
            let (node, index) = self.stack.last_mut()?;
            let node = *node;
            if *index == node.bucket_count() {
                self.stack.pop();
                return Some(WalkEvent::Leave(node));
            }

            let bucket = *index;
            *index += 1;
            if let Some(child) = node.child_in_bucket(bucket) {
                self.stack.push((child, 0));
                return Some(WalkEvent::Enter(child));
            }
        }
    }
}

/// Tokens of a subtree in source order.
#[derive(Clone)]
pub struct Tokens<'a> {
    preorder: Preorder<'a>,
}

impl<'a> Tokens<'a> {
    pub(crate) fn new(root: &'a GreenNode) -> Self {
        let mut preorder = Preorder::new(root);
        // A token reports no sub-tokens.
        preorder.started = root.is_token();
        Self { preorder }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a GreenToken;

    fn next(&mut self) -> Option<Self::Item> {
        self.preorder.find_map(|event| match event {
            WalkEvent::Enter(node) => node.as_token(),
            WalkEvent::Leave(_) => None,
        })
    }
}

/// Which end of a subtree to look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Edge {
    First,
    Last,
}

/// The first or last token of a subtree, with the bucket taken at each
/// ancestor on the way down to it.
pub(crate) struct TokenPath<'a> {
    ancestors: Vec<(&'a GreenNode, usize)>,
    pub(crate) token: &'a GreenToken,
}

impl<'a> TokenPath<'a> {
    /// Depth-first search that backs out of subtrees holding no token.
    pub(crate) fn find(root: &'a GreenNode, edge: Edge) -> Option<Self> {
        let mut frames: Vec<(&'a GreenNode, Range<usize>, usize)> = Vec::new();
        let mut next = Some(root);
        loop {
            if let Some(node) = next.take() {
                if let Some(token) = node.as_token() {
                    let ancestors =
                        frames.into_iter().map(|(node, _, taken)| (node, taken)).collect();
                    return Some(Self { ancestors, token });
                }
                frames.push((node, 0..node.bucket_count(), 0));
            }

            let (node, buckets, taken) = frames.last_mut()?;
            let node = *node;
            let bucket = match edge {
                Edge::First => buckets.next(),
                Edge::Last => buckets.next_back(),
            };
            match bucket {
                Some(bucket) => {
                    *taken = bucket;
                    next = node.child_in_bucket(bucket);
                }
                None => {
                    frames.pop();
                }
            }
        }
    }

    /// Rebuilds only the ancestors on this path, with `token` standing where
    /// the found token was.
    pub(crate) fn replace_token(self, token: GreenNode) -> GreenNode {
        self.ancestors.into_iter().rev().fold(token, |child, (parent, bucket)| {
            let mut children = parent.child_buckets().map(|it| it.cloned()).collect::<Vec<_>>();
            children[bucket] = Some(child);
            parent.with_children(children)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        GreenNodeList, SyntaxKind, create_identifier_token, create_node_list, create_token, make,
    };

    #[test]
    fn enter_and_leave_in_order() {
        let name = create_identifier_token("f", GreenNodeList::empty(), GreenNodeList::empty());
        let call = make::function_call(
            make::simple_name_reference(&name),
            create_token(SyntaxKind::OPEN_PAREN_TOKEN),
            GreenNodeList::empty(),
            create_token(SyntaxKind::CLOSE_PAREN_TOKEN),
        );

        let events = call
            .preorder()
            .map(|event| match event {
                WalkEvent::Enter(node) => format!("+{}", node.kind()),
                WalkEvent::Leave(node) => format!("-{}", node.kind()),
            })
            .collect::<Vec<_>>();

        assert_eq!(
            events,
            [
                "+FUNCTION_CALL",
                "+SIMPLE_NAME_REFERENCE",
                "+IDENTIFIER_TOKEN",
                "-IDENTIFIER_TOKEN",
                "-SIMPLE_NAME_REFERENCE",
                "+OPEN_PAREN_TOKEN",
                "-OPEN_PAREN_TOKEN",
                "+LIST",
                "-LIST",
                "+CLOSE_PAREN_TOKEN",
                "-CLOSE_PAREN_TOKEN",
                "-FUNCTION_CALL",
            ]
        );
    }

    #[test]
    fn skip_subtree() {
        let name = create_identifier_token("x", GreenNodeList::empty(), GreenNodeList::empty());
        let node = make::positional_arg(make::simple_name_reference(&name));

        let mut preorder = node.preorder();
        let mut entered = Vec::new();
        while let Some(event) = preorder.next() {
            if let WalkEvent::Enter(node) = event {
                entered.push(node.kind());
                if node.kind() == SyntaxKind::SIMPLE_NAME_REFERENCE {
                    preorder.skip_subtree();
                }
            }
        }
        assert_eq!(entered, [SyntaxKind::POSITIONAL_ARG, SyntaxKind::SIMPLE_NAME_REFERENCE]);
    }

    #[test]
    fn tokens_of_a_token_are_empty() {
        let token = create_token(SyntaxKind::SEMICOLON_TOKEN);
        assert_eq!(token.tokens().count(), 0);
        assert!(token.first_token().ptr_eq(&token));
        assert!(token.last_token().ptr_eq(&token));
    }

    #[test]
    fn edge_tokens_skip_empty_subtrees() {
        let open = create_token(SyntaxKind::OPEN_PAREN_TOKEN);
        let call =
            make::function_call(None::<GreenNode>, &open, create_node_list([]), None::<GreenNode>);

        assert!(call.first_token().ptr_eq(&open));
        assert!(call.last_token().ptr_eq(&open));

        let path = TokenPath::find(&call, Edge::Last).expect("call has a token");
        assert_eq!(path.ancestors.len(), 1);
        assert_eq!(path.ancestors[0].1, 1);
    }

    #[test]
    fn replace_token_rebuilds_one_path() {
        let shared = create_identifier_token("x", GreenNodeList::empty(), GreenNodeList::empty());
        let lhs = make::simple_name_reference(&shared);
        let rhs = make::simple_name_reference(&shared);
        let tree = make::binary_expression(&lhs, create_token(SyntaxKind::PLUS_TOKEN), &rhs);
        let other = create_identifier_token("y", GreenNodeList::empty(), GreenNodeList::empty());

        let path = TokenPath::find(&tree, Edge::Last).expect("tree has tokens");
        let result = path.replace_token(other.into_node());

        assert_eq!(result.to_source_code(), "x+y");
        assert!(result.slot("lhs_expr").is_some_and(|it| it.ptr_eq(&lhs)));
        assert!(!result.slot("rhs_expr").is_some_and(|it| it.ptr_eq(&rhs)));
    }

    #[test]
    fn deep_last_token() {
        let name = create_identifier_token("x", GreenNodeList::empty(), GreenNodeList::empty());
        let close = create_token(SyntaxKind::CLOSE_PAREN_TOKEN);
        let mut expression = make::simple_name_reference(&name);
        for _ in 0..2_000 {
            let open = create_token(SyntaxKind::OPEN_PAREN_TOKEN);
            expression = make::braced_expression(open, expression, &close);
        }

        assert!(expression.last_token().ptr_eq(&close));
        assert_eq!(expression.first_token().kind(), SyntaxKind::OPEN_PAREN_TOKEN);
    }
}
