use std::sync::LazyLock;

use crate::green::{Payload, node_view};
use crate::{GreenMinutiae, GreenNode, SyntaxKind};

node_view! {
    /// Variable-arity, homogeneous child container. Also used for token
    /// trivia.
    GreenNodeList
}

static EMPTY: LazyLock<GreenNodeList> = LazyLock::new(|| {
    GreenNodeList::cast_unchecked(GreenNode::alloc(
        SyntaxKind::LIST,
        Box::default(),
        false,
        Payload::List(Box::default()),
    ))
});

/// Creates a list from `elements`. An empty input yields the shared empty
/// list.
pub fn create_node_list(elements: impl IntoIterator<Item = GreenNode>) -> GreenNodeList {
    let elements: Box<[GreenNode]> = elements.into_iter().collect();
    if elements.is_empty() {
        return GreenNodeList::empty();
    }
    GreenNodeList::cast_unchecked(GreenNode::alloc(
        SyntaxKind::LIST,
        Box::default(),
        false,
        Payload::List(elements),
    ))
}

pub fn create_empty_node_list() -> GreenNodeList {
    GreenNodeList::empty()
}

impl GreenNodeList {
    /// The process-wide empty list.
    pub fn empty() -> Self {
        EMPTY.clone()
    }

    pub fn as_slice(&self) -> &[GreenNode] {
        match self.payload() {
            Payload::List(elements) => elements,
            _ => unreachable!("`GreenNodeList` over a non-list payload"),
        }
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&GreenNode> {
        self.as_slice().get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GreenNode> {
        self.as_slice().iter()
    }

    /// The elements viewed as trivia.
    ///
    /// Panics on an element that is not minutiae.
    pub fn minutiae(&self) -> impl Iterator<Item = &GreenMinutiae> {
        self.iter().map(GreenNode::to_minutiae)
    }
}

impl<'a> IntoIterator for &'a GreenNodeList {
    type Item = &'a GreenNode;
    type IntoIter = std::slice::Iter<'a, GreenNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_token, create_whitespace_minutiae};

    #[test]
    fn empty_lists_are_shared() {
        let a = create_node_list([]);
        let b = create_node_list(Vec::new());
        assert!(a.ptr_eq(&b));
        assert!(a.ptr_eq(&create_empty_node_list()));
        assert_eq!(a.bucket_count(), 0);
        assert_eq!(a.kind(), SyntaxKind::LIST);
    }

    #[test]
    fn elements_in_order() {
        let comma = create_token(SyntaxKind::COMMA_TOKEN);
        let semi = create_token(SyntaxKind::SEMICOLON_TOKEN);
        let list = create_node_list([comma.clone().into_node(), semi.clone().into_node()]);

        assert_eq!(list.len(), 2);
        assert!(list.get(0).is_some_and(|it| it.ptr_eq(&comma)));
        assert!(list.child_in_bucket(1).is_some_and(|it| it.ptr_eq(&semi)));
        assert_eq!(list.to_source_code(), ",;");
        assert_eq!(u32::from(list.width()), 2);
    }

    #[test]
    fn minutiae_view() {
        let list = create_node_list([create_whitespace_minutiae("  ").into_node()]);
        let texts = list.minutiae().map(|it| it.text()).collect::<Vec<_>>();
        assert_eq!(texts, [Some("  ")]);
        assert_eq!(u32::from(list.full_width()), 2);
    }
}
