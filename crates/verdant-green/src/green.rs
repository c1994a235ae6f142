//! Immutable, parent-free green nodes and the contract every tree element
//! implements.

use std::fmt;

use text_size::TextSize;
use triomphe::Arc;
use verdant_errors::Diagnostic;

use crate::walk::{Edge, Preorder, TokenPath, Tokens};
use crate::{GreenMinutiae, GreenNodeList, GreenToken, NodeFlags, SyntaxKind};

/// Shared handle to an immutable tree element: a composite node, a node
/// list, a token or a minutiae item.
///
/// Cloning bumps a reference count. Two handles are *identical* when they
/// point at the same allocation ([`GreenNode::ptr_eq`]); `==` compares
/// structure.
#[derive(Clone)]
pub struct GreenNode {
    ptr: Arc<GreenNodeData>,
}

#[derive(PartialEq, Eq)]
struct GreenNodeData {
    kind: SyntaxKind,
    flags: NodeFlags,
    width: TextSize,
    full_width: TextSize,
    diagnostics: Box<[Diagnostic]>,
    payload: Payload,
}

#[derive(Clone, PartialEq, Eq)]
pub(crate) enum Payload {
    Node(Box<[Option<GreenNode>]>),
    List(Box<[GreenNode]>),
    Token(TokenPayload),
    Minutiae(MinutiaePayload),
}

#[derive(Clone, PartialEq, Eq)]
pub(crate) struct TokenPayload {
    /// `None` for keyword-like kinds, whose text is their spelling.
    pub(crate) text: Option<Box<str>>,
    pub(crate) leading: GreenNodeList,
    pub(crate) trailing: GreenNodeList,
}

#[derive(Clone, PartialEq, Eq)]
pub(crate) enum MinutiaePayload {
    Text(Box<str>),
    InvalidNode(GreenNode),
}

impl GreenNode {
    pub(crate) fn alloc(
        kind: SyntaxKind,
        diagnostics: Box<[Diagnostic]>,
        missing: bool,
        payload: Payload,
    ) -> Self {
        let (width, full_width) = measure(kind, missing, &payload);
        let has_diagnostic = !diagnostics.is_empty() || payload_has_diagnostics(&payload);
        let flags = NodeFlags::EMPTY
            .with(NodeFlags::HAS_DIAGNOSTIC, has_diagnostic)
            .with(NodeFlags::IS_MISSING, missing);

        Self { ptr: Arc::new(GreenNodeData { kind, flags, width, full_width, diagnostics, payload }) }
    }

    /// Creates a composite node of `kind` from its child slots.
    ///
    /// Panics if `kind` is not a composite kind or `children` does not match
    /// the kind's arity.
    #[track_caller]
    pub fn new_node(kind: SyntaxKind, children: Vec<Option<Self>>) -> Self {
        assert!(kind.is_node(), "`{kind}` is not a composite kind");
        assert_eq!(
            children.len(),
            kind.slots().len(),
            "`{kind}` expects {} children",
            kind.slots().len()
        );
        Self::alloc(kind, Box::default(), false, Payload::Node(children.into_boxed_slice()))
    }

    /// Rebuilds this composite node or list with the same kind and
    /// diagnostics but different children.
    #[track_caller]
    pub fn with_children(&self, children: Vec<Option<Self>>) -> Self {
        let payload = match self.payload() {
            Payload::Node(old) => {
                assert_eq!(children.len(), old.len(), "`{}` arity changed", self.kind());
                Payload::Node(children.into_boxed_slice())
            }
            Payload::List(_) => {
                if children.is_empty() && self.ptr.diagnostics.is_empty() {
                    return GreenNodeList::empty().into_node();
                }
                Payload::List(
                    children
                        .into_iter()
                        .map(|child| child.expect("node lists cannot hold absent elements"))
                        .collect(),
                )
            }
            Payload::Token(_) | Payload::Minutiae(_) => {
                panic!("`{}` has no child buckets", self.kind())
            }
        };
        Self::alloc(self.kind(), self.ptr.diagnostics.clone(), self.is_missing(), payload)
    }

    /// Shallow copy with a different diagnostic list. Children are shared.
    pub(crate) fn set_diagnostics(&self, diagnostics: Box<[Diagnostic]>) -> Self {
        Self::alloc(self.kind(), diagnostics, self.is_missing(), self.payload().clone())
    }

    pub(crate) fn payload(&self) -> &Payload {
        &self.ptr.payload
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.ptr.kind
    }

    /// Length of this element's own text, excluding the trivia of its tokens.
    #[inline]
    pub fn width(&self) -> TextSize {
        self.ptr.width
    }

    /// For tokens, the width plus leading minutiae; for everything else the
    /// plain width.
    pub fn width_with_leading_minutiae(&self) -> TextSize {
        match self.payload() {
            Payload::Token(token) => self.width() + token.leading.width(),
            _ => self.width(),
        }
    }

    /// For tokens, the width plus trailing minutiae; for everything else the
    /// plain width.
    pub fn width_with_trailing_minutiae(&self) -> TextSize {
        match self.payload() {
            Payload::Token(token) => self.width() + token.trailing.width(),
            _ => self.width(),
        }
    }

    /// For tokens, the width plus all attached minutiae; for everything else
    /// the plain width.
    pub fn width_with_minutiae(&self) -> TextSize {
        match self.payload() {
            Payload::Token(token) => token.leading.width() + self.width() + token.trailing.width(),
            _ => self.width(),
        }
    }

    /// Length of [`GreenNode::to_source_code`]: every token with all of its
    /// trivia.
    #[inline]
    pub fn full_width(&self) -> TextSize {
        self.ptr.full_width
    }

    #[inline]
    pub fn flags(&self) -> NodeFlags {
        self.ptr.flags
    }

    /// `true` if this node or any descendant carries a diagnostic.
    #[inline]
    pub fn has_diagnostics(&self) -> bool {
        self.flags().contains(NodeFlags::HAS_DIAGNOSTIC)
    }

    #[inline]
    pub fn is_missing(&self) -> bool {
        self.flags().contains(NodeFlags::IS_MISSING)
    }

    /// Diagnostics attached directly to this node, not its descendants.
    #[inline]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.ptr.diagnostics
    }

    pub fn is_token(&self) -> bool {
        matches!(self.payload(), Payload::Token(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self.payload(), Payload::List(_))
    }

    pub fn is_minutiae(&self) -> bool {
        matches!(self.payload(), Payload::Minutiae(_))
    }

    /// `true` if both handles point at the same node.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.ptr, &other.ptr)
    }

    /// Fixed arity for composite kinds, length for lists, zero otherwise.
    pub fn bucket_count(&self) -> usize {
        match self.payload() {
            Payload::Node(children) => children.len(),
            Payload::List(children) => children.len(),
            Payload::Token(_) | Payload::Minutiae(_) => 0,
        }
    }

    /// The child in slot `index`; `None` for an absent optional child.
    ///
    /// Panics if `index` is not below [`GreenNode::bucket_count`], which
    /// includes every index on a token.
    #[track_caller]
    pub fn child_in_bucket(&self, index: usize) -> Option<&Self> {
        match self.payload() {
            Payload::Node(children) => match children.get(index) {
                Some(child) => child.as_ref(),
                None => bucket_out_of_range(self, index),
            },
            Payload::List(children) => match children.get(index) {
                Some(child) => Some(child),
                None => bucket_out_of_range(self, index),
            },
            Payload::Token(_) | Payload::Minutiae(_) => bucket_out_of_range(self, index),
        }
    }

    /// Every child bucket in order, absent ones included.
    pub fn child_buckets(
        &self,
    ) -> impl DoubleEndedIterator<Item = Option<&Self>> + ExactSizeIterator + '_ {
        (0..self.bucket_count()).map(|index| self.child_in_bucket(index))
    }

    /// The child in the slot called `name`.
    #[track_caller]
    pub fn slot(&self, name: &str) -> Option<&Self> {
        let index = self
            .kind()
            .slot_index(name)
            .unwrap_or_else(|| panic!("`{}` has no slot named `{name}`", self.kind()));
        self.child_in_bucket(index)
    }

    /// Pre-order walk over the grammar structure, skipping absent children.
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder::new(self)
    }

    /// Every token of this subtree in source order. Empty for a token.
    pub fn tokens(&self) -> Tokens<'_> {
        Tokens::new(self)
    }

    pub fn try_first_token(&self) -> Option<&GreenToken> {
        TokenPath::find(self, Edge::First).map(|path| path.token)
    }

    pub fn try_last_token(&self) -> Option<&GreenToken> {
        TokenPath::find(self, Edge::Last).map(|path| path.token)
    }

    #[track_caller]
    pub(crate) fn token_path(&self, edge: Edge) -> TokenPath<'_> {
        TokenPath::find(self, edge)
            .unwrap_or_else(|| panic!("no tokens found in `{}`", self.kind()))
    }

    /// The first token of this subtree, or the node itself for a token.
    ///
    /// Panics if the subtree holds no token at all.
    #[track_caller]
    pub fn first_token(&self) -> &GreenToken {
        self.token_path(Edge::First).token
    }

    /// The last token of this subtree, or the node itself for a token.
    ///
    /// Panics if the subtree holds no token at all.
    #[track_caller]
    pub fn last_token(&self) -> &GreenToken {
        self.token_path(Edge::Last).token
    }

    /// The exact source text covered by this subtree, trivia included.
    pub fn to_source_code(&self) -> String {
        let mut text = String::with_capacity(usize::from(self.full_width()));
        let mut stack = vec![SourcePiece::Node(self)];

        while let Some(piece) = stack.pop() {
            let node = match piece {
                SourcePiece::Text(it) => {
                    text.push_str(it);
                    continue;
                }
                SourcePiece::Node(node) => node,
            };
            match node.payload() {
                Payload::Node(children) => {
                    stack.extend(children.iter().rev().flatten().map(SourcePiece::Node));
                }
                Payload::List(children) => {
                    stack.extend(children.iter().rev().map(SourcePiece::Node));
                }
                Payload::Token(token) => {
                    stack.push(SourcePiece::Node(token.trailing.as_node()));
                    stack.push(SourcePiece::Text(node.to_token().text()));
                    stack.push(SourcePiece::Node(token.leading.as_node()));
                }
                Payload::Minutiae(MinutiaePayload::Text(it)) => text.push_str(it),
                Payload::Minutiae(MinutiaePayload::InvalidNode(invalid)) => {
                    stack.push(SourcePiece::Node(invalid));
                }
            }
        }

        text
    }

    pub fn as_token(&self) -> Option<&GreenToken> {
        self.is_token().then(|| GreenToken::cast_ref(self))
    }

    #[track_caller]
    pub fn to_token(&self) -> &GreenToken {
        self.as_token().unwrap_or_else(|| panic!("`{}` is not a token", self.kind()))
    }

    pub fn as_list(&self) -> Option<&GreenNodeList> {
        self.is_list().then(|| GreenNodeList::cast_ref(self))
    }

    #[track_caller]
    pub fn to_list(&self) -> &GreenNodeList {
        self.as_list().unwrap_or_else(|| panic!("`{}` is not a node list", self.kind()))
    }

    pub fn as_minutiae(&self) -> Option<&GreenMinutiae> {
        self.is_minutiae().then(|| GreenMinutiae::cast_ref(self))
    }

    #[track_caller]
    pub fn to_minutiae(&self) -> &GreenMinutiae {
        self.as_minutiae().unwrap_or_else(|| panic!("`{}` is not minutiae", self.kind()))
    }
}

enum SourcePiece<'a> {
    Node(&'a GreenNode),
    Text(&'a str),
}

#[cold]
#[track_caller]
fn bucket_out_of_range(node: &GreenNode, index: usize) -> ! {
    panic!(
        "bucket index {index} out of range for `{}` with {} buckets",
        node.kind(),
        node.bucket_count()
    )
}

fn measure(kind: SyntaxKind, missing: bool, payload: &Payload) -> (TextSize, TextSize) {
    match payload {
        Payload::Node(children) => children
            .iter()
            .flatten()
            .fold((TextSize::new(0), TextSize::new(0)), |(width, full), child| {
                (width + child.width(), full + child.full_width())
            }),
        Payload::List(children) => children
            .iter()
            .fold((TextSize::new(0), TextSize::new(0)), |(width, full), child| {
                (width + child.width(), full + child.full_width())
            }),
        Payload::Token(token) => {
            let width = if missing {
                TextSize::new(0)
            } else {
                match &token.text {
                    Some(text) => TextSize::of(&**text),
                    None => TextSize::of(kind.fixed_text().unwrap_or("")),
                }
            };
            (width, token.leading.width() + width + token.trailing.width())
        }
        Payload::Minutiae(MinutiaePayload::Text(text)) => {
            let width = TextSize::of(&**text);
            (width, width)
        }
        Payload::Minutiae(MinutiaePayload::InvalidNode(node)) => {
            (node.full_width(), node.full_width())
        }
    }
}

fn payload_has_diagnostics(payload: &Payload) -> bool {
    match payload {
        Payload::Node(children) => children.iter().flatten().any(GreenNode::has_diagnostics),
        Payload::List(children) => children.iter().any(GreenNode::has_diagnostics),
        Payload::Token(token) => token.leading.has_diagnostics() || token.trailing.has_diagnostics(),
        Payload::Minutiae(MinutiaePayload::Text(_)) => false,
        Payload::Minutiae(MinutiaePayload::InvalidNode(node)) => node.has_diagnostics(),
    }
}

impl PartialEq for GreenNode {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || *self.ptr == *other.ptr
    }
}

impl Eq for GreenNode {}

impl fmt::Debug for GreenNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("GreenNode");
        debug.field("kind", &self.kind()).field("width", &self.width());
        if !self.flags().is_empty() {
            debug.field("flags", &self.flags());
        }
        if !self.diagnostics().is_empty() {
            debug.field("diagnostics", &self.diagnostics());
        }
        match self.payload() {
            Payload::Node(children) => debug.field("children", children),
            Payload::List(children) => debug.field("children", children),
            Payload::Token(token) => debug
                .field("text", &self.to_token().text())
                .field("leading", &token.leading.as_slice())
                .field("trailing", &token.trailing.as_slice()),
            Payload::Minutiae(MinutiaePayload::Text(text)) => debug.field("text", text),
            Payload::Minutiae(MinutiaePayload::InvalidNode(node)) => {
                debug.field("invalid_node", node)
            }
        };
        debug.finish()
    }
}

/// Prints the source text.
impl fmt::Display for GreenNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_source_code())
    }
}

/// Values accepted for a child slot by the constructors in [`crate::make`].
pub trait IntoChild {
    fn into_child(self) -> Option<GreenNode>;
}

impl IntoChild for GreenNode {
    fn into_child(self) -> Option<Self> {
        Some(self)
    }
}

impl IntoChild for &GreenNode {
    fn into_child(self) -> Option<GreenNode> {
        Some(self.clone())
    }
}

impl IntoChild for GreenToken {
    fn into_child(self) -> Option<GreenNode> {
        Some(self.into_node())
    }
}

impl IntoChild for &GreenToken {
    fn into_child(self) -> Option<GreenNode> {
        Some(self.as_node().clone())
    }
}

impl IntoChild for GreenNodeList {
    fn into_child(self) -> Option<GreenNode> {
        Some(self.into_node())
    }
}

impl IntoChild for &GreenNodeList {
    fn into_child(self) -> Option<GreenNode> {
        Some(self.as_node().clone())
    }
}

impl<T: IntoChild> IntoChild for Option<T> {
    fn into_child(self) -> Option<GreenNode> {
        self.and_then(IntoChild::into_child)
    }
}

/// An absent optional child.
pub const ABSENT: Option<GreenNode> = None;

/// Declares a `#[repr(transparent)]` typed view over [`GreenNode`].
macro_rules! node_view {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq)]
        #[repr(transparent)]
        pub struct $name(GreenNode);

        impl $name {
            /// Reinterprets `node`; the caller has checked its payload.
            #[expect(unsafe_code)]
            pub(crate) fn cast_ref(node: &GreenNode) -> &Self {
                // SAFETY: `Self` is a `#[repr(transparent)]` wrapper around
                // `GreenNode`.
                unsafe { &*std::ptr::from_ref(node).cast::<Self>() }
            }

            pub(crate) fn cast_unchecked(node: GreenNode) -> Self {
                Self(node)
            }

            pub fn as_node(&self) -> &GreenNode {
                &self.0
            }

            pub fn into_node(self) -> GreenNode {
                self.0
            }
        }

        impl std::ops::Deref for $name {
            type Target = GreenNode;

            fn deref(&self) -> &GreenNode {
                &self.0
            }
        }

        impl From<$name> for GreenNode {
            fn from(view: $name) -> Self {
                view.0
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Debug::fmt(&self.0, f)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

pub(crate) use node_view;
