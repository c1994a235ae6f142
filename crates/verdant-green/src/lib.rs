//! Immutable, parent-free green syntax trees.
//!
//! Every element of a tree, composite node, node list, token or piece of
//! trivia, is a [`GreenNode`]: a reference-counted handle that never changes
//! after construction. Edits produce new trees that share every untouched
//! subtree with the old one.

mod builder;
mod diagnostics;
mod factory;
mod flags;
mod green;
mod list;
mod minutiae;
mod recovery;
mod replace;
mod syntax_kind;
mod token;
mod walk;

pub use text_size::TextSize;
pub use verdant_errors::{Diagnostic, DiagnosticArg, DiagnosticCode, Severity};

pub use crate::builder::{Builder, Checkpoint};
pub use crate::diagnostics::{add_diagnostic, add_diagnostics};
pub use crate::factory::{
    create_identifier_token, create_literal_value_token, create_missing_token,
    create_missing_token_with_diagnostics, create_token, create_token_with_minutiae,
    missing_token_code,
};
pub use crate::flags::NodeFlags;
pub use crate::green::{ABSENT, GreenNode, IntoChild};
pub use crate::list::{GreenNodeList, create_empty_node_list, create_node_list};
pub use crate::minutiae::{
    GreenMinutiae, create_comment_minutiae, create_end_of_line_minutiae,
    create_invalid_node_minutiae, create_whitespace_minutiae,
};
pub use crate::recovery::{
    clone_with_leading_invalid_node_minutiae, clone_with_trailing_invalid_node_minutiae,
};
pub use crate::replace::replace;
pub use crate::syntax_kind::{NodeRole, SyntaxKind, make};
pub use crate::token::GreenToken;
pub use crate::walk::{Preorder, Tokens, WalkEvent};
