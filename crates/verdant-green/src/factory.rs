//! Token factories used by a parser while it builds a tree bottom-up.

use verdant_errors::{Diagnostic, DiagnosticCode};

use crate::{GreenNodeList, GreenToken, SyntaxKind};

/// A keyword-like token with no trivia.
#[track_caller]
pub fn create_token(kind: SyntaxKind) -> GreenToken {
    create_token_with_minutiae(kind, GreenNodeList::empty(), GreenNodeList::empty())
}

/// A keyword-like token; its text is the kind's spelling.
#[track_caller]
pub fn create_token_with_minutiae(
    kind: SyntaxKind,
    leading: GreenNodeList,
    trailing: GreenNodeList,
) -> GreenToken {
    assert!(kind.is_keyword_like(), "`{kind}` has no fixed spelling");
    GreenToken::new(kind, None, leading, trailing, Box::default(), false)
}

pub fn create_identifier_token(
    text: &str,
    leading: GreenNodeList,
    trailing: GreenNodeList,
) -> GreenToken {
    GreenToken::new(
        SyntaxKind::IDENTIFIER_TOKEN,
        Some(text.into()),
        leading,
        trailing,
        Box::default(),
        false,
    )
}

/// A token whose text is stored rather than implied by its kind: literals,
/// documentation strings, invalid tokens and the like.
#[track_caller]
pub fn create_literal_value_token(
    kind: SyntaxKind,
    text: &str,
    leading: GreenNodeList,
    trailing: GreenNodeList,
) -> GreenToken {
    assert!(!kind.is_keyword_like(), "`{kind}` is spelled by its kind");
    GreenToken::new(kind, Some(text.into()), leading, trailing, Box::default(), false)
}

/// A zero-width placeholder for a token the parser expected but did not find.
///
/// Panics if `diagnostics` is empty: a missing token always explains itself.
#[track_caller]
pub fn create_missing_token(kind: SyntaxKind, diagnostics: Vec<Diagnostic>) -> GreenToken {
    assert!(!diagnostics.is_empty(), "missing `{kind}` needs at least one diagnostic");
    GreenToken::new(
        kind,
        None,
        GreenNodeList::empty(),
        GreenNodeList::empty(),
        diagnostics.into_boxed_slice(),
        true,
    )
}

#[track_caller]
pub fn create_missing_token_with_diagnostics(kind: SyntaxKind, code: DiagnosticCode) -> GreenToken {
    create_missing_token(kind, vec![Diagnostic::from_code(code)])
}

/// The diagnostic a parser reports for a missing token of `kind`.
pub fn missing_token_code(kind: SyntaxKind) -> DiagnosticCode {
    use DiagnosticCode as D;
    use SyntaxKind as K;

    match kind {
        K::SEMICOLON_TOKEN => D::ERROR_MISSING_SEMICOLON_TOKEN,
        K::COLON_TOKEN => D::ERROR_MISSING_COLON_TOKEN,
        K::OPEN_PAREN_TOKEN => D::ERROR_MISSING_OPEN_PAREN_TOKEN,
        K::CLOSE_PAREN_TOKEN => D::ERROR_MISSING_CLOSE_PAREN_TOKEN,
        K::OPEN_BRACE_TOKEN => D::ERROR_MISSING_OPEN_BRACE_TOKEN,
        K::CLOSE_BRACE_TOKEN => D::ERROR_MISSING_CLOSE_BRACE_TOKEN,
        K::OPEN_BRACKET_TOKEN => D::ERROR_MISSING_OPEN_BRACKET_TOKEN,
        K::CLOSE_BRACKET_TOKEN => D::ERROR_MISSING_CLOSE_BRACKET_TOKEN,
        K::EQUAL_TOKEN => D::ERROR_MISSING_EQUAL_TOKEN,
        K::COMMA_TOKEN => D::ERROR_MISSING_COMMA_TOKEN,
        K::DOT_TOKEN => D::ERROR_MISSING_DOT_TOKEN,
        K::QUESTION_MARK_TOKEN => D::ERROR_MISSING_QUESTION_MARK_TOKEN,
        K::RIGHT_ARROW_TOKEN => D::ERROR_MISSING_RIGHT_ARROW_TOKEN,
        K::FUNCTION_KEYWORD => D::ERROR_MISSING_FUNCTION_KEYWORD,
        K::RETURNS_KEYWORD => D::ERROR_MISSING_RETURNS_KEYWORD,
        K::IMPORT_KEYWORD => D::ERROR_MISSING_IMPORT_KEYWORD,
        K::TYPE_KEYWORD => D::ERROR_MISSING_TYPE_KEYWORD,
        K::RECORD_KEYWORD => D::ERROR_MISSING_RECORD_KEYWORD,
        K::IF_KEYWORD => D::ERROR_MISSING_IF_KEYWORD,
        K::ELSE_KEYWORD => D::ERROR_MISSING_ELSE_KEYWORD,
        K::WHILE_KEYWORD => D::ERROR_MISSING_WHILE_KEYWORD,
        K::RETURN_KEYWORD => D::ERROR_MISSING_RETURN_KEYWORD,
        K::IDENTIFIER_TOKEN => D::ERROR_MISSING_IDENTIFIER,
        K::STRING_LITERAL_TOKEN => D::ERROR_MISSING_STRING_LITERAL,
        K::DECIMAL_INTEGER_LITERAL_TOKEN => D::ERROR_MISSING_DECIMAL_INTEGER_LITERAL,
        K::EOF_TOKEN => D::ERROR_MISSING_EOF_TOKEN,
        _ => D::ERROR_MISSING_TOKEN,
    }
}
