use verdant_errors::Diagnostic;

use crate::green::{Payload, TokenPayload, node_view};
use crate::{GreenNode, GreenNodeList, SyntaxKind};

node_view! {
    /// A leaf of the grammar tree together with its leading and trailing
    /// trivia.
    GreenToken
}

impl GreenToken {
    #[track_caller]
    pub(crate) fn new(
        kind: SyntaxKind,
        text: Option<Box<str>>,
        leading: GreenNodeList,
        trailing: GreenNodeList,
        diagnostics: Box<[Diagnostic]>,
        missing: bool,
    ) -> Self {
        assert!(kind.is_token(), "`{kind}` is not a token kind");
        assert!(
            leading.iter().chain(trailing.iter()).all(GreenNode::is_minutiae),
            "token trivia lists may only hold minutiae"
        );

        let payload = Payload::Token(TokenPayload { text, leading, trailing });
        Self::cast_unchecked(GreenNode::alloc(kind, diagnostics, missing, payload))
    }

    fn token_payload(&self) -> &TokenPayload {
        match self.payload() {
            Payload::Token(token) => token,
            _ => unreachable!("`GreenToken` over a non-token payload"),
        }
    }

    /// The token's own text; empty for a missing token.
    pub fn text(&self) -> &str {
        if self.is_missing() {
            return "";
        }
        match &self.token_payload().text {
            Some(text) => text,
            None => self.kind().fixed_text().unwrap_or(""),
        }
    }

    /// The stored literal text. `None` for keyword-like tokens, which are
    /// spelled by their kind.
    pub fn literal_value(&self) -> Option<&str> {
        self.token_payload().text.as_deref()
    }

    pub fn leading_minutiae(&self) -> &GreenNodeList {
        &self.token_payload().leading
    }

    pub fn trailing_minutiae(&self) -> &GreenNodeList {
        &self.token_payload().trailing
    }

    /// Scans the trailing trivia for an end-of-line item.
    pub fn has_trailing_newline(&self) -> bool {
        self.trailing_minutiae().iter().any(|it| it.kind() == SyntaxKind::END_OF_LINE_MINUTIAE)
    }

    /// Same token with different trivia. Kind, text, flags and diagnostics are
    /// kept.
    #[track_caller]
    pub fn modify_with(&self, leading: GreenNodeList, trailing: GreenNodeList) -> Self {
        Self::new(
            self.kind(),
            self.token_payload().text.clone(),
            leading,
            trailing,
            self.diagnostics().into(),
            self.is_missing(),
        )
    }

    /// Same token with no trivia at all.
    pub fn without_minutiae(&self) -> Self {
        if self.leading_minutiae().is_empty() && self.trailing_minutiae().is_empty() {
            return self.clone();
        }
        self.modify_with(GreenNodeList::empty(), GreenNodeList::empty())
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        GreenNodeList, SyntaxKind, create_comment_minutiae, create_end_of_line_minutiae,
        create_identifier_token, create_node_list, create_token, create_whitespace_minutiae,
    };

    #[test]
    fn keyword_text_comes_from_kind() {
        let token = create_token(SyntaxKind::RETURN_KEYWORD);
        assert_eq!(token.text(), "return");
        assert_eq!(token.literal_value(), None);
        assert_eq!(u32::from(token.width()), 6);
    }

    #[test]
    fn trailing_newline_is_scanned() {
        let plain = create_identifier_token("x", GreenNodeList::empty(), GreenNodeList::empty());
        assert!(!plain.has_trailing_newline());

        let trailing = create_node_list([
            create_whitespace_minutiae(" ").into_node(),
            create_end_of_line_minutiae("\n").into_node(),
        ]);
        let token = create_identifier_token("x", GreenNodeList::empty(), trailing);
        assert!(token.has_trailing_newline());
        assert_eq!(u32::from(token.width_with_trailing_minutiae()), 3);
        assert_eq!(token.width_with_leading_minutiae(), token.width());
    }

    #[test]
    fn modify_with_keeps_text() {
        let token = create_identifier_token("count", GreenNodeList::empty(), GreenNodeList::empty());
        let leading = create_node_list([create_comment_minutiae("// note").into_node()]);
        let modified = token.modify_with(leading, GreenNodeList::empty());

        assert_eq!(modified.text(), "count");
        assert_eq!(modified.to_source_code(), "// notecount");
        assert_eq!(modified.without_minutiae(), token);
    }

    #[test]
    #[should_panic = "token trivia lists may only hold minutiae"]
    fn trivia_must_be_minutiae() {
        let stray = create_token(SyntaxKind::SEMICOLON_TOKEN);
        let token = create_token(SyntaxKind::COMMA_TOKEN);
        token.modify_with(create_node_list([stray.into_node()]), GreenNodeList::empty());
    }
}
