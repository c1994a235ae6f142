//! S-expression projection.
//!
//! ```text
//! (RETURN_STATEMENT 6 01 ()
//!   (RETURN_KEYWORD 6 00 ())
//!   nil
//!   (SEMICOLON_TOKEN 0 03 (BCE0002)))
//! ```
//!
//! Each node prints its label, width, flags as two hex digits and its own
//! diagnostics (id followed by arguments). Children follow on their own lines,
//! absent ones as `nil`.

use std::io;

use verdant_green::GreenNode;

use crate::{SerializeError, SexprConfig, in_memory};

pub fn to_sexpr(node: Option<&GreenNode>) -> String {
    to_sexpr_with(node, &SexprConfig::default())
}

pub fn to_sexpr_with(node: Option<&GreenNode>, config: &SexprConfig) -> String {
    in_memory(|out| write_sexpr(out, node, config))
}

pub fn write_sexpr<W: io::Write>(
    mut writer: W,
    node: Option<&GreenNode>,
    config: &SexprConfig,
) -> Result<(), SerializeError> {
    tracing::trace!(kind = ?node.map(GreenNode::kind), ?config, "writing s-expression");

    enum Op<'a> {
        Enter(Option<&'a GreenNode>, usize),
        Close,
    }

    let mut stack = vec![Op::Enter(node, 0)];
    while let Some(op) = stack.pop() {
        let (node, depth) = match op {
            Op::Enter(node, depth) => (node, depth),
            Op::Close => {
                writer.write_all(b")")?;
                continue;
            }
        };

        if depth > 0 {
            write!(writer, "\n{:width$}", "", width = depth * config.indent)?;
        }
        let Some(node) = node else {
            writer.write_all(b"nil")?;
            continue;
        };

        write_label(&mut writer, node)?;
        write!(writer, " {} {:02x} (", u32::from(node.width()), node.flags())?;
        let mut first = true;
        for diagnostic in node.diagnostics() {
            if !first {
                writer.write_all(b" ")?;
            }
            first = false;
            writer.write_all(diagnostic.code().id().as_bytes())?;
            for arg in diagnostic.args() {
                write!(writer, " {arg}")?;
            }
        }
        writer.write_all(b")")?;

        stack.push(Op::Close);
        stack.extend(node.child_buckets().rev().map(|child| Op::Enter(child, depth + 1)));
    }

    writer.flush()?;
    Ok(())
}

fn write_label(writer: &mut impl io::Write, node: &GreenNode) -> io::Result<()> {
    let kind = node.kind();
    match node.as_token() {
        Some(token) if kind.has_literal_label() => write!(writer, "({kind}, {:?}", token.text()),
        _ => write!(writer, "({kind}"),
    }
}

#[cfg(test)]
mod tests {
    use expect_test::expect;
    use verdant_green::{
        DiagnosticCode, GreenNodeList, SyntaxKind, add_diagnostic, create_identifier_token,
        create_literal_value_token, create_missing_token_with_diagnostics, create_token, make,
    };

    use super::*;

    #[test]
    fn absent_root() {
        assert_eq!(to_sexpr(None), "nil");
    }

    #[test]
    fn absent_children_and_flags() {
        let node = make::return_statement(
            create_token(SyntaxKind::RETURN_KEYWORD),
            None::<GreenNode>,
            create_missing_token_with_diagnostics(
                SyntaxKind::SEMICOLON_TOKEN,
                DiagnosticCode::ERROR_MISSING_SEMICOLON_TOKEN,
            ),
        );
        expect![[r#"
            (RETURN_STATEMENT 6 01 ()
              (RETURN_KEYWORD 6 00 ())
              nil
              (SEMICOLON_TOKEN 0 03 (BCE0002)))"#]]
        .assert_eq(&to_sexpr(Some(&node)));
    }

    #[test]
    fn literal_labels_and_arguments() {
        let callee = create_identifier_token("print", GreenNodeList::empty(), GreenNodeList::empty());
        let argument = create_literal_value_token(
            SyntaxKind::STRING_LITERAL_TOKEN,
            "\"hi\"",
            GreenNodeList::empty(),
            GreenNodeList::empty(),
        );
        let argument =
            add_diagnostic(&argument, DiagnosticCode::ERROR_INVALID_ESCAPE_SEQUENCE, ["\\q"]);
        let call = make::function_call(
            make::simple_name_reference(callee),
            create_token(SyntaxKind::OPEN_PAREN_TOKEN),
            verdant_green::create_node_list([make::positional_arg(make::basic_literal(argument))]),
            create_token(SyntaxKind::CLOSE_PAREN_TOKEN),
        );
        expect![[r#"
            (FUNCTION_CALL 11 01 ()
              (SIMPLE_NAME_REFERENCE 5 00 ()
                (IDENTIFIER_TOKEN, "print" 5 00 ()))
              (OPEN_PAREN_TOKEN 1 00 ())
              (LIST 4 01 ()
                (POSITIONAL_ARG 4 01 ()
                  (BASIC_LITERAL 4 01 ()
                    (STRING_LITERAL_TOKEN, "\"hi\"" 4 01 (BCE0606 \q)))))
              (CLOSE_PAREN_TOKEN 1 00 ()))"#]]
        .assert_eq(&to_sexpr(Some(&call)));
    }

    #[test]
    fn custom_indent() {
        let node = make::simple_name_reference(create_identifier_token(
            "x",
            GreenNodeList::empty(),
            GreenNodeList::empty(),
        ));
        let sexpr = to_sexpr_with(Some(&node), &SexprConfig { indent: 4 });
        assert_eq!(sexpr, "(SIMPLE_NAME_REFERENCE 1 00 ()\n    (IDENTIFIER_TOKEN, \"x\" 1 00 ()))");
    }
}
