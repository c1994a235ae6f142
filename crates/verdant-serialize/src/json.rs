//! Ordered JSON projection.
//!
//! Field order and omission rules are fixed: `kind` first, then the missing
//! marker or the diagnostics block, then `value` for tokens not spelled by
//! their kind, then trivia, then `children` for composites and lists.

use std::io;

use serde_json::ser::{CompactFormatter, Formatter, PrettyFormatter};
use verdant_green::{GreenMinutiae, GreenNode, GreenToken, SyntaxKind};

use crate::{JsonConfig, JsonStyle, SerializeError, in_memory};

/// Compact JSON for `node`; `null` for `None`.
pub fn generate_json(node: Option<&GreenNode>) -> String {
    generate_json_with(node, &JsonConfig::default())
}

pub fn generate_json_with(node: Option<&GreenNode>, config: &JsonConfig) -> String {
    in_memory(|out| write_json(out, node, config))
}

pub fn write_json<W: io::Write>(
    writer: W,
    node: Option<&GreenNode>,
    config: &JsonConfig,
) -> Result<(), SerializeError> {
    tracing::trace!(kind = ?node.map(GreenNode::kind), ?config, "writing json");

    match config.style {
        JsonStyle::Compact => JsonWriter::new(writer, CompactFormatter).write(node),
        JsonStyle::Pretty { indent } => {
            let indent = " ".repeat(indent);
            JsonWriter::new(writer, PrettyFormatter::with_indent(indent.as_bytes())).write(node)
        }
    }
}

#[derive(Clone, Copy)]
enum Value<'a> {
    Node(&'a GreenNode),
    Minutiae(&'a GreenMinutiae),
}

enum Op<'a> {
    Object(Value<'a>),
    ArrayField { key: &'static str, items: Vec<Value<'a>> },
    ObjectField { key: &'static str, value: Value<'a> },
    Item { value: Value<'a>, first: bool },
    EndItem,
    EndArrayField,
    EndObjectField,
    EndObject,
}

struct JsonWriter<'a, W, F> {
    writer: W,
    formatter: F,
    stack: Vec<Op<'a>>,
}

impl<'a, W: io::Write, F: Formatter> JsonWriter<'a, W, F> {
    fn new(writer: W, formatter: F) -> Self {
        Self { writer, formatter, stack: Vec::new() }
    }

    fn write(mut self, root: Option<&'a GreenNode>) -> Result<(), SerializeError> {
        let Some(root) = root else {
            self.formatter.write_null(&mut self.writer)?;
            return Ok(());
        };

        self.stack.push(Op::Object(Value::Node(root)));
        while let Some(op) = self.stack.pop() {
            match op {
                Op::Object(Value::Node(node)) => self.node(node)?,
                Op::Object(Value::Minutiae(minutiae)) => self.minutiae(minutiae)?,
                Op::ArrayField { key, items } => {
                    self.key(key)?;
                    self.formatter.begin_array(&mut self.writer)?;
                    self.stack.push(Op::EndArrayField);
                    self.stack.extend(
                        items
                            .into_iter()
                            .enumerate()
                            .rev()
                            .map(|(index, value)| Op::Item { value, first: index == 0 }),
                    );
                }
                Op::ObjectField { key, value } => {
                    self.key(key)?;
                    self.stack.push(Op::EndObjectField);
                    self.stack.push(Op::Object(value));
                }
                Op::Item { value, first } => {
                    self.formatter.begin_array_value(&mut self.writer, first)?;
                    self.stack.push(Op::EndItem);
                    self.stack.push(Op::Object(value));
                }
                Op::EndItem => self.formatter.end_array_value(&mut self.writer)?,
                Op::EndArrayField => {
                    self.formatter.end_array(&mut self.writer)?;
                    self.formatter.end_object_value(&mut self.writer)?;
                }
                Op::EndObjectField => self.formatter.end_object_value(&mut self.writer)?,
                Op::EndObject => self.formatter.end_object(&mut self.writer)?,
            }
        }

        self.writer.flush()?;
        Ok(())
    }

    /// Writes the scalar fields of `node` now and schedules its arrays.
    fn node(&mut self, node: &'a GreenNode) -> io::Result<()> {
        if let Some(minutiae) = node.as_minutiae() {
            return self.minutiae(minutiae);
        }

        self.formatter.begin_object(&mut self.writer)?;
        self.string_field("kind", node.kind().as_str(), true)?;

        let mut deferred = Vec::new();
        if node.is_missing() {
            self.bool_field("isMissing", true)?;
            self.diagnostics(node)?;
            if let Some(token) = node.as_token() {
                trivia_fields(token, &mut deferred);
            }
        } else if let Some(token) = node.as_token() {
            self.diagnostics(node)?;
            if !token.kind().is_keyword_like() {
                self.string_field("value", literal_value(token), false)?;
            }
            trivia_fields(token, &mut deferred);
        } else {
            self.diagnostics(node)?;
            let children = node
                .child_buckets()
                .flatten()
                .filter(|child| child.kind() != SyntaxKind::NONE)
                .map(Value::Node)
                .collect();
            deferred.push(Op::ArrayField { key: "children", items: children });
        }

        self.schedule(deferred);
        Ok(())
    }

    fn minutiae(&mut self, minutiae: &'a GreenMinutiae) -> io::Result<()> {
        self.formatter.begin_object(&mut self.writer)?;
        self.string_field("kind", minutiae.kind().as_str(), true)?;

        let mut deferred = Vec::new();
        match (minutiae.text(), minutiae.invalid_node()) {
            (Some(text), _) => self.string_field("value", text, false)?,
            (None, Some(node)) => {
                deferred.push(Op::ObjectField { key: "invalidNode", value: Value::Node(node) });
            }
            (None, None) => {}
        }

        self.schedule(deferred);
        Ok(())
    }

    fn schedule(&mut self, deferred: Vec<Op<'a>>) {
        self.stack.push(Op::EndObject);
        self.stack.extend(deferred.into_iter().rev());
    }

    fn diagnostics(&mut self, node: &GreenNode) -> io::Result<()> {
        if node.diagnostics().is_empty() {
            return Ok(());
        }

        self.bool_field("hasDiagnostics", true)?;
        self.key("diagnostics")?;
        self.formatter.begin_array(&mut self.writer)?;
        for (index, diagnostic) in node.diagnostics().iter().enumerate() {
            self.formatter.begin_array_value(&mut self.writer, index == 0)?;
            self.string(diagnostic.code().name())?;
            self.formatter.end_array_value(&mut self.writer)?;
        }
        self.formatter.end_array(&mut self.writer)?;
        self.formatter.end_object_value(&mut self.writer)
    }

    /// Writes `"key":` and leaves the formatter ready for the value.
    fn key(&mut self, key: &str) -> io::Result<()> {
        self.key_at(key, false)
    }

    fn key_at(&mut self, key: &str, first: bool) -> io::Result<()> {
        self.formatter.begin_object_key(&mut self.writer, first)?;
        self.string(key)?;
        self.formatter.end_object_key(&mut self.writer)?;
        self.formatter.begin_object_value(&mut self.writer)
    }

    fn string_field(&mut self, key: &str, value: &str, first: bool) -> io::Result<()> {
        self.key_at(key, first)?;
        self.string(value)?;
        self.formatter.end_object_value(&mut self.writer)
    }

    fn bool_field(&mut self, key: &str, value: bool) -> io::Result<()> {
        self.key(key)?;
        self.formatter.write_bool(&mut self.writer, value)?;
        self.formatter.end_object_value(&mut self.writer)
    }

    fn string(&mut self, value: &str) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, value).map_err(io::Error::from)
    }
}

fn trivia_fields<'a>(token: &'a GreenToken, deferred: &mut Vec<Op<'a>>) {
    let lists = [
        ("leadingMinutiae", token.leading_minutiae()),
        ("trailingMinutiae", token.trailing_minutiae()),
    ];
    for (key, list) in lists {
        if !list.is_empty() {
            let items = list.minutiae().map(Value::Minutiae).collect();
            deferred.push(Op::ArrayField { key, items });
        }
    }
}

/// The `value` of a token that is not spelled by its kind.
fn literal_value(token: &GreenToken) -> &str {
    let Some(text) = token.literal_value() else {
        return token.text();
    };

    match token.kind() {
        SyntaxKind::STRING_LITERAL_TOKEN => {
            let mut chars = text.chars();
            chars.next();
            let rest = chars.as_str();
            rest.strip_suffix('"').unwrap_or(rest)
        }
        _ => text,
    }
}

#[cfg(test)]
mod tests {
    use expect_test::expect;
    use verdant_green::{
        DiagnosticCode, GreenNodeList, create_comment_minutiae, create_identifier_token,
        create_invalid_node_minutiae, create_literal_value_token, create_node_list, create_token,
        create_whitespace_minutiae, make,
    };

    use super::*;

    fn literal(kind: SyntaxKind, text: &str) -> GreenToken {
        create_literal_value_token(kind, text, GreenNodeList::empty(), GreenNodeList::empty())
    }

    #[test]
    fn null_root() {
        assert_eq!(generate_json(None), "null");
    }

    #[test]
    fn string_literal_quotes_are_stripped() {
        let cases = [("\"hi\"", "hi"), ("\"open", "open"), ("\"", ""), ("\"\"", ""), ("", "")];
        for (text, expected) in cases {
            assert_eq!(literal_value(&literal(SyntaxKind::STRING_LITERAL_TOKEN, text)), expected);
        }
        assert_eq!(literal_value(&literal(SyntaxKind::DECIMAL_INTEGER_LITERAL_TOKEN, "07")), "07");
    }

    #[test]
    fn value_is_escaped() {
        let token = literal(SyntaxKind::STRING_LITERAL_TOKEN, "\"a\\\"b\"");
        expect![[r#"{"kind":"STRING_LITERAL_TOKEN","value":"a\\\"b"}"#]]
            .assert_eq(&generate_json(Some(&token)));
    }

    #[test]
    fn composite_children_skip_absent_slots() {
        let node = make::return_statement(
            create_token(SyntaxKind::RETURN_KEYWORD),
            None::<GreenNode>,
            create_token(SyntaxKind::SEMICOLON_TOKEN),
        );
        expect![[r#"{"kind":"RETURN_STATEMENT","children":[{"kind":"RETURN_KEYWORD"},{"kind":"SEMICOLON_TOKEN"}]}"#]]
            .assert_eq(&generate_json(Some(&node)));
    }

    #[test]
    fn lists_always_have_children() {
        let empty = create_node_list([]);
        expect![[r#"{"kind":"LIST","children":[]}"#]].assert_eq(&generate_json(Some(&empty)));
    }

    #[test]
    fn minutiae_roots() {
        let comment = create_comment_minutiae("// c");
        expect![[r#"{"kind":"COMMENT_MINUTIAE","value":"// c"}"#]]
            .assert_eq(&generate_json(Some(comment.as_node())));

        let token = create_identifier_token(
            "x",
            create_node_list([comment.into_node()]),
            GreenNodeList::empty(),
        );
        expect![[r#"{"kind":"LIST","children":[{"kind":"COMMENT_MINUTIAE","value":"// c"}]}"#]]
            .assert_eq(&generate_json(Some(token.leading_minutiae().as_node())));

        let invalid = create_invalid_node_minutiae(create_token(SyntaxKind::COMMA_TOKEN));
        expect![[r#"{"kind":"INVALID_NODE_MINUTIAE","invalidNode":{"kind":"COMMA_TOKEN"}}"#]]
            .assert_eq(&generate_json(Some(invalid.as_node())));
    }

    #[test]
    fn own_diagnostics_only() {
        let name = create_identifier_token("x", GreenNodeList::empty(), GreenNodeList::empty());
        let name = verdant_green::add_diagnostic(&name, DiagnosticCode::ERROR_INVALID_TOKEN, ["x"]);
        let node = make::simple_name_reference(&name);
        expect![[r#"{"kind":"SIMPLE_NAME_REFERENCE","children":[{"kind":"IDENTIFIER_TOKEN","hasDiagnostics":true,"diagnostics":["ERROR_INVALID_TOKEN"],"value":"x"}]}"#]]
            .assert_eq(&generate_json(Some(&node)));
    }

    #[test]
    fn pretty_layout() {
        let trailing = create_node_list([create_whitespace_minutiae(" ").into_node()]);
        let token = create_identifier_token("x", GreenNodeList::empty(), trailing);
        let json = generate_json_with(Some(&token), &JsonConfig::pretty());
        expect![[r#"
            {
              "kind": "IDENTIFIER_TOKEN",
              "value": "x",
              "trailingMinutiae": [
                {
                  "kind": "WHITESPACE_MINUTIAE",
                  "value": " "
                }
              ]
            }"#]]
        .assert_eq(&json);
    }

    #[test]
    fn nested_expressions() {
        let name = create_identifier_token("x", GreenNodeList::empty(), GreenNodeList::empty());
        let mut expression = make::simple_name_reference(name);
        for _ in 0..2_000 {
            expression = make::braced_expression(
                create_token(SyntaxKind::OPEN_PAREN_TOKEN),
                expression,
                create_token(SyntaxKind::CLOSE_PAREN_TOKEN),
            );
        }

        let json = generate_json(Some(&expression));
        assert!(json.starts_with(
            r#"{"kind":"BRACED_EXPRESSION","children":[{"kind":"OPEN_PAREN_TOKEN"},{"kind":"BRACED_EXPRESSION""#
        ));
        assert_eq!(json.matches("BRACED_EXPRESSION").count(), 2_000);
        assert_eq!(json.matches("IDENTIFIER_TOKEN").count(), 1);
    }
}
