//! The node-kind catalog.
//!
//! Every kind is declared once in the `syntax_kinds!` table below. Tokens with
//! a fixed spelling list it next to their name; composite kinds list their
//! constructor name, the roles they can fill, and their ordered, named child
//! slots. The table expands into [`SyntaxKind`], the per-kind slot schema, and
//! one typed constructor per composite kind in [`make`].

use std::fmt;

/// Abstract grammar position a composite kind can occupy.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum NodeRole {
    ModuleMember,
    Statement,
    Expression,
    TypeDescriptor,
}

macro_rules! syntax_kinds {
    (
        keywords { $($keyword:ident => $keyword_text:literal,)* }
        punctuation { $($punct:ident => $punct_text:literal,)* }
        literals { $($literal:ident,)* }
        minutiae { $($minutiae:ident,)* }
        nodes {
            $($node:ident => $make:ident $(as $($role:ident)|+)? { $($slot:ident),* $(,)? },)*
        }
    ) => {
        /// Grammar role of a tree element.
        ///
        /// The declaration order is significant: every token kind ordered
        /// before [`SyntaxKind::IDENTIFIER_TOKEN`] has a fixed spelling.
        #[allow(non_camel_case_types)]
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
        #[repr(u16)]
        pub enum SyntaxKind {
            /// Sentinel kind; never serialized.
            NONE,
            $($keyword,)*
            $($punct,)*
            IDENTIFIER_TOKEN,
            $($literal,)*
            EOF_TOKEN,
            $($minutiae,)*
            LIST,
            $($node,)*
        }

        impl SyntaxKind {
            pub const ALL: &'static [Self] = &[
                Self::NONE,
                $(Self::$keyword,)*
                $(Self::$punct,)*
                Self::IDENTIFIER_TOKEN,
                $(Self::$literal,)*
                Self::EOF_TOKEN,
                $(Self::$minutiae,)*
                Self::LIST,
                $(Self::$node,)*
            ];

            /// The kind's name as it appears in serialized trees.
            pub const fn as_str(self) -> &'static str {
                match self {
                    Self::NONE => "NONE",
                    $(Self::$keyword => stringify!($keyword),)*
                    $(Self::$punct => stringify!($punct),)*
                    Self::IDENTIFIER_TOKEN => "IDENTIFIER_TOKEN",
                    $(Self::$literal => stringify!($literal),)*
                    Self::EOF_TOKEN => "EOF_TOKEN",
                    $(Self::$minutiae => stringify!($minutiae),)*
                    Self::LIST => "LIST",
                    $(Self::$node => stringify!($node),)*
                }
            }

            /// The spelling of a keyword-like token kind.
            pub const fn fixed_text(self) -> Option<&'static str> {
                match self {
                    $(Self::$keyword => Some($keyword_text),)*
                    $(Self::$punct => Some($punct_text),)*
                    Self::EOF_TOKEN => Some(""),
                    _ => None,
                }
            }

            /// Names of the child slots of a composite kind, in order.
            ///
            /// Empty for tokens, minutiae and lists.
            pub const fn slots(self) -> &'static [&'static str] {
                match self {
                    $(Self::$node => &[$(stringify!($slot)),*],)*
                    _ => &[],
                }
            }

            /// Roles a composite kind can fill. Empty for every other kind.
            pub const fn roles(self) -> &'static [NodeRole] {
                match self {
                    $(Self::$node => &[$($(NodeRole::$role),+)?],)*
                    _ => &[],
                }
            }
        }

        /// Typed constructors, one per composite kind, taking the child slots
        /// in schema order.
        pub mod make {
            use crate::{GreenNode, IntoChild, SyntaxKind};

            $(
                #[allow(clippy::too_many_arguments)]
                pub fn $make($($slot: impl IntoChild),*) -> GreenNode {
                    GreenNode::new_node(SyntaxKind::$node, vec![$($slot.into_child()),*])
                }
            )*
        }
    };
}

syntax_kinds! {
    keywords {
        PUBLIC_KEYWORD => "public",
        PRIVATE_KEYWORD => "private",
        IMPORT_KEYWORD => "import",
        FUNCTION_KEYWORD => "function",
        RETURNS_KEYWORD => "returns",
        RETURN_KEYWORD => "return",
        IF_KEYWORD => "if",
        ELSE_KEYWORD => "else",
        WHILE_KEYWORD => "while",
        BREAK_KEYWORD => "break",
        CONTINUE_KEYWORD => "continue",
        PANIC_KEYWORD => "panic",
        CHECK_KEYWORD => "check",
        FINAL_KEYWORD => "final",
        CONST_KEYWORD => "const",
        TYPE_KEYWORD => "type",
        RECORD_KEYWORD => "record",
        VAR_KEYWORD => "var",
        INT_KEYWORD => "int",
        STRING_KEYWORD => "string",
        BOOLEAN_KEYWORD => "boolean",
        TRUE_KEYWORD => "true",
        FALSE_KEYWORD => "false",
        NULL_KEYWORD => "null",
    }
    punctuation {
        OPEN_BRACE_TOKEN => "{",
        CLOSE_BRACE_TOKEN => "}",
        OPEN_BRACE_PIPE_TOKEN => "{|",
        CLOSE_BRACE_PIPE_TOKEN => "|}",
        OPEN_PAREN_TOKEN => "(",
        CLOSE_PAREN_TOKEN => ")",
        OPEN_BRACKET_TOKEN => "[",
        CLOSE_BRACKET_TOKEN => "]",
        SEMICOLON_TOKEN => ";",
        COLON_TOKEN => ":",
        DOT_TOKEN => ".",
        COMMA_TOKEN => ",",
        QUESTION_MARK_TOKEN => "?",
        EQUAL_TOKEN => "=",
        PLUS_TOKEN => "+",
        MINUS_TOKEN => "-",
        ASTERISK_TOKEN => "*",
        SLASH_TOKEN => "/",
        PERCENT_TOKEN => "%",
        EXCLAMATION_MARK_TOKEN => "!",
        DOUBLE_EQUAL_TOKEN => "==",
        NOT_EQUAL_TOKEN => "!=",
        LT_TOKEN => "<",
        LT_EQUAL_TOKEN => "<=",
        GT_TOKEN => ">",
        GT_EQUAL_TOKEN => ">=",
        LOGICAL_AND_TOKEN => "&&",
        LOGICAL_OR_TOKEN => "||",
        RIGHT_ARROW_TOKEN => "->",
        AT_TOKEN => "@",
        BACKTICK_TOKEN => "`",
    }
    literals {
        STRING_LITERAL_TOKEN,
        DECIMAL_INTEGER_LITERAL_TOKEN,
        HEX_INTEGER_LITERAL_TOKEN,
        DECIMAL_FLOATING_POINT_LITERAL_TOKEN,
        TEMPLATE_STRING,
        DOCUMENTATION_STRING,
        PARAMETER_NAME,
        DEPRECATION_LITERAL,
        INVALID_TOKEN,
    }
    minutiae {
        WHITESPACE_MINUTIAE,
        END_OF_LINE_MINUTIAE,
        COMMENT_MINUTIAE,
        INVALID_NODE_MINUTIAE,
    }
    nodes {
        MODULE_PART => module_part { imports, members, eof_token },
        IMPORT_DECLARATION => import_declaration {
            import_keyword, org_name, module_name, semicolon,
        },
        IMPORT_ORG_NAME => import_org_name { org_name, slash_token },
        FUNCTION_DEFINITION => function_definition as ModuleMember {
            metadata, qualifier_list, function_keyword, function_name, function_signature,
            function_body,
        },
        FUNCTION_SIGNATURE => function_signature {
            open_paren_token, parameters, close_paren_token, return_type_desc,
        },
        RETURN_TYPE_DESCRIPTOR => return_type_descriptor {
            returns_keyword, annotations, type_descriptor,
        },
        REQUIRED_PARAM => required_param { annotations, type_name, param_name },
        FUNCTION_BODY_BLOCK => function_body_block {
            open_brace_token, statements, close_brace_token,
        },
        MODULE_VAR_DECL => module_var_decl as ModuleMember {
            metadata, final_keyword, type_descriptor, variable_name, equals_token, initializer,
            semicolon_token,
        },
        CONST_DECLARATION => const_declaration as ModuleMember {
            metadata, visibility_qualifier, const_keyword, type_descriptor, variable_name,
            equals_token, initializer, semicolon_token,
        },
        TYPE_DEFINITION => type_definition as ModuleMember {
            metadata, visibility_qualifier, type_keyword, type_name, type_descriptor,
            semicolon_token,
        },
        RECORD_TYPE_DESC => record_type_desc as TypeDescriptor {
            record_keyword, body_start_delimiter, fields, body_end_delimiter,
        },
        RECORD_FIELD => record_field {
            metadata, type_name, field_name, question_mark_token, semicolon_token,
        },
        METADATA => metadata { documentation_string, annotations },
        ANNOTATION => annotation { at_token, annot_reference, annot_value },
        BLOCK_STATEMENT => block_statement as Statement {
            open_brace_token, statements, close_brace_token,
        },
        LOCAL_VAR_DECL => local_var_decl as Statement {
            annotations, final_keyword, type_descriptor, variable_name, equals_token, initializer,
            semicolon_token,
        },
        ASSIGNMENT_STATEMENT => assignment_statement as Statement {
            var_ref, equals_token, expression, semicolon_token,
        },
        CALL_STATEMENT => call_statement as Statement { expression, semicolon_token },
        IF_ELSE_STATEMENT => if_else_statement as Statement {
            if_keyword, condition, if_body, else_body,
        },
        ELSE_BLOCK => else_block { else_keyword, else_body },
        WHILE_STATEMENT => while_statement as Statement { while_keyword, condition, while_body },
        RETURN_STATEMENT => return_statement as Statement {
            return_keyword, expression, semicolon_token,
        },
        BREAK_STATEMENT => break_statement as Statement { break_token, semicolon_token },
        CONTINUE_STATEMENT => continue_statement as Statement { continue_token, semicolon_token },
        PANIC_STATEMENT => panic_statement as Statement {
            panic_keyword, expression, semicolon_token,
        },
        BINARY_EXPRESSION => binary_expression as Expression { lhs_expr, operator, rhs_expr },
        UNARY_EXPRESSION => unary_expression as Expression { unary_operator, expression },
        BRACED_EXPRESSION => braced_expression as Expression {
            open_paren, expression, close_paren,
        },
        FUNCTION_CALL => function_call as Expression {
            function_name, open_paren_token, arguments, close_paren_token,
        },
        POSITIONAL_ARG => positional_arg { expression },
        NAMED_ARG => named_arg { argument_name, equals_token, expression },
        CHECK_EXPRESSION => check_expression as Expression { check_keyword, expression },
        SIMPLE_NAME_REFERENCE => simple_name_reference as Expression | TypeDescriptor { name },
        QUALIFIED_NAME_REFERENCE => qualified_name_reference as Expression | TypeDescriptor {
            module_prefix, colon, identifier,
        },
        BASIC_LITERAL => basic_literal as Expression { literal_token },
        NIL_LITERAL => nil_literal as Expression { open_paren_token, close_paren_token },
        INT_TYPE_DESC => int_type_desc as TypeDescriptor { name },
        STRING_TYPE_DESC => string_type_desc as TypeDescriptor { name },
        BOOLEAN_TYPE_DESC => boolean_type_desc as TypeDescriptor { name },
        OPTIONAL_TYPE_DESC => optional_type_desc as TypeDescriptor {
            type_descriptor, question_mark_token,
        },
        ARRAY_TYPE_DESC => array_type_desc as TypeDescriptor {
            member_type_desc, open_bracket, array_length, close_bracket,
        },
    }
}

impl SyntaxKind {
    /// `true` for token kinds whose text is implied by the kind.
    pub fn is_keyword_like(self) -> bool {
        self < Self::IDENTIFIER_TOKEN || self == Self::EOF_TOKEN
    }

    pub fn is_token(self) -> bool {
        Self::NONE < self && self <= Self::EOF_TOKEN
    }

    pub fn is_minutiae(self) -> bool {
        (Self::WHITESPACE_MINUTIAE..=Self::INVALID_NODE_MINUTIAE).contains(&self)
    }

    pub fn is_list(self) -> bool {
        self == Self::LIST
    }

    /// `true` for fixed-arity composite kinds.
    pub fn is_node(self) -> bool {
        self > Self::LIST
    }

    pub fn has_role(self, role: NodeRole) -> bool {
        self.roles().contains(&role)
    }

    pub fn is_statement(self) -> bool {
        self.has_role(NodeRole::Statement)
    }

    pub fn is_expression(self) -> bool {
        self.has_role(NodeRole::Expression)
    }

    pub fn is_type_descriptor(self) -> bool {
        self.has_role(NodeRole::TypeDescriptor)
    }

    pub fn is_module_member(self) -> bool {
        self.has_role(NodeRole::ModuleMember)
    }

    /// `true` for token kinds printed as `KIND, "text"` in S-expressions.
    pub fn has_literal_label(self) -> bool {
        matches!(
            self,
            Self::IDENTIFIER_TOKEN
                | Self::STRING_LITERAL_TOKEN
                | Self::DECIMAL_INTEGER_LITERAL_TOKEN
                | Self::HEX_INTEGER_LITERAL_TOKEN
                | Self::DECIMAL_FLOATING_POINT_LITERAL_TOKEN
                | Self::TEMPLATE_STRING
        )
    }

    /// Index of the slot called `name`, if this kind has one.
    pub fn slot_index(self, name: &str) -> Option<usize> {
        self.slots().iter().position(|slot| *slot == name)
    }
}

impl fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
