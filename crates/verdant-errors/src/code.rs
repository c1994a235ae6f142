//! Diagnostic code catalog.

use std::fmt;

/// How serious a diagnostic is.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum Severity {
    Hint,
    Info,
    Warning,
    Error,
}

impl Severity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hint => "HINT",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static description of a diagnostic code: stable id, message template and
/// severity.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct DiagnosticInfo {
    pub id: &'static str,
    pub message_template: &'static str,
    pub severity: Severity,
}

macro_rules! diagnostic_codes {
    ($($name:ident = $id:literal, $severity:ident, $template:literal;)*) => {
        /// Identifies a diagnostic category and its message template.
        ///
        /// Templates use `{0}`, `{1}`, ... as placeholders for diagnostic
        /// arguments.
        #[allow(non_camel_case_types)]
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
        pub enum DiagnosticCode {
            $($name,)*
        }

        impl DiagnosticCode {
            pub const ALL: &'static [Self] = &[$(Self::$name,)*];

            /// The variant name, e.g. `ERROR_MISSING_SEMICOLON_TOKEN`.
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$name => stringify!($name),)*
                }
            }

            /// The stable short id, e.g. `BCE0002`.
            pub const fn id(self) -> &'static str {
                match self {
                    $(Self::$name => $id,)*
                }
            }

            pub const fn severity(self) -> Severity {
                match self {
                    $(Self::$name => Severity::$severity,)*
                }
            }

            pub const fn message_template(self) -> &'static str {
                match self {
                    $(Self::$name => $template,)*
                }
            }
        }
    };
}

diagnostic_codes! {
    ERROR_MISSING_TOKEN = "BCE0001", Error, "missing token";
    ERROR_MISSING_SEMICOLON_TOKEN = "BCE0002", Error, "missing semicolon token";
    ERROR_MISSING_COLON_TOKEN = "BCE0003", Error, "missing colon token";
    ERROR_MISSING_OPEN_PAREN_TOKEN = "BCE0004", Error, "missing open parenthesis token";
    ERROR_MISSING_CLOSE_PAREN_TOKEN = "BCE0005", Error, "missing close parenthesis token";
    ERROR_MISSING_OPEN_BRACE_TOKEN = "BCE0006", Error, "missing open brace token";
    ERROR_MISSING_CLOSE_BRACE_TOKEN = "BCE0007", Error, "missing close brace token";
    ERROR_MISSING_OPEN_BRACKET_TOKEN = "BCE0008", Error, "missing open bracket token";
    ERROR_MISSING_CLOSE_BRACKET_TOKEN = "BCE0009", Error, "missing close bracket token";
    ERROR_MISSING_EQUAL_TOKEN = "BCE0010", Error, "missing equal token";
    ERROR_MISSING_COMMA_TOKEN = "BCE0011", Error, "missing comma token";
    ERROR_MISSING_DOT_TOKEN = "BCE0012", Error, "missing dot token";
    ERROR_MISSING_QUESTION_MARK_TOKEN = "BCE0013", Error, "missing question mark token";
    ERROR_MISSING_RIGHT_ARROW_TOKEN = "BCE0014", Error, "missing right arrow token";
    ERROR_MISSING_FUNCTION_KEYWORD = "BCE0020", Error, "missing function keyword";
    ERROR_MISSING_RETURNS_KEYWORD = "BCE0021", Error, "missing returns keyword";
    ERROR_MISSING_IMPORT_KEYWORD = "BCE0022", Error, "missing import keyword";
    ERROR_MISSING_TYPE_KEYWORD = "BCE0023", Error, "missing type keyword";
    ERROR_MISSING_RECORD_KEYWORD = "BCE0024", Error, "missing record keyword";
    ERROR_MISSING_IF_KEYWORD = "BCE0025", Error, "missing if keyword";
    ERROR_MISSING_ELSE_KEYWORD = "BCE0026", Error, "missing else keyword";
    ERROR_MISSING_WHILE_KEYWORD = "BCE0027", Error, "missing while keyword";
    ERROR_MISSING_RETURN_KEYWORD = "BCE0028", Error, "missing return keyword";
    ERROR_MISSING_IDENTIFIER = "BCE0100", Error, "missing identifier";
    ERROR_MISSING_TYPE_DESC = "BCE0101", Error, "missing type descriptor";
    ERROR_MISSING_EXPRESSION = "BCE0102", Error, "missing expression";
    ERROR_MISSING_STRING_LITERAL = "BCE0103", Error, "missing string literal";
    ERROR_MISSING_DECIMAL_INTEGER_LITERAL = "BCE0104", Error, "missing decimal integer literal";
    ERROR_MISSING_EOF_TOKEN = "BCE0105", Error, "missing end of file";
    ERROR_INVALID_TOKEN = "BCE0600", Error, "invalid token '{0}'";
    ERROR_EXTRANEOUS_INPUT = "BCE0601", Error, "extraneous input '{0}'";
    ERROR_INVALID_QUALIFIER = "BCE0602", Error, "invalid qualifier '{0}'";
    ERROR_DUPLICATE_QUALIFIER = "BCE0603", Error, "qualifier '{0}' already specified";
    ERROR_MISSING_DOUBLE_QUOTE = "BCE0604", Error, "missing double-quote";
    ERROR_LEADING_ZEROS_IN_NUMERIC_LITERALS = "BCE0605", Error, "leading zeros in numeric literals";
    ERROR_INVALID_ESCAPE_SEQUENCE = "BCE0606", Error, "invalid escape sequence '{0}'";
    ERROR_INVALID_EXPRESSION_IN_START_ACTION = "BCE0607", Error, "'{0}' is not allowed in '{1}'";
    WARNING_INVALID_DOCUMENTATION_IDENTIFIER = "BCE10000", Warning, "invalid identifier in documentation reference '{0}'";
    WARNING_MISSING_PARAMETER_DOCUMENTATION = "BCE10001", Warning, "undocumented parameter '{0}'";
    HINT_REDUNDANT_PARENTHESES = "BCE20000", Hint, "redundant parentheses";
}

impl DiagnosticCode {
    pub const fn info(self) -> DiagnosticInfo {
        DiagnosticInfo {
            id: self.id(),
            message_template: self.message_template(),
            severity: self.severity(),
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
