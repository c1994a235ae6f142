//! Diagnostic records attached to green nodes.
//!
//! A [`Diagnostic`] is a pure value: a code plus interpolation arguments. It
//! carries no location; rendering takes the range from the layer that knows
//! positions.

mod code;

use std::fmt;

pub use annotate_snippets::Renderer;
use annotate_snippets::{Level, Snippet};
pub use code::{DiagnosticCode, DiagnosticInfo, Severity};
pub use text_size::TextRange;

/// A single interpolation value of a diagnostic message.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum DiagnosticArg {
    Text(Box<str>),
    Int(i64),
}

impl fmt::Display for DiagnosticArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Int(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for DiagnosticArg {
    fn from(value: &str) -> Self {
        Self::Text(value.into())
    }
}

impl From<String> for DiagnosticArg {
    fn from(value: String) -> Self {
        Self::Text(value.into_boxed_str())
    }
}

impl From<i64> for DiagnosticArg {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for DiagnosticArg {
    fn from(value: u32) -> Self {
        Self::Int(value.into())
    }
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Diagnostic {
    code: DiagnosticCode,
    args: Box<[DiagnosticArg]>,
}

impl Diagnostic {
    pub fn new<A>(code: DiagnosticCode, args: impl IntoIterator<Item = A>) -> Self
    where
        A: Into<DiagnosticArg>,
    {
        Self { code, args: args.into_iter().map(Into::into).collect() }
    }

    /// A diagnostic with no arguments.
    pub fn from_code(code: DiagnosticCode) -> Self {
        Self { code, args: Box::default() }
    }

    pub fn code(&self) -> DiagnosticCode {
        self.code
    }

    pub fn args(&self) -> &[DiagnosticArg] {
        &self.args
    }

    pub fn info(&self) -> DiagnosticInfo {
        self.code.info()
    }

    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// The message template with `{n}` placeholders substituted by the
    /// arguments. Placeholders without a matching argument are kept verbatim.
    pub fn message(&self) -> String {
        let template = self.code.message_template();
        let mut message = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            message.push_str(&rest[..open]);
            let after_open = &rest[open + 1..];
            let Some(close) = after_open.find('}') else {
                message.push_str(&rest[open..]);
                rest = "";
                break;
            };
            let placeholder = &rest[open..open + close + 2];
            match after_open[..close].parse::<usize>().ok().and_then(|index| self.args.get(index))
            {
                Some(arg) => message.push_str(&arg.to_string()),
                None => message.push_str(placeholder),
            }
            rest = &after_open[close + 1..];
        }

        message.push_str(rest);
        message
    }

    /// Renders this diagnostic against `text`, pointing at `range`.
    pub fn render(&self, renderer: &Renderer, path: &str, text: &str, range: TextRange) -> String {
        let message = self.message();
        let report = level(self.severity()).title(&message).snippet(
            Snippet::source(text)
                .origin(path)
                .annotation(level(self.severity()).span(range.into()).label("here"))
                .fold(true),
        );
        renderer.render(report).to_string()
    }
}

impl From<DiagnosticCode> for Diagnostic {
    fn from(code: DiagnosticCode) -> Self {
        Self::from_code(code)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.severity(), self.code.id(), self.message())
    }
}

fn level(severity: Severity) -> Level {
    match severity {
        Severity::Error => Level::Error,
        Severity::Warning => Level::Warning,
        Severity::Info => Level::Info,
        Severity::Hint => Level::Help,
    }
}
