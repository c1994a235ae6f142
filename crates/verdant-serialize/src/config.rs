/// Layout of the JSON projection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JsonStyle {
    /// No whitespace at all. This is the form compared against fixtures.
    #[default]
    Compact,
    /// One field per line, nested values indented by `indent` spaces.
    Pretty { indent: usize },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonConfig {
    pub style: JsonStyle,
}

impl JsonConfig {
    pub fn pretty() -> Self {
        Self { style: JsonStyle::Pretty { indent: 2 } }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SexprConfig {
    /// Spaces per nesting level.
    pub indent: usize,
}

impl Default for SexprConfig {
    fn default() -> Self {
        Self { indent: 2 }
    }
}
