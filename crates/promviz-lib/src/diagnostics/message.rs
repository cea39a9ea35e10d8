use rowan::TextRange;

/// Diagnostic kinds ordered by priority (highest priority first).
///
/// Unclosed delimiters come first because they explain most of the noise after them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    UnclosedParen,
    UnclosedBrace,
    UnclosedBracket,

    // User omitted something required
    ExpectedExpression,
    ExpectedLabelName,
    ExpectedMatchOperator,
    ExpectedLabelValue,
    ExpectedLabelList,
    ExpectedDuration,
    ExpectedTimestamp,
    ExpectedCallBody,

    // User wrote something that doesn't belong
    UnexpectedToken,
    UnexpectedExpression,

    // Valid PromQL the visual model cannot hold
    UnsupportedConstruct,
}

impl DiagnosticKind {
    /// Base message for this diagnostic kind, used when no custom message is provided.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::UnclosedParen => "missing closing `)`",
            Self::UnclosedBrace => "missing closing `}`",
            Self::UnclosedBracket => "missing closing `]`",

            Self::ExpectedExpression => "expected an expression",
            Self::ExpectedLabelName => "expected label name",
            Self::ExpectedMatchOperator => "expected label match operator",
            Self::ExpectedLabelValue => "expected label value",
            Self::ExpectedLabelList => "expected label list",
            Self::ExpectedDuration => "expected duration",
            Self::ExpectedTimestamp => "expected timestamp",
            Self::ExpectedCallBody => "expected `(`",

            Self::UnexpectedToken => "unexpected token",
            Self::UnexpectedExpression => "unexpected expression",

            Self::UnsupportedConstruct => "not representable in the visual query",
        }
    }

    /// Template for custom messages. Contains `{}` placeholder for caller-provided detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::UnclosedParen | Self::UnclosedBrace | Self::UnclosedBracket => {
                format!("{}; {{}}", self.fallback_message())
            }
            // Visual-model errors carry their own full text.
            Self::UnsupportedConstruct => "{}".to_string(),
            _ => format!("{}: {{}}", self.fallback_message()),
        }
    }

    /// Render the final message.
    ///
    /// - `None` → returns `fallback_message()`
    /// - `Some(detail)` → returns `custom_message()` with `{}` replaced by detail
    pub fn message(&self, msg: Option<&str>) -> String {
        match msg {
            None => self.fallback_message().to_string(),
            Some(detail) => self.custom_message().replace("{}", detail),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    pub(crate) range: TextRange,
    pub(crate) message: String,
}

impl RelatedInfo {
    pub fn new(range: TextRange, message: impl Into<String>) -> Self {
        Self {
            range,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    /// The range shown to the user (underlined in output).
    pub(crate) range: TextRange,
    pub(crate) message: String,
    pub(crate) related: Vec<RelatedInfo>,
}

impl DiagnosticMessage {
    pub(crate) fn new(kind: DiagnosticKind, range: TextRange, message: impl Into<String>) -> Self {
        Self {
            kind,
            range,
            message: message.into(),
            related: Vec::new(),
        }
    }

    pub(crate) fn with_default_message(kind: DiagnosticKind, range: TextRange) -> Self {
        Self::new(kind, range, kind.fallback_message())
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "error at {}..{}: {}",
            u32::from(self.range.start()),
            u32::from(self.range.end()),
            self.message
        )?;
        for related in &self.related {
            write!(
                f,
                " (related: {} at {}..{})",
                related.message,
                u32::from(related.range.start()),
                u32::from(related.range.end())
            )?;
        }
        Ok(())
    }
}
