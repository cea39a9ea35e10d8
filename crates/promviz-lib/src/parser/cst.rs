//! Syntax kinds for PromQL.
//!
//! `SyntaxKind` serves dual roles: token kinds (from lexer) and node kinds (from parser).
//! Logos derives token recognition; keyword and node kinds lack token/regex attributes.
//! `PromLang` implements Rowan's `Language` trait for tree construction.

use logos::Logos;
use rowan::Language;

/// All token and node kinds. Tokens first, then nodes, then `__LAST` sentinel.
/// `#[repr(u16)]` enables safe transmute in `kind_from_raw`.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    #[token("(")]
    ParenOpen = 0,

    #[token(")")]
    ParenClose,

    #[token("[")]
    BracketOpen,

    #[token("]")]
    BracketClose,

    #[token("{")]
    BraceOpen,

    #[token("}")]
    BraceClose,

    #[token(",")]
    Comma,

    /// Subquery step separator: `[5m:1m]`
    #[token(":")]
    Colon,

    #[token("@")]
    At,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("/")]
    Slash,

    #[token("%")]
    Percent,

    #[token("^")]
    Caret,

    #[token("==")]
    EqualEqual,

    #[token("!=")]
    NotEqual,

    #[token("<=")]
    LessEqual,

    #[token("<")]
    Less,

    #[token(">=")]
    GreaterEqual,

    #[token(">")]
    Greater,

    #[token("=")]
    Equals,

    #[token("=~")]
    RegexMatch,

    #[token("!~")]
    RegexNoMatch,

    /// Decimal, float, exponent or hex literal. `Inf`/`NaN` are remapped from `Ident`.
    #[regex(r"(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?")]
    #[regex(r"0[xX][0-9a-fA-F]+")]
    Number,

    #[regex(r"(?:[0-9]+(?:ms|s|m|h|d|w|y))+")]
    Duration,

    #[regex(r#""(?:[^"\\\n]|\\.)*""#)]
    #[regex(r"'(?:[^'\\\n]|\\.)*'")]
    #[regex(r"`[^`]*`")]
    Str,

    /// Opening quote with no closing quote before end of line.
    #[regex(r#""(?:[^"\\\n]|\\.)*"#, allow_greedy = true)]
    #[regex(r"'(?:[^'\\\n]|\\.)*", allow_greedy = true)]
    #[regex(r"`[^`]*", allow_greedy = true)]
    UnterminatedString,

    /// Metric, label or function name. Keywords are split off by the lexer.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_:]*")]
    Ident,

    KwAnd,
    KwOr,
    KwUnless,
    KwAtan2,
    KwBy,
    KwWithout,
    KwOn,
    KwIgnoring,
    KwGroupLeft,
    KwGroupRight,
    KwBool,
    KwOffset,

    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    #[regex(r"#[^\n]*", allow_greedy = true)]
    LineComment,

    /// Coalesced unrecognized characters
    Garbage,
    Error,

    // --- Node kinds (non-terminals) ---
    Root,
    VectorSelector,
    Identifier,
    LabelMatchers,
    LabelMatcher,
    LabelName,
    StringLiteral,
    NumberLiteral,
    DurationLiteral,
    MatrixSelector,
    SubqueryExpr,
    OffsetExpr,
    AtModifier,
    FunctionCall,
    FunctionIdentifier,
    FunctionCallBody,
    AggregateExpr,
    AggregateOp,
    AggregateModifier,
    GroupingLabels,
    BinaryExpr,
    BoolModifier,
    MatchingModifier,
    GroupModifier,
    UnaryExpr,
    ParenExpr,

    // Must be last - used for bounds checking in `kind_from_raw`
    #[doc(hidden)]
    __LAST,
}

use SyntaxKind::*;

impl SyntaxKind {
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(self, Whitespace | LineComment)
    }

    /// Node kinds that stand for a whole (sub)expression.
    pub fn is_expr(self) -> bool {
        matches!(
            self,
            VectorSelector
                | MatrixSelector
                | SubqueryExpr
                | OffsetExpr
                | AtModifier
                | FunctionCall
                | AggregateExpr
                | BinaryExpr
                | UnaryExpr
                | ParenExpr
                | NumberLiteral
                | DurationLiteral
                | StringLiteral
        )
    }

    /// Reclassifies identifier text as a keyword or `Inf`/`NaN` number. Case-insensitive.
    pub fn from_ident(text: &str) -> Option<SyntaxKind> {
        let kind = match text.to_ascii_lowercase().as_str() {
            "and" => KwAnd,
            "or" => KwOr,
            "unless" => KwUnless,
            "atan2" => KwAtan2,
            "by" => KwBy,
            "without" => KwWithout,
            "on" => KwOn,
            "ignoring" => KwIgnoring,
            "group_left" => KwGroupLeft,
            "group_right" => KwGroupRight,
            "bool" => KwBool,
            "offset" => KwOffset,
            "inf" | "nan" => Number,
            _ => return None,
        };
        Some(kind)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    #[inline]
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// Language tag for Rowan's tree types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PromLang {}

impl Language for PromLang {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        assert!(raw.0 < __LAST as u16);
        // SAFETY: We've verified the value is in bounds, and SyntaxKind is repr(u16)
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for Rowan types parameterized by our language.
pub type SyntaxNode = rowan::SyntaxNode<PromLang>;
pub type SyntaxToken = rowan::SyntaxToken<PromLang>;
pub type SyntaxElement = rowan::NodeOrToken<SyntaxNode, SyntaxToken>;

/// 64-bit bitset of `SyntaxKind`s for O(1) membership testing.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TokenSet(u64);

impl TokenSet {
    /// Panics at compile time if any kind's discriminant >= 64.
    #[inline]
    pub const fn new(kinds: &[SyntaxKind]) -> Self {
        let mut bits = 0u64;
        let mut i = 0;
        while i < kinds.len() {
            let kind = kinds[i] as u16;
            assert!(kind < 64, "SyntaxKind value exceeds TokenSet capacity");
            bits |= 1 << kind;
            i += 1;
        }
        TokenSet(bits)
    }

    #[inline]
    pub const fn single(kind: SyntaxKind) -> Self {
        let kind = kind as u16;
        assert!(kind < 64, "SyntaxKind value exceeds TokenSet capacity");
        TokenSet(1 << kind)
    }

    #[inline]
    pub const fn contains(&self, kind: SyntaxKind) -> bool {
        let kind = kind as u16;
        if kind >= 64 {
            return false;
        }
        self.0 & (1 << kind) != 0
    }

    #[inline]
    pub const fn union(self, other: TokenSet) -> TokenSet {
        TokenSet(self.0 | other.0)
    }
}

impl std::fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_set();
        for i in 0..64u16 {
            if self.0 & (1 << i) != 0 && i < __LAST as u16 {
                let kind: SyntaxKind = unsafe { std::mem::transmute(i) };
                list.entry(&kind);
            }
        }
        list.finish()
    }
}

/// Pre-defined token sets for the parser.
pub mod token_sets {
    use super::*;

    /// FIRST set of an expression, unary signs included.
    pub const EXPR_FIRST: TokenSet = TokenSet::new(&[
        ParenOpen, BraceOpen, Ident, Number, Duration, Str, Plus, Minus,
    ]);

    pub const UNARY_OPS: TokenSet = TokenSet::new(&[Plus, Minus]);

    pub const MATCH_OPS: TokenSet = TokenSet::new(&[Equals, NotEqual, RegexMatch, RegexNoMatch]);

    pub const KEYWORDS: TokenSet = TokenSet::new(&[
        KwAnd,
        KwOr,
        KwUnless,
        KwAtan2,
        KwBy,
        KwWithout,
        KwOn,
        KwIgnoring,
        KwGroupLeft,
        KwGroupRight,
        KwBool,
        KwOffset,
    ]);

    /// Keywords double as label names: `{on="x"}`, `by (offset)`.
    pub const LABEL_NAMES: TokenSet = KEYWORDS.union(TokenSet::single(Ident));

    pub const AGGREGATE_MODIFIERS: TokenSet = TokenSet::new(&[KwBy, KwWithout]);
    pub const MATCHING_MODIFIERS: TokenSet = TokenSet::new(&[KwOn, KwIgnoring]);
    pub const GROUP_MODIFIERS: TokenSet = TokenSet::new(&[KwGroupLeft, KwGroupRight]);

    /// Tokens usable as a range or offset duration. Plain numbers count as seconds.
    pub const DURATIONS: TokenSet = TokenSet::new(&[Duration, Number]);

    pub const ROOT_RECOVERY: TokenSet = EXPR_FIRST;

    pub const ARG_RECOVERY: TokenSet = TokenSet::new(&[Comma, ParenClose]);

    pub const MATCHER_RECOVERY: TokenSet = TokenSet::new(&[Comma, BraceClose, ParenClose]);

    pub const RANGE_RECOVERY: TokenSet =
        TokenSet::new(&[BracketClose, ParenClose, BraceClose, Comma]);
}
