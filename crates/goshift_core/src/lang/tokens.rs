//! Token vocabulary.
//!
//! Closed token sets carried by the syntax tree. Each set exposes its canonical source spelling through
//! `as_str()`, and the operator sets have a table used by the `*_from_str` lookups.
//!
//! ## Notes
//! - Lookups are **case-sensitive** and exact (`"&^"` matches, `" &^ "` does not).
//! - Serialized form is the `snake_case` variant name, not the spelling, so trees stay readable as JSON.

use serde::{Deserialize, Serialize};

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnaryOp {
    /// `+x`
    Plus,
    /// `-x`
    Minus,
    /// `!x`
    Not,
    /// `^x` (bitwise complement)
    Xor,
    /// `&x` (address-of)
    And,
    /// `<-x` (channel receive)
    Arrow,
}

/// Infix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Quo,
    Rem,

    // Bitwise
    And,
    Or,
    Xor,
    Shl,
    Shr,
    AndNot,

    // Logical
    LAnd,
    LOr,

    // Comparison
    Eql,
    Neq,
    Lss,
    Leq,
    Gtr,
    Geq,
}

/// Assignment tokens (`=`, `:=` and the compound forms).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignOp {
    Assign,
    Define,
    AddAssign,
    SubAssign,
    MulAssign,
    QuoAssign,
    RemAssign,
    AndAssign,
    OrAssign,
    XorAssign,
    ShlAssign,
    ShrAssign,
    AndNotAssign,
}

/// `x++` / `x--`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncDecOp {
    Inc,
    Dec,
}

/// Keywords of a branch statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BranchKind {
    Break,
    Continue,
    Goto,
    Fallthrough,
}

/// Direction of a channel type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChanDir {
    /// `chan T`
    #[default]
    Both,
    /// `chan<- T`
    Send,
    /// `<-chan T`
    Recv,
}

/// Kind of a basic literal. Booleans and `nil` are identifiers, not literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LitKind {
    Int,
    Float,
    Imag,
    Char,
    String,
}

/// Keyword introducing a generic declaration group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclKeyword {
    Import,
    Const,
    Type,
    Var,
}

impl UnaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOp::Plus => "+",
            UnaryOp::Minus => "-",
            UnaryOp::Not => "!",
            UnaryOp::Xor => "^",
            UnaryOp::And => "&",
            UnaryOp::Arrow => "<-",
        }
    }
}

/// Registry of infix spellings, in the order of [`BinaryOp`].
pub const BINARY_OPS: &[(BinaryOp, &str)] = &[
    (BinaryOp::Add, "+"),
    (BinaryOp::Sub, "-"),
    (BinaryOp::Mul, "*"),
    (BinaryOp::Quo, "/"),
    (BinaryOp::Rem, "%"),
    (BinaryOp::And, "&"),
    (BinaryOp::Or, "|"),
    (BinaryOp::Xor, "^"),
    (BinaryOp::Shl, "<<"),
    (BinaryOp::Shr, ">>"),
    (BinaryOp::AndNot, "&^"),
    (BinaryOp::LAnd, "&&"),
    (BinaryOp::LOr, "||"),
    (BinaryOp::Eql, "=="),
    (BinaryOp::Neq, "!="),
    (BinaryOp::Lss, "<"),
    (BinaryOp::Leq, "<="),
    (BinaryOp::Gtr, ">"),
    (BinaryOp::Geq, ">="),
];

/// Registry of assignment spellings, in the order of [`AssignOp`].
pub const ASSIGN_OPS: &[(AssignOp, &str)] = &[
    (AssignOp::Assign, "="),
    (AssignOp::Define, ":="),
    (AssignOp::AddAssign, "+="),
    (AssignOp::SubAssign, "-="),
    (AssignOp::MulAssign, "*="),
    (AssignOp::QuoAssign, "/="),
    (AssignOp::RemAssign, "%="),
    (AssignOp::AndAssign, "&="),
    (AssignOp::OrAssign, "|="),
    (AssignOp::XorAssign, "^="),
    (AssignOp::ShlAssign, "<<="),
    (AssignOp::ShrAssign, ">>="),
    (AssignOp::AndNotAssign, "&^="),
];

impl BinaryOp {
    pub fn as_str(self) -> &'static str {
        BINARY_OPS
            .iter()
            .find(|(op, _)| *op == self)
            .map(|(_, s)| *s)
            .unwrap_or("?")
    }

    /// Comparison and logical operators always yield a boolean.
    pub fn yields_bool(self) -> bool {
        matches!(
            self,
            BinaryOp::LAnd
                | BinaryOp::LOr
                | BinaryOp::Eql
                | BinaryOp::Neq
                | BinaryOp::Lss
                | BinaryOp::Leq
                | BinaryOp::Gtr
                | BinaryOp::Geq
        )
    }
}

impl AssignOp {
    pub fn as_str(self) -> &'static str {
        ASSIGN_OPS
            .iter()
            .find(|(op, _)| *op == self)
            .map(|(_, s)| *s)
            .unwrap_or("?")
    }

    /// `:=` introduces new bindings rather than assigning existing ones.
    pub fn is_define(self) -> bool {
        self == AssignOp::Define
    }
}

impl IncDecOp {
    pub fn as_str(self) -> &'static str {
        match self {
            IncDecOp::Inc => "++",
            IncDecOp::Dec => "--",
        }
    }
}

impl BranchKind {
    pub fn as_str(self) -> &'static str {
        match self {
            BranchKind::Break => "break",
            BranchKind::Continue => "continue",
            BranchKind::Goto => "goto",
            BranchKind::Fallthrough => "fallthrough",
        }
    }
}

impl DeclKeyword {
    pub fn as_str(self) -> &'static str {
        match self {
            DeclKeyword::Import => "import",
            DeclKeyword::Const => "const",
            DeclKeyword::Type => "type",
            DeclKeyword::Var => "var",
        }
    }
}

/// Look up an infix operator by its exact spelling.
pub fn binary_from_str(s: &str) -> Option<BinaryOp> {
    BINARY_OPS.iter().find(|(_, spelling)| *spelling == s).map(|(op, _)| *op)
}

/// Look up an assignment token by its exact spelling.
pub fn assign_from_str(s: &str) -> Option<AssignOp> {
    ASSIGN_OPS.iter().find(|(_, spelling)| *spelling == s).map(|(op, _)| *op)
}
