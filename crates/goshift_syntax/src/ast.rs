//! Syntax tree definitions for the source language.
//!
//! This module defines every node kind the translator can receive. The tree is produced by an external
//! parser and is treated as read-only: nothing in the translator mutates it.
//!
//! The shape follows the source grammar closely: generic declaration groups hold specs, statements are a
//! single enum, and types are ordinary expressions (the grammar does not separate them syntactically).

use std::fmt;

use goshift_core::lang::tokens::{AssignOp, BinaryOp, BranchKind, ChanDir, DeclKeyword, IncDecOp, LitKind, UnaryOp};
use serde::{Deserialize, Serialize};

/// Source location span (byte offsets)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// A node with source location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spanned<T> {
    pub node: T,
    #[serde(default)]
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }

    /// Wrap a node that has no source position (built by tooling or tests).
    pub fn synthetic(node: T) -> Self {
        Self {
            node,
            span: Span::default(),
        }
    }
}

pub type Ident = String;

// ============================================================================
// Declarations
// ============================================================================

/// A source file: the root of every tree handed to the translator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    /// Package name
    pub name: Ident,
    pub decls: Vec<Spanned<Decl>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decl {
    /// `import`, `const`, `type` or `var` group
    Gen(GenDecl),
    Func(FuncDecl),
    /// Remnant of parser error recovery; carries the offending source text.
    Bad(String),
}

/// A keyword followed by one spec or a parenthesized list of specs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenDecl {
    pub keyword: DeclKeyword,
    /// Whether the specs were written inside `( ... )`
    #[serde(default)]
    pub grouped: bool,
    pub specs: Vec<Spanned<Spec>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Spec {
    Import(ImportSpec),
    Type(TypeSpec),
    Value(ValueSpec),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportSpec {
    /// Explicit local name (`.` and `_` included)
    #[serde(default)]
    pub name: Option<Ident>,
    /// Quoted path literal exactly as written, e.g. `"fmt"`
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeSpec {
    pub name: Ident,
    /// `type A = B` (alias) rather than `type A B`
    #[serde(default)]
    pub alias: bool,
    pub ty: Spanned<Expr>,
}

/// `names [type] [= values]` inside a `const` or `var` group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueSpec {
    pub names: Vec<Ident>,
    #[serde(default)]
    pub ty: Option<Spanned<Expr>>,
    #[serde(default)]
    pub values: Vec<Spanned<Expr>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuncDecl {
    /// Method receiver, e.g. `(r *Reader)`
    #[serde(default)]
    pub recv: Option<FieldList>,
    pub name: Ident,
    pub ty: FuncType,
    /// Absent for external (assembly-backed) declarations
    #[serde(default)]
    pub body: Option<Block>,
}

/// Parameters, results, receivers, struct fields and interface methods.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldList {
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Empty for anonymous parameters and embedded fields
    #[serde(default)]
    pub names: Vec<Ident>,
    pub ty: Spanned<Expr>,
    #[serde(default)]
    pub tag: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FuncType {
    #[serde(default)]
    pub params: FieldList,
    #[serde(default)]
    pub results: Option<FieldList>,
}

impl FieldList {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Number of values the list declares: a field with `n` names counts `n`, an anonymous field counts 1.
    pub fn arity(&self) -> usize {
        self.fields.iter().map(|f| f.names.len().max(1)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Whether every field carries names (named results, ordinary parameters).
    pub fn is_named(&self) -> bool {
        !self.fields.is_empty() && self.fields.iter().all(|f| !f.names.is_empty())
    }
}

impl FuncType {
    pub fn result_arity(&self) -> usize {
        self.results.as_ref().map_or(0, FieldList::arity)
    }
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Block {
    pub stmts: Vec<Spanned<Stmt>>,
}

impl Block {
    pub fn new(stmts: Vec<Spanned<Stmt>>) -> Self {
        Self { stmts }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stmt {
    /// `const`/`var`/`type` group inside a function body
    Decl(GenDecl),
    /// A lone `;`
    Empty,
    /// `label: stmt`
    Labeled(LabeledStmt),
    /// Expression statement
    Expr(Spanned<Expr>),
    /// `ch <- value`
    Send(SendStmt),
    /// `x++` / `x--`
    IncDec(IncDecStmt),
    /// `a, b = x, y`, `v := f()`, `n += 1`
    Assign(AssignStmt),
    /// `go f(x)`
    Go(Spanned<Expr>),
    /// `defer f(x)`
    Defer(Spanned<Expr>),
    /// `return a, b`
    Return(Vec<Spanned<Expr>>),
    /// `break`, `continue`, `goto L`, `fallthrough`
    Branch(BranchStmt),
    /// `{ ... }`
    Block(Block),
    If(IfStmt),
    Switch(SwitchStmt),
    TypeSwitch(TypeSwitchStmt),
    Select(SelectStmt),
    For(ForStmt),
    Range(RangeStmt),
    /// Remnant of parser error recovery; carries the offending source text.
    Bad(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledStmt {
    pub label: Ident,
    pub stmt: Box<Spanned<Stmt>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendStmt {
    pub chan: Spanned<Expr>,
    pub value: Spanned<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncDecStmt {
    pub x: Spanned<Expr>,
    pub op: IncDecOp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignStmt {
    pub lhs: Vec<Spanned<Expr>>,
    pub op: AssignOp,
    pub rhs: Vec<Spanned<Expr>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchStmt {
    pub kind: BranchKind,
    #[serde(default)]
    pub label: Option<Ident>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IfStmt {
    #[serde(default)]
    pub init: Option<Box<Spanned<Stmt>>>,
    pub cond: Spanned<Expr>,
    pub body: Block,
    /// Either a `Stmt::Block` or a chained `Stmt::If`
    #[serde(default)]
    pub els: Option<Box<Spanned<Stmt>>>,
}

/// `case a, b:` or `default:` (empty list).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseClause {
    #[serde(default)]
    pub list: Vec<Spanned<Expr>>,
    pub body: Vec<Spanned<Stmt>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchStmt {
    #[serde(default)]
    pub init: Option<Box<Spanned<Stmt>>>,
    /// Absent for `switch { ... }`
    #[serde(default)]
    pub tag: Option<Spanned<Expr>>,
    pub clauses: Vec<Spanned<CaseClause>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeSwitchStmt {
    #[serde(default)]
    pub init: Option<Box<Spanned<Stmt>>>,
    /// `x := y.(type)` or `y.(type)`
    pub assign: Box<Spanned<Stmt>>,
    pub clauses: Vec<Spanned<CaseClause>>,
}

/// `case v := <-ch:` / `case ch <- v:` or `default:` (no comm).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommClause {
    #[serde(default)]
    pub comm: Option<Box<Spanned<Stmt>>>,
    pub body: Vec<Spanned<Stmt>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectStmt {
    pub clauses: Vec<Spanned<CommClause>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForStmt {
    #[serde(default)]
    pub init: Option<Box<Spanned<Stmt>>>,
    #[serde(default)]
    pub cond: Option<Spanned<Expr>>,
    #[serde(default)]
    pub post: Option<Box<Spanned<Stmt>>>,
    pub body: Block,
}

/// `for key, value := range x { ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeStmt {
    #[serde(default)]
    pub key: Option<Spanned<Expr>>,
    #[serde(default)]
    pub value: Option<Spanned<Expr>>,
    /// `:=` or `=`; absent for `for range x`
    #[serde(default)]
    pub op: Option<AssignOp>,
    pub x: Spanned<Expr>,
    pub body: Block,
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicLit {
    pub kind: LitKind,
    /// Literal text exactly as written, quotes included
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuncLit {
    pub ty: FuncType,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeLit {
    /// Elided for nested literals, e.g. the inner `{1, 2}` in `[][]int{{1, 2}}`
    #[serde(default)]
    pub ty: Option<Box<Spanned<Expr>>>,
    #[serde(default)]
    pub elts: Vec<Spanned<Expr>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliceExpr {
    pub x: Box<Spanned<Expr>>,
    #[serde(default)]
    pub low: Option<Box<Spanned<Expr>>>,
    #[serde(default)]
    pub high: Option<Box<Spanned<Expr>>>,
    #[serde(default)]
    pub max: Option<Box<Spanned<Expr>>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallExpr {
    pub fun: Box<Spanned<Expr>>,
    #[serde(default)]
    pub args: Vec<Spanned<Expr>>,
    /// `f(xs...)`
    #[serde(default)]
    pub ellipsis: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    /// Identifier, including `true`, `false`, `nil` and `iota`
    Ident(Ident),
    /// `...T` in a parameter list, or `...` in an array length
    Ellipsis(Option<Box<Spanned<Expr>>>),
    BasicLit(BasicLit),
    FuncLit(FuncLit),
    CompositeLit(CompositeLit),
    /// `(x)`
    Paren(Box<Spanned<Expr>>),
    /// `x.sel`
    Selector(Box<Spanned<Expr>>, Ident),
    /// `x[i]`
    Index(Box<Spanned<Expr>>, Box<Spanned<Expr>>),
    /// `x[lo:hi]` or `x[lo:hi:max]`
    Slice(SliceExpr),
    /// `x.(T)`; the type is absent for `x.(type)` in a type switch
    TypeAssert(Box<Spanned<Expr>>, Option<Box<Spanned<Expr>>>),
    Call(CallExpr),
    /// `*x`: dereference in expressions, pointer type in type position
    Star(Box<Spanned<Expr>>),
    Unary(UnaryOp, Box<Spanned<Expr>>),
    Binary(Box<Spanned<Expr>>, BinaryOp, Box<Spanned<Expr>>),
    /// `key: value` inside a composite literal
    KeyValue(Box<Spanned<Expr>>, Box<Spanned<Expr>>),

    // Types
    /// `[len]elt`; `len` is absent for slices
    ArrayType(Option<Box<Spanned<Expr>>>, Box<Spanned<Expr>>),
    StructType(FieldList),
    FuncType(FuncType),
    InterfaceType(FieldList),
    MapType(Box<Spanned<Expr>>, Box<Spanned<Expr>>),
    ChanType(ChanDir, Box<Spanned<Expr>>),

    /// Remnant of parser error recovery; carries the offending source text.
    Bad(String),
}

impl Decl {
    /// Short kind name used in placeholders and diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Decl::Gen(_) => "GenDecl",
            Decl::Func(_) => "FuncDecl",
            Decl::Bad(_) => "BadDecl",
        }
    }
}

impl Expr {
    /// The identifier name, if this is a bare identifier.
    pub fn as_ident(&self) -> Option<&str> {
        match self {
            Expr::Ident(name) => Some(name),
            _ => None,
        }
    }

    /// Short kind name used in placeholders and diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expr::Ident(_) => "Ident",
            Expr::Ellipsis(_) => "Ellipsis",
            Expr::BasicLit(_) => "BasicLit",
            Expr::FuncLit(_) => "FuncLit",
            Expr::CompositeLit(_) => "CompositeLit",
            Expr::Paren(_) => "Paren",
            Expr::Selector(..) => "Selector",
            Expr::Index(..) => "Index",
            Expr::Slice(_) => "Slice",
            Expr::TypeAssert(..) => "TypeAssert",
            Expr::Call(_) => "Call",
            Expr::Star(_) => "Star",
            Expr::Unary(..) => "Unary",
            Expr::Binary(..) => "Binary",
            Expr::KeyValue(..) => "KeyValue",
            Expr::ArrayType(..) => "ArrayType",
            Expr::StructType(_) => "StructType",
            Expr::FuncType(_) => "FuncType",
            Expr::InterfaceType(_) => "InterfaceType",
            Expr::MapType(..) => "MapType",
            Expr::ChanType(..) => "ChanType",
            Expr::Bad(_) => "BadExpr",
        }
    }
}

impl Stmt {
    /// Short kind name used in placeholders and diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Stmt::Decl(_) => "DeclStmt",
            Stmt::Empty => "EmptyStmt",
            Stmt::Labeled(_) => "LabeledStmt",
            Stmt::Expr(_) => "ExprStmt",
            Stmt::Send(_) => "SendStmt",
            Stmt::IncDec(_) => "IncDecStmt",
            Stmt::Assign(_) => "AssignStmt",
            Stmt::Go(_) => "GoStmt",
            Stmt::Defer(_) => "DeferStmt",
            Stmt::Return(_) => "ReturnStmt",
            Stmt::Branch(_) => "BranchStmt",
            Stmt::Block(_) => "BlockStmt",
            Stmt::If(_) => "IfStmt",
            Stmt::Switch(_) => "SwitchStmt",
            Stmt::TypeSwitch(_) => "TypeSwitchStmt",
            Stmt::Select(_) => "SelectStmt",
            Stmt::For(_) => "ForStmt",
            Stmt::Range(_) => "RangeStmt",
            Stmt::Bad(_) => "BadStmt",
        }
    }
}
