//! The backend contract.
//!
//! The walker owns traversal order; a backend owns layout and every rewrite policy. Structural callbacks
//! (`announce_*`, `open_*`, `close_*`) write to the backend's [`Output`]; formatting helpers (`format_*`) turn
//! one already-rendered node into text and never touch the sink.
//!
//! Views passed across the contract are built from the tree before any text exists, so policies that need
//! counts (multi-value results, named results) read structure instead of sniffing rendered strings.

use goshift_core::lang::tokens::{AssignOp, BinaryOp, BranchKind, ChanDir, DeclKeyword, IncDecOp, LitKind, UnaryOp};
use goshift_syntax::ast::Span;

use super::config::EmitConfig;
use super::context::ContextStack;
use super::output::Output;

// ============================================================================
// Views
// ============================================================================

/// A parameter, result, receiver or struct field with its type already rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    /// Empty for anonymous parameters and embedded fields
    pub names: Vec<String>,
    pub ty: String,
    pub tag: Option<String>,
}

impl FieldView {
    pub fn new(names: Vec<String>, ty: impl Into<String>) -> Self {
        Self {
            names,
            ty: ty.into(),
            tag: None,
        }
    }

    /// Number of values this field declares.
    pub fn arity(&self) -> usize {
        self.names.len().max(1)
    }
}

/// Parameters and results of a function, function type or closure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignatureView {
    pub params: Vec<FieldView>,
    /// `None` when the source has no result list at all
    pub results: Option<Vec<FieldView>>,
}

impl SignatureView {
    pub fn result_arity(&self) -> usize {
        self.results.as_ref().map_or(0, |r| r.iter().map(FieldView::arity).sum())
    }

    pub fn has_named_results(&self) -> bool {
        self.results
            .as_ref()
            .is_some_and(|r| !r.is_empty() && r.iter().all(|f| !f.names.is_empty()))
    }

    /// Result types expanded per declared value (`(a, b int)` yields `int, int`).
    pub fn result_types(&self) -> Vec<&str> {
        self.results
            .iter()
            .flatten()
            .flat_map(|f| std::iter::repeat_n(f.ty.as_str(), f.arity()))
            .collect()
    }

    /// Parameter types expanded per declared value.
    pub fn param_types(&self) -> Vec<&str> {
        self.params
            .iter()
            .flat_map(|f| std::iter::repeat_n(f.ty.as_str(), f.arity()))
            .collect()
    }
}

/// Method receiver, read structurally from `(name T)` or `(name *T)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiverView {
    pub name: Option<String>,
    /// Receiver base type name
    pub type_name: String,
    pub pointer: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncView {
    pub receiver: Option<ReceiverView>,
    pub name: String,
    pub sig: SignatureView,
    /// `false` for external declarations without a body
    pub has_body: bool,
}

/// One interface entry: a method signature or an embedded interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterfaceEntry {
    Method { name: String, sig: SignatureView },
    Embedded(String),
}

/// Structural shape of a declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeShape {
    Struct(Vec<FieldView>),
    Interface(Vec<InterfaceEntry>),
    /// Any other type expression, already rendered
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeView {
    pub name: String,
    pub alias: bool,
    pub shape: TypeShape,
}

/// Type information read from an initializer's structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeHint {
    Int,
    Float,
    Imag,
    Char,
    String,
    Bool,
    Nil,
    /// Type of a typed composite literal, `make`, `new` or address-of, rendered by the backend
    Composite(String),
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueView {
    pub keyword: DeclKeyword,
    pub names: Vec<String>,
    pub ty: Option<String>,
    pub values: Vec<String>,
    /// One hint per value, in order
    pub hints: Vec<TypeHint>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignView {
    pub lhs: Vec<String>,
    pub op: AssignOp,
    pub rhs: Vec<String>,
    /// One hint per right-hand value, in order
    pub hints: Vec<TypeHint>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeView {
    pub key: Option<String>,
    pub value: Option<String>,
    /// `:=` (true) or `=` (false); irrelevant when both key and value are absent
    pub define: bool,
    pub x: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchView {
    /// Captured initializer statement, empty when absent
    pub init: String,
    /// Discriminant; for type switches the captured guard statement
    pub tag: String,
}

/// What kind of composite literal a key-value pair sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeKind {
    Map,
    Array,
    Struct,
}

/// A node the backend cannot translate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder<'a> {
    pub kind: &'a str,
    /// Structural dump of the node
    pub dump: &'a str,
    pub span: Span,
}

// ============================================================================
// Emitter
// ============================================================================

/// A stateful text-emission backend.
///
/// Every method is infallible: constructs a target cannot express become visible placeholders rather than
/// errors.
pub trait Emitter {
    /// Registry name of the target (`"cpp"`, `"go"`)
    fn target_name(&self) -> &'static str;

    fn config(&self) -> &EmitConfig;
    fn output(&self) -> &Output;
    fn output_mut(&mut self) -> &mut Output;
    fn contexts(&self) -> &ContextStack;
    fn contexts_mut(&mut self) -> &mut ContextStack;

    // ------------------------------------------------------------------------
    // Declarations
    // ------------------------------------------------------------------------

    fn announce_module(&mut self, name: &str);

    /// `local` is the explicit alias when one was written.
    fn announce_import(&mut self, local: Option<&str>, path: &str);

    fn announce_type(&mut self, ty: &TypeView);

    fn announce_value(&mut self, value: &ValueView);

    /// Header of a function declaration; a bodiless declaration is a prototype.
    fn announce_function(&mut self, func: &FuncView);

    fn close_function(&mut self, func: &FuncView);

    /// A closure is about to be rendered; its context has already been pushed.
    fn announce_closure(&mut self, _sig: &SignatureView) {}

    fn open_group(&mut self, keyword: DeclKeyword, grouped: bool);

    fn close_group(&mut self, keyword: DeclKeyword, grouped: bool);

    // ------------------------------------------------------------------------
    // Blocks and control flow
    // ------------------------------------------------------------------------

    fn open_block(&mut self);

    /// Writes the closing brace; the line is left open for `else` or the construct's own close.
    fn close_block(&mut self);

    /// `init` is the captured initializer statement, empty when absent.
    fn announce_if(&mut self, init: &str, cond: &str);

    fn announce_else(&mut self);

    fn close_if(&mut self);

    /// `init` and `post` are captured statements; any part may be empty.
    fn announce_for(&mut self, init: &str, cond: &str, post: &str);

    fn announce_range(&mut self, range: &RangeView);

    fn close_loop(&mut self);

    fn announce_switch(&mut self, switch: &SwitchView);

    fn close_switch(&mut self);

    /// An empty list is the default clause.
    fn announce_case(&mut self, list: &[String]);

    /// `falls_through` is set when the clause body ends in `fallthrough`.
    fn close_case(&mut self, falls_through: bool);

    fn announce_select(&mut self);

    /// `comm` is the captured communication statement; empty for the default clause.
    fn announce_comm(&mut self, comm: &str);

    fn close_select(&mut self);

    fn announce_label(&mut self, label: &str);

    /// The statement carrying `label` has been fully emitted.
    fn close_label(&mut self, _label: &str) {}

    fn announce_branch(&mut self, kind: BranchKind, label: Option<&str>);

    // ------------------------------------------------------------------------
    // Simple statements
    // ------------------------------------------------------------------------

    fn announce_defer(&mut self, call: &str);

    fn announce_go(&mut self, call: &str);

    fn announce_return(&mut self, values: &[String]);

    fn announce_expr_stmt(&mut self, expr: &str);

    fn announce_assign(&mut self, assign: &AssignView);

    fn announce_inc_dec(&mut self, x: &str, op: IncDecOp);

    fn announce_send(&mut self, chan: &str, value: &str);

    fn announce_empty(&mut self);

    /// Statement-level placeholder for a node that cannot be translated.
    fn announce_placeholder(&mut self, node: &Placeholder<'_>);

    // ------------------------------------------------------------------------
    // Formatting helpers
    // ------------------------------------------------------------------------

    fn format_ident(&self, name: &str) -> String;
    fn format_literal(&self, kind: LitKind, value: &str) -> String;
    /// `is_package` is set when `x` names an imported package.
    fn format_selector(&self, x: &str, sel: &str, is_package: bool) -> String;
    fn format_unary(&self, op: UnaryOp, x: &str) -> String;
    fn format_binary(&self, x: &str, op: BinaryOp, y: &str) -> String;
    fn format_index(&self, x: &str, index: &str) -> String;
    fn format_slice(&self, x: &str, low: Option<&str>, high: Option<&str>, max: Option<&str>) -> String;
    /// `spread` marks a call forwarding a variadic argument (`f(xs...)`).
    fn format_call(&self, fun: &str, args: &[String], spread: bool) -> String;
    fn format_make(&self, ty: &str, args: &[String]) -> String;
    fn format_new(&self, ty: &str) -> String;
    /// `ty` is `None` for the `x.(type)` guard of a type switch.
    fn format_type_assert(&self, x: &str, ty: Option<&str>) -> String;
    fn format_paren(&self, x: &str) -> String;
    fn format_star(&self, x: &str) -> String;
    fn format_pointer_type(&self, ty: &str) -> String;
    /// `len` is `None` for slices.
    fn format_array_type(&self, len: Option<&str>, elt: &str) -> String;
    fn format_map_type(&self, key: &str, value: &str) -> String;
    fn format_chan_type(&self, dir: ChanDir, value: &str) -> String;
    fn format_func_type(&self, sig: &SignatureView) -> String;
    fn format_struct_type(&self, fields: &[FieldView]) -> String;
    fn format_interface_type(&self, entries: &[InterfaceEntry]) -> String;
    fn format_ellipsis(&self, elt: Option<&str>) -> String;
    fn format_composite_lit(&self, ty: Option<&str>, elts: &[String]) -> String;
    fn format_key_value(&self, key: &str, value: &str, kind: CompositeKind) -> String;
    /// `body` is the captured block text, braces included.
    fn format_func_lit(&self, sig: &SignatureView, body: &str) -> String;
    /// Expression-level placeholder for a node that cannot be translated.
    fn format_placeholder(&self, node: &Placeholder<'_>) -> String;
}

/// Comment text shared by both placeholder forms.
pub fn placeholder_comment(node: &Placeholder<'_>, with_position: bool) -> String {
    // A dump containing `*/` would end the comment early.
    let dump = node.dump.replace("*/", "* /");
    if with_position {
        format!("/* Node: {} @ {} {} */", node.kind, node.span, dump)
    } else {
        format!("/* Node: {} {} */", node.kind, dump)
    }
}

/// Strip the statement terminator from captured statement text.
pub fn strip_terminator(stmt: &str) -> &str {
    stmt.trim_end().trim_end_matches(';').trim_end()
}
