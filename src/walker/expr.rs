//! Expression and type rendering.
//!
//! Rendering is a function from node to text: it never writes to the live output. The one exception in shape
//! is a function literal, whose body is a block; it is rendered through the statement path inside a capture
//! and its own context scope.

use goshift_core::lang::tokens::{LitKind, UnaryOp};
use goshift_syntax::ast::{CallExpr, CompositeLit, Expr, FieldList, FuncLit, FuncType, Spanned};

use super::{Parent, Walker};
use crate::emit::{
    CompositeKind, Emitter, FieldView, InterfaceEntry, Placeholder, ReceiverView, SignatureView, TypeHint, TypeShape,
};

impl<E: Emitter + ?Sized> Walker<'_, E> {
    // ========================================================================
    // Expressions
    // ========================================================================

    pub(super) fn render_expr(&mut self, expr: &Spanned<Expr>) -> String {
        match &expr.node {
            Expr::Ident(name) => self.backend.format_ident(name),
            Expr::BasicLit(lit) => self.backend.format_literal(lit.kind, &lit.value),
            Expr::FuncLit(func) => self.render_func_lit(func),
            Expr::CompositeLit(lit) => self.render_composite(lit, None).0,
            Expr::Paren(x) => {
                let x = self.render_expr(x);
                self.backend.format_paren(&x)
            }
            Expr::Selector(x, sel) => match x.node.as_ident().filter(|name| self.packages.contains(*name)) {
                Some(package) => self.backend.format_selector(package, sel, true),
                None => {
                    let x = self.render_expr(x);
                    self.backend.format_selector(&x, sel, false)
                }
            },
            Expr::Index(x, index) => {
                let x = self.render_expr(x);
                let index = self.render_expr(index);
                self.backend.format_index(&x, &index)
            }
            Expr::Slice(slice) => {
                let x = self.render_expr(&slice.x);
                let low = slice.low.as_ref().map(|e| self.render_expr(e));
                let high = slice.high.as_ref().map(|e| self.render_expr(e));
                let max = slice.max.as_ref().map(|e| self.render_expr(e));
                self.backend
                    .format_slice(&x, low.as_deref(), high.as_deref(), max.as_deref())
            }
            Expr::TypeAssert(x, ty) => {
                let x = self.render_expr(x);
                let ty = ty.as_ref().map(|t| self.render_type(t));
                self.backend.format_type_assert(&x, ty.as_deref())
            }
            Expr::Call(call) => self.render_call(call).0,
            Expr::Star(x) => {
                let x = self.render_expr(x);
                self.backend.format_star(&x)
            }
            Expr::Unary(op, x) => {
                let x = self.render_expr(x);
                self.backend.format_unary(*op, &x)
            }
            Expr::Binary(x, op, y) => {
                let x = self.render_expr(x);
                let y = self.render_expr(y);
                self.backend.format_binary(&x, *op, &y)
            }
            Expr::KeyValue(key, value) => {
                let kind = match self.parents.last() {
                    Some(Parent::Composite(kind)) => *kind,
                    _ => CompositeKind::Struct,
                };
                let key = self.render_expr(key);
                let value = self.render_expr(value);
                self.backend.format_key_value(&key, &value, kind)
            }
            Expr::Ellipsis(_)
            | Expr::ArrayType(..)
            | Expr::StructType(_)
            | Expr::FuncType(_)
            | Expr::InterfaceType(_)
            | Expr::MapType(..)
            | Expr::ChanType(..) => self.render_type(expr),
            Expr::Bad(_) => self.placeholder_expr(expr),
        }
    }

    /// `make` and `new` take a type as their first argument; the hint carries the type they produce.
    fn render_call(&mut self, call: &CallExpr) -> (String, TypeHint) {
        let builtin = match call.fun.node.as_ident() {
            Some(name @ ("make" | "new")) if !call.args.is_empty() => Some(name),
            _ => None,
        };
        if let Some(builtin) = builtin {
            let ty = self.render_type(&call.args[0]);
            if builtin == "new" {
                let hint = TypeHint::Composite(self.backend.format_pointer_type(&ty));
                return (self.backend.format_new(&ty), hint);
            }
            let rest: Vec<String> = call.args[1..].iter().map(|a| self.render_expr(a)).collect();
            return (self.backend.format_make(&ty, &rest), TypeHint::Composite(ty));
        }

        let fun = self.render_expr(&call.fun);
        let args: Vec<String> = call.args.iter().map(|a| self.render_expr(a)).collect();
        (self.backend.format_call(&fun, &args, call.ellipsis), TypeHint::Unknown)
    }

    fn render_func_lit(&mut self, func: &FuncLit) -> String {
        self.backend.contexts_mut().push();
        let sig = self.signature(&func.ty);
        self.backend.announce_closure(&sig);
        self.out().begin_capture();
        self.walk_block(&func.body);
        let body = self.out().end_capture();
        self.backend.contexts_mut().pop();
        self.backend.format_func_lit(&sig, &body)
    }

    /// `implied` is the element type an elided nested literal inherits from its parent literal.
    /// Returns the literal and its rendered type, when it names one.
    fn render_composite(&mut self, lit: &CompositeLit, implied: Option<&Spanned<Expr>>) -> (String, Option<String>) {
        let ty_expr = lit.ty.as_deref().or(implied);
        let kind = ty_expr.map_or(CompositeKind::Struct, composite_kind);
        let key_ty = ty_expr.and_then(key_type);
        let elt_ty = ty_expr.and_then(element_type);
        let ty = lit.ty.as_ref().map(|t| self.render_type(t));

        self.parents.push(Parent::Composite(kind));
        let elts: Vec<String> = lit
            .elts
            .iter()
            .map(|elt| match &elt.node {
                Expr::KeyValue(key, value) => {
                    let key = self.render_element(key, key_ty);
                    let value = self.render_element(value, elt_ty);
                    self.backend.format_key_value(&key, &value, kind)
                }
                _ => self.render_element(elt, elt_ty),
            })
            .collect();
        self.parents.pop();

        let text = self.backend.format_composite_lit(ty.as_deref(), &elts);
        (text, ty)
    }

    fn render_element(&mut self, elt: &Spanned<Expr>, implied: Option<&Spanned<Expr>>) -> String {
        match &elt.node {
            Expr::CompositeLit(lit) if lit.ty.is_none() => self.render_composite(lit, implied).0,
            _ => self.render_expr(elt),
        }
    }

    fn placeholder_expr(&mut self, expr: &Spanned<Expr>) -> String {
        let kind = expr.node.kind_name();
        let dump = format!("{:?}", expr.node);
        tracing::warn!(kind, span = %expr.span, "node replaced by placeholder");
        self.backend.format_placeholder(&Placeholder {
            kind,
            dump: &dump,
            span: expr.span,
        })
    }

    // ========================================================================
    // Types
    // ========================================================================

    /// Render an expression in type position: `*T` is a pointer type rather than a dereference.
    pub(super) fn render_type(&mut self, ty: &Spanned<Expr>) -> String {
        match &ty.node {
            Expr::Star(inner) => {
                let inner = self.render_type(inner);
                self.backend.format_pointer_type(&inner)
            }
            Expr::Paren(inner) => {
                let inner = self.render_type(inner);
                self.backend.format_paren(&inner)
            }
            Expr::ArrayType(len, elt) => {
                let len = len.as_ref().map(|l| self.render_expr(l));
                let elt = self.render_type(elt);
                self.backend.format_array_type(len.as_deref(), &elt)
            }
            Expr::MapType(key, value) => {
                let key = self.render_type(key);
                let value = self.render_type(value);
                self.backend.format_map_type(&key, &value)
            }
            Expr::ChanType(dir, value) => {
                let value = self.render_type(value);
                self.backend.format_chan_type(*dir, &value)
            }
            Expr::FuncType(func) => {
                let sig = self.signature(func);
                self.backend.format_func_type(&sig)
            }
            Expr::StructType(fields) => {
                let fields = self.field_views(fields);
                self.backend.format_struct_type(&fields)
            }
            Expr::InterfaceType(methods) => {
                let entries = self.interface_entries(methods);
                self.backend.format_interface_type(&entries)
            }
            Expr::Ellipsis(elt) => {
                let elt = elt.as_ref().map(|e| self.render_type(e));
                self.backend.format_ellipsis(elt.as_deref())
            }
            _ => self.render_expr(ty),
        }
    }

    pub(super) fn field_views(&mut self, list: &FieldList) -> Vec<FieldView> {
        list.fields
            .iter()
            .map(|field| FieldView {
                names: field.names.clone(),
                ty: self.render_type(&field.ty),
                tag: field.tag.clone(),
            })
            .collect()
    }

    pub(super) fn signature(&mut self, func: &FuncType) -> SignatureView {
        SignatureView {
            params: self.field_views(&func.params),
            results: func.results.as_ref().map(|r| self.field_views(r)),
        }
    }

    fn interface_entries(&mut self, list: &FieldList) -> Vec<InterfaceEntry> {
        let mut entries = Vec::new();
        for field in &list.fields {
            match &field.ty.node {
                Expr::FuncType(func) if !field.names.is_empty() => {
                    let sig = self.signature(func);
                    for name in &field.names {
                        entries.push(InterfaceEntry::Method {
                            name: name.clone(),
                            sig: sig.clone(),
                        });
                    }
                }
                _ => entries.push(InterfaceEntry::Embedded(self.render_type(&field.ty))),
            }
        }
        entries
    }

    pub(super) fn type_shape(&mut self, ty: &Spanned<Expr>) -> TypeShape {
        match &ty.node {
            Expr::StructType(fields) => TypeShape::Struct(self.field_views(fields)),
            Expr::InterfaceType(methods) => TypeShape::Interface(self.interface_entries(methods)),
            _ => TypeShape::Other(self.render_type(ty)),
        }
    }

    /// Receiver of a method, read from `(name T)` or `(name *T)`.
    pub(super) fn receiver_view(&mut self, recv: &FieldList) -> Option<ReceiverView> {
        let field = recv.fields.first()?;
        let (base, pointer) = match &field.ty.node {
            Expr::Star(inner) => (&**inner, true),
            _ => (&field.ty, false),
        };
        Some(ReceiverView {
            name: field.names.first().cloned(),
            type_name: self.render_type(base),
            pointer,
        })
    }

    // ========================================================================
    // Type hints
    // ========================================================================

    /// Render an initializer together with its structural type.
    ///
    /// Type nodes are rendered once: a composite hint reuses the type text the value rendering produced.
    pub(super) fn render_value(&mut self, expr: &Spanned<Expr>) -> (String, TypeHint) {
        match &expr.node {
            Expr::CompositeLit(lit) => {
                let (text, ty) = self.render_composite(lit, None);
                (text, ty.map_or(TypeHint::Unknown, TypeHint::Composite))
            }
            Expr::Unary(UnaryOp::And, x) if matches!(&x.node, Expr::CompositeLit(lit) if lit.ty.is_some()) => {
                let (inner, hint) = self.render_value(x);
                let hint = match hint {
                    TypeHint::Composite(ty) => TypeHint::Composite(self.backend.format_pointer_type(&ty)),
                    other => other,
                };
                (self.backend.format_unary(UnaryOp::And, &inner), hint)
            }
            Expr::Paren(x) => {
                let (inner, hint) = self.render_value(x);
                (self.backend.format_paren(&inner), hint)
            }
            Expr::Call(call) => self.render_call(call),
            _ => (self.render_expr(expr), type_hint(expr)),
        }
    }
}

/// Structural type of a scalar initializer, read from the node alone.
fn type_hint(expr: &Spanned<Expr>) -> TypeHint {
    match &expr.node {
        Expr::BasicLit(lit) => match lit.kind {
            LitKind::Int => TypeHint::Int,
            LitKind::Float => TypeHint::Float,
            LitKind::Imag => TypeHint::Imag,
            LitKind::Char => TypeHint::Char,
            LitKind::String => TypeHint::String,
        },
        Expr::Ident(name) => match name.as_str() {
            "true" | "false" => TypeHint::Bool,
            "nil" => TypeHint::Nil,
            "iota" => TypeHint::Int,
            _ => TypeHint::Unknown,
        },
        Expr::Unary(UnaryOp::Not, _) => TypeHint::Bool,
        Expr::Unary(UnaryOp::Plus | UnaryOp::Minus, x) | Expr::Paren(x) => type_hint(x),
        Expr::Binary(x, op, y) => {
            if op.yields_bool() {
                return TypeHint::Bool;
            }
            let left = type_hint(x);
            if left == type_hint(y) { left } else { TypeHint::Unknown }
        }
        _ => TypeHint::Unknown,
    }
}

fn composite_kind(ty: &Spanned<Expr>) -> CompositeKind {
    match &ty.node {
        Expr::MapType(..) => CompositeKind::Map,
        Expr::ArrayType(..) => CompositeKind::Array,
        Expr::Star(inner) => composite_kind(inner),
        _ => CompositeKind::Struct,
    }
}

fn element_type(ty: &Spanned<Expr>) -> Option<&Spanned<Expr>> {
    match &ty.node {
        Expr::ArrayType(_, elt) => Some(&**elt),
        Expr::MapType(_, value) => Some(&**value),
        Expr::Star(inner) => element_type(inner),
        _ => None,
    }
}

fn key_type(ty: &Spanned<Expr>) -> Option<&Spanned<Expr>> {
    match &ty.node {
        Expr::MapType(key, _) => Some(&**key),
        _ => None,
    }
}
