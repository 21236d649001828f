//! Terse constructors for synthetic trees.
//!
//! Tooling and tests build trees without a parser; these helpers wrap every node in a synthetic span so call
//! sites read close to the source they stand for.
//!
//! ## Examples
//! ```rust
//! use goshift_syntax::builders::*;
//!
//! // fmt.Println("hi")
//! let e = call(sel(ident("fmt"), "Println"), vec![string("\"hi\"")]);
//! assert_eq!(e.node.kind_name(), "Call");
//! ```

use goshift_core::lang::tokens::{AssignOp, BinaryOp, BranchKind, ChanDir, DeclKeyword, IncDecOp, LitKind, UnaryOp};

use crate::ast::*;

pub type E = Spanned<Expr>;
pub type S = Spanned<Stmt>;

pub fn sp<T>(node: T) -> Spanned<T> {
    Spanned::synthetic(node)
}

fn bx(e: E) -> Box<E> {
    Box::new(e)
}

// ---------------------------------------------------------------------------
// Expressions
// ---------------------------------------------------------------------------

pub fn ident(name: &str) -> E {
    sp(Expr::Ident(name.to_string()))
}

pub fn lit(kind: LitKind, value: &str) -> E {
    sp(Expr::BasicLit(BasicLit {
        kind,
        value: value.to_string(),
    }))
}

pub fn int(value: i64) -> E {
    lit(LitKind::Int, &value.to_string())
}

/// String literal; `value` is the source text including quotes.
pub fn string(value: &str) -> E {
    lit(LitKind::String, value)
}

pub fn sel(x: E, name: &str) -> E {
    sp(Expr::Selector(bx(x), name.to_string()))
}

pub fn call(fun: E, args: Vec<E>) -> E {
    sp(Expr::Call(CallExpr {
        fun: bx(fun),
        args,
        ellipsis: false,
    }))
}

pub fn call_spread(fun: E, args: Vec<E>) -> E {
    sp(Expr::Call(CallExpr {
        fun: bx(fun),
        args,
        ellipsis: true,
    }))
}

pub fn binary(x: E, op: BinaryOp, y: E) -> E {
    sp(Expr::Binary(bx(x), op, bx(y)))
}

pub fn unary(op: UnaryOp, x: E) -> E {
    sp(Expr::Unary(op, bx(x)))
}

pub fn star(x: E) -> E {
    sp(Expr::Star(bx(x)))
}

pub fn paren(x: E) -> E {
    sp(Expr::Paren(bx(x)))
}

pub fn index(x: E, i: E) -> E {
    sp(Expr::Index(bx(x), bx(i)))
}

pub fn slice(x: E, low: Option<E>, high: Option<E>, max: Option<E>) -> E {
    sp(Expr::Slice(SliceExpr {
        x: bx(x),
        low: low.map(bx),
        high: high.map(bx),
        max: max.map(bx),
    }))
}

pub fn key_value(key: E, value: E) -> E {
    sp(Expr::KeyValue(bx(key), bx(value)))
}

pub fn composite(ty: Option<E>, elts: Vec<E>) -> E {
    sp(Expr::CompositeLit(CompositeLit { ty: ty.map(bx), elts }))
}

pub fn type_assert(x: E, ty: Option<E>) -> E {
    sp(Expr::TypeAssert(bx(x), ty.map(bx)))
}

pub fn ellipsis(elt: Option<E>) -> E {
    sp(Expr::Ellipsis(elt.map(bx)))
}

pub fn func_lit(ty: FuncType, body: Vec<S>) -> E {
    sp(Expr::FuncLit(FuncLit {
        ty,
        body: Block::new(body),
    }))
}

pub fn array_of(len: Option<E>, elt: E) -> E {
    sp(Expr::ArrayType(len.map(bx), bx(elt)))
}

pub fn map_of(key: E, value: E) -> E {
    sp(Expr::MapType(bx(key), bx(value)))
}

pub fn chan_of(dir: ChanDir, value: E) -> E {
    sp(Expr::ChanType(dir, bx(value)))
}

pub fn struct_of(fields: Vec<Field>) -> E {
    sp(Expr::StructType(FieldList::new(fields)))
}

pub fn interface_of(methods: Vec<Field>) -> E {
    sp(Expr::InterfaceType(FieldList::new(methods)))
}

pub fn func_type_expr(ty: FuncType) -> E {
    sp(Expr::FuncType(ty))
}

// ---------------------------------------------------------------------------
// Fields and signatures
// ---------------------------------------------------------------------------

pub fn field(names: &[&str], ty: E) -> Field {
    Field {
        names: names.iter().map(|n| n.to_string()).collect(),
        ty,
        tag: None,
    }
}

pub fn anon(ty: E) -> Field {
    field(&[], ty)
}

pub fn sig(params: Vec<Field>, results: Option<Vec<Field>>) -> FuncType {
    FuncType {
        params: FieldList::new(params),
        results: results.map(FieldList::new),
    }
}

// ---------------------------------------------------------------------------
// Statements
// ---------------------------------------------------------------------------

pub fn expr_stmt(e: E) -> S {
    sp(Stmt::Expr(e))
}

pub fn assign(lhs: Vec<E>, op: AssignOp, rhs: Vec<E>) -> S {
    sp(Stmt::Assign(AssignStmt { lhs, op, rhs }))
}

pub fn define(name: &str, value: E) -> S {
    assign(vec![ident(name)], AssignOp::Define, vec![value])
}

pub fn inc(x: E) -> S {
    sp(Stmt::IncDec(IncDecStmt { x, op: IncDecOp::Inc }))
}

pub fn dec(x: E) -> S {
    sp(Stmt::IncDec(IncDecStmt { x, op: IncDecOp::Dec }))
}

pub fn ret(values: Vec<E>) -> S {
    sp(Stmt::Return(values))
}

pub fn defer(call: E) -> S {
    sp(Stmt::Defer(call))
}

pub fn go(call: E) -> S {
    sp(Stmt::Go(call))
}

pub fn send(chan: E, value: E) -> S {
    sp(Stmt::Send(SendStmt { chan, value }))
}

pub fn branch(kind: BranchKind, label: Option<&str>) -> S {
    sp(Stmt::Branch(BranchStmt {
        kind,
        label: label.map(str::to_string),
    }))
}

pub fn block_stmt(stmts: Vec<S>) -> S {
    sp(Stmt::Block(Block::new(stmts)))
}

pub fn if_stmt(init: Option<S>, cond: E, body: Vec<S>, els: Option<S>) -> S {
    sp(Stmt::If(IfStmt {
        init: init.map(Box::new),
        cond,
        body: Block::new(body),
        els: els.map(Box::new),
    }))
}

pub fn for_stmt(init: Option<S>, cond: Option<E>, post: Option<S>, body: Vec<S>) -> S {
    sp(Stmt::For(ForStmt {
        init: init.map(Box::new),
        cond,
        post: post.map(Box::new),
        body: Block::new(body),
    }))
}

pub fn range_stmt(key: Option<E>, value: Option<E>, x: E, body: Vec<S>) -> S {
    let op = if key.is_some() || value.is_some() {
        Some(AssignOp::Define)
    } else {
        None
    };
    sp(Stmt::Range(RangeStmt {
        key,
        value,
        op,
        x,
        body: Block::new(body),
    }))
}

pub fn case(list: Vec<E>, body: Vec<S>) -> Spanned<CaseClause> {
    sp(CaseClause { list, body })
}

pub fn switch_stmt(init: Option<S>, tag: Option<E>, clauses: Vec<Spanned<CaseClause>>) -> S {
    sp(Stmt::Switch(SwitchStmt {
        init: init.map(Box::new),
        tag,
        clauses,
    }))
}

pub fn type_switch(assign: S, clauses: Vec<Spanned<CaseClause>>) -> S {
    sp(Stmt::TypeSwitch(TypeSwitchStmt {
        init: None,
        assign: Box::new(assign),
        clauses,
    }))
}

pub fn comm(comm: Option<S>, body: Vec<S>) -> Spanned<CommClause> {
    sp(CommClause {
        comm: comm.map(Box::new),
        body,
    })
}

pub fn select(clauses: Vec<Spanned<CommClause>>) -> S {
    sp(Stmt::Select(SelectStmt { clauses }))
}

pub fn labeled(label: &str, stmt: S) -> S {
    sp(Stmt::Labeled(LabeledStmt {
        label: label.to_string(),
        stmt: Box::new(stmt),
    }))
}

pub fn decl_stmt(decl: GenDecl) -> S {
    sp(Stmt::Decl(decl))
}

// ---------------------------------------------------------------------------
// Declarations
// ---------------------------------------------------------------------------

pub fn value_spec(names: &[&str], ty: Option<E>, values: Vec<E>) -> Spanned<Spec> {
    sp(Spec::Value(ValueSpec {
        names: names.iter().map(|n| n.to_string()).collect(),
        ty,
        values,
    }))
}

pub fn gen_decl(keyword: DeclKeyword, specs: Vec<Spanned<Spec>>) -> GenDecl {
    GenDecl {
        keyword,
        grouped: specs.len() > 1,
        specs,
    }
}

pub fn const_group(specs: Vec<Spanned<Spec>>) -> Spanned<Decl> {
    sp(Decl::Gen(gen_decl(DeclKeyword::Const, specs)))
}

pub fn var_decl(specs: Vec<Spanned<Spec>>) -> Spanned<Decl> {
    sp(Decl::Gen(gen_decl(DeclKeyword::Var, specs)))
}

pub fn import(name: Option<&str>, path: &str) -> Spanned<Spec> {
    sp(Spec::Import(ImportSpec {
        name: name.map(str::to_string),
        path: path.to_string(),
    }))
}

pub fn imports(specs: Vec<Spanned<Spec>>) -> Spanned<Decl> {
    sp(Decl::Gen(gen_decl(DeclKeyword::Import, specs)))
}

pub fn type_decl(name: &str, ty: E) -> Spanned<Decl> {
    sp(Decl::Gen(gen_decl(
        DeclKeyword::Type,
        vec![sp(Spec::Type(TypeSpec {
            name: name.to_string(),
            alias: false,
            ty,
        }))],
    )))
}

pub fn func(name: &str, ty: FuncType, body: Vec<S>) -> Spanned<Decl> {
    sp(Decl::Func(FuncDecl {
        recv: None,
        name: name.to_string(),
        ty,
        body: Some(Block::new(body)),
    }))
}

pub fn method(recv: Field, name: &str, ty: FuncType, body: Vec<S>) -> Spanned<Decl> {
    sp(Decl::Func(FuncDecl {
        recv: Some(FieldList::new(vec![recv])),
        name: name.to_string(),
        ty,
        body: Some(Block::new(body)),
    }))
}

pub fn module(name: &str, decls: Vec<Spanned<Decl>>) -> Module {
    Module {
        name: name.to_string(),
        decls,
    }
}
