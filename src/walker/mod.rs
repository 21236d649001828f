//! Tree walker
//!
//! The single traversal engine: visits every node of a [`Module`] depth-first, pre-order, and drives a backend
//! through the [`Emitter`] contract. Statement-shaped children that must appear inline (initializers, post
//! statements, switch guards, select communications, closure bodies) are rendered through the same statement
//! path inside a capture, so they never reach the live output directly.
//!
//! ## Notes
//!
//! - The walker never fails: nodes nothing can translate become placeholders and traversal continues.
//! - Per-scope bookkeeping (context push/pop, sequence-constant reset and advance) happens here; the state
//!   itself lives in the backend's `ContextStack`.

#![deny(clippy::unwrap_used)]

mod expr;

use std::collections::HashSet;
use std::io;

use goshift_core::lang::packages::default_import_name;
use goshift_core::lang::tokens::{AssignOp, BranchKind, DeclKeyword};
use goshift_syntax::ast::{
    Block, CaseClause, CommClause, Decl, ForStmt, FuncDecl, GenDecl, IfStmt, Module, RangeStmt, SelectStmt, Span, Spec,
    Spanned, Stmt, SwitchStmt, TypeSwitchStmt,
};

use crate::emit::{
    AssignView, CompositeKind, Emitter, FuncView, Output, Placeholder, RangeView, SwitchView, TypeView, ValueView,
};

/// Enclosing node that changes how its children render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Parent {
    /// Inside an `import`/`const`/`type`/`var` group
    Group(DeclKeyword),
    /// Inside the element list of a composite literal
    Composite(CompositeKind),
}

/// Drives one backend over one tree.
pub struct Walker<'a, E: Emitter + ?Sized> {
    backend: &'a mut E,
    parents: Vec<Parent>,
    /// Local names bound by imports, so `pkg.Name` can be told apart from `value.field`
    packages: HashSet<String>,
}

impl<'a, E: Emitter + ?Sized> Walker<'a, E> {
    pub fn new(backend: &'a mut E) -> Self {
        Self {
            backend,
            parents: Vec::new(),
            packages: HashSet::new(),
        }
    }

    /// Translate a whole module and return the finished text.
    #[tracing::instrument(skip_all, fields(module = %module.name, decl_count = module.decls.len(), target = backend.target_name()))]
    pub fn translate(module: &Module, backend: &'a mut E) -> String {
        let mut walker = Walker::new(backend);
        walker.walk_module(module);
        walker.backend.output_mut().take()
    }

    /// Translate a whole module into `writer`.
    pub fn translate_to<W: io::Write>(module: &Module, backend: &'a mut E, writer: &mut W) -> io::Result<()> {
        let text = Self::translate(module, backend);
        writer.write_all(text.as_bytes())?;
        writer.flush()
    }

    fn out(&mut self) -> &mut Output {
        self.backend.output_mut()
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    pub fn walk_module(&mut self, module: &Module) {
        self.backend.announce_module(&module.name);
        let separate = self.backend.config().blank_line_between_decls;
        for decl in &module.decls {
            self.out().ensure_line_start();
            if separate {
                self.out().blank_lines(1);
            }
            self.walk_decl(decl);
        }
        self.out().ensure_line_start();

        debug_assert_eq!(self.backend.contexts().depth(), 0, "unbalanced context stack");
        debug_assert_eq!(self.backend.output().current_indent(), 0, "unbalanced indentation");
    }

    fn walk_decl(&mut self, decl: &Spanned<Decl>) {
        match &decl.node {
            Decl::Gen(group) => self.walk_gen_decl(group),
            Decl::Func(func) => self.walk_func(func),
            Decl::Bad(_) => self.placeholder(decl.node.kind_name(), &decl.node, decl.span),
        }
    }

    fn walk_gen_decl(&mut self, group: &GenDecl) {
        self.backend.open_group(group.keyword, group.grouped);
        if group.keyword == DeclKeyword::Const {
            self.backend.contexts_mut().current_mut().reset_sequence();
        }
        self.parents.push(Parent::Group(group.keyword));
        for spec in &group.specs {
            self.walk_spec(spec);
        }
        self.parents.pop();
        self.backend.close_group(group.keyword, group.grouped);
    }

    fn current_keyword(&self) -> DeclKeyword {
        self.parents
            .iter()
            .rev()
            .find_map(|p| match p {
                Parent::Group(keyword) => Some(*keyword),
                Parent::Composite(_) => None,
            })
            .unwrap_or(DeclKeyword::Var)
    }

    fn walk_spec(&mut self, spec: &Spanned<Spec>) {
        match &spec.node {
            Spec::Import(import) => {
                let local = import.name.as_deref().unwrap_or_else(|| default_import_name(&import.path));
                if local != "_" && local != "." {
                    self.packages.insert(local.to_string());
                }
                self.backend.announce_import(import.name.as_deref(), &import.path);
            }
            Spec::Type(ty) => {
                let view = TypeView {
                    name: ty.name.clone(),
                    alias: ty.alias,
                    shape: self.type_shape(&ty.ty),
                };
                self.backend.announce_type(&view);
            }
            Spec::Value(value) => {
                let keyword = self.current_keyword();
                let ty = value.ty.as_ref().map(|t| self.render_type(t));
                let (values, hints) = value.values.iter().map(|v| self.render_value(v)).unzip();
                let view = ValueView {
                    keyword,
                    names: value.names.clone(),
                    ty,
                    values,
                    hints,
                };
                self.backend.announce_value(&view);
                if keyword == DeclKeyword::Const {
                    self.backend.contexts_mut().current_mut().advance_sequence();
                }
            }
        }
    }

    #[tracing::instrument(level = "debug", skip_all, fields(name = %func.name))]
    fn walk_func(&mut self, func: &FuncDecl) {
        self.backend.contexts_mut().push();
        let view = FuncView {
            receiver: func.recv.as_ref().and_then(|recv| self.receiver_view(recv)),
            name: func.name.clone(),
            sig: self.signature(&func.ty),
            has_body: func.body.is_some(),
        };
        self.backend.announce_function(&view);
        if let Some(body) = &func.body {
            self.walk_block(body);
        }
        self.backend.close_function(&view);
        self.backend.contexts_mut().pop();
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn walk_block(&mut self, block: &Block) {
        self.backend.open_block();
        for stmt in &block.stmts {
            self.walk_stmt(stmt);
        }
        self.backend.close_block();
    }

    /// Render a statement in isolation and return its text.
    fn capture_stmt(&mut self, stmt: &Spanned<Stmt>) -> String {
        self.out().begin_capture();
        self.walk_stmt(stmt);
        self.out().end_capture()
    }

    fn capture_opt(&mut self, stmt: Option<&Spanned<Stmt>>) -> String {
        stmt.map(|s| self.capture_stmt(s)).unwrap_or_default()
    }

    fn walk_stmt(&mut self, stmt: &Spanned<Stmt>) {
        match &stmt.node {
            Stmt::Decl(group) => self.walk_gen_decl(group),
            Stmt::Empty => self.backend.announce_empty(),
            Stmt::Labeled(labeled) => {
                self.backend.announce_label(&labeled.label);
                self.walk_stmt(&labeled.stmt);
                self.backend.close_label(&labeled.label);
            }
            Stmt::Expr(expr) => {
                let text = self.render_expr(expr);
                self.backend.announce_expr_stmt(&text);
            }
            Stmt::Send(send) => {
                let chan = self.render_expr(&send.chan);
                let value = self.render_expr(&send.value);
                self.backend.announce_send(&chan, &value);
            }
            Stmt::IncDec(inc_dec) => {
                let x = self.render_expr(&inc_dec.x);
                self.backend.announce_inc_dec(&x, inc_dec.op);
            }
            Stmt::Assign(assign) => {
                let lhs = assign.lhs.iter().map(|e| self.render_expr(e)).collect();
                let (rhs, hints) = assign.rhs.iter().map(|e| self.render_value(e)).unzip();
                let view = AssignView {
                    lhs,
                    op: assign.op,
                    rhs,
                    hints,
                };
                self.backend.announce_assign(&view);
            }
            Stmt::Go(call) => {
                let text = self.render_expr(call);
                self.backend.announce_go(&text);
            }
            Stmt::Defer(call) => {
                let text = self.render_expr(call);
                self.backend.announce_defer(&text);
            }
            Stmt::Return(values) => {
                let values: Vec<String> = values.iter().map(|v| self.render_expr(v)).collect();
                self.backend.announce_return(&values);
            }
            Stmt::Branch(branch) => self.backend.announce_branch(branch.kind, branch.label.as_deref()),
            Stmt::Block(block) => {
                self.walk_block(block);
                self.out().newline();
            }
            Stmt::If(if_stmt) => self.walk_if(if_stmt, false),
            Stmt::Switch(switch) => self.walk_switch(switch),
            Stmt::TypeSwitch(switch) => self.walk_type_switch(switch),
            Stmt::Select(select) => self.walk_select(select),
            Stmt::For(for_stmt) => self.walk_for(for_stmt),
            Stmt::Range(range) => self.walk_range(range),
            Stmt::Bad(_) => self.placeholder(stmt.node.kind_name(), &stmt.node, stmt.span),
        }
    }

    /// `chained` is set for the `if` of an `else if`; only the head of a chain closes it.
    fn walk_if(&mut self, if_stmt: &IfStmt, chained: bool) {
        let init = self.capture_opt(if_stmt.init.as_deref());
        let cond = self.render_expr(&if_stmt.cond);
        self.backend.announce_if(&init, &cond);
        self.walk_block(&if_stmt.body);
        if let Some(els) = &if_stmt.els {
            self.backend.announce_else();
            match &els.node {
                Stmt::If(nested) => self.walk_if(nested, true),
                Stmt::Block(block) => self.walk_block(block),
                _ => self.walk_stmt(els),
            }
        }
        if !chained {
            self.backend.close_if();
        }
    }

    fn walk_for(&mut self, for_stmt: &ForStmt) {
        let init = self.capture_opt(for_stmt.init.as_deref());
        let cond = for_stmt.cond.as_ref().map(|c| self.render_expr(c)).unwrap_or_default();
        let post = self.capture_opt(for_stmt.post.as_deref());
        self.backend.announce_for(&init, &cond, &post);
        self.walk_block(&for_stmt.body);
        self.backend.close_loop();
    }

    fn walk_range(&mut self, range: &RangeStmt) {
        let view = RangeView {
            key: range.key.as_ref().map(|k| self.render_expr(k)),
            value: range.value.as_ref().map(|v| self.render_expr(v)),
            define: range.op.is_some_and(AssignOp::is_define),
            x: self.render_expr(&range.x),
        };
        self.backend.announce_range(&view);
        self.walk_block(&range.body);
        self.backend.close_loop();
    }

    fn walk_switch(&mut self, switch: &SwitchStmt) {
        let view = SwitchView {
            init: self.capture_opt(switch.init.as_deref()),
            tag: switch.tag.as_ref().map(|t| self.render_expr(t)).unwrap_or_default(),
        };
        self.backend.announce_switch(&view);
        for clause in &switch.clauses {
            self.walk_case(&clause.node, false);
        }
        self.backend.close_switch();
    }

    fn walk_type_switch(&mut self, switch: &TypeSwitchStmt) {
        let view = SwitchView {
            init: self.capture_opt(switch.init.as_deref()),
            tag: self.capture_stmt(&switch.assign),
        };
        self.backend.announce_switch(&view);
        for clause in &switch.clauses {
            self.walk_case(&clause.node, true);
        }
        self.backend.close_switch();
    }

    /// In a type switch the match list holds types.
    fn walk_case(&mut self, clause: &CaseClause, types: bool) {
        let list: Vec<String> = clause
            .list
            .iter()
            .map(|e| if types { self.render_type(e) } else { self.render_expr(e) })
            .collect();
        self.backend.announce_case(&list);
        for stmt in &clause.body {
            self.walk_stmt(stmt);
        }
        let falls_through = matches!(
            clause.body.last().map(|s| &s.node),
            Some(Stmt::Branch(branch)) if branch.kind == BranchKind::Fallthrough
        );
        self.backend.close_case(falls_through);
    }

    fn walk_select(&mut self, select: &SelectStmt) {
        self.backend.announce_select();
        for clause in &select.clauses {
            self.walk_comm(&clause.node);
        }
        self.backend.close_select();
    }

    fn walk_comm(&mut self, clause: &CommClause) {
        let comm = self.capture_opt(clause.comm.as_deref());
        self.backend.announce_comm(&comm);
        for stmt in &clause.body {
            self.walk_stmt(stmt);
        }
        self.backend.close_case(false);
    }

    // ========================================================================
    // Placeholders
    // ========================================================================

    fn placeholder(&mut self, kind: &str, node: &impl std::fmt::Debug, span: Span) {
        let dump = format!("{node:?}");
        tracing::warn!(kind, %span, "node replaced by placeholder");
        self.backend.announce_placeholder(&Placeholder {
            kind,
            dump: &dump,
            span,
        });
    }
}

/// Translate `module` with a fresh backend for `target`; `None` if the target is not registered.
pub fn translate_target(module: &Module, target: &str, config: crate::emit::EmitConfig) -> Option<String> {
    let mut backend = crate::emit::create_backend(target, config)?;
    Some(Walker::translate(module, backend.as_mut()))
}
