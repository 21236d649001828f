//! C++ backend.
//!
//! Every rewrite policy is active here: multi-value results become tuples, receivers become `this`, deferred
//! and concurrent calls are wrapped in lambdas handed to support types, count-implied constants are
//! substituted, and named results are declared at the top of the body.
//!
//! The support vocabulary (`Chan`, `Deferred`, `Goroutine`, `SELECT`, `Make`, ...) is assumed to come from
//! `go.h` and the per-package headers; nothing here checks that the result compiles.

use goshift_core::lang::packages::{default_import_name, lookup_package};
use goshift_core::lang::tokens::{AssignOp, BinaryOp, BranchKind, ChanDir, DeclKeyword, IncDecOp, LitKind, UnaryOp};

use super::config::EmitConfig;
use super::context::ContextStack;
use super::contract::{
    AssignView, CompositeKind, Emitter, FieldView, FuncView, InterfaceEntry, Placeholder, RangeView, SignatureView,
    SwitchView, TypeHint, TypeShape, TypeView, ValueView, placeholder_comment, strip_terminator,
};
use super::output::Output;

/// Source builtin type names with a different C++ spelling.
const BUILTIN_TYPES: &[(&str, &str)] = &[
    ("string", "std::string"),
    ("float64", "double"),
    ("float32", "float"),
    ("int8", "int8_t"),
    ("int16", "int16_t"),
    ("int32", "int32_t"),
    ("int64", "int64_t"),
    ("uint", "unsigned int"),
    ("uint8", "uint8_t"),
    ("uint16", "uint16_t"),
    ("uint32", "uint32_t"),
    ("uint64", "uint64_t"),
    ("uintptr", "uintptr_t"),
    ("byte", "uint8_t"),
    ("rune", "int32_t"),
    ("complex64", "std::complex<float>"),
    ("complex128", "std::complex<double>"),
];

/// Packages whose name collides with a C/C++ identifier.
const RENAMED_PACKAGES: &[(&str, &str)] = &[("time", "go_time")];

/// A labeled statement still being emitted.
#[derive(Debug)]
struct LabelFrame {
    label: String,
    /// Block nesting depth where the label was written
    depth: usize,
    /// Nothing has claimed the label yet
    fresh: bool,
    /// The labeled statement is a loop, so its body block can carry the continue target
    is_loop: bool,
    break_used: bool,
    continue_used: bool,
}

pub struct CppEmitter {
    config: EmitConfig,
    out: Output,
    contexts: ContextStack,
    labels: Vec<LabelFrame>,
    block_depth: usize,
}

impl Default for CppEmitter {
    fn default() -> Self {
        Self::new(EmitConfig::default())
    }
}

impl CppEmitter {
    pub fn new(config: EmitConfig) -> Self {
        Self {
            out: Output::new(&config),
            contexts: ContextStack::new(),
            config,
            labels: Vec::new(),
            block_depth: 0,
        }
    }

    /// The first loop, switch or select directly under a label claims it.
    fn claim_label(&mut self, is_loop: bool) {
        let depth = self.block_depth;
        if let Some(frame) = self.labels.last_mut().filter(|f| f.fresh && f.depth == depth) {
            frame.fresh = false;
            frame.is_loop = is_loop;
        }
    }

    fn result_type(&self, sig: &SignatureView) -> String {
        let types = sig.result_types();
        match types.as_slice() {
            [] => "void".to_string(),
            [single] => single.to_string(),
            many => format!("tuple<{}>", many.join(", ")),
        }
    }

    fn params(&self, params: &[FieldView]) -> String {
        params
            .iter()
            .flat_map(|f| {
                if f.names.is_empty() {
                    vec![f.ty.clone()]
                } else {
                    f.names.iter().map(|n| format!("{} {}", f.ty, n)).collect()
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn hint_type(&self, hint: &TypeHint) -> String {
        match hint {
            TypeHint::Int => "int".to_string(),
            TypeHint::Float => "double".to_string(),
            TypeHint::Imag => "std::complex<double>".to_string(),
            TypeHint::Char => "char".to_string(),
            TypeHint::String => "std::string".to_string(),
            TypeHint::Bool => "bool".to_string(),
            TypeHint::Nil => "void*".to_string(),
            TypeHint::Composite(ty) => ty.clone(),
            TypeHint::Unknown => "auto".to_string(),
        }
    }

    /// `make_tuple(...)` for several values, the value itself otherwise.
    fn tuple_of(values: &[String]) -> String {
        match values {
            [single] => single.clone(),
            many => format!("make_tuple({})", many.join(", ")),
        }
    }

    fn field_line(&self, field: &FieldView) -> String {
        let mut line = if field.names.is_empty() {
            format!("{} {};", field.ty, embedded_name(&field.ty))
        } else {
            format!("{} {};", field.ty, field.names.join(", "))
        };
        if let Some(tag) = &field.tag {
            line.push_str(&format!(" // {tag}"));
        }
        line
    }

    fn interface_line(&self, entry: &InterfaceEntry) -> String {
        match entry {
            InterfaceEntry::Method { name, sig } => {
                format!("virtual {} {}({}) = 0;", self.result_type(sig), name, self.params(&sig.params))
            }
            InterfaceEntry::Embedded(ty) => format!("// extends {ty}"),
        }
    }

    /// Multi-line body with absolute indentation, for type expressions that appear inline.
    fn inline_body(&self, lines: Vec<String>) -> String {
        if lines.is_empty() {
            return "struct {}".to_string();
        }
        let inner = self.out.pad(1);
        let mut text = String::from("struct {\n");
        for line in lines {
            text.push_str(&inner);
            text.push_str(&line);
            text.push('\n');
        }
        text.push_str(&self.out.pad(0));
        text.push('}');
        text
    }

    fn write_body(&mut self, header: String, lines: Vec<String>) {
        self.out.writeln(&format!("{header} {{"));
        self.out.indent();
        for line in lines {
            self.out.writeln(&line);
        }
        self.out.dedent();
        self.out.writeln("};");
    }
}

/// Member name for an embedded field: the bare type name.
fn embedded_name(ty: &str) -> &str {
    let base = ty.trim_end_matches('*');
    base.rsplit("::").next().unwrap_or(base)
}

impl Emitter for CppEmitter {
    fn target_name(&self) -> &'static str {
        "cpp"
    }

    fn config(&self) -> &EmitConfig {
        &self.config
    }

    fn output(&self) -> &Output {
        &self.out
    }

    fn output_mut(&mut self) -> &mut Output {
        &mut self.out
    }

    fn contexts(&self) -> &ContextStack {
        &self.contexts
    }

    fn contexts_mut(&mut self) -> &mut ContextStack {
        &mut self.contexts
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    fn announce_module(&mut self, name: &str) {
        self.out.writeln(&format!("//package {name}"));
        self.out.writeln("#include <go.h>");
    }

    fn announce_import(&mut self, local: Option<&str>, path: &str) {
        let name = local.unwrap_or_else(|| default_import_name(path));
        self.out.writeln(&format!("//import {name} {path}"));
        if let Some(package) = lookup_package(path) {
            self.out.writeln(&format!("#include <{}>", package.cpp_header));
        }
    }

    fn announce_type(&mut self, ty: &TypeView) {
        match &ty.shape {
            TypeShape::Struct(fields) => {
                let lines = fields.iter().map(|f| self.field_line(f)).collect();
                self.write_body(format!("struct {}", ty.name), lines);
            }
            TypeShape::Interface(entries) => {
                let lines = entries.iter().map(|e| self.interface_line(e)).collect();
                self.write_body(format!("struct {}", ty.name), lines);
            }
            TypeShape::Other(rendered) => {
                self.out.writeln(&format!("using {} = {};", ty.name, rendered));
            }
        }
    }

    fn announce_value(&mut self, value: &ValueView) {
        let prefix = if value.keyword == DeclKeyword::Const { "const " } else { "" };
        let (values, hints) = if value.values.is_empty() && value.keyword == DeclKeyword::Const {
            let count = self.contexts.current().sequence.to_string();
            (vec![count; value.names.len()], vec![TypeHint::Int; value.names.len()])
        } else {
            (value.values.clone(), value.hints.clone())
        };

        if values.is_empty() {
            let ty = value.ty.as_deref().unwrap_or("auto");
            self.out.writeln(&format!("{prefix}{ty} {};", value.names.join(", ")));
        } else if value.names.len() == values.len() {
            for (i, name) in value.names.iter().enumerate() {
                let ty = match &value.ty {
                    Some(ty) => ty.clone(),
                    None => self.hint_type(hints.get(i).unwrap_or(&TypeHint::Unknown)),
                };
                self.out.writeln(&format!("{prefix}{ty} {name} = {};", values[i]));
            }
        } else {
            self.out.writeln(&format!(
                "{prefix}auto [{}] = {};",
                value.names.join(", "),
                Self::tuple_of(&values)
            ));
        }
    }

    fn announce_function(&mut self, func: &FuncView) {
        let sig = &func.sig;
        let header = if func.receiver.is_none() && func.name == "main" && sig.params.is_empty() && sig.result_arity() == 0
        {
            "int main(int argc, char **argv)".to_string()
        } else {
            let mut qualifier = String::new();
            if let Some(receiver) = &func.receiver {
                qualifier = format!("{}::", receiver.type_name);
                self.contexts.current_mut().receiver = receiver.name.clone().filter(|n| n != "_");
            }
            format!("{} {}{}({})", self.result_type(sig), qualifier, func.name, self.params(&sig.params))
        };

        if sig.has_named_results() {
            for field in sig.results.iter().flatten() {
                for name in &field.names {
                    self.contexts.current_mut().declare_result(format!("{} {};", field.ty, name), name);
                }
            }
        }

        if func.has_body {
            self.out.write(&format!("{header} "));
        } else {
            self.out.writeln(&format!("{header};"));
        }
    }

    fn close_function(&mut self, func: &FuncView) {
        if func.has_body {
            self.out.newline();
        }
    }

    fn announce_closure(&mut self, sig: &SignatureView) {
        // The receiver stays bound inside closures unless a parameter shadows it.
        let receiver = self.contexts.enclosing().and_then(|outer| outer.receiver.clone());
        let shadowed = receiver
            .as_deref()
            .is_some_and(|r| sig.params.iter().any(|f| f.names.iter().any(|n| n == r)));
        if !shadowed {
            self.contexts.current_mut().receiver = receiver;
        }
        if sig.has_named_results() {
            for field in sig.results.iter().flatten() {
                for name in &field.names {
                    self.contexts.current_mut().declare_result(format!("{} {};", field.ty, name), name);
                }
            }
        }
    }

    fn open_group(&mut self, _keyword: DeclKeyword, _grouped: bool) {}

    fn close_group(&mut self, _keyword: DeclKeyword, _grouped: bool) {}

    // ========================================================================
    // Blocks and control flow
    // ========================================================================

    fn open_block(&mut self) {
        self.block_depth += 1;
        self.out.writeln("{");
        self.out.indent();
        for decl in self.contexts.current_mut().take_result_decls() {
            self.out.writeln(&decl);
        }
    }

    fn close_block(&mut self) {
        if let Some(frame) = self.labels.last() {
            if frame.is_loop && frame.continue_used && frame.depth + 1 == self.block_depth {
                self.out.writeln(&format!("{}_continue:;", frame.label));
            }
        }
        self.block_depth = self.block_depth.saturating_sub(1);
        self.out.dedent();
        self.out.write("}");
    }

    fn announce_if(&mut self, init: &str, cond: &str) {
        if init.is_empty() {
            self.out.write(&format!("if ({cond}) "));
        } else {
            self.out.write(&format!("if ({}; {cond}) ", strip_terminator(init)));
        }
    }

    fn announce_else(&mut self) {
        self.out.write(" else ");
    }

    fn close_if(&mut self) {
        self.out.newline();
    }

    fn announce_for(&mut self, init: &str, cond: &str, post: &str) {
        self.claim_label(true);
        let init = strip_terminator(init);
        let post = strip_terminator(post);
        let cond = if cond.is_empty() { "true" } else { cond };
        if init.is_empty() && post.is_empty() {
            self.out.write(&format!("while ({cond}) "));
        } else {
            self.out.write(&format!("for ({init}; {cond}; {post}) "));
        }
    }

    fn announce_range(&mut self, range: &RangeView) {
        self.claim_label(true);
        let key = range.key.as_deref().filter(|k| *k != "_");
        let binding = match (key, range.value.as_deref()) {
            (Some(k), Some(v)) => format!("[{k}, {v}]"),
            (Some(k), None) => k.to_string(),
            (None, Some(v)) => v.to_string(),
            (None, None) => "_".to_string(),
        };
        self.out.write(&format!("for (auto& {binding} : {}) ", range.x));
    }

    fn close_loop(&mut self) {
        self.out.newline();
    }

    fn announce_switch(&mut self, switch: &SwitchView) {
        self.claim_label(false);
        let tag = if switch.tag.is_empty() { "true" } else { strip_terminator(&switch.tag) };
        if switch.init.is_empty() {
            self.out.writeln(&format!("switch ({tag}) {{"));
        } else {
            self.out.writeln(&format!("switch ({}; {tag}) {{", strip_terminator(&switch.init)));
        }
        self.out.indent();
    }

    fn close_switch(&mut self) {
        self.out.dedent();
        self.out.writeln("}");
    }

    fn announce_case(&mut self, list: &[String]) {
        if list.is_empty() {
            self.out.writeln("default:");
        } else {
            let labels: Vec<String> = list.iter().map(|v| format!("case {v}:")).collect();
            self.out.writeln(&labels.join(" "));
        }
        self.out.indent();
    }

    fn close_case(&mut self, falls_through: bool) {
        if !falls_through {
            self.out.writeln("break;");
        }
        self.out.dedent();
    }

    fn announce_select(&mut self) {
        self.claim_label(false);
        self.out.writeln("SELECT {");
        self.out.indent();
    }

    fn announce_comm(&mut self, comm: &str) {
        if comm.is_empty() {
            self.out.writeln("default:");
        } else {
            self.out.writeln(&format!("SELECT_CASE({}):", strip_terminator(comm)));
        }
        self.out.indent();
    }

    fn close_select(&mut self) {
        self.out.dedent();
        self.out.writeln("}");
    }

    fn announce_label(&mut self, label: &str) {
        self.out.writeln(&format!("{label}:"));
        self.labels.push(LabelFrame {
            label: label.to_string(),
            depth: self.block_depth,
            fresh: true,
            is_loop: false,
            break_used: false,
            continue_used: false,
        });
    }

    fn close_label(&mut self, label: &str) {
        let Some(frame) = self.labels.pop() else {
            return;
        };
        debug_assert_eq!(frame.label, label, "label frames out of order");
        if frame.break_used {
            self.out.ensure_line_start();
            self.out.writeln(&format!("{label}_break:;"));
        }
    }

    /// Labeled `break`/`continue` jump to targets written after the statement and at the end of the loop body.
    fn announce_branch(&mut self, kind: BranchKind, label: Option<&str>) {
        let line = match (kind, label) {
            (BranchKind::Fallthrough, _) => "[[fallthrough]];".to_string(),
            (BranchKind::Goto, Some(label)) => format!("goto {label};"),
            (BranchKind::Break | BranchKind::Continue, Some(label)) => {
                let frame = self.labels.iter_mut().rev().find(|f| f.label == label);
                match (kind, frame) {
                    (BranchKind::Break, Some(frame)) => {
                        frame.break_used = true;
                        format!("goto {label}_break;")
                    }
                    (BranchKind::Continue, Some(frame)) if frame.is_loop => {
                        frame.continue_used = true;
                        format!("goto {label}_continue;")
                    }
                    (kind, _) => format!("{}; /* unresolved label {label} */", kind.as_str()),
                }
            }
            (kind, _) => format!("{};", kind.as_str()),
        };
        self.out.writeln(&line);
    }

    // ========================================================================
    // Simple statements
    // ========================================================================

    fn announce_defer(&mut self, call: &str) {
        let name = self.contexts.current_mut().next_deferred_name();
        self.out.writeln(&format!("Deferred {name}([&](){{ {call}; }});"));
    }

    fn announce_go(&mut self, call: &str) {
        self.out.writeln(&format!("Goroutine([&](){{ {call}; }});"));
    }

    fn announce_return(&mut self, values: &[String]) {
        let expr = if values.is_empty() {
            let names = &self.contexts.current().result_names;
            if names.is_empty() { String::new() } else { Self::tuple_of(names) }
        } else {
            Self::tuple_of(values)
        };
        if expr.is_empty() {
            self.out.writeln("return;");
        } else {
            self.out.writeln(&format!("return {expr};"));
        }
    }

    fn announce_expr_stmt(&mut self, expr: &str) {
        self.out.writeln(&format!("{expr};"));
    }

    fn announce_assign(&mut self, assign: &AssignView) {
        let rhs = Self::tuple_of(&assign.rhs);
        let line = match assign.op {
            AssignOp::Define if assign.lhs.len() == 1 && assign.rhs.len() == 1 => {
                let ty = self.hint_type(assign.hints.first().unwrap_or(&TypeHint::Unknown));
                format!("{ty} {} = {rhs};", assign.lhs[0])
            }
            AssignOp::Define => format!("auto [{}] = {rhs};", assign.lhs.join(", ")),
            AssignOp::Assign if assign.lhs.len() > 1 => {
                let targets: Vec<&str> =
                    assign.lhs.iter().map(|l| if l == "_" { "std::ignore" } else { l.as_str() }).collect();
                format!("tie({}) = {rhs};", targets.join(", "))
            }
            AssignOp::AndNotAssign => format!("{} &= ~({rhs});", assign.lhs.join(", ")),
            op => format!("{} {} {rhs};", assign.lhs.join(", "), op.as_str()),
        };
        self.out.writeln(&line);
    }

    fn announce_inc_dec(&mut self, x: &str, op: IncDecOp) {
        self.out.writeln(&format!("{x}{};", op.as_str()));
    }

    fn announce_send(&mut self, chan: &str, value: &str) {
        self.out.writeln(&format!("{chan}.Send({value});"));
    }

    fn announce_empty(&mut self) {
        self.out.writeln(";");
    }

    fn announce_placeholder(&mut self, node: &Placeholder<'_>) {
        let text = placeholder_comment(node, self.config.emit_position_comments);
        self.out.writeln(&text);
    }

    // ========================================================================
    // Formatting helpers
    // ========================================================================

    fn format_ident(&self, name: &str) -> String {
        match name {
            "nil" => "nullptr".to_string(),
            "iota" => self.contexts.current().sequence.to_string(),
            _ => BUILTIN_TYPES
                .iter()
                .find(|(source, _)| *source == name)
                .map_or_else(|| name.to_string(), |(_, target)| target.to_string()),
        }
    }

    fn format_literal(&self, kind: LitKind, value: &str) -> String {
        match kind {
            LitKind::String if value.starts_with('`') => {
                let raw = value.trim_matches('`');
                let escaped = raw
                    .replace('\\', "\\\\")
                    .replace('"', "\\\"")
                    .replace('\r', "\\r")
                    .replace('\n', "\\n");
                format!("\"{escaped}\"")
            }
            LitKind::Imag => format!("std::complex<double>(0, {})", value.trim_end_matches('i')),
            _ => value.to_string(),
        }
    }

    fn format_selector(&self, x: &str, sel: &str, is_package: bool) -> String {
        if is_package {
            let ns = RENAMED_PACKAGES
                .iter()
                .find(|(package, _)| *package == x)
                .map_or(x, |(_, renamed)| *renamed);
            format!("{ns}::{sel}")
        } else if self.contexts.current().is_receiver(x) {
            format!("this->{sel}")
        } else {
            format!("{x}.{sel}")
        }
    }

    fn format_unary(&self, op: UnaryOp, x: &str) -> String {
        match op {
            UnaryOp::Arrow => format!("{x}.Receive()"),
            UnaryOp::Xor => format!("~{x}"),
            op => format!("{}{x}", op.as_str()),
        }
    }

    fn format_binary(&self, x: &str, op: BinaryOp, y: &str) -> String {
        match op {
            BinaryOp::AndNot => format!("{x} & ~{y}"),
            op => format!("{x} {} {y}", op.as_str()),
        }
    }

    fn format_index(&self, x: &str, index: &str) -> String {
        format!("{x}[{index}]")
    }

    fn format_slice(&self, x: &str, low: Option<&str>, high: Option<&str>, max: Option<&str>) -> String {
        let low = low.unwrap_or("0");
        let high = high.map_or_else(|| format!("len({x})"), str::to_string);
        match max {
            Some(max) => format!("Slice({x}, {low}, {high}, {max})"),
            None => format!("Slice({x}, {low}, {high})"),
        }
    }

    fn format_call(&self, fun: &str, args: &[String], spread: bool) -> String {
        let mut args = args.join(", ");
        if spread {
            args.push_str("...");
        }
        format!("{fun}({args})")
    }

    fn format_make(&self, ty: &str, args: &[String]) -> String {
        format!("Make<{ty}>({})", args.join(", "))
    }

    fn format_new(&self, ty: &str) -> String {
        format!("new {ty}()")
    }

    fn format_type_assert(&self, x: &str, ty: Option<&str>) -> String {
        match ty {
            Some(ty) => format!("TypeAssert<{ty}>({x})"),
            None => format!("TypeSwitch({x})"),
        }
    }

    fn format_paren(&self, x: &str) -> String {
        format!("({x})")
    }

    fn format_star(&self, x: &str) -> String {
        format!("*{x}")
    }

    fn format_pointer_type(&self, ty: &str) -> String {
        format!("{ty}*")
    }

    fn format_array_type(&self, len: Option<&str>, elt: &str) -> String {
        match len {
            Some(len) if !len.is_empty() => format!("std::array<{elt}, {len}>"),
            _ => format!("std::vector<{elt}>"),
        }
    }

    fn format_map_type(&self, key: &str, value: &str) -> String {
        format!("std::map<{key}, {value}>")
    }

    fn format_chan_type(&self, dir: ChanDir, value: &str) -> String {
        let chan = match dir {
            ChanDir::Both => "Chan",
            ChanDir::Send => "SendChan",
            ChanDir::Recv => "ReceiveChan",
        };
        format!("{chan}<{value}>")
    }

    fn format_func_type(&self, sig: &SignatureView) -> String {
        format!("std::function<{}({})>", self.result_type(sig), sig.param_types().join(", "))
    }

    fn format_struct_type(&self, fields: &[FieldView]) -> String {
        self.inline_body(fields.iter().map(|f| self.field_line(f)).collect())
    }

    fn format_interface_type(&self, entries: &[InterfaceEntry]) -> String {
        self.inline_body(entries.iter().map(|e| self.interface_line(e)).collect())
    }

    fn format_ellipsis(&self, elt: Option<&str>) -> String {
        elt.map_or_else(String::new, |elt| format!("Variadic<{elt}>"))
    }

    fn format_composite_lit(&self, ty: Option<&str>, elts: &[String]) -> String {
        format!("{}{{{}}}", ty.unwrap_or(""), elts.join(", "))
    }

    fn format_key_value(&self, key: &str, value: &str, kind: CompositeKind) -> String {
        match kind {
            CompositeKind::Map => format!("{{{key}, {value}}}"),
            CompositeKind::Struct => format!(".{key} = {value}"),
            CompositeKind::Array => format!("[{key}] = {value}"),
        }
    }

    fn format_func_lit(&self, sig: &SignatureView, body: &str) -> String {
        let params = self.params(&sig.params);
        if sig.result_arity() == 0 {
            format!("[&]({params}) {body}")
        } else {
            format!("[&]({params}) -> {} {body}", self.result_type(sig))
        }
    }

    fn format_placeholder(&self, node: &Placeholder<'_>) -> String {
        placeholder_comment(node, self.config.emit_position_comments)
    }
}
