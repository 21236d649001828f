//! Canonical Go re-printer.
//!
//! The target natively supports every source construct, so every rewrite policy is the identity. This
//! backend exercises the full contract and is the reference for structural completeness.

use goshift_core::lang::tokens::{BinaryOp, BranchKind, ChanDir, DeclKeyword, IncDecOp, LitKind, UnaryOp};

use super::config::EmitConfig;
use super::context::ContextStack;
use super::contract::{
    AssignView, CompositeKind, Emitter, FieldView, FuncView, InterfaceEntry, Placeholder, RangeView, SignatureView,
    SwitchView, TypeShape, TypeView, ValueView, placeholder_comment, strip_terminator,
};
use super::output::Output;

pub struct GoEmitter {
    config: EmitConfig,
    out: Output,
    contexts: ContextStack,
}

impl Default for GoEmitter {
    fn default() -> Self {
        Self::new(EmitConfig::default())
    }
}

impl GoEmitter {
    pub fn new(config: EmitConfig) -> Self {
        Self {
            out: Output::new(&config),
            contexts: ContextStack::new(),
            config,
        }
    }

    fn field_list(fields: &[FieldView]) -> String {
        fields
            .iter()
            .map(|f| {
                if f.names.is_empty() {
                    f.ty.clone()
                } else {
                    format!("{} {}", f.names.join(", "), f.ty)
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Parameters and results without the `func` keyword, e.g. `(a int) (int, error)`.
    fn signature(sig: &SignatureView) -> String {
        let params = format!("({})", Self::field_list(&sig.params));
        match sig.results.as_deref() {
            None | Some([]) => params,
            Some([single]) if single.names.is_empty() => format!("{params} {}", single.ty),
            Some(results) => format!("{params} ({})", Self::field_list(results)),
        }
    }

    fn field_line(field: &FieldView) -> String {
        let mut line = if field.names.is_empty() {
            field.ty.clone()
        } else {
            format!("{} {}", field.names.join(", "), field.ty)
        };
        if let Some(tag) = &field.tag {
            line.push(' ');
            line.push_str(tag);
        }
        line
    }

    fn interface_line(entry: &InterfaceEntry) -> String {
        match entry {
            InterfaceEntry::Method { name, sig } => format!("{name}{}", Self::signature(sig)),
            InterfaceEntry::Embedded(ty) => ty.clone(),
        }
    }

    fn inline_body(&self, keyword: &str, lines: Vec<String>) -> String {
        if lines.is_empty() {
            return format!("{keyword}{{}}");
        }
        let inner = self.out.pad(1);
        let mut text = format!("{keyword} {{\n");
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
        if lines.is_empty() {
            self.out.writeln(&format!("{header}{{}}"));
            return;
        }
        self.out.writeln(&format!("{header} {{"));
        self.out.indent();
        for line in lines {
            self.out.writeln(&line);
        }
        self.out.dedent();
        self.out.writeln("}");
    }
}

impl Emitter for GoEmitter {
    fn target_name(&self) -> &'static str {
        "go"
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
        self.out.writeln(&format!("package {name}"));
    }

    fn announce_import(&mut self, local: Option<&str>, path: &str) {
        match local {
            Some(local) => self.out.writeln(&format!("{local} {path}")),
            None => self.out.writeln(path),
        }
    }

    fn announce_type(&mut self, ty: &TypeView) {
        let head = if ty.alias { format!("{} = ", ty.name) } else { format!("{} ", ty.name) };
        match &ty.shape {
            TypeShape::Struct(fields) => {
                let lines = fields.iter().map(Self::field_line).collect();
                self.write_body(format!("{head}struct"), lines);
            }
            TypeShape::Interface(entries) => {
                let lines = entries.iter().map(Self::interface_line).collect();
                self.write_body(format!("{head}interface"), lines);
            }
            TypeShape::Other(rendered) => self.out.writeln(&format!("{head}{rendered}")),
        }
    }

    fn announce_value(&mut self, value: &ValueView) {
        let mut line = value.names.join(", ");
        if let Some(ty) = &value.ty {
            line.push(' ');
            line.push_str(ty);
        }
        if !value.values.is_empty() {
            line.push_str(" = ");
            line.push_str(&value.values.join(", "));
        }
        self.out.writeln(&line);
    }

    fn announce_function(&mut self, func: &FuncView) {
        let receiver = match &func.receiver {
            Some(r) => {
                let star = if r.pointer { "*" } else { "" };
                match &r.name {
                    Some(name) => format!("({name} {star}{}) ", r.type_name),
                    None => format!("({star}{}) ", r.type_name),
                }
            }
            None => String::new(),
        };
        let header = format!("func {receiver}{}{}", func.name, Self::signature(&func.sig));
        if func.has_body {
            self.out.write(&format!("{header} "));
        } else {
            self.out.writeln(&header);
        }
    }

    fn close_function(&mut self, func: &FuncView) {
        if func.has_body {
            self.out.newline();
        }
    }

    fn open_group(&mut self, keyword: DeclKeyword, grouped: bool) {
        if grouped {
            self.out.writeln(&format!("{} (", keyword.as_str()));
            self.out.indent();
        } else {
            self.out.write(&format!("{} ", keyword.as_str()));
        }
    }

    fn close_group(&mut self, _keyword: DeclKeyword, grouped: bool) {
        if grouped {
            self.out.dedent();
            self.out.writeln(")");
        }
    }

    // ========================================================================
    // Blocks and control flow
    // ========================================================================

    fn open_block(&mut self) {
        self.out.writeln("{");
        self.out.indent();
    }

    fn close_block(&mut self) {
        self.out.dedent();
        self.out.write("}");
    }

    fn announce_if(&mut self, init: &str, cond: &str) {
        if init.is_empty() {
            self.out.write(&format!("if {cond} "));
        } else {
            self.out.write(&format!("if {init}; {cond} "));
        }
    }

    fn announce_else(&mut self) {
        self.out.write(" else ");
    }

    fn close_if(&mut self) {
        self.out.newline();
    }

    fn announce_for(&mut self, init: &str, cond: &str, post: &str) {
        if init.is_empty() && post.is_empty() {
            if cond.is_empty() {
                self.out.write("for ");
            } else {
                self.out.write(&format!("for {cond} "));
            }
        } else {
            self.out.write(&format!("for {init}; {cond}; {post} "));
        }
    }

    fn announce_range(&mut self, range: &RangeView) {
        let token = if range.define { ":=" } else { "=" };
        let bindings = match (range.key.as_deref(), range.value.as_deref()) {
            (Some(k), Some(v)) => format!("{k}, {v} {token} "),
            (Some(k), None) => format!("{k} {token} "),
            (None, Some(v)) => format!("_, {v} {token} "),
            (None, None) => String::new(),
        };
        self.out.write(&format!("for {bindings}range {} ", range.x));
    }

    fn close_loop(&mut self) {
        self.out.newline();
    }

    fn announce_switch(&mut self, switch: &SwitchView) {
        let mut head = String::from("switch ");
        if !switch.init.is_empty() {
            head.push_str(&format!("{}; ", strip_terminator(&switch.init)));
        }
        if !switch.tag.is_empty() {
            head.push_str(&format!("{} ", strip_terminator(&switch.tag)));
        }
        head.push('{');
        self.out.writeln(&head);
    }

    fn close_switch(&mut self) {
        self.out.writeln("}");
    }

    fn announce_case(&mut self, list: &[String]) {
        if list.is_empty() {
            self.out.writeln("default:");
        } else {
            self.out.writeln(&format!("case {}:", list.join(", ")));
        }
        self.out.indent();
    }

    fn close_case(&mut self, _falls_through: bool) {
        self.out.dedent();
    }

    fn announce_select(&mut self) {
        self.out.writeln("select {");
    }

    fn announce_comm(&mut self, comm: &str) {
        if comm.is_empty() {
            self.out.writeln("default:");
        } else {
            self.out.writeln(&format!("case {}:", strip_terminator(comm)));
        }
        self.out.indent();
    }

    fn close_select(&mut self) {
        self.out.writeln("}");
    }

    fn announce_label(&mut self, label: &str) {
        self.out.writeln(&format!("{label}:"));
    }

    fn announce_branch(&mut self, kind: BranchKind, label: Option<&str>) {
        match label {
            Some(label) => self.out.writeln(&format!("{} {label}", kind.as_str())),
            None => self.out.writeln(kind.as_str()),
        }
    }

    // ========================================================================
    // Simple statements
    // ========================================================================

    fn announce_defer(&mut self, call: &str) {
        self.out.writeln(&format!("defer {call}"));
    }

    fn announce_go(&mut self, call: &str) {
        self.out.writeln(&format!("go {call}"));
    }

    fn announce_return(&mut self, values: &[String]) {
        if values.is_empty() {
            self.out.writeln("return");
        } else {
            self.out.writeln(&format!("return {}", values.join(", ")));
        }
    }

    fn announce_expr_stmt(&mut self, expr: &str) {
        self.out.writeln(expr);
    }

    fn announce_assign(&mut self, assign: &AssignView) {
        self.out.writeln(&format!(
            "{} {} {}",
            assign.lhs.join(", "),
            assign.op.as_str(),
            assign.rhs.join(", ")
        ));
    }

    fn announce_inc_dec(&mut self, x: &str, op: IncDecOp) {
        self.out.writeln(&format!("{x}{}", op.as_str()));
    }

    fn announce_send(&mut self, chan: &str, value: &str) {
        self.out.writeln(&format!("{chan} <- {value}"));
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
        name.to_string()
    }

    fn format_literal(&self, _kind: LitKind, value: &str) -> String {
        value.to_string()
    }

    fn format_selector(&self, x: &str, sel: &str, _is_package: bool) -> String {
        format!("{x}.{sel}")
    }

    fn format_unary(&self, op: UnaryOp, x: &str) -> String {
        format!("{}{x}", op.as_str())
    }

    fn format_binary(&self, x: &str, op: BinaryOp, y: &str) -> String {
        format!("{x} {} {y}", op.as_str())
    }

    fn format_index(&self, x: &str, index: &str) -> String {
        format!("{x}[{index}]")
    }

    fn format_slice(&self, x: &str, low: Option<&str>, high: Option<&str>, max: Option<&str>) -> String {
        let low = low.unwrap_or("");
        let high = high.unwrap_or("");
        match max {
            Some(max) => format!("{x}[{low}:{high}:{max}]"),
            None => format!("{x}[{low}:{high}]"),
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
        if args.is_empty() {
            format!("make({ty})")
        } else {
            format!("make({ty}, {})", args.join(", "))
        }
    }

    fn format_new(&self, ty: &str) -> String {
        format!("new({ty})")
    }

    fn format_type_assert(&self, x: &str, ty: Option<&str>) -> String {
        format!("{x}.({})", ty.unwrap_or("type"))
    }

    fn format_paren(&self, x: &str) -> String {
        format!("({x})")
    }

    fn format_star(&self, x: &str) -> String {
        format!("*{x}")
    }

    fn format_pointer_type(&self, ty: &str) -> String {
        format!("*{ty}")
    }

    fn format_array_type(&self, len: Option<&str>, elt: &str) -> String {
        format!("[{}]{elt}", len.unwrap_or(""))
    }

    fn format_map_type(&self, key: &str, value: &str) -> String {
        format!("map[{key}]{value}")
    }

    fn format_chan_type(&self, dir: ChanDir, value: &str) -> String {
        match dir {
            ChanDir::Both => format!("chan {value}"),
            ChanDir::Send => format!("chan<- {value}"),
            ChanDir::Recv => format!("<-chan {value}"),
        }
    }

    fn format_func_type(&self, sig: &SignatureView) -> String {
        format!("func{}", Self::signature(sig))
    }

    fn format_struct_type(&self, fields: &[FieldView]) -> String {
        self.inline_body("struct", fields.iter().map(Self::field_line).collect())
    }

    fn format_interface_type(&self, entries: &[InterfaceEntry]) -> String {
        self.inline_body("interface", entries.iter().map(Self::interface_line).collect())
    }

    fn format_ellipsis(&self, elt: Option<&str>) -> String {
        format!("...{}", elt.unwrap_or(""))
    }

    fn format_composite_lit(&self, ty: Option<&str>, elts: &[String]) -> String {
        format!("{}{{{}}}", ty.unwrap_or(""), elts.join(", "))
    }

    fn format_key_value(&self, key: &str, value: &str, _kind: CompositeKind) -> String {
        format!("{key}: {value}")
    }

    fn format_func_lit(&self, sig: &SignatureView, body: &str) -> String {
        format!("func{} {body}", Self::signature(sig))
    }

    fn format_placeholder(&self, node: &Placeholder<'_>) -> String {
        placeholder_comment(node, self.config.emit_position_comments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::contract::ReceiverView;

    fn field(names: &[&str], ty: &str) -> FieldView {
        FieldView::new(names.iter().map(|n| n.to_string()).collect(), ty)
    }

    #[test]
    fn test_signature_forms() {
        let none = SignatureView {
            params: vec![],
            results: None,
        };
        let single = SignatureView {
            params: vec![field(&["a", "b"], "int")],
            results: Some(vec![field(&[], "int")]),
        };
        let named = SignatureView {
            params: vec![],
            results: Some(vec![field(&["x", "y"], "int")]),
        };
        assert_eq!(GoEmitter::signature(&none), "()");
        assert_eq!(GoEmitter::signature(&single), "(a, b int) int");
        assert_eq!(GoEmitter::signature(&named), "() (x, y int)");
    }

    #[test]
    fn test_method_header() {
        let mut e = GoEmitter::default();
        e.announce_function(&FuncView {
            receiver: Some(ReceiverView {
                name: Some("p".into()),
                type_name: "Point".into(),
                pointer: true,
            }),
            name: "Move".into(),
            sig: SignatureView::default(),
            has_body: false,
        });
        assert_eq!(e.output_mut().take(), "func (p *Point) Move()\n");
    }

    #[test]
    fn test_chan_directions() {
        let e = GoEmitter::default();
        assert_eq!(e.format_chan_type(ChanDir::Both, "int"), "chan int");
        assert_eq!(e.format_chan_type(ChanDir::Send, "int"), "chan<- int");
        assert_eq!(e.format_chan_type(ChanDir::Recv, "int"), "<-chan int");
    }

    #[test]
    fn test_slice_and_assert() {
        let e = GoEmitter::default();
        assert_eq!(e.format_slice("s", None, Some("2"), None), "s[:2]");
        assert_eq!(e.format_slice("s", Some("1"), Some("2"), Some("3")), "s[1:2:3]");
        assert_eq!(e.format_type_assert("x", None), "x.(type)");
        assert_eq!(e.format_type_assert("x", Some("int")), "x.(int)");
    }

    #[test]
    fn test_grouped_const() {
        let mut e = GoEmitter::default();
        e.open_group(DeclKeyword::Const, true);
        e.announce_value(&ValueView {
            keyword: DeclKeyword::Const,
            names: vec!["A".into()],
            ty: None,
            values: vec!["iota".into()],
            hints: vec![],
        });
        e.announce_value(&ValueView {
            keyword: DeclKeyword::Const,
            names: vec!["B".into()],
            ty: None,
            values: vec![],
            hints: vec![],
        });
        e.close_group(DeclKeyword::Const, true);
        assert_eq!(e.output_mut().take(), "const (\n  A = iota\n  B\n)\n");
    }

    #[test]
    fn test_range_forms() {
        let mut e = GoEmitter::default();
        e.announce_range(&RangeView {
            key: Some("i".into()),
            value: Some("v".into()),
            define: true,
            x: "xs".into(),
        });
        e.close_loop();
        e.announce_range(&RangeView {
            key: None,
            value: None,
            define: false,
            x: "xs".into(),
        });
        e.close_loop();
        assert_eq!(e.output_mut().take(), "for i, v := range xs \nfor range xs \n");
    }
}
