//! End-to-end translation tests for the C++ backend
//!
//! Trees are built with `goshift_syntax::builders`, walked with a fresh backend, and the emitted text is
//! checked for the rewrite each construct needs.

use goshift::emit::{CppEmitter, EmitConfig, Emitter};
use goshift::walker::Walker;
use goshift_core::lang::tokens::{AssignOp, BinaryOp, BranchKind, ChanDir, LitKind, UnaryOp};
use goshift_syntax::ast::{Decl, Expr, Module, Stmt};
use goshift_syntax::builders::*;

fn cpp(module: &Module) -> String {
    let mut backend = CppEmitter::default();
    Walker::translate(module, &mut backend)
}

fn main_with(body: Vec<S>) -> Module {
    module("main", vec![func("main", sig(vec![], None), body)])
}

fn int_ty() -> E {
    ident("int")
}

// ============================================================================
// Sequence constants
// ============================================================================

#[test]
fn test_unspecified_constants_count_from_zero() {
    let m = module(
        "main",
        vec![const_group(vec![
            value_spec(&["A"], None, vec![ident("iota")]),
            value_spec(&["B"], None, vec![]),
            value_spec(&["C"], None, vec![]),
        ])],
    );
    let out = cpp(&m);
    assert!(out.contains("const int A = 0;"), "{out}");
    assert!(out.contains("const int B = 1;"), "{out}");
    assert!(out.contains("const int C = 2;"), "{out}");
}

#[test]
fn test_new_const_group_resets_sequence() {
    let m = module(
        "main",
        vec![
            const_group(vec![value_spec(&["A"], None, vec![ident("iota")]), value_spec(&["B"], None, vec![])]),
            const_group(vec![value_spec(&["X"], None, vec![ident("iota")]), value_spec(&["Y"], None, vec![])]),
        ],
    );
    let out = cpp(&m);
    assert!(out.contains("const int X = 0;"), "{out}");
    assert!(out.contains("const int Y = 1;"), "{out}");
}

#[test]
fn test_iota_inside_expression() {
    let m = module(
        "main",
        vec![const_group(vec![
            value_spec(&["KB"], None, vec![binary(int(1), BinaryOp::Shl, binary(int(10), BinaryOp::Mul, ident("iota")))]),
            value_spec(&["MB"], None, vec![binary(int(1), BinaryOp::Shl, binary(int(10), BinaryOp::Mul, ident("iota")))]),
        ])],
    );
    let out = cpp(&m);
    assert!(out.contains("const int KB = 1 << 10 * 0;"), "{out}");
    assert!(out.contains("const int MB = 1 << 10 * 1;"), "{out}");
}

#[test]
fn test_typed_constant_keeps_its_type() {
    let m = module(
        "main",
        vec![const_group(vec![value_spec(&["Name"], Some(ident("string")), vec![string("\"go\"")])])],
    );
    assert!(cpp(&m).contains("const std::string Name = \"go\";"));
}

// ============================================================================
// Receivers
// ============================================================================

#[test]
fn test_receiver_selector_becomes_this() {
    let m = module(
        "main",
        vec![method(
            field(&["r"], star(ident("Point"))),
            "Sum",
            sig(vec![field(&["r2"], star(ident("Point")))], Some(vec![anon(int_ty())])),
            vec![ret(vec![binary(sel(ident("r"), "X"), BinaryOp::Add, sel(ident("r2"), "X"))])],
        )],
    );
    let out = cpp(&m);
    assert!(out.contains("int Point::Sum(Point* r2) {"), "{out}");
    assert!(out.contains("return this->X + r2.X;"), "{out}");
}

#[test]
fn test_receiver_does_not_leak_into_next_function() {
    let m = module(
        "main",
        vec![
            method(field(&["r"], ident("Point")), "Get", sig(vec![], Some(vec![anon(int_ty())])), vec![ret(vec![
                sel(ident("r"), "X"),
            ])]),
            func("other", sig(vec![field(&["r"], ident("Point"))], Some(vec![anon(int_ty())])), vec![ret(vec![
                sel(ident("r"), "X"),
            ])]),
        ],
    );
    let out = cpp(&m);
    assert!(out.contains("return this->X;"), "{out}");
    assert!(out.contains("return r.X;"), "{out}");
}

#[test]
fn test_receiver_stays_bound_inside_closures() {
    let m = module(
        "main",
        vec![method(field(&["r"], star(ident("T"))), "F", sig(vec![], None), vec![
            go(call(func_lit(sig(vec![], None), vec![inc(sel(ident("r"), "X"))]), vec![])),
            defer(call(
                func_lit(sig(vec![], None), vec![expr_stmt(call(
                    func_lit(sig(vec![], None), vec![dec(sel(ident("r"), "Y"))]),
                    vec![],
                ))]),
                vec![],
            )),
        ])],
    );
    let out = cpp(&m);
    assert!(out.contains("void T::F() {"), "{out}");
    assert!(out.contains("this->X++;"), "{out}");
    assert!(out.contains("this->Y--;"), "{out}");
    assert!(!out.contains("r.X") && !out.contains("r.Y"), "{out}");
}

#[test]
fn test_closure_parameter_shadows_receiver() {
    let m = module(
        "main",
        vec![method(field(&["r"], star(ident("T"))), "F", sig(vec![], None), vec![expr_stmt(call(
            func_lit(sig(vec![field(&["r"], star(ident("T")))], None), vec![inc(sel(ident("r"), "X"))]),
            vec![ident("other")],
        ))])],
    );
    let out = cpp(&m);
    assert!(out.contains("r.X++;"), "{out}");
    assert!(!out.contains("this->X"), "{out}");
}

#[test]
fn test_package_selector_uses_namespace() {
    let m = module(
        "main",
        vec![
            imports(vec![import(None, "\"fmt\""), import(None, "\"time\"")]),
            func("main", sig(vec![], None), vec![
                expr_stmt(call(sel(ident("fmt"), "Println"), vec![string("\"hi\"")])),
                expr_stmt(call(sel(ident("time"), "Sleep"), vec![int(1)])),
            ]),
        ],
    );
    let out = cpp(&m);
    assert!(out.contains("#include <fmt.h>"), "{out}");
    assert!(out.contains("#include <go_time.h>"), "{out}");
    assert!(out.contains("fmt::Println(\"hi\");"), "{out}");
    assert!(out.contains("go_time::Sleep(1);"), "{out}");
}

// ============================================================================
// Deferred calls
// ============================================================================

#[test]
fn test_deferred_names_are_unique_per_scope() {
    let m = module(
        "main",
        vec![
            func("first", sig(vec![], None), vec![
                defer(call(ident("a"), vec![])),
                defer(call(ident("b"), vec![])),
            ]),
            func("second", sig(vec![], None), vec![defer(call(ident("c"), vec![]))]),
        ],
    );
    let out = cpp(&m);
    assert!(out.contains("Deferred defer0([&](){ a(); });"), "{out}");
    assert!(out.contains("Deferred defer1([&](){ b(); });"), "{out}");
    assert!(out.contains("Deferred defer0([&](){ c(); });"), "{out}");
    assert!(!out.contains("defer2"), "{out}");
}

#[test]
fn test_closure_has_its_own_defer_counter() {
    let m = main_with(vec![
        defer(call(ident("a"), vec![])),
        expr_stmt(call(func_lit(sig(vec![], None), vec![defer(call(ident("b"), vec![]))]), vec![])),
        defer(call(ident("c"), vec![])),
    ]);
    let out = cpp(&m);
    assert!(out.contains("Deferred defer0([&](){ a(); });"), "{out}");
    assert!(out.contains("Deferred defer0([&](){ b(); });"), "{out}");
    assert!(out.contains("Deferred defer1([&](){ c(); });"), "{out}");
}

// ============================================================================
// Results
// ============================================================================

#[test]
fn test_multi_value_return_uses_make_tuple() {
    let m = module(
        "main",
        vec![func("pair", sig(vec![], Some(vec![anon(int_ty()), anon(ident("string"))])), vec![ret(vec![
            ident("x"),
            ident("y"),
        ])])],
    );
    let out = cpp(&m);
    assert!(out.contains("tuple<int, std::string> pair() {"), "{out}");
    assert_eq!(out.matches("make_tuple(x, y)").count(), 1, "{out}");
}

#[test]
fn test_named_results_declared_once_and_bare_return_fills_them() {
    let m = module(
        "main",
        vec![func(
            "divmod",
            sig(vec![field(&["a", "b"], int_ty())], Some(vec![field(&["q", "r"], int_ty())])),
            vec![
                assign(vec![ident("q")], AssignOp::Assign, vec![binary(ident("a"), BinaryOp::Quo, ident("b"))]),
                assign(vec![ident("r")], AssignOp::Assign, vec![binary(ident("a"), BinaryOp::Rem, ident("b"))]),
                ret(vec![]),
            ],
        )],
    );
    let out = cpp(&m);
    assert!(out.contains("tuple<int, int> divmod(int a, int b) {\n  int q;\n  int r;\n"), "{out}");
    assert_eq!(out.matches("int q;").count(), 1, "{out}");
    assert!(out.contains("return make_tuple(q, r);"), "{out}");
}

#[test]
fn test_named_results_with_conditional_initializer_and_bare_return() {
    let m = module(
        "main",
        vec![func("f", sig(vec![], Some(vec![field(&["x", "y"], int_ty())])), vec![
            if_stmt(
                Some(define("v", call(ident("g"), vec![]))),
                binary(ident("v"), BinaryOp::Gtr, int(0)),
                vec![assign(vec![ident("x")], AssignOp::Assign, vec![ident("v")])],
                None,
            ),
            ret(vec![]),
        ])],
    );
    let out = cpp(&m);
    assert!(out.contains("tuple<int, int> f() {\n  int x;\n  int y;\n  if ("), "{out}");
    assert_eq!(out.matches("int x;").count(), 1, "{out}");
    assert_eq!(out.matches("int y;").count(), 1, "{out}");
    assert_eq!(out.matches("if (auto v = g(); v > 0) {").count(), 1, "{out}");
    assert!(out.contains("    x = v;\n  }\n"), "{out}");
    assert!(out.trim_end().ends_with("return make_tuple(x, y);\n}"), "{out}");
}

#[test]
fn test_single_named_result_bare_return() {
    let m = module(
        "main",
        vec![func("one", sig(vec![], Some(vec![field(&["n"], int_ty())])), vec![ret(vec![])])],
    );
    let out = cpp(&m);
    assert!(out.contains("int one() {\n  int n;\n  return n;\n}"), "{out}");
}

#[test]
fn test_void_bare_return() {
    let out = cpp(&module("main", vec![func("stop", sig(vec![], None), vec![ret(vec![])])]));
    assert!(out.contains("void stop() {\n  return;\n}"), "{out}");
}

#[test]
fn test_closure_named_results() {
    let m = main_with(vec![define(
        "f",
        func_lit(sig(vec![], Some(vec![field(&["n"], int_ty())])), vec![
            assign(vec![ident("n")], AssignOp::Assign, vec![int(1)]),
            ret(vec![]),
        ]),
    )]);
    let out = cpp(&m);
    assert!(
        out.contains("  auto f = [&]() -> int {\n    int n;\n    n = 1;\n    return n;\n  };"),
        "{out}"
    );
}

#[test]
fn test_function_prototype() {
    let m = module(
        "main",
        vec![sp(Decl::Func(goshift_syntax::ast::FuncDecl {
            recv: None,
            name: "external".to_string(),
            ty: sig(vec![anon(int_ty())], None),
            body: None,
        }))],
    );
    assert!(cpp(&m).contains("void external(int);"));
}

// ============================================================================
// Statements
// ============================================================================

#[test]
fn test_loop_initializer_appears_once_in_header() {
    let m = main_with(vec![for_stmt(
        Some(define("i", int(0))),
        Some(binary(ident("i"), BinaryOp::Lss, int(3))),
        Some(inc(ident("i"))),
        vec![expr_stmt(call(ident("use"), vec![ident("i")]))],
    )]);
    let out = cpp(&m);
    assert_eq!(out.matches("i = 0").count(), 1, "{out}");
    assert!(out.contains("  for (int i = 0; i < 3; i++) {\n    use(i);\n  }\n"), "{out}");
}

#[test]
fn test_condition_only_loop_is_while() {
    let out = cpp(&main_with(vec![
        for_stmt(None, Some(ident("running")), None, vec![]),
        for_stmt(None, None, None, vec![branch(BranchKind::Break, None)]),
    ]));
    assert!(out.contains("while (running) {"), "{out}");
    assert!(out.contains("while (true) {\n    break;\n  }"), "{out}");
}

#[test]
fn test_if_else_chain() {
    let m = main_with(vec![if_stmt(
        Some(define("err", call(ident("f"), vec![]))),
        binary(ident("err"), BinaryOp::Neq, ident("nil")),
        vec![expr_stmt(call(ident("fail"), vec![]))],
        Some(if_stmt(
            None,
            ident("ok"),
            vec![inc(ident("n"))],
            Some(block_stmt(vec![dec(ident("n"))])),
        )),
    )]);
    let out = cpp(&m);
    let expected = "  if (auto err = f(); err != nullptr) {\n    fail();\n  } else if (ok) {\n    n++;\n  } else {\n    n--;\n  }\n";
    assert!(out.contains(expected), "{out}");
}

#[test]
fn test_range_loops() {
    let out = cpp(&main_with(vec![
        range_stmt(Some(ident("k")), Some(ident("v")), ident("m"), vec![]),
        range_stmt(Some(ident("_")), Some(ident("v")), ident("items"), vec![]),
    ]));
    assert!(out.contains("for (auto& [k, v] : m) {"), "{out}");
    assert!(out.contains("for (auto& v : items) {"), "{out}");
}

#[test]
fn test_switch_breaks_unless_fallthrough() {
    let m = main_with(vec![switch_stmt(
        None,
        Some(ident("x")),
        vec![
            case(vec![int(1)], vec![expr_stmt(call(ident("a"), vec![])), branch(BranchKind::Fallthrough, None)]),
            case(vec![int(2), int(3)], vec![expr_stmt(call(ident("b"), vec![]))]),
            case(vec![], vec![]),
        ],
    )]);
    let out = cpp(&m);
    let expected = concat!(
        "  switch (x) {\n",
        "    case 1:\n",
        "      a();\n",
        "      [[fallthrough]];\n",
        "    case 2: case 3:\n",
        "      b();\n",
        "      break;\n",
        "    default:\n",
        "      break;\n",
        "  }\n",
    );
    assert!(out.contains(expected), "{out}");
}

#[test]
fn test_tagless_switch_matches_true() {
    let out = cpp(&main_with(vec![switch_stmt(None, None, vec![case(vec![ident("ready")], vec![])])]));
    assert!(out.contains("switch (true) {"), "{out}");
}

#[test]
fn test_type_switch_guard() {
    let m = main_with(vec![type_switch(
        define("t", type_assert(ident("v"), None)),
        vec![case(vec![ident("string")], vec![]), case(vec![star(ident("Point"))], vec![])],
    )]);
    let out = cpp(&m);
    assert!(out.contains("switch (auto t = TypeSwitch(v)) {"), "{out}");
    assert!(out.contains("case std::string:"), "{out}");
    assert!(out.contains("case Point*:"), "{out}");
}

#[test]
fn test_multi_assignment_uses_tie() {
    let out = cpp(&main_with(vec![
        assign(vec![ident("a"), ident("b")], AssignOp::Assign, vec![ident("b"), ident("a")]),
        assign(vec![ident("_"), ident("err")], AssignOp::Assign, vec![call(ident("f"), vec![])]),
        assign(vec![ident("x"), ident("y")], AssignOp::Define, vec![int(1), int(2)]),
    ]));
    assert!(out.contains("tie(a, b) = make_tuple(b, a);"), "{out}");
    assert!(out.contains("tie(std::ignore, err) = f();"), "{out}");
    assert!(out.contains("auto [x, y] = make_tuple(1, 2);"), "{out}");
}

#[test]
fn test_define_picks_type_from_hint() {
    let out = cpp(&main_with(vec![
        define("n", int(1)),
        define("f", lit(LitKind::Float, "2.5")),
        define("s", string("\"x\"")),
        define("ok", binary(ident("n"), BinaryOp::Gtr, int(0))),
        define("p", unary(UnaryOp::And, composite(Some(ident("Point")), vec![]))),
        define("u", call(ident("g"), vec![])),
    ]));
    assert!(out.contains("int n = 1;"), "{out}");
    assert!(out.contains("double f = 2.5;"), "{out}");
    assert!(out.contains("std::string s = \"x\";"), "{out}");
    assert!(out.contains("bool ok = n > 0;"), "{out}");
    assert!(out.contains("Point* p = &Point{};"), "{out}");
    assert!(out.contains("auto u = g();"), "{out}");
}

#[test]
fn test_and_not_operators() {
    let out = cpp(&main_with(vec![
        assign(vec![ident("x")], AssignOp::AndNotAssign, vec![ident("mask")]),
        define("y", binary(ident("a"), BinaryOp::AndNot, ident("b"))),
        define("z", unary(UnaryOp::Xor, ident("a"))),
    ]));
    assert!(out.contains("x &= ~(mask);"), "{out}");
    assert!(out.contains("auto y = a & ~b;"), "{out}");
    assert!(out.contains("auto z = ~a;"), "{out}");
}

#[test]
fn test_labels_and_branches() {
    let out = cpp(&main_with(vec![labeled(
        "outer",
        for_stmt(None, None, None, vec![
            branch(BranchKind::Continue, Some("outer")),
            branch(BranchKind::Goto, Some("done")),
        ]),
    )]));
    assert!(out.contains("  outer:\n  while (true) {"), "{out}");
    assert!(out.contains("    goto outer_continue;\n    goto done;\n    outer_continue:;\n  }\n"), "{out}");
    assert!(!out.contains("outer_break"), "{out}");
}

#[test]
fn test_labeled_break_and_continue_jump_to_targets() {
    let out = cpp(&main_with(vec![labeled(
        "rows",
        range_stmt(Some(ident("i")), None, ident("grid"), vec![
            for_stmt(None, Some(ident("more")), None, vec![
                if_stmt(None, ident("skip"), vec![branch(BranchKind::Continue, Some("rows"))], None),
                if_stmt(None, ident("stop"), vec![branch(BranchKind::Break, Some("rows"))], None),
                branch(BranchKind::Break, None),
            ]),
        ]),
    )]));
    assert!(out.contains("goto rows_continue;"), "{out}");
    assert!(out.contains("goto rows_break;"), "{out}");
    assert!(out.contains("      break;\n    }\n    rows_continue:;\n  }\n  rows_break:;\n"), "{out}");
    assert_eq!(out.matches("rows_continue:;").count(), 1, "{out}");
}

#[test]
fn test_labeled_switch_break_leaves_the_switch() {
    let out = cpp(&main_with(vec![labeled(
        "pick",
        switch_stmt(None, Some(ident("x")), vec![case(vec![int(1)], vec![
            for_stmt(None, None, None, vec![branch(BranchKind::Break, Some("pick"))]),
        ])]),
    )]));
    assert!(out.contains("goto pick_break;"), "{out}");
    assert!(out.contains("  }\n  pick_break:;\n"), "{out}");
    assert!(!out.contains("pick_continue"), "{out}");
}

// ============================================================================
// Concurrency
// ============================================================================

#[test]
fn test_channels_goroutines_and_select() {
    let m = main_with(vec![
        define("ch", call(ident("make"), vec![chan_of(ChanDir::Both, int_ty()), int(3)])),
        go(call(ident("worker"), vec![ident("ch")])),
        send(ident("ch"), int(1)),
        define("v", unary(UnaryOp::Arrow, ident("ch"))),
        select(vec![
            comm(
                Some(define("got", unary(UnaryOp::Arrow, ident("ch")))),
                vec![expr_stmt(call(ident("use"), vec![ident("got")]))],
            ),
            comm(None, vec![]),
        ]),
    ]);
    let out = cpp(&m);
    assert!(out.contains("Chan<int> ch = Make<Chan<int>>(3);"), "{out}");
    assert!(out.contains("Goroutine([&](){ worker(ch); });"), "{out}");
    assert!(out.contains("ch.Send(1);"), "{out}");
    assert!(out.contains("auto v = ch.Receive();"), "{out}");
    let expected = concat!(
        "  SELECT {\n",
        "    SELECT_CASE(auto got = ch.Receive()):\n",
        "      use(got);\n",
        "      break;\n",
        "    default:\n",
        "      break;\n",
        "  }\n",
    );
    assert!(out.contains(expected), "{out}");
}

#[test]
fn test_directional_channel_types() {
    let m = module(
        "main",
        vec![func(
            "pipe",
            sig(
                vec![
                    field(&["in"], chan_of(ChanDir::Recv, int_ty())),
                    field(&["out"], chan_of(ChanDir::Send, int_ty())),
                ],
                None,
            ),
            vec![],
        )],
    );
    assert!(cpp(&m).contains("void pipe(ReceiveChan<int> in, SendChan<int> out) {"));
}

// ============================================================================
// Types and literals
// ============================================================================

#[test]
fn test_type_declarations() {
    let m = module(
        "main",
        vec![
            type_decl("Point", struct_of(vec![field(&["X", "Y"], int_ty())])),
            type_decl(
                "Shape",
                interface_of(vec![field(&["Area"], func_type_expr(sig(vec![], Some(vec![anon(ident("float64"))]))))]),
            ),
            type_decl("Celsius", ident("float64")),
        ],
    );
    let out = cpp(&m);
    assert!(out.contains("struct Point {\n  int X, Y;\n};"), "{out}");
    assert!(out.contains("struct Shape {\n  virtual double Area() = 0;\n};"), "{out}");
    assert!(out.contains("using Celsius = double;"), "{out}");
}

#[test]
fn test_container_types() {
    let m = module(
        "main",
        vec![var_decl(vec![
            value_spec(&["grid"], Some(array_of(Some(int(3)), int_ty())), vec![]),
            value_spec(&["names"], Some(array_of(None, ident("string"))), vec![]),
            value_spec(&["ages"], Some(map_of(ident("string"), int_ty())), vec![]),
            value_spec(&["cb"], Some(func_type_expr(sig(vec![anon(int_ty())], Some(vec![anon(ident("bool"))])))), vec![]),
        ])],
    );
    let out = cpp(&m);
    assert!(out.contains("std::array<int, 3> grid;"), "{out}");
    assert!(out.contains("std::vector<std::string> names;"), "{out}");
    assert!(out.contains("std::map<std::string, int> ages;"), "{out}");
    assert!(out.contains("std::function<bool(int)> cb;"), "{out}");
}

#[test]
fn test_composite_literal_kinds() {
    let m = main_with(vec![
        define(
            "m",
            composite(Some(map_of(ident("string"), int_ty())), vec![key_value(string("\"a\""), int(1))]),
        ),
        define("p", composite(Some(ident("Point")), vec![key_value(ident("X"), int(1))])),
        define(
            "grid",
            composite(
                Some(array_of(None, array_of(None, int_ty()))),
                vec![composite(None, vec![int(1), int(2)])],
            ),
        ),
    ]);
    let out = cpp(&m);
    assert!(out.contains("std::map<std::string, int> m = std::map<std::string, int>{{\"a\", 1}};"), "{out}");
    assert!(out.contains("Point p = Point{.X = 1};"), "{out}");
    assert!(out.contains("std::vector<std::vector<int>>{{1, 2}}"), "{out}");
}

#[test]
fn test_slices_and_literals() {
    let out = cpp(&main_with(vec![
        define("a", slice(ident("s"), None, Some(int(2)), None)),
        define("b", slice(ident("s"), Some(int(1)), None, None)),
        define("c", slice(ident("s"), Some(int(1)), Some(int(2)), Some(int(4)))),
        define("raw", string("`a\"b`")),
        define("z", lit(LitKind::Imag, "2i")),
        define("p", call(ident("new"), vec![ident("Point")])),
        define("t", type_assert(ident("v"), Some(ident("string")))),
    ]));
    assert!(out.contains("auto a = Slice(s, 0, 2);"), "{out}");
    assert!(out.contains("auto b = Slice(s, 1, len(s));"), "{out}");
    assert!(out.contains("auto c = Slice(s, 1, 2, 4);"), "{out}");
    assert!(out.contains("std::string raw = \"a\\\"b\";"), "{out}");
    assert!(out.contains("std::complex<double> z = std::complex<double>(0, 2);"), "{out}");
    assert!(out.contains("Point* p = new Point();"), "{out}");
    assert!(out.contains("auto t = TypeAssert<std::string>(v);"), "{out}");
}

#[test]
fn test_variadic_parameter_and_spread() {
    let m = module(
        "main",
        vec![func("sum", sig(vec![field(&["xs"], ellipsis(Some(int_ty())))], None), vec![expr_stmt(
            call_spread(ident("inner"), vec![ident("xs")]),
        )])],
    );
    let out = cpp(&m);
    assert!(out.contains("void sum(Variadic<int> xs) {"), "{out}");
    assert!(out.contains("inner(xs...);"), "{out}");
}

// ============================================================================
// Placeholders and balance
// ============================================================================

#[test]
fn test_bad_nodes_become_placeholders() {
    let m = module(
        "main",
        vec![
            sp(Decl::Bad("garbage".to_string())),
            func("main", sig(vec![], None), vec![
                sp(Stmt::Bad("oops".to_string())),
                define("x", sp(Expr::Bad("?".to_string()))),
            ]),
        ],
    );
    let out = cpp(&m);
    assert!(out.contains("/* Node: BadDecl Bad(\"garbage\") */"), "{out}");
    assert!(out.contains("  /* Node: BadStmt Bad(\"oops\") */"), "{out}");
    assert!(out.contains("auto x = /* Node: BadExpr Bad(\"?\") */;"), "{out}");
}

#[test]
fn test_placeholder_positions() {
    let m = module("main", vec![sp(Decl::Bad("garbage".to_string()))]);
    let mut backend = CppEmitter::new(EmitConfig::new().with_position_comments(true));
    let out = Walker::translate(&m, &mut backend);
    assert!(out.contains("/* Node: BadDecl @ 0..0 Bad(\"garbage\") */"), "{out}");
}

#[test]
fn test_walk_leaves_backend_balanced() {
    let m = main_with(vec![
        if_stmt(None, ident("a"), vec![for_stmt(None, None, None, vec![branch(BranchKind::Break, None)])], None),
        expr_stmt(call(func_lit(sig(vec![], None), vec![defer(call(ident("f"), vec![]))]), vec![])),
    ]);
    let mut backend = CppEmitter::default();
    let _ = Walker::translate(&m, &mut backend);
    assert_eq!(backend.output().current_indent(), 0);
    assert_eq!(backend.contexts().depth(), 0);
    assert!(!backend.output().is_capturing());
}

#[test]
fn test_custom_indent_width() {
    let m = main_with(vec![expr_stmt(call(ident("f"), vec![]))]);
    let mut backend = CppEmitter::new(EmitConfig::new().with_indent_width(4).with_blank_line_between_decls(false));
    let out = Walker::translate(&m, &mut backend);
    assert_eq!(out, "//package main\n#include <go.h>\nint main(int argc, char **argv) {\n    f();\n}\n");
}
