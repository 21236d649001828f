//! Property-based tests for the translator
//!
//! These tests use proptest to verify invariants across many randomly
//! generated trees, catching nesting combinations hand-written tests miss.

use goshift::emit::{EmitConfig, Emitter, TARGETS, create_backend};
use goshift::walker::Walker;
use goshift_syntax::ast::{Module, Stmt};
use goshift_syntax::builders::*;
use proptest::prelude::*;

/// Statements nested up to four levels deep, mixing every block-bearing construct.
fn arb_stmt() -> impl Strategy<Value = S> {
    let leaf = prop_oneof![
        "[a-z]{1,6}".prop_map(|name| expr_stmt(call(ident(&name), vec![]))),
        Just(inc(ident("n"))),
        Just(sp(Stmt::Empty)),
        Just(defer(call(ident("f"), vec![]))),
        Just(ret(vec![])),
    ];
    leaf.prop_recursive(4, 48, 4, |inner| {
        let body = prop::collection::vec(inner, 0..4);
        prop_oneof![
            body.clone().prop_map(|b| if_stmt(None, ident("c"), b, None)),
            (body.clone(), body.clone()).prop_map(|(a, b)| if_stmt(
                Some(define("v", int(1))),
                ident("c"),
                a,
                Some(block_stmt(b))
            )),
            body.clone()
                .prop_map(|b| for_stmt(Some(define("i", int(0))), Some(ident("c")), Some(inc(ident("i"))), b)),
            body.clone().prop_map(|b| range_stmt(Some(ident("k")), None, ident("xs"), b)),
            body.clone().prop_map(block_stmt),
            (body.clone(), body.clone()).prop_map(|(a, b)| switch_stmt(
                None,
                Some(ident("x")),
                vec![case(vec![int(1)], a), case(vec![], b)]
            )),
            body.clone().prop_map(|b| select(vec![comm(None, b)])),
            body.prop_map(|b| expr_stmt(call(func_lit(sig(vec![], None), b), vec![]))),
        ]
    })
}

fn main_with(body: Vec<S>) -> Module {
    module("main", vec![func("main", sig(vec![], None), body)])
}

// =============================================================================
// Balance Properties
// =============================================================================

mod balance_tests {
    use super::*;

    proptest! {
        /// Property: indentation, context depth and captures are back at zero after any traversal
        #[test]
        fn walk_is_balanced(body in prop::collection::vec(arb_stmt(), 0..6)) {
            let tree = main_with(body);
            for target in TARGETS {
                let mut backend = create_backend(target.name, EmitConfig::default()).unwrap();
                Walker::new(backend.as_mut()).walk_module(&tree);

                prop_assert_eq!(backend.output().current_indent(), 0);
                prop_assert_eq!(backend.contexts().depth(), 0);
                prop_assert!(!backend.output().is_capturing());

                let text = backend.output_mut().take();
                prop_assert_eq!(text.lines().last(), Some("}"));
                for line in text.lines() {
                    let lead = line.len() - line.trim_start().len();
                    prop_assert_eq!(lead % 2, 0, "odd indentation in {:?}", line);
                }
            }
        }

        /// Property: indentation width only scales leading whitespace
        #[test]
        fn indent_width_scales_layout(body in prop::collection::vec(arb_stmt(), 0..4)) {
            let tree = main_with(body);
            let narrow = goshift::translate_target(&tree, "go", EmitConfig::new().with_indent_width(2)).unwrap();
            let wide = goshift::translate_target(&tree, "go", EmitConfig::new().with_indent_width(4)).unwrap();
            let strip = |s: &str| s.lines().map(|l| l.trim_start().to_string()).collect::<Vec<_>>();
            prop_assert_eq!(strip(&narrow), strip(&wide));
        }
    }
}

// =============================================================================
// Rewrite Properties
// =============================================================================

mod rewrite_tests {
    use super::*;

    proptest! {
        /// Property: unspecified constants count 0..n and a second group restarts at 0
        #[test]
        fn sequence_constants_count_per_group(first in 1usize..25, second in 1usize..10) {
            let group = |prefix: &str, n: usize| {
                let names: Vec<String> = (0..n).map(|k| format!("{prefix}{k}")).collect();
                let specs = names
                    .iter()
                    .enumerate()
                    .map(|(k, name)| {
                        let values = if k == 0 { vec![ident("iota")] } else { vec![] };
                        value_spec(&[name.as_str()], None, values)
                    })
                    .collect();
                const_group(specs)
            };
            let tree = module("main", vec![group("A", first), group("B", second)]);
            let out = goshift::translate_target(&tree, "cpp", EmitConfig::default()).unwrap();

            for k in 0..first {
                let expected = format!("const int A{k} = {k};");
                prop_assert!(out.contains(&expected), "missing {}", expected);
            }
            for k in 0..second {
                let expected = format!("const int B{k} = {k};");
                prop_assert!(out.contains(&expected), "missing {}", expected);
            }
        }

        /// Property: n defers in one scope get the names defer0..defer(n-1), each exactly once
        #[test]
        fn deferred_names_are_unique(n in 1usize..30, closures in 0usize..3) {
            let mut body: Vec<S> = (0..n).map(|k| defer(call(ident(&format!("f{k}")), vec![]))).collect();
            for _ in 0..closures {
                body.push(expr_stmt(call(
                    func_lit(sig(vec![], None), vec![defer(call(ident("inner"), vec![]))]),
                    vec![],
                )));
            }
            let out = goshift::translate_target(&main_with(body), "cpp", EmitConfig::default()).unwrap();

            for k in 0..n {
                let expected = format!("Deferred defer{k}([&](){{ f{k}(); }});");
                prop_assert_eq!(out.matches(&expected).count(), 1, "{}", expected);
            }
            let next = format!("Deferred defer{n}(");
            prop_assert!(!out.contains(&next), "unexpected {}", next);
            prop_assert_eq!(out.matches("Deferred defer0([&](){ inner(); });").count(), closures);
        }
    }
}
