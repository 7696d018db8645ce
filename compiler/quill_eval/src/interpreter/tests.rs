use super::*;
use crate::errors::EvalError;
use pretty_assertions::assert_eq;
use quill_ir::{
    Call, Comment, CommentKind, DeclFlags, Expr, FunctionDecl, InterpPart, Interpolation,
    ListExpr, ListSeparator, Node, Number, Param, Property, Return, Root, Rule, VariableDecl,
};

fn rule(selector: &str, children: Vec<Node>) -> Node {
    Node::Rule(Rule {
        selector: Interpolation::literal(selector),
        children,
    })
}

fn prop(name: &str, value: Expr) -> Node {
    Node::Property(Property {
        name: Interpolation::literal(name),
        value,
        children: Vec::new(),
    })
}

fn decl(name: &str, value: Expr, flags: DeclFlags) -> Node {
    Node::VariableDecl(VariableDecl {
        name: name.into(),
        value,
        flags,
    })
}

fn lit(value: Value) -> Expr {
    Expr::Literal(value)
}

fn call(name: &str, args: Vec<Expr>) -> Expr {
    Expr::Call(Call {
        name: name.into(),
        args,
    })
}

fn function(name: &str, params: Vec<Param>, children: Vec<Node>) -> Node {
    Node::FunctionDecl(FunctionDecl {
        name: name.into(),
        params,
        children,
    })
}

fn param(name: &str, default: Option<Expr>) -> Param {
    Param {
        name: name.into(),
        default,
    }
}

fn ret(expr: Expr) -> Node {
    Node::Return(Return { expr })
}

fn run_with(
    builder: impl FnOnce(&StringInterner) -> Interpreter<'_>,
    children: Vec<Node>,
) -> EvalResult<Vec<String>> {
    let interner = StringInterner::new();
    let program = match quill_compile::compile(&Root { children }, &interner) {
        Ok(program) => program,
        Err(err) => panic!("unexpected compile error: {err}"),
    };
    let mut interpreter = builder(&interner);
    interpreter.run(&program)?;
    Ok(outline(interpreter.output()))
}

fn run(children: Vec<Node>) -> EvalResult<Vec<String>> {
    run_with(|interner| Interpreter::new(interner), children)
}

/// One line per output node, indented by depth.
fn outline(tree: &OutputTree) -> Vec<String> {
    fn walk(tree: &OutputTree, id: NodeId, depth: usize, out: &mut Vec<String>) {
        for &child in tree.children(id) {
            let indent = "  ".repeat(depth);
            let line = match tree.get(child) {
                Some(OutputNode::Rule { selector }) => format!("{indent}{selector}"),
                Some(OutputNode::Property { name, value }) => format!("{indent}{name}: {value}"),
                Some(OutputNode::Comment { text, kind }) => {
                    format!("{indent}/* {text} */ ({})", kind.as_str())
                }
                Some(OutputNode::Root) | None => format!("{indent}?"),
            };
            out.push(line);
            walk(tree, child, depth + 1, out);
        }
    }
    let mut out = Vec::new();
    walk(tree, tree.root(), 0, &mut out);
    out
}

#[test]
fn test_local_variable_feeds_property() {
    let output = run(vec![
        decl("width", lit(Value::dimension(10.0, "px")), DeclFlags::empty()),
        rule(".a", vec![prop("width", Expr::var("width"))]),
    ]);
    assert_eq!(output, Ok(vec![".a".to_string(), "  width: 10px".to_string()]));
}

#[test]
fn test_variable_read_clears_original_text() {
    let written = Value::Number(Number::new(12.0).with_unit("px").with_original("12.0px"));
    let output = run(vec![
        decl("size", lit(written.clone()), DeclFlags::GLOBAL),
        rule(
            ".a",
            vec![
                prop("literal", lit(written)),
                prop("first", Expr::var("size")),
                prop("second", Expr::var("size")),
            ],
        ),
    ]);
    assert_eq!(
        output,
        Ok(vec![
            ".a".to_string(),
            "  literal: 12.0px".to_string(),
            "  first: 12px".to_string(),
            "  second: 12px".to_string(),
        ])
    );
}

#[test]
fn test_undefined_variable_names_written_form() {
    let output = run(vec![rule(".a", vec![prop("color", Expr::var("main-color"))])]);
    let Err(err) = output else {
        panic!("reference to an undeclared variable must fail");
    };
    assert_eq!(
        err,
        EvalError::UndefinedVariable {
            name: "main-color".to_string()
        }
    );
    assert_eq!(err.to_string(), "Undefined variable: \"$main-color\".");
}

#[test]
fn test_default_assignment_only_fills_unset() {
    let output = run(vec![
        decl("x", lit(Value::number(1.0)), DeclFlags::empty()),
        decl("x", lit(Value::number(2.0)), DeclFlags::DEFAULT),
        decl("y", lit(Value::Null), DeclFlags::GLOBAL),
        rule(
            ".a",
            vec![
                decl("y", lit(Value::number(3.0)), DeclFlags::DEFAULT),
                prop("x", Expr::var("x")),
                prop("y", Expr::var("y")),
            ],
        ),
    ]);
    assert_eq!(
        output,
        Ok(vec![".a".to_string(), "  x: 1".to_string(), "  y: 3".to_string()])
    );
}

#[test]
fn test_global_assignment_escapes_rule() {
    let output = run(vec![
        rule(".a", vec![decl("theme", lit(Value::ident("dark")), DeclFlags::GLOBAL)]),
        rule(".b", vec![prop("theme", Expr::var("theme"))]),
    ]);
    assert_eq!(
        output,
        Ok(vec![".a".to_string(), ".b".to_string(), "  theme: dark".to_string()])
    );
}

#[test]
fn test_global_assignment_updates_document_variable() {
    let output = run(vec![
        decl("theme", lit(Value::ident("light")), DeclFlags::empty()),
        rule(".a", vec![decl("theme", lit(Value::ident("dark")), DeclFlags::GLOBAL)]),
        rule(".b", vec![prop("theme", Expr::var("theme"))]),
    ]);
    assert_eq!(
        output,
        Ok(vec![".a".to_string(), ".b".to_string(), "  theme: dark".to_string()])
    );
}

#[test]
fn test_local_shadows_global_at_runtime() {
    let output = run(vec![
        rule(".a", vec![decl("x", lit(Value::ident("global")), DeclFlags::GLOBAL)]),
        rule(
            ".b",
            vec![
                decl("x", lit(Value::ident("local")), DeclFlags::empty()),
                prop("x", Expr::var("x")),
            ],
        ),
        rule(".c", vec![prop("x", Expr::var("x"))]),
    ]);
    assert_eq!(
        output,
        Ok(vec![
            ".a".to_string(),
            ".b".to_string(),
            "  x: local".to_string(),
            ".c".to_string(),
            "  x: global".to_string(),
        ])
    );
}

#[test]
fn test_nested_rules_resolve_parent_selector() {
    let output = run(vec![rule(
        ".a, .b",
        vec![
            rule("&:hover", vec![prop("x", lit(Value::number(1.0)))]),
            rule(".c", vec![rule("& > .d", Vec::new())]),
        ],
    )]);
    assert_eq!(
        output,
        Ok(vec![
            ".a, .b".to_string(),
            "  .a:hover, .b:hover".to_string(),
            "    x: 1".to_string(),
            "  .a .c, .b .c".to_string(),
            "    .a .c > .d, .b .c > .d".to_string(),
        ])
    );
}

#[test]
fn test_sibling_rule_selector_not_inherited() {
    let output = run(vec![rule(".a", Vec::new()), rule(".b", Vec::new())]);
    assert_eq!(output, Ok(vec![".a".to_string(), ".b".to_string()]));
}

#[test]
fn test_parent_reference_at_root_fails() {
    let output = run(vec![rule("&.active", Vec::new())]);
    assert_eq!(
        output,
        Err(EvalError::ParentRefAtRoot {
            selector: "&.active".to_string()
        })
    );
}

#[test]
fn test_interpolated_selector_and_comment() {
    let output = run(vec![
        decl("name", lit(Value::quoted("button")), DeclFlags::empty()),
        Node::Comment(Comment {
            text: Interpolation::new(vec![
                InterpPart::Literal("styles for ".into()),
                InterpPart::Expr(Expr::var("name")),
            ]),
            kind: CommentKind::Normal,
        }),
        Node::Rule(Rule {
            selector: Interpolation::new(vec![
                InterpPart::Literal(".".into()),
                InterpPart::Expr(Expr::var("name")),
                InterpPart::Literal("-primary".into()),
            ]),
            children: vec![prop("content", Expr::var("name"))],
        }),
    ]);
    assert_eq!(
        output,
        Ok(vec![
            "/* styles for button */ (normal)".to_string(),
            ".button-primary".to_string(),
            "  content: \"button\"".to_string(),
        ])
    );
}

#[test]
fn test_function_call_with_default_argument() {
    let output = run(vec![
        function(
            "pair",
            vec![param("first", None), param("second", Some(Expr::var("first")))],
            vec![ret(Expr::List(ListExpr {
                items: vec![Expr::var("first"), Expr::var("second")],
                separator: ListSeparator::Space,
            }))],
        ),
        rule(
            ".a",
            vec![
                prop("one", call("pair", vec![lit(Value::number(1.0))])),
                prop(
                    "two",
                    call("pair", vec![lit(Value::number(1.0)), lit(Value::number(2.0))]),
                ),
            ],
        ),
    ]);
    assert_eq!(
        output,
        Ok(vec![
            ".a".to_string(),
            "  one: 1 1".to_string(),
            "  two: 1 2".to_string(),
        ])
    );
}

#[test]
fn test_function_arity_errors() {
    let define = || {
        function(
            "scale",
            vec![param("factor", None)],
            vec![ret(Expr::var("factor"))],
        )
    };

    let missing = run(vec![define(), prop("x", call("scale", Vec::new()))]);
    assert_eq!(
        missing,
        Err(EvalError::MissingArgument {
            function: "scale".to_string(),
            param: "factor".to_string(),
        })
    );

    let extra = run(vec![
        define(),
        prop(
            "x",
            call("scale", vec![lit(Value::number(1.0)), lit(Value::number(2.0))]),
        ),
    ]);
    assert_eq!(
        extra,
        Err(EvalError::TooManyArguments {
            function: "scale".to_string(),
            expected: 1,
            given: 2,
        })
    );
}

#[test]
fn test_function_without_return_fails() {
    let output = run(vec![
        function("noop", Vec::new(), Vec::new()),
        prop("x", call("noop", Vec::new())),
    ]);
    assert_eq!(
        output,
        Err(EvalError::MissingReturn {
            function: "noop".to_string()
        })
    );
}

#[test]
fn test_undefined_function_renders_as_css() {
    let output = run(vec![rule(
        ".a",
        vec![prop(
            "color",
            call(
                "rgba",
                vec![
                    lit(Value::number(0.0)),
                    lit(Value::number(0.0)),
                    lit(Value::number(0.0)),
                    lit(Value::number(0.5)),
                ],
            ),
        )],
    )]);
    assert_eq!(
        output,
        Ok(vec![".a".to_string(), "  color: rgba(0, 0, 0, 0.5)".to_string()])
    );
}

#[test]
fn test_function_body_sees_defining_scope_only() {
    let output = run(vec![
        function("leak", Vec::new(), vec![ret(Expr::var("secret"))]),
        rule(
            ".a",
            vec![
                decl("secret", lit(Value::number(1.0)), DeclFlags::empty()),
                prop("x", call("leak", Vec::new())),
            ],
        ),
    ]);
    assert_eq!(
        output,
        Err(EvalError::UndefinedVariable {
            name: "secret".to_string()
        })
    );
}

#[test]
fn test_runaway_recursion_hits_call_limit() {
    let output = run_with(
        |interner| InterpreterBuilder::new(interner).max_call_depth(8).build(),
        vec![
            function("forever", Vec::new(), vec![ret(call("forever", Vec::new()))]),
            prop("x", call("forever", Vec::new())),
        ],
    );
    assert_eq!(output, Err(EvalError::StackOverflow { depth: 8 }));
}

#[test]
fn test_host_global_is_visible() {
    let output = run_with(
        |interner| {
            InterpreterBuilder::new(interner)
                .global("brand-color", Value::ident("teal"))
                .build()
        },
        vec![rule(".a", vec![prop("color", Expr::var("brand_color"))])],
    );
    assert_eq!(output, Ok(vec![".a".to_string(), "  color: teal".to_string()]));
}

#[test]
fn test_return_at_top_level_stops_document() {
    let output = run(vec![
        rule(".a", Vec::new()),
        ret(lit(Value::Null)),
        rule(".b", Vec::new()),
    ]);
    assert_eq!(output, Ok(vec![".a".to_string()]));
}

#[test]
fn test_call_depth_restored_after_error() {
    let interner = StringInterner::new();
    let root = Root {
        children: vec![
            function("noop", Vec::new(), Vec::new()),
            prop("x", call("noop", Vec::new())),
        ],
    };
    let Ok(program) = quill_compile::compile(&root, &interner) else {
        panic!("document compiles");
    };
    let mut interpreter = Interpreter::new(&interner);
    assert!(interpreter.run(&program).is_err());
    assert_eq!(interpreter.call_depth(), 0);
    assert_eq!(interpreter.env().depth(), 1);
}
