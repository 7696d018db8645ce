use super::*;
use quill_ir::StringInterner;
use std::collections::HashSet;

#[test]
fn test_root_frame_is_never_popped() {
    let mut env = CompileEnv::new();
    assert_eq!(env.depth(), 1);
    env.pop_frame();
    assert_eq!(env.depth(), 1);
    assert_eq!(env.current().id(), FrameId::ROOT);
}

#[test]
fn test_push_child_assigns_unique_tags() {
    let mut env = CompileEnv::new();
    let first = env.push_child();
    env.pop_frame();
    let second = env.push_child();
    assert_ne!(first, second);
    assert_ne!(first, FrameId::ROOT);
    assert_eq!(env.depth(), 2);
}

#[test]
fn test_sibling_frames_never_collide() {
    let mut env = CompileEnv::new();
    let mut seen = HashSet::new();

    for _ in 0..3 {
        env.push_child();
        for _ in 0..4 {
            let sym = env.fresh_symbol(SymbolKind::Rule);
            assert!(seen.insert(sym.to_string()), "duplicate symbol {sym}");
        }
        env.pop_frame();
    }
    assert_eq!(seen.len(), 12);
}

#[test]
fn test_child_symbols_differ_from_ancestors() {
    let mut env = CompileEnv::new();
    let outer = env.fresh_symbol(SymbolKind::Prop);
    env.push_child();
    let inner = env.fresh_symbol(SymbolKind::Prop);
    assert_ne!(outer, inner);
    assert_eq!(outer.index(), inner.index());
    assert_ne!(outer.frame(), inner.frame());
}

#[test]
fn test_is_local_ignores_ancestors() {
    let interner = StringInterner::new();
    let x = interner.intern("x");

    let mut env = CompileEnv::new();
    env.declare_local(x);
    assert!(env.is_local(x));

    env.push_child();
    assert!(!env.is_local(x));
    assert!(env.resolve_local(x).is_some());
}

#[test]
fn test_resolve_local_prefers_innermost() {
    let interner = StringInterner::new();
    let x = interner.intern("x");

    let mut env = CompileEnv::new();
    let outer = env.declare_local(x);
    env.push_child();
    assert_eq!(env.resolve_local(x), Some(outer));

    let inner = env.declare_local(x);
    assert_ne!(inner, outer);
    assert_eq!(env.resolve_local(x), Some(inner));

    env.pop_frame();
    assert_eq!(env.resolve_local(x), Some(outer));
}

#[test]
fn test_resolve_global_searches_document_level_only() {
    let interner = StringInterner::new();
    let x = interner.intern("x");
    let y = interner.intern("y");

    let mut env = CompileEnv::new();
    env.push_child();
    let document = env.declare_local(x);
    env.push_child();
    env.declare_local(y);
    env.push_child();

    assert_eq!(env.resolve_global(x), Some(document));
    assert_eq!(env.resolve_global(y), None);
    assert!(env.resolve_local(y).is_some());
}

#[test]
fn test_redeclaration_reuses_slot() {
    let interner = StringInterner::new();
    let x = interner.intern("x");

    let mut env = CompileEnv::new();
    let first = env.declare_local(x);
    let second = env.declare_local(x);
    assert_eq!(first, second);
    assert_eq!(first.kind(), SymbolKind::Var);
}

#[test]
fn test_params_are_locals() {
    let interner = StringInterner::new();
    let n = interner.intern("n");

    let mut env = CompileEnv::new();
    env.push_child();
    let slot = env.declare_param(n);
    assert_eq!(slot.kind(), SymbolKind::Param);
    assert!(env.is_local(n));
}

#[test]
fn test_undeclared_name_has_no_slot() {
    let interner = StringInterner::new();
    let missing = interner.intern("missing");
    let env = CompileEnv::new();
    assert_eq!(env.resolve_local(missing), None);
}
