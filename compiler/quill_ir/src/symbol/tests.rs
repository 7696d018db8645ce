use super::*;

#[test]
fn test_symbol_text() {
    let sym = Symbol::new(SymbolKind::Rule, FrameId::from_raw(3), 7);
    assert_eq!(sym.to_string(), "rule_3_7");
    assert_eq!(
        Symbol::new(SymbolKind::SavedEnv, FrameId::ROOT, 0).to_string(),
        "saved_env_0_0"
    );
}

#[test]
fn test_symbols_differ_by_frame() {
    let a = Symbol::new(SymbolKind::Prop, FrameId::from_raw(1), 0);
    let b = Symbol::new(SymbolKind::Prop, FrameId::from_raw(2), 0);
    assert_ne!(a, b);
    assert_ne!(a.to_string(), b.to_string());
}

#[test]
fn test_symbol_accessors() {
    let sym = Symbol::new(SymbolKind::Var, FrameId::from_raw(4), 2);
    assert_eq!(sym.kind(), SymbolKind::Var);
    assert_eq!(sym.frame(), FrameId::from_raw(4));
    assert_eq!(sym.index(), 2);
}
