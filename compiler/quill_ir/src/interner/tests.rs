use super::*;

#[test]
fn test_intern_and_lookup() {
    let interner = StringInterner::new();

    let hello = interner.intern("hello");
    let world = interner.intern("world");
    let hello2 = interner.intern("hello");

    assert_eq!(hello, hello2);
    assert_ne!(hello, world);

    assert_eq!(interner.lookup(hello), "hello");
    assert_eq!(interner.lookup(world), "world");
}

#[test]
fn test_empty_string() {
    let interner = StringInterner::new();
    assert!(interner.is_empty());
    let empty = interner.intern("");
    assert_eq!(empty, Name::EMPTY);
    assert_eq!(interner.lookup(Name::EMPTY), "");
}

#[test]
fn test_intern_canonical_merges_spellings() {
    let interner = StringInterner::new();
    let dashed = interner.intern_canonical("main-color");
    let underscored = interner.intern_canonical("main_color");
    assert_eq!(dashed, underscored);
    assert_eq!(interner.lookup(dashed), "main_color");
}

#[test]
fn test_shared_interner() {
    let interner = SharedInterner::new();
    let interner2 = interner.clone();

    let name1 = interner.intern("shared");
    let name2 = interner2.intern("shared");

    assert_eq!(name1, name2);
    assert_eq!(interner.len(), 2);
}
