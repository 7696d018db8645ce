use super::*;

#[test]
fn test_name_raw_roundtrip() {
    let name = Name::from_raw(1000);
    assert_eq!(name.raw(), 1000);
    assert_eq!(name.index(), 1000);
}

#[test]
fn test_name_empty() {
    assert_eq!(Name::EMPTY.raw(), 0);
    assert_eq!(Name::default(), Name::EMPTY);
}

#[test]
fn test_name_hash() {
    use std::collections::HashSet;
    let mut set = HashSet::new();
    set.insert(Name::from_raw(1));
    set.insert(Name::from_raw(1)); // duplicate
    set.insert(Name::from_raw(2));
    assert_eq!(set.len(), 2);
}

#[test]
fn test_canonicalize_replaces_hyphens() {
    assert_eq!(canonicalize("main-color"), "main_color");
    assert_eq!(canonicalize("a-b-c"), "a_b_c");
}

#[test]
fn test_canonicalize_borrows_canonical_names() {
    assert!(matches!(canonicalize("main_color"), Cow::Borrowed("main_color")));
    assert!(matches!(canonicalize("x"), Cow::Borrowed("x")));
}
