use super::*;

/// Nested blocks shaped like `a { a { a { ... } } }`.
enum Nested {
    Leaf,
    Block(Box<Nested>),
}

fn build(depth: usize) -> Nested {
    let mut node = Nested::Leaf;
    for _ in 0..depth {
        node = Nested::Block(Box::new(node));
    }
    node
}

fn depth_of(node: &Nested) -> usize {
    ensure_sufficient_stack(|| match node {
        Nested::Leaf => 0,
        Nested::Block(inner) => depth_of(inner) + 1,
    })
}

fn release(node: Nested) {
    // Iterative drop; the default recursive drop would overflow.
    let mut current = node;
    while let Nested::Block(inner) = current {
        current = *inner;
    }
}

#[test]
fn test_shallow_nesting() {
    let tree = build(10);
    assert_eq!(depth_of(&tree), 10);
    release(tree);
}

#[test]
fn test_deep_nesting() {
    // Would overflow a typical 8MB stack without growth
    let tree = build(200_000);
    assert_eq!(depth_of(&tree), 200_000);
    release(tree);
}

#[test]
fn test_returns_closure_result() {
    let result: Result<i32, &str> = ensure_sufficient_stack(|| Ok(123));
    assert_eq!(result, Ok(123));
}
