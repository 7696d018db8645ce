//! Runtime environment: the live scope chain of a running program.
//!
//! Uses a scope stack (not cloning) for scope management. Each [`Scope`]
//! holds its variables, the compiler-allocated slots naming some of them,
//! function definitions and the selector of the rule being filled. A slot
//! is an alias for a variable of its scope, so name lookups see slot
//! writes and slot reads see name writes.
//! Lookups walk the parent chain; the stack only decides which scope is
//! current.

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use quill_ir::{FunctionDef, Name, Symbol, Value};

use crate::selector::SelectorList;

/// A single-threaded scope wrapper for reference-counted interior mutability.
///
/// All scope allocations go through [`LocalScope::new`]. Scopes are not
/// thread-safe; a program runs on one thread.
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    #[inline]
    pub fn borrow(&self) -> std::cell::Ref<'_, T> {
        self.0.borrow()
    }

    #[inline]
    pub fn borrow_mut(&self) -> std::cell::RefMut<'_, T> {
        self.0.borrow_mut()
    }

    /// Whether both handles point at the same scope.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for LocalScope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LocalScope").field(&self.0).finish()
    }
}

impl<T: Default> Default for LocalScope<T> {
    fn default() -> Self {
        LocalScope::new(T::default())
    }
}

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// A function found through the scope chain, with the scope that defines it.
#[derive(Clone, Debug)]
pub struct FunctionBinding {
    pub def: Rc<FunctionDef>,
    /// Calls run in a child of this scope.
    pub scope: LocalScope<Scope>,
}

/// A single scope.
#[derive(Clone, Debug, Default)]
pub struct Scope {
    vars: FxHashMap<Name, Value>,
    /// Compiler-allocated local slots and the variable each one holds.
    slots: FxHashMap<Symbol, Name>,
    functions: FxHashMap<Name, Rc<FunctionDef>>,
    /// Resolved selector of the rule this scope fills.
    selector: Option<SelectorList>,
    parent: Option<LocalScope<Scope>>,
}

impl Scope {
    pub fn new() -> Self {
        Scope::default()
    }

    pub fn with_parent(parent: LocalScope<Scope>) -> Self {
        Scope {
            parent: Some(parent),
            ..Scope::default()
        }
    }

    #[inline]
    pub fn define(&mut self, name: Name, value: Value) {
        self.vars.insert(name, value);
    }

    /// Look up a variable by name through the parent chain.
    pub fn lookup(&self, name: Name) -> Option<Value> {
        if let Some(value) = self.vars.get(&name) {
            return Some(value.clone());
        }
        self.parent.as_ref()?.borrow().lookup(name)
    }

    /// Read a slot through the parent chain.
    pub fn read_slot(&self, slot: Symbol) -> Option<Value> {
        if let Some(name) = self.slots.get(&slot) {
            return self.vars.get(name).cloned();
        }
        self.parent.as_ref()?.borrow().read_slot(slot)
    }

    /// Overwrite `slot` in the nearest scope that holds it.
    ///
    /// Returns the value back when no scope in the chain holds the slot.
    fn update_slot(&mut self, slot: Symbol, value: Value) -> Result<(), Value> {
        if let Some(&name) = self.slots.get(&slot) {
            self.vars.insert(name, value);
            return Ok(());
        }
        match &self.parent {
            Some(parent) => parent.borrow_mut().update_slot(slot, value),
            None => Err(value),
        }
    }

    fn lookup_function(&self, this: &LocalScope<Scope>, name: Name) -> Option<FunctionBinding> {
        if let Some(def) = self.functions.get(&name) {
            return Some(FunctionBinding {
                def: Rc::clone(def),
                scope: this.clone(),
            });
        }
        let parent = self.parent.as_ref()?;
        let found = parent.borrow().lookup_function(parent, name);
        found
    }

    /// Selector of the innermost rule being filled.
    pub fn selector(&self) -> Option<SelectorList> {
        if let Some(selector) = &self.selector {
            return Some(selector.clone());
        }
        self.parent.as_ref()?.borrow().selector()
    }
}

/// Environment for a running program.
pub struct Environment {
    /// Stack of scopes, with current scope at the top.
    scopes: Vec<LocalScope<Scope>>,
    /// Global scope (always at the bottom).
    global: LocalScope<Scope>,
}

impl Environment {
    pub fn new() -> Self {
        let global = LocalScope::new(Scope::new());
        Environment {
            scopes: vec![global.clone()],
            global,
        }
    }

    /// Current scope depth, the global scope included.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Push a child of the current scope.
    #[inline]
    pub fn push_scope(&mut self) {
        let parent = self.current_scope();
        self.push_scope_in(parent);
    }

    /// Push a child of `parent`, which need not be the current scope.
    ///
    /// Function calls run in a child of the defining scope.
    pub fn push_scope_in(&mut self, parent: LocalScope<Scope>) {
        self.scopes.push(LocalScope::new(Scope::with_parent(parent)));
    }

    /// Pop the current scope. The global scope is never popped.
    #[inline]
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    #[inline]
    pub fn current_scope(&self) -> LocalScope<Scope> {
        self.scopes.last().unwrap_or(&self.global).clone()
    }

    #[inline]
    fn current(&self) -> &LocalScope<Scope> {
        self.scopes.last().unwrap_or(&self.global)
    }

    /// Define a variable in the current scope.
    #[inline]
    pub fn define(&mut self, name: Name, value: Value) {
        self.current().borrow_mut().define(name, value);
    }

    /// Define a variable in the global scope.
    pub fn define_global(&mut self, name: Name, value: Value) {
        self.global.borrow_mut().define(name, value);
    }

    /// Look up a variable through the current scope chain.
    #[inline]
    pub fn lookup(&self, name: Name) -> Option<Value> {
        self.current().borrow().lookup(name)
    }

    /// Look up a variable in the global scope only.
    pub fn lookup_global(&self, name: Name) -> Option<Value> {
        self.global.borrow().vars.get(&name).cloned()
    }

    #[inline]
    pub fn read_slot(&self, slot: Symbol) -> Option<Value> {
        self.current().borrow().read_slot(slot)
    }

    /// Write a slot: the nearest scope already holding it is updated,
    /// otherwise the slot is created in the current scope as `name`.
    pub fn assign_slot(&mut self, slot: Symbol, name: Name, value: Value) {
        let current = self.current();
        let result = current.borrow_mut().update_slot(slot, value);
        if let Err(value) = result {
            let mut scope = current.borrow_mut();
            scope.slots.insert(slot, name);
            scope.vars.insert(name, value);
        }
    }

    /// Define a function in the current scope.
    pub fn define_function(&mut self, def: Rc<FunctionDef>) {
        self.current().borrow_mut().functions.insert(def.name, def);
    }

    /// Find a function through the current scope chain.
    pub fn lookup_function(&self, name: Name) -> Option<FunctionBinding> {
        let current = self.current();
        let found = current.borrow().lookup_function(current, name);
        found
    }

    /// Selector of the innermost rule being filled.
    #[inline]
    pub fn selector(&self) -> Option<SelectorList> {
        self.current().borrow().selector()
    }

    /// Set the selector of the current scope.
    pub fn set_selector(&mut self, selector: SelectorList) {
        self.current().borrow_mut().selector = Some(selector);
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
