use std::{collections::HashMap, rc::Rc};

use crate::{
    ast::FunctionDef,
    interpreter::{
        evaluator::function::builtin::{BUILTIN_TABLE, Builtin},
        value::core::Value,
    },
};

/// Something that can be called: a user function or a builtin.
#[derive(Debug, Clone)]
pub enum Callable {
    /// A `new function` definition.
    User(Rc<FunctionDef>),
    /// A builtin from the static table.
    Builtin(&'static Builtin),
}

/// What a name is bound to.
#[derive(Debug, Clone)]
pub enum Binding {
    /// A plain value.
    Value(Value),
    /// A function.
    Callable(Callable),
}

/// Maps names to bindings.
///
/// One environment is created per module evaluation and mutated in place by
/// assignments, loops and function definitions. Each function call runs in a
/// fresh environment built from [`Environment::callables`] plus the call's
/// arguments, so functions see other functions but never outer variables.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    bindings: HashMap<String, Binding>,
}

impl Environment {
    /// Creates an empty environment with no builtins.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an environment seeded with every builtin function.
    ///
    /// # Example
    /// ```
    /// use ram::interpreter::value::environment::{Binding, Environment};
    ///
    /// let env = Environment::with_builtins();
    /// assert!(matches!(env.get("CONVERT_NUMBER"), Some(Binding::Callable(_))));
    /// assert!(env.get("x").is_none());
    /// ```
    #[must_use]
    pub fn with_builtins() -> Self {
        let bindings = BUILTIN_TABLE.iter()
                                    .map(|builtin| {
                                        (builtin.name.to_string(),
                                         Binding::Callable(Callable::Builtin(builtin)))
                                    })
                                    .collect();
        Self { bindings }
    }

    /// Looks up a binding.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.bindings.get(name)
    }

    /// Looks up a name bound to a plain value.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&Value> {
        match self.bindings.get(name) {
            Some(Binding::Value(value)) => Some(value),
            _ => None,
        }
    }

    /// Binds (or rebinds) a name to a value.
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), Binding::Value(value));
    }

    /// Binds a user function under its own name.
    pub fn define_function(&mut self, def: Rc<FunctionDef>) {
        self.bindings.insert(def.name.clone(), Binding::Callable(Callable::User(def)));
    }

    /// Whether the name is bound to anything.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// A copy holding only the callable bindings.
    #[must_use]
    pub fn callables(&self) -> Self {
        let bindings = self.bindings
                           .iter()
                           .filter(|(_, binding)| matches!(binding, Binding::Callable(_)))
                           .map(|(name, binding)| (name.clone(), binding.clone()))
                           .collect();
        Self { bindings }
    }
}
