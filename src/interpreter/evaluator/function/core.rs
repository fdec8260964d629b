use std::collections::HashSet;

use tracing::trace;

use crate::{
    ast::{Expr, FunctionDef},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::{
            core::Value,
            environment::{Binding, Callable, Environment},
        },
    },
};

impl Context<'_> {
    /// Evaluates a function call `name[a=expr,...]`.
    ///
    /// Arguments are evaluated in the caller's environment, in source order,
    /// before the callable runs.
    ///
    /// # Parameters
    /// - `name`: Function name.
    /// - `arguments`: Named argument expressions.
    /// - `env`: The caller's environment.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// The function's return value, or `None` when it has no `send back`.
    ///
    /// # Errors
    /// - `RuntimeError::UnknownName` when nothing is bound to `name`.
    /// - `RuntimeError::NotCallable` when `name` is bound to a plain value.
    /// - Anything raised while evaluating the arguments or running the
    ///   function.
    pub(crate) fn eval_call(&mut self,
                            name: &str,
                            arguments: &[(String, Expr)],
                            env: &mut Environment,
                            line: usize)
                            -> EvalResult<Option<Value>> {
        let callable = match env.get(name) {
            Some(Binding::Callable(callable)) => callable.clone(),
            Some(Binding::Value(_)) => {
                return Err(RuntimeError::NotCallable { name: name.to_string(),
                                                       line });
            },
            None => {
                return Err(RuntimeError::UnknownName { name: name.to_string(),
                                                       line });
            },
        };

        let mut values = Vec::with_capacity(arguments.len());
        for (argument, expr) in arguments {
            values.push((argument.clone(), self.eval_value(expr, env, line)?));
        }

        self.invoke(&callable, name, values, env, line)
    }

    /// Runs a callable with already evaluated arguments.
    pub(crate) fn invoke(&mut self,
                         callable: &Callable,
                         name: &str,
                         arguments: Vec<(String, Value)>,
                         env: &Environment,
                         line: usize)
                         -> EvalResult<Option<Value>> {
        trace!(function = name, arguments = arguments.len(), "call");

        match callable {
            Callable::Builtin(builtin) => builtin.call(self, &arguments, line).map(Some),
            Callable::User(def) => self.call_user_function(def, arguments, env, line),
        }
    }

    /// Runs a user function in a restricted environment.
    ///
    /// The function sees every callable of the caller plus its own
    /// arguments, and nothing it assigns is visible to the caller afterwards.
    fn call_user_function(&mut self,
                          def: &FunctionDef,
                          arguments: Vec<(String, Value)>,
                          env: &Environment,
                          line: usize)
                          -> EvalResult<Option<Value>> {
        let mut local = env.callables();
        let mut bound = HashSet::new();

        for (argument, value) in arguments {
            if !def.params.contains(&argument) {
                return Err(RuntimeError::UnexpectedArgument { function: def.name.clone(),
                                                              argument,
                                                              line });
            }
            bound.insert(argument.clone());
            local.define(argument, value);
        }

        if let Some(missing) = def.params.iter().find(|param| !bound.contains(*param)) {
            return Err(RuntimeError::MissingArgument { function: def.name.clone(),
                                                       argument: missing.clone(),
                                                       line });
        }

        self.eval_block(&def.body, &mut local)?;
        self.eval(&def.returns, &mut local, def.line)
    }
}
