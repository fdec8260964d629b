use tracing::trace;

use crate::{
    ast::{Expr, Statement},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::{core::Value, environment::Environment},
    },
    util::num::f64_to_i64_truncated,
};

impl Context<'_> {
    /// Evaluates `loop with <var> from <start> to <stop>`.
    ///
    /// Both bounds are evaluated once and truncated toward zero. The loop
    /// variable is bound to each `Integer` of `start..=stop` in the current
    /// environment, so it stays visible after the loop; when `start > stop`
    /// the body never runs and the variable is left untouched.
    ///
    /// # Errors
    /// `RuntimeError::InvalidLoopBounds` when a bound is not a finite number,
    /// plus anything the body raises.
    pub(crate) fn eval_loop(&mut self,
                            var: &str,
                            start: &Expr,
                            stop: &Expr,
                            body: &[Statement],
                            env: &mut Environment,
                            line: usize)
                            -> EvalResult<()> {
        let start = self.eval_bound(start, env, line)?;
        let stop = self.eval_bound(stop, env, line)?;
        trace!(var, start, stop, "loop");

        for i in start..=stop {
            env.define(var, Value::Integer(i));
            self.eval_block(body, env)?;
        }

        Ok(())
    }

    fn eval_bound(&mut self, bound: &Expr, env: &mut Environment, line: usize) -> EvalResult<i64> {
        let value = self.eval_value(bound, env, line)?;
        let number = value.as_number().ok_or_else(|| {
                                           RuntimeError::InvalidLoopBounds {
                                               details: format!("{} is not a number",
                                                                value.describe()),
                                               line,
                                           }
                                       })?;

        f64_to_i64_truncated(number, line)
    }
}
