use crate::{
    ast::{Branch, Statement},
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::environment::Environment,
    },
};

impl Context<'_> {
    /// Runs the first branch whose condition is `true`, or the else body
    /// when none is.
    ///
    /// Conditions are evaluated in order and only until one holds.
    pub(crate) fn eval_conditional(&mut self,
                                   branches: &[Branch],
                                   orelse: &[Statement],
                                   env: &mut Environment,
                                   line: usize)
                                   -> EvalResult<()> {
        for branch in branches {
            if self.eval_value(&branch.condition, env, line)?.as_bool(line)? {
                return self.eval_block(&branch.body, env);
            }
        }

        self.eval_block(orelse, env)
    }
}
