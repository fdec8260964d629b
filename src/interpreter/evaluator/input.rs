use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        parser::{core::parse_expression, grouping::lexify, structure::SourceLine},
        value::{core::Value, environment::Environment},
    },
};

impl Context<'_> {
    /// Evaluates `GET_INPUT`.
    ///
    /// One line is read from the input stream and parsed as a Ram
    /// expression, which is then evaluated in the current environment. The
    /// user can therefore type `3 * x` as well as `12`.
    ///
    /// # Errors
    /// `RuntimeError::InvalidInput` at end of input, when the line does not
    /// parse, or when it parses to nothing.
    pub(crate) fn eval_input(&mut self, env: &mut Environment, line: usize) -> EvalResult<Value> {
        let text = self.read_line(line)?;
        let source = SourceLine::new(text.trim(), line);

        let expr = lexify(&source.text, &source).and_then(|tokens| parse_expression(&tokens, &source))
                                                .map_err(|error| RuntimeError::InvalidInput {
                                                    details: error.to_string(),
                                                    line,
                                                })?;

        self.eval(&expr, env, line)?.ok_or_else(|| RuntimeError::InvalidInput {
                                                 details: "nothing was entered".to_string(),
                                                 line,
                                             })
    }
}
