use crate::{
    ast::{ArithmeticOperator, BooleanOperator, Expr},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::{core::Value, environment::Environment},
    },
};

impl Context<'_> {
    /// Evaluates an arithmetic operation.
    ///
    /// Both operands must be numeric; the result is always a `Real`.
    ///
    /// # Errors
    /// - `RuntimeError::OperatorEvaluate` when either side is not a number.
    /// - `RuntimeError::DivisionByZero` for `/` with a zero divisor.
    pub(crate) fn eval_binary(&mut self,
                              left: &Expr,
                              op: ArithmeticOperator,
                              right: &Expr,
                              env: &mut Environment,
                              line: usize)
                              -> EvalResult<Value> {
        let left = self.eval_value(left, env, line)?;
        let right = self.eval_value(right, env, line)?;

        let (Some(a), Some(b)) = (left.as_number(), right.as_number()) else {
            return Err(RuntimeError::OperatorEvaluate { left: left.describe(),
                                                        op: op.symbol().to_string(),
                                                        right: right.describe(),
                                                        line });
        };

        apply_arithmetic(op, a, b, line).map(Value::Real)
    }

    /// Evaluates an `and`/`or` chain.
    ///
    /// Every operand is evaluated, left to right, with no short circuit, and
    /// each one must be a boolean.
    pub(crate) fn eval_boolean(&mut self,
                               op: BooleanOperator,
                               operands: &[Expr],
                               env: &mut Environment,
                               line: usize)
                               -> EvalResult<Value> {
        let values = operands.iter()
                             .map(|operand| self.eval_value(operand, env, line)?.as_bool(line))
                             .collect::<EvalResult<Vec<bool>>>()?;

        let result = match op {
            BooleanOperator::And => values.iter().all(|&v| v),
            BooleanOperator::Or => values.iter().any(|&v| v),
        };

        Ok(Value::Bool(result))
    }
}

/// Applies an arithmetic operator to two floats.
///
/// # Example
/// ```
/// use ram::{
///     ast::ArithmeticOperator,
///     error::RuntimeError,
///     interpreter::evaluator::binary::apply_arithmetic,
/// };
///
/// assert_eq!(apply_arithmetic(ArithmeticOperator::Divide, 7.0, 2.0, 1).unwrap(), 3.5);
/// assert!(matches!(apply_arithmetic(ArithmeticOperator::Divide, 1.0, 0.0, 4),
///                  Err(RuntimeError::DivisionByZero { line: 4 })));
/// ```
pub fn apply_arithmetic(op: ArithmeticOperator, a: f64, b: f64, line: usize) -> EvalResult<f64> {
    match op {
        ArithmeticOperator::Add => Ok(a + b),
        ArithmeticOperator::Subtract => Ok(a - b),
        ArithmeticOperator::Multiply => Ok(a * b),
        ArithmeticOperator::Divide if b == 0.0 => Err(RuntimeError::DivisionByZero { line }),
        ArithmeticOperator::Divide => Ok(a / b),
    }
}
