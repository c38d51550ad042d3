//! The two form-driven modes of the calculator, next to free expressions:
//! one operator applied to two numbers, and one named function applied to
//! a number.

use crate::ast::Operator;
use crate::error::{EvalError, Result};
use crate::functions::{lookup, Entry};
use log::debug;

/// Applies `operator` exactly as the expression evaluator would.
pub fn basic_operation(lhs: f64, rhs: f64, operator: Operator) -> Result<f64> {
    debug!("basic operation {} {} {}", lhs, operator, rhs);
    operator.apply(lhs, rhs)
}

/// Applies a named unary function to `value`.
///
/// Accepts every function of the registry plus `factorial`, which is only
/// offered here and cannot be used inside an expression.
pub fn scientific_operation(value: f64, name: &str) -> Result<f64> {
    debug!("scientific operation {}({})", name, value);
    if name == "factorial" {
        return factorial(value);
    }

    match lookup(name) {
        Some(Entry::Function(function)) => function.call(name, value),
        _ => Err(EvalError::UnknownIdentifier(name.to_string())),
    }
}

/// `n!` for a non-negative integral `n`; fails once the product overflows.
pub fn factorial(value: f64) -> Result<f64> {
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 {
        return Err(EvalError::domain("factorial", value));
    }

    let mut result = 1.0_f64;
    let mut factor = 2.0_f64;
    while factor <= value {
        result *= factor;
        if !result.is_finite() {
            return Err(EvalError::domain("factorial", value));
        }
        factor += 1.0;
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_operations() {
        assert_eq!(basic_operation(6.0, 4.0, Operator::Add).unwrap(), 10.0);
        assert_eq!(basic_operation(2.0, 10.0, Operator::Power).unwrap(), 1024.0);
        assert_eq!(basic_operation(-7.0, 2.0, Operator::FloorDivide).unwrap(), -4.0);
        assert_eq!(
            basic_operation(1.0, 0.0, Operator::Modulo),
            Err(EvalError::DivisionByZero(Operator::Modulo))
        );
    }

    #[test]
    fn test_basic_operation_from_form_symbol() {
        let operator = Operator::try_from("//").unwrap();
        assert_eq!(basic_operation(9.0, 2.0, operator).unwrap(), 4.0);
    }

    #[test]
    fn test_scientific_operations() {
        assert_eq!(scientific_operation(81.0, "sqrt").unwrap(), 9.0);
        assert_eq!(scientific_operation(-3.5, "abs").unwrap(), 3.5);
        assert_eq!(
            scientific_operation(-1.0, "sqrt"),
            Err(EvalError::domain("sqrt", -1.0))
        );
        assert_eq!(
            scientific_operation(1.0, "pi"),
            Err(EvalError::UnknownIdentifier("pi".to_string()))
        );
        assert_eq!(
            scientific_operation(1.0, "cbrt"),
            Err(EvalError::UnknownIdentifier("cbrt".to_string()))
        );
    }

    #[test]
    fn test_factorial() {
        assert_eq!(scientific_operation(0.0, "factorial").unwrap(), 1.0);
        assert_eq!(scientific_operation(5.0, "factorial").unwrap(), 120.0);
        assert_eq!(factorial(20.0).unwrap(), 2_432_902_008_176_640_000.0);
        assert!(factorial(170.0).is_ok());
    }

    #[test]
    fn test_factorial_domain() {
        assert_eq!(factorial(-1.0), Err(EvalError::domain("factorial", -1.0)));
        assert_eq!(factorial(2.5), Err(EvalError::domain("factorial", 2.5)));
        assert_eq!(factorial(171.0), Err(EvalError::domain("factorial", 171.0)));
        assert!(factorial(f64::INFINITY).is_err());
    }

    #[test]
    fn test_factorial_not_in_expressions() {
        assert_eq!(
            crate::evaluate("factorial(5)"),
            Err(EvalError::UnknownIdentifier("factorial".to_string()))
        );
    }
}
