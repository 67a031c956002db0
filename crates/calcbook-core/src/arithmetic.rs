//! Validated evaluation of binary operations.

use calcbook_domain::Operation;

use crate::CoreError;

/// Evaluates `operation(a, b)`, enforcing the division rule and rejecting
/// non-finite operands or results.
pub fn compute(operation: Operation, a: f64, b: f64) -> Result<f64, CoreError> {
    ensure_finite("operand_a", a)?;
    ensure_finite("operand_b", b)?;
    if operation == Operation::Divide && b == 0.0 {
        return Err(CoreError::DivisionByZero);
    }
    let result = operation.apply(a, b);
    if !result.is_finite() {
        return Err(CoreError::InvalidOperand(format!(
            "{} {} {} overflows the representable range",
            a,
            operation.symbol(),
            b
        )));
    }
    Ok(result)
}

fn ensure_finite(name: &str, value: f64) -> Result<(), CoreError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CoreError::InvalidOperand(format!(
            "{name} must be a finite number, got {value}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computes_each_operation() {
        assert_eq!(compute(Operation::Add, 2.5, 4.0).unwrap(), 6.5);
        assert_eq!(compute(Operation::Subtract, 2.0, 5.0).unwrap(), -3.0);
        assert_eq!(compute(Operation::Multiply, 6.0, 7.0).unwrap(), 42.0);
        assert_eq!(compute(Operation::Divide, 1.0, 4.0).unwrap(), 0.25);
    }

    #[test]
    fn division_by_any_zero_fails() {
        for x in [0.0, 1.0, -3.5, f64::MAX] {
            assert!(matches!(
                compute(Operation::Divide, x, 0.0),
                Err(CoreError::DivisionByZero)
            ));
            assert!(matches!(
                compute(Operation::Divide, x, -0.0),
                Err(CoreError::DivisionByZero)
            ));
        }
    }

    #[test]
    fn zero_divisor_is_fine_for_other_operations() {
        assert_eq!(compute(Operation::Multiply, 9.0, 0.0).unwrap(), 0.0);
        assert_eq!(compute(Operation::Add, 9.0, 0.0).unwrap(), 9.0);
    }

    #[test]
    fn rejects_non_finite_operands_and_overflow() {
        assert!(matches!(
            compute(Operation::Add, f64::NAN, 1.0),
            Err(CoreError::InvalidOperand(_))
        ));
        assert!(matches!(
            compute(Operation::Add, 1.0, f64::INFINITY),
            Err(CoreError::InvalidOperand(_))
        ));
        assert!(matches!(
            compute(Operation::Multiply, f64::MAX, 10.0),
            Err(CoreError::InvalidOperand(_))
        ));
    }
}
