//! Arithmetic operation kinds supported by calculation records.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Enumerates the binary operations a calculation can perform.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
    ];

    /// Canonical lowercase name, matching the serialized form.
    pub fn name(self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
            Operation::Divide => "divide",
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Operation::Add => '+',
            Operation::Subtract => '-',
            Operation::Multiply => '*',
            Operation::Divide => '/',
        }
    }

    /// Applies the operation without any validation.
    ///
    /// Division by zero follows IEEE-754 here; callers that need the
    /// division rule enforced must check the divisor first.
    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            Operation::Add => a + b,
            Operation::Subtract => a - b,
            Operation::Multiply => a * b,
            Operation::Divide => a / b,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when text does not name one of the supported operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOperation(pub String);

impl fmt::Display for UnknownOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unsupported operation `{}` (expected add, subtract, multiply or divide)",
            self.0
        )
    }
}

impl std::error::Error for UnknownOperation {}

impl FromStr for Operation {
    type Err = UnknownOperation;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "add" | "addition" | "+" => Ok(Operation::Add),
            "subtract" | "subtraction" | "sub" | "-" => Ok(Operation::Subtract),
            "multiply" | "multiplication" | "mul" | "*" | "x" => Ok(Operation::Multiply),
            "divide" | "division" | "div" | "/" => Ok(Operation::Divide),
            _ => Err(UnknownOperation(value.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_aliases_and_symbols() {
        assert_eq!("add".parse::<Operation>().unwrap(), Operation::Add);
        assert_eq!("Addition".parse::<Operation>().unwrap(), Operation::Add);
        assert_eq!(" sub ".parse::<Operation>().unwrap(), Operation::Subtract);
        assert_eq!("x".parse::<Operation>().unwrap(), Operation::Multiply);
        assert_eq!("/".parse::<Operation>().unwrap(), Operation::Divide);
        assert_eq!("DIVISION".parse::<Operation>().unwrap(), Operation::Divide);
    }

    #[test]
    fn rejects_unknown_names() {
        let err = "modulo".parse::<Operation>().unwrap_err();
        assert_eq!(err, UnknownOperation("modulo".into()));
        assert!(err.to_string().contains("modulo"));
        assert!("".parse::<Operation>().is_err());
        for word in ["plus", "minus", "times", "over"] {
            assert!(word.parse::<Operation>().is_err(), "{word}");
        }
    }

    #[test]
    fn serializes_as_lowercase_name() {
        let json = serde_json::to_string(&Operation::Multiply).unwrap();
        assert_eq!(json, "\"multiply\"");
        for op in Operation::ALL {
            assert_eq!(op.to_string(), op.name());
        }
    }
}
