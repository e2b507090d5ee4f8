//! Memory register.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::eval::Number;

/// Memory key operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemoryOp {
    /// Reset to zero (`MC`).
    Clear,
    /// Read the value (`MR`).
    Recall,
    /// Add the current value (`M+`).
    Add,
    /// Subtract the current value (`M-`).
    Subtract,
    /// Overwrite with the current value (`MS`).
    Store,
}

impl MemoryOp {
    /// Key label of the operation.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Clear => "MC",
            Self::Recall => "MR",
            Self::Add => "M+",
            Self::Subtract => "M-",
            Self::Store => "MS",
        }
    }

    /// Returns `true` if the operation needs the evaluated buffer.
    #[must_use]
    pub const fn takes_operand(self) -> bool {
        matches!(self, Self::Add | Self::Subtract | Self::Store)
    }
}

impl fmt::Display for MemoryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Confirmation emitted by every mutating memory operation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MemoryEvent {
    /// Operation that ran.
    pub op: MemoryOp,
    /// Register value afterwards.
    pub value: f64,
}

impl fmt::Display for MemoryEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Memory {}: {}", self.op, Number::from_f64(self.value))
    }
}

/// A single numeric memory cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryRegister {
    value: f64,
}

impl MemoryRegister {
    /// Creates a register holding zero.
    #[must_use]
    pub const fn new() -> Self {
        Self { value: 0.0 }
    }

    /// Returns the stored value without changing it.
    #[must_use]
    pub const fn recall(&self) -> f64 {
        self.value
    }

    /// Resets the register to zero.
    pub const fn clear(&mut self) -> MemoryEvent {
        self.value = 0.0;
        self.event(MemoryOp::Clear)
    }

    /// Adds `value` to the register.
    pub fn add(&mut self, value: f64) -> MemoryEvent {
        self.value += value;
        self.event(MemoryOp::Add)
    }

    /// Subtracts `value` from the register.
    pub fn subtract(&mut self, value: f64) -> MemoryEvent {
        self.value -= value;
        self.event(MemoryOp::Subtract)
    }

    /// Overwrites the register with `value`.
    pub const fn store(&mut self, value: f64) -> MemoryEvent {
        self.value = value;
        self.event(MemoryOp::Store)
    }

    /// Applies a mutating operation with its operand.
    ///
    /// Returns `None` for [`MemoryOp::Recall`], which mutates nothing.
    pub fn apply(&mut self, op: MemoryOp, operand: f64) -> Option<MemoryEvent> {
        match op {
            MemoryOp::Clear => Some(self.clear()),
            MemoryOp::Recall => None,
            MemoryOp::Add => Some(self.add(operand)),
            MemoryOp::Subtract => Some(self.subtract(operand)),
            MemoryOp::Store => Some(self.store(operand)),
        }
    }

    const fn event(&self, op: MemoryOp) -> MemoryEvent {
        MemoryEvent {
            op,
            value: self.value,
        }
    }
}
