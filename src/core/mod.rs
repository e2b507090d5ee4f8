//! Core calculator state.
//!
//! The pieces a calculator session owns: the expression buffer, the memory
//! register, the result history and the angle mode. These are plain state
//! holders with no evaluation logic.

pub mod angle;
pub mod buffer;
pub mod history;
pub mod memory;

pub use angle::AngleMode;
pub use buffer::{ExpressionBuffer, Token};
pub use history::{DEFAULT_DISPLAY_COUNT, HistoryEntry, HistoryLog};
pub use memory::{MemoryEvent, MemoryOp, MemoryRegister};
