//! Shared types for the 8051 engine and anything that consumes its trace output.
//!
//! Nothing in this crate touches instruction semantics. It exists so the engine
//! crate and a trace-writer implementation can agree on wire types without either
//! depending on the other's internals.

mod error;
mod exception;
mod frame;
mod observable;
mod writer;

pub use error::EmuError;
pub use exception::ExceptionKind;
pub use frame::{
    Fstats, MetaFrame, Operand, OperandSpecific, OperandUsage, StdFrame, Target, Tracer,
};
pub use observable::{Observable, Value};
pub use writer::TraceWriter;
