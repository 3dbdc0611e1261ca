use std::io;

/// Errors from the two genuinely fallible boundaries of the engine: opening a
/// trace writer, and constructing a CPU with an inconsistent memory layout.
///
/// Everything that happens inside a single `step()` is infallible by
/// construction; illegal opcodes, stack wraps, and RETI mismatches are
/// advisory exceptions routed through [`crate::ExceptionKind`], not `Result`.
#[derive(Debug, thiserror::Error)]
pub enum EmuError {
    #[error("trace writer open failed: {0}")]
    TraceWriterOpen(#[source] io::Error),

    #[error("trace writer already open")]
    TraceWriterAlreadyOpen,

    #[error("memory size {size:#x} for {what} is not a power of two")]
    NonPowerOfTwoSize { what: &'static str, size: usize },
}
