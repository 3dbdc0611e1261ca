/// Advisory exception kinds raised by the engine via `on_exception`.
///
/// These never halt or unwind the engine; a host may log them, count them, or
/// escalate to a halt of its own choosing. See `on_exception` in the engine
/// crate for the call site of each variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExceptionKind {
    /// `SP` wrapped from `0xFF` to `0x00` on a `PUSH` (checked after the write).
    StackOverflow,
    /// `SP` was `0x00` at the start of a `POP` (checked before the decrement).
    StackUnderflow,
    /// `MOV A, ACC` issued via direct addressing (direct operand `0xE0`), a
    /// canonical assembler mistake since `MOV A, A` has no direct-addressing form.
    AccToA,
    /// Opcode `0xA5` was fetched; the unused slot shares the `NOP` handler but
    /// is distinguishable from the real `NOP` (`0x00`) by the fetched byte.
    IllegalOpcode,
    /// `RETI` found `ACC` different from the snapshot taken at interrupt entry.
    RetiAccMismatch,
    /// `RETI` found `SP` different from the snapshot taken at interrupt entry.
    RetiSpMismatch,
    /// `RETI` found `PSW`'s low five bits (`OV`, `RS0`, `RS1`, `AC`, `C`)
    /// different from the snapshot taken at interrupt entry.
    RetiPswMismatch,
}
