use crate::{EmuError, MetaFrame, StdFrame};

/// A sink for trace frames, owned by the host and handed to the engine.
///
/// The concrete container format (file layout, compression, footer) is the
/// implementer's concern; the engine only ever calls these three methods, in
/// this order: `open` once, `add` per instruction, `finish` once at shutdown.
pub trait TraceWriter {
    /// Open the container and write its one-time metadata record.
    ///
    /// Returns an error if the container is already open or the underlying
    /// sink (typically a file) cannot be created.
    fn open(&mut self, meta: MetaFrame) -> Result<(), EmuError>;

    /// True if `open` has succeeded and `finish` has not yet been called.
    fn is_open(&self) -> bool;

    /// Append one frame. Called once per retired instruction while open.
    fn add(&mut self, frame: StdFrame);

    /// Flush and write the container footer. Idempotent if not open.
    fn finish(&mut self);
}
