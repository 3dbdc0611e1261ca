use emu8051_core::ExceptionKind;

/// Host-provided side effects for SFR ports and external memory.
///
/// Every method is an optional override: the default implementations (on
/// [`NullHooks`]) mean "no host hook installed here", matching the reference
/// behavior of falling through to raw storage. A host that only cares about
/// a couple of peripherals implements just those methods.
///
/// Hooks are assumed synchronous and non-reentrant: a hook must not call back
/// into the engine's `step`.
pub trait Hooks {
    /// Called when direct-reading SFR index `index` (address `0x80 + index`).
    /// Returning `None` falls through to the raw SFR byte.
    fn sfr_read(&mut self, index: u8, addr: u8) -> Option<u8> {
        let _ = (index, addr);
        None
    }

    /// Called after direct-writing SFR index `index`; the new value is
    /// already in place in the SFR page when this fires.
    fn sfr_write(&mut self, index: u8, addr: u8, value: u8) {
        let _ = (index, addr, value);
    }

    /// Overrides an XDATA read. Returning `None` falls through to the
    /// configured external RAM (or the sentinel, if none is configured).
    fn xread(&mut self, addr: u16) -> Option<u8> {
        let _ = addr;
        None
    }

    /// Overrides an XDATA write. Returning `false` falls through to the
    /// configured external RAM.
    fn xwrite(&mut self, addr: u16, value: u8) -> bool {
        let _ = (addr, value);
        false
    }

    /// Advisory notification of an exception. The engine always continues;
    /// this is a logging hook, not a control-flow one.
    fn on_exception(&mut self, kind: ExceptionKind) {
        let _ = kind;
    }
}

/// A [`Hooks`] implementation that installs nothing: every access falls
/// through to raw storage, and exceptions are silently observed.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullHooks;

impl Hooks for NullHooks {}

#[cfg(test)]
mod tests {
    use super::*;

    struct RecordingHooks {
        exceptions: Vec<ExceptionKind>,
    }

    impl Hooks for RecordingHooks {
        fn on_exception(&mut self, kind: ExceptionKind) {
            self.exceptions.push(kind);
        }
    }

    #[test]
    fn null_hooks_falls_through_everywhere() {
        let mut hooks = NullHooks;
        assert_eq!(hooks.sfr_read(0, 0x80), None);
        assert_eq!(hooks.xread(0x1234), None);
        assert!(!hooks.xwrite(0x1234, 0x42));
        hooks.on_exception(ExceptionKind::IllegalOpcode);
    }

    #[test]
    fn a_host_hook_observes_exceptions() {
        let mut hooks = RecordingHooks { exceptions: Vec::new() };
        hooks.on_exception(ExceptionKind::StackOverflow);
        assert_eq!(hooks.exceptions, vec![ExceptionKind::StackOverflow]);
    }
}
