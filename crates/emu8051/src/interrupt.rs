use emu8051_core::ExceptionKind;

use crate::hooks::Hooks;
use crate::state::{Cpu, PSWMASK_AC, PSWMASK_C, PSWMASK_OV, PSWMASK_RS0, PSWMASK_RS1};

const PSW_CHECK_MASK: u8 = PSWMASK_OV | PSWMASK_RS1 | PSWMASK_RS0 | PSWMASK_AC | PSWMASK_C;

/// One saved ACC/SP/PSW snapshot taken on interrupt entry.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Snapshot {
    acc: u8,
    sp: u8,
    psw: u8,
}

/// Two-slot low/high priority interrupt shadow.
///
/// The reference core supports exactly one low-priority and one
/// high-priority interrupt nesting level; `active` tracks which slots are
/// currently occupied (bit 0 = low, bit 1 = high), mirroring
/// `mInterruptActive`.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct InterruptShadow {
    low: Snapshot,
    high: Snapshot,
    pub(crate) active: u8,
}

impl<H: Hooks> Cpu<H> {
    /// Externally trigger an interrupt: vector to the service routine at
    /// `vector`, snapshotting ACC/SP/PSW into the low or high shadow slot
    /// depending on `high_priority`. The host calls this in response to its
    /// own peripheral/timer logic; nothing inside `step` raises an interrupt
    /// on its own.
    ///
    /// Pushes nothing onto the stack: the reference core restores context via
    /// the shadow snapshot rather than the normal stack frame, so `RETI` pops
    /// only the return address.
    pub fn interrupt(&mut self, vector: u16, high_priority: bool) {
        let acc = self.sfr[(crate::state::SFR_ACC - 0x80) as usize];
        let sp = self.sfr[(crate::state::SFR_SP - 0x80) as usize];
        let psw = self.read_psw_raw();
        let snap = Snapshot { acc, sp, psw };
        if high_priority {
            self.shadow.high = snap;
            self.shadow.active |= 2;
        } else {
            self.shadow.low = snap;
            self.shadow.active |= 1;
        }
        let ret = self.pc;
        self.push_raw((ret & 0xFF) as u8);
        self.push_raw((ret >> 8) as u8);
        self.pc = vector;
    }

    /// `RETI`: pop the return address, compare the live ACC/SP/PSW against
    /// whichever shadow slot is active, raise one advisory exception per
    /// mismatching register (all three checks are independent — a single
    /// `RETI` can raise all three), then clear the active slot and restore
    /// the PC.
    ///
    /// If the high slot is active, clearing only drops the high bit (the low
    /// slot, if any, remains nested); otherwise every slot is cleared.
    pub(crate) fn reti(&mut self) {
        let high = self.shadow.active > 1;
        let snap = if high { self.shadow.high } else { self.shadow.low };

        let live_acc = self.sfr[(crate::state::SFR_ACC - 0x80) as usize];
        let live_sp = self.sfr[(crate::state::SFR_SP - 0x80) as usize];
        let live_psw = self.read_psw_raw();

        if live_acc != snap.acc {
            self.hooks.on_exception(ExceptionKind::RetiAccMismatch);
        }
        if live_sp != snap.sp {
            self.hooks.on_exception(ExceptionKind::RetiSpMismatch);
        }
        if (live_psw & PSW_CHECK_MASK) != (snap.psw & PSW_CHECK_MASK) {
            self.hooks.on_exception(ExceptionKind::RetiPswMismatch);
        }

        if self.shadow.active & 2 != 0 {
            self.shadow.active &= !2;
        } else {
            self.shadow.active = 0;
        }

        let hi = self.pop_raw();
        let lo = self.pop_raw();
        self.pc = (u16::from(hi) << 8) | u16::from(lo);
    }
}

#[cfg(test)]
mod tests {
    use crate::hooks::NullHooks;
    use crate::state::Cpu;

    fn cpu() -> Cpu<NullHooks> {
        Cpu::new(vec![0u8; 16], NullHooks).unwrap()
    }

    #[test]
    fn interrupt_then_reti_restores_the_interrupted_pc() {
        let mut cpu = cpu();
        cpu.poke(0x81, 0x20); // sp
        cpu.set_pc(0x1234);

        cpu.interrupt(0x0003, false);
        assert_eq!(cpu.pc(), 0x0003);
        assert_eq!(cpu.peek(0x81), 0x22); // two bytes pushed

        cpu.reti();
        assert_eq!(cpu.pc(), 0x1234);
        assert_eq!(cpu.peek(0x81), 0x20); // sp restored
        assert_eq!(cpu.shadow.active, 0);
    }

    #[test]
    fn nested_high_priority_interrupt_clears_only_the_high_slot_on_reti() {
        let mut cpu = cpu();
        cpu.poke(0x81, 0x20);
        cpu.set_pc(0x0100);

        cpu.interrupt(0x0003, false); // low-priority ISR entered
        cpu.interrupt(0x000B, true); // high-priority ISR nests inside it
        assert_eq!(cpu.shadow.active, 0b11);

        cpu.reti(); // returns from the high-priority ISR
        assert_eq!(cpu.pc(), 0x0003);
        assert_eq!(cpu.shadow.active, 0b01);

        cpu.reti(); // returns from the low-priority ISR
        assert_eq!(cpu.pc(), 0x0100);
        assert_eq!(cpu.shadow.active, 0);
    }
}
