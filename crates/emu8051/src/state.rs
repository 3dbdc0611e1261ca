use std::collections::HashMap;

use emu8051_core::{EmuError, Observable, TraceWriter, Value};

use crate::hooks::Hooks;
use crate::interrupt::InterruptShadow;
use crate::trace::Accumulator;

pub(crate) const SFR_SP: u8 = 0x81;
pub(crate) const SFR_PSW: u8 = 0xD0;
pub(crate) const SFR_ACC: u8 = 0xE0;
pub(crate) const SFR_B: u8 = 0xF0;
pub(crate) const SFR_DPL: u8 = 0x82;
pub(crate) const SFR_DPH: u8 = 0x83;

pub(crate) const PSW_C: u8 = 7;
pub(crate) const PSW_AC: u8 = 6;
pub(crate) const PSW_RS1: u8 = 4;
pub(crate) const PSW_RS0: u8 = 3;
pub(crate) const PSW_OV: u8 = 2;

pub(crate) const PSWMASK_C: u8 = 1 << PSW_C;
pub(crate) const PSWMASK_AC: u8 = 1 << PSW_AC;
pub(crate) const PSWMASK_RS1: u8 = 1 << PSW_RS1;
pub(crate) const PSWMASK_RS0: u8 = 1 << PSW_RS0;
pub(crate) const PSWMASK_OV: u8 = 1 << PSW_OV;

/// Sentinel returned for reads that fall through to unconfigured storage.
pub const BAD_VALUE: u8 = 0x77;

/// Full programmer-visible state of one 8051 core, parameterized over the
/// host hooks that observe SFR-port and XDATA side effects.
///
/// `Rn` registers are never stored separately: they are always a view over
/// `lower[0..32]` at an offset derived from `PSW` at access time, so a `MOV
/// PSW, ...` that changes the active bank is observed by the very next `Rn`
/// access.
pub struct Cpu<H: Hooks> {
    pub(crate) pc: u16,
    pub(crate) code: Vec<u8>,
    pub(crate) code_mask: u16,
    pub(crate) sfr: [u8; 128],
    pub(crate) lower: [u8; 128],
    pub(crate) upper: Option<[u8; 128]>,
    pub(crate) xdata: Option<Vec<u8>>,
    pub(crate) xdata_mask: u16,
    pub(crate) shadow: InterruptShadow,
    pub(crate) trace: Accumulator,
    pub(crate) writer: Option<Box<dyn TraceWriter>>,
    pub hooks: H,
}

impl<H: Hooks> Cpu<H> {
    /// Build a core over the given code ROM. `code` is padded and masked up
    /// to the next power of two (a zero-length ROM is rejected).
    pub fn new(code: Vec<u8>, hooks: H) -> Result<Self, EmuError> {
        Self::with_memory(code, false, None, hooks)
    }

    /// Build a core with an optional upper-128B indirect RAM and/or XDATA.
    ///
    /// `xdata_size`, if given, is rounded to the next power of two; it must
    /// not exceed 64 KiB.
    pub fn with_memory(
        code: Vec<u8>,
        upper_ram: bool,
        xdata_size: Option<usize>,
        hooks: H,
    ) -> Result<Self, EmuError> {
        if code.is_empty() {
            return Err(EmuError::NonPowerOfTwoSize {
                what: "code",
                size: 0,
            });
        }
        let code_cap = code.len().next_power_of_two();
        if code_cap > (u16::MAX as usize) + 1 {
            return Err(EmuError::NonPowerOfTwoSize {
                what: "code",
                size: code.len(),
            });
        }
        let mut padded_code = code;
        padded_code.resize(code_cap, 0);
        let code_mask = (code_cap - 1) as u16;

        let (xdata, xdata_mask) = match xdata_size {
            None => (None, 0u16),
            Some(0) => (None, 0u16),
            Some(size) => {
                let cap = size.next_power_of_two();
                if cap > 0x1_0000 {
                    return Err(EmuError::NonPowerOfTwoSize {
                        what: "xdata",
                        size,
                    });
                }
                let mask = if cap == 0x1_0000 {
                    0xFFFF
                } else {
                    (cap - 1) as u16
                };
                (Some(vec![0u8; cap]), mask)
            }
        };

        Ok(Cpu {
            pc: 0,
            code: padded_code,
            code_mask,
            sfr: [0u8; 128],
            lower: [0u8; 128],
            upper: if upper_ram { Some([0u8; 128]) } else { None },
            xdata,
            xdata_mask,
            shadow: InterruptShadow::default(),
            trace: Accumulator::default(),
            writer: None,
            hooks,
        })
    }

    /// Raw code ROM fetch; not traced (the reference `CODEMEM` macro is a
    /// plain array index, never routed through the accumulator).
    pub(crate) fn fetch_code(&self, addr: u16) -> u8 {
        self.code[(addr & self.code_mask) as usize]
    }

    /// Active register-bank base (`0`, `8`, `16`, or `24`) inside `lower`.
    pub(crate) fn active_bank_base(&self) -> u8 {
        ((self.read_psw_raw() >> PSW_RS0) & 0b11) << 3
    }

    pub(crate) fn read_psw_raw(&self) -> u8 {
        self.sfr[(SFR_PSW - 0x80) as usize]
    }

    pub(crate) fn write_psw_raw(&mut self, value: u8) {
        self.sfr[(SFR_PSW - 0x80) as usize] = value;
    }

    /// Read a named SFR directly from storage, tracing it as a register
    /// operand (not a memory operand) and bypassing any read-hook, matching
    /// the reference `read_SFR`/named-macro path used by opcode handlers
    /// that refer to a register implicitly (e.g. `ADD A`) rather than
    /// through a `direct` address operand.
    pub(crate) fn read_named_sfr(&mut self, addr: u8, name: &str) -> u8 {
        let value = self.sfr[(addr - 0x80) as usize];
        self.trace.register_read(name, u16::from(value), 8);
        value
    }

    pub(crate) fn write_named_sfr(&mut self, addr: u8, name: &str, value: u8) {
        self.trace.register_write(name, u16::from(value), 8);
        self.sfr[(addr - 0x80) as usize] = value;
    }

    pub(crate) fn acc(&mut self) -> u8 {
        self.read_named_sfr(SFR_ACC, "acc")
    }

    pub(crate) fn set_acc(&mut self, value: u8) {
        self.write_named_sfr(SFR_ACC, "acc", value);
    }

    pub(crate) fn psw(&mut self) -> u8 {
        self.read_named_sfr(SFR_PSW, "psw")
    }

    pub(crate) fn set_psw(&mut self, value: u8) {
        self.write_named_sfr(SFR_PSW, "psw", value);
    }

    pub(crate) fn b_reg(&mut self) -> u8 {
        self.read_named_sfr(SFR_B, "b")
    }

    pub(crate) fn set_b_reg(&mut self, value: u8) {
        self.write_named_sfr(SFR_B, "b", value);
    }

    pub(crate) fn sp_reg(&mut self) -> u8 {
        self.read_named_sfr(SFR_SP, "sp")
    }

    pub(crate) fn set_sp_reg(&mut self, value: u8) {
        self.write_named_sfr(SFR_SP, "sp", value);
    }

    pub(crate) fn dph(&mut self) -> u8 {
        self.read_named_sfr(SFR_DPH, "dph")
    }

    pub(crate) fn set_dph(&mut self, value: u8) {
        self.write_named_sfr(SFR_DPH, "dph", value);
    }

    pub(crate) fn dpl(&mut self) -> u8 {
        self.read_named_sfr(SFR_DPL, "dpl")
    }

    pub(crate) fn set_dpl(&mut self, value: u8) {
        self.write_named_sfr(SFR_DPL, "dpl", value);
    }

    pub(crate) fn dptr(&mut self) -> u16 {
        (u16::from(self.dph()) << 8) | u16::from(self.dpl())
    }

    pub(crate) fn set_dptr(&mut self, value: u16) {
        self.set_dph((value >> 8) as u8);
        self.set_dpl((value & 0xFF) as u8);
    }

    /// Read the program counter, tracing it as the `"pc"` register operand.
    pub(crate) fn read_pc_traced(&mut self) -> u16 {
        let value = self.pc;
        self.trace.register_read("pc", value, 16);
        value
    }

    /// Write the program counter, tracing it as the `"pc"` register operand.
    pub(crate) fn write_pc_traced(&mut self, value: u16) {
        self.trace.register_write("pc", value, 16);
        self.pc = value;
    }

    /// Current program counter, untraced (for host inspection between steps).
    #[must_use]
    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Force the program counter. Intended for test setup and interrupt
    /// vectoring; bypasses tracing since no instruction is in flight.
    #[cfg(feature = "test-utils")]
    pub fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }

    /// Directly read a lower-RAM or SFR byte without tracing or hooks.
    /// Intended for test fixture setup.
    #[cfg(feature = "test-utils")]
    pub fn poke(&mut self, addr: u8, value: u8) {
        if addr > 0x7F {
            self.sfr[(addr - 0x80) as usize] = value;
        } else {
            self.lower[addr as usize] = value;
        }
    }

    /// Directly read a lower-RAM or SFR byte without tracing or hooks.
    #[cfg(feature = "test-utils")]
    #[must_use]
    pub fn peek(&self, addr: u8) -> u8 {
        if addr > 0x7F {
            self.sfr[(addr - 0x80) as usize]
        } else {
            self.lower[addr as usize]
        }
    }
}

impl<H: Hooks> Observable for Cpu<H> {
    fn query(&self, path: &str) -> Option<Value> {
        match path {
            "pc" => Some(Value::U16(self.pc)),
            "acc" => Some(Value::U8(self.sfr[(SFR_ACC - 0x80) as usize])),
            "b" => Some(Value::U8(self.sfr[(SFR_B - 0x80) as usize])),
            "sp" => Some(Value::U8(self.sfr[(SFR_SP - 0x80) as usize])),
            "psw" => Some(Value::U8(self.read_psw_raw())),
            "dptr" => {
                let dph = self.sfr[(SFR_DPH - 0x80) as usize];
                let dpl = self.sfr[(SFR_DPL - 0x80) as usize];
                Some(Value::U16((u16::from(dph) << 8) | u16::from(dpl)))
            }
            "bank" => Some(Value::U8(self.active_bank_base() >> 3)),
            "regs" => {
                let base = self.active_bank_base() as usize;
                let mut map = HashMap::new();
                for (i, name) in ["r0", "r1", "r2", "r3", "r4", "r5", "r6", "r7"]
                    .iter()
                    .enumerate()
                {
                    map.insert((*name).to_string(), Value::U8(self.lower[base + i]));
                }
                Some(Value::Map(map))
            }
            _ => None,
        }
    }

    fn query_paths(&self) -> &'static [&'static str] {
        &["pc", "acc", "b", "sp", "psw", "dptr", "bank", "regs"]
    }
}
