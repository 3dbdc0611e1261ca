use emu8051_core::{Operand, StdFrame};

#[derive(Debug, Clone, Copy)]
struct RegValue {
    value: u16,
    bits: u8,
}

/// Collects every register and memory access performed while executing one
/// instruction, then hands off a finished [`StdFrame`] to the caller.
///
/// Reads are keyed by symbolic name with first-read-wins semantics (a
/// read-modify-write instruction's pre-list shows the value before any of
/// its own writes touched it); writes are keyed the same way but with
/// last-write-wins semantics. Memory accesses are never deduplicated: every
/// read and write is appended in program order, matching the reference
/// implementation's access log.
#[derive(Debug, Default)]
pub(crate) struct Accumulator {
    op_bytes: Vec<u8>,
    pre_regs: Vec<(String, RegValue)>,
    post_regs: Vec<(String, RegValue)>,
    pre_mems: Vec<(u16, u8)>,
    post_mems: Vec<(u16, u8)>,
}

impl Accumulator {
    pub(crate) fn set_trace_op(&mut self, bytes: &[u8]) {
        self.op_bytes = bytes.to_vec();
    }

    pub(crate) fn register_read(&mut self, name: &str, value: u16, bits: u8) {
        if self.pre_regs.iter().any(|(n, _)| n == name) {
            return;
        }
        self.pre_regs.push((name.to_string(), RegValue { value, bits }));
    }

    pub(crate) fn register_write(&mut self, name: &str, value: u16, bits: u8) {
        if let Some(entry) = self.post_regs.iter_mut().find(|(n, _)| n == name) {
            entry.1 = RegValue { value, bits };
        } else {
            self.post_regs.push((name.to_string(), RegValue { value, bits }));
        }
    }

    pub(crate) fn mem_read(&mut self, address: u16, value: u8) {
        self.pre_mems.push((address, value));
    }

    pub(crate) fn mem_write(&mut self, address: u16, value: u8) {
        self.post_mems.push((address, value));
    }

    /// Finalize the accumulated accesses into a frame and reset for the next
    /// instruction. `pre_pc` is the program counter at fetch time.
    pub(crate) fn take_frame(&mut self, pre_pc: u16) -> StdFrame {
        let mut pre_list = Vec::with_capacity(self.pre_regs.len() + self.pre_mems.len());
        for (name, v) in &self.pre_regs {
            pre_list.push(Operand::register(name.clone(), v.value, v.bits, true, false));
        }
        for &(addr, val) in &self.pre_mems {
            pre_list.push(Operand::memory(addr, val, true, false));
        }

        let mut post_list = Vec::with_capacity(self.post_regs.len() + self.post_mems.len());
        for (name, v) in &self.post_regs {
            let unchanged = self
                .pre_regs
                .iter()
                .any(|(n, pre)| n == name && pre.value == v.value && pre.bits == v.bits);
            if unchanged {
                continue;
            }
            post_list.push(Operand::register(name.clone(), v.value, v.bits, false, true));
        }
        for &(addr, val) in &self.post_mems {
            post_list.push(Operand::memory(addr, val, false, true));
        }

        let frame = StdFrame {
            address: u64::from(pre_pc),
            thread_id: 0,
            rawbytes: self.op_bytes.clone(),
            operand_pre_list: pre_list,
            operand_post_list: post_list,
        };

        self.pre_regs.clear();
        self.post_regs.clear();
        self.pre_mems.clear();
        self.post_mems.clear();
        self.op_bytes.clear();

        frame
    }
}
