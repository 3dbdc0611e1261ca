use crate::hooks::Hooks;
use crate::state::Cpu;

/// Instruction length in bytes (opcode plus 0, 1, or 2 operand bytes),
/// indexed by opcode. Derived from the canonical 8051 opcode map; every
/// slot in a `0x_8..=0x_F` (`Rn`) or `0x_6..=0x_7` (`@Ri`) group shares the
/// length of its family.
#[rustfmt::skip]
pub(crate) const OPLEN: [u8; 256] = [
    1, 2, 3, 1, 1, 2, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    3, 2, 3, 1, 1, 2, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    3, 2, 1, 1, 2, 2, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    3, 2, 1, 1, 2, 2, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    2, 2, 2, 3, 2, 2, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    2, 2, 2, 3, 2, 2, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    2, 2, 2, 3, 2, 2, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    2, 2, 2, 1, 2, 3, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2,
    2, 2, 2, 1, 1, 3, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2,
    3, 2, 2, 1, 2, 2, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    2, 2, 2, 1, 1, 1, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2,
    2, 2, 2, 1, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3,
    2, 2, 2, 1, 1, 2, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    2, 2, 2, 1, 1, 3, 1, 1, 2, 2, 2, 2, 2, 2, 2, 2,
    1, 2, 1, 1, 1, 2, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    1, 2, 1, 1, 1, 2, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
];

/// Decode and execute one opcode, given its (already-fetched) operand bytes
/// and the pre-fetch PC. Mirrors the reference `do_op` switch; the low 3
/// bits of the opcode select `@Ri` (bit 0, slots 6/7) or `Rn` (bits 0-2,
/// slots 8-F) within a family rather than being decoded here, matching
/// each handler's own `read_Rx_address`/`read_Rx_indir` logic.
impl<H: Hooks> Cpu<H> {
    pub(crate) fn dispatch(&mut self, opcode: u8, op1: u8, op2: u8, pc: u16) -> u8 {
        match opcode {
            0x00 => self.op_nop(opcode, pc),
            0x01 | 0x21 | 0x41 | 0x61 | 0x81 | 0xA1 | 0xC1 | 0xE1 => self.op_ajmp(opcode, op1, pc),
            0x02 => self.op_ljmp(op1, op2),
            0x03 => self.op_rr_a(pc),
            0x04 => self.op_inc_a(pc),
            0x05 => self.op_inc_direct(op1, pc),
            0x06 | 0x07 => self.op_inc_indirect(opcode & 1, pc),
            0x08..=0x0F => self.op_inc_rn(opcode & 7, pc),

            0x10 => self.op_jbc(op1, op2, pc),
            0x11 | 0x31 | 0x51 | 0x71 | 0x91 | 0xB1 | 0xD1 | 0xF1 => self.op_acall(opcode, op1, pc),
            0x12 => self.op_lcall(op1, op2),
            0x13 => self.op_rrc_a(pc),
            0x14 => self.op_dec_a(pc),
            0x15 => self.op_dec_direct(op1, pc),
            0x16 | 0x17 => self.op_dec_indirect(opcode & 1, pc),
            0x18..=0x1F => self.op_dec_rn(opcode & 7, pc),

            0x20 => self.op_jb(op1, op2, pc),
            0x22 => self.op_ret(),
            0x23 => self.op_rl_a(pc),
            0x24 => self.op_add_a_imm(op1, pc),
            0x25 => self.op_add_a_direct(op1, pc),
            0x26 | 0x27 => self.op_add_a_indirect(opcode & 1, pc),
            0x28..=0x2F => self.op_add_a_rn(opcode & 7, pc),

            0x30 => self.op_jnb(op1, op2, pc),
            0x32 => self.op_reti(),
            0x33 => self.op_rlc_a(pc),
            0x34 => self.op_addc_a_imm(op1, pc),
            0x35 => self.op_addc_a_direct(op1, pc),
            0x36 | 0x37 => self.op_addc_a_indirect(opcode & 1, pc),
            0x38..=0x3F => self.op_addc_a_rn(opcode & 7, pc),

            0x40 => self.op_jc(op1, pc),
            0x42 => self.op_orl_direct_a(op1, pc),
            0x43 => self.op_orl_direct_imm(op1, op2, pc),
            0x44 => self.op_orl_a_imm(op1, pc),
            0x45 => self.op_orl_a_direct(op1, pc),
            0x46 | 0x47 => self.op_orl_a_indirect(opcode & 1, pc),
            0x48..=0x4F => self.op_orl_a_rn(opcode & 7, pc),

            0x50 => self.op_jnc(op1, pc),
            0x52 => self.op_anl_direct_a(op1, pc),
            0x53 => self.op_anl_direct_imm(op1, op2, pc),
            0x54 => self.op_anl_a_imm(op1, pc),
            0x55 => self.op_anl_a_direct(op1, pc),
            0x56 | 0x57 => self.op_anl_a_indirect(opcode & 1, pc),
            0x58..=0x5F => self.op_anl_a_rn(opcode & 7, pc),

            0x60 => self.op_jz(op1, pc),
            0x62 => self.op_xrl_direct_a(op1, pc),
            0x63 => self.op_xrl_direct_imm(op1, op2, pc),
            0x64 => self.op_xrl_a_imm(op1, pc),
            0x65 => self.op_xrl_a_direct(op1, pc),
            0x66 | 0x67 => self.op_xrl_a_indirect(opcode & 1, pc),
            0x68..=0x6F => self.op_xrl_a_rn(opcode & 7, pc),

            0x70 => self.op_jnz(op1, pc),
            0x72 => self.op_orl_c_bit(op1, pc),
            0x73 => self.op_jmp_indir_a_dptr(),
            0x74 => self.op_mov_a_imm(op1, pc),
            0x75 => self.op_mov_direct_imm(op1, op2, pc),
            0x76 | 0x77 => self.op_mov_indirect_imm(opcode & 1, op1, pc),
            0x78..=0x7F => self.op_mov_rn_imm(opcode & 7, op1, pc),

            0x80 => self.op_sjmp(op1, pc),
            0x82 => self.op_anl_c_bit(op1, pc),
            0x83 => self.op_movc_a_indir_a_pc(pc),
            0x84 => self.op_div_ab(pc),
            0x85 => self.op_mov_direct_direct(op1, op2, pc),
            0x86 | 0x87 => self.op_mov_direct_indirect(opcode & 1, op1, pc),
            0x88..=0x8F => self.op_mov_direct_rn(opcode & 7, op1, pc),

            0x90 => self.op_mov_dptr_imm(op1, op2, pc),
            0x92 => self.op_mov_bit_c(op1, pc),
            0x93 => self.op_movc_a_indir_a_dptr(pc),
            0x94 => self.op_subb_a_imm(op1, pc),
            0x95 => self.op_subb_a_direct(op1, pc),
            0x96 | 0x97 => self.op_subb_a_indirect(opcode & 1, pc),
            0x98..=0x9F => self.op_subb_a_rn(opcode & 7, pc),

            0xA0 => self.op_orl_c_not_bit(op1, pc),
            0xA2 => self.op_mov_c_bit(op1, pc),
            0xA3 => self.op_inc_dptr(pc),
            0xA4 => self.op_mul_ab(pc),
            0xA5 => self.op_nop(opcode, pc),
            0xA6 | 0xA7 => self.op_mov_indirect_direct(opcode & 1, op1, pc),
            0xA8..=0xAF => self.op_mov_rn_direct(opcode & 7, op1, pc),

            0xB0 => self.op_anl_c_not_bit(op1, pc),
            0xB2 => self.op_cpl_bit(op1, pc),
            0xB3 => self.op_cpl_c(pc),
            0xB4 => self.op_cjne_a_imm(op1, op2, pc),
            0xB5 => self.op_cjne_a_direct(op1, op2, pc),
            0xB6 | 0xB7 => self.op_cjne_indirect_imm(opcode & 1, op1, op2, pc),
            0xB8..=0xBF => self.op_cjne_rn_imm(opcode & 7, op1, op2, pc),

            0xC0 => self.op_push_direct(op1, pc),
            0xC2 => self.op_clr_bit(op1, pc),
            0xC3 => self.op_clr_c(pc),
            0xC4 => self.op_swap_a(pc),
            0xC5 => self.op_xch_a_direct(op1, pc),
            0xC6 | 0xC7 => self.op_xch_a_indirect(opcode & 1, pc),
            0xC8..=0xCF => self.op_xch_a_rn(opcode & 7, pc),

            0xD0 => self.op_pop_direct(op1, pc),
            0xD2 => self.op_setb_bit(op1, pc),
            0xD3 => self.op_setb_c(pc),
            0xD4 => self.op_da_a(pc),
            0xD5 => self.op_djnz_direct(op1, op2, pc),
            0xD6 | 0xD7 => self.op_xchd_a_indirect(opcode & 1, pc),
            0xD8..=0xDF => self.op_djnz_rn(opcode & 7, op1, pc),

            0xE0 => self.op_movx_a_indir_dptr(pc),
            0xE2 | 0xE3 => self.op_movx_a_indir_rx(opcode & 1, pc),
            0xE4 => self.op_clr_a(pc),
            0xE5 => self.op_mov_a_direct(op1, pc),
            0xE6 | 0xE7 => self.op_mov_a_indirect(opcode & 1, pc),
            0xE8..=0xEF => self.op_mov_a_rn(opcode & 7, pc),

            0xF0 => self.op_movx_indir_dptr_a(pc),
            0xF2 | 0xF3 => self.op_movx_indir_rx_a(opcode & 1, pc),
            0xF4 => self.op_cpl_a(pc),
            0xF5 => self.op_mov_direct_a(op1, pc),
            0xF6 | 0xF7 => self.op_mov_indirect_a(opcode & 1, pc),
            0xF8..=0xFF => self.op_mov_rn_a(opcode & 7, pc),

            // Every remaining value is a duplicate ACALL/AJMP slot already
            // matched above; unreachable in practice but kept exhaustive.
            _ => self.op_nop(opcode, pc),
        }
    }
}
