//! Wire types for the trace container format consumed by an external writer.
//!
//! These mirror the frame record described in the external interfaces: a
//! `std_frame` per instruction, carrying ordered pre/post operand lists, plus
//! the one-time `meta_frame` written when a trace is opened. The concrete
//! container (file format, compression, footer) is the writer's problem; this
//! crate only defines the shapes that cross that boundary.

/// Identifies the tool that produced a trace.
#[derive(Debug, Clone)]
pub struct Tracer {
    pub name: String,
    pub version: String,
}

/// Identifies the traced binary. Left empty when no binary-on-disk exists
/// (e.g. a synthetic program assembled in memory for a test).
#[derive(Debug, Clone, Default)]
pub struct Target {
    pub path: String,
    pub md5sum: String,
}

/// Filesystem stats for the target binary, zeroed when not applicable.
#[derive(Debug, Clone, Default)]
pub struct Fstats {
    pub size: u64,
    pub atime: f64,
    pub mtime: f64,
    pub ctime: f64,
}

/// The one-time metadata record written when a trace container is opened.
#[derive(Debug, Clone)]
pub struct MetaFrame {
    pub tracer: Tracer,
    pub target: Target,
    pub fstats: Fstats,
    pub user: String,
    pub host: String,
    pub time: f64,
}

impl Default for MetaFrame {
    fn default() -> Self {
        MetaFrame {
            tracer: Tracer {
                name: "emu8051".to_string(),
                version: String::new(),
            },
            target: Target::default(),
            fstats: Fstats::default(),
            user: String::new(),
            host: String::new(),
            time: 0.0,
        }
    }
}

/// What an operand refers to: a symbolic register or a 16-bit memory cell.
///
/// Memory addresses here are *canonical trace addresses*: direct internal
/// accesses use the raw address, indirect upper-RAM accesses add `0x100`,
/// and XDATA accesses add `0x200`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperandSpecific {
    Reg { name: String },
    Mem { address: u16 },
}

/// Read/write flags for an operand. `index`/`base` are always `false` for
/// this architecture; they exist for wire compatibility with the container
/// format's richer instruction-set support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OperandUsage {
    pub read: bool,
    pub written: bool,
    pub index: bool,
    pub base: bool,
}

/// One operand record: a register or memory cell, its width, how it was
/// used, and its value at the point the record was taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operand {
    pub specific: OperandSpecific,
    pub bit_length: i32,
    pub usage: OperandUsage,
    pub value: Vec<u8>,
}

impl Operand {
    /// A named register operand. `value` is packed little-endian into
    /// `bits / 8` bytes (8 or 16 bits only, per the wire contract).
    #[must_use]
    pub fn register(name: impl Into<String>, value: u16, bits: u8, read: bool, written: bool) -> Self {
        let bytes = match bits {
            8 => vec![value as u8],
            16 => vec![(value & 0xFF) as u8, (value >> 8) as u8],
            other => panic!("unsupported register operand width: {other}"),
        };
        Operand {
            specific: OperandSpecific::Reg { name: name.into() },
            bit_length: i32::from(bits),
            usage: OperandUsage {
                read,
                written,
                ..OperandUsage::default()
            },
            value: bytes,
        }
    }

    /// A memory-cell operand at a canonical trace address.
    #[must_use]
    pub fn memory(address: u16, value: u8, read: bool, written: bool) -> Self {
        Operand {
            specific: OperandSpecific::Mem { address },
            bit_length: 8,
            usage: OperandUsage {
                read,
                written,
                ..OperandUsage::default()
            },
            value: vec![value],
        }
    }
}

/// One executed instruction: the pre-PC, its raw bytes, and the operand
/// lists the trace accumulator assembled while the instruction ran.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StdFrame {
    pub address: u64,
    pub thread_id: u64,
    pub rawbytes: Vec<u8>,
    pub operand_pre_list: Vec<Operand>,
    pub operand_post_list: Vec<Operand>,
}
