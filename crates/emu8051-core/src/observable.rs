use std::collections::HashMap;
use std::fmt;

/// A typed snapshot of a piece of emulator state, for debugging and education.
///
/// Queries never affect emulation state.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    U8(u8),
    U16(u16),
    U32(u32),
    String(String),
    Array(Vec<Value>),
    Map(HashMap<String, Value>),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::U8(v) => write!(f, "{v:#04x}"),
            Value::U16(v) => write!(f, "{v:#06x}"),
            Value::U32(v) => write!(f, "{v:#010x}"),
            Value::String(s) => write!(f, "{s}"),
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Map(map) => {
                write!(f, "{{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<u8> for Value {
    fn from(v: u8) -> Self {
        Value::U8(v)
    }
}

impl From<u16> for Value {
    fn from(v: u16) -> Self {
        Value::U16(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::U32(v)
    }
}

/// Exposes a component's internal state for inspection without mutating it.
pub trait Observable {
    /// Resolve a dotted path (e.g. `"psw.carry"`, `"regs.r0"`) to a value.
    fn query(&self, path: &str) -> Option<Value>;

    /// The set of paths this component understands.
    fn query_paths(&self) -> &'static [&'static str];
}
