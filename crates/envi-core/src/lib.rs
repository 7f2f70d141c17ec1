use std::fmt;

use zerocopy::AsBytes;

pub mod writer;

pub use writer::{write_fixture, FixtureError, FixtureReport, FixtureWriter};

/// Where the fixture lands when no other path is given, relative to the
/// working directory.
pub const DEFAULT_FIXTURE_PATH: &str = "binary.data";

/// The ENVI data types understood by the fixture format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Byte,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Float32,
    Float64,
}

impl DataType {
    /// Registry order, not tag order.
    pub const ALL: [DataType; 7] = [
        DataType::Byte,
        DataType::Int16,
        DataType::UInt16,
        DataType::Int32,
        DataType::UInt32,
        DataType::Float32,
        DataType::Float64,
    ];

    /// The ENVI numeric code, written as the record's tag byte.
    pub fn code(self) -> u8 {
        match self {
            DataType::Byte => 1,
            DataType::Int16 => 2,
            DataType::Int32 => 3,
            DataType::Float32 => 4,
            DataType::Float64 => 5,
            DataType::UInt16 => 12,
            DataType::UInt32 => 13,
        }
    }

    /// Payload width in bytes.
    pub fn size(self) -> usize {
        match self {
            DataType::Byte => 1,
            DataType::Int16 | DataType::UInt16 => 2,
            DataType::Int32 | DataType::UInt32 | DataType::Float32 => 4,
            DataType::Float64 => 8,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DataType::Byte => "Byte",
            DataType::Int16 => "Int16",
            DataType::UInt16 => "UInt16",
            DataType::Int32 => "Int32",
            DataType::UInt32 => "UInt32",
            DataType::Float32 => "Float32",
            DataType::Float64 => "Float64",
        }
    }

    /// Returns `None` for codes this format does not carry.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Layout of multi-byte values on the host that produced a fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    LittleEndian,
    BigEndian,
}

impl ByteOrder {
    /// Probes the running host by looking at the first in-memory byte of
    /// the integer 1.
    pub fn native() -> Self {
        let probe: u64 = 1;
        if probe.as_bytes()[0] == 1 {
            ByteOrder::LittleEndian
        } else {
            ByteOrder::BigEndian
        }
    }

    /// The leading byte of the file: 0 little-endian, 1 big-endian.
    pub fn marker(self) -> u8 {
        match self {
            ByteOrder::LittleEndian => 0,
            ByteOrder::BigEndian => 1,
        }
    }
}

impl fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ByteOrder::LittleEndian => write!(f, "{} (little endian)", self.marker()),
            ByteOrder::BigEndian => write!(f, "{} (big endian)", self.marker()),
        }
    }
}

/// A single typed value as it is stored in a record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Byte(i8),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Float32(f32),
    Float64(f64),
}

impl Value {
    pub fn data_type(&self) -> DataType {
        match self {
            Value::Byte(_) => DataType::Byte,
            Value::Int16(_) => DataType::Int16,
            Value::UInt16(_) => DataType::UInt16,
            Value::Int32(_) => DataType::Int32,
            Value::UInt32(_) => DataType::UInt32,
            Value::Float32(_) => DataType::Float32,
            Value::Float64(_) => DataType::Float64,
        }
    }

    /// Raw in-memory bytes of the value, in host order.
    pub fn native_bytes(&self) -> &[u8] {
        match self {
            Value::Byte(v) => v.as_bytes(),
            Value::Int16(v) => v.as_bytes(),
            Value::UInt16(v) => v.as_bytes(),
            Value::Int32(v) => v.as_bytes(),
            Value::UInt32(v) => v.as_bytes(),
            Value::Float32(v) => v.as_bytes(),
            Value::Float64(v) => v.as_bytes(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Shown as the unsigned pattern that was stored.
            Value::Byte(v) => write!(f, "{}", *v as u8),
            Value::Int16(v) => write!(f, "{}", v),
            Value::UInt16(v) => write!(f, "{}", v),
            Value::Int32(v) => write!(f, "{}", v),
            Value::UInt32(v) => write!(f, "{}", v),
            Value::Float32(v) => write!(f, "{:.6}", v),
            Value::Float64(v) => write!(f, "{:.6}", v),
        }
    }
}

/// The records of the reader test fixture, in file order.
///
/// The byte record stores 210 narrowed into a signed byte, so the file
/// carries the bit pattern `0xD2` (-46 as `i8`).
pub const FIXTURE_RECORDS: [Value; 7] = [
    Value::Byte(210u8 as i8),
    Value::Int16(30021),
    Value::UInt16(60021),
    Value::Int32(2147483647),
    Value::UInt32(2147483648),
    Value::Float32(142857.0),
    Value::Float64(142857.142857),
];

/// Size in bytes of the complete fixture: marker plus every tagged record.
pub fn fixture_size() -> usize {
    1 + FIXTURE_RECORDS
        .iter()
        .map(|v| 1 + v.data_type().size())
        .sum::<usize>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_resolve_to_their_types() {
        for t in DataType::ALL {
            assert_eq!(DataType::from_code(t.code()), Some(t));
        }
        assert_eq!(DataType::from_code(0), None);
        assert_eq!(DataType::from_code(6), None);
        assert_eq!(DataType::from_code(14), None);
    }

    #[test]
    fn native_order_matches_target() {
        let order = ByteOrder::native();
        if cfg!(target_endian = "little") {
            assert_eq!(order, ByteOrder::LittleEndian);
            assert_eq!(order.marker(), 0);
        } else {
            assert_eq!(order, ByteOrder::BigEndian);
            assert_eq!(order.marker(), 1);
        }
        let known: u32 = 0x0102_0304;
        let expected = match order {
            ByteOrder::LittleEndian => [4, 3, 2, 1],
            ByteOrder::BigEndian => [1, 2, 3, 4],
        };
        assert_eq!(known.as_bytes(), &expected);
    }

    #[test]
    fn payload_width_follows_type() {
        for value in FIXTURE_RECORDS {
            assert_eq!(value.native_bytes().len(), value.data_type().size());
        }
    }

    #[test]
    fn byte_record_keeps_unsigned_pattern() {
        assert_eq!(FIXTURE_RECORDS[0], Value::Byte(-46));
        assert_eq!(FIXTURE_RECORDS[0].native_bytes(), &[0xD2]);
        assert_eq!(FIXTURE_RECORDS[0].to_string(), "210");
    }

    #[test]
    fn fixture_layout() {
        let tags: Vec<u8> = FIXTURE_RECORDS
            .iter()
            .map(|v| v.data_type().code())
            .collect();
        assert_eq!(tags, vec![1, 2, 12, 3, 13, 4, 5]);
        assert_eq!(fixture_size(), 33);
    }
}
