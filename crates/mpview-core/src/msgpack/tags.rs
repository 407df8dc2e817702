use super::error::DecodeError;
use super::layout;

/// Width of a length prefix for the bin/ext/str/array/map families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LenWidth {
    U8,
    U16,
    U32,
}

impl LenWidth {
    /// Width name as it appears in node labels ("bin 8", "str 16", ...).
    pub fn name(self) -> &'static str {
        match self {
            LenWidth::U8 => "8",
            LenWidth::U16 => "16",
            LenWidth::U32 => "32",
        }
    }
}

/// Width of a fixed-size integer payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntWidth {
    W8,
    W16,
    W32,
    W64,
}

impl IntWidth {
    pub fn name(self) -> &'static str {
        match self {
            IntWidth::W8 => "8",
            IntWidth::W16 => "16",
            IntWidth::W32 => "32",
            IntWidth::W64 => "64",
        }
    }
}

/// Semantic category of a leading tag byte.
///
/// Values embedded directly in the tag (fixint values, fixmap/fixarray
/// counts, fixstr lengths) are carried in the variant; everything else is
/// read from the payload by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagClass {
    PositiveFixInt(u8),
    FixMap(u8),
    FixArray(u8),
    FixStr(u8),
    Nil,
    NeverUsed,
    Bool(bool),
    Bin(LenWidth),
    Ext(LenWidth),
    Float32,
    Float64,
    Uint(IntWidth),
    Int(IntWidth),
    /// Fixed-size extension; the value is the data length (1, 2, 4, 8, 16).
    FixExt(u8),
    Str(LenWidth),
    Array(LenWidth),
    Map(LenWidth),
    NegativeFixInt(i8),
}

/// Classify a leading tag byte.
///
/// The dispatch covers all 256 byte values; the wildcard arm of the inner
/// match is a defensive assertion, never reachable from input.
pub fn classify(tag: u8, offset: usize) -> Result<TagClass, DecodeError> {
    if tag <= layout::POSITIVE_FIXINT_MAX {
        return Ok(TagClass::PositiveFixInt(tag));
    }
    if tag <= layout::FIXMAP_MAX {
        return Ok(TagClass::FixMap(tag & layout::FIXMAP_COUNT_MASK));
    }
    if tag <= layout::FIXARRAY_MAX {
        return Ok(TagClass::FixArray(tag & layout::FIXARRAY_COUNT_MASK));
    }
    if tag <= layout::FIXSTR_MAX {
        return Ok(TagClass::FixStr(tag & layout::FIXSTR_LEN_MASK));
    }
    if tag >= layout::NEGATIVE_FIXINT_MIN {
        return Ok(TagClass::NegativeFixInt(tag as i8));
    }

    match tag {
        layout::NIL => Ok(TagClass::Nil),
        layout::NEVER_USED => Ok(TagClass::NeverUsed),
        layout::FALSE => Ok(TagClass::Bool(false)),
        layout::TRUE => Ok(TagClass::Bool(true)),
        layout::BIN8 => Ok(TagClass::Bin(LenWidth::U8)),
        layout::BIN16 => Ok(TagClass::Bin(LenWidth::U16)),
        layout::BIN32 => Ok(TagClass::Bin(LenWidth::U32)),
        layout::EXT8 => Ok(TagClass::Ext(LenWidth::U8)),
        layout::EXT16 => Ok(TagClass::Ext(LenWidth::U16)),
        layout::EXT32 => Ok(TagClass::Ext(LenWidth::U32)),
        layout::FLOAT32 => Ok(TagClass::Float32),
        layout::FLOAT64 => Ok(TagClass::Float64),
        layout::UINT8 => Ok(TagClass::Uint(IntWidth::W8)),
        layout::UINT16 => Ok(TagClass::Uint(IntWidth::W16)),
        layout::UINT32 => Ok(TagClass::Uint(IntWidth::W32)),
        layout::UINT64 => Ok(TagClass::Uint(IntWidth::W64)),
        layout::INT8 => Ok(TagClass::Int(IntWidth::W8)),
        layout::INT16 => Ok(TagClass::Int(IntWidth::W16)),
        layout::INT32 => Ok(TagClass::Int(IntWidth::W32)),
        layout::INT64 => Ok(TagClass::Int(IntWidth::W64)),
        layout::FIXEXT1 => Ok(TagClass::FixExt(1)),
        layout::FIXEXT2 => Ok(TagClass::FixExt(2)),
        layout::FIXEXT4 => Ok(TagClass::FixExt(4)),
        layout::FIXEXT8 => Ok(TagClass::FixExt(8)),
        layout::FIXEXT16 => Ok(TagClass::FixExt(16)),
        layout::STR8 => Ok(TagClass::Str(LenWidth::U8)),
        layout::STR16 => Ok(TagClass::Str(LenWidth::U16)),
        layout::STR32 => Ok(TagClass::Str(LenWidth::U32)),
        layout::ARRAY16 => Ok(TagClass::Array(LenWidth::U16)),
        layout::ARRAY32 => Ok(TagClass::Array(LenWidth::U32)),
        layout::MAP16 => Ok(TagClass::Map(LenWidth::U16)),
        layout::MAP32 => Ok(TagClass::Map(LenWidth::U32)),
        _ => Err(DecodeError::UnreachableTag { tag, offset }),
    }
}
