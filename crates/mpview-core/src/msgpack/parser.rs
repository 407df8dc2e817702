use super::error::DecodeError;
use super::reader::ByteCursor;
use super::tags::{IntWidth, LenWidth, TagClass, classify};

/// Shape of one decoded item, as the tree builder will insert it.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemShape {
    /// Single node with no children.
    Leaf,
    /// Container expecting `expected` immediate children from later tags.
    Container { expected: usize },
    /// String header owning exactly one synthetic text child. The child
    /// shares the header's offset; this grouping is presentational, not a
    /// semantic nesting level.
    Text { text: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedItem {
    pub label: String,
    pub offset: usize,
    pub shape: ItemShape,
}

/// Read one MessagePack item at the cursor position.
///
/// Consumes the tag byte and its full payload. Length-prefixed payloads for
/// bin/ext/fixext are skipped, not rendered; their length and type are
/// folded into the label. On truncation nothing is inserted and the pass
/// aborts, so the cursor state after an error is irrelevant.
pub fn read_item(cursor: &mut ByteCursor<'_>) -> Result<ParsedItem, DecodeError> {
    let offset = cursor.offset();
    let tag = cursor.read_u8()?;

    let (label, shape) = match classify(tag, offset)? {
        TagClass::PositiveFixInt(value) => {
            (format!("positive fixint: {value}"), ItemShape::Leaf)
        }
        TagClass::FixMap(count) => fix_container("fixmap", count as usize, count as usize * 2),
        TagClass::FixArray(count) => fix_container("fixarray", count as usize, count as usize),
        TagClass::FixStr(len) => {
            let len = len as usize;
            if len == 0 {
                ("fixstr: empty".to_string(), ItemShape::Leaf)
            } else {
                let text = read_text(cursor, len)?;
                (format!("fixstr: length {len}"), ItemShape::Text { text })
            }
        }
        TagClass::Nil => ("nil".to_string(), ItemShape::Leaf),
        TagClass::NeverUsed => ("(never used)".to_string(), ItemShape::Leaf),
        TagClass::Bool(value) => (value.to_string(), ItemShape::Leaf),
        TagClass::Bin(width) => {
            let len = read_len(cursor, width)?;
            cursor.advance(len)?;
            (format!("bin {}: length {len}", width.name()), ItemShape::Leaf)
        }
        TagClass::Ext(width) => {
            let len = read_len(cursor, width)?;
            let ext_type = cursor.read_i8()?;
            cursor.advance(len)?;
            (
                format!("ext {}: type {ext_type} length {len}", width.name()),
                ItemShape::Leaf,
            )
        }
        TagClass::Float32 => (format!("float32: {}", cursor.read_f32()?), ItemShape::Leaf),
        TagClass::Float64 => (format!("float64: {}", cursor.read_f64()?), ItemShape::Leaf),
        TagClass::Uint(width) => {
            let value = match width {
                IntWidth::W8 => u64::from(cursor.read_u8()?),
                IntWidth::W16 => u64::from(cursor.read_u16()?),
                IntWidth::W32 => u64::from(cursor.read_u32()?),
                IntWidth::W64 => cursor.read_u64()?,
            };
            (format!("uint{}: {value}", width.name()), ItemShape::Leaf)
        }
        TagClass::Int(width) => {
            let value = match width {
                IntWidth::W8 => i64::from(cursor.read_i8()?),
                IntWidth::W16 => i64::from(cursor.read_i16()?),
                IntWidth::W32 => i64::from(cursor.read_i32()?),
                IntWidth::W64 => cursor.read_i64()?,
            };
            (format!("int{}: {value}", width.name()), ItemShape::Leaf)
        }
        TagClass::FixExt(data_len) => {
            let ext_type = cursor.read_i8()?;
            cursor.advance(data_len as usize)?;
            (format!("fixext {data_len}: type {ext_type}"), ItemShape::Leaf)
        }
        TagClass::Str(width) => {
            let len = read_len(cursor, width)?;
            let text = read_text(cursor, len)?;
            (
                format!("str {}: length {len}", width.name()),
                ItemShape::Text { text },
            )
        }
        TagClass::Array(width) => {
            let count = read_len(cursor, width)?;
            (
                format!("array {}: count {count}", width.name()),
                ItemShape::Container { expected: count },
            )
        }
        TagClass::Map(width) => {
            let count = read_len(cursor, width)?;
            (
                format!("map {}: count {count}", width.name()),
                ItemShape::Container {
                    expected: count.saturating_mul(2),
                },
            )
        }
        TagClass::NegativeFixInt(value) => {
            (format!("negative fixint: {value}"), ItemShape::Leaf)
        }
    };

    Ok(ParsedItem {
        label,
        offset,
        shape,
    })
}

// Empty fixmap/fixarray collapse to a leaf; the count lives in the tag byte
// so there is no payload either way.
fn fix_container(family: &str, count: usize, expected: usize) -> (String, ItemShape) {
    if expected == 0 {
        (format!("{family}: empty"), ItemShape::Leaf)
    } else {
        (
            format!("{family}: count {count}"),
            ItemShape::Container { expected },
        )
    }
}

fn read_len(cursor: &mut ByteCursor<'_>, width: LenWidth) -> Result<usize, DecodeError> {
    Ok(match width {
        LenWidth::U8 => cursor.read_u8()? as usize,
        LenWidth::U16 => cursor.read_u16()? as usize,
        LenWidth::U32 => cursor.read_u32()? as usize,
    })
}

fn read_text(cursor: &mut ByteCursor<'_>, len: usize) -> Result<String, DecodeError> {
    let bytes = cursor.read_bytes(len)?;
    Ok(String::from_utf8_lossy(bytes).into_owned())
}
