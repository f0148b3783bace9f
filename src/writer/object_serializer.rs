//! PDF object serialization.
//!
//! Serializes objects of the document graph to their byte representation
//! according to ISO 32000-1:2008, section 7.3.

use crate::object::{Dictionary, Object, ObjectRef};
use std::io::{self, Write};

/// Serializer for PDF objects.
///
/// Dictionary keys are written in sorted order so that the same graph always produces
/// the same bytes.
#[derive(Debug, Clone, Default)]
pub struct ObjectSerializer {
    /// Whether to use compact formatting (minimal whitespace)
    compact: bool,
}

impl ObjectSerializer {
    /// Create a new object serializer with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a compact serializer (minimal whitespace).
    pub fn compact() -> Self {
        Self { compact: true }
    }

    /// Serialize an object to bytes.
    pub fn serialize(&self, obj: &Object) -> Vec<u8> {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.write_object(&mut buf, obj);
        buf
    }

    /// Serialize an object to a string (for debugging).
    pub fn serialize_to_string(&self, obj: &Object) -> String {
        String::from_utf8_lossy(&self.serialize(obj)).into_owned()
    }

    /// Write an indirect object definition.
    ///
    /// Format: `{id} {gen} obj\n{object}\nendobj\n`
    pub fn write_indirect<W: Write>(
        &self,
        w: &mut W,
        reference: ObjectRef,
        obj: &Object,
    ) -> io::Result<()> {
        writeln!(w, "{} {} obj", reference.id, reference.gen)?;
        self.write_object(w, obj)?;
        write!(w, "\nendobj\n")
    }

    /// Write an object.
    pub fn write_object<W: Write>(&self, w: &mut W, obj: &Object) -> io::Result<()> {
        match obj {
            Object::Null => write!(w, "null"),
            Object::Boolean(b) => write!(w, "{}", if *b { "true" } else { "false" }),
            Object::Integer(i) => write!(w, "{}", i),
            Object::Real(r) => self.write_real(w, *r),
            Object::String(s) => self.write_string(w, s),
            Object::Name(n) => self.write_name(w, n),
            Object::Array(arr) => self.write_array(w, arr),
            Object::Dictionary(dict) => self.write_dictionary(w, dict),
            Object::Stream { dict, data } => self.write_stream(w, dict, data),
            Object::Reference(r) => write!(w, "{}", r),
        }
    }

    fn write_real<W: Write>(&self, w: &mut W, value: f64) -> io::Result<()> {
        if value.fract() == 0.0 {
            write!(w, "{}", value as i64)
        } else {
            let formatted = format!("{:.5}", value);
            let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
            write!(w, "{}", trimmed)
        }
    }

    /// Literal `(...)` syntax for printable ASCII, hex `<...>` otherwise.
    fn write_string<W: Write>(&self, w: &mut W, data: &[u8]) -> io::Result<()> {
        let is_printable = data
            .iter()
            .all(|&b| b == b'\n' || b == b'\r' || b == b'\t' || (0x20..=0x7E).contains(&b));

        if !is_printable {
            write!(w, "<")?;
            for byte in data {
                write!(w, "{:02X}", byte)?;
            }
            return write!(w, ">");
        }

        write!(w, "(")?;
        for &byte in data {
            match byte {
                b'(' => write!(w, "\\(")?,
                b')' => write!(w, "\\)")?,
                b'\\' => write!(w, "\\\\")?,
                b'\n' => write!(w, "\\n")?,
                b'\r' => write!(w, "\\r")?,
                b'\t' => write!(w, "\\t")?,
                _ => w.write_all(&[byte])?,
            }
        }
        write!(w, ")")
    }

    /// Names escape delimiters and non-regular characters as `#xx`, so a MIME type
    /// such as `application/pdf` is written `/application#2Fpdf`.
    fn write_name<W: Write>(&self, w: &mut W, name: &str) -> io::Result<()> {
        write!(w, "/")?;
        for byte in name.bytes() {
            match byte {
                b'!'
                | b'"'
                | b'$'
                | b'&'
                | b'\''
                | b'*'..=b'.'
                | b'0'..=b'9'
                | b';'
                | b'?'
                | b'@'
                | b'A'..=b'Z'
                | b'^'..=b'z'
                | b'|'
                | b'~' => w.write_all(&[byte])?,
                _ => write!(w, "#{:02X}", byte)?,
            }
        }
        Ok(())
    }

    fn write_array<W: Write>(&self, w: &mut W, arr: &[Object]) -> io::Result<()> {
        write!(w, "[")?;
        for (i, obj) in arr.iter().enumerate() {
            if i > 0 {
                write!(w, " ")?;
            }
            self.write_object(w, obj)?;
        }
        write!(w, "]")
    }

    fn write_dictionary<W: Write>(&self, w: &mut W, dict: &Dictionary) -> io::Result<()> {
        write!(w, "<<")?;

        let mut keys: Vec<_> = dict.keys().collect();
        keys.sort();

        for key in keys {
            if let Some(value) = dict.get(key) {
                if self.compact {
                    write!(w, " ")?;
                } else {
                    write!(w, "\n  ")?;
                }
                self.write_name(w, key)?;
                write!(w, " ")?;
                self.write_object(w, value)?;
            }
        }

        if self.compact {
            if !dict.is_empty() {
                write!(w, " ")?;
            }
        } else if !dict.is_empty() {
            writeln!(w)?;
        }
        write!(w, ">>")
    }

    /// `/Length` always reflects the data actually written.
    fn write_stream<W: Write>(&self, w: &mut W, dict: &Dictionary, data: &[u8]) -> io::Result<()> {
        let mut dict_with_length = dict.clone();
        dict_with_length.insert("Length".to_string(), Object::Integer(data.len() as i64));

        self.write_dictionary(w, &dict_with_length)?;
        write!(w, "\nstream\n")?;
        w.write_all(data)?;
        write!(w, "\nendstream")
    }
}

/// Helper functions for building PDF objects.
impl ObjectSerializer {
    /// Create a Name object.
    pub fn name(s: &str) -> Object {
        Object::Name(s.to_string())
    }

    /// Create a String object from a Rust string.
    pub fn string(s: &str) -> Object {
        Object::String(s.as_bytes().to_vec())
    }

    /// Create a text string: ASCII as is, anything else as UTF-16BE with BOM.
    pub fn text_string(s: &str) -> Object {
        if s.is_ascii() {
            Self::string(s)
        } else {
            Object::String(encode_utf16_be(s))
        }
    }

    /// Create a Dictionary object.
    pub fn dict(entries: Vec<(&str, Object)>) -> Object {
        Object::Dictionary(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
    }

    /// Create a rectangle array [x, y, width, height] -> [llx, lly, urx, ury].
    pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Object {
        Object::Array(vec![
            Object::Real(x),
            Object::Real(y),
            Object::Real(x + width),
            Object::Real(y + height),
        ])
    }
}

/// Encode a string as UTF-16BE with BOM for PDF text strings.
pub(crate) fn encode_utf16_be(s: &str) -> Vec<u8> {
    let mut result = vec![0xFE, 0xFF];
    for c in s.encode_utf16() {
        result.extend_from_slice(&c.to_be_bytes());
    }
    result
}
