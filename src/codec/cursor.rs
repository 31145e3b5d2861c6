use super::error::{CodecError, CodecResult};
use super::layout::{FieldDef, FieldKind, RecordLayout};

/// Sequential field encoder over one record buffer.
///
/// Fields are written in declared order and every accessor checks the
/// declared kind, so a drift between a struct and its layout fails loudly
/// instead of silently shifting bytes.
pub struct FieldWriter<'a> {
    layout: RecordLayout,
    buf: &'a mut [u8],
    next: usize,
    offset: usize,
}

impl<'a> FieldWriter<'a> {
    /// Create a writer over a buffer of exactly the record size
    pub fn new(layout: RecordLayout, buf: &'a mut [u8]) -> CodecResult<Self> {
        if buf.len() != layout.record_size() {
            return Err(CodecError::BufferSize {
                layout: layout.name(),
                expected: layout.record_size(),
                actual: buf.len(),
            });
        }
        Ok(Self {
            layout,
            buf,
            next: 0,
            offset: 0,
        })
    }

    fn take_slot(&mut self) -> CodecResult<(FieldDef, usize)> {
        match self.layout.field(self.next) {
            Some(def) => {
                let def = *def;
                let start = self.offset;
                self.next += 1;
                self.offset += def.size();
                Ok((def, start))
            }
            None => Err(CodecError::FieldsExhausted {
                layout: self.layout.name(),
                declared: self.layout.field_count(),
            }),
        }
    }

    /// Write the next field as a little-endian u32
    pub fn put_u32(&mut self, value: u32) -> CodecResult<()> {
        let (def, start) = self.take_slot()?;
        match def.kind {
            FieldKind::U32 => {
                self.buf[start..start + 4].copy_from_slice(&value.to_le_bytes());
                Ok(())
            }
            _ => Err(kind_mismatch(def, "u32")),
        }
    }

    /// Write the next field as a little-endian i64
    pub fn put_i64(&mut self, value: i64) -> CodecResult<()> {
        let (def, start) = self.take_slot()?;
        match def.kind {
            FieldKind::I64 => {
                self.buf[start..start + 8].copy_from_slice(&value.to_le_bytes());
                Ok(())
            }
            _ => Err(kind_mismatch(def, "i64")),
        }
    }

    /// Write the next field as a one-byte flag
    pub fn put_bool(&mut self, value: bool) -> CodecResult<()> {
        let (def, start) = self.take_slot()?;
        match def.kind {
            FieldKind::Bool => {
                self.buf[start] = value as u8;
                Ok(())
            }
            _ => Err(kind_mismatch(def, "bool")),
        }
    }

    /// Write the next field as fixed-slot text.
    ///
    /// Text longer than the slot is truncated at a character boundary;
    /// shorter text is zero-padded to the slot capacity.
    pub fn put_text(&mut self, value: &str) -> CodecResult<()> {
        let (def, start) = self.take_slot()?;
        let FieldKind::Text(cap) = def.kind else {
            return Err(kind_mismatch(def, "text"));
        };
        let mut end = value.len().min(cap);
        while !value.is_char_boundary(end) {
            end -= 1;
        }
        let slot = &mut self.buf[start..start + cap];
        slot[..end].copy_from_slice(&value.as_bytes()[..end]);
        slot[end..].fill(0);
        Ok(())
    }

    /// Check that every declared field was written
    pub fn finish(self) -> CodecResult<()> {
        if self.next != self.layout.field_count() {
            return Err(CodecError::FieldsRemaining {
                layout: self.layout.name(),
                written: self.next,
                declared: self.layout.field_count(),
            });
        }
        Ok(())
    }
}

/// Sequential field decoder over one record buffer
pub struct FieldReader<'a> {
    layout: RecordLayout,
    buf: &'a [u8],
    next: usize,
    offset: usize,
}

impl<'a> FieldReader<'a> {
    /// Create a reader over a buffer of exactly the record size
    pub fn new(layout: RecordLayout, buf: &'a [u8]) -> CodecResult<Self> {
        if buf.len() != layout.record_size() {
            return Err(CodecError::BufferSize {
                layout: layout.name(),
                expected: layout.record_size(),
                actual: buf.len(),
            });
        }
        Ok(Self {
            layout,
            buf,
            next: 0,
            offset: 0,
        })
    }

    fn take_slot(&mut self) -> CodecResult<(FieldDef, usize)> {
        match self.layout.field(self.next) {
            Some(def) => {
                let def = *def;
                let start = self.offset;
                self.next += 1;
                self.offset += def.size();
                Ok((def, start))
            }
            None => Err(CodecError::FieldsExhausted {
                layout: self.layout.name(),
                declared: self.layout.field_count(),
            }),
        }
    }

    /// Read the next field as a little-endian u32
    pub fn take_u32(&mut self) -> CodecResult<u32> {
        let (def, start) = self.take_slot()?;
        match def.kind {
            FieldKind::U32 => {
                let mut bytes = [0u8; 4];
                bytes.copy_from_slice(&self.buf[start..start + 4]);
                Ok(u32::from_le_bytes(bytes))
            }
            _ => Err(kind_mismatch(def, "u32")),
        }
    }

    /// Read the next field as a little-endian i64
    pub fn take_i64(&mut self) -> CodecResult<i64> {
        let (def, start) = self.take_slot()?;
        match def.kind {
            FieldKind::I64 => {
                let mut bytes = [0u8; 8];
                bytes.copy_from_slice(&self.buf[start..start + 8]);
                Ok(i64::from_le_bytes(bytes))
            }
            _ => Err(kind_mismatch(def, "i64")),
        }
    }

    /// Read the next field as a flag; any non-zero byte is true
    pub fn take_bool(&mut self) -> CodecResult<bool> {
        let (def, start) = self.take_slot()?;
        match def.kind {
            FieldKind::Bool => Ok(self.buf[start] != 0),
            _ => Err(kind_mismatch(def, "bool")),
        }
    }

    /// Read the next field as text, up to the first zero byte
    pub fn take_text(&mut self) -> CodecResult<String> {
        let (def, start) = self.take_slot()?;
        let FieldKind::Text(cap) = def.kind else {
            return Err(kind_mismatch(def, "text"));
        };
        let slot = &self.buf[start..start + cap];
        let end = slot.iter().position(|&b| b == 0).unwrap_or(cap);
        let text = std::str::from_utf8(&slot[..end]).map_err(|source| CodecError::InvalidText {
            field: def.name,
            source,
        })?;
        Ok(text.to_string())
    }
}

fn kind_mismatch(def: FieldDef, accessed: &'static str) -> CodecError {
    CodecError::KindMismatch {
        field: def.name,
        declared: format!("{:?}", def.kind),
        accessed,
    }
}
