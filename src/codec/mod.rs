mod cursor;
mod error;
mod layout;

pub use cursor::{FieldReader, FieldWriter};
pub use error::{CodecError, CodecResult};
pub use layout::{FieldDef, FieldKind, RecordLayout};

/// A value type with a declared fixed-width record layout.
///
/// Implementors pair a plain struct with a `RecordLayout` naming every field
/// and its encoded width; `encode` and `decode` must visit the fields in
/// declared order. The store layer relies on every encoded record occupying
/// exactly `LAYOUT.record_size()` bytes.
pub trait FixedRecord: Sized {
    /// Declared field layout for this record type
    const LAYOUT: RecordLayout;

    /// Write every field, in declared order
    fn encode(&self, writer: &mut FieldWriter<'_>) -> CodecResult<()>;

    /// Read every field, in declared order
    fn decode(reader: &mut FieldReader<'_>) -> CodecResult<Self>;

    /// Encode into a fresh buffer of exactly the record size
    fn to_bytes(&self) -> CodecResult<Vec<u8>> {
        let mut buf = vec![0u8; Self::LAYOUT.record_size()];
        let mut writer = FieldWriter::new(Self::LAYOUT, &mut buf)?;
        self.encode(&mut writer)?;
        writer.finish()?;
        Ok(buf)
    }

    /// Decode from a buffer of exactly the record size
    fn from_bytes(buf: &[u8]) -> CodecResult<Self> {
        let mut reader = FieldReader::new(Self::LAYOUT, buf)?;
        Self::decode(&mut reader)
    }
}
