use super::CustomerId;
use crate::codec::{
    CodecResult, FieldDef, FieldKind, FieldReader, FieldWriter, FixedRecord, RecordLayout,
};

/// Length of a formatted `YYYY-MM-DD HH:MM:SS` timestamp
pub const TIMESTAMP_LEN: usize = 19;

/// One entry of the append-only transaction ledger.
///
/// `balance` is the balance snapshot recorded alongside the operation, not
/// a value this record can recompute; `timestamp` is local wall-clock time
/// at logging. Entries are never updated or deleted once written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub subject_id: CustomerId,
    pub description: String,
    pub timestamp: String,
    pub balance: i64,
}

impl FixedRecord for Transaction {
    const LAYOUT: RecordLayout = RecordLayout::new(
        "transaction",
        &[
            FieldDef::new("subject_id", FieldKind::U32),
            FieldDef::new("description", FieldKind::Text(96)),
            FieldDef::new("timestamp", FieldKind::Text(TIMESTAMP_LEN + 1)),
            FieldDef::new("balance", FieldKind::I64),
        ],
    );

    fn encode(&self, writer: &mut FieldWriter<'_>) -> CodecResult<()> {
        writer.put_u32(self.subject_id)?;
        writer.put_text(&self.description)?;
        writer.put_text(&self.timestamp)?;
        writer.put_i64(self.balance)
    }

    fn decode(reader: &mut FieldReader<'_>) -> CodecResult<Self> {
        Ok(Self {
            subject_id: reader.take_u32()?,
            description: reader.take_text()?,
            timestamp: reader.take_text()?,
            balance: reader.take_i64()?,
        })
    }
}
