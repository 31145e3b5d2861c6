use super::CustomerId;
use crate::codec::{
    CodecResult, FieldDef, FieldKind, FieldReader, FieldWriter, FixedRecord, RecordLayout,
};

/// A customer account record.
///
/// `customer_id` and `account_number` are unique across the store. The
/// balance is an integer amount in minor currency units; this crate reads
/// it and rewrites whole records, it never computes balance changes itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub customer_id: CustomerId,
    pub account_number: u32,
    pub name: String,
    pub balance: i64,
    pub loan_requested: bool,
    pub loan_amount: i64,
    pub loan_approved: bool,
    pub password_hash: String,
    pub online: bool,
    pub active: bool,
    pub contact: String,
    pub address: String,
}

impl FixedRecord for Customer {
    const LAYOUT: RecordLayout = RecordLayout::new(
        "customer",
        &[
            FieldDef::new("customer_id", FieldKind::U32),
            FieldDef::new("account_number", FieldKind::U32),
            FieldDef::new("name", FieldKind::Text(64)),
            FieldDef::new("balance", FieldKind::I64),
            FieldDef::new("loan_requested", FieldKind::Bool),
            FieldDef::new("loan_amount", FieldKind::I64),
            FieldDef::new("loan_approved", FieldKind::Bool),
            FieldDef::new("password_hash", FieldKind::Text(64)),
            FieldDef::new("online", FieldKind::Bool),
            FieldDef::new("active", FieldKind::Bool),
            FieldDef::new("contact", FieldKind::Text(20)),
            FieldDef::new("address", FieldKind::Text(128)),
        ],
    );

    fn encode(&self, writer: &mut FieldWriter<'_>) -> CodecResult<()> {
        writer.put_u32(self.customer_id)?;
        writer.put_u32(self.account_number)?;
        writer.put_text(&self.name)?;
        writer.put_i64(self.balance)?;
        writer.put_bool(self.loan_requested)?;
        writer.put_i64(self.loan_amount)?;
        writer.put_bool(self.loan_approved)?;
        writer.put_text(&self.password_hash)?;
        writer.put_bool(self.online)?;
        writer.put_bool(self.active)?;
        writer.put_text(&self.contact)?;
        writer.put_text(&self.address)
    }

    fn decode(reader: &mut FieldReader<'_>) -> CodecResult<Self> {
        Ok(Self {
            customer_id: reader.take_u32()?,
            account_number: reader.take_u32()?,
            name: reader.take_text()?,
            balance: reader.take_i64()?,
            loan_requested: reader.take_bool()?,
            loan_amount: reader.take_i64()?,
            loan_approved: reader.take_bool()?,
            password_hash: reader.take_text()?,
            online: reader.take_bool()?,
            active: reader.take_bool()?,
            contact: reader.take_text()?,
            address: reader.take_text()?,
        })
    }
}
