use super::EmployeeId;
use crate::codec::{
    CodecResult, FieldDef, FieldKind, FieldReader, FieldWriter, FixedRecord, RecordLayout,
};

/// A bank employee login record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub employee_id: EmployeeId,
    pub username: String,
    pub password_hash: String,
    pub online: bool,
    pub active: bool,
}

impl FixedRecord for Employee {
    const LAYOUT: RecordLayout = RecordLayout::new(
        "employee",
        &[
            FieldDef::new("employee_id", FieldKind::U32),
            FieldDef::new("username", FieldKind::Text(64)),
            FieldDef::new("password_hash", FieldKind::Text(64)),
            FieldDef::new("online", FieldKind::Bool),
            FieldDef::new("active", FieldKind::Bool),
        ],
    );

    fn encode(&self, writer: &mut FieldWriter<'_>) -> CodecResult<()> {
        writer.put_u32(self.employee_id)?;
        writer.put_text(&self.username)?;
        writer.put_text(&self.password_hash)?;
        writer.put_bool(self.online)?;
        writer.put_bool(self.active)
    }

    fn decode(reader: &mut FieldReader<'_>) -> CodecResult<Self> {
        Ok(Self {
            employee_id: reader.take_u32()?,
            username: reader.take_text()?,
            password_hash: reader.take_text()?,
            online: reader.take_bool()?,
            active: reader.take_bool()?,
        })
    }
}

/// A privileged login record, shared by the manager and admin stores.
///
/// Managers and admins carry the same fields; only the store file they live
/// in differs, so one record type covers both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Official {
    pub employee_id: EmployeeId,
    pub username: String,
    pub password_hash: String,
    pub online: bool,
}

impl FixedRecord for Official {
    const LAYOUT: RecordLayout = RecordLayout::new(
        "official",
        &[
            FieldDef::new("employee_id", FieldKind::U32),
            FieldDef::new("username", FieldKind::Text(64)),
            FieldDef::new("password_hash", FieldKind::Text(64)),
            FieldDef::new("online", FieldKind::Bool),
        ],
    );

    fn encode(&self, writer: &mut FieldWriter<'_>) -> CodecResult<()> {
        writer.put_u32(self.employee_id)?;
        writer.put_text(&self.username)?;
        writer.put_text(&self.password_hash)?;
        writer.put_bool(self.online)
    }

    fn decode(reader: &mut FieldReader<'_>) -> CodecResult<Self> {
        Ok(Self {
            employee_id: reader.take_u32()?,
            username: reader.take_text()?,
            password_hash: reader.take_text()?,
            online: reader.take_bool()?,
        })
    }
}
