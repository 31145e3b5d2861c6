use super::{CustomerId, EmployeeId};
use crate::codec::{
    CodecResult, FieldDef, FieldKind, FieldReader, FieldWriter, FixedRecord, RecordLayout,
};

/// A loan application routed from a customer to an employee.
///
/// `employee_id` is zero until the application is assigned; `status` holds
/// the processing state as short text ("applied", "approved", "rejected").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loan {
    pub employee_id: EmployeeId,
    pub customer_id: CustomerId,
    pub amount: i64,
    pub status: String,
}

impl FixedRecord for Loan {
    const LAYOUT: RecordLayout = RecordLayout::new(
        "loan",
        &[
            FieldDef::new("employee_id", FieldKind::U32),
            FieldDef::new("customer_id", FieldKind::U32),
            FieldDef::new("amount", FieldKind::I64),
            FieldDef::new("status", FieldKind::Text(16)),
        ],
    );

    fn encode(&self, writer: &mut FieldWriter<'_>) -> CodecResult<()> {
        writer.put_u32(self.employee_id)?;
        writer.put_u32(self.customer_id)?;
        writer.put_i64(self.amount)?;
        writer.put_text(&self.status)
    }

    fn decode(reader: &mut FieldReader<'_>) -> CodecResult<Self> {
        Ok(Self {
            employee_id: reader.take_u32()?,
            customer_id: reader.take_u32()?,
            amount: reader.take_i64()?,
            status: reader.take_text()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_size() {
        assert_eq!(Loan::LAYOUT.record_size(), 4 + 4 + 8 + 16);
    }

    #[test]
    fn test_round_trip() {
        let loan = Loan {
            employee_id: 0,
            customer_id: 12,
            amount: 50_000,
            status: "applied".to_string(),
        };
        let decoded = Loan::from_bytes(&loan.to_bytes().unwrap()).unwrap();
        assert_eq!(decoded, loan);
    }
}
