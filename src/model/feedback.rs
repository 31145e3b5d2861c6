use super::CustomerId;
use crate::codec::{
    CodecResult, FieldDef, FieldKind, FieldReader, FieldWriter, FixedRecord, RecordLayout,
};

/// A feedback message left by a customer, flagged once staff resolve it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub customer_id: CustomerId,
    pub resolved: bool,
    pub message: String,
}

impl FixedRecord for Feedback {
    const LAYOUT: RecordLayout = RecordLayout::new(
        "feedback",
        &[
            FieldDef::new("customer_id", FieldKind::U32),
            FieldDef::new("resolved", FieldKind::Bool),
            FieldDef::new("message", FieldKind::Text(256)),
        ],
    );

    fn encode(&self, writer: &mut FieldWriter<'_>) -> CodecResult<()> {
        writer.put_u32(self.customer_id)?;
        writer.put_bool(self.resolved)?;
        writer.put_text(&self.message)
    }

    fn decode(reader: &mut FieldReader<'_>) -> CodecResult<Self> {
        Ok(Self {
            customer_id: reader.take_u32()?,
            resolved: reader.take_bool()?,
            message: reader.take_text()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let feedback = Feedback {
            customer_id: 3,
            resolved: false,
            message: "the branch queue moves too slowly".to_string(),
        };
        let decoded = Feedback::from_bytes(&feedback.to_bytes().unwrap()).unwrap();
        assert_eq!(decoded, feedback);
    }

    #[test]
    fn test_empty_message() {
        let feedback = Feedback {
            customer_id: 3,
            resolved: true,
            message: String::new(),
        };
        let decoded = Feedback::from_bytes(&feedback.to_bytes().unwrap()).unwrap();
        assert_eq!(decoded, feedback);
    }
}
