/// Declared kind of a single record field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Unsigned 32-bit identifier, little-endian
    U32,
    /// Signed 64-bit amount in minor currency units, little-endian
    I64,
    /// Single-byte flag, zero is false
    Bool,
    /// UTF-8 text in a fixed slot of `n` bytes, zero-padded
    Text(usize),
}

impl FieldKind {
    /// Get the encoded size of this kind in bytes
    pub const fn size(&self) -> usize {
        match self {
            FieldKind::U32 => 4,
            FieldKind::I64 => 8,
            FieldKind::Bool => 1,
            FieldKind::Text(n) => *n,
        }
    }
}

/// Named field with a declared kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldDef {
    /// Create a new field definition
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }

    /// Get the size of this field in bytes
    pub const fn size(&self) -> usize {
        self.kind.size()
    }
}

/// Fixed-width record layout: an ordered list of declared fields.
///
/// Every record of a layout occupies exactly `record_size()` bytes, so a
/// record's byte offset within a store file is `position * record_size()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordLayout {
    name: &'static str,
    fields: &'static [FieldDef],
}

impl RecordLayout {
    /// Create a new record layout
    pub const fn new(name: &'static str, fields: &'static [FieldDef]) -> Self {
        Self { name, fields }
    }

    /// Get layout name
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Get all fields
    pub const fn fields(&self) -> &'static [FieldDef] {
        self.fields
    }

    /// Get field count
    pub const fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Get a specific field
    pub fn field(&self, idx: usize) -> Option<&FieldDef> {
        self.fields.get(idx)
    }

    /// Find field index by name
    pub fn find_field(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Get the encoded record size in bytes
    pub const fn record_size(&self) -> usize {
        let mut size = 0;
        let mut i = 0;
        while i < self.fields.len() {
            size += self.fields[i].size();
            i += 1;
        }
        size
    }

    /// Get the byte offset of a field within the record
    pub fn field_offset(&self, idx: usize) -> usize {
        self.fields[..idx].iter().map(|f| f.size()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACCOUNT: RecordLayout = RecordLayout::new(
        "account",
        &[
            FieldDef::new("id", FieldKind::U32),
            FieldDef::new("balance", FieldKind::I64),
            FieldDef::new("active", FieldKind::Bool),
            FieldDef::new("name", FieldKind::Text(32)),
        ],
    );

    #[test]
    fn test_kind_sizes() {
        assert_eq!(FieldKind::U32.size(), 4);
        assert_eq!(FieldKind::I64.size(), 8);
        assert_eq!(FieldKind::Bool.size(), 1);
        assert_eq!(FieldKind::Text(128).size(), 128);
    }

    #[test]
    fn test_record_size() {
        assert_eq!(ACCOUNT.record_size(), 4 + 8 + 1 + 32);
        // record_size is const-evaluable
        const SIZE: usize = ACCOUNT.record_size();
        assert_eq!(SIZE, 45);
    }

    #[test]
    fn test_field_offsets() {
        assert_eq!(ACCOUNT.field_offset(0), 0);
        assert_eq!(ACCOUNT.field_offset(1), 4);
        assert_eq!(ACCOUNT.field_offset(2), 12);
        assert_eq!(ACCOUNT.field_offset(3), 13);
    }

    #[test]
    fn test_find_field() {
        assert_eq!(ACCOUNT.find_field("balance"), Some(1));
        assert_eq!(ACCOUNT.find_field("missing"), None);
        assert_eq!(ACCOUNT.field(3).map(|f| f.name), Some("name"));
        assert_eq!(ACCOUNT.field(4), None);
    }

    #[test]
    fn test_empty_layout() {
        const EMPTY: RecordLayout = RecordLayout::new("empty", &[]);
        assert_eq!(EMPTY.record_size(), 0);
        assert_eq!(EMPTY.field_count(), 0);
    }
}
