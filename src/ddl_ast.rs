#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableDescriptor {
    pub name: String,
    pub attributes: Vec<AttributeDescriptor>,
    pub foreign_keys: Vec<ForeignKeyRef>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttributeDescriptor {
    pub name: String,
    pub data_type: String,
    pub primary_key: bool,
}

/// A `REFERENCES table(column)` clause, keyed by the column that declares it.
///
/// The target is looked up by name whenever it is needed, so a reference to a
/// table that no longer exists simply resolves to nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct ForeignKeyRef {
    pub attribute: String,
    pub referenced_table: String,
    pub referenced_attribute: String,
}
