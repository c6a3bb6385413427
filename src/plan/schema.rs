//! Row schemas - ordered, named, typed field lists.

use std::collections::HashSet;

/// Semantic type of a field.
///
/// The push-down core only consults types in two places: deciding whether an
/// item-access key renders as array indexing or dotted member access, and
/// refusing to project computed geometry values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Integer,
    Long,
    Float,
    Boolean,
    String,
    Timestamp,
    /// Spatial values; the dialect cannot compute over these.
    Geometry,
    /// Nested object or array, addressable via item access.
    Object,
}

/// A named, typed field.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub ty: FieldType,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// An ordered sequence of fields describing one row shape.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowSchema {
    fields: Vec<Field>,
}

impl RowSchema {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field(&self, index: usize) -> Option<&Field> {
        self.fields.get(index)
    }

    /// Type of the field at `index`, if it exists.
    pub fn field_type(&self, index: usize) -> Option<FieldType> {
        self.fields.get(index).map(|f| f.ty)
    }

    /// Field names with duplicates renamed deterministically.
    ///
    /// The first occurrence keeps its name; later occurrences get `_1`, `_2`,
    /// ... suffixes, bumping the counter until the result is unused. Field
    /// references are resolved against this list everywhere in the push-down
    /// core so the same index always yields the same rendered name.
    pub fn uniquified_names(&self) -> Vec<String> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut names = Vec::with_capacity(self.fields.len());
        for field in &self.fields {
            let mut candidate = field.name.clone();
            let mut suffix = 0usize;
            while seen.contains(&candidate) {
                suffix += 1;
                candidate = format!("{}_{}", field.name, suffix);
            }
            seen.insert(candidate.clone());
            names.push(candidate);
        }
        names
    }
}

impl FromIterator<Field> for RowSchema {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
