use std::sync::Arc;

use super::field::FieldSpec;
use super::validate::validate_record;
use crate::error::SchemaError;

/// Immutable declaration of a record's fields, in wire order.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSchema {
    name: String,
    description: Option<String>,
    fields: Vec<FieldSpec>,
}

impl RecordSchema {
    pub fn builder(name: impl Into<String>) -> RecordSchemaBuilder {
        RecordSchemaBuilder {
            name: name.into(),
            description: None,
            fields: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Declaration index of the field called `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.required)
    }

    /// Two schemas are compatible when they are the same allocation or
    /// structurally equal.
    pub fn same_as(self: &Arc<Self>, other: &Arc<RecordSchema>) -> bool {
        Arc::ptr_eq(self, other) || **self == **other
    }
}

/// Fluent builder for [`RecordSchema`].
#[derive(Debug, Clone)]
pub struct RecordSchemaBuilder {
    name: String,
    description: Option<String>,
    fields: Vec<FieldSpec>,
}

impl RecordSchemaBuilder {
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    pub fn fields(mut self, fields: impl IntoIterator<Item = FieldSpec>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Runs the integrity check and freezes the schema.
    pub fn build(self) -> Result<Arc<RecordSchema>, SchemaError> {
        let schema = RecordSchema {
            name: self.name,
            description: self.description,
            fields: self.fields,
        };
        validate_record(&schema)?;
        tracing::debug!(
            record = %schema.name,
            fields = schema.fields.len(),
            "record schema defined"
        );
        Ok(Arc::new(schema))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldType;

    fn rating() -> Arc<RecordSchema> {
        RecordSchema::builder("SearchQueryRating")
            .field(FieldSpec::optional("note", FieldType::str()).nullable())
            .field(FieldSpec::required("rating", FieldType::int()))
            .build()
            .unwrap()
    }

    #[test]
    fn lookup_by_name() {
        let s = rating();
        assert_eq!(s.name(), "SearchQueryRating");
        assert_eq!(s.len(), 2);
        assert_eq!(s.position("rating"), Some(1));
        assert!(s.field("note").unwrap().nullable);
        assert!(s.field("missing").is_none());
        let required: Vec<_> = s.required_fields().map(|f| f.name.as_str()).collect();
        assert_eq!(required, vec!["rating"]);
    }

    #[test]
    fn same_as_compares_structure() {
        let a = rating();
        let b = rating();
        assert!(a.same_as(&a));
        assert!(a.same_as(&b));
        let c = RecordSchema::builder("SearchQueryRating")
            .field(FieldSpec::required("rating", FieldType::int()))
            .build()
            .unwrap();
        assert!(!a.same_as(&c));
    }

    #[test]
    fn build_rejects_duplicates() {
        let err = RecordSchema::builder("R")
            .field(FieldSpec::required("a", FieldType::int()))
            .field(FieldSpec::optional("a", FieldType::str()))
            .build()
            .unwrap_err();
        assert_eq!(err.code, "FIELD_DUPLICATE");
    }
}
