use std::sync::Arc;

use super::record::RecordSchema;

/// Inclusive / exclusive bounds of a numeric field.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NumRange {
    pub gt: Option<f64>,
    pub gte: Option<f64>,
    pub lt: Option<f64>,
    pub lte: Option<f64>,
}

impl NumRange {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn gt(mut self, v: f64) -> Self {
        self.gt = Some(v);
        self
    }
    pub fn gte(mut self, v: f64) -> Self {
        self.gte = Some(v);
        self
    }
    pub fn lt(mut self, v: f64) -> Self {
        self.lt = Some(v);
        self
    }
    pub fn lte(mut self, v: f64) -> Self {
        self.lte = Some(v);
        self
    }
    pub fn is_unbounded(&self) -> bool {
        self.gt.is_none() && self.gte.is_none() && self.lt.is_none() && self.lte.is_none()
    }
}

/// Length bounds of a string field, counted in characters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StrSpec {
    pub min_len: Option<u64>,
    pub max_len: Option<u64>,
}

/// A closed set of string values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumSpec {
    pub name: String,
    pub values: Vec<String>,
}

impl EnumSpec {
    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }
}

/// Element type and length bounds of a sequence field.
#[derive(Debug, Clone, PartialEq)]
pub struct SeqSpec {
    pub items: Box<FieldType>,
    pub min_items: Option<u64>,
    pub max_items: Option<u64>,
}

/// Semantic type of a field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    Str(StrSpec),
    /// JSON number without a fractional part.
    Int(NumRange),
    Num(NumRange),
    Bool,
    /// Any non-null JSON value, passed through untouched.
    Any,
    Enum(EnumSpec),
    /// Union of primitive types; the first member that accepts a value wins.
    Union(Vec<FieldType>),
    Record(Arc<RecordSchema>),
    Seq(SeqSpec),
    /// String-keyed mapping with a uniform value type.
    Map(Box<FieldType>),
}

impl FieldType {
    pub fn str() -> Self {
        Self::Str(StrSpec::default())
    }

    pub fn str_len(min_len: Option<u64>, max_len: Option<u64>) -> Self {
        Self::Str(StrSpec { min_len, max_len })
    }

    pub fn int() -> Self {
        Self::Int(NumRange::default())
    }

    pub fn int_in(range: NumRange) -> Self {
        Self::Int(range)
    }

    pub fn num() -> Self {
        Self::Num(NumRange::default())
    }

    pub fn num_in(range: NumRange) -> Self {
        Self::Num(range)
    }

    pub fn bool() -> Self {
        Self::Bool
    }

    pub fn any() -> Self {
        Self::Any
    }

    pub fn enumeration<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Enum(EnumSpec {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        })
    }

    pub fn union(members: Vec<FieldType>) -> Self {
        Self::Union(members)
    }

    pub fn record(schema: &Arc<RecordSchema>) -> Self {
        Self::Record(Arc::clone(schema))
    }

    pub fn seq(items: FieldType) -> Self {
        Self::Seq(SeqSpec {
            items: Box::new(items),
            min_items: None,
            max_items: None,
        })
    }

    pub fn seq_len(items: FieldType, min_items: Option<u64>, max_items: Option<u64>) -> Self {
        Self::Seq(SeqSpec {
            items: Box::new(items),
            min_items,
            max_items,
        })
    }

    pub fn map(values: FieldType) -> Self {
        Self::Map(Box::new(values))
    }

    /// Returns the kind string identifier for this type.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Str(_) => "str",
            Self::Int(_) => "int",
            Self::Num(_) => "num",
            Self::Bool => "bool",
            Self::Any => "any",
            Self::Enum(_) => "enum",
            Self::Union(_) => "or",
            Self::Record(_) => "record",
            Self::Seq(_) => "seq",
            Self::Map(_) => "map",
        }
    }

    /// Primitive types may appear as union members.
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            Self::Str(_) | Self::Int(_) | Self::Num(_) | Self::Bool | Self::Enum(_)
        )
    }
}

/// One field of a record schema.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: String,
    /// JSON key used on the wire.
    pub alias: String,
    pub ty: FieldType,
    pub required: bool,
    pub nullable: bool,
    pub description: Option<String>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, ty: FieldType, required: bool) -> Self {
        let name = name.into();
        Self {
            alias: name.clone(),
            name,
            ty,
            required,
            nullable: false,
            description: None,
        }
    }

    pub fn required(name: impl Into<String>, ty: FieldType) -> Self {
        Self::new(name, ty, true)
    }

    pub fn optional(name: impl Into<String>, ty: FieldType) -> Self {
        Self::new(name, ty, false)
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = alias.into();
        self
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_spec_defaults_alias_to_name() {
        let f = FieldSpec::optional("page_size", FieldType::int_in(NumRange::new().gte(0.0)));
        assert_eq!(f.alias, "page_size");
        assert!(!f.required);
        assert!(!f.nullable);
        let f = f.alias("pageSize").nullable();
        assert_eq!(f.name, "page_size");
        assert_eq!(f.alias, "pageSize");
        assert!(f.nullable);
    }

    #[test]
    fn kinds() {
        assert_eq!(FieldType::str().kind(), "str");
        assert_eq!(FieldType::seq(FieldType::int()).kind(), "seq");
        assert_eq!(FieldType::union(vec![FieldType::num()]).kind(), "or");
        assert_eq!(FieldType::map(FieldType::num()).kind(), "map");
    }

    #[test]
    fn primitives() {
        assert!(FieldType::enumeration("E", ["a"]).is_primitive());
        assert!(FieldType::bool().is_primitive());
        assert!(!FieldType::any().is_primitive());
        assert!(!FieldType::seq(FieldType::str()).is_primitive());
    }

    #[test]
    fn num_range_builder() {
        let r = NumRange::new().gt(1.0).lte(5.0);
        assert_eq!(r.gt, Some(1.0));
        assert_eq!(r.lte, Some(5.0));
        assert!(!r.is_unbounded());
        assert!(NumRange::default().is_unbounded());
    }
}
