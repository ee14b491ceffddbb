//! Record schema integrity validator.

use std::collections::HashSet;

use super::field::{FieldType, NumRange, SeqSpec, StrSpec};
use super::record::RecordSchema;
use crate::error::SchemaError;

/// Validate a record schema for structural integrity.
///
/// Nested record schemas are not revisited; they were checked when built.
pub fn validate_record(schema: &RecordSchema) -> Result<(), SchemaError> {
    let fail = |field: Option<&str>, code: &'static str| SchemaError {
        record: schema.name().to_string(),
        field: field.map(ToOwned::to_owned),
        code,
    };

    if schema.name().is_empty() {
        return Err(fail(None, "NAME_EMPTY"));
    }

    let mut names = HashSet::new();
    let mut aliases = HashSet::new();
    for field in schema.fields() {
        if field.name.is_empty() {
            return Err(fail(None, "FIELD_EMPTY"));
        }
        if field.alias.is_empty() {
            return Err(fail(Some(&field.name), "ALIAS_EMPTY"));
        }
        if !names.insert(field.name.as_str()) {
            return Err(fail(Some(&field.name), "FIELD_DUPLICATE"));
        }
        if !aliases.insert(field.alias.as_str()) {
            return Err(fail(Some(&field.name), "ALIAS_DUPLICATE"));
        }
        validate_type(&field.ty).map_err(|code| fail(Some(&field.name), code))?;
    }
    Ok(())
}

fn validate_type(ty: &FieldType) -> Result<(), &'static str> {
    match ty {
        FieldType::Bool | FieldType::Any | FieldType::Record(_) => Ok(()),
        FieldType::Int(r) | FieldType::Num(r) => validate_range(r),
        FieldType::Str(s) => validate_str(s),
        FieldType::Enum(e) => {
            if e.values.is_empty() {
                return Err("ENUM_EMPTY");
            }
            Ok(())
        }
        FieldType::Union(members) => validate_union(members),
        FieldType::Seq(s) => validate_seq(s),
        FieldType::Map(value) => validate_type(value),
    }
}

fn validate_range(r: &NumRange) -> Result<(), &'static str> {
    if r.gt.is_some() && r.gte.is_some() {
        return Err("GT_GTE");
    }
    if r.lt.is_some() && r.lte.is_some() {
        return Err("LT_LTE");
    }
    let lo = r.gt.or(r.gte);
    let hi = r.lt.or(r.lte);
    if let (Some(lo), Some(hi)) = (lo, hi) {
        if lo > hi {
            return Err("GT_LT");
        }
    }
    Ok(())
}

fn validate_str(s: &StrSpec) -> Result<(), &'static str> {
    if let (Some(min), Some(max)) = (s.min_len, s.max_len) {
        if min > max {
            return Err("MIN_MAX");
        }
    }
    Ok(())
}

fn validate_union(members: &[FieldType]) -> Result<(), &'static str> {
    if members.is_empty() {
        return Err("TYPES_LENGTH");
    }
    for member in members {
        if !member.is_primitive() {
            return Err("UNION_MEMBER");
        }
        validate_type(member)?;
    }
    Ok(())
}

fn validate_seq(s: &SeqSpec) -> Result<(), &'static str> {
    if let (Some(min), Some(max)) = (s.min_items, s.max_items) {
        if min > max {
            return Err("MIN_MAX");
        }
    }
    validate_type(&s.items)
}
