//! Sample instances built from a schema alone.
//!
//! [`make_instance`] gives a fixed, predictable instance for fixtures;
//! [`Random`] draws arbitrary valid ones.

pub mod random;

pub use random::Random;

use std::sync::Arc;

use serde_json::{json, Map, Number, Value};

use crate::codec::construct::construct_record;
use crate::error::ValidationError;
use crate::path::FieldPath;
use crate::schema::{FieldType, NumRange, RecordSchema};
use crate::value::{FieldInput, RecordInstance};

const SAMPLE_INT: f64 = 56.0;
const SAMPLE_NUM: f64 = 1.5;

/// Builds a predictable instance of `schema`.
///
/// Only required fields are set unless `include_optional` is given, in which
/// case every field is set to a non-null value. Nested records are filled the
/// same way.
pub fn make_instance(
    schema: &Arc<RecordSchema>,
    include_optional: bool,
) -> Result<RecordInstance, ValidationError> {
    let fields = schema
        .fields()
        .iter()
        .filter(|f| include_optional || f.required)
        .map(|f| (f.name.as_str(), FieldInput::from(sample_value(&f.ty, include_optional))))
        .collect::<Vec<_>>();
    construct_record(schema, fields, &FieldPath::root())
}

fn sample_value(ty: &FieldType, include_optional: bool) -> Value {
    match ty {
        FieldType::Str(s) => Value::String("x".repeat(s.min_len.unwrap_or(0) as usize)),
        FieldType::Int(r) => int_value(pick_int(r, SAMPLE_INT)),
        FieldType::Num(r) => num_value(pick_num(r, SAMPLE_NUM)),
        FieldType::Bool => Value::Bool(true),
        FieldType::Any => json!({}),
        FieldType::Enum(e) => e.values.first().cloned().map_or(Value::Null, Value::String),
        FieldType::Union(members) => members
            .first()
            .map_or(Value::Null, |m| sample_value(m, include_optional)),
        FieldType::Record(schema) => {
            let mut out = Map::new();
            for f in schema.fields() {
                if include_optional || f.required {
                    out.insert(f.name.clone(), sample_value(&f.ty, include_optional));
                }
            }
            Value::Object(out)
        }
        FieldType::Seq(s) => {
            let count = s.min_items.unwrap_or(0).max(1) as usize;
            Value::Array(vec![sample_value(&s.items, include_optional); count])
        }
        FieldType::Map(value) => {
            let mut out = Map::new();
            out.insert("key".into(), sample_value(value, include_optional));
            Value::Object(out)
        }
    }
}

/// Inclusive integer bounds implied by `range`.
pub(crate) fn int_bounds(range: &NumRange) -> (Option<f64>, Option<f64>) {
    let lo = match (range.gt, range.gte) {
        (Some(gt), Some(gte)) => Some((gt.floor() + 1.0).max(gte.ceil())),
        (Some(gt), None) => Some(gt.floor() + 1.0),
        (None, gte) => gte.map(f64::ceil),
    };
    let hi = match (range.lt, range.lte) {
        (Some(lt), Some(lte)) => Some((lt.ceil() - 1.0).min(lte.floor())),
        (Some(lt), None) => Some(lt.ceil() - 1.0),
        (None, lte) => lte.map(f64::floor),
    };
    (lo, hi)
}

/// `preferred` if it satisfies `range`, otherwise the closest easy pick.
pub(crate) fn pick_int(range: &NumRange, preferred: f64) -> f64 {
    match int_bounds(range) {
        (Some(lo), Some(hi)) if preferred < lo || preferred > hi => ((lo + hi) / 2.0).floor(),
        (Some(lo), None) if preferred < lo => lo,
        (None, Some(hi)) if preferred > hi => hi,
        _ => preferred,
    }
}

pub(crate) fn pick_num(range: &NumRange, preferred: f64) -> f64 {
    if in_range(range, preferred) {
        return preferred;
    }
    let lo = range.gt.into_iter().chain(range.gte).reduce(f64::max);
    let hi = range.lt.into_iter().chain(range.lte).reduce(f64::min);
    match (lo, hi) {
        (Some(lo), Some(hi)) => lo + (hi - lo) / 2.0,
        (Some(lo), None) => lo + 1.0,
        (None, Some(hi)) => hi - 1.0,
        (None, None) => preferred,
    }
}

pub(crate) fn in_range(range: &NumRange, n: f64) -> bool {
    range.gt.map_or(true, |b| n > b)
        && range.gte.map_or(true, |b| n >= b)
        && range.lt.map_or(true, |b| n < b)
        && range.lte.map_or(true, |b| n <= b)
}

pub(crate) fn int_value(n: f64) -> Value {
    Value::Number(Number::from(n as i64))
}

pub(crate) fn num_value(n: f64) -> Value {
    Number::from_f64(n).map_or(Value::Null, Value::Number)
}
