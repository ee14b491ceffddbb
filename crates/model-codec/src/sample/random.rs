//! Random valid instances of a record schema.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{Map, Value};

use super::{in_range, int_bounds, int_value, num_value, pick_int, pick_num};
use crate::codec::construct::construct_record;
use crate::error::ValidationError;
use crate::path::FieldPath;
use crate::schema::{FieldSpec, FieldType, NumRange, RecordSchema, StrSpec};
use crate::value::{FieldInput, RecordInstance};

const MAX_STR_LEN: u64 = 12;
const MAX_ITEMS: u64 = 3;
const SPAN: f64 = 1_000.0;

/// Generates random instances that pass validation against their schema.
///
/// Optional fields are left out half the time. Nullable fields that are
/// present are explicit null one time in four.
pub struct Random<R = StdRng> {
    rng: R,
}

impl Random<StdRng> {
    /// Reproducible generator.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl Default for Random<StdRng> {
    fn default() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> Random<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Generate a random instance of `schema`.
    pub fn instance(
        &mut self,
        schema: &Arc<RecordSchema>,
    ) -> Result<RecordInstance, ValidationError> {
        let mut fields = Vec::with_capacity(schema.len());
        for f in schema.fields() {
            if let Some(value) = self.gen_field(f) {
                fields.push((f.name.as_str(), FieldInput::from(value)));
            }
        }
        construct_record(schema, fields, &FieldPath::root())
    }

    /// Generate a random non-null JSON value accepted by `ty`.
    pub fn value(&mut self, ty: &FieldType) -> Value {
        match ty {
            FieldType::Str(s) => Value::String(self.gen_str(s)),
            FieldType::Int(r) => int_value(self.gen_int(r)),
            FieldType::Num(r) => num_value(self.gen_num(r)),
            FieldType::Bool => Value::Bool(self.rng.gen_bool(0.5)),
            FieldType::Any => self.gen_any(),
            FieldType::Enum(e) => {
                if e.values.is_empty() {
                    return Value::Null;
                }
                let i = self.rng.gen_range(0..e.values.len());
                Value::String(e.values[i].clone())
            }
            FieldType::Union(members) => {
                if members.is_empty() {
                    return Value::Null;
                }
                let i = self.rng.gen_range(0..members.len());
                self.value(&members[i])
            }
            FieldType::Record(schema) => {
                let mut out = Map::new();
                for f in schema.fields() {
                    if let Some(value) = self.gen_field(f) {
                        out.insert(f.name.clone(), value);
                    }
                }
                Value::Object(out)
            }
            FieldType::Seq(s) => {
                let min = s.min_items.unwrap_or(0);
                let max = s.max_items.unwrap_or(min + MAX_ITEMS).max(min);
                let count = self.rng.gen_range(min..=max);
                Value::Array((0..count).map(|_| self.value(&s.items)).collect())
            }
            FieldType::Map(value) => {
                let count = self.rng.gen_range(0..=MAX_ITEMS);
                let mut out = Map::new();
                for i in 0..count {
                    out.insert(format!("k{i}"), self.value(value));
                }
                Value::Object(out)
            }
        }
    }

    /// `None` leaves the field out.
    fn gen_field(&mut self, f: &FieldSpec) -> Option<Value> {
        if !f.required && self.rng.gen_bool(0.5) {
            return None;
        }
        if f.nullable && self.rng.gen_ratio(1, 4) {
            return Some(Value::Null);
        }
        Some(self.value(&f.ty))
    }

    fn gen_str(&mut self, s: &StrSpec) -> String {
        let min = s.min_len.unwrap_or(0);
        let max = s.max_len.unwrap_or(min + MAX_STR_LEN).max(min);
        let len = self.rng.gen_range(min..=max);
        (0..len)
            .map(|_| self.rng.gen_range(b'a'..=b'z') as char)
            .collect()
    }

    fn gen_int(&mut self, r: &NumRange) -> f64 {
        let (lo, hi) = int_bounds(r);
        let (lo, hi) = match (lo, hi) {
            (Some(lo), Some(hi)) => (lo, hi),
            (Some(lo), None) => (lo, lo + SPAN),
            (None, Some(hi)) => (hi - SPAN, hi),
            (None, None) => (-SPAN, SPAN),
        };
        if lo > hi {
            return pick_int(r, 0.0);
        }
        self.rng.gen_range(lo as i64..=hi as i64) as f64
    }

    fn gen_num(&mut self, r: &NumRange) -> f64 {
        let lo = r.gt.into_iter().chain(r.gte).reduce(f64::max);
        let hi = r.lt.into_iter().chain(r.lte).reduce(f64::min);
        let (lo, hi) = match (lo, hi) {
            (Some(lo), Some(hi)) => (lo, hi),
            (Some(lo), None) => (lo, lo + SPAN),
            (None, Some(hi)) => (hi - SPAN, hi),
            (None, None) => (-SPAN, SPAN),
        };
        let n = lo + self.rng.gen::<f64>() * (hi - lo);
        if in_range(r, n) {
            n
        } else {
            pick_num(r, n)
        }
    }

    fn gen_any(&mut self) -> Value {
        match self.rng.gen_range(0..4) {
            0 => Value::Bool(self.rng.gen_bool(0.5)),
            1 => int_value(self.rng.gen_range(-SPAN..SPAN).round()),
            2 => Value::String(self.gen_str(&StrSpec::default())),
            _ => {
                let mut out = Map::new();
                out.insert("n".into(), int_value(self.rng.gen_range(0.0..SPAN).round()));
                Value::Object(out)
            }
        }
    }
}
