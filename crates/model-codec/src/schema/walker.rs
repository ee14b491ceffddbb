//! Schema walker over nested record schemas.

use std::collections::HashSet;
use std::sync::Arc;

use super::field::FieldType;
use super::record::RecordSchema;

/// Walks every record schema reachable from a root, depth first.
pub struct Walker;

impl Walker {
    /// Calls `on_record` once per distinct record schema, the root first.
    ///
    /// Schemas reached through several fields are visited once, keyed by
    /// allocation.
    pub fn walk(schema: &Arc<RecordSchema>, on_record: &mut dyn FnMut(&Arc<RecordSchema>)) {
        let mut seen = HashSet::new();
        Self::walk_record(schema, &mut seen, on_record);
    }

    fn walk_record(
        schema: &Arc<RecordSchema>,
        seen: &mut HashSet<*const RecordSchema>,
        on_record: &mut dyn FnMut(&Arc<RecordSchema>),
    ) {
        if !seen.insert(Arc::as_ptr(schema)) {
            return;
        }
        on_record(schema);
        for field in schema.fields() {
            Self::walk_type(&field.ty, seen, on_record);
        }
    }

    fn walk_type(
        ty: &FieldType,
        seen: &mut HashSet<*const RecordSchema>,
        on_record: &mut dyn FnMut(&Arc<RecordSchema>),
    ) {
        match ty {
            FieldType::Record(nested) => Self::walk_record(nested, seen, on_record),
            FieldType::Seq(s) => Self::walk_type(&s.items, seen, on_record),
            FieldType::Map(value) => Self::walk_type(value, seen, on_record),
            FieldType::Union(members) => {
                for member in members {
                    Self::walk_type(member, seen, on_record);
                }
            }
            FieldType::Str(_)
            | FieldType::Int(_)
            | FieldType::Num(_)
            | FieldType::Bool
            | FieldType::Any
            | FieldType::Enum(_) => {}
        }
    }
}
