//! JSON Schema rendering for declared C records.
//!
//! Records become `{ title, type: "object", properties }` documents with
//! camelCased property names. Records and functions whose types cannot be
//! mapped are reported in [`SchemaOutput::unmapped`] instead of failing the
//! whole run.

pub mod catalog;
pub mod types;

pub use catalog::{Catalog, Describe, FieldDescriptor, FunctionDescriptor, RecordDescriptor};
pub use types::{camel_case, upper_first, DescribePrimitive, FieldType, Primitive};

use crate::utils::error::{MiddleError, Result};
use serde::Serialize;
use serde_json::{json, Map, Value};

pub const DEFAULT_MODULE: &str = "Model";

/// `default` of a one-element 64-bit timestamp array.
pub const EPOCH: &str = "1970-01-01T00:00:00.000Z";

/// Position of a function result in [`Unmapped::position`].
pub const RESULT_POSITION: i32 = -1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Title for documents that are not a single record.
    pub module: String,
    /// Record to render. Defaults to the last mappable record.
    pub root: Option<String>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            module: DEFAULT_MODULE.to_string(),
            root: None,
        }
    }
}

/// A declaration that could not be mapped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Unmapped {
    pub name: String,
    /// `-1` for a function result, otherwise the argument index. Absent for
    /// record fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i32>,
    /// C spelling of the type that failed.
    pub arg: String,
    /// Function signature, or the field name for records. Absent for a
    /// record with no fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decl: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaOutput {
    pub serialized: Value,
    pub unmapped: Vec<Unmapped>,
}

/// Schema title for a record spelling: `myStruct` -> `MyStruct`.
pub fn title_of(name: &str) -> String {
    upper_first(&camel_case(name))
}

struct Mapper<'c> {
    catalog: &'c Catalog,
    visiting: Vec<String>,
}

impl<'c> Mapper<'c> {
    fn new(catalog: &'c Catalog) -> Self {
        Self {
            catalog,
            visiting: Vec::new(),
        }
    }

    /// The schema for `ty`, or the spelling of the innermost type that failed.
    fn map_type(&mut self, ty: &FieldType) -> std::result::Result<Value, String> {
        match ty {
            FieldType::Primitive(p) => Ok(p.to_schema()),
            FieldType::CString => Ok(json!({ "type": "string" })),
            FieldType::CharArray(n) => Ok(json!({ "type": "string", "maxLength": n })),
            FieldType::Array(elem) => {
                let items = self.map_type(elem)?;
                Ok(json!({ "type": "array", "items": items }))
            }
            FieldType::FixedArray(elem, 1) if **elem == FieldType::Primitive(Primitive::Int64) => {
                Ok(json!({ "type": "string", "format": "date-time", "default": EPOCH }))
            }
            FieldType::FixedArray(elem, n) if **elem == FieldType::Primitive(Primitive::Char) => {
                Ok(json!({ "type": "string", "maxLength": n }))
            }
            // the length is part of the spelling, not the schema
            FieldType::FixedArray(elem, _) => {
                let items = self.map_type(elem)?;
                Ok(json!({ "type": "array", "items": items }))
            }
            FieldType::Pointer(inner) => self.map_type(inner),
            FieldType::Opaque(_) => Ok(json!({ "type": "object" })),
            FieldType::Unsupported(spelling) => Err(spelling.clone()),
            FieldType::Record(name) => {
                let catalog = self.catalog;
                let record = catalog.find_record(name).ok_or_else(|| name.clone())?;
                if self.visiting.contains(&record.name) {
                    // self-referential through a pointer
                    return Ok(json!({ "type": "object" }));
                }
                let properties = self.map_fields(record).map_err(|(arg, _)| arg)?;
                Ok(json!({ "type": "object", "properties": properties }))
            }
        }
    }

    /// Properties for every field, or `(failing type, field name)`.
    ///
    /// A record without fields is incomplete and never maps.
    fn map_fields(
        &mut self,
        record: &RecordDescriptor,
    ) -> std::result::Result<Map<String, Value>, (String, Option<String>)> {
        if record.fields.is_empty() {
            return Err((record.name.clone(), None));
        }

        self.visiting.push(record.name.clone());
        let mut properties = Map::new();
        let mut failed = None;

        for field in &record.fields {
            match self.map_type(&field.ty) {
                Ok(schema) => {
                    properties.insert(camel_case(&field.name), schema);
                }
                Err(arg) => {
                    failed = Some((arg, Some(field.name.clone())));
                    break;
                }
            }
        }

        self.visiting.pop();
        match failed {
            Some(err) => Err(err),
            None => Ok(properties),
        }
    }

    fn record_schema(&mut self, record: &RecordDescriptor) -> std::result::Result<Value, Unmapped> {
        let properties = self.map_fields(record).map_err(|(arg, field)| Unmapped {
            name: record.name.clone(),
            position: None,
            arg,
            decl: field,
        })?;

        Ok(json!({
            "title": title_of(&record.name),
            "type": "object",
            "properties": properties,
        }))
    }

    fn check_function(&mut self, function: &FunctionDescriptor) -> Option<Unmapped> {
        let failure = |position: i32, arg: String| Unmapped {
            name: function.name.clone(),
            position: Some(position),
            arg,
            decl: Some(function.decl()),
        };

        if let Some(result) = &function.result {
            if let Err(arg) = self.map_type(result) {
                return Some(failure(RESULT_POSITION, arg));
            }
        }

        for (i, arg) in function.args.iter().enumerate() {
            if let Err(spelling) = self.map_type(&arg.ty) {
                return Some(failure(i as i32, spelling));
            }
        }
        None
    }
}

struct Mapped<'c> {
    records: Vec<(&'c RecordDescriptor, Value)>,
    unmapped: Vec<Unmapped>,
}

fn map_catalog(catalog: &Catalog) -> Mapped<'_> {
    let mut mapper = Mapper::new(catalog);
    let mut records = Vec::new();
    let mut unmapped = Vec::new();

    for record in catalog.records() {
        match mapper.record_schema(record) {
            Ok(schema) => {
                tracing::debug!(record = %record.name, "mapped record");
                records.push((record, schema));
            }
            Err(u) => {
                tracing::warn!(record = %u.name, arg = %u.arg, "unable to map record");
                unmapped.push(u);
            }
        }
    }

    for function in catalog.functions() {
        if let Some(u) = mapper.check_function(function) {
            tracing::warn!(
                function = %u.name,
                position = ?u.position,
                arg = %u.arg,
                "unable to map function"
            );
            unmapped.push(u);
        }
    }

    Mapped { records, unmapped }
}

/// Renders the root record of `catalog` and collects everything unmapped.
pub fn generate(catalog: &Catalog, opts: &GenerateOptions) -> Result<SchemaOutput> {
    let mapped = map_catalog(catalog);

    let serialized = match &opts.root {
        Some(root) => {
            let record = catalog
                .find_record(root)
                .ok_or_else(|| MiddleError::UnknownType { name: root.clone() })?;
            mapped
                .records
                .iter()
                .find(|(r, _)| r.name == record.name)
                .map(|(_, schema)| schema.clone())
                .ok_or_else(|| MiddleError::Unmapped {
                    names: vec![record.name.clone()],
                })?
        }
        None => match mapped.records.last() {
            Some((_, schema)) => schema.clone(),
            None => json!({ "title": opts.module, "type": "object", "properties": {} }),
        },
    };

    Ok(SchemaOutput {
        serialized,
        unmapped: mapped.unmapped,
    })
}

/// Renders every mappable record under `definitions`, keyed by title.
///
/// `opts.root` does not apply here and is ignored with a warning.
pub fn generate_all(catalog: &Catalog, opts: &GenerateOptions) -> SchemaOutput {
    if let Some(root) = &opts.root {
        tracing::warn!(root = %root, "root is ignored when rendering every record");
    }
    let mapped = map_catalog(catalog);
    let definitions: Map<String, Value> = mapped
        .records
        .into_iter()
        .map(|(record, schema)| (title_of(&record.name), schema))
        .collect();

    SchemaOutput {
        serialized: json!({
            "title": opts.module,
            "type": "object",
            "definitions": definitions,
        }),
        unmapped: mapped.unmapped,
    }
}

/// Like [`generate`], but any unmapped declaration is an error.
pub fn generate_strict(catalog: &Catalog, opts: &GenerateOptions) -> Result<Value> {
    generate(catalog, opts)?.into_strict()
}

impl SchemaOutput {
    /// The schema, or [`MiddleError::Unmapped`] naming every unmapped declaration.
    pub fn into_strict(self) -> Result<Value> {
        if self.unmapped.is_empty() {
            Ok(self.serialized)
        } else {
            Err(MiddleError::Unmapped {
                names: self.unmapped.into_iter().map(|u| u.name).collect(),
            })
        }
    }
}
