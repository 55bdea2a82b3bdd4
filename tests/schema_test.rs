use middle_c::schema::{
    generate, generate_all, generate_strict, Catalog, FieldDescriptor, FieldType,
    FunctionDescriptor, GenerateOptions, Primitive, RecordDescriptor, EPOCH, RESULT_POSITION,
};
use middle_c::MiddleError;
use serde_json::json;

fn rooted(root: &str) -> GenerateOptions {
    GenerateOptions {
        root: Some(root.to_string()),
        ..GenerateOptions::default()
    }
}

#[test]
fn test_car_schema() {
    let output = generate(&Catalog::builtin(), &rooted("obfuscatedCar")).unwrap();

    assert_eq!(
        output.serialized,
        json!({
            "title": "Car",
            "type": "object",
            "properties": {
                "modelName": { "type": "string", "maxLength": 80 },
                "weight": { "type": "number", "format": "double" }
            }
        })
    );
    assert!(output.unmapped.is_empty());
}

#[test]
fn test_builtin_record_schemas() {
    let catalog = Catalog::builtin();

    let my_struct = generate(&catalog, &rooted("MY_STRUCT")).unwrap().serialized;
    assert_eq!(my_struct["title"], "MyStruct");
    assert_eq!(my_struct["properties"]["id"], json!({ "type": "integer", "format": "int32" }));
    assert_eq!(
        my_struct["properties"]["payload"],
        json!({ "type": "string", "maxLength": 80 })
    );

    let my_rec = generate(&catalog, &rooted("myRec")).unwrap().serialized;
    assert_eq!(my_rec["title"], "MyRec");
    assert_eq!(my_rec["properties"]["name"], json!({ "type": "string" }));

    let wrapper = generate(&catalog, &rooted("TypeWrapperInt")).unwrap().serialized;
    assert_eq!(
        wrapper["properties"]["myType"],
        json!({ "type": "integer", "format": "int32" })
    );
}

#[test]
fn test_nested_record_and_array() {
    let mut catalog = Catalog::builtin();
    catalog.register_record(RecordDescriptor::new(
        "raceCarDriver",
        vec![
            FieldDescriptor::new("name", FieldType::CharArray(20)),
            FieldDescriptor::new("rank", Primitive::Int32),
            FieldDescriptor::new("electric", Primitive::Bool),
            FieldDescriptor::new("lap_times", FieldType::array(Primitive::Float.into())),
            FieldDescriptor::new("driversCar", FieldType::record("car")),
        ],
    ));

    let output = generate(&catalog, &GenerateOptions::default()).unwrap();
    assert_eq!(
        output.serialized,
        json!({
            "title": "RaceCarDriver",
            "type": "object",
            "properties": {
                "name": { "type": "string", "maxLength": 20 },
                "rank": { "type": "integer", "format": "int32" },
                "electric": { "type": "boolean" },
                "lapTimes": {
                    "type": "array",
                    "items": { "type": "number", "format": "float" }
                },
                "driversCar": {
                    "type": "object",
                    "properties": {
                        "modelName": { "type": "string", "maxLength": 80 },
                        "weight": { "type": "number", "format": "double" }
                    }
                }
            }
        })
    );
}

#[test]
fn test_fixed_size_arrays() {
    let mut catalog = Catalog::new();
    catalog.register_record(RecordDescriptor::new(
        "lapRecord",
        vec![
            FieldDescriptor::new("started", FieldType::fixed_array(Primitive::Int64.into(), 1)),
            FieldDescriptor::new("splits", FieldType::fixed_array(Primitive::Int64.into(), 3)),
            FieldDescriptor::new("dimensions", FieldType::fixed_array(Primitive::Int32.into(), 4)),
            FieldDescriptor::new("tag", FieldType::fixed_array(Primitive::Char.into(), 8)),
        ],
    ));

    let output = generate(&catalog, &GenerateOptions::default()).unwrap();
    let properties = &output.serialized["properties"];

    assert_eq!(
        properties["started"],
        json!({ "type": "string", "format": "date-time", "default": "1970-01-01T00:00:00.000Z" })
    );
    assert_eq!(properties["started"]["default"], EPOCH);
    assert_eq!(
        properties["splits"],
        json!({ "type": "array", "items": { "type": "integer", "format": "int64" } })
    );
    assert_eq!(
        properties["dimensions"],
        json!({ "type": "array", "items": { "type": "integer", "format": "int32" } })
    );
    assert_eq!(properties["tag"], json!({ "type": "string", "maxLength": 8 }));
}

#[test]
fn test_fixed_array_of_unsupported_is_unmapped() {
    let mut catalog = Catalog::new();
    catalog.register_record(RecordDescriptor::new(
        "gauge",
        vec![FieldDescriptor::new(
            "readings",
            FieldType::fixed_array(FieldType::Unsupported("long double".to_string()), 2),
        )],
    ));

    let output = generate(&catalog, &GenerateOptions::default()).unwrap();
    assert_eq!(output.unmapped.len(), 1);
    assert_eq!(output.unmapped[0].arg, "long double");
}

#[test]
fn test_fieldless_record_is_unmapped() {
    let mut catalog = Catalog::builtin();
    catalog.register_record(RecordDescriptor::new("fwdDecl", vec![]));

    let output = generate(&catalog, &GenerateOptions::default()).unwrap();
    assert_eq!(output.serialized["title"], "Car");
    assert_eq!(output.unmapped.len(), 1);
    assert_eq!(output.unmapped[0].name, "fwdDecl");
    assert_eq!(output.unmapped[0].arg, "fwdDecl");
    assert_eq!(output.unmapped[0].position, None);
    assert_eq!(output.unmapped[0].decl, None);

    assert!(matches!(
        generate(&catalog, &rooted("fwdDecl")),
        Err(MiddleError::Unmapped { .. })
    ));
    assert!(matches!(
        generate_strict(&catalog, &GenerateOptions::default()),
        Err(MiddleError::Unmapped { names }) if names == ["fwdDecl"]
    ));
}

#[test]
fn test_field_of_fieldless_record_is_unmapped() {
    let mut catalog = Catalog::new();
    catalog.register_record(RecordDescriptor::new("fwdDecl", vec![]));
    catalog.register_record(RecordDescriptor::new(
        "holder",
        vec![FieldDescriptor::new("inner", FieldType::record("fwdDecl"))],
    ));

    let output = generate(&catalog, &GenerateOptions::default()).unwrap();
    let names: Vec<&str> = output.unmapped.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, ["fwdDecl", "holder"]);
    assert_eq!(output.unmapped[1].decl.as_deref(), Some("inner"));
}

#[test]
fn test_unmapped_declarations_are_reported() {
    let mut catalog = Catalog::builtin();
    catalog.register_record(RecordDescriptor::new(
        "callbackRec",
        vec![
            FieldDescriptor::new("id", Primitive::Int32),
            FieldDescriptor::new("handler", FieldType::Unsupported("void (*)(int)".to_string())),
        ],
    ));
    catalog.register_function(FunctionDescriptor::new(
        "precise",
        vec![FieldDescriptor::new("", Primitive::Int32)],
        Some(FieldType::Unsupported("long double".to_string())),
    ));
    catalog.register_function(FunctionDescriptor::new(
        "drive",
        vec![
            FieldDescriptor::new("car", FieldType::pointer(FieldType::record("car"))),
            FieldDescriptor::new("truck", FieldType::pointer(FieldType::record("truck"))),
        ],
        None,
    ));

    let output = generate(&catalog, &GenerateOptions::default()).unwrap();

    // the unmappable record is skipped when picking the default root
    assert_eq!(output.serialized["title"], "Car");
    assert_eq!(output.unmapped.len(), 3);

    let record = &output.unmapped[0];
    assert_eq!(record.name, "callbackRec");
    assert_eq!(record.position, None);
    assert_eq!(record.arg, "void (*)(int)");
    assert_eq!(record.decl.as_deref(), Some("handler"));

    let precise = &output.unmapped[1];
    assert_eq!(precise.position, Some(RESULT_POSITION));
    assert_eq!(precise.arg, "long double");
    assert_eq!(precise.decl.as_deref(), Some("precise(int)"));

    let drive = &output.unmapped[2];
    assert_eq!(drive.position, Some(1));
    assert_eq!(drive.arg, "truck");

    assert!(matches!(
        generate(&catalog, &rooted("callbackRec")),
        Err(MiddleError::Unmapped { .. })
    ));
    match generate_strict(&catalog, &GenerateOptions::default()) {
        Err(MiddleError::Unmapped { names }) => {
            assert_eq!(names, ["callbackRec", "precise", "drive"]);
        }
        other => panic!("expected unmapped error, got {:?}", other),
    }
}

#[test]
fn test_opaque_maps_to_bare_object() {
    let mut catalog = Catalog::new();
    catalog.register_record(RecordDescriptor::new(
        "session",
        vec![FieldDescriptor::new("handle", FieldType::pointer(FieldType::Opaque("ctx_t".to_string())))],
    ));
    let output = generate(&catalog, &GenerateOptions::default()).unwrap();
    assert_eq!(output.serialized["properties"]["handle"], json!({ "type": "object" }));
}

#[test]
fn test_unknown_root() {
    assert!(matches!(
        generate(&Catalog::builtin(), &rooted("truck")),
        Err(MiddleError::UnknownType { name }) if name == "truck"
    ));
}

#[test]
fn test_strict_builtin_succeeds() {
    let schema = generate_strict(&Catalog::builtin(), &rooted("myStruct")).unwrap();
    assert_eq!(schema["title"], "MyStruct");
}

#[test]
fn test_generate_all_definitions() {
    let opts = GenerateOptions {
        module: "Garage".to_string(),
        root: None,
    };
    let output = generate_all(&Catalog::builtin(), &opts);

    assert_eq!(output.serialized["title"], "Garage");
    let definitions = output.serialized["definitions"].as_object().unwrap();
    let mut titles: Vec<&str> = definitions.keys().map(String::as_str).collect();
    titles.sort_unstable();
    assert_eq!(titles, ["Car", "MyRec", "MyStruct", "TypeWrapperInt"]);
}

#[test]
fn test_unmapped_entry_serialization() {
    let mut catalog = Catalog::new();
    catalog.register_function(FunctionDescriptor::new(
        "precise",
        vec![],
        Some(FieldType::Unsupported("long double".to_string())),
    ));
    let output = generate(&catalog, &GenerateOptions::default()).unwrap();
    let value = serde_json::to_value(&output).unwrap();
    assert_eq!(
        value["unmapped"],
        json!([{ "name": "precise", "position": -1, "arg": "long double", "decl": "precise()" }])
    );
}
