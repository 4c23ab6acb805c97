use protoschema_core::{
    descriptor::{FieldDescriptor, MessageDescriptor, ScalarKind},
    DescriptorPool, SchemaDocument, SchemaGenerator,
};
use serde_json::{json, Value};

fn generate(pool: &DescriptorPool, name: &str, compatibility_mode: bool) -> Value {
    SchemaGenerator::new(pool)
        .with_compatibility_mode(compatibility_mode)
        .generate_schema_by_name(name)
        .unwrap()
        .into()
}

/// Drops everything the strict dialect adds so both dialects can be compared
/// structurally.
fn strip_strict(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut out = serde_json::Map::new();
            for (key, value) in map {
                match key.as_str() {
                    "required" => continue,
                    "additionalProperties" if value == &Value::Bool(false) => continue,
                    "enum" => continue,
                    "type" => {
                        let primary = value
                            .as_array()
                            .and_then(|types| types.first())
                            .unwrap_or(value);
                        out.insert(key.clone(), primary.clone());
                    }
                    _ => {
                        out.insert(key.clone(), strip_strict(value));
                    }
                }
            }
            Value::Object(out)
        }
        other => other.clone(),
    }
}

#[test]
fn leaf_message() {
    let pool = DescriptorPool::builder()
        .add_message(
            MessageDescriptor::new("test.Leaf")
                .with_field(FieldDescriptor::scalar("value", 1, ScalarKind::String)),
        )
        .build()
        .unwrap();

    assert_eq!(
        generate(&pool, "test.Leaf", false),
        json!({"type": "object", "properties": {"value": {"type": "string"}}})
    );
}

#[test]
fn recursive_node_terminates_in_both_dialects() {
    let pool = DescriptorPool::from_json_str(
        r#"{
            "messages": [{
                "full_name": ".test.RecursiveNode",
                "fields": [
                    { "name": "value", "number": 1, "kind": { "scalar": "string" },
                      "cardinality": "optional" },
                    { "name": "next", "number": 2, "kind": { "message": ".test.RecursiveNode" },
                      "cardinality": "optional" }
                ]
            }]
        }"#,
    )
    .unwrap();

    for compatibility_mode in [false, true] {
        let schema = generate(&pool, "test.RecursiveNode", compatibility_mode);

        assert_eq!(schema["type"], "object");
        let properties = schema["properties"].as_object().unwrap();
        assert!(properties.contains_key("value"));
        assert_eq!(properties["next"], json!({"type": "object"}));
    }
}

#[test]
fn repeated_string_field() {
    let pool = DescriptorPool::builder()
        .add_message(
            MessageDescriptor::new("test.Post")
                .with_field(FieldDescriptor::scalar("tags", 1, ScalarKind::String).repeated()),
        )
        .build()
        .unwrap();

    assert_eq!(
        generate(&pool, "test.Post", false)["properties"]["tags"],
        json!({"type": "array", "items": {"type": "string"}})
    );
}

#[test]
fn repeated_self_reference_is_cut_inside_items() {
    let pool = DescriptorPool::builder()
        .add_message(
            MessageDescriptor::new("test.Tree")
                .with_field(FieldDescriptor::scalar("label", 1, ScalarKind::String))
                .with_field(FieldDescriptor::message("children", 2, "test.Tree").repeated()),
        )
        .build()
        .unwrap();

    assert_eq!(
        generate(&pool, "test.Tree", false)["properties"]["children"],
        json!({"type": "array", "items": {"type": "object"}})
    );
}

#[test]
fn second_sibling_reference_gets_placeholder() {
    let pool = DescriptorPool::builder()
        .add_message(
            MessageDescriptor::new("test.Address")
                .with_field(FieldDescriptor::scalar("street", 1, ScalarKind::String))
                .with_field(FieldDescriptor::scalar("zip", 2, ScalarKind::String)),
        )
        .add_message(
            MessageDescriptor::new("test.Person")
                .with_field(FieldDescriptor::message("home", 1, "test.Address"))
                .with_field(FieldDescriptor::message("work", 2, "test.Address")),
        )
        .build()
        .unwrap();

    let schema = generate(&pool, "test.Person", false);

    assert_eq!(
        schema["properties"]["home"],
        json!({
            "type": "object",
            "properties": {"street": {"type": "string"}, "zip": {"type": "string"}}
        })
    );
    assert_eq!(schema["properties"]["work"], json!({"type": "object"}));
}

#[test]
fn mutual_recursion_terminates() {
    let pool = DescriptorPool::builder()
        .add_message(
            MessageDescriptor::new("test.A")
                .with_field(FieldDescriptor::message("b", 1, "test.B"))
                .with_field(FieldDescriptor::scalar("id", 2, ScalarKind::Int64)),
        )
        .add_message(
            MessageDescriptor::new("test.B").with_field(FieldDescriptor::message("c", 1, "test.C")),
        )
        .add_message(
            MessageDescriptor::new("test.C").with_field(FieldDescriptor::message("a", 1, "test.A")),
        )
        .build()
        .unwrap();

    let schema = generate(&pool, "test.A", false);

    assert_eq!(
        schema,
        json!({
            "type": "object",
            "properties": {
                "b": {
                    "type": "object",
                    "properties": {
                        "c": {
                            "type": "object",
                            "properties": {"a": {"type": "object"}}
                        }
                    }
                },
                "id": {"type": "integer"}
            }
        })
    );
}

#[test]
fn properties_follow_declaration_order() {
    let pool = DescriptorPool::builder()
        .add_message(
            MessageDescriptor::new("test.Ordered")
                .with_field(FieldDescriptor::scalar("zulu", 1, ScalarKind::Bool))
                .with_field(FieldDescriptor::scalar("alpha", 2, ScalarKind::Double))
                .with_field(FieldDescriptor::scalar("mike", 3, ScalarKind::Sint32)),
        )
        .build()
        .unwrap();

    let schema: SchemaDocument = SchemaGenerator::new(&pool)
        .generate_schema_by_name("test.Ordered")
        .unwrap();

    let keys: Vec<&str> = schema.properties().unwrap().keys().collect();
    assert_eq!(keys, ["zulu", "alpha", "mike"]);
    assert_eq!(
        serde_json::to_string(&schema).unwrap(),
        r#"{"type":"object","properties":{"zulu":{"type":"boolean"},"alpha":{"type":"number"},"mike":{"type":"integer"}}}"#
    );
}

#[test]
fn compatibility_mode_changes_only_encoding() {
    let pool = DescriptorPool::builder()
        .add_enum(protoschema_core::descriptor::EnumDescriptor::new(
            "test.Status",
            ["ACTIVE", "BLOCKED"],
        ))
        .add_message(
            MessageDescriptor::new("test.Account")
                .with_field(FieldDescriptor::scalar("id", 1, ScalarKind::Uint64))
                .with_field(FieldDescriptor::scalar("email", 2, ScalarKind::String).optional())
                .with_field(FieldDescriptor::enumeration("status", 3, "test.Status").optional())
                .with_field(FieldDescriptor::message("owner", 4, "test.Account").optional())
                .with_field(FieldDescriptor::message("settings", 5, "test.Settings").optional())
                .with_field(FieldDescriptor::message("history", 6, "test.Account").repeated()),
        )
        .add_message(
            MessageDescriptor::new("test.Settings")
                .with_field(FieldDescriptor::scalar("dark_mode", 1, ScalarKind::Bool)),
        )
        .build()
        .unwrap();

    let plain = generate(&pool, "test.Account", false);
    let strict = generate(&pool, "test.Account", true);

    assert_eq!(strip_strict(&strict), plain);
    assert_eq!(
        strict["properties"]["settings"],
        json!({
            "type": ["object", "null"],
            "properties": {"dark_mode": {"type": "boolean"}},
            "required": ["dark_mode"],
            "additionalProperties": false
        })
    );
    assert_eq!(strict["properties"]["owner"], json!({"type": "object"}));
    assert_eq!(
        strict["required"],
        json!(["id", "email", "status", "owner", "settings", "history"])
    );
}

#[test]
fn fresh_invocations_do_not_share_state() {
    let pool = DescriptorPool::builder()
        .add_message(
            MessageDescriptor::new("test.Leaf")
                .with_field(FieldDescriptor::scalar("value", 1, ScalarKind::String)),
        )
        .build()
        .unwrap();
    let generator = SchemaGenerator::new(&pool);

    let first = generate(&pool, "test.Leaf", false);
    let second = generator.generate_value(pool.message("test.Leaf").unwrap());
    assert_eq!(first, second);
    assert!(second["properties"].is_object());
}

#[test]
fn generator_is_shareable_across_threads() {
    let pool = DescriptorPool::builder()
        .add_message(
            MessageDescriptor::new("test.Node")
                .with_field(FieldDescriptor::message("next", 1, "test.Node")),
        )
        .build()
        .unwrap();
    let generator = &SchemaGenerator::new(&pool);

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(move || generator.generate_schema_by_name("test.Node").unwrap()))
            .collect();
        for handle in handles {
            let schema = handle.join().unwrap();
            assert!(schema.properties().is_some());
        }
    });
}
