//! Loads a descriptor set with a self-referential message and prints both
//! the plain JSON Schema and the strict OpenAI tool definition.
//!
//! ```bash
//! cargo run --example recursive_tool
//! PROTOSCHEMA_COMPATIBILITY_MODE=true cargo run --example recursive_tool
//! ```

use protoschema::{DescriptorPool, SchemaGeneratorBuilder, openai::OpenAiAdapter};

const DESCRIPTORS: &str = r#"{
    "messages": [
        {
            "full_name": "chat.Comment",
            "fields": [
                { "name": "author", "number": 1, "kind": { "scalar": "string" } },
                { "name": "body", "number": 2, "kind": { "scalar": "string" } },
                { "name": "mood", "number": 3, "kind": { "enum": "chat.Mood" },
                  "cardinality": "optional" },
                { "name": "replies", "number": 4, "kind": { "message": "chat.Comment" },
                  "cardinality": "repeated" },
                { "name": "reactions", "number": 5, "kind": { "scalar": "uint32" },
                  "cardinality": { "map": { "key": "string" } } }
            ]
        }
    ],
    "enums": [
        { "full_name": "chat.Mood", "values": ["HAPPY", "NEUTRAL", "ANGRY"] }
    ]
}"#;

fn main() -> anyhow::Result<()> {
    let pool = DescriptorPool::from_json_str(DESCRIPTORS)?;

    let generator = SchemaGeneratorBuilder::new_from_env().build(&pool)?;
    let schema = generator.generate_schema_by_name("chat.Comment")?;
    println!("{}", serde_json::to_string_pretty(&schema)?);

    let tool = OpenAiAdapter::new(&pool).tool("chat.Comment", "Post a threaded comment")?;
    println!("{}", serde_json::to_string_pretty(&tool)?);

    Ok(())
}
