//! OpenAI envelopes for protoschema-generated JSON Schema.
//!
//! OpenAI’s strict mode (`"strict": true` on tools and on `json_schema`
//! response formats) only accepts a subset of JSON Schema: every property
//! must be listed in `"required"`, objects must close with
//! `"additionalProperties": false` and optional values are expressed as a
//! `"null"` type union. [`OpenAiAdapter`] therefore always drives the core
//! generator with compatibility mode switched on.
mod adapter;

pub use adapter::OpenAiAdapter;
pub mod api_v1;
pub mod error;
