//! Tool schema rendering for the native tool-use API.

mod schema;

pub use schema::JsonSchemaToolConverter;
