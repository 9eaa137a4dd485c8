pub mod json_collection;

pub use json_collection::JsonCollection;
