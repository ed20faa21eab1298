pub mod config;
pub mod domain;
pub mod error;
pub mod numbering;
pub mod output;
pub mod pipeline;
pub mod select;
pub mod source;
pub mod store;
pub mod transform;
