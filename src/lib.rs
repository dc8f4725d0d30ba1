pub mod config;
pub mod fetch;
pub mod model;
pub mod pipeline;
pub mod source;
pub mod writer;
