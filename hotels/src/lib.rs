// Hotel search adapter: turns a tool-call payload from the model into a
// normalized hotel list (or a tagged error) by way of the SerpAPI search
// endpoint.

pub mod adapter;
pub use adapter::*;

pub mod client;
pub use client::*;

pub mod query;
pub use query::*;

pub mod errors;
pub use errors::*;
