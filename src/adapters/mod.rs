//! Adapter layer: protocol surfaces over the shared task operations.

pub mod http;
