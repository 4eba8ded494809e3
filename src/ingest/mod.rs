//! Input side: file decoding and job manifests

pub mod decode;
pub mod manifest;

pub use decode::{decode_file, html_to_text, unsupported_placeholder};
pub use manifest::{JobManifest, PairFailure, PairSpec};
