// src/sml/asm/mod.rs
mod errors;
mod parser;

pub use errors::{DiagnosticKind, ParseDiagnostic};
pub use parser::{Translation, translate, translate_source};
