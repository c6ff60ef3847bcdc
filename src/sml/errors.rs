use thiserror::Error;

/// Fatal faults raised while executing a program. Parse-time problems are
/// recovered per line (see `asm::ParseDiagnostic`); these are not.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecError {
    /// A `jnz` was taken toward a label no instruction defines.
    #[error("undefined label: {0}")]
    LabelNotFound(String),

    /// Arithmetic fault, raised by `div` on a zero source register.
    #[error("arithmetic fault in {op}: {lhs} / {rhs}")]
    Arithmetic { op: &'static str, lhs: i32, rhs: i32 },
}
