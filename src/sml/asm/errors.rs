use std::fmt;

/// A recovered per-line parse defect. The offending line is skipped and
/// translation continues; the caller decides how to report the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDiagnostic {
    /// 1-based source line number.
    pub line: usize,
    pub kind: DiagnosticKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// The opcode token is not one of the seven operations.
    UnknownOpcode(String),
    /// A labeled line with no instruction after the label.
    MissingOpcode(String),
    /// A label was defined more than once.
    DuplicateLabel(String),
    /// Anything else wrong with the line's shape or operands.
    Malformed(String),
}

impl fmt::Display for ParseDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DiagnosticKind::UnknownOpcode(token) => {
                write!(f, "line {}: unknown opcode: {token}", self.line)
            }
            DiagnosticKind::MissingOpcode(label) => {
                write!(f, "line {}: label '{label}' without an instruction", self.line)
            }
            DiagnosticKind::DuplicateLabel(name) => {
                write!(f, "line {}: duplicate label: {name}", self.line)
            }
            DiagnosticKind::Malformed(reason) => write!(f, "line {}: {reason}", self.line),
        }
    }
}
