use std::io;

use crate::sml::instruction::{Instruction, Op};
use crate::sml::labels::{LabelDefect, Labels};
use crate::sml::machine::Program;
use crate::sml::registers::Register;

use super::errors::{DiagnosticKind, ParseDiagnostic};

/// Result of translating a source text: the instruction list, the label
/// bindings into it, and every per-line defect that was skipped over.
#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    pub program: Program,
    pub labels: Labels,
    pub diagnostics: Vec<ParseDiagnostic>,
}

// ---------- API ----------

/// Translates an ordered line source into a fresh program.
///
/// Line grammar: `[label:] opcode operand...`, whitespace separated. Blank
/// lines are skipped silently; malformed lines become diagnostics and are
/// skipped, so one bad line never aborts the batch. An IO error from the
/// line source does abort, surfaced unmodified.
pub fn translate<I>(lines: I) -> io::Result<Translation>
where
    I: IntoIterator<Item = io::Result<String>>,
{
    let mut program = Program::new();
    let mut labels = Labels::new();
    let mut diagnostics = Vec::new();

    for (index, line) in lines.into_iter().enumerate() {
        let line = line?;
        let line_no = index + 1;
        let mut report = |kind| diagnostics.push(ParseDiagnostic { line: line_no, kind });

        let mut tokens = line.split_whitespace();
        let Some(first) = tokens.next() else {
            continue;
        };

        // A first token ending in ':' is the line's label.
        let (label, opcode) = match first.strip_suffix(':') {
            Some(name) => match tokens.next() {
                Some(opcode) => (Some(name), opcode),
                None => {
                    report(DiagnosticKind::MissingOpcode(name.to_string()));
                    continue;
                }
            },
            None => (None, first),
        };

        let operands: Vec<&str> = tokens.collect();
        let op = match parse_op(opcode, &operands) {
            Ok(op) => op,
            Err(kind) => {
                report(kind);
                continue;
            }
        };

        // The label's index is the program length before the append, so it
        // names exactly this instruction's position.
        if let Some(name) = label {
            match labels.add(name, program.len()) {
                Ok(()) => {}
                Err(LabelDefect::Empty) => {
                    report(DiagnosticKind::Malformed("empty label".to_string()));
                    continue;
                }
                Err(LabelDefect::Duplicate(name)) => {
                    report(DiagnosticKind::DuplicateLabel(name));
                    continue;
                }
            }
        }
        program.push(Instruction::new(label.map(str::to_string), op));
    }

    Ok(Translation { program, labels, diagnostics })
}

/// Convenience over [`translate`] for an in-memory source text.
pub fn translate_source(text: &str) -> io::Result<Translation> {
    translate(text.lines().map(|l| Ok(l.to_string())))
}

// ---------- Internals ----------

fn parse_op(opcode: &str, operands: &[&str]) -> Result<Op, DiagnosticKind> {
    let opcode = opcode.to_lowercase();
    let get_reg = |t: &str| {
        Register::parse(t)
            .ok_or_else(|| DiagnosticKind::Malformed(format!("invalid register: {t}")))
    };

    match opcode.as_str() {
        "add" | "sub" | "mul" | "div" => {
            let [r, s] = exact::<2>(&opcode, operands, "'R S'")?;
            let result = get_reg(r)?;
            let source = get_reg(s)?;
            Ok(match opcode.as_str() {
                "add" => Op::Add { result, source },
                "sub" => Op::Sub { result, source },
                "mul" => Op::Mul { result, source },
                "div" => Op::Div { result, source },
                _ => unreachable!(),
            })
        }
        "mov" => {
            let [r, v] = exact::<2>(&opcode, operands, "'R value'")?;
            let result = get_reg(r)?;
            let value = v
                .parse::<i32>()
                .map_err(|_| DiagnosticKind::Malformed(format!("invalid value: {v}")))?;
            Ok(Op::Mov { result, value })
        }
        "out" => {
            let [s] = exact::<1>(&opcode, operands, "'R'")?;
            Ok(Op::Out { source: get_reg(s)? })
        }
        "jnz" => {
            let [s, target] = exact::<2>(&opcode, operands, "'R label'")?;
            Ok(Op::Jnz { source: get_reg(s)?, target: target.to_string() })
        }
        _ => Err(DiagnosticKind::UnknownOpcode(opcode)),
    }
}

fn exact<'a, const N: usize>(
    opcode: &str,
    operands: &[&'a str],
    shape: &str,
) -> Result<[&'a str; N], DiagnosticKind> {
    <[&str; N]>::try_from(operands)
        .map_err(|_| DiagnosticKind::Malformed(format!("{opcode}: expected {shape}")))
}
