// sml/instruction.rs
use std::fmt;

use super::errors::ExecError;
use super::labels::Labels;
use super::registers::{Register, Registers};

/// What an instruction asks the machine to do with the program counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlTransfer {
    /// Fall through to the next instruction.
    Advance,
    /// Continue at the given program index.
    Jump(usize),
}

/// The closed operation set of the language. Dispatch is a compile-time
/// match over these variants; there is no opcode lookup at run time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Add { result: Register, source: Register },
    Sub { result: Register, source: Register },
    Mul { result: Register, source: Register },
    Div { result: Register, source: Register },
    Mov { result: Register, value: i32 },
    Out { source: Register },
    Jnz { source: Register, target: String },
}

impl Op {
    pub fn opcode(&self) -> &'static str {
        match self {
            Op::Add { .. } => "add",
            Op::Sub { .. } => "sub",
            Op::Mul { .. } => "mul",
            Op::Div { .. } => "div",
            Op::Mov { .. } => "mov",
            Op::Out { .. } => "out",
            Op::Jnz { .. } => "jnz",
        }
    }

    /// Applies the operation to the machine state and reports where control
    /// goes next. Arithmetic wraps at 32 bits; `div` truncates toward zero
    /// and faults on a zero source. `jnz` resolves its target lazily, so an
    /// undefined label only faults when the jump is actually taken.
    pub fn apply(
        &self,
        regs: &mut Registers,
        labels: &Labels,
        out: &mut Vec<String>,
    ) -> Result<ControlTransfer, ExecError> {
        match *self {
            Op::Add { result, source } => {
                regs.set(result, regs.get(result).wrapping_add(regs.get(source)));
            }
            Op::Sub { result, source } => {
                regs.set(result, regs.get(result).wrapping_sub(regs.get(source)));
            }
            Op::Mul { result, source } => {
                regs.set(result, regs.get(result).wrapping_mul(regs.get(source)));
            }
            Op::Div { result, source } => {
                let lhs = regs.get(result);
                let rhs = regs.get(source);
                if rhs == 0 {
                    return Err(ExecError::Arithmetic { op: "div", lhs, rhs });
                }
                // wrapping_div: i32::MIN / -1 wraps rather than trapping
                regs.set(result, lhs.wrapping_div(rhs));
            }
            Op::Mov { result, value } => regs.set(result, value),
            Op::Out { source } => out.push(regs.get(source).to_string()),
            Op::Jnz { source, ref target } => {
                if regs.get(source) != 0 {
                    let address = labels
                        .address_of(target)
                        .ok_or_else(|| ExecError::LabelNotFound(target.clone()))?;
                    return Ok(ControlTransfer::Jump(address));
                }
            }
        }
        Ok(ControlTransfer::Advance)
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::Add { result, source }
            | Op::Sub { result, source }
            | Op::Mul { result, source }
            | Op::Div { result, source } => {
                write!(f, "{} {result} {source}", self.opcode())
            }
            Op::Mov { result, value } => write!(f, "mov {result} {value}"),
            Op::Out { source } => write!(f, "out {source}"),
            Op::Jnz { source, target } => write!(f, "jnz {source} {target}"),
        }
    }
}

/// One translated program line: the operation plus its optional label.
/// Immutable once built by the translator.
#[derive(Debug, Clone, Eq)]
pub struct Instruction {
    label: Option<String>,
    op: Op,
}

impl Instruction {
    pub fn new(label: Option<String>, op: Op) -> Self {
        Instruction { label, op }
    }

    pub fn unlabeled(op: Op) -> Self {
        Instruction { label: None, op }
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn op(&self) -> &Op {
        &self.op
    }
}

/// Behavioral identity: opcode + operands. The label is positional metadata
/// and stays out of the comparison.
impl PartialEq for Instruction {
    fn eq(&self, other: &Self) -> bool {
        self.op == other.op
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(f, "{label}: {}", self.op),
            None => self.op.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sml::registers::Register::*;

    fn apply(op: &Op, regs: &mut Registers) -> Result<ControlTransfer, ExecError> {
        let labels = Labels::new();
        let mut out = Vec::new();
        op.apply(regs, &labels, &mut out)
    }

    #[test]
    fn add_accumulates_into_result() {
        let mut regs = Registers::new();
        regs.set(Eax, 6);
        regs.set(Ebx, 5);
        let t = apply(&Op::Add { result: Eax, source: Ebx }, &mut regs).expect("apply");
        assert_eq!(t, ControlTransfer::Advance);
        assert_eq!(regs.get(Eax), 11);
        assert_eq!(regs.get(Ebx), 5);
    }

    #[test]
    fn sub_and_mul_update_in_place() {
        let mut regs = Registers::new();
        regs.set(Eax, 6);
        regs.set(Ecx, 2);
        apply(&Op::Sub { result: Eax, source: Ecx }, &mut regs).expect("sub");
        assert_eq!(regs.get(Eax), 4);
        apply(&Op::Mul { result: Eax, source: Ecx }, &mut regs).expect("mul");
        assert_eq!(regs.get(Eax), 8);
    }

    #[test]
    fn arithmetic_wraps_at_32_bits() {
        let mut regs = Registers::new();
        regs.set(Eax, i32::MAX);
        regs.set(Ebx, 1);
        apply(&Op::Add { result: Eax, source: Ebx }, &mut regs).expect("add");
        assert_eq!(regs.get(Eax), i32::MIN);
    }

    #[test]
    fn div_truncates_toward_zero() {
        let mut regs = Registers::new();
        regs.set(Eax, -7);
        regs.set(Ebx, 2);
        apply(&Op::Div { result: Eax, source: Ebx }, &mut regs).expect("div");
        assert_eq!(regs.get(Eax), -3);
    }

    #[test]
    fn div_by_zero_faults_and_leaves_registers_alone() {
        let mut regs = Registers::new();
        regs.set(Eax, 9);
        let err = apply(&Op::Div { result: Eax, source: Ebx }, &mut regs).unwrap_err();
        assert_eq!(err, ExecError::Arithmetic { op: "div", lhs: 9, rhs: 0 });
        assert_eq!(regs.get(Eax), 9);
    }

    #[test]
    fn mov_loads_the_literal() {
        let mut regs = Registers::new();
        apply(&Op::Mov { result: Esi, value: -12 }, &mut regs).expect("mov");
        assert_eq!(regs.get(Esi), -12);
    }

    #[test]
    fn out_emits_decimal_text() {
        let mut regs = Registers::new();
        regs.set(Ebx, 720);
        let labels = Labels::new();
        let mut out = Vec::new();
        Op::Out { source: Ebx }
            .apply(&mut regs, &labels, &mut out)
            .expect("out");
        assert_eq!(out, vec!["720".to_string()]);
    }

    #[test]
    fn jnz_zero_source_advances() {
        let mut regs = Registers::new();
        let op = Op::Jnz { source: Eax, target: "missing".to_string() };
        // Source is zero, so the undefined target is never resolved.
        assert_eq!(apply(&op, &mut regs).expect("jnz"), ControlTransfer::Advance);
    }

    #[test]
    fn jnz_nonzero_source_jumps_to_label_index() {
        let mut regs = Registers::new();
        regs.set(Eax, 1);
        let mut labels = Labels::new();
        labels.add("f3", 3).expect("add");
        let mut out = Vec::new();
        let t = Op::Jnz { source: Eax, target: "f3".to_string() }
            .apply(&mut regs, &labels, &mut out)
            .expect("jnz");
        assert_eq!(t, ControlTransfer::Jump(3));
    }

    #[test]
    fn jnz_nonzero_source_with_undefined_label_faults() {
        let mut regs = Registers::new();
        regs.set(Eax, 1);
        let err = apply(&Op::Jnz { source: Eax, target: "nowhere".to_string() }, &mut regs)
            .unwrap_err();
        assert_eq!(err, ExecError::LabelNotFound("nowhere".to_string()));
    }

    #[test]
    fn display_includes_label_prefix_only_when_present() {
        let bare = Instruction::unlabeled(Op::Mul { result: Ebx, source: Eax });
        let labeled = Instruction::new(
            Some("f3".to_string()),
            Op::Mul { result: Ebx, source: Eax },
        );
        assert_eq!(bare.to_string(), "mul EBX EAX");
        assert_eq!(labeled.to_string(), "f3: mul EBX EAX");
    }

    #[test]
    fn equality_ignores_the_label() {
        let a = Instruction::new(Some("f3".to_string()), Op::Out { source: Ebx });
        let b = Instruction::unlabeled(Op::Out { source: Ebx });
        let c = Instruction::unlabeled(Op::Out { source: Ecx });
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
