// sml/machine.rs
use std::fmt;

use super::errors::ExecError;
use super::instruction::{ControlTransfer, Instruction};
use super::labels::Labels;
use super::registers::Registers;

/// The translated program: an index-addressable instruction sequence.
pub type Program = Vec<Instruction>;

/// Where the machine is in its run lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Idle,
    Running,
    Halted(Halt),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Halt {
    /// The program counter ran off the end of the program.
    Normal,
    /// A fatal fault stopped execution mid-program.
    Fault,
}

/// The context a program runs in: the instruction list, its labels, the
/// 8-register file, the program counter, and the buffered `out` emissions.
///
/// Single-threaded by construction; `execute` runs to completion on the
/// calling thread.
#[derive(Debug, Clone)]
pub struct Machine {
    program: Program,
    labels: Labels,
    registers: Registers,
    counter: usize,
    status: Status,
    output: Vec<String>,
}

impl Machine {
    pub fn new(program: Program, labels: Labels) -> Self {
        Machine {
            program,
            labels,
            registers: Registers::new(),
            counter: 0,
            status: Status::Idle,
            output: Vec::new(),
        }
    }

    /// Runs the program from instruction 0 with a zeroed register file.
    ///
    /// Each applied instruction either advances the counter by one or jumps
    /// to a label's index; execution ends normally once the counter leaves
    /// the program. A fault halts the machine with state frozen at the last
    /// applied instruction and is propagated to the caller. Repeated calls
    /// are idempotent because counter, registers, and output reset at entry.
    /// There is no step limit: a program that always jumps back never returns.
    pub fn execute(&mut self) -> Result<(), ExecError> {
        self.counter = 0;
        self.registers.clear();
        self.output.clear();
        self.status = Status::Running;

        while self.counter < self.program.len() {
            let ins = &self.program[self.counter];
            let transfer = match ins.op().apply(&mut self.registers, &self.labels, &mut self.output)
            {
                Ok(t) => t,
                Err(fault) => {
                    self.status = Status::Halted(Halt::Fault);
                    return Err(fault);
                }
            };
            self.counter = match transfer {
                ControlTransfer::Advance => self.counter + 1,
                ControlTransfer::Jump(address) => address,
            };
        }

        self.status = Status::Halted(Halt::Normal);
        Ok(())
    }

    pub fn program(&self) -> &[Instruction] {
        &self.program
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    pub fn counter(&self) -> usize {
        self.counter
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Lines emitted by `out` instructions during the last `execute`,
    /// in execution order.
    pub fn output(&self) -> &[String] {
        &self.output
    }
}

/// Machine state is its labels, program, registers, and counter. Run
/// lifecycle and buffered output stay out of the comparison.
impl PartialEq for Machine {
    fn eq(&self, other: &Self) -> bool {
        self.labels == other.labels
            && self.program == other.program
            && self.registers == other.registers
            && self.counter == other.counter
    }
}

impl fmt::Display for Machine {
    /// The program listing, one rendered instruction per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let listing = self
            .program
            .iter()
            .map(Instruction::to_string)
            .collect::<Vec<_>>()
            .join("\n");
        f.write_str(&listing)
    }
}
