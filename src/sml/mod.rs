pub mod asm;
pub mod errors;
pub mod instruction;
pub mod labels;
pub mod machine;
pub mod registers;

pub use errors::ExecError;
pub use instruction::{ControlTransfer, Instruction, Op};
pub use labels::Labels;
pub use machine::{Halt, Machine, Program, Status};
pub use registers::{Register, Registers};
