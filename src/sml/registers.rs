// sml/registers.rs
use std::fmt;

/// The 8 named registers of the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Register {
    Eax,
    Ebx,
    Ecx,
    Edx,
    Esp,
    Ebp,
    Esi,
    Edi,
}

impl Register {
    pub const ALL: [Register; 8] = [
        Register::Eax,
        Register::Ebx,
        Register::Ecx,
        Register::Edx,
        Register::Esp,
        Register::Ebp,
        Register::Esi,
        Register::Edi,
    ];

    /// Parses a register name token ("EAX", "ebx", ...).
    pub fn parse(s: &str) -> Option<Register> {
        match s.to_uppercase().as_str() {
            "EAX" => Some(Register::Eax),
            "EBX" => Some(Register::Ebx),
            "ECX" => Some(Register::Ecx),
            "EDX" => Some(Register::Edx),
            "ESP" => Some(Register::Esp),
            "EBP" => Some(Register::Ebp),
            "ESI" => Some(Register::Esi),
            "EDI" => Some(Register::Edi),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Register::Eax => "EAX",
            Register::Ebx => "EBX",
            Register::Ecx => "ECX",
            Register::Edx => "EDX",
            Register::Esp => "ESP",
            Register::Ebp => "EBP",
            Register::Esi => "ESI",
            Register::Edi => "EDI",
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The register file: every register always holds a value, zero after `clear`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registers {
    values: [i32; 8],
}

impl Registers {
    pub fn new() -> Self {
        Registers { values: [0; 8] }
    }

    /// Resets all 8 registers to zero.
    pub fn clear(&mut self) {
        self.values = [0; 8];
    }

    #[inline]
    pub fn get(&self, r: Register) -> i32 {
        self.values[r as usize]
    }

    #[inline]
    pub fn set(&mut self, r: Register, v: i32) {
        self.values[r as usize] = v;
    }
}

impl Default for Registers {
    fn default() -> Self {
        Registers::new()
    }
}

impl fmt::Display for Registers {
    /// "[EAX = 0, EBX = 0, ...]" in declaration order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = Register::ALL
            .iter()
            .map(|&r| format!("{} = {}", r, self.get(r)))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "[{body}]")
    }
}
