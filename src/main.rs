mod sml;

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use sml::Machine;
use sml::asm::translate;

/// Runs an SML program: translate the source file, execute it, and report
/// the machine's final state.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Path to the program source.
    program: PathBuf,

    /// Print the translated program listing before executing.
    #[arg(long)]
    listing: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error reading {}: {e}", args.program.display());
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> io::Result<ExitCode> {
    let reader = BufReader::new(File::open(&args.program)?);
    let translation = translate(reader.lines())?;

    for diagnostic in &translation.diagnostics {
        eprintln!("{}: {diagnostic}", args.program.display());
    }

    let mut machine = Machine::new(translation.program, translation.labels);
    println!("Program has {} instructions.", machine.program().len());
    if args.listing {
        println!("{machine}");
        if !machine.labels().is_empty() {
            println!("Labels: {}", machine.labels());
        }
    }

    let result = machine.execute();
    for line in machine.output() {
        println!("{line}");
    }
    println!("Registers: {}", machine.registers());

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(fault) => {
            eprintln!("halted at instruction {}: {fault}", machine.counter());
            Ok(ExitCode::FAILURE)
        }
    }
}
