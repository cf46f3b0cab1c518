//! A minimal demonstration harness for the bytecode interpreter, not a
//! general-purpose front end: it hand-assembles a tiny program with
//! `InstructionWriter` and runs it to completion against the console.
//! A real front end would compile `lang_core::parse_program` output
//! into a `lang_vm::bytecode::Program` instead.

use std::io::{stdin, stdout, BufReader};

use clap::Parser;
use lang_vm::bytecode::{InstructionWriter, Opcode, Procedure, Program};
use lang_vm::Interpreter;
use log::info;

#[derive(Parser, Debug)]
#[command(about = "Runs a small hand-assembled demo program against the bytecode interpreter")]
struct Args {
  /// Procedure index to start execution at.
  #[arg(long, default_value_t = 0)]
  entry: usize,

  /// Maximum number of instructions to execute before stopping.
  #[arg(long, default_value_t = 10_000)]
  max_cycles: u64,
}

/// `PRINT "Hello, " ++ Chr(87) ++ "orld!"`
fn demo_program() -> Program {
  let code = InstructionWriter::new()
    .op(Opcode::LoadConstantStringX)
    .string("Hello, ")
    .op(Opcode::LoadConstantA)
    .i64(87)
    .op(Opcode::SystemCall)
    .u16(0)
    .op(Opcode::SetYFromX)
    .op(Opcode::LoadConstantStringX)
    .string("Hello, ")
    .op(Opcode::StringXConcatenateY)
    .op(Opcode::SetYFromX)
    .op(Opcode::LoadConstantStringX)
    .string("orld!")
    .op(Opcode::StringXConcatenateY)
    .op(Opcode::StringPrint)
    .op(Opcode::Exit)
    .finish();
  Program::new(vec![Procedure::new("main", 0, 0, 0, 0, code)], Vec::new(), Vec::new())
}

fn main() {
  env_logger::init();
  let args = Args::parse();

  let program = demo_program();
  let mut interpreter = Interpreter::new(&program, Box::new(BufReader::new(stdin())), Box::new(stdout()));
  interpreter.syscalls.register(lang_vm::syscall::syscall_chr);

  if let Err(err) = interpreter.init(args.entry) {
    eprintln!("failed to start procedure {}: {err}", args.entry);
    std::process::exit(1);
  }

  loop {
    match interpreter.run(args.max_cycles) {
      Ok(true) => info!("cycle budget exhausted, resuming"),
      Ok(false) => break,
      Err(err) => {
        eprintln!("fatal interpreter error: {err}");
        std::process::exit(1);
      }
    }
  }

  if interpreter.has_error() {
    eprintln!("program ended with a pending error: {}", interpreter.error_message());
    std::process::exit(1);
  }
}
