//! Interactive read-eval loop over one owned machine state.

use std::io::{self, BufRead, Write};

use thiserror::Error;
use tiny8_core::{disassemble_window, run, step_one, CpuState, NullTrace, TraceSink};

use crate::command::Command;
use crate::config::ShellConfig;
use crate::hex::{format_byte, parse_hex_byte};

const PROMPT: &str = "> ";
const ADDR_PROMPT: &str = "addr> ";
const DATA_PROMPT: &str = "data> ";
const COUNT_PROMPT: &str = "count> ";

const DISASM_ROWS: usize = 8;

const HELP_TEXT: &str = "\
commands:
  step                   execute one instruction
  run                    execute count> instructions
  reset                  zero pc, acc and flags
  read | peek            print the byte at addr>
  write | poke           store data> at addr>
  stat | state | status  print the registers
  dis | disasm           disassemble 8 instructions from pc
  help                   show this list
  exit | quit            leave the shell";

/// Failure that ends a session.
#[derive(Debug, Error)]
pub enum ShellError {
    /// Reading commands or writing output failed.
    #[error("i/o failure: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Result of a sub-prompt.
enum Prompted {
    Byte(u8),
    Rejected,
    Closed,
}

/// One shell session: a machine state driven by lines from `input`.
pub struct Session<R, W> {
    input: R,
    output: W,
    state: CpuState,
    config: ShellConfig,
    sink: Box<dyn TraceSink>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Creates a session over a zeroed machine.
    #[must_use]
    pub fn new(input: R, output: W, config: ShellConfig) -> Self {
        Self {
            input,
            output,
            state: CpuState::new(),
            config,
            sink: Box::new(NullTrace),
        }
    }

    /// Routes engine trace events from `step` and `run` to `sink`.
    #[must_use]
    pub fn with_trace_sink(mut self, sink: Box<dyn TraceSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Returns the machine state.
    #[must_use]
    pub const fn state(&self) -> &CpuState {
        &self.state
    }

    /// Returns the machine state for preloading.
    pub const fn state_mut(&mut self) -> &mut CpuState {
        &mut self.state
    }

    /// Consumes the session and returns its output writer.
    #[must_use]
    pub fn into_output(self) -> W {
        self.output
    }

    /// Reads and executes commands until `exit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::Io`] when reading input or writing output fails.
    /// Malformed commands and operands are reported on the output and do not
    /// end the session.
    pub fn run(&mut self) -> Result<(), ShellError> {
        loop {
            let Some(line) = self.prompt_line(PROMPT)? else {
                return Ok(());
            };

            let flow = match Command::parse(&line) {
                Ok(command) => self.dispatch(command)?,
                Err(error) => {
                    writeln!(self.output, "{error}")?;
                    Flow::Continue
                }
            };

            if flow == Flow::Exit {
                return Ok(());
            }
        }
    }

    fn dispatch(&mut self, command: Command) -> Result<Flow, ShellError> {
        match command {
            Command::Empty => {}
            Command::Step => {
                step_one(&mut self.state, self.sink.as_mut());
            }
            Command::Run => {
                if let Some(count) = self.prompt_byte(COUNT_PROMPT)? {
                    let outcome = run(&mut self.state, u32::from(count), self.sink.as_mut());
                    writeln!(self.output, "ran {} steps", outcome.steps)?;
                }
            }
            Command::Reset => self.state.reset(),
            Command::Read => {
                if let Some(addr) = self.prompt_byte(ADDR_PROMPT)? {
                    let value = self.state.read_memory(addr);
                    writeln!(self.output, "{}", format_byte(value))?;
                }
            }
            Command::Write => {
                if let Some(addr) = self.prompt_byte(ADDR_PROMPT)? {
                    if let Some(value) = self.prompt_byte(DATA_PROMPT)? {
                        self.state.write_memory(addr, value);
                    }
                }
            }
            Command::Stat => {
                writeln!(self.output, "pc    : {}", format_byte(self.state.pc()))?;
                writeln!(self.output, "acc   : {}", format_byte(self.state.acc()))?;
                writeln!(self.output, "flags : {}", format_byte(self.state.flags()))?;
            }
            Command::Disasm => {
                for row in disassemble_window(self.state.pc(), DISASM_ROWS, &self.state.memory) {
                    writeln!(self.output, "{row}")?;
                }
            }
            Command::Help => writeln!(self.output, "{HELP_TEXT}")?,
            Command::Exit => return Ok(Flow::Exit),
        }

        Ok(Flow::Continue)
    }

    /// Prompts for one hex byte. `None` means the command is abandoned,
    /// either because the operand was rejected or input ended.
    fn prompt_byte(&mut self, prompt: &str) -> Result<Option<u8>, ShellError> {
        match self.prompt_operand(prompt)? {
            Prompted::Byte(value) => Ok(Some(value)),
            Prompted::Rejected | Prompted::Closed => Ok(None),
        }
    }

    fn prompt_operand(&mut self, prompt: &str) -> Result<Prompted, ShellError> {
        let Some(line) = self.prompt_line(prompt)? else {
            return Ok(Prompted::Closed);
        };

        match parse_hex_byte(&line) {
            Ok(value) => Ok(Prompted::Byte(value)),
            Err(error) => {
                writeln!(self.output, "error: {error}")?;
                Ok(Prompted::Rejected)
            }
        }
    }

    /// Writes `prompt` and reads one line without its terminator. `None` at
    /// end of input. Bytes that are not UTF-8 become replacement characters.
    fn prompt_line(&mut self, prompt: &str) -> Result<Option<String>, ShellError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut raw = Vec::new();
        if self.input.read_until(b'\n', &mut raw)? == 0 {
            return Ok(None);
        }

        let line = String::from_utf8_lossy(&raw)
            .trim_end_matches(['\n', '\r'])
            .to_string();
        if self.config.echo {
            writeln!(self.output, "{line}")?;
        }
        Ok(Some(line))
    }
}
