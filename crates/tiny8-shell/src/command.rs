use thiserror::Error;

/// A shell command word, resolved from its aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Execute one instruction.
    Step,
    /// Execute a prompted number of instructions.
    Run,
    /// Zero the registers.
    Reset,
    /// Print one memory cell.
    Read,
    /// Write one memory cell.
    Write,
    /// Print the registers.
    Stat,
    /// Disassemble from `PC`.
    Disasm,
    /// Print the command list.
    Help,
    /// Leave the shell.
    Exit,
    /// Blank line.
    Empty,
}

/// A line that names no known command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown command")]
pub struct UnknownCommand(pub String);

impl Command {
    /// Every command word the shell accepts, paired with its command.
    pub const WORDS: &'static [(&'static str, Self)] = &[
        ("step", Self::Step),
        ("run", Self::Run),
        ("reset", Self::Reset),
        ("read", Self::Read),
        ("peek", Self::Read),
        ("write", Self::Write),
        ("poke", Self::Write),
        ("stat", Self::Stat),
        ("state", Self::Stat),
        ("status", Self::Stat),
        ("dis", Self::Disasm),
        ("disasm", Self::Disasm),
        ("help", Self::Help),
        ("exit", Self::Exit),
        ("quit", Self::Exit),
    ];

    /// Resolves one input line. Surrounding whitespace is ignored; words are
    /// case-sensitive.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownCommand`] when the line is not blank and matches no
    /// command word.
    pub fn parse(line: &str) -> Result<Self, UnknownCommand> {
        let word = line.trim();
        if word.is_empty() {
            return Ok(Self::Empty);
        }

        Self::WORDS
            .iter()
            .find_map(|(name, command)| (*name == word).then_some(*command))
            .ok_or_else(|| UnknownCommand(word.to_string()))
    }
}
