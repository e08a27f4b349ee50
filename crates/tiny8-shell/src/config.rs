/// Shell configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShellConfig {
    /// Print engine trace events to stderr.
    pub trace: bool,
    /// Echo every input line after the prompt, for piped scripts.
    pub echo: bool,
}
