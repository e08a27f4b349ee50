use std::io::{self, Write};

use tiny8_core::{TraceEvent, TraceSink};

/// Renders each trace event as one text line on a writer.
///
/// Tracing never interrupts execution: the first write failure is kept for
/// [`WriterTrace::take_error`] and later events are still attempted.
#[derive(Debug)]
pub struct WriterTrace<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> WriterTrace<W> {
    /// Wraps a writer.
    pub const fn new(out: W) -> Self {
        Self { out, error: None }
    }

    /// Returns the first write failure since the last call, if any.
    pub const fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    /// Returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Formats one trace event.
#[must_use]
pub fn format_event(event: &TraceEvent) -> String {
    match event {
        TraceEvent::InstructionStart { pc, raw } => format!("trace: fetch  {pc:02x}: {raw:02x}"),
        TraceEvent::MemoryWrite { addr, value } => format!("trace: write  [{addr:02x}] = {value:02x}"),
        TraceEvent::FlagsWrite { value } => format!("trace: flags  = {value:02x}"),
        TraceEvent::Jump { target } => format!("trace: jump   -> {target:02x}"),
        TraceEvent::UnknownOpcode { pc, raw } => {
            format!("trace: skip   {pc:02x}: {raw:02x} (unknown opcode)")
        }
        TraceEvent::InstructionRetired { pc, opcode } => {
            format!("trace: retire {pc:02x}: {}", opcode.mnemonic())
        }
    }
}

impl<W: Write> TraceSink for WriterTrace<W> {
    fn on_event(&mut self, event: TraceEvent) {
        if let Err(error) = writeln!(self.out, "{}", format_event(&event)) {
            self.error.get_or_insert(error);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::{self, Write};

    use tiny8_core::{Opcode, TraceEvent, TraceSink};

    use super::{format_event, WriterTrace};

    #[test]
    fn events_render_one_per_line() {
        let mut sink = WriterTrace::new(Vec::new());
        sink.on_event(TraceEvent::InstructionStart { pc: 0x00, raw: 0x21 });
        sink.on_event(TraceEvent::Jump { target: 0x40 });
        sink.on_event(TraceEvent::InstructionRetired {
            pc: 0x00,
            opcode: Opcode::Jmi,
        });

        let text = String::from_utf8(sink.into_inner()).expect("utf8 trace");
        assert_eq!(
            text,
            "trace: fetch  00: 21\ntrace: jump   -> 40\ntrace: retire 00: jmi\n"
        );
    }

    #[test]
    fn unknown_opcode_is_labelled() {
        assert_eq!(
            format_event(&TraceEvent::UnknownOpcode { pc: 0x10, raw: 0xFF }),
            "trace: skip   10: ff (unknown opcode)"
        );
    }

    #[test]
    fn writes_and_flags_show_values() {
        assert_eq!(
            format_event(&TraceEvent::MemoryWrite {
                addr: 0x80,
                value: 0x07
            }),
            "trace: write  [80] = 07"
        );
        assert_eq!(
            format_event(&TraceEvent::FlagsWrite { value: 0x01 }),
            "trace: flags  = 01"
        );
    }

    struct FailingWriter {
        attempts: usize,
    }

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            self.attempts += 1;
            let kind = if self.attempts == 1 {
                io::ErrorKind::BrokenPipe
            } else {
                io::ErrorKind::Other
            };
            Err(io::Error::new(kind, "stderr gone"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn first_write_failure_is_kept_and_later_events_still_attempted() {
        let mut sink = WriterTrace::new(FailingWriter { attempts: 0 });
        sink.on_event(TraceEvent::Jump { target: 0x01 });
        sink.on_event(TraceEvent::Jump { target: 0x02 });

        let error = sink.take_error().expect("failure recorded");
        assert_eq!(error.kind(), io::ErrorKind::BrokenPipe);
        assert!(sink.take_error().is_none());
        assert_eq!(sink.into_inner().attempts, 2);
    }

    #[test]
    fn successful_writes_record_no_error() {
        let mut sink = WriterTrace::new(Vec::new());
        sink.on_event(TraceEvent::FlagsWrite { value: 0x00 });
        assert!(sink.take_error().is_none());
    }
}
