use std::io::Write;
use wordrank_core::FrequencyEntry;

/// One word per line, optionally followed by a tab and its count.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainWriter {
    show_counts: bool,
}

impl PlainWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show_counts(mut self, show_counts: bool) -> Self {
        self.show_counts = show_counts;
        self
    }

    pub fn render(&self, entries: &[FrequencyEntry]) -> anyhow::Result<String> {
        let mut buf = Vec::new();
        self.write_to(&mut buf, entries)?;
        Ok(String::from_utf8(buf)?)
    }

    pub fn write_to(
        &self,
        writer: &mut dyn Write,
        entries: &[FrequencyEntry],
    ) -> anyhow::Result<()> {
        for entry in entries {
            if self.show_counts {
                writeln!(writer, "{}\t{}", entry.word, entry.count)?;
            } else {
                writeln!(writer, "{}", entry.word)?;
            }
        }
        Ok(())
    }
}
