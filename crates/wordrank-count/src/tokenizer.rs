use std::io::{self, BufRead};
use wordrank_core::{OverlongPolicy, RankConfig};

/// Word tokenizer: extracts maximal runs of ASCII letters and lowercases them.
///
/// Every byte outside `A-Z`/`a-z` ends the current run, including digits,
/// apostrophes, hyphens and any non-ASCII byte. "co-operate don't" yields
/// `co`, `operate`, `don`, `t`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenizer {
    max_word_len: Option<usize>,
    overlong: OverlongPolicy,
}

impl Tokenizer {
    /// A tokenizer with no length limit.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &RankConfig) -> Self {
        Self {
            max_word_len: config.max_word_len,
            overlong: config.overlong,
        }
    }

    /// Limit on letters per token. `None` disables the limit.
    pub fn max_word_len(mut self, max_word_len: Option<usize>) -> Self {
        self.max_word_len = max_word_len;
        self
    }

    /// What to do with runs longer than `max_word_len`.
    pub fn overlong(mut self, policy: OverlongPolicy) -> Self {
        self.overlong = policy;
        self
    }

    /// Tokenize a string into lowercase words with no length limit.
    pub fn tokenize(input: &str) -> Vec<String> {
        Self::new().words(input).collect()
    }

    /// Lazily tokenize in-memory text.
    pub fn words<'a>(&self, text: &'a str) -> Words<'a> {
        Words {
            bytes: text.as_bytes(),
            pos: 0,
            run: self.run_buffer(),
        }
    }

    /// Lazily tokenize a buffered reader. Runs spanning buffer refills are
    /// joined into a single token.
    pub fn stream<R: BufRead>(&self, reader: R) -> StreamWords<R> {
        StreamWords {
            reader,
            run: self.run_buffer(),
            done: false,
        }
    }

    fn run_buffer(&self) -> RunBuffer {
        RunBuffer {
            buf: Vec::new(),
            max_len: self.max_word_len,
            policy: self.overlong,
            overflowed: false,
            overlong_runs: 0,
        }
    }
}

/// Accumulates the current letter run and applies the overlong policy.
#[derive(Debug)]
struct RunBuffer {
    buf: Vec<u8>,
    max_len: Option<usize>,
    policy: OverlongPolicy,
    overflowed: bool,
    overlong_runs: u64,
}

impl RunBuffer {
    /// Feed one letter. Returns a finished chunk only under `Split`.
    fn push(&mut self, byte: u8) -> Option<String> {
        if let Some(max) = self.max_len {
            if self.buf.len() >= max {
                if !self.overflowed {
                    self.overflowed = true;
                    self.overlong_runs += 1;
                }
                match self.policy {
                    OverlongPolicy::Truncate | OverlongPolicy::Skip => return None,
                    OverlongPolicy::Split => {
                        let chunk = self.take();
                        self.buf.push(byte.to_ascii_lowercase());
                        return Some(chunk);
                    }
                }
            }
        }
        self.buf.push(byte.to_ascii_lowercase());
        None
    }

    /// End the current run, returning its token if one should be emitted.
    fn finish(&mut self) -> Option<String> {
        let overflowed = std::mem::take(&mut self.overflowed);
        if self.buf.is_empty() {
            return None;
        }
        if overflowed && self.policy == OverlongPolicy::Skip {
            self.buf.clear();
            return None;
        }
        Some(self.take())
    }

    fn take(&mut self) -> String {
        // Only ASCII letters ever reach the buffer.
        let token = self.buf.iter().map(|&b| char::from(b)).collect();
        self.buf.clear();
        token
    }
}

/// Iterator over the words of an in-memory string.
#[derive(Debug)]
pub struct Words<'a> {
    bytes: &'a [u8],
    pos: usize,
    run: RunBuffer,
}

impl Words<'_> {
    /// Runs that exceeded the length limit so far.
    pub fn overlong_runs(&self) -> u64 {
        self.run.overlong_runs
    }
}

impl Iterator for Words<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        while self.pos < self.bytes.len() {
            let byte = self.bytes[self.pos];
            self.pos += 1;
            if byte.is_ascii_alphabetic() {
                if let Some(chunk) = self.run.push(byte) {
                    return Some(chunk);
                }
            } else if let Some(word) = self.run.finish() {
                return Some(word);
            }
        }
        self.run.finish()
    }
}

/// Iterator over the words of a buffered reader.
///
/// Yields `Err` once if the reader fails and then stops.
#[derive(Debug)]
pub struct StreamWords<R> {
    reader: R,
    run: RunBuffer,
    done: bool,
}

impl<R> StreamWords<R> {
    /// Runs that exceeded the length limit so far.
    pub fn overlong_runs(&self) -> u64 {
        self.run.overlong_runs
    }
}

impl<R: BufRead> Iterator for StreamWords<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            let available = match self.reader.fill_buf() {
                Ok(buf) => buf,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            };

            if available.is_empty() {
                self.done = true;
                return self.run.finish().map(Ok);
            }

            let mut consumed = 0;
            let mut token = None;
            for &byte in available {
                consumed += 1;
                if byte.is_ascii_alphabetic() {
                    token = self.run.push(byte);
                } else {
                    token = self.run.finish();
                }
                if token.is_some() {
                    break;
                }
            }
            self.reader.consume(consumed);

            if let Some(token) = token {
                return Some(Ok(token));
            }
        }
        None
    }
}
