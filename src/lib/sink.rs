//! Append-only classified-record output streams.
//!
//! Each evaluation run writes three streams: true positives, false
//! positives, and false negatives. All three begin with one shared header
//! block, followed by one record per line in commit order. Creating the
//! concrete destinations (files, buffers) is the caller's responsibility;
//! this module only appends to writers it is handed.

use std::io::{self, BufWriter, Write};

/// Classification of one variant record, used to route it to a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// A called variant that matches a baseline variant.
    TruePositive,
    /// A called variant with no matching baseline.
    FalsePositive,
    /// A baseline variant with no matching call.
    FalseNegative,
}

impl Classification {
    fn index(self) -> usize {
        match self {
            Classification::TruePositive => 0,
            Classification::FalsePositive => 1,
            Classification::FalseNegative => 2,
        }
    }
}

/// One append-only line-oriented record stream.
///
/// `close` is idempotent: the first call flushes and releases the underlying
/// writer, later calls are no-ops. Appending after close is a caller defect
/// and fails with an I/O error rather than panicking.
#[derive(Debug)]
pub struct RecordSink<W: Write> {
    writer: Option<BufWriter<W>>,
}

impl<W: Write> RecordSink<W> {
    /// Wrap a writer and emit the shared header block.
    ///
    /// The header is written exactly once, before any record. A header that
    /// does not end in a newline gets one appended.
    ///
    /// # Errors
    ///
    /// Returns an error if the header cannot be written.
    pub fn with_header(writer: W, header: &str) -> io::Result<Self> {
        let mut w = BufWriter::new(writer);
        w.write_all(header.as_bytes())?;
        if !header.ends_with('\n') {
            w.write_all(b"\n")?;
        }
        Ok(Self { writer: Some(w) })
    }

    /// Append one record as a line, preserving caller-supplied order.
    ///
    /// # Errors
    ///
    /// Returns an error on write failure or if the sink is already closed.
    pub fn append(&mut self, record: &str) -> io::Result<()> {
        let w = self
            .writer
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::BrokenPipe, "record sink is closed"))?;
        w.write_all(record.as_bytes())?;
        w.write_all(b"\n")
    }

    /// Flush and release the underlying writer. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error if the final flush fails; the writer is released
    /// either way.
    pub fn close(&mut self) -> io::Result<()> {
        match self.writer.take() {
            Some(mut w) => w.flush(),
            None => Ok(()),
        }
    }

    /// True once `close` has run.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.writer.is_none()
    }
}

impl<W: Write> Drop for RecordSink<W> {
    fn drop(&mut self) {
        // Best-effort flush on abnormal exit paths; errors surface only via
        // an explicit close().
        let _ = self.close();
    }
}

/// The three classified-record streams of one evaluation run.
#[derive(Debug)]
pub struct SplitSinks<W: Write> {
    sinks: [RecordSink<W>; 3],
}

impl<W: Write> SplitSinks<W> {
    /// Build the three streams, emitting the shared header to each.
    ///
    /// # Errors
    ///
    /// Returns an error if any header write fails.
    pub fn new(header: &str, tp: W, fp: W, r#fn: W) -> io::Result<Self> {
        Ok(Self {
            sinks: [
                RecordSink::with_header(tp, header)?,
                RecordSink::with_header(fp, header)?,
                RecordSink::with_header(r#fn, header)?,
            ],
        })
    }

    /// Append one record to the stream for its classification.
    ///
    /// # Errors
    ///
    /// Returns an error on write failure.
    pub fn append(&mut self, classification: Classification, record: &str) -> io::Result<()> {
        self.sinks[classification.index()].append(record)
    }

    /// Close all three streams, best-effort: every sink is flushed and
    /// released even if an earlier one fails, and the first failure is
    /// surfaced. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns the first close failure encountered.
    pub fn close(&mut self) -> io::Result<()> {
        let mut first_err = None;
        for sink in &mut self.sinks {
            if let Err(e) = sink.close() {
                first_err.get_or_insert(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
