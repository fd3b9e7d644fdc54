use std::io::{self, Write};

use super::{is_blank, TriplesEmitter};

/// N-Triples format emitter. Streams triples as `<s> <p> <o> .` lines.
pub struct NTriplesEmitter<W: Write> {
    writer: W,
    count: u64,
    blank_nodes: u64,
}

impl<W: Write> NTriplesEmitter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            count: 0,
            blank_nodes: 0,
        }
    }

    fn node(term: &str) -> String {
        if is_blank(term) {
            term.to_string()
        } else {
            format!("<{term}>")
        }
    }

    /// Escape a string for N-Triples literal (per RDF 1.1 N-Triples spec).
    fn escape_literal(s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        for c in s.chars() {
            match c {
                '\\' => out.push_str("\\\\"),
                '"' => out.push_str("\\\""),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                c if (c as u32) < 0x20 => {
                    // Control chars: \uXXXX
                    out.push_str(&format!("\\u{:04X}", c as u32));
                }
                _ => out.push(c),
            }
        }
        out
    }
}

impl<W: Write> TriplesEmitter for NTriplesEmitter<W> {
    fn emit_iri(&mut self, subject: &str, predicate: &str, object: &str) -> io::Result<()> {
        let (s, o) = (Self::node(subject), Self::node(object));
        writeln!(self.writer, "{s} <{predicate}> {o} .")?;
        self.count += 1;
        Ok(())
    }

    fn emit_typed_literal(
        &mut self,
        subject: &str,
        predicate: &str,
        value: &str,
        datatype: &str,
    ) -> io::Result<()> {
        let s = Self::node(subject);
        let escaped = Self::escape_literal(value);
        writeln!(
            self.writer,
            "{s} <{predicate}> \"{escaped}\"^^<{datatype}> ."
        )?;
        self.count += 1;
        Ok(())
    }

    fn blank_node(&mut self) -> String {
        self.blank_nodes += 1;
        format!("_:b{}", self.blank_nodes)
    }

    fn add_prefix(&mut self, _prefix: &str, _iri: &str) {
        // N-Triples has no prefixes.
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    fn triple_count(&self) -> u64 {
        self.count
    }
}
