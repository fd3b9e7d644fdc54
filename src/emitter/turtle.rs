use std::collections::BTreeMap;
use std::io::{self, Write};

use super::{is_blank, TriplesEmitter};

/// Turtle format emitter with prefix support.
///
/// Writes one triple per line; prefixes are declared once, sorted, before
/// the first triple.
pub struct TurtleEmitter<W: Write> {
    writer: W,
    count: u64,
    blank_nodes: u64,
    prefixes: BTreeMap<String, String>,
    prefix_written: bool,
}

impl<W: Write> TurtleEmitter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            count: 0,
            blank_nodes: 0,
            prefixes: BTreeMap::new(),
            prefix_written: false,
        }
    }

    /// Write all registered prefixes (called before first triple).
    fn write_prefixes(&mut self) -> io::Result<()> {
        if self.prefix_written {
            return Ok(());
        }
        self.prefix_written = true;
        for (prefix, iri) in &self.prefixes {
            writeln!(self.writer, "@prefix {prefix}: <{iri}> .")?;
        }
        if !self.prefixes.is_empty() {
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn is_local_name(local: &str) -> bool {
        let mut chars = local.chars();
        match chars.next() {
            Some(first) if first.is_alphanumeric() || first == '_' => {
                chars.all(|c| c.is_alphanumeric() || c == '_' || c == '-')
            }
            _ => false,
        }
    }

    /// Try to compact an IRI using registered prefixes.
    fn compact_iri(&self, iri: &str) -> String {
        if is_blank(iri) {
            return iri.to_string();
        }
        // Find longest matching prefix
        let mut best: Option<(&str, &str)> = None;
        for (prefix, ns) in &self.prefixes {
            if iri.starts_with(ns.as_str())
                && best.is_none_or(|(_, prev_ns)| ns.len() > prev_ns.len())
            {
                best = Some((prefix.as_str(), ns.as_str()));
            }
        }
        if let Some((prefix, ns)) = best {
            let local = &iri[ns.len()..];
            if Self::is_local_name(local) {
                return format!("{prefix}:{local}");
            }
        }
        format!("<{iri}>")
    }

    fn escape_literal(s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        for c in s.chars() {
            match c {
                '\\' => out.push_str("\\\\"),
                '"' => out.push_str("\\\""),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                _ => out.push(c),
            }
        }
        out
    }
}

impl<W: Write> TriplesEmitter for TurtleEmitter<W> {
    fn emit_iri(&mut self, subject: &str, predicate: &str, object: &str) -> io::Result<()> {
        self.write_prefixes()?;
        let s = self.compact_iri(subject);
        let p = self.compact_iri(predicate);
        let o = self.compact_iri(object);
        writeln!(self.writer, "{s} {p} {o} .")?;
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
        self.write_prefixes()?;
        let s = self.compact_iri(subject);
        let p = self.compact_iri(predicate);
        let dt = self.compact_iri(datatype);
        let escaped = Self::escape_literal(value);
        writeln!(self.writer, "{s} {p} \"{escaped}\"^^{dt} .")?;
        self.count += 1;
        Ok(())
    }

    fn blank_node(&mut self) -> String {
        self.blank_nodes += 1;
        format!("_:b{}", self.blank_nodes)
    }

    fn add_prefix(&mut self, prefix: &str, iri: &str) {
        self.prefixes.insert(prefix.to_string(), iri.to_string());
    }

    fn flush(&mut self) -> io::Result<()> {
        // An empty graph still declares its prefixes.
        self.write_prefixes()?;
        self.writer.flush()
    }

    fn triple_count(&self) -> u64 {
        self.count
    }
}
