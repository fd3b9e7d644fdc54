pub mod ntriples;
pub mod shapes;
pub mod turtle;

use std::io;

use crate::model::vocab::standard;

/// Trait for emitting RDF triples in different serialization formats.
///
/// Subjects and objects are IRIs, or blank node labels (`_:b1`) obtained
/// from [`blank_node`](Self::blank_node).
pub trait TriplesEmitter {
    /// Emit a triple with an IRI (or blank node) object.
    fn emit_iri(&mut self, subject: &str, predicate: &str, object: &str) -> io::Result<()>;
    /// Emit a triple with a typed literal object.
    fn emit_typed_literal(
        &mut self,
        subject: &str,
        predicate: &str,
        value: &str,
        datatype: &str,
    ) -> io::Result<()>;
    /// Emit a triple with an `xsd:integer` literal object.
    fn emit_int(&mut self, subject: &str, predicate: &str, value: i64) -> io::Result<()> {
        self.emit_typed_literal(subject, predicate, &value.to_string(), standard::XSD_INTEGER)
    }
    /// Mint a fresh blank node label. Labels are numbered in call order.
    fn blank_node(&mut self) -> String;
    /// Register a namespace prefix (used by Turtle format).
    fn add_prefix(&mut self, prefix: &str, iri: &str);
    /// Flush any buffered output.
    fn flush(&mut self) -> io::Result<()>;
    /// Return the number of triples emitted so far.
    fn triple_count(&self) -> u64;
}

pub(crate) fn is_blank(term: &str) -> bool {
    term.starts_with("_:")
}
