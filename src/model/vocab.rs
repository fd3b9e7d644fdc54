//! RDF vocabulary constants used while reading ontologies and writing shapes.
//!
//! - `standard` -- RDF, RDFS, OWL and XSD terms
//! - `dc` -- Dublin Core documentation predicates
//! - `sh` -- the SHACL terms emitted for node and property shapes

/// Standard RDF/RDFS/OWL/XSD namespace URIs
pub mod standard {
    pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
    pub const OWL: &str = "http://www.w3.org/2002/07/owl#";
    pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";

    pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
    pub const RDF_FIRST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#first";
    pub const RDF_REST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#rest";
    pub const RDF_NIL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nil";
    pub const RDF_LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";
    pub const RDF_PLAIN_LITERAL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#PlainLiteral";
    pub const RDF_HTML: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#HTML";
    pub const RDF_XML_LITERAL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#XMLLiteral";
    pub const RDF_JSON: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#JSON";

    pub const RDFS_CLASS: &str = "http://www.w3.org/2000/01/rdf-schema#Class";
    pub const RDFS_LITERAL: &str = "http://www.w3.org/2000/01/rdf-schema#Literal";

    pub const OWL_CLASS: &str = "http://www.w3.org/2002/07/owl#Class";

    pub const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
}

/// Dublin Core documentation predicates
pub mod dc {
    pub const DESCRIPTION: &str = "http://purl.org/dc/elements/1.1/description";
    pub const TERMS_DESCRIPTION: &str = "http://purl.org/dc/terms/description";
}

/// SHACL core (`sh:` prefix)
pub mod sh {
    pub const PREFIX: &str = "sh";
    pub const NS: &str = "http://www.w3.org/ns/shacl#";

    // Classes
    pub const NODE_SHAPE: &str = "http://www.w3.org/ns/shacl#NodeShape";
    pub const PROPERTY_SHAPE: &str = "http://www.w3.org/ns/shacl#PropertyShape";

    // Node kinds
    pub const LITERAL: &str = "http://www.w3.org/ns/shacl#Literal";
    pub const BLANK_NODE_OR_IRI: &str = "http://www.w3.org/ns/shacl#BlankNodeOrIRI";

    // Predicates
    pub const TARGET_CLASS: &str = "http://www.w3.org/ns/shacl#targetClass";
    pub const PROPERTY: &str = "http://www.w3.org/ns/shacl#property";
    pub const PATH: &str = "http://www.w3.org/ns/shacl#path";
    pub const MIN_COUNT: &str = "http://www.w3.org/ns/shacl#minCount";
    pub const MAX_COUNT: &str = "http://www.w3.org/ns/shacl#maxCount";
    pub const DATATYPE: &str = "http://www.w3.org/ns/shacl#datatype";
    pub const CLASS: &str = "http://www.w3.org/ns/shacl#class";
    pub const NODE_KIND: &str = "http://www.w3.org/ns/shacl#nodeKind";
    pub const OR: &str = "http://www.w3.org/ns/shacl#or";
}

/// Whether `iri` names a literal datatype rather than a class of resources.
pub fn is_datatype(iri: &str) -> bool {
    if iri.starts_with(standard::XSD) {
        return true;
    }
    matches!(
        iri,
        standard::RDFS_LITERAL
            | standard::RDF_LANG_STRING
            | standard::RDF_PLAIN_LITERAL
            | standard::RDF_HTML
            | standard::RDF_XML_LITERAL
            | standard::RDF_JSON
    )
}
