pub mod descriptor;
pub mod graph;
pub mod iri;
pub mod shapes;
pub mod vocab;
