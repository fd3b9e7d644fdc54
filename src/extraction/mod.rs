pub mod annotation;
pub mod cardinality;
pub mod extractor;
