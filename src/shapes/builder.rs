//! Turns an ordered descriptor sequence into a [`ShapeGraph`].

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::model::descriptor::PropertyDescriptor;
use crate::model::iri::{ShapeIriAllocator, ShapeKey};
use crate::model::shapes::{NodeShape, PropertyShape, ShapeGraph, ValueConstraint};

/// Accumulates one node shape per owner class and one property shape per
/// (owner class, property) pair.
pub struct ShapeBuilder {
    allocator: ShapeIriAllocator,
    graph: ShapeGraph,
    // First descriptor seen for each (owner, property), for conflict reports.
    seen: HashMap<(String, String), PropertyDescriptor>,
}

impl ShapeBuilder {
    pub fn new(allocator: ShapeIriAllocator) -> Self {
        Self {
            allocator,
            graph: ShapeGraph::new(),
            seen: HashMap::new(),
        }
    }

    /// Build the shape graph for `descriptors` in one go.
    pub fn build(
        allocator: ShapeIriAllocator,
        descriptors: &[PropertyDescriptor],
    ) -> Result<ShapeGraph> {
        let mut builder = Self::new(allocator);
        for descriptor in descriptors {
            builder.add(descriptor)?;
        }
        Ok(builder.finish())
    }

    /// Add one descriptor.
    ///
    /// An identical repeat is a no-op. A repeat with a different cardinality
    /// or target fails with [`Error::ConflictingDescriptor`].
    pub fn add(&mut self, descriptor: &PropertyDescriptor) -> Result<()> {
        let key = (
            descriptor.owner_class.clone(),
            descriptor.property.clone(),
        );
        if let Some(first) = self.seen.get(&key) {
            if first == descriptor {
                return Ok(());
            }
            return Err(Error::ConflictingDescriptor {
                owner: descriptor.owner_class.clone(),
                property: descriptor.property.clone(),
                first: first.to_string(),
                second: descriptor.to_string(),
            });
        }

        let class = &descriptor.owner_class;
        if self.graph.node_shape(class).is_none() {
            let iri = self.allocator.allocate(ShapeKey::Node {
                class: class.clone(),
            })?;
            self.graph
                .insert_node_shape(NodeShape::new(iri, class.clone()));
        }

        let iri = self.allocator.allocate(ShapeKey::Property {
            class: class.clone(),
            property: descriptor.property.clone(),
        })?;
        let shape = PropertyShape {
            iri,
            path: descriptor.property.clone(),
            min_count: descriptor.cardinality.min,
            max_count: descriptor.cardinality.max,
            constraint: ValueConstraint::from(&descriptor.target),
        };
        if let Some(node) = self.graph.node_shape_mut(class) {
            node.properties.insert(descriptor.property.clone(), shape);
        }
        self.seen.insert(key, descriptor.clone());
        Ok(())
    }

    pub fn finish(self) -> ShapeGraph {
        self.graph
    }
}
