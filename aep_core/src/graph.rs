//! Memory graph layout.
//!
//! The rotating "memory graph" widget: a fixed set of nodes scattered on a
//! flattened sphere, each wired to one other node. The layout is generated
//! once per instantiation from a seed derived from the node count, and is
//! immutable afterward; the rendering layer owns rotation and hover state.

use crate::error::ConfigError;
use crate::sequence::SequenceGenerator;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Default node count of the landing-page graph.
pub const DEFAULT_NODE_COUNT: usize = 42;

/// Default sphere radius.
pub const DEFAULT_RADIUS: f64 = 2.2;

/// Layout seed stride: the generator is seeded with `count * 97`.
const SEED_STRIDE: i64 = 97;

/// A graph node with its 3D position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: u32,

    /// Position on the flattened sphere (y compressed to 60%)
    pub position: Vector3<f64>,
}

impl GraphNode {
    /// Mock commit count shown in the hover tooltip.
    pub fn commits(&self) -> u32 {
        20 + self.id % 7
    }
}

/// A directed edge between two node ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub from: u32,
    pub to: u32,
}

/// The generated memory graph.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryGraph {
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
}

impl MemoryGraph {
    /// Generates the default landing-page graph.
    pub fn generate() -> Self {
        Self::build(DEFAULT_NODE_COUNT, DEFAULT_RADIUS)
    }

    /// Generates a graph with an explicit node count and radius.
    pub fn with_layout(count: usize, radius: f64) -> Result<Self, ConfigError> {
        if count == 0 {
            return Err(ConfigError::ZeroCount { what: "node" });
        }
        Ok(Self::build(count, radius))
    }

    fn build(count: usize, radius: f64) -> Self {
        let mut rand = SequenceGenerator::new(count as i64 * SEED_STRIDE);

        // Draw order per node is phi, theta, radius scale; edge draws
        // follow after all nodes. Reordering changes every layout.
        let nodes: Vec<GraphNode> = (0..count)
            .map(|i| {
                let phi = (2.0 * rand.next_f64() - 1.0).acos();
                let theta = rand.next_f64() * PI * 2.0;
                let r = radius * (0.6 + rand.next_f64() * 0.4);
                GraphNode {
                    id: i as u32,
                    position: Vector3::new(
                        r * phi.sin() * theta.cos(),
                        r * phi.cos() * 0.6,
                        r * phi.sin() * theta.sin(),
                    ),
                }
            })
            .collect();

        let edges = (0..count)
            .filter_map(|a| {
                let b = rand.next_index(count);
                (a != b).then(|| GraphEdge {
                    from: a as u32,
                    to: b as u32,
                })
            })
            .collect();

        Self { nodes, edges }
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_shape() {
        let graph = MemoryGraph::generate();
        assert_eq!(graph.nodes().len(), DEFAULT_NODE_COUNT);

        for node in graph.nodes() {
            let p = &node.position;
            // Radial scale is within [0.6r, r]; y additionally compressed.
            let horizontal = (p.x * p.x + p.z * p.z).sqrt();
            assert!(horizontal <= DEFAULT_RADIUS + 1e-9);
            assert!(p.y.abs() <= DEFAULT_RADIUS * 0.6 + 1e-9);
        }
    }

    #[test]
    fn test_edges_reference_valid_nodes_without_self_loops() {
        let graph = MemoryGraph::generate();
        assert!(!graph.edges().is_empty());
        assert!(graph.edges().len() <= DEFAULT_NODE_COUNT);

        for edge in graph.edges() {
            assert!((edge.from as usize) < DEFAULT_NODE_COUNT);
            assert!((edge.to as usize) < DEFAULT_NODE_COUNT);
            assert_ne!(edge.from, edge.to);
        }
    }

    #[test]
    fn test_layout_is_deterministic_per_count() {
        assert_eq!(MemoryGraph::generate(), MemoryGraph::generate());

        // A different node count reseeds the layout entirely.
        let small = MemoryGraph::with_layout(10, DEFAULT_RADIUS).unwrap();
        let other = MemoryGraph::with_layout(11, DEFAULT_RADIUS).unwrap();
        assert_ne!(small.nodes()[0].position, other.nodes()[0].position);
    }

    #[test]
    fn test_commit_annotation_range() {
        for node in MemoryGraph::generate().nodes() {
            assert!((20..27).contains(&node.commits()));
        }
    }

    #[test]
    fn test_zero_nodes_rejected() {
        assert_eq!(
            MemoryGraph::with_layout(0, 1.0).unwrap_err(),
            ConfigError::ZeroCount { what: "node" }
        );
    }
}
