//! Neural orbit point fields.
//!
//! Data for the hero-section backdrop: an interactive node cloud with
//! proximity connections, and a dense star shell behind it. Both fields
//! are generated once from fixed seeds so the backdrop is identical on
//! every load; wobble, bloom and pointer response belong to the renderer.

use crate::error::ConfigError;
use crate::sequence::SequenceGenerator;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Seed of the interactive node field.
pub const ORBIT_SEED: i64 = 42;

/// Default interactive node count.
pub const DEFAULT_ORBIT_NODE_COUNT: usize = 50;

/// Default orbit shell radius.
pub const DEFAULT_ORBIT_RADIUS: f64 = 2.5;

/// Nodes closer than this are connected.
pub const CONNECTION_RANGE: f64 = 1.2;

/// One node of the interactive field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrbitNode {
    /// Position on the flattened shell (y compressed to 30%)
    pub position: Vector3<f64>,

    /// Pulse phase in `[0, 1)`, sampled at generation time
    pub activity: f64,
}

/// The interactive node field with its proximity connections.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitField {
    nodes: Vec<OrbitNode>,

    /// Unordered connected pairs, stored with the lower index first
    connections: Vec<(usize, usize)>,
}

impl OrbitField {
    /// Generates the default hero-section field.
    pub fn generate() -> Self {
        Self::build(DEFAULT_ORBIT_NODE_COUNT, DEFAULT_ORBIT_RADIUS)
    }

    /// Generates a field with an explicit node count and radius.
    pub fn with_layout(count: usize, radius: f64) -> Result<Self, ConfigError> {
        if count == 0 {
            return Err(ConfigError::ZeroCount { what: "node" });
        }
        Ok(Self::build(count, radius))
    }

    fn build(count: usize, radius: f64) -> Self {
        let mut rand = SequenceGenerator::new(ORBIT_SEED);

        // Draw order per node: theta, phi, radius offset, activity.
        let nodes: Vec<OrbitNode> = (0..count)
            .map(|_| {
                let theta = rand.next_f64() * PI * 2.0;
                let phi = (2.0 * rand.next_f64() - 1.0).acos();
                let r = radius + rand.next_f64() * 0.5;
                OrbitNode {
                    position: Vector3::new(
                        r * phi.sin() * theta.cos(),
                        r * phi.cos() * 0.3,
                        r * phi.sin() * theta.sin(),
                    ),
                    activity: rand.next_f64(),
                }
            })
            .collect();

        let mut connections = Vec::new();
        for i in 0..nodes.len() {
            for j in (i + 1)..nodes.len() {
                let distance = (nodes[i].position - nodes[j].position).norm();
                if distance < CONNECTION_RANGE {
                    connections.push((i, j));
                }
            }
        }

        Self { nodes, connections }
    }

    pub fn nodes(&self) -> &[OrbitNode] {
        &self.nodes
    }

    pub fn connections(&self) -> &[(usize, usize)] {
        &self.connections
    }
}

/// Configuration of the background star shell.
#[derive(Debug, Clone)]
pub struct StarFieldConfig {
    /// Inner shell radius
    pub radius: f64,

    /// Shell thickness
    pub depth: f64,

    /// Star count
    pub count: usize,

    /// Vertical flattening divisor
    pub factor: f64,
}

impl Default for StarFieldConfig {
    fn default() -> Self {
        Self {
            radius: 1.8,
            depth: 2.5,
            count: 6_000,
            factor: 3.0,
        }
    }
}

impl StarFieldConfig {
    /// Layout seed: derived from count and radius so distinct shells get
    /// distinct (but stable) distributions.
    fn seed(&self) -> i64 {
        (self.count as f64 + self.radius * 1_000.0) as i64
    }
}

/// The generated star shell.
#[derive(Debug, Clone, PartialEq)]
pub struct StarField {
    positions: Vec<Vector3<f64>>,
}

impl StarField {
    /// Generates the default backdrop shell.
    pub fn generate() -> Self {
        Self::build(&StarFieldConfig::default())
    }

    /// Generates a shell from an explicit configuration.
    pub fn with_config(config: &StarFieldConfig) -> Result<Self, ConfigError> {
        if config.count == 0 {
            return Err(ConfigError::ZeroCount { what: "star" });
        }
        Ok(Self::build(config))
    }

    fn build(config: &StarFieldConfig) -> Self {
        let mut rand = SequenceGenerator::new(config.seed());

        // Draw order per star: radius offset, theta, phi.
        let positions = (0..config.count)
            .map(|_| {
                let r = config.radius + rand.next_f64() * config.depth;
                let theta = rand.next_f64() * PI * 2.0;
                let phi = (2.0 * rand.next_f64() - 1.0).acos();
                Vector3::new(
                    r * phi.sin() * theta.cos(),
                    r * phi.cos() / config.factor,
                    r * phi.sin() * theta.sin(),
                )
            })
            .collect();

        Self { positions }
    }

    pub fn positions(&self) -> &[Vector3<f64>] {
        &self.positions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orbit_field_shape() {
        let field = OrbitField::generate();
        assert_eq!(field.nodes().len(), DEFAULT_ORBIT_NODE_COUNT);

        for node in field.nodes() {
            assert!((0.0..1.0).contains(&node.activity));
            // Shell radius is within [radius, radius + 0.5].
            let p = &node.position;
            let horizontal = (p.x * p.x + p.z * p.z).sqrt();
            assert!(horizontal <= DEFAULT_ORBIT_RADIUS + 0.5 + 1e-9);
        }
    }

    #[test]
    fn test_connections_are_within_range_and_deduplicated() {
        let field = OrbitField::generate();
        for &(i, j) in field.connections() {
            assert!(i < j);
            let distance = (field.nodes()[i].position - field.nodes()[j].position).norm();
            assert!(distance < CONNECTION_RANGE);
        }
    }

    #[test]
    fn test_orbit_field_is_stable_across_generations() {
        assert_eq!(OrbitField::generate(), OrbitField::generate());
    }

    #[test]
    fn test_star_shell_radii() {
        let config = StarFieldConfig::default();
        let field = StarField::generate();
        assert_eq!(field.positions().len(), config.count);

        for p in field.positions() {
            // Undo the vertical flattening before checking the shell bounds.
            let r = (p.x * p.x + (p.y * config.factor).powi(2) + p.z * p.z).sqrt();
            assert!(r >= config.radius - 1e-9);
            assert!(r <= config.radius + config.depth + 1e-9);
        }
    }

    #[test]
    fn test_star_field_determinism_and_reseeding() {
        assert_eq!(StarField::generate(), StarField::generate());

        let near = StarField::with_config(&StarFieldConfig {
            radius: 1.9,
            count: 64,
            ..StarFieldConfig::default()
        })
        .unwrap();
        let far = StarField::with_config(&StarFieldConfig {
            radius: 2.0,
            count: 64,
            ..StarFieldConfig::default()
        })
        .unwrap();
        assert_ne!(near.positions()[0], far.positions()[0]);
    }

    #[test]
    fn test_empty_fields_rejected() {
        assert!(OrbitField::with_layout(0, 1.0).is_err());
        assert!(StarField::with_config(&StarFieldConfig {
            count: 0,
            ..StarFieldConfig::default()
        })
        .is_err());
    }
}
