// Decorative neural-network background

use crate::dom::Element;
use rand::Rng;
use tracing::debug;

pub const NODE_COUNT: usize = 25;
pub const CONNECTION_COUNT: usize = 40;

/// Node sizes fall in [MIN_NODE_SIZE, MIN_NODE_SIZE + NODE_SIZE_SPREAD).
pub const MIN_NODE_SIZE: f64 = 5.0;
pub const NODE_SIZE_SPREAD: f64 = 15.0;

/// Each velocity component falls in [-MAX_SPEED, MAX_SPEED), px per frame.
pub const MAX_SPEED: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NetworkNode {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub dx: f64,
    pub dy: f64,
}

impl NetworkNode {
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.size / 2.0, self.y + self.size / 2.0)
    }

    /// Advance one frame and reflect off the viewport edges.
    ///
    /// The position is not clamped, so a node may sit just past an edge for
    /// one frame before heading back.
    fn step(&mut self, viewport: Viewport) {
        self.x += self.dx;
        self.y += self.dy;

        if self.x < 0.0 || self.x > viewport.width {
            self.dx = -self.dx;
        }
        if self.y < 0.0 || self.y > viewport.height {
            self.dy = -self.dy;
        }
    }
}

/// A segment frozen at the node centers it was created from.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkConnection {
    pub from: usize,
    pub to: usize,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub thickness: f64,
}

impl NetworkConnection {
    pub fn length(&self) -> f64 {
        (self.x2 - self.x1).hypot(self.y2 - self.y1)
    }

    pub fn angle_degrees(&self) -> f64 {
        (self.y2 - self.y1).atan2(self.x2 - self.x1).to_degrees()
    }
}

#[derive(Debug, Clone)]
pub struct NeuralNetwork {
    viewport: Viewport,
    nodes: Vec<NetworkNode>,
    connections: Vec<NetworkConnection>,
    frames: u64,
}

impl NeuralNetwork {
    /// Populate the background, or do nothing when the page has no
    /// animation container.
    pub fn initialize<R: Rng>(
        container: Option<&Element>,
        viewport: Viewport,
        rng: &mut R,
    ) -> Option<Self> {
        container?;

        let nodes: Vec<NetworkNode> = (0..NODE_COUNT)
            .map(|_| NetworkNode {
                size: rng.r#gen::<f64>() * NODE_SIZE_SPREAD + MIN_NODE_SIZE,
                x: rng.r#gen::<f64>() * viewport.width,
                y: rng.r#gen::<f64>() * viewport.height,
                dx: (rng.r#gen::<f64>() - 0.5) * 2.0 * MAX_SPEED,
                dy: (rng.r#gen::<f64>() - 0.5) * 2.0 * MAX_SPEED,
            })
            .collect();

        // Self-pairs are dropped rather than redrawn
        let mut connections = Vec::with_capacity(CONNECTION_COUNT);
        for _ in 0..CONNECTION_COUNT {
            let from = rng.gen_range(0..nodes.len());
            let to = rng.gen_range(0..nodes.len());
            if from == to {
                continue;
            }

            let (x1, y1) = nodes[from].center();
            let (x2, y2) = nodes[to].center();
            connections.push(NetworkConnection {
                from,
                to,
                x1,
                y1,
                x2,
                y2,
                thickness: rng.r#gen::<f64>() + 0.5,
            });
        }

        debug!(
            "Neural network initialized: {} nodes, {} connections",
            nodes.len(),
            connections.len()
        );

        Some(Self {
            viewport,
            nodes,
            connections,
            frames: 0,
        })
    }

    /// One animation frame. Connections are left where they were drawn.
    pub fn step(&mut self) {
        let viewport = self.viewport;
        for node in &mut self.nodes {
            node.step(viewport);
        }
        self.frames += 1;
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn nodes(&self) -> &[NetworkNode] {
        &self.nodes
    }

    pub fn connections(&self) -> &[NetworkConnection] {
        &self.connections
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}
