// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! BSP tree for CSG operations
//!
//! Nodes live in an arena and every traversal runs on an explicit work
//! stack, so tree depth never translates into call-stack depth. Depth is
//! still budgeted: past `max_depth` incoming polygons are stored unsplit on
//! the capped node.

use super::plane::Plane;
use super::polygon::{Polygon, SplitResult};

type NodeId = usize;

const ROOT: NodeId = 0;

#[derive(Debug, Clone, Default)]
struct BspNode {
    plane: Option<Plane>,
    front: Option<NodeId>,
    back: Option<NodeId>,
    polygons: Vec<Polygon>,
}

/// Binary space partition of a polygon soup
#[derive(Debug, Clone)]
pub struct BspTree {
    nodes: Vec<BspNode>,
    epsilon: f64,
    max_depth: usize,
    truncated: bool,
}

impl BspTree {
    pub fn new(polygons: Vec<Polygon>, epsilon: f64, max_depth: usize) -> Self {
        let mut tree = Self {
            nodes: vec![BspNode::default()],
            epsilon,
            max_depth,
            truncated: false,
        };
        tree.build(polygons);
        tree
    }

    /// True if the depth budget forced a leaf fallback
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.iter().all(|node| node.polygons.is_empty())
    }

    /// Maximum root-to-leaf depth
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(ROOT, 1usize)];
        while let Some((id, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            let node = &self.nodes[id];
            stack.extend(node.front.map(|child| (child, depth + 1)));
            stack.extend(node.back.map(|child| (child, depth + 1)));
        }
        deepest
    }

    /// Insert polygons into the tree.
    ///
    /// A node without a plane takes the plane of the first polygon it
    /// receives; no balancing is attempted.
    pub fn build(&mut self, polygons: Vec<Polygon>) {
        if polygons.is_empty() {
            return;
        }

        let mut stack: Vec<(NodeId, Vec<Polygon>, usize)> = vec![(ROOT, polygons, 1)];

        while let Some((id, polygons, depth)) = stack.pop() {
            if polygons.is_empty() {
                continue;
            }

            let plane = match self.nodes[id].plane {
                Some(plane) => plane,
                None => {
                    let plane = polygons[0].plane;
                    self.nodes[id].plane = Some(plane);
                    plane
                }
            };

            if depth >= self.max_depth {
                if !self.truncated {
                    tracing::warn!(
                        max_depth = self.max_depth,
                        "BSP depth budget exhausted, storing polygons unsplit"
                    );
                }
                self.truncated = true;
                self.nodes[id].polygons.extend(polygons);
                continue;
            }

            let mut split = SplitResult::default();
            for polygon in polygons {
                polygon.split_into(&plane, self.epsilon, &mut split);
            }

            let node = &mut self.nodes[id];
            node.polygons.append(&mut split.coplanar_front);
            node.polygons.append(&mut split.coplanar_back);

            if !split.front.is_empty() {
                let child = self.child(id, true);
                stack.push((child, split.front, depth + 1));
            }
            if !split.back.is_empty() {
                let child = self.child(id, false);
                stack.push((child, split.back, depth + 1));
            }
        }
    }

    fn child(&mut self, id: NodeId, front: bool) -> NodeId {
        let existing = if front {
            self.nodes[id].front
        } else {
            self.nodes[id].back
        };
        if let Some(child) = existing {
            return child;
        }
        let child = self.nodes.len();
        self.nodes.push(BspNode::default());
        if front {
            self.nodes[id].front = Some(child);
        } else {
            self.nodes[id].back = Some(child);
        }
        child
    }

    /// Turn the solid inside out: flip every plane and polygon, swap children
    pub fn invert(&mut self) {
        for node in &mut self.nodes {
            for polygon in &mut node.polygons {
                polygon.flip();
            }
            if let Some(plane) = node.plane.as_mut() {
                plane.flip();
            }
            std::mem::swap(&mut node.front, &mut node.back);
        }
    }

    /// Remove the parts of `polygons` that lie inside this tree's solid
    pub fn clip_polygons(&self, polygons: Vec<Polygon>) -> Vec<Polygon> {
        let mut kept = Vec::new();
        let mut stack: Vec<(NodeId, Vec<Polygon>)> = vec![(ROOT, polygons)];

        while let Some((id, polygons)) = stack.pop() {
            let node = &self.nodes[id];
            let Some(plane) = node.plane else {
                kept.extend(polygons);
                continue;
            };

            let mut split = SplitResult::default();
            for polygon in polygons {
                polygon.split_into(&plane, self.epsilon, &mut split);
            }

            let mut front = split.front;
            front.append(&mut split.coplanar_front);
            let mut back = split.back;
            back.append(&mut split.coplanar_back);

            match node.front {
                Some(child) => stack.push((child, front)),
                None => kept.extend(front),
            }
            // Back-side fragments with no subtree are inside the solid
            if let Some(child) = node.back {
                stack.push((child, back));
            }
        }

        kept
    }

    /// Remove every polygon of this tree that lies inside `other`
    pub fn clip_to(&mut self, other: &BspTree) {
        for node in &mut self.nodes {
            let polygons = std::mem::take(&mut node.polygons);
            node.polygons = other.clip_polygons(polygons);
        }
    }

    /// Pre-order collection of all stored polygons
    pub fn all_polygons(&self) -> Vec<Polygon> {
        let mut result = Vec::new();
        let mut stack = vec![ROOT];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            result.extend(node.polygons.iter().cloned());
            stack.extend(node.back);
            stack.extend(node.front);
        }
        result
    }

    pub fn into_polygons(self) -> Vec<Polygon> {
        self.all_polygons()
    }
}
