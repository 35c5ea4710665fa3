use crate::math::Point2d;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A waypoint that computer drivers steer towards.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TargetNode {
    /// The position of the node in the route.
    index: usize,
    /// The world space location of the node.
    location: Point2d,
}

impl TargetNode {
    /// The position of the node in its route.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The world space location of the node.
    pub fn location(&self) -> Point2d {
        self.location
    }
}

/// A closed loop of target nodes around the track.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Route {
    nodes: Vec<TargetNode>,
}

impl Route {
    /// Creates an empty route.
    pub fn new() -> Self {
        Default::default()
    }

    /// Creates a route through the given locations, in order.
    pub fn from_locations(locations: impl IntoIterator<Item = Point2d>) -> Self {
        let mut route = Self::new();
        for location in locations {
            route.push(location);
        }
        route
    }

    /// Appends a node to the route and returns its index.
    pub fn push(&mut self, location: Point2d) -> usize {
        let index = self.nodes.len();
        self.nodes.push(TargetNode { index, location });
        index
    }

    /// Gets the node at `index`. The route is a loop, so the index wraps around.
    /// Returns `None` only if the route is empty.
    pub fn get(&self, index: usize) -> Option<&TargetNode> {
        if self.nodes.is_empty() {
            None
        } else {
            self.nodes.get(index % self.nodes.len())
        }
    }

    /// The index of the node that follows `index`.
    pub fn next_index(&self, index: usize) -> usize {
        match self.nodes.len() {
            0 => 0,
            len => (index + 1) % len,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TargetNode> {
        self.nodes.iter()
    }
}
