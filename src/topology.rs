// Copyright 2018 The GeoRust Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//	http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The node/way/relation graph produced from a GeoJSON document.
//!
//! A [`Topology`] is an append-only arena. Identifiers are handed out
//! sequentially per primitive kind, starting at 1, and are only meaningful
//! within the topology that produced them.

use std::fmt;

use crate::{Bounds, LatLon, Tags};

macro_rules! primitive_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub u64);

        impl $name {
            fn index(self) -> Option<usize> {
                self.0.checked_sub(1).map(|i| i as usize)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

primitive_id!(NodeId, "Graph-local node identifier.");
primitive_id!(WayId, "Graph-local way identifier.");
primitive_id!(RelationId, "Graph-local relation identifier.");

/// A single tagged coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: NodeId,
    coord: LatLon,
    tags: Tags,
}

impl Node {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn coord(&self) -> LatLon {
        self.coord
    }

    pub fn tags(&self) -> &Tags {
        &self.tags
    }
}

/// An ordered list of nodes forming a line or a ring.
#[derive(Debug, Clone, PartialEq)]
pub struct Way {
    id: WayId,
    nodes: Vec<NodeId>,
    tags: Tags,
}

impl Way {
    pub fn id(&self) -> WayId {
        self.id
    }

    /// Member nodes, in source coordinate order.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn tags(&self) -> &Tags {
        &self.tags
    }
}

/// Relation member reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Member {
    Node(NodeId),
    Way(WayId),
}

/// A tagged, ordered collection of role-labelled members.
#[derive(Debug, Clone, PartialEq)]
pub struct Relation {
    id: RelationId,
    members: Vec<(String, Member)>,
    tags: Tags,
}

impl Relation {
    pub fn id(&self) -> RelationId {
        self.id
    }

    pub fn members(&self) -> &[(String, Member)] {
        &self.members
    }

    pub fn tags(&self) -> &Tags {
        &self.tags
    }

    pub fn is_multipolygon(&self) -> bool {
        self.tags.get("type").map(String::as_str) == Some("multipolygon")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Entry {
    Node(usize),
    Way(usize),
    Relation(usize),
}

/// Borrowed view of any primitive of a [`Topology`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive<'a> {
    Node(&'a Node),
    Way(&'a Way),
    Relation(&'a Relation),
}

impl<'a> Primitive<'a> {
    pub fn tags(&self) -> &'a Tags {
        match *self {
            Primitive::Node(n) => &n.tags,
            Primitive::Way(w) => &w.tags,
            Primitive::Relation(r) => &r.tags,
        }
    }

    pub fn kind(&self) -> &'static str {
        match *self {
            Primitive::Node(..) => "node",
            Primitive::Way(..) => "way",
            Primitive::Relation(..) => "relation",
        }
    }

    fn id(&self) -> u64 {
        match *self {
            Primitive::Node(n) => n.id.0,
            Primitive::Way(w) => w.id.0,
            Primitive::Relation(r) => r.id.0,
        }
    }
}

/// `node 3, Tags: {name=a, oneway=true}`
impl fmt::Display for Primitive<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}, Tags: {{", self.kind(), self.id())?;
        for (i, (key, value)) in self.tags().iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", key, value)?;
        }
        f.write_str("}")
    }
}

/// Append-only store of nodes, ways and relations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Topology {
    nodes: Vec<Node>,
    ways: Vec<Way>,
    relations: Vec<Relation>,
    order: Vec<Entry>,
}

impl Topology {
    pub fn new() -> Self {
        Topology::default()
    }

    pub(crate) fn add_node(&mut self, coord: LatLon, tags: Tags) -> NodeId {
        let id = NodeId(self.nodes.len() as u64 + 1);
        self.order.push(Entry::Node(self.nodes.len()));
        self.nodes.push(Node { id, coord, tags });
        id
    }

    /// `nodes` must already belong to this topology and must not be empty.
    pub(crate) fn add_way(&mut self, nodes: Vec<NodeId>, tags: Tags) -> WayId {
        debug_assert!(!nodes.is_empty(), "a way needs at least one node");
        let id = WayId(self.ways.len() as u64 + 1);
        self.order.push(Entry::Way(self.ways.len()));
        self.ways.push(Way { id, nodes, tags });
        id
    }

    pub(crate) fn add_relation(&mut self, members: Vec<(String, Member)>, tags: Tags) -> RelationId {
        let id = RelationId(self.relations.len() as u64 + 1);
        self.order.push(Entry::Relation(self.relations.len()));
        self.relations.push(Relation { id, members, tags });
        id
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn ways(&self) -> &[Way] {
        &self.ways
    }

    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        id.index().and_then(|i| self.nodes.get(i))
    }

    pub fn way(&self, id: WayId) -> Option<&Way> {
        id.index().and_then(|i| self.ways.get(i))
    }

    pub fn relation(&self, id: RelationId) -> Option<&Relation> {
        id.index().and_then(|i| self.relations.get(i))
    }

    /// Total number of primitives of all kinds.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Every primitive in creation order.
    pub fn primitives(&self) -> impl Iterator<Item = Primitive<'_>> + '_ {
        self.order.iter().map(move |entry| match *entry {
            Entry::Node(i) => Primitive::Node(&self.nodes[i]),
            Entry::Way(i) => Primitive::Way(&self.ways[i]),
            Entry::Relation(i) => Primitive::Relation(&self.relations[i]),
        })
    }

    /// Coordinates of the nodes of `way`, in order.
    pub fn way_coords(&self, way: &Way) -> Vec<LatLon> {
        way.nodes
            .iter()
            .filter_map(|id| self.node(*id))
            .map(Node::coord)
            .collect()
    }

    /// A way is closed when it has at least three nodes and its first and
    /// last node share a coordinate.
    pub fn is_closed(&self, way: &Way) -> bool {
        if way.nodes.len() < 3 {
            return false;
        }
        let first = way.nodes.first().and_then(|id| self.node(*id));
        let last = way.nodes.last().and_then(|id| self.node(*id));
        match (first, last) {
            (Some(a), Some(b)) => a.coord == b.coord,
            _ => false,
        }
    }

    /// Envelope of every node. Ways and relations only contribute through
    /// their member nodes, which are already part of the topology.
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::accumulate(self.primitives().filter_map(|p| match p {
            Primitive::Node(n) => Some(n.coord),
            _ => None,
        }))
    }
}

/// A topology together with the envelope of its nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundedTopology {
    topology: Topology,
    bounds: Option<Bounds>,
}

impl BoundedTopology {
    pub fn new(topology: Topology) -> Self {
        let bounds = topology.bounds();
        BoundedTopology { topology, bounds }
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// `None` when the topology has no node.
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    pub fn into_parts(self) -> (Topology, Option<Bounds>) {
        (self.topology, self.bounds)
    }
}
