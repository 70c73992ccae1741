//! The live, mutable entity-relationship graph.
//!
//! Entities own their attributes. Foreign keys are stored by name and
//! resolved against the current entities whenever they are drawn.

use std::fmt;

use crate::ddl_ast::ForeignKeyRef;
use crate::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Geometry and label shared by entities and attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub center: Point,
    pub radius: f64,
}

impl Node {
    /// True if `point` lies inside or on the circle.
    ///
    /// A node whose radius has been dragged down to zero or below can no
    /// longer be hit.
    pub fn contains(&self, point: Point) -> bool {
        self.radius > 0.0 && point.distance_squared(self.center) <= self.radius * self.radius
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub node: Node,
    pub data_type: String,
    pub primary_key: bool,
    /// The entity whose attribute list holds this attribute.
    pub owner: NodeId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub node: Node,
    pub attributes: Vec<Attribute>,
    pub foreign_keys: Vec<ForeignKeyRef>,
}

/// Address of a node, tagged with its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRef {
    Entity(NodeId),
    Attribute { owner: NodeId, id: NodeId },
}

impl NodeRef {
    pub fn id(self) -> NodeId {
        match self {
            NodeRef::Entity(id) | NodeRef::Attribute { id, .. } => id,
        }
    }

    pub fn is_entity(self) -> bool {
        matches!(self, NodeRef::Entity(_))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagram {
    entities: Vec<Entity>,
    next_id: u32,
}

impl Diagram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn allocate_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn push_entity(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Every node paired with its address: all entities first, then the
    /// attributes of every entity in entity order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeRef, &Node)> {
        let entities = self
            .entities
            .iter()
            .map(|e| (NodeRef::Entity(e.node.id), &e.node));
        let attributes = self.entities.iter().flat_map(|e| {
            e.attributes.iter().map(|a| {
                (
                    NodeRef::Attribute {
                        owner: a.owner,
                        id: a.node.id,
                    },
                    &a.node,
                )
            })
        });
        entities.chain(attributes)
    }

    /// First node in [`Diagram::nodes`] order whose circle contains `point`.
    pub fn hit_test(&self, point: Point) -> Option<NodeRef> {
        self.nodes()
            .find(|(_, node)| node.contains(point))
            .map(|(node_ref, _)| node_ref)
    }

    pub fn entity(&self, id: NodeId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.node.id == id)
    }

    fn entity_mut(&mut self, id: NodeId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.node.id == id)
    }

    pub fn node(&self, node_ref: NodeRef) -> Option<&Node> {
        match node_ref {
            NodeRef::Entity(id) => self.entity(id).map(|e| &e.node),
            NodeRef::Attribute { owner, id } => self
                .entity(owner)?
                .attributes
                .iter()
                .find(|a| a.node.id == id)
                .map(|a| &a.node),
        }
    }

    pub fn node_mut(&mut self, node_ref: NodeRef) -> Option<&mut Node> {
        match node_ref {
            NodeRef::Entity(id) => self.entity_mut(id).map(|e| &mut e.node),
            NodeRef::Attribute { owner, id } => self
                .entity_mut(owner)?
                .attributes
                .iter_mut()
                .find(|a| a.node.id == id)
                .map(|a| &mut a.node),
        }
    }

    /// Removes an entity from the diagram, or an attribute from its owner.
    ///
    /// Foreign keys elsewhere that name a removed entity are left in place;
    /// they stop resolving. Returns false if the node was already gone.
    pub fn remove(&mut self, node_ref: NodeRef) -> bool {
        match node_ref {
            NodeRef::Entity(id) => {
                let before = self.entities.len();
                self.entities.retain(|e| e.node.id != id);
                self.entities.len() != before
            }
            NodeRef::Attribute { owner, id } => {
                let Some(entity) = self.entity_mut(owner) else {
                    return false;
                };
                let before = entity.attributes.len();
                entity.attributes.retain(|a| a.node.id != id);
                entity.attributes.len() != before
            }
        }
    }

    /// Resolves a foreign key target by exact name.
    ///
    /// Names are not unique; the first entity in diagram order wins.
    pub fn find_entity_by_name(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.node.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Diagram {
        let mut diagram = Diagram::new();
        for (i, name) in ["users", "orders"].into_iter().enumerate() {
            let id = diagram.allocate_id();
            let center = Point::new(100.0 + 300.0 * i as f64, 100.0);
            let attributes = ["id", "name"]
                .into_iter()
                .enumerate()
                .map(|(j, attr)| {
                    let node = Node {
                        id: diagram.allocate_id(),
                        name: attr.to_string(),
                        center: center.add_point(Point::new(0.0, 100.0 * (j as f64 + 1.0))),
                        radius: 45.0,
                    };
                    Attribute {
                        node,
                        data_type: "INT".into(),
                        primary_key: j == 0,
                        owner: id,
                    }
                })
                .collect();
            diagram.push_entity(Entity {
                node: Node {
                    id,
                    name: name.to_string(),
                    center,
                    radius: 50.0,
                },
                attributes,
                foreign_keys: vec![],
            });
        }
        diagram
    }

    #[test]
    fn node_id_displays_with_hash() {
        let mut diagram = Diagram::new();
        diagram.allocate_id();
        assert_eq!(diagram.allocate_id().to_string(), "#1");
    }

    #[test]
    fn nodes_lists_entities_before_attributes() {
        let diagram = sample();
        let names: Vec<&str> = diagram.nodes().map(|(_, n)| n.name.as_str()).collect();
        assert_eq!(names, vec!["users", "orders", "id", "name", "id", "name"]);
    }

    #[test]
    fn hit_test_prefers_entity_on_overlap() {
        let mut diagram = sample();
        let users = diagram.entities()[0].node.id;
        let attr_ref = diagram.nodes().nth(2).map(|(r, _)| r).unwrap();
        diagram.node_mut(attr_ref).unwrap().center = Point::new(100.0, 100.0);
        assert_eq!(diagram.hit_test(Point::new(100.0, 100.0)), Some(NodeRef::Entity(users)));
    }

    #[test]
    fn hit_test_zero_radius_never_hits() {
        let mut diagram = sample();
        let users = NodeRef::Entity(diagram.entities()[0].node.id);
        diagram.node_mut(users).unwrap().radius = 0.0;
        assert_eq!(diagram.hit_test(Point::new(100.0, 100.0)), None);
    }

    #[test]
    fn remove_attribute_leaves_siblings() {
        let mut diagram = sample();
        let attr_ref = diagram.nodes().nth(2).map(|(r, _)| r).unwrap();
        assert!(diagram.remove(attr_ref));
        assert_eq!(diagram.entities()[0].attributes.len(), 1);
        assert_eq!(diagram.entities()[0].attributes[0].node.name, "name");
        assert_eq!(diagram.entities()[1].attributes.len(), 2);
        assert!(!diagram.remove(attr_ref));
    }

    #[test]
    fn attribute_owner_matches_entity() {
        let diagram = sample();
        for entity in diagram.entities() {
            for attribute in &entity.attributes {
                assert_eq!(attribute.owner, entity.node.id);
            }
        }
    }

    #[test]
    fn find_entity_by_name_takes_first_duplicate() {
        let mut diagram = sample();
        let orders = NodeRef::Entity(diagram.entities()[1].node.id);
        diagram.node_mut(orders).unwrap().name = "users".into();
        let found = diagram.find_entity_by_name("users").unwrap();
        assert_eq!(found.node.id, diagram.entities()[0].node.id);
    }
}
