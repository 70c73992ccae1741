use std::f64::consts::TAU;

use log::debug;

use crate::config::LayoutConfig;
use crate::ddl_ast::*;
use crate::diagram::*;
use crate::geometry::Point;

/// Places tables evenly on a circle around the surface center and each
/// table's attributes evenly on a half-size circle around the table.
///
/// The result is a fresh diagram; nothing from an earlier layout survives.
pub fn compute(tables: &[TableDescriptor], width: f64, height: f64, config: &LayoutConfig) -> Diagram {
    let mut diagram = Diagram::new();
    let center = Point::new(width / 2.0, height / 2.0);
    let ring_radius = width.min(height) / 2.0;
    let attribute_ring_radius = ring_radius / 2.0;

    for (k, table) in tables.iter().enumerate() {
        let position = Point::on_circle(center, ring_radius, spoke_angle(k, tables.len()));
        let entity_id = diagram.allocate_id();

        let attributes = table
            .attributes
            .iter()
            .enumerate()
            .map(|(j, attr)| Attribute {
                node: Node {
                    id: diagram.allocate_id(),
                    name: attr.name.clone(),
                    center: Point::on_circle(
                        position,
                        attribute_ring_radius,
                        spoke_angle(j, table.attributes.len()),
                    ),
                    radius: config.attribute_radius,
                },
                data_type: attr.data_type.clone(),
                primary_key: attr.primary_key,
                owner: entity_id,
            })
            .collect();

        diagram.push_entity(Entity {
            node: Node {
                id: entity_id,
                name: table.name.clone(),
                center: position,
                radius: config.entity_radius,
            },
            attributes,
            foreign_keys: table.foreign_keys.clone(),
        });
    }

    debug!(entities = tables.len(), width, height; "Computed radial layout");
    diagram
}

/// Angle of spoke `index` out of `count`; only called with `index < count`.
fn spoke_angle(index: usize, count: usize) -> f64 {
    TAU * index as f64 / count as f64
}
