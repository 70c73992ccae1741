use std::f64::consts::TAU;

use float_cmp::assert_approx_eq;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use sqlerd::config::LayoutConfig;
use sqlerd::ddl_ast::{AttributeDescriptor, TableDescriptor};
use sqlerd::ddl_parser::parse_ddl;
use sqlerd::geometry::Point;
use sqlerd::radial_layout;

fn table(name: &str, columns: usize) -> TableDescriptor {
    TableDescriptor {
        name: name.into(),
        attributes: (0..columns)
            .map(|i| AttributeDescriptor {
                name: format!("c{i}"),
                data_type: "INT".into(),
                primary_key: i == 0,
            })
            .collect(),
        foreign_keys: vec![],
    }
}

#[test]
fn no_tables_no_entities() {
    let diagram = radial_layout::compute(&[], 800.0, 600.0, &LayoutConfig::default());
    assert!(diagram.is_empty());
    assert_eq!(diagram.nodes().count(), 0);
}

#[test]
fn table_without_columns_has_no_attributes() {
    let diagram = radial_layout::compute(&[table("empty", 0)], 800.0, 600.0, &LayoutConfig::default());
    let entity = &diagram.entities()[0];
    assert_eq!(entity.attributes.len(), 0);
    assert!(entity.node.center.is_finite());
}

#[test]
fn parsed_tables_keep_names_and_default_radii() {
    let tables = parse_ddl("CREATE TABLE a (id INT PRIMARY KEY, v TEXT); CREATE TABLE b (id INT)");
    let diagram = radial_layout::compute(&tables, 800.0, 600.0, &LayoutConfig::default());
    let names: Vec<&str> = diagram.nodes().map(|(_, n)| n.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "id", "v", "id"]);

    let entity = &diagram.entities()[0];
    assert_eq!(entity.node.radius, 50.0);
    assert!(entity.attributes.iter().all(|a| a.node.radius == 45.0));
    assert!(entity.attributes[0].primary_key);
    assert!(entity.attributes.iter().all(|a| a.owner == entity.node.id));
}

#[test]
fn attributes_orbit_their_entity_at_half_radius() {
    let diagram = radial_layout::compute(&[table("t", 3), table("u", 1)], 600.0, 600.0, &LayoutConfig::default());
    for entity in diagram.entities() {
        let count = entity.attributes.len() as f64;
        for (j, attribute) in entity.attributes.iter().enumerate() {
            let expected = Point::on_circle(entity.node.center, 150.0, TAU * j as f64 / count);
            assert_approx_eq!(f64, attribute.node.center.x(), expected.x(), epsilon = 1e-9);
            assert_approx_eq!(f64, attribute.node.center.y(), expected.y(), epsilon = 1e-9);
        }
    }
}

proptest! {
    #[test]
    fn entities_sit_evenly_on_the_layout_circle(
        count in 1usize..12,
        width in 50.0f64..2000.0,
        height in 50.0f64..2000.0,
    ) {
        let tables: Vec<_> = (0..count).map(|k| table(&format!("t{k}"), k % 3)).collect();
        let diagram = radial_layout::compute(&tables, width, height, &LayoutConfig::default());
        let center = Point::new(width / 2.0, height / 2.0);
        let radius = width.min(height) / 2.0;

        prop_assert_eq!(diagram.entities().len(), count);
        for (k, entity) in diagram.entities().iter().enumerate() {
            let expected = Point::on_circle(center, radius, TAU * k as f64 / count as f64);
            prop_assert!((entity.node.center.distance(center) - radius).abs() < 1e-6);
            prop_assert!(entity.node.center.distance(expected) < 1e-6);
        }
    }
}
