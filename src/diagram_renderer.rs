use std::f64::consts::FRAC_PI_6;

use crate::config::RenderConfig;
use crate::diagram::*;
use crate::geometry::Point;
use crate::surface::Surface;

/// Clears the surface and draws the whole diagram at `zoom`.
///
/// Nodes go first, then entity-to-attribute edges, then foreign-key edges.
/// A foreign key whose table is not in the diagram draws nothing.
pub fn render(diagram: &Diagram, surface: &mut dyn Surface, zoom: f64, config: &RenderConfig) {
    surface.clear();
    surface.with_scale(zoom, &mut |s| draw_diagram(diagram, s, config));
}

fn draw_diagram(diagram: &Diagram, surface: &mut dyn Surface, config: &RenderConfig) {
    for entity in diagram.entities() {
        draw_node(surface, &entity.node);
        for attribute in &entity.attributes {
            draw_node(surface, &attribute.node);
        }
    }

    for entity in diagram.entities() {
        for attribute in &entity.attributes {
            draw_edge(surface, &entity.node, &attribute.node, config.arrow_head_length);
        }
    }

    for entity in diagram.entities() {
        for foreign_key in &entity.foreign_keys {
            if let Some(target) = diagram.find_entity_by_name(&foreign_key.referenced_table) {
                draw_edge(surface, &entity.node, &target.node, config.arrow_head_length);
            }
        }
    }
}

fn draw_node(surface: &mut dyn Surface, node: &Node) {
    surface.fill_circle(node.center, node.radius);
    surface.stroke_circle(node.center, node.radius);
    surface.draw_centered_text(node.center, &node.name);
}

fn draw_edge(surface: &mut dyn Surface, from: &Node, to: &Node, head_length: f64) {
    let (start, end) = edge_endpoints(from, to);
    surface.stroke_line(start, end);
    let [tip, left, right] = arrow_head(start, end, head_length);
    surface.fill_triangle(tip, left, right);
}

/// Where the straight line between two centers crosses each circle.
pub fn edge_endpoints(from: &Node, to: &Node) -> (Point, Point) {
    (
        from.center.towards(to.center, from.radius),
        to.center.towards(from.center, to.radius),
    )
}

/// Triangle with its tip at `tip`, its sides `length` long and 30° off the
/// line coming from `tail`.
pub fn arrow_head(tail: Point, tip: Point, length: f64) -> [Point; 3] {
    let angle = tail.angle_to(tip);
    let corner = |offset: f64| {
        tip.sub_point(Point::new(
            length * (angle + offset).cos(),
            length * (angle + offset).sin(),
        ))
    };
    [tip, corner(-FRAC_PI_6), corner(FRAC_PI_6)]
}
