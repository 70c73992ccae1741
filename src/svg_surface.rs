use svg::{Document, Node};
use svg::node::element as svg_element;

use crate::geometry::Point;
use crate::surface::Surface;

const LINE_COLOR: &str = "black";
const FILL_COLOR: &str = "white";
const NODE_STROKE_WIDTH: f64 = 2.0;
const EDGE_STROKE_WIDTH: f64 = 1.0;
const FONT_SIZE: f64 = 12.0;
const FONT_FAMILY: &str = "Arial";

/// Builds an SVG document from drawing calls.
///
/// Each scope opened by [`Surface::with_scale`] becomes a
/// `<g transform="scale(..)">` group.
#[derive(Debug)]
pub struct SvgSurface {
    width: f64,
    height: f64,
    groups: Vec<svg_element::Group>,
}

impl SvgSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            groups: vec![svg_element::Group::new()],
        }
    }

    pub fn document(&self) -> Document {
        let mut doc = Document::new()
            .set("viewBox", format!("0 0 {} {}", self.width, self.height))
            .set("width", self.width)
            .set("height", self.height)
            .add(
                svg_element::Rectangle::new()
                    .set("width", "100%")
                    .set("height", "100%")
                    .set("fill", FILL_COLOR),
            );
        if let Some(root) = self.groups.first() {
            doc = doc.add(root.clone());
        }
        doc
    }

    fn append(&mut self, node: impl Into<Box<dyn svg::Node>>) {
        if let Some(group) = self.groups.last_mut() {
            group.append(node);
        }
    }
}

impl Surface for SvgSurface {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn set_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    fn clear(&mut self) {
        self.groups = vec![svg_element::Group::new()];
    }

    fn stroke_circle(&mut self, center: Point, radius: f64) {
        // SVG rejects negative radii; a collapsed node still gets drawn.
        let circle = svg_element::Circle::new()
            .set("cx", center.x())
            .set("cy", center.y())
            .set("r", radius.max(0.0))
            .set("fill", "none")
            .set("stroke", LINE_COLOR)
            .set("stroke-width", NODE_STROKE_WIDTH);
        self.append(circle);
    }

    fn fill_circle(&mut self, center: Point, radius: f64) {
        let circle = svg_element::Circle::new()
            .set("cx", center.x())
            .set("cy", center.y())
            .set("r", radius.max(0.0))
            .set("fill", FILL_COLOR);
        self.append(circle);
    }

    fn draw_centered_text(&mut self, position: Point, text: &str) {
        let label = svg_element::Text::new(text)
            .set("x", position.x())
            .set("y", position.y())
            .set("text-anchor", "middle")
            .set("dominant-baseline", "middle")
            .set("font-family", FONT_FAMILY)
            .set("font-size", FONT_SIZE)
            .set("fill", LINE_COLOR);
        self.append(label);
    }

    fn stroke_line(&mut self, from: Point, to: Point) {
        let line = svg_element::Line::new()
            .set("x1", from.x())
            .set("y1", from.y())
            .set("x2", to.x())
            .set("y2", to.y())
            .set("stroke", LINE_COLOR)
            .set("stroke-width", EDGE_STROKE_WIDTH);
        self.append(line);
    }

    fn fill_triangle(&mut self, a: Point, b: Point, c: Point) {
        let points = [a, b, c]
            .iter()
            .map(|p| format!("{},{}", p.x(), p.y()))
            .collect::<Vec<_>>()
            .join(" ");
        self.append(
            svg_element::Polygon::new()
                .set("points", points)
                .set("fill", LINE_COLOR),
        );
    }

    fn with_scale(&mut self, factor: f64, draw: &mut dyn FnMut(&mut dyn Surface)) {
        self.groups
            .push(svg_element::Group::new().set("transform", format!("scale({factor})")));
        draw(self);
        if self.groups.len() > 1 {
            if let Some(scoped) = self.groups.pop() {
                self.append(scoped);
            }
        }
    }
}
