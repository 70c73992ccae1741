//! Pointer-driven editing of a diagram.
//!
//! [`Editor`] owns the diagram and the surface it is drawn on. Each event
//! handler applies one change and redraws before returning, so the surface
//! always shows the current diagram.
//!
//! Pointer coordinates are model coordinates. The zoom factor only scales
//! what is drawn; hit-testing ignores it, so away from a factor of 1.0 the
//! pointer and the drawing drift apart.

use log::{debug, info};

use crate::config::{AppConfig, InteractionConfig, LayoutConfig, RenderConfig};
use crate::ddl_ast::TableDescriptor;
use crate::ddl_parser::parse_ddl;
use crate::diagram::{Diagram, NodeRef};
use crate::diagram_renderer;
use crate::geometry::Point;
use crate::prompt::{Confirm, TextPrompt, TextSource};
use crate::radial_layout;
use crate::surface::Surface;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractionState {
    Idle,
    /// Moving a node; `offset` is the pointer's position relative to the
    /// node's center when it was grabbed.
    Dragging { node: NodeRef, offset: Point },
    /// Changing a node's radius; `resize_offset` is how far outside the rim
    /// the pointer was when it was grabbed.
    Resizing { node: NodeRef, resize_offset: f64 },
}

impl InteractionState {
    pub fn selected(self) -> Option<NodeRef> {
        match self {
            InteractionState::Idle => None,
            InteractionState::Dragging { node, .. } | InteractionState::Resizing { node, .. } => {
                Some(node)
            }
        }
    }
}

pub struct Editor<S> {
    surface: S,
    diagram: Diagram,
    tables: Vec<TableDescriptor>,
    state: InteractionState,
    zoom: f64,
    layout: LayoutConfig,
    render: RenderConfig,
    interaction: InteractionConfig,
}

impl<S: Surface> Editor<S> {
    pub fn new(surface: S, config: &AppConfig) -> Self {
        Self {
            surface,
            diagram: Diagram::new(),
            tables: Vec::new(),
            state: InteractionState::Idle,
            zoom: 1.0,
            layout: config.layout.clone(),
            render: config.render.clone(),
            interaction: config.interaction.clone(),
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn selected(&self) -> Option<NodeRef> {
        self.state.selected()
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Parses the source text and replaces the diagram with a fresh layout.
    pub fn generate(&mut self, source: &(impl TextSource + ?Sized)) {
        let text = source.read_text();
        self.tables = parse_ddl(&text);
        info!(tables = self.tables.len(); "Generating diagram");
        self.relayout();
    }

    /// Handles a surface resize: lays the last generated tables out again
    /// for the new size, discarding manual edits.
    pub fn resize(&mut self, width: f64, height: f64) {
        debug!(width, height; "Surface resized");
        self.surface.set_size(width, height);
        self.relayout();
    }

    fn relayout(&mut self) {
        self.diagram = radial_layout::compute(
            &self.tables,
            self.surface.width(),
            self.surface.height(),
            &self.layout,
        );
        self.state = InteractionState::Idle;
        self.redraw();
    }

    /// Grabs the node under the pointer: near its rim to resize it,
    /// anywhere else inside to move it.
    pub fn press(&mut self, pointer: Point) {
        let Some(node_ref) = self.diagram.hit_test(pointer) else {
            return;
        };
        let Some(node) = self.diagram.node(node_ref) else {
            return;
        };

        let distance = pointer.distance(node.center);
        self.state = if (distance - node.radius).abs() <= self.interaction.resize_tolerance {
            InteractionState::Resizing {
                node: node_ref,
                resize_offset: distance - node.radius,
            }
        } else {
            InteractionState::Dragging {
                node: node_ref,
                offset: pointer.sub_point(node.center),
            }
        };
        debug!(node = node.name.as_str(), state:? = self.state; "Pointer pressed on node");
    }

    pub fn move_to(&mut self, pointer: Point) {
        match self.state {
            InteractionState::Idle => {}
            InteractionState::Dragging { node, offset } => {
                let Some(node) = self.diagram.node_mut(node) else {
                    self.state = InteractionState::Idle;
                    return;
                };
                node.center = pointer.sub_point(offset);
                self.redraw();
            }
            InteractionState::Resizing { node, resize_offset } => {
                let Some(node) = self.diagram.node_mut(node) else {
                    self.state = InteractionState::Idle;
                    return;
                };
                // Not clamped; at zero the node stops responding to hits.
                node.radius = pointer.distance(node.center) - resize_offset;
                self.redraw();
            }
        }
    }

    pub fn release(&mut self) {
        self.state = InteractionState::Idle;
    }

    /// Deletes the node under the pointer once `confirm` agrees.
    ///
    /// Returns whether a node was removed.
    pub fn delete_at(&mut self, pointer: Point, confirm: &mut dyn Confirm) -> bool {
        let Some(node_ref) = self.diagram.hit_test(pointer) else {
            return false;
        };
        let Some(name) = self.diagram.node(node_ref).map(|n| n.name.clone()) else {
            return false;
        };
        if !confirm.confirm(&format!("Delete node \"{name}\"?")) {
            return false;
        }

        self.diagram.remove(node_ref);
        info!(node = name.as_str(), id:% = node_ref.id(), entity = node_ref.is_entity(); "Deleted node");
        if let Some(selected) = self.state.selected() {
            if self.diagram.node(selected).is_none() {
                self.state = InteractionState::Idle;
            }
        }
        self.redraw();
        true
    }

    /// Renames the node under the pointer to the trimmed answer of `prompt`.
    ///
    /// A cancelled prompt, a blank answer or an unchanged name leave the
    /// diagram alone. Returns whether the name changed.
    pub fn rename_at(&mut self, pointer: Point, prompt: &mut dyn TextPrompt) -> bool {
        let Some(node_ref) = self.diagram.hit_test(pointer) else {
            return false;
        };
        let Some(current) = self.diagram.node(node_ref).map(|n| n.name.clone()) else {
            return false;
        };
        let message = format!("Rename node (current name: {current})");
        let Some(answer) = prompt.prompt(&message, &current) else {
            return false;
        };
        let new_name = answer.trim();
        if new_name.is_empty() || new_name == current {
            return false;
        }

        if let Some(node) = self.diagram.node_mut(node_ref) {
            node.name = new_name.to_string();
        }
        info!(id:% = node_ref.id(), from = current.as_str(), to = new_name; "Renamed node");
        self.redraw();
        true
    }

    /// Applies one scroll notch. Only scrolls with the zoom modifier held
    /// count; scrolling down zooms out, scrolling up zooms in.
    pub fn scroll(&mut self, delta_y: f64, modifier: bool) {
        if !modifier || delta_y == 0.0 {
            return;
        }
        let step = if delta_y > 0.0 {
            -self.interaction.zoom_step
        } else {
            self.interaction.zoom_step
        };
        self.zoom = (self.zoom + step).clamp(self.interaction.min_zoom, self.interaction.max_zoom);
        debug!(zoom = self.zoom; "Zoom changed");
        self.redraw();
    }

    pub fn redraw(&mut self) {
        diagram_renderer::render(&self.diagram, &mut self.surface, self.zoom, &self.render);
    }
}
