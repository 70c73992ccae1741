pub mod config;
pub mod ddl_ast;
pub mod ddl_parser;
pub mod diagram;
pub mod diagram_renderer;
pub mod display_width;
pub mod error;
pub mod geometry;
pub mod grid_surface;
pub mod interaction;
pub mod prompt;
pub mod radial_layout;
pub mod script;
pub mod surface;
pub mod svg_surface;

use config::AppConfig;
use grid_surface::GridSurface;
use interaction::Editor;
use prompt::Confirm;
use script::Event;
use svg_surface::SvgSurface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Text,
}

/// Renders `ddl` as a diagram of the configured canvas size.
pub fn render(ddl: &str, format: OutputFormat, config: &AppConfig) -> String {
    render_session(ddl, &[], &mut false, format, config)
}

/// Generates a diagram from `ddl`, replays `events` on it and returns the
/// final frame.
pub fn render_session(
    ddl: &str,
    events: &[Event],
    confirm: &mut dyn Confirm,
    format: OutputFormat,
    config: &AppConfig,
) -> String {
    let (width, height) = (config.canvas.width, config.canvas.height);
    match format {
        OutputFormat::Svg => {
            let editor = run_session(SvgSurface::new(width, height), ddl, events, confirm, config);
            editor.surface().document().to_string()
        }
        OutputFormat::Text => {
            let surface = GridSurface::new(width, height, config.render.cell_size);
            let editor = run_session(surface, ddl, events, confirm, config);
            editor.surface().render()
        }
    }
}

fn run_session<S: surface::Surface>(
    surface: S,
    ddl: &str,
    events: &[Event],
    confirm: &mut dyn Confirm,
    config: &AppConfig,
) -> Editor<S> {
    let mut editor = Editor::new(surface, config);
    editor.generate(ddl);
    script::replay(&mut editor, events, ddl, confirm);
    editor
}
