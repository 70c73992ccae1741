//! Line-oriented scripts of editor events.
//!
//! ```text
//! # drag the first table somewhere else
//! press 700 300
//! move 650 250
//! release
//! rename 650 250 customers
//! zoom in
//! ```
//!
//! `#` starts a comment; blank lines are ignored. `rename X Y` without a name
//! behaves like a cancelled prompt.

use log::debug;
use winnow::ascii::{float, space0, space1};
use winnow::combinator::{alt, eof, opt, preceded};
use winnow::prelude::*;
use winnow::token::rest;

use crate::error::Error;
use crate::geometry::Point;
use crate::interaction::Editor;
use crate::prompt::Confirm;
use crate::surface::Surface;

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Generate,
    Press(Point),
    Move(Point),
    Release,
    Delete(Point),
    Rename { at: Point, name: Option<String> },
    Zoom(ZoomDirection),
    Resize { width: f64, height: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

pub fn parse_script(input: &str) -> Result<Vec<Event>, Error> {
    let mut events = Vec::new();
    for (index, raw) in input.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let mut cursor = line;
        let event = event_line.parse_next(&mut cursor).map_err(|_| Error::Script {
            line: index + 1,
            message: format!("unrecognised event `{line}`"),
        })?;
        events.push(event);
    }
    Ok(events)
}

fn event_line(input: &mut &str) -> winnow::Result<Event> {
    let event = alt((
        "generate".value(Event::Generate),
        "release".value(Event::Release),
        preceded(("press", space1), point).map(Event::Press),
        preceded(("move", space1), point).map(Event::Move),
        preceded(("delete", space1), point).map(Event::Delete),
        rename_event,
        preceded(("zoom", space1), zoom_direction).map(Event::Zoom),
        preceded(("resize", space1), point).map(|size| Event::Resize {
            width: size.x(),
            height: size.y(),
        }),
    ))
    .parse_next(input)?;
    space0.parse_next(input)?;
    eof.parse_next(input)?;
    Ok(event)
}

fn point(input: &mut &str) -> winnow::Result<Point> {
    let x: f64 = float.parse_next(input)?;
    space1.parse_next(input)?;
    let y: f64 = float.parse_next(input)?;
    Ok(Point::new(x, y))
}

fn rename_event(input: &mut &str) -> winnow::Result<Event> {
    "rename".parse_next(input)?;
    space1.parse_next(input)?;
    let at = point.parse_next(input)?;
    let name = opt(preceded(space1, rest)).parse_next(input)?;
    Ok(Event::Rename {
        at,
        name: name.map(str::to_string),
    })
}

fn zoom_direction(input: &mut &str) -> winnow::Result<ZoomDirection> {
    alt(("in".value(ZoomDirection::In), "out".value(ZoomDirection::Out))).parse_next(input)
}

/// Feeds `events` to `editor` in order. `source` is re-read on every
/// `generate`; `confirm` answers every delete.
pub fn replay<S: Surface>(
    editor: &mut Editor<S>,
    events: &[Event],
    source: &str,
    confirm: &mut dyn Confirm,
) {
    for event in events {
        debug!(event:?; "Replaying event");
        match event {
            Event::Generate => editor.generate(source),
            Event::Press(p) => editor.press(*p),
            Event::Move(p) => editor.move_to(*p),
            Event::Release => editor.release(),
            Event::Delete(p) => {
                editor.delete_at(*p, confirm);
            }
            Event::Rename { at, name } => {
                editor.rename_at(*at, &mut name.clone());
            }
            Event::Zoom(ZoomDirection::In) => editor.scroll(-1.0, true),
            Event::Zoom(ZoomDirection::Out) => editor.scroll(1.0, true),
            Event::Resize { width, height } => editor.resize(*width, *height),
        }
    }
}
