/*!

  A [Surface] that writes a standalone SVG document.

*/

use crate::scene::{Anchor, Layer, Primitive, Surface};
use crate::symbol::PathCmd;
use std::fmt::{self, Write};

/// Escapes text for use in SVG content and attribute values
pub fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Formats path commands as SVG path data
pub fn path_data(commands: &[PathCmd]) -> String {
    let mut d = String::new();
    for cmd in commands {
        if !d.is_empty() {
            d.push(' ');
        }
        // Writing to a String cannot fail
        let _ = match cmd {
            PathCmd::MoveTo(x, y) => write!(d, "M {x} {y}"),
            PathCmd::LineTo(x, y) => write!(d, "L {x} {y}"),
            PathCmd::QuadTo(cx, cy, x, y) => write!(d, "Q {cx} {cy} {x} {y}"),
            PathCmd::Close => write!(d, "Z"),
        };
    }
    d
}

fn anchor_name(anchor: Anchor) -> &'static str {
    match anchor {
        Anchor::Start => "start",
        Anchor::Middle => "middle",
        Anchor::End => "end",
    }
}

fn write_primitive(out: &mut String, primitive: &Primitive) -> fmt::Result {
    match primitive {
        Primitive::Line {
            x1,
            y1,
            x2,
            y2,
            stroke,
            width,
            wire,
        } => {
            write!(
                out,
                "    <line x1=\"{x1}\" y1=\"{y1}\" x2=\"{x2}\" y2=\"{y2}\" stroke=\"{}\" stroke-width=\"{width}\" stroke-linecap=\"round\"",
                escape_xml(stroke)
            )?;
            if let Some(wire) = wire {
                write!(out, " data-wire=\"{}\"", escape_xml(wire))?;
            }
            out.push_str(" />\n");
        }
        Primitive::Circle {
            cx,
            cy,
            r,
            fill,
            stroke,
            stroke_width,
        } => {
            writeln!(
                out,
                "    <circle cx=\"{cx}\" cy=\"{cy}\" r=\"{r}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{stroke_width}\" />",
                escape_xml(fill),
                escape_xml(stroke)
            )?;
        }
        Primitive::Path {
            commands,
            fill,
            stroke,
            stroke_width,
        } => {
            writeln!(
                out,
                "    <path d=\"{}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{stroke_width}\" />",
                path_data(commands),
                escape_xml(fill.as_deref().unwrap_or("none")),
                escape_xml(stroke)
            )?;
        }
        Primitive::Text {
            x,
            y,
            content,
            anchor,
            size,
            bold,
            fill,
        } => {
            let weight = if *bold { "bold" } else { "normal" };
            writeln!(
                out,
                "    <text x=\"{x}\" y=\"{y}\" text-anchor=\"{}\" font-size=\"{size}\" font-weight=\"{weight}\" fill=\"{}\">{}</text>",
                anchor_name(*anchor),
                escape_xml(fill),
                escape_xml(content)
            )?;
        }
    }
    Ok(())
}

/// Collects painted primitives into one `<g>` per [Layer]
#[derive(Debug, Clone)]
pub struct SvgSurface {
    background: String,
    width: f32,
    height: f32,
    groups: [String; 4],
}

impl SvgSurface {
    /// Creates an empty surface with the given background color
    pub fn new(background: &str) -> Self {
        Self {
            background: background.to_string(),
            width: 0.0,
            height: 0.0,
            groups: Default::default(),
        }
    }

    /// Returns the SVG document for everything painted so far
    pub fn to_svg(&self) -> String {
        let mut svg = String::new();
        // Writing to a String cannot fail
        let _ = self.write_document(&mut svg);
        svg
    }

    /// Consumes the surface and returns its SVG document
    pub fn finish(self) -> String {
        self.to_svg()
    }

    fn write_document(&self, svg: &mut String) -> fmt::Result {
        let (w, h) = (self.width, self.height);
        writeln!(svg, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="Arial, sans-serif">"#
        )?;
        writeln!(
            svg,
            "  <rect width=\"100%\" height=\"100%\" fill=\"{}\" />",
            escape_xml(&self.background)
        )?;
        for (layer, body) in Layer::ALL.iter().zip(&self.groups) {
            writeln!(svg, "  <g id=\"{}-group\">", layer.get_name())?;
            svg.push_str(body);
            svg.push_str("  </g>\n");
        }
        svg.push_str("</svg>\n");
        Ok(())
    }
}

impl Surface for SvgSurface {
    fn clear(&mut self) {
        for group in &mut self.groups {
            group.clear();
        }
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    fn draw(&mut self, layer: Layer, primitive: &Primitive) {
        let group = &mut self.groups[layer as usize];
        // Writing to a String cannot fail
        let _ = write_primitive(group, primitive);
    }
}
