//! SVG serialization of a [`Scene`].
//!
//! Output is a single standalone document: the effect definitions go in
//! `<defs>`, the layers are wrapped in one group carrying the garment
//! shadow, and every named node gets a `data-role` attribute.

use crate::geometry::fmt_number;

use super::Scene;
use super::node::{Node, Paint, ShapeKind, Style, Transform};

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

impl Scene {
    /// Serializes the scene to an SVG document.
    pub fn to_svg(&self) -> String {
        let vb = self.view_box;
        let mut out = String::new();

        out.push_str(&format!(
            "<svg xmlns=\"{SVG_NS}\" xmlns:xlink=\"{XLINK_NS}\" viewBox=\"{} {} {} {}\" width=\"{}\" height=\"{}\" preserveAspectRatio=\"xMidYMid meet\">",
            fmt_number(vb.x),
            fmt_number(vb.y),
            fmt_number(vb.width),
            fmt_number(vb.height),
            fmt_number(vb.width),
            fmt_number(vb.height),
        ));

        out.push_str("<defs>");
        for effect in &self.effects {
            out.push_str(&effect.definition());
        }
        out.push_str("</defs>");

        match self.shadow {
            Some(effect) => out.push_str(&format!("<g filter=\"url(#{})\">", effect.id())),
            None => out.push_str("<g>"),
        }
        for layer in &self.layers {
            out.push_str(&format!("<g data-layer=\"{}\">", layer.kind.name()));
            for node in &layer.nodes {
                write_node(&mut out, node);
            }
            out.push_str("</g>");
        }
        out.push_str("</g></svg>");
        out
    }
}

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Group(group) => {
            out.push_str("<g");
            write_role(out, node);
            write_style(out, &group.style, false);
            out.push('>');
            for child in &group.children {
                write_node(out, child);
            }
            out.push_str("</g>");
        }
        Node::Shape(shape) => {
            match &shape.kind {
                ShapeKind::Path(path) => {
                    out.push_str(&format!("<path d=\"{path}\""));
                }
                ShapeKind::Rect {
                    bounds,
                    corner_radius,
                } => {
                    out.push_str(&format!(
                        "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"",
                        fmt_number(bounds.x),
                        fmt_number(bounds.y),
                        fmt_number(bounds.width),
                        fmt_number(bounds.height),
                    ));
                    if *corner_radius > 0.0 {
                        out.push_str(&format!(" rx=\"{}\"", fmt_number(*corner_radius)));
                    }
                }
                ShapeKind::Circle { center, radius } => {
                    out.push_str(&format!(
                        "<circle cx=\"{}\" cy=\"{}\" r=\"{}\"",
                        fmt_number(center.x),
                        fmt_number(center.y),
                        fmt_number(*radius),
                    ));
                }
                ShapeKind::Ellipse { center, rx, ry } => {
                    out.push_str(&format!(
                        "<ellipse cx=\"{}\" cy=\"{}\" rx=\"{}\" ry=\"{}\"",
                        fmt_number(center.x),
                        fmt_number(center.y),
                        fmt_number(*rx),
                        fmt_number(*ry),
                    ));
                }
            }
            write_role(out, node);
            write_style(out, &shape.style, true);
            out.push_str("/>");
        }
        Node::Image(image) => {
            let b = image.bounds;
            out.push_str(&format!(
                "<image xlink:href=\"{}\" x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" preserveAspectRatio=\"xMidYMid meet\"",
                escape_xml(&image.href),
                fmt_number(b.x),
                fmt_number(b.y),
                fmt_number(b.width),
                fmt_number(b.height),
            ));
            write_role(out, node);
            write_style(out, &image.style, false);
            out.push_str("/>");
        }
        Node::Text(text) => {
            out.push_str(&format!(
                "<text x=\"{}\" y=\"{}\" text-anchor=\"middle\" font-size=\"{}\" font-family=\"{}\" fill=\"{}\"",
                fmt_number(text.position.x),
                fmt_number(text.position.y),
                fmt_number(text.font_size),
                escape_xml(&text.font_family),
                escape_xml(text.fill.as_str()),
            ));
            if text.bold {
                out.push_str(" font-weight=\"bold\"");
            }
            write_role(out, node);
            out.push_str(&format!(">{}</text>", escape_xml(&text.content)));
        }
    }
}

fn write_role(out: &mut String, node: &Node) {
    if let Some(role) = node.role() {
        out.push_str(&format!(" data-role=\"{}\"", role.name()));
    }
}

/// Shapes default to no fill; groups and images leave it to inheritance.
fn write_style(out: &mut String, style: &Style, is_shape: bool) {
    match &style.fill {
        Some(paint) => out.push_str(&format!(" fill=\"{}\"", paint_value(paint))),
        None if is_shape => out.push_str(" fill=\"none\""),
        None => {}
    }

    if let Some(stroke) = &style.stroke {
        out.push_str(&format!(
            " stroke=\"{}\" stroke-width=\"{}\"",
            paint_value(&stroke.paint),
            fmt_number(stroke.width)
        ));
        if let Some(opacity) = stroke.opacity {
            out.push_str(&format!(" stroke-opacity=\"{}\"", fmt_number(opacity)));
        }
        if let Some((dash, gap)) = stroke.dash {
            out.push_str(&format!(
                " stroke-dasharray=\"{},{}\"",
                fmt_number(dash),
                fmt_number(gap)
            ));
        }
        if stroke.round_cap {
            out.push_str(" stroke-linecap=\"round\"");
        }
    }

    if let Some(opacity) = style.opacity {
        out.push_str(&format!(" opacity=\"{}\"", fmt_number(opacity)));
    }
    if let Some(filter) = style.filter {
        out.push_str(&format!(" filter=\"url(#{})\"", filter.id()));
    }
    match style.transform {
        Some(Transform::Rotate { degrees, pivot }) => out.push_str(&format!(
            " transform=\"rotate({} {} {})\"",
            fmt_number(degrees),
            fmt_number(pivot.x),
            fmt_number(pivot.y)
        )),
        Some(Transform::Translate { dx, dy }) => out.push_str(&format!(
            " transform=\"translate({} {})\"",
            fmt_number(dx),
            fmt_number(dy)
        )),
        None => {}
    }
    if let Some(blend) = style.blend {
        out.push_str(&format!(" style=\"mix-blend-mode:{}\"", blend.name()));
    }
}

fn paint_value(paint: &Paint) -> String {
    match paint {
        Paint::Color(color) => escape_xml(color.as_str()),
        Paint::Effect(effect) => format!("url(#{})", effect.id()),
    }
}

pub(crate) fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::geometry::{PathData, Point, VIEW_BOX};
    use crate::scene::{BlendMode, Layer, LayerKind, Role, Stroke};
    use crate::shading::Effect;

    fn scene_with(nodes: Vec<Node>) -> Scene {
        Scene {
            view_box: VIEW_BOX,
            effects: vec![Effect::FabricGrain],
            shadow: Some(Effect::SoftShadow),
            layers: vec![Layer::new(LayerKind::Torso, nodes)],
        }
    }

    #[test]
    fn document_has_view_box_defs_and_shadow_group() {
        let svg = scene_with(Vec::new()).to_svg();
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
        assert!(svg.contains("viewBox=\"0 0 500 600\""));
        assert!(svg.contains("<filter id=\"fabricGrain\""));
        assert!(svg.contains("<g filter=\"url(#softShadow)\"><g data-layer=\"torso\">"));
        assert!(svg.ends_with("</g></svg>"));
    }

    #[test]
    fn shapes_write_role_and_style() {
        let path = PathData::new().move_to(0.0, 0.0).line_to(10.0, 5.0);
        let node = Node::shape(
            Role::HemStitch,
            ShapeKind::Path(path),
            Style::stroked(Stroke::new("#000", 1.0).dashed(3.0, 3.0)).with_opacity(0.3),
        );
        let svg = scene_with(vec![node]).to_svg();
        assert!(svg.contains(
            "<path d=\"M 0,0 L 10,5\" data-role=\"hem-stitch\" fill=\"none\" stroke=\"#000\" \
             stroke-width=\"1\" stroke-dasharray=\"3,3\" opacity=\"0.3\"/>"
        ));
    }

    #[test]
    fn effects_serialize_as_references() {
        let node = Node::shape(
            None,
            ShapeKind::Circle {
                center: Point::new(250.0, 120.0),
                radius: 6.0,
            },
            Style::filled(Effect::InnerDepth)
                .with_filter(Effect::PlacketShadow)
                .with_blend(BlendMode::Multiply),
        );
        let svg = scene_with(vec![node]).to_svg();
        assert!(svg.contains("fill=\"url(#innerDepth)\""));
        assert!(svg.contains("filter=\"url(#placketShadow)\""));
        assert!(svg.contains("style=\"mix-blend-mode:multiply\""));
    }

    #[test]
    fn text_and_attributes_are_escaped() {
        let node = Node::Text(crate::scene::TextNode {
            role: Some(Role::Label),
            position: Point::new(250.0, 75.0),
            content: "A&B <co>".into(),
            font_size: 6.0,
            font_family: "Arial".into(),
            fill: Color::new("#333"),
            bold: true,
        });
        let svg = scene_with(vec![node]).to_svg();
        assert!(svg.contains(">A&amp;B &lt;co&gt;</text>"));
        assert_eq!(escape_xml("\"'"), "&quot;&apos;");
    }
}
