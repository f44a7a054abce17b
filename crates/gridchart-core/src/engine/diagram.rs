use crate::core::models::grid::DEFAULT_FILL;
use std::fmt::{self, Write as _};
use std::path::Path;
use tracing::debug;

const LINE_HEIGHT_EM: f64 = 1.2;
/// Font sizes are given in points for a figure this many points wide.
const REFERENCE_FIGURE_SIZE: f64 = 720.0;

/// A primitive in layout units: one unit is one grid row or column.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: String,
        stroke: String,
    },
    /// Centered text; `text` may span several lines.
    Text {
        x: f64,
        y: f64,
        text: String,
        font_size: f64,
    },
}

/// The drawn scene of a grid: its extent plus shapes in drawing order.
///
/// Row 0 is the top edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagram {
    n_rows: u32,
    n_cols: u32,
    shapes: Vec<Shape>,
}

impl Diagram {
    pub fn new(n_rows: u32, n_cols: u32) -> Self {
        Self {
            n_rows,
            n_cols,
            shapes: Vec::new(),
        }
    }

    pub fn n_rows(&self) -> u32 {
        self.n_rows
    }

    pub fn n_cols(&self) -> u32 {
        self.n_cols
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn is_blank(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn push_rect(&mut self, x: f64, y: f64, width: f64, height: f64, fill: &str) {
        self.shapes.push(Shape::Rect {
            x,
            y,
            width,
            height,
            fill: fill.to_string(),
            stroke: "black".to_string(),
        });
    }

    /// Adds a text label. Empty labels are not drawn.
    pub fn push_text(&mut self, x: f64, y: f64, text: &str, font_size: f64) {
        if text.is_empty() {
            return;
        }
        self.shapes.push(Shape::Text {
            x,
            y,
            text: text.to_string(),
            font_size,
        });
    }

    /// Text of every label in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.shapes.iter().filter_map(|s| match s {
            Shape::Text { text, .. } => Some(text.as_str()),
            Shape::Rect { .. } => None,
        })
    }

    pub fn svg<'a>(&'a self, options: &'a SvgOptions) -> SvgDocument<'a> {
        SvgDocument {
            diagram: self,
            options,
        }
    }

    /// Serializes with [`SvgOptions::default`].
    pub fn to_svg(&self) -> String {
        self.svg(&SvgOptions::default()).to_string()
    }

    pub fn write_svg(&self, path: &Path, options: &SvgOptions) -> std::io::Result<()> {
        let document = self.svg(options).to_string();
        debug!("Writing {} bytes of SVG to {:?}", document.len(), path);
        std::fs::write(path, document)
    }
}

/// Output geometry for SVG serialization.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgOptions {
    /// Length in pixels of the longer grid side.
    pub figure_size: f64,
    pub margin: f64,
    pub font_family: String,
    pub background: String,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            figure_size: REFERENCE_FIGURE_SIZE,
            margin: 8.0,
            font_family: "DejaVu Sans, Arial, sans-serif".to_string(),
            background: DEFAULT_FILL.to_string(),
        }
    }
}

/// A [`Diagram`] paired with output options; formats as an SVG document.
pub struct SvgDocument<'a> {
    diagram: &'a Diagram,
    options: &'a SvgOptions,
}

impl SvgDocument<'_> {
    fn scale(&self) -> f64 {
        let longest = self.diagram.n_rows.max(self.diagram.n_cols).max(1);
        self.options.figure_size / longest as f64
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

impl fmt::Display for SvgDocument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let opts = self.options;
        let scale = self.scale();
        let font_scale = opts.figure_size / REFERENCE_FIGURE_SIZE;
        let width = self.diagram.n_cols as f64 * scale + 2.0 * opts.margin;
        let height = self.diagram.n_rows as f64 * scale + 2.0 * opts.margin;
        let px = |units: f64| opts.margin + units * scale;

        writeln!(f, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>")?;
        writeln!(
            f,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width:.1}\" height=\"{height:.1}\" viewBox=\"0 0 {width:.1} {height:.1}\">"
        )?;
        writeln!(
            f,
            "  <rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
            escape(&opts.background)
        )?;
        writeln!(
            f,
            "  <g font-family=\"{}\" text-anchor=\"middle\" dominant-baseline=\"central\">",
            escape(&opts.font_family)
        )?;

        for shape in &self.diagram.shapes {
            match shape {
                Shape::Rect {
                    x,
                    y,
                    width,
                    height,
                    fill,
                    stroke,
                } => writeln!(
                    f,
                    "    <rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"1\"/>",
                    px(*x),
                    px(*y),
                    width * scale,
                    height * scale,
                    escape(fill),
                    escape(stroke)
                )?,
                Shape::Text {
                    x,
                    y,
                    text,
                    font_size,
                } => {
                    let lines: Vec<&str> = text.lines().collect();
                    let cx = px(*x);
                    let mut body = String::new();
                    // Vertically center the block of lines on the anchor.
                    let first_dy = -(lines.len().saturating_sub(1) as f64) * LINE_HEIGHT_EM / 2.0;
                    for (i, line) in lines.iter().enumerate() {
                        let dy = if i == 0 { first_dy } else { LINE_HEIGHT_EM };
                        write!(
                            body,
                            "<tspan x=\"{cx:.1}\" dy=\"{dy:.2}em\">{}</tspan>",
                            escape(line)
                        )?;
                    }
                    writeln!(
                        f,
                        "    <text x=\"{cx:.1}\" y=\"{:.1}\" font-size=\"{:.1}\">{body}</text>",
                        px(*y),
                        font_size * font_scale
                    )?;
                }
            }
        }

        writeln!(f, "  </g>")?;
        writeln!(f, "</svg>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_diagram_has_the_configured_extent_and_no_shapes() {
        let diagram = Diagram::new(12, 8);
        assert!(diagram.is_blank());
        let svg = diagram.to_svg();
        assert!(svg.contains("width=\"496.0\" height=\"736.0\""));
        assert!(!svg.contains("<text"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn empty_text_is_not_drawn() {
        let mut diagram = Diagram::new(2, 2);
        diagram.push_text(0.5, 0.5, "", 24.0);
        assert!(diagram.is_blank());
    }

    #[test]
    fn shapes_are_scaled_to_the_longest_side() {
        let mut diagram = Diagram::new(4, 2);
        diagram.push_rect(0.0, 2.0, 2.0, 2.0, "#ffcc00");
        let options = SvgOptions {
            figure_size: 400.0,
            margin: 0.0,
            ..SvgOptions::default()
        };
        let svg = diagram.svg(&options).to_string();
        assert!(svg.contains(
            "<rect x=\"0.0\" y=\"200.0\" width=\"200.0\" height=\"200.0\" fill=\"#ffcc00\""
        ));
    }

    #[test]
    fn multi_line_text_becomes_centered_tspans() {
        let mut diagram = Diagram::new(2, 2);
        diagram.push_text(1.0, 1.0, "GCU\nGCC\nGCA", 20.0);
        let options = SvgOptions {
            figure_size: 200.0,
            margin: 0.0,
            ..SvgOptions::default()
        };
        let svg = diagram.svg(&options).to_string();
        assert_eq!(svg.matches("<tspan").count(), 3);
        assert!(svg.contains("dy=\"-1.20em\">GCU</tspan>"));
        assert!(svg.contains("dy=\"1.20em\">GCA</tspan>"));
    }

    #[test]
    fn text_is_xml_escaped() {
        let mut diagram = Diagram::new(1, 1);
        diagram.push_text(0.5, 0.5, "A<B & \"C\"", 12.0);
        let svg = diagram.to_svg();
        assert!(svg.contains("A&lt;B &amp; &quot;C&quot;"));
    }

    #[test]
    fn write_svg_creates_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.svg");
        let mut diagram = Diagram::new(2, 2);
        diagram.push_text(1.0, 1.0, "H₂O", 11.0);
        diagram.write_svg(&path, &SvgOptions::default()).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("H₂O"));
    }
}
