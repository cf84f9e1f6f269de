use glam::Vec2;

/// 8-bit RGB color with CSS-style formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_css_rgb(self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }

    /// `alpha` in [0, 1].
    pub fn to_css_rgba(self, alpha: f32) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
    }
}

/// `width`/`height` are full axis extents; `orientation` is in radians.
#[derive(Debug, Clone, Copy)]
pub struct Ellipse {
    pub center: Vec2,
    pub width: f32,
    pub height: f32,
    pub orientation: f32,
}

pub type Polyline = Vec<Vec2>;

/// Drawing surface contract. The simulation only batches geometry into these
/// calls and never assumes a specific backend, so render targets are
/// interchangeable (and a frame can be replayed into a second instance for
/// export without touching simulation state).
pub trait Plotter {
    fn initialize(&mut self, fill_color: Color, line_color: Color, ellipse_opacity: f32);
    fn finalize(&mut self);

    /// One batched call for all stem polylines of a frame.
    fn draw_lines(&mut self, lines: &[Polyline]);

    /// Closed polygon at `offset`, stroked with the line color and filled
    /// with the fill color.
    fn draw_polygon(&mut self, polygon: &[Vec2], offset: Vec2);

    fn draw_ellipses(&mut self, ellipses: &[Ellipse], color: Color);
}

// --- SVG backend ---

/// String-building SVG implementation of the plotter contract.
pub struct PlotterSvg {
    string_parts: Vec<String>,
    width: f32,
    height: f32,
    fill_color: Color,
    line_color: Color,
    ellipse_opacity: f32,
}

impl PlotterSvg {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            string_parts: Vec::new(),
            width,
            height,
            fill_color: Color::new(255, 255, 255),
            line_color: Color::new(0, 0, 0),
            ellipse_opacity: 1.0,
        }
    }

    pub fn svg(&self) -> String {
        self.string_parts.join("\n")
    }

    fn compute_path(line: &[Vec2]) -> String {
        let mut path = format!("M{:.1},{:.1}L", line[0].x, line[0].y);
        let parts: Vec<String> = line[1..]
            .iter()
            .map(|point| format!("{:.1},{:.1}", point.x, point.y))
            .collect();
        path.push_str(&parts.join(" "));
        path
    }
}

impl Plotter for PlotterSvg {
    fn initialize(&mut self, fill_color: Color, line_color: Color, ellipse_opacity: f32) {
        self.fill_color = fill_color;
        self.line_color = line_color;
        self.ellipse_opacity = ellipse_opacity;

        self.string_parts
            .push(r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"#.to_string());
        self.string_parts.push(format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" viewBox="0 0 {} {}">"#,
            self.width, self.height
        ));
        self.string_parts.push(format!(
            "\t<rect fill=\"{}\" stroke=\"none\" x=\"0\" y=\"0\" width=\"{}\" height=\"{}\"/>",
            fill_color.to_css_rgb(),
            self.width,
            self.height
        ));
    }

    fn finalize(&mut self) {
        self.string_parts.push("</svg>".to_string());
    }

    fn draw_lines(&mut self, lines: &[Polyline]) {
        if lines.is_empty() {
            return;
        }

        self.string_parts.push(format!(
            "\t<g stroke=\"{}\" stroke-width=\"1\" fill=\"none\">",
            self.line_color.to_css_rgb()
        ));
        for line in lines {
            if line.len() >= 2 {
                self.string_parts
                    .push(format!("\t\t<path d=\"{}\"/>", Self::compute_path(line)));
            }
        }
        self.string_parts.push("\t</g>".to_string());
    }

    fn draw_polygon(&mut self, polygon: &[Vec2], offset: Vec2) {
        if polygon.len() < 2 {
            return;
        }

        let transform = format!("translate({:.1} {:.1})", offset.x, offset.y);
        self.string_parts.push(format!(
            "\t<path d=\"{}Z\" stroke=\"{}\" stroke-width=\"1\" fill=\"{}\" transform=\"{}\"/>",
            Self::compute_path(polygon),
            self.line_color.to_css_rgb(),
            self.fill_color.to_css_rgb(),
            transform
        ));
    }

    fn draw_ellipses(&mut self, ellipses: &[Ellipse], color: Color) {
        if ellipses.is_empty() {
            return;
        }

        self.string_parts.push(format!(
            "\t<g stroke=\"none\" fill=\"{}\">",
            color.to_css_rgba(self.ellipse_opacity)
        ));
        for ellipse in ellipses {
            let transform = format!(
                "translate({:.1} {:.1}) rotate({:.1})",
                ellipse.center.x,
                ellipse.center.y,
                ellipse.orientation.to_degrees()
            );
            self.string_parts.push(format!(
                "\t\t<ellipse cx=\"0\" cy=\"0\" rx=\"{:.1}\" ry=\"{:.1}\" transform=\"{}\"/>",
                0.5 * ellipse.width,
                0.5 * ellipse.height,
                transform
            ));
        }
        self.string_parts.push("\t</g>".to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_color_formatting() {
        let color = Color::new(255, 105, 180);
        assert_eq!(color.to_css_rgb(), "rgb(255, 105, 180)");
        assert_eq!(color.to_css_rgba(0.5), "rgba(255, 105, 180, 0.5)");
    }

    #[test]
    fn svg_document_contains_drawn_geometry() {
        let mut plotter = PlotterSvg::new(800.0, 600.0);
        plotter.initialize(Color::new(255, 255, 255), Color::new(0, 0, 0), 0.7);

        plotter.draw_lines(&[vec![Vec2::ZERO, Vec2::new(10.0, 10.0)]]);
        plotter.draw_polygon(
            &[Vec2::ZERO, Vec2::new(5.0, 0.0), Vec2::new(5.0, 5.0)],
            Vec2::new(100.0, 100.0),
        );
        plotter.draw_ellipses(
            &[Ellipse {
                center: Vec2::new(1.0, 2.0),
                width: 10.0,
                height: 4.0,
                orientation: 0.5,
            }],
            Color::new(255, 0, 0),
        );
        plotter.finalize();

        let svg = plotter.svg();
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains("<svg"));
        assert!(svg.contains("<path"));
        assert!(svg.contains("<ellipse"));
        assert!(svg.contains("rgba(255, 0, 0, 0.7)"));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn empty_batches_emit_nothing() {
        let mut plotter = PlotterSvg::new(800.0, 600.0);
        plotter.initialize(Color::new(255, 255, 255), Color::new(0, 0, 0), 1.0);
        let before = plotter.svg().len();

        plotter.draw_lines(&[]);
        plotter.draw_ellipses(&[], Color::new(0, 0, 0));
        plotter.draw_polygon(&[Vec2::ZERO], Vec2::ZERO);

        assert_eq!(plotter.svg().len(), before);
    }
}
