//! Latitude/longitude graticule rendered as inline SVG.

use crate::{
    core::{
        constants::GRID_TEXT_OFFSET,
        escape::escape_xml,
        geo::{calculate_coords, calculate_x, calculate_y, grid_scale_and_step, Point, Position},
    },
    layers::base::{LayerKey, LayerOperations},
};

/// Axis a family of gridlines is laid out along
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mesh {
    /// Horizontal lines at constant latitude
    Latitude,
    /// Vertical lines at constant longitude
    Longitude,
}

pub struct GridLayer {
    visible: bool,
    opacity: f64,
    svg: String,
}

impl GridLayer {
    pub fn new() -> Self {
        Self {
            visible: true,
            opacity: 1.0,
            svg: String::new(),
        }
    }

    /// Markup of the last redraw, empty while hidden
    pub fn svg(&self) -> &str {
        &self.svg
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn set_opacity(&mut self, opacity: f64) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }
}

impl Default for GridLayer {
    fn default() -> Self {
        Self::new()
    }
}

/// Appends one line and label per multiple of the step between `coord1` and `coord2`.
///
/// `pixel` maps a coordinate to the pixel offset across the lines; `along` is where labels
/// sit along the lines.
fn write_mesh_lines(
    svg: &mut String,
    mesh: Mesh,
    scale_span: f64,
    coord1: f64,
    coord2: f64,
    pixel: impl Fn(f64) -> i64,
    along: f64,
) {
    let (scale, step) = grid_scale_and_step(scale_span);
    if !(step.is_finite() && step > 0.0) {
        return;
    }
    let precision = (-scale).max(0) as usize;
    let base = (coord1 / step).ceil() * step;
    for i in 0.. {
        let coord = base + i as f64 * step;
        if !(coord <= coord2) {
            break;
        }
        let across = pixel(coord) as f64;
        let line_pixel = across + 0.5;
        // -0 prints with a sign
        let label = format!("{:.*}°", precision, if coord == 0.0 { 0.0 } else { coord });
        match mesh {
            Mesh::Latitude => {
                svg.push_str(&escaped_format!(
                    escape_xml,
                    r#"<line x2="100%" y1="{}" y2="{}" />"#,
                    line_pixel,
                    line_pixel
                ));
                svg.push_str(&escaped_format!(
                    escape_xml,
                    r#"<text x="{}" y="{}">{}</text>"#,
                    along,
                    across - GRID_TEXT_OFFSET,
                    label
                ));
            }
            Mesh::Longitude => {
                svg.push_str(&escaped_format!(
                    escape_xml,
                    r#"<line y2="100%" x1="{}" x2="{}" />"#,
                    line_pixel,
                    line_pixel
                ));
                svg.push_str(&escaped_format!(
                    escape_xml,
                    r#"<text y="{}" x="{}">{}</text>"#,
                    along,
                    across + GRID_TEXT_OFFSET,
                    label
                ));
            }
        }
    }
}

impl LayerOperations for GridLayer {
    crate::impl_layer_visibility!(visible);

    fn key(&self) -> LayerKey {
        LayerKey::Grid
    }

    fn clear(&mut self) {
        self.svg.clear();
    }

    fn redraw(&mut self, position: &Position, size: Point) {
        if !self.visible {
            self.clear();
            return;
        }
        let Position { x, y, zoom } = *position;
        let half_x = (size.x / 2.0).floor() as i64;
        let half_y = (size.y / 2.0).floor() as i64;
        let (x1, y1) = (x - half_x, y - half_y);
        let (x2, y2) = (x + half_x, y + half_y);
        let top_left = calculate_coords(x1 as f64, y1 as f64, zoom);
        let bottom_right = calculate_coords(x2 as f64, y2 as f64, zoom);

        // spans inside the inscribed square keep the density independent of the aspect ratio
        let half_min = (size.x.min(size.y) / 2.0).floor() as i64;
        let square_top_left = calculate_coords((x - half_min) as f64, (y - half_min) as f64, zoom);
        let square_bottom_right =
            calculate_coords((x + half_min) as f64, (y + half_min) as f64, zoom);

        let mut svg = escaped_format!(escape_xml, r#"<svg width="{}" height="{}">"#, size.x, size.y);
        write_mesh_lines(
            &mut svg,
            Mesh::Latitude,
            square_top_left.lat - square_bottom_right.lat,
            bottom_right.lat,
            top_left.lat,
            |lat| calculate_y(zoom, lat) - y1,
            0.5 + GRID_TEXT_OFFSET,
        );
        write_mesh_lines(
            &mut svg,
            Mesh::Longitude,
            square_bottom_right.lon - square_top_left.lon,
            top_left.lon,
            bottom_right.lon,
            |lon| calculate_x(zoom, lon) - x1,
            size.y - 0.5 - GRID_TEXT_OFFSET,
        );
        svg.push_str("</svg>");
        self.svg = svg;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::calculate_position;

    fn count(haystack: &str, needle: &str) -> usize {
        haystack.matches(needle).count()
    }

    #[test]
    fn test_hidden_grid_draws_nothing() {
        let mut grid = GridLayer::new();
        assert!(grid.is_visible());
        grid.set_visible(false);
        grid.redraw(&Position::new(128, 128, 0), Point::new(256.0, 256.0));
        assert_eq!(grid.svg(), "");
    }

    #[test]
    fn test_world_grid_at_zoom_zero() {
        let mut grid = GridLayer::new();
        grid.show(&Position::new(128, 128, 0), Point::new(256.0, 256.0));
        let svg = grid.svg();
        assert!(svg.starts_with(r#"<svg width="256" height="256">"#));
        assert!(svg.ends_with("</svg>"));
        // longitude span 360 over the square snaps to 180° steps: -180, 0, 180
        assert!(svg.contains(r#"<line y2="100%" x1="0.5" x2="0.5" />"#));
        assert!(svg.contains(r#"<line y2="100%" x1="128.5" x2="128.5" />"#));
        assert!(svg.contains(">-180°</text>"));
        assert!(svg.contains(">0°</text>"));
        assert!(svg.contains(">180°</text>"));
        assert!(svg.contains(r#"<text y="251.5" x="132">0°</text>"#));
        // the equator is drawn with its label above the line
        assert!(svg.contains(r#"<line x2="100%" y1="128.5" y2="128.5" />"#));
        assert!(svg.contains(r#"<text x="4.5" y="124">0°</text>"#));
    }

    #[test]
    fn test_labels_use_step_precision() {
        let mut grid = GridLayer::new();
        let position = calculate_position(17, 59.93903, 30.31582);
        grid.show(&position, Point::new(800.0, 600.0));
        let svg = grid.svg();
        assert!(count(svg, "<line") >= 2);
        assert_eq!(count(svg, "<line"), count(svg, "<text"));
        // at zoom 17 the view spans well under a hundredth of a degree
        let text = svg.find("<text").unwrap();
        let label = svg[text..]
            .split('>')
            .nth(1)
            .and_then(|rest| rest.split('°').next())
            .unwrap();
        assert!(label.split('.').nth(1).map_or(0, str::len) >= 3, "label {}", label);
    }

    #[test]
    fn test_degenerate_view_draws_no_lines() {
        let mut grid = GridLayer::new();
        grid.show(&Position::new(1000, 1000, 5), Point::new(0.0, 0.0));
        assert_eq!(grid.svg(), r#"<svg width="0" height="0"></svg>"#);
    }

    #[test]
    fn test_hide_clears_markup() {
        let mut grid = GridLayer::new();
        grid.show(&Position::new(128, 128, 0), Point::new(256.0, 256.0));
        assert!(!grid.svg().is_empty());
        grid.hide();
        assert_eq!(grid.svg(), "");
    }
}
