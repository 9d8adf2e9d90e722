//! Terminal map backend: renders the current session as a framed viewport.
//!
//! The origin draws as `◎`, POI markers as letters in placement order.
//! Markers outside the viewport are clipped silently.

use super::{MapBackend, MarkerKind};
use crate::geo::Coordinate;

const WIDTH: usize = 60;
const HEIGHT: usize = 15;

/// How many map tiles the viewport spans horizontally.
const TILE_SPAN: f64 = 4.0;

pub struct AsciiBackend {
    view: Option<(Coordinate, u8)>,
    markers: Vec<(Coordinate, MarkerKind)>,
}

impl AsciiBackend {
    pub fn new() -> Self {
        Self {
            view: None,
            markers: Vec::new(),
        }
    }

    /// Render the viewport grid. Empty string when no map is constructed.
    pub fn render(&self) -> String {
        let Some((center, zoom)) = self.view else {
            return String::new();
        };

        let lon_span = 360.0 / f64::from(1u32 << u32::from(zoom.min(20))) * TILE_SPAN;
        // Character cells are roughly twice as tall as wide.
        let lat_span = lon_span * (HEIGHT as f64 / WIDTH as f64) * 2.0;

        let mut grid = vec![vec!['·'; WIDTH]; HEIGHT];
        let mut letter = b'A';

        for (position, kind) in &self.markers {
            let col = ((position.longitude - center.longitude) / lon_span + 0.5) * WIDTH as f64;
            let row = ((center.latitude - position.latitude) / lat_span + 0.5) * HEIGHT as f64;
            let glyph = match kind {
                MarkerKind::Origin => '◎',
                MarkerKind::PointOfInterest => {
                    let g = letter as char;
                    letter = letter.saturating_add(1);
                    g
                }
            };
            if (0.0..WIDTH as f64).contains(&col) && (0.0..HEIGHT as f64).contains(&row) {
                grid[row as usize][col as usize] = glyph;
            }
        }

        let mut out = String::new();
        out.push_str(&format!("  ╔{}╗\n", "═".repeat(WIDTH)));
        for row in &grid {
            out.push_str("  ║");
            out.extend(row.iter());
            out.push_str("║\n");
        }
        out.push_str(&format!("  ╚{}╝\n", "═".repeat(WIDTH)));
        out.push_str(&format!("  center {}  zoom {}\n", center, zoom));
        out
    }
}

impl Default for AsciiBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MapBackend for AsciiBackend {
    fn clear_container(&mut self) {
        self.view = None;
        self.markers.clear();
    }

    fn construct_map(&mut self, center: Coordinate, zoom: u8) {
        self.view = Some((center, zoom));
    }

    fn add_marker(&mut self, position: Coordinate, kind: MarkerKind) {
        self.markers.push((position, kind));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::DEFAULT_ZOOM;

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    #[test]
    fn test_empty_before_construction() {
        assert_eq!(AsciiBackend::new().render(), "");
    }

    #[test]
    fn test_origin_renders_at_center() {
        let mut backend = AsciiBackend::new();
        let center = coord(37.7749, -122.4194);
        backend.construct_map(center, DEFAULT_ZOOM);
        backend.add_marker(center, MarkerKind::Origin);

        let frame = backend.render();
        assert!(frame.contains('◎'));
        let origin_line: Vec<&str> = frame.lines().filter(|l| l.contains('◎')).collect();
        // Middle row of a 15-row grid, plus the top border.
        assert_eq!(frame.lines().position(|l| l.contains('◎')), Some(8));
        assert_eq!(origin_line.len(), 1);
    }

    #[test]
    fn test_poi_markers_lettered_in_order() {
        let mut backend = AsciiBackend::new();
        let center = coord(37.7749, -122.4194);
        backend.construct_map(center, DEFAULT_ZOOM);
        backend.add_marker(coord(37.78, -122.41), MarkerKind::PointOfInterest);
        backend.add_marker(coord(37.77, -122.43), MarkerKind::PointOfInterest);

        let frame = backend.render();
        assert!(frame.contains('A'));
        assert!(frame.contains('B'));
    }

    #[test]
    fn test_far_marker_clipped() {
        let mut backend = AsciiBackend::new();
        backend.construct_map(coord(37.7749, -122.4194), DEFAULT_ZOOM);
        backend.add_marker(coord(48.8566, 2.3522), MarkerKind::PointOfInterest);

        assert!(!backend.render().contains('A'));
    }

    #[test]
    fn test_clear_container_resets() {
        let mut backend = AsciiBackend::new();
        backend.construct_map(coord(1.0, 1.0), DEFAULT_ZOOM);
        backend.add_marker(coord(1.0, 1.0), MarkerKind::Origin);
        backend.clear_container();
        assert_eq!(backend.render(), "");
    }
}
