//! Shape generation for 2D primitives
//!
//! Everything is emitted as a triangle list in screen pixels (y down).

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Same color with a different alpha
pub fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], alpha]
}

/// HSL (hue in degrees, saturation/lightness 0-1) to RGBA
pub fn hsla(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> [f32; 4] {
    let h = hue.rem_euclid(360.0) / 60.0;
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = lightness - c * 0.5;
    [r + m, g + m, b + m, alpha]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    radial_gradient(center, radius, color, color, segments)
}

/// Filled circle whose color fades from `inner` at the center to `outer` at the rim
pub fn radial_gradient(
    center: Vec2,
    radius: f32,
    inner: [f32; 4],
    outer: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, inner));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            outer,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            outer,
        ));
    }

    vertices
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        let (s1, c1) = theta1.sin_cos();
        let (s2, c2) = theta2.sin_cos();
        let inner1 = center + Vec2::new(c1, s1) * inner_radius;
        let outer1 = center + Vec2::new(c1, s1) * outer_radius;
        let inner2 = center + Vec2::new(c2, s2) * inner_radius;
        let outer2 = center + Vec2::new(c2, s2) * outer_radius;

        // Two triangles per segment
        vertices.push(Vertex::new(inner1.x, inner1.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(inner2.x, inner2.y, color));

        vertices.push(Vertex::new(inner2.x, inner2.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(outer2.x, outer2.y, color));
    }

    vertices
}

/// Axis-aligned rectangle
pub fn rect(min: Vec2, max: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Thick line segment
pub fn line(a: Vec2, b: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (b - a).normalize_or_zero();
    let perp = Vec2::new(-dir.y, dir.x) * (width * 0.5);
    let (a1, a2, b1, b2) = (a + perp, a - perp, b + perp, b - perp);
    vec![
        Vertex::new(a1.x, a1.y, color),
        Vertex::new(a2.x, a2.y, color),
        Vertex::new(b1.x, b1.y, color),
        Vertex::new(b1.x, b1.y, color),
        Vertex::new(a2.x, a2.y, color),
        Vertex::new(b2.x, b2.y, color),
    ]
}

/// Filled polygon as a fan from the first point.
///
/// Only valid for outlines that are star-shaped around `points[0]` (every
/// ship silhouette here is).
pub fn fan(points: &[Vec2], color: [f32; 4]) -> Vec<Vertex> {
    if points.len() < 3 {
        return Vec::new();
    }
    let apex = points[0];
    let mut vertices = Vec::with_capacity((points.len() - 2) * 3);
    for pair in points[1..].windows(2) {
        vertices.push(Vertex::new(apex.x, apex.y, color));
        vertices.push(Vertex::new(pair[0].x, pair[0].y, color));
        vertices.push(Vertex::new(pair[1].x, pair[1].y, color));
    }
    vertices
}

/// Closed outline through `points`
pub fn outline(points: &[Vec2], width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(points.len() * 6);
    for (i, &a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        vertices.extend(line(a, b, width, color));
    }
    vertices
}

/// Filled ellipse
pub fn ellipse(center: Vec2, radii: Vec2, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = circle(Vec2::ZERO, 1.0, color, segments);
    for v in &mut vertices {
        v.position = [
            center.x + v.position[0] * radii.x,
            center.y + v.position[1] * radii.y,
        ];
    }
    vertices
}

/// Rotate and translate local points into the scene
pub fn place(points: &[Vec2], origin: Vec2, angle: f32) -> Vec<Vec2> {
    let rot = Vec2::from_angle(angle);
    points.iter().map(|p| origin + rot.rotate(*p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsla_primaries() {
        let red = hsla(0.0, 1.0, 0.5, 1.0);
        assert!((red[0] - 1.0).abs() < 1e-6 && red[1].abs() < 1e-6 && red[2].abs() < 1e-6);
        let blue = hsla(240.0, 1.0, 0.5, 0.5);
        assert!((blue[2] - 1.0).abs() < 1e-6 && blue[0].abs() < 1e-6);
        assert_eq!(blue[3], 0.5);
        // Hue wraps
        assert_eq!(hsla(360.0, 1.0, 0.5, 1.0), red);
    }

    #[test]
    fn test_fan_triangle_count() {
        let square = [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ];
        assert_eq!(fan(&square, [1.0; 4]).len(), 6);
        assert!(fan(&square[..2], [1.0; 4]).is_empty());
        assert_eq!(outline(&square, 1.0, [1.0; 4]).len(), 24);
    }

    #[test]
    fn test_radial_gradient_colors() {
        let verts = radial_gradient(Vec2::ZERO, 5.0, [1.0; 4], [0.0; 4], 8);
        assert_eq!(verts.len(), 24);
        assert_eq!(verts[0].color, [1.0; 4]);
        assert_eq!(verts[1].color, [0.0; 4]);
    }

    #[test]
    fn test_place_rotates() {
        let placed = place(&[Vec2::new(1.0, 0.0)], Vec2::new(10.0, 10.0), PI / 2.0);
        assert!((placed[0] - Vec2::new(10.0, 11.0)).length() < 1e-5);
    }
}
