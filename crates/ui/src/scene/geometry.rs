//! Primitive meshes
//!
//! Conventions follow the usual WebGL scene-graph layout: cylinders and
//! cones stand on the Y axis centred at the origin, tori lie in the XY
//! plane, planes face +Z. Triangles are wound counter-clockwise when seen
//! from outside.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

/// Triangle with the material group it draws with
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Face {
    pub indices: [u32; 3],
    pub group: u8,
}

impl Face {
    const fn tri(a: u32, b: u32, c: u32) -> Self {
        Self {
            indices: [a, b, c],
            group: 0,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Geometry {
    pub vertices: Vec<Vec3>,
    pub faces: Vec<Face>,
}

impl Geometry {
    fn push_vertex(&mut self, v: Vec3) -> u32 {
        self.vertices.push(v);
        (self.vertices.len() - 1) as u32
    }

    /// Two triangles over a quad given counter-clockwise
    fn push_quad(&mut self, a: u32, b: u32, c: u32, d: u32, group: u8) {
        self.faces.push(Face { indices: [a, b, c], group });
        self.faces.push(Face { indices: [a, c, d], group });
    }

    /// Axis-aligned box; face groups are +X, -X, +Y, -Y, +Z, -Z
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        let half = Vec3::new(width, height, depth) * 0.5;
        let sides = [
            (Vec3::X, Vec3::NEG_Z, Vec3::Y),
            (Vec3::NEG_X, Vec3::Z, Vec3::Y),
            (Vec3::Y, Vec3::X, Vec3::NEG_Z),
            (Vec3::NEG_Y, Vec3::X, Vec3::Z),
            (Vec3::Z, Vec3::X, Vec3::Y),
            (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
        ];

        let mut geo = Self::default();
        for (group, (normal, u, v)) in sides.into_iter().enumerate() {
            let center = normal * half;
            let u = u * half;
            let v = v * half;
            let a = geo.push_vertex(center - u - v);
            let b = geo.push_vertex(center + u - v);
            let c = geo.push_vertex(center + u + v);
            let d = geo.push_vertex(center - u + v);
            geo.push_quad(a, b, c, d, group as u8);
        }
        geo
    }

    /// Rectangle in the XY plane facing +Z
    pub fn plane(width: f32, height: f32) -> Self {
        let (w, h) = (width * 0.5, height * 0.5);
        let mut geo = Self::default();
        let a = geo.push_vertex(Vec3::new(-w, -h, 0.0));
        let b = geo.push_vertex(Vec3::new(w, -h, 0.0));
        let c = geo.push_vertex(Vec3::new(w, h, 0.0));
        let d = geo.push_vertex(Vec3::new(-w, h, 0.0));
        geo.push_quad(a, b, c, d, 0);
        geo
    }

    /// Capped frustum on the Y axis; a zero radius collapses that end to a point
    pub fn cylinder(radius_top: f32, radius_bottom: f32, height: f32, radial_segments: u32) -> Self {
        let segments = radial_segments.max(3);
        let half = height * 0.5;
        let ring = |radius: f32, y: f32, i: u32| {
            let theta = i as f32 / segments as f32 * TAU;
            Vec3::new(radius * theta.sin(), y, radius * theta.cos())
        };

        let mut geo = Self::default();
        let top: Vec<u32> = (0..=segments)
            .map(|i| geo.push_vertex(ring(radius_top, half, i)))
            .collect();
        let bottom: Vec<u32> = (0..=segments)
            .map(|i| geo.push_vertex(ring(radius_bottom, -half, i)))
            .collect();

        for i in 0..segments as usize {
            let (a, b, c, d) = (top[i], bottom[i], bottom[i + 1], top[i + 1]);
            if radius_top > 0.0 {
                geo.faces.push(Face::tri(a, b, d));
            }
            if radius_bottom > 0.0 {
                geo.faces.push(Face::tri(b, c, d));
            }
        }

        if radius_top > 0.0 {
            let center = geo.push_vertex(Vec3::new(0.0, half, 0.0));
            for i in 0..segments as usize {
                geo.faces.push(Face::tri(top[i], top[i + 1], center));
            }
        }
        if radius_bottom > 0.0 {
            let center = geo.push_vertex(Vec3::new(0.0, -half, 0.0));
            for i in 0..segments as usize {
                geo.faces.push(Face::tri(bottom[i + 1], bottom[i], center));
            }
        }
        geo
    }

    /// Cone with its apex at +Y
    pub fn cone(radius: f32, height: f32, radial_segments: u32) -> Self {
        Self::cylinder(0.0, radius, height, radial_segments)
    }

    /// Full sphere
    pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        Self::sphere_section(radius, width_segments, height_segments, 0.0, TAU, 0.0, PI)
    }

    /// Sphere patch; `theta` is measured from +Y, `phi` around Y
    pub fn sphere_section(
        radius: f32,
        width_segments: u32,
        height_segments: u32,
        phi_start: f32,
        phi_length: f32,
        theta_start: f32,
        theta_length: f32,
    ) -> Self {
        let ws = width_segments.max(3);
        let hs = height_segments.max(2);
        let theta_end = (theta_start + theta_length).min(PI);

        let mut geo = Self::default();
        let mut grid = Vec::with_capacity(hs as usize + 1);
        for iy in 0..=hs {
            let v = iy as f32 / hs as f32;
            let theta = theta_start + v * theta_length;
            let row: Vec<u32> = (0..=ws)
                .map(|ix| {
                    let phi = phi_start + ix as f32 / ws as f32 * phi_length;
                    geo.push_vertex(Vec3::new(
                        -radius * phi.cos() * theta.sin(),
                        radius * theta.cos(),
                        radius * phi.sin() * theta.sin(),
                    ))
                })
                .collect();
            grid.push(row);
        }

        for iy in 0..hs as usize {
            for ix in 0..ws as usize {
                let a = grid[iy][ix + 1];
                let b = grid[iy][ix];
                let c = grid[iy + 1][ix];
                let d = grid[iy + 1][ix + 1];
                if iy != 0 || theta_start > 0.0 {
                    geo.faces.push(Face::tri(a, b, d));
                }
                if iy != hs as usize - 1 || theta_end < PI {
                    geo.faces.push(Face::tri(b, c, d));
                }
            }
        }
        geo
    }

    /// Full torus around the Z axis
    pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> Self {
        Self::torus_arc(radius, tube, radial_segments, tubular_segments, TAU)
    }

    /// Torus swept through `arc` radians starting at +X
    pub fn torus_arc(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32, arc: f32) -> Self {
        let rs = radial_segments.max(3);
        let ts = tubular_segments.max(3);
        let stride = ts + 1;

        let mut geo = Self::default();
        for j in 0..=rs {
            let v = j as f32 / rs as f32 * TAU;
            for i in 0..=ts {
                let u = i as f32 / ts as f32 * arc;
                let r = radius + tube * v.cos();
                geo.push_vertex(Vec3::new(r * u.cos(), r * u.sin(), tube * v.sin()));
            }
        }

        for j in 1..=rs {
            for i in 1..=ts {
                let a = stride * j + i - 1;
                let b = stride * (j - 1) + i - 1;
                let c = stride * (j - 1) + i;
                let d = stride * j + i;
                geo.faces.push(Face::tri(a, b, d));
                geo.faces.push(Face::tri(b, c, d));
            }
        }
        geo
    }

    #[cfg(test)]
    fn face_normal(&self, face: &Face) -> Vec3 {
        let [a, b, c] = face.indices.map(|i| self.vertices[i as usize]);
        triangle_normal(a, b, c)
    }

    #[cfg(test)]
    fn face_center(&self, face: &Face) -> Vec3 {
        let [a, b, c] = face.indices.map(|i| self.vertices[i as usize]);
        (a + b + c) / 3.0
    }
}

/// Unit normal of a counter-clockwise triangle, zero when degenerate
pub fn triangle_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (b - a).cross(c - a).normalize_or_zero()
}
