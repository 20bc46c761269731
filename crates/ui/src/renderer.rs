//! Canvas2D software renderer for [`Scene`]s
//!
//! Projects every triangle, culls back faces, shades flat with Lambert
//! lighting and paints far-to-near. Good enough for a handful of small
//! decorative meshes; the canvas stays transparent behind them.

use std::cell::Cell;

use glam::{Vec3, Vec4Swizzles};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{window, CanvasRenderingContext2d, Document, HtmlCanvasElement};

use crate::error::{Result, UiError};
use crate::scene::geometry::triangle_normal;
use crate::scene::{Light, Material, Scene};

/// Convert RGB u32 to CSS string
fn rgb_to_css(rgb: u32) -> String {
    format!(
        "rgb({},{},{})",
        (rgb >> 16) & 0xff,
        (rgb >> 8) & 0xff,
        rgb & 0xff
    )
}

fn rgb_to_vec(rgb: u32) -> Vec3 {
    Vec3::new(
        ((rgb >> 16) & 0xff) as f32,
        ((rgb >> 8) & 0xff) as f32,
        (rgb & 0xff) as f32,
    ) / 255.0
}

fn vec_to_rgb(v: Vec3) -> u32 {
    let c = (v.clamp(Vec3::ZERO, Vec3::ONE) * 255.0).round();
    ((c.x as u32) << 16) | ((c.y as u32) << 8) | (c.z as u32)
}

/// Backing-store size in device pixels for a CSS-sized canvas
pub fn backing_size(css_width: f64, css_height: f64, dpr: f64) -> (u32, u32) {
    ((css_width * dpr) as u32, (css_height * dpr) as u32)
}

/// Screen-space triangle ready to paint
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    pub points: [(f64, f64); 3],
    /// NDC depth, larger is farther
    pub depth: f32,
    pub color: u32,
}

/// Flat Lambert shading of one face
pub fn shade(material: Material, normal: Vec3, lights: &[Light]) -> u32 {
    let mut light = Vec3::ZERO;
    for l in lights {
        match *l {
            Light::Ambient { color, intensity } => light += rgb_to_vec(color) * intensity,
            Light::Directional {
                color,
                intensity,
                position,
            } => {
                let diffuse = normal.dot(position.normalize_or_zero()).max(0.0);
                light += rgb_to_vec(color) * intensity * diffuse;
            }
        }
    }
    vec_to_rgb(rgb_to_vec(material.color) * light + rgb_to_vec(material.emissive))
}

/// Project `scene` onto a `width` x `height` surface, sorted far to near
pub fn project(scene: &Scene, width: f64, height: f64) -> Vec<Polygon> {
    let view_proj = scene.camera.view_projection();
    let near = scene.camera.near;
    let mut polygons = Vec::new();

    for (world, mesh) in scene.meshes() {
        let geo = &mesh.geometry;
        let world_verts: Vec<Vec3> = geo.vertices.iter().map(|v| world.transform_point3(*v)).collect();
        let clip: Vec<_> = world_verts.iter().map(|v| view_proj * v.extend(1.0)).collect();

        for face in &geo.faces {
            let [a, b, c] = face.indices.map(|i| i as usize);
            if [a, b, c].iter().any(|&i| clip[i].w <= near) {
                continue;
            }
            let ndc = [a, b, c].map(|i| clip[i].xyz() / clip[i].w);

            let area = (ndc[1].x - ndc[0].x) * (ndc[2].y - ndc[0].y)
                - (ndc[2].x - ndc[0].x) * (ndc[1].y - ndc[0].y);
            if area.abs() <= f32::EPSILON {
                continue;
            }
            let material = mesh.material(face.group);
            let front = area > 0.0;
            if !front && !material.double_sided {
                continue;
            }

            let mut normal = triangle_normal(world_verts[a], world_verts[b], world_verts[c]);
            if !front {
                normal = -normal;
            }

            polygons.push(Polygon {
                points: ndc.map(|p| {
                    (
                        (f64::from(p.x) + 1.0) * 0.5 * width,
                        (1.0 - f64::from(p.y)) * 0.5 * height,
                    )
                }),
                depth: (ndc[0].z + ndc[1].z + ndc[2].z) / 3.0,
                color: shade(material, normal, &scene.lights),
            });
        }
    }

    polygons.sort_by(|p, q| q.depth.total_cmp(&p.depth));
    polygons
}

/// Canvas surface a scene is drawn onto
pub struct SceneRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    dpr: f64,
    css_size: Cell<(f64, f64)>,
}

impl SceneRenderer {
    /// Create a detached canvas sized `width` x `height` CSS pixels
    pub fn new(document: &Document, width: f64, height: f64) -> Result<Self> {
        let canvas = document
            .create_element("canvas")?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| UiError::Js("created element is not a canvas".to_string()))?;
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| UiError::Js("2d context unavailable".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| UiError::Js("context is not 2d".to_string()))?;

        // Get device pixel ratio for HiDPI
        let dpr = window().map_or(1.0, |w| w.device_pixel_ratio());

        let renderer = Self {
            canvas,
            ctx,
            dpr,
            css_size: Cell::new((0.0, 0.0)),
        };
        renderer.resize(width, height);
        Ok(renderer)
    }

    pub const fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Handle resize with HiDPI-correct canvas scaling
    pub fn resize(&self, css_width: f64, css_height: f64) {
        self.css_size.set((css_width, css_height));

        let (width, height) = backing_size(css_width, css_height, self.dpr);
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        let style = self.canvas.style();
        let _ = style.set_property("width", &format!("{css_width}px"));
        let _ = style.set_property("height", &format!("{css_height}px"));

        // Reset transform before scaling (prevents compound scaling)
        let _ = self.ctx.set_transform(self.dpr, 0.0, 0.0, self.dpr, 0.0, 0.0);
    }

    #[allow(deprecated)] // web-sys set_fill_style deprecation is overzealous
    pub fn draw(&self, scene: &Scene) {
        let (width, height) = self.css_size.get();
        self.ctx.clear_rect(0.0, 0.0, width, height);
        self.ctx.set_line_width(0.5);

        for poly in project(scene, width, height) {
            let css = JsValue::from_str(&rgb_to_css(poly.color));
            self.ctx.set_fill_style(&css);
            // Same-colour stroke hides the hairline seams between triangles
            self.ctx.set_stroke_style(&css);

            let [(x0, y0), (x1, y1), (x2, y2)] = poly.points;
            self.ctx.begin_path();
            self.ctx.move_to(x0, y0);
            self.ctx.line_to(x1, y1);
            self.ctx.line_to(x2, y2);
            self.ctx.close_path();
            self.ctx.fill();
            self.ctx.stroke();
        }
    }
}
