//! Scene graph for the decorative models
//!
//! Nodes live in a flat arena addressed by [`NodeId`]; a parent is always
//! inserted before its children, so world matrices resolve by walking up.

pub mod geometry;
pub mod models;

use std::rc::Rc;

use glam::{EulerRot, Mat4, Quat, Vec3};

pub use geometry::Geometry;
pub use models::ModelKind;

use models::Rig;

/// Local transform; rotation is Euler XYZ in radians
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    pub const fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    pub const fn rotated(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn matrix(&self) -> Mat4 {
        let rot = Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z);
        Mat4::from_scale_rotation_translation(self.scale, rot, self.position)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Flat-shaded surface, colors are 0xRRGGBB
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Material {
    pub color: u32,
    pub emissive: u32,
    pub double_sided: bool,
}

impl Material {
    pub const fn color(color: u32) -> Self {
        Self {
            color,
            emissive: 0,
            double_sided: false,
        }
    }

    pub const fn emissive(mut self, emissive: u32) -> Self {
        self.emissive = emissive;
        self
    }

    pub const fn double_sided(mut self) -> Self {
        self.double_sided = true;
        self
    }
}

#[derive(Clone, Debug)]
pub struct Mesh {
    pub geometry: Rc<Geometry>,
    /// Indexed by face group; out-of-range groups use the last material
    pub materials: Vec<Material>,
}

impl Mesh {
    pub fn new(geometry: Geometry, material: Material) -> Self {
        Self::shared(Rc::new(geometry), material)
    }

    pub fn shared(geometry: Rc<Geometry>, material: Material) -> Self {
        Self {
            geometry,
            materials: vec![material],
        }
    }

    pub fn with_materials(geometry: Geometry, materials: Vec<Material>) -> Self {
        Self {
            geometry: Rc::new(geometry),
            materials,
        }
    }

    pub fn material(&self, group: u8) -> Material {
        let idx = usize::from(group).min(self.materials.len().saturating_sub(1));
        self.materials
            .get(idx)
            .copied()
            .unwrap_or_else(|| Material::color(0xffffff))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Group (no mesh) or mesh node
#[derive(Clone, Debug)]
pub struct Node {
    pub parent: Option<NodeId>,
    pub transform: Transform,
    pub mesh: Option<Mesh>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Light {
    Ambient { color: u32, intensity: f32 },
    Directional { color: u32, intensity: f32, position: Vec3 },
}

/// Perspective camera looking down -Z from `(0, 0, z)`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub fov_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub z: f32,
}

impl Camera {
    pub fn new(width: f64, height: f64, z: f32) -> Self {
        Self {
            fov_deg: 75.0,
            aspect: aspect_ratio(width, height),
            near: 0.1,
            far: 1000.0,
            z,
        }
    }

    pub fn view(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, 0.0, -self.z))
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_deg.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }
}

/// `width / height` as used for the camera aspect
pub fn aspect_ratio(width: f64, height: f64) -> f32 {
    (width / height) as f32
}

/// One decorative scene: camera, lights and the model's node tree
#[derive(Clone, Debug)]
pub struct Scene {
    pub kind: ModelKind,
    pub camera: Camera,
    pub lights: Vec<Light>,
    nodes: Vec<Node>,
    rig: Rig,
}

impl Scene {
    fn empty(kind: ModelKind, camera: Camera) -> Self {
        Self {
            kind,
            camera,
            lights: Vec::new(),
            nodes: Vec::new(),
            rig: Rig::None,
        }
    }

    fn add_node(&mut self, parent: Option<NodeId>, transform: Transform, mesh: Option<Mesh>) -> NodeId {
        debug_assert!(parent.map_or(true, |p| p.0 < self.nodes.len()));
        self.nodes.push(Node {
            parent,
            transform,
            mesh,
        });
        NodeId(self.nodes.len() - 1)
    }

    pub fn add_group(&mut self, parent: Option<NodeId>, transform: Transform) -> NodeId {
        self.add_node(parent, transform, None)
    }

    pub fn add_mesh(&mut self, parent: Option<NodeId>, mesh: Mesh, transform: Transform) -> NodeId {
        self.add_node(parent, transform, Some(mesh))
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn transform_mut(&mut self, id: NodeId) -> &mut Transform {
        &mut self.nodes[id.0].transform
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(move |(_, n)| n.parent == Some(id))
            .map(|(i, _)| NodeId(i))
    }

    pub fn world_matrix(&self, id: NodeId) -> Mat4 {
        let node = self.node(id);
        let local = node.transform.matrix();
        match node.parent {
            Some(parent) => self.world_matrix(parent) * local,
            None => local,
        }
    }

    /// Every mesh with its world matrix
    pub fn meshes(&self) -> impl Iterator<Item = (Mat4, &Mesh)> + '_ {
        self.nodes.iter().enumerate().filter_map(move |(i, n)| {
            n.mesh.as_ref().map(|m| (self.world_matrix(NodeId(i)), m))
        })
    }

    /// Refit the camera to a new surface size
    pub fn resize(&mut self, width: f64, height: f64) {
        self.camera.aspect = aspect_ratio(width, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_aspect_from_size() {
        let cam = Camera::new(300.0, 150.0, 5.0);
        assert!((cam.aspect - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_world_matrix_composes_parents() {
        let mut scene = Scene::empty(ModelKind::Logo, Camera::new(1.0, 1.0, 5.0));
        let group = scene.add_group(None, Transform::at(Vec3::new(0.0, 1.0, 0.0)));
        let child = scene.add_mesh(
            Some(group),
            Mesh::new(Geometry::plane(1.0, 1.0), Material::color(0xffffff)),
            Transform::at(Vec3::new(2.0, 0.0, 0.0)),
        );
        let p = scene.world_matrix(child).transform_point3(Vec3::ZERO);
        assert!(p.abs_diff_eq(Vec3::new(2.0, 1.0, 0.0), 1e-6));

        scene.transform_mut(group).rotation.z = FRAC_PI_2;
        let p = scene.world_matrix(child).transform_point3(Vec3::ZERO);
        assert!(p.abs_diff_eq(Vec3::new(0.0, 3.0, 0.0), 1e-5));
    }

    #[test]
    fn test_children_of_group() {
        let mut scene = Scene::empty(ModelKind::Logo, Camera::new(1.0, 1.0, 5.0));
        let group = scene.add_group(None, Transform::IDENTITY);
        let a = scene.add_group(Some(group), Transform::IDENTITY);
        let b = scene.add_group(Some(group), Transform::IDENTITY);
        scene.add_group(Some(a), Transform::IDENTITY);
        assert_eq!(scene.children(group).collect::<Vec<_>>(), [a, b]);
    }

    #[test]
    fn test_material_group_fallback() {
        let mesh = Mesh::with_materials(
            Geometry::plane(1.0, 1.0),
            vec![Material::color(0x111111), Material::color(0x222222)],
        );
        assert_eq!(mesh.material(0).color, 0x111111);
        assert_eq!(mesh.material(7).color, 0x222222);
    }

    #[test]
    fn test_resize_updates_aspect() {
        let mut scene = Scene::empty(ModelKind::Trophy, Camera::new(300.0, 300.0, 8.0));
        scene.resize(640.0, 320.0);
        assert!((scene.camera.aspect - 2.0).abs() < f32::EPSILON);
    }
}
