//! The five decorative models and their per-frame animation

use std::f32::consts::{FRAC_PI_2, PI, TAU};
use std::rc::Rc;

use glam::Vec3;
use rand::Rng;

use super::{Camera, Geometry, Light, Material, Mesh, NodeId, Scene, Transform};

const TEAL: u32 = 0x0f_76_6e;
const CYAN: u32 = 0x06_b6_d4;
const SECONDARY_TEAL: u32 = 0x14_b8_a6;
const GOLD: u32 = 0xff_d7_00;
const WHITE: u32 = 0xff_ff_ff;

const TROPHY_PARTICLES: usize = 50;
/// Particles leaving this |y| band re-enter at the bottom
const PARTICLE_BOUND: f32 = 5.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModelKind {
    Logo,
    Trophy,
    PaperStack,
    GraduationCap,
    LoadingTorus,
}

impl ModelKind {
    /// Square size used when the container reports zero
    pub const fn default_size(self) -> f64 {
        match self {
            Self::Logo => 200.0,
            Self::Trophy => 300.0,
            Self::PaperStack | Self::GraduationCap => 250.0,
            Self::LoadingTorus => 150.0,
        }
    }

    const fn camera_z(self) -> f32 {
        match self {
            Self::Logo | Self::PaperStack => 5.0,
            Self::Trophy => 8.0,
            Self::GraduationCap => 6.0,
            Self::LoadingTorus => 3.0,
        }
    }
}

impl std::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Logo => "logo",
            Self::Trophy => "trophy",
            Self::PaperStack => "paper_stack",
            Self::GraduationCap => "graduation_cap",
            Self::LoadingTorus => "loading_torus",
        };
        write!(f, "{s}")
    }
}

/// Handles to the nodes a model animates
#[derive(Clone, Debug)]
pub(super) enum Rig {
    None,
    Logo { cube: NodeId },
    Trophy { trophy: NodeId, particles: Vec<(NodeId, Vec3)> },
    PaperStack { stack: NodeId },
    GraduationCap { cap: NodeId },
    LoadingTorus { torus: NodeId, sphere: NodeId },
}

impl Scene {
    /// Build the fixed composition for `kind` sized `width` x `height`
    pub fn build(kind: ModelKind, width: f64, height: f64, rng: &mut impl Rng) -> Self {
        let mut scene = Self::empty(kind, Camera::new(width, height, kind.camera_z()));
        scene.rig = match kind {
            ModelKind::Logo => scene.build_logo(),
            ModelKind::Trophy => scene.build_trophy(rng),
            ModelKind::PaperStack => scene.build_paper_stack(rng),
            ModelKind::GraduationCap => scene.build_graduation_cap(),
            ModelKind::LoadingTorus => scene.build_loading_torus(),
        };
        scene
    }

    fn add_lights(&mut self, directional: f32, position: Vec3, ambient: f32) {
        self.lights.push(Light::Directional {
            color: WHITE,
            intensity: directional,
            position,
        });
        self.lights.push(Light::Ambient {
            color: WHITE,
            intensity: ambient,
        });
    }

    fn build_logo(&mut self) -> Rig {
        let materials = [TEAL, TEAL, CYAN, CYAN, SECONDARY_TEAL, SECONDARY_TEAL]
            .map(Material::color)
            .to_vec();
        let cube = self.add_mesh(
            None,
            Mesh::with_materials(Geometry::cuboid(2.0, 2.0, 2.0), materials),
            Transform::IDENTITY,
        );
        self.add_lights(0.8, Vec3::splat(5.0), 0.4);
        Rig::Logo { cube }
    }

    fn build_trophy(&mut self, rng: &mut impl Rng) -> Rig {
        let trophy = self.add_group(None, Transform::IDENTITY);
        let gold = Material::color(GOLD);
        let cyan = Material::color(CYAN);

        self.add_mesh(
            Some(trophy),
            Mesh::new(Geometry::cone(1.0, 1.5, 24), gold),
            Transform::at(Vec3::new(0.0, 0.5, 0.0)),
        );
        self.add_mesh(
            Some(trophy),
            Mesh::new(Geometry::cylinder(1.5, 1.5, 0.3, 24), cyan),
            Transform::at(Vec3::new(0.0, -1.0, 0.0)),
        );
        self.add_mesh(
            Some(trophy),
            Mesh::new(Geometry::cylinder(0.2, 0.2, 1.0, 12), cyan),
            Transform::at(Vec3::new(0.0, -0.3, 0.0)),
        );

        let handle = Rc::new(Geometry::torus_arc(0.6, 0.15, 8, 24, PI));
        for x in [-1.2, 1.2] {
            self.add_mesh(
                Some(trophy),
                Mesh::shared(handle.clone(), gold),
                Transform::at(Vec3::new(x, 0.5, 0.0)).rotated(Vec3::new(0.0, 0.0, FRAC_PI_2)),
            );
        }

        self.add_lights(1.0, Vec3::new(5.0, 10.0, 7.0), 0.5);

        let particle_group = self.add_group(None, Transform::IDENTITY);
        let dot = Rc::new(Geometry::sphere(0.1, 6, 4));
        let particles = (0..TROPHY_PARTICLES)
            .map(|_| {
                let color = hsl_to_rgb(rng.gen::<f32>(), 1.0, 0.6);
                let position = Vec3::new(
                    (rng.gen::<f32>() - 0.5) * 10.0,
                    (rng.gen::<f32>() - 0.5) * 10.0,
                    (rng.gen::<f32>() - 0.5) * 10.0,
                );
                let velocity = Vec3::new(
                    (rng.gen::<f32>() - 0.5) * 0.1,
                    rng.gen::<f32>() * 0.1,
                    (rng.gen::<f32>() - 0.5) * 0.1,
                );
                let id = self.add_mesh(
                    Some(particle_group),
                    Mesh::shared(dot.clone(), Material::color(color)),
                    Transform::at(position),
                );
                (id, velocity)
            })
            .collect();

        Rig::Trophy { trophy, particles }
    }

    fn build_paper_stack(&mut self, rng: &mut impl Rng) -> Rig {
        let stack = self.add_group(None, Transform::IDENTITY);
        let paper = Rc::new(Geometry::plane(2.0, 2.5));
        let colors = [WHITE, 0xf0_f9_ff, 0xe0_f7_f4];

        for i in 0..5 {
            let tilt = Vec3::new(
                (rng.gen::<f32>() - 0.5) * 0.1,
                (rng.gen::<f32>() - 0.5) * 0.1,
                0.0,
            );
            self.add_mesh(
                Some(stack),
                Mesh::shared(paper.clone(), Material::color(colors[i % colors.len()]).double_sided()),
                Transform::at(Vec3::new(0.0, 0.0, i as f32 * 0.1)).rotated(tilt),
            );
        }

        self.add_lights(0.8, Vec3::splat(5.0), 0.5);
        Rig::PaperStack { stack }
    }

    fn build_graduation_cap(&mut self) -> Rig {
        let cap = self.add_group(None, Transform::IDENTITY);

        self.add_mesh(
            Some(cap),
            Mesh::new(Geometry::plane(2.5, 2.5), Material::color(0x1a_1a_1a).double_sided()),
            Transform::IDENTITY.rotated(Vec3::new(-0.3, 0.0, 0.0)),
        );
        self.add_mesh(
            Some(cap),
            Mesh::new(
                Geometry::sphere_section(1.2, 16, 8, 0.0, TAU, 0.0, PI / 3.0),
                Material::color(0x00_00_00),
            ),
            Transform::at(Vec3::new(0.0, 0.0, 0.3)).rotated(Vec3::new(-0.3, 0.0, 0.0)),
        );
        self.add_mesh(
            Some(cap),
            Mesh::new(Geometry::cylinder(0.05, 0.3, 1.5, 12), Material::color(GOLD)),
            Transform::at(Vec3::new(0.0, -1.0, 0.5)),
        );

        self.add_lights(0.9, Vec3::splat(5.0), 0.5);
        Rig::GraduationCap { cap }
    }

    fn build_loading_torus(&mut self) -> Rig {
        let torus = self.add_mesh(
            None,
            Mesh::new(
                Geometry::torus(1.0, 0.4, 12, 40),
                Material::color(CYAN).emissive(TEAL),
            ),
            Transform::IDENTITY,
        );
        let sphere = self.add_mesh(
            None,
            Mesh::new(
                Geometry::sphere(0.3, 16, 12),
                Material::color(SECONDARY_TEAL).emissive(CYAN),
            ),
            Transform::at(Vec3::new(0.0, 0.0, 0.2)),
        );
        self.add_lights(0.8, Vec3::splat(5.0), 0.6);
        Rig::LoadingTorus { torus, sphere }
    }

    /// Apply one frame of animation; `now_ms` is wall-clock milliseconds
    pub fn advance(&mut self, now_ms: f64) {
        // Epoch milliseconds overflow f32 precision; take the trig in f64
        let sine = |rate: f64| (now_ms * rate).sin() as f32;
        let cosine = |rate: f64| (now_ms * rate).cos() as f32;
        // Taken out so the node arena can be borrowed mutably
        let mut rig = std::mem::replace(&mut self.rig, Rig::None);

        match &mut rig {
            Rig::None => {}
            Rig::Logo { cube } => {
                let t = self.transform_mut(*cube);
                t.rotation.x += 0.005;
                t.rotation.y += 0.008;
            }
            Rig::Trophy { trophy, particles } => {
                let t = self.transform_mut(*trophy);
                t.rotation.y += 0.01;
                t.position.y = sine(0.001) * 0.3;

                for (id, velocity) in particles.iter() {
                    let p = self.transform_mut(*id);
                    p.position += *velocity;
                    p.rotation.x += 0.02;
                    if p.position.y.abs() > PARTICLE_BOUND {
                        p.position.y = -PARTICLE_BOUND;
                    }
                }
            }
            Rig::PaperStack { stack } => {
                let t = self.transform_mut(*stack);
                t.rotation += Vec3::new(0.003, 0.005, 0.002);
                t.position.y = sine(0.0005) * 0.5;
            }
            Rig::GraduationCap { cap } => {
                let t = self.transform_mut(*cap);
                t.rotation.y += 0.005;
                t.position.y = sine(0.0015) * 0.4;
                t.rotation.z = cosine(0.001) * 0.2;
            }
            Rig::LoadingTorus { torus, sphere } => {
                let t = self.transform_mut(*torus);
                t.rotation.x += 0.01;
                t.rotation.y += 0.015;
                let s = self.transform_mut(*sphere);
                s.rotation.x -= 0.02;
                s.rotation.z -= 0.015;
            }
        }

        self.rig = rig;
    }
}

/// HSL (each in 0..=1) to 0xRRGGBB
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> u32 {
    let hue_to_channel = |p: f32, q: f32, t: f32| {
        let t = t.rem_euclid(1.0);
        if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * 6.0 * (2.0 / 3.0 - t)
        } else {
            p
        }
    };

    let (r, g, b) = if s <= 0.0 {
        (l, l, l)
    } else {
        let q = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        (
            hue_to_channel(p, q, h + 1.0 / 3.0),
            hue_to_channel(p, q, h),
            hue_to_channel(p, q, h - 1.0 / 3.0),
        )
    };

    let byte = |c: f32| u32::from((c.clamp(0.0, 1.0) * 255.0).round() as u8);
    (byte(r) << 16) | (byte(g) << 8) | byte(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn build(kind: ModelKind) -> Scene {
        let mut rng = SmallRng::seed_from_u64(7);
        Scene::build(kind, 200.0, 100.0, &mut rng)
    }

    fn rotation(scene: &Scene, id: NodeId) -> Vec3 {
        scene.node(id).transform.rotation
    }

    #[test]
    fn test_every_kind_has_meshes_and_two_lights() {
        for kind in [
            ModelKind::Logo,
            ModelKind::Trophy,
            ModelKind::PaperStack,
            ModelKind::GraduationCap,
            ModelKind::LoadingTorus,
        ] {
            let scene = build(kind);
            assert!(scene.meshes().count() > 0, "{kind} has no meshes");
            assert_eq!(scene.lights.len(), 2);
            assert!((scene.camera.aspect - 2.0).abs() < f32::EPSILON);
        }
    }

    #[test]
    fn test_default_sizes() {
        assert!((ModelKind::Logo.default_size() - 200.0).abs() < f64::EPSILON);
        assert!((ModelKind::Trophy.default_size() - 300.0).abs() < f64::EPSILON);
        assert!((ModelKind::LoadingTorus.default_size() - 150.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_logo_rotation_accumulates() {
        let mut scene = build(ModelKind::Logo);
        let Rig::Logo { cube } = scene.rig.clone() else { panic!("logo rig") };
        for _ in 0..10 {
            scene.advance(0.0);
        }
        let r = rotation(&scene, cube);
        assert!((r.x - 0.05).abs() < 1e-5);
        assert!((r.y - 0.08).abs() < 1e-5);
    }

    #[test]
    fn test_trophy_composition() {
        let scene = build(ModelKind::Trophy);
        let Rig::Trophy { trophy, particles } = &scene.rig else { panic!("trophy rig") };
        assert_eq!(scene.children(*trophy).count(), 5);
        assert_eq!(particles.len(), TROPHY_PARTICLES);
        for (id, v) in particles {
            let p = scene.node(*id).transform.position;
            assert!(p.abs().max_element() <= 5.0);
            assert!(v.y >= 0.0 && v.y <= 0.1);
        }
    }

    #[test]
    fn test_trophy_bounces_with_wall_clock() {
        let mut scene = build(ModelKind::Trophy);
        let Rig::Trophy { trophy, .. } = scene.rig.clone() else { panic!("trophy rig") };
        let quarter_period = std::f64::consts::FRAC_PI_2 / 0.001;
        scene.advance(quarter_period);
        let t = scene.node(trophy).transform;
        assert!((t.position.y - 0.3).abs() < 1e-4);
        assert!((t.rotation.y - 0.01).abs() < 1e-6);
    }

    #[test]
    fn test_bob_follows_epoch_timestamps() {
        let t0 = 1_792_300_000_000.0_f64;
        let mut scene = build(ModelKind::Trophy);
        let Rig::Trophy { trophy, .. } = scene.rig.clone() else { panic!("trophy rig") };

        let mut last = None;
        let mut changes = 0;
        for frame in 0..60 {
            let now = t0 + f64::from(frame) * 16.0;
            scene.advance(now);
            let y = scene.node(trophy).transform.position.y;
            let expected = ((now * 0.001).sin() * 0.3) as f32;
            assert!((y - expected).abs() < 1e-5, "frame {frame}: {y} vs {expected}");
            if last.is_some_and(|prev: f32| (prev - y).abs() > f32::EPSILON) {
                changes += 1;
            }
            last = Some(y);
        }
        assert!(changes > 50);
    }

    #[test]
    fn test_cap_toss_follows_epoch_timestamps() {
        let t0 = 1_792_300_000_000.0_f64;
        let mut scene = build(ModelKind::GraduationCap);
        let Rig::GraduationCap { cap } = scene.rig.clone() else { panic!("cap rig") };
        for frame in 0..30 {
            let now = t0 + f64::from(frame) * 16.0;
            scene.advance(now);
            let t = scene.node(cap).transform;
            assert!((t.position.y - ((now * 0.0015).sin() * 0.4) as f32).abs() < 1e-5);
            assert!((t.rotation.z - ((now * 0.001).cos() * 0.2) as f32).abs() < 1e-5);
        }
    }

    #[test]
    fn test_trophy_particles_wrap_to_bottom() {
        let mut scene = build(ModelKind::Trophy);
        let Rig::Trophy { particles, .. } = scene.rig.clone() else { panic!("trophy rig") };
        let (id, velocity) = particles[0];
        scene.transform_mut(id).position.y = PARTICLE_BOUND;

        // Any upward step past the bound resets to the bottom edge
        scene.advance(0.0);
        let y = scene.node(id).transform.position.y;
        if velocity.y > 0.0 {
            assert!((y + PARTICLE_BOUND).abs() < f32::EPSILON);
        } else {
            assert!((y - PARTICLE_BOUND).abs() < f32::EPSILON);
        }
    }

    #[test]
    fn test_particles_never_leave_band() {
        let mut scene = build(ModelKind::Trophy);
        let Rig::Trophy { particles, .. } = scene.rig.clone() else { panic!("trophy rig") };
        for frame in 0..500 {
            scene.advance(f64::from(frame) * 16.0);
        }
        for (id, _) in particles {
            assert!(scene.node(id).transform.position.y.abs() <= PARTICLE_BOUND + 0.1);
        }
    }

    #[test]
    fn test_paper_stack_layers() {
        let scene = build(ModelKind::PaperStack);
        let Rig::PaperStack { stack } = &scene.rig else { panic!("paper rig") };
        let layers: Vec<f32> = scene
            .children(*stack)
            .map(|id| scene.node(id).transform.position.z)
            .collect();
        assert_eq!(layers.len(), 5);
        assert!((layers[4] - 0.4).abs() < 1e-6);
        assert!(scene.meshes().all(|(_, m)| m.material(0).double_sided));
    }

    #[test]
    fn test_cap_toss() {
        let mut scene = build(ModelKind::GraduationCap);
        let Rig::GraduationCap { cap } = scene.rig.clone() else { panic!("cap rig") };
        scene.advance(0.0);
        let t = scene.node(cap).transform;
        assert!(t.position.y.abs() < 1e-6);
        assert!((t.rotation.z - 0.2).abs() < 1e-6);
        assert!((t.rotation.y - 0.005).abs() < 1e-6);
    }

    #[test]
    fn test_loading_counter_rotation() {
        let mut scene = build(ModelKind::LoadingTorus);
        let Rig::LoadingTorus { torus, sphere } = scene.rig.clone() else { panic!("loading rig") };
        scene.advance(0.0);
        scene.advance(16.0);
        assert!((rotation(&scene, torus).y - 0.03).abs() < 1e-6);
        assert!((rotation(&scene, sphere).x + 0.04).abs() < 1e-6);
        assert!((rotation(&scene, sphere).z + 0.03).abs() < 1e-6);
    }

    #[test]
    fn test_hsl_primaries() {
        assert_eq!(hsl_to_rgb(0.0, 1.0, 0.5), 0xff0000);
        assert_eq!(hsl_to_rgb(1.0 / 3.0, 1.0, 0.5), 0x00ff00);
        assert_eq!(hsl_to_rgb(2.0 / 3.0, 1.0, 0.5), 0x0000ff);
        assert_eq!(hsl_to_rgb(0.5, 0.0, 0.2), 0x333333);
    }
}
