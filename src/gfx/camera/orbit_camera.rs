use super::camera_utils::{convert_matrix4_to_array, Camera, CameraUniform};
use crate::config::OrbitSettings;
use cgmath::*;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.5,
    0.0, 0.0, 0.0, 1.0,
);

/// Spherical camera around `center`, shifted by `offset`.
///
/// The eye sits at `center + spherical(yaw, pitch, radius) + offset` and
/// looks at `center + offset` with +Y up.
#[derive(Debug, Clone, Copy)]
pub struct OrbitCamera {
    pub radius: f32,
    pub pitch: Deg<f32>,
    pub yaw: Deg<f32>,
    pub center: Vector3<f32>,
    pub offset: Vector3<f32>,
    pub up: Vector3<f32>,
    pub bounds: OrbitCameraBounds,
    pub aspect: f32,
    pub fovy: Deg<f32>,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera for OrbitCamera {
    fn build_view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(
            Point3::from_vec(self.eye()),
            Point3::from_vec(self.target()),
            self.up,
        )
    }

    fn build_projection_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

impl OrbitCamera {
    pub fn new(settings: &OrbitSettings, aspect: f32) -> Self {
        let bounds = OrbitCameraBounds {
            min_radius: settings.min_radius,
            max_radius: settings.max_radius,
            min_pitch: Deg(-settings.pitch_limit),
            max_pitch: Deg(settings.pitch_limit),
        };

        let mut camera = Self {
            radius: settings.radius,
            pitch: Deg(settings.pitch),
            yaw: Deg(settings.yaw),
            center: settings.center,
            offset: settings.offset,
            up: Vector3::unit_y(),
            bounds,
            aspect,
            fovy: Deg(settings.fov_y),
            znear: settings.z_near,
            zfar: settings.z_far,
        };
        camera.set_radius(settings.radius);
        camera.set_pitch(Deg(settings.pitch));
        camera
    }

    pub fn eye(&self) -> Vector3<f32> {
        self.center + calculate_cartesian_eye_position(self.pitch, self.yaw, self.radius) + self.offset
    }

    pub fn target(&self) -> Vector3<f32> {
        self.center + self.offset
    }

    /// Unit vector from the orbit center to the eye.
    pub fn camera_dir(&self) -> Vector3<f32> {
        let dir = self.eye() - self.center;
        if dir.magnitude2() > 0.0 {
            dir.normalize()
        } else {
            Vector3::unit_z()
        }
    }

    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius.clamp(self.bounds.min_radius, self.bounds.max_radius);
    }

    pub fn add_radius(&mut self, delta: f32) {
        self.set_radius(self.radius + delta);
    }

    pub fn set_pitch(&mut self, pitch: Deg<f32>) {
        self.pitch = Deg(pitch.0.clamp(self.bounds.min_pitch.0, self.bounds.max_pitch.0));
    }

    pub fn add_pitch(&mut self, delta: Deg<f32>) {
        self.set_pitch(self.pitch + delta);
    }

    pub fn add_yaw(&mut self, delta: Deg<f32>) {
        self.yaw += delta;
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn uniform(&self) -> CameraUniform {
        let dir = self.camera_dir();
        CameraUniform {
            view: convert_matrix4_to_array(self.build_view_matrix()),
            projection: convert_matrix4_to_array(self.build_projection_matrix()),
            camera_dir: [dir.x, dir.y, dir.z, 0.0],
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct OrbitCameraBounds {
    pub min_radius: f32,
    pub max_radius: f32,
    pub min_pitch: Deg<f32>,
    pub max_pitch: Deg<f32>,
}

fn calculate_cartesian_eye_position(pitch: Deg<f32>, yaw: Deg<f32>, radius: f32) -> Vector3<f32> {
    let (pitch, yaw) = (Rad::from(pitch).0, Rad::from(yaw).0);
    Vector3::new(
        radius * pitch.cos() * yaw.sin(),
        radius * pitch.sin(),
        radius * pitch.cos() * yaw.cos(),
    )
}
