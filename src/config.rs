//! Viewer configuration
//!
//! Plain structs with `Default` values matching the stock chessboard scene and
//! `with_*` builder methods for overrides.

use std::path::PathBuf;

use cgmath::{Deg, Matrix4, Vector3};

use crate::gfx::scene::ImportOptions;

/// Environment variable consulted when no asset path is given on the
/// command line.
pub const ASSET_ENV_VAR: &str = "CHESSVIEW_ASSET";
pub const DEFAULT_ASSET: &str = "assets/chessboard.glb";

/// What the viewer does when the scene fails to import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportFailurePolicy {
    /// Log the error and keep running with an empty scene.
    #[default]
    RenderEmpty,
    /// Log the error and exit.
    Abort,
}

/// Orbit camera parameters. Angles are in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitSettings {
    pub yaw: f32,
    pub pitch: f32,
    pub radius: f32,
    pub center: Vector3<f32>,
    /// Added to both the eye and the look-at point
    pub offset: Vector3<f32>,
    pub zoom_speed: f32,
    /// Degrees of rotation per pixel of mouse motion
    pub sensitivity: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    pub pitch_limit: f32,
    pub fov_y: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 20.0,
            radius: 8.0,
            center: Vector3::new(0.0, 0.0, 0.0),
            offset: Vector3::new(0.0, 3.0, 0.0),
            zoom_speed: 1.0,
            sensitivity: 0.3,
            min_radius: 1.0,
            max_radius: 100.0,
            pitch_limit: 89.9,
            fov_y: 45.0,
            z_near: 0.1,
            z_far: 100.0,
        }
    }
}

impl OrbitSettings {
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_angles(mut self, yaw: f32, pitch: f32) -> Self {
        self.yaw = yaw;
        self.pitch = pitch;
        self
    }

    pub fn with_sensitivity(mut self, sensitivity: f32) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    pub fn with_zoom_speed(mut self, zoom_speed: f32) -> Self {
        self.zoom_speed = zoom_speed;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub asset_path: PathBuf,
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub clear_color: [f64; 3],
    pub vsync: bool,
    pub import: ImportOptions,
    pub on_import_failure: ImportFailurePolicy,
    pub orbit: OrbitSettings,
    /// Applied to every vertex before the view transform
    pub model_transform: Matrix4<f32>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            asset_path: PathBuf::from(DEFAULT_ASSET),
            title: "Chessboard".to_string(),
            width: 1280,
            height: 720,
            clear_color: [0.5, 0.6, 0.6],
            vsync: true,
            import: ImportOptions::default(),
            on_import_failure: ImportFailurePolicy::default(),
            orbit: OrbitSettings::default(),
            model_transform: default_model_transform(),
        }
    }
}

/// Stands the board upright: rotate -90° about X, then drop it by one unit.
pub fn default_model_transform() -> Matrix4<f32> {
    Matrix4::from_angle_x(Deg(-90.0)) * Matrix4::from_translation(Vector3::new(0.0, -1.0, 0.0))
}

impl ViewerConfig {
    /// Resolves the asset path from the first CLI argument, then
    /// [`ASSET_ENV_VAR`], then [`DEFAULT_ASSET`].
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self::resolve(args, std::env::var(ASSET_ENV_VAR).ok())
    }

    fn resolve<I>(args: I, env_asset: Option<String>) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let asset_path = args
            .into_iter()
            .nth(1)
            .or(env_asset)
            .filter(|path| !path.is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_ASSET), PathBuf::from);

        Self::default().with_asset_path(asset_path)
    }

    pub fn with_asset_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.asset_path = path.into();
        self
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_owned();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_clear_color(mut self, color: [f64; 3]) -> Self {
        self.clear_color = color;
        self
    }

    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    pub fn with_import_options(mut self, options: ImportOptions) -> Self {
        self.import = options;
        self
    }

    pub fn with_import_failure_policy(mut self, policy: ImportFailurePolicy) -> Self {
        self.on_import_failure = policy;
        self
    }

    pub fn with_orbit(mut self, orbit: OrbitSettings) -> Self {
        self.orbit = orbit;
        self
    }

    pub fn with_model_transform(mut self, transform: Matrix4<f32>) -> Self {
        self.model_transform = transform;
        self
    }

    pub fn clear_color(&self) -> wgpu::Color {
        let [r, g, b] = self.clear_color;
        wgpu::Color { r, g, b, a: 1.0 }
    }
}
