//! Window, event loop and per-frame orchestration
//!
//! Import finishes inside `resumed` before the first frame is drawn. Every
//! redraw snapshots the selectors, renders the scene, then builds the UI,
//! which may change the selectors for the next frame.

use std::{sync::Arc, time::Instant};

use anyhow::Context;
use log::{error, info};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{DeviceEvent, DeviceId, ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes, WindowId},
};

use crate::{
    config::{ImportFailurePolicy, ViewerConfig},
    error::SceneResult,
    gfx::{
        camera::{CameraController, CameraManager, OrbitCamera},
        material::VariantSelectors,
        rendering::RenderEngine,
        scene::{load_scene, FrameState, SceneImporter, SceneModel, SceneStatistics},
    },
    ui::{controls_overlay, material_selector_panel, UiManager},
};

/// Applies `policy` to the outcome of an import.
///
/// `RenderEmpty` turns a failure into an empty model; `Abort` propagates it.
pub fn resolve_import<M>(
    result: SceneResult<SceneModel<M>>,
    policy: ImportFailurePolicy,
) -> anyhow::Result<SceneModel<M>> {
    match (result, policy) {
        (Ok(model), _) => Ok(model),
        (Err(e), ImportFailurePolicy::RenderEmpty) => {
            error!("Scene import failed, rendering an empty scene: {:#}", anyhow::Error::from(e));
            Ok(SceneModel::empty())
        }
        (Err(e), ImportFailurePolicy::Abort) => Err(e).context("Scene import failed"),
    }
}

pub struct ViewerApp {
    config: ViewerConfig,
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    ui_manager: Option<UiManager>,
    scene: SceneModel,
    stats: SceneStatistics,
    camera_manager: CameraManager,
    selectors: VariantSelectors,
    start: Instant,
    fatal: Option<anyhow::Error>,
}

impl ViewerApp {
    pub fn new(config: ViewerConfig) -> Self {
        let aspect = config.width as f32 / config.height.max(1) as f32;
        let camera = OrbitCamera::new(&config.orbit, aspect);
        let controller = CameraController::new(config.orbit.sensitivity, config.orbit.zoom_speed);

        Self {
            camera_manager: CameraManager::new(camera, controller),
            config,
            window: None,
            render_engine: None,
            ui_manager: None,
            scene: SceneModel::empty(),
            stats: SceneStatistics::default(),
            selectors: VariantSelectors::default(),
            start: Instant::now(),
            fatal: None,
        }
    }

    /// Runs the event loop until the window closes. Returns the error that
    /// stopped the viewer, if any.
    pub fn run(mut self) -> anyhow::Result<()> {
        let event_loop = EventLoop::new().context("Failed to create event loop")?;
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop
            .run_app(&mut self)
            .context("Event loop terminated abnormally")?;

        self.scene.release();
        match self.fatal.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn initialize(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let window = event_loop
            .create_window(
                WindowAttributes::default()
                    .with_title(self.config.title.clone())
                    .with_inner_size(PhysicalSize::new(self.config.width, self.config.height)),
            )
            .context("Failed to create window")?;
        let window = Arc::new(window);

        let (width, height) = window.inner_size().into();
        let renderer = pollster::block_on(RenderEngine::new(
            window.clone(),
            width,
            height,
            self.config.vsync,
        ))?;
        self.camera_manager.resize(width, height);

        let importer = SceneImporter::new(self.config.import);
        let imported = load_scene(&self.config.asset_path)
            .and_then(|graph| importer.import_model(renderer.device(), &graph));
        self.scene = resolve_import(imported, self.config.on_import_failure)?;
        self.stats = self.scene.statistics();
        info!(
            "Scene ready: {} meshes, {} triangles, {} unclassified",
            self.stats.meshes, self.stats.triangles, self.stats.unclassified
        );

        self.ui_manager = Some(UiManager::new(
            renderer.device(),
            renderer.queue(),
            renderer.surface_format(),
            &window,
        ));
        self.render_engine = Some(renderer);
        self.window = Some(window);
        self.start = Instant::now();
        Ok(())
    }

    fn redraw(&mut self) {
        let (Some(render_engine), Some(window)) = (self.render_engine.as_mut(), self.window.as_ref())
        else {
            return;
        };

        let frame = FrameState {
            elapsed: self.start.elapsed().as_secs_f32(),
            variants: self.selectors.snapshot(),
        };

        let ui_manager = &mut self.ui_manager;
        let selectors = &mut self.selectors;
        let stats = &self.stats;

        render_engine.render_frame(
            &self.scene,
            &frame,
            self.camera_manager.uniform(),
            self.config.model_transform,
            self.config.clear_color(),
            ui_manager.as_mut().map(|ui_manager| {
                move |device: &wgpu::Device,
                      queue: &wgpu::Queue,
                      encoder: &mut wgpu::CommandEncoder,
                      view: &wgpu::TextureView| {
                    ui_manager.draw(device, queue, encoder, window, view, |ui| {
                        material_selector_panel(ui, selectors, stats);
                        controls_overlay(ui);
                    });
                }
            }),
        );
    }

    fn ui_wants_input(&self) -> bool {
        self.ui_manager
            .as_ref()
            .is_some_and(UiManager::wants_input)
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.initialize(event_loop) {
            error!("{:#}", e);
            self.fatal = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let Some(window) = self.window.clone() else {
            return;
        };

        if let Some(ui_manager) = self.ui_manager.as_mut() {
            let captured = ui_manager.handle_input(&window, window_id, &event);
            // Releases still reach the camera so an orbit never gets stuck
            let is_release = matches!(
                event,
                WindowEvent::MouseInput {
                    state: ElementState::Released,
                    ..
                }
            );
            if captured && !is_release {
                return;
            }
        }

        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            }
            | WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.camera_manager.process_mouse_button(button, state);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.camera_manager.process_scroll(&delta);
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.camera_manager.resize(width, height);
                if let Some(render_engine) = self.render_engine.as_mut() {
                    render_engine.resize(width, height);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => (),
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _device_id: DeviceId, event: DeviceEvent) {
        if self.ui_wants_input() {
            return;
        }
        self.camera_manager.process_event(&event);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::{Malformed, SceneError},
        gfx::scene::PrimitiveGroup,
    };

    fn failed() -> SceneResult<SceneModel<PrimitiveGroup>> {
        Err(SceneError::from(Malformed::MissingRoot))
    }

    #[test]
    fn test_render_empty_policy_swallows_failure() {
        let model = resolve_import(failed(), ImportFailurePolicy::RenderEmpty).unwrap();
        assert!(model.is_empty());
    }

    #[test]
    fn test_abort_policy_propagates_failure() {
        let err = resolve_import(failed(), ImportFailurePolicy::Abort).unwrap_err();
        let scene_error = err.downcast_ref::<SceneError>().unwrap();
        assert_eq!(scene_error.malformed(), Some(&Malformed::MissingRoot));
    }

    #[test]
    fn test_successful_import_passes_through() {
        let model = SceneModel::new(vec![PrimitiveGroup::new(
            "pawn",
            Vec::new(),
            Vec::new(),
            Default::default(),
        )]);
        let resolved = resolve_import(Ok(model), ImportFailurePolicy::Abort).unwrap();
        assert_eq!(resolved.len(), 1);
    }
}
