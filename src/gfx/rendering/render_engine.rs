//! wgpu surface, device and the per-frame scene pass
//!
//! One pipeline ("Procedural") draws every mesh. Group 0 carries the frame
//! uniforms, group 1 the per-draw uniforms at a dynamic offset.

use std::sync::Arc;

use anyhow::{anyhow, Context};
use cgmath::Matrix4;
use log::{debug, error, info, warn};
use wgpu::TextureFormat;

use super::{
    pipeline_manager::{PipelineConfig, PipelineManager},
    scene_pass::ScenePass,
};
use crate::gfx::{
    camera::camera_utils::CameraUniform,
    resources::{
        draw_bindings::DrawBindings,
        global_bindings::{FrameUBO, FrameUniform, GlobalBindings},
        texture_resource::TextureResource,
    },
    scene::model::{FrameState, SceneModel},
    shading::{shader_source, MaterialTable},
};

const SHADER_NAME: &str = "procedural";
const PIPELINE_NAME: &str = "Procedural";

/// Draw slots allocated up front; the ring grows when a model needs more.
const INITIAL_DRAW_CAPACITY: u32 = 64;

/// Owns every GPU object the viewer renders with.
pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    depth_texture: TextureResource,
    format: TextureFormat,
    pipeline_manager: PipelineManager,
    frame_ubo: FrameUBO,
    global_bindings: GlobalBindings,
    draw_bindings: DrawBindings,
}

impl RenderEngine {
    /// Creates the surface for `window`, picks an adapter and device, and
    /// compiles the procedural material shader.
    ///
    /// Fails when no adapter or device is available, or when the shader
    /// or its pipeline does not validate.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        vsync: bool,
    ) -> anyhow::Result<RenderEngine> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance
            .create_surface(window)
            .context("Failed to create surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("Failed to request adapter")?;
        info!("Using adapter: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits::downlevel_defaults()
                    .using_resolution(adapter.limits()),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .context("Failed to request a device")?;
        let device = Arc::new(device);
        let queue = Arc::new(queue);

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_capabilities.formats.first().copied())
            .ok_or_else(|| anyhow!("Surface reports no supported formats"))?;
        let alpha_mode = surface_capabilities
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: present_mode(vsync),
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        debug!("Surface configured: {:?} {}x{}", format, config.width, config.height);

        let depth_texture =
            TextureResource::create_depth_texture(&device, &config, "depth_texture");

        let frame_ubo = FrameUBO::new(&device);
        let global_bindings = GlobalBindings::new(&device, &frame_ubo);
        let draw_bindings = DrawBindings::new(&device, INITIAL_DRAW_CAPACITY);

        let mut pipeline_manager = PipelineManager::new(device.clone());
        pipeline_manager
            .load_shader(SHADER_NAME, &shader_source(MaterialTable::standard()))
            .map_err(|e| anyhow!(e))?;
        pipeline_manager.register_pipeline(
            PIPELINE_NAME,
            procedural_pipeline_config(
                vec![
                    global_bindings.bind_group_layout().clone(),
                    draw_bindings.bind_group_layout().clone(),
                ],
                format,
            ),
        );
        pipeline_manager
            .create_all_pipelines()
            .map_err(|errors| anyhow!(errors.join("; ")))?;

        Ok(RenderEngine {
            surface,
            device,
            queue,
            config,
            depth_texture,
            format,
            pipeline_manager,
            frame_ubo,
            global_bindings,
            draw_bindings,
        })
    }

    /// Records and presents one frame: the scene pass, then the optional
    /// UI overlay on the same surface texture.
    ///
    /// A lost or outdated surface is reconfigured and the frame skipped.
    pub fn render_frame<F>(
        &mut self,
        scene: &SceneModel,
        frame: &FrameState,
        camera: CameraUniform,
        model_transform: Matrix4<f32>,
        clear_color: wgpu::Color,
        ui_callback: Option<F>,
    ) where
        F: FnOnce(&wgpu::Device, &wgpu::Queue, &mut wgpu::CommandEncoder, &wgpu::TextureView),
    {
        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("Surface lost or outdated, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return;
            }
            Err(wgpu::SurfaceError::Timeout) => {
                debug!("Surface texture timed out, skipping frame");
                return;
            }
            Err(e) => {
                error!("Failed to acquire surface texture: {}", e);
                return;
            }
        };

        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.draw_bindings
            .ensure_capacity(&self.device, scene.len() as u32);
        self.frame_ubo
            .update_content(&self.queue, FrameUniform::new(camera, model_transform));

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            if let Some(pipeline) = self.pipeline_manager.get_pipeline(PIPELINE_NAME) {
                render_pass.set_pipeline(pipeline);
                render_pass.set_bind_group(0, self.global_bindings.bind_group(), &[]);

                let mut program = ScenePass::new(&mut render_pass, &self.queue, &self.draw_bindings);
                scene.render(&mut program, frame);
            }
        }

        if let Some(ui_callback) = ui_callback {
            ui_callback(
                &self.device,
                &self.queue,
                &mut encoder,
                &surface_texture_view,
            );
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
    }

    /// Reconfigures the surface and depth buffer. Zero sizes (minimized
    /// windows) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);

        self.depth_texture =
            TextureResource::create_depth_texture(&self.device, &self.config, "depth_texture");
    }

    pub fn get_surface_size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.format
    }

    /// Switches between `Fifo` (vsync) and `Immediate` presentation.
    pub fn set_vsync(&mut self, enable: bool) {
        self.config.present_mode = present_mode(enable);
        self.surface.configure(&self.device, &self.config);
    }
}

/// The scene pipeline. Imported meshes carry no reliable winding, so both
/// faces are drawn.
fn procedural_pipeline_config(
    layouts: Vec<wgpu::BindGroupLayout>,
    color_format: TextureFormat,
) -> PipelineConfig {
    PipelineConfig::default_with_shader(SHADER_NAME)
        .with_label(PIPELINE_NAME)
        .with_bind_group_layouts(layouts)
        .with_depth_format(TextureResource::DEPTH_FORMAT)
        .with_color_format(color_format)
        .with_cull_mode(None)
}

fn present_mode(vsync: bool) -> wgpu::PresentMode {
    if vsync {
        wgpu::PresentMode::Fifo
    } else {
        wgpu::PresentMode::Immediate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_procedural_pipeline_draws_both_faces() {
        let config = procedural_pipeline_config(Vec::new(), TextureFormat::Bgra8Unorm);
        assert_eq!(config.cull_mode, None);
        assert_eq!(config.shader, SHADER_NAME);
        assert_eq!(config.depth_format, Some(TextureResource::DEPTH_FORMAT));
    }

    #[test]
    fn test_present_mode_follows_vsync() {
        assert_eq!(present_mode(true), wgpu::PresentMode::Fifo);
        assert_eq!(present_mode(false), wgpu::PresentMode::Immediate);
    }
}
