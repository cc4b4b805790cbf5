//! wgpu renderer shared by the web and native front-ends.
//!
//! Each uploaded generation owns its geometry (two per-instance vertex
//! buffers) and its material (a uniform buffer plus bind group); both are
//! destroyed together on release.

use crate::camera::Camera;
use crate::constants::{CLEAR_COLOR, SPRITE_SIZE_PX};
use crate::error::{ParticleError, Result};
use crate::generator::ParticleBuffer;
use crate::system::{FallbackScene, GeometryHandle, SceneBackend};
use crate::uniforms::{UniformBlock, UniformSnapshot};
use fnv::FnvHashMap;
use smallvec::SmallVec;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct CameraBlock {
    view_proj: [[f32; 4]; 4],
    sprite: [f32; 4],
}

struct ParticleMaterial {
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

struct ParticleGeometry {
    positions: wgpu::Buffer,
    lifetimes: wgpu::Buffer,
    count: u32,
    material: ParticleMaterial,
}

impl ParticleGeometry {
    fn destroy(self) {
        self.positions.destroy();
        self.lifetimes.destroy();
        self.material.uniform_buffer.destroy();
    }
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    camera_buffer: wgpu::Buffer,
    camera: Camera,
    geometries: FnvHashMap<GeometryHandle, ParticleGeometry>,
    scene: SmallVec<[GeometryHandle; 2]>,
    clear_color: wgpu::Color,
}

fn unavailable(what: impl std::fmt::Display) -> ParticleError {
    ParticleError::ResourceUnavailable(what.to_string())
}

impl<'a> GpuState<'a> {
    pub async fn new(
        instance: &wgpu::Instance,
        surface: wgpu::Surface<'a>,
        width: u32,
        height: u32,
    ) -> Result<Self> {
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| unavailable("no GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| unavailable(format!("request_device error: {e:?}")))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| unavailable("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("particles_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::PARTICLES_WGSL.into()),
        });
        let uniform_entry = |binding: u32, visibility: wgpu::ShaderStages| {
            wgpu::BindGroupLayoutEntry {
                binding,
                visibility,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }
        };
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("particles_bgl"),
            entries: &[
                uniform_entry(0, wgpu::ShaderStages::VERTEX_FRAGMENT),
                uniform_entry(1, wgpu::ShaderStages::VERTEX),
            ],
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("particles_pl"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let vertex_buffers = [
            // slot 0: position vec3 per particle
            wgpu::VertexBufferLayout {
                array_stride: (std::mem::size_of::<f32>() * 3) as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &[wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0,
                }],
            },
            // slot 1: lifetime f32 per particle
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<f32>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &[wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32,
                    offset: 0,
                    shader_location: 1,
                }],
            },
        ];
        let additive = wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::One,
            operation: wgpu::BlendOperation::Add,
        };
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("particles_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &vertex_buffers,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState {
                        color: additive,
                        alpha: additive,
                    }),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        let camera_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("camera_uniforms"),
            size: std::mem::size_of::<CameraBlock>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let mut camera = Camera::default();
        camera.set_viewport(width, height);

        log::info!("[gpu] surface {}x{} format {:?}", width, height, format);
        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            bind_group_layout,
            camera_buffer,
            camera,
            geometries: FnvHashMap::default(),
            scene: SmallVec::new(),
            clear_color: wgpu::Color {
                r: CLEAR_COLOR[0],
                g: CLEAR_COLOR[1],
                b: CLEAR_COLOR[2],
                a: 1.0,
            },
        })
    }

    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Reconfigure the swapchain and camera aspect. Zero sizes are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 || (width, height) == self.size() {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.camera.set_viewport(width, height);
    }

    /// Reconfigure the surface at its current size after it was lost or outdated.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Bind `snapshot` to every visible material and draw one frame.
    pub fn render(
        &mut self,
        snapshot: &UniformSnapshot,
    ) -> std::result::Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let camera = CameraBlock {
            view_proj: self.camera.view_proj().to_cols_array_2d(),
            sprite: [SPRITE_SIZE_PX, 0.0, 0.0, 0.0],
        };
        self.queue
            .write_buffer(&self.camera_buffer, 0, bytemuck::bytes_of(&camera));
        let block = UniformBlock::from(snapshot);
        for handle in &self.scene {
            if let Some(g) = self.geometries.get(handle) {
                self.queue
                    .write_buffer(&g.material.uniform_buffer, 0, bytemuck::bytes_of(&block));
            }
        }

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("particles_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.pipeline);
            for handle in &self.scene {
                let Some(g) = self.geometries.get(handle) else {
                    continue;
                };
                rpass.set_bind_group(0, &g.material.bind_group, &[]);
                rpass.set_vertex_buffer(0, g.positions.slice(..));
                rpass.set_vertex_buffer(1, g.lifetimes.slice(..));
                rpass.draw(0..6, 0..g.count);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    fn create_material(&self, handle: GeometryHandle) -> ParticleMaterial {
        let uniform_buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("particle_uniforms_{}", handle.id())),
            size: std::mem::size_of::<UniformBlock>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("particles_bg"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: self.camera_buffer.as_entire_binding(),
                },
            ],
        });
        ParticleMaterial {
            uniform_buffer,
            bind_group,
        }
    }
}

/// Scene used by both front-ends: the wgpu renderer, or headless when the
/// adapter, device or surface could not be created.
pub type RenderScene<'a> = FallbackScene<GpuState<'a>>;

/// Create the GPU scene for `target`. Capability failures are logged as
/// warnings and yield a headless scene so the simulation keeps running.
pub async fn connect<'a>(
    instance: &wgpu::Instance,
    target: impl Into<wgpu::SurfaceTarget<'a>>,
    width: u32,
    height: u32,
) -> RenderScene<'a> {
    let surface = match instance.create_surface(target) {
        Ok(s) => s,
        Err(e) => {
            log::warn!("[gpu] surface unavailable, running headless: {e}");
            return FallbackScene::headless();
        }
    };
    match GpuState::new(instance, surface, width, height).await {
        Ok(gpu) => FallbackScene::Gpu(gpu),
        Err(e) => {
            log::warn!("[gpu] {e}; running headless");
            FallbackScene::headless()
        }
    }
}

impl RenderScene<'_> {
    /// Draw one frame at `width`x`height`. Lost or outdated surfaces are
    /// reconfigured and count as success; headless scenes draw nothing.
    pub fn render(
        &mut self,
        snapshot: &UniformSnapshot,
        width: u32,
        height: u32,
    ) -> std::result::Result<(), wgpu::SurfaceError> {
        let Some(gpu) = self.gpu_mut() else {
            return Ok(());
        };
        gpu.resize(width, height);
        match gpu.render(snapshot) {
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.reconfigure();
                Ok(())
            }
            other => other,
        }
    }
}

impl SceneBackend for GpuState<'_> {
    fn upload(&mut self, handle: GeometryHandle, buffer: &ParticleBuffer) -> Result<()> {
        let max = self.device.limits().max_buffer_size;
        let bytes = std::mem::size_of_val(buffer.positions.as_slice()) as u64;
        let count = u32::try_from(buffer.len())
            .map_err(|_| ParticleError::Allocation { count: buffer.len() })?;
        if bytes > max {
            return Err(ParticleError::Allocation {
                count: buffer.len(),
            });
        }
        let positions = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("particle_positions"),
                contents: bytemuck::cast_slice(&buffer.positions),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let lifetimes = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("particle_lifetimes"),
                contents: bytemuck::cast_slice(&buffer.lifetimes),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let material = self.create_material(handle);
        self.geometries.insert(
            handle,
            ParticleGeometry {
                positions,
                lifetimes,
                count,
                material,
            },
        );
        Ok(())
    }

    fn release(&mut self, handle: GeometryHandle) {
        if let Some(g) = self.geometries.remove(&handle) {
            g.destroy();
        }
    }

    fn add_visual_object(&mut self, handle: GeometryHandle) {
        if !self.scene.contains(&handle) {
            self.scene.push(handle);
        }
    }

    fn remove_visual_object(&mut self, handle: GeometryHandle) {
        self.scene.retain(|h| *h != handle);
    }
}
