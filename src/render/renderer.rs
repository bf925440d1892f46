use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{anyhow, Context};
use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::core::camera::CameraPose;
use crate::render::draw::{DrawCommand, DrawList, Primitive, Shading};
use crate::render::lighting::LightingState;
use crate::render::mesh::{self, MeshData, Vertex};
use crate::render::texture::{TextureId, TextureStore};

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.08,
    g: 0.08,
    b: 0.10,
    a: 1.0,
};

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct Globals {
    view_proj: [[f32; 4]; 4],
    eye: [f32; 4],
    light_pos: [f32; 4],
    light_dir_cutoff: [f32; 4],
    light_diffuse: [f32; 4],
    flags: [u32; 4],
}

/// Per-command GPU instance data.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct InstanceRaw {
    model: [[f32; 4]; 4],
    color: [f32; 4],
    ambient: [f32; 4],
    specular: [f32; 4],
    mode: [u32; 4],
}

const MODE_FLAT: u32 = 0;
const MODE_LIT: u32 = 1;
const MODE_TEXTURED: u32 = 2;

/// Unit meshes are shared; the primitive's dimensions become an instance
/// scale. Spheres are cached per tessellation level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum MeshKey {
    Cube,
    Sphere(u32),
    Quad,
}

struct GpuMesh {
    vertices: wgpu::Buffer,
    indices: wgpu::Buffer,
    index_count: u32,
}

/// Forward renderer that draws one frame's `DrawList` to the window
/// surface.
pub struct Renderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    texture_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    texture_bind_groups: Vec<wgpu::BindGroup>,
    white_bind_group: wgpu::BindGroup,
    depth_view: wgpu::TextureView,
    meshes: HashMap<MeshKey, GpuMesh>,
}

impl Renderer {
    pub fn new(window: Arc<Window>) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let (width, height) = (size.width.max(1), size.height.max(1));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });
        let surface = instance
            .create_surface(window)
            .context("creating window surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .map_err(|e| anyhow!("no suitable adapter: {e:?}"))?;

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("Scene Device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            memory_hints: Default::default(),
            experimental_features: Default::default(),
            trace: Default::default(),
        }))
        .map_err(|e| anyhow!("device request failed: {e:?}"))?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Scene Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("scene.wgsl").into()),
        });

        let globals_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Globals Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Texture Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Globals Buffer"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Globals Bind Group"),
            layout: &globals_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Scene Pipeline Layout"),
            bind_group_layouts: &[&globals_layout, &texture_layout],
            push_constant_ranges: &[],
        });

        let vertex_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2],
        };
        let instance_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<InstanceRaw>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &wgpu::vertex_attr_array![
                3 => Float32x4, 4 => Float32x4, 5 => Float32x4, 6 => Float32x4,
                7 => Float32x4, 8 => Float32x4, 9 => Float32x4, 10 => Uint32x4
            ],
        };

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Scene Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[vertex_layout, instance_layout],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                // Spinning quads show their back faces.
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Texture Sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let depth_view = Self::create_depth_view(&device, width, height);

        let white_bind_group = Self::create_texture_bind_group(
            &device,
            &queue,
            &texture_layout,
            &sampler,
            1,
            1,
            &[255, 255, 255, 255],
        );

        let mut meshes = HashMap::new();
        meshes.insert(MeshKey::Cube, Self::upload_mesh(&device, &mesh::unit_cube()));
        meshes.insert(MeshKey::Quad, Self::upload_mesh(&device, &mesh::unit_quad()));

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            globals_buffer,
            globals_bind_group,
            texture_layout,
            sampler,
            texture_bind_groups: Vec::new(),
            white_bind_group,
            depth_view,
            meshes,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_view = Self::create_depth_view(&self.device, width, height);
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Upload every image in the store. Call once after scene init.
    pub fn upload_textures(&mut self, store: &TextureStore) {
        self.texture_bind_groups = store
            .images()
            .iter()
            .map(|image| {
                Self::create_texture_bind_group(
                    &self.device,
                    &self.queue,
                    &self.texture_layout,
                    &self.sampler,
                    image.width,
                    image.height,
                    &image.pixels,
                )
            })
            .collect();
    }

    /// Draw one frame.
    pub fn render(
        &mut self,
        draw: &DrawList,
        camera: &CameraPose,
        lighting: &LightingState,
    ) -> anyhow::Result<()> {
        let aspect = self.config.width as f32 / self.config.height as f32;
        let globals = self.build_globals(camera, lighting, aspect);
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));

        let batches = self.build_batches(draw.commands());
        // Instance buffers are created before the pass opens.
        let prepared: Vec<_> = batches
            .iter()
            .map(|(key, texture, instances)| {
                let buffer = self
                    .device
                    .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                        label: Some("Instance Buffer"),
                        contents: bytemuck::cast_slice(instances),
                        usage: wgpu::BufferUsages::VERTEX,
                    });
                (*key, *texture, buffer, instances.len() as u32)
            })
            .collect();

        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(e) => return Err(anyhow!("surface error: {e:?}")),
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Scene Encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.globals_bind_group, &[]);

            for (key, texture, instance_buffer, instance_count) in &prepared {
                let Some(gpu_mesh) = self.meshes.get(key) else {
                    continue;
                };
                let bind_group = texture
                    .and_then(|id| self.texture_bind_groups.get(id.index()))
                    .unwrap_or(&self.white_bind_group);
                pass.set_bind_group(1, bind_group, &[]);
                pass.set_vertex_buffer(0, gpu_mesh.vertices.slice(..));
                pass.set_vertex_buffer(1, instance_buffer.slice(..));
                pass.set_index_buffer(gpu_mesh.indices.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..gpu_mesh.index_count, 0, 0..*instance_count);
            }
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    fn build_globals(
        &self,
        camera: &CameraPose,
        lighting: &LightingState,
        aspect: f32,
    ) -> Globals {
        let cutoff_cos = if lighting.spot_cutoff_deg >= 180.0 {
            // Sentinel below any real cosine: the cone never rejects.
            -2.0
        } else {
            lighting.spot_cutoff_deg.to_radians().cos()
        };
        Globals {
            view_proj: camera.view_proj(aspect).to_cols_array_2d(),
            eye: camera.eye.extend(1.0).to_array(),
            light_pos: lighting.position.extend(1.0).to_array(),
            light_dir_cutoff: lighting.spot_direction.extend(cutoff_cos).to_array(),
            light_diffuse: lighting.diffuse.to_array(),
            flags: [lighting.enabled as u32, lighting.smooth as u32, 0, 0],
        }
    }

    /// Group commands by mesh and texture, preserving first-seen order.
    fn build_batches(
        &mut self,
        commands: &[DrawCommand],
    ) -> Vec<(MeshKey, Option<TextureId>, Vec<InstanceRaw>)> {
        let mut batches: Vec<(MeshKey, Option<TextureId>, Vec<InstanceRaw>)> = Vec::new();
        let mut index: HashMap<(MeshKey, Option<TextureId>), usize> = HashMap::new();

        for command in commands {
            let (key, scale) = Self::mesh_key_and_scale(command.primitive);
            self.ensure_mesh(key);

            let texture = match command.shading {
                Shading::Textured(id) => Some(id),
                _ => None,
            };
            let instance = Self::instance_from_command(command, scale);

            let slot = *index.entry((key, texture)).or_insert_with(|| {
                batches.push((key, texture, Vec::new()));
                batches.len() - 1
            });
            batches[slot].2.push(instance);
        }
        batches
    }

    fn mesh_key_and_scale(primitive: Primitive) -> (MeshKey, Vec3) {
        match primitive {
            Primitive::Cube { size } => (MeshKey::Cube, Vec3::splat(size)),
            Primitive::Sphere { radius, segments } => {
                (MeshKey::Sphere(segments.max(3)), Vec3::splat(radius))
            }
            Primitive::Quad {
                half_width,
                half_height,
            } => (MeshKey::Quad, Vec3::new(half_width, half_height, 1.0)),
        }
    }

    fn instance_from_command(command: &DrawCommand, scale: Vec3) -> InstanceRaw {
        let model = command.transform * Mat4::from_scale(scale);
        let (color, ambient, specular, mode) = match command.shading {
            Shading::Flat(c) => (c.to_array(), [0.0; 4], [0.0, 0.0, 0.0, 1.0], MODE_FLAT),
            Shading::Lit(m) => (
                [m.diffuse[0], m.diffuse[1], m.diffuse[2], 1.0],
                [m.ambient[0], m.ambient[1], m.ambient[2], 1.0],
                [m.specular[0], m.specular[1], m.specular[2], m.shininess],
                MODE_LIT,
            ),
            Shading::Textured(_) => (
                [1.0; 4],
                [0.12, 0.12, 0.12, 1.0],
                [0.0, 0.0, 0.0, 1.0],
                MODE_TEXTURED,
            ),
        };
        InstanceRaw {
            model: model.to_cols_array_2d(),
            color,
            ambient,
            specular,
            mode: [mode, 0, 0, 0],
        }
    }

    fn ensure_mesh(&mut self, key: MeshKey) {
        if self.meshes.contains_key(&key) {
            return;
        }
        let data = match key {
            MeshKey::Cube => mesh::unit_cube(),
            MeshKey::Sphere(segments) => mesh::unit_sphere(segments),
            MeshKey::Quad => mesh::unit_quad(),
        };
        let gpu_mesh = Self::upload_mesh(&self.device, &data);
        self.meshes.insert(key, gpu_mesh);
    }

    fn upload_mesh(device: &wgpu::Device, data: &MeshData) -> GpuMesh {
        let vertices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Vertices"),
            contents: bytemuck::cast_slice(&data.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let indices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Indices"),
            contents: bytemuck::cast_slice(&data.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        GpuMesh {
            vertices,
            indices,
            index_count: data.index_count(),
        }
    }

    fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    fn create_texture_bind_group(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
        width: u32,
        height: u32,
        pixels: &[u8],
    ) -> wgpu::BindGroup {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Diffuse Texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        queue.write_texture(
            texture.as_image_copy(),
            pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Diffuse Bind Group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        })
    }
}
