use app_core::constants::{STAR_COUNT, STAR_FIELD_EXTENT, STAR_QUAD_HALF_SIZE};
use app_core::geometry::{
    self, cylinder_mesh, generate_starfield, globe_mesh, line_mesh, marker_mesh, quad_mesh,
    ring_mesh,
};
use app_core::session::{FrameSnapshot, MeshInstance, SHIPS};
use app_core::{constants, SCENE_WGSL, STARS_WGSL};
use wgpu::util::DeviceExt;
use web_sys as web;

mod labels;
mod pipelines;

use pipelines::{create_scene_pipelines, ScenePipelines, DEPTH_FORMAT};

// Dynamic-offset slots in the entity uniform buffer are aligned to the
// WebGPU minimum.
const ENTITY_STRIDE: usize = 256;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct GlobalsUniform {
    view_proj: [[f32; 4]; 4],
    camera_right: [f32; 4],
    camera_up: [f32; 4],
    camera_pos: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct EntityUniform {
    model: [[f32; 4]; 4],
    color1: [f32; 4],
    color2: [f32; 4],
    params: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct StarParams {
    rotation: f32,
    half_size: f32,
    opacity: f32,
    _pad: f32,
}

struct GpuMesh {
    vb: wgpu::Buffer,
    ib: Option<wgpu::Buffer>,
    index_count: u32,
    wire_ib: Option<wgpu::Buffer>,
    wire_count: u32,
}

fn upload_mesh(device: &wgpu::Device, label: &str, mesh: &geometry::Mesh) -> GpuMesh {
    let vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::cast_slice(&mesh.vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let ib = (!mesh.indices.is_empty()).then(|| {
        device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        })
    });
    let wire_ib = (!mesh.wire_indices.is_empty()).then(|| {
        device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.wire_indices),
            usage: wgpu::BufferUsages::INDEX,
        })
    });
    GpuMesh {
        vb,
        ib,
        index_count: mesh.indices.len() as u32,
        wire_ib,
        wire_count: mesh.wire_indices.len() as u32,
    }
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,

    globals_buf: wgpu::Buffer,
    globals_bg: wgpu::BindGroup,
    entity_bgl: wgpu::BindGroupLayout,
    entity_buf: wgpu::Buffer,
    entity_bg: wgpu::BindGroup,
    entity_capacity: usize,

    pipelines: ScenePipelines,

    globe: GpuMesh,
    marker: GpuMesh,
    orb: GpuMesh,
    ring: GpuMesh,
    cylinder: GpuMesh,
    line: GpuMesh,
    label_quad: GpuMesh,

    stars_bg: wgpu::BindGroup,
    star_params_buf: wgpu::Buffer,

    label_bgs: Vec<wgpu::BindGroup>,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl<'a> GpuState<'a> {
    pub async fn new(
        canvas: &'a web::HtmlCanvasElement,
        document: &web::Document,
        seed: u64,
    ) -> anyhow::Result<Self> {
        let width = canvas.width();
        let height = canvas.height();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
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
            .unwrap_or(caps.formats[0]);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        let depth_view = create_depth_view(&device, width, height);

        let scene_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(SCENE_WGSL.into()),
        });
        let stars_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("stars_shader"),
            source: wgpu::ShaderSource::Wgsl(STARS_WGSL.into()),
        });

        // Group 0: per-frame globals.
        let globals_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bgl"),
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
        let globals_buf = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals"),
            size: std::mem::size_of::<GlobalsUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let globals_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bg"),
            layout: &globals_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buf.as_entire_binding(),
            }],
        });

        // Group 1: per-entity slot selected by dynamic offset.
        let entity_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("entity_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<EntityUniform>() as u64
                    ),
                },
                count: None,
            }],
        });
        let entity_capacity = 64usize;
        let (entity_buf, entity_bg) =
            create_entity_buffer(&device, &entity_bgl, entity_capacity);

        // Group 2 (labels only): texture + sampler.
        let label_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("label_bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
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

        // Stars: static positions in a storage buffer plus a tiny
        // per-frame parameter block.
        let stars_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("stars_bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: true },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });
        let stars = generate_starfield(STAR_COUNT, STAR_FIELD_EXTENT, seed);
        let stars_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("stars"),
            contents: bytemuck::cast_slice(&stars),
            usage: wgpu::BufferUsages::STORAGE,
        });
        let star_params_buf = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("star_params"),
            size: std::mem::size_of::<StarParams>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let stars_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("stars_bg"),
            layout: &stars_bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: stars_buf.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: star_params_buf.as_entire_binding(),
                },
            ],
        });

        let mesh_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("mesh_pl"),
            bind_group_layouts: &[&globals_bgl, &entity_bgl],
            push_constant_ranges: &[],
        });
        let label_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("label_pl"),
            bind_group_layouts: &[&globals_bgl, &entity_bgl, &label_bgl],
            push_constant_ranges: &[],
        });
        let stars_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("stars_pl"),
            bind_group_layouts: &[&globals_bgl, &stars_bgl],
            push_constant_ranges: &[],
        });
        let pipelines = create_scene_pipelines(
            &device,
            &scene_shader,
            &stars_shader,
            format,
            &mesh_layout,
            &label_layout,
            &stars_layout,
        );

        let globe = upload_mesh(&device, "globe_mesh", &globe_mesh());
        let marker = upload_mesh(&device, "marker_mesh", &marker_mesh());
        let orb = upload_mesh(&device, "orb_mesh", &geometry::sphere_mesh(1.0, 32, 32));
        let ring = upload_mesh(
            &device,
            "ring_mesh",
            &ring_mesh(
                constants::RIPPLE_INNER_RADIUS,
                constants::RIPPLE_OUTER_RADIUS,
                32,
            ),
        );
        let cylinder = upload_mesh(
            &device,
            "beam_mesh",
            &cylinder_mesh(constants::BEAM_RADIUS, 8),
        );
        let line = upload_mesh(&device, "tether_mesh", &line_mesh());
        let label_quad = upload_mesh(
            &device,
            "label_quad",
            &quad_mesh(constants::SHIP_LABEL_WIDTH, constants::SHIP_LABEL_HEIGHT),
        );

        let label_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("label_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let mut label_bgs = Vec::with_capacity(SHIPS.len());
        for spec in SHIPS.iter() {
            let view = labels::create_label_texture(&device, &queue, document, spec)?;
            label_bgs.push(device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("label_bg"),
                layout: &label_bgl,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(&view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(&label_sampler),
                    },
                ],
            }));
        }

        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth_view,
            globals_buf,
            globals_bg,
            entity_bgl,
            entity_buf,
            entity_bg,
            entity_capacity,
            pipelines,
            globe,
            marker,
            orb,
            ring,
            cylinder,
            line,
            label_quad,
            stars_bg,
            star_params_buf,
            label_bgs,
            width,
            height,
            clear_color: wgpu::Color::BLACK,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.depth_view = create_depth_view(&self.device, width, height);
        }
    }

    pub fn render(&mut self, snap: &FrameSnapshot) -> Result<(), wgpu::SurfaceError> {
        let globals = GlobalsUniform {
            view_proj: snap.view_proj.to_cols_array_2d(),
            camera_right: snap.camera_right.extend(0.0).to_array(),
            camera_up: snap.camera_up.extend(0.0).to_array(),
            camera_pos: snap.camera_eye.extend(snap.time).to_array(),
        };
        self.queue
            .write_buffer(&self.globals_buf, 0, bytemuck::bytes_of(&globals));
        let star_params = StarParams {
            rotation: snap.star_rotation,
            half_size: STAR_QUAD_HALF_SIZE,
            opacity: 1.0,
            _pad: 0.0,
        };
        self.queue
            .write_buffer(&self.star_params_buf, 0, bytemuck::bytes_of(&star_params));

        // Pack every entity for this frame into aligned dynamic-offset
        // slots, growing the buffer if effects pushed past capacity.
        let mut staging: Vec<u8> = Vec::with_capacity(ENTITY_STRIDE * 48);
        let globe_off = push_entity(&mut staging, &snap.globe);
        let globe_wire_off = push_entity(&mut staging, &snap.globe_wire);
        let marker_offs: Vec<u32> = snap
            .markers
            .iter()
            .map(|m| push_entity(&mut staging, m))
            .collect();
        let marker_wire_offs: Vec<u32> = snap
            .marker_wires
            .iter()
            .map(|m| push_entity(&mut staging, m))
            .collect();
        let orb_offs: Vec<u32> = snap
            .ship_orbs
            .iter()
            .map(|m| push_entity(&mut staging, m))
            .collect();
        let glow_offs: Vec<u32> = snap
            .ship_glows
            .iter()
            .map(|m| push_entity(&mut staging, m))
            .collect();
        let label_offs: Vec<u32> = snap
            .ship_labels
            .iter()
            .map(|m| push_entity(&mut staging, m))
            .collect();
        let tether_offs: Vec<u32> = snap
            .ship_tethers
            .iter()
            .map(|m| push_entity(&mut staging, m))
            .collect();
        let beam_offs: Vec<u32> = snap
            .beams
            .iter()
            .map(|m| push_entity(&mut staging, m))
            .collect();
        let ripple_offs: Vec<u32> = snap
            .ripples
            .iter()
            .map(|m| push_entity(&mut staging, m))
            .collect();

        let slots = staging.len() / ENTITY_STRIDE;
        if slots > self.entity_capacity {
            self.entity_capacity = slots.next_power_of_two();
            let (buf, bg) = create_entity_buffer(&self.device, &self.entity_bgl, self.entity_capacity);
            self.entity_buf = buf;
            self.entity_bg = bg;
        }
        self.queue.write_buffer(&self.entity_buf, 0, &staging);

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
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

            rpass.set_bind_group(0, &self.globals_bg, &[]);

            // Backdrop first.
            rpass.set_pipeline(&self.pipelines.stars);
            rpass.set_bind_group(1, &self.stars_bg, &[]);
            rpass.draw(0..(STAR_COUNT as u32 * 6), 0..1);

            self.draw_mesh(&mut rpass, &self.pipelines.globe, &self.globe, globe_off, false);
            self.draw_mesh(
                &mut rpass,
                &self.pipelines.wire,
                &self.globe,
                globe_wire_off,
                true,
            );
            for (&off, &woff) in marker_offs.iter().zip(&marker_wire_offs) {
                self.draw_mesh(&mut rpass, &self.pipelines.marker, &self.marker, off, false);
                self.draw_mesh(&mut rpass, &self.pipelines.wire, &self.marker, woff, true);
            }
            for &off in &orb_offs {
                self.draw_mesh(&mut rpass, &self.pipelines.orb, &self.orb, off, false);
            }
            for &off in &glow_offs {
                self.draw_mesh(&mut rpass, &self.pipelines.glow, &self.orb, off, false);
            }
            for &off in &tether_offs {
                self.draw_mesh(&mut rpass, &self.pipelines.wire, &self.line, off, true);
            }
            if let Some(label_ib) = &self.label_quad.ib {
                for (i, &off) in label_offs.iter().enumerate() {
                    rpass.set_pipeline(&self.pipelines.label);
                    rpass.set_bind_group(1, &self.entity_bg, &[off]);
                    rpass.set_bind_group(2, &self.label_bgs[i], &[]);
                    rpass.set_vertex_buffer(0, self.label_quad.vb.slice(..));
                    rpass.set_index_buffer(label_ib.slice(..), wgpu::IndexFormat::Uint32);
                    rpass.draw_indexed(0..self.label_quad.index_count, 0, 0..1);
                }
            }
            for &off in &beam_offs {
                self.draw_mesh(&mut rpass, &self.pipelines.beam, &self.cylinder, off, false);
            }
            for &off in &ripple_offs {
                self.draw_mesh(&mut rpass, &self.pipelines.ripple, &self.ring, off, false);
            }
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    fn draw_mesh(
        &self,
        rpass: &mut wgpu::RenderPass<'_>,
        pipeline: &wgpu::RenderPipeline,
        mesh: &GpuMesh,
        entity_offset: u32,
        wire: bool,
    ) {
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(1, &self.entity_bg, &[entity_offset]);
        rpass.set_vertex_buffer(0, mesh.vb.slice(..));
        if wire {
            let Some(wire_ib) = &mesh.wire_ib else { return };
            rpass.set_index_buffer(wire_ib.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..mesh.wire_count, 0, 0..1);
        } else {
            let Some(ib) = &mesh.ib else { return };
            rpass.set_index_buffer(ib.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..mesh.index_count, 0, 0..1);
        }
    }
}

fn push_entity(staging: &mut Vec<u8>, inst: &MeshInstance) -> u32 {
    let offset = staging.len();
    let uniform = EntityUniform {
        model: inst.model.to_cols_array_2d(),
        color1: inst.color1.to_array(),
        color2: inst.color2.to_array(),
        params: inst.params.to_array(),
    };
    staging.extend_from_slice(bytemuck::bytes_of(&uniform));
    staging.resize(offset + ENTITY_STRIDE, 0);
    offset as u32
}

fn create_entity_buffer(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    capacity: usize,
) -> (wgpu::Buffer, wgpu::BindGroup) {
    let buf = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("entities"),
        size: (capacity * ENTITY_STRIDE) as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("entity_bg"),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                buffer: &buf,
                offset: 0,
                size: wgpu::BufferSize::new(std::mem::size_of::<EntityUniform>() as u64),
            }),
        }],
    });
    (buf, bg)
}

fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let tex = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    tex.create_view(&wgpu::TextureViewDescriptor::default())
}
