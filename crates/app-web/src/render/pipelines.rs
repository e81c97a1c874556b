use app_core::geometry::Vertex;

pub(crate) const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24Plus;

const VERTEX_LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
    array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
    step_mode: wgpu::VertexStepMode::Vertex,
    attributes: &[
        wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x3,
            offset: 0,
            shader_location: 0,
        },
        wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x3,
            offset: 12,
            shader_location: 1,
        },
        wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x2,
            offset: 24,
            shader_location: 2,
        },
    ],
};

pub(crate) struct ScenePipelines {
    pub(crate) stars: wgpu::RenderPipeline,
    pub(crate) globe: wgpu::RenderPipeline,
    pub(crate) wire: wgpu::RenderPipeline,
    pub(crate) marker: wgpu::RenderPipeline,
    pub(crate) orb: wgpu::RenderPipeline,
    pub(crate) glow: wgpu::RenderPipeline,
    pub(crate) beam: wgpu::RenderPipeline,
    pub(crate) ripple: wgpu::RenderPipeline,
    pub(crate) label: wgpu::RenderPipeline,
}

fn depth_state(write: bool, compare: wgpu::CompareFunction) -> wgpu::DepthStencilState {
    wgpu::DepthStencilState {
        format: DEPTH_FORMAT,
        depth_write_enabled: write,
        depth_compare: compare,
        stencil: wgpu::StencilState::default(),
        bias: wgpu::DepthBiasState::default(),
    }
}

#[allow(clippy::too_many_arguments)]
fn make_mesh_pipeline(
    device: &wgpu::Device,
    label: &str,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    fs_entry: &str,
    format: wgpu::TextureFormat,
    topology: wgpu::PrimitiveTopology,
    cull_mode: Option<wgpu::Face>,
    depth: wgpu::DepthStencilState,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_mesh"),
            buffers: &[VERTEX_LAYOUT],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology,
            cull_mode,
            ..Default::default()
        },
        depth_stencil: Some(depth),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(fs_entry),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn create_scene_pipelines(
    device: &wgpu::Device,
    scene_shader: &wgpu::ShaderModule,
    stars_shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    mesh_layout: &wgpu::PipelineLayout,
    label_layout: &wgpu::PipelineLayout,
    stars_layout: &wgpu::PipelineLayout,
) -> ScenePipelines {
    use wgpu::CompareFunction::{Always, Less};
    use wgpu::PrimitiveTopology::{LineList, TriangleList};

    // The starfield ignores depth entirely; it is the backdrop.
    let stars = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("stars_pipeline"),
        layout: Some(stars_layout),
        vertex: wgpu::VertexState {
            module: stars_shader,
            entry_point: Some("vs_stars"),
            buffers: &[],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: Some(depth_state(false, Always)),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: stars_shader,
            entry_point: Some("fs_stars"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    });

    let globe = make_mesh_pipeline(
        device,
        "globe_pipeline",
        mesh_layout,
        scene_shader,
        "fs_globe",
        format,
        TriangleList,
        None,
        depth_state(true, Less),
    );
    let wire = make_mesh_pipeline(
        device,
        "wire_pipeline",
        mesh_layout,
        scene_shader,
        "fs_wire",
        format,
        LineList,
        None,
        depth_state(false, Less),
    );
    let marker = make_mesh_pipeline(
        device,
        "marker_pipeline",
        mesh_layout,
        scene_shader,
        "fs_marker",
        format,
        TriangleList,
        None,
        depth_state(true, Less),
    );
    let orb = make_mesh_pipeline(
        device,
        "orb_pipeline",
        mesh_layout,
        scene_shader,
        "fs_orb",
        format,
        TriangleList,
        None,
        depth_state(false, Less),
    );
    // Outer glow renders the sphere's inside, like a BackSide material.
    let glow = make_mesh_pipeline(
        device,
        "glow_pipeline",
        mesh_layout,
        scene_shader,
        "fs_glow",
        format,
        TriangleList,
        Some(wgpu::Face::Front),
        depth_state(false, Less),
    );
    let beam = make_mesh_pipeline(
        device,
        "beam_pipeline",
        mesh_layout,
        scene_shader,
        "fs_beam",
        format,
        TriangleList,
        None,
        depth_state(false, Less),
    );
    let ripple = make_mesh_pipeline(
        device,
        "ripple_pipeline",
        mesh_layout,
        scene_shader,
        "fs_ripple",
        format,
        TriangleList,
        None,
        depth_state(false, Less),
    );
    let label = make_mesh_pipeline(
        device,
        "label_pipeline",
        label_layout,
        scene_shader,
        "fs_label",
        format,
        TriangleList,
        None,
        depth_state(false, Less),
    );

    ScenePipelines {
        stars,
        globe,
        wire,
        marker,
        orb,
        glow,
        beam,
        ripple,
        label,
    }
}
