//! Ship label textures, rasterized once at setup through a scratch 2D
//! canvas and uploaded to the GPU.

use app_core::session::ShipSpec;
use wasm_bindgen::JsCast;
use web_sys as web;

pub(crate) const LABEL_TEX_WIDTH: u32 = 512;
pub(crate) const LABEL_TEX_HEIGHT: u32 = 128;

pub(crate) fn create_label_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    document: &web::Document,
    spec: &ShipSpec,
) -> anyhow::Result<wgpu::TextureView> {
    let pixels = rasterize_label(document, spec)?;

    let size = wgpu::Extent3d {
        width: LABEL_TEX_WIDTH,
        height: LABEL_TEX_HEIGHT,
        depth_or_array_layers: 1,
    };
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("ship_label"),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        &pixels,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(LABEL_TEX_WIDTH * 4),
            rows_per_image: Some(LABEL_TEX_HEIGHT),
        },
        size,
    );
    Ok(texture.create_view(&wgpu::TextureViewDescriptor::default()))
}

/// Draw name, emblem, and border into a scratch canvas and return the
/// raw RGBA pixels.
fn rasterize_label(document: &web::Document, spec: &ShipSpec) -> anyhow::Result<Vec<u8>> {
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("{e:?}"))?
        .dyn_into()
        .map_err(|_| anyhow::anyhow!("canvas cast failed"))?;
    canvas.set_width(LABEL_TEX_WIDTH);
    canvas.set_height(LABEL_TEX_HEIGHT);

    let ctx: web::CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(|e| anyhow::anyhow!("{e:?}"))?
        .ok_or_else(|| anyhow::anyhow!("no 2d context"))?
        .dyn_into()
        .map_err(|_| anyhow::anyhow!("2d context cast failed"))?;

    let (w, h) = (LABEL_TEX_WIDTH as f64, LABEL_TEX_HEIGHT as f64);
    ctx.set_fill_style_str("rgba(0, 0, 0, 0.9)");
    ctx.fill_rect(0.0, 0.0, w, h);
    ctx.set_stroke_style_str(spec.css_color);
    ctx.set_line_width(3.0);
    ctx.stroke_rect(5.0, 5.0, w - 10.0, h - 10.0);
    ctx.set_fill_style_str(spec.css_color);
    ctx.set_font("bold 32px monospace");
    ctx.set_text_align("center");
    let _ = ctx.fill_text(spec.name, w / 2.0, 50.0);
    ctx.set_font("48px monospace");
    let _ = ctx.fill_text(spec.emblem, w / 2.0, 100.0);

    let image = ctx
        .get_image_data(0.0, 0.0, w, h)
        .map_err(|e| anyhow::anyhow!("{e:?}"))?;
    Ok(image.data().0)
}
