//! Rendering subsystem — wgpu device plus per-frame orchestration.
//!
//! [`Renderer`] owns the GPU context and the two 2D pipelines. Each frame it
//! clears to the background colour, draws the world-space line batch through
//! an orthographic camera over the viewplane, then draws the overlay text on
//! top, and presents.

pub mod gpu;

pub use gpu::GpuContext;

use crate::math::{Mat4, Vec2};
use crate::render2d::pipeline::{LineRenderer, TextRenderer};
use crate::render2d::{GlyphAtlas, LineBatch, TextBatch};

/// The clear color. Set this to change the background color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClearColor(pub [f64; 4]);

impl Default for ClearColor {
    fn default() -> Self {
        Self([0.3, 0.3, 0.3, 1.0])
    }
}

/// Orthographic projection showing `viewplane` world units centred on the
/// origin.
pub fn view_projection(viewplane: Vec2) -> Mat4 {
    let half = viewplane * 0.5;
    Mat4::orthographic_rh(-half.x, half.x, -half.y, half.y, -1.0, 1.0)
}

/// Widen (or heighten) `viewplane` so it matches the window's aspect ratio
/// without shrinking either axis.
pub fn fit_viewplane(viewplane: Vec2, width: u32, height: u32) -> Vec2 {
    if width == 0 || height == 0 {
        return viewplane;
    }
    let window_aspect = width as f32 / height as f32;
    let view_aspect = viewplane.x / viewplane.y;
    if window_aspect > view_aspect {
        Vec2::new(viewplane.y * window_aspect, viewplane.y)
    } else {
        Vec2::new(viewplane.x, viewplane.x / window_aspect)
    }
}

pub struct Renderer {
    gpu: GpuContext,
    lines: LineRenderer,
    text: Option<(TextRenderer, GlyphAtlas)>,
    clear_color: ClearColor,
}

impl Renderer {
    /// Build pipelines. Without an atlas, overlay text is skipped.
    pub fn new(gpu: GpuContext, atlas: Option<GlyphAtlas>, clear_color: ClearColor) -> Self {
        let lines = LineRenderer::new(&gpu);
        let text = atlas.map(|atlas| (TextRenderer::new(&gpu, &atlas), atlas));
        Self {
            gpu,
            lines,
            text,
            clear_color,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.gpu.resize(width, height);
    }

    pub fn surface_size(&self) -> (u32, u32) {
        self.gpu.surface_size()
    }

    /// Render a single frame.
    pub fn render_frame(
        &mut self,
        viewplane: Vec2,
        lines: &LineBatch,
        text: &TextBatch,
    ) -> Result<(), wgpu::SurfaceError> {
        let output = self.gpu.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("vector-tank frame encoder"),
            });

        {
            let [r, g, b, a] = self.clear_color.0;
            let _clear = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("clear pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
        }

        self.lines.draw(
            &self.gpu,
            &mut encoder,
            &view,
            lines.vertices(),
            view_projection(viewplane),
        );

        if let Some((renderer, atlas)) = &self.text {
            let (width, height) = self.gpu.surface_size();
            let vertices = atlas.layout(text.runs(), Vec2::new(width as f32, height as f32));
            renderer.draw(&self.gpu, &mut encoder, &view, &vertices);
        }

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}
