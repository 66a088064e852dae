//! Core data types for the gallery viewer, focused on GPU data representation.

/// Vertex of the subdivided gallery plane.
/// Must match the vertex inputs in `gallery.wgsl`.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable, Debug)]
pub struct PlaneVertex {
    /// Unit-plane corner in [-0.5, 0.5]^2, scaled by the item rect on the GPU.
    pub corner: [f32; 2],
    /// Texture coordinate, v = 0 at the top of the image.
    pub uv: [f32; 2],
}

/// Per-item uniform buffer data, respecting std140 layout.
/// Must match the layout of `ItemUniform` in `gallery.wgsl`.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable, Debug)]
pub struct ItemUniformStd140 {
    /// Combined view-projection matrix of the page camera.
    pub view_proj: [[f32; 4]; 4],
    /// World-space center of the item (page pixels, y up).
    pub translate: [f32; 2],
    /// Item extents in world units, i.e. the page rect width/height.
    pub scale: [f32; 2],
    /// Normalized nearest pointer intersection, shared by every item.
    pub mouse: [f32; 3],
    /// Monotonic animation clock, advanced a fixed step per moving frame.
    pub time: f32,
    /// User-controlled distortion amount in [0, 1].
    pub progress: f32,
    pub _pad: [f32; 3],
}

// Compile-time safety check: buffer size must match the WGSL-reflected size.
const _: [(); 112] = [(); core::mem::size_of::<ItemUniformStd140>()];

impl Default for ItemUniformStd140 {
    fn default() -> Self {
        Self {
            view_proj: glam::Mat4::IDENTITY.to_cols_array_2d(),
            translate: [0.0; 2],
            scale: [0.0; 2],
            mouse: [0.0; 3],
            time: 0.0,
            progress: 0.0,
            _pad: [0.0; 3],
        }
    }
}

/// A decoded gallery image ready for texture upload.
pub struct GalleryImage {
    /// File stem (or placeholder name) used for logs and the HUD.
    pub label: String,
    pub width: u32,
    pub height: u32,
    /// Tightly packed RGBA8 pixels, row-major from the top.
    pub rgba: Vec<u8>,
}

impl GalleryImage {
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// GPU resources for a single renderable gallery item.
#[derive(Debug)]
pub struct ItemGpu {
    /// Uniform buffer holding `ItemUniformStd140`, rewritten every frame.
    pub ubo: wgpu::Buffer,
    /// Bind group tying the UBO, image, displacement, and sampler together.
    pub bind: wgpu::BindGroup,
}
