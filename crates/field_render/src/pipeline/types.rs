//! GPU-compatible data types for the blit pass
//!
//! Layouts match `shaders/blit.wgsl` exactly.

use bytemuck::{Pod, Zeroable};
use field_math::Rgba;

/// Uniforms for compositing the canvas over the window background
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct BlitUniforms {
    /// Opaque background colour behind the canvas (alpha ignored)
    pub background: [f32; 4],
}

impl BlitUniforms {
    pub fn new(background: Rgba) -> Self {
        Self {
            background: background.to_array(),
        }
    }
}

impl Default for BlitUniforms {
    fn default() -> Self {
        Self::new(Rgba::BLACK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blit_uniforms_size() {
        // One vec4<f32>, uniform buffers need 16-byte multiples
        assert_eq!(std::mem::size_of::<BlitUniforms>(), 16);
    }

    #[test]
    fn test_background_from_hex() {
        let uniforms = BlitUniforms::new(Rgba::from_hex(0x0a0a14));
        assert!((uniforms.background[2] - 20.0 / 255.0).abs() < 1e-6);
        assert_eq!(uniforms.background[3], 1.0);
    }
}
