//! Buffer records handed to the render backend every frame.
//!
//! All records are `Pod` so a backend can upload a population with a single
//! `bytemuck::cast_slice`. Layouts are 16-byte aligned.

use bytemuck::{Pod, Zeroable};

/// One foliage point sprite.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct PointVertex {
    /// Animated position (xyz) + unattenuated sprite size (w).
    pub position_size: [f32; 4],
    /// Color (rgb) + per-point random seed (w).
    pub color_seed: [f32; 4],
}

impl PointVertex {
    /// Size in bytes.
    pub const SIZE: usize = std::mem::size_of::<Self>();
}

/// Uniform values shared by every foliage point in a frame.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct FoliageUniforms {
    /// Population blend, 0 = formed, 1 = dispersed.
    pub chaos: f32,
    /// Elapsed scene time in seconds.
    pub time: f32,
    /// Cone height used for the color gradient.
    pub gradient_height: f32,
    /// Unused, keeps 16-byte alignment.
    pub _pad: f32,
}

/// One ornament instance.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct OrnamentInstance {
    /// Position (xyz) + uniform scale (w).
    pub position_scale: [f32; 4],
    /// Euler rotation in radians (xyz), w unused.
    pub rotation: [f32; 4],
    /// Color (rgb) + alpha. Written once at build time.
    pub color: [f32; 4],
}

impl OrnamentInstance {
    /// Size in bytes.
    pub const SIZE: usize = std::mem::size_of::<Self>();
}

/// One photo panel.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct PanelInstance {
    /// Position in assembly space (xyz) + roll around the facing axis (w).
    pub position_roll: [f32; 4],
    /// Unit direction the panel front faces, assembly space (xyz), w unused.
    pub facing: [f32; 4],
    /// Index into the photo list this panel shows.
    pub photo_index: u32,
    /// Index of the panel within its population.
    pub panel_index: u32,
    /// Unused, keeps 16-byte alignment.
    pub _pad: [u32; 2],
}

impl PanelInstance {
    /// Size in bytes.
    pub const SIZE: usize = std::mem::size_of::<Self>();
}

/// One layer of the stacked photo panel, back to front.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelLayer {
    /// Offset along the panel normal.
    pub depth: f32,
    /// Width and height.
    pub size: [f32; 2],
    /// Vertical offset inside the panel.
    pub lift: f32,
    /// Flat color, `None` for the photo itself.
    pub color: Option<[f32; 3]>,
    /// Faces backwards.
    pub flipped: bool,
}

/// The layer stack each backend composes per panel.
pub const PANEL_LAYERS: [PanelLayer; 4] = [
    // back card
    PanelLayer { depth: -0.02, size: [1.3, 1.6], lift: 0.0, color: Some(arbor_shared::palette::CARD_BACK), flipped: true },
    // gold trim, slightly larger than the card
    PanelLayer { depth: -0.015, size: [1.32, 1.62], lift: 0.0, color: Some(arbor_shared::palette::TRIM_GOLD), flipped: false },
    // front card
    PanelLayer { depth: -0.01, size: [1.3, 1.6], lift: 0.0, color: Some(arbor_shared::palette::CARD_FRONT), flipped: false },
    // photo
    PanelLayer { depth: 0.001, size: [1.1, 1.1], lift: 0.1, color: None, flipped: false },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layouts_are_aligned() {
        assert_eq!(PointVertex::SIZE, 32);
        assert_eq!(OrnamentInstance::SIZE, 48);
        assert_eq!(PanelInstance::SIZE, 48);
        assert_eq!(std::mem::size_of::<FoliageUniforms>(), 16);
    }

    #[test]
    fn test_panel_layers_back_to_front() {
        for pair in PANEL_LAYERS.windows(2) {
            assert!(pair[0].depth < pair[1].depth);
        }
        assert!(PANEL_LAYERS[3].color.is_none());
    }
}
