//! Fixed colors, RGB in `[0, 1]`.

/// Converts `0xRRGGBB` to RGB floats.
#[must_use]
pub fn hex(rgb: u32) -> [f32; 3] {
    let channel = |shift: u32| f32::from(((rgb >> shift) & 0xFF) as u8) / 255.0;
    [channel(16), channel(8), channel(0)]
}

/// Ornament gold tones (#FFD700, #FDB931, #C5A059, #E6BE8A).
pub const GOLD: [[f32; 3]; 4] = [
    [1.0, 0.8431, 0.0],
    [0.9922, 0.7255, 0.1922],
    [0.7725, 0.6275, 0.349],
    [0.902, 0.7451, 0.5412],
];

/// Ornament red tones (#8A0303, #B30000, #FF0000).
pub const RED: [[f32; 3]; 3] = [
    [0.5412, 0.0118, 0.0118],
    [0.702, 0.0, 0.0],
    [1.0, 0.0, 0.0],
];

/// Foliage color at the bottom of the gradient (dark emerald).
pub const FOLIAGE_BOTTOM: [f32; 3] = [0.02, 0.22, 0.15];

/// Foliage color at the top of the gradient.
pub const FOLIAGE_TOP: [f32; 3] = [0.1, 0.5, 0.3];

/// Foliage fleck color.
pub const FLECK_GOLD: [f32; 3] = [1.0, 0.84, 0.0];

/// Photo panel trim (#D4AF37).
pub const TRIM_GOLD: [f32; 3] = [0.8314, 0.6863, 0.2157];

/// Photo panel front card (#FFFFF0).
pub const CARD_FRONT: [f32; 3] = [1.0, 1.0, 0.9412];

/// Photo panel back card (#1A1A1A).
pub const CARD_BACK: [f32; 3] = [0.102, 0.102, 0.102];

/// Scene background (#021A12).
pub const BACKGROUND: [f32; 3] = [0.0078, 0.102, 0.0706];
