//! Piece colors with a rotating hue.
//!
//! Uses the same luminance-preserving matrix as the CSS `hue-rotate()`
//! filter, so a shift of 0 degrees leaves every color unchanged.

use crate::fb::Rgb;
use crate::types::PieceKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    hue: u16,
    /// Rotated colors indexed by `PieceKind::id() - 1`.
    colors: [Rgb; 7],
}

impl Palette {
    pub fn new(hue: u16) -> Self {
        let mut palette = Self {
            hue: 0,
            colors: PieceKind::ALL.map(|kind| Rgb::from(kind.rgb())),
        };
        palette.set_hue(hue);
        palette
    }

    pub fn hue(&self) -> u16 {
        self.hue
    }

    /// Recompute every piece color for `hue` degrees.
    pub fn set_hue(&mut self, hue: u16) {
        self.hue = hue % 360;
        for kind in PieceKind::ALL {
            self.colors[usize::from(kind.id() - 1)] = hue_rotate(kind.rgb().into(), self.hue);
        }
    }

    pub fn color(&self, kind: PieceKind) -> Rgb {
        self.colors[usize::from(kind.id() - 1)]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Rotate `rgb` around the color wheel by `degrees`.
pub fn hue_rotate(rgb: Rgb, degrees: u16) -> Rgb {
    if degrees % 360 == 0 {
        return rgb;
    }
    let (sin, cos) = f64::from(degrees).to_radians().sin_cos();
    let (r, g, b) = (f64::from(rgb.r), f64::from(rgb.g), f64::from(rgb.b));

    let nr = (0.213 + 0.787 * cos - 0.213 * sin) * r
        + (0.715 - 0.715 * cos - 0.715 * sin) * g
        + (0.072 - 0.072 * cos + 0.928 * sin) * b;
    let ng = (0.213 - 0.213 * cos + 0.143 * sin) * r
        + (0.715 + 0.285 * cos + 0.140 * sin) * g
        + (0.072 - 0.072 * cos - 0.283 * sin) * b;
    let nb = (0.213 - 0.213 * cos - 0.787 * sin) * r
        + (0.715 - 0.715 * cos + 0.715 * sin) * g
        + (0.072 + 0.928 * cos + 0.072 * sin) * b;

    Rgb::new(channel(nr), channel(ng), channel(nb))
}

fn channel(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}
