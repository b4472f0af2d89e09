//! Colour palettes
//!
//! Day and night swap the sky, ground, plane, trail, cannon and label
//! colours. Effect colours are the same in both.

use super::Color;

/// Convert 8-bit RGB to a linear-agnostic float colour
pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
    rgba(r, g, b, 255)
}

pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Color {
    [
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        a as f32 / 255.0,
    ]
}

/// Same colour with its alpha scaled by `alpha` (0-1)
pub fn with_alpha(color: Color, alpha: f32) -> Color {
    [color[0], color[1], color[2], color[3] * alpha.clamp(0.0, 1.0)]
}

/// Mode-dependent colours
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub sky: Color,
    pub ground: Color,
    pub plane: Color,
    pub trail: Color,
    pub cannon: Color,
    pub label: Color,
}

impl Palette {
    pub const DAY: Palette = Palette {
        sky: rgb(135, 206, 235),
        ground: rgb(80, 200, 120),
        plane: rgb(100, 100, 255),
        trail: rgb(200, 200, 200),
        cannon: rgb(60, 60, 60),
        label: rgb(0, 0, 0),
    };

    pub const NIGHT: Palette = Palette {
        sky: rgb(20, 24, 40),
        ground: rgb(30, 50, 30),
        plane: rgb(180, 180, 255),
        trail: rgb(250, 230, 0),
        cannon: rgb(150, 150, 150),
        label: rgb(255, 255, 255),
    };

    pub fn for_mode(night: bool) -> Self {
        if night { Self::NIGHT } else { Self::DAY }
    }
}

/// Colours shared by both palettes
pub mod colors {
    use super::{Color, rgb, rgba};

    pub const SHELL: Color = rgb(0, 0, 0);
    pub const AIM_GUIDE: Color = rgb(255, 0, 0);
    pub const EXPLOSION: Color = rgb(255, 100, 0);
    pub const SMOKE: Color = rgb(200, 200, 200);
    pub const HEART: Color = rgb(255, 0, 0);
    pub const POWER_OVERLAY: Color = rgba(200, 200, 200, 80);
    pub const GAME_OVER_OVERLAY: Color = rgba(0, 0, 0, 180);
    pub const TRACERS: [Color; 3] = [rgb(255, 200, 100), rgb(255, 160, 60), rgb(255, 230, 150)];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_conversion() {
        assert_eq!(rgb(255, 0, 0), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(rgba(0, 0, 0, 0)[3], 0.0);
    }

    #[test]
    fn test_palette_switch() {
        assert_eq!(Palette::for_mode(false), Palette::DAY);
        assert_eq!(Palette::for_mode(true), Palette::NIGHT);
        assert_ne!(Palette::DAY.label, Palette::NIGHT.label);
    }

    #[test]
    fn test_with_alpha_scales() {
        let faded = with_alpha(colors::EXPLOSION, 0.5);
        assert_eq!(faded[3], 0.5);
        assert_eq!(with_alpha(colors::SMOKE, 3.0)[3], 1.0);
    }
}
