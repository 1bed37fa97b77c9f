//! Colours for the board.
//!
//! Terminals have no alpha channel, so translucent colours are blended by
//! hand: the grid background is the background colour at the configured
//! opacity over black, and each tile is the tile colour laid over the grid
//! background at an intensity derived from its value.

use anyhow::{bail, Result};
use crossterm::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Build from exactly three channel values, as collected by the argument parser.
    pub fn from_channels(channels: &[u8]) -> Result<Self> {
        match channels {
            [r, g, b] => Ok(Rgb::new(*r, *g, *b)),
            _ => bail!("expected 3 colour channels, got {}", channels.len()),
        }
    }

    /// `self` with `over` laid on top at `alpha` (0.0-1.0).
    pub fn blend(self, over: Rgb, alpha: f32) -> Rgb {
        let alpha = alpha.clamp(0.0, 1.0);
        Rgb {
            r: mix(self.r, over.r, alpha),
            g: mix(self.g, over.g, alpha),
            b: mix(self.b, over.b, alpha),
        }
    }
}

fn mix(under: u8, over: u8, alpha: f32) -> u8 {
    (under as f32 + (over as f32 - under as f32) * alpha).round() as u8
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Color {
        Color::Rgb {
            r: rgb.r,
            g: rgb.g,
            b: rgb.b,
        }
    }
}

/// Colour settings handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Rgb,
    pub tile: Rgb,
    pub opacity: f32,
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            background: Rgb::new(143, 0, 255),
            tile: Rgb::new(237, 115, 115),
            opacity: 0.13,
        }
    }
}

impl Palette {
    pub fn grid_background(&self) -> Rgb {
        Rgb::BLACK.blend(self.background, self.opacity)
    }

    pub fn tile_color(&self, value: u32) -> Rgb {
        self.grid_background().blend(self.tile, tile_intensity(value))
    }
}

/// Tile colour alpha: `(log2(value) mod 10) * 0.05`, with empty cells at 0.
pub fn tile_intensity(value: u32) -> f32 {
    let exponent = value.checked_ilog2().unwrap_or(0);
    (exponent % 10) as f32 * 0.05
}

/// Parse an opacity in hundredths between 0.00 and 1.00.
pub fn parse_opacity(s: &str) -> Result<f32, String> {
    let value: f32 = match s.trim().parse() {
        Ok(value) => value,
        Err(_) => return Err(format!("`{}` is not a number", s)),
    };
    if !(0.0..=1.0).contains(&value) {
        return Err(format!("opacity {} is outside 0.00..=1.00", value));
    }
    let hundredths = value * 100.0;
    if (hundredths - hundredths.round()).abs() > 1e-3 {
        return Err(format!("opacity {} has more than two decimals", value));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_intensity() {
        assert_eq!(tile_intensity(0), 0.0);
        assert!((tile_intensity(2) - 0.05).abs() < 1e-6);
        assert!((tile_intensity(512) - 0.45).abs() < 1e-6);
        // 1024 = 2^10 wraps back to 0.
        assert_eq!(tile_intensity(1024), 0.0);
        assert!((tile_intensity(2048) - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_blend_extremes() {
        let white = Rgb::new(255, 255, 255);
        assert_eq!(Rgb::BLACK.blend(white, 0.0), Rgb::BLACK);
        assert_eq!(Rgb::BLACK.blend(white, 1.0), white);
        assert_eq!(Rgb::BLACK.blend(white, 0.5), Rgb::new(128, 128, 128));
    }

    #[test]
    fn test_palette_colors() {
        let palette = Palette::default();
        let grid_bg = palette.grid_background();
        assert_eq!(grid_bg, Rgb::new(19, 0, 33));
        assert_eq!(palette.tile_color(0), grid_bg);
        assert_ne!(palette.tile_color(256), grid_bg);
    }

    #[test]
    fn test_from_channels() {
        assert_eq!(Rgb::from_channels(&[1, 2, 3]).unwrap(), Rgb::new(1, 2, 3));
        assert!(Rgb::from_channels(&[1, 2]).is_err());
    }

    #[test]
    fn test_parse_opacity() {
        assert_eq!(parse_opacity("0.13"), Ok(0.13));
        assert_eq!(parse_opacity("1"), Ok(1.0));
        assert_eq!(parse_opacity("0"), Ok(0.0));
        assert!(parse_opacity("1.01").is_err());
        assert!(parse_opacity("-0.5").is_err());
        assert!(parse_opacity("0.125").is_err());
        assert!(parse_opacity("opaque").is_err());
    }
}
