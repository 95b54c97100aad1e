/// Color palette and channel-wise mixing.

use crossterm::style::Color;

/// A 24-bit color.  World geometry is drawn in these; the canvas converts to
/// crossterm colors only at present time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` literal.
    pub const fn from_hex(hex: u32) -> Self {
        Rgb {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }
}

impl From<Rgb> for Color {
    fn from(c: Rgb) -> Color {
        Color::Rgb { r: c.r, g: c.g, b: c.b }
    }
}

// ── Named colors ──────────────────────────────────────────────────────────────

pub const WHITE: Rgb = Rgb::from_hex(0xffffff);
pub const BLACK: Rgb = Rgb::from_hex(0x484848);
pub const BLUE: Rgb = Rgb::from_hex(0x3ca4cb);
pub const GREEN: Rgb = Rgb::from_hex(0x8abc3f);
pub const RED: Rgb = Rgb::from_hex(0xe03e41);
pub const YELLOW: Rgb = Rgb::from_hex(0xefc74b);
pub const PURPLE: Rgb = Rgb::from_hex(0x8d6adf);
pub const PINK: Rgb = Rgb::from_hex(0xcc669c);
pub const GRAY: Rgb = Rgb::from_hex(0xa7a7af);
pub const DIM_GRAY: Rgb = Rgb::from_hex(0x726f6f);
pub const LGRAY: Rgb = Rgb::from_hex(0xdbdbdb);
pub const PURE_BLACK: Rgb = Rgb::from_hex(0x000000);

// ── Mixing ────────────────────────────────────────────────────────────────────

/// Blend `b` into `a` with weight `w` in [0, 1], each channel independently.
/// At `w <= 0` this is exactly `a`; at `w >= 1` exactly `b`.  Fractional
/// channel values truncate.
pub fn mix(a: Rgb, b: Rgb, w: f64) -> Rgb {
    if w <= 0.0 {
        return a;
    }
    if w >= 1.0 {
        return b;
    }
    let wa = 1.0 - w;
    let ch = |x: u8, y: u8| (f64::from(x) * wa + f64::from(y) * w) as u8;
    Rgb::new(ch(a.r, b.r), ch(a.g, b.g), ch(a.b, b.b))
}
