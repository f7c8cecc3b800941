use palette::{LinSrgb, Mix, Srgb};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Rgb – renderer-agnostic colour carried by chart specs
// ---------------------------------------------------------------------------

/// Serialized as a `#rrggbb` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn from_hex(hex: u32) -> Self {
        Self::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    /// `#rrggbb`
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    fn into_linear(self) -> LinSrgb {
        Srgb::new(self.r, self.g, self.b).into_format::<f32>().into_linear()
    }

    fn from_linear(color: LinSrgb) -> Self {
        let srgb: Srgb<u8> = Srgb::<f32>::from_linear(color).into_format();
        Self::new(srgb.red, srgb.green, srgb.blue)
    }
}

impl From<Rgb> for String {
    fn from(c: Rgb) -> Self {
        c.hex()
    }
}

/// Colour for rows the bin classifier could not place.
pub const UNCLASSIFIED: Rgb = Rgb::new(0x9e, 0x9e, 0x9e);

// ---------------------------------------------------------------------------
// Sequential ramp
// ---------------------------------------------------------------------------

/// Viridis key colours, dark purple to yellow.
const VIRIDIS: [Rgb; 9] = [
    Rgb::from_hex(0x440154),
    Rgb::from_hex(0x472d7b),
    Rgb::from_hex(0x3b528b),
    Rgb::from_hex(0x2c728e),
    Rgb::from_hex(0x21918c),
    Rgb::from_hex(0x28ae80),
    Rgb::from_hex(0x5ec962),
    Rgb::from_hex(0xaddc30),
    Rgb::from_hex(0xfde725),
];

/// Sample the viridis ramp at `t` in `[0, 1]`, interpolating in linear RGB.
pub fn viridis(t: f64) -> Rgb {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let scaled = t * (VIRIDIS.len() - 1) as f64;
    let lo = (scaled.floor() as usize).min(VIRIDIS.len() - 2);
    let frac = (scaled - lo as f64) as f32;
    let mixed = VIRIDIS[lo].into_linear().mix(VIRIDIS[lo + 1].into_linear(), frac);
    Rgb::from_linear(mixed)
}

/// `n` categorical colours from the viridis ramp.
///
/// The ramp ends are skipped so that no category gets the extreme colours.
pub fn viridis_palette(n: usize) -> Vec<Rgb> {
    (0..n)
        .map(|i| viridis((i + 1) as f64 / (n + 1) as f64))
        .collect()
}

// ---------------------------------------------------------------------------
// Qualitative palette
// ---------------------------------------------------------------------------

/// High-saturation qualitative palette for per-company encodings.
pub const BRIGHT: [Rgb; 10] = [
    Rgb::from_hex(0x023eff),
    Rgb::from_hex(0xff7c00),
    Rgb::from_hex(0x1ac938),
    Rgb::from_hex(0xe8000b),
    Rgb::from_hex(0x8b2be2),
    Rgb::from_hex(0x9f4800),
    Rgb::from_hex(0xf14cc1),
    Rgb::from_hex(0xa3a3a3),
    Rgb::from_hex(0xffc400),
    Rgb::from_hex(0x00d7ff),
];

/// Colour for the `index`-th category; cycles once the palette is exhausted.
pub fn bright(index: usize) -> Rgb {
    BRIGHT[index % BRIGHT.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viridis_hits_its_key_colours() {
        assert_eq!(viridis(0.0), Rgb::from_hex(0x440154));
        assert_eq!(viridis(1.0), Rgb::from_hex(0xfde725));
        assert_eq!(viridis(0.5), Rgb::from_hex(0x21918c));
    }

    #[test]
    fn viridis_palette_has_requested_size_and_distinct_colours() {
        let p = viridis_palette(5);
        assert_eq!(p.len(), 5);
        for w in p.windows(2) {
            assert_ne!(w[0], w[1]);
        }
        assert!(viridis_palette(0).is_empty());
    }

    #[test]
    fn bright_cycles() {
        assert_eq!(bright(0), bright(BRIGHT.len()));
        assert_ne!(bright(0), bright(1));
    }

    #[test]
    fn hex_formatting() {
        assert_eq!(Rgb::new(2, 62, 255).hex(), "#023eff");
    }
}
