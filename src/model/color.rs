// Sector color palettes.
//
// A sector maps each ring index to a color. Without a gradient the palette is
// flat; with a gradient it runs linearly (in RGB) from the base color towards
// a copy whose HSL lightness is scaled by `colorGradientLimit`.

use serde::Serialize;

use super::input::RadarConfig;

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    /// Accepts `#rgb`, `#rrggbb` and `rgb(r, g, b)`.
    pub fn parse(input: &str) -> Option<Rgb> {
        let s = input.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex);
        }
        let inner = s
            .strip_prefix("rgb(")
            .or_else(|| s.strip_prefix("RGB("))?
            .strip_suffix(')')?;
        let mut channels = inner.split(',').map(|c| c.trim().parse::<f64>());
        let r = channels.next()?.ok()?;
        let g = channels.next()?.ok()?;
        let b = channels.next()?.ok()?;
        if channels.next().is_some() {
            return None;
        }
        Some(Rgb { r, g, b })
    }

    pub fn lerp(&self, other: &Rgb, t: f64) -> Rgb {
        Rgb {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }

    /// Same hue and saturation, lightness multiplied by `factor`.
    pub fn scale_lightness(&self, factor: f64) -> Rgb {
        let mut hsl = Hsl::from_rgb(self);
        hsl.l *= factor;
        hsl.to_rgb()
    }

    pub fn to_css(&self) -> String {
        let c = |v: f64| v.round().clamp(0.0, 255.0) as u8;
        format!("rgb({}, {}, {})", c(self.r), c(self.g), c(self.b))
    }
}

fn parse_hex(hex: &str) -> Option<Rgb> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let (r, g, b) = match hex.len() {
        3 => {
            let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).map(|d| d * 17);
            (digit(0).ok()?, digit(1).ok()?, digit(2).ok()?)
        }
        6 => {
            let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
            (pair(0).ok()?, pair(2).ok()?, pair(4).ok()?)
        }
        _ => return None,
    };
    Some(Rgb { r: r as f64, g: g as f64, b: b as f64 })
}

/// Hue in degrees, saturation and lightness in [0, 1] (lightness may exceed 1
/// after scaling; channels are clamped on output).
#[derive(Debug, Copy, Clone, PartialEq)]
struct Hsl {
    h: f64,
    s: f64,
    l: f64,
}

impl Hsl {
    fn from_rgb(rgb: &Rgb) -> Hsl {
        let r = rgb.r / 255.0;
        let g = rgb.g / 255.0;
        let b = rgb.b / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;
        let d = max - min;
        if d == 0.0 {
            return Hsl { h: 0.0, s: 0.0, l };
        }
        let h = if r == max {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if g == max {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };
        let s = if l < 0.5 { d / (max + min) } else { d / (2.0 - max - min) };
        Hsl { h: h * 60.0, s, l }
    }

    fn to_rgb(self) -> Rgb {
        let h = self.h.rem_euclid(360.0);
        let l = self.l;
        let m2 = l + (if l < 0.5 { l } else { 1.0 - l }) * self.s;
        let m1 = 2.0 * l - m2;
        let channel = |h: f64| {
            let v = if h < 60.0 {
                m1 + (m2 - m1) * h / 60.0
            } else if h < 180.0 {
                m2
            } else if h < 240.0 {
                m1 + (m2 - m1) * (240.0 - h) / 60.0
            } else {
                m1
            };
            v * 255.0
        };
        Rgb {
            r: channel(if h >= 240.0 { h - 240.0 } else { h + 120.0 }),
            g: channel(h),
            b: channel(if h < 120.0 { h + 240.0 } else { h - 120.0 }),
        }
    }
}

/// Ring index -> color for one sector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorPalette {
    pub start: Rgb,
    pub end: Rgb,
    /// Number of rings; index `ring_count` would map to `end`.
    pub ring_count: usize,
}

impl SectorPalette {
    pub fn flat(color: Rgb, ring_count: usize) -> Self {
        Self { start: color, end: color, ring_count }
    }

    pub fn gradient(color: Rgb, lightness_limit: f64, ring_count: usize) -> Self {
        Self {
            start: color,
            end: color.scale_lightness(lightness_limit),
            ring_count,
        }
    }

    /// Chooses flat/gradient and sector/default color from the config flags.
    /// Returns the offending string if a color cannot be parsed.
    pub fn for_sector(
        config: &RadarConfig,
        sector_color: &str,
        ring_count: usize,
    ) -> Result<Self, String> {
        let base = if config.sector.use_color {
            sector_color
        } else {
            config.radar.default_color.as_str()
        };
        let rgb = Rgb::parse(base).ok_or_else(|| base.to_string())?;
        if config.segment.color_gradient {
            Ok(Self::gradient(rgb, config.segment.color_gradient_limit, ring_count))
        } else {
            Ok(Self::flat(rgb, ring_count))
        }
    }

    pub fn color_at(&self, ring_index: usize) -> Rgb {
        if self.ring_count == 0 {
            return self.start;
        }
        let t = ring_index as f64 / self.ring_count as f64;
        self.start.lerp(&self.end, t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_formats() {
        assert_eq!(Rgb::parse("#ff0000"), Some(Rgb { r: 255.0, g: 0.0, b: 0.0 }));
        assert_eq!(Rgb::parse("#0f0"), Some(Rgb { r: 0.0, g: 255.0, b: 0.0 }));
        assert_eq!(Rgb::parse(" rgb(1, 2, 3) "), Some(Rgb { r: 1.0, g: 2.0, b: 3.0 }));
        assert_eq!(Rgb::parse("#12345"), None);
        assert_eq!(Rgb::parse("#gg0000"), None);
        assert_eq!(Rgb::parse("rgb(1, 2)"), None);
        assert_eq!(Rgb::parse("tomato"), None);
    }

    #[test]
    fn test_to_css_rounds_and_clamps() {
        let c = Rgb { r: 12.4, g: 300.0, b: -4.0 };
        assert_eq!(c.to_css(), "rgb(12, 255, 0)");
    }

    #[test]
    fn test_hsl_roundtrip() {
        for hex in ["#336699", "#ff8800", "#808080", "#000000", "#ffffff", "#9b30ff"] {
            let rgb = Rgb::parse(hex).unwrap();
            let back = Hsl::from_rgb(&rgb).to_rgb();
            assert!((back.r - rgb.r).abs() < 1e-6, "{}", hex);
            assert!((back.g - rgb.g).abs() < 1e-6, "{}", hex);
            assert!((back.b - rgb.b).abs() < 1e-6, "{}", hex);
        }
    }

    #[test]
    fn test_scale_lightness() {
        let grey = Rgb { r: 100.0, g: 100.0, b: 100.0 };
        let lighter = grey.scale_lightness(1.5);
        assert!((lighter.r - 150.0).abs() < 1e-6);
        assert_eq!(lighter.r, lighter.g);
        assert_eq!(lighter.g, lighter.b);
    }

    #[test]
    fn test_palette_modes() {
        let mut config = RadarConfig::default();
        config.radar.default_color = "#000000".to_string();

        config.sector.use_color = true;
        config.segment.color_gradient = false;
        let p = SectorPalette::for_sector(&config, "#ff0000", 4).unwrap();
        assert_eq!(p.color_at(0), p.color_at(3));
        assert_eq!(p.color_at(2).to_css(), "rgb(255, 0, 0)");

        config.sector.use_color = false;
        let p = SectorPalette::for_sector(&config, "#ff0000", 4).unwrap();
        assert_eq!(p.color_at(1).to_css(), "rgb(0, 0, 0)");

        config.sector.use_color = true;
        config.segment.color_gradient = true;
        config.segment.color_gradient_limit = 2.5;
        let p = SectorPalette::for_sector(&config, "#660000", 4).unwrap();
        // lightness 0.2 -> 0.5 => pure red at the end of the domain
        assert_eq!(p.end.to_css(), "rgb(255, 0, 0)");
        assert_eq!(p.color_at(0).to_css(), "rgb(102, 0, 0)");
        assert_eq!(p.color_at(1).to_css(), "rgb(140, 0, 0)");
    }

    #[test]
    fn test_palette_rejects_bad_color() {
        let config = RadarConfig::default();
        let err = SectorPalette::for_sector(&config, "not-a-color", 3).unwrap_err();
        assert_eq!(err, "not-a-color");
    }
}
