use serde::{Deserialize, Serialize};

/// Straight (non-premultiplied) colour with its opacity kept in a separate channel.
///
/// Shadows scale `opacity` directly; the base colour is never re-encoded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Color {
    /// Red in `[0, 1]`.
    pub r: f64,
    /// Green in `[0, 1]`.
    pub g: f64,
    /// Blue in `[0, 1]`.
    pub b: f64,
    /// Opacity in `[0, 1]`.
    #[serde(rename = "a")]
    pub opacity: f64,
}

impl Color {
    /// Build a colour from straight RGBA components.
    pub fn rgba(r: f64, g: f64, b: f64, opacity: f64) -> Self {
        Self { r, g, b, opacity }
    }

    /// Build a fully opaque colour.
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Copy of this colour with its opacity multiplied by `weight`.
    pub fn with_opacity_scaled(self, weight: f64) -> Self {
        Self {
            opacity: (self.opacity * weight).clamp(0.0, 1.0),
            ..self
        }
    }

    /// Copy of this colour carrying `opacity` instead of its own.
    pub fn with_opacity(self, opacity: f64) -> Self {
        Self {
            opacity: opacity.clamp(0.0, 1.0),
            ..self
        }
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            RgbaObj {
                r: f64,
                g: f64,
                b: f64,
                #[serde(default = "one")]
                a: f64,
            },
            HslaObj {
                h: f64,
                s: f64,
                l: f64,
                #[serde(default = "one")]
                a: f64,
            },
            Arr(Vec<f64>),
        }

        fn one() -> f64 {
            1.0
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => parse_hex(&s).map_err(serde::de::Error::custom),
            Repr::RgbaObj { r, g, b, a } => Ok(Self::rgba(r, g, b, a)),
            Repr::HslaObj { h, s, l, a } => Ok(hsla_to_rgba(h, s, l, a)),
            Repr::Arr(v) => match v.as_slice() {
                &[r, g, b] => Ok(Self::rgb(r, g, b)),
                &[r, g, b, a] => Ok(Self::rgba(r, g, b, a)),
                _ => Err(serde::de::Error::custom(
                    "rgba array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                )),
            },
        }
    }
}

fn parse_hex(s: &str) -> Result<Color, String> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    if !s.is_ascii() || (s.len() != 6 && s.len() != 8) {
        return Err("hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)".to_owned());
    }

    let r = hex_byte(&s[0..2])?;
    let g = hex_byte(&s[2..4])?;
    let b = hex_byte(&s[4..6])?;
    let a = if s.len() == 8 {
        hex_byte(&s[6..8])?
    } else {
        255
    };

    Ok(Color::rgba(
        f64::from(r) / 255.0,
        f64::from(g) / 255.0,
        f64::from(b) / 255.0,
        f64::from(a) / 255.0,
    ))
}

fn hsla_to_rgba(h: f64, s: f64, l: f64, a: f64) -> Color {
    let h = (h % 360.0 + 360.0) % 360.0 / 360.0;
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    if s == 0.0 {
        return Color::rgba(l, l, l, a);
    }

    fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            return p + (q - p) * 6.0 * t;
        }
        if t < 1.0 / 2.0 {
            return q;
        }
        if t < 2.0 / 3.0 {
            return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
        }
        p
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    Color::rgba(
        hue_to_rgb(p, q, h + 1.0 / 3.0),
        hue_to_rgb(p, q, h),
        hue_to_rgb(p, q, h - 1.0 / 3.0),
        a,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/record/color.rs"]
mod tests;
