//! Color schemes.
//!
//! Cells only carry a shape name; a scheme turns that name into a color.
//! Mirror-image shapes (names ending in `'`) take a lighter shade of their
//! base shape's color. Names a scheme does not list get a stable color from
//! its fallback ring.

use crate::fb::Rgb;
use crate::types::ShapeKey;

#[derive(Debug)]
pub struct ColorScheme {
    pub name: &'static str,
    pub background: Rgb,
    pub field: Rgb,
    pub grid_dot: Rgb,
    pub border: Rgb,
    pub text: Rgb,
    pub ghost: Rgb,
    shapes: &'static [(&'static str, Rgb)],
    fallback: &'static [Rgb],
}

impl ColorScheme {
    pub fn shape_color(&self, key: ShapeKey) -> Rgb {
        let name = key.as_str();
        let (base, mirrored) = match name.strip_suffix('\'') {
            Some(base) => (base, true),
            None => (name, false),
        };
        let color = self
            .shapes
            .iter()
            .find(|(n, _)| *n == base)
            .map(|&(_, c)| c)
            .unwrap_or_else(|| self.fallback_color(base));
        if mirrored {
            color.lighten(40)
        } else {
            color
        }
    }

    fn fallback_color(&self, name: &str) -> Rgb {
        if self.fallback.is_empty() {
            return self.text;
        }
        let hash = name
            .bytes()
            .fold(0usize, |h, b| h.wrapping_mul(31).wrapping_add(b as usize));
        self.fallback[hash % self.fallback.len()]
    }
}

const DEFAULT_SHAPES: &[(&str, Rgb)] = &[
    ("I", Rgb::new(80, 220, 220)),
    ("O", Rgb::new(240, 220, 80)),
    ("T", Rgb::new(200, 120, 220)),
    ("S", Rgb::new(100, 220, 120)),
    ("Z", Rgb::new(220, 80, 80)),
    ("J", Rgb::new(80, 120, 220)),
    ("L", Rgb::new(255, 165, 0)),
    ("V", Rgb::new(170, 200, 60)),
    ("F", Rgb::new(230, 110, 160)),
    ("N", Rgb::new(60, 170, 150)),
    ("P", Rgb::new(150, 100, 60)),
    ("U", Rgb::new(120, 140, 240)),
    ("W", Rgb::new(210, 180, 120)),
    ("X", Rgb::new(240, 240, 240)),
    ("Y", Rgb::new(180, 80, 140)),
];

const PASTEL_SHAPES: &[(&str, Rgb)] = &[
    ("I", Rgb::new(170, 230, 230)),
    ("O", Rgb::new(250, 240, 170)),
    ("T", Rgb::new(220, 190, 235)),
    ("S", Rgb::new(185, 235, 190)),
    ("Z", Rgb::new(245, 180, 180)),
    ("J", Rgb::new(175, 195, 240)),
    ("L", Rgb::new(250, 210, 160)),
    ("V", Rgb::new(215, 230, 165)),
    ("F", Rgb::new(245, 190, 215)),
    ("N", Rgb::new(165, 215, 205)),
    ("P", Rgb::new(210, 185, 160)),
    ("U", Rgb::new(190, 200, 245)),
    ("W", Rgb::new(235, 220, 190)),
    ("X", Rgb::new(235, 235, 235)),
    ("Y", Rgb::new(220, 175, 205)),
];

const DEFAULT_FALLBACK: &[Rgb] = &[
    Rgb::new(200, 200, 90),
    Rgb::new(90, 200, 200),
    Rgb::new(200, 90, 200),
    Rgb::new(120, 200, 90),
];

const PASTEL_FALLBACK: &[Rgb] = &[
    Rgb::new(230, 230, 180),
    Rgb::new(180, 230, 230),
    Rgb::new(230, 180, 230),
];

pub static SCHEMES: [ColorScheme; 3] = [
    ColorScheme {
        name: "default",
        background: Rgb::new(0, 0, 0),
        field: Rgb::new(30, 30, 40),
        grid_dot: Rgb::new(90, 90, 100),
        border: Rgb::new(200, 200, 200),
        text: Rgb::new(220, 220, 220),
        ghost: Rgb::new(140, 140, 140),
        shapes: DEFAULT_SHAPES,
        fallback: DEFAULT_FALLBACK,
    },
    ColorScheme {
        name: "pastel",
        background: Rgb::new(20, 20, 28),
        field: Rgb::new(48, 46, 60),
        grid_dot: Rgb::new(110, 106, 128),
        border: Rgb::new(230, 220, 240),
        text: Rgb::new(240, 235, 245),
        ghost: Rgb::new(160, 155, 175),
        shapes: PASTEL_SHAPES,
        fallback: PASTEL_FALLBACK,
    },
    ColorScheme {
        name: "mono",
        background: Rgb::new(0, 0, 0),
        field: Rgb::new(0, 0, 0),
        grid_dot: Rgb::new(60, 60, 60),
        border: Rgb::new(180, 180, 180),
        text: Rgb::new(200, 200, 200),
        ghost: Rgb::new(90, 90, 90),
        shapes: &[],
        fallback: &[Rgb::new(200, 200, 200)],
    },
];

/// Scheme by name.
pub fn scheme(name: &str) -> Option<&'static ColorScheme> {
    SCHEMES.iter().find(|s| s.name == name)
}

/// Scheme at `index`, wrapping around.
pub fn scheme_at(index: usize) -> &'static ColorScheme {
    &SCHEMES[index % SCHEMES.len()]
}
