use phf::{Map, phf_map};
use std::fmt;

/// Neutral color used for categories that have no explicit assignment.
pub const FALLBACK_COLOR: &str = "#808080";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn from_u32(value: u32) -> Self {
        Self {
            r: ((value >> 16) & 0xff) as u8,
            g: ((value >> 8) & 0xff) as u8,
            b: (value & 0xff) as u8,
        }
    }

    /// Parses `#rgb` or `#rrggbb` (case-insensitive).
    pub fn from_hex(text: &str) -> Option<Self> {
        let digits = text.trim().strip_prefix('#')?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match digits.len() {
            6 => u32::from_str_radix(digits, 16).ok().map(Self::from_u32),
            3 => {
                let expanded: String = digits.chars().flat_map(|c| [c, c]).collect();
                u32::from_str_radix(&expanded, 16).ok().map(Self::from_u32)
            }
            _ => None,
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    /// Discrete palette; sampling picks the nearest lower entry.
    Listed,
    /// Evenly spaced anchors joined by linear interpolation.
    Interpolated,
}

static COLORMAPS: Map<&'static str, (Kind, &'static [u32])> = phf_map! {
    "tab10" => (Kind::Listed, &[
        0x1f77b4, 0xff7f0e, 0x2ca02c, 0xd62728, 0x9467bd,
        0x8c564b, 0xe377c2, 0x7f7f7f, 0xbcbd22, 0x17becf,
    ]),
    "tab20" => (Kind::Listed, &[
        0x1f77b4, 0xaec7e8, 0xff7f0e, 0xffbb78, 0x2ca02c, 0x98df8a, 0xd62728,
        0xff9896, 0x9467bd, 0xc5b0d5, 0x8c564b, 0xc49c94, 0xe377c2, 0xf7b6d2,
        0x7f7f7f, 0xc7c7c7, 0xbcbd22, 0xdbdb8d, 0x17becf, 0x9edae5,
    ]),
    "Set1" => (Kind::Listed, &[
        0xe41a1c, 0x377eb8, 0x4daf4a, 0x984ea3, 0xff7f00,
        0xffff33, 0xa65628, 0xf781bf, 0x999999,
    ]),
    "Set2" => (Kind::Listed, &[
        0x66c2a5, 0xfc8d62, 0x8da0cb, 0xe78ac3, 0xa6d854, 0xffd92f, 0xe5c494, 0xb3b3b3,
    ]),
    "Set3" => (Kind::Listed, &[
        0x8dd3c7, 0xffffb3, 0xbebada, 0xfb8072, 0x80b1d3, 0xfdb462,
        0xb3de69, 0xfccde5, 0xd9d9d9, 0xbc80bd, 0xccebc5, 0xffed6f,
    ]),
    "Pastel1" => (Kind::Listed, &[
        0xfbb4ae, 0xb3cde3, 0xccebc5, 0xdecbe4, 0xfed9a6,
        0xffffcc, 0xe5d8bd, 0xfddaec, 0xf2f2f2,
    ]),
    "Pastel2" => (Kind::Listed, &[
        0xb3e2cd, 0xfdcdac, 0xcbd5e8, 0xf4cae4, 0xe6f5c9, 0xfff2ae, 0xf1e2cc, 0xcccccc,
    ]),
    "Paired" => (Kind::Listed, &[
        0xa6cee3, 0x1f78b4, 0xb2df8a, 0x33a02c, 0xfb9a99, 0xe31a1c,
        0xfdbf6f, 0xff7f00, 0xcab2d6, 0x6a3d9a, 0xffff99, 0xb15928,
    ]),
    "Dark2" => (Kind::Listed, &[
        0x1b9e77, 0xd95f02, 0x7570b3, 0xe7298a, 0x66a61e, 0xe6ab02, 0xa6761d, 0x666666,
    ]),
    "Accent" => (Kind::Listed, &[
        0x7fc97f, 0xbeaed4, 0xfdc086, 0xffff99, 0x386cb0, 0xf0027f, 0xbf5b17, 0x666666,
    ]),
    "viridis" => (Kind::Interpolated, &[
        0x440154, 0x472d7b, 0x3b528b, 0x2c728e, 0x21918c, 0x28ae80, 0x5ec962, 0xaddc30, 0xfde725,
    ]),
    "plasma" => (Kind::Interpolated, &[
        0x0d0887, 0x4c02a1, 0x7e03a8, 0xa92395, 0xcc4778, 0xe56b5d, 0xf89441, 0xfdc328, 0xf0f921,
    ]),
    "magma" => (Kind::Interpolated, &[
        0x000004, 0x1c1044, 0x4f127b, 0x812581, 0xb5367a, 0xe55964, 0xfb8761, 0xfec287, 0xfcfdbf,
    ]),
    "inferno" => (Kind::Interpolated, &[
        0x000004, 0x1f0c48, 0x550f6d, 0x88226a, 0xba3655, 0xe35933, 0xf98c0a, 0xf9c932, 0xfcffa4,
    ]),
    "coolwarm" => (Kind::Interpolated, &[
        0x3b4cc0, 0x6f92f3, 0xaac7fd, 0xdddddd, 0xf7b89c, 0xe7745b, 0xb40426,
    ]),
    "bwr" => (Kind::Interpolated, &[0x0000ff, 0xffffff, 0xff0000]),
    "seismic" => (Kind::Interpolated, &[0x00004c, 0x0000ff, 0xffffff, 0xff0000, 0x7f0000]),
    "RdBu" => (Kind::Interpolated, &[
        0x67001f, 0xb2182b, 0xd6604d, 0xf4a582, 0xfddbc7, 0xf7f7f7,
        0xd1e5f0, 0x92c5de, 0x4393c3, 0x2166ac, 0x053061,
    ]),
    "Spectral" => (Kind::Interpolated, &[
        0x9e0142, 0xd53e4f, 0xf46d43, 0xfdae61, 0xfee08b, 0xffffbf,
        0xe6f598, 0xabdda4, 0x66c2a5, 0x3288bd, 0x5e4fa2,
    ]),
    "Greys" => (Kind::Interpolated, &[
        0xffffff, 0xf0f0f0, 0xd9d9d9, 0xbdbdbd, 0x969696, 0x737373, 0x525252, 0x252525, 0x000000,
    ]),
    "Blues" => (Kind::Interpolated, &[
        0xf7fbff, 0xdeebf7, 0xc6dbef, 0x9ecae1, 0x6baed6, 0x4292c6, 0x2171b5, 0x08519c, 0x08306b,
    ]),
    "Reds" => (Kind::Interpolated, &[
        0xfff5f0, 0xfee0d2, 0xfcbba1, 0xfc9272, 0xfb6a4a, 0xef3b2c, 0xcb181d, 0xa50f15, 0x67000d,
    ]),
    "Greens" => (Kind::Interpolated, &[
        0xf7fcf5, 0xe5f5e0, 0xc7e9c0, 0xa1d99b, 0x74c476, 0x41ab5d, 0x238b45, 0x006d2c, 0x00441b,
    ]),
    "Oranges" => (Kind::Interpolated, &[
        0xfff5eb, 0xfee6ce, 0xfdd0a2, 0xfdae6b, 0xfd8d3c, 0xf16913, 0xd94801, 0xa63603, 0x7f2704,
    ]),
    "Purples" => (Kind::Interpolated, &[
        0xfcfbfd, 0xefedf5, 0xdadaeb, 0xbcbddc, 0x9e9ac8, 0x807dba, 0x6a51a3, 0x54278f, 0x3f007d,
    ]),
};

static NAMED_COLORS: Map<&'static str, u32> = phf_map! {
    "b" => 0x0000ff, "g" => 0x008000, "r" => 0xff0000, "c" => 0x00bfbf,
    "m" => 0xbf00bf, "y" => 0xbfbf00, "k" => 0x000000, "w" => 0xffffff,
    "black" => 0x000000, "white" => 0xffffff, "red" => 0xff0000, "green" => 0x008000,
    "blue" => 0x0000ff, "orange" => 0xffa500, "purple" => 0x800080, "gray" => 0x808080,
    "grey" => 0x808080, "yellow" => 0xffff00, "cyan" => 0x00ffff, "magenta" => 0xff00ff,
    "brown" => 0xa52a2a, "pink" => 0xffc0cb, "navy" => 0x000080, "teal" => 0x008080,
    "olive" => 0x808000, "maroon" => 0x800000, "lime" => 0x00ff00, "gold" => 0xffd700,
    "silver" => 0xc0c0c0, "lightgray" => 0xd3d3d3, "lightgrey" => 0xd3d3d3,
    "darkgray" => 0xa9a9a9, "darkgrey" => 0xa9a9a9, "darkblue" => 0x00008b,
    "darkred" => 0x8b0000, "darkgreen" => 0x006400, "darkorange" => 0xff8c00,
    "lightblue" => 0xadd8e6, "skyblue" => 0x87ceeb, "steelblue" => 0x4682b4,
    "royalblue" => 0x4169e1, "salmon" => 0xfa8072, "coral" => 0xff7f50, "tomato" => 0xff6347,
    "crimson" => 0xdc143c, "orchid" => 0xda70d6, "violet" => 0xee82ee, "indigo" => 0x4b0082,
    "turquoise" => 0x40e0d0, "slategray" => 0x708090, "slategrey" => 0x708090,
    "tab:blue" => 0x1f77b4, "tab:orange" => 0xff7f0e, "tab:green" => 0x2ca02c,
    "tab:red" => 0xd62728, "tab:purple" => 0x9467bd, "tab:brown" => 0x8c564b,
    "tab:pink" => 0xe377c2, "tab:gray" => 0x7f7f7f, "tab:grey" => 0x7f7f7f,
    "tab:olive" => 0xbcbd22, "tab:cyan" => 0x17becf,
};

/// A colormap from the built-in registry, possibly reversed (`<name>_r`).
#[derive(Debug, Clone, Copy)]
pub struct Colormap {
    name: &'static str,
    kind: Kind,
    stops: &'static [u32],
    reversed: bool,
}

impl Colormap {
    /// Looks up a colormap by its case-sensitive name; a `_r` suffix reverses it.
    pub fn get(name: &str) -> Option<Self> {
        let name = name.trim();
        let (base, reversed) = match name.strip_suffix("_r") {
            Some(base) => (base, true),
            None => (name, false),
        };
        let (key, (kind, stops)) = COLORMAPS.get_entry(base)?;
        Some(Self {
            name: *key,
            kind: *kind,
            stops: *stops,
            reversed,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// Evaluates the colormap at `t` in `[0, 1]` (values outside are clamped).
    pub fn at(&self, t: f64) -> Rgb {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let t = if self.reversed { 1.0 - t } else { t };
        let len = self.stops.len();
        match self.kind {
            Kind::Listed => {
                let index = ((t * len as f64).floor() as usize).min(len - 1);
                Rgb::from_u32(self.stops[index])
            }
            Kind::Interpolated => {
                let position = t * (len - 1) as f64;
                let lower = (position.floor() as usize).min(len - 2);
                let fraction = position - lower as f64;
                Rgb::from_u32(self.stops[lower]).lerp(Rgb::from_u32(self.stops[lower + 1]), fraction)
            }
        }
    }

    /// Draws `n` colors at evenly spaced positions from the start to the end of the map.
    ///
    /// A single color is taken from the start of the map.
    pub fn sample(&self, n: usize) -> Vec<Rgb> {
        match n {
            0 => Vec::new(),
            1 => vec![self.at(0.0)],
            _ => (0..n)
                .map(|i| self.at(i as f64 / (n - 1) as f64))
                .collect(),
        }
    }
}

pub fn is_colormap(name: &str) -> bool {
    Colormap::get(name).is_some()
}

/// Resolves a literal color: a `#rgb` / `#rrggbb` hex string or a known color name.
pub fn parse_color(text: &str) -> Option<Rgb> {
    let text = text.trim();
    if text.starts_with('#') {
        return Rgb::from_hex(text);
    }
    NAMED_COLORS
        .get(text)
        .or_else(|| NAMED_COLORS.get(text.to_ascii_lowercase().as_str()))
        .copied()
        .map(Rgb::from_u32)
}
