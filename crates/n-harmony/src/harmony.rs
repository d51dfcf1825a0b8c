//! Harmony engine — palettes from hue-wheel geometry.
//!
//! Each harmony takes a seed color, reads its HSL once, and builds a fixed
//! number of colors by rotating the hue (always modulo 360) and nudging
//! saturation/lightness inside `[0, 100]`. Kinds that start from the seed
//! keep the seed color itself, byte for byte, as the first entry.

use std::fmt;
use std::str::FromStr;

use n_color::{Color, ColorError, Hsl, Palette};
use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::debug;

use crate::error::HarmonyError;

/// Amount (in percent) analogous jitter may move saturation or lightness.
pub const JITTER: f64 = 5.0;

/// Harmonies "surprise me" picks from.
pub const SURPRISE_KINDS: [HarmonyKind; 3] = [
    HarmonyKind::Analogous,
    HarmonyKind::Monochromatic,
    HarmonyKind::Triadic,
];

/// The rule used to derive a palette from a seed color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HarmonyKind {
    /// Neighbours at -40/-20/+20/+40 degrees, with jittered s/l (5 colors).
    Analogous,
    /// Seed and its 180-degree opposite plus variants of both (5 colors).
    Complementary,
    /// 120-degree spacing plus two nudged variants (5 colors).
    Triadic,
    /// Seed plus the two hues flanking its complement (3 colors).
    SplitComplementary,
    /// Two complementary pairs, second pair lightness-offset (4 colors).
    Tetradic,
    /// 90-degree spacing at constant s/l (4 colors).
    Square,
    /// Single hue, stepped lightness and saturation (5 colors).
    Monochromatic,
    /// Grays from dark to light (5 colors).
    Achromatic,
}

impl HarmonyKind {
    /// Generate a palette using the thread-local random source.
    #[must_use]
    pub fn generate(self, seed: Color) -> Palette {
        self.generate_with(seed, &mut rand::rng())
    }

    /// Generate a palette drawing any jitter from `rng`.
    pub fn generate_with<R: Rng + ?Sized>(self, seed: Color, rng: &mut R) -> Palette {
        let palette = match self {
            Self::Analogous => analogous(seed, rng),
            Self::Complementary => complementary(seed),
            Self::Triadic => triadic(seed),
            Self::SplitComplementary => split_complementary(seed),
            Self::Tetradic => tetradic(seed),
            Self::Square => square(seed),
            Self::Monochromatic => monochromatic(seed),
            Self::Achromatic => achromatic(),
        };
        debug!(harmony = self.name(), seed = %seed, palette = %palette, "generated palette");
        palette
    }

    /// Number of colors this harmony produces.
    #[must_use]
    pub const fn color_count(self) -> usize {
        match self {
            Self::SplitComplementary => 3,
            Self::Tetradic | Self::Square => 4,
            Self::Analogous
            | Self::Complementary
            | Self::Triadic
            | Self::Monochromatic
            | Self::Achromatic => 5,
        }
    }

    /// Whether two calls with the same seed may return different palettes.
    #[must_use]
    pub const fn is_randomized(self) -> bool {
        matches!(self, Self::Analogous)
    }

    /// Stable kebab-case name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Analogous => "analogous",
            Self::Complementary => "complementary",
            Self::Triadic => "triadic",
            Self::SplitComplementary => "split-complementary",
            Self::Tetradic => "tetradic",
            Self::Square => "square",
            Self::Monochromatic => "monochromatic",
            Self::Achromatic => "achromatic",
        }
    }

    /// One-line explanation for pickers and help output.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Analogous => "Colors adjacent on the color wheel",
            Self::Complementary => "Colors opposite each other (180° apart)",
            Self::Triadic => "Three colors evenly spaced (120° apart)",
            Self::SplitComplementary => "Base color plus two adjacent to its complement",
            Self::Tetradic => "Two complementary pairs (rectangle)",
            Self::Square => "Four colors evenly spaced (90° apart)",
            Self::Monochromatic => "Variations of a single hue",
            Self::Achromatic => "Black, white and grays",
        }
    }

    /// Parse a harmony from its name (case-insensitive; `-`, `_` and
    /// camelCase spellings of multi-word names are all accepted).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted: String = name
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        Self::all()
            .iter()
            .find(|k| k.name().replace('-', "") == wanted)
            .copied()
    }

    /// All harmony kinds, in picker order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Analogous,
            Self::Complementary,
            Self::Triadic,
            Self::Square,
            Self::Tetradic,
            Self::SplitComplementary,
            Self::Monochromatic,
            Self::Achromatic,
        ]
    }
}

impl fmt::Display for HarmonyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HarmonyKind {
    type Err = HarmonyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| HarmonyError::UnknownHarmony(s.to_string()))
    }
}

/// Parse `seed` and generate `kind` from it.
///
/// # Errors
///
/// Returns [`ColorError::InvalidColorFormat`] if `seed` is not a hex color.
pub fn generate_from_hex(kind: HarmonyKind, seed: &str) -> Result<Palette, ColorError> {
    Color::hex(seed).map(|c| kind.generate(c))
}

/// "Surprise me": a random seed run through a randomly chosen harmony from
/// [`SURPRISE_KINDS`].
pub fn random_palette<R: Rng + ?Sized>(rng: &mut R) -> (HarmonyKind, Palette) {
    let seed = Color::random(rng);
    let kind = *SURPRISE_KINDS.choose(rng).unwrap_or(&HarmonyKind::Analogous);
    (kind, kind.generate_with(seed, rng))
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

/// Seed plus neighbours at -40, -20, +20, +40 degrees. Saturation and
/// lightness of each neighbour move independently by up to [`JITTER`].
pub fn analogous<R: Rng + ?Sized>(seed: Color, rng: &mut R) -> Palette {
    let base = seed.to_hsl();
    let mut colors = Vec::with_capacity(5);
    colors.push(seed);
    for offset in [-40.0, -20.0, 20.0, 40.0] {
        let hsl = Hsl::new(base.h, jitter(base.s, rng), jitter(base.l, rng)).shift_hue(offset);
        colors.push(hsl.to_color());
    }
    Palette::new(colors)
}

/// Five steps at the seed hue: lightness from `l-30` to `l+30` (clamped to
/// `[10, 90]`), saturation from `s-10` to `s+10`.
#[must_use]
pub fn monochromatic(seed: Color) -> Palette {
    let Hsl { h, s, l } = seed.to_hsl();
    (0..5)
        .map(|i| {
            let step = f64::from(i);
            let light = step.mul_add(15.0, l - 30.0).clamp(10.0, 90.0);
            let sat = step.mul_add(5.0, s - 10.0).clamp(0.0, 100.0);
            Color::from_hsl(h, sat, light)
        })
        .collect()
}

/// Seed, the two triadic hues, then one variant of each triadic hue.
#[must_use]
pub fn triadic(seed: Color) -> Palette {
    let base = seed.to_hsl();
    let first = base.shift_hue(120.0);
    let second = base.shift_hue(240.0);
    Palette::new(vec![
        seed,
        first.to_color(),
        second.to_color(),
        nudge(first, 10.0, -10.0).to_color(),
        nudge(second, -10.0, 10.0).to_color(),
    ])
}

/// Seed, a lighter seed, the complement, then a lighter and a darker
/// complement.
#[must_use]
pub fn complementary(seed: Color) -> Palette {
    let base = seed.to_hsl();
    let opposite = base.shift_hue(180.0);
    Palette::new(vec![
        seed,
        nudge(base, -10.0, 15.0).to_color(),
        opposite.to_color(),
        nudge(opposite, -10.0, 15.0).to_color(),
        nudge(opposite, 10.0, -15.0).to_color(),
    ])
}

/// Seed plus the hues 30 degrees either side of its complement.
#[must_use]
pub fn split_complementary(seed: Color) -> Palette {
    let base = seed.to_hsl();
    Palette::new(vec![
        seed,
        base.shift_hue(150.0).to_color(),
        base.shift_hue(210.0).to_color(),
    ])
}

/// Two complementary pairs: `(h, h+180)` at the seed's s/l and
/// `(h+90, h+270)` lifted and dropped by 10 points of lightness.
#[must_use]
pub fn tetradic(seed: Color) -> Palette {
    let base = seed.to_hsl();
    Palette::new(vec![
        seed,
        nudge(base.shift_hue(90.0), 0.0, 10.0).to_color(),
        base.shift_hue(180.0).to_color(),
        nudge(base.shift_hue(270.0), 0.0, -10.0).to_color(),
    ])
}

/// Four hues 90 degrees apart, saturation and lightness unchanged.
#[must_use]
pub fn square(seed: Color) -> Palette {
    let base = seed.to_hsl();
    Palette::new(vec![
        seed,
        base.shift_hue(90.0).to_color(),
        base.shift_hue(180.0).to_color(),
        base.shift_hue(270.0).to_color(),
    ])
}

/// Five grays at lightness 10, 30, 50, 70, 90. The seed is irrelevant.
#[must_use]
pub fn achromatic() -> Palette {
    (0..5)
        .map(|i| Color::from_hsl(0.0, 0.0, f64::from(i).mul_add(20.0, 10.0)))
        .collect()
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Move saturation and lightness by the given deltas, clamped to [0, 100].
fn nudge(hsl: Hsl, ds: f64, dl: f64) -> Hsl {
    Hsl::new(
        hsl.h,
        (hsl.s + ds).clamp(0.0, 100.0),
        (hsl.l + dl).clamp(0.0, 100.0),
    )
}

/// `value` moved by a uniform amount in `[-JITTER, JITTER]`, clamped.
fn jitter<R: Rng + ?Sized>(value: f64, rng: &mut R) -> f64 {
    (value + rng.random_range(-JITTER..=JITTER)).clamp(0.0, 100.0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn c(hex: &str) -> Color {
        Color::hex(hex).unwrap()
    }

    fn hexes(p: &Palette) -> Vec<String> {
        p.to_hex_strings()
    }

    fn hue_distance(a: f64, b: f64) -> f64 {
        let d = (a - b).abs() % 360.0;
        if d > 180.0 { 360.0 - d } else { d }
    }

    /// Every kind produces its advertised number of valid colors.
    #[test]
    fn all_kinds_have_expected_length() {
        let mut rng = StdRng::seed_from_u64(1);
        for &kind in HarmonyKind::all() {
            for seed in ["#ff0000", "#4080bf", "#123", "#ffffff", "#000000"] {
                let p = kind.generate_with(c(seed), &mut rng);
                assert_eq!(p.len(), kind.color_count(), "{kind} from {seed}");
                for hex in hexes(&p) {
                    assert_eq!(hex.len(), 7);
                    assert!(Color::hex(&hex).is_ok());
                }
            }
        }
    }

    /// Seed-anchored kinds keep the seed as entry 0.
    #[test]
    fn seed_is_first_entry() {
        let seed = c("#4080bf");
        let mut rng = StdRng::seed_from_u64(2);
        for kind in [
            HarmonyKind::Analogous, HarmonyKind::Complementary, HarmonyKind::Triadic,
            HarmonyKind::SplitComplementary, HarmonyKind::Tetradic, HarmonyKind::Square,
        ] {
            assert_eq!(kind.generate_with(seed, &mut rng).get(0), Some(seed), "{kind}");
        }
    }

    // -- Triadic ------------------------------------------------------------

    #[test]
    fn triadic_from_red() {
        let p = triadic(c("#ff0000"));
        assert_eq!(
            hexes(&p),
            vec!["#ff0000", "#00ff00", "#0000ff", "#00cc00", "#3d3df5"]
        );
        assert_eq!(p.get(1).unwrap().to_hsl().h, 120.0);
        assert_eq!(p.get(2).unwrap().to_hsl().h, 240.0);
    }

    #[test]
    fn triadic_variants_share_triadic_hues() {
        let p = triadic(c("#4080bf"));
        for (i, want) in [(1, 330.0), (2, 90.0), (3, 330.0), (4, 90.0)] {
            let h = p.get(i).unwrap().to_hsl().h;
            assert!(hue_distance(h, want) <= 1.0, "entry {i}: hue {h}, want {want}");
        }
    }

    // -- Monochromatic ------------------------------------------------------

    #[test]
    fn monochromatic_keeps_hue_and_steps_lightness() {
        let p = monochromatic(c("#ff0000"));
        let hsl: Vec<Hsl> = p.iter().map(|c| c.to_hsl()).collect();
        for v in &hsl {
            assert_eq!(v.h, 0.0);
        }
        let lights: Vec<f64> = hsl.iter().map(|v| v.l).collect();
        assert_eq!(lights, vec![20.0, 35.0, 50.0, 65.0, 80.0]);
    }

    #[test]
    fn monochromatic_clamps_dark_seed() {
        // l = 10 → raw steps -20, -5, 10, 25, 40 → clamped to 10, 10, 10, 25, 40.
        let p = monochromatic(Color::from_hsl(200.0, 60.0, 10.0));
        let lights: Vec<f64> = p.iter().map(|c| c.to_hsl().l).collect();
        assert!(lights.windows(2).all(|w| w[0] <= w[1]), "{lights:?}");
        assert!(lights.iter().all(|l| (9.0..=41.0).contains(l)), "{lights:?}");
    }

    #[test]
    fn monochromatic_is_deterministic() {
        assert_eq!(monochromatic(c("#4080bf")), monochromatic(c("#4080bf")));
    }

    // -- Analogous ----------------------------------------------------------

    #[test]
    fn analogous_hues_and_jitter_bounds() {
        let seed = c("#4080bf"); // hsl(210, 50%, 50%)
        for s in 0..20 {
            let mut rng = StdRng::seed_from_u64(s);
            let p = analogous(seed, &mut rng);
            for (i, offset) in [(1, -40.0), (2, -20.0), (3, 20.0), (4, 40.0)] {
                let v = p.get(i).unwrap().to_hsl();
                assert!(hue_distance(v.h, 210.0 + offset) <= 2.0, "seed {s} entry {i}: {v}");
                assert!((v.s - 50.0).abs() <= JITTER + 1.0, "seed {s} entry {i}: {v}");
                assert!((v.l - 50.0).abs() <= JITTER + 1.0, "seed {s} entry {i}: {v}");
            }
        }
    }

    #[test]
    fn analogous_wraps_around_zero() {
        let seed = Color::from_hsl(350.0, 100.0, 50.0);
        let mut rng = StdRng::seed_from_u64(9);
        let p = analogous(seed, &mut rng);
        let h = p.get(4).unwrap().to_hsl().h;
        assert!(hue_distance(h, 30.0) <= 2.0, "hue {h}");
    }

    #[test]
    fn analogous_jitter_stays_in_gamut_at_extremes() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let p = analogous(Color::WHITE, &mut rng);
            assert_eq!(p.len(), 5);
            for v in p.iter().map(|c| c.to_hsl()) {
                assert!((0.0..=100.0).contains(&v.s) && (0.0..=100.0).contains(&v.l));
            }
        }
    }

    // -- Complementary family -----------------------------------------------

    #[test]
    fn complementary_from_red() {
        let p = complementary(c("#ff0000"));
        assert_eq!(p.get(2), Some(c("#00ffff")));
        for i in [2, 3, 4] {
            assert_eq!(p.get(i).unwrap().to_hsl().h, 180.0, "entry {i}");
        }
        assert_eq!(p.get(1).unwrap().to_hsl().h, 0.0);
    }

    #[test]
    fn split_complementary_from_red() {
        assert_eq!(
            hexes(&split_complementary(c("#ff0000"))),
            vec!["#ff0000", "#00ff80", "#0080ff"]
        );
    }

    #[test]
    fn square_from_red() {
        assert_eq!(
            hexes(&square(c("#ff0000"))),
            vec!["#ff0000", "#80ff00", "#00ffff", "#8000ff"]
        );
    }

    #[test]
    fn tetradic_offsets_second_pair() {
        let p = tetradic(c("#ff0000"));
        let hsl: Vec<(f64, f64)> = p.iter().map(|c| c.to_hsl()).map(|v| (v.h, v.l)).collect();
        assert_eq!(hsl, vec![(0.0, 50.0), (90.0, 60.0), (180.0, 50.0), (270.0, 40.0)]);
    }

    // -- Achromatic ---------------------------------------------------------

    #[test]
    fn achromatic_grays() {
        assert_eq!(
            hexes(&achromatic()),
            vec!["#1a1a1a", "#4d4d4d", "#808080", "#b3b3b3", "#e6e6e6"]
        );
        assert_eq!(
            HarmonyKind::Achromatic.generate(c("#ff0000")),
            HarmonyKind::Achromatic.generate(c("#00ff00"))
        );
    }

    // -- Surprise me --------------------------------------------------------

    #[test]
    fn random_palette_uses_surprise_kinds() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..30 {
            let (kind, p) = random_palette(&mut rng);
            assert!(SURPRISE_KINDS.contains(&kind));
            assert_eq!(p.len(), 5);
        }
    }

    // -- Names --------------------------------------------------------------

    #[test]
    fn names_roundtrip() {
        for &kind in HarmonyKind::all() {
            assert_eq!(HarmonyKind::from_name(kind.name()), Some(kind));
            assert_eq!(kind.to_string().parse::<HarmonyKind>().unwrap(), kind);
        }
    }

    #[test]
    fn from_name_accepts_other_spellings() {
        for name in ["splitComplementary", "split_complementary"] {
            assert_eq!(HarmonyKind::from_name(name), Some(HarmonyKind::SplitComplementary));
        }
        assert_eq!(HarmonyKind::from_name("SQUARE"), Some(HarmonyKind::Square));
        assert_eq!(HarmonyKind::from_name("rainbow"), None);
    }

    #[test]
    fn generate_from_hex_rejects_bad_seed() {
        assert!(generate_from_hex(HarmonyKind::Triadic, "#nothex").is_err());
        assert_eq!(generate_from_hex(HarmonyKind::Square, "#f00").unwrap().len(), 4);
    }

    #[test]
    fn only_analogous_is_randomized() {
        let randomized: Vec<_> = HarmonyKind::all().iter().filter(|k| k.is_randomized()).collect();
        assert_eq!(randomized, vec![&HarmonyKind::Analogous]);
    }
}
