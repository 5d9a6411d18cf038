//! Gas species ejected by the vent

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::BASE_SPEED;
use crate::renderer::{Color, colors};

/// Molecule carried by a particle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    SO2,
    CO2,
    H2S,
    H2O,
}

impl Species {
    /// All species, in table order
    pub const ALL: [Species; 4] = [Species::SO2, Species::CO2, Species::H2S, Species::H2O];

    /// Legend order, top to bottom
    pub const LEGEND: [Species; 4] = [Species::H2O, Species::H2S, Species::CO2, Species::SO2];

    /// Uniform draw over [`Species::ALL`]
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Species::SO2 => "SO2",
            Species::CO2 => "CO2",
            Species::H2S => "H2S",
            Species::H2O => "H2O",
        }
    }

    /// Trail and legend color
    pub fn color(&self) -> Color {
        match self {
            Species::SO2 => colors::LT_GREY,
            Species::CO2 => colors::GREY,
            Species::H2S => colors::DK_GREY,
            Species::H2O => colors::WHITE,
        }
    }

    /// Launch speed multiplier relative to SO2.
    ///
    /// Ratio of the SO2 molecular weight to this species' weight, so that
    /// for a fixed energy budget lighter molecules leave the vent faster.
    pub fn velocity_scale(&self) -> f32 {
        match self {
            Species::SO2 => 1.0,
            Species::CO2 => 1.45,
            Species::H2S => 1.9,
            Species::H2O => 3.6,
        }
    }

    /// Launch speed in pixels/tick
    pub fn launch_speed(&self) -> f32 {
        BASE_SPEED * self.velocity_scale()
    }

    /// Legend text
    pub fn label(&self) -> &'static str {
        match self {
            Species::SO2 => "--- SO2/S2",
            Species::CO2 => "--- CO2",
            Species::H2S => "--- H2S",
            Species::H2O => "--- H2O",
        }
    }
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_colors_are_distinct() {
        for (i, a) in Species::ALL.iter().enumerate() {
            for b in &Species::ALL[i + 1..] {
                assert_ne!(a.color(), b.color(), "{a} and {b} share a color");
            }
        }
    }

    #[test]
    fn test_launch_speeds() {
        assert_eq!(Species::SO2.launch_speed(), 8.0);
        assert!((Species::H2O.launch_speed() - 28.8).abs() < 1e-5);
        assert!((Species::CO2.launch_speed() - 11.6).abs() < 1e-5);
        assert!((Species::H2S.launch_speed() - 15.2).abs() < 1e-5);
    }

    #[test]
    fn test_legend_covers_every_species() {
        for species in Species::ALL {
            assert!(Species::LEGEND.contains(&species));
        }
    }

    #[test]
    fn test_random_draw_reaches_every_species() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut counts = [0u32; 4];
        for _ in 0..4000 {
            let s = Species::random(&mut rng);
            let idx = Species::ALL.iter().position(|&x| x == s).unwrap();
            counts[idx] += 1;
        }
        // Roughly uniform: each near 1000
        for count in counts {
            assert!((800..1200).contains(&count), "skewed draw: {counts:?}");
        }
    }
}
