//! Empirical indoor path loss models.
//!
//! Unlike the outdoor models, these take frequency in **MHz** and
//! return a positive loss in dB.

use crate::error::PathlossError;
use num_traits::{AsPrimitive, Float};
use std::{fmt, str::FromStr};

/// Margin the lab subtracts each model's loss from when comparing
/// them.
pub const LINK_MARGIN_DB: f64 = 20.0;

/// `-20·log10(4π·10⁶/c)`, for frequency in MHz and distance in meters.
const FREE_SPACE_OFFSET_DB: f64 = 27.55;

const ITUR_OFFSET_DB: f64 = 28.0;

/// Free space loss (dB) at `freq_mhz` over `distance_m`.
///
/// With `distance_m = 1` this is the 1 m reference loss the one-slope
/// and multi-wall models build on.
pub fn free_space<T>(freq_mhz: T, distance_m: T) -> T
where
    T: Float + 'static,
    f64: AsPrimitive<T>,
{
    let offset: T = FREE_SPACE_OFFSET_DB.as_();
    let twenty: T = 20.0_f64.as_();
    -offset + twenty * freq_mhz.log10() + twenty * distance_m.log10()
}

/// ITU-R P.1238 indoor loss (dB).
///
/// # Parameters
///
/// - `n`: distance power loss coefficient
/// - `ceil_damping_db`: penetration loss of a single floor/ceiling
/// - `ceil_count`: number of floors/ceilings crossed
pub fn itur<T>(freq_mhz: T, distance_m: T, n: T, ceil_damping_db: T, ceil_count: T) -> T
where
    T: Float + 'static,
    f64: AsPrimitive<T>,
{
    let offset: T = ITUR_OFFSET_DB.as_();
    let twenty: T = 20.0_f64.as_();
    twenty * freq_mhz.log10() + n * distance_m.log10() + ceil_damping_db * ceil_count - offset
}

/// One-slope loss (dB) with path loss exponent `y`.
pub fn one_slope<T>(freq_mhz: T, distance_m: T, y: T) -> T
where
    T: Float + 'static,
    f64: AsPrimitive<T>,
{
    let ten: T = 10.0_f64.as_();
    free_space(freq_mhz, T::one()) + ten * y * distance_m.log10()
}

/// Motley-Keenan loss (dB): free space plus a fixed loss per wall and
/// per ceiling.
pub fn motley_keenan<T>(
    freq_mhz: T,
    distance_m: T,
    wall_count: T,
    ceil_count: T,
    wall_damping_db: T,
    ceil_damping_db: T,
) -> T
where
    T: Float + 'static,
    f64: AsPrimitive<T>,
{
    free_space(freq_mhz, distance_m) + wall_count * wall_damping_db + ceil_count * ceil_damping_db
}

/// Multi-wall loss (dB): one-slope plus the loss of every obstacle.
///
/// An empty `obstacles` slice gives exactly [`one_slope`].
pub fn multi_wall<T>(freq_mhz: T, distance_m: T, y: T, obstacles: &[Obstacle<T>]) -> T
where
    T: Float + 'static,
    f64: AsPrimitive<T>,
{
    one_slope(freq_mhz, distance_m, y) + obstruction_loss(obstacles)
}

/// Total loss (dB) of a list of obstacles.
pub fn obstruction_loss<T: Float>(obstacles: &[Obstacle<T>]) -> T {
    obstacles
        .iter()
        .fold(T::zero(), |total, obstacle| total + obstacle.loss_db())
}

/// `count` identical obstacles each attenuating by `damping_db`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Obstacle<T> {
    pub count: T,
    pub damping_db: T,
}

impl<T: Float> Obstacle<T> {
    pub fn new(count: T, damping_db: T) -> Self {
        Self { count, damping_db }
    }

    pub fn loss_db(&self) -> T {
        self.count * self.damping_db
    }
}

/// Typical obstacle losses at 2.4 GHz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Material {
    Window,
    InnerWall,
    OuterWall,
    Ceiling,
}

impl Material {
    pub fn damping_db(self) -> f64 {
        match self {
            Material::Window => 4.5,
            Material::InnerWall => 7.0,
            Material::OuterWall => 9.0,
            Material::Ceiling => 11.0,
        }
    }
}

impl FromStr for Material {
    type Err = PathlossError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "window" => Ok(Material::Window),
            "inner-wall" => Ok(Material::InnerWall),
            "outer-wall" => Ok(Material::OuterWall),
            "ceiling" => Ok(Material::Ceiling),
            other => Err(PathlossError::Material(other.to_owned())),
        }
    }
}

/// The indoor models a [`Scenario`] can be evaluated with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Model {
    FreeSpace,
    Itur,
    OneSlope,
    MotleyKeenan,
    MultiWall,
}

impl Model {
    pub const ALL: [Model; 5] = [
        Model::FreeSpace,
        Model::Itur,
        Model::OneSlope,
        Model::MotleyKeenan,
        Model::MultiWall,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Model::FreeSpace => "free space",
            Model::Itur => "ITU-R",
            Model::OneSlope => "one-slope",
            Model::MotleyKeenan => "Motley-Keenan",
            Model::MultiWall => "multi-wall",
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Every parameter needed to evaluate all indoor models for a single
/// transmitter/receiver placement.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario<T> {
    /// Signal frequency (MHz).
    pub freq_mhz: T,

    /// Transmitter to receiver distance (meters).
    pub distance_m: T,

    /// Walls crossed (Motley-Keenan).
    pub wall_count: T,

    /// Ceilings crossed (ITU-R and Motley-Keenan).
    pub ceil_count: T,

    /// Loss per wall (dB).
    pub wall_damping_db: T,

    /// Loss per ceiling (dB).
    pub ceil_damping_db: T,

    /// ITU-R distance power loss coefficient.
    pub itur_n: T,

    /// Path loss exponent (one-slope and multi-wall).
    pub exponent: T,

    /// Obstacles (multi-wall).
    pub obstacles: Vec<Obstacle<T>>,
}

impl Scenario<f64> {
    /// 2.4 GHz Wi-Fi (channel 1) across one inner wall and two
    /// ceilings, 7 m apart, with a window in the multi-wall path.
    pub fn lab_default() -> Self {
        Self {
            freq_mhz: 2412.0,
            distance_m: 7.0,
            wall_count: 1.0,
            ceil_count: 2.0,
            wall_damping_db: Material::InnerWall.damping_db(),
            ceil_damping_db: Material::Ceiling.damping_db(),
            itur_n: 28.0,
            exponent: 4.0,
            obstacles: vec![Obstacle::new(1.0, Material::Window.damping_db())],
        }
    }
}

impl<T> Scenario<T>
where
    T: Float + 'static,
    f64: AsPrimitive<T>,
{
    /// Loss (dB) predicted by `model`.
    pub fn loss_db(&self, model: Model) -> T {
        match model {
            Model::FreeSpace => free_space(self.freq_mhz, self.distance_m),
            Model::Itur => itur(
                self.freq_mhz,
                self.distance_m,
                self.itur_n,
                self.ceil_damping_db,
                self.ceil_count,
            ),
            Model::OneSlope => one_slope(self.freq_mhz, self.distance_m, self.exponent),
            Model::MotleyKeenan => motley_keenan(
                self.freq_mhz,
                self.distance_m,
                self.wall_count,
                self.ceil_count,
                self.wall_damping_db,
                self.ceil_damping_db,
            ),
            Model::MultiWall => multi_wall(
                self.freq_mhz,
                self.distance_m,
                self.exponent,
                &self.obstacles,
            ),
        }
    }

    /// [`LINK_MARGIN_DB`] minus the loss predicted by `model`.
    pub fn margin_db(&self, model: Model) -> T {
        let margin: T = LINK_MARGIN_DB.as_();
        margin - self.loss_db(model)
    }

    /// `(model, margin)` for every model, in [`Model::ALL`] order.
    pub fn margins(&self) -> impl Iterator<Item = (Model, T)> + '_ {
        Model::ALL
            .into_iter()
            .map(move |model| (model, self.margin_db(model)))
    }
}

#[cfg(test)]
mod tests {
    use super::{
        free_space, itur, motley_keenan, multi_wall, obstruction_loss, one_slope, Material, Model,
        Obstacle, Scenario,
    };
    use crate::PathlossError;
    use approx::assert_relative_eq;

    #[test]
    fn test_free_space() {
        assert_relative_eq!(
            free_space(2412.0, 7.0),
            20.0 * 2412_f64.log10() + 20.0 * 7_f64.log10() - 27.55,
            epsilon = 1e-12
        );
        assert_relative_eq!(free_space(2412.0, 7.0), 56.999_506_869_647_42, epsilon = 1e-9);
    }

    #[test]
    fn test_itur() {
        assert_relative_eq!(
            itur(2412.0, 7.0, 28.0, 11.0, 2.0),
            20.0 * 2412_f64.log10() + 28.0 * 7_f64.log10() + 22.0 - 28.0,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            itur(2412.0, 7.0, 28.0, 11.0, 2.0),
            85.310_291_189_761_47,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_one_slope_baseline() {
        for freq_mhz in [900.0, 2412.0, 5180.0] {
            assert_eq!(one_slope(freq_mhz, 1.0, 4.0), free_space(freq_mhz, 1.0));
        }
        assert_relative_eq!(free_space(2412.0, 1.0), 40.097_546_069_362_28, epsilon = 1e-9);
    }

    #[test]
    fn test_one_slope_matches_free_space_at_exponent_2() {
        assert_relative_eq!(
            one_slope(2412.0, 7.0, 2.0),
            free_space(2412.0, 7.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_motley_keenan() {
        assert_eq!(
            motley_keenan(2412.0, 7.0, 1.0, 2.0, 7.0, 11.0),
            free_space(2412.0, 7.0) + 7.0 + 22.0
        );
        assert_eq!(
            motley_keenan(2412.0, 7.0, 0.0, 0.0, 7.0, 11.0),
            free_space(2412.0, 7.0)
        );
    }

    #[test]
    fn test_multi_wall_without_obstacles() {
        for distance_m in [0.5, 1.0, 7.0, 42.0] {
            assert_eq!(
                multi_wall(2412.0, distance_m, 4.0, &[]),
                one_slope(2412.0, distance_m, 4.0)
            );
        }
    }

    #[test]
    fn test_multi_wall_sums_obstacles() {
        let obstacles = [Obstacle::new(2.0, 7.0), Obstacle::new(1.0, 4.5)];
        assert_eq!(obstruction_loss(&obstacles), 18.5);
        assert_eq!(
            multi_wall(2412.0, 7.0, 4.0, &obstacles),
            one_slope(2412.0, 7.0, 4.0) + 18.5
        );
    }

    #[test]
    fn test_zero_distance() {
        assert_eq!(free_space(2412.0, 0.0), f64::NEG_INFINITY);
        assert!(one_slope(2412.0_f64, -1.0, 4.0).is_nan());
    }

    #[test]
    fn test_f32() {
        assert_relative_eq!(free_space(2412.0_f32, 7.0), 56.9995, epsilon = 1e-3);
    }

    #[test]
    fn test_lab_scenario() {
        let scenario = Scenario::lab_default();
        let expected = [
            (Model::FreeSpace, -36.999_506_869_647_42),
            (Model::Itur, -65.310_291_189_761_47),
            (Model::OneSlope, -53.901_467_669_932_54),
            (Model::MotleyKeenan, -65.999_506_869_647_42),
            (Model::MultiWall, -58.401_467_669_932_54),
        ];
        for ((model, margin), (expected_model, expected_margin)) in
            scenario.margins().zip(expected)
        {
            assert_eq!(model, expected_model);
            assert_relative_eq!(margin, expected_margin, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_margin_is_complement_of_loss() {
        let scenario = Scenario::lab_default();
        for model in Model::ALL {
            assert_eq!(
                scenario.margin_db(model),
                20.0 - scenario.loss_db(model),
                "{model}"
            );
        }
    }

    #[test]
    fn test_material() {
        assert_eq!("window".parse(), Ok(Material::Window));
        assert_eq!("outer-wall".parse::<Material>().unwrap().damping_db(), 9.0);
        assert_eq!(
            "door".parse::<Material>(),
            Err(PathlossError::Material("door".into()))
        );
    }
}
