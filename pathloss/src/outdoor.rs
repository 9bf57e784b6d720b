//! Outdoor line of sight and two-ray ground reflection models.
//!
//! Results are the relative power drop in dB between transmitter and
//! receiver, i.e. `10·log10(Pr/Pt)`. They are negative for any
//! realistic link.

use crate::{
    error::PathlossError,
    geometry::{delay_s, RayPaths},
    C,
};
use num_traits::{AsPrimitive, Float, FloatConst};

/// Returns the wavelength (meters) of a signal at `freq_hz`.
pub fn wavelength<T>(freq_hz: T) -> T
where
    T: Float + 'static,
    usize: AsPrimitive<T>,
{
    let c: T = C.as_();
    c / freq_hz
}

/// Relative power drop (dB) of a free space line of sight link.
///
/// # Parameters
///
/// - `distance_m`: transmitter to receiver distance (meters)
/// - `freq_hz`: signal frequency (Hertz)
/// - `gain_tx`, `gain_rx`: linear (not dB) antenna gains
pub fn power_drop_free<T>(distance_m: T, freq_hz: T, gain_tx: T, gain_rx: T) -> T
where
    T: Float + FloatConst + 'static,
    usize: AsPrimitive<T>,
{
    let four: T = 4_usize.as_();
    let four_pi = four * T::PI();
    let ten: T = 10_usize.as_();
    let ratio = gain_tx * gain_rx * (wavelength(freq_hz) / (four_pi * distance_m)).powi(2);
    ten * ratio.log10()
}

/// Relative power drop (dB) of a two-ray link, where the direct ray
/// travels `direct_m` and the ground-reflected ray `reflected_m`.
///
/// Both rays are summed as phasors, with the reflection inverting the
/// reflected ray, so the result swings between deep nulls and peaks up
/// to 6 dB above free space as the path difference changes.
pub fn power_drop_multi<T>(direct_m: T, reflected_m: T, freq_hz: T, gain_tx: T, gain_rx: T) -> T
where
    T: Float + FloatConst + 'static,
    usize: AsPrimitive<T>,
{
    let c: T = C.as_();
    let two_pi = T::PI() + T::PI();
    let four_pi = two_pi + two_pi;
    let ten: T = 10_usize.as_();

    let (sin_direct, cos_direct) = (-two_pi * freq_hz * (direct_m / c)).sin_cos();
    let (sin_reflected, cos_reflected) = (-two_pi * freq_hz * (reflected_m / c)).sin_cos();

    // (1/d1)·e^(iθ1) - (1/d2)·e^(iθ2)
    let re = cos_direct / direct_m - cos_reflected / reflected_m;
    let im = sin_direct / direct_m - sin_reflected / reflected_m;

    let ratio = gain_tx * gain_rx * (wavelength(freq_hz) / four_pi).powi(2) * (re * re + im * im);
    ten * ratio.log10()
}

/// Radio parameters of an outdoor link.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link<T> {
    /// Signal frequency (Hz).
    pub freq_hz: T,

    /// Linear transmitter antenna gain.
    pub gain_tx: T,

    /// Linear receiver antenna gain.
    pub gain_rx: T,

    /// Transmitter height above ground (meters).
    pub tx_height_m: T,

    /// Receiver height above ground (meters).
    pub rx_height_m: T,
}

/// Every quantity the lab plots for one point of a distance sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LinkSample<T> {
    pub distance_m: T,
    pub free_db: T,
    pub multipath_db: T,
    pub delay_s: T,
}

impl<T> Link<T>
where
    T: Float + FloatConst + 'static,
    usize: AsPrimitive<T>,
{
    pub fn builder() -> LinkBuilder<T> {
        LinkBuilder {
            freq_hz: None,
            gain_tx: T::one(),
            gain_rx: T::one(),
            tx_height_m: T::zero(),
            rx_height_m: T::zero(),
        }
    }

    pub fn wavelength_m(&self) -> T {
        wavelength(self.freq_hz)
    }

    /// Ray lengths for a horizontal separation of `x_m`.
    pub fn ray_paths(&self, x_m: T) -> RayPaths<T> {
        RayPaths::new(x_m, self.tx_height_m, self.rx_height_m)
    }

    /// Free space power drop at `distance_m`; antenna heights are
    /// ignored.
    pub fn power_drop_free(&self, distance_m: T) -> T {
        power_drop_free(distance_m, self.freq_hz, self.gain_tx, self.gain_rx)
    }

    /// Two-ray power drop at a horizontal separation of `x_m`.
    pub fn power_drop_multi(&self, x_m: T) -> T {
        let RayPaths {
            direct_m,
            reflected_m,
        } = self.ray_paths(x_m);
        power_drop_multi(direct_m, reflected_m, self.freq_hz, self.gain_tx, self.gain_rx)
    }

    pub fn sample(&self, distance_m: T) -> LinkSample<T> {
        LinkSample {
            distance_m,
            free_db: self.power_drop_free(distance_m),
            multipath_db: self.power_drop_multi(distance_m),
            delay_s: delay_s(distance_m),
        }
    }
}

pub struct LinkBuilder<T> {
    /// Signal frequency (Hz, required).
    freq_hz: Option<T>,

    /// Linear transmitter gain (defaults to 1).
    gain_tx: T,

    /// Linear receiver gain (defaults to 1).
    gain_rx: T,

    /// Transmitter height above ground (meters, defaults to 0).
    tx_height_m: T,

    /// Receiver height above ground (meters, defaults to 0).
    rx_height_m: T,
}

impl<T: Copy> LinkBuilder<T> {
    /// Frequency of signal (Hz, required).
    #[must_use]
    pub fn freq(mut self, freq_hz: T) -> Self {
        self.freq_hz = Some(freq_hz);
        self
    }

    /// Linear transmitter gain (defaults to 1).
    #[must_use]
    pub fn gain_tx(mut self, gain: T) -> Self {
        self.gain_tx = gain;
        self
    }

    /// Linear receiver gain (defaults to 1).
    #[must_use]
    pub fn gain_rx(mut self, gain: T) -> Self {
        self.gain_rx = gain;
        self
    }

    /// Transmitter height above ground (meters, defaults to 0).
    #[must_use]
    pub fn tx_height(mut self, meters: T) -> Self {
        self.tx_height_m = meters;
        self
    }

    /// Receiver height above ground (meters, defaults to 0).
    #[must_use]
    pub fn rx_height(mut self, meters: T) -> Self {
        self.rx_height_m = meters;
        self
    }

    pub fn build(&self) -> Result<Link<T>, PathlossError> {
        let freq_hz = self.freq_hz.ok_or(PathlossError::Builder("freq"))?;
        Ok(Link {
            freq_hz,
            gain_tx: self.gain_tx,
            gain_rx: self.gain_rx,
            tx_height_m: self.tx_height_m,
            rx_height_m: self.rx_height_m,
        })
    }
}
