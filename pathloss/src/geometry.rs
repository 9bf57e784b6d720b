use crate::C;
use num_traits::{AsPrimitive, Float, FloatConst};

/// Lengths of the two rays of a ground-reflected link.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayPaths<T> {
    /// Line of sight path from transmitter to receiver.
    pub direct_m: T,

    /// Path bouncing off the ground between transmitter and receiver.
    pub reflected_m: T,
}

impl<T: Float> RayPaths<T> {
    /// Returns the ray lengths for antennas `x_m` apart horizontally,
    /// mounted `tx_height_m` and `rx_height_m` above ground.
    pub fn new(x_m: T, tx_height_m: T, rx_height_m: T) -> Self {
        let x_sq = x_m.powi(2);
        Self {
            direct_m: (x_sq + (tx_height_m - rx_height_m).powi(2)).sqrt(),
            reflected_m: (x_sq + (tx_height_m + rx_height_m).powi(2)).sqrt(),
        }
    }

    /// Extra distance travelled by the reflected ray.
    pub fn path_difference_m(&self) -> T {
        self.reflected_m - self.direct_m
    }

    /// Phase lag (radians) of the reflected ray relative to the
    /// direct ray at `freq_hz`.
    ///
    /// The two rays cancel when this is a multiple of 2π.
    pub fn phase_difference(&self, freq_hz: T) -> T
    where
        T: FloatConst + 'static,
        usize: AsPrimitive<T>,
    {
        let c: T = C.as_();
        (T::PI() + T::PI()) * freq_hz * self.path_difference_m() / c
    }
}

/// Returns the direct and reflected ray lengths, see [`RayPaths::new`].
pub fn ray_paths<T: Float>(x_m: T, tx_height_m: T, rx_height_m: T) -> RayPaths<T> {
    RayPaths::new(x_m, tx_height_m, rx_height_m)
}

/// Free space propagation delay over `distance_m`, in seconds.
pub fn delay_s<T>(distance_m: T) -> T
where
    T: Float + 'static,
    usize: AsPrimitive<T>,
{
    let c: T = C.as_();
    distance_m / c
}
