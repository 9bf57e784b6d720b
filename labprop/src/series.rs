use crate::options::Curve;
use itertools::{Itertools, MinMaxResult};
use pathloss::{geometry::delay_s, Link, Sweep};

pub const FREE_LABEL: &str = "Free propagation";
pub const MULTI_LABEL: &str = "Multipath propagation";
pub const DISTANCE_DESC: &str = "Distance (m)";
pub const POWER_DROP_DESC: &str = "Relative power drop (dB)";
pub const DELAY_DESC: &str = "Delay (s)";

/// A labeled set of (x, y) points.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: &'static str,
    pub points: Vec<(f64, f64)>,
}

/// Evaluates `curve` for `link` at every distance in `sweep`.
pub fn link_series(link: &Link<f64>, sweep: &Sweep<f64>, curve: Curve) -> Vec<Series> {
    let free = || Series {
        label: FREE_LABEL,
        points: sweep
            .clone()
            .map(|d| (d, link.power_drop_free(d)))
            .collect(),
    };
    let multi = || Series {
        label: MULTI_LABEL,
        points: sweep
            .clone()
            .map(|d| (d, link.power_drop_multi(d)))
            .collect(),
    };
    match curve {
        Curve::Free => vec![free()],
        Curve::Multi => vec![multi()],
        Curve::Both => vec![free(), multi()],
    }
}

/// Propagation delay at every distance in `sweep`.
pub fn delay_series(sweep: &Sweep<f64>) -> Series {
    Series {
        label: DELAY_DESC,
        points: sweep.clone().map(|d| (d, delay_s(d))).collect(),
    }
}

/// Panel title, frequency truncated to whole MHz.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn freq_title(freq_hz: f64) -> String {
    format!("Freq = {}MHz", (freq_hz / 1e6) as u64)
}

/// Returns the `(min, max)` of every finite `y` value.
///
/// Exact multipath nulls evaluate to `-inf`; they are skipped so the
/// axis still fits the rest of the curve.
pub fn y_bounds(series: &[Series]) -> Option<(f64, f64)> {
    match series
        .iter()
        .flat_map(|s| s.points.iter().map(|(_, y)| *y))
        .filter(|y| y.is_finite())
        .minmax_by(f64::total_cmp)
    {
        MinMaxResult::NoElements => None,
        MinMaxResult::OneElement(y) => Some((y - 1.0, y + 1.0)),
        MinMaxResult::MinMax(min, max) => Some((min, max)),
    }
}
