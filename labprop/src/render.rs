//! SVG figures of the outdoor models.

use crate::{
    options::Curve,
    series::{
        delay_series, freq_title, link_series, y_bounds, Series, DELAY_DESC, DISTANCE_DESC,
        POWER_DROP_DESC,
    },
};
use anyhow::{anyhow, Error as AnyError};
use itertools::iproduct;
use log::{debug, info, warn};
use pathloss::{Link, Sweep};
use plotters::{coord::Shift, prelude::*};
use std::path::Path;

/// Maximum distances (meters) of the grid rows.
pub const GRID_DISTANCES_M: [f64; 2] = [100.0, 10_000.0];

/// Frequencies (Hz) of the grid columns.
pub const GRID_FREQS_HZ: [f64; 2] = [900e6, 2400e6];

const GRID_SIZE: (u32, u32) = (1600, 1000);
const SINGLE_SIZE: (u32, u32) = (640, 480);
const COLORS: [RGBColor; 2] = [BLUE, RED];

/// Y axis of a panel whose values are all infinite, e.g. zero gain.
const EMPTY_Y_RANGE: (f64, f64) = (-1.0, 0.0);

fn plot_err<E: std::fmt::Debug>(err: E) -> AnyError {
    anyhow!("plotting failed: {err:?}")
}

/// Parameters shared by every panel of a figure.
#[derive(Debug, Clone, Copy)]
pub struct Figure {
    pub step_m: f64,
    pub gain: f64,
    pub tx_height_m: f64,
    pub rx_height_m: f64,
}

impl Figure {
    fn link(&self, freq_hz: f64) -> Result<Link<f64>, AnyError> {
        Ok(Link::builder()
            .freq(freq_hz)
            .gain_tx(self.gain)
            .gain_rx(self.gain)
            .tx_height(self.tx_height_m)
            .rx_height(self.rx_height_m)
            .build()?)
    }

    /// Writes `delay.svg`, `free.svg`, `multi.svg` and `both.svg` into
    /// `out_dir`, creating it if needed.
    pub fn render_all(&self, out_dir: &Path) -> Result<(), AnyError> {
        std::fs::create_dir_all(out_dir)?;
        self.render_delay(&out_dir.join("delay.svg"))?;
        for (curve, name) in [
            (Curve::Free, "free.svg"),
            (Curve::Multi, "multi.svg"),
            (Curve::Both, "both.svg"),
        ] {
            self.render_grid(curve, &out_dir.join(name))?;
        }
        Ok(())
    }

    /// Writes a 2×2 grid of `curve`, distances by row and frequencies
    /// by column.
    pub fn render_grid(&self, curve: Curve, path: &Path) -> Result<(), AnyError> {
        let panels = iproduct!(GRID_DISTANCES_M, GRID_FREQS_HZ)
            .map(|(max_m, freq_hz)| -> Result<(String, Vec<Series>), AnyError> {
                debug!("panel: {curve:?}, max_m: {max_m}, freq_hz: {freq_hz}");
                let link = self.link(freq_hz)?;
                let sweep = Sweep::to_distance(max_m, self.step_m)?;
                Ok((freq_title(freq_hz), link_series(&link, &sweep, curve)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let root = SVGBackend::new(path, GRID_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(plot_err)?;
        for (area, (title, series)) in root.split_evenly((2, 2)).iter().zip(&panels) {
            draw_panel(area, title, POWER_DROP_DESC, series)?;
        }

        root.present().map_err(plot_err)?;
        info!("wrote {}", path.display());
        Ok(())
    }

    /// Writes propagation delay over the longest grid distance.
    pub fn render_delay(&self, path: &Path) -> Result<(), AnyError> {
        let sweep = Sweep::to_distance(GRID_DISTANCES_M[1], self.step_m)?;
        let series = [delay_series(&sweep)];

        let root = SVGBackend::new(path, SINGLE_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(plot_err)?;
        draw_panel(&root, "", DELAY_DESC, &series)?;

        root.present().map_err(plot_err)?;
        info!("wrote {}", path.display());
        Ok(())
    }
}

fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    title: &str,
    y_desc: &str,
    series: &[Series],
) -> Result<(), AnyError>
where
    DB::ErrorType: 'static,
{
    let x_max = series
        .iter()
        .filter_map(|s| s.points.last().map(|(x, _)| *x))
        .fold(1.0, f64::max);
    let (y_min, y_max) = y_bounds(series).unwrap_or_else(|| {
        warn!("no finite values in {title:?}, drawing empty axes");
        EMPTY_Y_RANGE
    });

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 20))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(0.0..x_max, y_min..y_max)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc(DISTANCE_DESC)
        .y_desc(y_desc)
        .draw()
        .map_err(plot_err)?;

    for (Series { label, points }, color) in series.iter().zip(COLORS.into_iter().cycle()) {
        chart
            .draw_series(LineSeries::new(
                points.iter().copied().filter(|(_, y)| y.is_finite()),
                color,
            ))
            .map_err(plot_err)?
            .label(*label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    if series.len() > 1 {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(plot_err)?;
    }

    Ok(())
}
