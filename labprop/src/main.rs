#![allow(clippy::cast_possible_truncation)]

mod options;
mod render;
mod series;

use anyhow::Error as AnyError;
use clap::Parser;
use log::debug;
use options::{Cli, Command as CliCmd, Curve, FiguresArgs, IndoorArgs, Output};
use pathloss::{
    indoor::{Model, LINK_MARGIN_DB},
    outdoor::power_drop_free,
    Link, LinkSample, Scenario, Sweep, C,
};
use render::Figure;
use serde::Serialize;
use series::{link_series, Series};
use std::io::Write;
use textplots::{Chart, Plot, Shape};

fn main() -> Result<(), AnyError> {
    let Cli { cmd } = Cli::parse();

    env_logger::init();

    match cmd {
        CliCmd::Outdoor { link, output } => {
            let sweep = link.sweep()?;
            let link = link.link()?;
            debug!("link: {link:?}, samples: {}", sweep.len());
            match output {
                Output::Csv => print_csv(&link, sweep)?,
                Output::Json => print_json(&link, sweep)?,
                Output::Plot { curve } => plot_ascii(&link, &sweep, curve),
            }
        }
        CliCmd::Figures(args) => figures(&args)?,
        CliCmd::Indoor(args) => indoor(&args)?,
        CliCmd::Sanity => sanity(),
    };
    Ok(())
}

/// # Example with gnuplot
///
/// ```sh
/// cargo run -- outdoor --max-distance=10000 csv | tr ',' ' ' > ~/.tmp/plot && gnuplot -p -e "plot for [col=2:3] '~/.tmp/plot' using 1:col with lines"
/// ```
fn print_csv(link: &Link<f64>, sweep: Sweep<f64>) -> Result<(), AnyError> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "Distance,Free,Multipath,Delay")?;
    for LinkSample {
        distance_m,
        free_db,
        multipath_db,
        delay_s,
    } in sweep.map(|d| link.sample(d))
    {
        writeln!(stdout, "{distance_m},{free_db},{multipath_db},{delay_s}")?;
    }
    Ok(())
}

fn print_json(link: &Link<f64>, sweep: Sweep<f64>) -> Result<(), AnyError> {
    let samples: Vec<LinkSample<f64>> = sweep.map(|d| link.sample(d)).collect();
    let json = serde_json::to_string(&samples)?;
    println!("{json}");
    Ok(())
}

fn plot_ascii(link: &Link<f64>, sweep: &Sweep<f64>, curve: Curve) {
    let plot_data: Vec<Vec<(f32, f32)>> = link_series(link, sweep, curve)
        .iter()
        .map(|Series { points, .. }| {
            points
                .iter()
                .filter(|(_, y)| y.is_finite())
                .map(|(x, y)| (*x as f32, *y as f32))
                .collect()
        })
        .collect();
    let shapes: Vec<Shape> = plot_data.iter().map(|data| Shape::Lines(data)).collect();
    let x_max = sweep.last_point().unwrap_or(1.0) as f32;

    let mut chart = Chart::new(300, 150, 1.0, x_max);
    shapes
        .iter()
        .fold(&mut chart, |chart, shape| chart.lineplot(shape))
        .display();
}

fn figures(args: &FiguresArgs) -> Result<(), AnyError> {
    let FiguresArgs {
        out_dir,
        step,
        gain,
        tx_height,
        rx_height,
    } = args;
    Figure {
        step_m: *step,
        gain: *gain,
        tx_height_m: *tx_height,
        rx_height_m: *rx_height,
    }
    .render_all(out_dir)
}

fn indoor(args: &IndoorArgs) -> Result<(), AnyError> {
    #[derive(Serialize)]
    struct JsonEntry {
        model: Model,
        loss_db: f64,
        margin_db: f64,
    }

    let scenario: Scenario<f64> = args.scenario();
    debug!("scenario: {scenario:?}");

    if args.json {
        let entries: Vec<JsonEntry> = scenario
            .margins()
            .map(|(model, margin_db)| JsonEntry {
                model,
                loss_db: scenario.loss_db(model),
                margin_db,
            })
            .collect();
        println!("{}", serde_json::to_string(&entries)?);
    } else {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{LINK_MARGIN_DB} dB - predicted loss")?;
        for (model, margin_db) in scenario.margins() {
            writeln!(stdout, "{:>14}: {margin_db} dB", model.name())?;
        }
    }
    Ok(())
}

/// Free space power drop at 1 m for a 0.3 m wavelength and 1.6 gain
/// antennas.
fn sanity() {
    #[allow(clippy::cast_precision_loss)]
    let freq_hz = C as f64 / 0.3;
    println!("{}", power_drop_free(1.0, freq_hz, 1.6, 1.6));
}
