use anyhow::{anyhow, Error as AnyError};
use clap::{Args, Parser, Subcommand, ValueEnum};
use pathloss::{indoor::Material, Link, Obstacle, PathlossError, Scenario, Sweep};
use std::{path::PathBuf, str::FromStr};

/// Evaluate and plot radio path loss models.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Sweep an outdoor link over distance.
    Outdoor {
        #[command(flatten)]
        link: LinkArgs,

        #[command(subcommand)]
        output: Output,
    },

    /// Write the free space, multipath and delay figures as SVGs.
    Figures(FiguresArgs),

    /// Compare indoor path loss models.
    Indoor(IndoorArgs),

    /// Print the free space power drop at 1 m for a 0.3 m wavelength.
    Sanity,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Output {
    /// Print sweep values to stdout as CSV.
    Csv,

    /// Print sweep values to stdout as JSON.
    Json,

    /// Plot to terminal.
    Plot {
        #[arg(value_enum, default_value_t = Curve::Both)]
        curve: Curve,
    },
}

/// Which propagation model(s) to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Curve {
    Free,
    Multi,
    Both,
}

#[derive(Debug, Clone, Args)]
pub struct LinkArgs {
    /// Sweep from 1 m up to this distance, in meters.
    #[arg(short, long, default_value_t = 100.0)]
    pub max_distance: f64,

    /// Sweep step size, in meters.
    #[arg(short, long, default_value_t = 0.25)]
    pub step: f64,

    /// Signal frequency (Hz).
    #[arg(short, long, default_value_t = 900e6)]
    pub frequency: f64,

    /// Linear transmitter antenna gain.
    #[arg(long, default_value_t = 1.6)]
    pub gain_tx: f64,

    /// Linear receiver antenna gain.
    #[arg(long, default_value_t = 1.6)]
    pub gain_rx: f64,

    /// Transmitter height above ground, in meters.
    #[arg(long, default_value_t = 30.0)]
    pub tx_height: f64,

    /// Receiver height above ground, in meters.
    #[arg(long, default_value_t = 3.0)]
    pub rx_height: f64,
}

impl LinkArgs {
    pub fn link(&self) -> Result<Link<f64>, PathlossError> {
        Link::builder()
            .freq(self.frequency)
            .gain_tx(self.gain_tx)
            .gain_rx(self.gain_rx)
            .tx_height(self.tx_height)
            .rx_height(self.rx_height)
            .build()
    }

    pub fn sweep(&self) -> Result<Sweep<f64>, PathlossError> {
        Sweep::to_distance(self.max_distance, self.step)
    }
}

#[derive(Debug, Clone, Args)]
pub struct FiguresArgs {
    /// Output directory.
    #[arg(short, long)]
    pub out_dir: PathBuf,

    /// Sweep step size, in meters.
    #[arg(short, long, default_value_t = 0.25)]
    pub step: f64,

    /// Linear antenna gain, used for both ends.
    #[arg(short, long, default_value_t = 1.6)]
    pub gain: f64,

    /// Transmitter height above ground, in meters.
    #[arg(long, default_value_t = 30.0)]
    pub tx_height: f64,

    /// Receiver height above ground, in meters.
    #[arg(long, default_value_t = 3.0)]
    pub rx_height: f64,
}

#[derive(Debug, Clone, Args)]
pub struct IndoorArgs {
    /// Signal frequency (MHz).
    #[arg(short, long, default_value_t = 2412.0)]
    pub frequency: f64,

    /// Transmitter to receiver distance, in meters.
    #[arg(short, long, default_value_t = 7.0)]
    pub distance: f64,

    /// Walls crossed.
    #[arg(long, default_value_t = 1.0)]
    pub walls: f64,

    /// Ceilings crossed.
    #[arg(long, default_value_t = 2.0)]
    pub ceilings: f64,

    /// Loss per wall (dB).
    #[arg(long, default_value_t = Material::InnerWall.damping_db())]
    pub wall_damping: f64,

    /// Loss per ceiling (dB).
    #[arg(long, default_value_t = Material::Ceiling.damping_db())]
    pub ceil_damping: f64,

    /// ITU-R distance power loss coefficient.
    #[arg(short = 'n', long, default_value_t = 28.0)]
    pub itur_n: f64,

    /// Path loss exponent.
    #[arg(short = 'y', long, default_value_t = 4.0)]
    pub exponent: f64,

    /// Multi-wall obstacle "count:damping", where 'damping' is either
    /// dB or one of window, inner-wall, outer-wall, ceiling. May be
    /// repeated; defaults to a single window.
    #[arg(short, long)]
    pub obstacle: Vec<ObstacleArg>,

    /// Print JSON instead of text.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

impl IndoorArgs {
    pub fn scenario(&self) -> Scenario<f64> {
        let obstacles = if self.obstacle.is_empty() {
            Scenario::lab_default().obstacles
        } else {
            self.obstacle.iter().map(|arg| arg.0).collect()
        };
        Scenario {
            freq_mhz: self.frequency,
            distance_m: self.distance,
            wall_count: self.walls,
            ceil_count: self.ceilings,
            wall_damping_db: self.wall_damping,
            ceil_damping_db: self.ceil_damping,
            itur_n: self.itur_n,
            exponent: self.exponent,
            obstacles,
        }
    }
}

#[derive(Clone, Debug, Copy, PartialEq)]
pub struct ObstacleArg(pub Obstacle<f64>);

impl FromStr for ObstacleArg {
    type Err = AnyError;
    fn from_str(s: &str) -> Result<Self, AnyError> {
        let (count_str, damping_str) = s
            .split_once(':')
            .ok_or_else(|| anyhow!("not a valid count:damping"))?;
        let count = f64::from_str(count_str)?;
        let damping_db = match f64::from_str(damping_str) {
            Ok(damping_db) => damping_db,
            Err(_) => damping_str.parse::<Material>()?.damping_db(),
        };
        Ok(Self(Obstacle::new(count, damping_db)))
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command, IndoorArgs, ObstacleArg};
    use clap::{CommandFactory, Parser};
    use pathloss::{Obstacle, Scenario};

    #[test]
    fn test_cli_asserts() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_output_help_names_format() {
        let cli = Cli::command();
        let outdoor = cli.find_subcommand("outdoor").unwrap();
        let about = |name: &str| {
            outdoor
                .find_subcommand(name)
                .and_then(|cmd| cmd.get_about())
                .map(ToString::to_string)
                .unwrap()
        };
        assert!(about("csv").contains("CSV"));
        assert!(about("json").contains("JSON"));
    }

    #[test]
    fn test_parse_obstacle() {
        assert_eq!(
            "2:7.5".parse::<ObstacleArg>().unwrap(),
            ObstacleArg(Obstacle::new(2.0, 7.5))
        );
        assert_eq!(
            "3:outer-wall".parse::<ObstacleArg>().unwrap(),
            ObstacleArg(Obstacle::new(3.0, 9.0))
        );
        assert!("3".parse::<ObstacleArg>().is_err());
        assert!("x:7".parse::<ObstacleArg>().is_err());
        assert!("1:door".parse::<ObstacleArg>().is_err());
    }

    fn indoor_args(args: &[&str]) -> IndoorArgs {
        let cli = Cli::try_parse_from(["labprop", "indoor"].iter().chain(args)).unwrap();
        match cli.cmd {
            Command::Indoor(args) => args,
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_indoor_defaults() {
        assert_eq!(indoor_args(&[]).scenario(), Scenario::lab_default());
    }

    #[test]
    fn test_indoor_overrides() {
        let scenario = indoor_args(&["-d", "12", "-o", "2:window", "-o", "1:3"]).scenario();
        assert_eq!(scenario.distance_m, 12.0);
        assert_eq!(
            scenario.obstacles,
            vec![Obstacle::new(2.0, 4.5), Obstacle::new(1.0, 3.0)]
        );
    }

    #[test]
    fn test_outdoor_defaults() {
        let cli = Cli::try_parse_from(["labprop", "outdoor", "csv"]).unwrap();
        let Command::Outdoor { link, .. } = cli.cmd else {
            panic!("expected outdoor command");
        };
        assert_eq!(link.sweep().unwrap().len(), 400);
        let link = link.link().unwrap();
        assert_eq!(link.freq_hz, 900e6);
        assert_eq!((link.tx_height_m, link.rx_height_m), (30.0, 3.0));
    }
}
