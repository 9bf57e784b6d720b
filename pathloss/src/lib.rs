//! # Radio Path Loss
//!
//! `pathloss` provides closed-form radio propagation models: free
//! space and two-ray ground reflection for outdoor links, and a
//! handful of empirical indoor models.
//!
//! Every model is a pure function generic over [`num_traits::Float`],
//! so evaluating over a distance sweep is just a `map` over a
//! [`Sweep`]. Degenerate inputs (zero distance, zero frequency) are
//! not checked and propagate as `inf`/`NaN`.

mod error;
pub mod geometry;
pub mod indoor;
pub mod outdoor;
pub mod sweep;

pub use crate::{
    error::PathlossError,
    geometry::RayPaths,
    indoor::{Model, Obstacle, Scenario},
    outdoor::{Link, LinkSample},
    sweep::Sweep,
};

/// Speed of light in m/s
pub const C: usize = 299_792_458;
