//! FlowerGrid Core Library
//!
//! Sacred-geometry guide grids for an unbounded drawing plane: Flower of
//! Life motifs on a hexagonal lattice and diamond tilings, culled to the
//! visible viewport under device-tier budgets, with snapping and alignment
//! guides. Every query is a pure function of its inputs.

pub mod budget;
pub mod cache;
pub mod camera;
pub mod circles;
pub mod config;
pub mod diamond;
pub mod error;
pub mod grid;
pub mod guides;
pub mod intersections;
pub mod lattice;
pub mod snap;
pub mod units;

pub use budget::{DeviceTier, TruncationPolicy, intersection_budget, motif_budget};
pub use cache::{GeometryCache, HexGeometry};
pub use camera::Camera;
pub use circles::{CircleIntersection, Motif, circle_intersections, motif_circles};
pub use config::{GridConfig, PatternStyle, SerializableColor};
pub use diamond::{DiamondCell, DiamondLattice, diamond_cells};
pub use error::{ConfigError, ConfigResult};
pub use grid::{DiamondGrid, Grid, GridType, HexGrid};
pub use guides::{GuideKind, GuideLine};
pub use intersections::{IntersectionIndex, IntersectionMode};
pub use lattice::{MotifCenters, MotifLattice, motif_centers};
pub use snap::{FeatureSource, SnapResult, SnapTarget, SnapTargetKind, snap};
pub use units::{Unit, UnitConfig, compute_radius};
