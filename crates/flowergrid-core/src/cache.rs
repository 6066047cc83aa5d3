//! Caller-owned memo of hex grid geometry.
//!
//! The engine itself keeps no state. A canvas that redraws the same view
//! many times can hold one of these next to its camera and drop it with the
//! canvas.

use kurbo::{Circle, Point, Rect};
use std::collections::{HashMap, VecDeque};

use crate::budget::{DeviceTier, TruncationPolicy};
use crate::circles::Motif;
use crate::config::GridConfig;
use crate::grid::HexGrid;
use crate::intersections::IntersectionMode;
use crate::units::Unit;

/// Default number of cached views.
pub const DEFAULT_CACHE_CAPACITY: usize = 8;

/// Everything that changes the generated geometry. Floats are keyed by bit
/// pattern so equal inputs always hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CacheKey {
    unit: Unit,
    scale: u64,
    viewport: [u64; 4],
    tier: DeviceTier,
    policy: TruncationPolicy,
    mode: IntersectionMode,
}

impl CacheKey {
    fn new(config: &GridConfig, viewport: Rect) -> Self {
        Self {
            unit: config.unit,
            scale: config.scale.to_bits(),
            viewport: [
                viewport.x0.to_bits(),
                viewport.y0.to_bits(),
                viewport.x1.to_bits(),
                viewport.y1.to_bits(),
            ],
            tier: config.tier,
            policy: config.truncation,
            mode: config.intersection_mode,
        }
    }
}

/// Hex geometry generated for one view.
#[derive(Debug, Clone, PartialEq)]
pub struct HexGeometry {
    pub radius: f64,
    pub centers: Vec<Point>,
    pub intersections: Vec<Point>,
}

impl HexGeometry {
    fn generate(grid: &HexGrid, viewport: Rect) -> Self {
        Self {
            radius: grid.radius,
            centers: grid.motif_centers(viewport),
            intersections: grid.intersections(viewport),
        }
    }

    /// Circles for every cached motif.
    pub fn circles(&self) -> impl Iterator<Item = Circle> + '_ {
        self.centers
            .iter()
            .flat_map(move |c| Motif::new(*c, self.radius).circles())
    }
}

/// Bounded cache of [`HexGeometry`], oldest entry evicted first.
#[derive(Debug)]
pub struct GeometryCache {
    entries: HashMap<CacheKey, HexGeometry>,
    order: VecDeque<CacheKey>,
    capacity: usize,
}

impl Default for GeometryCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl GeometryCache {
    /// Create a cache holding at most `capacity` views (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    /// Geometry for `viewport` under `config`, generating it on a miss.
    ///
    /// The grid type in `config` is ignored; this always describes the hex
    /// grid.
    pub fn hex_geometry(&mut self, config: &GridConfig, viewport: Rect) -> &HexGeometry {
        let key = CacheKey::new(config, viewport);
        if self.entries.contains_key(&key) {
            log::trace!("geometry cache hit for {:?}", viewport);
        } else {
            log::trace!("geometry cache miss for {:?}", viewport);
            if self.entries.len() >= self.capacity {
                if let Some(oldest) = self.order.pop_front() {
                    self.entries.remove(&oldest);
                    log::trace!("evicted oldest geometry cache entry");
                }
            }
            self.order.push_back(key);
        }

        self.entries.entry(key).or_insert_with(|| {
            let grid = HexGrid {
                policy: config.truncation,
                mode: config.intersection_mode,
                ..HexGrid::new(config.units()).with_tier(config.tier)
            };
            HexGeometry::generate(&grid, viewport)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(x: f64) -> Rect {
        Rect::new(x, 0.0, x + 400.0, 300.0)
    }

    #[test]
    fn test_hit_returns_same_geometry() {
        let mut cache = GeometryCache::default();
        let config = GridConfig::default();
        let first = cache.hex_geometry(&config, view(0.0)).clone();
        let second = cache.hex_geometry(&config, view(0.0)).clone();
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_matches_uncached_generation() {
        let mut cache = GeometryCache::default();
        let config = GridConfig::default();
        let grid = HexGrid::new(config.units());
        let cached = cache.hex_geometry(&config, view(10.0));
        assert_eq!(cached.centers, grid.motif_centers(view(10.0)));
        assert_eq!(cached.intersections, grid.intersections(view(10.0)));
        assert_eq!(cached.circles().count(), 7 * cached.centers.len());
    }

    #[test]
    fn test_scale_change_misses() {
        let mut cache = GeometryCache::default();
        let mut config = GridConfig::default();
        let a = cache.hex_geometry(&config, view(0.0)).radius;
        config.scale = 2.0;
        let b = cache.hex_geometry(&config, view(0.0)).radius;
        assert!((a - 2.0 * b).abs() < 1e-9);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_evicts_oldest() {
        let mut cache = GeometryCache::new(2);
        let config = GridConfig::default();
        cache.hex_geometry(&config, view(0.0));
        cache.hex_geometry(&config, view(100.0));
        cache.hex_geometry(&config, view(200.0));
        assert_eq!(cache.len(), 2);
        assert!(!cache.entries.contains_key(&CacheKey::new(&config, view(0.0))));
        assert!(cache.entries.contains_key(&CacheKey::new(&config, view(200.0))));
    }

    #[test]
    fn test_clear() {
        let mut cache = GeometryCache::new(0);
        cache.hex_geometry(&GridConfig::default(), view(0.0));
        assert_eq!(cache.len(), 1);
        cache.clear();
        assert!(cache.is_empty());
    }
}
