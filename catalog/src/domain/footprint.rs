//! Polygon footprint and its derived textual forms.
//!
//! A footprint is a GeoJSON-style polygon: one or more linear rings of
//! `[x, y]` positions. The derived `wktGeometry` and `productBoundingBox`
//! record fields are always recomputed from the footprint here and never
//! accepted from clients.

use serde::{Deserialize, Serialize};

/// A single `[x, y]` coordinate pair.
pub type Position = [f64; 2];

/// Validation errors returned by the footprint constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FootprintValidationError {
    /// The polygon carried no rings at all.
    NoRings,
    /// A ring had fewer than the four positions a closed ring needs.
    RingTooShort {
        /// Number of positions found on the offending ring.
        len: usize,
    },
    /// A ring's first and last positions differ.
    RingNotClosed,
}

impl std::fmt::Display for FootprintValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoRings => write!(f, "footprint must contain at least one ring"),
            Self::RingTooShort { len } => {
                write!(f, "footprint ring must contain at least 4 positions, got {len}")
            }
            Self::RingNotClosed => {
                write!(f, "footprint ring must end on its starting position")
            }
        }
    }
}

impl std::error::Error for FootprintValidationError {}

/// Polygon footprint describing a product's spatial extent.
///
/// ## Invariants
/// - At least one ring is present.
/// - Every ring holds at least four positions and is closed (first position
///   equals the last).
///
/// Serialises as a GeoJSON polygon object:
/// `{ "type": "Polygon", "coordinates": [[[x, y], ...]] }`.
///
/// # Examples
/// ```
/// use catalog::domain::Footprint;
///
/// let footprint = Footprint::new(vec![vec![
///     [0.0, 0.0],
///     [0.0, 1.0],
///     [1.0, 1.0],
///     [0.0, 0.0],
/// ]])
/// .expect("closed ring");
/// assert_eq!(footprint.bounding_box(), "0,0,1,1");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FootprintSerde", into = "FootprintSerde")]
pub struct Footprint {
    coordinates: Vec<Vec<Position>>,
}

impl Footprint {
    /// Validate and construct a polygon footprint from its rings.
    pub fn new(coordinates: Vec<Vec<Position>>) -> Result<Self, FootprintValidationError> {
        if coordinates.is_empty() {
            return Err(FootprintValidationError::NoRings);
        }
        for ring in &coordinates {
            if ring.len() < 4 {
                return Err(FootprintValidationError::RingTooShort { len: ring.len() });
            }
            if ring.first() != ring.last() {
                return Err(FootprintValidationError::RingNotClosed);
            }
        }
        Ok(Self { coordinates })
    }

    /// The polygon's rings, exterior first.
    pub fn rings(&self) -> &[Vec<Position>] {
        &self.coordinates
    }

    /// Well-known-text rendition: `POLYGON ((x1 y1, x2 y2, ...))`.
    ///
    /// # Examples
    /// ```
    /// use catalog::domain::Footprint;
    ///
    /// let footprint = Footprint::new(vec![vec![
    ///     [0.0, 0.0],
    ///     [0.0, 2.0],
    ///     [2.0, 2.0],
    ///     [0.0, 0.0],
    /// ]])
    /// .expect("closed ring");
    /// assert_eq!(footprint.to_wkt(), "POLYGON ((0 0, 0 2, 2 2, 0 0))");
    /// ```
    pub fn to_wkt(&self) -> String {
        let rings: Vec<String> = self
            .coordinates
            .iter()
            .map(|ring| {
                let positions: Vec<String> =
                    ring.iter().map(|&[x, y]| format!("{x} {y}")).collect();
                format!("({})", positions.join(", "))
            })
            .collect();
        format!("POLYGON ({})", rings.join(", "))
    }

    /// Bounding box rendition: `minX,minY,maxX,maxY`.
    pub fn bounding_box(&self) -> String {
        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for &[x, y] in self.coordinates.iter().flatten() {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
        format!("{min_x},{min_y},{max_x},{max_y}")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Polygon")]
struct FootprintSerde {
    coordinates: Vec<Vec<Position>>,
}

impl From<Footprint> for FootprintSerde {
    fn from(value: Footprint) -> Self {
        Self {
            coordinates: value.coordinates,
        }
    }
}

impl TryFrom<FootprintSerde> for Footprint {
    type Error = FootprintValidationError;

    fn try_from(value: FootprintSerde) -> Result<Self, Self::Error> {
        Self::new(value.coordinates)
    }
}
