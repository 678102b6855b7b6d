//! Persisted text format for shapes, candidates and selection results.
//!
//! Shapes are stored as a JSON array, one object per shape:
//!
//! ```json
//! [
//!   {"type": "polygon",   "coordinates": [{"lat": -15.41, "lng": 28.28}, ...]},
//!   {"type": "rectangle", "coordinates": [{"lat": -15.41, "lng": 28.28}, ...]},
//!   {"type": "circle",    "center": {"lat": -15.41, "lng": 28.28}, "radius": 1200.0}
//! ]
//! ```
//!
//! This layout is shared with data persisted by earlier versions and must not
//! change. A batch that is not a JSON array fails as a whole; a single item
//! with an unknown tag or invalid geometry is skipped and reported.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::geo::{LatLng, ShapeError};
use crate::select::Candidate;
use crate::shape::{Shape, ShapeKind};

/// Why a single persisted shape was not reconstructed.
#[derive(Debug, thiserror::Error)]
pub enum ItemError {
    #[error("shape has no string `type` tag")]
    MissingType,
    #[error("unsupported shape type `{0}`")]
    UnsupportedType(String),
    #[error("malformed shape fields: {0}")]
    Fields(#[source] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] ShapeError),
}

/// Error returned by the codec entry points.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The text is not a JSON array (truncated, wrong top-level type, ...).
    #[error("malformed shape data: {0}")]
    Malformed(#[source] serde_json::Error),
    #[error("failed to encode: {0}")]
    Encode(#[source] serde_json::Error),
    /// A single-shape payload was rejected.
    #[error(transparent)]
    Item(#[from] ItemError),
    #[error("candidate {index} has an id that is neither a string nor an integer")]
    InvalidId { index: usize },
}

/// A skipped batch item and the reason.
#[derive(Debug)]
pub struct SkippedItem {
    pub index: usize,
    pub reason: ItemError,
}

/// Result of decoding a batch: reconstructed shapes in input order plus skips.
#[derive(Debug, Default)]
pub struct Decoded {
    pub shapes: Vec<Shape>,
    pub skipped: Vec<SkippedItem>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum WireShape {
    Polygon { coordinates: Vec<LatLng> },
    Rectangle { coordinates: Vec<LatLng> },
    Circle { center: LatLng, radius: f64 },
}

impl From<&Shape> for WireShape {
    fn from(shape: &Shape) -> Self {
        match shape {
            Shape::Polygon(r) => WireShape::Polygon {
                coordinates: r.vertices().to_vec(),
            },
            Shape::Rectangle(r) => WireShape::Rectangle {
                coordinates: r.vertices().to_vec(),
            },
            Shape::Circle(c) => WireShape::Circle {
                center: c.center(),
                radius: c.radius_m(),
            },
        }
    }
}

impl TryFrom<WireShape> for Shape {
    type Error = ShapeError;
    fn try_from(w: WireShape) -> Result<Self, Self::Error> {
        match w {
            WireShape::Polygon { coordinates } => Shape::polygon(coordinates),
            WireShape::Rectangle { coordinates } => Shape::rectangle(coordinates),
            WireShape::Circle { center, radius } => Shape::circle(center, radius),
        }
    }
}

/// Encode shapes as the persisted JSON array.
pub fn serialize(shapes: &[Shape]) -> Result<String, CodecError> {
    let wire: Vec<WireShape> = shapes.iter().map(WireShape::from).collect();
    serde_json::to_string(&wire).map_err(CodecError::Encode)
}

/// Decode a persisted JSON array. Per-item failures are skipped, see `Decoded`.
pub fn deserialize(text: &str) -> Result<Decoded, CodecError> {
    let items: Vec<Value> = serde_json::from_str(text).map_err(CodecError::Malformed)?;
    let mut out = Decoded::default();
    for (index, item) in items.into_iter().enumerate() {
        match decode_value(item) {
            Ok(shape) => out.shapes.push(shape),
            Err(reason) => {
                tracing::warn!(index, %reason, "skipping persisted shape");
                out.skipped.push(SkippedItem { index, reason });
            }
        }
    }
    Ok(out)
}

/// Shapes to restore from persisted text; malformed input restores nothing.
pub fn restore(text: &str) -> Vec<Shape> {
    match deserialize(text) {
        Ok(decoded) => decoded.shapes,
        Err(err) => {
            tracing::warn!(%err, "nothing to restore");
            Vec::new()
        }
    }
}

/// Encode one shape, the payload sent when a shape is drawn.
pub fn encode_shape(shape: &Shape) -> Result<String, CodecError> {
    serde_json::to_string(&WireShape::from(shape)).map_err(CodecError::Encode)
}

pub fn decode_shape(text: &str) -> Result<Shape, CodecError> {
    let value: Value = serde_json::from_str(text).map_err(CodecError::Malformed)?;
    Ok(decode_value(value)?)
}

fn decode_value(value: Value) -> Result<Shape, ItemError> {
    let tag = value
        .get("type")
        .and_then(Value::as_str)
        .ok_or(ItemError::MissingType)?;
    if ShapeKind::from_tag(tag).is_none() {
        return Err(ItemError::UnsupportedType(tag.to_owned()));
    }
    let wire: WireShape = serde_json::from_value(value).map_err(ItemError::Fields)?;
    Ok(Shape::try_from(wire)?)
}

#[derive(Deserialize)]
struct WireVoter {
    id: Value,
    latitude: f64,
    longitude: f64,
}

/// Decode voter locations `[{"id": .., "latitude": .., "longitude": ..}, ...]`.
///
/// Extra fields are ignored. String and integer ids are accepted and
/// normalized to strings.
pub fn decode_candidates(text: &str) -> Result<Vec<Candidate<String>>, CodecError> {
    let voters: Vec<WireVoter> = serde_json::from_str(text).map_err(CodecError::Malformed)?;
    voters
        .into_iter()
        .enumerate()
        .map(|(index, v)| {
            let id = match v.id {
                Value::String(s) => s,
                Value::Number(n) if n.is_i64() || n.is_u64() => n.to_string(),
                _ => return Err(CodecError::InvalidId { index }),
            };
            Ok(Candidate::new(id, LatLng::new(v.latitude, v.longitude)))
        })
        .collect()
}

/// Selected ids as a JSON array.
pub fn encode_ids<Id: Serialize>(ids: &[Id]) -> Result<String, CodecError> {
    serde_json::to_string(ids).map_err(CodecError::Encode)
}
