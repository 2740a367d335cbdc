use facette::{Composite, Float, Path, Ray, Vector2};
use facette_shapes::{CircularArc, Facet, Parabola};
use std::error::Error;

use std::{rc::Rc, sync::Arc};

pub use serde_json;

/// This is essentially `try_into` then `try_map` but the latter is nightly-only
pub fn json_array_to_float_array<const D: usize>(
    json_array: &[serde_json::Value],
) -> Option<[Float; D]> {
    let array: &[serde_json::Value; D] = json_array.try_into().ok()?;

    let mut coords = [0.; D];
    for (coord, value) in coords.iter_mut().zip(array) {
        *coord = value.as_f64()? as Float;
    }
    Some(coords)
}

pub fn json_array_to_vector(json_array: &[serde_json::Value]) -> Option<Vector2> {
    json_array_to_float_array(json_array).map(Vector2::from)
}

pub fn map_json_array<C: FromIterator<T>, T>(
    json: &serde_json::Value,
    map: impl FnMut(&serde_json::Value) -> Result<T, Box<dyn Error>>,
) -> Result<C, Box<dyn Error>> {
    json.as_array()
        .ok_or("json value must be an array")?
        .iter()
        .map(map)
        .collect()
}

fn get_vector(json: &serde_json::Value, field: &str) -> Result<Vector2, Box<dyn Error>> {
    json.get(field)
        .and_then(serde_json::Value::as_array)
        .map(Vec::as_slice)
        .and_then(json_array_to_vector)
        .ok_or_else(|| format!("missing or invalid {field:?}, expected 2 numbers").into())
}

fn get_float(json: &serde_json::Value, field: &str) -> Result<Float, Box<dyn Error>> {
    json.get(field)
        .and_then(serde_json::Value::as_f64)
        .ok_or_else(|| format!("missing or invalid {field:?}, expected a number").into())
}

fn get_spans(json: &serde_json::Value) -> Result<Vec<Float>, Box<dyn Error>> {
    map_json_array(json.get("spans").ok_or("missing \"spans\"")?, |value| {
        value.as_f64().ok_or_else(|| "spans must be numbers".into())
    })
}

fn spans_to_json(spans: &[[Float; 2]]) -> serde_json::Value {
    spans.iter().flatten().copied().collect()
}

fn vector_to_json(v: &Vector2) -> serde_json::Value {
    serde_json::json!([v.x, v.y])
}

pub trait JsonType {
    /// Returns a string, unique to the type, found in the "type" field of the json
    /// representation of a facet of this type
    fn json_type() -> String;
}

impl JsonType for CircularArc {
    fn json_type() -> String {
        "arc".into()
    }
}

impl JsonType for Parabola {
    fn json_type() -> String {
        "parabola".into()
    }
}

impl<T> JsonType for Composite<T> {
    fn json_type() -> String {
        "composite".into()
    }
}

pub trait JsonSer {
    /// Serialize `self` into a JSON object.
    fn to_json(&self) -> serde_json::Value;
}

impl<T: JsonSer> JsonSer for [T] {
    fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Array(Vec::from_iter(self.iter().map(T::to_json)))
    }
}

impl<const N: usize, T: JsonSer> JsonSer for [T; N] {
    fn to_json(&self) -> serde_json::Value {
        self.as_slice().to_json()
    }
}

// It's clear that all these impls use the `Deref` trait, but writing a blanket impl over all
// types implementing `Deref` makes the trait unusable downstream

impl<T: JsonSer + ?Sized> JsonSer for Box<T> {
    fn to_json(&self) -> serde_json::Value {
        T::to_json(self)
    }
}

impl<T: JsonSer + ?Sized> JsonSer for Arc<T> {
    fn to_json(&self) -> serde_json::Value {
        T::to_json(self)
    }
}

impl<T: JsonSer + ?Sized> JsonSer for Rc<T> {
    fn to_json(&self) -> serde_json::Value {
        T::to_json(self)
    }
}

impl<T: JsonSer> JsonSer for Vec<T> {
    fn to_json(&self) -> serde_json::Value {
        self.as_slice().to_json()
    }
}

impl<T: JsonSer + ?Sized> JsonSer for &T {
    fn to_json(&self) -> serde_json::Value {
        (*self).to_json()
    }
}

impl JsonSer for Ray {
    /// Serialize a ray into a JSON object.
    ///
    /// The format of the returned object is explained in [`Self::from_json`]
    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "origin": vector_to_json(&self.origin),
            "direction": vector_to_json(&self.direction),
        })
    }
}

impl JsonSer for CircularArc {
    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "center": vector_to_json(self.center()),
            "radius": self.radius(),
            "spans": spans_to_json(self.spans()),
        })
    }
}

impl JsonSer for Parabola {
    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "origin": vector_to_json(self.origin()),
            "focal_distance": self.focal_distance(),
            "angle": self.angle(),
            "spans": spans_to_json(self.spans()),
        })
    }
}

impl<T: JsonSer> JsonSer for Composite<T> {
    /// A composite's data is the array of its children
    fn to_json(&self) -> serde_json::Value {
        self.children().to_json()
    }
}

fn tagged<T: JsonType + JsonSer>(facet: &T) -> serde_json::Value {
    serde_json::json!({
        "type": T::json_type(),
        "data": facet.to_json(),
    })
}

impl JsonSer for Facet {
    /// The format of the returned object is explained in [`Self::from_json`]
    fn to_json(&self) -> serde_json::Value {
        match self {
            Facet::Arc(arc) => tagged(arc),
            Facet::Parabola(parabola) => tagged(parabola),
            Facet::Composite(group) => tagged(group),
        }
    }
}

impl JsonSer for Path {
    /// An array of `[x, y]` points
    fn to_json(&self) -> serde_json::Value {
        self.iter().map(vector_to_json).collect()
    }
}

pub trait JsonDes {
    /// Deserialize from a JSON object.
    ///
    /// Returns an error if `json`'s format or values are invalid.
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>>
    where
        Self: Sized;
}

impl JsonDes for Ray {
    /// Deserialize a new ray from a JSON object.
    ///
    /// The JSON object must follow the following format:
    ///
    /// ```json
    /// {
    ///     "origin": [9., 8.],
    ///     "direction": [9., 8.], // (must be non-zero)
    /// }
    /// ```
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>> {
        let origin = get_vector(json, "origin")?;
        let direction = get_vector(json, "direction")?;

        if direction == Vector2::zeros() || !direction.iter().all(|c| c.is_finite()) {
            return Err("ray direction must be finite and non-zero".into());
        }

        Ok(Self { origin, direction })
    }
}

impl JsonDes for CircularArc {
    /// ```json
    /// {
    ///     "center": [9., 8.],
    ///     "radius": 4.,
    ///     "spans": [0., 1.57, 3.14, 4.71], // (start and end angles, in radians)
    /// }
    /// ```
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>> {
        let center = get_vector(json, "center")?;
        let radius = get_float(json, "radius")?;
        let spans = get_spans(json)?;

        Ok(Self::try_new(center, radius, &spans)?)
    }
}

impl JsonDes for Parabola {
    /// ```json
    /// {
    ///     "origin": [9., 8.], // (the vertex)
    ///     "focal_distance": 2.,
    ///     "angle": 3.14,
    ///     "spans": [-1., 1.], // (bounds of local x coordinates)
    /// }
    /// ```
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>> {
        let origin = get_vector(json, "origin")?;
        let focal_distance = get_float(json, "focal_distance")?;
        let angle = get_float(json, "angle")?;
        let spans = get_spans(json)?;

        Ok(Self::try_new(origin, focal_distance, angle, &spans)?)
    }
}

impl<T: JsonDes> JsonDes for Composite<T> {
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>> {
        map_json_array::<Vec<_>, _>(json, T::from_json).map(Self::new)
    }
}

impl JsonDes for Facet {
    /// Deserialize a facet, or a tree of them, from a JSON object.
    ///
    /// The JSON object must follow the following format:
    ///
    /// ```json
    /// {
    ///     "type": "arc" | "parabola" | "composite",
    ///     "data": // <layout depends on the value at "type">
    /// }
    /// ```
    ///
    /// The data of a composite is an array of facets.
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>> {
        let facet_type = json
            .get("type")
            .ok_or("missing facet type")?
            .as_str()
            .ok_or("type must be a string")?;

        let data = json.get("data").ok_or("missing facet data")?;

        Ok(match facet_type {
            t if t == CircularArc::json_type() => CircularArc::from_json(data)?.into(),
            t if t == Parabola::json_type() => Parabola::from_json(data)?.into(),
            t if t == Composite::<Facet>::json_type() => {
                Composite::<Facet>::from_json(data)?.into()
            }
            other => return Err(format!("invalid facet type: {other}").into()),
        })
    }
}

impl JsonDes for Path {
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>> {
        let points = map_json_array(json, |point| {
            point
                .as_array()
                .map(Vec::as_slice)
                .and_then(json_array_to_vector)
                .ok_or_else(|| "path points must be arrays of 2 numbers".into())
        })?;

        Path::from_points(points).ok_or_else(|| "a path has at least one point".into())
    }
}

impl<T: JsonDes> JsonDes for Vec<T> {
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>> {
        map_json_array(json, T::from_json)
    }
}

/// ```json
/// {
///     "geometry": // a facet,
///     "rays": [...],
/// }
/// ```
pub fn serialize_scene(
    geometry: &(impl JsonSer + ?Sized),
    rays: impl IntoIterator<Item = Ray>,
) -> serde_json::Value {
    serde_json::json!({
        "geometry": geometry.to_json(),
        "rays": Vec::from_iter(rays.into_iter().map(|ray| ray.to_json())),
    })
}

pub fn deserialize_scene<M: JsonDes>(
    json: &serde_json::Value,
) -> Result<(M, Vec<Ray>), Box<dyn Error>> {
    Ok((
        M::from_json(json.get("geometry").ok_or("geometry field expected")?)?,
        map_json_array(
            json.get("rays").ok_or("rays field expected")?,
            Ray::from_json,
        )?,
    ))
}

/// The output of a tracing run: every path, and, optionally, the wavefront.
///
/// ```json
/// {
///     "paths": [[[x, y], ...], ...],
///     "wavefront": [[x, y], ...] | null,
/// }
/// ```
pub fn serialize_trace(paths: &[Path], wavefront: Option<&[Vector2]>) -> serde_json::Value {
    serde_json::json!({
        "paths": paths.to_json(),
        "wavefront": wavefront.map(|points| Vec::from_iter(points.iter().map(vector_to_json))),
    })
}
