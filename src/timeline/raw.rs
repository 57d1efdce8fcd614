use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::animation::ease::Ease;
use crate::foundation::core::{Rgba, Vec2, Vec3};

/// Top-level authored document. Objects are kept as raw JSON values so one
/// malformed object never fails the whole load.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DocumentDef {
    #[serde(default)]
    pub(crate) objects: Vec<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct StageObjectDef {
    pub(crate) id: String,
    pub(crate) kind: String,
    #[serde(default, alias = "parentId")]
    pub(crate) parent_id: Option<String>,
    #[serde(default)]
    pub(crate) keyframes: Vec<RawKeyframeDef>,
}

/// One authored keyframe: a time plus a sparse map of field deltas.
///
/// Every key other than `time` is a field delta; absence means "inherit".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct RawKeyframeDef {
    pub(crate) time: f64,
    #[serde(flatten)]
    pub(crate) fields: Map<String, Value>,
}

impl StageObjectDef {
    /// Parse one object out of the document's raw list.
    ///
    /// Returns `None` (with a warning) when the object itself is malformed;
    /// the rest of the storyboard still loads.
    pub(crate) fn from_value(value: Value) -> Option<Self> {
        match serde_json::from_value::<Self>(value) {
            Ok(def) => Some(def),
            Err(e) => {
                warn!(error = %e, "dropping malformed stage object");
                None
            }
        }
    }
}

/// Extract one field under any of `names`, dropping malformed values.
///
/// A present-but-malformed value logs a warning and reads as absent, so the
/// resolver retains its carry.
pub(crate) fn field<T: serde::de::DeserializeOwned>(
    fields: &Map<String, Value>,
    names: &[&str],
) -> Option<T> {
    let (name, value) = lookup(fields, names)?;
    match serde_json::from_value::<T>(value.clone()) {
        Ok(v) => Some(v),
        Err(e) => {
            warn!(field = name, error = %e, "dropping malformed keyframe field");
            None
        }
    }
}

fn lookup<'a>(fields: &'a Map<String, Value>, names: &[&str]) -> Option<(&'a str, &'a Value)> {
    names
        .iter()
        .find_map(|n| fields.get_key_value(*n))
        .map(|(k, v)| (k.as_str(), v))
}

/// Extract a 2D vector authored as `[x, y]`, `{x, y}`, or (uniform) a number.
pub(crate) fn vec2_field(fields: &Map<String, Value>, names: &[&str]) -> Option<Vec2> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Arr([f64; 2]),
        Obj { x: f64, y: f64 },
        Uniform(f64),
    }

    match field::<Repr>(fields, names)? {
        Repr::Arr([x, y]) => Some(Vec2::new(x, y)),
        Repr::Obj { x, y } => Some(Vec2::new(x, y)),
        Repr::Uniform(v) => Some(Vec2::new(v, v)),
    }
}

/// Extract a 3D vector authored as `[x, y, z]`, `{x, y, z}`, or a bare
/// number (taken as the z component, the common 2D rotation shorthand).
pub(crate) fn vec3_field(fields: &Map<String, Value>, names: &[&str]) -> Option<Vec3> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Arr([f64; 3]),
        Obj {
            #[serde(default)]
            x: f64,
            #[serde(default)]
            y: f64,
            #[serde(default)]
            z: f64,
        },
        ZOnly(f64),
    }

    match field::<Repr>(fields, names)? {
        Repr::Arr([x, y, z]) => Some(Vec3::new(x, y, z)),
        Repr::Obj { x, y, z } => Some(Vec3::new(x, y, z)),
        Repr::ZOnly(z) => Some(Vec3::new(0.0, 0.0, z)),
    }
}

/// Extract a color authored as a hex/HTML color string.
pub(crate) fn color_field(fields: &Map<String, Value>, names: &[&str]) -> Option<Rgba> {
    let (name, value) = lookup(fields, names)?;
    let s = match value.as_str() {
        Some(s) => s,
        None => {
            warn!(field = name, "dropping color field that is not a string");
            return None;
        }
    };
    match parse_color(s) {
        Ok(c) => Some(c),
        Err(e) => {
            warn!(field = name, error = e, "dropping malformed color field");
            None
        }
    }
}

/// Extract an easing curve by its authored name.
pub(crate) fn ease_field(fields: &Map<String, Value>, names: &[&str]) -> Option<Ease> {
    let name: String = field(fields, names)?;
    match Ease::from_name(&name) {
        Some(e) => Some(e),
        None => {
            warn!(ease = name, "dropping unknown easing curve name");
            None
        }
    }
}

/// Parse an authored color string (`#RRGGBB`, `#RRGGBBAA`, or a small set of
/// HTML color names) into normalized straight-alpha RGBA.
pub(crate) fn parse_color(s: &str) -> Result<Rgba, String> {
    let s = s.trim();
    if let Some(named) = named_color(s) {
        return Ok(named);
    }
    let hex = s
        .strip_prefix('#')
        .ok_or_else(|| format!("unknown color \"{s}\""))?;

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    let (r, g, b, a) = match hex.len() {
        6 => {
            let r = hex_byte(&hex[0..2])?;
            let g = hex_byte(&hex[2..4])?;
            let b = hex_byte(&hex[4..6])?;
            (r, g, b, 255)
        }
        8 => {
            let r = hex_byte(&hex[0..2])?;
            let g = hex_byte(&hex[2..4])?;
            let b = hex_byte(&hex[4..6])?;
            let a = hex_byte(&hex[6..8])?;
            (r, g, b, a)
        }
        _ => {
            return Err("hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)".to_owned());
        }
    };

    Ok(Rgba::rgba(
        f64::from(r) / 255.0,
        f64::from(g) / 255.0,
        f64::from(b) / 255.0,
        f64::from(a) / 255.0,
    ))
}

fn named_color(s: &str) -> Option<Rgba> {
    let c = match s.to_ascii_lowercase().as_str() {
        "white" => Rgba::rgba(1.0, 1.0, 1.0, 1.0),
        "black" => Rgba::rgba(0.0, 0.0, 0.0, 1.0),
        "red" => Rgba::rgba(1.0, 0.0, 0.0, 1.0),
        "green" => Rgba::rgba(0.0, 0.5, 0.0, 1.0),
        "blue" => Rgba::rgba(0.0, 0.0, 1.0, 1.0),
        "yellow" => Rgba::rgba(1.0, 1.0, 0.0, 1.0),
        "cyan" => Rgba::rgba(0.0, 1.0, 1.0, 1.0),
        "magenta" => Rgba::rgba(1.0, 0.0, 1.0, 1.0),
        "transparent" => Rgba::TRANSPARENT,
        _ => return None,
    };
    Some(c)
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/raw.rs"]
mod tests;
