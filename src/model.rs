use std::{path::Path, str::FromStr};

use anyhow::{Context, Result};
use geo::Point;
use itertools::Itertools;
use serde::{de::Error, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use serde_with::DeserializeFromStr;

use crate::utils::read_json;

pub const BUILDING: &str = "楼宇";
pub const LATITUDE: &str = "纬度";
pub const LONGITUDE: &str = "经度";

// metres
pub const DEFAULT_RADIUS: f64 = 40.0;

/// A building entry from the linker file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Anchor {
    #[serde(rename = "楼宇")]
    pub building: String,
    #[serde(rename = "中心经纬度")]
    pub center: Center,
    #[serde(rename = "半径", default = "default_radius", deserialize_with = "radius")]
    pub radius: f64,
}

impl Anchor {
    /// Loads anchors, dropping any entry that doesn't parse.
    pub fn load(path: &Path) -> Result<Vec<Self>> {
        let raw: Vec<Value> = read_json(path)?;
        let anchors = Self::parse_all(raw);
        eprintln!("Loaded {} buildings from {}", anchors.len(), path.display());
        Ok(anchors)
    }

    pub fn parse_all(raw: Vec<Value>) -> Vec<Self> {
        raw.into_iter()
            .filter_map(|x| serde_json::from_value(x).ok())
            .collect()
    }
}

fn default_radius() -> f64 {
    DEFAULT_RADIUS
}

// blank values fall back to the default, like an unset field
fn radius<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null | Value::Bool(false) => DEFAULT_RADIUS,
        Value::Bool(true) => 1.0,
        Value::Number(x) => x
            .as_f64()
            .filter(|x| *x != 0.0)
            .unwrap_or(DEFAULT_RADIUS),
        Value::String(x) if x.is_empty() => DEFAULT_RADIUS,
        Value::String(x) => x.trim().parse().map_err(D::Error::custom)?,
        Value::Array(x) if x.is_empty() => DEFAULT_RADIUS,
        Value::Object(x) if x.is_empty() => DEFAULT_RADIUS,
        x => return Err(D::Error::custom(format!("invalid radius: {x}"))),
    })
}

/// Building center, written as `"<lng>,<lat>"`.
#[derive(Debug, Clone, Copy, PartialEq, DeserializeFromStr)]
pub struct Center {
    pub lat: f64,
    pub lng: f64,
}

impl Center {
    pub fn point(&self) -> Point {
        Point::new(self.lng, self.lat)
    }
}

impl FromStr for Center {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (lng, lat) = s
            .split(',')
            .collect_tuple()
            .context("expected \"<lng>,<lat>\"")?;
        Ok(Self {
            lat: lat.trim().parse()?,
            lng: lng.trim().parse()?,
        })
    }
}

/// A restroom record. Only the building and coordinate fields are
/// interpreted; everything else is carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Restroom(pub Map<String, Value>);

impl Restroom {
    pub fn building(&self) -> Option<&str> {
        self.0.get(BUILDING)?.as_str()
    }

    pub fn point(&self) -> Option<Point> {
        let lat = self.0.get(LATITUDE)?.as_f64()?;
        let lng = self.0.get(LONGITUDE)?.as_f64()?;
        Some(Point::new(lng, lat))
    }

    pub fn set_point(&mut self, lat: f64, lng: f64) {
        self.0.insert(LATITUDE.to_string(), lat.into());
        self.0.insert(LONGITUDE.to_string(), lng.into());
    }
}
