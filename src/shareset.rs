//! Loading share sets from their JSON container.
//!
//! ```text
//! {
//!   "keys": { "n": 4, "k": 3 },
//!   "1": { "base": "10", "value": "4" },
//!   "2": { "base": 2, "value": "111" },
//!   ...
//! }
//! ```
//!
//! Every member other than `"keys"` is a share; its name is the decimal x
//! coordinate.

use std::collections::BTreeMap;
use std::convert::TryFrom;
use std::io::Read;

use num_bigint::BigInt;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::config::Config;
use crate::decode::{decode, parse_radix};
use crate::error::{Result, ShareError};
use crate::lagrange::{self, Point, Reconstruction};

/// One encoded share, as read from the container.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Share {
    pub x: u64,
    pub radix: u32,
    pub value: String,
}

impl Share {
    pub fn decode(&self) -> Result<Point> {
        Ok(Point { x: self.x, y: decode(&self.value, self.radix)? })
    }
}

#[derive(Clone, Debug)]
pub struct ShareSet {
    /// Declared total number of shares.
    pub n: usize,
    /// Threshold.
    pub k: usize,
    /// Shares ordered by x.
    pub shares: Vec<Share>,
}

impl ShareSet {
    pub fn from_json_str(s: &str) -> Result<ShareSet> {
        let value: Value = serde_json::from_str(s)?;
        ShareSet::from_value(&value)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<ShareSet> {
        let value: Value = serde_json::from_reader(reader)?;
        ShareSet::from_value(&value)
    }

    pub fn from_value(value: &Value) -> Result<ShareSet> {
        let object = value
            .as_object()
            .ok_or_else(|| ShareError::Format("share set must be a JSON object".into()))?;

        let keys = object
            .get("keys")
            .and_then(Value::as_object)
            .ok_or_else(|| ShareError::Format("missing \"keys\" object".into()))?;
        let n = count_field(keys, "n")?;
        let k = count_field(keys, "k")?;
        if k == 0 {
            return Err(ShareError::InvalidThreshold(k));
        }
        if k > n {
            return Err(ShareError::Format(format!("threshold k = {} exceeds n = {}", k, n)));
        }

        let mut by_x: BTreeMap<u64, Share> = BTreeMap::new();
        for (name, entry) in object {
            if name == "keys" {
                continue;
            }
            let share = parse_share(name, entry)?;
            if by_x.contains_key(&share.x) {
                return Err(ShareError::DuplicatePoint(share.x));
            }
            by_x.insert(share.x, share);
        }

        if by_x.len() != n {
            warn!(declared = n, present = by_x.len(), "share count differs from keys.n");
        }
        debug!(n, k, present = by_x.len(), "loaded share set");

        Ok(ShareSet { n, k, shares: by_x.into_values().collect() })
    }

    /// Decode every share, failing on the first bad one.
    pub fn points(&self) -> Result<Vec<Point>> {
        self.shares.iter().map(Share::decode).collect()
    }

    /// Decode what can be decoded; return the rest alongside their errors.
    pub fn points_lenient(&self) -> (Vec<Point>, Vec<(u64, ShareError)>) {
        let mut points = Vec::new();
        let mut rejected = Vec::new();
        for share in &self.shares {
            match share.decode() {
                Ok(p) => points.push(p),
                Err(e) => {
                    warn!(x = share.x, error = %e, "skipping share");
                    rejected.push((share.x, e));
                }
            }
        }
        (points, rejected)
    }
}

fn count_field(keys: &Map<String, Value>, name: &str) -> Result<usize> {
    let field = keys
        .get(name)
        .ok_or_else(|| ShareError::Format(format!("missing keys.{}", name)))?;
    let parsed = match field {
        Value::Number(v) => v.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    parsed
        .and_then(|v| usize::try_from(v).ok())
        .ok_or_else(|| ShareError::Format(format!("keys.{} must be a non-negative integer, got {}", name, field)))
}

fn parse_share(name: &str, entry: &Value) -> Result<Share> {
    let x: u64 = name
        .trim()
        .parse()
        .map_err(|_| ShareError::Format(format!("share name {:?} is not a decimal x coordinate", name)))?;
    if x == 0 {
        // f(0) is the secret itself
        return Err(ShareError::Format("share x coordinate must be at least 1".into()));
    }
    let base = entry
        .get("base")
        .ok_or_else(|| ShareError::Format(format!("share {} has no base", x)))?;
    let value = entry
        .get("value")
        .and_then(Value::as_str)
        .ok_or_else(|| ShareError::Format(format!("share {} has no string value", x)))?;
    Ok(Share { x, radix: parse_radix(base)?, value: value.to_string() })
}

/// Decode a share set and reconstruct it.
pub fn reconstruct_share_set(set: &ShareSet, config: &Config) -> Result<Reconstruction> {
    let points = if config.lenient {
        let (points, rejected) = set.points_lenient();
        if points.len() < set.k {
            // report the decode failure rather than a bare count
            if let Some((_, first)) = rejected.into_iter().next() {
                return Err(first);
            }
        }
        points
    } else {
        set.points()?
    };
    lagrange::reconstruct(&points, set.k, config)
}

/// The secret of a share set, refusing fractional or inconsistent results.
pub fn recover_secret(set: &ShareSet, config: &Config) -> Result<BigInt> {
    reconstruct_share_set(set, config)?.verified_secret()
}
