//! Declarative field-level faking applied on top of fixtures.
//!
//! An [`OverlayRule`] names a resource, a dotted field path and a
//! [`Generator`]. Path segments are object keys or array indices; `*` matches
//! every element of an array or every member of an object. Rules only rewrite
//! fields that already exist, and only with a value of the same JSON kind, so
//! an overlaid document always keeps the shape of its fixture.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use thiserror::Error;

use crate::catalog::Resource;

const MAX_DECIMALS: u32 = 10;

/// How a matched field gets its new value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Generator {
    /// Uniform integer in `min..=max`.
    Int { min: i64, max: i64 },
    /// Uniform float in `min..=max`, rounded to `decimals` places.
    Float {
        min: f64,
        max: f64,
        #[serde(default = "default_decimals")]
        decimals: u32,
    },
    /// One of `values`, chosen uniformly.
    Pick { values: Vec<Value> },
    /// Fair coin.
    Bool,
    /// `start`, `start + step`, ... in match order within one document.
    Increment {
        #[serde(default)]
        start: i64,
        #[serde(default = "default_step")]
        step: i64,
    },
    /// Always `value`.
    Constant { value: Value },
}

#[allow(clippy::missing_const_for_fn)]
fn default_decimals() -> u32 {
    2
}

#[allow(clippy::missing_const_for_fn)]
fn default_step() -> i64 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayRule {
    pub resource: Resource,
    pub path: String,
    pub generator: Generator,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OverlayError {
    #[error("overlay rule for {resource} has an empty path")]
    EmptyPath { resource: Resource },

    #[error("overlay rule for {resource} at '{path}': {reason}")]
    InvalidGenerator {
        resource: Resource,
        path: String,
        reason: String,
    },
}

impl Generator {
    fn check(&self) -> Result<(), String> {
        match self {
            Self::Int { min, max } if min > max => Err(format!("min {min} exceeds max {max}")),
            Self::Float { min, max, .. } if !(min.is_finite() && max.is_finite()) => {
                Err("bounds must be finite".into())
            }
            Self::Float { min, max, .. } if min > max => {
                Err(format!("min {min} exceeds max {max}"))
            }
            Self::Float { min, max, .. } if !(max - min).is_finite() => {
                Err(format!("range {min}..={max} is too wide"))
            }
            Self::Float { decimals, .. } if *decimals > MAX_DECIMALS => {
                Err(format!("decimals must be at most {MAX_DECIMALS}"))
            }
            Self::Pick { values } if values.is_empty() => Err("pick needs at least one value".into()),
            _ => Ok(()),
        }
    }
}

/// Validated set of overlay rules.
#[derive(Debug, Clone, Default)]
pub struct Overlay {
    rules: Vec<OverlayRule>,
}

impl Overlay {
    /// Validate `rules`.
    ///
    /// # Errors
    /// Returns the first rule with an empty path or impossible generator bounds.
    pub fn new(rules: Vec<OverlayRule>) -> Result<Self, OverlayError> {
        for rule in &rules {
            if rule.path.trim().is_empty() {
                return Err(OverlayError::EmptyPath {
                    resource: rule.resource,
                });
            }
            rule.generator
                .check()
                .map_err(|reason| OverlayError::InvalidGenerator {
                    resource: rule.resource,
                    path: rule.path.clone(),
                    reason,
                })?;
        }
        Ok(Self { rules })
    }

    #[must_use]
    pub fn rules(&self) -> &[OverlayRule] {
        &self.rules
    }

    /// Apply every rule targeting `resource` to `document` in place.
    pub fn apply<R: Rng + ?Sized>(&self, resource: Resource, document: &mut Value, rng: &mut R) {
        for rule in self.rules.iter().filter(|r| r.resource == resource) {
            let segments: Vec<&str> = rule.path.split('.').collect();
            let mut counter = 0i64;
            visit(document, &segments, &mut |slot| {
                if let Some(next) = generate(&rule.generator, &mut counter, &mut *rng) {
                    if same_kind(slot, &next) {
                        *slot = next;
                    }
                }
            });
        }
    }
}

fn visit(value: &mut Value, segments: &[&str], f: &mut dyn FnMut(&mut Value)) {
    let Some((head, rest)) = segments.split_first() else {
        f(value);
        return;
    };

    match (*head, value) {
        ("*", Value::Array(items)) => {
            for item in items {
                visit(item, rest, f);
            }
        }
        ("*", Value::Object(members)) => {
            for member in members.values_mut() {
                visit(member, rest, f);
            }
        }
        (key, Value::Object(members)) => {
            if let Some(member) = members.get_mut(key) {
                visit(member, rest, f);
            }
        }
        (index, Value::Array(items)) => {
            if let Some(item) = index.parse::<usize>().ok().and_then(|i| items.get_mut(i)) {
                visit(item, rest, f);
            }
        }
        _ => {}
    }
}

fn generate<R: Rng + ?Sized>(generator: &Generator, counter: &mut i64, rng: &mut R) -> Option<Value> {
    match generator {
        Generator::Int { min, max } => Some(Value::from(rng.gen_range(*min..=*max))),
        Generator::Float { min, max, decimals } => {
            let raw = if min < max {
                rng.gen_range(*min..=*max)
            } else {
                *min
            };
            let scale = 10f64.powi(i32::try_from(*decimals).unwrap_or(2));
            // Rounding can step past either bound
            let rounded = ((raw * scale).round() / scale).clamp(*min, *max);
            Number::from_f64(rounded).map(Value::Number)
        }
        Generator::Pick { values } => values.choose(rng).cloned(),
        Generator::Bool => Some(Value::Bool(rng.gen_bool(0.5))),
        Generator::Increment { start, step } => {
            let next = start.saturating_add(step.saturating_mul(*counter));
            *counter += 1;
            Some(Value::from(next))
        }
        Generator::Constant { value } => Some(value.clone()),
    }
}

const fn same_kind(old: &Value, new: &Value) -> bool {
    matches!(
        (old, new),
        (Value::Null, Value::Null)
            | (Value::Bool(_), Value::Bool(_))
            | (Value::Number(_), Value::Number(_))
            | (Value::String(_), Value::String(_))
            | (Value::Array(_), Value::Array(_))
            | (Value::Object(_), Value::Object(_))
    )
}
