use std::collections::BTreeMap;

use crate::foundation::math;

/// Animatable visual property of an element.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    X,
    Y,
    Scale,
    Opacity,
    RotateX,
    RotateY,
    Width,
    Height,
    BorderRadius,
    /// Translation that keeps a pinned element visually fixed while its scroll region is active.
    PinOffset,
}

impl Property {
    /// Value an element has when nothing animated it.
    pub fn identity(self) -> f64 {
        match self {
            Self::Scale | Self::Opacity => 1.0,
            _ => 0.0,
        }
    }
}

pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        math::lerp(*a, *b, t)
    }
}

/// Ordered property map. Iteration order is the `Property` order, which keeps write logs stable.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Props(BTreeMap<Property, f64>);

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, prop: Property, value: f64) -> Self {
        self.0.insert(prop, value);
        self
    }

    pub fn set(&mut self, prop: Property, value: f64) {
        self.0.insert(prop, value);
    }

    pub fn get(&self, prop: Property) -> Option<f64> {
        self.0.get(&prop).copied()
    }

    pub fn contains(&self, prop: Property) -> bool {
        self.0.contains_key(&prop)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = Property> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Property, f64)> + '_ {
        self.0.iter().map(|(p, v)| (*p, *v))
    }

    /// Overwrite entries with those present in `other`.
    pub fn merge(&mut self, other: &Props) {
        for (p, v) in other.iter() {
            self.0.insert(p, v);
        }
    }

    pub(crate) fn validate(&self, what: &str) -> crate::MotionResult<()> {
        for (p, v) in self.iter() {
            if !v.is_finite() {
                return Err(crate::MotionError::animation(format!(
                    "{what}: {p:?} is not finite"
                )));
            }
        }
        Ok(())
    }
}

impl FromIterator<(Property, f64)> for Props {
    fn from_iter<I: IntoIterator<Item = (Property, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Lerp for Props {
    /// Interpolates keys present in both maps; keys only in `b` jump to `b`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        b.iter()
            .map(|(p, bv)| match a.get(p) {
                Some(av) => (p, math::lerp(av, bv, t)),
                None => (p, bv),
            })
            .collect()
    }
}
