use serde::Deserialize;

// ─────────────────────────────────────────────
// Interpolate
// ─────────────────────────────────────────────

/// Values that can be blended between two samples.
pub trait Interpolate: Clone {
    /// `alpha == 0.0` yields `self`, `alpha == 1.0` yields `rhs`.
    fn lerp(&self, rhs: &Self, alpha: f64) -> Self;
}

impl Interpolate for f64 {
    fn lerp(&self, rhs: &f64, alpha: f64) -> f64 {
        f64::mul_add(rhs - self, alpha, *self)
    }
}

impl Interpolate for f32 {
    fn lerp(&self, rhs: &f32, alpha: f64) -> f32 {
        f32::mul_add(rhs - self, alpha as f32, *self)
    }
}

impl<const N: usize> Interpolate for [f64; N] {
    fn lerp(&self, rhs: &[f64; N], alpha: f64) -> [f64; N] {
        std::array::from_fn(|i| self[i].lerp(&rhs[i], alpha))
    }
}

/// Component-wise; extra components of the longer vector are dropped.
impl Interpolate for Vec<f64> {
    fn lerp(&self, rhs: &Vec<f64>, alpha: f64) -> Vec<f64> {
        self.iter()
            .zip(rhs.iter())
            .map(|(lhs, rhs)| lhs.lerp(rhs, alpha))
            .collect()
    }
}

// ─────────────────────────────────────────────
// Interpolation schemes between two nodes
// ─────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub enum Interpolation {
    /// Holds the left node's value until the next node.
    ForwardFlat,
    /// Takes the right node's value as soon as the left node is passed.
    BackwardFlat,
    #[default]
    Linear
}

impl Interpolation {
    /// Value between `lhs` and `rhs`, where `alpha` is the position in `(0, 1)`.
    pub fn between<V: Interpolate>(&self, lhs: &V, rhs: &V, alpha: f64) -> V {
        match self {
            Interpolation::ForwardFlat => lhs.clone(),
            Interpolation::BackwardFlat => rhs.clone(),
            Interpolation::Linear => lhs.lerp(rhs, alpha.clamp(0.0, 1.0))
        }
    }
}
