//! Unit wrapper for transfer capabilities.
//!
//! Transmission capacities in the zonal extracts are megawatts. Keeping them in
//! a newtype stops a capacity from being averaged together with, say, a load
//! value or a capacity factor by accident.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Active power / transfer capability in megawatts (MW)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Megawatts(pub f64);

impl Megawatts {
    #[inline]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    #[inline]
    pub const fn value(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    /// Strictly positive and finite
    #[inline]
    pub fn is_positive(self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }

    #[inline]
    pub fn max(self, other: Self) -> Self {
        Self(self.0.max(other.0))
    }

    /// Arithmetic mean; `None` for an empty input.
    pub fn mean<I: IntoIterator<Item = Megawatts>>(values: I) -> Option<Megawatts> {
        let (sum, count) = values
            .into_iter()
            .fold((0.0, 0usize), |(sum, count), mw| (sum + mw.0, count + 1));
        (count > 0).then(|| Megawatts(sum / count as f64))
    }
}

impl Add for Megawatts {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Megawatts {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Mul<f64> for Megawatts {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self::Output {
        Self(self.0 * rhs)
    }
}

impl Div<f64> for Megawatts {
    type Output = Self;
    fn div(self, rhs: f64) -> Self::Output {
        Self(self.0 / rhs)
    }
}

impl Div<Megawatts> for Megawatts {
    type Output = f64;
    fn div(self, rhs: Megawatts) -> Self::Output {
        self.0 / rhs.0
    }
}

impl std::iter::Sum for Megawatts {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self(iter.map(|x| x.0).sum())
    }
}

impl std::fmt::Display for Megawatts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1} MW", self.0)
    }
}
