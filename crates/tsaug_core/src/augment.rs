//! Augmentation traits and composition.

use ndarray::{ArrayD, ArrayViewD};
use rand::RngCore;

use crate::error::Result;
use crate::seed::Seed;
use crate::shape::SignalShape;

/// An augmentation applied to a single signal.
///
/// Implementations are pure: the input is never modified, every call is
/// independent, and all randomness comes from the generator passed in.
///
/// # Implementation Notes
///
/// - Accept rank-1 `(T,)` or rank-2 `(T, F)` signals and return the same shape
/// - Return `Result` instead of panicking
/// - Draw randomness only from `rng`
///
/// # Example
///
/// ```rust
/// use ndarray::{ArrayD, ArrayViewD};
/// use rand::RngCore;
/// use tsaug_core::{Augment, Result};
///
/// struct Negate;
///
/// impl Augment for Negate {
///     fn augment(&self, signal: ArrayViewD<'_, f64>, _rng: &mut dyn RngCore) -> Result<ArrayD<f64>> {
///         Ok(signal.mapv(|v| -v))
///     }
/// }
/// ```
pub trait Augment: Send + Sync {
    /// Augment one signal.
    ///
    /// # Errors
    ///
    /// Returns an error if the signal shape is unsupported or a parameter
    /// is outside the operator's domain.
    fn augment(&self, signal: ArrayViewD<'_, f64>, rng: &mut dyn RngCore) -> Result<ArrayD<f64>>;

    /// Augment one signal with a generator built from `seed`.
    ///
    /// # Errors
    ///
    /// Same as [`Augment::augment`].
    fn augment_seeded(&self, signal: ArrayViewD<'_, f64>, seed: Seed) -> Result<ArrayD<f64>> {
        let mut rng = seed.to_rng();
        self.augment(signal, &mut rng)
    }

    /// Get the name of this augmentation for logging/debugging.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// An augmentation that combines two equally shaped signals.
pub trait MultiAugment: Send + Sync {
    /// Combine two signals into one augmented signal.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CoreError::ShapeMismatch`] if the shapes differ.
    fn augment_multi(
        &self,
        signal1: ArrayViewD<'_, f64>,
        signal2: ArrayViewD<'_, f64>,
        rng: &mut dyn RngCore,
    ) -> Result<ArrayD<f64>>;

    /// Combine two signals with a generator built from `seed`.
    ///
    /// # Errors
    ///
    /// Same as [`MultiAugment::augment_multi`].
    fn augment_multi_seeded(
        &self,
        signal1: ArrayViewD<'_, f64>,
        signal2: ArrayViewD<'_, f64>,
        seed: Seed,
    ) -> Result<ArrayD<f64>> {
        let mut rng = seed.to_rng();
        self.augment_multi(signal1, signal2, &mut rng)
    }

    /// Get the name of this augmentation for logging/debugging.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Identity augmentation that passes the signal through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl Augment for Identity {
    fn augment(&self, signal: ArrayViewD<'_, f64>, _rng: &mut dyn RngCore) -> Result<ArrayD<f64>> {
        SignalShape::from_dims(signal.shape())?;
        Ok(signal.to_owned())
    }

    fn name(&self) -> &str {
        "Identity"
    }
}

/// Applies several augmentations in sequence, feeding each output to the next.
#[derive(Default)]
pub struct Compose {
    augments: Vec<Box<dyn Augment>>,
}

impl Compose {
    /// Create a new empty composition.
    #[must_use]
    pub fn new() -> Self {
        Self {
            augments: Vec::new(),
        }
    }

    /// Add an augmentation to the composition.
    pub fn push<A: Augment + 'static>(&mut self, augment: A) {
        self.augments.push(Box::new(augment));
    }

    /// Add an augmentation, builder style.
    #[must_use]
    pub fn add<A: Augment + 'static>(mut self, augment: A) -> Self {
        self.push(augment);
        self
    }

    /// Create a composition from boxed augmentations.
    #[must_use]
    pub fn from_vec(augments: Vec<Box<dyn Augment>>) -> Self {
        Self { augments }
    }

    /// Number of augmentations in the composition.
    #[must_use]
    pub fn len(&self) -> usize {
        self.augments.len()
    }

    /// Whether the composition is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.augments.is_empty()
    }
}

impl std::fmt::Debug for Compose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.augments.iter().map(|a| a.name()).collect();
        f.debug_struct("Compose").field("augments", &names).finish()
    }
}

impl Augment for Compose {
    fn augment(&self, signal: ArrayViewD<'_, f64>, rng: &mut dyn RngCore) -> Result<ArrayD<f64>> {
        let mut current = signal.to_owned();
        for augment in &self.augments {
            tracing::trace!(augment = augment.name(), "applying composed augmentation");
            current = augment.augment(current.view(), rng)?;
        }
        Ok(current)
    }

    fn name(&self) -> &str {
        "Compose"
    }
}
