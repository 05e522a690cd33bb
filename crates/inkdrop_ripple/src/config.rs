//! Ripple configuration

use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Max-radius overrides feed square roots and durations; reject values
    /// that would poison the arithmetic
    #[error("max radius override must be finite and non-negative, got {0}")]
    InvalidMaxRadius(f32),
}

pub(crate) fn validate_max_radius(max_radius: f32) -> Result<(), ConfigError> {
    if !max_radius.is_finite() || max_radius < 0.0 {
        return Err(ConfigError::InvalidMaxRadius(max_radius));
    }
    Ok(())
}

/// Configuration for a ripple surface
#[derive(Clone, Copy, Debug)]
pub struct RippleConfig {
    /// Clip the ripple to the surface (`true`) or let it expand past the
    /// edges (`false`, for compact controls)
    pub bounded: bool,
    /// Explicit max-radius override; `None` derives it from the surface's
    /// bounding box
    pub max_radius: Option<f32>,
}

impl RippleConfig {
    /// A ripple clipped to the surface's shape
    pub fn bounded() -> Self {
        Self {
            bounded: true,
            max_radius: None,
        }
    }

    /// A ripple permitted to expand beyond the surface's edges
    pub fn unbounded() -> Self {
        Self {
            bounded: false,
            max_radius: None,
        }
    }

    /// Override the computed max radius
    pub fn with_max_radius(mut self, max_radius: f32) -> Result<Self, ConfigError> {
        validate_max_radius(max_radius)?;
        self.max_radius = Some(max_radius);
        Ok(self)
    }
}

impl Default for RippleConfig {
    fn default() -> Self {
        Self::bounded()
    }
}
