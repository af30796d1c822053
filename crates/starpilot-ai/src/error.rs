use starpilot_core::types::EntityId;

/// Errors raised while setting up a pilot. A running tick never fails.
#[derive(Debug, thiserror::Error)]
pub enum PilotError {
    /// A tunable is outside its valid range.
    #[error("invalid pilot config: `{field}` must be {requirement}, got {value}")]
    InvalidConfig {
        field: &'static str,
        requirement: &'static str,
        value: f64,
    },

    /// The controlled craft has a degenerate hitbox.
    #[error("craft hitbox must be positive, got {half_width} x {half_height}")]
    InvalidCraft { half_width: f64, half_height: f64 },

    /// The controlled craft could not be found where the caller said it was.
    #[error("controlled craft {0:?} does not exist")]
    MissingCraft(EntityId),
}
