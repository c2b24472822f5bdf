use thiserror::Error;

/// Errors originating from the core module.
///
/// Aucune n'est retentée : l'appelant reçoit l'erreur telle quelle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Invalid ramp, target size or configuration value.
    #[error("Configuration invalide : {0}")]
    InvalidConfiguration(String),

    /// Image that cannot be converted to single-channel luminance.
    #[error("Image non supportée : {0}")]
    UnsupportedImage(String),

    /// Blank prompt or path.
    #[error("Entrée vide : {0}")]
    EmptyInput(String),
}
