use thiserror::Error;

#[derive(Debug, Error)]
pub enum PatronError {
    #[error("Tirage invalide : {0}")]
    InvalidDraw(String),

    #[error("Pas assez de résultats extraits : {found} (minimum {required})")]
    InsufficientResults { found: usize, required: usize },

    #[error("Configuration invalide : {0}")]
    Config(String),

    #[error("Erreur de lecture/écriture : {0}")]
    Io(#[from] std::io::Error),

    #[error("Erreur JSON : {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PatronError>;
