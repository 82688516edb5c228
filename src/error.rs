use thiserror::Error;

#[derive(Debug, Error)]
pub enum GlyphsError {
    #[error("Syntax error: {0}")]
    Syntax(#[from] openstep_plist::Error),

    #[error("{entity}.{field}: expected {expected}, found {found}")]
    TypeMismatch {
        entity: &'static str,
        field: String,
        expected: &'static str,
        found: String,
    },

    #[error("Invalid {codec} literal {literal:?}")]
    InvalidLiteral {
        codec: &'static str,
        literal: String,
    },

    #[error("versionMinor must be between 0 and 999, got {0}")]
    VersionOutOfRange(i64),

    #[error("Master {0} not found")]
    MasterNotFound(String),

    #[error("Glyph {0} not found")]
    GlyphNotFound(String),
}

impl GlyphsError {
    pub(crate) fn invalid(codec: &'static str, literal: impl Into<String>) -> Self {
        GlyphsError::InvalidLiteral {
            codec,
            literal: literal.into(),
        }
    }
}
