/// Error type for s2cell-rs operations.
#[derive(Debug, PartialEq)]
pub enum S2CellError {
    /// The level is outside the valid range (1-30) or is not a number.
    InvalidLevel(String),
    /// The face is outside the valid range (0-5).
    InvalidFace(u8),
    /// The arguments match none of the recognised construction forms.
    InvalidConstructionArguments(String),
    /// The token or identifier string does not follow its grammar.
    MalformedToken(String),
    /// The Hilbert position part of an identifier is malformed.
    MalformedPositionString(String),
    /// No starting orientation reproduces the face for this position.
    UnreconstructableGrid { face: u8, position: u64 },
}

impl std::fmt::Display for S2CellError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            S2CellError::InvalidLevel(l) => write!(f, "Invalid level: {}", l),
            S2CellError::InvalidFace(face) => write!(f, "Invalid face: {}", face),
            S2CellError::InvalidConstructionArguments(msg) => {
                write!(f, "Invalid construction arguments: {}", msg)
            }
            S2CellError::MalformedToken(token) => write!(f, "Malformed token: {}", token),
            S2CellError::MalformedPositionString(msg) => {
                write!(f, "Malformed position string: {}", msg)
            }
            S2CellError::UnreconstructableGrid { face, position } => write!(
                f,
                "Could not reconstruct i/j for face {} and position {:#x}",
                face, position
            ),
        }
    }
}

impl std::error::Error for S2CellError {}
