use std::fmt;

#[derive(Debug)]
pub enum MergeError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (bad start row, empty header list, etc.).
    ConfigValidation(String),
    /// A column reference that is neither a letter nor a 1-based number.
    ColumnRef { field: String, value: String },
}

impl fmt::Display for MergeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::ColumnRef { field, value } => {
                write!(
                    f,
                    "{field}: invalid column reference '{value}' (use a letter like \"H\" or a 1-based number)"
                )
            }
        }
    }
}

impl std::error::Error for MergeError {}
