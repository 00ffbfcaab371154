use custom_error::custom_error;

pub type Result<T> = std::result::Result<T, Error>;

custom_error! {pub Error
    Io{source: std::io::Error} = "I/O error",
    Zip{source: zip::result::ZipError} = "archive error",
    Layout{source: serde_json::Error} = "bad layout file"
}

custom_error! {#[derive(Clone, PartialEq)] pub DecodeError
    BadCoordinate{field: &'static str, value: String} = "unparsable {field} '{value}'",
    MissingIdentifier = "record has no identifier",
    Incomplete{reason: String} = "incomplete record: {reason}"
}

custom_error! {#[derive(Clone, PartialEq)] pub QueryError
    NotFound{what: String} = "{what} not found",
    InvalidArgument{parameter: &'static str, reason: String} = "{parameter} {reason}"
}

impl QueryError {
    /// Name of the argument that failed validation, if any.
    pub fn parameter(&self) -> Option<&'static str> {
        match self {
            QueryError::InvalidArgument { parameter, .. } => Some(*parameter),
            QueryError::NotFound { .. } => None,
        }
    }
}
