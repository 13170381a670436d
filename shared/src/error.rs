use thiserror::Error;

/// Fatal data-loading failures. A join miss or a non-numeric attribute
/// value is an expected data condition, not an error; those are handled
/// by `join` and `scale` without ever reaching this type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    /// Network or parse failure on one of the two input resources.
    #[error("failed to load {resource}: {reason}")]
    Load { resource: String, reason: String },

    /// The boundary file does not contain the expected named object.
    #[error("object \"{0}\" not found in boundary topology")]
    MissingCollection(String),
}

impl DataError {
    pub fn load(resource: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::Load {
            resource: resource.into(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DataError;

    #[test]
    fn load_error_names_the_resource() {
        let err = DataError::load("statistics csv", "HTTP 404");
        assert_eq!(
            err.to_string(),
            "failed to load statistics csv: HTTP 404"
        );
    }

    #[test]
    fn missing_collection_names_the_object() {
        let err = DataError::MissingCollection("mexicoStates2".into());
        assert_eq!(
            err.to_string(),
            "object \"mexicoStates2\" not found in boundary topology"
        );
    }
}
