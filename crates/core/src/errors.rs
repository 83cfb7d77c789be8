use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid wardrobe data: {0}")]
    InvalidWardrobe(String),
    #[error("domain invariant violation: {0}")]
    InvariantViolation(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("input failure: {0}")]
    Input(String),
    #[error("configuration failure: {0}")]
    Configuration(String),
}

impl ApplicationError {
    /// Stable machine-readable class used in command output.
    pub fn error_class(&self) -> &'static str {
        match self {
            Self::Domain(DomainError::InvalidWardrobe(_)) => "invalid_wardrobe",
            Self::Domain(DomainError::InvariantViolation(_)) => "domain_validation",
            Self::Input(_) => "input",
            Self::Configuration(_) => "config_validation",
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Domain(_) => "The wardrobe or request could not be processed. Check inputs and try again.",
            Self::Input(_) => "The input file could not be read. Check the path and format.",
            Self::Configuration(_) => "Configuration is invalid. Run `outfitter config` to inspect it.",
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::{ApplicationError, DomainError};

    #[test]
    fn domain_error_maps_to_wardrobe_class() {
        let error = ApplicationError::from(DomainError::InvalidWardrobe(
            "item 4 has no category".to_owned(),
        ));

        assert_eq!(error.error_class(), "invalid_wardrobe");
        assert_eq!(
            error.user_message(),
            "The wardrobe or request could not be processed. Check inputs and try again."
        );
    }

    #[test]
    fn configuration_error_maps_to_config_validation() {
        let error = ApplicationError::Configuration("attempt budget is zero".to_owned());

        assert_eq!(error.error_class(), "config_validation");
        assert!(error.to_string().contains("attempt budget is zero"));
    }

    #[test]
    fn input_error_keeps_detail_in_display() {
        let error = ApplicationError::Input("wardrobe.json: not found".to_owned());

        assert_eq!(error.error_class(), "input");
        assert_eq!(error.to_string(), "input failure: wardrobe.json: not found");
    }
}
