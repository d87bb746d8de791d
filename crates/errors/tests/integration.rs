//! Integration tests for error types

#[cfg(test)]
mod tests {
    use kiln_errors::*;

    #[test]
    fn test_error_conversion() {
        let cfg_err = ConfigError::MissingExportPath {
            path: "include".into(),
        };
        let err: Error = cfg_err.into();
        assert!(matches!(err, Error::Config(_)));

        let tool_err = ToolError::BuildFailed {
            message: "ninja: error".into(),
        };
        let err: Error = tool_err.into();
        assert!(matches!(err, Error::Tool(_)));
    }

    #[test]
    fn test_error_display() {
        let err = ResolveError::Unsatisfied {
            name: "fmt".into(),
            version: "9.1.0".into(),
        };
        assert_eq!(
            err.to_string(),
            "no artifact for fmt 9.1.0 in the dependency store"
        );
    }

    #[test]
    fn test_error_clone() {
        let err = ToolError::ConfigureFailed {
            message: "missing compiler".into(),
        };
        let cloned = err.clone();
        assert_eq!(err.to_string(), cloned.to_string());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "test");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_nothing_is_retryable() {
        let errors: Vec<Error> = vec![
            ConfigError::StageOrder {
                stage: "install".into(),
                phase: "unconfigured".into(),
            }
            .into(),
            ResolveError::Unsatisfied {
                name: "gtest".into(),
                version: "1.17.0".into(),
            }
            .into(),
            ToolError::TestsFailed {
                message: "2 of 14 failed".into(),
            }
            .into(),
        ];
        for err in errors {
            assert!(!err.is_retryable(), "{err} must not be retryable");
        }
    }

    #[test]
    fn test_user_codes_are_stable() {
        let err: Error = ConfigError::UnsupportedStandard {
            required: 20,
            found: 17,
        }
        .into();
        assert_eq!(err.user_code(), Some("config.unsupported_standard"));
    }
}
