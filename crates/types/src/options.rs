//! Build option types
//!
//! `fPIC` is deliberately an `Option<bool>`: on Windows-family targets and
//! for shared builds the option is absent from the domain entirely, which
//! is a different statement than "false".

use serde::{Deserialize, Serialize};
use std::fmt;

/// Options as requested by the driving process, before narrowing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fpic: Option<bool>,
}

/// The finalized option set, produced once by the option resolver
///
/// Immutable for the rest of the lifecycle; the generator and the build
/// orchestrator only read it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSet {
    pub shared: bool,
    /// `None` means the option is not applicable on this target
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fpic: Option<bool>,
}

impl From<OptionSet> for OptionRequest {
    fn from(options: OptionSet) -> Self {
        Self {
            shared: Some(options.shared),
            fpic: options.fpic,
        }
    }
}

impl fmt::Display for OptionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "shared={}", self.shared)?;
        if let Some(fpic) = self.fpic {
            write!(f, " fPIC={fpic}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_fpic_is_not_serialized() {
        let options = OptionSet {
            shared: true,
            fpic: None,
        };
        let json = serde_json::to_string(&options).unwrap();
        assert_eq!(json, r#"{"shared":true}"#);
    }

    #[test]
    fn test_display_omits_absent_fpic() {
        let options = OptionSet {
            shared: false,
            fpic: Some(true),
        };
        assert_eq!(options.to_string(), "shared=false fPIC=true");

        let options = OptionSet {
            shared: true,
            fpic: None,
        };
        assert_eq!(options.to_string(), "shared=true");
    }
}
