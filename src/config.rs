use serde::{Deserialize, Serialize};

use crate::Result;

/// Session options
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    /// Keep entries whose name starts with a dot
    pub include_hidden_files: bool,
}

impl Options {
    pub fn include_hidden_files(mut self, include: bool) -> Self {
        self.include_hidden_files = include;
        self
    }

    /// Load options from a JSON document; missing fields keep their
    /// defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Options = serde_json::from_str(json)?;
        log::trace!("Loaded options: {:?}", options);
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DragDropError;
    use rstest::rstest;

    #[rstest]
    #[case("{}", false)]
    #[case(r#"{"includeHiddenFiles": true}"#, true)]
    #[case(r#"{"includeHiddenFiles": false}"#, false)]
    fn options_load_from_json(#[case] json: &str, #[case] expected: bool) {
        let options = Options::from_json(json).unwrap();
        assert_eq!(options.include_hidden_files, expected);
    }

    #[test]
    fn malformed_options_are_a_parse_error() {
        let err = Options::from_json(r#"{"includeHiddenFiles": "yes"}"#)
            .unwrap_err();
        assert!(matches!(err, DragDropError::Parse));
    }

    #[test]
    fn hidden_files_are_excluded_by_default() {
        assert!(!Options::default().include_hidden_files);
        assert!(
            Options::default()
                .include_hidden_files(true)
                .include_hidden_files
        );
    }
}
