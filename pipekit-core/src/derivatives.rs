//! Parsing of `name=path` derivative locations
//!
//! Each `-d/--derivatives` occurrence on the command line contributes one
//! token. Tokens are split at the first `=`, so paths may themselves contain
//! `=` characters.

use crate::error::DerivativesError;
use indexmap::IndexMap;
use std::path::PathBuf;

/// Ordered mapping from derivative name to its root directory
pub type DerivativesMap = IndexMap<String, PathBuf>;

/// Parse a list of `name=path` tokens into an ordered mapping.
///
/// A repeated name keeps its first position but takes the last path.
pub fn parse_derivatives<S: AsRef<str>>(tokens: &[S]) -> Result<DerivativesMap, DerivativesError> {
    let mut derivatives = DerivativesMap::new();
    for token in tokens {
        let (name, path) = parse_derivative_token(token.as_ref())?;
        derivatives.insert(name.to_string(), PathBuf::from(path));
    }
    Ok(derivatives)
}

fn parse_derivative_token(token: &str) -> Result<(&str, &str), DerivativesError> {
    token
        .split_once('=')
        .ok_or_else(|| DerivativesError::InvalidToken {
            token: token.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_parse_two_tokens() {
        let parsed = parse_derivatives(&["a=/x", "b=/y"]).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed["a"], Path::new("/x"));
        assert_eq!(parsed["b"], Path::new("/y"));
    }

    #[test]
    fn test_order_is_preserved() {
        let parsed = parse_derivatives(&["zeta=/z", "alpha=/a"]).unwrap();
        let names: Vec<&str> = parsed.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_empty_input_yields_empty_map() {
        let parsed = parse_derivatives::<&str>(&[]).unwrap();
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_token_without_equals_is_rejected() {
        let err = parse_derivatives(&["bad"]).unwrap_err();
        assert_eq!(
            err,
            DerivativesError::InvalidToken {
                token: "bad".to_string()
            }
        );
        let message = err.to_string();
        assert!(message.contains("bad"));
        assert!(message.contains("name=path"));
    }

    #[test]
    fn test_bad_token_after_good_ones_fails() {
        let err = parse_derivatives(&["ok=/fine", "broken"]).unwrap_err();
        assert!(err.to_string().contains("broken"));
    }

    #[test]
    fn test_split_at_first_equals() {
        let parsed = parse_derivatives(&["preproc=/data/run=1"]).unwrap();
        assert_eq!(parsed["preproc"], Path::new("/data/run=1"));
    }

    #[test]
    fn test_repeated_name_takes_last_path() {
        let parsed = parse_derivatives(&["a=/first", "b=/other", "a=/second"]).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed["a"], Path::new("/second"));
        assert_eq!(parsed.get_index(0).map(|(k, _)| k.as_str()), Some("a"));
    }

    #[test]
    fn test_empty_name_and_path_are_accepted() {
        // Only the separator is required
        let parsed = parse_derivatives(&["="]).unwrap();
        assert_eq!(parsed[""], Path::new(""));
    }
}
