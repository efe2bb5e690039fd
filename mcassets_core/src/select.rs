//! Picking a version from the listed asset indexes.

use crate::error::{Error, Result, SelectionFault};

/// Resolve a line of user input to a position in `versions`.
///
/// Surrounding whitespace is ignored. The rest must be ASCII digits (no
/// sign) naming a position in `0..versions.len()`.
pub fn parse_choice(input: &str, versions: &[String]) -> Result<usize> {
    let answer = input.trim();

    if answer.is_empty() || !answer.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::invalid_selection(answer, SelectionFault::NotANumber));
    }

    let out_of_range = || {
        Error::invalid_selection(
            answer,
            SelectionFault::OutOfRange {
                count: versions.len(),
            },
        )
    };

    // All digits, so a parse failure can only be overflow.
    let choice: usize = answer.parse().map_err(|_| out_of_range())?;
    if choice >= versions.len() {
        return Err(out_of_range());
    }

    Ok(choice)
}

/// Resolve a version given by name.
pub fn find_version<'a>(name: &str, versions: &'a [String]) -> Result<&'a str> {
    versions
        .iter()
        .find(|v| v.as_str() == name)
        .map(String::as_str)
        .ok_or_else(|| Error::invalid_selection(name, SelectionFault::UnknownVersion))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn versions() -> Vec<String> {
        vec!["1.12".into(), "1.19".into(), "legacy".into()]
    }

    #[test]
    fn test_parse_choice_valid() {
        assert_eq!(parse_choice("0", &versions()).unwrap(), 0);
        assert_eq!(parse_choice("2\n", &versions()).unwrap(), 2);
        assert_eq!(parse_choice("  1 \r\n", &versions()).unwrap(), 1);
        assert_eq!(parse_choice("001", &versions()).unwrap(), 1);
    }

    #[test]
    fn test_parse_choice_not_a_number() {
        for input in ["abc", "-1", "+1", "1.0", "", "\n", "0x1"] {
            match parse_choice(input, &versions()) {
                Err(Error::InvalidSelection {
                    fault: SelectionFault::NotANumber,
                    ..
                }) => {}
                other => panic!("expected NotANumber for {:?}, got {:?}", input, other),
            }
        }
    }

    #[test]
    fn test_parse_choice_out_of_range() {
        for input in ["3", "99", "99999999999999999999999999"] {
            match parse_choice(input, &versions()) {
                Err(Error::InvalidSelection {
                    input: reported,
                    fault: SelectionFault::OutOfRange { count: 3 },
                }) => assert_eq!(reported, input),
                other => panic!("expected OutOfRange for {:?}, got {:?}", input, other),
            }
        }
    }

    #[test]
    fn test_parse_choice_empty_list() {
        assert!(parse_choice("0", &[]).is_err());
    }

    #[test]
    fn test_find_version() {
        assert_eq!(find_version("1.19", &versions()).unwrap(), "1.19");
        assert!(matches!(
            find_version("1.7", &versions()),
            Err(Error::InvalidSelection {
                fault: SelectionFault::UnknownVersion,
                ..
            })
        ));
    }

    // Property-based tests
    use proptest::prelude::*;

    proptest! {
        /// A number is accepted exactly when it is below the version count
        #[test]
        fn prop_choice_range(n in 0usize..1000, count in 0usize..50) {
            let versions: Vec<String> = (0..count).map(|i| format!("v{}", i)).collect();
            let result = parse_choice(&n.to_string(), &versions);
            if n < count {
                prop_assert_eq!(result?, n);
            } else {
                prop_assert!(result.is_err());
            }
        }
    }
}
