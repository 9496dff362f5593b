use crate::util::BoxedError;
use std::{fmt::Display, str::FromStr};

/// Parse something from a string but fail with some sort of helpful message
///
/// Example:
///
/// ```
/// use arcade::util;
/// // fails with: "ticks must be a number: invalid digit found in string"
/// let ticks: Result<u32, _> = util::parse_diagnostic("q", &"ticks must be a number");
/// assert!(ticks.is_err());
/// ```
#[inline]
pub fn parse_diagnostic<F: FromStr<Err = E>, E: Into<BoxedError>, D: Display>(
    s: &str,
    diagnostic: &D,
) -> Result<F, BoxedError> {
    s.parse()
        .map_err(|err: F::Err| format!("{}: {}", diagnostic, err.into()).into())
}

/// Parse the positional argument at `index`, falling back to `default` when it is absent.
pub fn arg_or<F, E>(args: &[String], index: usize, name: &str, default: F) -> Result<F, BoxedError>
where
    F: FromStr<Err = E>,
    E: Into<BoxedError>,
{
    match args.get(index) {
        Some(arg) => parse_diagnostic(arg, &format!("Invalid {} {:?}", name, arg)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_present_args() {
        let args = vec!["space".to_string(), "120".to_string()];
        let ticks: u32 = arg_or(&args, 1, "tick count", 60).unwrap();
        assert_eq!(120, ticks);
    }

    #[test]
    fn falls_back_when_missing() {
        let args = vec!["space".to_string()];
        let seed: u64 = arg_or(&args, 2, "seed", 7).unwrap();
        assert_eq!(7, seed);
    }

    #[test]
    fn reports_bad_args() {
        let args = vec!["space".to_string(), "lots".to_string()];
        let err = arg_or::<u32, _>(&args, 1, "tick count", 60).unwrap_err();
        assert!(err.to_string().starts_with("Invalid tick count \"lots\""));
    }
}
