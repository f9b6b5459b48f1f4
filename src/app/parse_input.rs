use crate::constants::MAX_INPUT_ABS;

/// Parses a prefix-tagged numeric field ("X: 1.5" or a bare "1.5").
///
/// A field is accepted only when it parses to a finite number with
/// magnitude at most `MAX_INPUT_ABS`; on acceptance the value is stored
/// and the text normalized back to "prefix value". On rejection both the
/// value and the text are left alone so the user can correct the entry.
pub fn parse_field(prefix: &str, value: &mut f32, string: &mut String) -> bool {
    let parsed = {
        let raw = string.strip_prefix(prefix).unwrap_or(string.as_str()).trim();
        raw.parse::<f32>().ok()
    };
    match parsed {
        Some(v) if v.is_finite() && v.abs() <= MAX_INPUT_ABS => {
            *value = v;
            *string = format!("{prefix} {v}");
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bare_and_prefixed_numbers() {
        let mut value = 0.0;
        let mut text = "2.5".to_string();
        assert!(parse_field("X:", &mut value, &mut text));
        assert_eq!(value, 2.5);
        assert_eq!(text, "X: 2.5");

        let mut text = "X: -3".to_string();
        assert!(parse_field("X:", &mut value, &mut text));
        assert_eq!(value, -3.0);
    }

    #[test]
    fn rejects_garbage_and_retains_prior_value() {
        let mut value = 7.0;
        let mut text = "not a number".to_string();
        assert!(!parse_field("X:", &mut value, &mut text));
        assert_eq!(value, 7.0);
        assert_eq!(text, "not a number");
    }

    #[test]
    fn rejects_non_finite_input() {
        let mut value = 1.0;
        for bad in ["inf", "-inf", "NaN"] {
            let mut text = bad.to_string();
            assert!(!parse_field("X:", &mut value, &mut text), "{bad}");
            assert_eq!(value, 1.0);
        }
    }

    #[test]
    fn rejects_magnitudes_above_the_bound() {
        let mut value = 1.0;
        let mut text = "1e7".to_string();
        assert!(!parse_field("X:", &mut value, &mut text));
        assert_eq!(value, 1.0);

        let mut text = "1e6".to_string();
        assert!(parse_field("X:", &mut value, &mut text));
        assert_eq!(value, 1e6);
    }
}
