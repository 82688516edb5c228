use crate::GlyphsError;
use openstep_plist::Plist;

/// How many decimal places `value` really needs, from 5 down to 0.
fn actual_precision(value: f64) -> i32 {
    let mut precision = 5;
    let mut integer = (value * 100000.0).round();
    while precision >= 0 {
        if integer != (integer / 10.0).round() * 10.0 {
            return precision;
        }
        integer = (integer / 10.0).round();
        precision -= 1;
    }
    0
}

/// Format a float with at most `precision` decimal places, dropping
/// trailing zeros and the decimal point when nothing follows it.
///
/// ```
/// use glyphsfile::codecs::float_to_string;
/// assert_eq!(float_to_string(100.0, 3), "100");
/// assert_eq!(float_to_string(0.1, 3), "0.1");
/// assert_eq!(float_to_string(1.23456, 3), "1.235");
/// ```
pub fn float_to_string(value: f64, precision: usize) -> String {
    let precision = (precision.min(5) as i32).min(actual_precision(value));
    let fractional = value.abs().fract();
    let digits = if precision >= 5 && (0.00001..=0.99999).contains(&fractional) {
        5
    } else if precision >= 4 && (0.0001..=0.9999).contains(&fractional) {
        4
    } else if precision >= 3 && (0.001..=0.999).contains(&fractional) {
        3
    } else if precision >= 2 && (0.01..=0.99).contains(&fractional) {
        2
    } else if precision >= 1 && (0.1..=0.9).contains(&fractional) {
        1
    } else {
        0
    };
    format!("{value:.digits$}")
}

pub(crate) fn int_from_plist(plist: &Plist) -> Result<i64, GlyphsError> {
    match plist {
        Plist::Integer(i) => Ok(*i),
        Plist::Float(f) if f.fract() == 0.0 => Ok(f.into_inner() as i64),
        Plist::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| {
                    s.parse::<f64>()
                        .ok()
                        .filter(|f| f.fract() == 0.0)
                        .map(|f| f as i64)
                })
                .ok_or_else(|| GlyphsError::invalid("integer", s))
        }
        other => Err(GlyphsError::invalid("integer", other.to_string())),
    }
}

pub(crate) fn float_from_plist(plist: &Plist) -> Result<f64, GlyphsError> {
    match plist {
        Plist::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| GlyphsError::invalid("float", s.as_str())),
        other => other
            .as_f64()
            .ok_or_else(|| GlyphsError::invalid("float", other.to_string())),
    }
}

/// Booleans are stored as `1`/`0`; a few older files spell them out.
pub(crate) fn bool_from_plist(plist: &Plist) -> Result<bool, GlyphsError> {
    match plist {
        Plist::Integer(i) => Ok(*i != 0),
        Plist::Float(f) => Ok(f.into_inner() != 0.0),
        Plist::String(s) => match s.trim() {
            "1" | "true" | "YES" => Ok(true),
            "0" | "false" | "NO" => Ok(false),
            other => Err(GlyphsError::invalid("boolean", other)),
        },
        other => Err(GlyphsError::invalid("boolean", other.to_string())),
    }
}

pub(crate) fn read_int_list(items: &[Plist]) -> Result<Vec<i64>, GlyphsError> {
    items.iter().map(int_from_plist).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(100.0, 3, "100")]
    #[case(0.1, 3, "0.1")]
    #[case(1.23456, 3, "1.235")]
    #[case(1.23456, 5, "1.23456")]
    #[case(-20.0, 5, "-20")]
    #[case(750.25, 3, "750.25")]
    #[case(0.0, 5, "0")]
    #[case(-0.5, 3, "-0.5")]
    #[case(1.000001, 5, "1")]
    #[case(0.00002, 5, "0.00002")]
    fn formats_floats(#[case] value: f64, #[case] precision: usize, #[case] expected: &str) {
        assert_eq!(float_to_string(value, precision), expected);
    }

    #[test]
    fn never_exceeds_precision() {
        for value in [0.123456789, 1234.98765, -3.14159, 2.0 / 3.0] {
            for precision in 0..=5 {
                let text = float_to_string(value, precision);
                let decimals = text.split_once('.').map_or(0, |(_, d)| d.len());
                assert!(decimals <= precision, "{text} has more than {precision} places");
            }
            let text = float_to_string(value, 5);
            let parsed: f64 = text.parse().unwrap_or(f64::NAN);
            assert!((parsed - value).abs() <= 1e-5, "{text} too far from {value}");
        }
    }

    #[test]
    fn coerces_numbers() {
        assert_eq!(int_from_plist(&Plist::from("-20")).ok(), Some(-20));
        assert_eq!(int_from_plist(&Plist::from(12.0)).ok(), Some(12));
        assert!(int_from_plist(&Plist::from(12.5)).is_err());
        assert_eq!(float_from_plist(&Plist::from("-20")).ok(), Some(-20.0));
        assert_eq!(float_from_plist(&Plist::Integer(3)).ok(), Some(3.0));
        assert!(matches!(
            float_from_plist(&Plist::from("abc")),
            Err(GlyphsError::InvalidLiteral { codec: "float", .. })
        ));
        assert_eq!(bool_from_plist(&Plist::Integer(1)).ok(), Some(true));
        assert_eq!(bool_from_plist(&Plist::from("0")).ok(), Some(false));
    }
}
