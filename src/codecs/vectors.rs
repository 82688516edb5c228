use super::{encode_string, float_to_string, Codec};
use crate::GlyphsError;
use kurbo::{Affine, Point};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

fn vector_regex(dimension: usize) -> Regex {
    let number = r"\s*([-+.eE\d]+)\s*";
    let pattern = format!("^\\{{{}\\}}$", vec![number; dimension].join(","));
    #[allow(clippy::unwrap_used)] // the pattern is a constant
    Regex::new(&pattern).unwrap()
}

fn point_regex() -> &'static Regex {
    static POINT: OnceLock<Regex> = OnceLock::new();
    POINT.get_or_init(|| vector_regex(2))
}

fn transform_regex() -> &'static Regex {
    static TRANSFORM: OnceLock<Regex> = OnceLock::new();
    TRANSFORM.get_or_init(|| vector_regex(6))
}

/// Read the numbers out of a `{a, b, ...}` literal.
fn read_vector(regex: &Regex, text: &str, codec: &'static str) -> Result<Vec<f64>, GlyphsError> {
    let invalid = || GlyphsError::invalid(codec, text);
    let captures = regex.captures(text.trim()).ok_or_else(invalid)?;
    captures
        .iter()
        .skip(1)
        .map(|m| {
            m.ok_or_else(invalid)?
                .as_str()
                .parse::<f64>()
                .map_err(|_| invalid())
        })
        .collect()
}

fn write_vector(values: &[f64], precision: usize) -> String {
    let parts: Vec<String> = values
        .iter()
        .map(|v| float_to_string(*v, precision))
        .collect();
    format!("\"{{{}}}\"", parts.join(", "))
}

/// Points are written as `"{x, y}"` with up to three decimal places.
impl Codec for Point {
    fn decode(text: &str) -> Result<Self, GlyphsError> {
        match read_vector(point_regex(), text, "point")?[..] {
            [x, y] => Ok(Point::new(x, y)),
            _ => Err(GlyphsError::invalid("point", text)),
        }
    }

    fn encode(&self) -> String {
        write_vector(&[self.x, self.y], 3)
    }
}

/// Transforms are the six affine coefficients, up to five decimal places.
impl Codec for Affine {
    fn decode(text: &str) -> Result<Self, GlyphsError> {
        let coeffs: [f64; 6] = read_vector(transform_regex(), text, "transform")?
            .try_into()
            .map_err(|_| GlyphsError::invalid("transform", text))?;
        Ok(Affine::new(coeffs))
    }

    fn encode(&self) -> String {
        write_vector(&self.as_coeffs(), 5)
    }
}

/// A vertical alignment zone of a master.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AlignmentZone {
    pub position: f64,
    pub size: f64,
}

impl Codec for AlignmentZone {
    fn decode(text: &str) -> Result<Self, GlyphsError> {
        match read_vector(point_regex(), text, "alignment zone")?[..] {
            [position, size] => Ok(AlignmentZone { position, size }),
            _ => Err(GlyphsError::invalid("alignment zone", text)),
        }
    }

    fn encode(&self) -> String {
        write_vector(&[self.position, self.size], 3)
    }
}

/// What a hint is attached to: a node position, or a direction such as
/// `up` or `down`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HintTarget {
    Point(Point),
    Direction(String),
}

impl Codec for HintTarget {
    fn decode(text: &str) -> Result<Self, GlyphsError> {
        if text.trim_start().starts_with('{') {
            Point::decode(text).map(HintTarget::Point)
        } else {
            Ok(HintTarget::Direction(text.to_string()))
        }
    }

    fn encode(&self) -> String {
        match self {
            HintTarget::Point(p) => p.encode(),
            HintTarget::Direction(d) => encode_string(d).into_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn points() {
        let point = Point::decode("{1.5, -20}").unwrap();
        assert_eq!(point, Point::new(1.5, -20.0));
        assert_eq!(point.encode(), "\"{1.5, -20}\"");
        assert_eq!(Point::new(1.23456, 0.0).encode(), "\"{1.235, 0}\"");
        assert!(matches!(
            Point::decode("{1, 2, 3}"),
            Err(GlyphsError::InvalidLiteral { codec: "point", .. })
        ));
        assert!(Point::decode("1, 2").is_err());
    }

    #[test]
    fn transforms() {
        let transform = Affine::decode("{1, 0, 0, 1, 150.5, 20}").unwrap();
        assert_eq!(transform, Affine::translate((150.5, 20.0)));
        assert_eq!(transform.encode(), "\"{1, 0, 0, 1, 150.5, 20}\"");
        assert_eq!(
            Affine::new([0.5, 0.0, 0.0, 0.5, 1.234567, 0.0]).encode(),
            "\"{0.5, 0, 0, 0.5, 1.23457, 0}\""
        );
        assert!(Affine::decode("{1, 0, 0, 1}").is_err());
    }

    #[test]
    fn zones_and_targets() {
        let zone = AlignmentZone::decode("{800, 16}").unwrap();
        assert_eq!(zone, AlignmentZone { position: 800.0, size: 16.0 });
        assert_eq!(zone.encode(), "\"{800, 16}\"");
        assert_eq!(
            HintTarget::decode("up").unwrap(),
            HintTarget::Direction("up".into())
        );
        let target = HintTarget::decode("{10, 20}").unwrap();
        assert_eq!(target, HintTarget::Point(Point::new(10.0, 20.0)));
        assert_eq!(target.encode(), "\"{10, 20}\"");
    }
}
