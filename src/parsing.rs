//! Utilities for parsing lattice parameters from a short ASCII syntax that is easy to type, such as
//! `a=2 b=1 angle=90deg centered n=25`.
//!
//! Assignments are separated by whitespace or commas. Keys are `a`, `b`, `angle` (or `theta`),
//! `centered` and `n` (or `points`). Angles take an optional `deg`, `°` or `rad` suffix and
//! otherwise keep whatever unit the parameters already had. `centered` can stand alone as a flag.

use std::str::FromStr;

use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{char, multispace0, multispace1, u64};
use nom::combinator::{all_consuming, map, map_res, opt, value, verify};
use nom::multi::separated_list0;
use nom::number::complete::double;
use nom::sequence::{delimited, pair, preceded, terminated};
use nom::IResult;
use thiserror::Error;

use crate::params::{AngleUnit, LatticeParameters};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParamParseError {
    #[error("Could not parse lattice parameters from {input:?}: stopped at {rest:?}")]
    InvalidSyntax { input: String, rest: String },
}

/// A single `key=value` pair.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Assignment {
    A(f64),
    B(f64),
    Angle(f64, Option<AngleUnit>),
    Centered(bool),
    PointCount(usize),
}

impl Assignment {
    /// Applies the assignment on top of existing parameters.
    pub fn apply(self, params: LatticeParameters) -> LatticeParameters {
        match self {
            Assignment::A(a) => params.with_a(a),
            Assignment::B(b) => params.with_b(b),
            Assignment::Angle(angle, unit) => {
                params.with_angle(angle, unit.unwrap_or(params.angle_unit()))
            }
            Assignment::Centered(centered) => params.with_centered(centered),
            Assignment::PointCount(n) => params.with_point_count(n),
        }
    }
}

/// Wraps a parser to allow whitespace before and after.
fn ws<'a, F, O>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(multispace0, inner, multispace0)
}

/// Parses `name` followed by `=`.
fn key<'a>(name: &'static str) -> impl FnMut(&'a str) -> IResult<&'a str, &'a str> {
    terminated(tag(name), ws(char('=')))
}

/// Parses a finite number. `nan` and `inf` are not lattice parameters.
pub fn finite(input: &str) -> IResult<&str, f64> {
    verify(double, |x: &f64| x.is_finite())(input)
}

/// Parses a point count that fits in a `usize`.
fn count(input: &str) -> IResult<&str, usize> {
    map_res(u64, usize::try_from)(input)
}

/// Parses an angle unit suffix.
pub fn angle_unit(input: &str) -> IResult<&str, AngleUnit> {
    alt((
        value(AngleUnit::Degrees, tag("deg")),
        value(AngleUnit::Degrees, tag("\u{00B0}")),
        value(AngleUnit::Radians, tag("rad")),
    ))(input)
}

/// Parses `true` or `false`.
pub fn boolean(input: &str) -> IResult<&str, bool> {
    alt((value(true, tag("true")), value(false, tag("false"))))(input)
}

/// Parses a single assignment.
pub fn assignment(input: &str) -> IResult<&str, Assignment> {
    alt((
        map(
            preceded(alt((key("angle"), key("theta"))), pair(finite, opt(angle_unit))),
            |(angle, unit)| Assignment::Angle(angle, unit),
        ),
        map(preceded(key("a"), finite), Assignment::A),
        map(preceded(key("b"), finite), Assignment::B),
        map(preceded(key("centered"), boolean), Assignment::Centered),
        value(Assignment::Centered(true), tag("centered")),
        map(
            preceded(alt((key("n"), key("points"))), count),
            Assignment::PointCount,
        ),
    ))(input)
}

/// Parses what goes between two assignments: a comma, or at least one space.
fn separator(input: &str) -> IResult<&str, ()> {
    value((), alt((ws(char(',')), map(multispace1, |_| ' '))))(input)
}

/// Parses a full parameter string into its assignments, in order.
pub fn assignments(input: &str) -> IResult<&str, Vec<Assignment>> {
    all_consuming(delimited(
        multispace0,
        separated_list0(separator, assignment),
        multispace0,
    ))(input)
}

/// Parses `input` and applies every assignment on top of `base`. Later assignments win.
pub fn parse_onto(
    base: LatticeParameters,
    input: &str,
) -> Result<LatticeParameters, ParamParseError> {
    let (_rest, parsed) = assignments(input).map_err(|e| {
        let rest = match e {
            nom::Err::Error(e) | nom::Err::Failure(e) => e.input.to_owned(),
            nom::Err::Incomplete(_) => String::new(),
        };
        ParamParseError::InvalidSyntax {
            input: input.to_owned(),
            rest,
        }
    })?;

    Ok(parsed.into_iter().fold(base, |params, a| a.apply(params)))
}

impl FromStr for LatticeParameters {
    type Err = ParamParseError;

    /// Parses parameters, starting from the defaults.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_onto(LatticeParameters::default(), s)
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use super::*;
    use crate::bravais::LatticeType;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_full_string() {
        let params: LatticeParameters = "a=2 b=1 angle=90deg centered n=25".parse().unwrap();
        assert_eq!(
            params,
            LatticeParameters::new(2., 1., 90., AngleUnit::Degrees, true, 25)
        );
        assert_eq!(
            params.validate().unwrap().lattice_type(),
            Ok(LatticeType::CenteredRectangular)
        );
    }

    #[test]
    fn test_commas_and_spacing() {
        let params: LatticeParameters = " a = 3, b=3 ,theta=60\u{00B0},points=9 ".parse().unwrap();
        assert_eq!(
            params,
            LatticeParameters::new(3., 3., 60., AngleUnit::Degrees, false, 9)
        );
    }

    #[test]
    fn test_radians_and_flags() {
        let params: LatticeParameters = "angle=1.5rad centered=false a=-2".parse().unwrap();
        assert_eq!(params.angle_unit(), AngleUnit::Radians);
        assert_eq!(params.angle(), 1.5);
        assert!(!params.centered());
        assert_eq!(params.a(), 2.);
    }

    #[test]
    fn test_unit_carries_over() {
        let base = LatticeParameters::default().with_angle(PI / 2., AngleUnit::Radians);
        let params = parse_onto(base, "angle=1").unwrap();
        assert_eq!(params.angle_unit(), AngleUnit::Radians);
        assert_eq!(params.angle(), 1.);
    }

    #[test]
    fn test_empty_is_default() {
        let params: LatticeParameters = "".parse().unwrap();
        assert_eq!(params, LatticeParameters::default());
    }

    #[test]
    fn test_last_assignment_wins() {
        let params: LatticeParameters = "n=9 n=36".parse().unwrap();
        assert_eq!(params.point_count(), 36);
    }

    #[test]
    fn test_rejects_non_finite() {
        for input in ["a=2 b=1 angle=nan", "a=inf", "b=-infinity", "angle=NaNdeg", "a=1e400"] {
            assert!(
                matches!(
                    input.parse::<LatticeParameters>(),
                    Err(ParamParseError::InvalidSyntax { .. })
                ),
                "{input}"
            );
        }
    }

    #[test]
    fn test_point_count_too_large() {
        let params: LatticeParameters = "n=18446744073709551615".parse().unwrap();
        assert!(params.validate().is_err());
        assert!("n=18446744073709551616".parse::<LatticeParameters>().is_err());
    }

    #[test]
    fn test_rejects_garbage() {
        for input in [
            "c=2",
            "a=",
            "angle=90 gradians",
            "n=-4",
            "centered=yes",
            "a=2b=1",
            "n=9centered",
            "a=2,,b=1",
        ] {
            assert!(
                matches!(
                    input.parse::<LatticeParameters>(),
                    Err(ParamParseError::InvalidSyntax { .. })
                ),
                "{input}"
            );
        }
    }
}
