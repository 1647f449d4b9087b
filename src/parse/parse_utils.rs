//! Some basic nom parsers

use std::str::FromStr;

use nom::{
    bytes::complete::take_till,
    character::complete::{char, digit1, multispace0, one_of},
    combinator::{map_res, opt, recognize},
    number::complete::double,
    sequence::{delimited, preceded, terminated, tuple},
    IResult,
};

// ========================================================

pub fn ws_f64(input: &str) -> IResult<&str, f64, ()> {
    delimited(multispace0, double, multispace0)(input)
}

/// A face vertex reference: a position index, optionally followed by
/// `/texcoord` and `/normal` references, which are skipped.
pub fn ws_face_index(input: &str) -> IResult<&str, i64, ()> {
    delimited(
        multispace0,
        terminated(
            map_res(recognize(tuple((opt(one_of("-+")), digit1))), i64::from_str),
            opt(preceded(char('/'), take_till(|c: char| c.is_whitespace()))),
        ),
        multispace0,
    )(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ws_f64_1() {
        assert_eq!(ws_f64("42"), Ok(("", 42.0)));
        assert_eq!(ws_f64("  -1.5  "), Ok(("", -1.5)));
        assert_eq!(ws_f64("1.0e-3 2"), Ok(("2", 0.001)));
        assert!(ws_f64("x").is_err());
    }

    #[test]
    fn face_index_forms() {
        assert_eq!(ws_face_index("7 "), Ok(("", 7)));
        assert_eq!(ws_face_index("7/2 8"), Ok(("8", 7)));
        assert_eq!(ws_face_index("7//3 8"), Ok(("8", 7)));
        assert_eq!(ws_face_index("7/2/3"), Ok(("", 7)));
        assert_eq!(ws_face_index(" -1/1/1 "), Ok(("", -1)));
        assert!(ws_face_index("/2").is_err());
    }
}
