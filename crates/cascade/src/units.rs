//! Length parsing for style values.
//!
//! Style maps store lengths as free-form strings (`"3rem"`, `"60px"`,
//! `"-0.5em"`). The auto-tune heuristics need the magnitude and unit, so
//! this module parses them with `nom`.

use crate::types::{Length, LengthUnit};
use nom::{
    IResult,
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, digit1},
    combinator::{all_consuming, map, map_res, opt, recognize},
    sequence::{pair, tuple},
};

/// Parse a floating point or integer number, including a bare `.5`.
fn parse_number(input: &str) -> IResult<&str, f64> {
    map_res(
        recognize(tuple((
            opt(char('-')),
            alt((
                recognize(pair(digit1, opt(pair(char('.'), digit1)))),
                recognize(pair(char('.'), digit1)),
            )),
        ))),
        |s: &str| s.parse::<f64>(),
    )(input)
}

/// Parse the unit suffix (e.g., px, rem, %).
fn parse_unit_suffix(input: &str) -> IResult<&str, LengthUnit> {
    alt((
        map(tag("px"), |_| LengthUnit::Px),
        map(tag("rem"), |_| LengthUnit::Rem),
        map(tag("em"), |_| LengthUnit::Em),
        map(tag("vw"), |_| LengthUnit::ViewWidth),
        map(tag("vh"), |_| LengthUnit::ViewHeight),
        map(char('%'), |_| LengthUnit::Percent),
    ))(input)
}

/// Parse a single length (e.g., "10", "2.5rem", "50%").
pub fn parse_length(input: &str) -> IResult<&str, Length> {
    let input = input.trim_start();

    let (input, value) = parse_number(input)?;
    let (input, unit) = opt(parse_unit_suffix)(input)?;

    Ok((
        input,
        Length {
            value,
            unit: unit.unwrap_or(LengthUnit::Number),
        },
    ))
}

/// Parse a whole string as one length, rejecting trailing input.
pub fn parse_length_exact(input: &str) -> Option<Length> {
    all_consuming(parse_length)(input.trim())
        .ok()
        .map(|(_, length)| length)
}
