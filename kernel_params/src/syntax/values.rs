//! Scalar and tuple value grammar
//!
//! Each parser starts exactly at the cursor (callers skip leading blanks)
//! and leaves the cursor just past the value on success. On failure the
//! error is anchored where the expected value should have begun.

use super::error::{ParseError, ParseResult};
use crate::lexical::Cursor;

const RADIANS_TO_DEGREES: f32 = 180.0 / std::f32::consts::PI;

/// Length of the numeric literal at the start of `text`: optional sign,
/// digits with an optional fraction, and an exponent only when it has digits.
fn scan_number(text: &[u8], allow_fraction: bool) -> Option<usize> {
    let digits = |from: usize| text[from..].iter().take_while(|b| b.is_ascii_digit()).count();

    let mut len = 0;
    if matches!(text.first(), Some(b'+') | Some(b'-')) {
        len += 1;
    }

    let int_digits = digits(len);
    len += int_digits;
    let mut mantissa_digits = int_digits;

    if allow_fraction && text.get(len) == Some(&b'.') {
        let frac_digits = digits(len + 1);
        if int_digits > 0 || frac_digits > 0 {
            len += 1 + frac_digits;
            mantissa_digits += frac_digits;
        }
    }

    if mantissa_digits == 0 {
        return None;
    }

    if allow_fraction && matches!(text.get(len), Some(b'e') | Some(b'E')) {
        let mut exp_len = 1;
        if matches!(text.get(len + 1), Some(b'+') | Some(b'-')) {
            exp_len += 1;
        }
        let exp_digits = digits(len + exp_len);
        if exp_digits > 0 {
            len += exp_len + exp_digits;
        }
    }

    Some(len)
}

/// `true`, `True`, `false` or `False`
pub fn parse_bool(cursor: &mut Cursor<'_>) -> ParseResult<bool> {
    for (literal, value) in [("true", true), ("True", true), ("false", false), ("False", false)] {
        if cursor.match_keyword(literal) {
            return Ok(value);
        }
    }
    Err(ParseError::InvalidBoolean {
        offset: cursor.offset(),
    })
}

pub fn parse_int(cursor: &mut Cursor<'_>) -> ParseResult<i32> {
    let offset = cursor.offset();
    let error = ParseError::InvalidInteger { offset };
    let len = scan_number(cursor.rest().as_bytes(), false).ok_or_else(|| error.clone())?;
    let value = cursor.rest()[..len].parse::<i32>().map_err(|_| error)?;
    cursor.advance(len);
    Ok(value)
}

pub fn parse_float(cursor: &mut Cursor<'_>) -> ParseResult<f32> {
    let offset = cursor.offset();
    let error = ParseError::InvalidNumber { offset };
    let len = scan_number(cursor.rest().as_bytes(), true).ok_or_else(|| error.clone())?;
    let value = cursor.rest()[..len].parse::<f32>().map_err(|_| error)?;
    cursor.advance(len);
    Ok(value)
}

/// A number followed by `deg` or `rad`; always returned in degrees
pub fn parse_angle(cursor: &mut Cursor<'_>) -> ParseResult<f32> {
    let value = parse_float(cursor)?;
    cursor.skip_blank();
    if cursor.match_keyword("deg") {
        Ok(value)
    } else if cursor.match_keyword("rad") {
        Ok(value * RADIANS_TO_DEGREES)
    } else {
        Err(ParseError::MissingAngleUnit {
            offset: cursor.offset(),
        })
    }
}

/// A `'...'` or `"..."` string without escapes; returns the text between
/// the quotes
pub fn parse_string<'src>(cursor: &mut Cursor<'src>) -> ParseResult<&'src str> {
    let delimiter = match cursor.peek() {
        Some(quote @ (b'"' | b'\'')) => quote,
        _ => {
            return Err(ParseError::MissingStringDelimiter {
                offset: cursor.offset(),
            })
        }
    };
    cursor.advance(1);

    let start = cursor.offset();
    let rest = cursor.rest().as_bytes();
    match rest.iter().position(|&b| b == delimiter) {
        Some(len) => {
            cursor.advance(len);
            let value = cursor.slice_from(start);
            cursor.advance(1);
            Ok(value)
        }
        None => {
            cursor.advance(rest.len());
            Err(ParseError::UnterminatedString {
                offset: cursor.offset(),
            })
        }
    }
}

// ============================================================================
// TUPLES
// ============================================================================

/// Naming used in tuple diagnostics
#[derive(Debug, Clone, Copy)]
struct TupleShape {
    tuple: &'static str,
    expected: &'static str,
}

const INT_TUPLE: TupleShape = TupleShape {
    tuple: "integer",
    expected: "an integer",
};
const FLOAT_TUPLE: TupleShape = TupleShape {
    tuple: "float",
    expected: "a number",
};
const ANGLE_TUPLE: TupleShape = TupleShape {
    tuple: "angle",
    expected: "an angle",
};

/// `'(' v (',' v){N-1} ')'` with blanks allowed around components
fn parse_tuple<T, const N: usize>(
    cursor: &mut Cursor<'_>,
    shape: TupleShape,
    component: fn(&mut Cursor<'_>) -> ParseResult<T>,
) -> ParseResult<[T; N]>
where
    T: Copy + Default,
{
    if !cursor.eat_char(b'(') {
        return Err(ParseError::TupleOpen {
            tuple: shape.tuple,
            offset: cursor.offset(),
        });
    }

    let mut values = [T::default(); N];
    for (index, slot) in values.iter_mut().enumerate() {
        if index > 0 {
            cursor.skip_blank();
            if !cursor.eat_char(b',') {
                return Err(ParseError::TupleSeparator {
                    offset: cursor.offset(),
                });
            }
        }
        cursor.skip_blank();
        *slot = component(cursor).map_err(|error| match error {
            ParseError::InvalidNumber { offset } | ParseError::InvalidInteger { offset } => {
                ParseError::TupleComponent {
                    index: index + 1,
                    expected: shape.expected,
                    offset,
                }
            }
            other => other,
        })?;
    }

    cursor.skip_blank();
    if !cursor.eat_char(b')') {
        return Err(ParseError::TupleClose {
            tuple: shape.tuple,
            offset: cursor.offset(),
        });
    }

    Ok(values)
}

pub fn parse_int2(cursor: &mut Cursor<'_>) -> ParseResult<[i32; 2]> {
    parse_tuple(cursor, INT_TUPLE, parse_int)
}

pub fn parse_int3(cursor: &mut Cursor<'_>) -> ParseResult<[i32; 3]> {
    parse_tuple(cursor, INT_TUPLE, parse_int)
}

pub fn parse_int4(cursor: &mut Cursor<'_>) -> ParseResult<[i32; 4]> {
    parse_tuple(cursor, INT_TUPLE, parse_int)
}

pub fn parse_float2(cursor: &mut Cursor<'_>) -> ParseResult<[f32; 2]> {
    parse_tuple(cursor, FLOAT_TUPLE, parse_float)
}

pub fn parse_float3(cursor: &mut Cursor<'_>) -> ParseResult<[f32; 3]> {
    parse_tuple(cursor, FLOAT_TUPLE, parse_float)
}

pub fn parse_float4(cursor: &mut Cursor<'_>) -> ParseResult<[f32; 4]> {
    parse_tuple(cursor, FLOAT_TUPLE, parse_float)
}

pub fn parse_angle2(cursor: &mut Cursor<'_>) -> ParseResult<[f32; 2]> {
    parse_tuple(cursor, ANGLE_TUPLE, parse_angle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn float(text: &str) -> ParseResult<f32> {
        parse_float(&mut Cursor::new(text))
    }

    #[test]
    fn test_bool_spellings() {
        for (text, expected) in [("true", true), ("True", true), ("false", false), ("False", false)] {
            assert_eq!(parse_bool(&mut Cursor::new(text)), Ok(expected));
        }
        assert_matches!(
            parse_bool(&mut Cursor::new("TRUE")),
            Err(ParseError::InvalidBoolean { offset: 0 })
        );
        assert_matches!(
            parse_bool(&mut Cursor::new("trueish")),
            Err(ParseError::InvalidBoolean { .. })
        );
    }

    #[test]
    fn test_float_forms() {
        assert_eq!(float("1"), Ok(1.0));
        assert_eq!(float("-2.5"), Ok(-2.5));
        assert_eq!(float("+.5"), Ok(0.5));
        assert_eq!(float("3."), Ok(3.0));
        assert_eq!(float("1e3"), Ok(1000.0));
        assert_eq!(float("2.5E-1"), Ok(0.25));
        assert_matches!(float("abc"), Err(ParseError::InvalidNumber { offset: 0 }));
        assert_matches!(float("-"), Err(ParseError::InvalidNumber { .. }));
        assert_matches!(float("."), Err(ParseError::InvalidNumber { .. }));
    }

    #[test]
    fn test_float_stops_at_non_numeric() {
        let mut cursor = Cursor::new("4e;");
        assert_eq!(parse_float(&mut cursor), Ok(4.0));
        assert_eq!(cursor.rest(), "e;");

        let mut cursor = Cursor::new("1.5)");
        assert_eq!(parse_float(&mut cursor), Ok(1.5));
        assert_eq!(cursor.peek(), Some(b')'));
    }

    #[test]
    fn test_int() {
        let mut cursor = Cursor::new("-42,");
        assert_eq!(parse_int(&mut cursor), Ok(-42));
        assert_eq!(cursor.peek(), Some(b','));

        let mut cursor = Cursor::new("7.5");
        assert_eq!(parse_int(&mut cursor), Ok(7));
        assert_eq!(cursor.rest(), ".5");

        assert_matches!(
            parse_int(&mut Cursor::new("x")),
            Err(ParseError::InvalidInteger { offset: 0 })
        );
        assert_matches!(
            parse_int(&mut Cursor::new("99999999999")),
            Err(ParseError::InvalidInteger { .. })
        );
    }

    #[test]
    fn test_angle_units() {
        assert_eq!(parse_angle(&mut Cursor::new("90 deg")), Ok(90.0));
        assert_eq!(parse_angle(&mut Cursor::new("45deg")), Ok(45.0));

        let radians = parse_angle(&mut Cursor::new("1.5707963 rad")).unwrap();
        assert!((radians - 90.0).abs() < 1e-3);
    }

    #[test]
    fn test_angle_requires_unit() {
        assert_matches!(
            parse_angle(&mut Cursor::new("5")),
            Err(ParseError::MissingAngleUnit { offset: 1 })
        );
        assert_matches!(
            parse_angle(&mut Cursor::new("5 degrees")),
            Err(ParseError::MissingAngleUnit { offset: 2 })
        );
    }

    #[test]
    fn test_string_delimiters() {
        let mut cursor = Cursor::new("\"noise.png\")");
        assert_eq!(parse_string(&mut cursor), Ok("noise.png"));
        assert_eq!(cursor.peek(), Some(b')'));

        assert_eq!(parse_string(&mut Cursor::new("'it\"s'")), Ok("it\"s"));
        assert_eq!(parse_string(&mut Cursor::new("''")), Ok(""));
    }

    #[test]
    fn test_string_errors() {
        assert_matches!(
            parse_string(&mut Cursor::new("noise.png")),
            Err(ParseError::MissingStringDelimiter { offset: 0 })
        );
        assert_matches!(
            parse_string(&mut Cursor::new("\"noise.png'")),
            Err(ParseError::UnterminatedString { offset: 11 })
        );
    }

    #[test]
    fn test_float_tuples() {
        assert_eq!(parse_float3(&mut Cursor::new("(0,0.5,1)")), Ok([0.0, 0.5, 1.0]));
        assert_eq!(
            parse_float4(&mut Cursor::new("( 1 , 2 , 3 , 4 )")),
            Ok([1.0, 2.0, 3.0, 4.0])
        );
        assert_eq!(parse_float2(&mut Cursor::new("(-1,1)")), Ok([-1.0, 1.0]));
    }

    #[test]
    fn test_int_tuples() {
        assert_eq!(parse_int2(&mut Cursor::new("(1,2)")), Ok([1, 2]));
        assert_eq!(parse_int3(&mut Cursor::new("(1, 2, 3)")), Ok([1, 2, 3]));
        assert_eq!(parse_int4(&mut Cursor::new("(1,2,3,4)")), Ok([1, 2, 3, 4]));
    }

    #[test]
    fn test_tuple_errors_are_component_specific() {
        assert_matches!(
            parse_int3(&mut Cursor::new("1,2,3)")),
            Err(ParseError::TupleOpen { tuple: "integer", offset: 0 })
        );
        assert_matches!(
            parse_int3(&mut Cursor::new("(1,x,3)")),
            Err(ParseError::TupleComponent { index: 2, expected: "an integer", offset: 3 })
        );
        assert_matches!(
            parse_float3(&mut Cursor::new("(1 2 3)")),
            Err(ParseError::TupleSeparator { offset: 3 })
        );
        assert_matches!(
            parse_float2(&mut Cursor::new("(1,2,3)")),
            Err(ParseError::TupleClose { tuple: "float", offset: 4 })
        );
        assert_matches!(
            parse_float4(&mut Cursor::new("(1,2,3)")),
            Err(ParseError::TupleSeparator { offset: 6 })
        );
    }

    #[test]
    fn test_angle_tuple() {
        let value = parse_angle2(&mut Cursor::new("(90 deg, 3.14159265 rad)")).unwrap();
        assert_eq!(value[0], 90.0);
        assert!((value[1] - 180.0).abs() < 1e-3);

        assert_matches!(
            parse_angle2(&mut Cursor::new("(90, 1 rad)")),
            Err(ParseError::MissingAngleUnit { offset: 3 })
        );
        assert_matches!(
            parse_angle2(&mut Cursor::new("(90 deg, )")),
            Err(ParseError::TupleComponent { index: 2, expected: "an angle", .. })
        );
    }
}
