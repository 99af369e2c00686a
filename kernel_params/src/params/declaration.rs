//! Parser for a single `uniform` declaration
//!
//! ```text
//! decl := 'uniform' type name [meta] ';'
//! meta := '(' arg (',' arg)* ')'
//! arg  := 'mean' '=' value | 'scale' '=' value | 'file' '=' string
//! ```

use super::descriptor::{ParameterDescriptor, ParameterTable, DEFAULT_MEAN, DEFAULT_SCALE};
use super::types::ParamType;
use crate::config::compile_time::parameters::{MAX_FILE_PATH_LEN, MAX_PARAMS, MAX_PARAM_NAME_LEN};
use crate::lexical::Cursor;
use crate::syntax::values::{parse_float, parse_float2, parse_float3, parse_float4};
use crate::syntax::{parse_argument, parse_string_argument, ArgumentList, ParseError, ParseResult};

/// Optional hints from a declaration's argument list
#[derive(Debug, Clone, PartialEq)]
struct Metadata {
    mean: [f32; 4],
    scale: [f32; 4],
    file: Option<String>,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            mean: DEFAULT_MEAN,
            scale: DEFAULT_SCALE,
            file: None,
        }
    }
}

/// Parse the declaration that follows a matched `uniform` keyword.
///
/// Nothing is added to `table`; the caller appends the returned descriptor.
pub fn parse_declaration(
    cursor: &mut Cursor<'_>,
    table: &ParameterTable,
) -> ParseResult<ParameterDescriptor> {
    if table.len() >= MAX_PARAMS {
        return Err(ParseError::TooManyParameters {
            max: MAX_PARAMS,
            offset: cursor.offset(),
        });
    }

    cursor.skip_blank();
    let param_type = parse_type(cursor)?;
    let placement = table.place(param_type);

    cursor.skip_blank();
    let name = parse_name(cursor)?;

    cursor.skip_blank();
    let metadata = if cursor.peek() == Some(b'(') {
        parse_metadata(cursor, param_type)?
    } else {
        Metadata::default()
    };

    cursor.skip_blank();
    if !cursor.eat_char(b';') {
        return Err(ParseError::MissingTerminator {
            offset: cursor.offset(),
        });
    }

    Ok(ParameterDescriptor {
        name: name.to_string(),
        param_type,
        mean: metadata.mean,
        scale: metadata.scale,
        std140_offset: placement.offset,
        std140_size: placement.size,
        assigned_tex_unit: placement.tex_unit,
        file: metadata.file,
    })
}

fn parse_type(cursor: &mut Cursor<'_>) -> ParseResult<ParamType> {
    let offset = cursor.offset();
    ParamType::ALL
        .into_iter()
        .find(|t| cursor.match_keyword(t.keyword()))
        .ok_or(ParseError::InvalidParameterType { offset })
}

fn parse_name<'src>(cursor: &mut Cursor<'src>) -> ParseResult<&'src str> {
    let start = cursor.offset();
    let name = cursor.take_alpha();

    if name.is_empty() {
        return Err(ParseError::MissingParameterName { offset: start });
    }
    // Anchored at the name rather than the end of input
    if cursor.is_eof() {
        return Err(ParseError::PrematureEnd { offset: start });
    }
    if name.len() > MAX_PARAM_NAME_LEN {
        return Err(ParseError::ParameterNameTooLong {
            length: name.len(),
            max: MAX_PARAM_NAME_LEN,
            offset: start,
        });
    }

    Ok(name)
}

/// A `mean`/`scale` value with as many components as the type has
fn parse_hint(cursor: &mut Cursor<'_>, components: usize) -> ParseResult<[f32; 4]> {
    let mut hint = [0.0; 4];
    match components {
        1 => hint[0] = parse_float(cursor)?,
        2 => hint[..2].copy_from_slice(&parse_float2(cursor)?),
        3 => hint[..3].copy_from_slice(&parse_float3(cursor)?),
        _ => hint = parse_float4(cursor)?,
    }
    Ok(hint)
}

fn parse_metadata(cursor: &mut Cursor<'_>, param_type: ParamType) -> ParseResult<Metadata> {
    let mut metadata = Metadata::default();
    let mut list = ArgumentList::begin(cursor)?;

    while list.next(cursor)? {
        if let Some(n) = param_type.component_count() {
            if let Some(hint) = parse_argument(cursor, "mean", |c| parse_hint(c, n))? {
                metadata.mean[..n].copy_from_slice(&hint[..n]);
                continue;
            }
            if let Some(hint) = parse_argument(cursor, "scale", |c| parse_hint(c, n))? {
                metadata.scale[..n].copy_from_slice(&hint[..n]);
                continue;
            }
        }

        if param_type.is_sampler() {
            if let Some(path) = parse_string_argument(cursor, "file", Some(MAX_FILE_PATH_LEN))? {
                metadata.file = Some(path.to_string());
                continue;
            }
        }

        list.mark_unexpected();
    }

    list.end(cursor)?;
    Ok(metadata)
}
