//! WordNet lexicographer-file grammar.
//!
//! Record layouts (fields separated by single spaces):
//!
//! - `data.<pos>`: `offset lex_filenum ss_type w_cnt [word lex_id]{w_cnt}
//!   p_cnt [ptr_symbol offset pos source/target]{p_cnt} [f_cnt [+ f_num w_num]{f_cnt}] | gloss`
//! - `index.<pos>`: `lemma pos synset_cnt p_cnt [ptr_symbol]{p_cnt} sense_cnt
//!   tagsense_cnt [synset_offset]{synset_cnt}`
//! - `<pos>.exc`: `inflected base [base...]`
//!
//! `w_cnt`, `lex_id`, `w_num` and `source/target` are hexadecimal; every
//! other count is decimal. Each length prefix is read before the array it
//! sizes (`nom::multi::count`).

use nom::{
    bytes::complete::{take_while1, take_while_m_n},
    character::complete::{char, digit1, one_of, space0, space1},
    combinator::{all_consuming, map, map_res, opt},
    multi::{count, many1},
    sequence::{preceded, terminated, tuple},
    IResult,
};
use thiserror::Error;
use verbgraph_core::{pointer_relation, IndexEntry, Pointer, Synset, SynsetWord, VerbFrameRef};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("missing `|` gloss separator")]
    MissingGloss,

    #[error("malformed {record} record near `{near}`")]
    Malformed { record: &'static str, near: String },
}

fn malformed(record: &'static str, err: nom::Err<nom::error::Error<&str>>) -> GrammarError {
    let near = match err {
        nom::Err::Error(e) | nom::Err::Failure(e) => e.input.chars().take(24).collect(),
        nom::Err::Incomplete(_) => String::new(),
    };
    GrammarError::Malformed { record, near }
}

// ============================================================================
// Primitive fields
// ============================================================================

fn token(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !c.is_whitespace())(input)
}

fn decimal(input: &str) -> IResult<&str, usize> {
    map_res(digit1, |s: &str| s.parse::<usize>())(input)
}

fn hex_u8(input: &str) -> IResult<&str, u8> {
    map_res(take_while_m_n(1, 2, |c: char| c.is_ascii_hexdigit()), |s: &str| {
        u8::from_str_radix(s, 16)
    })(input)
}

fn offset(input: &str) -> IResult<&str, &str> {
    take_while_m_n(8, 8, |c: char| c.is_ascii_digit())(input)
}

fn pos_letter(input: &str) -> IResult<&str, char> {
    one_of("nvasr")(input)
}

fn field<'a, O>(
    parser: impl FnMut(&'a str) -> IResult<&'a str, O>,
) -> impl FnMut(&'a str) -> IResult<&'a str, O> {
    preceded(space1, parser)
}

// ============================================================================
// data.<pos>
// ============================================================================

fn word(input: &str) -> IResult<&str, SynsetWord> {
    map(tuple((token, field(hex_u8))), |(word, lex_id)| SynsetWord {
        word: word.to_string(),
        lex_id,
    })(input)
}

fn pointer(input: &str) -> IResult<&str, Pointer> {
    map(
        tuple((
            token,
            field(offset),
            field(pos_letter),
            field(take_while_m_n(4, 4, |c: char| c.is_ascii_hexdigit())),
        )),
        |(symbol, target, pos, source_target)| Pointer {
            symbol: symbol.to_string(),
            relation: pointer_relation(symbol).to_string(),
            target_offset: target.to_string(),
            pos: pos.to_string(),
            source_target: source_target.to_string(),
        },
    )(input)
}

fn verb_frame(input: &str) -> IResult<&str, VerbFrameRef> {
    map(
        tuple((
            char('+'),
            field(map_res(digit1, |s: &str| s.parse::<u16>())),
            field(hex_u8),
        )),
        |(_, frame_number, word_number)| VerbFrameRef {
            frame_number,
            word_number,
        },
    )(input)
}

fn synset_fields(input: &str) -> IResult<&str, Synset> {
    let (input, offset) = offset(input)?;
    let (input, lex_filenum) = field(map_res(digit1, |s: &str| s.parse::<u8>()))(input)?;
    let (input, ss_type) = field(pos_letter)(input)?;
    let (input, w_cnt) = field(map_res(
        take_while_m_n(1, 2, |c: char| c.is_ascii_hexdigit()),
        |s: &str| usize::from_str_radix(s, 16),
    ))(input)?;
    let (input, words) = count(field(word), w_cnt)(input)?;
    let (input, p_cnt) = field(decimal)(input)?;
    let (input, pointers) = count(field(pointer), p_cnt)(input)?;
    let (input, frames) = if ss_type == 'v' {
        let (input, f_cnt) = opt(field(decimal))(input)?;
        match f_cnt {
            Some(n) => count(field(verb_frame), n)(input)?,
            None => (input, Vec::new()),
        }
    } else {
        (input, Vec::new())
    };

    Ok((
        input,
        Synset {
            offset: offset.to_string(),
            lex_filenum,
            ss_type: ss_type.to_string(),
            words,
            pointers,
            frames,
            gloss: String::new(),
        },
    ))
}

/// Parse one `data.<pos>` line.
pub fn parse_synset_line(line: &str) -> Result<Synset, GrammarError> {
    let (fields, gloss) = line.split_once('|').ok_or(GrammarError::MissingGloss)?;
    let (_, mut synset) = all_consuming(terminated(synset_fields, space0))(fields)
        .map_err(|e| malformed("synset", e))?;
    synset.gloss = gloss.trim().to_string();
    Ok(synset)
}

// ============================================================================
// index.<pos>
// ============================================================================

fn index_fields(input: &str) -> IResult<&str, IndexEntry> {
    let (input, lemma) = token(input)?;
    let (input, pos) = field(pos_letter)(input)?;
    let (input, synset_count) = field(decimal)(input)?;
    let (input, p_cnt) = field(decimal)(input)?;
    let (input, pointer_symbols) = count(field(token), p_cnt)(input)?;
    let (input, sense_count) = field(decimal)(input)?;
    let (input, tagsense_count) = field(decimal)(input)?;
    let (input, offsets) = count(field(offset), synset_count)(input)?;

    Ok((
        input,
        IndexEntry {
            lemma: lemma.to_string(),
            pos: pos.to_string(),
            synset_count,
            pointer_symbols: pointer_symbols.into_iter().map(str::to_string).collect(),
            sense_count,
            tagsense_count,
            synset_offsets: offsets.into_iter().map(str::to_string).collect(),
        },
    ))
}

/// Parse one `index.<pos>` line.
pub fn parse_index_line(line: &str) -> Result<IndexEntry, GrammarError> {
    all_consuming(terminated(index_fields, space0))(line)
        .map(|(_, entry)| entry)
        .map_err(|e| malformed("index", e))
}

// ============================================================================
// <pos>.exc
// ============================================================================

/// Parse one exception line into `(inflected, bases)`.
pub fn parse_exception_line(line: &str) -> Result<(String, Vec<String>), GrammarError> {
    all_consuming(terminated(tuple((token, many1(field(token)))), space0))(line)
        .map(|(_, (form, bases))| {
            (
                form.to_string(),
                bases.into_iter().map(str::to_string).collect(),
            )
        })
        .map_err(|e| malformed("exception", e))
}

/// License/header lines in data and index files start with two spaces.
pub fn is_header_line(line: &str) -> bool {
    line.starts_with("  ")
}
