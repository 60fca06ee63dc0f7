//! Keyword extraction from report documents.
//!
//! Walks one `output.xml`-style report with the quick-xml pull parser
//! and flattens every keyword element, at any nesting depth, into a
//! `KeywordRecord`. The caller owns the record collection and passes
//! it in by mutable reference, so several input files can accumulate
//! into one record set.

use super::label::normalize_label;
use super::schema::KeywordRecord;
use crate::utils::config::{KEYWORD_TAG, STATUS_TAG, TIMESTAMP_FORMAT};
use crate::utils::error::ParseError;
use chrono::NaiveDateTime;
use log::debug;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fs;
use std::path::Path;

/// Status attributes attached to a keyword element
struct StatusLine {
    status: String,
    starttime: String,
    endtime: String,
}

/// A keyword element whose closing tag has not been seen yet
struct PendingKeyword {
    raw_label: String,
    status: Option<StatusLine>,
}

/// One entry per currently open element, so a status element can be
/// matched to its direct parent keyword and nothing else.
enum Frame {
    Keyword(PendingKeyword),
    Other,
}

/// Extract all keyword records from one report file
///
/// **Public** - main entry point for extraction
///
/// # Arguments
/// * `path` - Path to the report document
/// * `records` - Caller-owned collection the records are appended to
///
/// # Returns
/// Number of records appended from this document
///
/// # Errors
/// * `ParseError::Io` - File cannot be read
/// * `ParseError::Xml` - Document is not well-formed XML
/// * `ParseError::MissingAttribute` / `MissingStatus` - Required data absent
/// * `ParseError::InvalidTimestamp` / `InvertedTimestamps` - Bad timing data
pub fn extract_keywords(
    path: impl AsRef<Path>,
    records: &mut Vec<KeywordRecord>,
) -> Result<usize, ParseError> {
    let path = path.as_ref();
    debug!("Reading report document: {}", path.display());

    let xml = fs::read_to_string(path)?;
    extract_keywords_from_str(&xml, records)
}

/// Extract all keyword records from an in-memory report document
///
/// **Public** - used by extract_keywords and by tests
pub fn extract_keywords_from_str(
    xml: &str,
    records: &mut Vec<KeywordRecord>,
) -> Result<usize, ParseError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut stack: Vec<Frame> = Vec::new();
    let mut buf = Vec::new();
    let before = records.len();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                if e.name().as_ref() == KEYWORD_TAG {
                    stack.push(Frame::Keyword(read_keyword_attrs(e)?));
                } else {
                    if e.name().as_ref() == STATUS_TAG {
                        attach_status(&mut stack, e)?;
                    }
                    stack.push(Frame::Other);
                }
            }
            Event::Empty(ref e) => {
                if e.name().as_ref() == KEYWORD_TAG {
                    // A self-closing keyword cannot carry a status child
                    let pending = read_keyword_attrs(e)?;
                    return Err(ParseError::MissingStatus(pending.raw_label));
                }
                if e.name().as_ref() == STATUS_TAG {
                    attach_status(&mut stack, e)?;
                }
            }
            Event::End(_) => {
                if let Some(Frame::Keyword(pending)) = stack.pop() {
                    records.push(finish_keyword(pending)?);
                }
            }
            Event::Eof => {
                if !stack.is_empty() {
                    return Err(ParseError::TruncatedDocument(stack.len()));
                }
                break;
            }
            _ => {}
        }
        buf.clear();
    }

    let appended = records.len() - before;
    debug!("Extracted {} keyword invocations", appended);
    Ok(appended)
}

/// Parse a report timestamp into epoch seconds
///
/// **Public** - used by the extractor and by tests
///
/// The document format is `YYYYMMDD HH:MM:SS.ffffff`, interpreted as
/// UTC calendar time. Sub-second precision is discarded, not rounded.
pub fn parse_timestamp(value: &str) -> Result<i64, ParseError> {
    let parsed = NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).map_err(|source| {
        ParseError::InvalidTimestamp {
            value: value.to_string(),
            source,
        }
    })?;

    Ok(parsed.and_utc().timestamp())
}

/// Build the raw (pre-normalization) label from a keyword element
///
/// **Private** - internal helper for the event loop
///
/// The required `name` attribute forms the label; an optional `type`
/// attribute is prepended space-separated so setup/teardown variants
/// of a keyword group separately from its plain invocations.
fn read_keyword_attrs(element: &BytesStart<'_>) -> Result<PendingKeyword, ParseError> {
    let mut name: Option<String> = None;
    let mut kind: Option<String> = None;

    for attr in element.attributes() {
        let attr = attr?;
        match attr.key.as_ref() {
            b"name" => name = Some(attr.unescape_value()?.into_owned()),
            b"type" => kind = Some(attr.unescape_value()?.into_owned()),
            _ => {}
        }
    }

    let name = name.ok_or(ParseError::MissingAttribute("name"))?;
    let raw_label = match kind {
        Some(kind) => format!("{} {}", kind, name),
        None => name,
    };

    Ok(PendingKeyword {
        raw_label,
        status: None,
    })
}

/// Attach a status element to its enclosing keyword, if any
///
/// **Private** - internal helper for the event loop
///
/// Suites and tests carry status elements of the same shape; only a
/// status whose direct parent is a keyword is recorded. A second
/// status under one keyword is ignored, matching first-child lookup.
fn attach_status(stack: &mut [Frame], element: &BytesStart<'_>) -> Result<(), ParseError> {
    let Some(Frame::Keyword(pending)) = stack.last_mut() else {
        return Ok(());
    };
    if pending.status.is_some() {
        return Ok(());
    }

    let mut status: Option<String> = None;
    let mut starttime: Option<String> = None;
    let mut endtime: Option<String> = None;

    for attr in element.attributes() {
        let attr = attr?;
        match attr.key.as_ref() {
            b"status" => status = Some(attr.unescape_value()?.into_owned()),
            b"starttime" => starttime = Some(attr.unescape_value()?.into_owned()),
            b"endtime" => endtime = Some(attr.unescape_value()?.into_owned()),
            _ => {}
        }
    }

    pending.status = Some(StatusLine {
        status: status.ok_or(ParseError::MissingAttribute("status"))?,
        starttime: starttime.ok_or(ParseError::MissingAttribute("starttime"))?,
        endtime: endtime.ok_or(ParseError::MissingAttribute("endtime"))?,
    });

    Ok(())
}

/// Turn a closed keyword element into a record
///
/// **Private** - internal helper for the event loop
fn finish_keyword(pending: PendingKeyword) -> Result<KeywordRecord, ParseError> {
    let status = pending
        .status
        .ok_or_else(|| ParseError::MissingStatus(pending.raw_label.clone()))?;

    let label = normalize_label(&pending.raw_label);

    let start_epoch = parse_timestamp(&status.starttime)?;
    let end_epoch = parse_timestamp(&status.endtime)?;
    if end_epoch < start_epoch {
        return Err(ParseError::InvertedTimestamps {
            label,
            start: status.starttime,
            end: status.endtime,
        });
    }

    Ok(KeywordRecord {
        label,
        status: status.status,
        duration_seconds: (end_epoch - start_epoch) as u64,
        start_timestamp: status.starttime,
        end_timestamp: status.endtime,
    })
}
