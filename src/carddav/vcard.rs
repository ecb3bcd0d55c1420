//! vCard reading using the icalendar crate's content-line parser.
//!
//! vCards share the iCalendar content-line grammar, so the same parser that
//! reads `VEVENT`s reads `VCARD`s. Only `FN` and `BDAY` are extracted. Group
//! prefixes (`item1.BDAY`) are ignored, and vCard 2.1 quoted-printable values
//! are joined and decoded.

use crate::models::ContactCard;
use icalendar::parser::{read_calendar, unfold, Property};
use thiserror::Error;

/// Reasons a resource body is not usable as a vCard.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VCardError {
    #[error("not a content-line document: {0}")]
    Parse(String),

    #[error("no VCARD component found")]
    NotACard,
}

/// Parse the first vCard in `text`.
pub fn parse_card(text: &str) -> Result<ContactCard, VCardError> {
    let joined = join_soft_line_breaks(text);
    let unfolded = unfold(&joined);

    // read_calendar unwraps the outermost component; give the card a parent
    // so it comes back as a component of its own.
    let wrapped = format!("BEGIN:VCALENDAR\r\n{}\r\nEND:VCALENDAR\r\n", unfolded.trim());
    let document = read_calendar(&wrapped).map_err(|e| VCardError::Parse(e.to_string()))?;

    let vcard = document
        .components
        .iter()
        .find(|c| c.name == "VCARD")
        .ok_or(VCardError::NotACard)?;

    let full_name = first_property(&vcard.properties, "FN").map(|prop| {
        let value: &str = prop.val.as_ref();
        if is_quoted_printable(prop) {
            unescape(&decode_quoted_printable(value))
        } else {
            unescape(value)
        }
    });
    let birthday = first_property(&vcard.properties, "BDAY").map(|prop| prop.val.to_string());

    Ok(ContactCard::new(full_name, birthday))
}

/// First property called `name`, ignoring case and any group prefix.
fn first_property<'a, 'p>(properties: &'p [Property<'a>], name: &str) -> Option<&'p Property<'a>> {
    properties.iter().find(|prop| {
        let full: &str = prop.name.as_ref();
        let bare = full.rsplit('.').next().unwrap_or(full);
        bare.eq_ignore_ascii_case(name)
    })
}

fn is_quoted_printable(prop: &Property) -> bool {
    prop.params.iter().any(|p| {
        let key: &str = p.key.as_ref();
        key.eq_ignore_ascii_case("QUOTED-PRINTABLE")
            || (key.eq_ignore_ascii_case("ENCODING")
                && p.val.as_ref().is_some_and(|v| {
                    let v: &str = v.as_ref();
                    v.eq_ignore_ascii_case("QUOTED-PRINTABLE")
                }))
    })
}

/// Join vCard 2.1 soft line breaks.
///
/// A quoted-printable value that ends a physical line with `=` continues on
/// the next line with no leading whitespace, which content-line unfolding
/// does not cover. Line endings come out as CRLF.
fn join_soft_line_breaks(text: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut continued = false;

    for line in text.lines() {
        if continued {
            if let Some(last) = lines.last_mut() {
                last.pop();
                last.push_str(line);
            }
        } else {
            lines.push(line.to_string());
        }

        continued = lines
            .last()
            .is_some_and(|last| last.ends_with('=') && head_is_quoted_printable(last));
    }

    let mut out = lines.join("\r\n");
    out.push_str("\r\n");
    out
}

/// `NOTE;ENCODING=QUOTED-PRINTABLE:...` -> true
fn head_is_quoted_printable(line: &str) -> bool {
    line.split_once(':')
        .is_some_and(|(head, _)| head.to_ascii_uppercase().contains("QUOTED-PRINTABLE"))
}

fn decode_quoted_printable(value: &str) -> String {
    let bytes = value.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'=' {
            let hex = bytes.get(i + 1..i + 3).filter(|h| h.iter().all(u8::is_ascii_hexdigit));
            if let Some(hex) = hex {
                let hi = (hex[0] as char).to_digit(16).unwrap_or(0);
                let lo = (hex[1] as char).to_digit(16).unwrap_or(0);
                out.push((hi * 16 + lo) as u8);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }

    String::from_utf8_lossy(&out).into_owned()
}

fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => out.push('\n'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
