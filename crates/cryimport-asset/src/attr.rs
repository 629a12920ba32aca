//! Attribute lookup helpers shared by the asset views.

use std::str::FromStr;

use cryimport_cryxml::Element;
use log::warn;

use crate::{Error, Result};

/// Get an attribute that must be present.
pub(crate) fn required<'a>(element: &'a Element, attribute: &'static str) -> Result<&'a str> {
    element
        .get(attribute)
        .ok_or_else(|| Error::MissingAttribute {
            element: element.tag().to_string(),
            attribute,
        })
}

/// Get and parse an attribute that must be present.
pub(crate) fn required_parsed<T>(element: &Element, attribute: &'static str) -> Result<T>
where
    T: FromStr<Err = cryimport_common::Error>,
{
    Ok(required(element, attribute)?.parse()?)
}

/// Get and parse an optional attribute.
///
/// Unparsable values (including the `BUGGED` sentinel) are logged and
/// treated as absent.
pub(crate) fn optional_parsed<T>(element: &Element, attribute: &str) -> Option<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = element.get(attribute)?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("<{}> ignoring {attribute}={raw:?}: {e}", element.tag());
            None
        }
    }
}
