//! Delimited-string codecs for link lists and plain string lists.
//!
//! The record store persists `links`, `sensors`, and `region` as single
//! delimited strings. These encodings are an on-disk contract for data
//! already written, so the exact separators are load-bearing: link fields
//! join with `,`, links join with `^`, and plain string lists join with
//! `", "`. Raw delimited strings never cross the persistence boundary in
//! either direction without passing through this module.

use serde::{Deserialize, Serialize};
use url::Url;

/// Separator between the fields of a single encoded link.
const FIELD_SEPARATOR: char = ',';
/// Separator between encoded links.
const LINK_SEPARATOR: char = '^';
/// Separator between plain string list entries.
const LIST_SEPARATOR: &str = ", ";
/// Protocol naming the link that locates the deletable 3D model resource.
const MODEL_LINK_PROTOCOL: &str = "3D_LAYER";

/// A single link descriptor attached to a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct Link {
    /// Display name; absent names encode as empty strings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Free-form description; absent descriptions encode as empty strings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Access protocol tag.
    pub protocol: String,
    /// Resource locator.
    pub url: String,
}

/// Errors raised while locating the model resource link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkFormatError {
    /// No encoded link carried the model-resource protocol.
    ModelLinkMissing,
    /// The model link's URL could not be parsed.
    InvalidUrl {
        /// Parser failure description.
        message: String,
    },
    /// The model link's URL had no path segment to extract.
    EmptyPath,
}

impl std::fmt::Display for LinkFormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ModelLinkMissing => {
                write!(f, "no {MODEL_LINK_PROTOCOL} link found in encoded links")
            }
            Self::InvalidUrl { message } => write!(f, "model link url is invalid: {message}"),
            Self::EmptyPath => write!(f, "model link url has no path segments"),
        }
    }
}

impl std::error::Error for LinkFormatError {}

/// Encode an ordered link list into its persisted delimited form.
///
/// Absent `name`/`description` fields serialise as empty strings; an empty
/// list encodes to the empty string. [`decode_links`] is the exact inverse.
///
/// # Examples
/// ```
/// use catalog::domain::Link;
/// use catalog::domain::links::encode_links;
///
/// let links = vec![Link {
///     name: None,
///     description: None,
///     protocol: "WMS".to_owned(),
///     url: "http://maps.test/wms".to_owned(),
/// }];
/// assert_eq!(encode_links(&links), ",,WMS,http://maps.test/wms");
/// ```
pub fn encode_links(links: &[Link]) -> String {
    links
        .iter()
        .map(|link| {
            [
                link.name.as_deref().unwrap_or_default(),
                link.description.as_deref().unwrap_or_default(),
                link.protocol.as_str(),
                link.url.as_str(),
            ]
            .join(&FIELD_SEPARATOR.to_string())
        })
        .collect::<Vec<String>>()
        .join(&LINK_SEPARATOR.to_string())
}

/// Decode a persisted links string back into an ordered link list.
///
/// `None` and the empty string decode to an empty list. Empty name and
/// description fields decode to `None`, so `decode_links(encode_links(l))`
/// reproduces `l` for every valid link list.
pub fn decode_links(encoded: Option<&str>) -> Vec<Link> {
    let Some(encoded) = encoded.filter(|value| !value.is_empty()) else {
        return Vec::new();
    };

    encoded
        .split(LINK_SEPARATOR)
        .map(|entry| {
            let mut fields = entry.splitn(4, FIELD_SEPARATOR);
            let name = fields.next().unwrap_or_default();
            let description = fields.next().unwrap_or_default();
            let protocol = fields.next().unwrap_or_default();
            let url = fields.next().unwrap_or_default();
            Link {
                name: non_empty(name),
                description: non_empty(description),
                protocol: protocol.to_owned(),
                url: url.to_owned(),
            }
        })
        .collect()
}

/// Extract the model identifier embedded in the model resource link.
///
/// Locates the encoded link carrying the `,,3D_LAYER,` convention (empty
/// name and description, protocol `3D_LAYER`) and returns the first path
/// segment of its URL.
pub fn extract_model_id(encoded: &str) -> Result<String, LinkFormatError> {
    let links = decode_links(Some(encoded));
    let model_link = links
        .iter()
        .find(|link| link.protocol == MODEL_LINK_PROTOCOL)
        .ok_or(LinkFormatError::ModelLinkMissing)?;

    let url = Url::parse(&model_link.url).map_err(|err| LinkFormatError::InvalidUrl {
        message: err.to_string(),
    })?;
    url.path_segments()
        .and_then(|mut segments| segments.next())
        .filter(|segment| !segment.is_empty())
        .map(ToOwned::to_owned)
        .ok_or(LinkFormatError::EmptyPath)
}

/// Encode a plain string list into its persisted `", "`-joined form.
pub fn encode_string_list(values: &[String]) -> String {
    values.join(LIST_SEPARATOR)
}

/// Decode a persisted `", "`-joined string list.
///
/// `None` and the empty string decode to an empty list. Entries keep any
/// embedded quote characters untouched.
pub fn decode_string_list(encoded: Option<&str>) -> Vec<String> {
    let Some(encoded) = encoded.filter(|value| !value.is_empty()) else {
        return Vec::new();
    };
    encoded.split(LIST_SEPARATOR).map(ToOwned::to_owned).collect()
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_owned())
    }
}
