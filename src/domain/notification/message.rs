//! Inbound payment notification parameters.

use form_urlencoded::byte_serialize;
use percent_encoding::percent_decode;
use serde::{Deserialize, Serialize};

/// Field the gateway uses for the payment state (`Completed`, `Pending`, ...).
pub const PAYMENT_STATUS_FIELD: &str = "payment_status";

/// Control parameter appended to the postback so the gateway validates it.
pub const VALIDATE_COMMAND: (&str, &str) = ("cmd", "_notify-validate");

/// Parameters of an IPN call, exactly as posted by the gateway.
///
/// Order is preserved: the postback must echo the fields in the sequence they
/// arrived. Each parameter is held twice: as its decoded bytes, which the
/// postback re-encodes, and as text for lookups and logs. Notifications sent
/// in a legacy charset such as `windows-1252` are not valid UTF-8; their text
/// form is lossy but the bytes, and so the postback, are exact.
///
/// Serializes as the list of text pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<(String, String)>", into = "Vec<(String, String)>")]
pub struct IpnMessage {
    params: Vec<(String, String)>,
    raw: Vec<(Vec<u8>, Vec<u8>)>,
}

impl IpnMessage {
    /// Wraps already-decoded parameters, e.g. from a web framework's form extractor.
    pub fn new(params: Vec<(String, String)>) -> Self {
        let raw = params
            .iter()
            .map(|(k, v)| (k.as_bytes().to_vec(), v.as_bytes().to_vec()))
            .collect();
        Self { params, raw }
    }

    /// Wraps decoded parameter bytes in any charset.
    pub fn from_raw(raw: Vec<(Vec<u8>, Vec<u8>)>) -> Self {
        let params = raw
            .iter()
            .map(|(k, v)| {
                (
                    String::from_utf8_lossy(k).into_owned(),
                    String::from_utf8_lossy(v).into_owned(),
                )
            })
            .collect();
        Self { params, raw }
    }

    /// Parses a raw `application/x-www-form-urlencoded` request body.
    ///
    /// Decoding never fails: stray `%` sequences are kept literally, pairs
    /// without `=` get an empty value and trailing whitespace is ignored.
    pub fn from_form_body(body: impl AsRef<[u8]>) -> Self {
        let body = body.as_ref();
        let end = body
            .iter()
            .rposition(|b| !b.is_ascii_whitespace())
            .map_or(0, |last| last + 1);

        let raw = body[..end]
            .split(|&b| b == b'&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let mut parts = pair.splitn(2, |&b| b == b'=');
                let name = parts.next().unwrap_or_default();
                let value = parts.next().unwrap_or_default();
                (decode_component(name), decode_component(value))
            })
            .collect();
        Self::from_raw(raw)
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// Decoded parameter bytes, in arrival order.
    pub fn raw_params(&self) -> &[(Vec<u8>, Vec<u8>)] {
        &self.raw
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Value of a field; the last occurrence wins when a name repeats.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .rev()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Declared payment status. Informational only: nothing in this message is
    /// trustworthy until the postback comes back verified.
    pub fn payment_status(&self) -> Option<&str> {
        self.get(PAYMENT_STATUS_FIELD)
    }

    /// Encodes the verification request body.
    ///
    /// Every received parameter is re-encoded from its bytes in arrival order
    /// and `cmd=_notify-validate` is appended as the final field.
    pub fn postback_body(&self) -> String {
        let mut body = String::new();
        for (name, value) in &self.raw {
            body.extend(byte_serialize(name));
            body.push('=');
            body.extend(byte_serialize(value));
            body.push('&');
        }
        let (name, value) = VALIDATE_COMMAND;
        body.push_str(name);
        body.push('=');
        body.push_str(value);
        body
    }

    /// Human-readable dump, one `name = value` line per parameter.
    pub fn dump(&self) -> String {
        self.params
            .iter()
            .map(|(k, v)| format!("{k} = {v}\r\n"))
            .collect()
    }
}

/// `+` is a space; `%XX` is a byte.
fn decode_component(input: &[u8]) -> Vec<u8> {
    let spaced: Vec<u8> = input
        .iter()
        .map(|&b| if b == b'+' { b' ' } else { b })
        .collect();
    percent_decode(&spaced).collect()
}

impl From<Vec<(String, String)>> for IpnMessage {
    fn from(params: Vec<(String, String)>) -> Self {
        Self::new(params)
    }
}

impl From<IpnMessage> for Vec<(String, String)> {
    fn from(message: IpnMessage) -> Self {
        message.params
    }
}

impl FromIterator<(String, String)> for IpnMessage {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
