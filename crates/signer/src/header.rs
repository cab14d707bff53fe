//! The `HHMAC` Authorization header value.

use std::fmt;
use std::str::FromStr;

const SCHEME: &str = "HHMAC";

/// A parsed or freshly built Authorization header.
///
/// `date` is the exact timestamp string that was hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationHeader {
    pub key_id: String,
    pub signature: String,
    pub date: String,
}

/// Errors from parsing a header value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HeaderParseError {
    #[error("Authorization header does not use the HHMAC scheme")]
    WrongScheme,

    #[error("Authorization header is missing '{0}'")]
    MissingField(&'static str),

    #[error("Malformed Authorization header segment '{0}'")]
    MalformedSegment(String),
}

impl fmt::Display for AuthorizationHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{SCHEME}; key={}; signature={}; date={}",
            self.key_id, self.signature, self.date
        )
    }
}

impl FromStr for AuthorizationHeader {
    type Err = HeaderParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut segments = s.split("; ");
        if segments.next() != Some(SCHEME) {
            return Err(HeaderParseError::WrongScheme);
        }

        let mut key_id = None;
        let mut signature = None;
        let mut date = None;
        for segment in segments {
            // base64 signatures contain '=' padding, so split on the first one only
            let (name, value) = segment
                .split_once('=')
                .ok_or_else(|| HeaderParseError::MalformedSegment(segment.to_string()))?;
            match name {
                "key" => key_id = Some(value.to_string()),
                "signature" => signature = Some(value.to_string()),
                "date" => date = Some(value.to_string()),
                _ => return Err(HeaderParseError::MalformedSegment(segment.to_string())),
            }
        }

        Ok(Self {
            key_id: key_id.ok_or(HeaderParseError::MissingField("key"))?,
            signature: signature.ok_or(HeaderParseError::MissingField("signature"))?,
            date: date.ok_or(HeaderParseError::MissingField("date"))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_wire_format() {
        let header = AuthorizationHeader {
            key_id: "key-1".into(),
            signature: "c2lnbmF0dXJl".into(),
            date: "2017-10-12T19:28:35Z".into(),
        };
        assert_eq!(
            header.to_string(),
            "HHMAC; key=key-1; signature=c2lnbmF0dXJl; date=2017-10-12T19:28:35Z"
        );
    }

    #[test]
    fn parse_keeps_base64_padding() {
        let header: AuthorizationHeader =
            "HHMAC; key=k; signature=ab+/cd==; date=2017-10-12T19:28:35Z"
                .parse()
                .unwrap();
        assert_eq!(header.key_id, "k");
        assert_eq!(header.signature, "ab+/cd==");
        assert_eq!(header.date, "2017-10-12T19:28:35Z");
    }

    #[test]
    fn parse_rejects_other_schemes() {
        assert_eq!(
            "Bearer abc".parse::<AuthorizationHeader>(),
            Err(HeaderParseError::WrongScheme)
        );
        assert_eq!(
            "HHMAC; key=k; signature=s".parse::<AuthorizationHeader>(),
            Err(HeaderParseError::MissingField("date"))
        );
        assert!(matches!(
            "HHMAC; key=k; nonsense".parse::<AuthorizationHeader>(),
            Err(HeaderParseError::MalformedSegment(_))
        ));
    }
}
