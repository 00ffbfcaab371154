//! Token classification and catalog precedence.

use crate::model::Kind;
use std::fmt;

/// Which catalogs a query may search.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Scope {
    Any,
    Only(Kind),
}

impl Scope {
    /// Catalogs to consult, first hit wins. Airports outrank navaids, which
    /// outrank waypoints.
    pub fn search_order(self) -> &'static [Kind] {
        match self {
            Scope::Any => &[Kind::Airport, Kind::Navaid, Kind::Waypoint],
            Scope::Only(Kind::Airport) => &[Kind::Airport],
            Scope::Only(Kind::Navaid) => &[Kind::Navaid],
            Scope::Only(Kind::Waypoint) => &[Kind::Waypoint],
        }
    }

    /// Only navaid and any-kind queries take the bearing/distance shorthand.
    pub fn accepts_encoded(self) -> bool {
        matches!(self, Scope::Any | Scope::Only(Kind::Navaid))
    }

    /// Subject for a not-found message, e.g. `NAVAID 'SEA'` or `'SEA'`.
    pub fn describe(self, identifier: &str) -> String {
        match self {
            Scope::Any => format!("'{}'", identifier),
            Scope::Only(kind) => format!("{} '{}'", kind, identifier),
        }
    }
}

/// Reference id, bearing and distance folded into one token, e.g. `SEA270005`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EncodedToken {
    pub reference: String,
    pub bearing: u16,
    pub distance: u16,
}

impl EncodedToken {
    /// Accepts 2-5 letters `A-Z`, three bearing digits, three distance digits.
    pub fn parse(token: &str) -> Option<EncodedToken> {
        let bytes = token.as_bytes();
        if bytes.len() < 8 || bytes.len() > 11 {
            return None;
        }
        let (letters, digits) = bytes.split_at(bytes.len() - 6);
        if !letters.iter().all(u8::is_ascii_uppercase) || !digits.iter().all(u8::is_ascii_digit) {
            return None;
        }
        let number = |d: &[u8]| d.iter().fold(0u16, |n, b| n * 10 + u16::from(b - b'0'));

        Some(EncodedToken {
            reference: token[..letters.len()].to_owned(),
            bearing: number(&digits[..3]),
            distance: number(&digits[3..]),
        })
    }
}

impl fmt::Display for EncodedToken {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{:03}{:03}", self.reference, self.bearing, self.distance)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Token {
    Plain(String),
    Encoded(EncodedToken),
}

/// Classifies a user-supplied token. Case is normalized first.
pub fn resolve(token: &str) -> Token {
    let token = token.trim().to_ascii_uppercase();
    match EncodedToken::parse(&token) {
        Some(encoded) => Token::Encoded(encoded),
        None => Token::Plain(token),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(reference: &str, bearing: u16, distance: u16) -> Token {
        Token::Encoded(EncodedToken {
            reference: reference.to_owned(),
            bearing,
            distance,
        })
    }

    #[test]
    fn splits_encoded_tokens() {
        assert_eq!(resolve("SEA270005"), encoded("SEA", 270, 5));
        assert_eq!(resolve("sea270005"), encoded("SEA", 270, 5));
        assert_eq!(resolve("BANGR090120"), encoded("BANGR", 90, 120));
        assert_eq!(resolve("PA000000"), encoded("PA", 0, 0));
        assert_eq!(resolve("XYZ999999"), encoded("XYZ", 999, 999));
    }

    #[test]
    fn everything_else_is_plain() {
        for &t in &[
            "SEA",
            "KSEA",
            "S43",
            "A270005",
            "ABCDEF270005",
            "SEA27005",
            "SEA2700050",
            "SE4270005",
            "SEA27O005",
            "",
        ] {
            assert_eq!(resolve(t), Token::Plain(t.to_owned()), "{}", t);
        }
        assert_eq!(resolve(" sea "), Token::Plain("SEA".to_owned()));
    }

    #[test]
    fn non_ascii_tokens_are_plain() {
        assert_eq!(resolve("SÉA270005"), Token::Plain("SÉA270005".to_owned()));
    }

    #[test]
    fn display_round_trips() {
        for &reference in &["PA", "SEA", "BANGR"] {
            for bearing in (0..360).step_by(7) {
                for &distance in &[0, 5, 42, 999] {
                    let token = EncodedToken {
                        reference: reference.to_owned(),
                        bearing,
                        distance,
                    };
                    assert_eq!(resolve(&token.to_string()), Token::Encoded(token));
                }
            }
        }
    }

    #[test]
    fn precedence_order() {
        assert_eq!(
            Scope::Any.search_order(),
            &[Kind::Airport, Kind::Navaid, Kind::Waypoint]
        );
        assert_eq!(Scope::Only(Kind::Waypoint).search_order(), &[Kind::Waypoint]);
        assert!(Scope::Any.accepts_encoded());
        assert!(Scope::Only(Kind::Navaid).accepts_encoded());
        assert!(!Scope::Only(Kind::Airport).accepts_encoded());
        assert!(!Scope::Only(Kind::Waypoint).accepts_encoded());
    }
}
