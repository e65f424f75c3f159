//! Maven-style version ordering.
//!
//! Follows the "comparable version" convention: versions tokenize on `.` and
//! `-`, numeric tokens compare numerically, and well-known qualifiers rank
//! below their release (`1.0-alpha < 1.0-beta < 1.0-rc < 1.0-SNAPSHOT <
//! 1.0`). Missing trailing tokens pad as release, so `1.0 == 1.0.0`.

use std::cmp::Ordering;
use std::fmt;

/// A version string parsed into comparable tokens.
#[derive(Debug, Clone)]
pub struct MavenVersion {
    raw: String,
    tokens: Vec<Token>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Number(u64),
    Qualifier(Qualifier),
    Text(String),
}

/// Well-known qualifiers in ascending rank. An absent qualifier is `Release`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Qualifier {
    Alpha,
    Beta,
    Milestone,
    Rc,
    Snapshot,
    Release,
    ServicePack,
}

impl MavenVersion {
    pub fn parse(raw: &str) -> Self {
        let tokens = raw
            .split(['.', '-'])
            .filter(|t| !t.is_empty())
            .map(classify_token)
            .collect();
        MavenVersion {
            raw: raw.to_string(),
            tokens,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }
}

fn classify_token(token: &str) -> Token {
    if let Ok(n) = token.parse::<u64>() {
        return Token::Number(n);
    }
    match token.to_ascii_lowercase().as_str() {
        "alpha" | "a" => Token::Qualifier(Qualifier::Alpha),
        "beta" | "b" => Token::Qualifier(Qualifier::Beta),
        "milestone" | "m" => Token::Qualifier(Qualifier::Milestone),
        "rc" | "cr" => Token::Qualifier(Qualifier::Rc),
        "snapshot" => Token::Qualifier(Qualifier::Snapshot),
        "ga" | "final" | "release" => Token::Qualifier(Qualifier::Release),
        "sp" => Token::Qualifier(Qualifier::ServicePack),
        _ => Token::Text(token.to_string()),
    }
}

impl Ord for MavenVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.tokens.len().max(other.tokens.len());
        for i in 0..len {
            let ord = match (self.tokens.get(i), other.tokens.get(i)) {
                (Some(a), Some(b)) => cmp_tokens(a, b),
                (Some(a), None) => cmp_token_to_release(a),
                (None, Some(b)) => cmp_token_to_release(b).reverse(),
                (None, None) => Ordering::Equal,
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for MavenVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for MavenVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for MavenVersion {}

impl fmt::Display for MavenVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn cmp_tokens(a: &Token, b: &Token) -> Ordering {
    match (a, b) {
        (Token::Number(a), Token::Number(b)) => a.cmp(b),
        // Any number outranks any qualifier or bare text
        (Token::Number(_), _) => Ordering::Greater,
        (_, Token::Number(_)) => Ordering::Less,
        (Token::Qualifier(a), Token::Qualifier(b)) => a.cmp(b),
        // Unknown text ranks above every known qualifier, release included,
        // so variant builds like 31.0-jre outrank their bare release
        (Token::Qualifier(_), Token::Text(_)) => Ordering::Less,
        (Token::Text(_), Token::Qualifier(_)) => Ordering::Greater,
        (Token::Text(a), Token::Text(b)) => a.to_ascii_lowercase().cmp(&b.to_ascii_lowercase()),
    }
}

/// How a token compares to absent padding (release rank, zero for numbers).
fn cmp_token_to_release(token: &Token) -> Ordering {
    match token {
        Token::Number(0) => Ordering::Equal,
        Token::Number(_) => Ordering::Greater,
        Token::Qualifier(q) => q.cmp(&Qualifier::Release),
        Token::Text(_) => Ordering::Greater,
    }
}

/// The greatest version in the input, with ties on equal rank broken by the
/// lexicographically greatest raw string. `None` only for empty input.
pub fn latest<'a, I>(versions: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<MavenVersion> = None;
    for raw in versions {
        let candidate = MavenVersion::parse(raw);
        best = Some(match best {
            None => candidate,
            Some(current) => match candidate.cmp(&current) {
                Ordering::Greater => candidate,
                Ordering::Equal if candidate.raw() > current.raw() => candidate,
                _ => current,
            },
        });
    }
    best.map(|v| v.raw)
}
