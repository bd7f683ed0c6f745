//! npm-style version range expressions
//!
//! Supports the node-semver range grammar:
//! - `8.11.3`, `=8.11.3`, `v8.11.3` - exact match
//! - `8`, `8.11`, `8.x`, `8.11.*`, `*` - X-ranges (partial versions act as wildcards)
//! - `^1.2.3` - compatible with version (>=1.2.3 <2.0.0)
//! - `~1.2.3` - approximately equivalent (>=1.2.3 <1.3.0)
//! - `>=1.2.3`, `>1.2.3`, `<=1.2.3`, `<1.2.3` - comparison operators
//! - `1.0.0 - 2.0.0` - hyphen range
//! - `>=6 <9` - space-separated AND, `^6 || ^8` - OR
//!
//! Every expression is desugared into plain comparators, so partial versions
//! behave like node-semver (`<=8` means `<9.0.0`, `>8.1` means `>=8.2.0`).

use semver::{BuildMetadata, Prerelease, Version};

use crate::version::semver::clean_version;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Eq,
    Gt,
    Gte,
    Lt,
    Lte,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Comparator {
    op: Op,
    version: Version,
}

impl Comparator {
    fn new(op: Op, version: Version) -> Self {
        Self { op, version }
    }

    fn matches(&self, version: &Version) -> bool {
        match self.op {
            Op::Eq => *version == self.version,
            Op::Gt => *version > self.version,
            Op::Gte => *version >= self.version,
            Op::Lt => *version < self.version,
            Op::Lte => *version <= self.version,
        }
    }

    fn any() -> Vec<Self> {
        vec![Self::new(Op::Gte, Version::new(0, 0, 0))]
    }

    fn none() -> Vec<Self> {
        vec![Self::new(Op::Lt, Version::new(0, 0, 0))]
    }
}

/// A version as written inside a range; missing components are wildcards
#[derive(Debug, Clone, PartialEq, Eq)]
struct Partial {
    major: Option<u64>,
    minor: Option<u64>,
    patch: Option<u64>,
    pre: Prerelease,
}

impl Partial {
    fn parse(input: &str) -> Option<Self> {
        let input = input.trim().trim_start_matches(['=', 'v', 'V']).trim();
        if input.is_empty() {
            return None;
        }

        let input = input.split('+').next().unwrap_or(input);
        let (core, pre) = match input.split_once('-') {
            Some((core, pre)) => (core, Some(pre)),
            None => (input, None),
        };

        let parts: Vec<&str> = core.split('.').collect();
        if parts.len() > 3 {
            return None;
        }

        let mut numbers = [None; 3];
        let mut wildcard = false;
        for (slot, part) in numbers.iter_mut().zip(&parts) {
            if matches!(*part, "*" | "x" | "X") {
                wildcard = true;
            } else {
                let number = part.parse::<u64>().ok()?;
                // "1.x.3" is still 1.x
                if !wildcard {
                    *slot = Some(number);
                }
            }
        }

        let [major, minor, patch] = numbers;
        let pre = match pre {
            None => Prerelease::EMPTY,
            // prerelease tags only make sense on a full version
            Some(pre) if !pre.is_empty() && patch.is_some() => Prerelease::new(pre).ok()?,
            Some(_) => return None,
        };

        Some(Self {
            major,
            minor,
            patch,
            pre,
        })
    }

    fn is_any(&self) -> bool {
        self.major.is_none()
    }

    /// Lowest version covered by this partial ("8" -> 8.0.0)
    fn floor(&self) -> Version {
        Version {
            major: self.major.unwrap_or(0),
            minor: self.minor.unwrap_or(0),
            patch: self.patch.unwrap_or(0),
            pre: self.pre.clone(),
            build: BuildMetadata::EMPTY,
        }
    }

    fn full(&self) -> Option<Version> {
        self.patch.map(|_| self.floor())
    }

    /// First version above the wildcard ("8" -> 9.0.0, "8.11" -> 8.12.0)
    fn bump(&self) -> Version {
        let major = self.major.unwrap_or(0);
        match (self.minor, self.patch) {
            (None, _) => Version::new(major.saturating_add(1), 0, 0),
            (Some(minor), None) => Version::new(major, minor.saturating_add(1), 0),
            (Some(minor), Some(patch)) => Version::new(major, minor, patch.saturating_add(1)),
        }
    }

    fn x_range(&self) -> Vec<Comparator> {
        if self.is_any() {
            return Comparator::any();
        }
        match self.full() {
            Some(version) => vec![Comparator::new(Op::Eq, version)],
            None => vec![
                Comparator::new(Op::Gte, self.floor()),
                Comparator::new(Op::Lt, self.bump()),
            ],
        }
    }

    fn gte(&self) -> Vec<Comparator> {
        if self.is_any() {
            return Comparator::any();
        }
        vec![Comparator::new(Op::Gte, self.floor())]
    }

    fn gt(&self) -> Vec<Comparator> {
        if self.is_any() {
            return Comparator::none();
        }
        match self.full() {
            Some(version) => vec![Comparator::new(Op::Gt, version)],
            None => vec![Comparator::new(Op::Gte, self.bump())],
        }
    }

    fn lt(&self) -> Vec<Comparator> {
        if self.is_any() {
            return Comparator::none();
        }
        vec![Comparator::new(Op::Lt, self.floor())]
    }

    fn lte(&self) -> Vec<Comparator> {
        if self.is_any() {
            return Comparator::any();
        }
        match self.full() {
            Some(version) => vec![Comparator::new(Op::Lte, version)],
            None => vec![Comparator::new(Op::Lt, self.bump())],
        }
    }

    fn tilde(&self) -> Vec<Comparator> {
        let Some(major) = self.major else {
            return Comparator::any();
        };
        let upper = match self.minor {
            None => Version::new(major.saturating_add(1), 0, 0),
            Some(minor) => Version::new(major, minor.saturating_add(1), 0),
        };
        vec![
            Comparator::new(Op::Gte, self.floor()),
            Comparator::new(Op::Lt, upper),
        ]
    }

    fn caret(&self) -> Vec<Comparator> {
        let Some(major) = self.major else {
            return Comparator::any();
        };
        // ^1.2.3 -> <2.0.0, ^0.2.3 -> <0.3.0, ^0.0.3 -> <0.0.4
        let upper = match (self.minor, self.patch) {
            (None, _) => Version::new(major.saturating_add(1), 0, 0),
            _ if major > 0 => Version::new(major.saturating_add(1), 0, 0),
            (Some(minor), None) => Version::new(0, minor.saturating_add(1), 0),
            (Some(minor), Some(_)) if minor > 0 => Version::new(0, minor.saturating_add(1), 0),
            (Some(_), Some(patch)) => Version::new(0, 0, patch.saturating_add(1)),
        };
        vec![
            Comparator::new(Op::Gte, self.floor()),
            Comparator::new(Op::Lt, upper),
        ]
    }
}

/// Parse hyphen range like "1.0.0 - 2.0.0"
fn parse_hyphen(from: &str, to: &str) -> Option<Vec<Comparator>> {
    let from = parse_hyphen_bound(from)?;
    let to = parse_hyphen_bound(to)?;

    let mut set = Vec::new();
    if !from.is_any() {
        set.push(Comparator::new(Op::Gte, from.floor()));
    }
    if !to.is_any() {
        set.extend(to.lte());
    }
    if set.is_empty() {
        set = Comparator::any();
    }
    Some(set)
}

fn parse_hyphen_bound(bound: &str) -> Option<Partial> {
    if matches!(bound, "*" | "x" | "X") {
        return Some(Partial {
            major: None,
            minor: None,
            patch: None,
            pre: Prerelease::EMPTY,
        });
    }
    Partial::parse(bound)
}

/// Parse a single token (operator glued to its version) into comparators
fn parse_primitive(token: &str) -> Option<Vec<Comparator>> {
    if matches!(token, "*" | "x" | "X") {
        return Some(Comparator::any());
    }

    let operators: [(&str, fn(&Partial) -> Vec<Comparator>); 8] = [
        (">=", Partial::gte),
        ("<=", Partial::lte),
        ("~>", Partial::tilde),
        (">", Partial::gt),
        ("<", Partial::lt),
        ("~", Partial::tilde),
        ("^", Partial::caret),
        ("=", Partial::x_range),
    ];

    for (prefix, desugar) in operators {
        if let Some(rest) = token.strip_prefix(prefix) {
            if rest.trim().is_empty() {
                return None;
            }
            return Partial::parse(rest).map(|partial| desugar(&partial));
        }
    }

    Partial::parse(token).map(|partial| partial.x_range())
}

fn is_operator(word: &str) -> bool {
    matches!(word, ">" | ">=" | "<" | "<=" | "=" | "~" | "~>" | "^")
}

/// Split a conjunction into tokens, gluing detached operators to their
/// version (">= 1.2.3" -> ">=1.2.3")
fn tokenize(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut pending: Option<String> = None;

    for word in input.split_whitespace() {
        let word = match pending.take() {
            Some(operator) => format!("{operator}{word}"),
            None => word.to_string(),
        };
        if is_operator(&word) {
            pending = Some(word);
        } else {
            tokens.push(word);
        }
    }

    // a dangling operator fails to parse later on
    tokens.extend(pending);
    tokens
}

fn parse_comparator_set(input: &str) -> Option<Vec<Comparator>> {
    let tokens = tokenize(input);

    if let [from, dash, to] = tokens.as_slice()
        && dash == "-"
    {
        return parse_hyphen(from, to);
    }

    if tokens.is_empty() {
        return Some(Comparator::any());
    }

    let mut set = Vec::new();
    for token in &tokens {
        set.extend(parse_primitive(token)?);
    }
    Some(set)
}

fn set_satisfies(set: &[Comparator], version: &Version) -> bool {
    if !set.iter().all(|comparator| comparator.matches(version)) {
        return false;
    }

    if version.pre.is_empty() {
        return true;
    }

    // prereleases only match when a comparator opts into the same tuple
    set.iter().any(|comparator| {
        !comparator.version.pre.is_empty()
            && comparator.version.major == version.major
            && comparator.version.minor == version.minor
            && comparator.version.patch == version.patch
    })
}

/// A parsed range: OR of comparator sets, each an AND of comparators
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRange {
    sets: Vec<Vec<Comparator>>,
}

impl VersionRange {
    /// Parse a range expression, returning `None` when it is not a valid range
    pub fn parse(input: &str) -> Option<Self> {
        let sets = input
            .split("||")
            .map(parse_comparator_set)
            .collect::<Option<Vec<_>>>()?;
        Some(Self { sets })
    }

    /// Check if a version satisfies this range
    pub fn satisfies(&self, version: &Version) -> bool {
        self.sets.iter().any(|set| set_satisfies(set, version))
    }

    /// Check a raw published version string; unparseable versions never match
    pub fn satisfies_str(&self, version: &str) -> bool {
        clean_version(version).is_some_and(|version| self.satisfies(&version))
    }
}
