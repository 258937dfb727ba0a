use std::cmp::Ordering;
use std::iter;

/// Compare two version strings.
///
/// The dotted numeric core is compared component by component, the shorter
/// core padded with zeros. Anything after the core is a pre-release suffix:
/// a version with a suffix sorts before the same core without one. Two
/// suffixes compare identifier by identifier (split on `.`): all-digit
/// identifiers numerically and below any other identifier, the rest
/// lexically, and a shorter suffix first when one is a prefix of the other.
/// Build metadata (`+...`) is ignored.
#[must_use]
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let a = ParsedVersion::parse(a);
    let b = ParsedVersion::parse(b);

    compare_cores(&a.core, &b.core).then_with(|| compare_suffixes(a.suffix, b.suffix))
}

/// Whether `latest` is strictly newer than `current`.
#[must_use]
pub fn is_newer_version(latest: &str, current: &str) -> bool {
    compare_versions(latest, current) == Ordering::Greater
}

struct ParsedVersion<'a> {
    core: Vec<u64>,
    suffix: &'a str,
}

impl<'a> ParsedVersion<'a> {
    fn parse(version: &'a str) -> Self {
        let version = version.trim();
        let version = version.split_once('+').map_or(version, |(head, _)| head);

        let mut core = Vec::new();
        let mut rest = version;
        loop {
            let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
            if digits == 0 {
                break;
            }
            core.push(parse_component(&rest[..digits]));
            rest = &rest[digits..];

            match rest.strip_prefix('.') {
                Some(next) if next.starts_with(|c: char| c.is_ascii_digit()) => rest = next,
                _ => break,
            }
        }

        let suffix = rest.trim_start_matches(['-', '.']);
        Self { core, suffix }
    }
}

fn parse_component(digits: &str) -> u64 {
    digits.parse().unwrap_or(u64::MAX)
}

fn compare_cores(a: &[u64], b: &[u64]) -> Ordering {
    let len = a.len().max(b.len());
    let padded = |core: &[u64]| {
        core.iter()
            .copied()
            .chain(iter::repeat(0))
            .take(len)
            .collect::<Vec<_>>()
    };
    padded(a).cmp(&padded(b))
}

fn compare_suffixes(a: &str, b: &str) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a
            .split('.')
            .map(SuffixIdentifier::parse)
            .cmp(b.split('.').map(SuffixIdentifier::parse)),
    }
}

/// One dot-separated piece of a pre-release suffix. Variant order is the
/// sort order: numeric identifiers rank below alphanumeric ones.
#[derive(PartialEq, Eq, PartialOrd, Ord)]
enum SuffixIdentifier<'a> {
    /// Digits without leading zeros, ordered by length first so any size
    /// compares by value.
    Numeric { len: usize, digits: &'a str },
    Alphanumeric(&'a str),
}

impl<'a> SuffixIdentifier<'a> {
    fn parse(identifier: &'a str) -> Self {
        if !identifier.is_empty() && identifier.bytes().all(|b| b.is_ascii_digit()) {
            let digits = identifier.trim_start_matches('0');
            Self::Numeric {
                len: digits.len(),
                digits,
            }
        } else {
            Self::Alphanumeric(identifier)
        }
    }
}
