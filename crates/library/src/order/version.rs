use std::cmp::Ordering;
use std::fmt;

/// A release string split into numeric segments and an optional pre-release.
///
/// Accepts an optional leading `v`, dot-separated numeric segments, then an
/// optional pre-release (`-rc.1`, `a1`, `-beta`) and `+build` metadata.
/// Missing trailing segments count as zero, so `1.0` and `1.0.0` compare
/// equal. Anything else (PEP 440 post and dev releases among them) does not
/// parse, and [`compare`] falls back to comparing the raw text.
#[derive(Debug, Clone)]
pub struct Version {
    segments: Vec<u64>,
    prerelease: Option<String>,
    metadata: Option<String>,
}

impl Version {
    pub fn parse(text: &str) -> Option<Self> {
        let rest = text.strip_prefix('v').unwrap_or(text);
        let (release, metadata) = match rest.split_once('+') {
            Some((release, metadata)) => (release, Some(metadata)),
            None => (rest, None),
        };
        if let Some(metadata) = metadata
            && !is_identifier_list(metadata)
        {
            return None;
        }

        let bytes = release.as_bytes();
        let mut segments = Vec::new();
        let mut end = 0;
        loop {
            let start = end;
            while end < bytes.len() && bytes[end].is_ascii_digit() {
                end += 1;
            }
            if end == start {
                return None;
            }
            segments.push(release[start..end].parse::<u64>().ok()?);
            if bytes.get(end) == Some(&b'.') && bytes.get(end + 1).is_some_and(u8::is_ascii_digit) {
                end += 1;
                continue;
            }
            break;
        }

        let tail = &release[end..];
        let prerelease = if tail.is_empty() {
            None
        } else if let Some(pre) = tail.strip_prefix('-') {
            Some(pre)
        } else if tail.starts_with(|c: char| c.is_ascii_alphabetic() || c == '~') {
            Some(tail)
        } else {
            return None;
        };
        if let Some(pre) = prerelease
            && !is_identifier_list(pre)
        {
            return None;
        }

        Some(Self {
            segments,
            prerelease: prerelease.map(str::to_string),
            metadata: metadata.map(str::to_string),
        })
    }

    pub fn segments(&self) -> &[u64] {
        &self.segments
    }

    pub fn prerelease(&self) -> Option<&str> {
        self.prerelease.as_deref()
    }

    /// Build metadata. Never affects ordering.
    pub fn metadata(&self) -> Option<&str> {
        self.metadata.as_deref()
    }

    fn compare_segments(&self, other: &Self) -> Ordering {
        let len = self.segments.len().max(other.segments.len());
        (0..len)
            .map(|i| {
                let a = self.segments.get(i).copied().unwrap_or(0);
                let b = other.segments.get(i).copied().unwrap_or(0);
                a.cmp(&b)
            })
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare_segments(other).then_with(|| match (&self.prerelease, &other.prerelease) {
            (None, None) => Ordering::Equal,
            // A release sorts after any of its pre-releases.
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => compare_prereleases(a, b),
        })
    }
}
impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}
impl Eq for Version {}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let segments: Vec<String> = self.segments.iter().map(u64::to_string).collect();
        write!(f, "{}", segments.join("."))?;
        if let Some(pre) = &self.prerelease {
            write!(f, "-{pre}")?;
        }
        if let Some(metadata) = &self.metadata {
            write!(f, "+{metadata}")?;
        }
        Ok(())
    }
}

/// Compare two version strings.
///
/// Structured when both sides parse as a [`Version`], byte-wise on the raw
/// text otherwise.
pub fn compare(a: &str, b: &str) -> Ordering {
    match (Version::parse(a), Version::parse(b)) {
        (Some(a), Some(b)) => a.cmp(&b),
        _ => a.cmp(b),
    }
}

fn is_identifier_list(text: &str) -> bool {
    !text.is_empty()
        && text.split('.').all(|part| {
            !part.is_empty() && part.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '~')
        })
}

/// Dot-separated parts pairwise: numeric parts numerically and before
/// alphanumeric ones, which compare as text. A missing part sorts before a
/// numeric one and after an alphanumeric one.
fn compare_prereleases(a: &str, b: &str) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }
    let a_parts: Vec<&str> = a.split('.').collect();
    let b_parts: Vec<&str> = b.split('.').collect();
    let len = a_parts.len().max(b_parts.len());
    (0..len)
        .map(|i| compare_part(a_parts.get(i).copied(), b_parts.get(i).copied()))
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

fn compare_part(a: Option<&str>, b: Option<&str>) -> Ordering {
    let numeric = |part: &str| part.parse::<u64>().ok();
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(b)) if numeric(b).is_some() => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (Some(a), None) if numeric(a).is_some() => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => match (numeric(a), numeric(b)) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.cmp(b),
        },
    }
}
