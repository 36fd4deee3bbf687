//! Target-platform version constraints.
//!
//! A [`Platform`] is one deployment floor such as "iOS 17" or "macOS 15.2".
//! Lists of platforms are merged from several sources (configuration, module,
//! module type) and must be reduced with [`Platform::deduplicate`] before
//! they are rendered: one entry per family, highest version wins, fixed
//! family order.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::domain::error::DomainError;

/// Platform family. The declaration order is the output order of
/// [`Platform::deduplicate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PlatformFamily {
    MacOs,
    Ios,
    TvOs,
    WatchOs,
    VisionOs,
    Linux,
}

impl PlatformFamily {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MacOs => "macOS",
            Self::Ios => "iOS",
            Self::TvOs => "tvOS",
            Self::WatchOs => "watchOS",
            Self::VisionOs => "visionOS",
            Self::Linux => "linux",
        }
    }
}

impl fmt::Display for PlatformFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A minimum supported platform version.
///
/// Only macOS carries a minor version. Two platforms of the same family
/// describe the same constraint slot; use [`Platform::family`] when identity
/// is needed. `PartialEq` compares versions too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Platform {
    MacOs { major: u32, minor: Option<u32> },
    Ios(u32),
    TvOs(u32),
    WatchOs(u32),
    VisionOs(u32),
    Linux(u32),
}

impl Platform {
    pub const fn macos(major: u32) -> Self {
        Self::MacOs { major, minor: None }
    }

    pub const fn macos_minor(major: u32, minor: u32) -> Self {
        Self::MacOs {
            major,
            minor: Some(minor),
        }
    }

    pub const fn family(&self) -> PlatformFamily {
        match self {
            Self::MacOs { .. } => PlatformFamily::MacOs,
            Self::Ios(_) => PlatformFamily::Ios,
            Self::TvOs(_) => PlatformFamily::TvOs,
            Self::WatchOs(_) => PlatformFamily::WatchOs,
            Self::VisionOs(_) => PlatformFamily::VisionOs,
            Self::Linux(_) => PlatformFamily::Linux,
        }
    }

    const fn major(&self) -> u32 {
        match *self {
            Self::MacOs { major, .. } => major,
            Self::Ios(v) | Self::TvOs(v) | Self::WatchOs(v) | Self::VisionOs(v) | Self::Linux(v) => {
                v
            }
        }
    }

    const fn minor(&self) -> Option<u32> {
        match *self {
            Self::MacOs { minor, .. } => minor,
            _ => None,
        }
    }

    /// Whether `self` is a strictly higher floor than `other`.
    ///
    /// Majors are compared first. At equal majors an explicit minor beats an
    /// absent one, and two explicit minors compare numerically.
    fn supersedes(&self, other: &Platform) -> bool {
        if self.major() != other.major() {
            return self.major() > other.major();
        }
        match (self.minor(), other.minor()) {
            (Some(a), Some(b)) => a > b,
            (Some(_), None) => true,
            _ => false,
        }
    }

    /// Textual version specifier used in rendered manifests.
    ///
    /// Linux has no deployment floor in a package manifest and renders as
    /// `None`. macOS floors below 11 only exist with a minor, so they use
    /// the string form.
    pub fn render(&self) -> Option<String> {
        match *self {
            Self::Linux(_) => None,
            Self::MacOs {
                major,
                minor: Some(minor),
            } => Some(format!(".macOS(\"{major}.{minor}\")")),
            Self::MacOs { major, minor: None } if major < 11 => {
                Some(format!(".macOS(\"{major}.0\")"))
            }
            other => Some(format!(".{}(.v{})", other.family(), other.major())),
        }
    }

    /// Keep the highest version per family, in fixed family order.
    ///
    /// The result does not depend on the order of `platforms`.
    pub fn deduplicate<'a>(platforms: impl IntoIterator<Item = &'a Platform>) -> Vec<Platform> {
        let mut best: BTreeMap<PlatformFamily, Platform> = BTreeMap::new();
        for platform in platforms {
            best.entry(platform.family())
                .and_modify(|current| {
                    if platform.supersedes(current) {
                        *current = *platform;
                    }
                })
                .or_insert(*platform);
        }
        best.into_values().collect()
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MacOs {
                major,
                minor: Some(minor),
            } => write!(f, "macOS {major}.{minor}"),
            other => write!(f, "{} {}", other.family(), other.major()),
        }
    }
}

impl FromStr for Platform {
    type Err = DomainError;

    /// Parse `"iOS 17"`, `"macOS 14"` or `"macOS 15.2"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| DomainError::InvalidPlatform(format!("'{s}': {reason}"));

        let mut parts = s.split_whitespace();
        let (Some(family), Some(version), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(invalid("expected '<family> <version>'"));
        };

        let (major, minor) = match version.split_once('.') {
            Some((major, minor)) => (major, Some(minor)),
            None => (version, None),
        };
        let major: u32 = major.parse().map_err(|_| invalid("major version is not a number"))?;
        let minor: Option<u32> = minor
            .map(|m| m.parse().map_err(|_| invalid("minor version is not a number")))
            .transpose()?;

        let platform = match family.to_ascii_lowercase().as_str() {
            "macos" => return Ok(Self::MacOs { major, minor }),
            "ios" => Self::Ios(major),
            "tvos" => Self::TvOs(major),
            "watchos" => Self::WatchOs(major),
            "visionos" => Self::VisionOs(major),
            "linux" => Self::Linux(major),
            _ => return Err(invalid("unknown platform family")),
        };

        if minor.is_some() {
            return Err(invalid("only macOS carries a minor version"));
        }
        Ok(platform)
    }
}

impl TryFrom<String> for Platform {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Platform> for String {
    fn from(platform: Platform) -> Self {
        platform.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_minor_beats_absent_minor() {
        let deduped = Platform::deduplicate(&[Platform::macos(15), Platform::macos_minor(15, 2)]);
        assert_eq!(deduped, vec![Platform::macos_minor(15, 2)]);

        let reversed = Platform::deduplicate(&[Platform::macos_minor(15, 2), Platform::macos(15)]);
        assert_eq!(reversed, vec![Platform::macos_minor(15, 2)]);
    }

    #[test]
    fn higher_major_wins_over_minor() {
        let deduped = Platform::deduplicate(&[Platform::macos_minor(14, 9), Platform::macos(15)]);
        assert_eq!(deduped, vec![Platform::macos(15)]);
    }

    #[test]
    fn higher_explicit_minor_wins() {
        let deduped =
            Platform::deduplicate(&[Platform::macos_minor(15, 4), Platform::macos_minor(15, 1)]);
        assert_eq!(deduped, vec![Platform::macos_minor(15, 4)]);
    }

    #[test]
    fn output_order_is_fixed_by_family() {
        let input = [
            Platform::Linux(5),
            Platform::VisionOs(1),
            Platform::Ios(16),
            Platform::macos(13),
            Platform::WatchOs(9),
            Platform::TvOs(16),
            Platform::Ios(17),
        ];
        let deduped = Platform::deduplicate(&input);
        let families: Vec<_> = deduped.iter().map(Platform::family).collect();
        assert_eq!(
            families,
            vec![
                PlatformFamily::MacOs,
                PlatformFamily::Ios,
                PlatformFamily::TvOs,
                PlatformFamily::WatchOs,
                PlatformFamily::VisionOs,
                PlatformFamily::Linux,
            ]
        );
        assert!(deduped.contains(&Platform::Ios(17)));
    }

    #[test]
    fn deduplicate_is_idempotent() {
        let input = [
            Platform::Ios(15),
            Platform::macos(12),
            Platform::Ios(17),
            Platform::macos_minor(12, 3),
            Platform::TvOs(15),
        ];
        let once = Platform::deduplicate(&input);
        let twice = Platform::deduplicate(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn absent_families_are_omitted() {
        assert!(Platform::deduplicate(&[]).is_empty());
        assert_eq!(
            Platform::deduplicate(&[Platform::Ios(17)]),
            vec![Platform::Ios(17)]
        );
    }

    #[test]
    fn render_specifiers() {
        assert_eq!(Platform::macos(14).render().unwrap(), ".macOS(.v14)");
        assert_eq!(Platform::macos_minor(15, 2).render().unwrap(), ".macOS(\"15.2\")");
        assert_eq!(Platform::Ios(17).render().unwrap(), ".iOS(.v17)");
        assert_eq!(Platform::VisionOs(1).render().unwrap(), ".visionOS(.v1)");
    }

    #[test]
    fn old_macos_and_linux_specifiers() {
        assert_eq!(Platform::macos(10).render().unwrap(), ".macOS(\"10.0\")");
        assert_eq!(Platform::macos_minor(10, 15).render().unwrap(), ".macOS(\"10.15\")");
        assert_eq!(Platform::macos(11).render().unwrap(), ".macOS(.v11)");
        assert_eq!(Platform::Linux(5).render(), None);
    }

    #[test]
    fn parses_platform_strings() {
        assert_eq!("iOS 17".parse::<Platform>().unwrap(), Platform::Ios(17));
        assert_eq!(
            "macOS 15.2".parse::<Platform>().unwrap(),
            Platform::macos_minor(15, 2)
        );
        assert_eq!("MACOS 14".parse::<Platform>().unwrap(), Platform::macos(14));
        assert!("iOS 17.1".parse::<Platform>().is_err());
        assert!("android 14".parse::<Platform>().is_err());
        assert!("iOS".parse::<Platform>().is_err());
    }

    #[test]
    fn display_round_trips() {
        for p in [Platform::macos_minor(10, 15), Platform::WatchOs(10)] {
            assert_eq!(p.to_string().parse::<Platform>().unwrap(), p);
        }
    }
}
