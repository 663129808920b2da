//! Platform and architecture selectors for toolchain downloads.
//!
//! Both are validated before any registry read or network call. Windows is
//! rejected with its own message since upstream ships it as a `.zip`.

use std::fmt;
use std::str::FromStr;
use crate::error::VgoError;

pub const DEFAULT_PLATFORM: &str = "darwin";
pub const DEFAULT_ARCH: &str = "arm64";

/// Operating system component of a download.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Darwin,
    Linux,
    FreeBsd,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Darwin, Platform::Linux, Platform::FreeBsd];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Darwin => "darwin",
            Self::Linux => "linux",
            Self::FreeBsd => "freebsd",
        }
    }

    /// Names of every supported platform, in declaration order.
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|p| p.as_str()).collect()
    }
}

impl FromStr for Platform {
    type Err = VgoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "windows" {
            return Err(VgoError::unsupported_target("unsupported platform: windows"));
        }
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| {
                VgoError::unsupported_target(format!(
                    "unsupported platform {s}, supported platforms are {}",
                    Self::names().join(", ")
                ))
            })
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CPU architecture component of a download.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arch {
    Amd64,
    Arm64,
    I386,
    Armv6l,
    Ppc64le,
    S390x,
}

impl Arch {
    pub const ALL: [Arch; 6] = [
        Arch::Amd64,
        Arch::Arm64,
        Arch::I386,
        Arch::Armv6l,
        Arch::Ppc64le,
        Arch::S390x,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Amd64 => "amd64",
            Self::Arm64 => "arm64",
            Self::I386 => "386",
            Self::Armv6l => "armv6l",
            Self::Ppc64le => "ppc64le",
            Self::S390x => "s390x",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|a| a.as_str()).collect()
    }
}

impl FromStr for Arch {
    type Err = VgoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| {
                VgoError::unsupported_target(format!(
                    "unsupported arch {s}, supported archs are {}",
                    Self::names().join(", ")
                ))
            })
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated (platform, arch) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Target {
    pub platform: Platform,
    pub arch: Arch,
}

impl Target {
    /// Validates both strings. The platform is checked first so that
    /// `windows` is always reported as such, whatever the arch.
    pub fn parse(platform: &str, arch: &str) -> Result<Self, VgoError> {
        Ok(Self {
            platform: platform.parse()?,
            arch: arch.parse()?,
        })
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.platform, self.arch)
    }
}
