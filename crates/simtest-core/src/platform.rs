//! Platform vocabulary shared by the matcher, inspector, and orchestrator.
//!
//! Two external tools describe the same three operating systems with two
//! different string vocabularies: `simctl` runtimes say `iOS`/`tvOS`/`watchOS`
//! while `dyld_info` says `iOS-sim`/`tvOS-sim`/`watchOS-sim`. Each vocabulary
//! gets its own type so each external contract stays isolated; [`LibPlatform::os`]
//! is the total mapping between them.

/// CPU architecture of the host, fixed at compile time.
#[cfg(target_arch = "x86_64")]
pub const HOST_ARCH: &str = "x86_64";
/// CPU architecture of the host, fixed at compile time.
#[cfg(not(target_arch = "x86_64"))]
pub const HOST_ARCH: &str = "arm64";

/// The three simulated operating system families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    Iphone,
    Watch,
    Tv,
}

impl Os {
    /// The short tag used in user-facing messages and harness arguments.
    pub fn tag(self) -> &'static str {
        match self {
            Os::Iphone => "iphone",
            Os::Watch => "watch",
            Os::Tv => "tv",
        }
    }

    /// The SDK-style tag passed to the test harness (`OS=` argument).
    pub fn simulator_tag(self) -> &'static str {
        match self {
            Os::Iphone => "iphonesimulator",
            Os::Watch => "watchsimulator",
            Os::Tv => "tvsimulator",
        }
    }

    /// Map a `simctl` runtime platform string onto an [`Os`].
    ///
    /// Returns `None` for unrecognized strings; callers treat that as fatal
    /// with context about which runtime was being examined.
    pub fn from_runtime_platform(platform: &str) -> Option<Os> {
        match platform {
            "iOS" => Some(Os::Iphone),
            "tvOS" => Some(Os::Tv),
            "watchOS" => Some(Os::Watch),
            _ => None,
        }
    }
}

/// Platform tags in the `dyld_info` output vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LibPlatform {
    IosSim,
    TvosSim,
    WatchosSim,
}

impl LibPlatform {
    /// Parse a platform token from `dyld_info -platform` output.
    pub fn parse(tag: &str) -> Option<LibPlatform> {
        match tag {
            "iOS-sim" => Some(LibPlatform::IosSim),
            "tvOS-sim" => Some(LibPlatform::TvosSim),
            "watchOS-sim" => Some(LibPlatform::WatchosSim),
            _ => None,
        }
    }

    /// The [`Os`] family this simulator platform runs.
    pub fn os(self) -> Os {
        match self {
            LibPlatform::IosSim => Os::Iphone,
            LibPlatform::TvosSim => Os::Tv,
            LibPlatform::WatchosSim => Os::Watch,
        }
    }
}
