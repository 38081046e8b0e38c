//! Host platform classification and icon selection.
//!
//! Resolved once at startup and immutable for the run. The only reason
//! the classification exists is icon choice: mingw terminals get ASCII
//! glyphs, everything else gets emoji.

use std::env;
use std::fs;

/// Override variable; a recognized value wins over auto-detection, an
/// unrecognized one falls back to it.
pub const PLATFORM_ENV: &str = "CC_PROMPTLINE_PLATFORM";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Linux,
    Wsl,
    Mingw,
    Unknown,
}

/// One glyph per segment. Two fixed sets, selected by platform.
pub struct Icons {
    pub model: &'static str,
    pub context: &'static str,
    pub directory: &'static str,
    pub branch: &'static str,
    pub cost: &'static str,
    pub diff: &'static str,
}

pub static EMOJI_ICONS: Icons = Icons {
    model: "\u{1f916}",     // robot
    context: "\u{1f9e0}",   // brain
    directory: "\u{1f4c1}", // folder
    branch: "\u{1f33f}",    // herb
    cost: "\u{1f4b0}",      // money bag
    diff: "\u{1f4dd}",      // memo
};

pub static ASCII_ICONS: Icons = Icons {
    model: ">",
    context: "[",
    directory: "@",
    branch: "*",
    cost: "$",
    diff: "~",
};

impl Platform {
    /// Resolve the platform for this run: override variable first, then
    /// `$OSTYPE` the way a shell would spell it, then a kernel-name probe.
    pub fn detect() -> Self {
        if let Ok(value) = env::var(PLATFORM_ENV)
            && let Some(platform) = Self::from_override(&value)
        {
            return platform;
        }

        let wsl = is_wsl_kernel();
        if let Ok(ostype) = env::var("OSTYPE")
            && let Some(platform) = Self::classify(&ostype, wsl)
        {
            return platform;
        }

        Self::classify(&kernel_name(), wsl).unwrap_or(Self::Unknown)
    }

    pub fn from_override(value: &str) -> Option<Self> {
        match value {
            "macos" => Some(Self::MacOs),
            "linux" => Some(Self::Linux),
            "wsl" => Some(Self::Wsl),
            "mingw" => Some(Self::Mingw),
            "unknown" => Some(Self::Unknown),
            _ => None,
        }
    }

    /// Classify an OS-type string by prefix. `wsl` carries the result of
    /// the kernel-version check, which only matters for linux hosts.
    pub fn classify(os: &str, wsl: bool) -> Option<Self> {
        let os = os.to_ascii_lowercase();
        if os.starts_with("darwin") {
            Some(Self::MacOs)
        } else if os.starts_with("linux") {
            Some(if wsl { Self::Wsl } else { Self::Linux })
        } else if os.starts_with("msys") || os.starts_with("mingw") || os.starts_with("cygwin") {
            Some(Self::Mingw)
        } else {
            None
        }
    }

    pub fn icons(self) -> &'static Icons {
        match self {
            Self::Mingw => &ASCII_ICONS,
            _ => &EMOJI_ICONS,
        }
    }
}

/// WSL kernels advertise Microsoft in /proc/version.
fn is_wsl_kernel() -> bool {
    fs::read_to_string("/proc/version")
        .is_ok_and(|version| version.to_ascii_lowercase().contains("microsoft"))
}

/// Kernel name per uname(2), e.g. "Linux" or "Darwin". Empty on failure
/// so the caller lands on Unknown.
#[cfg(unix)]
fn kernel_name() -> String {
    let mut uts = std::mem::MaybeUninit::<libc::utsname>::uninit();
    if unsafe { libc::uname(uts.as_mut_ptr()) } != 0 {
        return String::new();
    }
    let uts = unsafe { uts.assume_init() };
    let sysname = unsafe { std::ffi::CStr::from_ptr(uts.sysname.as_ptr()) };
    sysname.to_string_lossy().into_owned()
}

#[cfg(not(unix))]
fn kernel_name() -> String {
    env::consts::OS.to_string()
}
