//! CPU architecture types and utilities.

/// CPU architecture of the packaged viewer.
///
/// Used for Linux archive naming; macOS builds ship a universal bundle and
/// Windows builds are 32-bit.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Arch {
    /// x86 / i686 (32-bit)
    X86,
    /// x86_64 / AMD64 (64-bit)
    X86_64,
    /// macOS universal binary
    Universal,
}

impl Arch {
    /// Tag used in archive names (e.g. `i686`, `x86_64`).
    pub fn tag(&self) -> &'static str {
        match self {
            Arch::X86 => "i686",
            Arch::X86_64 => "x86_64",
            Arch::Universal => "universal",
        }
    }

    /// Parses an architecture tag as accepted on the command line.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "i686" | "i386" | "x86" => Some(Arch::X86),
            "x86_64" | "amd64" | "x64" => Some(Arch::X86_64),
            "universal" => Some(Arch::Universal),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!(Arch::parse("i386"), Some(Arch::X86));
        assert_eq!(Arch::parse("AMD64"), Some(Arch::X86_64));
        assert_eq!(Arch::parse("sparc"), None);
        assert_eq!(Arch::X86.tag(), "i686");
    }
}
