//! Installer templates with typed placeholder substitution.
//!
//! Templates use `{{token}}` placeholders. The set of placeholders a template
//! declares is checked against a [`Substitutions`] map before anything is
//! rendered: a placeholder that is not a known [`Token`], or a known token
//! with no value, fails the run up front.

use crate::bundler::error::{Error, Result};
use handlebars::Handlebars;
use regex::Regex;
use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
    path::Path,
    sync::LazyLock,
};

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z0-9_]+)\s*\}\}").expect("placeholder pattern is valid")
});

/// Every substitution token an installer template may reference.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Token {
    /// Dotted full version.
    Version,
    /// Dotted version without the build number.
    VersionShort,
    /// Dashed full version.
    VersionDashes,
    /// Installed executable name.
    FinalExe,
    /// Grid name.
    Grid,
    /// Grid name in uppercase.
    GridCaps,
    /// Runtime flags, escaped for the script language.
    Flags,
    /// Channel name.
    Channel,
    /// Channel without brand and whitespace.
    ChannelOneword,
    /// Channel without brand.
    ChannelUnique,
    /// Installer output file name.
    InstallerFile,
    /// Source root the script compiler resolves relative paths against.
    Source,
    /// Rendered version definitions block.
    VersionVars,
    /// Rendered per-release-kind definitions block.
    GridVars,
    /// File install commands.
    InstallFiles,
    /// File delete commands.
    DeleteFiles,
}

impl Token {
    /// All tokens, in declaration order.
    pub const ALL: [Token; 16] = [
        Token::Version,
        Token::VersionShort,
        Token::VersionDashes,
        Token::FinalExe,
        Token::Grid,
        Token::GridCaps,
        Token::Flags,
        Token::Channel,
        Token::ChannelOneword,
        Token::ChannelUnique,
        Token::InstallerFile,
        Token::Source,
        Token::VersionVars,
        Token::GridVars,
        Token::InstallFiles,
        Token::DeleteFiles,
    ];

    /// Placeholder name as written in templates.
    pub fn name(&self) -> &'static str {
        match self {
            Token::Version => "version",
            Token::VersionShort => "version_short",
            Token::VersionDashes => "version_dashes",
            Token::FinalExe => "final_exe",
            Token::Grid => "grid",
            Token::GridCaps => "grid_caps",
            Token::Flags => "flags",
            Token::Channel => "channel",
            Token::ChannelOneword => "channel_oneword",
            Token::ChannelUnique => "channel_unique",
            Token::InstallerFile => "installer_file",
            Token::Source => "source",
            Token::VersionVars => "version_vars",
            Token::GridVars => "grid_vars",
            Token::InstallFiles => "install_files",
            Token::DeleteFiles => "delete_files",
        }
    }

    /// Looks up a token by placeholder name.
    pub fn from_name(name: &str) -> Option<Self> {
        Token::ALL.into_iter().find(|t| t.name() == name)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Values for template tokens.
#[derive(Clone, Debug, Default)]
pub struct Substitutions {
    values: BTreeMap<Token, String>,
}

impl Substitutions {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a token's value, replacing any previous one.
    pub fn set(&mut self, token: Token, value: impl Into<String>) -> &mut Self {
        self.values.insert(token, value.into());
        self
    }

    /// Returns a token's value.
    pub fn get(&self, token: Token) -> Option<&str> {
        self.values.get(&token).map(String::as_str)
    }
}

/// A parsed installer template.
#[derive(Clone, Debug)]
pub struct InstallerTemplate {
    name: String,
    text: String,
    placeholders: BTreeSet<String>,
}

impl InstallerTemplate {
    /// Parses template text and records the placeholders it declares.
    pub fn parse(name: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        let placeholders = PLACEHOLDER
            .captures_iter(&text)
            .map(|c| c[1].to_string())
            .collect();
        Self {
            name: name.into(),
            text,
            placeholders,
        }
    }

    /// Reads and parses a template file.
    pub async fn load(path: &Path) -> Result<Self> {
        use crate::bundler::error::ErrorExt;

        let text = tokio::fs::read_to_string(path)
            .await
            .fs_context("reading installer template", path)?;
        Ok(Self::parse(path.display().to_string(), text))
    }

    /// Placeholder names declared by the template.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.placeholders.iter().map(String::as_str)
    }

    /// Checks that every declared placeholder is a known token with a value.
    pub fn validate(&self, substitutions: &Substitutions) -> Result<()> {
        let unknown: Vec<&str> = self
            .placeholders()
            .filter(|p| Token::from_name(p).is_none())
            .collect();
        if !unknown.is_empty() {
            return Err(Error::Template(format!(
                "{} declares unknown placeholders: {}",
                self.name,
                unknown.join(", ")
            )));
        }

        let missing: Vec<&str> = self
            .placeholders()
            .filter(|p| {
                Token::from_name(p)
                    .map(|t| substitutions.get(t).is_none())
                    .unwrap_or(false)
            })
            .collect();
        if !missing.is_empty() {
            return Err(Error::Template(format!(
                "{} has no value for placeholders: {}",
                self.name,
                missing.join(", ")
            )));
        }

        Ok(())
    }

    /// Validates, then renders the template.
    pub fn render(&self, substitutions: &Substitutions) -> Result<String> {
        self.validate(substitutions)?;

        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.set_strict_mode(true);
        handlebars.register_template_string(&self.name, &self.text)?;

        let data: BTreeMap<&str, &str> = substitutions
            .values
            .iter()
            .map(|(token, value)| (token.name(), value.as_str()))
            .collect();

        Ok(handlebars.render(&self.name, &data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_substitutes_declared_tokens() {
        let template = InstallerTemplate::parse(
            "t",
            "!define VERSION \"{{version_short}}\"\nOutFile \"{{ installer_file }}\"",
        );
        let mut subs = Substitutions::new();
        subs.set(Token::VersionShort, "1.2.3")
            .set(Token::InstallerFile, "Setup.exe")
            .set(Token::Grid, "agni");
        assert_eq!(
            template.render(&subs).unwrap(),
            "!define VERSION \"1.2.3\"\nOutFile \"Setup.exe\""
        );
    }

    #[test]
    fn test_unknown_placeholder_fails_fast() {
        let template = InstallerTemplate::parse("t", "{{version}} {{publisher}}");
        let mut subs = Substitutions::new();
        subs.set(Token::Version, "1");
        let err = template.validate(&subs).unwrap_err();
        assert!(err.to_string().contains("publisher"));
    }

    #[test]
    fn test_missing_value_fails_fast() {
        let template = InstallerTemplate::parse("t", "{{version}} {{channel}}");
        let mut subs = Substitutions::new();
        subs.set(Token::Version, "1");
        let err = template.render(&subs).unwrap_err();
        assert!(matches!(err, Error::Template(msg) if msg.contains("channel")));
    }

    #[test]
    fn test_values_are_not_escaped() {
        let template = InstallerTemplate::parse("t", "!define INSTFLAGS \"{{flags}}\"");
        let mut subs = Substitutions::new();
        subs.set(Token::Flags, "--channel $\\\"First Look$\\\" <x>");
        assert_eq!(
            template.render(&subs).unwrap(),
            "!define INSTFLAGS \"--channel $\\\"First Look$\\\" <x>\""
        );
    }

    #[test]
    fn test_token_names_round_trip() {
        for token in Token::ALL {
            assert_eq!(Token::from_name(token.name()), Some(token));
        }
    }
}
