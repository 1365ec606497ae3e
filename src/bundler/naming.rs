//! Channel and grid naming policy.
//!
//! Derives the names and runtime flags that depend on which channel and grid
//! a build targets. The flags string is embedded verbatim into a file the
//! viewer reads at startup, so its exact spacing is part of the contract.

use crate::bundler::{
    error::{Error, Result},
    settings::{BuildContext, ProductConfig, Settings},
};

/// Naming policy over an immutable build context.
#[derive(Clone, Copy, Debug)]
pub struct NamingPolicy<'a> {
    context: &'a BuildContext,
    product: &'a ProductConfig,
}

impl<'a> NamingPolicy<'a> {
    /// Creates a policy over an explicit context and product.
    pub fn new(context: &'a BuildContext, product: &'a ProductConfig) -> Self {
        Self { context, product }
    }

    /// Creates a policy for a run's settings.
    pub fn for_settings(settings: &'a Settings) -> Self {
        Self::new(settings.context(), settings.product())
    }

    /// Product constants this policy names against.
    pub fn product(&self) -> &'a ProductConfig {
        self.product
    }

    /// The build channel.
    pub fn channel(&self) -> Result<&'a str> {
        self.context
            .channel
            .as_deref()
            .ok_or_else(|| Error::Config("channel is required".into()))
    }

    /// The target grid.
    pub fn grid(&self) -> Result<&'a str> {
        self.context
            .grid
            .as_deref()
            .ok_or_else(|| Error::Config("grid is required".into()))
    }

    /// Channel reported at login only; `None` unless explicitly configured.
    pub fn login_channel(&self) -> Option<&'a str> {
        self.context.login_channel.as_deref()
    }

    /// True iff the channel is the canonical release channel.
    pub fn default_channel(&self) -> Result<bool> {
        Ok(self.channel()? == self.product.default_channel)
    }

    /// True iff the grid is the canonical production grid.
    pub fn default_grid(&self) -> Result<bool> {
        Ok(self.grid()? == self.product.default_grid)
    }

    /// Channel with the brand token removed, trimmed.
    pub fn channel_unique(&self) -> Result<String> {
        Ok(self
            .channel()?
            .replace(&self.product.brand_token, "")
            .trim()
            .to_string())
    }

    /// [`channel_unique`](Self::channel_unique) with all whitespace removed.
    pub fn channel_oneword(&self) -> Result<String> {
        Ok(strip_whitespace(&self.channel_unique()?))
    }

    /// [`channel_oneword`](Self::channel_oneword) in lowercase.
    pub fn channel_lowerword(&self) -> Result<String> {
        Ok(self.channel_oneword()?.to_lowercase())
    }

    /// Explicit installer file name, if the caller supplied one.
    pub fn installer_name(&self) -> Option<&'a str> {
        self.context.installer_name.as_deref()
    }

    /// Command-line flags the viewer must start with for this channel/grid.
    ///
    /// Fragments are joined in the order channel, grid, settings with single
    /// spaces and only the ends are trimmed, so an empty middle fragment
    /// leaves a double space.
    pub fn flags_list(&self) -> Result<String> {
        let grid = self.grid()?;
        let channel = self.channel()?;
        let default_grid = self.default_grid()?;
        let default_channel = self.default_channel()?;

        let grid_flags = if default_grid {
            String::new()
        } else {
            format!(
                "--grid {grid} --helperuri {}",
                self.product.helper_uri(grid)
            )
        };

        let channel_flags = match self.login_channel() {
            Some(login) if login != channel => format!("--channel \"{login}\""),
            _ if !default_channel => format!("--channel \"{channel}\""),
            _ => String::new(),
        };

        let setting_flags = if default_channel && default_grid {
            String::new()
        } else if default_grid {
            format!("--settings settings_{}.xml", self.channel_lowerword()?)
        } else {
            format!(
                "--settings settings_{grid}_{}.xml",
                self.channel_lowerword()?
            )
        };

        Ok([channel_flags, grid_flags, setting_flags]
            .join(" ")
            .trim()
            .to_string())
    }

    /// Release kind, selected solely by channel/grid default-ness.
    pub fn release_kind(&self) -> Result<ReleaseKind> {
        Ok(match (self.default_channel()?, self.default_grid()?) {
            (true, true) => ReleaseKind::Release,
            (true, false) => ReleaseKind::BetaGrid,
            (false, _) => ReleaseKind::CustomChannel,
        })
    }

    /// Suffix appended to image and archive names: `_<GRID>` for beta-grid
    /// builds, `_<ONEWORD>` for custom channels, nothing for releases.
    pub fn artifact_suffix(&self) -> Result<String> {
        Ok(match self.release_kind()? {
            ReleaseKind::Release => String::new(),
            ReleaseKind::BetaGrid => format!("_{}", self.grid()?.to_uppercase()),
            ReleaseKind::CustomChannel => format!("_{}", self.channel_oneword()?.to_uppercase()),
        })
    }
}

/// The three naming regimes every platform distinguishes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ReleaseKind {
    /// Default channel on the default grid.
    Release,
    /// Default channel on another grid.
    BetaGrid,
    /// Any other channel, on any grid.
    CustomChannel,
}

/// Removes every whitespace character.
pub(crate) fn strip_whitespace(value: &str) -> String {
    value.split_whitespace().collect()
}
