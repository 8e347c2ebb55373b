//! Controller configuration.
//!
//! Defaults reproduce the stock page: the selectors it ships with, a 900px
//! hover threshold and smooth, centered banner scrolling. Everything can be
//! overridden from TOML:
//!
//! ```toml
//! style_mode = "inline-style"
//! hover_min_viewport_width = 1024
//!
//! [selectors]
//! cards = ".card"
//!
//! [scroll]
//! behavior = "instant"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::*;

/// How visual states are written onto elements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StyleMode {
    /// Add and remove a marker class; the stylesheet owns the look.
    #[default]
    ClassToggle,
    /// Write `transform` / `box-shadow` declarations into the style attribute.
    InlineStyle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SelectorConfig {
    pub error_banner: String,
    pub cards: String,
    pub buttons: String,
    pub inputs: String,
    /// Element id, without the leading `#`.
    pub mobile_nav_id: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            error_banner: ".alert-danger".into(),
            cards: ".glassCard, .heroCard".into(),
            buttons: "button".into(),
            inputs: "input, select, textarea".into(),
            mobile_nav_id: "mobileNav".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassNames {
    pub lifted: String,
    pub pressed: String,
    pub focused: String,
    pub open: String,
}

impl Default for ClassNames {
    fn default() -> Self {
        Self {
            lifted: "is-lifted".into(),
            pressed: "is-pressed".into(),
            focused: "is-focused".into(),
            open: "open".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InlineStyles {
    pub card_transition: String,
    pub card_lifted: String,
    pub card_resting: String,
    pub button_pressed: String,
    pub button_released: String,
    pub input_focused: String,
    pub input_blurred: String,
}

impl Default for InlineStyles {
    fn default() -> Self {
        Self {
            card_transition: "transform 0.2s ease".into(),
            card_lifted: "translateY(-4px)".into(),
            card_resting: "translateY(0)".into(),
            button_pressed: "scale(0.97)".into(),
            button_released: "scale(1)".into(),
            input_focused: "0 0 0 2px rgba(37,99,235,0.25)".into(),
            input_blurred: "none".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InteractionConfig {
    pub style_mode: StyleMode,
    /// Card hover emphasis needs a viewport strictly wider than this.
    pub hover_min_viewport_width: u32,
    pub global_toggle_name: String,
    pub selectors: SelectorConfig,
    pub classes: ClassNames,
    pub inline: InlineStyles,
    pub scroll: ScrollIntoViewOptions,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            style_mode: StyleMode::default(),
            hover_min_viewport_width: 900,
            global_toggle_name: "toggleMobileNav".into(),
            selectors: SelectorConfig::default(),
            classes: ClassNames::default(),
            inline: InlineStyles::default(),
            scroll: ScrollIntoViewOptions::default(),
        }
    }
}

impl InteractionConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(source).map_err(|err| Error::Config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)
            .map_err(|err| Error::Config(format!("{}: {err}", path.display())))?;
        Self::from_toml_str(&source)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|err| Error::Config(err.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        for (field, selector) in [
            ("selectors.error_banner", &self.selectors.error_banner),
            ("selectors.cards", &self.selectors.cards),
            ("selectors.buttons", &self.selectors.buttons),
            ("selectors.inputs", &self.selectors.inputs),
        ] {
            SelectorList::parse(selector)
                .map_err(|err| Error::Config(format!("{field}: {err}")))?;
        }

        for (field, token) in [
            ("selectors.mobile_nav_id", &self.selectors.mobile_nav_id),
            ("classes.lifted", &self.classes.lifted),
            ("classes.pressed", &self.classes.pressed),
            ("classes.focused", &self.classes.focused),
            ("classes.open", &self.classes.open),
        ] {
            if token.is_empty() || token.chars().any(char::is_whitespace) {
                return Err(Error::Config(format!(
                    "{field} must be a single non-empty token, got {token:?}"
                )));
            }
        }

        if !is_identifier(&self.global_toggle_name) {
            return Err(Error::Config(format!(
                "global_toggle_name must be an identifier, got {:?}",
                self.global_toggle_name
            )));
        }
        Ok(())
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
