//! Widget configuration.
//!
//! Configuration is a statically typed record, immutable after engine
//! construction. Hosts embedding the widget behind a textual surface
//! (e.g. data attributes) go through [`WidgetConfig::from_pairs`],
//! which matches exhaustively over the known option keys: unknown keys
//! and malformed values fail construction, so no partial engine is
//! ever created.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::lifecycle::DEFAULT_DEBOUNCE;
use crate::normalize::{CaseMode, TagPredicate};

/// Placeholder shown when the host configures none.
pub const DEFAULT_PLACEHOLDER: &str = "Type then enter";

/// Fatal construction errors. No partial engine exists after any of
/// these; per-tag rejections are events, not errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown config option `{0}`")]
    UnknownOption(String),

    #[error("invalid value for config option `{option}`: {reason}")]
    InvalidValue { option: String, reason: String },

    #[error("presentation adapter has no stable identifier")]
    MissingIdentifier,
}

/// Style and class overrides per rendered part.
///
/// The core never interprets these; they are carried through for the
/// presentation adapter to consume.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PresentationOptions {
    pub wrapper_styles: Option<String>,
    pub wrapper_classes: Option<String>,
    pub preview_styles: Option<String>,
    pub preview_classes: Option<String>,
    pub input_styles: Option<String>,
    pub input_classes: Option<String>,
    pub error_styles: Option<String>,
    pub error_classes: Option<String>,
    pub preview_item_styles: Option<String>,
    pub preview_item_classes: Option<String>,
    pub delete_button_markup: Option<String>,
    pub delete_button_styles: Option<String>,
    pub delete_button_classes: Option<String>,
    pub autocomplete_wrapper_styles: Option<String>,
    pub autocomplete_wrapper_classes: Option<String>,
    pub autocomplete_container_styles: Option<String>,
    pub autocomplete_container_classes: Option<String>,
    pub autocomplete_item_styles: Option<String>,
    pub autocomplete_item_classes: Option<String>,
}

/// Engine configuration, read by all components.
pub struct WidgetConfig {
    /// Name under which the serialized value is submitted.
    pub name: Option<String>,
    /// Initial value as a raw CSV string; seeded through the same
    /// pipeline as pasted text.
    pub value: Option<String>,
    /// Input placeholder; [`DEFAULT_PLACEHOLDER`] when unset.
    pub placeholder: Option<String>,
    pub clear_default_styles: bool,
    /// When `false`, rejections still emit `error` events but are not
    /// rendered by the adapter.
    pub display_error: bool,
    pub item_case: CaseMode,
    /// Serialize the form value as a JSON record array instead of CSV.
    pub send_as_json: bool,
    pub autocomplete: bool,
    pub autocomplete_items: Vec<String>,
    /// External validation predicate; replaces the built-in
    /// alphanumeric-and-space check when present.
    pub tag_validation: Option<TagPredicate>,
    /// Quiet period before the typing lifecycle settles.
    pub debounce: Duration,
    pub presentation: PresentationOptions,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            name: None,
            value: None,
            placeholder: None,
            clear_default_styles: false,
            display_error: true,
            item_case: CaseMode::default(),
            send_as_json: false,
            autocomplete: false,
            autocomplete_items: Vec::new(),
            tag_validation: None,
            debounce: DEFAULT_DEBOUNCE,
            presentation: PresentationOptions::default(),
        }
    }
}

impl fmt::Debug for WidgetConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetConfig")
            .field("name", &self.name)
            .field("value", &self.value)
            .field("placeholder", &self.placeholder)
            .field("clear_default_styles", &self.clear_default_styles)
            .field("display_error", &self.display_error)
            .field("item_case", &self.item_case)
            .field("send_as_json", &self.send_as_json)
            .field("autocomplete", &self.autocomplete)
            .field("autocomplete_items", &self.autocomplete_items)
            .field("tag_validation", &self.tag_validation.as_ref().map(|_| "<fn>"))
            .field("debounce", &self.debounce)
            .field("presentation", &self.presentation)
            .finish()
    }
}

impl WidgetConfig {
    /// Build a configuration from textual key/value options.
    ///
    /// Keys use the external camelCase surface. Matching is exhaustive:
    /// an unknown key fails with [`ConfigError::UnknownOption`], a
    /// value that does not parse fails with
    /// [`ConfigError::InvalidValue`]. Function-valued options
    /// (`tagValidation`, `createWrapper`) cannot be expressed as text
    /// and are set on the struct directly instead.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Result<Self, ConfigError>
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut config = Self::default();
        for (key, value) in pairs {
            config.apply_pair(key.as_ref(), value.into())?;
        }
        Ok(config)
    }

    fn apply_pair(&mut self, key: &str, value: String) -> Result<(), ConfigError> {
        let presentation = &mut self.presentation;
        match key {
            "name" => self.name = Some(value),
            "value" => self.value = Some(value),
            "placeholder" => self.placeholder = Some(value),
            "clearDefaultStyles" => self.clear_default_styles = parse_bool(key, &value)?,
            "displayError" => self.display_error = parse_bool(key, &value)?,
            "itemCase" => self.item_case = parse_case(key, &value)?,
            "sendAsJSON" => self.send_as_json = parse_bool(key, &value)?,
            "autocomplete" => self.autocomplete = parse_bool(key, &value)?,
            "autocompleteItems" => self.autocomplete_items = parse_list(&value),
            "debounce" => self.debounce = parse_millis(key, &value)?,

            "wrapperStyles" => presentation.wrapper_styles = Some(value),
            "wrapperClasses" => presentation.wrapper_classes = Some(value),
            "previewStyles" => presentation.preview_styles = Some(value),
            "previewClasses" => presentation.preview_classes = Some(value),
            "inputStyles" => presentation.input_styles = Some(value),
            "inputClasses" => presentation.input_classes = Some(value),
            "errorStyles" => presentation.error_styles = Some(value),
            "errorClasses" => presentation.error_classes = Some(value),
            "previewItemStyles" => presentation.preview_item_styles = Some(value),
            "previewItemClasses" => presentation.preview_item_classes = Some(value),
            "deleteItemButtonInnerHTML" => presentation.delete_button_markup = Some(value),
            "deleteItemButtonStyles" => presentation.delete_button_styles = Some(value),
            "deleteItemButtonClasses" => presentation.delete_button_classes = Some(value),
            "autocompleteWrapperStyles" => {
                presentation.autocomplete_wrapper_styles = Some(value);
            }
            "autocompleteWrapperClasses" => {
                presentation.autocomplete_wrapper_classes = Some(value);
            }
            "autocompleteContainerStyles" => {
                presentation.autocomplete_container_styles = Some(value);
            }
            "autocompleteContainerClasses" => {
                presentation.autocomplete_container_classes = Some(value);
            }
            "autocompleteItemStyles" => presentation.autocomplete_item_styles = Some(value),
            "autocompleteItemClasses" => presentation.autocomplete_item_classes = Some(value),

            "tagValidation" | "createWrapper" => {
                return Err(ConfigError::InvalidValue {
                    option: key.to_string(),
                    reason: "function-valued option cannot be set from text".to_string(),
                });
            }

            unknown => return Err(ConfigError::UnknownOption(unknown.to_string())),
        }
        Ok(())
    }
}

fn parse_bool(option: &str, value: &str) -> Result<bool, ConfigError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(ConfigError::InvalidValue {
            option: option.to_string(),
            reason: format!("expected `true` or `false`, got `{other}`"),
        }),
    }
}

fn parse_case(option: &str, value: &str) -> Result<CaseMode, ConfigError> {
    match value {
        "capitalize" => Ok(CaseMode::Capitalize),
        "uppercase" => Ok(CaseMode::Uppercase),
        "lowercase" => Ok(CaseMode::Lowercase),
        other => Err(ConfigError::InvalidValue {
            option: option.to_string(),
            reason: format!("expected `capitalize`, `uppercase` or `lowercase`, got `{other}`"),
        }),
    }
}

fn parse_millis(option: &str, value: &str) -> Result<Duration, ConfigError> {
    value
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| ConfigError::InvalidValue {
            option: option.to_string(),
            reason: format!("expected a millisecond count, got `{value}`"),
        })
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
