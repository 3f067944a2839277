use twilight_model::{channel::message::embed::Embed, util::Timestamp};
use twilight_util::builder::embed::{
    EmbedAuthorBuilder, EmbedBuilder, EmbedFieldBuilder, EmbedFooterBuilder,
};

use crate::error::PaginateError;
use crate::pagination::budget::{Budgets, CONTINUATION_SUFFIX, continuation_of, text_len};
use crate::time::now_timestamp;

/// Default embed color used across the bot UI.
pub const DEFAULT_EMBED_COLOR: u32 = 0x90_54_30;

/// Longest title the rendering surface accepts.
pub const TITLE_LIMIT: usize = 256;
/// Longest author name the rendering surface accepts.
pub const AUTHOR_NAME_LIMIT: usize = 256;
/// Longest footer text the rendering surface accepts.
pub const FOOTER_TEXT_LIMIT: usize = 2048;

const MAX_COLOR: u32 = 0xFF_FF_FF;

/// Decorative parts shared by every unit a paginator produces.
///
/// Immutable once built. Each produced unit receives its own copy, so units
/// already handed out never change when the template is reused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitTemplate {
    title: Option<String>,
    author_name: Option<String>,
    footer_text: Option<String>,
    base_description: Option<String>,
    color: u32,
    timestamp: Option<Timestamp>,
}

impl Default for UnitTemplate {
    fn default() -> Self {
        Self {
            title: None,
            author_name: None,
            footer_text: None,
            base_description: None,
            color: DEFAULT_EMBED_COLOR,
            timestamp: None,
        }
    }
}

impl UnitTemplate {
    /// Start a template with the bot's default color and the current time.
    pub fn builder() -> UnitTemplateBuilder {
        UnitTemplateBuilder(Self {
            timestamp: now_timestamp(),
            ..Self::default()
        })
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn author_name(&self) -> Option<&str> {
        self.author_name.as_deref()
    }

    pub fn footer_text(&self) -> Option<&str> {
        self.footer_text.as_deref()
    }

    pub fn base_description(&self) -> Option<&str> {
        self.base_description.as_deref()
    }

    pub fn color(&self) -> u32 {
        self.color
    }

    pub fn timestamp(&self) -> Option<Timestamp> {
        self.timestamp
    }

    /// Length of title, author name, base description and footer combined.
    pub fn decoration_len(&self) -> usize {
        [
            &self.title,
            &self.author_name,
            &self.base_description,
            &self.footer_text,
        ]
        .into_iter()
        .flatten()
        .map(|text| text_len(text))
        .sum()
    }

    /// Check the template can seed description-mode units under `budgets`.
    pub fn validate_for_description(&self, budgets: &Budgets) -> Result<(), PaginateError> {
        self.validate_decorations()?;

        let base_len = self.base_description.as_deref().map_or(0, text_len);
        if base_len >= budgets.description {
            return Err(PaginateError::template(format!(
                "base description is {base_len} characters, leaving no room under the \
                 description budget of {}",
                budgets.description
            )));
        }

        Ok(())
    }

    /// Check the template can seed field-mode units under `budgets`.
    pub fn validate_for_fields(&self, budgets: &Budgets) -> Result<(), PaginateError> {
        self.validate_decorations()?;

        // Continuation units carry the longer title.
        let suffix_len = if self.title.is_some() {
            text_len(CONTINUATION_SUFFIX)
        } else {
            0
        };
        let seed = self.decoration_len() + suffix_len;
        if seed >= budgets.field_unit {
            return Err(PaginateError::template(format!(
                "decorations take {seed} characters, leaving no room under the field unit \
                 budget of {}",
                budgets.field_unit
            )));
        }

        Ok(())
    }

    fn validate_decorations(&self) -> Result<(), PaginateError> {
        if self.color > MAX_COLOR {
            return Err(PaginateError::template(format!(
                "color {:#x} does not fit in 24 bits",
                self.color
            )));
        }

        if let Some(title) = &self.title {
            let longest = text_len(title) + text_len(CONTINUATION_SUFFIX);
            if longest > TITLE_LIMIT {
                return Err(PaginateError::template(format!(
                    "title must leave room for the continuation suffix within {TITLE_LIMIT} \
                     characters"
                )));
            }
        }

        if let Some(name) = &self.author_name
            && text_len(name) > AUTHOR_NAME_LIMIT
        {
            return Err(PaginateError::template(format!(
                "author name exceeds {AUTHOR_NAME_LIMIT} characters"
            )));
        }

        if let Some(footer) = &self.footer_text
            && text_len(footer) > FOOTER_TEXT_LIMIT
        {
            return Err(PaginateError::template(format!(
                "footer text exceeds {FOOTER_TEXT_LIMIT} characters"
            )));
        }

        Ok(())
    }

    /// Copy the template into a fresh, empty unit.
    ///
    /// Units after the first get the continuation suffix on their title.
    pub(crate) fn open_unit(&self, continuation: bool) -> DisplayUnit {
        let title = match &self.title {
            Some(title) if continuation => Some(continuation_of(title)),
            other => other.clone(),
        };

        DisplayUnit {
            title,
            author_name: self.author_name.clone(),
            description: self.base_description.clone(),
            footer_text: self.footer_text.clone(),
            fields: Vec::new(),
            color: self.color,
            timestamp: self.timestamp,
            oversized: false,
        }
    }
}

/// Builder for [`UnitTemplate`].
#[derive(Debug, Clone)]
#[must_use = "builders have no effect until built"]
pub struct UnitTemplateBuilder(UnitTemplate);

impl UnitTemplateBuilder {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.0.title = Some(title.into());
        self
    }

    pub fn author_name(mut self, name: impl Into<String>) -> Self {
        self.0.author_name = Some(name.into());
        self
    }

    pub fn footer_text(mut self, text: impl Into<String>) -> Self {
        self.0.footer_text = Some(text.into());
        self
    }

    /// Text placed ahead of the paginated lines in every unit's description.
    pub fn base_description(mut self, text: impl Into<String>) -> Self {
        self.0.base_description = Some(text.into());
        self
    }

    pub fn color(mut self, color: u32) -> Self {
        self.0.color = color;
        self
    }

    pub fn timestamp(mut self, timestamp: Timestamp) -> Self {
        self.0.timestamp = Some(timestamp);
        self
    }

    pub fn no_timestamp(mut self) -> Self {
        self.0.timestamp = None;
        self
    }

    pub fn build(self) -> UnitTemplate {
        self.0
    }
}

/// One named block of text inside a unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// A single deliverable message produced by a paginator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayUnit {
    pub title: Option<String>,
    pub author_name: Option<String>,
    pub description: Option<String>,
    pub footer_text: Option<String>,
    pub fields: Vec<UnitField>,
    pub color: u32,
    pub timestamp: Option<Timestamp>,
    /// Set when an overlong line pushed this unit past a nominal budget.
    pub oversized: bool,
}

impl DisplayUnit {
    /// Title, author name, description and footer lengths combined.
    pub fn aggregate_len(&self) -> usize {
        [
            &self.title,
            &self.author_name,
            &self.description,
            &self.footer_text,
        ]
        .into_iter()
        .flatten()
        .map(|text| text_len(text))
        .sum()
    }

    /// Field names and values combined.
    pub fn fields_len(&self) -> usize {
        self.fields
            .iter()
            .map(|field| text_len(&field.name) + text_len(&field.value))
            .sum()
    }

    /// Every piece of text the unit renders.
    pub fn total_len(&self) -> usize {
        self.aggregate_len() + self.fields_len()
    }

    /// Convert into a platform embed ready for the transport layer.
    ///
    /// Empty descriptions are left unset.
    pub fn to_embed(&self) -> Embed {
        let mut builder = EmbedBuilder::new().color(self.color);

        if let Some(title) = &self.title {
            builder = builder.title(title.as_str());
        }

        if let Some(name) = &self.author_name {
            builder = builder.author(EmbedAuthorBuilder::new(name.as_str()).build());
        }

        if let Some(description) = self.description.as_deref().filter(|text| !text.is_empty()) {
            builder = builder.description(description);
        }

        for field in &self.fields {
            let field_builder = EmbedFieldBuilder::new(field.name.as_str(), field.value.as_str());
            let field_builder = if field.inline {
                field_builder.inline()
            } else {
                field_builder
            };
            builder = builder.field(field_builder.build());
        }

        if let Some(text) = &self.footer_text {
            builder = builder.footer(EmbedFooterBuilder::new(text.as_str()).build());
        }

        if let Some(timestamp) = self.timestamp {
            builder = builder.timestamp(timestamp);
        }

        builder.build()
    }
}
