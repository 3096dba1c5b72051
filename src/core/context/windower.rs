//! Word-bounded context windows around entity mentions.
//!
//! A window spans `radius` tokens on either side of the entity,
//! clipped to the document, and always contains every token of
//! the entity. The window is rebuilt from tokens joined by single
//! spaces, so the original line breaks and runs of whitespace are
//! not preserved.
//!
//! The entity is marked by wrapping the **first** literal
//! occurrence of its text in the window. If the same text also
//! appears earlier in the window, that earlier occurrence is the
//! one marked; use the token indices on [`ContextBlock`] for the
//! precise location.
//!
//! Reading a marked window back ([`Marker::split`]) takes the first
//! closing delimiter that follows an opening one. Stray delimiters in
//! the document text are skipped unless they form a complete pair
//! ahead of the entity.

use crate::core::context::TokenIndex;
use crate::core::error::{Result, ToponymError};
use crate::core::types::{ContextBlock, EntityMention};

/// Default number of tokens kept on each side of the entity
pub const DEFAULT_WINDOW_RADIUS: usize = 30;

pub const DEFAULT_OPEN_MARKER: &str = "<<";
pub const DEFAULT_CLOSE_MARKER: &str = ">>";

/// Delimiter pair used to mark the entity inside a window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    open: String,
    close: String,
}

impl Marker {
    /// Create a marker. Both delimiters must be non-empty.
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Result<Self> {
        let open = open.into();
        let close = close.into();

        if open.is_empty() || close.is_empty() {
            return Err(ToponymError::InvalidConfiguration(
                "Entity markers must be non-empty".to_string(),
            ));
        }

        Ok(Self { open, close })
    }

    pub fn open(&self) -> &str {
        &self.open
    }

    pub fn close(&self) -> &str {
        &self.close
    }

    /// Wrap the first occurrence of `entity` in `window`.
    pub fn mark_first(&self, window: &str, entity: &str) -> String {
        let marked = format!("{}{}{}", self.open, entity, self.close);
        window.replacen(entity, &marked, 1)
    }

    /// Marked entity text, see [`Marker::split`].
    pub fn extract<'a>(&self, window: &'a str) -> Option<&'a str> {
        self.split(window).map(|(_, entity, _)| entity)
    }

    /// Remove the delimiter pair found by [`Marker::split`].
    pub fn strip(&self, window: &str) -> String {
        match self.split(window) {
            Some((before, entity, after)) => format!("{before}{entity}{after}"),
            None => window.to_string(),
        }
    }

    /// Split a window into the text before the marked entity, the
    /// entity, and the text after it, delimiters removed.
    ///
    /// The marked pair is the first closing delimiter that has an
    /// opening delimiter before it, together with the nearest such
    /// opening delimiter. A stray opening delimiter in the document
    /// text is therefore skipped, but a complete delimiter pair that
    /// occurs in the text before the entity is taken for the marker.
    pub fn split<'a>(&self, window: &'a str) -> Option<(&'a str, &'a str, &'a str)> {
        let mut from = 0;

        while let Some(pos) = window[from..].find(&self.close) {
            let close_at = from + pos;
            if let Some(open_at) = window[..close_at].rfind(&self.open) {
                return Some((
                    &window[..open_at],
                    &window[open_at + self.open.len()..close_at],
                    &window[close_at + self.close.len()..],
                ));
            }
            from = close_at + self.close.len();
        }

        None
    }
}

impl Default for Marker {
    fn default() -> Self {
        Self {
            open: DEFAULT_OPEN_MARKER.to_string(),
            close: DEFAULT_CLOSE_MARKER.to_string(),
        }
    }
}

/// Builds [`ContextBlock`]s for mentions of one tokenized document.
#[derive(Debug, Clone)]
pub struct ContextWindower {
    /// Tokens kept on each side of the entity
    radius: usize,

    marker: Marker,
}

impl ContextWindower {
    /// Create a windower with the given radius.
    ///
    /// The radius is signed so that negative values coming from
    /// configuration are reported as `InvalidConfiguration`
    /// instead of wrapping around.
    ///
    /// # Example
    ///
    /// ```
    /// use toponym::core::context::ContextWindower;
    ///
    /// assert_eq!(ContextWindower::new(5).unwrap().radius(), 5);
    /// assert!(ContextWindower::new(-1).is_err());
    /// ```
    pub fn new(window_radius: i64) -> Result<Self> {
        let radius = usize::try_from(window_radius).map_err(|_| {
            ToponymError::InvalidConfiguration(format!(
                "Window radius must be >= 0, got {window_radius}"
            ))
        })?;

        Ok(Self {
            radius,
            marker: Marker::default(),
        })
    }

    /// Replace the entity marker.
    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.marker = marker;
        self
    }

    pub fn radius(&self) -> usize {
        self.radius
    }

    pub fn marker(&self) -> &Marker {
        &self.marker
    }

    /// Build the context block for one mention.
    ///
    /// # Errors
    ///
    /// - `OutOfRange` if `end_char <= start_char` or `end_char`
    ///   exceeds the document length. Offsets are never clamped.
    /// - `NoTokens` if the document has no tokens.
    pub fn build_block(&self, mention: &EntityMention, index: &TokenIndex) -> Result<ContextBlock> {
        let (start_char, end_char) = (mention.start_char, mention.end_char);

        if start_char >= end_char || end_char > index.char_len() {
            return Err(ToponymError::OutOfRange {
                start: start_char,
                end: end_char,
                len: index.char_len(),
            });
        }

        let no_tokens = || ToponymError::NoTokens {
            start: start_char,
            end: end_char,
        };
        let start_token_idx = index.locate(start_char).ok_or_else(no_tokens)?;
        let end_token_idx = index.locate(end_char - 1).ok_or_else(no_tokens)?;

        // Half-open window, clipped to the document
        let window_start = start_token_idx.saturating_sub(self.radius);
        let window_end = end_token_idx
            .saturating_add(self.radius)
            .saturating_add(1)
            .min(index.len());

        let window = index.join(window_start..window_end);
        let entity = index.join(start_token_idx..end_token_idx + 1);
        let window_text = self.marker.mark_first(&window, &entity);

        tracing::debug!(
            "Block for '{}' ({}..{}): tokens {}..={}, window {}..{}",
            mention.raw_text,
            start_char,
            end_char,
            start_token_idx,
            end_token_idx,
            window_start,
            window_end
        );

        Ok(ContextBlock {
            mention_raw_text: mention.raw_text.clone(),
            window_text,
            start_token_idx,
            end_token_idx,
            window_start_token_idx: window_start,
            window_end_token_idx: window_end,
            entity_start_char: start_char,
            entity_end_char: end_char,
        })
    }
}

impl Default for ContextWindower {
    fn default() -> Self {
        Self {
            radius: DEFAULT_WINDOW_RADIUS,
            marker: Marker::default(),
        }
    }
}

/// Build a single block with the default markers.
pub fn build_block(
    mention: &EntityMention,
    index: &TokenIndex,
    window_radius: i64,
) -> Result<ContextBlock> {
    ContextWindower::new(window_radius)?.build_block(mention, index)
}
