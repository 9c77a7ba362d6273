//! Parameter prompts for filters that need user input
//!
//! Resize asks for a width and a height, Rotate asks for an angle. The
//! prompt is shown as a modal on top of the editor; it stays open until
//! the input parses or the user cancels.

use iced::widget::{
    button, center, column, container, mouse_area, opaque, row, stack, text, text_input,
};
use iced::{Color, Element, Length};
use std::num::NonZeroU32;

use crate::config::SizeLimits;
use crate::error::PromptError;
use crate::filters::{Filter, FilterKind};
use crate::Message;

/// Which text field a keystroke belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptField {
    Width,
    Height,
    Degrees,
}

/// State of an open prompt: raw text plus the last parse error
#[derive(Debug, Clone, PartialEq)]
pub enum Prompt {
    Resize {
        width: String,
        height: String,
        error: Option<PromptError>,
    },
    Rotate {
        degrees: String,
        error: Option<PromptError>,
    },
}

impl Prompt {
    /// Open a blank prompt for `kind`, if that kind needs one
    pub fn for_kind(kind: FilterKind) -> Option<Self> {
        match kind {
            FilterKind::Resize => Some(Prompt::Resize {
                width: String::new(),
                height: String::new(),
                error: None,
            }),
            FilterKind::Rotate => Some(Prompt::Rotate {
                degrees: String::new(),
                error: None,
            }),
            _ => None,
        }
    }

    /// Store the text typed into `field`
    ///
    /// Keystrokes for a field this prompt doesn't have are ignored.
    pub fn set(&mut self, field: PromptField, value: String) {
        match (self, field) {
            (Prompt::Resize { width, .. }, PromptField::Width) => *width = value,
            (Prompt::Resize { height, .. }, PromptField::Height) => *height = value,
            (Prompt::Rotate { degrees, .. }, PromptField::Degrees) => *degrees = value,
            _ => {}
        }
    }

    /// Parse the current input into a filter
    ///
    /// Resize requests beyond `limits` are rejected as `TooLarge`.
    pub fn parse(&self, limits: &SizeLimits) -> Result<Filter, PromptError> {
        match self {
            Prompt::Resize { width, height, .. } => {
                let width = parse_dimension(width, limits.max_side)?;
                let height = parse_dimension(height, limits.max_side)?;
                let pixels = u64::from(width.get()) * u64::from(height.get());
                if pixels > limits.max_pixels {
                    return Err(PromptError::TooLarge(format!("{}x{}", width, height)));
                }
                Ok(Filter::Resize { width, height })
            }
            Prompt::Rotate { degrees, .. } => Ok(Filter::Rotate {
                degrees: parse_degrees(degrees)?,
            }),
        }
    }

    /// Parse the input, remembering the error for display on failure
    pub fn submit(&mut self, limits: &SizeLimits) -> Result<Filter, PromptError> {
        let result = self.parse(limits);
        let slot = match self {
            Prompt::Resize { error, .. } | Prompt::Rotate { error, .. } => error,
        };
        *slot = result.as_ref().err().cloned();
        result
    }

    /// Last parse error, if any
    pub fn error(&self) -> Option<&PromptError> {
        match self {
            Prompt::Resize { error, .. } | Prompt::Rotate { error, .. } => error.as_ref(),
        }
    }

    /// Build the modal content
    pub fn view(&self) -> Element<'_, Message> {
        let (title, fields): (&str, Element<'_, Message>) = match self {
            Prompt::Resize { width, height, .. } => (
                "Resize image",
                column![
                    text_input("Width (px)", width)
                        .on_input(|v| Message::PromptChanged(PromptField::Width, v))
                        .on_submit(Message::PromptSubmit)
                        .padding(8),
                    text_input("Height (px)", height)
                        .on_input(|v| Message::PromptChanged(PromptField::Height, v))
                        .on_submit(Message::PromptSubmit)
                        .padding(8),
                ]
                .spacing(10)
                .into(),
            ),
            Prompt::Rotate { degrees, .. } => (
                "Rotate image",
                text_input("Angle in degrees (counter-clockwise)", degrees)
                    .on_input(|v| Message::PromptChanged(PromptField::Degrees, v))
                    .on_submit(Message::PromptSubmit)
                    .padding(8)
                    .into(),
            ),
        };

        let mut content = column![text(title).size(22), fields].spacing(15);

        if let Some(error) = self.error() {
            content = content.push(
                text(error.to_string())
                    .size(14)
                    .color(Color::from_rgb(0.9, 0.3, 0.3)),
            );
        }

        content = content.push(
            row![
                button("Cancel").on_press(Message::PromptCancel).padding(8),
                button("Apply").on_press(Message::PromptSubmit).padding(8),
            ]
            .spacing(10),
        );

        container(content)
            .width(Length::Fixed(320.0))
            .padding(20)
            .style(container::rounded_box)
            .into()
    }
}

/// Lay `content` over `base`, dimming the base and closing on outside click
pub fn modal<'a>(
    base: impl Into<Element<'a, Message>>,
    content: impl Into<Element<'a, Message>>,
    on_blur: Message,
) -> Element<'a, Message> {
    stack![
        base.into(),
        opaque(
            mouse_area(center(opaque(content)).style(|_theme| container::Style {
                background: Some(
                    Color {
                        a: 0.8,
                        ..Color::BLACK
                    }
                    .into(),
                ),
                ..container::Style::default()
            }))
            .on_press(on_blur)
        )
    ]
    .into()
}

/// Parse a resize dimension: a whole number from 1 to `max_side`
pub fn parse_dimension(input: &str, max_side: u32) -> Result<NonZeroU32, PromptError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(PromptError::Empty);
    }

    // Parse as signed first so "-5" reports NotPositive, not NotAnInteger
    let value: i64 = trimmed
        .parse()
        .map_err(|_| PromptError::NotAnInteger(trimmed.to_string()))?;

    if value <= 0 {
        return Err(PromptError::NotPositive);
    }

    u32::try_from(value)
        .ok()
        .filter(|&side| side <= max_side)
        .and_then(NonZeroU32::new)
        .ok_or_else(|| PromptError::TooLarge(trimmed.to_string()))
}

/// Parse a rotation angle in degrees
pub fn parse_degrees(input: &str) -> Result<f32, PromptError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(PromptError::Empty);
    }

    let value: f32 = trimmed
        .parse()
        .map_err(|_| PromptError::NotANumber(trimmed.to_string()))?;

    if value.is_finite() {
        Ok(value)
    } else {
        Err(PromptError::NotFinite)
    }
}
