use iced::widget::image::Handle;
use iced::widget::{button, column, container, row, text, Image, Row};
use iced::{Alignment, Element, Length, Task, Theme};
use std::path::Path;
use tracing::{error, info, warn};

mod config;
mod error;
mod filters;
mod state;
mod ui;

#[cfg(test)]
mod test_utils;

use config::EditorConfig;
use filters::{Filter, FilterKind};
use state::document::{with_default_extension, ImageDocument};
use ui::dialogs::{Dialogs, NativeDialogs};
use ui::preview;
use ui::prompt::{self, Prompt, PromptField};

/// Main application state
struct FilterEditor {
    /// Startup configuration
    config: EditorConfig,
    /// The image being edited
    document: ImageDocument,
    /// File pickers and message boxes
    dialogs: Box<dyn Dialogs>,
    /// Scaled copy of the current image, rebuilt after every change
    preview: Option<Handle>,
    /// Open parameter prompt (resize / rotate), if any
    prompt: Option<Prompt>,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User clicked "Load Image"
    OpenImage,
    /// User clicked one of the filter buttons
    ApplyFilter(FilterKind),
    /// User clicked "Save Image"
    SaveImage,
    /// Text typed into a prompt field
    PromptChanged(PromptField, String),
    /// Prompt confirmed (Apply button or Enter)
    PromptSubmit,
    /// Prompt dismissed
    PromptCancel,
}

impl FilterEditor {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let config = EditorConfig::default();
        let dialogs = Box::new(NativeDialogs::new(&config));
        (Self::with_dialogs(config, dialogs), Task::none())
    }

    /// Create the editor with an explicit dialog backend
    fn with_dialogs(config: EditorConfig, dialogs: Box<dyn Dialogs>) -> Self {
        info!("🎨 Filter editor initialized");
        FilterEditor {
            config,
            document: ImageDocument::new(),
            dialogs,
            preview: None,
            prompt: None,
            status: "Ready. Load an image to begin.".to_string(),
        }
    }

    /// Window title, with the open file name when there is one
    fn title(&self) -> String {
        match self.document.source_path().and_then(Path::file_name) {
            Some(name) => format!("{} - {}", name.to_string_lossy(), self.config.title),
            None => self.config.title.to_string(),
        }
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::OpenImage => self.open_image(),
            Message::ApplyFilter(kind) => {
                if !self.document.is_loaded() {
                    self.dialogs
                        .warn("Warning", "You need to load an image first.");
                    return Task::none();
                }

                match kind.without_parameters() {
                    Some(filter) => self.run_filter(filter),
                    // Resize and Rotate ask for their parameters first
                    None => self.prompt = Prompt::for_kind(kind),
                }
            }
            Message::PromptChanged(field, value) => {
                if let Some(prompt) = self.prompt.as_mut() {
                    prompt.set(field, value);
                }
            }
            Message::PromptSubmit => {
                let Some(prompt) = self.prompt.as_mut() else {
                    return Task::none();
                };
                match prompt.submit(&self.config.size_limits) {
                    Ok(filter) => {
                        self.prompt = None;
                        self.run_filter(filter);
                    }
                    // Keep the prompt open; the error is shown inline
                    Err(e) => warn!("Rejected prompt input: {}", e),
                }
            }
            Message::PromptCancel => self.prompt = None,
            Message::SaveImage => self.save_image(),
        }

        Task::none()
    }

    fn open_image(&mut self) {
        let Some(path) = self.dialogs.pick_image() else {
            return;
        };

        match self.document.load(&path) {
            Ok(()) => {
                self.refresh_preview();
                self.status = match self.document.dimensions() {
                    Some((w, h)) => format!("Loaded {} ({}x{})", path.display(), w, h),
                    None => format!("Loaded {}", path.display()),
                };
            }
            Err(e) => {
                error!("❌ {}", e);
                self.dialogs
                    .error("Error", &format!("Could not load the image.\n{}", e));
                self.status = format!("Failed to load {}", path.display());
            }
        }
    }

    fn run_filter(&mut self, filter: Filter) {
        self.document.apply(filter);
        self.refresh_preview();
        if let Some((w, h)) = self.document.dimensions() {
            self.status = format!("Applied {} ({}x{})", filter, w, h);
        }
    }

    fn save_image(&mut self) {
        if !self.document.is_loaded() {
            self.dialogs.warn("Warning", "There is no image to save.");
            return;
        }

        let Some(path) = self.dialogs.pick_save_path() else {
            return;
        };
        let path = with_default_extension(path, self.config.default_extension);

        match self
            .document
            .save_with_quality(&path, self.config.jpeg_quality)
        {
            Ok(()) => {
                self.status = format!("Saved {}", path.display());
                self.dialogs.inform("Success", "Image saved successfully.");
            }
            Err(e) => {
                error!("❌ {}", e);
                self.dialogs
                    .error("Error", &format!("Could not save the image.\n{}", e));
                self.status = format!("Failed to save {}", path.display());
            }
        }
    }

    fn refresh_preview(&mut self) {
        self.preview = self
            .document
            .image()
            .map(|image| preview::preview_handle(image, self.config.preview_size));
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let filter_buttons: Row<Message> = Row::with_children(FilterKind::ALL.iter().map(|&kind| {
            button(kind.label())
                .on_press(Message::ApplyFilter(kind))
                .padding(10)
                .into()
        }))
        .spacing(10);

        let toolbar = row![
            button("Load Image")
                .on_press(Message::OpenImage)
                .padding(10),
            filter_buttons,
            button("Save Image")
                .on_press(Message::SaveImage)
                .padding(10),
        ]
        .spacing(20)
        .align_y(Alignment::Center);

        let size = self.config.preview_size as f32;
        let preview: Element<Message> = match &self.preview {
            Some(handle) => Image::<Handle>::new(handle.clone())
                .width(Length::Fixed(size))
                .height(Length::Fixed(size))
                .content_fit(preview::PREVIEW_FIT)
                .into(),
            None => container(text("No image loaded").size(16))
                .width(Length::Fixed(size))
                .height(Length::Fixed(size))
                .center_x(Length::Fixed(size))
                .center_y(Length::Fixed(size))
                .into(),
        };

        let content = column![toolbar, preview, text(&self.status).size(16)]
            .spacing(20)
            .padding(40)
            .align_x(Alignment::Center);

        let base = container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill);

        match &self.prompt {
            Some(open) => prompt::modal(base, open.view(), Message::PromptCancel),
            None => base.into(),
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    iced::application(FilterEditor::title, FilterEditor::update, FilterEditor::view)
        .theme(FilterEditor::theme)
        .centered()
        .run_with(FilterEditor::new)
}
