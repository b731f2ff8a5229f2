#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use iced::widget::scrollable::{Direction, Properties};
use iced::{
    event, executor, font, theme,
    widget::{
        button, column, container, image as iced_image, radio, row, scrollable, text, text_input,
        Space,
    },
    window, Alignment, Application, Background, Color, Command, Element, Event, Font, Length,
    Settings, Size, Subscription, Theme,
};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use chrono::Local;

mod api;
mod prefs;
mod units;

use api::{ProcessedImage, UploadedImage};
use prefs::{Prefs, ThemeChoice};
use units::{Dimension, Unit};

// Font definitions
const HEADING_FONT: Font = Font {
    family: font::Family::SansSerif,
    weight: font::Weight::Bold,
    stretch: font::Stretch::Normal,
    style: font::Style::Normal,
};

// Theme colors
const PRIMARY_COLOR: Color = Color::from_rgb(0.2, 0.5, 0.9);
const BACKGROUND_LIGHT: Color = Color::from_rgb(0.97, 0.97, 0.98);
const BACKGROUND_DARK: Color = Color::from_rgb(0.11, 0.11, 0.13);
const CARD_LIGHT: Color = Color::WHITE;
const CARD_DARK: Color = Color::from_rgb(0.16, 0.16, 0.19);
const TEXT_LIGHT: Color = Color::from_rgb(0.2, 0.2, 0.3);
const TEXT_DARK: Color = Color::from_rgb(0.92, 0.92, 0.95);
const TEXT_SECONDARY_LIGHT: Color = Color::from_rgb(0.4, 0.4, 0.5);
const TEXT_SECONDARY_DARK: Color = Color::from_rgb(0.62, 0.62, 0.68);

pub fn main() -> iced::Result {
    let mut settings = Settings::with_flags(prefs::load());
    settings.window.size = Size::new(1100.0, 780.0);
    settings.default_text_size = 14.into();
    App::run(settings)
}

#[derive(Debug, Clone)]
enum Message {
    BrowseFile,
    FileSelected(Option<PathBuf>),
    FileDropped(PathBuf),
    UploadComplete(Result<UploadedImage, String>),
    UnitSelected(Unit),
    WidthChanged(String),
    HeightChanged(String),
    DpiChanged(String),
    Process,
    ProcessComplete(Result<ProcessedImage, String>),
    Download,
    DownloadComplete(Result<Option<PathBuf>, String>),
    ZoomIn,
    ZoomOut,
    ResetZoom,
    ToggleTheme,
    AlertDismissed,
}

struct App {
    prefs: Prefs,
    current_filename: String,
    output_filename: String,
    original_width: u32,
    original_height: u32,
    target_width: u32,
    target_height: u32,
    current_dpi: u32,
    unit: Unit,
    width_field: String,
    height_field: String,
    dpi_field: String,
    original_preview: Option<iced_image::Handle>,
    enhanced_preview: Option<iced_image::Handle>,
    controls_visible: bool,
    result_visible: bool,
    processing: bool,
    zoom_level: f32,
    status_message: String,
}

impl Application for App {
    type Executor = executor::Default;
    type Message = Message;
    type Theme = Theme;
    type Flags = Prefs;

    fn new(prefs: Prefs) -> (Self, Command<Message>) {
        (
            Self {
                prefs,
                current_filename: String::new(),
                output_filename: String::new(),
                original_width: 0,
                original_height: 0,
                target_width: 0,
                target_height: 0,
                current_dpi: units::DEFAULT_DPI,
                unit: Unit::Pixels,
                width_field: String::new(),
                height_field: String::new(),
                dpi_field: units::DEFAULT_DPI.to_string(),
                original_preview: None,
                enhanced_preview: None,
                controls_visible: false,
                result_visible: false,
                processing: false,
                zoom_level: 1.0,
                status_message: "Drop an image or browse to begin".to_string(),
            },
            Command::none(),
        )
    }

    fn title(&self) -> String {
        "Upscale Studio".to_string()
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            Message::BrowseFile => {
                return Command::perform(
                    async {
                        rfd::AsyncFileDialog::new()
                            .add_filter("Images", &["jpg", "jpeg", "png", "bmp", "webp"])
                            .pick_file()
                            .await
                            .map(|f| f.path().to_path_buf())
                    },
                    Message::FileSelected,
                );
            }
            Message::FileSelected(Some(path)) | Message::FileDropped(path) => {
                self.status_message = format!("Uploading {}...", path.display());
                return Command::perform(
                    api::upload_file(self.prefs.server_url.clone(), path),
                    Message::UploadComplete,
                );
            }
            Message::FileSelected(None) => {}
            Message::UploadComplete(Ok(uploaded)) => {
                self.current_filename = uploaded.filename.clone();
                self.original_width = uploaded.width;
                self.original_height = uploaded.height;
                // Fields are seeded with raw pixel values whatever the active
                // unit; the first conversion happens on the next unit toggle.
                self.width_field = uploaded.width.to_string();
                self.height_field = uploaded.height.to_string();
                self.original_preview = Some(iced_image::Handle::from_memory(uploaded.preview));
                self.controls_visible = true;
                self.status_message = format!(
                    "Loaded: {} ({}x{})",
                    uploaded.filename, uploaded.width, uploaded.height
                );
            }
            Message::UploadComplete(Err(e)) => {
                return alert(format!("Upload failed: {e}"));
            }
            Message::UnitSelected(unit) => {
                if unit != self.unit {
                    self.unit = unit;
                    self.convert_fields(unit);
                }
            }
            Message::WidthChanged(value) => {
                self.width_field = value;
                self.sync_companion(Dimension::Width);
            }
            Message::HeightChanged(value) => {
                self.height_field = value;
                self.sync_companion(Dimension::Height);
            }
            Message::DpiChanged(value) => {
                self.current_dpi = units::parse_dpi(&value);
                self.dpi_field = value;
                // Re-runs the division on the displayed inch values, so DPI
                // edits compound with prior conversions.
                if self.unit == Unit::Inches {
                    self.convert_fields(Unit::Inches);
                }
            }
            Message::Process => {
                if self.processing {
                    return Command::none();
                }

                let width = units::field_to_pixels(&self.width_field, self.unit, self.current_dpi);
                let height =
                    units::field_to_pixels(&self.height_field, self.unit, self.current_dpi);

                if width == 0 || height == 0 {
                    return alert("Please enter valid dimensions".to_string());
                }

                self.processing = true;
                self.result_visible = false;
                self.target_width = width;
                self.target_height = height;
                self.status_message = "Processing...".to_string();

                return Command::perform(
                    api::process_file(
                        self.prefs.server_url.clone(),
                        self.current_filename.clone(),
                        width,
                        height,
                    ),
                    Message::ProcessComplete,
                );
            }
            Message::ProcessComplete(result) => {
                self.processing = false;

                match result {
                    Ok(processed) => {
                        self.output_filename = processed.output_filename.clone();
                        self.enhanced_preview =
                            Some(iced_image::Handle::from_memory(processed.preview));
                        self.result_visible = true;
                        self.zoom_level = 1.0;
                        self.status_message = format!(
                            "Completed: {} ({}x{})",
                            processed.output_filename, self.target_width, self.target_height
                        );
                    }
                    Err(e) => {
                        return alert(format!("Processing failed: {e}"));
                    }
                }
            }
            Message::Download => {
                if self.output_filename.is_empty() {
                    return alert("No enhanced image available for download".to_string());
                }

                let server = self.prefs.server_url.clone();
                let name = self.output_filename.clone();
                return Command::perform(
                    async move {
                        match rfd::AsyncFileDialog::new()
                            .set_file_name(&name)
                            .save_file()
                            .await
                        {
                            Some(handle) => {
                                api::download_file(server, name, handle.path().to_path_buf())
                                    .await
                                    .map(Some)
                            }
                            None => Ok(None),
                        }
                    },
                    Message::DownloadComplete,
                );
            }
            Message::DownloadComplete(Ok(Some(path))) => {
                self.status_message = format!("Saved to: {}", path.display());
            }
            Message::DownloadComplete(Ok(None)) => {}
            Message::DownloadComplete(Err(e)) => {
                return alert(format!("Download failed: {e}"));
            }
            Message::ZoomIn => {
                self.zoom_level *= 1.2;
            }
            Message::ZoomOut => {
                self.zoom_level *= 0.8;
            }
            Message::ResetZoom => {
                self.zoom_level = 1.0;
            }
            Message::ToggleTheme => {
                self.prefs.theme = self.prefs.theme.toggled();
                if let Err(e) = prefs::save(&self.prefs) {
                    log_error(&format!("Failed to persist preferences: {e:#}"));
                }
            }
            Message::AlertDismissed => {}
        }

        Command::none()
    }

    fn subscription(&self) -> Subscription<Message> {
        event::listen_with(|event, _status| match event {
            Event::Window(_, window::Event::FileDropped(path)) => {
                Some(Message::FileDropped(path))
            }
            _ => None,
        })
    }

    fn view(&self) -> Element<Message> {
        let theme_btn = button(
            text(match self.prefs.theme {
                ThemeChoice::Light => "Dark mode",
                ThemeChoice::Dark => "Light mode",
            })
            .size(13),
        )
        .on_press(Message::ToggleTheme)
        .padding([6, 12])
        .style(theme::Button::Secondary);

        let header = container(
            row![
                column![
                    text("Upscale Studio")
                        .size(16)
                        .font(HEADING_FONT)
                        .style(Color::WHITE),
                    text("Resize and enhance images with an upscaling server")
                        .size(11)
                        .style(Color::from_rgba(1.0, 1.0, 1.0, 0.8)),
                ]
                .spacing(4),
                Space::with_width(Length::Fill),
                theme_btn,
            ]
            .align_items(Alignment::Center),
        )
        .width(Length::Fill)
        .padding([18, 26])
        .style(theme::Container::Custom(Box::new(HeaderContainer)));

        let input_card = card_container(
            column![
                self.section_title("Input"),
                Space::with_height(8),
                row![
                    button("Browse Image").on_press(Message::BrowseFile).padding(10),
                    text(if self.current_filename.is_empty() {
                        "or drop a file anywhere in the window".to_string()
                    } else {
                        self.current_filename.clone()
                    })
                    .size(14)
                    .style(self.secondary_color()),
                ]
                .spacing(10)
                .align_items(Alignment::Center),
            ]
            .spacing(0),
        );

        let mut body = column![input_card].spacing(16);

        if self.controls_visible {
            body = body.push(self.controls_card());
        }

        body = body.push(self.preview_card());

        let content = scrollable(
            column![
                header,
                container(column![body, Space::with_height(20)].spacing(0))
                    .width(Length::Fill)
                    .center_x()
                    .padding([6, 14, 6, 6]),
            ]
            .spacing(16),
        );

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(theme::Container::Custom(Box::new(BackgroundContainer)))
            .into()
    }

    fn theme(&self) -> Theme {
        match self.prefs.theme {
            ThemeChoice::Light => Theme::Light,
            ThemeChoice::Dark => Theme::Dark,
        }
    }
}

impl App {
    /// Converts both displayed dimension fields into the given unit. Operates
    /// on the displayed values, not the stored originals, so repeated toggles
    /// can drift by rounding.
    fn convert_fields(&mut self, unit: Unit) {
        for field in [&mut self.width_field, &mut self.height_field] {
            if let Some(value) = units::parse_value(field) {
                let converted = match unit {
                    Unit::Inches => units::to_inches(value, self.current_dpi),
                    Unit::Pixels => value * self.current_dpi as f64,
                };
                *field = units::format_value(unit, converted);
            }
        }
    }

    /// Recomputes the untouched field from the original aspect ratio after an
    /// edit to its pair.
    fn sync_companion(&mut self, edited: Dimension) {
        let value = match edited {
            Dimension::Width => units::parse_value(&self.width_field),
            Dimension::Height => units::parse_value(&self.height_field),
        };
        let Some(value) = value else { return };

        if let Some(pair) =
            units::companion(edited, value, self.original_width, self.original_height)
        {
            let formatted = units::format_value(self.unit, pair);
            match edited {
                Dimension::Width => self.height_field = formatted,
                Dimension::Height => self.width_field = formatted,
            }
        }
    }

    fn text_color(&self) -> Color {
        match self.prefs.theme {
            ThemeChoice::Light => TEXT_LIGHT,
            ThemeChoice::Dark => TEXT_DARK,
        }
    }

    fn secondary_color(&self) -> Color {
        match self.prefs.theme {
            ThemeChoice::Light => TEXT_SECONDARY_LIGHT,
            ThemeChoice::Dark => TEXT_SECONDARY_DARK,
        }
    }

    fn section_title(&self, title: &str) -> Element<'static, Message> {
        text(title.to_string())
            .size(14)
            .font(HEADING_FONT)
            .style(self.text_color())
            .into()
    }

    fn controls_card(&self) -> Element<Message> {
        let unit_row = row![
            text("Units:")
                .size(14)
                .style(self.secondary_color())
                .width(Length::Fixed(80.0)),
            radio("Pixels", Unit::Pixels, Some(self.unit), Message::UnitSelected),
            radio("Inches", Unit::Inches, Some(self.unit), Message::UnitSelected),
        ]
        .spacing(16)
        .align_items(Alignment::Center);

        let width_row = row![
            text("Width:")
                .size(14)
                .style(self.secondary_color())
                .width(Length::Fixed(80.0)),
            text_input("Width", &self.width_field)
                .on_input(Message::WidthChanged)
                .width(Length::Fixed(110.0)),
            text(self.unit.suffix()).size(14).style(self.secondary_color()),
        ]
        .spacing(10)
        .align_items(Alignment::Center);

        let height_row = row![
            text("Height:")
                .size(14)
                .style(self.secondary_color())
                .width(Length::Fixed(80.0)),
            text_input("Height", &self.height_field)
                .on_input(Message::HeightChanged)
                .width(Length::Fixed(110.0)),
            text(self.unit.suffix()).size(14).style(self.secondary_color()),
        ]
        .spacing(10)
        .align_items(Alignment::Center);

        let process_btn = if self.processing {
            button(text("Processing...").font(HEADING_FONT).size(14))
                .padding([8, 10])
                .style(theme::Button::Secondary)
        } else {
            button(text("Process Image").font(HEADING_FONT).size(14))
                .on_press(Message::Process)
                .padding([8, 10])
                .style(theme::Button::Primary)
        };

        let download_btn = button(text("Download").size(14))
            .on_press(Message::Download)
            .padding([8, 10])
            .style(theme::Button::Secondary);

        let mut content = column![
            self.section_title("Output size"),
            Space::with_height(8),
            unit_row,
            Space::with_height(8),
            width_row,
            Space::with_height(8),
            height_row,
        ]
        .spacing(0);

        // DPI only matters while editing in inches.
        if self.unit == Unit::Inches {
            content = content.push(Space::with_height(8));
            content = content.push(
                row![
                    text("DPI:")
                        .size(14)
                        .style(self.secondary_color())
                        .width(Length::Fixed(80.0)),
                    text_input("300", &self.dpi_field)
                        .on_input(Message::DpiChanged)
                        .width(Length::Fixed(110.0)),
                ]
                .spacing(10)
                .align_items(Alignment::Center),
            );
        }

        content = content.push(Space::with_height(12));
        content = content.push(
            row![process_btn, download_btn]
                .spacing(10)
                .align_items(Alignment::Center),
        );
        content = content.push(Space::with_height(8));
        content = content.push(
            text(&self.status_message)
                .size(12)
                .style(self.secondary_color()),
        );

        card_container(content)
    }

    fn preview_card(&self) -> Element<Message> {
        let Some(original) = &self.original_preview else {
            return card_container(
                column![
                    self.section_title("Preview"),
                    Space::with_height(16),
                    text("Upload an image to preview")
                        .size(14)
                        .style(self.secondary_color()),
                ]
                .spacing(0),
            );
        };

        let zoom_controls = row![
            button(
                text("-")
                    .size(18)
                    .horizontal_alignment(iced::alignment::Horizontal::Center)
            )
            .on_press(Message::ZoomOut)
            .padding([4, 12])
            .style(theme::Button::Secondary),
            text(format!("{:.0}%", self.zoom_level * 100.0))
                .size(14)
                .style(self.secondary_color()),
            button(
                text("+")
                    .size(18)
                    .horizontal_alignment(iced::alignment::Horizontal::Center)
            )
            .on_press(Message::ZoomIn)
            .padding([4, 12])
            .style(theme::Button::Secondary),
            button(text("Reset").size(14))
                .on_press(Message::ResetZoom)
                .padding([4, 12])
                .style(theme::Button::Text),
        ]
        .spacing(8)
        .align_items(Alignment::Center);

        let before_col = self.preview_column(
            "Original",
            original.clone(),
            self.original_width,
            self.original_height,
        );

        let after_col: Element<Message> = if self.processing {
            // The loading indicator replaces the result pane for the whole
            // call and is cleared on completion, success or failure.
            column![
                text("Enhanced").size(16).font(HEADING_FONT).style(self.text_color()),
                Space::with_height(8),
                container(text("Processing...").style(self.secondary_color()))
                    .width(Length::Fixed(500.0))
                    .height(Length::Fixed(400.0))
                    .center_x()
                    .center_y(),
            ]
            .spacing(0)
            .align_items(Alignment::Center)
            .width(Length::FillPortion(1))
            .into()
        } else if let (true, Some(handle)) = (self.result_visible, &self.enhanced_preview) {
            self.preview_column(
                "Enhanced",
                handle.clone(),
                self.target_width,
                self.target_height,
            )
        } else {
            column![
                text("Enhanced").size(16).font(HEADING_FONT).style(self.text_color()),
                Space::with_height(8),
                container(text("Process to see result").style(self.secondary_color()))
                    .width(Length::Fixed(500.0))
                    .height(Length::Fixed(400.0))
                    .center_x()
                    .center_y(),
            ]
            .spacing(0)
            .align_items(Alignment::Center)
            .width(Length::FillPortion(1))
            .into()
        };

        card_container(
            column![
                row![
                    self.section_title("Preview"),
                    Space::with_width(Length::Fill),
                    zoom_controls,
                ],
                Space::with_height(16),
                row![before_col, Space::with_width(20), after_col]
                    .align_items(Alignment::Start),
            ]
            .spacing(0),
        )
    }

    fn preview_column(
        &self,
        label: &'static str,
        handle: iced_image::Handle,
        width: u32,
        height: u32,
    ) -> Element<Message> {
        // Both panes share one zoom factor applied as a uniform scale.
        let display_w = width as f32 * self.zoom_level;
        let display_h = height as f32 * self.zoom_level;

        let pane = scrollable(
            container(
                iced_image::Image::new(handle)
                    .width(Length::Fixed(display_w))
                    .height(Length::Fixed(display_h)),
            )
            .center_x()
            .center_y(),
        )
        .direction(Direction::Both {
            vertical: Properties::default(),
            horizontal: Properties::default(),
        })
        .width(Length::FillPortion(1))
        .height(Length::Fixed(400.0));

        column![
            text(label).size(16).font(HEADING_FONT).style(self.text_color()),
            Space::with_height(8),
            pane,
            Space::with_height(8),
            text(format!("{}×{}", width, height))
                .size(12)
                .style(self.secondary_color()),
        ]
        .spacing(0)
        .align_items(Alignment::Center)
        .into()
    }
}

/// Modal error dialog, the single user-facing error surface.
fn alert(description: String) -> Command<Message> {
    Command::perform(
        async move {
            rfd::AsyncMessageDialog::new()
                .set_level(rfd::MessageLevel::Error)
                .set_title("Upscale Studio")
                .set_description(description)
                .show()
                .await;
        },
        |_| Message::AlertDismissed,
    )
}

fn card_container<'a>(content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    container(content)
        .width(Length::Fill)
        .padding(14)
        .style(theme::Container::Custom(Box::new(CardContainer)))
        .into()
}

struct BackgroundContainer;
impl container::StyleSheet for BackgroundContainer {
    type Style = Theme;

    fn appearance(&self, style: &Self::Style) -> container::Appearance {
        let background = match style {
            Theme::Dark => BACKGROUND_DARK,
            _ => BACKGROUND_LIGHT,
        };
        container::Appearance {
            background: Some(Background::Color(background)),
            ..Default::default()
        }
    }
}

struct CardContainer;
impl container::StyleSheet for CardContainer {
    type Style = Theme;

    fn appearance(&self, style: &Self::Style) -> container::Appearance {
        let (background, border_color) = match style {
            Theme::Dark => (CARD_DARK, Color::from_rgba(1.0, 1.0, 1.0, 0.08)),
            _ => (CARD_LIGHT, Color::from_rgba(0.0, 0.0, 0.0, 0.08)),
        };
        container::Appearance {
            background: Some(Background::Color(background)),
            border: iced::Border {
                color: border_color,
                width: 1.0,
                radius: 12.0.into(),
            },
            ..Default::default()
        }
    }
}

struct HeaderContainer;
impl container::StyleSheet for HeaderContainer {
    type Style = Theme;

    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            background: Some(Background::Color(PRIMARY_COLOR)),
            ..Default::default()
        }
    }
}

pub fn log_message(message: &str) {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    let log_entry = format!("[{}] {}\n", timestamp, message);

    println!("{}", log_entry.trim());

    if let Ok(mut file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open("upscale_studio.log")
    {
        let _ = file.write_all(log_entry.as_bytes());
    }
}

pub fn log_error(message: &str) {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    let log_entry = format!("[{}] ERROR: {}\n", timestamp, message);

    eprintln!("{}", log_entry.trim());

    if let Ok(mut file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open("upscale_studio.log")
    {
        let _ = file.write_all(log_entry.as_bytes());
    }
}

#[cfg(test)]
mod ui_tests {
    use super::*;

    fn app() -> App {
        App::new(Prefs::default()).0
    }

    fn uploaded(width: u32, height: u32) -> UploadedImage {
        UploadedImage {
            filename: "cat.jpg".to_string(),
            width,
            height,
            preview: vec![0xFF, 0xD8],
        }
    }

    fn app_with_upload(width: u32, height: u32) -> App {
        let mut app = app();
        let _ = app.update(Message::UploadComplete(Ok(uploaded(width, height))));
        app
    }

    #[test]
    fn upload_success_populates_session_and_reveals_controls() {
        let app = app_with_upload(800, 600);
        assert_eq!(app.current_filename, "cat.jpg");
        assert_eq!((app.original_width, app.original_height), (800, 600));
        assert_eq!(app.width_field, "800");
        assert_eq!(app.height_field, "600");
        assert!(app.controls_visible);
        assert!(app.original_preview.is_some());
    }

    #[test]
    fn upload_failure_leaves_prior_state_untouched() {
        let mut app = app_with_upload(800, 600);
        let _ = app.update(Message::UploadComplete(Err("disk full".to_string())));
        assert_eq!(app.current_filename, "cat.jpg");
        assert_eq!(app.width_field, "800");
    }

    #[test]
    fn unit_double_toggle_approximates_with_rounding_drift() {
        let mut app = app_with_upload(1000, 500);
        let _ = app.update(Message::UnitSelected(Unit::Inches));
        assert_eq!(app.width_field, "3.33");
        assert_eq!(app.height_field, "1.67");

        let _ = app.update(Message::UnitSelected(Unit::Pixels));
        assert_eq!(app.width_field, "999");
        assert_eq!(app.height_field, "501");
    }

    #[test]
    fn reselecting_active_unit_does_not_reconvert() {
        let mut app = app_with_upload(1000, 500);
        let _ = app.update(Message::UnitSelected(Unit::Pixels));
        assert_eq!(app.width_field, "1000");
    }

    #[test]
    fn dpi_edit_in_inches_mode_compounds_on_displayed_values() {
        let mut app = app_with_upload(1000, 500);
        let _ = app.update(Message::UnitSelected(Unit::Inches));
        assert_eq!(app.width_field, "3.33");

        // The already-converted inch values get divided by the new DPI again.
        let _ = app.update(Message::DpiChanged("150".to_string()));
        assert_eq!(app.current_dpi, 150);
        assert_eq!(app.width_field, "0.02");
    }

    #[test]
    fn invalid_dpi_falls_back_to_default() {
        let mut app = app_with_upload(800, 600);
        let _ = app.update(Message::DpiChanged("abc".to_string()));
        assert_eq!(app.current_dpi, units::DEFAULT_DPI);
    }

    #[test]
    fn width_edit_syncs_height_from_original_aspect() {
        let mut app = app_with_upload(800, 600);
        let _ = app.update(Message::WidthChanged("400".to_string()));
        assert_eq!(app.height_field, "300");

        let _ = app.update(Message::HeightChanged("150".to_string()));
        assert_eq!(app.width_field, "200");
    }

    #[test]
    fn width_edit_in_inches_formats_to_two_decimals() {
        let mut app = app_with_upload(800, 600);
        let _ = app.update(Message::UnitSelected(Unit::Inches));
        let _ = app.update(Message::WidthChanged("3".to_string()));
        assert_eq!(app.height_field, "2.25");
    }

    #[test]
    fn dimension_edit_is_noop_before_upload() {
        let mut app = app();
        let _ = app.update(Message::WidthChanged("400".to_string()));
        assert_eq!(app.width_field, "400");
        assert_eq!(app.height_field, "");
    }

    #[test]
    fn process_with_zero_dimension_is_rejected_locally() {
        let mut app = app_with_upload(800, 600);
        app.width_field = "0".to_string();
        let _ = app.update(Message::Process);
        assert!(!app.processing);
        assert_eq!(app.target_width, 0);
    }

    #[test]
    fn process_with_unparseable_field_is_rejected_locally() {
        let mut app = app_with_upload(800, 600);
        app.height_field = "tall".to_string();
        let _ = app.update(Message::Process);
        assert!(!app.processing);
    }

    #[test]
    fn process_submits_inch_fields_as_rounded_pixels() {
        let mut app = app_with_upload(800, 600);
        let _ = app.update(Message::UnitSelected(Unit::Inches));
        app.width_field = "2.5".to_string();
        app.height_field = "2.5".to_string();
        let _ = app.update(Message::Process);
        assert!(app.processing);
        assert_eq!((app.target_width, app.target_height), (750, 750));
    }

    #[test]
    fn second_process_click_while_in_flight_is_ignored() {
        let mut app = app_with_upload(800, 600);
        let _ = app.update(Message::Process);
        assert!(app.processing);
        let (w, h) = (app.target_width, app.target_height);

        app.width_field = "100".to_string();
        let _ = app.update(Message::Process);
        assert_eq!((app.target_width, app.target_height), (w, h));
    }

    #[test]
    fn successful_processing_resets_zoom_and_shows_result() {
        let mut app = app_with_upload(800, 600);
        let _ = app.update(Message::Process);
        app.zoom_level = 2.5;

        let _ = app.update(Message::ProcessComplete(Ok(ProcessedImage {
            output_filename: "upscaled_cat.jpg".to_string(),
            preview: vec![0xFF, 0xD8],
        })));

        assert!(!app.processing);
        assert!(app.result_visible);
        assert_eq!(app.zoom_level, 1.0);
        assert_eq!(app.output_filename, "upscaled_cat.jpg");
    }

    #[test]
    fn failed_processing_clears_loading_and_hides_result() {
        let mut app = app_with_upload(800, 600);
        let _ = app.update(Message::Process);
        let _ = app.update(Message::ProcessComplete(Err("model crashed".to_string())));

        assert!(!app.processing);
        assert!(!app.result_visible);
        assert!(app.output_filename.is_empty());
    }

    #[test]
    fn zoom_is_multiplicative_and_unbounded() {
        let mut app = app();
        for _ in 0..12 {
            let _ = app.update(Message::ZoomIn);
        }
        assert!(app.zoom_level > 5.0);

        for _ in 0..40 {
            let _ = app.update(Message::ZoomOut);
        }
        assert!(app.zoom_level > 0.0 && app.zoom_level < 0.01);

        let _ = app.update(Message::ResetZoom);
        assert_eq!(app.zoom_level, 1.0);
    }

    #[test]
    fn download_without_output_changes_nothing() {
        let mut app = app_with_upload(800, 600);
        let status = app.status_message.clone();
        let _ = app.update(Message::Download);
        assert!(app.output_filename.is_empty());
        assert_eq!(app.status_message, status);
    }
}
