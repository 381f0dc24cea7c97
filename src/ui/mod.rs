use iced::{
    widget::{button, column, row, scrollable, text, text_input, Column, Space},
    Element, Length,
};

use crate::domain::{Credentials, FileListing};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Files,
}

/// Main view state
pub struct BrowserView {
    pub screen: Screen,
    pub username: String,
    pub password: String,
    pub files: Vec<String>,
    pub status_message: String,
    pub is_connecting: bool,
    pub is_downloading: bool,
}

impl Default for BrowserView {
    fn default() -> Self {
        Self {
            screen: Screen::Login,
            username: String::new(),
            password: String::new(),
            files: Vec::new(),
            status_message: "Enter your credentials to connect".to_string(),
            is_connecting: false,
            is_downloading: false,
        }
    }
}

#[derive(Debug, Clone)]
pub enum BrowserMessage {
    UsernameChanged(String),
    PasswordChanged(String),
    ConnectPressed,
    DownloadPressed(String),
    BackPressed,
}

impl BrowserView {
    /// Values currently typed into the login form.
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.username.clone(), self.password.clone())
    }

    pub fn show_files(&mut self, listing: FileListing) {
        self.status_message = format!("{} file(s) available", listing.len());
        self.files = listing.names().to_vec();
        self.screen = Screen::Files;
    }

    pub fn update(&mut self, message: BrowserMessage) {
        match message {
            BrowserMessage::UsernameChanged(username) => {
                self.username = username;
            }
            BrowserMessage::PasswordChanged(password) => {
                self.password = password;
            }
            BrowserMessage::BackPressed => {
                self.screen = Screen::Login;
                self.status_message = "Enter your credentials to connect".to_string();
            }
            BrowserMessage::ConnectPressed | BrowserMessage::DownloadPressed(_) => {
                // Will be handled by the app
            }
        }
    }

    pub fn view(&self) -> Element<'_, BrowserMessage> {
        let body = match self.screen {
            Screen::Login => self.login_view(),
            Screen::Files => self.files_view(),
        };

        column![
            body,
            Space::new().height(Length::Fixed(10.0)),
            text(&self.status_message).size(14),
        ]
        .padding(20)
        .spacing(10)
        .into()
    }

    fn login_view(&self) -> Element<'_, BrowserMessage> {
        let connect = (!self.is_connecting).then_some(BrowserMessage::ConnectPressed);

        column![
            text("File Downloader").size(32),
            Space::new().height(Length::Fixed(20.0)),
            text("Username:").size(16),
            text_input("Username", &self.username)
                .on_input(BrowserMessage::UsernameChanged)
                .padding(10),
            text("Password:").size(16),
            text_input("Password", &self.password)
                .on_input(BrowserMessage::PasswordChanged)
                .on_submit_maybe(connect.clone())
                .secure(true)
                .padding(10),
            Space::new().height(Length::Fixed(10.0)),
            button("Connect").on_press_maybe(connect).padding([10, 20]),
        ]
        .spacing(10)
        .into()
    }

    fn files_view(&self) -> Element<'_, BrowserMessage> {
        let rows = self.files.iter().map(|name| -> Element<'_, BrowserMessage> {
            let download = (!self.is_downloading)
                .then(|| BrowserMessage::DownloadPressed(name.clone()));

            row![
                text(name).width(Length::Fill),
                button("Download").on_press_maybe(download),
            ]
            .spacing(10)
            .into()
        });

        column![
            text("Available Files:").size(20),
            scrollable(Column::with_children(rows).spacing(5)).height(Length::Fill),
            button("Back to Login")
                .on_press_maybe((!self.is_downloading).then_some(BrowserMessage::BackPressed))
                .padding([10, 20]),
        ]
        .spacing(10)
        .into()
    }
}
