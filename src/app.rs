use crate::api::{ApiClient, ApiConfig};
use crate::application::{self, ConfirmationPrompt, DownloadOrchestrator};
use crate::domain::{AppError, DownloadOutcome, FileListing};
use crate::ui::{BrowserMessage, BrowserView};
use iced::Task;
use rfd::{MessageButtons, MessageDialogResult, MessageLevel};
use std::path::PathBuf;
use tracing::warn;

pub struct FileApp {
    view: BrowserView,
    api_client: ApiClient,
    // Current (or last) download attempt; replaced for every new file
    download: DownloadOrchestrator,
}

impl FileApp {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            view: BrowserView::default(),
            api_client: ApiClient::new(config),
            download: DownloadOrchestrator::new(),
        }
    }

    fn connect(&mut self) -> Task<Message> {
        if self.view.is_connecting {
            return Task::none();
        }

        self.view.is_connecting = true;
        self.view.status_message = format!("Connecting to {}...", self.api_client.config().base_url);

        let api_client = self.api_client.clone();
        let credentials = self.view.credentials();

        Task::perform(
            async move { application::connect(&api_client, &credentials).await },
            Message::ListingReceived,
        )
    }

    fn start_download(&mut self, filename: String) -> Task<Message> {
        if self.download.is_active() {
            return Task::none();
        }

        self.download = DownloadOrchestrator::new();
        match self.download.select(filename, self.view.credentials()) {
            Ok(prompt) => {
                self.view.is_downloading = true;
                self.view.status_message = format!("Confirm download of {}", prompt.filename);
                ask_confirmation(prompt)
            }
            Err(e) => {
                warn!(error = %e, "could not start download");
                Task::none()
            }
        }
    }

    fn end_attempt(&mut self, status: impl Into<String>) {
        self.view.is_downloading = false;
        self.view.status_message = status.into();
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    UiMessage(BrowserMessage),
    ListingReceived(Result<FileListing, AppError>),
    ConfirmationAnswered(bool),
    DestinationChosen(Option<PathBuf>),
    DownloadFinished(DownloadOutcome),
    AlertClosed,
}

pub fn update(app: &mut FileApp, message: Message) -> Task<Message> {
    match message {
        Message::UiMessage(ui_msg) => {
            app.view.update(ui_msg.clone());

            match ui_msg {
                BrowserMessage::ConnectPressed => return app.connect(),
                BrowserMessage::DownloadPressed(filename) => return app.start_download(filename),
                _ => {}
            }
        }
        Message::ListingReceived(result) => {
            app.view.is_connecting = false;
            match result {
                Ok(listing) => app.view.show_files(listing),
                Err(e) => {
                    let title = match e {
                        AppError::AuthOrEmpty => "Authentication Failed",
                        _ => "Connection Error",
                    };
                    app.view.status_message = e.to_string();
                    return alert(title, e.to_string());
                }
            }
        }
        Message::ConfirmationAnswered(accepted) => match app.download.confirm(accepted) {
            Ok(Some(suggested_filename)) => {
                app.view.status_message = format!(
                    "Please select save location for {}...",
                    app.download.filename().unwrap_or_default()
                );

                return Task::perform(
                    async move {
                        rfd::AsyncFileDialog::new()
                            .set_title("Save File")
                            .set_file_name(&suggested_filename)
                            .save_file()
                            .await
                            .map(|handle| handle.path().to_path_buf())
                    },
                    Message::DestinationChosen,
                );
            }
            Ok(None) => app.end_attempt("Download canceled"),
            Err(e) => warn!(error = %e, "stale confirmation"),
        },
        Message::DestinationChosen(path_opt) => match app.download.choose_destination(path_opt) {
            Ok(Some(request)) => {
                app.view.status_message = format!("Downloading to: {}", request.destination.display());
                let api_client = app.api_client.clone();

                return Task::perform(
                    async move { application::execute(&api_client, request).await },
                    Message::DownloadFinished,
                );
            }
            Ok(None) => app.end_attempt("File save canceled"),
            Err(e) => warn!(error = %e, "stale save location"),
        },
        Message::DownloadFinished(outcome) => match app.download.finish(outcome) {
            Ok(outcome) => {
                let status = outcome.to_string();
                let failed = !outcome.is_success();
                app.end_attempt(status.clone());

                if failed {
                    return alert("Download Failed", status);
                }
            }
            Err(e) => warn!(error = %e, "download finished outside an attempt"),
        },
        Message::AlertClosed => {}
    }
    Task::none()
}

pub fn view(app: &FileApp) -> iced::Element<'_, Message> {
    app.view.view().map(Message::UiMessage)
}

fn ask_confirmation(prompt: ConfirmationPrompt) -> Task<Message> {
    Task::perform(
        async move {
            let answer = rfd::AsyncMessageDialog::new()
                .set_level(MessageLevel::Info)
                .set_title("Confirm Download")
                .set_description(prompt.message())
                .set_buttons(MessageButtons::YesNo)
                .show()
                .await;

            matches!(answer, MessageDialogResult::Yes)
        },
        Message::ConfirmationAnswered,
    )
}

fn alert(title: &'static str, description: String) -> Task<Message> {
    Task::perform(
        async move {
            rfd::AsyncMessageDialog::new()
                .set_level(MessageLevel::Error)
                .set_title(title)
                .set_description(description)
                .set_buttons(MessageButtons::Ok)
                .show()
                .await;
        },
        |_| Message::AlertClosed,
    )
}
