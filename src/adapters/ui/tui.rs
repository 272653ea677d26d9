//! Implements InputPort. Inquire-based interactive prompts.
//!
//! Gathers whatever the config didn't provide (file path, token, phone
//! number id), loads the sheet, confirms, and hands off to DispatchService.

use crate::adapters::ingest::CsvRecipientSource;
use crate::domain::{Credentials, DomainError};
use crate::ports::{InputPort, RecipientSource};
use crate::shared::config::AppConfig;
use crate::usecases::DispatchService;
use async_trait::async_trait;
use inquire::{Confirm, Password, Text};
use std::sync::Arc;

/// TUI adapter. Inquire prompts.
pub struct TuiInputPort {
    dispatch: Arc<DispatchService>,
    cfg: Arc<AppConfig>,
}

impl TuiInputPort {
    pub fn new(dispatch: Arc<DispatchService>, cfg: Arc<AppConfig>) -> Self {
        Self { dispatch, cfg }
    }

    fn prompt_text(label: &str) -> Result<String, DomainError> {
        Text::new(label)
            .prompt()
            .map_err(|e| DomainError::Input(e.to_string()))
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        let csv_path = match self.cfg.csv_path.clone() {
            Some(path) => path,
            None => Self::prompt_text("Recipient CSV file:")?,
        };
        let access_token = match self.cfg.access_token.clone() {
            Some(token) => token,
            None => Password::new("WhatsApp access token:")
                .without_confirmation()
                .prompt()
                .map_err(|e| DomainError::Input(e.to_string()))?,
        };
        let phone_number_id = match self.cfg.phone_number_id.clone() {
            Some(id) => id,
            None => Self::prompt_text("WhatsApp phone number id:")?,
        };

        let credentials = Credentials::new(access_token, phone_number_id);
        credentials.validate()?;

        let recipients = CsvRecipientSource::new(&csv_path).load().await?;
        if recipients.is_empty() {
            println!("Recipient list is empty; nothing to send.");
            return Ok(());
        }

        let proceed = Confirm::new(&format!(
            "Send the template to {} recipients?",
            recipients.len()
        ))
        .with_default(false)
        .prompt()
        .map_err(|e| DomainError::Input(e.to_string()))?;
        if !proceed {
            println!("Aborted.");
            return Ok(());
        }

        let stats = self.dispatch.run_batch(&recipients, &credentials).await?;
        println!(
            "Batch finished: {}/{} messages sent, {} failed.",
            stats.succeeded, stats.total, stats.failed
        );
        Ok(())
    }
}
