//! Internal bus carrying account lifecycle notifications.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use serde::{Deserialize, Serialize};

use crate::domain::settings::NewSettings;
use crate::repository::SettingsWriter;

/// Typed messages published when an account changes.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum UserEvent {
    Created { user_id: i32, username: String },
}

/// Publishing half of the bus, shared with the HTTP handlers.
#[derive(Clone)]
pub struct EventBus {
    tx: Sender<UserEvent>,
}

impl EventBus {
    /// Creates the bus together with its consuming end.
    pub fn channel() -> (Self, Receiver<UserEvent>) {
        let (tx, rx) = mpsc::channel();
        (Self { tx }, rx)
    }

    /// Publishes an event. A failed send is logged and swallowed.
    pub fn publish(&self, event: UserEvent) {
        if let Err(e) = self.tx.send(event) {
            log::error!("Failed to publish user event: {e}");
        }
    }
}

/// Starts the background consumer that provisions default settings for
/// created accounts. Runs until every publishing handle is dropped.
pub fn start_provisioner<R>(rx: Receiver<UserEvent>, repo: R) -> thread::JoinHandle<()>
where
    R: SettingsWriter + Send + 'static,
{
    thread::spawn(move || {
        for event in rx {
            match event {
                UserEvent::Created { user_id, username } => {
                    match repo.create_settings(&NewSettings::default_for(user_id)) {
                        Ok(_) => {
                            log::info!("Provisioned default settings for user {username}");
                        }
                        Err(e) => {
                            log::error!("Failed to provision settings for user {username}: {e}");
                        }
                    }
                }
            }
        }
    })
}
