//! Background fetch task for the member directory.
//!
//! The App holds the single-flight flag; this module only runs the fetch
//! and reports back through the message bus. A reload requested while a
//! fetch is in flight never reaches here.

use tokio::sync::mpsc;

use roster_core::fetch;

use crate::app::AppMessage;

pub fn spawn(url: String, tx: mpsc::Sender<AppMessage>) {
    tokio::spawn(async move {
        let _ = tx.send(AppMessage::LoadStarted).await;
        let result = fetch::fetch_members(&url).await;
        if let Err(e) = &result {
            tracing::warn!("member load failed: {e}");
        }
        let _ = tx.send(AppMessage::LoadFinished(result)).await;
    });
}
