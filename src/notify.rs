// Streamio Core - Native core for the Streamio streaming-catalog client
// Copyright (C) 2025 Streamio contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

//! User notifications
//!
//! Composes notification text and gates each category on the stored
//! settings. Actual delivery goes through [`NotificationSink`], which the
//! embedding app implements on top of the platform notification APIs.

use crate::storage::settings::SettingsStore;
use std::sync::Arc;

/// Platform delivery for one notification.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, title: &str, body: &str);
}

/// Settings-aware notification dispatcher.
pub struct Notifier {
    settings: SettingsStore,
    sink: Arc<dyn NotificationSink>,
}

impl Notifier {
    pub fn new(settings: SettingsStore, sink: Arc<dyn NotificationSink>) -> Self {
        Self { settings, sink }
    }

    /// Announce a finished download, success or failure.
    pub fn download_finished(&self, title: &str, succeeded: bool) {
        if !self.settings.get().downloads {
            return;
        }
        if succeeded {
            self.sink.notify(
                "Download Complete",
                &format!("{title} has been downloaded successfully"),
            );
        } else {
            self.sink
                .notify("Download Failed", &format!("Failed to download {title}"));
        }
    }

    pub fn new_content(&self, title: &str) {
        if !self.settings.get().new_content {
            return;
        }
        self.sink.notify(
            "New Content Available",
            &format!("{title} is now available to stream"),
        );
    }

    pub fn recommendation(&self, title: &str) {
        if !self.settings.get().recommendations {
            return;
        }
        self.sink.notify(
            "Recommended for You",
            &format!("Based on your watching history, you might like {title}"),
        );
    }

    pub fn app_update(&self, version: &str) {
        if !self.settings.get().updates {
            return;
        }
        self.sink.notify(
            "Update Available",
            &format!("Streamio {version} is ready to install"),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::backend::MemoryBackend;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSink {
        sent: Mutex<Vec<(String, String)>>,
    }

    impl NotificationSink for RecordingSink {
        fn notify(&self, title: &str, body: &str) {
            self.sent
                .lock()
                .unwrap()
                .push((title.to_string(), body.to_string()));
        }
    }

    fn notifier() -> (Notifier, Arc<RecordingSink>, SettingsStore) {
        let settings = SettingsStore::new(Arc::new(MemoryBackend::new()));
        let sink = Arc::new(RecordingSink::default());
        (
            Notifier::new(settings.clone(), sink.clone()),
            sink,
            settings,
        )
    }

    #[test]
    fn test_download_complete_text() {
        let (notifier, sink, _) = notifier();
        notifier.download_finished("The Matrix", true);

        let sent = sink.sent.lock().unwrap();
        assert_eq!(
            *sent,
            vec![(
                "Download Complete".to_string(),
                "The Matrix has been downloaded successfully".to_string()
            )]
        );
    }

    #[test]
    fn test_download_failed_text() {
        let (notifier, sink, _) = notifier();
        notifier.download_finished("The Matrix", false);

        let sent = sink.sent.lock().unwrap();
        assert_eq!(sent[0].0, "Download Failed");
        assert_eq!(sent[0].1, "Failed to download The Matrix");
    }

    #[test]
    fn test_disabled_category_is_silent() {
        let (notifier, sink, settings) = notifier();
        let mut s = settings.get();
        s.downloads = false;
        settings.save(&s).unwrap();

        notifier.download_finished("The Matrix", true);
        assert!(sink.sent.lock().unwrap().is_empty());

        // other categories remain live
        notifier.new_content("Dune");
        assert_eq!(sink.sent.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_recommendation_and_update_text() {
        let (notifier, sink, _) = notifier();
        notifier.recommendation("Blade Runner");
        notifier.app_update("2.1.0");

        let sent = sink.sent.lock().unwrap();
        assert_eq!(sent[0].0, "Recommended for You");
        assert!(sent[1].1.contains("2.1.0"));
    }
}
