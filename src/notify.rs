use tokio::sync::mpsc::{self, Receiver, Sender};
use tokio::sync::mpsc::error::TrySendError;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
    Warning,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Success => "success",
            Level::Error => "error",
            Level::Warning => "warning",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub message: String,
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.level.as_str(), self.message)
    }
}

/// producer side of the notification queue. sending never waits, a
/// notification that does not fit is dropped
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: Sender<Notification>,
}

impl Notifier {
    pub fn channel(capacity: usize) -> (Notifier, Receiver<Notification>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));

        (Notifier { tx }, rx)
    }

    /// returns false if the notification was dropped
    pub fn notify<M>(&self, level: Level, message: M) -> bool
    where
        M: Into<String>
    {
        let notification = Notification {
            level,
            message: message.into(),
        };

        match self.tx.try_send(notification) {
            Ok(()) => true,
            Err(TrySendError::Full(dropped)) => {
                tracing::warn!("notification queue full, dropping: {}", dropped);

                false
            },
            Err(TrySendError::Closed(dropped)) => {
                tracing::warn!("notification queue closed, dropping: {}", dropped);

                false
            }
        }
    }

    pub fn success<M>(&self, message: M) -> bool
    where
        M: Into<String>
    {
        self.notify(Level::Success, message)
    }

    pub fn error<M>(&self, message: M) -> bool
    where
        M: Into<String>
    {
        self.notify(Level::Error, message)
    }

    pub fn warning<M>(&self, message: M) -> bool
    where
        M: Into<String>
    {
        self.notify(Level::Warning, message)
    }
}

/// drains the queue onto stdout until every [`Notifier`] is dropped
pub fn spawn_printer(mut rx: Receiver<Notification>) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(notification) = rx.recv().await {
            println!("{}", notification);
        }
    })
}
