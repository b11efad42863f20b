pub mod commands;
pub mod config;
pub mod controller;
pub mod keys;
pub mod notify;
pub mod poller;

pub use commands::CommandContext;
pub use config::AppConfig;
pub use controller::ListController;
pub use notify::{Notification, NotificationKind, Notifier};
pub use poller::{spawn_queue_poller, PollerHandle};
