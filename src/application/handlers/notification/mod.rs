//! Notification handlers.

mod verify_notification;

pub use verify_notification::{VerifyNotificationCommand, VerifyNotificationHandler};
