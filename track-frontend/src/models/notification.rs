use serde::Serialize;

/// Success toast shown by the dashboard after an action. Failures are
/// reported through the error body instead.
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub message: String,
}

/// Envelope returned by every successful mutation.
#[derive(Debug, Serialize)]
pub struct ActionResponse<T: Serialize> {
    pub data: T,
    pub notification: Notification,
}

impl<T: Serialize> ActionResponse<T> {
    pub fn new(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            notification: Notification {
                message: message.into(),
            },
        }
    }
}
