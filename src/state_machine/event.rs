//! Events that drive a submission

use crate::history::Response;
use crate::image::ImageError;

/// Events that trigger state transitions
#[derive(Debug, Clone)]
pub enum Event {
    /// The message has been recorded
    Submit,
    /// Start producing the response
    Begin,
    /// Transform finished or image arrived
    WorkSucceeded { response: Response },
    /// Image request failed
    WorkFailed { error: ImageError },
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::Submit => "submit",
            Event::Begin => "begin",
            Event::WorkSucceeded { .. } => "work_succeeded",
            Event::WorkFailed { .. } => "work_failed",
        }
    }
}
