use chat_log::Message;

use crate::session::SessionStatus;

/// Presentation surface notified by the session controller.
///
/// Implementations render state; they never mutate the conversation log or
/// the credential store directly.
pub trait SessionFrontend {
    /// A message was appended to the conversation log.
    fn on_message_appended(&mut self, message: &Message);

    /// The derived session status changed.
    fn on_status_changed(&mut self, status: SessionStatus);

    /// A submission was blocked because no credential is present.
    fn on_credential_requested(&mut self);

    /// A user-visible failure occurred.
    fn on_error(&mut self, message: &str);
}
