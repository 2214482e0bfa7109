use asrs_storage::objects::BoxFuture;

/// The two answers a confirmation prompt can give.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Cancel,
    Confirm,
}

/// Text for a two-button confirmation dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmRequest {
    pub title: &'static str,
    pub message: &'static str,
    pub cancel_label: &'static str,
    pub confirm_label: &'static str,
}

pub const RESET_REQUEST: ConfirmRequest = ConfirmRequest {
    title: "Reset Assessment",
    message: "Are you sure you want to start over? All progress will be lost.",
    cancel_label: "Cancel",
    confirm_label: "Reset",
};

/// Asks the user to confirm a destructive action.
///
/// Implementations resolve only once the user has chosen; they must never
/// answer [`Confirmation::Confirm`] on the user's behalf.
pub trait ConfirmPrompt: Send + Sync {
    fn confirm<'a>(&'a self, request: &'a ConfirmRequest) -> BoxFuture<'a, Confirmation>;
}
