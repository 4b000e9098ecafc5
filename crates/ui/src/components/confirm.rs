//! Native yes/no confirmation

use async_trait::async_trait;
use community_engine::Confirm;
use rfd::{AsyncMessageDialog, MessageButtons, MessageDialogResult, MessageLevel};

/// Confirmation through the platform message box
#[derive(Debug, Clone, Copy, Default)]
pub struct RfdConfirm;

#[async_trait(?Send)]
impl Confirm for RfdConfirm {
    async fn confirm(&self, message: &str) -> bool {
        let answer = AsyncMessageDialog::new()
            .set_title(crate::NAME)
            .set_description(message)
            .set_level(MessageLevel::Warning)
            .set_buttons(MessageButtons::YesNo)
            .show()
            .await;
        answer == MessageDialogResult::Yes
    }
}
