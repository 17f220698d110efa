use serde::Serialize;

use super::view::Element;

/// Lifecycle of a create or edit modal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum ModalStatus {
    Editing,
    Submitting,
    Failed(String),
    Closed,
}

impl ModalStatus {
    pub fn is_closed(&self) -> bool {
        matches!(self, ModalStatus::Closed)
    }

    pub(crate) fn error_notice(&self) -> Option<Element> {
        match self {
            ModalStatus::Failed(message) => Some(Element::ErrorNotice {
                message: message.clone(),
            }),
            _ => None,
        }
    }
}

/// Invoked once when the modal should be dismissed.
pub type CloseCallback = Box<dyn FnMut() + Send>;

/// Wraps the modal body the way every modal is framed.
pub(crate) fn modal_content(body: Vec<Element>) -> Element {
    Element::section(
        "ModalContent",
        vec![Element::section("PulseEdit ml-auto mr-auto mb4", body)],
    )
}
