//! Request and response shapes exchanged with the frame client.

use serde::{Deserialize, Serialize};

use crate::contract::ContractCall;

/// Per-request data supplied by the hosting layer
///
/// Screens only read it. Nothing from one interaction is carried into the next except what
/// the client sends back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionContext {
    /// Text typed into the frame's text input
    pub input_text: Option<String>,
    /// Hash of the transaction the wallet just submitted
    pub transaction_id: Option<String>,
    /// Connected wallet address
    pub address: Option<String>,
    /// 1-based index of the pressed button
    pub button_index: Option<u8>,
    /// Farcaster id of the interacting user
    pub fid: Option<u64>,
}

impl InteractionContext {
    pub fn with_input_text(mut self, text: impl Into<String>) -> Self {
        self.input_text = Some(text.into());
        self
    }

    pub fn with_transaction_id(mut self, id: impl Into<String>) -> Self {
        self.transaction_id = Some(id.into());
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }
}

/// Frame action body POSTed by the client
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameActionPayload {
    #[serde(default)]
    pub untrusted_data: UntrustedData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trusted_data: Option<TrustedData>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UntrustedData {
    pub fid: Option<u64>,
    pub url: Option<String>,
    pub message_hash: Option<String>,
    pub timestamp: Option<u64>,
    pub network: Option<u64>,
    pub button_index: Option<u8>,
    pub input_text: Option<String>,
    pub address: Option<String>,
    pub transaction_id: Option<String>,
    pub state: Option<String>,
    pub cast_id: Option<CastId>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CastId {
    pub fid: u64,
    pub hash: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustedData {
    pub message_bytes: String,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl From<FrameActionPayload> for InteractionContext {
    fn from(payload: FrameActionPayload) -> Self {
        let data = payload.untrusted_data;
        Self {
            input_text: non_empty(data.input_text),
            transaction_id: non_empty(data.transaction_id),
            address: non_empty(data.address),
            button_index: data.button_index,
            fid: data.fid,
        }
    }
}

/// Flex direction of the image's text block
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum FlexDirection {
    Row,
    Column,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImageStyle {
    pub color: String,
    pub display: String,
    pub flex_direction: FlexDirection,
    pub font_size: u32,
}

impl ImageStyle {
    /// White flex text at font size 60
    pub fn headline(flex_direction: FlexDirection) -> Self {
        Self {
            color: "white".to_string(),
            display: "flex".to_string(),
            flex_direction,
            font_size: 60,
        }
    }
}

/// What the hosting layer should draw on the card
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageSpec {
    pub lines: Vec<String>,
    pub style: ImageStyle,
}

/// A selectable action on a screen
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Intent {
    /// Free-text input field
    TextInput { placeholder: String },
    /// Button that asks the wallet to sign the transaction served at `target`
    Transaction { target: String, label: String },
}

impl Intent {
    pub fn text_input(placeholder: impl Into<String>) -> Self {
        Intent::TextInput {
            placeholder: placeholder.into(),
        }
    }

    pub fn transaction(target: impl Into<String>, label: impl Into<String>) -> Self {
        Intent::Transaction {
            target: target.into(),
            label: label.into(),
        }
    }

    /// Path this intent posts to, if any
    pub fn target(&self) -> Option<&str> {
        match self {
            Intent::TextInput { .. } => None,
            Intent::Transaction { target, .. } => Some(target.as_str()),
        }
    }
}

/// Render description for a frame screen
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FrameView {
    pub title: String,
    /// Path the client posts to after this screen
    pub action: String,
    pub image: ImageSpec,
    pub intents: Vec<Intent>,
}

/// Outcome of handling one interaction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FrameResponse {
    Frame(FrameView),
    Transaction(ContractCall),
}

impl FrameResponse {
    pub fn as_frame(&self) -> Option<&FrameView> {
        match self {
            FrameResponse::Frame(view) => Some(view),
            FrameResponse::Transaction(_) => None,
        }
    }

    pub fn as_transaction(&self) -> Option<&ContractCall> {
        match self {
            FrameResponse::Frame(_) => None,
            FrameResponse::Transaction(call) => Some(call),
        }
    }
}
