//! The five screens of the approve-and-delegate flow.
//!
//! ```text
//! Main ──/approve (tx)──▶ Finish ──▶ DelegateIntro ──/performDelegate (tx)
//!   └───/delegate──────────────────▶ DelegateIntro
//! ```
//!
//! Each handler is a pure function of the shared configuration and the current
//! interaction. Frame screens return a [`FrameView`], transaction screens a
//! [`ContractCall`].

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::amount::approve_amount;
use crate::config::FrameConfig;
use crate::contract::{approve_abi, delegate_abi, parse_address, ContractCall};
use crate::error::{Error, Result};
use crate::frame::{
    FlexDirection, FrameResponse, FrameView, ImageSpec, ImageStyle, InteractionContext, Intent,
};

pub const MAIN_PATH: &str = "/";
pub const FINISH_PATH: &str = "/finish";
pub const APPROVE_PATH: &str = "/approve";
pub const DELEGATE_PATH: &str = "/delegate";
pub const PERFORM_DELEGATE_PATH: &str = "/performDelegate";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Screen {
    Main,
    Finish,
    ApprovalTransaction,
    DelegateIntro,
    DelegateTransaction,
}

impl Screen {
    pub const ALL: [Screen; 5] = [
        Screen::Main,
        Screen::Finish,
        Screen::ApprovalTransaction,
        Screen::DelegateIntro,
        Screen::DelegateTransaction,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Screen::Main => MAIN_PATH,
            Screen::Finish => FINISH_PATH,
            Screen::ApprovalTransaction => APPROVE_PATH,
            Screen::DelegateIntro => DELEGATE_PATH,
            Screen::DelegateTransaction => PERFORM_DELEGATE_PATH,
        }
    }

    /// Run this screen's handler
    pub fn handle(&self, config: &FrameConfig, ctx: &InteractionContext) -> Result<FrameResponse> {
        match self {
            Screen::Main => Ok(FrameResponse::Frame(main_screen(config))),
            Screen::Finish => Ok(FrameResponse::Frame(finish_screen(config, ctx))),
            Screen::ApprovalTransaction => {
                approve_transaction(config, ctx).map(FrameResponse::Transaction)
            }
            Screen::DelegateIntro => Ok(FrameResponse::Frame(delegate_intro_screen(config))),
            Screen::DelegateTransaction => {
                delegate_transaction(config, ctx).map(FrameResponse::Transaction)
            }
        }
    }
}

/// Prompt for an amount and offer the approve and delegate buttons
pub fn main_screen(config: &FrameConfig) -> FrameView {
    let symbol = &config.token.symbol;
    FrameView {
        title: config.title.clone(),
        action: FINISH_PATH.to_string(),
        image: ImageSpec {
            lines: vec![format!("Approve the amount of {} to delegate", symbol)],
            style: ImageStyle::headline(FlexDirection::Column),
        },
        intents: vec![
            Intent::text_input(format!("Amount to Approve ({})", symbol)),
            Intent::transaction(APPROVE_PATH, format!("Approve {}", symbol)),
            Intent::transaction(DELEGATE_PATH, format!("Delegate {}", symbol)),
        ],
    }
}

/// Echo the submitted transaction and the entered amount
pub fn finish_screen(config: &FrameConfig, ctx: &InteractionContext) -> FrameView {
    let transaction_id = ctx.transaction_id.as_deref().unwrap_or_default();
    let amount = match ctx.input_text.as_deref() {
        Some(text) if !text.is_empty() => text,
        _ => "0",
    };

    FrameView {
        title: config.title.clone(),
        action: DELEGATE_PATH.to_string(),
        image: ImageSpec {
            lines: vec![
                format!("Transaction ID: {}", transaction_id),
                format!("Amount Delegated: {} {}", amount, config.token.symbol),
            ],
            style: ImageStyle::headline(FlexDirection::Column),
        },
        intents: Vec::new(),
    }
}

/// Confirm the approval and offer the delegate transaction
pub fn delegate_intro_screen(config: &FrameConfig) -> FrameView {
    let symbol = &config.token.symbol;
    FrameView {
        title: config.title.clone(),
        action: PERFORM_DELEGATE_PATH.to_string(),
        image: ImageSpec {
            lines: vec![format!(
                "Approve completed. Now delegate your {} tokens.",
                symbol
            )],
            style: ImageStyle::headline(FlexDirection::Row),
        },
        intents: vec![Intent::transaction(
            PERFORM_DELEGATE_PATH,
            format!("Delegate {}", symbol),
        )],
    }
}

/// `approve(delegate contract, amount)` on the token contract
pub fn approve_transaction(
    config: &FrameConfig,
    ctx: &InteractionContext,
) -> Result<ContractCall> {
    let amount = approve_amount(ctx.input_text.as_deref(), config.token.decimals);

    info!(
        spender = %config.contracts.delegate,
        amount = %amount,
        "Building approve transaction"
    );

    ContractCall::new(
        config.contracts.token.clone(),
        approve_abi(),
        "approve",
        vec![config.contracts.delegate.clone(), amount.to_string()],
        config.chain.chain_id.clone(),
    )
}

/// `delegate(connected address)` on the delegate contract
pub fn delegate_transaction(
    config: &FrameConfig,
    ctx: &InteractionContext,
) -> Result<ContractCall> {
    let delegatee = ctx.address.as_deref().ok_or(Error::MissingAddress)?;
    parse_address(delegatee)?;

    info!(delegatee = %delegatee, "Building delegate transaction");

    ContractCall::new(
        config.contracts.delegate.clone(),
        delegate_abi(),
        "delegate",
        vec![delegatee.to_string()],
        config.chain.chain_id.clone(),
    )
}
