pub mod amount;
pub mod config;
pub mod contract;
pub mod error;
pub mod frame;
pub mod logging;
pub mod router;
pub mod screens;
pub mod server;

pub use config::{ChainConfig, ContractAddresses, FrameConfig, ServerConfig, TokenInfo};
pub use contract::{AbiFunction, AbiParam, ContractCall, TransactionRequest};
pub use error::Error;
pub use frame::{FrameActionPayload, FrameResponse, FrameView, InteractionContext, Intent};
pub use logging::{setup_logging, LogFormat, LogLevel, LoggingConfig};
pub use router::ScreenRouter;
pub use screens::Screen;
pub use server::{build_router, serve};

// Re-export the EVM primitives used in public signatures
pub use alloy_primitives::U256;
