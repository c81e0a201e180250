mod utils;

use std::env;
use std::io::Write;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use op_delegation_frame::config::OPTIMISM_CHAIN_ID;
use op_delegation_frame::screens::APPROVE_PATH;
use op_delegation_frame::{FrameConfig, LogFormat, LogLevel, ScreenRouter};
use utils::test_utils::*;

// from_sources reads process-wide OP_FRAME_* variables
static ENV_LOCK: Mutex<()> = Mutex::new(());

fn env_lock() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}

#[test]
fn test_default_config_values() {
    let config = FrameConfig::default();

    assert_eq!(config.title, "OP Delegation Farcaster");
    assert_eq!(config.chain.chain_id, OPTIMISM_CHAIN_ID);
    assert_eq!(config.token.symbol, "OP");
    assert_eq!(config.token.decimals, 18);
    assert_eq!(config.server.base_path, "/api");
    assert!(config.validate().is_ok());
}

#[test]
fn test_sample_config_file_matches_defaults() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/frame.toml");
    let config = FrameConfig::load(&path).expect("Failed to load sample config");
    assert_eq!(config, FrameConfig::default());
}

#[test]
fn test_partial_file_layers_over_defaults() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        "[contracts]\ntoken = \"{}\"\ndelegate = \"{}\"\n\n[server]\nport = 8081\n",
        TEST_TOKEN, TEST_DELEGATE
    )
    .unwrap();

    let _guard = env_lock();
    let config = FrameConfig::from_sources(Some(file.path())).expect("Failed to layer config");
    assert_eq!(config.contracts.token, TEST_TOKEN);
    assert_eq!(config.contracts.delegate, TEST_DELEGATE);
    assert_eq!(config.server.port, 8081);
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.chain.chain_id, OPTIMISM_CHAIN_ID);
    assert!(config.validate().is_ok());
}

#[test]
fn test_env_overrides_file_and_defaults() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        "[contracts]\ntoken = \"{}\"\n\n[server]\nport = 8081\n",
        TEST_DELEGATE
    )
    .unwrap();

    let _guard = env_lock();
    env::set_var("OP_FRAME_CONTRACTS__TOKEN", TEST_TOKEN);
    env::set_var("OP_FRAME_SERVER__PORT", "8088");
    env::set_var("OP_FRAME_CHAIN__CHAIN_ID", "eip155:11155420");

    let from_file = FrameConfig::from_sources(Some(file.path()));
    let from_defaults = FrameConfig::from_sources(None);

    env::remove_var("OP_FRAME_CONTRACTS__TOKEN");
    env::remove_var("OP_FRAME_SERVER__PORT");
    env::remove_var("OP_FRAME_CHAIN__CHAIN_ID");

    for config in [from_file.unwrap(), from_defaults.unwrap()] {
        assert_eq!(config.contracts.token, TEST_TOKEN);
        assert_eq!(config.server.port, 8088);
        assert_eq!(config.chain.chain_id, "eip155:11155420");
        assert_eq!(config.server.host, "127.0.0.1");
        assert!(config.validate().is_ok());
    }
}

#[test]
fn test_missing_config_file_is_an_error() {
    let result = FrameConfig::from_sources(Some(Path::new("/definitely/not/here.toml")));
    assert!(result.is_err());
}

#[test]
fn test_logging_section_parses() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "[logging]\nlevel = \"debug\"\nformat = \"json\"\n").unwrap();

    let config = FrameConfig::load(&file.path().to_path_buf()).unwrap();
    assert_eq!(config.logging.level, LogLevel::Debug);
    assert_eq!(config.logging.format, LogFormat::Json);
}

#[test]
fn test_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let config = create_test_config();
    config.save(&path).unwrap();
    let loaded = FrameConfig::load(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_injected_contracts_reach_transactions() {
    let router = ScreenRouter::new(create_test_config().with_chain_id("eip155:11155420"));
    let response = router.dispatch(APPROVE_PATH, &ctx_with_input("1")).unwrap();
    let call = response.as_transaction().unwrap();

    assert_eq!(call.to, TEST_TOKEN);
    assert_eq!(call.args[0], TEST_DELEGATE);
    assert_eq!(call.chain_id, "eip155:11155420");
}

#[test]
fn test_decimals_drive_scaling() {
    let mut config = FrameConfig::default();
    config.token.decimals = 6;
    let router = ScreenRouter::new(config);

    let response = router.dispatch(APPROVE_PATH, &ctx_with_input("2.5")).unwrap();
    assert_eq!(response.as_transaction().unwrap().args[1], "2500000");
}
