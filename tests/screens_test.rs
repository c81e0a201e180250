mod utils;

use std::str::FromStr;

use alloy_primitives::Address;
use alloy_sol_types::SolCall;
use op_delegation_frame::config::OP_PREDEPLOY_ADDRESS;
use op_delegation_frame::contract::IVotesToken::{approveCall, delegateCall};
use op_delegation_frame::screens::{
    APPROVE_PATH, DELEGATE_PATH, FINISH_PATH, MAIN_PATH, PERFORM_DELEGATE_PATH,
};
use op_delegation_frame::{
    Error, FrameConfig, FrameResponse, InteractionContext, ScreenRouter, U256,
};
use utils::test_utils::*;

fn approve_args(router: &ScreenRouter, ctx: &InteractionContext) -> Vec<String> {
    let response = router.dispatch(APPROVE_PATH, ctx).unwrap();
    response.as_transaction().expect("approve builds a transaction").args.clone()
}

#[test]
fn test_approve_hundred_tokens() {
    let router = ScreenRouter::new(FrameConfig::default());
    let args = approve_args(&router, &ctx_with_input("100"));
    assert_eq!(
        args,
        vec![
            OP_PREDEPLOY_ADDRESS.to_string(),
            "100000000000000000000".to_string()
        ]
    );
}

#[test]
fn test_approve_empty_and_unparsable_amounts_are_zero() {
    let router = ScreenRouter::new(FrameConfig::default());
    let delegate = OP_PREDEPLOY_ADDRESS.to_string();

    let zero = vec![delegate, "0".to_string()];

    assert_eq!(approve_args(&router, &ctx_with_input("")), zero);
    assert_eq!(approve_args(&router, &InteractionContext::default()), zero);
    assert_eq!(approve_args(&router, &ctx_with_input("ten")), zero);
}

#[test]
fn test_approve_amount_matches_float_truncation() {
    let router = ScreenRouter::new(FrameConfig::default());
    let cases = [
        ("1", 1.0f64),
        ("0.5", 0.5),
        ("12.5", 12.5),
        ("2.75", 2.75),
        ("42", 42.0),
    ];
    for (text, value) in cases {
        let args = approve_args(&router, &ctx_with_input(text));
        let expected = (value * 1e18).trunc() as u128;
        assert_eq!(args[1], expected.to_string(), "amount for {:?}", text);
    }
}

#[test]
fn test_approve_targets_token_and_spender_is_delegate() {
    let router = create_test_router();
    for text in ["", "1", "abc", "-3", "1e100", "0.000000000000000001"] {
        let response = router.dispatch(APPROVE_PATH, &ctx_with_input(text)).unwrap();
        let call = response.as_transaction().unwrap();
        assert_eq!(call.to, TEST_TOKEN);
        assert_eq!(call.args[0], TEST_DELEGATE);
        assert_eq!(call.function_name, "approve");
        assert_eq!(call.chain_id, "eip155:10");
    }
}

#[test]
fn test_delegatee_is_connected_address() {
    let router = create_test_router();
    let response = router
        .dispatch(PERFORM_DELEGATE_PATH, &ctx_with_address(TEST_USER))
        .unwrap();
    let call = response.as_transaction().unwrap();

    assert_eq!(call.to, TEST_DELEGATE);
    assert_eq!(call.function_name, "delegate");
    assert_eq!(call.args, vec![TEST_USER.to_string()]);
}

#[test]
fn test_delegate_without_address_fails() {
    let router = create_test_router();
    let result = router.dispatch(PERFORM_DELEGATE_PATH, &InteractionContext::default());
    assert!(matches!(result, Err(Error::MissingAddress)));
}

#[test]
fn test_calldata_decodes_to_screen_arguments() {
    let router = create_test_router();

    let approve = router.dispatch(APPROVE_PATH, &ctx_with_input("100")).unwrap();
    let encoded = approve.as_transaction().unwrap().encode_calldata().unwrap();
    assert_eq!(encoded[..4], approveCall::SELECTOR);
    let decoded = approveCall::abi_decode(&encoded, true).unwrap();
    assert_eq!(decoded.spender, Address::from_str(TEST_DELEGATE).unwrap());
    assert_eq!(
        decoded.amount,
        U256::from(100u64) * U256::from(10u64).pow(U256::from(18u64))
    );

    let delegate = router
        .dispatch(PERFORM_DELEGATE_PATH, &ctx_with_address(TEST_USER))
        .unwrap();
    let encoded = delegate.as_transaction().unwrap().encode_calldata().unwrap();
    assert_eq!(encoded[..4], delegateCall::SELECTOR);
    let decoded = delegateCall::abi_decode(&encoded, true).unwrap();
    assert_eq!(decoded.delegatee, Address::from_str(TEST_USER).unwrap());
}

#[test]
fn test_delegate_with_malformed_address_fails() {
    let router = create_test_router();
    for address in ["alice", "4200000000000000000000000000000000000042", "0x42"] {
        let result = router.dispatch(PERFORM_DELEGATE_PATH, &ctx_with_address(address));
        assert!(matches!(result, Err(Error::InvalidAddress(_))), "{}", address);
    }
}

#[test]
fn test_finish_echoes_input_verbatim() {
    let router = ScreenRouter::new(FrameConfig::default());

    let ctx = ctx_with_input("12.5").with_transaction_id("0xabc");
    let response = router.dispatch(FINISH_PATH, &ctx).unwrap();
    let view = response.as_frame().unwrap();
    assert_eq!(view.image.lines[0], "Transaction ID: 0xabc");
    assert_eq!(view.image.lines[1], "Amount Delegated: 12.5 OP");

    let response = router.dispatch(FINISH_PATH, &InteractionContext::default()).unwrap();
    assert_eq!(response.as_frame().unwrap().image.lines[1], "Amount Delegated: 0 OP");
}

#[test]
fn test_every_action_and_target_is_registered() {
    let router = ScreenRouter::new(FrameConfig::default());
    let ctx = ctx_with_address(TEST_USER);

    for (path, _) in router.routes() {
        if let FrameResponse::Frame(view) = router.dispatch(path, &ctx).unwrap() {
            assert!(
                router.resolve(&view.action).is_some(),
                "{} has unregistered action {}",
                path,
                view.action
            );
            for target in view.intents.iter().filter_map(|intent| intent.target()) {
                assert!(router.resolve(target).is_some(), "{} targets {}", path, target);
            }
        }
    }
}

#[test]
fn test_flow_walkthrough() {
    let router = ScreenRouter::new(FrameConfig::default());

    // Main -> Approve -> Finish
    let main = router.dispatch(MAIN_PATH, &InteractionContext::default()).unwrap();
    let main = main.as_frame().unwrap();
    assert_eq!(main.action, FINISH_PATH);
    let approve = router.dispatch(APPROVE_PATH, &ctx_with_input("5")).unwrap();
    assert!(approve.as_transaction().is_some());
    let finish = router
        .dispatch(&main.action, &ctx_with_input("5").with_transaction_id("0x01"))
        .unwrap();
    assert_eq!(finish.as_frame().unwrap().action, DELEGATE_PATH);

    // Main -> Delegate -> performDelegate
    let intro = router.dispatch(DELEGATE_PATH, &InteractionContext::default()).unwrap();
    let intro = intro.as_frame().unwrap();
    assert_eq!(intro.action, PERFORM_DELEGATE_PATH);
    let delegate = router.dispatch(&intro.action, &ctx_with_address(TEST_USER)).unwrap();
    assert!(delegate.as_transaction().is_some());
}
