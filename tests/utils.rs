use op_delegation_frame::{FrameConfig, InteractionContext, ScreenRouter};

#[cfg(test)]
#[allow(dead_code)]
pub mod test_utils {
    use super::*;

    /// Token contract used by alternate-deployment tests
    pub const TEST_TOKEN: &str = "0x1111111111111111111111111111111111111111";

    /// Delegate contract used by alternate-deployment tests
    pub const TEST_DELEGATE: &str = "0x2222222222222222222222222222222222222222";

    /// Connected wallet address
    pub const TEST_USER: &str = "0x3333333333333333333333333333333333333333";

    /// Configuration pointing at distinct token and delegate contracts
    pub fn create_test_config() -> FrameConfig {
        FrameConfig::default()
            .with_token_contract(TEST_TOKEN)
            .with_delegate_contract(TEST_DELEGATE)
    }

    pub fn create_test_router() -> ScreenRouter {
        ScreenRouter::new(create_test_config())
    }

    /// Interaction carrying only text input
    pub fn ctx_with_input(text: &str) -> InteractionContext {
        InteractionContext::default().with_input_text(text)
    }

    /// Interaction from a connected wallet
    pub fn ctx_with_address(address: &str) -> InteractionContext {
        InteractionContext::default().with_address(address)
    }
}
