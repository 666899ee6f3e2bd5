//! The shared accessor lives for the whole test process, so everything that
//! touches it runs in a single test.

use qbot_core::State;
use qbot_rl::{shared, AgentConfig};

#[test]
fn test_shared_agent_lifecycle() {
    assert!(!shared::is_initialized());

    let first = shared::get_agent();
    let second = shared::get_agent();
    assert!(std::ptr::eq(first, second));
    assert!(shared::is_initialized());

    // Too late to install a custom configuration
    assert!(shared::init_agent(AgentConfig::default()).is_err());

    let mut agent = first.lock().unwrap();
    let state = State::zeros();
    agent.update(&state, 0, 1.0, &state).unwrap();
    drop(agent);

    assert_eq!(second.lock().unwrap().stats().total_updates, 1);
}
