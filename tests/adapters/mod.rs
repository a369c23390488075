// Mock implementations and fixtures for adapter layer testing
#![allow(dead_code)]

pub mod fixtures;
pub mod mock_command;
pub mod mock_transport;

pub use fixtures::TestSigner;
pub use mock_command::MockCommandHandler;
pub use mock_transport::{MockTransport, TEST_TOKEN, mock_client};
