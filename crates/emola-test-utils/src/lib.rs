pub mod helpers;
pub mod mock_caller;
pub mod stub_server;

pub use helpers::*;
pub use mock_caller::{MockSoapCaller, RecordedCall};
pub use stub_server::{RecordedRequest, StubReply, StubServer, STUB_PATH};
