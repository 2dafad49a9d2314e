mod clock_mock;
mod device_mock;
mod prompt_mock;
mod transport_mock;

pub use clock_mock::ManualClock;
pub use device_mock::DeviceMock;
pub use prompt_mock::PromptMock;
pub use transport_mock::{RecordedRequest, TransportMock};
