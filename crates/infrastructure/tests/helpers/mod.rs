mod control_api_mock;

pub use control_api_mock::*;
