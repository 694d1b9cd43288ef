/*
 * Test utilities and mock helpers for ilofan
 *
 * Builders for mocked controller clients and pre-loaded App states that are
 * shared between the unit test modules.
 */

use crate::api::MockFanApi;
use crate::app::App;
use crate::error::ApiError;

pub const TEST_BASE_URL: &str = "http://ilo.test:1234";

/// A mock whose single fetch returns `fans`
pub fn mock_with_fans(fans: Vec<u8>) -> MockFanApi {
    let mut mock = MockFanApi::new();
    mock.expect_fetch_fans()
        .times(1)
        .returning(move || Ok(fans.clone()));
    mock
}

/// A mock whose fetch fails like a controller that is not running
pub fn mock_unreachable() -> MockFanApi {
    let mut mock = MockFanApi::new();
    mock.expect_fetch_fans()
        .times(1)
        .returning(|| Err(ApiError::network("connection refused")));
    mock
}

pub fn app_with_mock(mock: MockFanApi) -> App {
    App::new(Box::new(mock), TEST_BASE_URL)
}

/// 8 fan blocks at 35%, as after a failed startup load
pub fn fallback_app() -> App {
    app_with_mock(mock_unreachable())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_app_shape() {
        let app = fallback_app();
        assert_eq!(app.num_fans(), 8);
        assert_eq!(app.base_url(), TEST_BASE_URL);
    }

    #[test]
    fn test_mock_with_fans_loads_values() {
        let app = app_with_mock(mock_with_fans(vec![1, 2, 3]));
        assert_eq!(app.fans(), &[1, 2, 3]);
    }
}
