//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use swapi_catalog_client::header::HeaderMap;
use swapi_catalog_client::{ClientConfig, ClientError, HttpTransport, RawResponse, SwapiClient};

pub const TEST_BASE_URL: &str = "https://test.com/api";

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// 断言 `Result` 为 `Err`，并解包返回错误值。
#[macro_export]
macro_rules! require_err {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_err(), "expected Err(..), got {res:?}");
        let Err(err) = res else {
            return;
        };
        err
    }};
}

/// One recorded request.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: String,
    pub headers: HeaderMap,
}

/// Transport that replays a script of responses and records every request.
///
/// Once the script runs out, the last entry is repeated.
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Result<RawResponse, ClientError>>>,
    last: Mutex<Option<Result<RawResponse, ClientError>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedTransport {
    pub fn new(script: Vec<Result<RawResponse, ClientError>>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            last: Mutex::new(None),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Always answer `status` with `body`.
    pub fn always(status: u16, body: &str) -> Arc<Self> {
        Self::new(vec![Ok(RawResponse::new(status, body))])
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or_default()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn get(&self, url: &str, headers: &HeaderMap) -> Result<RawResponse, ClientError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(RecordedRequest {
                url: url.to_string(),
                headers: headers.clone(),
            });
        }

        let next = self.script.lock().ok().and_then(|mut s| s.pop_front());
        let mut last = self.last.lock().map_err(|_| ClientError::NetworkError {
            detail: "poisoned".to_string(),
        })?;
        match next {
            Some(entry) => {
                *last = Some(entry.clone());
                entry
            }
            None => last.clone().unwrap_or_else(|| {
                Err(ClientError::NetworkError {
                    detail: "script exhausted".to_string(),
                })
            }),
        }
    }
}

/// Client over `transport` with a short retry delay.
pub fn test_client(transport: Arc<ScriptedTransport>) -> SwapiClient {
    test_client_with(ClientConfig::default(), transport)
}

pub fn test_client_with(config: ClientConfig, transport: Arc<ScriptedTransport>) -> SwapiClient {
    let config = config
        .with_base_url(TEST_BASE_URL)
        .with_retry_delay(Duration::from_millis(1000));
    SwapiClient::with_transport(config, transport)
}

pub fn network_error(detail: &str) -> Result<RawResponse, ClientError> {
    Err(ClientError::NetworkError {
        detail: detail.to_string(),
    })
}

pub fn ok_json(body: &str) -> Result<RawResponse, ClientError> {
    Ok(RawResponse::new(200, body))
}

pub const LUKE_JSON: &str = r#"{
    "name": "Luke Skywalker",
    "height": "172",
    "mass": "77",
    "hair_color": "blond",
    "skin_color": "fair",
    "eye_color": "blue",
    "birth_year": "19BBY",
    "gender": "male",
    "homeworld": "https://swapi.info/api/planets/1/",
    "films": [],
    "species": [],
    "vehicles": [],
    "starships": [],
    "created": "2014-12-09T13:50:51.644000Z",
    "edited": "2014-12-20T21:17:56.891000Z",
    "url": "https://swapi.info/api/people/1/"
}"#;

pub const TATOOINE_JSON: &str = r#"{
    "name": "Tatooine",
    "rotation_period": "23",
    "orbital_period": "304",
    "diameter": "10465",
    "climate": "arid",
    "gravity": "1 standard",
    "terrain": "desert",
    "surface_water": "1",
    "population": "200000",
    "residents": [],
    "films": [],
    "created": "2014-12-09T13:50:49.641000Z",
    "edited": "2014-12-20T20:58:18.411000Z",
    "url": "https://swapi.info/api/planets/1/"
}"#;
