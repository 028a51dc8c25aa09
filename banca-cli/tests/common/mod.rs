//! In-process backend for driving the console end to end.

use std::convert::Infallible;
use std::sync::Arc;
use std::sync::Mutex;

use http_body_util::BodyExt;
use http_body_util::Full;
use hyper::Request;
use hyper::Response;
use hyper::body::Bytes;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;

/// A request as seen by the server.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    /// Path and query, e.g. `/api/clientes?x=1`.
    pub uri: String,
    pub body: String,
}

type Route = dyn Fn(&Recorded) -> (u16, String) + Send + Sync;

pub struct MockServer {
    pub url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl MockServer {
    /// Starts a server answering every request with `route`.
    pub async fn start<F>(route: F) -> Self
    where
        F: Fn(&Recorded) -> (u16, String) + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let route: Arc<Route> = Arc::new(route);

        let log = requests.clone();
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let route = route.clone();
                let log = log.clone();
                tokio::spawn(async move {
                    let service = service_fn(move |req: Request<Incoming>| {
                        let route = route.clone();
                        let log = log.clone();
                        async move {
                            let method = req.method().to_string();
                            let uri = req.uri().to_string();
                            let body = req
                                .into_body()
                                .collect()
                                .await
                                .map(|b| b.to_bytes())
                                .unwrap_or_default();
                            let recorded = Recorded {
                                method,
                                uri,
                                body: String::from_utf8_lossy(&body).into_owned(),
                            };

                            let (status, payload) = route(&recorded);
                            log.lock().unwrap().push(recorded);

                            Ok::<_, Infallible>(
                                Response::builder()
                                    .status(status)
                                    .header("content-type", "application/json")
                                    .body(Full::new(Bytes::from(payload)))
                                    .unwrap(),
                            )
                        }
                    });
                    let _ = http1::Builder::new()
                        .serve_connection(TokioIo::new(stream), service)
                        .await;
                });
            }
        });

        Self {
            url: format!("http://{}", addr),
            requests,
        }
    }

    /// Starts a server that always answers `status` with `body`.
    pub async fn respond(status: u16, body: &str) -> Self {
        let body = body.to_string();
        Self::start(move |_| (status, body.clone())).await
    }

    /// Starts a server answering `"METHOD /path"` keys from `routes`, and
    /// 404 for anything else. The query string is ignored for matching.
    pub async fn routes(routes: &[(&str, u16, &str)]) -> Self {
        let routes: Vec<(String, u16, String)> = routes
            .iter()
            .map(|(key, status, body)| (key.to_string(), *status, body.to_string()))
            .collect();
        Self::start(move |req| {
            let path = req.uri.split('?').next().unwrap_or_default();
            let key = format!("{} {}", req.method, path);
            routes
                .iter()
                .find(|(k, _, _)| *k == key)
                .map(|(_, status, body)| (*status, body.clone()))
                .unwrap_or((404, r#"{"message":"Recurso no encontrado"}"#.to_string()))
        })
        .await
    }

    pub fn client(&self) -> banca_lib::BancaClient {
        banca_lib::BancaClient::builder().url(&self.url).build().unwrap()
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    /// `"METHOD /path?query"` for every request, in order.
    pub fn calls(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| format!("{} {}", r.method, r.uri))
            .collect()
    }
}
