use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use http::Method;
use pasteup_core::{PasteError, PasteResult};

use crate::transport::{HttpClient, HttpRequest, HttpResponse};

enum Reply {
    Response(HttpResponse),
    Error(PasteError),
}

impl Reply {
    fn produce(&self) -> PasteResult<HttpResponse> {
        match self {
            Reply::Response(response) => Ok(response.clone()),
            Reply::Error(err) => Err(err.clone()),
        }
    }
}

struct Route {
    method: Method,
    url: String,
    prefix: bool,
    replies: VecDeque<Reply>,
}

impl Route {
    fn matches(&self, method: &Method, url: &str) -> bool {
        self.method == *method
            && if self.prefix {
                url.starts_with(&self.url)
            } else {
                self.url == url
            }
    }
}

/// In-memory [`HttpClient`] with scripted replies.
///
/// Replies for a route are served in the order they were added; the last one repeats.
/// Exact routes win over prefix routes. A request with no matching route fails with a
/// `Network` error naming it.
#[derive(Default)]
pub struct ScriptedHttpClient {
    routes: Mutex<Vec<Route>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for `method url`.
    pub fn on(
        &self,
        method: Method,
        url: impl Into<String>,
        status: u16,
        body: impl Into<Bytes>,
    ) -> &Self {
        let reply = Reply::Response(HttpResponse::new(status, body));
        self.push(method, url.into(), false, reply);
        self
    }

    /// Queue a response for every `method` request whose URL starts with `prefix`.
    ///
    /// Useful when the URL embeds a generated file name.
    pub fn on_prefix(
        &self,
        method: Method,
        prefix: impl Into<String>,
        status: u16,
        body: impl Into<Bytes>,
    ) -> &Self {
        let reply = Reply::Response(HttpResponse::new(status, body));
        self.push(method, prefix.into(), true, reply);
        self
    }

    /// Queue a transport-level failure for `method url`.
    pub fn fail(&self, method: Method, url: impl Into<String>, err: PasteError) -> &Self {
        self.push(method, url.into(), false, Reply::Error(err));
        self
    }

    fn push(&self, method: Method, url: String, prefix: bool, reply: Reply) {
        let mut routes = self.routes.lock().unwrap();
        match routes
            .iter_mut()
            .find(|r| r.method == method && r.url == url && r.prefix == prefix)
        {
            Some(route) => route.replies.push_back(reply),
            None => routes.push(Route {
                method,
                url,
                prefix,
                replies: VecDeque::from([reply]),
            }),
        }
    }

    /// Every request received, in order.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// `(method, url)` of every request received, in order.
    pub fn calls(&self) -> Vec<(Method, String)> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| (r.method.clone(), r.url.clone()))
            .collect()
    }

    pub fn count(&self, method: Method, url: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.method == method && r.url == url)
            .count()
    }

    pub fn count_prefix(&self, method: Method, prefix: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.method == method && r.url.starts_with(prefix))
            .count()
    }

    pub fn count_method(&self, method: Method) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.method == method)
            .count()
    }
}

#[async_trait]
impl HttpClient for ScriptedHttpClient {
    async fn request(&self, request: HttpRequest) -> PasteResult<HttpResponse> {
        let reply = {
            let mut routes = self.routes.lock().unwrap();
            let index = routes
                .iter()
                .position(|r| !r.prefix && r.matches(&request.method, &request.url))
                .or_else(|| {
                    routes
                        .iter()
                        .position(|r| r.matches(&request.method, &request.url))
                });
            index
                .and_then(|i| routes.get_mut(i))
                .and_then(|route| {
                    if route.replies.len() > 1 {
                        route.replies.pop_front().map(|r| r.produce())
                    } else {
                        route.replies.front().map(Reply::produce)
                    }
                })
        };

        let outcome = reply.unwrap_or_else(|| {
            Err(PasteError::Network(format!(
                "unscripted request: {} {}",
                request.method, request.url
            )))
        });
        self.requests.lock().unwrap().push(request);
        outcome
    }
}
