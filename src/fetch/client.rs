use async_trait::async_trait;
use reqwest::{Request, Response};

/// Minimal seam over an HTTP client so auth decorators can be layered
/// without the rest of the crate knowing about them.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
