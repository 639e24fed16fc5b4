//! Runtime-selected provider.
//!
//! `LlmProvider::complete` returns `impl Future`, so the trait cannot be a
//! trait object. [`BoxLlmProvider`] erases the concrete backend behind a
//! private object-safe twin whose future is boxed.

use std::future::Future;
use std::pin::Pin;

use builderschool_types::llm::{CompletionRequest, CompletionResponse, LlmError};

use super::provider::LlmProvider;

type CompletionFuture<'a> =
    Pin<Box<dyn Future<Output = Result<CompletionResponse, LlmError>> + Send + 'a>>;

trait ErasedProvider: Send + Sync {
    fn provider_name(&self) -> &str;

    fn complete_erased<'a>(&'a self, request: &'a CompletionRequest) -> CompletionFuture<'a>;
}

impl<P: LlmProvider> ErasedProvider for P {
    fn provider_name(&self) -> &str {
        self.name()
    }

    fn complete_erased<'a>(&'a self, request: &'a CompletionRequest) -> CompletionFuture<'a> {
        Box::pin(self.complete(request))
    }
}

/// Whichever backend the configuration picked.
pub struct BoxLlmProvider(Box<dyn ErasedProvider>);

impl BoxLlmProvider {
    pub fn new<P: LlmProvider + 'static>(provider: P) -> Self {
        Self(Box::new(provider))
    }

    pub fn name(&self) -> &str {
        self.0.provider_name()
    }

    pub fn complete<'a>(&'a self, request: &'a CompletionRequest) -> CompletionFuture<'a> {
        self.0.complete_erased(request)
    }
}
