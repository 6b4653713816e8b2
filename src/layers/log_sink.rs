use axum::{Extension, middleware::AddExtension};
use std::sync::Arc;
use tower::Layer;

use crate::sinks::{FanOutSink, JsonFileSink, SinkRef, TracingSink};

#[derive(Clone)]
pub struct LogSinkLayer(pub SinkRef);

impl LogSinkLayer {
    /// The combined JSON-lines file, mirrored to tracing output once the
    /// file write has succeeded.
    pub fn tracing_and_file(file: JsonFileSink) -> Self {
        let console: SinkRef = Arc::new(TracingSink::new());

        Self(Arc::new(FanOutSink::new(Arc::new(file), vec![console])))
    }
}

impl<S> Layer<S> for LogSinkLayer {
    type Service = AddExtension<S, SinkRef>;

    fn layer(&self, inner: S) -> Self::Service {
        Extension(self.0.clone()).layer(inner)
    }
}
