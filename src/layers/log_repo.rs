use axum::{Extension, middleware::AddExtension};
use std::{path::PathBuf, sync::Arc};
use tower::Layer;

use crate::repositories::log::{FileLogRepo, LogRepo};

#[derive(Clone)]
pub struct LogRepoLayer(pub LogRepo);

impl LogRepoLayer {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self(Arc::new(FileLogRepo::new(path)))
    }
}

impl<S> Layer<S> for LogRepoLayer {
    type Service = AddExtension<S, LogRepo>;

    fn layer(&self, inner: S) -> Self::Service {
        Extension(self.0.clone()).layer(inner)
    }
}
