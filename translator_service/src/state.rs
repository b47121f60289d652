// Copyright (c) 2024-present Sonatype, Inc. All rights reserved.
// "Sonatype" is a trademark of Sonatype, Inc.

use std::sync::Arc;

use downstream_client::DownstreamClient;
use error_translator::ErrorTranslator;

#[derive(Clone)]
pub struct AppState {
    pub translator: ErrorTranslator,
    pub downstream_client: Arc<DownstreamClient>,
    pub public_base_url: Option<Arc<str>>,
}

impl AppState {
    pub fn new(
        translator: ErrorTranslator,
        downstream_client: DownstreamClient,
        public_base_url: Option<String>,
    ) -> Self {
        Self {
            translator,
            downstream_client: Arc::new(downstream_client),
            public_base_url: public_base_url.map(Arc::from),
        }
    }
}
