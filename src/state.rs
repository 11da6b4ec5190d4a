use std::{path::PathBuf, sync::Arc};

#[derive(Clone)]
pub struct ServerState {
    pub site_dir: Arc<PathBuf>,
}

impl ServerState {
    pub fn new(site_dir: PathBuf) -> Self {
        Self {
            site_dir: Arc::new(site_dir),
        }
    }
}
