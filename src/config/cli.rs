use crate::core::Storage;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File};
use tokio::io::BufWriter;

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    type Writer = BufWriter<File>;

    fn resolve(&self, name: &str) -> PathBuf {
        Path::new(&self.base_path).join(name)
    }

    async fn create(&self, name: &str) -> Result<Self::Writer> {
        let full_path = self.resolve(name);

        if let Some(parent) = full_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let file = File::create(&full_path).await?;
        Ok(BufWriter::new(file))
    }
}
