use std::{path::Path as FsPath, sync::Arc};

use log::info;
use object_store::{
    Attribute, Attributes, ObjectStore, PutOptions, PutPayload, gcp::GoogleCloudStorageBuilder,
    local::LocalFileSystem, path::Path,
};

use crate::error::{Error, Result};

pub const CONTENT_TYPE: &str = "text/csv";

/// A named object store the CSV is published to.
#[derive(Debug, Clone)]
pub struct Bucket {
    name: String,
    store: Arc<dyn ObjectStore>,
    // LocalFileSystem refuses puts that carry attributes.
    content_type: bool,
}

impl Bucket {
    pub fn new(name: impl Into<String>, store: Arc<dyn ObjectStore>) -> Self {
        Self {
            name: name.into(),
            store,
            content_type: true,
        }
    }

    /// Google Cloud Storage bucket. Credentials come from the environment
    /// (`GOOGLE_APPLICATION_CREDENTIALS`, `GOOGLE_SERVICE_ACCOUNT`, or the
    /// instance metadata server).
    pub fn gcs(name: &str) -> object_store::Result<Self> {
        let store = GoogleCloudStorageBuilder::from_env()
            .with_bucket_name(name)
            .build()?;
        Ok(Self::new(name, Arc::new(store)))
    }

    /// Directory-backed bucket for dry runs, created if missing.
    pub fn local(dir: &FsPath) -> object_store::Result<Self> {
        std::fs::create_dir_all(dir).map_err(|e| object_store::Error::Generic {
            store: "LocalFileSystem",
            source: Box::new(e),
        })?;
        let store = LocalFileSystem::new_with_prefix(dir)?;
        Ok(Self {
            name: dir.display().to_string(),
            store: Arc::new(store),
            content_type: false,
        })
    }

    pub fn store(&self) -> &dyn ObjectStore {
        self.store.as_ref()
    }

    /// Writes `csv` at `key`, replacing whatever was there.
    pub async fn publish(&self, key: &str, csv: String) -> Result<()> {
        let mut opts = PutOptions::default();
        if self.content_type {
            let mut attributes = Attributes::new();
            attributes.insert(Attribute::ContentType, CONTENT_TYPE.into());
            opts.attributes = attributes;
        }

        self.store
            .put_opts(&Path::from(key), PutPayload::from(csv), opts)
            .await
            .map_err(|source| Error::Storage {
                bucket: self.name.clone(),
                key: key.to_string(),
                source,
            })?;

        info!("File {} saved in bucket {}", key, self.name);
        Ok(())
    }
}
