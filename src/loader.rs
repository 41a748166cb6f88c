//! Manifest loading.
//!
//! Reads a manifest from disk and deserializes it into the document model.
//! Read failures and parse failures are reported as distinct errors; the
//! validation engine only ever sees a successfully parsed document.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::document::Document;

/// Errors that stop a run before validation starts
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("cannot read file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file is not a YAML document of the expected shape.
    #[error("cannot parse file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

/// A loaded manifest together with the text it was parsed from
#[derive(Debug, Clone)]
pub struct Source {
    /// Caller-facing name of the input, used to prefix diagnostics
    pub id: String,
    pub text: String,
    pub document: Document,
}

/// Parse manifest text into a document.
///
/// Keys without a value read as empty, an unusual `cpu` value is kept for
/// validation to report, and a label defined twice is rejected.
pub fn parse_document(text: &str) -> Result<Document, serde_yaml::Error> {
    serde_yaml::from_str(text)
}

/// Read and parse the manifest at `path`
pub fn load_file(path: &Path) -> Result<Source, LoadError> {
    log::debug!("loading manifest from {:?}", path);

    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let document = parse_document(&text).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(Source {
        id: path.display().to_string(),
        text,
        document,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::CpuQuantity;

    #[test]
    fn test_parse_full_document() {
        let text = r#"
apiVersion: v1
kind: Pod
metadata:
  name: web
  namespace: default
  labels:
    app: web
spec:
  os: linux
  containers:
    - name: api
      image: registry.bigbrother.io/api:1.0
      ports:
        - containerPort: 8080
          protocol: TCP
      readinessProbe:
        httpGet:
          path: /ready
          port: 8080
      resources:
        limits:
          cpu: "2"
          memory: 256Mi
"#;
        let doc = parse_document(text).unwrap();
        assert_eq!(doc.metadata.namespace.as_deref(), Some("default"));
        assert_eq!(doc.metadata.labels.get("app").map(String::as_str), Some("web"));

        let container = &doc.spec.containers[0];
        assert_eq!(container.ports[0].container_port, 8080);
        assert_eq!(container.readiness_probe.as_ref().unwrap().http_get.path, "/ready");
        assert!(container.liveness_probe.is_none());
        assert_eq!(
            container.resources.as_ref().unwrap().limits.cpu,
            Some(CpuQuantity::Text("2".to_string()))
        );
    }

    #[test]
    fn test_wrong_fundamental_type_is_parse_error() {
        assert!(parse_document("metadata: just-a-string").is_err());
        assert!(parse_document("spec:\n  containers: 3").is_err());
    }

    #[test]
    fn test_malformed_yaml_is_parse_error() {
        assert!(parse_document("kind: [Pod").is_err());
    }
}
