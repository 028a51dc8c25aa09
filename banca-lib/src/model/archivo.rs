//! Downloaded report files

use std::path::Path;
use std::path::PathBuf;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use serde::Serialize;

use crate::error::Error;

/// Name used when the server sends no usable file name.
const FALLBACK_FILE_NAME: &str = "reporte";

/// A file returned by the report download endpoints, base64 encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Archivo {
    pub contenido_base64: String,
    pub nombre_archivo: String,
    pub tipo_mime: String,
    #[serde(default)]
    pub tamanio_bytes: u64,
}

impl Archivo {
    /// Decodes the file content.
    pub fn decode(&self) -> Result<Vec<u8>, Error> {
        Ok(STANDARD.decode(self.contenido_base64.trim())?)
    }

    /// The file name with any directory components removed.
    pub fn file_name(&self) -> &str {
        Path::new(&self.nombre_archivo)
            .file_name()
            .and_then(|n| n.to_str())
            .filter(|n| !n.is_empty())
            .unwrap_or(FALLBACK_FILE_NAME)
    }

    /// Decodes the file and writes it into `dir`, returning the full path.
    ///
    /// The directory is created if needed. An existing file with the same
    /// name is overwritten.
    pub async fn save_to(&self, dir: impl AsRef<Path>) -> Result<PathBuf, Error> {
        let bytes = self.decode()?;
        let dir = dir.as_ref();
        tokio::fs::create_dir_all(dir).await?;

        let path = dir.join(self.file_name());
        tokio::fs::write(&path, &bytes).await?;
        log::debug!("Saved {} ({} bytes) to {}", self.tipo_mime, bytes.len(), path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn archivo(nombre: &str, contenido: &str) -> Archivo {
        Archivo {
            contenido_base64: contenido.to_string(),
            nombre_archivo: nombre.to_string(),
            tipo_mime: "application/pdf".to_string(),
            tamanio_bytes: 5,
        }
    }

    #[test]
    fn test_decode() {
        assert_eq!(archivo("r.pdf", "aG9sYQ==").decode().unwrap(), b"hola");
        assert!(matches!(archivo("r.pdf", "***").decode(), Err(Error::Decode(_))));
    }

    #[test]
    fn test_file_name_strips_directories() {
        assert_eq!(archivo("../../etc/passwd", "").file_name(), "passwd");
        assert_eq!(archivo("reporte_cliente.xlsx", "").file_name(), "reporte_cliente.xlsx");
        assert_eq!(archivo("", "").file_name(), FALLBACK_FILE_NAME);
        assert_eq!(archivo("..", "").file_name(), FALLBACK_FILE_NAME);
    }

    #[test]
    fn test_deserialize() {
        let archivo: Archivo = serde_json::from_str(
            r#"{"contenidoBase64":"aG9sYQ==","nombreArchivo":"r.pdf","tipoMime":"application/pdf","tamanioBytes":4}"#,
        )
        .unwrap();
        assert_eq!(archivo.tamanio_bytes, 4);
    }

    #[tokio::test]
    async fn test_save_to() {
        let dir = tempfile::tempdir().unwrap();
        let path = archivo("sub/r.pdf", "aG9sYQ==")
            .save_to(dir.path().join("descargas"))
            .await
            .unwrap();
        assert_eq!(path, dir.path().join("descargas").join("r.pdf"));
        assert_eq!(std::fs::read(&path).unwrap(), b"hola");
    }
}
