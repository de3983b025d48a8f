use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::debug;
use thiserror::Error;

use crate::api::dto::StatusDocument;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Ошибка ввода-вывода: {0}")]
    Io(#[from] std::io::Error),

    #[error("Некорректный JSON документа статуса: {0}")]
    Json(#[from] serde_json::Error),
}

/// Абстракция хранилища документа статуса.
///
/// Файловая реализация – для HUD, in-memory – для тестов.
pub trait StatusStorage {
    fn save(&mut self, doc: &StatusDocument) -> Result<(), PersistenceError>;

    fn load(&self) -> Result<StatusDocument, PersistenceError>;
}

/// Документ статуса в JSON-файле.
#[derive(Clone, Debug)]
pub struct FileStatusStorage {
    path: PathBuf,
}

impl FileStatusStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StatusStorage for FileStatusStorage {
    fn save(&mut self, doc: &StatusDocument) -> Result<(), PersistenceError> {
        save_document(&self.path, doc)
    }

    fn load(&self) -> Result<StatusDocument, PersistenceError> {
        load_document(&self.path)
    }
}

/// Хранилище в памяти: последний записанный документ.
#[derive(Clone, Debug, Default)]
pub struct InMemoryStatusStorage {
    doc: Option<StatusDocument>,
}

impl InMemoryStatusStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatusStorage for InMemoryStatusStorage {
    fn save(&mut self, doc: &StatusDocument) -> Result<(), PersistenceError> {
        self.doc = Some(doc.clone());
        Ok(())
    }

    fn load(&self) -> Result<StatusDocument, PersistenceError> {
        self.doc.clone().ok_or_else(|| {
            PersistenceError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "status document was never saved",
            ))
        })
    }
}

/// Записать документ атомарно: во временный файл рядом, потом rename.
/// При ошибке прежний файл не трогается.
pub fn save_document(path: &Path, doc: &StatusDocument) -> Result<(), PersistenceError> {
    let json = serde_json::to_string_pretty(doc)?;

    let mut tmp_name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);

    let written = fs::File::create(&tmp).and_then(|mut file| {
        file.write_all(json.as_bytes())?;
        file.sync_all()
    });
    if let Err(e) = written.and_then(|_| fs::rename(&tmp, path)) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }

    debug!("status document saved to '{}'", path.display());
    Ok(())
}

/// Прочитать и разобрать документ целиком.
pub fn load_document(path: &Path) -> Result<StatusDocument, PersistenceError> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}
