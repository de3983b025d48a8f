use log::{debug, info};

use crate::engine::errors::EngineError;
use crate::state::TableSnapshot;

/// Ограниченная история снимков с курсором для отмены.
///
/// `entries[cursor]` – текущее состояние. Запись после отмены отрезает
/// всё, что правее курсора; при переполнении выпадает самый старый снимок.
#[derive(Clone, Debug)]
pub struct UndoHistory {
    entries: Vec<TableSnapshot>,
    cursor: usize,
    capacity: usize,
}

impl UndoHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            cursor: 0,
            capacity: capacity.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> Option<&TableSnapshot> {
        self.entries.get(self.cursor)
    }

    /// Записать снимок. Снимок, совпадающий с текущим по сокращённому
    /// сравнению, не записывается; возвращает, был ли он записан.
    pub fn push(&mut self, snapshot: TableSnapshot) -> bool {
        if self.current().is_some_and(|cur| cur.same_state(&snapshot)) {
            debug!("history push skipped: state unchanged");
            return false;
        }

        if !self.entries.is_empty() {
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push(snapshot);
        if self.entries.len() > self.capacity {
            self.entries.remove(0);
        }
        self.cursor = self.entries.len() - 1;
        debug!("history entry {} of {}", self.cursor + 1, self.entries.len());
        true
    }

    /// Шаг назад: вернуть снимок, который нужно восстановить.
    pub fn undo(&mut self) -> Result<&TableSnapshot, EngineError> {
        if self.cursor == 0 {
            return Err(EngineError::NoHistory);
        }
        self.cursor -= 1;
        info!("undo to history entry {}", self.cursor + 1);
        self.entries.get(self.cursor).ok_or(EngineError::NoHistory)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }
}
