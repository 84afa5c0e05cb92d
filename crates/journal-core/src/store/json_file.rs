//! JSON 파일 기반 매매 기록 저장소.

use std::fs;
use std::path::{Path, PathBuf};

use super::{InMemoryTradeLog, NewTradeLog, TradeLogPatch, TradeLogRepository};
use crate::domain::TradeRecord;
use crate::error::JournalResult;

/// 변경할 때마다 전체 기록을 JSON 배열로 다시 쓰는 저장소.
///
/// 변경은 복사본에 적용해 파일에 쓴 뒤에만 메모리에 반영합니다.
/// 쓰기가 실패하면 메모리 상태는 이전 그대로입니다.
#[derive(Debug)]
pub struct JsonTradeLog {
    path: PathBuf,
    inner: InMemoryTradeLog,
}

impl JsonTradeLog {
    /// 파일을 열어 기록을 읽습니다. 파일이 없으면 빈 저장소로 시작합니다.
    pub fn open(path: impl AsRef<Path>) -> JournalResult<Self> {
        let path = path.as_ref().to_path_buf();
        let records: Vec<TradeRecord> = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            if raw.trim().is_empty() {
                Vec::new()
            } else {
                serde_json::from_str(&raw)?
            }
        } else {
            Vec::new()
        };

        tracing::debug!(path = %path.display(), count = records.len(), "매매 기록 파일 로드");
        Ok(Self {
            path,
            inner: InMemoryTradeLog::from_records(records)?,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 복사본에 변경을 적용하고, 파일 쓰기가 성공하면 교체합니다.
    fn commit<T>(
        &mut self,
        change: impl FnOnce(&mut InMemoryTradeLog) -> JournalResult<T>,
    ) -> JournalResult<T> {
        let mut candidate = self.inner.clone();
        let result = change(&mut candidate)?;
        self.persist(&candidate)?;
        self.inner = candidate;
        Ok(result)
    }

    /// 임시 파일에 쓴 뒤 교체합니다.
    fn persist(&self, log: &InMemoryTradeLog) -> JournalResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(log.records())?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl TradeLogRepository for JsonTradeLog {
    fn list(&self) -> JournalResult<Vec<TradeRecord>> {
        self.inner.list()
    }

    fn get(&self, id: &str) -> JournalResult<TradeRecord> {
        self.inner.get(id)
    }

    fn add(&mut self, input: NewTradeLog) -> JournalResult<TradeRecord> {
        self.commit(|log| log.add(input))
    }

    fn update(&mut self, id: &str, patch: TradeLogPatch) -> JournalResult<TradeRecord> {
        self.commit(|log| log.update(id, patch))
    }

    fn delete(&mut self, id: &str) -> JournalResult<TradeRecord> {
        self.commit(|log| log.delete(id))
    }
}
