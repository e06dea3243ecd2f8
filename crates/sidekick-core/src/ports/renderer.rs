//! 렌더링 포트.

use crate::models::result::ResultUpdate;

/// 결과 렌더링 계층 (taskpane UI 등)
pub trait ResultSink: Send + Sync {
    fn render(&self, update: ResultUpdate);
}
