//! 액션 세션.
//!
//! 사용자 액션마다 tokio 태스크 하나를 띄우고, 새 액션이 시작되거나
//! 메일 아이템이 바뀌면 이전 태스크를 중단한다.
//! 중단 직전에 이미 만들어진 결과는 세대(epoch) 가드가 버린다.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, info};

use sidekick_core::error::CoreError;
use sidekick_core::models::result::ResultUpdate;
use sidekick_core::models::task::GenerationTask;
use sidekick_core::ports::renderer::ResultSink;

use crate::generation::{ActionOutcome, GenerationPipeline};

/// 시작 시점의 세대와 현재 세대가 같을 때만 전달하는 sink
pub struct EpochGuardedSink {
    epoch: u64,
    current: Arc<AtomicU64>,
    inner: Arc<dyn ResultSink>,
}

impl EpochGuardedSink {
    pub fn new(epoch: u64, current: Arc<AtomicU64>, inner: Arc<dyn ResultSink>) -> Self {
        Self {
            epoch,
            current,
            inner,
        }
    }

    fn is_current(&self) -> bool {
        self.current.load(Ordering::SeqCst) == self.epoch
    }
}

impl ResultSink for EpochGuardedSink {
    fn render(&self, update: ResultUpdate) {
        if self.is_current() {
            self.inner.render(update);
        } else {
            debug!(epoch = self.epoch, "이전 세대 결과 폐기");
        }
    }
}

/// 실행 중인 액션 핸들
pub struct ActionHandle {
    epoch: u64,
    task: GenerationTask,
    handle: JoinHandle<Result<ActionOutcome, CoreError>>,
}

impl ActionHandle {
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn task(&self) -> GenerationTask {
        self.task
    }

    /// 액션 중단
    pub fn abort(&self) {
        self.handle.abort();
    }

    /// 액션 완료 대기. 중단된 액션은 `Cancelled`
    pub async fn wait(self) -> Result<ActionOutcome, CoreError> {
        match self.handle.await {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => Err(CoreError::Cancelled),
            Err(e) => Err(CoreError::Internal(format!("액션 태스크 실패: {e}"))),
        }
    }
}

/// taskpane 액션 세션 (한 번에 하나의 액션)
pub struct ActionSession {
    pipeline: Arc<GenerationPipeline>,
    sink: Arc<dyn ResultSink>,
    epoch: Arc<AtomicU64>,
    running: Mutex<Option<AbortHandle>>,
}

impl ActionSession {
    pub fn new(pipeline: Arc<GenerationPipeline>, sink: Arc<dyn ResultSink>) -> Self {
        Self {
            pipeline,
            sink,
            epoch: Arc::new(AtomicU64::new(0)),
            running: Mutex::new(None),
        }
    }

    /// 현재 세대
    pub fn current_epoch(&self) -> u64 {
        self.epoch.load(Ordering::SeqCst)
    }

    /// 이전 액션을 중단하고 새 액션을 시작한다.
    ///
    /// tokio 런타임 안에서 호출해야 한다.
    pub fn start(&self, task: GenerationTask) -> ActionHandle {
        let epoch = self.advance_epoch();
        let sink = EpochGuardedSink::new(epoch, self.epoch.clone(), self.sink.clone());
        let pipeline = self.pipeline.clone();

        let handle = tokio::spawn(async move { pipeline.execute(task, &sink).await });
        *self.running.lock() = Some(handle.abort_handle());

        debug!(task = %task, epoch, "액션 시작");
        ActionHandle {
            epoch,
            task,
            handle,
        }
    }

    /// 메일 아이템 변경: 진행 중 액션을 무효화하고, 자동 실행이 켜져 있으면 시작한다.
    pub fn on_item_changed(&self) -> Option<ActionHandle> {
        let epoch = self.advance_epoch();
        info!(epoch, "메일 아이템 변경");

        let settings = self.pipeline.settings().get();
        if settings.autorun && settings.has_api_key() {
            Some(self.start(settings.autorun_option))
        } else {
            None
        }
    }

    /// 설정 변경 알림 (테마 처리는 렌더링 계층 몫)
    pub fn on_settings_changed(&self) {
        info!("호스트 설정 변경");
    }

    /// 세대를 올리고 실행 중인 태스크를 중단
    fn advance_epoch(&self) -> u64 {
        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(previous) = self.running.lock().take() {
            previous.abort();
        }
        epoch
    }
}
