use crate::core::orchestrator::SyncOrchestrator;
use crate::core::{CrmClient, OrderSource};
use crate::domain::model::SyncReport;
use crate::utils::error::SyncError;
#[cfg(feature = "cli")]
use crate::utils::monitor::SystemMonitor;

/// 單次同步對呼叫端只有兩種結果
#[derive(Debug)]
pub enum SyncOutcome {
    Success(SyncReport),
    Failure(SyncError),
}

impl SyncOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncOutcome::Success(_) => "success",
            SyncOutcome::Failure(_) => "failure",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SyncOutcome::Success(_))
    }

    pub fn report(&self) -> Option<&SyncReport> {
        match self {
            SyncOutcome::Success(report) => Some(report),
            SyncOutcome::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&SyncError> {
        match self {
            SyncOutcome::Success(_) => None,
            SyncOutcome::Failure(e) => Some(e),
        }
    }
}

pub struct SyncEngine<O: OrderSource, C: CrmClient> {
    orchestrator: SyncOrchestrator<O, C>,
    monitoring: bool,
}

impl<O: OrderSource, C: CrmClient> SyncEngine<O, C> {
    pub fn new(orchestrator: SyncOrchestrator<O, C>) -> Self {
        Self {
            orchestrator,
            monitoring: false,
        }
    }

    pub fn new_with_monitoring(orchestrator: SyncOrchestrator<O, C>, monitoring: bool) -> Self {
        Self {
            orchestrator,
            monitoring,
        }
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring
    }

    /// 頂層處理：任何一步的錯誤都收斂成統一的 failure，不存在部分成功；
    /// 已寫入 CRM 的紀錄（例如先建立的聯絡人）不會回滾
    pub async fn run(&self, order_id: &str) -> SyncOutcome {
        #[cfg(feature = "cli")]
        let monitor = SystemMonitor::new(self.monitoring);

        let outcome = match self.orchestrator.run(order_id).await {
            Ok(report) => {
                tracing::info!("✅ Integration completed successfully!");
                SyncOutcome::Success(report)
            }
            Err(e) => {
                tracing::error!("❌ Integration failed: {}", e);
                SyncOutcome::Failure(e)
            }
        };

        #[cfg(feature = "cli")]
        monitor.log_stats();

        outcome
    }
}
