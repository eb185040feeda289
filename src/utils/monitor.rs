#[cfg(feature = "cli")]
use std::sync::Mutex;
#[cfg(feature = "cli")]
use std::time::Instant;
#[cfg(feature = "cli")]
use sysinfo::{Pid, System};

/// 每個步驟結束後記錄本程序的 CPU 與記憶體用量 (--monitor)
#[cfg(feature = "cli")]
pub struct SystemMonitor {
    tracked: Option<Mutex<TrackedProcess>>,
    started: Instant,
}

#[cfg(feature = "cli")]
struct TrackedProcess {
    system: System,
    pid: Pid,
    peak_memory_mb: u64,
}

#[cfg(feature = "cli")]
struct Usage {
    cpu_percent: f32,
    memory_mb: u64,
    peak_memory_mb: u64,
}

#[cfg(feature = "cli")]
impl SystemMonitor {
    pub fn new(enabled: bool) -> Self {
        let tracked = if enabled {
            match sysinfo::get_current_pid() {
                Ok(pid) => {
                    let mut system = System::new();
                    system.refresh_all();
                    Some(Mutex::new(TrackedProcess {
                        system,
                        pid,
                        peak_memory_mb: 0,
                    }))
                }
                Err(e) => {
                    tracing::warn!("Unable to resolve current PID, monitoring disabled: {}", e);
                    None
                }
            }
        } else {
            None
        };

        Self {
            tracked,
            started: Instant::now(),
        }
    }

    fn sample(&self) -> Option<Usage> {
        let mut tracked = self.tracked.as_ref()?.lock().ok()?;
        let TrackedProcess {
            system,
            pid,
            peak_memory_mb,
        } = &mut *tracked;

        system.refresh_all();
        let process = system.process(*pid)?;
        let memory_mb = process.memory() / 1024 / 1024;
        *peak_memory_mb = (*peak_memory_mb).max(memory_mb);

        Some(Usage {
            cpu_percent: process.cpu_usage(),
            memory_mb,
            peak_memory_mb: *peak_memory_mb,
        })
    }

    pub fn log_stats(&self, phase: &str) {
        if let Some(usage) = self.sample() {
            tracing::info!(
                "📊 {} - CPU: {:.1}%, Memory: {}MB, Peak: {}MB, Time: {:?}",
                phase,
                usage.cpu_percent,
                usage.memory_mb,
                usage.peak_memory_mb,
                self.started.elapsed()
            );
        }
    }

    pub fn log_final_stats(&self) {
        if let Some(usage) = self.sample() {
            tracing::info!(
                "📊 Final Stats - Total Time: {:?}, Peak Memory: {}MB",
                self.started.elapsed(),
                usage.peak_memory_mb
            );
        }
    }
}

// 非 CLI 建置沒有 sysinfo, 監控為空操作
#[cfg(not(feature = "cli"))]
pub struct SystemMonitor;

#[cfg(not(feature = "cli"))]
impl SystemMonitor {
    pub fn new(_enabled: bool) -> Self {
        Self
    }

    pub fn log_stats(&self, _phase: &str) {}

    pub fn log_final_stats(&self) {}
}
