use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::watch;

/// 全局忙碌指示器
///
/// 每个进行中的请求持有一个 [`BusyGuard`]，最后一个 guard 释放时才隐藏，
/// 因此先结束的请求不会把仍在进行的请求的指示器提前隐藏。
#[derive(Debug, Clone)]
pub struct BusyIndicator {
    in_flight: Arc<AtomicUsize>,
    visible: Arc<watch::Sender<bool>>,
}

impl Default for BusyIndicator {
    fn default() -> Self {
        Self::new()
    }
}

impl BusyIndicator {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self {
            in_flight: Arc::new(AtomicUsize::new(0)),
            visible: Arc::new(tx),
        }
    }

    /// 在发出请求之前调用
    pub fn show(&self) -> BusyGuard {
        if self.in_flight.fetch_add(1, Ordering::SeqCst) == 0 {
            self.visible.send_replace(true);
        }
        BusyGuard {
            indicator: self.clone(),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// 订阅显示/隐藏变化（CLI 用于驱动 spinner）
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.visible.subscribe()
    }

    fn release(&self) {
        if self.in_flight.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.visible.send_replace(false);
        }
    }
}

/// 请求结束（无论成功失败）时 drop，恰好释放一次
#[derive(Debug)]
#[must_use = "busy indicator hides as soon as the guard is dropped"]
pub struct BusyGuard {
    indicator: BusyIndicator,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.indicator.release();
    }
}
