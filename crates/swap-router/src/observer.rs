//! 事件的发布与订阅，和交易状态机解耦

use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::states::RouterEvent;

pub trait EventSink: Send + Sync {
    fn emit(&self, event: &RouterEvent);
}

/// 扇出到所有已订阅的 sink
#[derive(Clone, Default)]
pub struct EventBus {
    sinks: Vec<Arc<dyn EventSink>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn publish(&self, event: &RouterEvent) {
        for sink in &self.sinks {
            sink.emit(event);
        }
    }

    pub fn publish_all(&self, events: &[RouterEvent]) {
        for event in events {
            self.publish(event);
        }
    }
}

/// 以结构化日志输出事件
#[derive(Debug, Default)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn emit(&self, event: &RouterEvent) {
        match serde_json::to_string(event) {
            Ok(payload) => info!(event = event.name(), %payload, "📣 router event"),
            Err(e) => debug!("event serialization failed: {}", e),
        }
    }
}

/// 只追加的内存事件日志
#[derive(Debug, Default)]
pub struct MemoryEventLog {
    events: Mutex<Vec<RouterEvent>>,
}

impl MemoryEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<RouterEvent> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn len(&self) -> usize {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn last(&self) -> Option<RouterEvent> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).last().cloned()
    }
}

impl EventSink for MemoryEventLog {
    fn emit(&self, event: &RouterEvent) {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).push(event.clone());
    }
}

/// 通过 tokio broadcast 通道转发事件，供消息总线类订阅者使用
#[derive(Debug, Clone)]
pub struct BroadcastEventSink {
    sender: broadcast::Sender<RouterEvent>,
}

impl BroadcastEventSink {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RouterEvent> {
        self.sender.subscribe()
    }
}

impl EventSink for BroadcastEventSink {
    fn emit(&self, event: &RouterEvent) {
        // 没有订阅者时发送失败，事件直接丢弃
        if self.sender.send(event.clone()).is_err() {
            debug!("no broadcast subscribers for {}", event.name());
        }
    }
}
