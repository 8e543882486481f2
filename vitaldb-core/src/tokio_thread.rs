use std::{future::Future, pin::Pin};

type Task = Pin<Box<dyn Future<Output = ()> + Send>>;

/// A multi-threaded tokio runtime driven from its own OS thread, so that
/// synchronous front ends can hand it work.
pub struct TokioThread {
    tokio: TokioHandle,
    _tokio_thread_handle: std::thread::JoinHandle<()>,
}
struct TokioHandle(tokio::sync::mpsc::Sender<Task>);
impl TokioHandle {
    fn spawn(&self, task: impl Future<Output = ()> + Send + 'static) {
        if self.0.blocking_send(Box::pin(task)).is_err() {
            tracing::warn!("Background runtime has shut down, dropping task");
        }
    }
}
impl TokioThread {
    const QUEUE_SIZE: usize = 100;

    pub fn new() -> std::io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        let (tokio_tx, mut tokio_rx) = tokio::sync::mpsc::channel::<Task>(Self::QUEUE_SIZE);
        let tokio = TokioHandle(tokio_tx);

        let tokio_thread_handle = std::thread::Builder::new()
            .name("vitaldb-tokio".to_string())
            .spawn(move || {
                runtime.block_on(async {
                    while let Some(task) = tokio_rx.recv().await {
                        tokio::spawn(task);
                    }
                });
            })?;

        Ok(Self {
            tokio,
            _tokio_thread_handle: tokio_thread_handle,
        })
    }

    /// Must not be called from inside the runtime.
    pub fn spawn(&self, task: impl Future<Output = ()> + Send + 'static) {
        self.tokio.spawn(task);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{sync::mpsc, time::Duration};

    #[test]
    fn runs_spawned_tasks() {
        let thread = TokioThread::new().unwrap();
        let (tx, rx) = mpsc::channel();
        thread.spawn(async move {
            tokio::time::sleep(Duration::from_millis(1)).await;
            tx.send(42).unwrap();
        });
        assert_eq!(rx.recv_timeout(Duration::from_secs(5)), Ok(42));
    }
}
