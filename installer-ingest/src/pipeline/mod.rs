use std::{pin::Pin, sync::Arc, time::SystemTime};

use futures::{Stream, StreamExt};

#[derive(Debug, Clone)]
pub struct Envelope<T> {
    pub payload: T,
    pub received_at: SystemTime,
}

impl<T> Envelope<T> {
    pub fn now(payload: T) -> Self {
        Self {
            payload,
            received_at: SystemTime::now(),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error("source error: {0}")]
    Source(String),
    #[error("transform error: {0}")]
    Transform(String),
    #[error("sink error: {0}")]
    Sink(String),
    #[error("no records reached the sink")]
    EmptyDataset,
}

pub type EnvelopeStream<T> = Pin<Box<dyn Stream<Item = Result<Envelope<T>, PipelineError>> + Send>>;

#[async_trait::async_trait]
pub trait Source<T>: Send + Sync {
    async fn stream(&self) -> EnvelopeStream<T>;
}

#[async_trait::async_trait]
pub trait Transform<I, O>: Send + Sync {
    async fn apply(&self, input: Envelope<I>) -> Result<Envelope<O>, PipelineError>;
}

#[async_trait::async_trait]
pub trait Sink<T>: Send + Sync {
    async fn run<S>(&self, input: S) -> Result<(), PipelineError>
    where
        S: Stream<Item = Result<Envelope<T>, PipelineError>> + Send + Unpin + 'static;
}

pub struct Pipeline<S, T, K> {
    pub source: S,
    pub transforms: Vec<Arc<dyn Transform<T, T> + Send + Sync>>, // same-type transforms chain
    pub sink: K,
}

impl<T, S, K> Pipeline<S, T, K>
where
    T: Send + 'static,
    S: Source<T> + Send + Sync + 'static,
    K: Sink<T> + Send + Sync + 'static,
{
    pub async fn run(self) -> Result<(), PipelineError> {
        let mut stream = self.source.stream().await;

        // Apply transforms in sequence (if any).
        for t in self.transforms {
            let t_arc = t.clone();
            stream = Box::pin(stream.then(move |item| {
                let t_inner = t_arc.clone();
                async move {
                    match item {
                        Ok(env) => t_inner.apply(env).await,
                        Err(e) => Err(e),
                    }
                }
            }));
        }

        self.sink.run(stream).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct VecSource(Vec<u32>);

    #[async_trait::async_trait]
    impl Source<u32> for VecSource {
        async fn stream(&self) -> EnvelopeStream<u32> {
            let items: Vec<_> = self.0.iter().copied().map(|v| Ok(Envelope::now(v))).collect();
            Box::pin(futures::stream::iter(items))
        }
    }

    struct RejectOdd;

    #[async_trait::async_trait]
    impl Transform<u32, u32> for RejectOdd {
        async fn apply(&self, input: Envelope<u32>) -> Result<Envelope<u32>, PipelineError> {
            if input.payload % 2 == 1 {
                Err(PipelineError::Transform("odd".to_string()))
            } else {
                Ok(input)
            }
        }
    }

    #[derive(Default)]
    struct Collect {
        seen: Arc<Mutex<Vec<Result<u32, String>>>>,
    }

    #[async_trait::async_trait]
    impl Sink<u32> for Collect {
        async fn run<S>(&self, mut input: S) -> Result<(), PipelineError>
        where
            S: Stream<Item = Result<Envelope<u32>, PipelineError>> + Send + Unpin + 'static,
        {
            while let Some(item) = input.next().await {
                let entry = item.map(|env| env.payload).map_err(|e| e.to_string());
                self.seen.lock().unwrap().push(entry);
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn transforms_run_in_order_and_errors_flow_to_sink() {
        let sink = Collect::default();
        let seen = sink.seen.clone();
        let pipeline: Pipeline<_, u32, _> = Pipeline {
            source: VecSource(vec![2, 3, 4]),
            transforms: vec![Arc::new(RejectOdd)],
            sink,
        };

        pipeline.run().await.unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0], Ok(2));
        assert_eq!(seen[1], Err("transform error: odd".to_string()));
        assert_eq!(seen[2], Ok(4));
    }
}
